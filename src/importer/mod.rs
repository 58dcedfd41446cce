// ==========================================
// 登记系统 - 导入层
// ==========================================
// 职责: 电子表格 ↔ 记录类型的元数据驱动映射与校验
// 流程: 文档适配 → 工作表解析 + 字段元数据 → 列位置 → 表头解析
//       → 表头校验 → (通过时) 实体导入
// 支持: .xls / .xlsx
// ==========================================

// 模块声明
pub mod document;
pub mod error;
pub mod header;
pub mod header_validator;
pub mod metadata;
pub mod orchestrator;
pub mod position;
pub mod sheet_resolver;
pub mod task_category_importer;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

// 重导出核心类型
pub use document::{Document, Sheet, SpreadsheetFormat, APPLICATION_XLS, APPLICATION_XLSX};
pub use error::{ImpexError, ImpexResult};
pub use header::{parse_camel_case, resolve_header};
pub use header_validator::validate_headers;
pub use metadata::{describe, CellSpec, CellValue, FieldDescriptor, RecordLayout, SheetRecord};
pub use orchestrator::{EntityImporter, ImportService};
pub use position::{resolve_positions, EffectiveColumn};
pub use sheet_resolver::{resolve_sheet, MappedSheet, SheetSpec};
pub use task_category_importer::TaskCategoryImporter;
pub use validation::{ExcelValidator, ValidationResult};
