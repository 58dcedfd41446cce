// ==========================================
// 登记系统 - 导出层
// ==========================================
// 职责: 按列元数据将记录写为电子表格
// ==========================================

pub mod excel_writer;
pub mod export_service;

pub use excel_writer::ExcelWriter;
pub use export_service::{ExportService, ExportedWorkbook};
