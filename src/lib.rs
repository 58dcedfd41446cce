// ==========================================
// 登记系统 - 电子表格导入/导出核心库
// ==========================================
// 技术栈: Rust + SQLite + calamine / rust_xlsxwriter
// 系统定位: 管理端批量导入/导出（先校验、后写入）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录类型与列布局
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - 元数据映射、校验与导入
pub mod importer;

// 导出层 - 工作表写入
pub mod exporter;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 管理端接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{AuditFields, TaskCategory, TASK_CATEGORY_LAYOUT};

// 导入/导出
pub use exporter::{ExportService, ExportedWorkbook};
pub use importer::{
    Document, EntityImporter, ExcelValidator, ImpexError, ImpexResult, ImportService,
    TaskCategoryImporter, ValidationResult,
};

// 消息目录
pub use i18n::{MessageCatalog, RustI18nCatalog, StaticCatalog};

// API
pub use api::{ApiError, ApiResult, TaskCategoryApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
