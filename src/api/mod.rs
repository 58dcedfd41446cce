// ==========================================
// 登记系统 - API层
// ==========================================
// 职责: 面向管理端的导入/导出入口
// ==========================================

pub mod error;
pub mod task_category_api;

pub use error::{ApiError, ApiResult};
pub use task_category_api::{ExportFile, TaskCategoryApi};
