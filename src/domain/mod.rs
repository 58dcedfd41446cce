// ==========================================
// 登记系统 - 领域模型层
// ==========================================
// 职责: 定义可导入/导出的记录类型及其列布局
// 红线: 不含数据访问逻辑
// ==========================================

pub mod auditable;
pub mod task_category;

// 重导出核心类型
pub use auditable::{AuditFields, AUDITABLE_CELLS};
pub use task_category::{TaskCategory, TASK_CATEGORY_LAYOUT};
