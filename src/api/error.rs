// ==========================================
// 登记系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，将导入/导出与仓储错误
//       转换为面向管理端调用方的错误消息
// ==========================================

use crate::importer::error::ImpexError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 请求错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("不支持的文件类型: {0}")]
    UnsupportedMediaType(String),

    #[error("上传文件过大: {size} 字节（上限 {limit} 字节）")]
    PayloadTooLarge { size: usize, limit: usize },

    #[error("无法解析电子表格: {0}")]
    InvalidDocument(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("业务规则违反: {0}")]
    BusinessRuleViolation(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    #[error("数据库事务失败: {0}")]
    DatabaseTransactionError(String),

    // ==========================================
    // 导出错误
    // ==========================================
    #[error("导出失败: {0}")]
    ExportError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::DatabaseTransactionError(msg) => {
                ApiError::DatabaseTransactionError(msg)
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("唯一约束违反: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("外键约束违反: {}", msg))
            }
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

// ==========================================
// 从 ImpexError 转换
// 说明: 元数据配置错误属于编程错误，对调用方表现为内部错误
// ==========================================
impl From<ImpexError> for ApiError {
    fn from(err: ImpexError) -> Self {
        match err {
            ImpexError::UnsupportedFormat(content_type)
            | ImpexError::UnsupportedExportFormat(content_type) => {
                ApiError::UnsupportedMediaType(content_type)
            }
            ImpexError::MalformedDocument { format, message } => {
                ApiError::InvalidDocument(format!("{}: {}", format, message))
            }
            ImpexError::ExportError(msg) => ApiError::ExportError(msg),
            ImpexError::Repository(err) => err.into(),
            other @ (ImpexError::NoMappedFields { .. }
            | ImpexError::NoLocalFields
            | ImpexError::DuplicatePosition { .. }
            | ImpexError::PositionOverflow { .. }
            | ImpexError::UnknownField { .. }) => ApiError::InternalError(other.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::InternalError(format!("后台任务失败: {}", err))
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
