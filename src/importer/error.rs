// ==========================================
// 登记系统 - 导入/导出模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 缺失工作表/表头不一致属于软性校验失败，
//       不走这里，而是累积进 ValidationResult.messages
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 导入/导出模块错误类型（硬性失败）
#[derive(Error, Debug)]
pub enum ImpexError {
    // ===== 调用协议错误 =====
    #[error("文件格式不支持: {0}（仅支持 application/vnd.ms-excel 与 application/vnd.openxmlformats-officedocument.spreadsheetml.sheet）")]
    UnsupportedFormat(String),

    #[error("导出格式不支持: {0}（仅支持 .xlsx 导出）")]
    UnsupportedExportFormat(String),

    // ===== 文档解析错误 =====
    #[error("电子表格解析失败 ({format}): {message}")]
    MalformedDocument { format: String, message: String },

    // ===== 元数据配置错误 =====
    #[error("类型 {type_name} 未声明任何映射列")]
    NoMappedFields { type_name: String },

    #[error("无法确定共享基础字段之前的列位置: 没有非基础字段")]
    NoLocalFields,

    #[error("类型 {type_name} 的列位置 {position} 被多个字段占用: {first}, {second}")]
    DuplicatePosition {
        type_name: String,
        position: u32,
        first: String,
        second: String,
    },

    #[error("字段 {field} 的列位置 {position} 超出可表示范围")]
    PositionOverflow { field: String, position: u32 },

    #[error("类型 {type_name} 未声明字段 {field}")]
    UnknownField { type_name: String, field: String },

    // ===== 导出错误 =====
    #[error("Excel 写入失败: {0}")]
    ExportError(String),

    // ===== 数据访问错误 =====
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ImpexError {
    /// 是否为元数据配置错误（编程错误，而非用户输入问题）
    pub fn is_metadata_error(&self) -> bool {
        matches!(
            self,
            ImpexError::NoMappedFields { .. }
                | ImpexError::NoLocalFields
                | ImpexError::DuplicatePosition { .. }
                | ImpexError::PositionOverflow { .. }
                | ImpexError::UnknownField { .. }
        )
    }
}

// 实现 From<calamine::XlsError>
impl From<calamine::XlsError> for ImpexError {
    fn from(err: calamine::XlsError) -> Self {
        ImpexError::MalformedDocument {
            format: "xls".to_string(),
            message: err.to_string(),
        }
    }
}

// 实现 From<calamine::XlsxError>
impl From<calamine::XlsxError> for ImpexError {
    fn from(err: calamine::XlsxError) -> Self {
        ImpexError::MalformedDocument {
            format: "xlsx".to_string(),
            message: err.to_string(),
        }
    }
}

// 实现 From<rust_xlsxwriter::XlsxError>
impl From<rust_xlsxwriter::XlsxError> for ImpexError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ImpexError::ExportError(err.to_string())
    }
}

/// Result 类型别名
pub type ImpexResult<T> = Result<T, ImpexError>;
