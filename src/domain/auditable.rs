// ==========================================
// 登记系统 - 可审计基础字段
// ==========================================
// 共享片段: 每个可导入/导出的记录类型都在自身列之后
//           追加这组审计列（位置由列位置解析统一偏移）
// ==========================================

use crate::importer::metadata::{CellSpec, CellValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 审计列片段（本地位置从 0 开始）
pub const AUDITABLE_CELLS: &[CellSpec] = &[
    CellSpec::new("createdBy", 0).header("Created by"),
    CellSpec::new("createdAt", 1).header("Created at"),
];

// ==========================================
// AuditFields - 审计信息
// ==========================================
// 说明: 只有创建人/创建时间映射到工作表；
//       最后修改信息仅持久化
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditFields {
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub last_modified_by: Option<String>,
    pub last_modified_at: Option<DateTime<Utc>>,
}

impl AuditFields {
    /// 新建记录的审计信息
    pub fn created(actor: &str, at: DateTime<Utc>) -> Self {
        Self {
            created_by: actor.to_string(),
            created_at: at,
            last_modified_by: None,
            last_modified_at: None,
        }
    }

    /// 记录一次修改
    pub fn touch(&mut self, actor: &str, at: DateTime<Utc>) {
        self.last_modified_by = Some(actor.to_string());
        self.last_modified_at = Some(at);
    }

    /// 审计列的单元格值
    pub fn cell_value(&self, field: &str) -> CellValue {
        match field {
            "createdBy" => CellValue::Text(self.created_by.clone()),
            "createdAt" => CellValue::DateTime(self.created_at),
            _ => CellValue::Empty,
        }
    }
}
