// ==========================================
// 登记系统 - 校验结果与工作表校验器
// ==========================================
// 校验流程:
// 1. 描述字段元数据
// 2. 解析最终列位置
// 3. 定位工作表（缺失 → 诊断，继续）
// 4. 校验表头（工作表缺失时跳过）
// ==========================================

use crate::i18n::MessageCatalog;
use crate::importer::document::Document;
use crate::importer::error::ImpexResult;
use crate::importer::header_validator::validate_headers;
use crate::importer::metadata::{describe, RecordLayout};
use crate::importer::position::resolve_positions;
use crate::importer::sheet_resolver::resolve_sheet;
use serde::Serialize;
use tracing::debug;

// ==========================================
// ValidationResult - 校验/导入的唯一外部结果
// ==========================================
// 不变量: success == messages.is_empty()
// 字段私有，只能经构造函数创建，构造后不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    success: bool,
    messages: Vec<String>,
}

impl ValidationResult {
    pub fn success() -> Self {
        Self {
            success: true,
            messages: Vec::new(),
        }
    }

    pub fn from_messages(messages: Vec<String>) -> Self {
        Self {
            success: messages.is_empty(),
            messages,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

// ==========================================
// ExcelValidator - 工作表结构校验
// ==========================================
pub struct ExcelValidator<'a> {
    catalog: &'a dyn MessageCatalog,
}

impl<'a> ExcelValidator<'a> {
    pub fn new(catalog: &'a dyn MessageCatalog) -> Self {
        Self { catalog }
    }

    /// 校验文档中记录类型对应的工作表
    ///
    /// 缺失工作表与表头不一致都累积为消息；元数据配置错误返回 Err。
    pub fn validate_sheet(
        &self,
        document: &Document,
        layout: &RecordLayout,
        locale: &str,
        sheet_name_override: Option<&str>,
    ) -> ImpexResult<ValidationResult> {
        let fields = describe(layout)?;
        let columns = resolve_positions(&fields)?;

        let mut messages = Vec::new();
        let sheet = resolve_sheet(
            document,
            layout,
            sheet_name_override,
            locale,
            self.catalog,
            &mut messages,
        );
        messages.extend(validate_headers(
            document,
            &sheet,
            &columns,
            locale,
            self.catalog,
        ));

        debug!(
            type_name = layout.type_name,
            sheet = %sheet.name,
            found = sheet.is_found(),
            problems = messages.len(),
            "工作表校验完成"
        );
        Ok(ValidationResult::from_messages(messages))
    }
}
