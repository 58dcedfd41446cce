// ==========================================
// 登记系统 - 导入编排器
// ==========================================
// 流程: 打开文档 → 结构校验 → (仅校验通过时) 实体导入
// 保证:
// - 校验失败时绝不调用实体导入器（不会出现部分写入）
// - 文档在任何退出路径上恰好释放一次（RAII）
// ==========================================

use crate::i18n::MessageCatalog;
use crate::importer::document::Document;
use crate::importer::error::ImpexResult;
use crate::importer::metadata::RecordLayout;
use crate::importer::validation::{ExcelValidator, ValidationResult};
use tracing::{info, instrument, warn};
use uuid::Uuid;

// ==========================================
// EntityImporter Trait
// ==========================================
// 用途: 实体相关的导入逻辑（仅在校验通过后调用）
// 实现者: TaskCategoryImporter
pub trait EntityImporter: Send + Sync {
    /// 目标记录类型的列布局
    fn layout(&self) -> &'static RecordLayout;

    /// 调用方显式指定的工作表名
    fn sheet_name_override(&self) -> Option<&str> {
        None
    }

    /// 导入已通过校验的文档
    ///
    /// 返回值完整替代校验阶段的结果；导入期问题（如引用不存在）
    /// 以同样的 ValidationResult 形式报告。
    fn import_validated(&self, document: &Document, locale: &str) -> ImpexResult<ValidationResult>;
}

// ==========================================
// ImportService - 公共入口
// ==========================================
pub struct ImportService<C: MessageCatalog> {
    catalog: C,
}

impl<C: MessageCatalog> ImportService<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// 执行一次导入
    ///
    /// # 参数
    /// - bytes: 上传文件的完整字节
    /// - content_type: 声明的 MIME 类型
    /// - locale: 表头/消息语言
    /// - importer: 实体导入器
    ///
    /// # 返回
    /// - Ok(ValidationResult): 校验失败结果，或实体导入结果
    /// - Err: 格式不支持、文档损坏、元数据配置错误、导入器内部错误
    #[instrument(skip(self, bytes, importer), fields(run_id, type_name = importer.layout().type_name))]
    pub fn run(
        &self,
        bytes: &[u8],
        content_type: &str,
        locale: &str,
        importer: &dyn EntityImporter,
    ) -> ImpexResult<ValidationResult> {
        let run_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("run_id", run_id.as_str());
        info!(size = bytes.len(), content_type = %content_type, locale = %locale, "开始导入");

        let document = Document::open(bytes, content_type)?;

        let validation = ExcelValidator::new(&self.catalog).validate_sheet(
            &document,
            importer.layout(),
            locale,
            importer.sheet_name_override(),
        )?;

        if !validation.is_success() {
            warn!(problems = validation.messages().len(), "校验未通过，跳过导入");
            return Ok(validation);
        }

        let result = importer.import_validated(&document, locale)?;
        info!(
            success = result.is_success(),
            problems = result.messages().len(),
            "导入完成"
        );
        Ok(result)
    }
}
