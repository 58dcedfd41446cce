// ==========================================
// 登记系统 - 导出服务
// ==========================================
// 支持: 仅 .xlsx（打包 XML 格式）
// 说明: .xls 为已识别格式但无法写出，返回 UnsupportedExportFormat
// ==========================================

use crate::exporter::excel_writer::ExcelWriter;
use crate::i18n::MessageCatalog;
use crate::importer::document::SpreadsheetFormat;
use crate::importer::error::{ImpexError, ImpexResult};
use crate::importer::metadata::SheetRecord;
use rust_xlsxwriter::Workbook;
use tracing::{info, instrument};

/// 导出结果
#[derive(Debug, Clone)]
pub struct ExportedWorkbook {
    pub extension: &'static str,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

pub struct ExportService<C: MessageCatalog> {
    catalog: C,
}

impl<C: MessageCatalog> ExportService<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// 导出记录为工作簿字节
    ///
    /// # 错误
    /// - UnsupportedFormat: 未识别的内容类型
    /// - UnsupportedExportFormat: .xls
    /// - ExportError: 工作簿写入失败
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub fn export<T: SheetRecord>(
        &self,
        records: &[T],
        content_type: &str,
        locale: &str,
        sheet_name_override: Option<&str>,
    ) -> ImpexResult<ExportedWorkbook> {
        let format = SpreadsheetFormat::from_content_type(content_type)?;
        if format != SpreadsheetFormat::Xlsx {
            return Err(ImpexError::UnsupportedExportFormat(content_type.to_string()));
        }

        let mut workbook = Workbook::new();
        ExcelWriter::new(&self.catalog, locale).write_sheet(
            &mut workbook,
            records,
            sheet_name_override,
        )?;
        let bytes = workbook.save_to_buffer()?;

        info!(size = bytes.len(), "导出完成");
        Ok(ExportedWorkbook {
            extension: format.extension(),
            content_type: format.content_type(),
            bytes,
        })
    }
}
