// ==========================================
// 登记系统 - 表头校验
// ==========================================
// 规则: 逐字段比较表头行（第 0 行）在最终列位置上的文本
//       与期望表头，精确相等才算匹配
// ==========================================

use crate::i18n::{message, MessageCatalog, COLUMN_MISMATCH};
use crate::importer::document::Document;
use crate::importer::header::resolve_header;
use crate::importer::position::EffectiveColumn;
use crate::importer::sheet_resolver::SheetSpec;
use tracing::debug;

const HEADER_ROW: u32 = 0;

/// 校验工作表表头，返回诊断消息（按字段顺序）
///
/// 工作表未找到时直接跳过（缺失已由工作表解析报告）。
pub fn validate_headers(
    document: &Document,
    sheet: &SheetSpec,
    columns: &[EffectiveColumn],
    locale: &str,
    catalog: &dyn MessageCatalog,
) -> Vec<String> {
    let Some(sheet) = sheet.index.and_then(|index| document.sheet_at(index)) else {
        return Vec::new();
    };

    let mut messages = Vec::new();
    for column in columns {
        let expected = resolve_header(&column.field, locale, catalog);
        let actual = sheet.cell_text(HEADER_ROW, column.position);

        if actual != expected {
            debug!(
                sheet = %sheet.name(),
                position = column.position,
                expected = %expected,
                actual = %actual,
                "表头不匹配"
            );
            let position = column.position.to_string();
            messages.push(message(
                catalog,
                locale,
                COLUMN_MISMATCH,
                &[("position", position.as_str()), ("header", expected.as_str())],
            ));
        }
    }
    messages
}
