// ==========================================
// 登记系统 - 工作表解析
// ==========================================
// 解析顺序:
// 1. 调用方显式覆盖的名称
// 2. 类型声明的工作表名（经消息目录本地化，缺失时按字面）
// 3. 由类型标识驼峰拆词派生
// ==========================================

use crate::i18n::{localize_or_literal, message, MessageCatalog, MISSING_SHEET};
use crate::importer::document::{Document, Sheet};
use crate::importer::error::{ImpexError, ImpexResult};
use crate::importer::header::parse_camel_case;
use crate::importer::metadata::{describe, RecordLayout};
use crate::importer::position::{find_column, resolve_positions, EffectiveColumn};
use tracing::debug;

/// 记录类型在文档中对应的工作表
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSpec {
    pub name: String,
    /// None 表示文档中不存在该工作表（合法的终态，不是错误）
    pub index: Option<usize>,
}

impl SheetSpec {
    pub fn is_found(&self) -> bool {
        self.index.is_some()
    }
}

/// 解析记录类型的工作表名
pub fn resolve_sheet_name(
    layout: &RecordLayout,
    override_name: Option<&str>,
    locale: &str,
    catalog: &dyn MessageCatalog,
) -> String {
    match override_name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => name.to_string(),
        None => match layout.sheet_name {
            Some(declared) => localize_or_literal(catalog, declared, locale),
            None => parse_camel_case(layout.type_name),
        },
    }
}

/// 在文档中定位记录类型的工作表
///
/// 找不到时追加 "Missing sheet with name {name}" 诊断，并返回 index = None，
/// 由调用方继续完成其余校验。
pub fn resolve_sheet(
    document: &Document,
    layout: &RecordLayout,
    override_name: Option<&str>,
    locale: &str,
    catalog: &dyn MessageCatalog,
    messages: &mut Vec<String>,
) -> SheetSpec {
    let name = resolve_sheet_name(layout, override_name, locale, catalog);
    let index = document.sheet_index(&name);

    if index.is_none() {
        debug!(sheet = %name, available = ?document.sheet_names(), "未找到工作表");
        messages.push(message(catalog, locale, MISSING_SHEET, &[("name", name.as_str())]));
    }

    SheetSpec { name, index }
}

// ==========================================
// MappedSheet - 已定位的工作表 + 最终列布局
// ==========================================
// 用途: 供实体导入器按最终列位置读取数据行
#[derive(Debug)]
pub struct MappedSheet<'d> {
    pub sheet: &'d Sheet,
    pub columns: Vec<EffectiveColumn>,
    type_name: &'static str,
}

impl<'d> MappedSheet<'d> {
    /// 定位工作表并解析列布局；工作表不存在时返回 Ok(None)
    pub fn resolve(
        document: &'d Document,
        layout: &RecordLayout,
        override_name: Option<&str>,
        locale: &str,
        catalog: &dyn MessageCatalog,
    ) -> ImpexResult<Option<Self>> {
        let columns = resolve_positions(&describe(layout)?)?;
        let name = resolve_sheet_name(layout, override_name, locale, catalog);

        Ok(document
            .sheet_index(&name)
            .and_then(|index| document.sheet_at(index))
            .map(|sheet| MappedSheet {
                sheet,
                columns,
                type_name: layout.type_name,
            }))
    }

    /// 按字段名取列，字段未声明视为元数据错误
    pub fn column(&self, field: &str) -> ImpexResult<&EffectiveColumn> {
        find_column(&self.columns, field).ok_or_else(|| ImpexError::UnknownField {
            type_name: self.type_name.to_string(),
            field: field.to_string(),
        })
    }

    /// 数据行下标（跳过表头行与空白行）
    pub fn data_rows(&self) -> impl Iterator<Item = u32> + '_ {
        (1..self.sheet.row_count()).filter(move |row| !self.sheet.is_row_blank(*row))
    }
}
