// ==========================================
// 登记系统 - Excel 工作表写入
// ==========================================
// 布局与导入共用同一份列元数据:
// - 表头行（第 0 行）经表头解析得到，写在最终列位置
// - 每条记录一行，从第 1 行开始
// - 列宽 = 表头长度 + 3，冻结表头行，表头加筛选
// - 单元格边框颜色标示 必填/可更新 属性
// ==========================================

use crate::i18n::MessageCatalog;
use crate::importer::error::{ImpexError, ImpexResult};
use crate::importer::header::resolve_header;
use crate::importer::metadata::{describe, CellValue, FieldDescriptor, SheetRecord};
use crate::importer::position::resolve_positions;
use crate::importer::sheet_resolver::resolve_sheet_name;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, Worksheet};
use tracing::debug;

const HEADER_ROW: u32 = 0;
const DATE_TIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

// 边框颜色
const MANDATORY_UPDATABLE: u32 = 0x008000;
const UPDATABLE: u32 = 0xCCFFCC;
const MANDATORY: u32 = 0x00FF00;
const READ_ONLY: u32 = 0x800000;

fn border_format(field: &FieldDescriptor) -> Format {
    let color = match (field.mandatory, field.updatable) {
        (true, true) => MANDATORY_UPDATABLE,
        (false, true) => UPDATABLE,
        (true, false) => MANDATORY,
        (false, false) => READ_ONLY,
    };
    Format::new()
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(color))
}

/// 列写入所需的信息
struct ColumnLayout {
    field: &'static str,
    position: u16,
    format: Format,
    date_format: Format,
}

pub struct ExcelWriter<'a> {
    catalog: &'a dyn MessageCatalog,
    locale: &'a str,
}

impl<'a> ExcelWriter<'a> {
    pub fn new(catalog: &'a dyn MessageCatalog, locale: &'a str) -> Self {
        Self { catalog, locale }
    }

    /// 将记录写为工作簿中的一个新工作表
    ///
    /// 记录为空时只写表头行。
    pub fn write_sheet<T: SheetRecord>(
        &self,
        workbook: &mut Workbook,
        records: &[T],
        sheet_name_override: Option<&str>,
    ) -> ImpexResult<()> {
        let layout = T::layout();
        let columns = resolve_positions(&describe(layout)?)?;
        let sheet_name = resolve_sheet_name(layout, sheet_name_override, self.locale, self.catalog);

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet_name)?;

        let header_format = Format::new().set_bold();
        let mut layouts = Vec::with_capacity(columns.len());
        for column in &columns {
            let header = resolve_header(&column.field, self.locale, self.catalog);
            let position = u16::try_from(column.position).map_err(|_| {
                ImpexError::ExportError(format!(
                    "字段 {} 的列位置 {} 超出工作表列数上限",
                    column.field.name, column.position
                ))
            })?;

            worksheet.write_string_with_format(HEADER_ROW, position, &header, &header_format)?;
            worksheet.set_column_width(position, header.chars().count() as f64 + 3.0)?;

            let format = border_format(&column.field);
            layouts.push(ColumnLayout {
                field: column.field.name,
                position,
                date_format: format.clone().set_num_format(DATE_TIME_FORMAT),
                format,
            });
        }

        for (index, record) in records.iter().enumerate() {
            let row = HEADER_ROW + 1 + index as u32;
            for column in &layouts {
                write_cell(worksheet, row, column, record.cell_value(column.field))?;
            }
        }

        let last_column = layouts.iter().map(|c| c.position).max().unwrap_or(0);
        worksheet.set_freeze_panes(HEADER_ROW + 1, 0)?;
        worksheet.autofilter(HEADER_ROW, 0, HEADER_ROW, last_column)?;

        debug!(sheet = %sheet_name, rows = records.len(), columns = layouts.len(), "工作表已写入");
        Ok(())
    }
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    column: &ColumnLayout,
    value: CellValue,
) -> ImpexResult<()> {
    let col = column.position;
    match value {
        CellValue::Empty => {
            worksheet.write_blank(row, col, &column.format)?;
        }
        CellValue::Text(text) => {
            worksheet.write_string_with_format(row, col, &text, &column.format)?;
        }
        CellValue::Number(number) => {
            worksheet.write_number_with_format(row, col, number, &column.format)?;
        }
        CellValue::Bool(flag) => {
            worksheet.write_boolean_with_format(row, col, flag, &column.format)?;
        }
        CellValue::DateTime(at) => {
            worksheet.write_datetime_with_format(row, col, &at.naive_utc(), &column.date_format)?;
        }
    }
    Ok(())
}
