// ==========================================
// 登记系统 - 电子表格文档适配器
// ==========================================
// 支持: Excel 97-2003 (.xls, 复合二进制) / Excel 2007+ (.xlsx, 打包 XML)
// 职责: 按声明的内容类型选择解析器，将字节解析为内存文档
// 说明: 文档在打开时一次性解析全部工作表；
//       Document 离开作用域即释放（任何退出路径）
// ==========================================

use crate::importer::error::{ImpexError, ImpexResult};
use calamine::{Data, Range, Reader, Xls, Xlsx};
use std::fmt;
use std::io::{Cursor, Read, Seek};
use tracing::{debug, warn};

/// .xlsx 的 MIME 类型
pub const APPLICATION_XLSX: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// .xls 的 MIME 类型
pub const APPLICATION_XLS: &str = "application/vnd.ms-excel";

// ==========================================
// SpreadsheetFormat - 支持的二进制格式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpreadsheetFormat {
    Xls,
    Xlsx,
}

impl SpreadsheetFormat {
    /// 由声明的内容类型确定格式（MIME 类型不区分大小写）
    pub fn from_content_type(content_type: &str) -> ImpexResult<Self> {
        let content_type = content_type.trim();
        if content_type.eq_ignore_ascii_case(APPLICATION_XLSX) {
            Ok(SpreadsheetFormat::Xlsx)
        } else if content_type.eq_ignore_ascii_case(APPLICATION_XLS) {
            Ok(SpreadsheetFormat::Xls)
        } else {
            Err(ImpexError::UnsupportedFormat(content_type.to_string()))
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            SpreadsheetFormat::Xls => APPLICATION_XLS,
            SpreadsheetFormat::Xlsx => APPLICATION_XLSX,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            SpreadsheetFormat::Xls => ".xls",
            SpreadsheetFormat::Xlsx => ".xlsx",
        }
    }
}

impl fmt::Display for SpreadsheetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpreadsheetFormat::Xls => write!(f, "xls"),
            SpreadsheetFormat::Xlsx => write!(f, "xlsx"),
        }
    }
}

// ==========================================
// Sheet - 单个工作表（第 0 行为表头行）
// ==========================================
pub struct Sheet {
    name: String,
    range: Range<Data>,
}

impl Sheet {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 按绝对行列取单元格
    pub fn cell(&self, row: u32, column: u32) -> Option<&Data> {
        self.range.get_value((row, column))
    }

    /// 单元格文本（空单元格/越界为空字符串）
    pub fn cell_text(&self, row: u32, column: u32) -> String {
        match self.cell(row, column) {
            None | Some(Data::Empty) => String::new(),
            Some(Data::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// 行数（含表头行）
    pub fn row_count(&self) -> u32 {
        self.range.end().map(|(row, _)| row + 1).unwrap_or(0)
    }

    /// 列数
    pub fn column_count(&self) -> u32 {
        self.range.end().map(|(_, column)| column + 1).unwrap_or(0)
    }

    /// 整行是否为空白
    pub fn is_row_blank(&self, row: u32) -> bool {
        (0..self.column_count()).all(|column| self.cell_text(row, column).trim().is_empty())
    }
}

impl fmt::Debug for Sheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sheet")
            .field("name", &self.name)
            .field("rows", &self.row_count())
            .field("columns", &self.column_count())
            .finish()
    }
}

// ==========================================
// Document - 解析后的电子表格
// ==========================================
#[derive(Debug)]
pub struct Document {
    format: SpreadsheetFormat,
    sheets: Vec<Sheet>,
}

impl Document {
    /// 按声明的内容类型解析字节
    ///
    /// # 错误
    /// - UnsupportedFormat: 内容类型不是两种受支持的 MIME 类型（不尝试解析）
    /// - MalformedDocument: 字节无法按声明格式解析
    pub fn open(bytes: &[u8], content_type: &str) -> ImpexResult<Self> {
        let format = SpreadsheetFormat::from_content_type(content_type)?;

        let sheets = match format {
            SpreadsheetFormat::Xlsx => {
                let workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
                read_sheets(workbook)?
            }
            SpreadsheetFormat::Xls => {
                let workbook: Xls<_> = Xls::new(Cursor::new(bytes))?;
                read_sheets(workbook)?
            }
        };

        debug!(format = %format, sheets = sheets.len(), "电子表格文档已打开");
        Ok(Self { format, sheets })
    }

    pub fn format(&self) -> SpreadsheetFormat {
        self.format
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name()).collect()
    }

    /// 按名称查找工作表下标（与电子表格软件一致，不区分大小写）
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        let wanted = name.to_lowercase();
        self.sheets
            .iter()
            .position(|s| s.name.to_lowercase() == wanted)
    }

    pub fn sheet_at(&self, index: usize) -> Option<&Sheet> {
        self.sheets.get(index)
    }
}

impl Drop for Document {
    fn drop(&mut self) {
        debug!(format = %self.format, sheets = self.sheets.len(), "电子表格文档已释放");
    }
}

fn read_sheets<RS, R>(mut workbook: R) -> ImpexResult<Vec<Sheet>>
where
    RS: Read + Seek,
    R: Reader<RS>,
    ImpexError: From<R::Error>,
{
    let names = workbook.sheet_names().to_vec();
    if names.is_empty() {
        warn!("电子表格不含任何工作表");
    }

    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = workbook.worksheet_range(&name)?;
        sheets.push(Sheet { name, range });
    }
    Ok(sheets)
}
