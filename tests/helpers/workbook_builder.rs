// ==========================================
// 工作簿构造器 - 用于集成测试
// ==========================================

use rust_xlsxwriter::Workbook;

#[derive(Debug, Clone)]
pub enum Cell {
    Text(String),
    Number(f64),
    Bool(bool),
    Empty,
}

pub fn text(value: &str) -> Cell {
    Cell::Text(value.to_string())
}

pub fn number(value: f64) -> Cell {
    Cell::Number(value)
}

pub fn boolean(value: bool) -> Cell {
    Cell::Bool(value)
}

pub fn empty() -> Cell {
    Cell::Empty
}

// ==========================================
// SheetBuilder
// ==========================================
pub struct SheetBuilder {
    name: String,
    rows: Vec<Vec<Cell>>,
}

impl SheetBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rows: Vec::new(),
        }
    }

    /// 文本表头行
    pub fn header(mut self, headers: &[&str]) -> Self {
        self.rows.push(headers.iter().map(|h| text(h)).collect());
        self
    }

    pub fn row(mut self, cells: Vec<Cell>) -> Self {
        self.rows.push(cells);
        self
    }
}

// ==========================================
// WorkbookBuilder
// ==========================================
#[derive(Default)]
pub struct WorkbookBuilder {
    sheets: Vec<SheetBuilder>,
}

impl WorkbookBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet(mut self, sheet: SheetBuilder) -> Self {
        self.sheets.push(sheet);
        self
    }

    /// 生成 .xlsx 字节
    pub fn build(self) -> Vec<u8> {
        let mut workbook = Workbook::new();

        for sheet in &self.sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(&sheet.name).expect("工作表名无效");

            for (row, cells) in sheet.rows.iter().enumerate() {
                for (col, cell) in cells.iter().enumerate() {
                    let (row, col) = (row as u32, col as u16);
                    match cell {
                        Cell::Text(value) if value.is_empty() => {}
                        Cell::Text(value) => {
                            worksheet.write_string(row, col, value).expect("写入失败");
                        }
                        Cell::Number(value) => {
                            worksheet.write_number(row, col, *value).expect("写入失败");
                        }
                        Cell::Bool(value) => {
                            worksheet.write_boolean(row, col, *value).expect("写入失败");
                        }
                        Cell::Empty => {}
                    }
                }
            }
        }

        workbook.save_to_buffer().expect("生成工作簿失败")
    }
}
