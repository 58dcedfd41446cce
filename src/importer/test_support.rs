// ==========================================
// 测试辅助 - 内存 xlsx 工作簿构造
// ==========================================

use rust_xlsxwriter::Workbook;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FixtureCell {
    Text(String),
    Number(f64),
    Bool(bool),
}

#[derive(Debug, Clone)]
pub(crate) struct SheetFixture {
    name: String,
    rows: Vec<Vec<FixtureCell>>,
}

impl SheetFixture {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rows: Vec::new(),
        }
    }

    /// 追加一行文本单元格（空字符串不写入）
    pub(crate) fn row(mut self, cells: &[&str]) -> Self {
        self.rows.push(
            cells
                .iter()
                .map(|c| FixtureCell::Text(c.to_string()))
                .collect(),
        );
        self
    }

    /// 追加一行带类型的单元格
    pub(crate) fn cells(mut self, cells: Vec<FixtureCell>) -> Self {
        self.rows.push(cells);
        self
    }
}

pub(crate) fn xlsx_bytes(sheets: &[SheetFixture]) -> Vec<u8> {
    let mut workbook = Workbook::new();

    for fixture in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&fixture.name).unwrap();

        for (row, cells) in fixture.rows.iter().enumerate() {
            for (column, cell) in cells.iter().enumerate() {
                let (row, column) = (row as u32, column as u16);
                match cell {
                    FixtureCell::Text(text) if text.is_empty() => {}
                    FixtureCell::Text(text) => {
                        worksheet.write_string(row, column, text).unwrap();
                    }
                    FixtureCell::Number(value) => {
                        worksheet.write_number(row, column, *value).unwrap();
                    }
                    FixtureCell::Bool(value) => {
                        worksheet.write_boolean(row, column, *value).unwrap();
                    }
                }
            }
        }
    }

    workbook.save_to_buffer().unwrap()
}
