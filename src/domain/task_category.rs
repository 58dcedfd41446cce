// ==========================================
// 登记系统 - 任务类别领域模型
// ==========================================
// 工作表: "Task categories"
// 列: Id | Name | Has actor | Created by | Created at
// ==========================================

use crate::domain::auditable::{AuditFields, AUDITABLE_CELLS};
use crate::importer::metadata::{CellSpec, CellValue, RecordLayout, SheetRecord};
use serde::{Deserialize, Serialize};

const TASK_CATEGORY_CELLS: &[CellSpec] = &[
    CellSpec::new("id", 0).header("Id"),
    CellSpec::new("name", 1).header("Name").mandatory().updatable(),
    CellSpec::new("hasActor", 2)
        .header("Has actor")
        .mandatory()
        .updatable(),
];

/// 任务类别的列布局
pub static TASK_CATEGORY_LAYOUT: RecordLayout = RecordLayout {
    type_name: "TaskCategory",
    sheet_name: Some("Task categories"),
    cells: TASK_CATEGORY_CELLS,
    shared_base: AUDITABLE_CELLS,
};

// ==========================================
// TaskCategory - 任务类别
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskCategory {
    pub id: i64,
    pub name: String,
    pub has_actor: bool, // 该类别的任务是否需要指定执行人
    pub audit: AuditFields,
}

impl SheetRecord for TaskCategory {
    fn layout() -> &'static RecordLayout {
        &TASK_CATEGORY_LAYOUT
    }

    fn cell_value(&self, field: &str) -> CellValue {
        match field {
            "id" => CellValue::Number(self.id as f64),
            "name" => CellValue::Text(self.name.clone()),
            "hasActor" => CellValue::Bool(self.has_actor),
            other => self.audit.cell_value(other),
        }
    }
}
