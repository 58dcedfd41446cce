// ==========================================
// 登记系统 - 字段元数据注册表
// ==========================================
// 职责: 由记录类型的静态列声明表生成 FieldDescriptor 序列
// 说明: 不使用运行时反射；共享审计字段以描述符片段的形式
//       由各记录类型显式嵌入（RecordLayout.shared_base）
// ==========================================

use crate::importer::error::{ImpexError, ImpexResult};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

// ==========================================
// CellSpec - 单列声明（静态表条目）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellSpec {
    pub name: &'static str,
    pub position: u32,
    pub header: Option<&'static str>,
    pub mandatory: bool,
    pub updatable: bool,
    pub cross_reference: Option<u32>,
}

impl CellSpec {
    pub const fn new(name: &'static str, position: u32) -> Self {
        Self {
            name,
            position,
            header: None,
            mandatory: false,
            updatable: false,
            cross_reference: None,
        }
    }

    /// 显式表头文本或 i18n 键
    pub const fn header(mut self, header: &'static str) -> Self {
        self.header = Some(header);
        self
    }

    pub const fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    pub const fn updatable(mut self) -> Self {
        self.updatable = true;
        self
    }

    /// 交叉引用其他工作表的列（仅携带元数据）
    pub const fn cross_reference(mut self, position: u32) -> Self {
        self.cross_reference = Some(position);
        self
    }
}

// ==========================================
// RecordLayout - 记录类型的完整列布局声明
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct RecordLayout {
    /// 类型标识（驼峰），用于派生工作表名
    pub type_name: &'static str,
    /// 类型声明的工作表名（i18n 键，缺失翻译时按字面使用）
    pub sheet_name: Option<&'static str>,
    /// 类型自身声明的列
    pub cells: &'static [CellSpec],
    /// 嵌入的共享基础字段片段
    pub shared_base: &'static [CellSpec],
}

// ==========================================
// FieldDescriptor - 字段描述符
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub local_position: u32,
    pub declared_on_shared_base: bool,
    pub header_key: Option<&'static str>,
    pub mandatory: bool,
    pub updatable: bool,
    pub cross_reference_position: Option<u32>,
}

impl FieldDescriptor {
    fn from_spec(spec: &CellSpec, declared_on_shared_base: bool) -> Self {
        Self {
            name: spec.name,
            local_position: spec.position,
            declared_on_shared_base,
            header_key: spec.header,
            mandatory: spec.mandatory,
            updatable: spec.updatable,
            cross_reference_position: spec.cross_reference,
        }
    }

    pub fn is_cross_reference(&self) -> bool {
        self.cross_reference_position.is_some()
    }
}

// ==========================================
// CellValue - 导出时的单元格取值
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(DateTime<Utc>),
}

// ==========================================
// SheetRecord Trait
// ==========================================
// 用途: 可映射到工作表的记录类型
// 实现者: TaskCategory
pub trait SheetRecord {
    /// 静态列布局
    fn layout() -> &'static RecordLayout;

    /// 按字段名取单元格值（导出用）
    fn cell_value(&self, field: &str) -> CellValue;
}

/// 描述记录类型的全部映射字段
///
/// 顺序: 类型自身字段（声明顺序）在前，共享基础字段在后。
/// 顺序本身不决定布局（由位置决定），但保证诊断消息顺序稳定。
///
/// # 错误
/// - NoMappedFields: 类型未声明任何映射列
/// - DuplicatePosition: 两个非基础字段声明了同一列位置
pub fn describe(layout: &RecordLayout) -> ImpexResult<Vec<FieldDescriptor>> {
    if layout.cells.is_empty() && layout.shared_base.is_empty() {
        return Err(ImpexError::NoMappedFields {
            type_name: layout.type_name.to_string(),
        });
    }

    let mut seen: HashMap<u32, &'static str> = HashMap::new();
    for spec in layout.cells {
        if let Some(first) = seen.insert(spec.position, spec.name) {
            return Err(ImpexError::DuplicatePosition {
                type_name: layout.type_name.to_string(),
                position: spec.position,
                first: first.to_string(),
                second: spec.name.to_string(),
            });
        }
    }

    let fields = layout
        .cells
        .iter()
        .map(|spec| FieldDescriptor::from_spec(spec, false))
        .chain(
            layout
                .shared_base
                .iter()
                .map(|spec| FieldDescriptor::from_spec(spec, true)),
        )
        .collect();

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &[CellSpec] = &[
        CellSpec::new("createdBy", 0).header("Created by"),
        CellSpec::new("createdAt", 1).header("Created at"),
    ];

    const CELLS: &[CellSpec] = &[
        CellSpec::new("name", 1).header("Name").mandatory().updatable(),
        CellSpec::new("parent", 2).cross_reference(0),
    ];

    #[test]
    fn test_describe_local_fields_before_base() {
        let layout = RecordLayout {
            type_name: "Sample",
            sheet_name: None,
            cells: CELLS,
            shared_base: BASE,
        };
        let fields = describe(&layout).unwrap();

        let names: Vec<&str> = fields.iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["name", "parent", "createdBy", "createdAt"]);
        assert!(!fields[0].declared_on_shared_base);
        assert!(fields[2].declared_on_shared_base);
        assert!(fields[0].mandatory && fields[0].updatable);
        assert!(fields[1].is_cross_reference());
        assert_eq!(fields[1].cross_reference_position, Some(0));
    }

    #[test]
    fn test_describe_no_mapped_fields() {
        let layout = RecordLayout {
            type_name: "Empty",
            sheet_name: None,
            cells: &[],
            shared_base: &[],
        };
        let err = describe(&layout).unwrap_err();
        assert!(matches!(err, ImpexError::NoMappedFields { .. }));
        assert!(err.is_metadata_error());
    }

    #[test]
    fn test_describe_duplicate_local_position() {
        const CLASHING: &[CellSpec] = &[CellSpec::new("a", 3), CellSpec::new("b", 3)];
        let layout = RecordLayout {
            type_name: "Clash",
            sheet_name: None,
            cells: CLASHING,
            shared_base: BASE,
        };
        match describe(&layout) {
            Err(ImpexError::DuplicatePosition {
                position,
                first,
                second,
                ..
            }) => {
                assert_eq!(position, 3);
                assert_eq!(first, "a");
                assert_eq!(second, "b");
            }
            other => panic!("expected DuplicatePosition, got {:?}", other),
        }
    }

    #[test]
    fn test_base_positions_may_overlap_local_positions() {
        // 基础字段的本地位置与类型字段重叠是正常的，偏移后才落到最终列
        const VALUE_ONLY: &[CellSpec] = &[CellSpec::new("value", 0)];
        let layout = RecordLayout {
            type_name: "Overlap",
            sheet_name: None,
            cells: VALUE_ONLY,
            shared_base: BASE,
        };
        assert_eq!(describe(&layout).unwrap().len(), 3);
    }
}
