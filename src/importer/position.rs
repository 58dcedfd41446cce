// ==========================================
// 登记系统 - 列位置解析
// ==========================================
// 规则: 类型自身字段先占列，共享审计字段整体追加在其后
//   effective = local                        （类型字段）
//   effective = local + max(类型字段位置) + 1 （共享基础字段）
// ==========================================

use crate::importer::error::{ImpexError, ImpexResult};
use crate::importer::metadata::FieldDescriptor;

/// 字段及其最终列位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveColumn {
    pub field: FieldDescriptor,
    pub position: u32,
}

/// 共享基础字段的起始偏移（= 非基础字段最大位置 + 1）
pub fn position_before_shared_base(fields: &[FieldDescriptor]) -> ImpexResult<u32> {
    let last = fields
        .iter()
        .filter(|f| !f.declared_on_shared_base)
        .max_by_key(|f| f.local_position)
        .ok_or(ImpexError::NoLocalFields)?;

    last.local_position
        .checked_add(1)
        .ok_or_else(|| ImpexError::PositionOverflow {
            field: last.name.to_string(),
            position: last.local_position,
        })
}

/// 计算单个字段的最终列位置（溢出视为元数据错误）
pub fn effective_position(field: &FieldDescriptor, offset: u32) -> ImpexResult<u32> {
    if !field.declared_on_shared_base {
        return Ok(field.local_position);
    }
    field
        .local_position
        .checked_add(offset)
        .ok_or_else(|| ImpexError::PositionOverflow {
            field: field.name.to_string(),
            position: field.local_position,
        })
}

/// 计算全部字段的最终列位置（保持输入顺序）
pub fn resolve_positions(fields: &[FieldDescriptor]) -> ImpexResult<Vec<EffectiveColumn>> {
    let offset = position_before_shared_base(fields)?;

    fields
        .iter()
        .map(|field| {
            Ok(EffectiveColumn {
                field: *field,
                position: effective_position(field, offset)?,
            })
        })
        .collect()
}

/// 按字段名查找列
pub fn find_column<'a>(columns: &'a [EffectiveColumn], name: &str) -> Option<&'a EffectiveColumn> {
    columns.iter().find(|c| c.field.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn field(name: &'static str, position: u32, base: bool) -> FieldDescriptor {
        FieldDescriptor {
            name,
            local_position: position,
            declared_on_shared_base: base,
            header_key: None,
            mandatory: false,
            updatable: false,
            cross_reference_position: None,
        }
    }

    #[test]
    fn test_base_fields_appended_after_local_fields() {
        let fields = vec![
            field("name", 1, false),
            field("hasActor", 2, false),
            field("createdBy", 0, true),
            field("createdAt", 1, true),
        ];
        let columns = resolve_positions(&fields).unwrap();

        assert_eq!(find_column(&columns, "name").unwrap().position, 1);
        assert_eq!(find_column(&columns, "hasActor").unwrap().position, 2);
        assert_eq!(find_column(&columns, "createdBy").unwrap().position, 3);
        assert_eq!(find_column(&columns, "createdAt").unwrap().position, 4);
    }

    #[test]
    fn test_offset_law_with_gaps() {
        // 非连续的本地位置: 偏移取最大值而非字段数
        let fields = vec![
            field("a", 0, false),
            field("b", 5, false),
            field("c", 2, false),
            field("x", 0, true),
            field("y", 1, true),
            field("z", 2, true),
        ];
        let columns = resolve_positions(&fields).unwrap();
        let max_local = 5;

        for column in &columns {
            if column.field.declared_on_shared_base {
                assert_eq!(column.position, column.field.local_position + max_local + 1);
            } else {
                assert_eq!(column.position, column.field.local_position);
            }
        }

        let distinct: HashSet<u32> = columns.iter().map(|c| c.position).collect();
        assert_eq!(distinct.len(), columns.len(), "最终列位置不应冲突");
    }

    #[test]
    fn test_no_local_fields_is_an_error() {
        let fields = vec![field("createdBy", 0, true)];
        assert!(matches!(
            resolve_positions(&fields),
            Err(ImpexError::NoLocalFields)
        ));
        assert!(matches!(
            position_before_shared_base(&[]),
            Err(ImpexError::NoLocalFields)
        ));
    }

    #[test]
    fn test_position_overflow_is_a_metadata_error() {
        let at_limit = vec![field("last", u32::MAX, false), field("createdBy", 0, true)];
        match resolve_positions(&at_limit) {
            Err(ImpexError::PositionOverflow { field, position }) => {
                assert_eq!(field, "last");
                assert_eq!(position, u32::MAX);
            }
            other => panic!("expected PositionOverflow, got {:?}", other),
        }

        let base_too_far = vec![field("a", 1, false), field("createdBy", u32::MAX - 1, true)];
        assert!(matches!(
            resolve_positions(&base_too_far),
            Err(ImpexError::PositionOverflow { ref field, .. }) if field == "createdBy"
        ));

        assert!(resolve_positions(&[field("only", u32::MAX - 1, false)]).is_ok());
    }

    #[test]
    fn test_without_base_fields_positions_are_unchanged() {
        let fields = vec![field("a", 3, false), field("b", 0, false)];
        let columns = resolve_positions(&fields).unwrap();
        assert_eq!(columns[0].position, 3);
        assert_eq!(columns[1].position, 0);
    }
}
