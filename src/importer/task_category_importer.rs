// ==========================================
// 登记系统 - 任务类别导入器
// ==========================================
// 流程: 逐行读取 → 类型/必填检查 → 存在性检查 → 事务落库
// 规则:
// - Id 为空 → 新建；Id 为整数 → 更新已存在的记录
// - 任一行有问题则整批不写入
// ==========================================

use crate::domain::task_category::TASK_CATEGORY_LAYOUT;
use crate::i18n::{
    message, MessageCatalog, CELL_TYPE_MISMATCH, ENTRY_DOES_NOT_EXIST, MANDATORY_MISSING,
    MISSING_SHEET,
};
use crate::importer::document::{Document, Sheet};
use crate::importer::error::ImpexResult;
use crate::importer::header::resolve_header;
use crate::importer::metadata::RecordLayout;
use crate::importer::orchestrator::EntityImporter;
use crate::importer::position::EffectiveColumn;
use crate::importer::sheet_resolver::{resolve_sheet_name, MappedSheet};
use crate::importer::validation::ValidationResult;
use crate::repository::{TaskCategoryChange, TaskCategoryStore};
use calamine::Data;
use chrono::Utc;
use tracing::{debug, info, instrument};

const TRUE_TOKENS: &[&str] = &["true", "1", "yes", "ja"];
const FALSE_TOKENS: &[&str] = &["false", "0", "no", "nej"];

// ==========================================
// 单元格解析结果
// ==========================================
#[derive(Debug, PartialEq)]
enum Parsed<T> {
    Value(T),
    Empty,
    WrongType,
}

fn parse_id(cell: Option<&Data>) -> Parsed<i64> {
    match cell {
        None | Some(Data::Empty) => Parsed::Empty,
        Some(Data::Int(value)) => Parsed::Value(*value),
        Some(Data::Float(value)) if value.fract() == 0.0 => Parsed::Value(*value as i64),
        Some(Data::String(text)) if text.trim().is_empty() => Parsed::Empty,
        Some(Data::String(text)) => match text.trim().parse::<i64>() {
            Ok(value) => Parsed::Value(value),
            Err(_) => Parsed::WrongType,
        },
        Some(_) => Parsed::WrongType,
    }
}

fn parse_text(cell: Option<&Data>) -> Parsed<String> {
    match cell {
        None | Some(Data::Empty) => Parsed::Empty,
        Some(Data::String(text)) if text.trim().is_empty() => Parsed::Empty,
        Some(Data::String(text)) => Parsed::Value(text.trim().to_string()),
        Some(number @ (Data::Int(_) | Data::Float(_))) => Parsed::Value(number.to_string()),
        Some(_) => Parsed::WrongType,
    }
}

fn parse_bool(cell: Option<&Data>) -> Parsed<bool> {
    match cell {
        None | Some(Data::Empty) => Parsed::Empty,
        Some(Data::Bool(value)) => Parsed::Value(*value),
        Some(Data::Int(1)) => Parsed::Value(true),
        Some(Data::Int(0)) => Parsed::Value(false),
        Some(Data::Float(value)) if *value == 1.0 => Parsed::Value(true),
        Some(Data::Float(value)) if *value == 0.0 => Parsed::Value(false),
        Some(Data::String(text)) => {
            let token = text.trim().to_lowercase();
            if token.is_empty() {
                Parsed::Empty
            } else if TRUE_TOKENS.contains(&token.as_str()) {
                Parsed::Value(true)
            } else if FALSE_TOKENS.contains(&token.as_str()) {
                Parsed::Value(false)
            } else {
                Parsed::WrongType
            }
        }
        Some(_) => Parsed::WrongType,
    }
}

// ==========================================
// TaskCategoryImporter
// ==========================================
pub struct TaskCategoryImporter<S, C>
where
    S: TaskCategoryStore,
    C: MessageCatalog,
{
    store: S,
    catalog: C,
    actor: String, // 写入审计字段的操作人
}

impl<S, C> TaskCategoryImporter<S, C>
where
    S: TaskCategoryStore,
    C: MessageCatalog,
{
    pub fn new(store: S, catalog: C, actor: impl Into<String>) -> Self {
        Self {
            store,
            catalog,
            actor: actor.into(),
        }
    }

    /// 读取单行，收集该行的全部问题
    fn read_row(
        &self,
        sheet: &Sheet,
        row: u32,
        columns: &RowColumns<'_>,
        locale: &str,
        messages: &mut Vec<String>,
    ) -> ImpexResult<Option<TaskCategoryChange>> {
        let row_text = row.to_string();
        let mut problems = Vec::new();

        let wrong_type = |column: &EffectiveColumn, problems: &mut Vec<String>| {
            let position = column.position.to_string();
            problems.push(message(
                &self.catalog,
                locale,
                CELL_TYPE_MISMATCH,
                &[("position", position.as_str()), ("row", row_text.as_str())],
            ));
        };
        let missing = |column: &EffectiveColumn, problems: &mut Vec<String>| {
            let header = resolve_header(&column.field, locale, &self.catalog);
            problems.push(message(
                &self.catalog,
                locale,
                MANDATORY_MISSING,
                &[("header", header.as_str()), ("row", row_text.as_str())],
            ));
        };

        let id = match parse_id(sheet.cell(row, columns.id.position)) {
            Parsed::Value(id) => Some(id),
            Parsed::Empty => None,
            Parsed::WrongType => {
                wrong_type(columns.id, &mut problems);
                None
            }
        };

        let name = match parse_text(sheet.cell(row, columns.name.position)) {
            Parsed::Value(name) => Some(name),
            Parsed::Empty => {
                missing(columns.name, &mut problems);
                None
            }
            Parsed::WrongType => {
                wrong_type(columns.name, &mut problems);
                None
            }
        };

        let has_actor = match parse_bool(sheet.cell(row, columns.has_actor.position)) {
            Parsed::Value(value) => Some(value),
            Parsed::Empty => {
                missing(columns.has_actor, &mut problems);
                None
            }
            Parsed::WrongType => {
                wrong_type(columns.has_actor, &mut problems);
                None
            }
        };

        if let Some(id) = id {
            if !self.store.exists(id)? {
                problems.push(message(
                    &self.catalog,
                    locale,
                    ENTRY_DOES_NOT_EXIST,
                    &[("row", row_text.as_str())],
                ));
            }
        }

        if !problems.is_empty() {
            debug!(row = row, problems = problems.len(), "行校验未通过");
            messages.extend(problems);
            return Ok(None);
        }

        Ok(match (id, name, has_actor) {
            (Some(id), Some(name), Some(has_actor)) => Some(TaskCategoryChange::Update {
                id,
                name,
                has_actor,
            }),
            (None, Some(name), Some(has_actor)) => Some(TaskCategoryChange::Create { name, has_actor }),
            _ => None,
        })
    }
}

/// 导入所需列
struct RowColumns<'a> {
    id: &'a EffectiveColumn,
    name: &'a EffectiveColumn,
    has_actor: &'a EffectiveColumn,
}

impl<S, C> EntityImporter for TaskCategoryImporter<S, C>
where
    S: TaskCategoryStore,
    C: MessageCatalog,
{
    fn layout(&self) -> &'static RecordLayout {
        &TASK_CATEGORY_LAYOUT
    }

    #[instrument(skip(self, document), fields(actor = %self.actor))]
    fn import_validated(&self, document: &Document, locale: &str) -> ImpexResult<ValidationResult> {
        let layout = self.layout();
        let override_name = self.sheet_name_override();
        let Some(mapped) = MappedSheet::resolve(document, layout, override_name, locale, &self.catalog)?
        else {
            let name = resolve_sheet_name(layout, override_name, locale, &self.catalog);
            return Ok(ValidationResult::from_messages(vec![message(
                &self.catalog,
                locale,
                MISSING_SHEET,
                &[("name", name.as_str())],
            )]));
        };

        let columns = RowColumns {
            id: mapped.column("id")?,
            name: mapped.column("name")?,
            has_actor: mapped.column("hasActor")?,
        };

        let mut messages = Vec::new();
        let mut changes = Vec::new();
        for row in mapped.data_rows() {
            if let Some(change) = self.read_row(mapped.sheet, row, &columns, locale, &mut messages)? {
                changes.push(change);
            }
        }

        if !messages.is_empty() {
            info!(problems = messages.len(), "任务类别导入被拒绝，未写入任何数据");
            return Ok(ValidationResult::from_messages(messages));
        }

        let stats = self.store.apply_import(&changes, &self.actor, Utc::now())?;
        info!(created = stats.created, updated = stats.updated, "任务类别导入完成");
        Ok(ValidationResult::success())
    }
}
