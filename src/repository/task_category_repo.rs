// ==========================================
// 登记系统 - 任务类别数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 表: task_category
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::auditable::AuditFields;
use crate::domain::task_category::TaskCategory;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};
use tracing::debug;

const SELECT_COLUMNS: &str = r#"
    SELECT id, name, has_actor, created_by, created_at, last_modified_by, last_modified_at
    FROM task_category
"#;

// ==========================================
// 导入变更
// ==========================================

/// 一行导入数据对应的变更
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskCategoryChange {
    Create { name: String, has_actor: bool },
    Update { id: i64, name: String, has_actor: bool },
}

/// 导入落库统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub created: usize,
    pub updated: usize,
}

// ==========================================
// TaskCategoryStore Trait
// ==========================================
// 用途: 任务类别导入器的持久化接口
// 实现者: TaskCategoryRepository
pub trait TaskCategoryStore: Send + Sync {
    /// 记录是否存在
    fn exists(&self, id: i64) -> RepositoryResult<bool>;

    /// 在单个事务中应用全部变更（任一失败则整体回滚）
    fn apply_import(
        &self,
        changes: &[TaskCategoryChange],
        actor: &str,
        at: DateTime<Utc>,
    ) -> RepositoryResult<ImportStats>;
}

impl<T: TaskCategoryStore + ?Sized> TaskCategoryStore for &T {
    fn exists(&self, id: i64) -> RepositoryResult<bool> {
        (**self).exists(id)
    }

    fn apply_import(
        &self,
        changes: &[TaskCategoryChange],
        actor: &str,
        at: DateTime<Utc>,
    ) -> RepositoryResult<ImportStats> {
        (**self).apply_import(changes, actor, at)
    }
}

// ==========================================
// TaskCategoryRepository - 任务类别仓储
// ==========================================
#[derive(Clone)]
pub struct TaskCategoryRepository {
    conn: Arc<Mutex<Connection>>,
}

impl TaskCategoryRepository {
    /// 打开数据库文件并创建仓储实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// 从已有连接创建仓储实例（确保表存在）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        let repo = Self { conn };
        repo.ensure_table()?;
        Ok(repo)
    }

    fn ensure_table(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS task_category (
              id INTEGER PRIMARY KEY AUTOINCREMENT,
              name TEXT NOT NULL,
              has_actor INTEGER NOT NULL DEFAULT 0,
              created_by TEXT NOT NULL,
              created_at TEXT NOT NULL,
              last_modified_by TEXT,
              last_modified_at TEXT
            );
            CREATE INDEX IF NOT EXISTS idx_task_category_created_at
              ON task_category(created_at);
            "#,
        )?;
        Ok(())
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 新建任务类别
    pub fn insert(
        &self,
        name: &str,
        has_actor: bool,
        actor: &str,
        at: DateTime<Utc>,
    ) -> RepositoryResult<TaskCategory> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO task_category (name, has_actor, created_by, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![name, has_actor, actor, at],
        )?;

        Ok(TaskCategory {
            id: conn.last_insert_rowid(),
            name: name.to_string(),
            has_actor,
            audit: AuditFields::created(actor, at),
        })
    }

    /// 按主键查询
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<TaskCategory>> {
        let conn = self.get_conn()?;
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
        let category = conn
            .query_row(&sql, params![id], map_row)
            .optional()?;
        Ok(category)
    }

    /// 查询全部（按创建时间排序）
    pub fn find_all(&self) -> RepositoryResult<Vec<TaskCategory>> {
        let conn = self.get_conn()?;
        let sql = format!("{} ORDER BY created_at, id", SELECT_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], map_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// 按主键列表查询（按创建时间排序，不存在的主键忽略）
    pub fn find_by_ids(&self, ids: &[i64]) -> RepositoryResult<Vec<TaskCategory>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.get_conn()?;
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "{} WHERE id IN ({}) ORDER BY created_at, id",
            SELECT_COLUMNS, placeholders
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(ids.iter()), map_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

impl TaskCategoryStore for TaskCategoryRepository {
    fn exists(&self, id: i64) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let found = conn
            .query_row(
                "SELECT 1 FROM task_category WHERE id = ?1 LIMIT 1",
                params![id],
                |_row| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        Ok(found)
    }

    fn apply_import(
        &self,
        changes: &[TaskCategoryChange],
        actor: &str,
        at: DateTime<Utc>,
    ) -> RepositoryResult<ImportStats> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;
        let mut stats = ImportStats::default();

        for change in changes {
            match change {
                TaskCategoryChange::Create { name, has_actor } => {
                    tx.execute(
                        "INSERT INTO task_category (name, has_actor, created_by, created_at) VALUES (?1, ?2, ?3, ?4)",
                        params![name, has_actor, actor, at],
                    )?;
                    stats.created += 1;
                }
                TaskCategoryChange::Update { id, name, has_actor } => {
                    let changed = tx.execute(
                        r#"
                        UPDATE task_category
                        SET name = ?1, has_actor = ?2, last_modified_by = ?3, last_modified_at = ?4
                        WHERE id = ?5
                        "#,
                        params![name, has_actor, actor, at, id],
                    )?;
                    if changed == 0 {
                        // 未提交的事务在 drop 时回滚
                        return Err(RepositoryError::NotFound {
                            entity: "TaskCategory".to_string(),
                            id: id.to_string(),
                        });
                    }
                    stats.updated += 1;
                }
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        debug!(created = stats.created, updated = stats.updated, "任务类别导入已提交");
        Ok(stats)
    }
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<TaskCategory> {
    Ok(TaskCategory {
        id: row.get(0)?,
        name: row.get(1)?,
        has_actor: row.get(2)?,
        audit: AuditFields {
            created_by: row.get(3)?,
            created_at: row.get(4)?,
            last_modified_by: row.get(5)?,
            last_modified_at: row.get(6)?,
        },
    })
}
