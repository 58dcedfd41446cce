// ==========================================
// 登记系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::impex_config_trait::ImpexConfigReader;
use crate::db::open_sqlite_connection;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// 默认语言
pub const DEFAULT_LOCALE: &str = "sv";

/// 默认上传大小上限（10 MiB）
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// 默认导入操作人
pub const DEFAULT_IMPORT_ACTOR: &str = "import";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Clone)]
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// 从已有连接创建 ConfigManager（确保 config_kv 表存在）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        let manager = Self { conn };
        manager.ensure_table()?;
        Ok(manager)
    }

    fn ensure_table(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS config_kv (
              scope_id TEXT NOT NULL,
              key TEXT NOT NULL,
              value TEXT NOT NULL,
              PRIMARY KEY (scope_id, key)
            );
            "#,
        )?;
        Ok(())
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 读取 global scope 的配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 写入 global scope 的配置值（存在则覆盖）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }

    /// 读取配置值，不存在或为空时使用默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> RepositoryResult<String> {
        Ok(self
            .get_global_config_value(key)?
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string()))
    }
}

#[async_trait]
impl ImpexConfigReader for ConfigManager {
    async fn get_default_locale(&self) -> RepositoryResult<String> {
        self.get_config_or_default(config_keys::DEFAULT_LOCALE, DEFAULT_LOCALE)
    }

    async fn get_max_upload_bytes(&self) -> RepositoryResult<usize> {
        let value = self.get_config_or_default(
            config_keys::MAX_UPLOAD_BYTES,
            &DEFAULT_MAX_UPLOAD_BYTES.to_string(),
        )?;
        match value.parse::<usize>() {
            Ok(limit) if limit > 0 => Ok(limit),
            _ => {
                warn!(key = config_keys::MAX_UPLOAD_BYTES, value = %value, "配置值无效，使用默认值");
                Ok(DEFAULT_MAX_UPLOAD_BYTES)
            }
        }
    }

    async fn get_import_actor(&self) -> RepositoryResult<String> {
        self.get_config_or_default(config_keys::IMPORT_ACTOR, DEFAULT_IMPORT_ACTOR)
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    pub const DEFAULT_LOCALE: &str = "impex.default_locale";
    pub const MAX_UPLOAD_BYTES: &str = "impex.max_upload_bytes";
    pub const IMPORT_ACTOR: &str = "impex.import_actor";
}
