// ==========================================
// 集成测试辅助工具
// ==========================================
// 职责: 内存工作簿构造、测试数据库、Mock 配置
// ==========================================
#![allow(dead_code)]

pub mod mock_config;
pub mod workbook_builder;

use register_impex::config::ConfigManager;
use register_impex::db::{open_sqlite_connection, shared};
use register_impex::logging;
use register_impex::repository::TaskCategoryRepository;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// TaskCategory 工作表的标准表头（英文）
pub const TASK_CATEGORY_HEADERS: &[&str] = &["Id", "Name", "Has actor", "Created by", "Created at"];

/// 读取 tests/fixtures 下的二进制样例文件
pub fn read_fixture(name: &str) -> Vec<u8> {
    let path = format!("tests/fixtures/{}", name);
    std::fs::read(&path).unwrap_or_else(|e| panic!("读取样例文件 {} 失败: {}", path, e))
}

/// 测试数据库（临时文件，测试结束自动删除）
pub struct TestDb {
    _temp_file: NamedTempFile,
    pub conn: Arc<Mutex<Connection>>,
}

impl TestDb {
    pub fn new() -> Self {
        logging::init_test();

        let temp_file = NamedTempFile::new().expect("创建临时文件失败");
        let path = temp_file.path().to_str().expect("临时文件路径无效").to_string();
        let conn = open_sqlite_connection(&path).expect("打开测试数据库失败");

        Self {
            _temp_file: temp_file,
            conn: shared(conn),
        }
    }

    pub fn task_category_repo(&self) -> TaskCategoryRepository {
        TaskCategoryRepository::from_connection(Arc::clone(&self.conn))
            .expect("创建 TaskCategoryRepository 失败")
    }

    pub fn config_manager(&self) -> ConfigManager {
        ConfigManager::from_connection(Arc::clone(&self.conn)).expect("创建 ConfigManager 失败")
    }
}
