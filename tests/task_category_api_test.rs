// ==========================================
// 任务类别 API 集成测试
// ==========================================

mod helpers;

use chrono::Utc;
use helpers::mock_config::MockConfig;
use helpers::workbook_builder::{boolean, empty, text, SheetBuilder, WorkbookBuilder};
use helpers::{TestDb, TASK_CATEGORY_HEADERS};
use register_impex::api::{ApiError, TaskCategoryApi};
use register_impex::config::ConfigManager;
use register_impex::i18n::{MessageCatalog, RustI18nCatalog};
use register_impex::importer::{Document, APPLICATION_XLS, APPLICATION_XLSX};
use register_impex::repository::TaskCategoryRepository;
use std::sync::Arc;

fn catalog() -> Arc<dyn MessageCatalog> {
    Arc::new(RustI18nCatalog)
}

fn api(repo: TaskCategoryRepository, config: MockConfig) -> TaskCategoryApi<MockConfig> {
    TaskCategoryApi::new(repo, Arc::new(config), catalog())
}

fn one_new_category() -> Vec<u8> {
    WorkbookBuilder::new()
        .sheet(
            SheetBuilder::new("Task categories")
                .header(TASK_CATEGORY_HEADERS)
                .row(vec![empty(), text("Lighting"), boolean(true)]),
        )
        .build()
}

#[tokio::test]
async fn test_import_writes_configured_actor() {
    let db = TestDb::new();
    let repo = db.task_category_repo();
    let config = MockConfig {
        import_actor: "excel-upload".to_string(),
        ..Default::default()
    };

    let result = api(repo.clone(), config)
        .import_task_categories(one_new_category(), APPLICATION_XLSX, None)
        .await
        .unwrap();

    assert!(result.is_success(), "{:?}", result);
    let all = repo.find_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].audit.created_by, "excel-upload");
}

#[tokio::test]
async fn test_payload_over_limit_is_rejected() {
    let db = TestDb::new();
    let repo = db.task_category_repo();
    let config = MockConfig {
        max_upload_bytes: 16,
        ..Default::default()
    };

    let err = api(repo.clone(), config)
        .import_task_categories(one_new_category(), APPLICATION_XLSX, None)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::PayloadTooLarge { limit: 16, .. }));
    assert!(repo.find_all().unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_upload_is_invalid_input() {
    let db = TestDb::new();

    let err = api(db.task_category_repo(), MockConfig::default())
        .import_task_categories(Vec::new(), APPLICATION_XLSX, None)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[tokio::test]
async fn test_unknown_content_type_is_unsupported_media() {
    let db = TestDb::new();

    let err = api(db.task_category_repo(), MockConfig::default())
        .import_task_categories(one_new_category(), "text/csv", None)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::UnsupportedMediaType(_)));
}

#[tokio::test]
async fn test_default_locale_comes_from_config() {
    let db = TestDb::new();
    let config = MockConfig {
        default_locale: "sv".to_string(),
        ..Default::default()
    };
    // 英文表头在瑞典语下找不到工作表
    let result = api(db.task_category_repo(), config)
        .import_task_categories(one_new_category(), APPLICATION_XLSX, None)
        .await
        .unwrap();

    assert_eq!(
        result.messages(),
        &["Saknar flik med namn Uppgiftskategorier".to_string()]
    );
}

#[tokio::test]
async fn test_explicit_locale_wins_over_default() {
    let db = TestDb::new();
    let config = MockConfig {
        default_locale: "sv".to_string(),
        ..Default::default()
    };

    let result = api(db.task_category_repo(), config)
        .import_task_categories(one_new_category(), APPLICATION_XLSX, Some("en"))
        .await
        .unwrap();

    assert!(result.is_success(), "{:?}", result);
}

#[tokio::test]
async fn test_export_all_and_selected() {
    let db = TestDb::new();
    let repo = db.task_category_repo();
    let first = repo.insert("Lighting", true, "admin", Utc::now()).unwrap();
    repo.insert("Sound", false, "admin", Utc::now()).unwrap();
    let api = api(repo, MockConfig::default());

    let all = api
        .export_task_categories(Vec::new(), APPLICATION_XLSX, None)
        .await
        .unwrap();
    assert_eq!(all.file_name, "task_categories.xlsx");
    assert_eq!(all.content_type, APPLICATION_XLSX);
    let document = Document::open(&all.bytes, APPLICATION_XLSX).unwrap();
    let sheet = document.sheet_at(0).unwrap();
    assert_eq!(sheet.name(), "Task categories");
    assert_eq!(sheet.cell_text(1, 1), "Lighting");
    assert_eq!(sheet.cell_text(2, 1), "Sound");

    let selected = api
        .export_task_categories(vec![first.id], APPLICATION_XLSX, None)
        .await
        .unwrap();
    let document = Document::open(&selected.bytes, APPLICATION_XLSX).unwrap();
    let sheet = document.sheet_at(0).unwrap();
    assert_eq!(sheet.cell_text(1, 1), "Lighting");
    assert_eq!(sheet.cell_text(2, 1), "");
}

#[tokio::test]
async fn test_export_reports_canonical_content_type() {
    let db = TestDb::new();

    let file = api(db.task_category_repo(), MockConfig::default())
        .export_task_categories(
            Vec::new(),
            " Application/Vnd.OpenXmlFormats-OfficeDocument.SpreadsheetML.Sheet ",
            Some("en"),
        )
        .await
        .unwrap();

    assert_eq!(file.content_type, APPLICATION_XLSX);
    assert_eq!(file.file_name, "task_categories.xlsx");
}

#[tokio::test]
async fn test_legacy_export_format_is_rejected() {
    let db = TestDb::new();

    let err = api(db.task_category_repo(), MockConfig::default())
        .export_task_categories(Vec::new(), APPLICATION_XLS, None)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::UnsupportedMediaType(_)));
}

#[tokio::test]
async fn test_api_with_persisted_config() {
    let db = TestDb::new();
    let config: ConfigManager = db.config_manager();
    config
        .set_global_config_value("impex.import_actor", "from-db")
        .unwrap();

    let api = TaskCategoryApi::new(db.task_category_repo(), Arc::new(config), catalog());
    let result = api
        .import_task_categories(one_new_category(), APPLICATION_XLSX, Some("en"))
        .await
        .unwrap();

    assert!(result.is_success(), "{:?}", result);
    let all = db.task_category_repo().find_all().unwrap();
    assert_eq!(all[0].audit.created_by, "from-db");
}
