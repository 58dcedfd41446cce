// ==========================================
// 登记系统 - 任务类别导入/导出API
// ==========================================
// 职责: 管理端批量导入/导出任务类别
// 说明: 解析与数据库访问为同步阻塞操作，
//       统一放到 tokio 阻塞线程池执行
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::ImpexConfigReader;
use crate::domain::TaskCategory;
use crate::exporter::ExportService;
use crate::i18n::MessageCatalog;
use crate::importer::error::ImpexResult;
use crate::importer::{ImportService, TaskCategoryImporter, ValidationResult};
use crate::repository::TaskCategoryRepository;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// 导出文件基础名
const EXPORT_FILE_STEM: &str = "task_categories";

/// 导出文件
#[derive(Debug, Clone, Serialize)]
pub struct ExportFile {
    pub file_name: String,
    pub content_type: String,
    #[serde(skip_serializing)]
    pub bytes: Vec<u8>,
}

// ==========================================
// TaskCategoryApi
// ==========================================
pub struct TaskCategoryApi<C: ImpexConfigReader> {
    repo: TaskCategoryRepository,
    config: Arc<C>,
    catalog: Arc<dyn MessageCatalog>,
}

impl<C: ImpexConfigReader> TaskCategoryApi<C> {
    pub fn new(
        repo: TaskCategoryRepository,
        config: Arc<C>,
        catalog: Arc<dyn MessageCatalog>,
    ) -> Self {
        Self {
            repo,
            config,
            catalog,
        }
    }

    /// 确定本次请求的语言（未指定时使用配置默认值）
    async fn resolve_locale(&self, locale: Option<&str>) -> ApiResult<String> {
        match locale.map(str::trim).filter(|l| !l.is_empty()) {
            Some(locale) => Ok(locale.to_string()),
            None => Ok(self.config.get_default_locale().await?),
        }
    }

    /// 导入任务类别
    ///
    /// # 返回
    /// - Ok(ValidationResult): 校验失败的问题列表，或导入成功
    /// - Err(ApiError): 文件为空或过大、文件类型不支持、文件损坏、数据库错误
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn import_task_categories(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
        locale: Option<&str>,
    ) -> ApiResult<ValidationResult> {
        if bytes.is_empty() {
            return Err(ApiError::InvalidInput("上传文件为空".to_string()));
        }

        let limit = self.config.get_max_upload_bytes().await?;
        if bytes.len() > limit {
            warn!(size = bytes.len(), limit = limit, "上传文件超过大小上限");
            return Err(ApiError::PayloadTooLarge {
                size: bytes.len(),
                limit,
            });
        }

        let locale = self.resolve_locale(locale).await?;
        let actor = self.config.get_import_actor().await?;
        let repo = self.repo.clone();
        let catalog = Arc::clone(&self.catalog);
        let content_type = content_type.to_string();

        let result = tokio::task::spawn_blocking(move || -> ImpexResult<ValidationResult> {
            let importer = TaskCategoryImporter::new(repo, Arc::clone(&catalog), actor);
            ImportService::new(catalog).run(&bytes, &content_type, &locale, &importer)
        })
        .await??;

        info!(success = result.is_success(), "任务类别导入请求完成");
        Ok(result)
    }

    /// 导出任务类别（ids 为空时导出全部，按创建时间排序）
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn export_task_categories(
        &self,
        ids: Vec<i64>,
        content_type: &str,
        locale: Option<&str>,
    ) -> ApiResult<ExportFile> {
        let locale = self.resolve_locale(locale).await?;
        let repo = self.repo.clone();
        let catalog = Arc::clone(&self.catalog);
        let requested_type = content_type.to_string();

        let exported = tokio::task::spawn_blocking(move || -> ImpexResult<_> {
            let records: Vec<TaskCategory> = if ids.is_empty() {
                repo.find_all()?
            } else {
                repo.find_by_ids(&ids)?
            };
            ExportService::new(catalog).export(&records, &requested_type, &locale, None)
        })
        .await??;

        Ok(ExportFile {
            file_name: format!("{}{}", EXPORT_FILE_STEM, exported.extension),
            content_type: exported.content_type.to_string(),
            bytes: exported.bytes,
        })
    }
}
