// ==========================================
// Mock 配置实现 - 用于集成测试
// ==========================================

use async_trait::async_trait;
use register_impex::config::ImpexConfigReader;
use register_impex::repository::RepositoryResult;

/// Mock 配置结构
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub default_locale: String,
    pub max_upload_bytes: usize,
    pub import_actor: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
            max_upload_bytes: 1024 * 1024,
            import_actor: "import".to_string(),
        }
    }
}

#[async_trait]
impl ImpexConfigReader for MockConfig {
    async fn get_default_locale(&self) -> RepositoryResult<String> {
        Ok(self.default_locale.clone())
    }

    async fn get_max_upload_bytes(&self) -> RepositoryResult<usize> {
        Ok(self.max_upload_bytes)
    }

    async fn get_import_actor(&self) -> RepositoryResult<String> {
        Ok(self.import_actor.clone())
    }
}
