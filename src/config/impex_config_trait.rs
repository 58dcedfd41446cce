// ==========================================
// 登记系统 - 导入/导出配置读取 Trait
// ==========================================
// 职责: 定义导入/导出模块所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// ImpexConfigReader Trait
// ==========================================
// 用途: 导入/导出模块所需的配置读取接口
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait ImpexConfigReader: Send + Sync {
    /// 默认语言（调用方未指定 locale 时使用）
    ///
    /// # 默认值
    /// - "sv"
    async fn get_default_locale(&self) -> RepositoryResult<String>;

    /// 上传文件大小上限（字节）
    ///
    /// # 默认值
    /// - 10 MiB
    async fn get_max_upload_bytes(&self) -> RepositoryResult<usize>;

    /// 导入操作人（写入审计字段）
    ///
    /// # 默认值
    /// - "import"
    async fn get_import_actor(&self) -> RepositoryResult<String>;
}
