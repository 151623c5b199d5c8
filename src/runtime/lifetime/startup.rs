use crate::cache::object_cache::MokaCacheWrapper;
use crate::cache::{ObjectCache, register::get_object_cache_plugin};
use crate::config::AppConfig;
use crate::errors::{ErpError, Result};
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, warn};

use super::seed;

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

async fn build_cache(name: &str) -> Result<Arc<dyn ObjectCache>> {
    let constructor = get_object_cache_plugin(name)
        .ok_or_else(|| ErpError::cache_plugin_not_found(name.to_string()))?;
    constructor().await.map(Arc::from)
}

/// 按配置创建缓存，失败时退回进程内缓存
async fn create_cache() -> Arc<dyn ObjectCache> {
    let cache_type = &AppConfig::get().cache.cache_type;
    warn!("Attempting to create {} cache backend", cache_type);

    match build_cache(cache_type).await {
        Ok(cache) => {
            warn!("Successfully created {} cache backend", cache_type);
            return cache;
        }
        Err(e) => warn!("Failed to create {} cache: {}", cache_type, e),
    }

    if cache_type != "moka"
        && let Ok(cache) = build_cache("moka").await
    {
        warn!("Falling back to Moka (in-memory) cache backend");
        return cache;
    }

    // 插件表为空（例如链接器丢弃了注册函数）时直接构造
    let config = AppConfig::get();
    warn!("Constructing Moka cache directly");
    Arc::new(MokaCacheWrapper::with_settings(
        config.cache.memory.max_capacity,
        config.cache.default_ttl,
    ))
}

/// 准备服务器启动的上下文：存储、初始数据与缓存
pub async fn prepare_server_startup() -> Result<StartupContext> {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    if cfg!(debug_assertions) {
        debug!(
            "Registered cache plugins: {:?}",
            crate::cache::register::registered_object_cache_plugins()
        );
    }

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    seed::seed_teacher(storage.as_ref()).await;
    if AppConfig::get().seed.demo_data {
        seed::seed_demo_data(storage.as_ref()).await;
    }

    let cache = create_cache().await;
    warn!("Cache backend initialized");

    Ok(StartupContext { storage, cache })
}
