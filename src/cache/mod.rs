//! 对象缓存
//!
//! 支持 Moka（进程内）和 Redis 两种插件，启动时按配置选择，Redis 不可用时回退到 Moka。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::errors::{EdurootsError, Result};
use register::{ObjectCacheConstructor, get_object_cache_plugin, register_object_cache_plugin};

/// 注册内置缓存插件
pub fn register_builtin_plugins() {
    let moka: ObjectCacheConstructor = Arc::new(|| {
        Box::pin(async {
            let cache: Box<dyn ObjectCache> = Box::new(object_cache::moka::MokaCacheWrapper::new());
            Ok(cache)
        })
    });
    register_object_cache_plugin("moka", moka);

    let redis: ObjectCacheConstructor = Arc::new(|| {
        Box::pin(async {
            let cache = object_cache::redis::RedisObjectCache::new()
                .map_err(EdurootsError::cache_connection)?;
            let cache: Box<dyn ObjectCache> = Box::new(cache);
            Ok(cache)
        })
    });
    register_object_cache_plugin("redis", redis);
}

/// 按配置创建对象缓存
pub async fn create_object_cache() -> Result<Arc<dyn ObjectCache>> {
    let config = AppConfig::get();
    let cache_type = config.cache.cache_type.as_str();

    let constructor = get_object_cache_plugin(cache_type).ok_or_else(|| {
        EdurootsError::cache_plugin_not_found(format!("未注册的缓存类型: {cache_type}"))
    })?;

    match constructor().await {
        Ok(cache) => {
            info!("对象缓存已初始化: {}", cache_type);
            Ok(Arc::from(cache))
        }
        Err(e) if cache_type != "moka" => {
            warn!("{} 缓存初始化失败，回退到 moka: {}", cache_type, e);
            let fallback = get_object_cache_plugin("moka").ok_or_else(|| {
                EdurootsError::cache_plugin_not_found("未注册的缓存类型: moka")
            })?;
            Ok(Arc::from(fallback().await?))
        }
        Err(e) => Err(e),
    }
}

/// 读取 JSON 缓存值，反序列化失败时删除该键
pub async fn get_json<T: DeserializeOwned>(cache: &dyn ObjectCache, key: &str) -> Option<T> {
    match cache.get_raw(key).await {
        CacheResult::Found(json) => match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(_) => {
                cache.remove(key).await;
                None
            }
        },
        _ => None,
    }
}

/// 写入 JSON 缓存值
pub async fn insert_json<T: Serialize>(cache: &dyn ObjectCache, key: String, value: &T, ttl: u64) {
    if let Ok(json) = serde_json::to_string(value) {
        cache.insert_raw(key, json, ttl).await;
    }
}
