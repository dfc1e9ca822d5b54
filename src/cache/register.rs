//! 缓存插件注册表
//!
//! 插件以名字注册一个异步构造器，启动时按 `cache.type` 取出并构造。

use crate::cache::traits::ObjectCache;
use crate::errors::Result;
use once_cell::sync::Lazy;
use std::{
    collections::BTreeMap,
    future::Future,
    pin::Pin,
    sync::{Arc, RwLock},
};

pub type BoxedObjectCacheFuture =
    Pin<Box<dyn Future<Output = Result<Box<dyn ObjectCache>>> + Send>>;
pub type ObjectCacheConstructor = Arc<dyn Fn() -> BoxedObjectCacheFuture + Send + Sync>;

static PLUGINS: Lazy<RwLock<BTreeMap<String, ObjectCacheConstructor>>> =
    Lazy::new(|| RwLock::new(BTreeMap::new()));

/// 同名插件后注册的覆盖先注册的
pub fn register_object_cache_plugin<S: Into<String>>(name: S, constructor: ObjectCacheConstructor) {
    PLUGINS
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .insert(name.into(), constructor);
}

pub fn get_object_cache_plugin(name: &str) -> Option<ObjectCacheConstructor> {
    PLUGINS
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .get(name)
        .cloned()
}

/// 已注册的插件名（按字母序）
pub fn registered_plugins() -> Vec<String> {
    PLUGINS
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .keys()
        .cloned()
        .collect()
}

pub fn debug_object_cache_registry() {
    let names = registered_plugins();
    if names.is_empty() {
        tracing::debug!("No object cache plugins registered");
    } else {
        tracing::debug!("Registered object cache plugins: {}", names.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::object_cache::moka::MokaCacheWrapper;

    #[tokio::test]
    async fn test_register_and_construct() {
        let constructor: ObjectCacheConstructor = Arc::new(|| {
            Box::pin(async {
                let cache: Box<dyn ObjectCache> = Box::new(MokaCacheWrapper::with_settings(10, 60));
                Ok(cache)
            })
        });
        register_object_cache_plugin("test-moka", constructor);

        assert!(registered_plugins().contains(&"test-moka".to_string()));
        let build = get_object_cache_plugin("test-moka").unwrap();
        assert!(build().await.is_ok());
        assert!(get_object_cache_plugin("memcached").is_none());
    }
}
