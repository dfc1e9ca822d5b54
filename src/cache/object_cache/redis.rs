//! Redis 对象缓存，所有键带统一前缀，便于整体失效

use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use tracing::{debug, error, warn};

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::config::CacheConfig;

pub struct RedisObjectCache {
    client: redis::Client,
    key_prefix: String,
    default_ttl: u64,
}

impl RedisObjectCache {
    pub fn new() -> Result<Self, String> {
        Self::from_config(&AppConfig::get().cache)
    }

    /// 建立客户端并 PING 一次，失败时由调用方回退到 moka
    pub fn from_config(config: &CacheConfig) -> Result<Self, String> {
        let url = &config.redis.url;
        let client = redis::Client::open(url.as_str())
            .map_err(|e| format!("Invalid Redis URL '{url}': {e}"))?;

        let pong = client
            .get_connection()
            .and_then(|mut conn| redis::cmd("PING").query::<String>(&mut conn));
        if let Err(e) = pong {
            error!("Redis at {} is unreachable: {}", url, e);
            return Err(format!("Redis ping failed: {e}"));
        }

        debug!(
            "Redis cache ready (prefix '{}', default TTL {}s)",
            config.redis.key_prefix, config.default_ttl
        );
        Ok(Self {
            client,
            key_prefix: config.redis.key_prefix.clone(),
            default_ttl: config.default_ttl,
        })
    }

    async fn connection(&self) -> Option<MultiplexedConnection> {
        match self.client.get_multiplexed_async_connection().await {
            Ok(conn) => Some(conn),
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                None
            }
        }
    }

    fn prefixed(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl ObjectCache for RedisObjectCache {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        let Some(mut conn) = self.connection().await else {
            return CacheResult::ExistsButNoValue;
        };

        match conn.get::<_, Option<String>>(self.prefixed(key)).await {
            Ok(Some(json)) => CacheResult::Found(json),
            Ok(None) => CacheResult::NotFound,
            Err(e) => {
                error!("Redis GET '{}' failed: {}", key, e);
                CacheResult::ExistsButNoValue
            }
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let Some(mut conn) = self.connection().await else {
            return;
        };

        let ttl = if ttl == 0 { self.default_ttl } else { ttl };
        if let Err(e) = conn
            .set_ex::<_, _, ()>(self.prefixed(&key), value, ttl)
            .await
        {
            error!("Redis SETEX '{}' failed: {}", key, e);
        }
    }

    async fn remove(&self, key: &str) {
        let Some(mut conn) = self.connection().await else {
            return;
        };

        match conn.del::<_, i64>(self.prefixed(key)).await {
            Ok(0) => debug!("Cache key '{}' was already absent", key),
            Ok(_) => debug!("Cache key '{}' evicted", key),
            Err(e) => error!("Redis DEL '{}' failed: {}", key, e),
        }
    }

    async fn invalidate_all(&self) {
        let Some(mut conn) = self.connection().await else {
            return;
        };

        let pattern = format!("{}*", self.key_prefix);
        let keys: Vec<String> = match conn.keys(&pattern).await {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Redis KEYS '{}' failed: {}", pattern, e);
                return;
            }
        };
        if keys.is_empty() {
            return;
        }

        let count = keys.len();
        match conn.del::<_, i64>(keys).await {
            Ok(_) => debug!("{} cache key(s) invalidated", count),
            Err(e) => error!("Failed to invalidate cache keys: {}", e),
        }
    }
}
