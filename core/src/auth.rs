//! Bearer-token sources for the real client.
//!
//! The real client asks its `TokenProvider` before every request and attaches
//! `Authorization: Bearer <token>` only when one comes back. A provider that
//! has nothing to offer returns `Ok(None)`; the request then goes out without
//! the header.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::error::ApiError;

/// Identity tokens live for an hour; refresh five minutes early.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(3600 - 5 * 60);

#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn token(&self) -> Result<Option<String>, ApiError>;
}

/// Never supplies a token.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

#[async_trait]
impl TokenProvider for NoToken {
    async fn token(&self) -> Result<Option<String>, ApiError> {
        Ok(None)
    }
}

/// Always supplies the same token.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

#[async_trait]
impl TokenProvider for StaticToken {
    async fn token(&self) -> Result<Option<String>, ApiError> {
        Ok(Some(self.0.clone()))
    }
}

#[derive(Deserialize)]
struct TokenBody {
    token: String,
}

/// Fetches `{"token": "..."}` from a token endpoint on every call.
/// Wrap it in `CachedTokenProvider` to avoid a round-trip per request.
#[derive(Debug, Clone)]
pub struct HttpTokenSource {
    url: String,
    http: reqwest::Client,
}

impl HttpTokenSource {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl TokenProvider for HttpTokenSource {
    async fn token(&self) -> Result<Option<String>, ApiError> {
        let response = self
            .http
            .get(&self.url)
            .header("content-type", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Auth(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Auth(format!(
                "token endpoint returned {}",
                status.as_u16()
            )));
        }

        let body: TokenBody = response
            .json()
            .await
            .map_err(|e| ApiError::Auth(e.to_string()))?;
        Ok(Some(body.token).filter(|t| !t.is_empty()))
    }
}

struct CachedToken {
    token: String,
    expires_at: Instant,
}

/// Reuses the inner provider's token until `ttl` has passed.
pub struct CachedTokenProvider<P> {
    inner: P,
    ttl: Duration,
    cache: Mutex<Option<CachedToken>>,
}

impl<P: TokenProvider> CachedTokenProvider<P> {
    pub fn new(inner: P) -> Self {
        Self::with_ttl(inner, DEFAULT_TOKEN_TTL)
    }

    pub fn with_ttl(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            cache: Mutex::new(None),
        }
    }

    /// Drop the cached token so the next call refreshes it.
    pub async fn clear(&self) {
        *self.cache.lock().await = None;
    }
}

#[async_trait]
impl<P: TokenProvider> TokenProvider for CachedTokenProvider<P> {
    async fn token(&self) -> Result<Option<String>, ApiError> {
        // Held across the fetch so concurrent callers share one refresh.
        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.as_ref() {
            if Instant::now() < cached.expires_at {
                return Ok(Some(cached.token.clone()));
            }
        }

        let fresh = self.inner.token().await?;
        *cache = fresh.as_ref().map(|token| CachedToken {
            token: token.clone(),
            expires_at: Instant::now() + self.ttl,
        });
        Ok(fresh)
    }
}

#[async_trait]
impl<T: TokenProvider + ?Sized> TokenProvider for Arc<T> {
    async fn token(&self) -> Result<Option<String>, ApiError> {
        (**self).token().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    struct Counting(AtomicU32);

    #[async_trait]
    impl TokenProvider for Counting {
        async fn token(&self) -> Result<Option<String>, ApiError> {
            let n = self.0.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(Some(format!("token-{n}")))
        }
    }

    #[tokio::test]
    async fn static_and_empty_providers() {
        assert_eq!(NoToken.token().await.unwrap(), None);
        assert_eq!(
            StaticToken("abc".to_string()).token().await.unwrap(),
            Some("abc".to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn cached_token_is_reused_until_expiry() {
        let provider = CachedTokenProvider::with_ttl(Counting(AtomicU32::new(0)), Duration::from_secs(60));

        assert_eq!(provider.token().await.unwrap().as_deref(), Some("token-1"));
        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(provider.token().await.unwrap().as_deref(), Some("token-1"));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(provider.token().await.unwrap().as_deref(), Some("token-2"));
    }

    #[tokio::test(start_paused = true)]
    async fn clear_forces_refresh() {
        let provider = CachedTokenProvider::new(Counting(AtomicU32::new(0)));
        assert_eq!(provider.token().await.unwrap().as_deref(), Some("token-1"));
        provider.clear().await;
        assert_eq!(provider.token().await.unwrap().as_deref(), Some("token-2"));
    }

    #[tokio::test]
    async fn missing_token_is_not_cached() {
        let provider = CachedTokenProvider::new(NoToken);
        assert_eq!(provider.token().await.unwrap(), None);
        assert!(provider.cache.lock().await.is_none());
    }

    #[test]
    fn default_ttl_leaves_five_minute_buffer() {
        assert_eq!(DEFAULT_TOKEN_TTL, Duration::from_secs(55 * 60));
    }
}
