//! Short-lived credential cache for outbound notification senders.
//!
//! The sender owns a [`TokenCache`] and passes in the current time, so the
//! cache has no global state and no clock of its own.

use chrono::{DateTime, TimeDelta, Utc};

/// A freshly issued credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: TimeDelta,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct TokenCache {
    cached: Option<CachedToken>,
    /// Tokens this close to expiry are treated as expired.
    leeway: TimeDelta,
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenCache {
    pub fn new() -> Self {
        Self {
            cached: None,
            leeway: TimeDelta::seconds(30),
        }
    }

    #[must_use]
    pub fn with_leeway(mut self, leeway: TimeDelta) -> Self {
        self.leeway = leeway;
        self
    }

    /// The cached token if it is still usable at `now`.
    pub fn token(&self, now: DateTime<Utc>) -> Option<&str> {
        self.cached
            .as_ref()
            .filter(|cached| now < cached.expires_at - self.leeway)
            .map(|cached| cached.token.as_str())
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.cached.as_ref().map(|cached| cached.expires_at)
    }

    /// Return the cached token, calling `refresh` first when it is missing or expired.
    ///
    /// A failed refresh leaves the cache empty.
    pub fn get_or_refresh<E>(
        &mut self,
        now: DateTime<Utc>,
        refresh: impl FnOnce() -> Result<IssuedToken, E>,
    ) -> Result<&str, E> {
        let fresh = match self.cached.take() {
            Some(cached) if now < cached.expires_at - self.leeway => cached,
            _ => {
                let issued = refresh()?;
                CachedToken {
                    token: issued.token,
                    expires_at: now + issued.expires_in,
                }
            }
        };
        Ok(self.cached.insert(fresh).token.as_str())
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(seconds: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + seconds, 0).unwrap()
    }

    fn issue(token: &str, seconds: i64) -> Result<IssuedToken, String> {
        Ok(IssuedToken {
            token: token.to_string(),
            expires_in: TimeDelta::seconds(seconds),
        })
    }

    #[test]
    fn reuses_token_until_expiry() {
        let mut cache = TokenCache::new().with_leeway(TimeDelta::zero());
        let mut calls = 0;

        let first = cache
            .get_or_refresh(at(0), || {
                calls += 1;
                issue("one", 60)
            })
            .unwrap()
            .to_string();
        let second = cache
            .get_or_refresh(at(59), || {
                calls += 1;
                issue("two", 60)
            })
            .unwrap()
            .to_string();

        assert_eq!(first, "one");
        assert_eq!(second, "one");
        assert_eq!(calls, 1);
        assert_eq!(cache.expires_at(), Some(at(60)));
    }

    #[test]
    fn refreshes_after_expiry() {
        let mut cache = TokenCache::new().with_leeway(TimeDelta::zero());
        cache.get_or_refresh(at(0), || issue("one", 60)).unwrap();

        let token = cache.get_or_refresh(at(60), || issue("two", 60)).unwrap();

        assert_eq!(token, "two");
        assert_eq!(cache.token(at(61)), Some("two"));
    }

    #[test]
    fn leeway_refreshes_early() {
        let mut cache = TokenCache::new();
        cache.get_or_refresh(at(0), || issue("one", 60)).unwrap();
        assert_eq!(cache.token(at(29)), Some("one"));
        assert_eq!(cache.token(at(30)), None);
    }

    #[test]
    fn failed_refresh_leaves_cache_empty() {
        let mut cache = TokenCache::new();
        cache.get_or_refresh(at(0), || issue("one", 10)).unwrap();

        let result = cache.get_or_refresh(at(100), || Err::<IssuedToken, _>("offline"));

        assert_eq!(result, Err("offline"));
        assert_eq!(cache.expires_at(), None);
    }

    #[test]
    fn invalidate_forces_refresh() {
        let mut cache = TokenCache::new();
        cache.get_or_refresh(at(0), || issue("one", 600)).unwrap();
        cache.invalidate();
        assert_eq!(cache.token(at(1)), None);
    }
}
