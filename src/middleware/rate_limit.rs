//! Rate limiting middleware
//! 
//! This module provides rate limiting functionality to prevent abuse of
//! sensitive endpoints such as login and one-time code issuance.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn, info};
use crate::utils::errors::{TurfBookError, Result};

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window
    pub max_requests: u32,
    /// Time window duration
    pub window_duration: Duration,
    /// Burst allowance (extra requests allowed in short bursts)
    pub burst_allowance: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 5,
            window_duration: Duration::from_secs(60),
            burst_allowance: 2,
        }
    }
}

impl RateLimitConfig {
    /// Build from the application settings section
    pub fn from_settings(settings: &crate::config::RateLimitSettings) -> Self {
        Self {
            max_requests: settings.max_requests,
            window_duration: Duration::from_secs(settings.window_seconds),
            burst_allowance: settings.burst_allowance,
        }
    }
}

/// Sliding window of request times for one client key
#[derive(Debug, Clone)]
struct ClientWindow {
    hits: VecDeque<Instant>,
    burst_used: u32,
    window_started: Instant,
}

impl ClientWindow {
    fn new() -> Self {
        Self {
            hits: VecDeque::new(),
            burst_used: 0,
            window_started: Instant::now(),
        }
    }

    /// Drop hits that fell out of the window; burst credit refreshes once a
    /// full window has passed since it was last granted.
    fn prune(&mut self, window: Duration) {
        let cutoff = Instant::now() - window;
        while self.hits.front().is_some_and(|&hit| hit <= cutoff) {
            self.hits.pop_front();
        }
        
        if self.window_started.elapsed() > window {
            self.burst_used = 0;
            self.window_started = Instant::now();
        }
    }

    /// Record the request if it fits the limit or remaining burst credit
    fn try_acquire(&mut self, config: &RateLimitConfig) -> bool {
        self.prune(config.window_duration);
        
        if (self.hits.len() as u32) < config.max_requests {
            self.hits.push_back(Instant::now());
            return true;
        }
        
        if self.burst_used < config.burst_allowance {
            self.burst_used += 1;
            self.hits.push_back(Instant::now());
            return true;
        }
        
        false
    }
}

/// Rate limiting middleware keyed by client identity (email, IP)
#[derive(Clone)]
pub struct RateLimitMiddleware {
    config: RateLimitConfig,
    entries: Arc<Mutex<HashMap<String, ClientWindow>>>,
}

impl RateLimitMiddleware {
    /// Create a new RateLimitMiddleware instance
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Check if a client key is rate limited
    pub fn check_rate_limit(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        let window = entries.entry(key.to_string()).or_insert_with(ClientWindow::new);
        
        if window.try_acquire(&self.config) {
            debug!(key = key, "Rate limit check passed");
            Ok(())
        } else {
            warn!(key = key, "Rate limit exceeded");
            Err(TurfBookError::RateLimitExceeded)
        }
    }

    /// Clear rate limit for a specific key (admin function)
    pub fn clear_key(&self, key: &str) -> bool {
        let mut entries = self.entries.lock().unwrap();
        let removed = entries.remove(key).is_some();
        
        if removed {
            info!(key = key, "Rate limit cleared for key");
        }
        
        removed
    }

    /// Cleanup old entries (should be called periodically)
    pub fn cleanup_old_entries(&self) {
        let mut entries = self.entries.lock().unwrap();
        // Keep entries for 2x window duration
        let cutoff = Instant::now() - self.config.window_duration * 2;
        
        entries.retain(|_, window| {
            window.hits.iter().any(|&hit| hit > cutoff)
        });
        
        debug!(remaining_entries = entries.len(), "Cleaned up old rate limit entries");
    }
}

impl Default for RateLimitMiddleware {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_basic() {
        let config = RateLimitConfig {
            max_requests: 3,
            window_duration: Duration::from_secs(60),
            burst_allowance: 1,
        };
        
        let middleware = RateLimitMiddleware::new(config);
        
        // First 3 requests should pass
        assert!(middleware.check_rate_limit("otp:a@b.com").is_ok());
        assert!(middleware.check_rate_limit("otp:a@b.com").is_ok());
        assert!(middleware.check_rate_limit("otp:a@b.com").is_ok());
        
        // 4th request should use burst allowance
        assert!(middleware.check_rate_limit("otp:a@b.com").is_ok());
        
        // 5th request should fail
        assert!(middleware.check_rate_limit("otp:a@b.com").is_err());
    }

    #[test]
    fn test_keys_are_independent() {
        let config = RateLimitConfig {
            max_requests: 1,
            window_duration: Duration::from_secs(60),
            burst_allowance: 0,
        };
        
        let middleware = RateLimitMiddleware::new(config);
        
        assert!(middleware.check_rate_limit("otp:a@b.com").is_ok());
        assert!(middleware.check_rate_limit("otp:a@b.com").is_err());
        
        // A different key is unaffected
        assert!(middleware.check_rate_limit("otp:c@d.com").is_ok());
    }

    #[test]
    fn test_clear_key() {
        let config = RateLimitConfig {
            max_requests: 1,
            window_duration: Duration::from_secs(60),
            burst_allowance: 0,
        };
        
        let middleware = RateLimitMiddleware::new(config);
        
        assert!(middleware.check_rate_limit("login:a@b.com").is_ok());
        assert!(middleware.check_rate_limit("login:a@b.com").is_err());
        
        assert!(middleware.clear_key("login:a@b.com"));
        assert!(middleware.check_rate_limit("login:a@b.com").is_ok());
    }

    #[test]
    fn test_cleanup_keeps_recent_entries() {
        let middleware = RateLimitMiddleware::default();
        
        middleware.check_rate_limit("otp:a@b.com").unwrap();
        middleware.check_rate_limit("otp:a@b.com").unwrap();
        
        middleware.cleanup_old_entries();
        let entries = middleware.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_window_prune_expires_hits() {
        let config = RateLimitConfig {
            max_requests: 2,
            window_duration: Duration::from_millis(10),
            burst_allowance: 0,
        };
        
        let middleware = RateLimitMiddleware::new(config);
        
        assert!(middleware.check_rate_limit("otp:a@b.com").is_ok());
        assert!(middleware.check_rate_limit("otp:a@b.com").is_ok());
        assert!(middleware.check_rate_limit("otp:a@b.com").is_err());
        
        // After the window has elapsed, the key is allowed again
        std::thread::sleep(Duration::from_millis(15));
        assert!(middleware.check_rate_limit("otp:a@b.com").is_ok());
    }
}
