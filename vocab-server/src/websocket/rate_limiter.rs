use std::time::{Duration, Instant};

/// Token bucket for inbound websocket messages
#[derive(Debug, Clone)]
pub struct RateLimiter {
    tokens: u32,
    max_tokens: u32,
    refill_rate: Duration,
    last_refill: Instant,
}

impl RateLimiter {
    pub fn new() -> Self {
        // Door taps come in bursts; 20 in hand, one back every 250ms
        Self::new_with_limits(20, Duration::from_millis(250))
    }

    pub fn new_with_limits(max_tokens: u32, refill_rate: Duration) -> Self {
        Self {
            tokens: max_tokens,
            max_tokens,
            refill_rate,
            last_refill: Instant::now(),
        }
    }

    pub fn check_rate_limit(&mut self) -> bool {
        self.refill_tokens();

        if self.tokens > 0 {
            self.tokens -= 1;
            true
        } else {
            false
        }
    }

    fn refill_tokens(&mut self) {
        let time_passed = self.last_refill.elapsed();
        let refill_millis = self.refill_rate.as_millis().max(1);
        let tokens_to_add = (time_passed.as_millis() / refill_millis) as u32;

        if tokens_to_add > 0 {
            self.tokens = self.tokens.saturating_add(tokens_to_add).min(self.max_tokens);
            self.last_refill += self.refill_rate * tokens_to_add;
        }
    }

    pub fn remaining_tokens(&mut self) -> u32 {
        self.refill_tokens();
        self.tokens
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_empties_then_blocks() {
        let mut limiter = RateLimiter::new_with_limits(3, Duration::from_secs(60));

        assert!(limiter.check_rate_limit());
        assert!(limiter.check_rate_limit());
        assert!(limiter.check_rate_limit());
        assert!(!limiter.check_rate_limit());
        assert_eq!(limiter.remaining_tokens(), 0);
    }

    #[test]
    fn test_bucket_refills_over_time() {
        let mut limiter = RateLimiter::new_with_limits(2, Duration::from_millis(10));
        assert!(limiter.check_rate_limit());
        assert!(limiter.check_rate_limit());
        assert!(!limiter.check_rate_limit());

        std::thread::sleep(Duration::from_millis(25));
        assert_eq!(limiter.remaining_tokens(), 2);
    }
}
