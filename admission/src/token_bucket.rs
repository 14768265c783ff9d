use tessara_systemtime::unix_time_as_millis;
use tessara_util::Mutex;

/// A continuously-refilled token bucket.
///
/// Tokens accrue at `rate` per second up to a ceiling of
/// `ceil(rate * burst_multiplier)`; each admitted request consumes one.
/// A fresh bucket starts full, so a cold identity gets its whole burst
/// allowance up front. Internally synchronized: concurrent callers share
/// one bucket with no external locking.
pub struct TokenBucket {
    rate: f64,
    ceiling: f64,
    state: Mutex<State>,
}

struct State {
    tokens: f64,
    refilled_at: u64,
}

impl TokenBucket {
    /// Create a full bucket. `burst_multiplier` below 1 is clamped to 1.
    pub fn new(rate: f64, burst_multiplier: f64) -> Self {
        let ceiling = (rate * burst_multiplier.max(1.0)).ceil();
        TokenBucket {
            rate,
            ceiling,
            state: Mutex::new(State {
                tokens: ceiling,
                refilled_at: unix_time_as_millis(),
            }),
        }
    }

    /// Take one token. Returns false when the bucket is dry.
    pub fn try_take_one_token(&self) -> bool {
        let mut state = self.state.lock();
        self.refill(&mut state);
        if state.tokens >= 1.0 {
            state.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Whether the bucket has refilled all the way back to its ceiling,
    /// i.e. nothing has drawn from it for at least one full refill period.
    pub fn is_idle(&self) -> bool {
        let mut state = self.state.lock();
        self.refill(&mut state);
        state.tokens >= self.ceiling
    }

    /// Burst ceiling in tokens.
    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    /// Refill rate in tokens per second.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    fn refill(&self, state: &mut State) {
        let now = unix_time_as_millis();
        // saturating: a clock stepped backwards must not drain the bucket
        let elapsed = now.saturating_sub(state.refilled_at);
        if elapsed > 0 {
            let accrued = self.rate * (elapsed as f64 / 1_000.0);
            state.tokens = (state.tokens + accrued).min(self.ceiling);
            state.refilled_at = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TokenBucket;
    use tessara_systemtime::faketime;

    #[test]
    fn cold_bucket_grants_full_burst_then_limits() {
        let guard = faketime();
        guard.set_faketime(1_000);

        let bucket = TokenBucket::new(10.0, 2.0);
        assert_eq!(bucket.ceiling(), 20.0);
        for _ in 0..20 {
            assert!(bucket.try_take_one_token());
        }
        assert!(!bucket.try_take_one_token());
    }

    #[test]
    fn refill_tracks_elapsed_time() {
        let guard = faketime();
        guard.set_faketime(1_000);

        let bucket = TokenBucket::new(5.0, 1.0);
        for _ in 0..5 {
            assert!(bucket.try_take_one_token());
        }
        assert!(!bucket.try_take_one_token());

        // 400ms at 5/s accrues two tokens
        guard.set_faketime(1_400);
        assert!(bucket.try_take_one_token());
        assert!(bucket.try_take_one_token());
        assert!(!bucket.try_take_one_token());
    }

    #[test]
    fn ceiling_caps_accrual() {
        let guard = faketime();
        guard.set_faketime(0);

        let bucket = TokenBucket::new(10.0, 1.0);
        assert!(bucket.try_take_one_token());

        // hours later the bucket holds exactly its ceiling, no more
        guard.set_faketime(3_600_000);
        for _ in 0..10 {
            assert!(bucket.try_take_one_token());
        }
        assert!(!bucket.try_take_one_token());
    }

    #[test]
    fn idle_means_refilled_to_ceiling() {
        let guard = faketime();
        guard.set_faketime(0);

        let bucket = TokenBucket::new(5.0, 1.0);
        assert!(bucket.is_idle());

        assert!(bucket.try_take_one_token());
        assert!(!bucket.is_idle());

        // one token at 5/s takes 200ms to come back
        guard.set_faketime(200);
        assert!(bucket.is_idle());
    }

    #[test]
    fn backwards_clock_does_not_drain() {
        let guard = faketime();
        guard.set_faketime(10_000);

        let bucket = TokenBucket::new(1.0, 1.0);
        assert!(bucket.try_take_one_token());

        guard.set_faketime(5_000);
        assert!(!bucket.try_take_one_token());

        guard.set_faketime(11_000);
        assert!(bucket.try_take_one_token());
    }

    #[test]
    fn multiplier_below_one_is_clamped() {
        let bucket = TokenBucket::new(4.0, 0.25);
        assert_eq!(bucket.ceiling(), 4.0);
    }
}
