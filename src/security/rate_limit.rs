//! Per-client fixed-window rate limiting.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Sweep expired counters once the map reaches this size, so one-off clients
/// do not accumulate forever.
const SWEEP_AT: usize = 4096;

/// Request counter for a single client within the current window.
struct WindowCounter {
    count: u32,
    window_start: Instant,
}

/// Fixed-window rate limiter keyed by client address.
///
/// The counter map is the only shared mutable state in the gateway; the
/// mutex serializes updates so concurrent bursts from one client never lose
/// increments.
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    counters: Mutex<HashMap<String, WindowCounter>>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            counters: Mutex::new(HashMap::new()),
        }
    }

    /// Admit or reject one request from `client_key`.
    ///
    /// A client's first request, or its first request after the window has
    /// elapsed, resets the counter. Rejection is a hard reject; nothing is
    /// queued.
    pub fn admit(&self, client_key: &str) -> bool {
        let now = Instant::now();
        let mut counters = self.counters.lock().expect("rate limiter mutex poisoned");

        if counters.len() >= SWEEP_AT && !counters.contains_key(client_key) {
            let window = self.window;
            counters.retain(|_, counter| now.duration_since(counter.window_start) < window);
        }

        let counter = counters
            .entry(client_key.to_string())
            .or_insert(WindowCounter {
                count: 0,
                window_start: now,
            });

        if now.duration_since(counter.window_start) >= self.window {
            counter.count = 0;
            counter.window_start = now;
        }

        counter.count += 1;
        counter.count <= self.max_requests
    }
}
