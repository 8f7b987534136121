pub mod indexing;

pub use indexing::*;

use std::time::{Duration, Instant};

/// Run `f` once and return its result with the elapsed wall time.
pub fn timed<T, F: FnOnce() -> T>(f: F) -> (T, Duration) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn timed_returns_value() {
        let (v, elapsed) = timed(|| 2 + 2);
        assert_eq!(v, 4);
        assert!(elapsed <= Duration::from_secs(60));
    }
}
