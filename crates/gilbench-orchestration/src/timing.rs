//! Timing samples taken from monotonic instants.

use std::fmt;
use std::time::{Duration, Instant};

/// Elapsed time of one measured operation, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimingSample(f64);

impl TimingSample {
    /// Sample spanning `start..end`.
    #[must_use]
    pub fn between(start: Instant, end: Instant) -> Self {
        Self::from_duration(end.saturating_duration_since(start))
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_duration(d: Duration) -> Self {
        Self(d.as_nanos() as f64 / 1_000_000.0)
    }

    #[must_use]
    pub fn from_millis(ms: f64) -> Self {
        Self(ms)
    }

    #[must_use]
    pub fn as_millis(self) -> f64 {
        self.0
    }

    /// Run `f` and time it.
    pub fn measure<R>(f: impl FnOnce() -> R) -> (R, Self) {
        let start = Instant::now();
        let out = f();
        let end = Instant::now();
        (out, Self::between(start, end))
    }
}

/// Shortest round-trip decimal, `.0` on whole values, then `ms`.
///
/// Below 1e-4 and from 1e16 up the value switches to exponent form with a
/// signed, two-digit exponent (`2e-05ms`, `1.5e+16ms`).
impl fmt::Display for TimingSample {
    #[allow(clippy::float_cmp)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        let magnitude = v.abs();
        if v.is_finite() && v != 0.0 && !(1e-4..1e16).contains(&magnitude) {
            let sci = format!("{v:e}");
            let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            write!(f, "{mantissa}e{sign}{:02}ms", exp.unsigned_abs())
        } else if v.is_finite() && v.fract() == 0.0 {
            write!(f, "{v:.1}ms")
        } else {
            write!(f, "{v}ms")
        }
    }
}
