//! Human formatting for progress lines.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub const SPINNER_FRAMES: [&str; 6] = ["●∙∙∙", "∙●∙∙", "∙∙●∙", "∙∙∙●", "∙∙●∙", "∙●∙∙"];

/// Rotating indicator glyph. Each call to `tick` advances one frame.
#[derive(Debug, Default)]
pub struct Spinner {
    position: AtomicUsize,
}

impl Spinner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&self) -> &'static str {
        let position = self.position.fetch_add(1, Ordering::Relaxed);
        SPINNER_FRAMES[position % SPINNER_FRAMES.len()]
    }
}

/// `950`, `12.3k`, `4.5M`.
pub fn format_count(value: f64) -> String {
    if value < 1e3 {
        format!("{}", value as u64)
    } else if value < 1e6 {
        format!("{:.1}k", value / 1e3)
    } else {
        format!("{:.1}M", value / 1e6)
    }
}

/// `1.2s`, `42s`, `3m07s`, `1h02m03s`.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 10.0 {
        return format!("{:.1}s", secs);
    }
    let whole = secs.round() as u64;
    if whole <= 60 {
        format!("{}s", whole)
    } else if whole < 3600 {
        format!("{}m{:02}s", whole / 60, whole % 60)
    } else {
        format!(
            "{}h{:02}m{:02}s",
            whole / 3600,
            (whole % 3600) / 60,
            whole % 60
        )
    }
}
