use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Monotonic scrape telemetry, shared by concurrently running page tasks.
#[derive(Debug, Default)]
pub struct ScrapeCounters {
    scrape_errors: AtomicU64,
    parse_errors: AtomicU64,
    cycles: AtomicU64,
    last_duration_micros: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterSnapshot {
    pub scrape_errors: u64,
    pub parse_errors: u64,
    pub cycles: u64,
    pub last_duration: Duration,
}

impl ScrapeCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_scrape_error(&self) {
        self.scrape_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_parse_errors(&self, count: usize) {
        self.parse_errors.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_cycle(&self, duration: Duration) {
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);
        self.last_duration_micros.store(micros, Ordering::Relaxed);
        self.cycles.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            scrape_errors: self.scrape_errors.load(Ordering::Relaxed),
            parse_errors: self.parse_errors.load(Ordering::Relaxed),
            cycles: self.cycles.load(Ordering::Relaxed),
            last_duration: Duration::from_micros(self.last_duration_micros.load(Ordering::Relaxed)),
        }
    }
}
