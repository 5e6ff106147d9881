//! ISG engine: page fetching, table walking and scrape cycle orchestration.
mod counters;
mod decode;
mod engine;
mod fetch;
mod handle;
mod settings;
mod sink;
mod tables;
mod types;

pub use counters::{CounterSnapshot, ScrapeCounters};
pub use decode::{decode_html, DecodeError, DecodedHtml};
pub use engine::ScrapeEngine;
pub use fetch::{FetchedPage, Fetcher, ReqwestFetcher};
pub use handle::EngineHandle;
pub use settings::{parse_headers, EngineSettings};
pub use sink::{InMemorySink, MetricsSink, Sample, SinkProperty};
pub use tables::{TableLayout, TableWalker};
pub use types::{EngineError, FailureKind, FetchError};
