use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use futures_util::future::{BoxFuture, FutureExt, Shared};
use isg_core::{
    validate_pages, CycleOutcome, CycleState, CycleTracker, Page, PageReport, PropertyTable,
};
use isg_logging::{isg_debug, isg_error, isg_info, isg_warn};
use scraper::Html;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::{
    CounterSnapshot, EngineError, EngineSettings, Fetcher, MetricsSink, ReqwestFetcher,
    ScrapeCounters, SinkProperty, TableWalker,
};

type SharedCycle = Shared<BoxFuture<'static, CycleOutcome>>;

struct PageSlot {
    name: String,
    path: String,
    properties: Mutex<PropertyTable<SinkProperty>>,
}

impl PageSlot {
    fn properties(&self) -> MutexGuard<'_, PropertyTable<SinkProperty>> {
        self.properties
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

struct EngineInner {
    fetcher: Arc<dyn Fetcher>,
    walker: TableWalker,
    pages: Vec<Arc<PageSlot>>,
    limiter: Semaphore,
    counters: ScrapeCounters,
    timeout: Duration,
    in_flight: Mutex<Option<SharedCycle>>,
}

/// Orchestrates scrape cycles over all configured pages.
///
/// At most one cycle runs at a time; triggers arriving while a cycle is in
/// flight wait for that cycle and receive its outcome. A cycle runs on its
/// own task, so it finishes even when every trigger stops waiting.
pub struct ScrapeEngine {
    inner: Arc<EngineInner>,
}

impl ScrapeEngine {
    pub fn new(
        settings: &EngineSettings,
        pages: Vec<Page>,
        sink: Arc<dyn MetricsSink>,
    ) -> Result<Self, EngineError> {
        let fetcher = Arc::new(ReqwestFetcher::new(settings)?);
        Self::with_fetcher(settings, pages, sink, fetcher)
    }

    /// Builds an engine around any fetcher. Validates the page definitions;
    /// an error here must stop startup.
    pub fn with_fetcher(
        settings: &EngineSettings,
        pages: Vec<Page>,
        sink: Arc<dyn MetricsSink>,
        fetcher: Arc<dyn Fetcher>,
    ) -> Result<Self, EngineError> {
        validate_pages(&pages)?;
        let walker = TableWalker::new(&settings.layout)?;

        let mut slots = Vec::with_capacity(pages.len());
        for page in pages {
            let properties = page
                .metrics
                .into_iter()
                .map(|definition| SinkProperty::new(definition, sink.clone()))
                .collect();
            let table = PropertyTable::new(&page.name, properties)?;
            isg_debug!(
                "Prepared page {} ({}) with {} properties",
                page.name,
                page.path,
                table.len()
            );
            slots.push(Arc::new(PageSlot {
                name: page.name,
                path: page.path,
                properties: Mutex::new(table),
            }));
        }
        isg_info!(
            "Scrape engine ready: {} pages, timeout {:?}",
            slots.len(),
            settings.timeout
        );

        Ok(Self {
            inner: Arc::new(EngineInner {
                fetcher,
                walker,
                pages: slots,
                limiter: Semaphore::new(settings.max_concurrent_pages.max(1)),
                counters: ScrapeCounters::new(),
                timeout: settings.timeout,
                in_flight: Mutex::new(None),
            }),
        })
    }

    /// Runs one cycle bounded by the configured timeout.
    pub async fn run_cycle(&self) -> CycleOutcome {
        self.run_cycle_with_deadline(self.inner.timeout).await
    }

    /// Runs one cycle bounded by `deadline`. A caller joining a cycle that is
    /// already in flight is bound by that cycle's deadline instead.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn run_cycle_with_deadline(&self, deadline: Duration) -> CycleOutcome {
        let cycle = {
            let mut slot = self.inner.lock_in_flight();
            match slot.as_ref() {
                Some(cycle) => {
                    isg_debug!("Joining scrape cycle already in flight");
                    cycle.clone()
                }
                None => {
                    let cycle = spawn_cycle(self.inner.clone(), deadline);
                    *slot = Some(cycle.clone());
                    cycle
                }
            }
        };
        cycle.await
    }

    pub fn is_running(&self) -> bool {
        self.inner.lock_in_flight().is_some()
    }

    pub fn counters(&self) -> CounterSnapshot {
        self.inner.counters.snapshot()
    }

    /// Last value written for (group, key) on `page`, if any.
    pub fn value(&self, page: &str, group: &str, key: &str) -> Option<f64> {
        let slot = self.inner.pages.iter().find(|slot| slot.name == page)?;
        let properties = slot.properties();
        properties.lookup(group, key)?.last_value()
    }
}

/// Clears the in-flight slot when the cycle task ends, even by panic or abort.
struct InFlightGuard(Arc<EngineInner>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.lock_in_flight().take();
    }
}

fn spawn_cycle(inner: Arc<EngineInner>, deadline: Duration) -> SharedCycle {
    let task = tokio::spawn(async move {
        let _guard = InFlightGuard(inner.clone());
        inner.cycle(deadline).await
    });
    task.map(|joined| {
        joined.unwrap_or_else(|err| {
            isg_error!("Scrape cycle task failed: {}", err);
            CycleOutcome::TimedOut
        })
    })
    .boxed()
    .shared()
}

impl EngineInner {
    fn lock_in_flight(&self) -> MutexGuard<'_, Option<SharedCycle>> {
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn cycle(self: Arc<Self>, deadline: Duration) -> CycleOutcome {
        let started = Instant::now();
        let cancel = CancellationToken::new();
        let mut tracker = CycleTracker::new();
        tracker.start(self.pages.len());

        let mut tasks = JoinSet::new();
        let mut names = HashMap::with_capacity(self.pages.len());
        for page in &self.pages {
            let handle = tasks.spawn(scrape_page(
                self.clone(),
                page.clone(),
                cancel.child_token(),
            ));
            names.insert(handle.id(), page.name.clone());
        }

        let expiry = tokio::time::sleep(deadline);
        tokio::pin!(expiry);

        while tracker.state() == CycleState::Running {
            tokio::select! {
                joined = tasks.join_next_with_id() => match joined {
                    Some(Ok((_, report))) => self.record(&mut tracker, report),
                    Some(Err(err)) => {
                        let page = names.get(&err.id()).map_or("unknown", String::as_str);
                        self.record(&mut tracker, PageReport::failed(page, err.to_string()))
                    }
                    None => break,
                },
                _ = &mut expiry => {
                    cancel.cancel();
                    tracker.expire();
                }
            }
        }
        // Aborts whatever is still running after a timeout.
        tasks.shutdown().await;

        let elapsed = started.elapsed();
        self.counters.record_cycle(elapsed);
        match tracker.outcome() {
            Some(outcome @ CycleOutcome::Completed { .. }) => {
                isg_debug!("Scrape completed in {:.3}s", elapsed.as_secs_f64());
                outcome
            }
            Some(CycleOutcome::TimedOut) | None => {
                isg_warn!(
                    "Scrape timed out after {:.3}s, {} of {} pages pending",
                    deadline.as_secs_f64(),
                    tracker.pending(),
                    self.pages.len()
                );
                self.counters.record_scrape_error();
                CycleOutcome::TimedOut
            }
        }
    }

    fn record(&self, tracker: &mut CycleTracker, report: PageReport) {
        if let Some(err) = &report.transport_error {
            isg_error!("Could not scrape page {}: {}", report.page, err);
            self.counters.record_scrape_error();
        }
        for parse_error in &report.parse_errors {
            isg_warn!("Could not parse property on page {}: {}", report.page, parse_error);
        }
        self.counters.record_parse_errors(report.parse_errors.len());
        tracker.record(&report);
    }
}

async fn scrape_page(
    inner: Arc<EngineInner>,
    page: Arc<PageSlot>,
    cancel: CancellationToken,
) -> PageReport {
    let _permit = tokio::select! {
        permit = inner.limiter.acquire() => match permit {
            Ok(permit) => permit,
            Err(err) => return PageReport::failed(&page.name, err.to_string()),
        },
        _ = cancel.cancelled() => return PageReport::failed(&page.name, "cancelled while queued"),
    };

    isg_debug!("Fetching page {} ({})", page.name, page.path);
    match inner.fetcher.fetch(&page.path, &cancel).await {
        Ok(fetched) => apply_document(&inner.walker, &page, &fetched.html),
        Err(err) => PageReport::failed(&page.name, err.to_string()),
    }
}

fn apply_document(walker: &TableWalker, page: &PageSlot, html: &str) -> PageReport {
    let document = Html::parse_document(html);
    let mut properties = page.properties();
    let summary = properties.apply_all(walker.walk(&document).inspect(|reading| {
        isg_debug!(
            "Found property ({}, {}) = {:?}",
            reading.group,
            reading.key,
            reading.raw
        );
    }));
    isg_debug!(
        "Parsed page {}: {} updated, {} parse errors",
        page.name,
        summary.updated,
        summary.errors.len()
    );
    PageReport::parsed(page.name.clone(), summary.updated, summary.errors)
}
