use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use isg_core::CycleOutcome;

use crate::{CounterSnapshot, EngineError, ScrapeEngine};

enum EngineCommand {
    Scrape {
        deadline: Duration,
        reply: mpsc::Sender<CycleOutcome>,
    },
}

/// Blocking front end for callers without an async runtime, such as a
/// synchronous collection-request handler.
///
/// The engine runs on a dedicated worker thread that owns a tokio runtime.
/// Do not call `run_scrape_cycle` from inside an async context.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    engine: Arc<ScrapeEngine>,
}

impl EngineHandle {
    pub fn spawn(engine: ScrapeEngine) -> Result<Self, EngineError> {
        let runtime =
            tokio::runtime::Runtime::new().map_err(|err| EngineError::Runtime(err.to_string()))?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let engine = Arc::new(engine);
        let worker_engine = engine.clone();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let engine = worker_engine.clone();
                runtime.spawn(async move {
                    handle_command(&engine, command).await;
                });
            }
        });

        Ok(Self { cmd_tx, engine })
    }

    /// Triggers a scrape cycle and blocks until its outcome is known.
    pub fn run_scrape_cycle(&self, deadline: Duration) -> Result<CycleOutcome, EngineError> {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.cmd_tx
            .send(EngineCommand::Scrape {
                deadline,
                reply: reply_tx,
            })
            .map_err(|_| EngineError::Stopped)?;
        reply_rx.recv().map_err(|_| EngineError::Stopped)
    }

    pub fn counters(&self) -> CounterSnapshot {
        self.engine.counters()
    }

    pub fn engine(&self) -> &ScrapeEngine {
        &self.engine
    }
}

async fn handle_command(engine: &ScrapeEngine, command: EngineCommand) {
    match command {
        EngineCommand::Scrape { deadline, reply } => {
            let outcome = engine.run_cycle_with_deadline(deadline).await;
            let _ = reply.send(outcome);
        }
    }
}
