use crate::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CycleState {
    #[default]
    Idle,
    Running,
    Completed,
    TimedOut,
}

/// Result reported to whoever triggered a scrape cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Completed {
        transport_errors: usize,
        parse_errors: usize,
    },
    TimedOut,
}

/// What one page task produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    pub page: String,
    pub updated: usize,
    pub parse_errors: Vec<ParseError>,
    pub transport_error: Option<String>,
}

impl PageReport {
    pub fn parsed(page: impl Into<String>, updated: usize, parse_errors: Vec<ParseError>) -> Self {
        Self {
            page: page.into(),
            updated,
            parse_errors,
            transport_error: None,
        }
    }

    pub fn failed(page: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            updated: 0,
            parse_errors: Vec::new(),
            transport_error: Some(error.into()),
        }
    }
}

/// Pure bookkeeping for one scrape cycle: Idle -> Running -> Completed | TimedOut.
#[derive(Debug, Clone, Default)]
pub struct CycleTracker {
    state: CycleState,
    pending: usize,
    transport_errors: usize,
    parse_errors: usize,
}

impl CycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Enters `Running` for `pages` page tasks. A tracker that is already
    /// running is left untouched and `false` is returned.
    pub fn start(&mut self, pages: usize) -> bool {
        if self.state == CycleState::Running {
            return false;
        }
        self.pending = pages;
        self.transport_errors = 0;
        self.parse_errors = 0;
        self.state = if pages == 0 {
            CycleState::Completed
        } else {
            CycleState::Running
        };
        true
    }

    /// Accounts for a finished page task. Reports arriving outside `Running`
    /// belong to an expired cycle and are discarded.
    pub fn record(&mut self, report: &PageReport) {
        if self.state != CycleState::Running {
            return;
        }
        if report.transport_error.is_some() {
            self.transport_errors += 1;
        }
        self.parse_errors += report.parse_errors.len();
        self.pending = self.pending.saturating_sub(1);
        if self.pending == 0 {
            self.state = CycleState::Completed;
        }
    }

    /// The deadline elapsed before every page reported.
    pub fn expire(&mut self) {
        if self.state == CycleState::Running {
            self.state = CycleState::TimedOut;
        }
    }

    pub fn outcome(&self) -> Option<CycleOutcome> {
        match self.state {
            CycleState::Idle | CycleState::Running => None,
            CycleState::Completed => Some(CycleOutcome::Completed {
                transport_errors: self.transport_errors,
                parse_errors: self.parse_errors,
            }),
            CycleState::TimedOut => Some(CycleOutcome::TimedOut),
        }
    }
}
