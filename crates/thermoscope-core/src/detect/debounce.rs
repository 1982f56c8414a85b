//! Hold-based debounce state machines for onset and offset detection.
//!
//! Both trackers consume one above/below decision per sample and report the
//! first sample of the run that confirmed the transition, not the sample on
//! which confirmation happened.

/// Onset tracker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnsetState {
    /// No sample above threshold in the current run.
    Below,
    /// `run` consecutive samples above threshold, not yet `hold` long.
    Above {
        /// Length of the current above-threshold run.
        run: usize,
    },
    /// An above-threshold run reached `hold` samples.
    Confirmed {
        /// First sample of the confirming run.
        start: usize,
    },
}

/// Confirms an onset once `hold` consecutive samples are above threshold.
#[derive(Debug, Clone)]
pub struct OnsetTracker {
    hold: usize,
    state: OnsetState,
}

impl OnsetTracker {
    /// Creates a tracker. `hold` is raised to 1 if zero.
    pub fn new(hold: usize) -> Self {
        Self {
            hold: hold.max(1),
            state: OnsetState::Below,
        }
    }

    /// Current state.
    pub fn state(&self) -> OnsetState {
        self.state
    }

    /// Feeds sample `index`. Returns the onset index on the sample that
    /// confirms it; every later call is a no-op returning `None`.
    pub fn push(&mut self, index: usize, above: bool) -> Option<usize> {
        match (self.state, above) {
            (OnsetState::Confirmed { .. }, _) => None,
            (_, false) => {
                self.state = OnsetState::Below;
                None
            }
            (OnsetState::Below, true) => self.extend_run(index, 1),
            (OnsetState::Above { run }, true) => self.extend_run(index, run + 1),
        }
    }

    fn extend_run(&mut self, index: usize, run: usize) -> Option<usize> {
        if run >= self.hold {
            let start = index + 1 - self.hold;
            self.state = OnsetState::Confirmed { start };
            Some(start)
        } else {
            self.state = OnsetState::Above { run };
            None
        }
    }
}

/// Offset tracker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetState {
    /// No above-threshold sample seen yet.
    Waiting,
    /// The event is running; `run_low` consecutive samples are below threshold.
    Active {
        /// Length of the current below-threshold run.
        run_low: usize,
    },
    /// A below-threshold run reached `hold` samples.
    Confirmed {
        /// First sample of the confirming low run.
        end: usize,
    },
}

/// Confirms an offset once `hold` consecutive samples fall below threshold
/// after at least one above-threshold sample.
#[derive(Debug, Clone)]
pub struct OffsetTracker {
    hold: usize,
    state: OffsetState,
}

impl OffsetTracker {
    /// Creates a tracker. `hold` is raised to 1 if zero.
    pub fn new(hold: usize) -> Self {
        Self {
            hold: hold.max(1),
            state: OffsetState::Waiting,
        }
    }

    /// Current state.
    pub fn state(&self) -> OffsetState {
        self.state
    }

    /// Feeds sample `index`. Returns the offset index on the sample that
    /// confirms it; every later call is a no-op returning `None`.
    pub fn push(&mut self, index: usize, above: bool) -> Option<usize> {
        match (self.state, above) {
            (OffsetState::Confirmed { .. }, _) => None,
            (OffsetState::Waiting, false) => None,
            (_, true) => {
                self.state = OffsetState::Active { run_low: 0 };
                None
            }
            (OffsetState::Active { run_low }, false) => {
                let run_low = run_low + 1;
                if run_low >= self.hold {
                    let end = index + 1 - self.hold;
                    self.state = OffsetState::Confirmed { end };
                    Some(end)
                } else {
                    self.state = OffsetState::Active { run_low };
                    None
                }
            }
        }
    }
}
