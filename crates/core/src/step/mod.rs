//! Step instrumentation shared by every algorithm.
//!
//! An algorithm performs a mutation and then hands the two indices it touched
//! to a [`Stepper`]. The stepper renders the current state, pauses for the
//! configured delay and only then returns control, so step `k + 1` can never
//! be observed before step `k` has been drawn and its pause has elapsed.

use std::{
    sync::{
        atomic::{AtomicU8, Ordering},
        Arc,
    },
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::{Result, SortVizError};

/// Part of a run a step belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Mutations performed by the selected algorithm.
    Algorithm,
    /// The confirmation pass over the finished sequence.
    Sweep,
    /// A frame drawn outside any run, such as freshly generated bars.
    Idle,
}

/// How the renderer should mark the step's indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Highlight {
    /// `primary` is the active bar, `secondary` the bar it was compared with.
    Selected,
    /// `primary` has been confirmed in its final position.
    Sorted,
    /// Nothing is marked.
    None,
}

/// A single render request emitted after one atomic mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Position of the step within its run, starting at zero.
    pub seq: u64,
    pub phase: Phase,
    pub primary: usize,
    pub secondary: usize,
    pub highlight: Highlight,
    /// Whether the renderer should sound a tone for `primary`'s value.
    pub tone: bool,
}

impl Step {
    /// Plain frame of the whole sequence: no highlight and no tone.
    pub fn idle() -> Self {
        Self {
            seq: 0,
            phase: Phase::Idle,
            primary: 0,
            secondary: 0,
            highlight: Highlight::None,
            tone: false,
        }
    }
}

/// Draws the sequence for a step. Implementations only read `values`.
pub trait StepRenderer {
    fn render(&mut self, values: &[u32], step: &Step) -> Result<()>;

    /// Draws `values` as they are, without marking or sounding anything.
    fn show(&mut self, values: &[u32]) -> Result<()> {
        self.render(values, &Step::idle())
    }
}

/// Suspends the running sort between steps.
pub trait Pacer {
    fn pause(&mut self, duration: Duration);
}

const IDLE: u8 = 0;
const RUNNING: u8 = 1;
const CANCELLED: u8 = 2;

/// Shared run state used to stop a running sort at its next suspension
/// point.
///
/// Starting a run and clearing an earlier cancellation are one atomic
/// transition, so a cancel issued once the run is visible is never lost.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    state: Arc<AtomicU8>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops the current run. Does nothing while no run is active.
    pub fn cancel(&self) {
        let _ = self
            .state
            .compare_exchange(RUNNING, CANCELLED, Ordering::SeqCst, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.load(Ordering::SeqCst) == CANCELLED
    }

    pub fn is_running(&self) -> bool {
        self.state.load(Ordering::SeqCst) != IDLE
    }

    /// Claims the token for a new run. Fails if a run is already active.
    pub(crate) fn begin(&self) -> bool {
        self.state
            .compare_exchange(IDLE, RUNNING, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    pub(crate) fn finish(&self) {
        self.state.store(IDLE, Ordering::SeqCst);
    }
}

/// Render-then-pause driver handed to every algorithm.
pub struct Stepper<'a> {
    renderer: &'a mut dyn StepRenderer,
    pacer: &'a mut dyn Pacer,
    delay: Duration,
    cancel: CancelToken,
    phase: Phase,
    next_seq: u64,
    algorithm_steps: u64,
    sweep_steps: u64,
}

impl<'a> Stepper<'a> {
    pub fn new(
        renderer: &'a mut dyn StepRenderer,
        pacer: &'a mut dyn Pacer,
        delay: Duration,
    ) -> Self {
        Self {
            renderer,
            pacer,
            delay,
            cancel: CancelToken::new(),
            phase: Phase::Algorithm,
            next_seq: 0,
            algorithm_steps: 0,
            sweep_steps: 0,
        }
    }

    /// Replaces the stepper's private token with a shared one.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Emits a step for a mutation that has already happened.
    pub fn emit(&mut self, values: &[u32], primary: usize, secondary: usize) -> Result<()> {
        self.dispatch(values, primary, secondary, Highlight::Selected)
    }

    /// Swaps two positions and emits the matching step.
    pub fn swap(&mut self, values: &mut [u32], a: usize, b: usize) -> Result<()> {
        values.swap(a, b);
        self.emit(values, a, b)
    }

    /// Marks `index` as confirmed during the sweep pass.
    pub fn confirm(&mut self, values: &[u32], index: usize) -> Result<()> {
        self.phase = Phase::Sweep;
        self.dispatch(values, index, index, Highlight::Sorted)
    }

    pub fn algorithm_steps(&self) -> u64 {
        self.algorithm_steps
    }

    pub fn sweep_steps(&self) -> u64 {
        self.sweep_steps
    }

    fn dispatch(
        &mut self,
        values: &[u32],
        primary: usize,
        secondary: usize,
        highlight: Highlight,
    ) -> Result<()> {
        let step = Step {
            seq: self.next_seq,
            phase: self.phase,
            primary,
            secondary,
            highlight,
            tone: true,
        };
        self.next_seq += 1;
        if self.phase == Phase::Sweep {
            self.sweep_steps += 1;
        } else {
            self.algorithm_steps += 1;
        }

        if let Err(err) = self.renderer.render(values, &step) {
            tracing::warn!(seq = step.seq, %err, "frame could not be rendered");
        }
        self.pacer.pause(self.delay);

        if self.cancel.is_cancelled() {
            return Err(SortVizError::Cancelled);
        }
        Ok(())
    }
}
