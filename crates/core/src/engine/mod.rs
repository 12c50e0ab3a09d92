//! Dispatcher: picks an algorithm, runs it, then plays the confirmation sweep.

use std::time::Duration;

use rand::RngCore;
use serde::Serialize;

use crate::{
    bars::is_sorted, Algorithm, CancelToken, Pacer, Result, SortConfig, SortVizError, StepRenderer,
    Stepper,
};

/// The external services a run drives.
pub struct Collaborators<'a> {
    pub renderer: &'a mut dyn StepRenderer,
    pub pacer: &'a mut dyn Pacer,
    /// Random source for algorithms that need one.
    pub rng: &'a mut dyn RngCore,
}

impl<'a> Collaborators<'a> {
    pub fn new(
        renderer: &'a mut dyn StepRenderer,
        pacer: &'a mut dyn Pacer,
        rng: &'a mut dyn RngCore,
    ) -> Self {
        Self {
            renderer,
            pacer,
            rng,
        }
    }
}

/// Outcome of a single sort request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortReport {
    /// Registry name that was requested.
    pub method: String,
    /// The input was already sorted and nothing was rendered.
    pub skipped: bool,
    pub algorithm_steps: u64,
    pub sweep_steps: u64,
}

impl SortReport {
    fn skipped(method: &str) -> Self {
        Self {
            method: method.to_string(),
            skipped: true,
            algorithm_steps: 0,
            sweep_steps: 0,
        }
    }
}

/// Runs one sort at a time with a fixed per-step delay.
#[derive(Debug)]
pub struct SortEngine {
    delay: Duration,
    bogo_limit: Option<u64>,
    /// Doubles as the busy flag: a run holds the token from start to end.
    cancel: CancelToken,
}

impl SortEngine {
    pub fn new(config: &SortConfig) -> Self {
        Self {
            delay: config.delay(),
            bogo_limit: config.bogo_max_attempts,
            cancel: CancelToken::new(),
        }
    }

    /// Engine with an explicit delay and no bogo attempt cap.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            bogo_limit: None,
            cancel: CancelToken::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Token that stops the running sort at its next suspension point.
    /// Cancelling while no sort runs has no effect.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn is_running(&self) -> bool {
        self.cancel.is_running()
    }

    /// Sorts `values` with the algorithm registered under `method`.
    ///
    /// Already sorted input returns immediately without rendering anything.
    /// Otherwise an unknown `method` fails before `values` is touched.
    pub fn run_sort(
        &self,
        values: &mut [u32],
        method: &str,
        collaborators: Collaborators<'_>,
    ) -> Result<SortReport> {
        let _guard = self.acquire()?;

        if already_sorted(values) {
            tracing::debug!(method, len = values.len(), "input already sorted");
            return Ok(SortReport::skipped(method));
        }

        let algorithm: Algorithm = method.parse()?;
        self.execute(values, algorithm, collaborators)
    }

    /// Same as [`SortEngine::run_sort`] for an already resolved algorithm.
    pub fn run(
        &self,
        values: &mut [u32],
        algorithm: Algorithm,
        collaborators: Collaborators<'_>,
    ) -> Result<SortReport> {
        let _guard = self.acquire()?;

        if already_sorted(values) {
            tracing::debug!(method = algorithm.name(), len = values.len(), "input already sorted");
            return Ok(SortReport::skipped(algorithm.name()));
        }
        self.execute(values, algorithm, collaborators)
    }

    fn execute(
        &self,
        values: &mut [u32],
        algorithm: Algorithm,
        collaborators: Collaborators<'_>,
    ) -> Result<SortReport> {
        tracing::info!(
            method = algorithm.name(),
            len = values.len(),
            delay = ?self.delay,
            "starting sort"
        );

        let Collaborators {
            renderer,
            pacer,
            rng,
        } = collaborators;
        let mut steps = Stepper::new(renderer, pacer, self.delay).with_cancel(self.cancel.clone());

        algorithm.run(values, &mut steps, rng, self.bogo_limit)?;
        if !is_sorted(values) {
            return Err(SortVizError::msg(format!(
                "{algorithm} sort finished with the sequence out of order"
            )));
        }

        for index in 0..values.len() {
            steps.confirm(values, index)?;
        }

        let report = SortReport {
            method: algorithm.name().to_string(),
            skipped: false,
            algorithm_steps: steps.algorithm_steps(),
            sweep_steps: steps.sweep_steps(),
        };
        tracing::info!(
            method = algorithm.name(),
            steps = report.algorithm_steps,
            "sort finished"
        );
        Ok(report)
    }

    fn acquire(&self) -> Result<RunGuard<'_>> {
        if !self.cancel.begin() {
            return Err(SortVizError::SortInProgress);
        }
        Ok(RunGuard { token: &self.cancel })
    }
}

impl Default for SortEngine {
    fn default() -> Self {
        Self::new(&SortConfig::default())
    }
}

/// Compares against a stable reference sort of a copy.
fn already_sorted(values: &[u32]) -> bool {
    let mut reference = values.to_vec();
    reference.sort();
    reference == values
}

/// Releases the run when it ends, however it ends.
struct RunGuard<'a> {
    token: &'a CancelToken,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.token.finish();
    }
}
