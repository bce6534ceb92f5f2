//! Fault injection strategies.
//!
//! A [`FaultInjector`] runs before every resource handler and, when its
//! strategy says so, answers with a simulated upstream failure without
//! touching validation or the store.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use doubles_types::{AppError, FaultStrategy};
use rand::Rng;

/// Never fails. The shipped default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFaults;

impl FaultStrategy for NoFaults {
    fn should_fail(&self) -> bool {
        false
    }
}

/// Fails each request independently with a fixed probability.
#[derive(Debug, Clone, Copy)]
pub struct ProbabilisticFaults {
    probability: f64,
}

impl ProbabilisticFaults {
    /// `probability` is clamped to `[0.0, 1.0]`; NaN counts as zero.
    pub fn new(probability: f64) -> Self {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        Self { probability }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl FaultStrategy for ProbabilisticFaults {
    fn should_fail(&self) -> bool {
        rand::rng().random::<f64>() < self.probability
    }
}

/// Replays a fixed sequence of verdicts, then stops failing.
#[derive(Debug, Default)]
pub struct ScriptedFaults {
    script: Mutex<VecDeque<bool>>,
}

impl ScriptedFaults {
    pub fn new(script: impl IntoIterator<Item = bool>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
        }
    }

    /// Verdicts not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl FaultStrategy for ScriptedFaults {
    fn should_fail(&self) -> bool {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or(false)
    }
}

/// Shared handle to the active strategy.
#[derive(Clone)]
pub struct FaultInjector {
    strategy: Arc<dyn FaultStrategy>,
}

impl Default for FaultInjector {
    fn default() -> Self {
        Self::disabled()
    }
}

impl std::fmt::Debug for FaultInjector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaultInjector").finish_non_exhaustive()
    }
}

impl FaultInjector {
    pub fn new(strategy: impl FaultStrategy) -> Self {
        Self {
            strategy: Arc::new(strategy),
        }
    }

    pub fn disabled() -> Self {
        Self::new(NoFaults)
    }

    pub fn with_probability(probability: f64) -> Self {
        Self::new(ProbabilisticFaults::new(probability))
    }

    pub fn scripted(script: impl IntoIterator<Item = bool>) -> Self {
        Self::new(ScriptedFaults::new(script))
    }

    /// Draws a verdict for one request.
    pub fn check(&self) -> Result<(), AppError> {
        if self.strategy.should_fail() {
            return Err(AppError::UpstreamFailure(
                "Simulated upstream failure".into(),
            ));
        }
        Ok(())
    }
}
