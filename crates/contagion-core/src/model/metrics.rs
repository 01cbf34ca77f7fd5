use super::Model;
use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

/// Population tally by health state. The three counts always sum to the
/// population size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCounts {
    pub vulnerable: usize,
    pub infected: usize,
    pub immune: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepMetrics {
    pub time: u64,
    pub vulnerable: usize,
    pub infected: usize,
    pub immune: usize,
}

fn default_schema_version() -> u32 {
    1
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub max_steps: usize,
    pub sample_every: usize,
    /// Ticks actually executed; below `max_steps` when the epidemic died out.
    pub steps_taken: u64,
    /// Whether the run ended with no infected cells remaining.
    pub completed: bool,
    pub final_counts: HealthCounts,
    pub samples: Vec<StepMetrics>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExperimentError {
    InvalidSampleEvery,
    TooManySteps { max: usize, actual: usize },
    TooManySamples { max: usize, actual: usize },
}

impl fmt::Display for ExperimentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperimentError::InvalidSampleEvery => write!(f, "sample_every must be positive"),
            ExperimentError::TooManySteps { max, actual } => {
                write!(f, "max_steps ({actual}) exceeds supported maximum ({max})")
            }
            ExperimentError::TooManySamples { max, actual } => {
                write!(
                    f,
                    "sample count ({actual}) exceeds supported maximum ({max})"
                )
            }
        }
    }
}

impl Error for ExperimentError {}

impl Model {
    pub const MAX_EXPERIMENT_STEPS: usize = 1_000_000;
    pub const MAX_EXPERIMENT_SAMPLES: usize = 50_000;

    pub fn health_counts(&self) -> HealthCounts {
        let mut counts = HealthCounts::default();
        for cell in self.population() {
            if cell.is_vulnerable() {
                counts.vulnerable += 1;
            } else if cell.is_infected() {
                counts.infected += 1;
            } else {
                counts.immune += 1;
            }
        }
        counts
    }

    pub(crate) fn collect_step_metrics(&self) -> StepMetrics {
        let counts = self.health_counts();
        StepMetrics {
            time: self.time(),
            vulnerable: counts.vulnerable,
            infected: counts.infected,
            immune: counts.immune,
        }
    }

    pub fn run_experiment(&mut self, max_steps: usize, sample_every: usize) -> RunSummary {
        self.try_run_experiment(max_steps, sample_every)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    /// Drive the simulation until the epidemic dies out or `max_steps` ticks
    /// have run, sampling health counts every `sample_every` ticks (plus the
    /// final tick).
    pub fn try_run_experiment(
        &mut self,
        max_steps: usize,
        sample_every: usize,
    ) -> Result<RunSummary, ExperimentError> {
        if sample_every == 0 {
            return Err(ExperimentError::InvalidSampleEvery);
        }
        if max_steps > Self::MAX_EXPERIMENT_STEPS {
            return Err(ExperimentError::TooManySteps {
                max: Self::MAX_EXPERIMENT_STEPS,
                actual: max_steps,
            });
        }
        let estimated_samples = if max_steps == 0 {
            0
        } else {
            ((max_steps - 1) / sample_every) + 1
        };
        if estimated_samples > Self::MAX_EXPERIMENT_SAMPLES {
            return Err(ExperimentError::TooManySamples {
                max: Self::MAX_EXPERIMENT_SAMPLES,
                actual: estimated_samples,
            });
        }

        let mut samples = Vec::with_capacity(estimated_samples);
        let mut steps_taken = 0u64;
        for step in 1..=max_steps {
            if self.is_complete() {
                break;
            }
            self.tick();
            steps_taken = step as u64;
            if step % sample_every == 0 || self.is_complete() || step == max_steps {
                samples.push(self.collect_step_metrics());
            }
        }
        Ok(RunSummary {
            schema_version: 1,
            max_steps,
            sample_every,
            steps_taken,
            completed: self.is_complete(),
            final_counts: self.health_counts(),
            samples,
        })
    }
}
