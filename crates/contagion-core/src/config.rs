use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

/// Immutable simulation configuration, injected into the model at
/// construction rather than read from process-wide constants so that
/// simulations at different scales stay independently testable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimConfig {
    pub seed: u64,
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    /// Two cells closer than this are in contact for one tick.
    pub cell_radius: f64,
    /// Ticks an infected cell stays infected before turning immune.
    pub recovery_period: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            min_x: -200.0,
            max_x: 200.0,
            min_y: -200.0,
            max_y: 200.0,
            cell_radius: 15.0,
            recovery_period: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SimConfigError {
    NonFiniteBounds,
    EmptyBoundsX { min: f64, max: f64 },
    EmptyBoundsY { min: f64, max: f64 },
    InvalidCellRadius { radius: f64 },
}

impl fmt::Display for SimConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimConfigError::NonFiniteBounds => write!(f, "world bounds must be finite"),
            SimConfigError::EmptyBoundsX { min, max } => {
                write!(f, "max_x ({max}) must exceed min_x ({min})")
            }
            SimConfigError::EmptyBoundsY { min, max } => {
                write!(f, "max_y ({max}) must exceed min_y ({min})")
            }
            SimConfigError::InvalidCellRadius { radius } => {
                write!(f, "cell_radius ({radius}) must be finite and positive")
            }
        }
    }
}

impl Error for SimConfigError {}

impl SimConfig {
    pub fn bounds_width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn bounds_height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn validate(&self) -> Result<(), SimConfigError> {
        let bounds = [self.min_x, self.max_x, self.min_y, self.max_y];
        if !bounds.iter().all(|v| v.is_finite()) {
            return Err(SimConfigError::NonFiniteBounds);
        }
        if self.max_x <= self.min_x {
            return Err(SimConfigError::EmptyBoundsX {
                min: self.min_x,
                max: self.max_x,
            });
        }
        if self.max_y <= self.min_y {
            return Err(SimConfigError::EmptyBoundsY {
                min: self.min_y,
                max: self.max_y,
            });
        }
        if !self.cell_radius.is_finite() || self.cell_radius <= 0.0 {
            return Err(SimConfigError::InvalidCellRadius {
                radius: self.cell_radius,
            });
        }
        Ok(())
    }
}
