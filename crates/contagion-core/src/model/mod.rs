pub mod metrics;
#[cfg(test)]
mod tests;

pub use metrics::*;

use crate::cell::Cell;
use crate::config::{SimConfig, SimConfigError};
use crate::geometry::Point;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::f64::consts::PI;
use std::{error::Error, fmt};

/// The state of one simulation: a fixed-size, creation-ordered population of
/// cells plus the global tick counter. After construction the only mutation
/// path is [`Model::tick`].
#[derive(Debug)]
pub struct Model {
    population: Vec<Cell>,
    time: u64,
    config: SimConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModelInitError {
    Config(SimConfigError),
    InfectedOutOfRange { population: usize, infected: usize },
    ImmuneOutOfRange { population: usize, immune: usize },
    NoVulnerableSeed {
        population: usize,
        infected: usize,
        immune: usize,
    },
}

impl fmt::Display for ModelInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelInitError::Config(e) => write!(f, "{}", e),
            ModelInitError::InfectedOutOfRange {
                population,
                infected,
            } => write!(
                f,
                "infected count ({infected}) must be at least 1 and below the population size ({population})"
            ),
            ModelInitError::ImmuneOutOfRange { population, immune } => write!(
                f,
                "immune count ({immune}) must be below the population size ({population})"
            ),
            ModelInitError::NoVulnerableSeed {
                population,
                infected,
                immune,
            } => write!(
                f,
                "infected ({infected}) + immune ({immune}) must leave at least one vulnerable cell in the population ({population})"
            ),
        }
    }
}

impl From<SimConfigError> for ModelInitError {
    fn from(err: SimConfigError) -> Self {
        ModelInitError::Config(err)
    }
}

impl Error for ModelInitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ModelInitError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl Model {
    pub fn new(
        population_size: usize,
        speed: f64,
        infected: usize,
        immune: usize,
        config: SimConfig,
    ) -> Self {
        Self::try_new(population_size, speed, infected, immune, config)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    /// Build a model with `population_size` cells at seeded-random locations
    /// and headings. The first `infected` cells created start infected, the
    /// next `immune` start immune, the rest are vulnerable.
    ///
    /// Fails when the seeding counts are inconsistent: at least one and fewer
    /// than all cells must start infected, and at least one cell must remain
    /// vulnerable.
    pub fn try_new(
        population_size: usize,
        speed: f64,
        infected: usize,
        immune: usize,
        config: SimConfig,
    ) -> Result<Self, ModelInitError> {
        config.validate()?;
        if infected == 0 || infected >= population_size {
            return Err(ModelInitError::InfectedOutOfRange {
                population: population_size,
                infected,
            });
        }
        if immune >= population_size {
            return Err(ModelInitError::ImmuneOutOfRange {
                population: population_size,
                immune,
            });
        }
        if infected + immune >= population_size {
            return Err(ModelInitError::NoVulnerableSeed {
                population: population_size,
                infected,
                immune,
            });
        }

        let mut rng = ChaCha12Rng::seed_from_u64(config.seed);
        let mut population = Vec::with_capacity(population_size);
        for i in 0..population_size {
            let location = random_location(&mut rng, &config);
            let direction = random_direction(&mut rng, speed);
            let mut cell = Cell::new(location, direction);
            if i < infected {
                cell.contract_disease();
            } else if i < infected + immune {
                cell.immunize();
            }
            population.push(cell);
        }

        Ok(Self {
            population,
            time: 0,
            config,
        })
    }

    /// Advance the simulation one step: all cells move and bounce off the
    /// world edges first, then one full pairwise contact scan runs over the
    /// post-movement positions.
    pub fn tick(&mut self) {
        self.time += 1;
        for cell in &mut self.population {
            cell.tick(self.config.recovery_period);
            enforce_bounds(&self.config, cell);
        }
        self.check_contacts();
    }

    /// Compare every unordered pair of cells in ascending index order and
    /// resolve a contact whenever the two are within the contact radius.
    /// Quadratic in population size; acceptable at the scales this model
    /// targets, and kept index-ordered so runs are reproducible.
    pub(crate) fn check_contacts(&mut self) {
        let radius = self.config.cell_radius;
        for i in 0..self.population.len() {
            let (head, tail) = self.population.split_at_mut(i + 1);
            let cell = &mut head[i];
            for other in tail.iter_mut() {
                if cell.location.distance(other.location) < radius {
                    cell.contact_with(other);
                }
            }
        }
    }

    /// True once no cell is infected. The model does not self-terminate; the
    /// driver queries this and stops calling `tick`.
    pub fn is_complete(&self) -> bool {
        !self.population.iter().any(|cell| cell.is_infected())
    }

    /// Read-only view of the population, in creation order.
    pub fn population(&self) -> &[Cell] {
        &self.population
    }

    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}

fn random_location<R: Rng + ?Sized>(rng: &mut R, config: &SimConfig) -> Point {
    Point::new(
        rng.random_range(config.min_x..=config.max_x),
        rng.random_range(config.min_y..=config.max_y),
    )
}

fn random_direction<R: Rng + ?Sized>(rng: &mut R, speed: f64) -> Point {
    let angle = rng.random::<f64>() * 2.0 * PI;
    Point::new(angle.cos() * speed, angle.sin() * speed)
}

/// Reflect a cell off the world edges: per axis independently, clamp an
/// out-of-bounds position to the bound and negate that axis's direction
/// component. A corner overshoot clamps both axes in one call.
pub(crate) fn enforce_bounds(config: &SimConfig, cell: &mut Cell) {
    if cell.location.x > config.max_x {
        cell.location.x = config.max_x;
        cell.direction.x = -cell.direction.x;
    }
    if cell.location.x < config.min_x {
        cell.location.x = config.min_x;
        cell.direction.x = -cell.direction.x;
    }
    if cell.location.y > config.max_y {
        cell.location.y = config.max_y;
        cell.direction.y = -cell.direction.y;
    }
    if cell.location.y < config.min_y {
        cell.location.y = config.min_y;
        cell.direction.y = -cell.direction.y;
    }
}
