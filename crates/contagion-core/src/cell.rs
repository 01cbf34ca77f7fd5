use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Health state of a single cell.
///
/// Transitions only move forward: `Vulnerable -> Infected -> Immune`, and
/// `Immune` is terminal. Keeping the infected tick counter inside the
/// variant makes the recovery bookkeeping impossible to reach from the other
/// two states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthState {
    Vulnerable,
    Infected { ticks_infected: u32 },
    Immune,
}

/// An individual subject in the simulation: a position, a per-tick
/// displacement, and a health state.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub location: Point,
    pub direction: Point,
    health: HealthState,
}

impl Cell {
    /// Create a vulnerable cell. Seeded health is assigned by the model via
    /// `contract_disease` / `immunize`.
    pub fn new(location: Point, direction: Point) -> Self {
        Self {
            location,
            direction,
            health: HealthState::Vulnerable,
        }
    }

    /// Advance one tick: move ballistically, and count an infected cell's
    /// elapsed ticks toward recovery. The recovery check is strictly
    /// greater-than, so a cell infected at tick T stays infected through
    /// tick `T + recovery_period` and is immune from `T + recovery_period + 1`.
    pub fn tick(&mut self, recovery_period: u32) {
        self.location = self.location.add(self.direction);
        if let HealthState::Infected { ticks_infected } = &mut self.health {
            *ticks_infected += 1;
            if *ticks_infected > recovery_period {
                self.immunize();
            }
        }
    }

    /// Display color for renderers.
    pub fn color(&self) -> &'static str {
        match self.health {
            HealthState::Vulnerable => "gray",
            HealthState::Infected { .. } => "red",
            HealthState::Immune => "green",
        }
    }

    /// Force-transition to infected with zero elapsed ticks.
    ///
    /// Callers must only infect vulnerable cells; see `contact_with`.
    pub fn contract_disease(&mut self) {
        debug_assert!(
            self.is_vulnerable(),
            "contract_disease called on a non-vulnerable cell"
        );
        self.health = HealthState::Infected { ticks_infected: 0 };
    }

    /// Transition to the terminal immune state. Reached from `tick` after the
    /// recovery period, or at construction for immune-seeded cells.
    pub fn immunize(&mut self) {
        self.health = HealthState::Immune;
    }

    pub fn is_vulnerable(&self) -> bool {
        self.health == HealthState::Vulnerable
    }

    pub fn is_infected(&self) -> bool {
        matches!(self.health, HealthState::Infected { .. })
    }

    pub fn is_immune(&self) -> bool {
        self.health == HealthState::Immune
    }

    pub fn health(&self) -> HealthState {
        self.health
    }

    /// Resolve one contact between two cells: an infected cell infects a
    /// vulnerable one, in either argument order. Infected and vulnerable are
    /// disjoint states, so at most one of the two changes per call.
    pub fn contact_with(&mut self, other: &mut Cell) {
        if self.is_infected() && other.is_vulnerable() {
            other.contract_disease();
        } else if other.is_infected() && self.is_vulnerable() {
            self.contract_disease();
        }
    }
}
