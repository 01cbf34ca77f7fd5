use super::{enforce_bounds, Model, ModelInitError};
use crate::cell::Cell;
use crate::config::{SimConfig, SimConfigError};
use crate::geometry::Point;

/// Config with a contact radius too small for any two independently placed
/// cells to touch, so state-timing tests are isolated from the contact scan.
fn no_contact_config() -> SimConfig {
    SimConfig {
        seed: 7,
        cell_radius: 1e-9,
        recovery_period: 5,
        ..SimConfig::default()
    }
}

#[test]
fn rejects_zero_infected() {
    let err = Model::try_new(10, 1.0, 0, 0, SimConfig::default()).unwrap_err();
    assert!(matches!(err, ModelInitError::InfectedOutOfRange { .. }));
}

#[test]
fn rejects_fully_infected_population() {
    let err = Model::try_new(10, 1.0, 10, 0, SimConfig::default()).unwrap_err();
    assert!(matches!(err, ModelInitError::InfectedOutOfRange { .. }));
}

#[test]
fn rejects_immune_count_at_population_size() {
    let err = Model::try_new(10, 1.0, 1, 10, SimConfig::default()).unwrap_err();
    assert!(matches!(err, ModelInitError::ImmuneOutOfRange { .. }));
}

#[test]
fn rejects_seeding_with_no_vulnerable_cell() {
    let err = Model::try_new(10, 1.0, 4, 6, SimConfig::default()).unwrap_err();
    assert!(matches!(err, ModelInitError::NoVulnerableSeed { .. }));
}

#[test]
fn rejects_invalid_config_before_seeding() {
    let config = SimConfig {
        cell_radius: -1.0,
        ..SimConfig::default()
    };
    let err = Model::try_new(10, 1.0, 1, 0, config).unwrap_err();
    assert_eq!(
        err,
        ModelInitError::Config(SimConfigError::InvalidCellRadius { radius: -1.0 })
    );
}

#[test]
fn seeding_produces_exact_state_counts() {
    let model = Model::try_new(10, 1.0, 3, 2, SimConfig::default()).unwrap();
    let counts = model.health_counts();
    assert_eq!(counts.infected, 3);
    assert_eq!(counts.immune, 2);
    assert_eq!(counts.vulnerable, 5);
}

#[test]
fn seeded_cells_start_inside_the_world_bounds() {
    let config = SimConfig::default();
    let model = Model::try_new(50, 2.0, 1, 0, config.clone()).unwrap();
    for cell in model.population() {
        assert!(cell.location.x >= config.min_x && cell.location.x <= config.max_x);
        assert!(cell.location.y >= config.min_y && cell.location.y <= config.max_y);
    }
}

#[test]
fn seeded_directions_have_speed_magnitude() {
    let speed = 2.5;
    let model = Model::try_new(20, speed, 1, 0, SimConfig::default()).unwrap();
    for cell in model.population() {
        let magnitude = Point::new(0.0, 0.0).distance(cell.direction);
        assert!((magnitude - speed).abs() < 1e-9);
    }
}

#[test]
fn tick_advances_time() {
    let mut model = Model::try_new(5, 0.0, 1, 0, no_contact_config()).unwrap();
    assert_eq!(model.time(), 0);
    model.tick();
    model.tick();
    assert_eq!(model.time(), 2);
}

#[test]
fn reflection_clamps_and_reverses_each_edge() {
    let config = SimConfig::default();
    // One overshoot per edge, paired with the expected clamped state below.
    let edges = [
        (Point::new(config.max_x + 3.0, 0.0), Point::new(2.0, 1.0)),
        (Point::new(config.min_x - 3.0, 0.0), Point::new(-2.0, 1.0)),
        (Point::new(0.0, config.max_y + 3.0), Point::new(1.0, 2.0)),
        (Point::new(0.0, config.min_y - 3.0), Point::new(1.0, -2.0)),
    ];
    let clamped = [
        (Point::new(config.max_x, 0.0), Point::new(-2.0, 1.0)),
        (Point::new(config.min_x, 0.0), Point::new(2.0, 1.0)),
        (Point::new(0.0, config.max_y), Point::new(1.0, -2.0)),
        (Point::new(0.0, config.min_y), Point::new(1.0, 2.0)),
    ];
    for ((location, direction), (want_location, want_direction)) in
        edges.into_iter().zip(clamped)
    {
        let mut cell = Cell::new(location, direction);
        enforce_bounds(&config, &mut cell);
        assert_eq!(cell.location, want_location);
        assert_eq!(cell.direction, want_direction);
    }
}

#[test]
fn corner_overshoot_reflects_both_axes() {
    let config = SimConfig::default();
    let mut cell = Cell::new(
        Point::new(config.max_x + 1.0, config.min_y - 1.0),
        Point::new(3.0, -4.0),
    );
    enforce_bounds(&config, &mut cell);
    assert_eq!(cell.location, Point::new(config.max_x, config.min_y));
    assert_eq!(cell.direction, Point::new(-3.0, 4.0));
}

#[test]
fn in_bounds_cell_is_untouched() {
    let config = SimConfig::default();
    let mut cell = Cell::new(Point::new(10.0, -10.0), Point::new(1.0, 1.0));
    let before = cell;
    enforce_bounds(&config, &mut cell);
    assert_eq!(cell, before);
}

#[test]
fn contact_scan_infects_within_radius_only() {
    let mut model = Model::try_new(3, 0.0, 1, 0, SimConfig::default()).unwrap();
    // Cell 0 is the seeded carrier; place cell 1 inside the contact radius
    // and cell 2 well outside it.
    model.population[0].location = Point::new(0.0, 0.0);
    model.population[1].location = Point::new(5.0, 0.0);
    model.population[2].location = Point::new(100.0, 100.0);
    model.check_contacts();
    assert!(model.population[1].is_infected());
    assert!(model.population[2].is_vulnerable());
}

#[test]
fn infection_propagates_through_a_chain_in_one_scan() {
    // 0 -> 1 is within radius, 1 -> 2 is within radius, 0 -> 2 is not.
    // The ascending-index scan infects 1 from 0, then 2 from the newly
    // infected 1 in the same pass.
    let mut model = Model::try_new(3, 0.0, 1, 0, SimConfig::default()).unwrap();
    model.population[0].location = Point::new(0.0, 0.0);
    model.population[1].location = Point::new(12.0, 0.0);
    model.population[2].location = Point::new(24.0, 0.0);
    model.check_contacts();
    assert!(model.population[1].is_infected());
    assert!(model.population[2].is_infected());
}

#[test]
fn stationary_epidemic_completes_after_recovery_period() {
    let config = no_contact_config();
    let recovery_period = config.recovery_period;
    let mut model = Model::try_new(5, 0.0, 1, 0, config).unwrap();
    for _ in 0..=recovery_period {
        assert!(!model.is_complete());
        model.tick();
    }
    assert!(model.is_complete());
    assert_eq!(model.time() as u32, recovery_period + 1);
    let counts = model.health_counts();
    assert_eq!(counts.immune, 1);
    assert_eq!(counts.vulnerable, 4);
}

#[test]
fn runs_are_deterministic_for_a_fixed_seed() {
    let make = || Model::try_new(30, 1.5, 2, 1, SimConfig::default()).unwrap();
    let mut a = make();
    let mut b = make();
    for _ in 0..50 {
        a.tick();
        b.tick();
    }
    assert_eq!(a.population(), b.population());
    assert_eq!(a.time(), b.time());
}

#[test]
fn health_counts_sum_to_population_size() {
    let mut model = Model::try_new(25, 1.0, 3, 4, SimConfig::default()).unwrap();
    for _ in 0..30 {
        model.tick();
        let counts = model.health_counts();
        assert_eq!(counts.vulnerable + counts.infected + counts.immune, 25);
    }
}
