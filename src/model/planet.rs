use std::fmt::Display;
use std::sync::atomic::{AtomicUsize, Ordering};

use nalgebra::Point2;
use tracing::debug;

use super::vessel::Vessel;
use crate::error::{CapacityError, Direction, DockingError, Result, Subject, ValidationError};
use crate::validation::{is_number, require_name, require_position, Coordinates, Number};

/// Identifies one particular planet instance. Two planets with the same name
/// and position still get different ids.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct PlanetID(pub usize);

static NEXT_PLANET_ID: AtomicUsize = AtomicUsize::new(0);

impl PlanetID {
    fn fresh() -> Self {
        PlanetID(NEXT_PLANET_ID.fetch_add(1, Ordering::Relaxed))
    }
}

// Not Clone: every instance owns its id.
#[derive(Debug)]
pub struct Planet {
    id: PlanetID,
    name: String,
    position: Point2<f64>,
    available_cargo: f64,
}

impl Planet {
    /// Creates a planet. Leaving `available_cargo` out is the same as an empty
    /// pool; an explicit value must be a non-negative number.
    pub fn new(
        name: &str,
        position: &[f64],
        available_cargo: Option<f64>,
    ) -> std::result::Result<Self, ValidationError> {
        let name = require_name(name, Subject::Planet)?;
        let position = require_position(position, Subject::Planet)?;
        let available_cargo = match available_cargo {
            None => 0.0,
            Some(x) if is_number(x) && x >= 0.0 => x,
            Some(_) => return Err(ValidationError::BadAvailableCargo),
        };

        Ok(Planet {
            id: PlanetID::fresh(),
            name,
            position,
            available_cargo,
        })
    }

    pub fn id(&self) -> PlanetID {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Point2<f64> {
        self.position
    }

    pub fn available_cargo(&self) -> f64 {
        self.available_cargo
    }

    pub fn report(&self) -> String {
        self.to_string()
    }

    /// Moves `weight` tonnes from this planet onto `vessel`, which has to be
    /// docked here. Nothing changes unless every check passes.
    pub fn load_cargo_to(&mut self, vessel: &mut Vessel, weight: f64) -> Result<()> {
        check_weight(weight, Direction::Load)?;
        self.check_docked(vessel)?;

        if self.available_cargo < weight {
            let err = if self.available_cargo == 0.0 {
                CapacityError::PlanetEmpty {
                    planet: self.name.clone(),
                    requested: weight,
                }
            } else {
                CapacityError::PlanetShort {
                    planet: self.name.clone(),
                    available: self.available_cargo,
                    requested: weight,
                }
            };
            return Err(err.into());
        }

        let free = vessel.free_space();
        if free < weight {
            let err = if free == 0.0 {
                CapacityError::NoFreeSpace {
                    vessel: vessel.name().to_owned(),
                    requested: weight,
                }
            } else {
                CapacityError::NotEnoughFreeSpace {
                    vessel: vessel.name().to_owned(),
                    free,
                    requested: weight,
                }
            };
            return Err(err.into());
        }

        // `free >= weight` can still round `occupied + weight` past capacity
        let new_occupied = (vessel.occupied_space() + weight).min(vessel.capacity());
        // Vessel first, so a refusal from its setter leaves the planet untouched
        vessel.set_occupied_space(new_occupied)?;
        self.available_cargo -= weight;

        debug!(
            planet = %self.name,
            vessel = vessel.name(),
            weight,
            "loaded cargo"
        );
        Ok(())
    }

    /// Moves `weight` tonnes from `vessel` down to this planet. The vessel may
    /// end up completely empty.
    pub fn unload_cargo_from(&mut self, vessel: &mut Vessel, weight: f64) -> Result<()> {
        check_weight(weight, Direction::Unload)?;
        self.check_docked(vessel)?;

        let occupied = vessel.occupied_space();
        if occupied < weight {
            let err = if occupied == 0.0 {
                CapacityError::VesselEmpty {
                    vessel: vessel.name().to_owned(),
                    requested: weight,
                }
            } else {
                CapacityError::NotEnoughCargo {
                    vessel: vessel.name().to_owned(),
                    occupied,
                    requested: weight,
                }
            };
            return Err(err.into());
        }

        let new_available = self.available_cargo + weight;
        if !is_number(new_available) {
            return Err(CapacityError::PoolOverflow {
                planet: self.name.clone(),
                available: self.available_cargo,
                requested: weight,
            }
            .into());
        }

        vessel.discharge(weight);
        self.available_cargo = new_available;

        debug!(
            planet = %self.name,
            vessel = vessel.name(),
            weight,
            "unloaded cargo"
        );
        Ok(())
    }

    fn check_docked(&self, vessel: &Vessel) -> std::result::Result<(), DockingError> {
        if vessel.is_docked_at(self) {
            Ok(())
        } else {
            Err(DockingError::NotAtPlanet {
                vessel: vessel.name().to_owned(),
                planet: self.name.clone(),
            })
        }
    }
}

fn check_weight(weight: f64, direction: Direction) -> std::result::Result<(), ValidationError> {
    if is_number(weight) && weight > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NonPositiveWeight { direction })
    }
}

impl Display for Planet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // "Местоположене" is misspelled on purpose; existing outputs depend on it
        write!(
            f,
            "Планета \"{}\". Местоположене: {}. ",
            self.name,
            Coordinates(&self.position)
        )?;
        if self.available_cargo == 0.0 {
            write!(f, "Грузов нет.")
        } else {
            write!(f, "Доступно груза: {}т.", Number(self.available_cargo))
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;
    use crate::error::{Error, ErrorKind};

    fn docked_pair(cargo: f64, capacity: f64) -> (Planet, Vessel) {
        let planet = Planet::new("Mars", &[10.0, 10.0], Some(cargo)).unwrap();
        let mut vessel = Vessel::new("X", &[0.0, 0.0], capacity).unwrap();
        vessel.fly_to(&planet).unwrap();
        (planet, vessel)
    }

    #[test]
    fn test_construction() {
        let planet = Planet::new("Земля", &[1.0, 1.0], None).unwrap();
        assert_eq!(planet.available_cargo(), 0.0);
        assert_eq!(planet.position(), Point2::new(1.0, 1.0));

        let planet = Planet::new("Земля", &[1.0, 1.0], Some(0.0)).unwrap();
        assert_eq!(planet.available_cargo(), 0.0);

        assert_eq!(
            Planet::new("", &[1.0, 1.0], None).unwrap_err(),
            ValidationError::EmptyName {
                subject: Subject::Planet
            }
        );
        assert_eq!(
            Planet::new("Mars", &[1.0], None).unwrap_err(),
            ValidationError::MalformedPosition {
                subject: Subject::Planet
            }
        );
        for bad in [-1.0, f64::NAN, f64::INFINITY].iter() {
            assert_eq!(
                Planet::new("Mars", &[1.0, 1.0], Some(*bad)).unwrap_err(),
                ValidationError::BadAvailableCargo
            );
        }
    }

    #[test]
    fn test_ids_are_distinct() {
        let a = Planet::new("Twin", &[0.0, 0.0], None).unwrap();
        let b = Planet::new("Twin", &[0.0, 0.0], None).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_report() {
        let mut planet = Planet::new("Mars", &[10.0, -3.5], None).unwrap();
        assert_eq!(
            planet.report(),
            "Планета \"Mars\". Местоположене: 10,-3.5. Грузов нет."
        );

        planet.available_cargo = 500.0;
        assert_eq!(
            planet.report(),
            "Планета \"Mars\". Местоположене: 10,-3.5. Доступно груза: 500т."
        );
    }

    #[test]
    fn test_load_and_unload() {
        let (mut mars, mut vessel) = docked_pair(500.0, 1000.0);

        mars.load_cargo_to(&mut vessel, 300.0).unwrap();
        assert_eq!(mars.available_cargo(), 200.0);
        assert_eq!(vessel.occupied_space(), 300.0);

        mars.unload_cargo_from(&mut vessel, 100.0).unwrap();
        assert_eq!(mars.available_cargo(), 300.0);
        assert_eq!(vessel.occupied_space(), 200.0);

        // Unloading everything is allowed even though the setter rejects zero
        mars.unload_cargo_from(&mut vessel, 200.0).unwrap();
        assert_eq!(vessel.occupied_space(), 0.0);
        assert_eq!(mars.available_cargo(), 500.0);
    }

    #[test]
    fn test_load_then_unload_is_identity() {
        let (mut mars, mut vessel) = docked_pair(100.0, 50.0);
        mars.load_cargo_to(&mut vessel, 20.0).unwrap();

        let (cargo, occupied) = (mars.available_cargo(), vessel.occupied_space());
        mars.load_cargo_to(&mut vessel, 0.7).unwrap();
        mars.unload_cargo_from(&mut vessel, 0.7).unwrap();
        assert_relative_eq!(mars.available_cargo(), cargo);
        assert_relative_eq!(vessel.occupied_space(), occupied);
    }

    #[test]
    fn test_bad_weight() {
        let (mut mars, mut vessel) = docked_pair(500.0, 1000.0);
        for weight in [0.0, -5.0, f64::NAN, f64::INFINITY].iter() {
            let err = mars.load_cargo_to(&mut vessel, *weight).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
            let err = mars.unload_cargo_from(&mut vessel, *weight).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
        }
        assert_eq!(mars.available_cargo(), 500.0);
        assert_eq!(vessel.occupied_space(), 0.0);
    }

    #[test]
    fn test_weight_checked_before_docking() {
        let mut mars = Planet::new("Mars", &[10.0, 10.0], Some(500.0)).unwrap();
        let mut vessel = Vessel::new("X", &[0.0, 0.0], 1000.0).unwrap();
        let err = mars.load_cargo_to(&mut vessel, -1.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_not_docked() {
        let mut mars = Planet::new("Mars", &[10.0, 10.0], Some(500.0)).unwrap();
        let mut vessel = Vessel::new("X", &[10.0, 10.0], 1000.0).unwrap();

        // Same coordinates is not the same as being docked
        let err = mars.load_cargo_to(&mut vessel, 10.0).unwrap_err();
        assert_eq!(
            err,
            Error::Docking(DockingError::NotAtPlanet {
                vessel: "X".to_owned(),
                planet: "Mars".to_owned(),
            })
        );

        // Docked at a look-alike planet
        let twin = Planet::new("Mars", &[10.0, 10.0], Some(500.0)).unwrap();
        vessel.fly_to(&twin).unwrap();
        let err = mars.unload_cargo_from(&mut vessel, 10.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Docking);
        assert_eq!(mars.available_cargo(), 500.0);
    }

    #[test]
    fn test_capacity_errors() {
        let (mut empty, mut vessel) = docked_pair(0.0, 1000.0);
        assert_eq!(
            empty.load_cargo_to(&mut vessel, 1.0).unwrap_err(),
            Error::Capacity(CapacityError::PlanetEmpty {
                planet: "Mars".to_owned(),
                requested: 1.0,
            })
        );
        assert_eq!(
            empty.unload_cargo_from(&mut vessel, 1.0).unwrap_err(),
            Error::Capacity(CapacityError::VesselEmpty {
                vessel: "X".to_owned(),
                requested: 1.0,
            })
        );

        let (mut mars, mut vessel) = docked_pair(500.0, 100.0);
        assert_eq!(
            mars.load_cargo_to(&mut vessel, 600.0).unwrap_err(),
            Error::Capacity(CapacityError::PlanetShort {
                planet: "Mars".to_owned(),
                available: 500.0,
                requested: 600.0,
            })
        );
        assert_eq!(
            mars.load_cargo_to(&mut vessel, 150.0).unwrap_err(),
            Error::Capacity(CapacityError::NotEnoughFreeSpace {
                vessel: "X".to_owned(),
                free: 100.0,
                requested: 150.0,
            })
        );

        mars.load_cargo_to(&mut vessel, 100.0).unwrap();
        assert_eq!(
            mars.load_cargo_to(&mut vessel, 1.0).unwrap_err(),
            Error::Capacity(CapacityError::NoFreeSpace {
                vessel: "X".to_owned(),
                requested: 1.0,
            })
        );
        assert_eq!(
            mars.unload_cargo_from(&mut vessel, 101.0).unwrap_err(),
            Error::Capacity(CapacityError::NotEnoughCargo {
                vessel: "X".to_owned(),
                occupied: 100.0,
                requested: 101.0,
            })
        );
        assert_eq!(mars.available_cargo(), 400.0);
        assert_eq!(vessel.occupied_space(), 100.0);
    }

    #[test]
    fn test_load_exactly_the_free_space() {
        // occupied + free can round above capacity
        let (mut mars, mut vessel) = docked_pair(100.0, 7.8);
        mars.load_cargo_to(&mut vessel, 2.89).unwrap();

        let free = vessel.free_space();
        mars.load_cargo_to(&mut vessel, free).unwrap();
        assert_relative_eq!(vessel.occupied_space(), 7.8);
        assert!(vessel.occupied_space() <= vessel.capacity());
        assert_abs_diff_eq!(vessel.free_space(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(mars.available_cargo(), 100.0 - 7.8);

        let (mut mars, mut vessel) = docked_pair(100.0, 7.8);
        mars.load_cargo_to(&mut vessel, 2.89).unwrap();
        mars.load_cargo_to(&mut vessel, 4.91).unwrap();
        assert_relative_eq!(vessel.occupied_space(), 7.8);
        assert!(vessel.occupied_space() <= vessel.capacity());
    }

    #[test]
    fn test_pool_overflow_is_refused() {
        let (mut mars, mut vessel) = docked_pair(1.5e308, 1.5e308);
        vessel.set_occupied_space(1.5e308).unwrap();

        assert_eq!(
            mars.unload_cargo_from(&mut vessel, 1.5e308).unwrap_err(),
            Error::Capacity(CapacityError::PoolOverflow {
                planet: "Mars".to_owned(),
                available: 1.5e308,
                requested: 1.5e308,
            })
        );
        assert_eq!(mars.available_cargo(), 1.5e308);
        assert_eq!(vessel.occupied_space(), 1.5e308);
        assert!(!mars.report().contains("inf"));
    }

    #[test]
    fn test_unbounded_planet_pool() {
        let (mut mars, mut vessel) = docked_pair(0.0, 1e6);
        vessel.set_occupied_space(1e6).unwrap();
        mars.unload_cargo_from(&mut vessel, 1e6).unwrap();
        assert_eq!(mars.available_cargo(), 1e6);
    }
}
