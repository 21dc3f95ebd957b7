use std::fmt::Display;

use nalgebra::Point2;
use tracing::debug;

use super::planet::{Planet, PlanetID};
use crate::error::{Subject, ValidationError};
use crate::validation::{
    is_number, parse_pair, require_name, require_position, Coordinates, Number,
};

/// Where a vessel can be sent: onto a planet (docking there), or to a bare
/// pair of coordinates in open space.
#[derive(Debug, Clone, Copy)]
pub enum Destination<'a> {
    Planet(&'a Planet),
    Coordinates(&'a [f64]),
}

impl<'a> From<&'a Planet> for Destination<'a> {
    fn from(planet: &'a Planet) -> Self {
        Destination::Planet(planet)
    }
}

impl<'a> From<&'a [f64]> for Destination<'a> {
    fn from(coords: &'a [f64]) -> Self {
        Destination::Coordinates(coords)
    }
}

impl<'a, const N: usize> From<&'a [f64; N]> for Destination<'a> {
    fn from(coords: &'a [f64; N]) -> Self {
        Destination::Coordinates(coords)
    }
}

#[derive(Debug, Clone)]
pub struct Vessel {
    name: String,
    position: Point2<f64>,
    capacity: f64,
    // Invariant: 0 <= occupied_space <= capacity
    occupied_space: f64,
    docked_at: Option<PlanetID>,
}

impl Vessel {
    pub fn new(name: &str, position: &[f64], capacity: f64) -> Result<Self, ValidationError> {
        let name = require_name(name, Subject::Vessel)?;
        let position = require_position(position, Subject::Vessel)?;
        if !is_number(capacity) || capacity <= 0.0 {
            return Err(ValidationError::BadCapacity);
        }

        Ok(Vessel {
            name,
            position,
            capacity,
            occupied_space: 0.0,
            docked_at: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Point2<f64> {
        self.position
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// The planet this vessel is docked at, or `None` in open space.
    pub fn current_planet(&self) -> Option<PlanetID> {
        self.docked_at
    }

    pub fn is_docked_at(&self, planet: &Planet) -> bool {
        self.docked_at == Some(planet.id())
    }

    pub fn occupied_space(&self) -> f64 {
        self.occupied_space
    }

    pub fn free_space(&self) -> f64 {
        self.capacity - self.occupied_space
    }

    /// Replaces the amount of cargo on board. Only allowed while docked.
    ///
    /// The new amount has to be strictly positive, so this can never empty
    /// the hold; [Planet::unload_cargo_from] is the only way to get back to
    /// zero.
    pub fn set_occupied_space(&mut self, new_occupied_space: f64) -> Result<(), ValidationError> {
        if !is_number(new_occupied_space) {
            return Err(ValidationError::NotANumber);
        }
        if self.docked_at.is_none() {
            return Err(ValidationError::NotLanded);
        }
        if new_occupied_space <= 0.0 {
            return Err(ValidationError::NonPositiveCargo);
        }
        if new_occupied_space > self.capacity {
            return Err(ValidationError::OverCapacity);
        }

        self.occupied_space = new_occupied_space;
        Ok(())
    }

    /// Takes `weight` off the hold. Caller has checked that the vessel is
    /// docked and carries at least that much.
    pub(crate) fn discharge(&mut self, weight: f64) {
        debug_assert!(self.docked_at.is_some());
        debug_assert!(weight <= self.occupied_space);
        self.occupied_space = (self.occupied_space - weight).max(0.0);
    }

    /// Flies to a planet and docks there, or to a coordinate pair and
    /// undocks. Cargo stays on board either way.
    pub fn fly_to<'a>(
        &mut self,
        destination: impl Into<Destination<'a>>,
    ) -> Result<(), ValidationError> {
        match destination.into() {
            Destination::Planet(planet) => {
                self.position = planet.position();
                self.docked_at = Some(planet.id());
                debug!(vessel = %self.name, planet = planet.name(), "docked");
            }
            Destination::Coordinates(coords) => {
                if coords.len() != 2 {
                    return Err(ValidationError::NotADestination);
                }
                let position = parse_pair(coords).ok_or(ValidationError::MalformedDestination)?;
                self.position = position;
                self.docked_at = None;
                debug!(vessel = %self.name, x = position.x, y = position.y, "in open space");
            }
        }
        Ok(())
    }

    pub fn report(&self) -> String {
        self.to_string()
    }
}

impl Display for Vessel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Корабль \"{}\". Местоположение: {}. Занято: {} из {}т.",
            self.name,
            Coordinates(&self.position),
            Number(self.occupied_space),
            Number(self.capacity)
        )
    }
}
