use std::collections::HashMap;

use tracing::{info, warn};

use super::planet::{Planet, PlanetID};
use super::vessel::Vessel;
use crate::error::{DockingError, Error, Result};

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct VesselID(pub usize);

/// A flight target expressed with ids, for callers that only hold a [Starmap].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Waypoint {
    Planet(PlanetID),
    Coordinates(f64, f64),
}

/// Owns a set of planets and vessels and routes flights and transfers
/// between them by id.
#[derive(Debug, Default)]
pub struct Starmap {
    planets: HashMap<PlanetID, Planet>,
    vessels: HashMap<VesselID, Vessel>,
    next_vessel_id: usize,
}

impl Starmap {
    pub fn new() -> Self {
        Starmap {
            planets: HashMap::new(),
            vessels: HashMap::new(),
            next_vessel_id: 0,
        }
    }

    pub fn add_planet(&mut self, planet: Planet) -> PlanetID {
        let id = planet.id();
        self.planets.insert(id, planet);
        id
    }

    pub fn add_vessel(&mut self, vessel: Vessel) -> VesselID {
        let id = VesselID(self.next_vessel_id);
        self.next_vessel_id += 1;
        self.vessels.insert(id, vessel);
        id
    }

    /// Planets in the order they were created.
    pub fn planets(&self) -> impl Iterator<Item = &Planet> {
        let mut planets: Vec<_> = self.planets.values().collect();
        planets.sort_by_key(|p| p.id());
        planets.into_iter()
    }

    pub fn vessels(&self) -> impl Iterator<Item = (VesselID, &Vessel)> {
        let mut vessels: Vec<_> = self.vessels.iter().map(|(id, v)| (*id, v)).collect();
        vessels.sort_by_key(|(id, _)| *id);
        vessels.into_iter()
    }

    pub fn get_planet(&self, id: PlanetID) -> Option<&Planet> {
        self.planets.get(&id)
    }

    pub fn get_vessel(&self, id: VesselID) -> Option<&Vessel> {
        self.vessels.get(&id)
    }

    /// Looks a planet up by name, ignoring case.
    pub fn find_planet(&self, name: &str) -> Option<&Planet> {
        let name = name.to_lowercase();
        self.planets().find(|p| p.name().to_lowercase() == name)
    }

    pub fn fly_vessel(&mut self, id: VesselID, waypoint: Waypoint) -> Result<()> {
        let vessel = self.vessels.get_mut(&id).ok_or(Error::UnknownVessel(id))?;
        match waypoint {
            Waypoint::Planet(planet_id) => {
                let planet = self
                    .planets
                    .get(&planet_id)
                    .ok_or(Error::UnknownPlanet(planet_id))?;
                vessel.fly_to(planet)?;
                info!("{} flew to {}", vessel.name(), planet.name());
            }
            Waypoint::Coordinates(x, y) => {
                vessel.fly_to(&[x, y])?;
                info!("{} flew to ({}, {})", vessel.name(), x, y);
            }
        }
        Ok(())
    }

    /// Loads cargo onto a vessel from whichever planet it is docked at.
    pub fn load(&mut self, id: VesselID, weight: f64) -> Result<()> {
        let (planet, vessel) = self.docked_pair(id)?;
        let result = planet.load_cargo_to(vessel, weight);
        match &result {
            Ok(()) => info!("Loaded {}t from {} onto {}", weight, planet.name(), vessel.name()),
            Err(err) => warn!("Load onto {} refused: {}", vessel.name(), err),
        }
        result
    }

    /// Unloads cargo from a vessel onto whichever planet it is docked at.
    pub fn unload(&mut self, id: VesselID, weight: f64) -> Result<()> {
        let (planet, vessel) = self.docked_pair(id)?;
        let result = planet.unload_cargo_from(vessel, weight);
        match &result {
            Ok(()) => info!("Unloaded {}t from {} onto {}", weight, vessel.name(), planet.name()),
            Err(err) => warn!("Unload from {} refused: {}", vessel.name(), err),
        }
        result
    }

    fn docked_pair(&mut self, id: VesselID) -> Result<(&mut Planet, &mut Vessel)> {
        let vessel = self.vessels.get_mut(&id).ok_or(Error::UnknownVessel(id))?;
        let planet_id = vessel.current_planet().ok_or_else(|| DockingError::NotDocked {
            vessel: vessel.name().to_owned(),
        })?;
        let planet = self
            .planets
            .get_mut(&planet_id)
            .ok_or(Error::UnknownPlanet(planet_id))?;
        Ok((planet, vessel))
    }
}
