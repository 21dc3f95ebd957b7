pub mod error;
pub mod file;
pub mod model;
pub mod validation;

pub use error::{CapacityError, DockingError, Error, ErrorKind, ValidationError};
pub use model::{Destination, Planet, PlanetID, Starmap, Vessel, VesselID, Waypoint};

#[cfg(test)]
pub mod consts;
