mod planet;
mod starmap;
mod vessel;

pub use planet::{Planet, PlanetID};
pub use starmap::{Starmap, VesselID, Waypoint};
pub use vessel::{Destination, Vessel};
