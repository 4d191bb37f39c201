pub mod angles;
pub mod calculator;
pub mod types;

pub use angles::{ascendant, midheaven};
pub use calculator::{house_cusps, houses};
pub use types::{HouseCusp, HouseCusps, HouseSystem, PLACIDUS_MAX_LATITUDE};
