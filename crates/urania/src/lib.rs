//! Tropical chart geometry.
//!
//! Julian day and sidereal time, a swappable planetary position model,
//! ascendant/midheaven and house cusps, and aspect matching. Every function
//! is pure; all tunables (obliquity, aspect orbs, house system) are passed in.

pub mod angle;
pub mod aspects;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod houses;
pub mod time;
pub mod western;

pub use angle::{angular_distance, normalize_angle};
pub use aspects::{
    all_aspects, cross_aspects, find_aspect, Aspect, AspectKind, AspectMotion, AspectPair,
    AspectTable,
};
pub use chart::{Chart, ChartSettings};
pub use ephemeris::{body_longitude, Body, BodyPosition, GeoLocation, MeanElements, PositionProvider};
pub use error::{ChartError, Result};
pub use houses::{ascendant, house_cusps, houses, midheaven, HouseCusps, HouseSystem};
pub use time::{
    calendar_from_julian_day, julian_centuries, julian_day, julian_day_from_fields,
    sidereal_time, JulianDay, Timestamp, DEFAULT_OBLIQUITY,
};
pub use western::{SignPosition, ZodiacSign};
