pub mod julian;
pub mod sidereal;
pub mod types;

pub use julian::{
    calendar_from_julian_day, calendar_from_julian_day_at, julian_centuries, julian_day,
    julian_day_from_fields, DAYS_PER_CENTURY, J2000_JD,
};
pub use sidereal::{
    check_obliquity, greenwich_mean_sidereal_time, local_sidereal_time, mean_obliquity,
    sidereal_time, DEFAULT_OBLIQUITY,
};
pub use types::{JulianDay, Timestamp};
