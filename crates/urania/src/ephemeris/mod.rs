pub mod mean_elements;
pub mod provider;
pub mod types;

pub use mean_elements::{body_longitude, MeanElements};
pub use provider::{PositionProvider, DEFAULT_SPEED_STEP};
pub use types::{Body, BodyPosition, GeoLocation};
