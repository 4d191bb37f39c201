pub mod data;
pub mod settings;

pub use data::Chart;
pub use settings::ChartSettings;
