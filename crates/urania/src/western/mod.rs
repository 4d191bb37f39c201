pub mod signs;

pub use signs::{sign_index, Element, SignPosition, ZodiacSign};
