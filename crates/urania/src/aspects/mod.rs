pub mod calculator;
pub mod types;

pub use calculator::{
    all_aspects, classify_motion, cross_aspects, find_aspect, match_aspect, AspectCalculator,
    MOTION_STEP_DAYS,
};
pub use types::{
    Aspect, AspectDefinition, AspectKind, AspectMotion, AspectPair, AspectTable, EXACT_THRESHOLD,
    MAX_ORB,
};
