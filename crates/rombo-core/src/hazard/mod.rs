pub mod classifier;
pub mod tags;

pub use classifier::classify;
pub use tags::{HazardClass, HazardSet, FLAMMABLE};
