//! Theater COA - blue/red force simulation with course-of-action exploration

pub mod control;
pub mod core;
pub mod engine;
pub mod explorer;
pub mod metrics;
pub mod policy;
pub mod steering;
pub mod world;
