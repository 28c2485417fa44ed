//! World state - agents, theaters and the two world layouts

pub mod agent;
pub mod state;
pub mod theater;

pub use agent::{Agent, AgentState, BlueState, RedState};
pub use state::{SimMode, TheaterSummary, WorldState};
pub use theater::{theater_name, Theater};
