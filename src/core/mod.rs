pub mod config;
pub mod constants;
pub mod error;
pub mod types;

pub use config::{load_config, DamageModel, EngineConfig, ExplorationMode};
pub use error::{Result, SimError};
pub use types::{AgentId, SimTime, Team, Vec2};
