//! Tick engine - movement, engagement and damage resolution

pub mod engagement;
pub mod tick;

pub use engagement::{active_blue_markers, living_red_markers, nearest, Marker};
pub use tick::{
    damage_pass, movement_pass, run_tick, tick_scope, ScopeOutcome, TickContext, TickReport,
};
