//! Operator-controlled policy and logistics inputs
//!
//! Both structs are written by the control surface and read by the engine
//! every tick. Out-of-range values are clamped, never rejected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rules of engagement. Scales both steering aggression and damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Roe {
    Defensive,
    #[default]
    Standard,
    Aggressive,
}

impl Roe {
    /// Multiplier applied to blue displacement and to hit damage
    pub fn aggression_modifier(&self) -> f64 {
        match self {
            Roe::Defensive => 0.5,
            Roe::Standard => 1.0,
            Roe::Aggressive => 1.5,
        }
    }

    /// Multiplier applied to mission success probability
    pub fn success_modifier(&self) -> f64 {
        match self {
            Roe::Defensive => 0.8,
            Roe::Standard => 1.0,
            Roe::Aggressive => 1.2,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "defensive" => Some(Roe::Defensive),
            "standard" => Some(Roe::Standard),
            "aggressive" => Some(Roe::Aggressive),
            _ => None,
        }
    }
}

impl fmt::Display for Roe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Roe::Defensive => "defensive",
            Roe::Standard => "standard",
            Roe::Aggressive => "aggressive",
        };
        f.write_str(s)
    }
}

/// Commander's stated intent. Advisory only, carried for the control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommanderIntent {
    #[default]
    Neutralize,
    Contain,
    Deter,
}

/// Force employment policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    /// Committed force level (0-100)
    pub force_level: f64,
    pub roe: Roe,
    pub commander_intent: CommanderIntent,
    /// Accepted risk (0-100), advisory
    pub risk_tolerance: f64,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            force_level: 75.0,
            roe: Roe::Standard,
            commander_intent: CommanderIntent::Neutralize,
            risk_tolerance: 50.0,
        }
    }
}

impl Policy {
    /// Copy of this policy with every scalar pulled into its documented range
    pub fn clamped(&self) -> Self {
        Self {
            force_level: clamp_percent(self.force_level),
            roe: self.roe,
            commander_intent: self.commander_intent,
            risk_tolerance: clamp_percent(self.risk_tolerance),
        }
    }
}

/// Sustainment parameters, each 0-100
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Logistics {
    pub supply_rate: f64,
    pub maintenance_level: f64,
    /// Doubles as per-engagement hit probability (percent)
    pub comms_reliability: f64,
    /// Scales blue displacement per tick (percent)
    pub transport_capacity: f64,
}

impl Default for Logistics {
    fn default() -> Self {
        Self {
            supply_rate: 80.0,
            maintenance_level: 70.0,
            comms_reliability: 85.0,
            transport_capacity: 75.0,
        }
    }
}

impl Logistics {
    pub fn clamped(&self) -> Self {
        Self {
            supply_rate: clamp_percent(self.supply_rate),
            maintenance_level: clamp_percent(self.maintenance_level),
            comms_reliability: clamp_percent(self.comms_reliability),
            transport_capacity: clamp_percent(self.transport_capacity),
        }
    }

    pub fn hit_probability(&self) -> f64 {
        self.comms_reliability / 100.0
    }

    pub fn transport_factor(&self) -> f64 {
        self.transport_capacity / 100.0
    }

    /// Combined supply/comms factor in `[0, 1]`
    pub fn logistics_modifier(&self) -> f64 {
        (self.supply_rate + self.comms_reliability) / 200.0
    }
}

/// Clamp to `[0, 100]`; NaN becomes 0
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}
