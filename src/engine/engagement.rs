//! Target selection and engagement detection
//!
//! Both work on position snapshots so callers can batch their writes.

use crate::core::types::Vec2;
use crate::world::agent::Agent;

/// Snapshot entry: roster index and position
pub type Marker = (usize, Vec2);

/// Positions of every living red agent, in roster order
pub fn living_red_markers(agents: &[Agent]) -> Vec<Marker> {
    agents
        .iter()
        .enumerate()
        .filter(|(_, a)| a.is_living_red())
        .map(|(i, a)| (i, a.position()))
        .collect()
}

/// Positions of every active blue agent, in roster order
pub fn active_blue_markers(agents: &[Agent]) -> Vec<Marker> {
    agents
        .iter()
        .enumerate()
        .filter(|(_, a)| a.is_active_blue())
        .map(|(i, a)| (i, a.position()))
        .collect()
}

/// Nearest marker to `from`, with its distance
///
/// Ties keep the first marker encountered in roster order.
pub fn nearest(from: Vec2, markers: &[Marker]) -> Option<(Marker, f64)> {
    let mut best: Option<(Marker, f64)> = None;
    for &marker in markers {
        let distance = from.distance(&marker.1);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((marker, distance)),
        }
    }
    best
}

/// Markers within `range` of `target` (inclusive)
pub fn engaging<'a>(
    target: Vec2,
    markers: &'a [Marker],
    range: f64,
) -> impl Iterator<Item = &'a Marker> + 'a {
    markers
        .iter()
        .filter(move |(_, position)| position.distance(&target) <= range)
}
