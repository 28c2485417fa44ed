//! COA records and the bounded leaderboard

use ordered_float::OrderedFloat;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use uuid::Uuid;

use crate::core::types::SimTime;
use crate::steering::Strategy;

/// A scored strategy snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoaRecord {
    pub id: Uuid,
    pub strategy: Strategy,
    pub score: f64,
    /// Simulation time at evaluation (seconds)
    pub evaluated_at: SimTime,
}

impl CoaRecord {
    /// New record with an identity drawn from `rng`
    pub fn new<R: Rng + ?Sized>(
        strategy: Strategy,
        score: f64,
        evaluated_at: SimTime,
        rng: &mut R,
    ) -> Self {
        Self {
            id: uuid::Builder::from_random_bytes(rng.gen()).into_uuid(),
            strategy,
            score,
            evaluated_at,
        }
    }

    pub fn label(&self) -> &'static str {
        self.strategy.label()
    }
}

/// Top-K records, highest score first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    capacity: usize,
    entries: Vec<CoaRecord>,
}

impl Leaderboard {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: Vec::with_capacity(capacity + 1),
        }
    }

    /// Insert a record, keeping order and capacity
    ///
    /// Returns true if the record survived truncation. Equal scores keep
    /// insertion order, so an incumbent is never displaced by a tie.
    pub fn insert(&mut self, record: CoaRecord) -> bool {
        let id = record.id;
        self.entries.push(record);
        self.entries.sort_by_key(|r| Reverse(OrderedFloat(r.score)));
        self.entries.truncate(self.capacity);
        self.entries.iter().any(|r| r.id == id)
    }

    pub fn entries(&self) -> &[CoaRecord] {
        &self.entries
    }

    pub fn best(&self) -> Option<&CoaRecord> {
        self.entries.first()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn record(score: f64, rng: &mut ChaCha8Rng) -> CoaRecord {
        CoaRecord::new(Strategy::Direct, score, 0.0, rng)
    }

    #[test]
    fn test_sorted_descending_and_capped() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut board = Leaderboard::new(3);
        for score in [10.0, 50.0, 30.0, 70.0, 20.0] {
            board.insert(record(score, &mut rng));
        }
        let scores: Vec<f64> = board.entries().iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![70.0, 50.0, 30.0]);
        assert_eq!(board.best().map(|r| r.score), Some(70.0));
    }

    #[test]
    fn test_insert_reports_survival() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut board = Leaderboard::new(1);
        assert!(board.insert(record(40.0, &mut rng)));
        assert!(!board.insert(record(10.0, &mut rng)));
        // Tie does not displace the incumbent
        assert!(!board.insert(record(40.0, &mut rng)));
        assert!(board.insert(record(41.0, &mut rng)));
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_zero_capacity_promoted_to_one() {
        let board = Leaderboard::new(0);
        assert_eq!(board.capacity(), 1);
        assert!(board.is_empty());
    }

    #[test]
    fn test_record_ids_unique_and_seeded() {
        let mut a = ChaCha8Rng::seed_from_u64(9);
        let mut b = ChaCha8Rng::seed_from_u64(9);
        let first = record(1.0, &mut a);
        let second = record(1.0, &mut a);
        assert_ne!(first.id, second.id);
        assert_eq!(first.id, record(1.0, &mut b).id);
    }

    #[test]
    fn test_record_serializes_label() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let rec = CoaRecord::new(Strategy::HitRun, 55.0, 12.5, &mut rng);
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains("\"strategy\":\"hitrun\""));
        assert_eq!(rec.label(), "hitrun");
    }
}
