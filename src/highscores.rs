//! High score leaderboard
//!
//! Built from stored run records: each player's best run, sorted descending.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::persistence::{Account, AccountId, Record};

/// Longest name shown in full on the leaderboard
const MAX_DISPLAY_NAME: usize = 10;

/// A single leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
}

impl LeaderboardEntry {
    /// Name shortened for the leaderboard column ("abcdefgh..")
    pub fn display_name(&self) -> String {
        if self.name.chars().count() > MAX_DISPLAY_NAME {
            let head: String = self.name.chars().take(MAX_DISPLAY_NAME - 2).collect();
            format!("{head}..")
        } else {
            self.name.clone()
        }
    }
}

/// High score leaderboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Best score per account, highest first, at most `limit` rows.
    /// Records for unknown accounts are ignored; equal scores keep account order.
    pub fn from_records(accounts: &[Account], records: &[Record], limit: usize) -> Self {
        let mut best: HashMap<AccountId, u64> = HashMap::new();
        for record in records {
            let score = best.entry(record.account).or_insert(record.score);
            *score = (*score).max(record.score);
        }

        let mut entries: Vec<LeaderboardEntry> = accounts
            .iter()
            .filter_map(|a| {
                best.get(&a.id).map(|&score| LeaderboardEntry {
                    name: a.name.clone(),
                    score,
                })
            })
            .collect();
        // Stable sort keeps registration order among ties
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(limit);

        Self { entries }
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}
