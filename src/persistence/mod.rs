//! Accounts, run records and leaderboard storage
//!
//! The game talks to storage only through `RecordStore`:
//! - login (registering unknown names) before a run
//! - one `save_record` per finished run
//! - `top_players` for the menu leaderboard
//!
//! `RecordBook` holds the data model shared by both store implementations.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::highscores::{Leaderboard, LeaderboardEntry};

/// Identifier of a registered player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub u64);

/// A registered player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub password: String,
}

/// One finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub account: AccountId,
    pub score: u64,
}

/// Storage collaborator used by the menu and the race session
pub trait RecordStore {
    /// Log in, registering the name if it is unknown.
    /// `Ok(None)` means the name exists and the password is wrong.
    fn register_or_login(&mut self, name: &str, password: &str)
    -> Result<Option<AccountId>, StoreError>;

    /// Append a finished run
    fn save_record(&mut self, account: AccountId, score: u64) -> Result<(), StoreError>;

    /// Best score per player, highest first
    fn top_players(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, StoreError>;
}

/// Accounts and records as stored on disk or in memory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordBook {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub records: Vec<Record>,
}

impl RecordBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_account(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.name == name)
    }

    /// Returns the account id, or None on a password mismatch
    pub fn register_or_login(&mut self, name: &str, password: &str) -> Option<AccountId> {
        if let Some(account) = self.find_account(name) {
            return (account.password == password).then_some(account.id);
        }

        let id = AccountId(self.accounts.iter().map(|a| a.id.0).max().unwrap_or(0) + 1);
        self.accounts.push(Account {
            id,
            name: name.to_string(),
            password: password.to_string(),
        });
        log::info!("Registered player {name:?} as {}", id.0);
        Some(id)
    }

    pub fn add_record(&mut self, account: AccountId, score: u64) {
        self.records.push(Record { account, score });
    }

    pub fn top_players(&self, limit: usize) -> Vec<LeaderboardEntry> {
        Leaderboard::from_records(&self.accounts, &self.records, limit).entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_then_login() {
        let mut book = RecordBook::new();
        let id = book.register_or_login("ann", "pw").unwrap();
        assert_eq!(id, AccountId(1));
        assert_eq!(book.register_or_login("ann", "pw"), Some(id));
        assert_eq!(book.register_or_login("ann", "nope"), None);
        assert_eq!(book.register_or_login("bob", "pw"), Some(AccountId(2)));
        assert_eq!(book.accounts.len(), 2);
    }

    #[test]
    fn test_top_players_best_score_each() {
        let mut book = RecordBook::new();
        let ann = book.register_or_login("ann", "a").unwrap();
        let bob = book.register_or_login("bob", "b").unwrap();
        book.add_record(ann, 120);
        book.add_record(bob, 300);
        book.add_record(ann, 450);

        let top = book.top_players(5);
        assert_eq!(top.len(), 2);
        assert_eq!((top[0].name.as_str(), top[0].score), ("ann", 450));
        assert_eq!((top[1].name.as_str(), top[1].score), ("bob", 300));
    }
}
