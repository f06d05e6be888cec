//! In-process record store, used for tests and throwaway sessions

use super::{AccountId, RecordBook, RecordStore};
use crate::error::StoreError;
use crate::highscores::LeaderboardEntry;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    book: RecordBook,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn book(&self) -> &RecordBook {
        &self.book
    }
}

impl RecordStore for MemoryStore {
    fn register_or_login(
        &mut self,
        name: &str,
        password: &str,
    ) -> Result<Option<AccountId>, StoreError> {
        Ok(self.book.register_or_login(name, password))
    }

    fn save_record(&mut self, account: AccountId, score: u64) -> Result<(), StoreError> {
        self.book.add_record(account, score);
        Ok(())
    }

    fn top_players(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, StoreError> {
        Ok(self.book.top_players(limit))
    }
}
