//! Record store backed by a single JSON file
//!
//! The whole book is rewritten on every change: serialized to a sibling temp
//! file, then renamed over the original so a crash never leaves a torn file.
//! A failed write leaves both the file and the in-memory book untouched.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{AccountId, RecordBook, RecordStore};
use crate::error::StoreError;
use crate::highscores::LeaderboardEntry;

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    book: RecordBook,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let book = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No record file at {}, starting fresh", path.display());
                RecordBook::new()
            }
            Err(e) => return Err(e.into()),
        };
        log::info!(
            "Loaded {} players and {} runs from {}",
            book.accounts.len(),
            book.records.len(),
            path.display()
        );
        Ok(Self { path, book })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn book(&self) -> &RecordBook {
        &self.book
    }

    /// Apply `change` to a copy of the book, write it out, and only then keep it
    fn commit<T>(&mut self, change: impl FnOnce(&mut RecordBook) -> T) -> Result<T, StoreError> {
        let mut next = self.book.clone();
        let out = change(&mut next);
        if next != self.book {
            write_atomic(&self.path, &next)?;
            self.book = next;
        }
        Ok(out)
    }
}

fn write_atomic(path: &Path, book: &RecordBook) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(book)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

impl RecordStore for JsonFileStore {
    fn register_or_login(
        &mut self,
        name: &str,
        password: &str,
    ) -> Result<Option<AccountId>, StoreError> {
        self.commit(|book| book.register_or_login(name, password))
    }

    fn save_record(&mut self, account: AccountId, score: u64) -> Result<(), StoreError> {
        self.commit(|book| book.add_record(account, score))?;
        log::info!("Saved score {score} for player {}", account.0);
        Ok(())
    }

    fn top_players(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, StoreError> {
        Ok(self.book.top_players(limit))
    }
}
