use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::debug;

use crate::store::{Criteria, Record, RecordStore, StoreError, next_number, select};

/// A record store persisted as a JSON array in a single file.
///
/// A missing or blank file is an empty store. Every append rewrites the whole
/// file through a sibling temp file that is renamed into place, so readers
/// never observe a half-written array. Writers are serialized by an internal
/// lock.
#[derive(Debug)]
pub struct FileRecordStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    fn load(&self) -> Result<Vec<Record>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, records: &[Record]) -> Result<(), StoreError> {
        let mut temp = OsString::from(self.path.as_os_str());
        temp.push(".tmp");
        let temp = PathBuf::from(temp);

        fs::write(&temp, serde_json::to_vec_pretty(records)?)?;
        fs::rename(&temp, &self.path)?;
        debug!(path = %self.path.display(), records = records.len(), "saved record store");
        Ok(())
    }
}

impl RecordStore for FileRecordStore {
    fn append(&self, first: &str, last: &str) -> Result<Record, StoreError> {
        let _guard = self.lock.lock()?;
        let mut records = self.load()?;
        let record = Record { number: next_number(&records), first: first.to_owned(), last: last.to_owned() };
        records.push(record.clone());
        self.save(&records)?;
        Ok(record)
    }

    fn query(&self, criteria: &Criteria) -> Result<Vec<Record>, StoreError> {
        let _guard = self.lock.lock()?;
        Ok(select(&self.load()?, criteria))
    }
}
