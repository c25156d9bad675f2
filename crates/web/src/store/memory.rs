use std::sync::Mutex;

use crate::store::{Criteria, Record, RecordStore, StoreError, next_number, select};

/// A record store that lives and dies with the process.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: Mutex<Vec<Record>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Record>) -> Self {
        Self { records: Mutex::new(records) }
    }
}

impl RecordStore for MemoryRecordStore {
    fn append(&self, first: &str, last: &str) -> Result<Record, StoreError> {
        let mut records = self.records.lock()?;
        let record = Record { number: next_number(&records), first: first.to_owned(), last: last.to_owned() };
        records.push(record.clone());
        Ok(record)
    }

    fn query(&self, criteria: &Criteria) -> Result<Vec<Record>, StoreError> {
        let records = self.records.lock()?;
        Ok(select(&records, criteria))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_then_query_by_number() {
        let store = MemoryRecordStore::new();
        let mick = store.append("Mick", "Jagger").unwrap();
        let keith = store.append("Keith", "Richards").unwrap();
        assert_eq!(mick.number, 1);
        assert_eq!(keith.number, 2);

        let found = store.query(&Criteria { number: Some(keith.number), ..Criteria::default() }).unwrap();
        assert_eq!(found, vec![keith]);
    }

    #[test]
    fn query_keeps_storage_order() {
        let store = MemoryRecordStore::with_records(vec![
            Record { number: 4, first: "Mick".into(), last: "Jagger".into() },
            Record { number: 9, first: "Mick".into(), last: "Taylor".into() },
        ]);

        let micks = store.query(&Criteria { first: Some("Mick".into()), ..Criteria::default() }).unwrap();
        assert_eq!(micks.iter().map(|r| r.number).collect::<Vec<_>>(), vec![4, 9]);
        assert_eq!(store.append("Ronnie", "Wood").unwrap().number, 10);
    }
}
