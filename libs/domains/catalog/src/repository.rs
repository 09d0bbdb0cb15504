use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Record, ThresholdFilter};
use crate::signal::CallSignal;

/// Callback receiving each search hit.
pub type Emit<'a> = dyn FnMut(Record) -> CatalogResult<()> + 'a;

/// Record persistence
///
/// Every record that crosses this boundary, in or out, is an independent copy.
pub trait RecordRepository: Send + Sync {
    /// Store a copy of `record`. Fails with `AlreadyExists` if the id is taken.
    fn save(&self, record: &Record) -> CatalogResult<()>;

    /// Copy of the record with `id`, if any.
    fn find(&self, id: &str) -> CatalogResult<Option<Record>>;

    /// Pass a copy of every record matching `filter` to `emit`.
    ///
    /// `emit` runs without any store lock held, so writers are never stalled
    /// behind a slow consumer. Stops quietly once `signal` fires. An `emit`
    /// error aborts the scan and is returned.
    fn search(
        &self,
        signal: &CallSignal,
        filter: &ThresholdFilter,
        emit: &mut Emit<'_>,
    ) -> CatalogResult<()>;

    fn count(&self) -> CatalogResult<usize>;
}

/// In-memory record store guarded by a single reader/writer lock.
#[derive(Debug, Default)]
pub struct InMemoryRecordRepository {
    records: RwLock<HashMap<String, Record>>,
}

impl InMemoryRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> CatalogError {
    CatalogError::Internal("record store lock poisoned".to_string())
}

impl RecordRepository for InMemoryRecordRepository {
    fn save(&self, record: &Record) -> CatalogResult<()> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        if records.contains_key(&record.id) {
            return Err(CatalogError::AlreadyExists(record.id.clone()));
        }
        let copy = record.deep_copy()?;
        records.insert(copy.id.clone(), copy);
        Ok(())
    }

    fn find(&self, id: &str) -> CatalogResult<Option<Record>> {
        let records = self.records.read().map_err(|_| poisoned())?;
        records.get(id).map(Record::deep_copy).transpose()
    }

    fn search(
        &self,
        signal: &CallSignal,
        filter: &ThresholdFilter,
        emit: &mut Emit<'_>,
    ) -> CatalogResult<()> {
        // `emit` may block on the peer, so it never runs under the lock.
        let hits = {
            let records = self.records.read().map_err(|_| poisoned())?;
            records
                .values()
                .filter(|record| filter.matches(record))
                .map(Record::deep_copy)
                .collect::<CatalogResult<Vec<_>>>()?
        };

        for record in hits {
            if let Err(reason) = signal.check() {
                debug!(%reason, "search stopped early");
                return Ok(());
            }
            emit(record)?;
        }
        Ok(())
    }

    fn count(&self) -> CatalogResult<usize> {
        Ok(self.records.read().map_err(|_| poisoned())?.len())
    }
}
