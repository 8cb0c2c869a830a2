//! In-memory coaster store.
//!
//! One `Mutex` guards the whole map: every read and write takes it for the
//! duration of the operation and nothing else can reach the map. There is no
//! reader/writer split and no per-key locking.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::seq::IteratorRandom;

use crate::coaster::Coaster;

/// Lock-guarded mapping from id to [`Coaster`].
///
/// Every stored value's `id` equals its key.
#[derive(Debug, Default)]
pub struct Store {
    coasters: Mutex<HashMap<String, Coaster>>,
    last_id: AtomicU64,
}

impl Store {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    // The map only changes through single `insert` calls, so a panic in
    // another holder cannot leave it half-written.
    fn map(&self) -> MutexGuard<'_, HashMap<String, Coaster>> {
        self.coasters.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of every record, in no particular order.
    pub fn list(&self) -> Vec<Coaster> {
        self.map().values().cloned().collect()
    }

    pub fn get(&self, id: &str) -> Option<Coaster> {
        self.map().get(id).cloned()
    }

    /// Insert or overwrite the record under `id`. The stored record's `id`
    /// field is set to `id`.
    pub fn put(&self, id: String, mut coaster: Coaster) {
        coaster.id.clone_from(&id);
        self.map().insert(id, coaster);
    }

    /// Stores `coaster` under a freshly generated id and returns the stored copy.
    pub fn create(&self, mut coaster: Coaster) -> Coaster {
        coaster.id = self.next_id();
        self.put(coaster.id.clone(), coaster.clone());
        coaster
    }

    /// A uniformly chosen id among the present ones, `None` when empty.
    pub fn random_id(&self) -> Option<String> {
        self.map().keys().choose(&mut rand::rng()).cloned()
    }

    pub fn len(&self) -> usize {
        self.map().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map().is_empty()
    }

    /// Next record id: the current Unix time in nanoseconds as a decimal
    /// string, bumped past the previous id when two calls land in the same
    /// clock tick. Ids are unique and strictly increasing for the life of
    /// the store.
    pub fn next_id(&self) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
            .unwrap_or_default();

        let next = |last: u64| now.max(last.saturating_add(1));
        let (Ok(last) | Err(last)) =
            self.last_id.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(next(last)));
        next(last).to_string()
    }
}
