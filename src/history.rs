//! Quad-pack history - 13 fixed slots of previously saved test records.
//!
//! A slot holds either a valid record from a completed test or the
//! zeroed sentinel. Overwriting a slot replaces it whole; there is no
//! partial update. The flash-backed implementation lives in
//! `hw::flash` (embedded builds only); [`MemoryHistory`] backs host
//! tests and keeps the same contract.

use crate::config::{HISTORY_SLOTS, STORE_RETRY_LIMIT};
use crate::error::Error;
use crate::record::TestRecord;

/// Fixed-size record store addressed by slot index `0..13`.
pub trait HistoryStore {
    /// Read the record in `slot`. An unused slot yields the zeroed
    /// sentinel, not an error.
    fn load(&mut self, slot: u8) -> Result<TestRecord, Error>;

    /// Replace the record in `slot`. Blocks until the underlying
    /// device reports the write complete.
    fn store(&mut self, slot: u8, record: &TestRecord) -> Result<(), Error>;
}

/// Store with a bounded number of retries. A device that keeps failing
/// is surfaced to the caller instead of being waited on forever.
pub fn store_with_retry(
    history: &mut impl HistoryStore,
    slot: u8,
    record: &TestRecord,
) -> Result<(), Error> {
    let mut last = Err(Error::Storage);
    for _ in 0..STORE_RETRY_LIMIT {
        last = history.store(slot, record);
        if last.is_ok() {
            return last;
        }
    }
    last
}

/// RAM-backed history store. Used by the host test suite and as the
/// reference semantics for the flash implementation.
pub struct MemoryHistory {
    slots: [TestRecord; HISTORY_SLOTS as usize],
}

impl MemoryHistory {
    pub const fn new() -> Self {
        Self {
            slots: [TestRecord::zeroed(); HISTORY_SLOTS as usize],
        }
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore for MemoryHistory {
    fn load(&mut self, slot: u8) -> Result<TestRecord, Error> {
        self.slots
            .get(slot as usize)
            .copied()
            .ok_or(Error::Storage)
    }

    fn store(&mut self, slot: u8, record: &TestRecord) -> Result<(), Error> {
        match self.slots.get_mut(slot as usize) {
            Some(entry) => {
                *entry = *record;
                Ok(())
            }
            None => Err(Error::Storage),
        }
    }
}
