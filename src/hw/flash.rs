//! Flash-backed history store.
//!
//! Uses the nRF52840's internal flash via the `sequential-storage`
//! crate: one map item per history slot, keyed by the slot index, with
//! the 39-byte record image as the value. Wear levelling and garbage
//! collection across the reserved pages are the crate's problem, not
//! ours. Writes block until the flash controller is done, so the
//! store/load calls look synchronous to the interface controller.

use defmt::{error, info};
use embassy_embedded_hal::adapter::BlockingAsync;
use embassy_futures::block_on;
use embassy_nrf::nvmc::Nvmc;
use sequential_storage::cache::NoCache;
use sequential_storage::map::{fetch_item, store_item};

use crate::config::{STORAGE_FLASH_PAGE_COUNT, STORAGE_FLASH_PAGE_START};
use crate::error::Error;
use crate::history::HistoryStore;
use crate::record::{TestRecord, RECORD_BYTES};

/// Flash page size for nRF52840 (4 KB).
const FLASH_PAGE_SIZE: u32 = 4096;

/// Start address of the history region.
const STORAGE_START: u32 = STORAGE_FLASH_PAGE_START * FLASH_PAGE_SIZE;

/// End address (exclusive) of the history region.
const STORAGE_END: u32 = (STORAGE_FLASH_PAGE_START + STORAGE_FLASH_PAGE_COUNT) * FLASH_PAGE_SIZE;

/// Work buffer: record image plus map item overhead.
const BUF_SIZE: usize = 64;

pub struct FlashHistory<'d> {
    flash: BlockingAsync<Nvmc<'d>>,
}

impl<'d> FlashHistory<'d> {
    pub fn new(nvmc: Nvmc<'d>) -> Self {
        Self {
            flash: BlockingAsync::new(nvmc),
        }
    }
}

impl HistoryStore for FlashHistory<'_> {
    fn load(&mut self, slot: u8) -> Result<TestRecord, Error> {
        let mut buf = [0u8; BUF_SIZE];

        let fetched = block_on(fetch_item::<u8, &[u8], _>(
            &mut self.flash,
            STORAGE_START..STORAGE_END,
            &mut NoCache::new(),
            &mut buf,
            &slot,
        ));

        match fetched {
            Ok(Some(data)) => TestRecord::decode(data),
            // Never-written slot: the empty sentinel.
            Ok(None) => Ok(TestRecord::zeroed()),
            Err(_) => {
                error!("history read failed for slot {}", slot);
                Err(Error::Storage)
            }
        }
    }

    fn store(&mut self, slot: u8, record: &TestRecord) -> Result<(), Error> {
        let mut image = [0u8; RECORD_BYTES];
        if record.encode(&mut image) == 0 {
            return Err(Error::BadRecord);
        }

        let mut buf = [0u8; BUF_SIZE];
        let item: &[u8] = &image;

        match block_on(store_item::<u8, &[u8], _>(
            &mut self.flash,
            STORAGE_START..STORAGE_END,
            &mut NoCache::new(),
            &mut buf,
            &slot,
            &item,
        )) {
            Ok(()) => {
                info!("slot {} written", slot);
                Ok(())
            }
            Err(_) => {
                error!("history write failed for slot {}", slot);
                Err(Error::Storage)
            }
        }
    }
}
