//! The record store is the only durable copy of the user's data: a set of named slots, each
//! holding a serialized value.
//!
//! There are two implementations of the `RecordStore` trait:
//! - `FileStore` keeps one JSON file per key in a directory.
//! - `MemoryStore` keeps everything in a map. It is used in tests and when nothing should touch
//!   the disk.

mod file_store;
mod memory_store;

use crate::Result;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

/// The key under which the transaction list is stored.
pub const TRANSACTIONS: &str = "transactions";

/// A synchronous key-value persistence slot.
pub trait RecordStore {
    /// Returns the value stored under `key`, or `None` if nothing has been stored there yet.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn put(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S> RecordStore for Box<S>
where
    S: RecordStore + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).put(key, value)
    }
}
