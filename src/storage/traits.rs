//! Storage trait definitions.

use crate::error::Result;

/// A named durable slot store.
///
/// Each slot holds one raw serialized blob (a JSON array in practice).
/// This mirrors an origin-scoped key-value storage: slots survive process
/// restarts, and the last writer wins when two processes share a slot.
pub trait SlotStore: Send + Sync {
    /// Read the raw contents of a slot, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn read(&self, slot: &str) -> Result<Option<String>>;

    /// Write the raw contents of a slot, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn write(&self, slot: &str, contents: &str) -> Result<()>;

    /// Remove a slot entirely. Removing an absent slot is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn remove(&self, slot: &str) -> Result<()>;
}

impl<S: SlotStore + ?Sized> SlotStore for &S {
    fn read(&self, slot: &str) -> Result<Option<String>> {
        (**self).read(slot)
    }

    fn write(&self, slot: &str, contents: &str) -> Result<()> {
        (**self).write(slot, contents)
    }

    fn remove(&self, slot: &str) -> Result<()> {
        (**self).remove(slot)
    }
}
