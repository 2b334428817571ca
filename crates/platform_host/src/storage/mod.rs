//! Durable storage contracts.

pub mod slots;

pub use slots::{read_slot_with, write_slot_with, MemorySlotStore, SlotStore, SlotStoreFuture};
