//! Persistence layer: classification results and per-thread lifecycle state.

pub mod memory;
pub mod traits;

pub use memory::MemoryStore;
pub use traits::{ClassificationStore, LifecycleStore};
