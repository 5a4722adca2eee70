//! Host implementations.

mod memory;

pub use memory::{MemoryHost, MemoryTable};
