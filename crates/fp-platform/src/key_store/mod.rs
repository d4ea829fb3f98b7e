//! Key store adapters.

mod memory;
mod system;

pub use memory::InMemoryKeyStore;
pub use system::SystemKeyStore;
