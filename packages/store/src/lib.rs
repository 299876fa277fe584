//! Client-side key/value persistence for the fitness tracker.
//!
//! Everything goes through the [`Storage`] trait. The caller picks the backend
//! and passes it in when it builds the session store:
//!
//! | Backend | Platform | Durable |
//! |---------|----------|---------|
//! | [`LocalStorage`] | web (wasm32 + `web` feature) | yes, browser `localStorage` |
//! | [`FileStorage`] | desktop / native | yes, one file per key |
//! | [`MemoryStorage`] | anywhere | no, test double |

pub mod storage;

mod memory;
pub use memory::MemoryStorage;

mod file_store;
pub use file_store::FileStorage;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStorage;

pub use storage::{Storage, StoreError};
