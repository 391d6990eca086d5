//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame time
//! - Input events
//! - Storage (LocalStorage on web)

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod storage;
pub mod time;
