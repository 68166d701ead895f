//! Input handling: path classification and raw message loading.

pub mod loader;
pub mod validate;
