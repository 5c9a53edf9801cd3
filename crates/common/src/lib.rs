//! Cross-cutting helpers shared by hosts of the configuration store.

pub mod utils;
