//! Shared utility modules.

pub mod logger;
