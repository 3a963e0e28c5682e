//! Utility helpers shared across the session modules.

pub mod listeners;
