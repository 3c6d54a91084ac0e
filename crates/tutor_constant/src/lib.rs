//! Shared constants for the tutor workspace.

pub mod app;
pub mod defaults;
pub mod persona;
