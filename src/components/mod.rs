//! UI components.

pub mod explorer;
