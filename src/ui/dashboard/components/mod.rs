//! Dashboard component modules
//!
//! Contains all individual rendering components

pub mod alerts;
pub mod cases;
pub mod footer;
pub mod header;
pub mod modal;
pub mod network;
pub mod overview;
pub mod search;
pub mod toasts;
