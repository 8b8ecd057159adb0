//! Core library for the building-management signage notice entry tool
//!
//! Master lookups, the entry form state machine, poster preview
//! composition, legacy CSV serialization, the bulk-entry grid with
//! paste import and auto-save, and the backend REST client.

pub mod api;
pub mod bulk;
pub mod cli;
pub mod config;
pub mod entry;
pub mod export;
pub mod form;
pub mod master;
pub mod preview;
