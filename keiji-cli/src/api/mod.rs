//! Backend client for the hosted signage database
//!
//! Thin REST wrapper: authenticated user lookup, ordered reads of the
//! master and settings tables, and batch inserts of entry records feeding
//! the admin approval queue. The approval pipeline itself lives behind the
//! backend; this module only produces the insert payload and reads
//! pending/settings state.

pub mod client;
pub mod models;

pub use client::SignageClient;
pub use models::{EntryRecord, SettingRow, UserInfo};
