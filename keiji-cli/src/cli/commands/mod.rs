//! Subcommand handlers

pub mod export;
pub mod import;
pub mod masters;
pub mod pending;
pub mod restore;
pub mod submit;
