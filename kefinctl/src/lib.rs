//! Operator tooling for Kefin home-screen configuration: file-backed
//! stores, admin/legacy document loading and the `kefinctl` commands.
#![allow(missing_docs)]

pub mod cli;
pub mod loader;
pub mod stores;

pub use loader::{AdminSource, LoadError};
pub use stores::{JsonFileConfigStore, JsonFilePreferenceStore};
