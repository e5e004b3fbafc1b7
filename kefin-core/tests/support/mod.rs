//! Shared fakes for core integration tests.

pub mod stores;
