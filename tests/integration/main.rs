//! Integration tests for the Sensu Go Rust SDK.
//!
//! Each test starts a local `wiremock` server standing in for the Sensu Go
//! backend and drives the public API against it over real HTTP.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test integration
//!
//! # With SDK logs
//! RUST_LOG=sensu_go=trace cargo test --test integration -- --nocapture
//! ```

mod auth_tests;
mod common;
mod crud_tests;
mod listing_tests;
