//! # Reelgate Testkit
//!
//! Testing utilities for Reelgate.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: In-memory collaborators on a manual clock, with a small sample catalog
//! - **Generators**: Proptest strategies for owners, tokens and action strings
//! - **Tracing**: A subscriber that writes through the test harness
//!
//! ## Test Fixtures
//!
//! ```rust
//! use reelgate_testkit::fixtures::{link_for, TestFixture};
//!
//! let fixture = TestFixture::new();
//! let link = link_for(fixture.movie());
//! assert!(link.starts_with("https://"));
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use reelgate_testkit::generators::action_request;
//!
//! proptest! {
//!     #[test]
//!     fn action_fits(req in action_request()) {
//!         prop_assert!(req.encode().len() <= 64);
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{link_for, sample_records, TestFixture, SHORTENER, T0};

/// Route `tracing` output through the test harness.
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .try_init();
}
