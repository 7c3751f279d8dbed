//! # TallyVault Testkit
//!
//! Testing utilities for TallyVault.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: an engine over the reference cipher with a manually
//!   driven clock, plus shortcuts for the schedule / vote / close
//!   choreography
//! - **Generators**: proptest strategies for property-based testing
//!
//! ## Test Fixtures
//!
//! Quickly set up a full voting round:
//!
//! ```rust
//! use tallyvault_testkit::fixtures::{voters, TestFixture};
//!
//! # async fn example() {
//! let fx = TestFixture::with_seed([7; 32]);
//! let id = fx.schedule("example").await.unwrap();
//!
//! fx.open_window();
//! for voter in voters(3) {
//!     fx.cast(id, voter, true).await.unwrap();
//! }
//!
//! fx.elapse_window();
//! let result = fx.close(id).await.unwrap();
//! assert_eq!(result.yes_count, 3);
//! # }
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use tallyvault_testkit::generators::{ballots, block_on, seed};
//! use tallyvault_testkit::fixtures::{voters, TestFixture};
//!
//! proptest! {
//!     #[test]
//!     fn accepted_ballots_are_conserved(seed in seed(), choices in ballots(12)) {
//!         block_on(async {
//!             let fx = TestFixture::with_seed(seed);
//!             // ...
//!             Ok(())
//!         })?;
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{voters, TestFixture};
pub use generators::block_on;
