//! Validation-based output verification.
//!
//! Verification never stops at the first mismatch. Every missing,
//! unexpected or misplaced record and every wrong counter is collected
//! through Stillwater's `Validation`, then reported once as a single
//! `VerificationFailure`:
//!
//! ```text
//! 2 Error(s): (Matched expected output (foo, 52) but at incorrect position 1 (expected position 0), ...)
//! ```
//!
//! # Example
//!
//! ```rust
//! use mrtest::core::{Counters, Pair};
//! use mrtest::verify::{OrderMode, Verifier};
//!
//! let verifier = Verifier::new(OrderMode::Unordered)
//!     .expect_output(Pair::new("foo", "bar"))
//!     .expect_output(Pair::new("foo", "bar"));
//!
//! let failure = verifier
//!     .verify(&[Pair::new("foo", "bar")], &Counters::new())
//!     .unwrap_err();
//!
//! assert_eq!(
//!     failure.to_string(),
//!     "1 Error(s): (Missing expected output (foo, bar))"
//! );
//! ```

mod discrepancy;
mod verifier;

pub use discrepancy::{Discrepancy, OrderMode};
pub use verifier::{counter_discrepancies, output_discrepancies, Verifier};
