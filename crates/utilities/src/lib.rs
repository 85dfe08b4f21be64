//! Utility types and functions shared by the crates of the powerset toolset.
//!
//! Forbid unsafe code in this crate.
#![forbid(unsafe_code)]

mod error;
mod tagged_index;
mod timing;
mod vecset;

pub use error::*;
pub use random_test::*;
pub use tagged_index::*;
pub use timing::*;
pub use vecset::*;
