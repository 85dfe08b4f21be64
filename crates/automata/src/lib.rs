//!
//! A crate containing nondeterministic finite automata with epsilon
//! transitions, and their conversion into deterministic automata using the
//! subset construction.
//!
//! This crate does not use unsafe code.

#![forbid(unsafe_code)]

mod automaton;
mod dfa;
mod error;
mod io_nfa;
mod random_nfa;
mod state;
mod subset_construction;
mod symbol;

pub use automaton::*;
pub use dfa::*;
pub use error::*;
pub use io_nfa::*;
pub use random_nfa::*;
pub use state::*;
pub use subset_construction::*;
pub use symbol::*;
