use thiserror::Error;

/// The fatal errors that can occur while constructing or converting automata.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AutomatonError {
    #[error("No state exists with name {name}")]
    UnknownState { name: String },

    #[error("The automaton is incomplete, a transition referred to the unknown state {name}")]
    Incomplete { name: String },

    #[error("The automaton has no start state")]
    MissingStartState,

    #[error("State {from} already has a different transition on symbol '{symbol}'")]
    Nondeterministic { from: String, symbol: char },
}
