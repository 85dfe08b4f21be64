use std::collections::BTreeMap;

use powerset_utilities::TagIndex;
use powerset_utilities::VecSet;

/// A unique type for the states of an automaton.
pub struct StateTag;

/// The index for a state, it refers to a state owned by an [`crate::Automaton`].
pub type StateIndex = TagIndex<usize, StateTag>;

/// A single named state of a nondeterministic automaton together with its
/// outgoing transitions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    name: String,
    is_final: bool,

    /// For every symbol (including epsilon) the set of destinations.
    transitions: BTreeMap<char, VecSet<StateIndex>>,
}

impl State {
    /// Creates a state without outgoing transitions.
    pub fn new(name: &str, is_final: bool) -> Self {
        Self {
            name: name.to_string(),
            is_final,
            transitions: BTreeMap::new(),
        }
    }

    /// Records that `to` is reachable from this state on the given symbol.
    /// Adding the same transition twice has no effect.
    pub fn add_transition(&mut self, symbol: char, to: StateIndex) {
        self.transitions.entry(symbol).or_default().insert(to);
    }

    /// Returns the destinations on the given symbol, which is empty when this
    /// state has no move on it.
    pub fn transitions_on(&self, symbol: char) -> impl Iterator<Item = StateIndex> + '_ {
        self.transitions
            .get(&symbol)
            .into_iter()
            .flat_map(|destinations| destinations.iter().copied())
    }

    /// Returns the symbols on which this state has outgoing transitions, in sorted order.
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.transitions.keys().copied()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }
}
