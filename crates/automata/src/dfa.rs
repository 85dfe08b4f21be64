use std::collections::BTreeSet;
use std::fmt;

use log::warn;
use rustc_hash::FxHashMap;

use powerset_utilities::TagIndex;

use crate::AutomatonError;

/// The construction interface of a deterministic automaton, in which states
/// are identified by their names.
///
/// The subset construction only interacts with its output through this trait.
pub trait DfaBuilder {
    /// Makes the state with the given name the unique start state.
    fn add_start_state(&mut self, name: &str);

    /// Declares a non-final state with the given name.
    fn add_state(&mut self, name: &str);

    /// Declares a final state with the given name.
    fn add_final_state(&mut self, name: &str);

    /// Declares the transition `from --[symbol]-> to`. Adding a second,
    /// different, transition for the same state and symbol is an error.
    fn add_transition(&mut self, from: &str, symbol: char, to: &str) -> Result<(), AutomatonError>;
}

/// A unique type for the states of a deterministic automaton.
pub struct DfaStateTag;

/// The index for a state of a [`Dfa`].
pub type DfaStateIndex = TagIndex<usize, DfaStateTag>;

/// A deterministic finite automaton with named states, it is built through
/// the [`DfaBuilder`] interface.
#[derive(Clone, Default)]
pub struct Dfa {
    names: Vec<String>,
    is_final: Vec<bool>,
    indices: FxHashMap<String, DfaStateIndex>,

    start_state: Option<DfaStateIndex>,
    alphabet: BTreeSet<char>,

    /// Transitions: (source, symbol) -> destination
    transitions: FxHashMap<(DfaStateIndex, char), DfaStateIndex>,
}

impl Dfa {
    /// Creates a new empty deterministic automaton.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of states.
    pub fn num_of_states(&self) -> usize {
        self.names.len()
    }

    /// Returns the number of transitions.
    pub fn num_of_transitions(&self) -> usize {
        self.transitions.len()
    }

    pub fn start_state(&self) -> Option<DfaStateIndex> {
        self.start_state
    }

    /// Returns the index of the state with the given name.
    pub fn state_index(&self, name: &str) -> Option<DfaStateIndex> {
        self.indices.get(name).copied()
    }

    pub fn state_name(&self, state: DfaStateIndex) -> &str {
        &self.names[*state]
    }

    pub fn is_final(&self, state: DfaStateIndex) -> bool {
        self.is_final[*state]
    }

    /// Returns the final states in increasing order.
    pub fn final_states(&self) -> impl Iterator<Item = DfaStateIndex> + '_ {
        self.iter_states().filter(move |&state| self.is_final(state))
    }

    /// Returns the destination of the transition on the given symbol, if any.
    pub fn transition(&self, from: DfaStateIndex, symbol: char) -> Option<DfaStateIndex> {
        self.transitions.get(&(from, symbol)).copied()
    }

    /// Returns the outgoing transitions of the given state ordered by symbol.
    pub fn outgoing_transitions(&self, from: DfaStateIndex) -> impl Iterator<Item = (char, DfaStateIndex)> + '_ {
        self.alphabet
            .iter()
            .filter_map(move |&symbol| self.transition(from, symbol).map(|to| (symbol, to)))
    }

    /// Returns the symbols that occur on the transitions.
    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    /// Iterate over all state indices in the order in which they were declared.
    pub fn iter_states(&self) -> impl Iterator<Item = DfaStateIndex> + use<> {
        (0..self.num_of_states()).map(DfaStateIndex::new)
    }

    /// Declares a new state, or warns when the name is already taken.
    fn declare(&mut self, name: &str, is_final: bool) -> DfaStateIndex {
        if let Some(&index) = self.indices.get(name) {
            warn!("A state with name {name} already exists in the DFA");
            return index;
        }

        let index = DfaStateIndex::new(self.names.len());
        self.names.push(name.to_string());
        self.is_final.push(is_final);
        self.indices.insert(name.to_string(), index);
        index
    }

    fn lookup(&self, name: &str) -> Result<DfaStateIndex, AutomatonError> {
        self.state_index(name)
            .ok_or_else(|| AutomatonError::UnknownState { name: name.to_string() })
    }
}

impl DfaBuilder for Dfa {
    fn add_start_state(&mut self, name: &str) {
        // The start state is declared as a non-final state when it is unknown.
        let index = match self.state_index(name) {
            Some(index) => index,
            None => self.declare(name, false),
        };

        self.start_state = Some(index);
    }

    fn add_state(&mut self, name: &str) {
        self.declare(name, false);
    }

    fn add_final_state(&mut self, name: &str) {
        self.declare(name, true);
    }

    fn add_transition(&mut self, from: &str, symbol: char, to: &str) -> Result<(), AutomatonError> {
        let from_index = self.lookup(from)?;
        let to_index = self.lookup(to)?;

        if let Some(existing) = self.transition(from_index, symbol) {
            if existing != to_index {
                return Err(AutomatonError::Nondeterministic {
                    from: from.to_string(),
                    symbol,
                });
            }

            return Ok(());
        }

        self.alphabet.insert(symbol);
        self.transitions.insert((from_index, symbol), to_index);
        Ok(())
    }
}

impl fmt::Display for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of states: {}", self.num_of_states())?;
        writeln!(f, "Number of final states: {}", self.final_states().count())?;
        write!(f, "Number of transitions: {}", self.num_of_transitions())
    }
}

impl fmt::Debug for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{self}")?;
        if let Some(start) = self.start_state {
            writeln!(f, "Start state: {}", self.state_name(start))?;
        }

        for state in self.iter_states() {
            for (symbol, to) in self.outgoing_transitions(state) {
                writeln!(f, "{} --[{symbol}]-> {}", self.state_name(state), self.state_name(to))?;
            }
        }

        Ok(())
    }
}
