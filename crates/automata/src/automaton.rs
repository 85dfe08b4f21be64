use std::collections::BTreeSet;
use std::fmt;

use log::warn;
use rustc_hash::FxHashMap;

use powerset_utilities::VecSet;

use crate::AutomatonError;
use crate::Dfa;
use crate::EPSILON;
use crate::State;
use crate::StateIndex;
use crate::is_epsilon;
use crate::subset_construction;

/// A nondeterministic finite automaton with epsilon transitions.
///
/// The automaton owns all its states, which refer to each other by
/// [`StateIndex`]. States are only ever added, and a state is only changed by
/// adding outgoing transitions to it.
#[derive(Clone, Default)]
pub struct Automaton {
    states: Vec<State>,

    /// Maps the name of every state to its index.
    names: FxHashMap<String, StateIndex>,

    start_state: Option<StateIndex>,

    /// The symbols used by the transitions, excluding epsilon.
    alphabet: BTreeSet<char>,

    /// The name of the first unknown state that a transition referred to.
    unknown_state: Option<String>,
}

impl Automaton {
    /// Creates an automaton without any states.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a non-final state with the given name and makes it the start
    /// state, replacing any previous start state.
    ///
    /// If the name is already taken the existing state becomes the start state
    /// and is otherwise left untouched.
    pub fn add_start_state(&mut self, name: &str) -> StateIndex {
        let index = self.add_state_with(name, false);
        self.start_state = Some(index);
        index
    }

    /// Adds a non-final state with the given name, a name that is already
    /// taken results in a warning and the existing state.
    pub fn add_state(&mut self, name: &str) -> StateIndex {
        self.add_state_with(name, false)
    }

    /// Adds a final state with the given name. A name that is already taken
    /// results in a warning, the existing state is not made final.
    pub fn add_final_state(&mut self, name: &str) -> StateIndex {
        self.add_state_with(name, true)
    }

    /// Adds the transition `from --[symbol]-> to`, where both states must already exist.
    ///
    /// A transition that refers to an unknown state is a fatal error, after
    /// which the automaton refuses to be converted.
    pub fn add_transition(&mut self, from: &str, symbol: char, to: &str) -> Result<(), AutomatonError> {
        let from_index = self.lookup(from)?;
        let to_index = self.lookup(to)?;

        self.states[*from_index].add_transition(symbol, to_index);
        if !is_epsilon(symbol) {
            self.alphabet.insert(symbol);
        }

        Ok(())
    }

    /// Returns the index of the state with the given name.
    pub fn state_index(&self, name: &str) -> Option<StateIndex> {
        self.names.get(name).copied()
    }

    /// Returns the state with the given index.
    pub fn state(&self, index: StateIndex) -> &State {
        &self.states[*index]
    }

    /// Iterate over all state indices in the automaton.
    pub fn states(&self) -> impl Iterator<Item = StateIndex> + use<> {
        (0..self.num_of_states()).map(StateIndex::new)
    }

    /// Returns the number of states.
    pub fn num_of_states(&self) -> usize {
        self.states.len()
    }

    /// Returns the final states, computed from the current final flags.
    pub fn final_states(&self) -> VecSet<StateIndex> {
        self.states().filter(|&index| self.state(index).is_final()).collect()
    }

    pub fn start_state(&self) -> Option<StateIndex> {
        self.start_state
    }

    /// Returns the symbols used by the transitions, excluding epsilon.
    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    /// Returns the name of the unknown state that an earlier call to
    /// [`Automaton::add_transition`] referred to, if any.
    pub fn unknown_state(&self) -> Option<&str> {
        self.unknown_state.as_deref()
    }

    /// Returns true iff any of the given states is final.
    pub fn contains_final(&self, states: &VecSet<StateIndex>) -> bool {
        states.iter().any(|&index| self.state(index).is_final())
    }

    /// Returns the set of states that are reachable from the given state by
    /// only taking epsilon transitions, which includes the state itself.
    pub fn epsilon_closure(&self, state: StateIndex) -> VecSet<StateIndex> {
        self.epsilon_closure_of(&VecSet::singleton(state))
    }

    /// Returns the union of the epsilon closures of the given states.
    pub fn epsilon_closure_of(&self, states: &VecSet<StateIndex>) -> VecSet<StateIndex> {
        let mut closure = VecSet::new();
        let mut stack: Vec<StateIndex> = states.iter().copied().collect();

        // A state is added to the closure before its successors are explored,
        // so epsilon cycles are only traversed once.
        while let Some(index) = stack.pop() {
            if !closure.insert(index) {
                continue;
            }

            for to in self.state(index).transitions_on(EPSILON) {
                if !closure.contains(&to) {
                    stack.push(to);
                }
            }
        }

        closure
    }

    /// Returns the states that are reached from the given states by a single
    /// transition on the symbol, without taking the epsilon closure.
    pub fn move_on_symbol(&self, states: &VecSet<StateIndex>, symbol: char) -> VecSet<StateIndex> {
        states
            .iter()
            .flat_map(|&index| self.state(index).transitions_on(symbol))
            .collect()
    }

    /// Converts this automaton into an equivalent deterministic automaton
    /// using the subset construction.
    pub fn to_dfa(&self) -> Result<Dfa, AutomatonError> {
        let mut dfa = Dfa::new();
        subset_construction(self, &mut dfa)?;
        Ok(dfa)
    }

    /// Adds a state unless the name is already taken.
    fn add_state_with(&mut self, name: &str, is_final: bool) -> StateIndex {
        if let Some(&index) = self.names.get(name) {
            warn!("A state with name {name} already exists in the automaton");
            return index;
        }

        let index = StateIndex::new(self.states.len());
        self.states.push(State::new(name, is_final));
        self.names.insert(name.to_string(), index);
        index
    }

    /// Returns the index of the given state, or records that the automaton is
    /// incomplete when it does not exist.
    fn lookup(&mut self, name: &str) -> Result<StateIndex, AutomatonError> {
        match self.names.get(name) {
            Some(&index) => Ok(index),
            None => {
                if self.unknown_state.is_none() {
                    self.unknown_state = Some(name.to_string());
                }

                Err(AutomatonError::UnknownState { name: name.to_string() })
            }
        }
    }
}

impl fmt::Debug for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Final states are declared before the start state, since a start
        // declaration can not make a state final.
        for &index in &self.final_states() {
            writeln!(f, "final {}", self.state(index).name())?;
        }

        if let Some(start) = self.start_state {
            writeln!(f, "start {}", self.state(start).name())?;
        }

        for index in self.states() {
            let state = self.state(index);
            if !state.is_final() && Some(index) != self.start_state {
                writeln!(f, "state {}", state.name())?;
            }
        }

        for index in self.states() {
            let state = self.state(index);
            for symbol in state.symbols() {
                for to in state.transitions_on(symbol) {
                    writeln!(f, "{} --[{symbol}]-> {}", state.name(), self.state(to).name())?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use powerset_utilities::random_test;
    use powerset_utilities::vecset;
    use test_log::test;

    use crate::random_nfa;

    #[test]
    fn test_duplicate_state_is_ignored() {
        let mut nfa = Automaton::new();
        let first = nfa.add_state("p");
        let second = nfa.add_final_state("p");

        assert_eq!(first, second);
        assert_eq!(nfa.num_of_states(), 1);
        assert!(!nfa.state(first).is_final());
        assert!(nfa.final_states().is_empty());
    }

    #[test]
    fn test_start_state_is_replaced() {
        let mut nfa = Automaton::new();
        let p = nfa.add_start_state("p");
        let q = nfa.add_final_state("q");
        assert_eq!(nfa.start_state(), Some(p));

        // Re-declaring an existing final state as start keeps it final.
        nfa.add_start_state("q");
        assert_eq!(nfa.start_state(), Some(q));
        assert!(nfa.state(q).is_final());
        assert_eq!(nfa.num_of_states(), 2);
    }

    #[test]
    fn test_alphabet_excludes_epsilon() {
        let mut nfa = Automaton::new();
        nfa.add_start_state("p");
        nfa.add_final_state("q");
        nfa.add_transition("p", 'b', "q").unwrap();
        nfa.add_transition("p", EPSILON, "q").unwrap();
        nfa.add_transition("q", 'a', "p").unwrap();

        assert_eq!(nfa.alphabet().iter().copied().collect::<Vec<_>>(), vec!['a', 'b']);
    }

    #[test]
    fn test_unknown_state() {
        let mut nfa = Automaton::new();
        nfa.add_start_state("p");

        assert_eq!(
            nfa.add_transition("p", 'a', "x"),
            Err(AutomatonError::UnknownState { name: "x".to_string() })
        );
        assert_eq!(
            nfa.add_transition("y", 'a', "p"),
            Err(AutomatonError::UnknownState { name: "y".to_string() })
        );

        // The first unknown state is remembered, and nothing was added.
        assert_eq!(nfa.unknown_state(), Some("x"));
        assert!(nfa.alphabet().is_empty());
    }

    #[test]
    fn test_epsilon_closure_cycle() {
        let mut nfa = Automaton::new();
        let p = nfa.add_start_state("p");
        let q = nfa.add_state("q");
        let r = nfa.add_state("r");
        let s = nfa.add_state("s");

        nfa.add_transition("p", EPSILON, "q").unwrap();
        nfa.add_transition("q", EPSILON, "r").unwrap();
        nfa.add_transition("r", EPSILON, "p").unwrap();
        nfa.add_transition("r", 'a', "s").unwrap();

        assert_eq!(nfa.epsilon_closure(p), vecset![p, q, r]);
        assert_eq!(nfa.epsilon_closure(s), vecset![s]);
        assert_eq!(nfa.move_on_symbol(&vecset![p, q, r], 'a'), vecset![s]);
        assert_eq!(nfa.epsilon_closure_of(&vecset![q, s]), vecset![p, q, r, s]);
    }

    #[test]
    fn test_final_states_follow_flags() {
        let mut nfa = Automaton::new();
        nfa.add_start_state("p");
        let q = nfa.add_final_state("q");
        let r = nfa.add_final_state("r");

        assert_eq!(nfa.final_states(), vecset![q, r]);
        assert!(nfa.contains_final(&vecset![q]));
        assert!(!nfa.contains_final(&VecSet::new()));
    }

    #[test]
    fn test_random_epsilon_closure() {
        random_test(100, |rng| {
            let nfa = random_nfa(rng, 8, 3, 3, 0.4);

            for state in nfa.states() {
                let closure = nfa.epsilon_closure(state);
                assert!(closure.contains(&state), "closure must contain the state itself");
                assert_eq!(nfa.epsilon_closure_of(&closure), closure, "closure must be a fixed point");

                // Every epsilon successor of a member is a member.
                for member in closure.iter() {
                    for to in nfa.state(*member).transitions_on(EPSILON) {
                        assert!(closure.contains(&to));
                    }
                }
            }
        });
    }
}
