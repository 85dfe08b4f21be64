//! Subset construction algorithm for converting an epsilon-NFA to a DFA.

use std::borrow::Cow;
use std::collections::VecDeque;

use itertools::Itertools;
use log::debug;
use log::trace;
use rustc_hash::FxHashMap;

use powerset_utilities::VecSet;

use crate::Automaton;
use crate::AutomatonError;
use crate::DfaBuilder;
use crate::StateIndex;

/// Returns the name of the DFA state that corresponds to the given set of
/// NFA states, which is the sorted list of member names, e.g. `{p,q}`.
///
/// The name does not depend on the order in which the members were found.
/// Member names are escaped by [`escape_state_name`], so different sets
/// always result in different names.
pub fn state_set_name(nfa: &Automaton, states: &VecSet<StateIndex>) -> String {
    let mut names: Vec<&str> = states.iter().map(|&index| nfa.state(index).name()).collect();
    names.sort_unstable();

    format!("{{{}}}", names.iter().map(|&name| escape_state_name(name)).format(","))
}

/// Escapes `\`, `,`, `{`, `}` and `"` in a state name with a backslash, and
/// writes the empty name as `""`.
pub fn escape_state_name(name: &str) -> Cow<'_, str> {
    if name.is_empty() {
        return Cow::Borrowed("\"\"");
    }

    if !name.contains(['\\', ',', '{', '}', '"']) {
        return Cow::Borrowed(name);
    }

    let mut escaped = String::with_capacity(name.len() + 2);
    for c in name.chars() {
        if matches!(c, '\\' | ',' | '{' | '}' | '"') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    Cow::Owned(escaped)
}

/// Converts the given epsilon-NFA into a DFA using the powerset construction,
/// the resulting states and transitions are added to the builder.
///
/// Every reachable set of NFA states, closed under epsilon transitions,
/// becomes one DFA state which is final iff one of its members is final. The
/// empty set is the dead state and is treated like any other set. Fails
/// without touching the builder when the automaton is incomplete or has no
/// start state.
pub fn subset_construction(nfa: &Automaton, builder: &mut impl DfaBuilder) -> Result<(), AutomatonError> {
    if let Some(name) = nfa.unknown_state() {
        return Err(AutomatonError::Incomplete { name: name.to_string() });
    }

    let start = nfa.start_state().ok_or(AutomatonError::MissingStartState)?;

    // Maps every visited set of NFA states to the name of its DFA state.
    let mut visited: FxHashMap<VecSet<StateIndex>, String> = FxHashMap::default();
    let mut queue: VecDeque<(VecSet<StateIndex>, String)> = VecDeque::new();

    let initial = nfa.epsilon_closure(start);
    let initial_name = declare(nfa, builder, &initial);
    builder.add_start_state(&initial_name);

    visited.insert(initial.clone(), initial_name.clone());
    queue.push_back((initial, initial_name));

    let mut num_of_transitions = 0usize;
    while let Some((current, current_name)) = queue.pop_front() {
        // The alphabet is sorted, which makes the resulting DFA deterministic.
        for &symbol in nfa.alphabet() {
            let next = nfa.epsilon_closure_of(&nfa.move_on_symbol(&current, symbol));

            let next_name = match visited.get(&next) {
                Some(name) => name.clone(),
                None => {
                    let name = declare(nfa, builder, &next);
                    visited.insert(next.clone(), name.clone());
                    queue.push_back((next, name.clone()));
                    name
                }
            };

            trace!("Transition {current_name} --[{symbol}]-> {next_name}");
            builder.add_transition(&current_name, symbol, &next_name)?;
            num_of_transitions += 1;
        }
    }

    debug!(
        "Subset construction found {} states and {} transitions",
        visited.len(),
        num_of_transitions
    );

    Ok(())
}

/// Declares a new DFA state for the given set of NFA states and returns its name.
fn declare(nfa: &Automaton, builder: &mut impl DfaBuilder, states: &VecSet<StateIndex>) -> String {
    let name = state_set_name(nfa, states);

    if nfa.contains_final(states) {
        debug!("Found final state {name}");
        builder.add_final_state(&name);
    } else {
        debug!("Found state {name}");
        builder.add_state(&name);
    }

    name
}
