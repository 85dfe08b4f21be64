use rand::Rng;

use crate::Automaton;
use crate::EPSILON;
use crate::is_epsilon;

/// Generates a random epsilon-NFA with the desired number of states, symbols
/// and maximum out degree. The states are named `s0`, `s1`, ... where `s0` is
/// the non-final start state, the other states are final with probability
/// one third. Every transition is an epsilon transition with the given
/// probability.
pub fn random_nfa(
    rng: &mut impl Rng,
    num_of_states: usize,
    num_of_symbols: usize,
    outdegree: usize,
    epsilon_ratio: f64,
) -> Automaton {
    assert!(num_of_states > 0, "An automaton requires at least the start state.");
    assert!(
        num_of_symbols < 26,
        "Too many symbols requested, we only support alphabetic symbols."
    );

    // Introduce lower case letters for the symbols, skipping the epsilon marker.
    let symbols: Vec<char> = ('a'..='z').filter(|&symbol| !is_epsilon(symbol)).take(num_of_symbols).collect();
    let names: Vec<String> = (0..num_of_states).map(|index| format!("s{index}")).collect();

    let mut nfa = Automaton::new();
    nfa.add_start_state(&names[0]);
    for name in &names[1..] {
        if rng.random_bool(1.0 / 3.0) {
            nfa.add_final_state(name);
        } else {
            nfa.add_state(name);
        }
    }

    for from in &names {
        for _ in 0..rng.random_range(0..=outdegree) {
            let symbol = if symbols.is_empty() || rng.random_bool(epsilon_ratio) {
                EPSILON
            } else {
                symbols[rng.random_range(0..symbols.len())]
            };
            let to = &names[rng.random_range(0..num_of_states)];

            nfa.add_transition(from, symbol, to)
                .expect("Both states were declared before");
        }
    }

    nfa
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use powerset_utilities::random_test;

    #[test]
    fn test_random_nfa() {
        random_test(100, |rng| {
            let nfa = random_nfa(rng, 10, 3, 3, 0.2);

            assert_eq!(nfa.num_of_states(), 10);
            assert_eq!(nfa.start_state(), nfa.state_index("s0"));
            assert!(nfa.alphabet().len() <= 3);
            assert!(!nfa.alphabet().contains(&EPSILON));
        });
    }
}
