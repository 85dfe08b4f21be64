use rand::Rng;
use test_log::test;

use powerset_automata::Automaton;
use powerset_automata::Dfa;
use powerset_automata::EPSILON;
use powerset_automata::random_nfa;
use powerset_automata::read_nfa;
use powerset_utilities::random_test;

/// Simulates the nondeterministic automaton by keeping track of the set of reachable states.
fn nfa_accepts(nfa: &Automaton, word: &str) -> bool {
    let Some(start) = nfa.start_state() else {
        return false;
    };

    let mut current = nfa.epsilon_closure(start);
    for symbol in word.chars() {
        current = nfa.epsilon_closure_of(&nfa.move_on_symbol(&current, symbol));
    }

    nfa.contains_final(&current)
}

fn dfa_accepts(dfa: &Dfa, word: &str) -> bool {
    let Some(mut state) = dfa.start_state() else {
        return false;
    };

    for symbol in word.chars() {
        match dfa.transition(state, symbol) {
            Some(next) => state = next,
            None => return false,
        }
    }

    dfa.is_final(state)
}

#[test]
fn test_strings_ending_in_a() {
    let mut nfa = Automaton::new();
    nfa.add_start_state("p");
    nfa.add_final_state("q");
    nfa.add_transition("p", 'a', "p").unwrap();
    nfa.add_transition("p", 'a', "q").unwrap();
    nfa.add_transition("p", 'b', "p").unwrap();

    let dfa = nfa.to_dfa().unwrap();

    for word in ["a", "ba", "abba", "bbbba"] {
        assert!(dfa_accepts(&dfa, word), "{word} should be accepted");
        assert!(nfa_accepts(&nfa, word));
    }

    for word in ["", "b", "ab", "bbb", "aab"] {
        assert!(!dfa_accepts(&dfa, word), "{word} should be rejected");
        assert!(!nfa_accepts(&nfa, word));
    }
}

#[test]
fn test_epsilon_choice() {
    // Accepts a*b* through an epsilon move between the two loops.
    let nfa = read_nfa(
        "final q
         start p
         p --[a]-> p
         p --[e]-> q
         q --[b]-> q"
            .as_bytes(),
    )
    .unwrap();

    let dfa = nfa.to_dfa().unwrap();

    for word in ["", "a", "b", "aab", "abbb"] {
        assert!(dfa_accepts(&dfa, word), "{word} should be accepted");
    }

    for word in ["ba", "aba", "bba"] {
        assert!(!dfa_accepts(&dfa, word), "{word} should be rejected");
    }
}

#[test]
fn test_random_language_equivalence() {
    random_test(100, |rng| {
        let nfa = random_nfa(rng, 8, 3, 3, 0.25);
        let dfa = nfa.to_dfa().unwrap();

        assert!(!dfa.alphabet().contains(&EPSILON));

        for _ in 0..50 {
            let length = rng.random_range(0..8);
            let word: String = (0..length)
                .map(|_| ['a', 'b', 'c', 'z'][rng.random_range(0..4)])
                .collect();

            assert_eq!(
                dfa_accepts(&dfa, &word),
                nfa_accepts(&nfa, &word),
                "The automata disagree on the word {word:?}"
            );
        }
    });
}
