//! Checks the diagnostics of duplicate state declarations. The logger is
//! global, so this file contains a single test that installs its own logger.

use std::sync::Mutex;

use log::Level;
use log::LevelFilter;
use log::Log;
use log::Metadata;
use log::Record;

use powerset_automata::Automaton;
use powerset_automata::Dfa;
use powerset_automata::DfaBuilder;

/// Stores the messages of all warnings that are logged.
struct WarningLogger {
    warnings: Mutex<Vec<String>>,
}

impl Log for WarningLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut warnings) = self.warnings.lock() {
                warnings.push(record.args().to_string());
            }
        }
    }

    fn flush(&self) {}
}

static LOGGER: WarningLogger = WarningLogger {
    warnings: Mutex::new(Vec::new()),
};

fn take_warnings() -> Vec<String> {
    std::mem::take(&mut *LOGGER.warnings.lock().unwrap())
}

#[test]
fn test_duplicate_declaration_warns() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Warn);

    let mut nfa = Automaton::new();
    nfa.add_start_state("p");
    nfa.add_state("q");
    assert!(take_warnings().is_empty());

    nfa.add_final_state("p");
    assert_eq!(take_warnings(), vec!["A state with name p already exists in the automaton".to_string()]);

    nfa.add_state("q");
    nfa.add_start_state("q");
    assert_eq!(take_warnings().len(), 2);

    // The DFA sink reports duplicate declarations in the same way.
    let mut dfa = Dfa::new();
    dfa.add_state("{p}");
    dfa.add_final_state("{p}");
    assert_eq!(take_warnings(), vec!["A state with name {p} already exists in the DFA".to_string()]);

    // Designating an existing state as start state is not a redeclaration.
    dfa.add_start_state("{p}");
    assert!(take_warnings().is_empty());
}
