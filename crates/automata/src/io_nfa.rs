use std::io::BufRead;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;

use log::info;
use log::trace;
use regex::Regex;
use thiserror::Error;

use powerset_utilities::PowersetError;

use crate::Automaton;
use crate::Dfa;

#[derive(Error, Debug)]
pub enum IOError {
    #[error("Invalid line {line}: {text}")]
    InvalidLine { line: usize, text: String },

    #[error("Invalid symbol '{symbol}' on line {line}, a symbol is a single character")]
    InvalidSymbol { line: usize, symbol: String },
}

/// Reads an epsilon-NFA in the plain text format from the given reader, the
/// reader is buffered internally.
///
/// Every line is either empty, a comment starting with `%`, a declaration
/// `start <name>`, `state <name>` or `final <name>`, or a transition
/// `<from> --[<symbol>]-> <to>` where the symbol `e` is epsilon. States must
/// be declared before they are used in a transition. Since declaring an
/// existing state has no effect, a final start state is written by declaring
/// it final before the start declaration.
pub fn read_nfa(reader: impl Read) -> Result<Automaton, PowersetError> {
    info!("Reading NFA...");

    let declaration_regex =
        Regex::new(r"^(start|state|final)\s+(\S+)$").expect("Regex compilation should not fail");
    let transition_regex = Regex::new(r"^(\S+)\s+--\[(.*)\]->\s+(\S+)$").expect("Regex compilation should not fail");

    let mut nfa = Automaton::new();
    for (number, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        let text = line.trim();

        if text.is_empty() || text.starts_with('%') {
            continue;
        }

        if let Some(captures) = declaration_regex.captures(text) {
            let (_, [kind, name]) = captures.extract();

            match kind {
                "start" => nfa.add_start_state(name),
                "final" => nfa.add_final_state(name),
                _ => nfa.add_state(name),
            };
        } else if let Some(captures) = transition_regex.captures(text) {
            let (_, [from, symbol_txt, to]) = captures.extract();

            let mut chars = symbol_txt.chars();
            let symbol = match (chars.next(), chars.next()) {
                (Some(symbol), None) => symbol,
                _ => {
                    return Err(IOError::InvalidSymbol {
                        line: number + 1,
                        symbol: symbol_txt.to_string(),
                    }
                    .into());
                }
            };

            trace!("Read transition {from} --[{symbol}]-> {to}");
            nfa.add_transition(from, symbol, to)?;
        } else {
            return Err(IOError::InvalidLine {
                line: number + 1,
                text: text.to_string(),
            }
            .into());
        }
    }

    info!(
        "Finished reading NFA with {} states and alphabet size {}",
        nfa.num_of_states(),
        nfa.alphabet().len()
    );
    Ok(nfa)
}

/// Writes the deterministic automaton in the plain text format of
/// [`read_nfa`] to the given writer, which is buffered internally.
pub fn write_dfa(writer: &mut impl Write, dfa: &Dfa) -> Result<(), PowersetError> {
    let mut writer = BufWriter::new(writer);

    for state in dfa.final_states() {
        writeln!(writer, "final {}", dfa.state_name(state))?;
    }

    if let Some(start) = dfa.start_state() {
        writeln!(writer, "start {}", dfa.state_name(start))?;
    }

    for state in dfa.iter_states() {
        if !dfa.is_final(state) && Some(state) != dfa.start_state() {
            writeln!(writer, "state {}", dfa.state_name(state))?;
        }
    }

    for state in dfa.iter_states() {
        for (symbol, to) in dfa.outgoing_transitions(state) {
            writeln!(writer, "{} --[{symbol}]-> {}", dfa.state_name(state), dfa.state_name(to))?;
        }
    }

    writer.flush()?;
    Ok(())
}
