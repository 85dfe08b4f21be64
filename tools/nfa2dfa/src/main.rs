use std::fs::File;
use std::io::BufWriter;
use std::io::stdout;
use std::process::ExitCode;

use clap::Parser;
use log::info;

use powerset_automata::read_nfa;
use powerset_automata::write_dfa;
use powerset_utilities::PowersetError;
use powerset_utilities::Timing;

use verbosity::VerbosityFlag;

mod verbosity;

#[derive(clap::Parser, Debug)]
#[command(
    name = "nfa2dfa",
    about = "Converts an epsilon-NFA into an equivalent DFA using the subset construction"
)]
struct Cli {
    #[command(flatten)]
    verbosity: VerbosityFlag,

    /// Specify the input NFA.
    filename: String,

    /// Write the DFA to this file instead of stdout.
    output: Option<String>,

    #[arg(long, help = "Print the time spent in every phase")]
    timings: bool,
}

fn main() -> Result<ExitCode, PowersetError> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbosity.log_level_filter())
        .parse_default_env()
        .init();

    let timing = Timing::new();

    let mut time_read = timing.start("read nfa");
    let nfa = read_nfa(File::open(&cli.filename)?)?;
    time_read.finish();

    let mut time_convert = timing.start("subset construction");
    let dfa = nfa.to_dfa()?;
    time_convert.finish();
    info!("{dfa}");

    let mut time_write = timing.start("write dfa");
    if let Some(file) = cli.output {
        let mut writer = BufWriter::new(File::create(file)?);
        write_dfa(&mut writer, &dfa)?;
    } else {
        write_dfa(&mut stdout(), &dfa)?;
    }
    time_write.finish();

    if cli.timings {
        timing.print();
    }

    Ok(ExitCode::SUCCESS)
}
