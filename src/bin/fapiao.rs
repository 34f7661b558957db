use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use fapiao::core::{ConvertConfig, FapiaoError};

/// Convert an invoice spreadsheet into the invoicing software's import XML.
#[derive(Parser)]
#[command(name = "fapiao", version, long_about = None)]
struct Cli {
    /// Input spreadsheet (.xlsx, .xls, .ods)
    input: PathBuf,

    /// Output XML file
    output: PathBuf,

    /// Skip the check that invoice-level columns are constant within each invoice
    #[arg(long)]
    no_verify: bool,

    /// Output encoding
    #[arg(long, default_value = "gbk")]
    encoding: String,

    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    if let Err(err) = easy_logging::init(module_path!(), log_level) {
        let _ = writeln!(io::stderr(), "Failed to initialize the logging: {err}.");
        return ExitCode::FAILURE;
    }

    if let Err(err) = run(&cli) {
        error!("{err}.");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(cli: &Cli) -> Result<(), FapiaoError> {
    let config = ConvertConfig {
        verify_input: !cli.no_verify,
        encoding: cli.encoding.clone(),
    };
    fapiao::convert_file(&cli.input, &cli.output, &config)
}
