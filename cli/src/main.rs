//! `mci` binary: run one MCI pipeline turn and print the reply.
//!
//! `mci <SESSION_ID> <TEXT> [--json] [--verbose]`

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use cli::TurnOptions;
use config::Settings;

#[derive(Parser, Debug)]
#[command(name = "mci")]
#[command(about = "MCI: run one conversational pipeline turn from the command line")]
struct Args {
    /// Session identifier passed to the pipeline
    #[arg(allow_hyphen_values = true)]
    session_id: String,

    /// User text for this turn (may start with '-')
    #[arg(allow_hyphen_values = true)]
    text: String,

    /// Print one JSON line (session_id, reply, verified output) instead of the bare reply
    #[arg(long)]
    json: bool,

    /// Print the settings summary (no secrets) to stderr before running
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = config::load_and_apply("mci", None) {
        eprintln!("mci: {}", e);
        return ExitCode::FAILURE;
    }
    let settings = match Settings::from_env() {
        Ok(s) => Arc::new(s),
        Err(e) => {
            eprintln!("mci: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let _log_guard = match config::logging::init(settings.log_level()) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("mci: open log file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    cli::report_missing_required(&settings);
    if args.verbose {
        settings.summary().print_to_stderr();
    }

    let opts = TurnOptions {
        session_id: args.session_id,
        text: args.text,
        output_json: args.json,
    };
    let pipeline = cli::default_pipeline();
    match cli::run_turn(&opts, &settings, &pipeline).await {
        Ok(line) => {
            println!("{}", line);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("mci: {}", e);
            ExitCode::FAILURE
        }
    }
}
