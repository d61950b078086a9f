//! Binary entrypoint for the `shellrelay` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // A missing .env file is normal.
    let _ = dotenvy::dotenv();
    shellrelay::init_logging();

    // Recording and replay are handled in commands::dispatch via
    // SHELLRELAY_RECORD=<dir> and SHELLRELAY_REPLAY=<file>.
    match shellrelay::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
