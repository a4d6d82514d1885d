// src/main.rs

use std::process::ExitCode;

use triggergraph::{cli, logging};

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();
    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("triggergraph: {err:#}");
        return ExitCode::FAILURE;
    }

    match triggergraph::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("triggergraph error: {err:?}");
            ExitCode::FAILURE
        }
    }
}
