use std::env;
use std::process::ExitCode;

use voyage_estimator::{cli, logging};

fn main() -> ExitCode {
    logging::init_tracing();
    let args: Vec<String> = env::args().collect();
    let code = cli::run_with_args(&args);
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
