// src/main.rs

use testrig::exec::RunOutcome;
use testrig::{cli, logging, run};

#[tokio::main]
async fn main() {
    let code = match run_main().await {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            eprintln!("testrig error: {err:?}");
            1
        }
    };
    std::process::exit(code);
}

async fn run_main() -> anyhow::Result<RunOutcome> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args).await
}
