// src/main.rs

use keepalive::errors::{KeepaliveError, Result};
use keepalive::{cli, logging, run};

#[tokio::main]
async fn main() {
    if let Err(err) = run_main().await {
        match &err {
            KeepaliveError::Usage(_) => {
                if let Err(e) = cli::print_usage(&mut std::io::stdout(), &cli::program_name()) {
                    eprintln!("keepalive error: failed to print usage: {e}");
                }
            }
            other => eprintln!("keepalive error: {other}"),
        }
        std::process::exit(err.exit_code());
    }
}

async fn run_main() -> Result<()> {
    let args = cli::parse()?;
    logging::init_logging(args.log_level)?;
    run(args).await
}
