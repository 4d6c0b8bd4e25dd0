// src/main.rs

use autoupconvert::{cli, logging, run};

#[tokio::main]
async fn main() {
    // Startup failures are reported and the process returns normally; the
    // exit status does not distinguish error conditions.
    if let Err(err) = run_main().await {
        eprintln!("autoupconvert: {err}. Exiting.");
    }
}

async fn run_main() -> anyhow::Result<()> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args).await?;
    Ok(())
}
