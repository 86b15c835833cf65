use anyhow::Context;
use clap::Parser;
use rewrite_job::{
    app_module::AppServices,
    cli::Cli,
    config::{load_env_file, JobConfig},
    job::{Job, JobReport},
    logging::{init_logging, LogFormat},
};
use tracing::Instrument;
use uuid::Uuid;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = bootstrap(&cli) {
        eprintln!("Startup error: {:#}", e);
        std::process::exit(1);
    }

    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("job", %run_id);

    if let Err(e) = run(&cli).instrument(span).await {
        tracing::error!(%run_id, "Job failed: {}", e);
        std::process::exit(1);
    }
}

fn bootstrap(cli: &Cli) -> anyhow::Result<()> {
    load_env_file(cli.env_file.as_deref()).context("unable to load env file")?;
    init_logging(LogFormat::from_env()).context("setting log subscriber failed")?;
    Ok(())
}

async fn run(cli: &Cli) -> rewrite_job::Result<JobReport> {
    let config = JobConfig::from_env(&cli.overrides())?;
    tracing::debug!(?config, "Configuration loaded");

    let services = AppServices::from_config(&config).await;
    Job::new(&config, services).run().await
}
