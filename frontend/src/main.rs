use std::io::{
    self,
    Read,
    Write,
};
use std::path::PathBuf;

use anyhow::{Context, Result};

use log::{error, info};

use bank_holidays::{
    flush_logging,
    init_logging,
    Config,
    GovUkFetcher,
    RequestEnvelope,
    Skill,
};

/// Handles one request envelope read from stdin, writing the response envelope to stdout.
///
/// The only argument is an optional path to a JSON config file.
#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = Config::load(config_path.as_deref())?;

    init_logging(&config.log_level, config.log_dir.as_deref())?;

    let result = run(&config).await;
    if let Err(err) = &result {
        error!("event=skill_failed error={err:#}");
    }

    flush_logging();
    result
}

async fn run(config: &Config) -> Result<()> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)
        .context("cannot read the request from stdin")?;

    let envelope: RequestEnvelope = serde_json::from_str(&input)
        .context("request is not a valid envelope")?;

    let fetcher = GovUkFetcher::new(config)?;
    info!("event=skill_start endpoint={} timeout_secs={}", fetcher.url(), config.fetch_timeout_secs);

    let skill = Skill::new(fetcher);

    if let Some(response) = skill.handle(envelope).await {
        let mut stdout = io::stdout().lock();
        serde_json::to_writer(&mut stdout, &response)?;
        writeln!(stdout)?;
    } else {
        info!("event=no_response");
    }

    Ok(())
}
