//! advisor-loadtest - concurrent load test for `POST /api/recommend`.

use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use deployment_advisor::bench::{generate_requests, run_load_test, LoadTestConfig, LoadTestReport};
use deployment_advisor::domain::catalog::CriterionCatalog;

/// Load test for the deployment advisor recommendation API
#[derive(Parser, Debug)]
#[command(name = "advisor-loadtest", version)]
struct Cli {
    /// Recommendation endpoint URL
    #[arg(long, default_value = "http://localhost:8080/api/recommend")]
    url: String,

    /// Requests in flight at once
    #[arg(short = 'c', long, default_value_t = 10)]
    concurrency: usize,

    /// Total number of requests
    #[arg(short = 'n', long, default_value_t = 100)]
    requests: usize,

    /// Pause after each request, in milliseconds
    #[arg(long, default_value_t = 0)]
    delay: u64,

    /// Save results as JSON to this file
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Log every request
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Criterion catalog YAML (defaults to the built-in catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();

    let catalog = match &cli.catalog {
        Some(path) => CriterionCatalog::from_path(path)?,
        None => CriterionCatalog::builtin().clone(),
    };

    info!(url = %cli.url, requests = cli.requests, concurrency = cli.concurrency, "starting load test");
    let requests = generate_requests(&catalog, cli.requests, &mut rand::thread_rng());

    let config = LoadTestConfig {
        url: cli.url,
        concurrency: cli.concurrency,
        delay: Duration::from_millis(cli.delay),
        verbose: cli.verbose,
    };
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(120))
        .build()?;
    let run = run_load_test(&client, requests, &config).await;

    println!(
        "\nТестирование завершено за {:.2} сек, {:.2} запросов/сек\n",
        run.elapsed.as_secs_f64(),
        run.requests_per_sec()
    );
    let report = LoadTestReport::from_stats(&run.stats);
    print!("{}", report.render());

    if let Some(path) = cli.output {
        report.save(&path)?;
        println!("\nРезультаты сохранены в файл {}", path.display());
    }
    Ok(())
}
