//! Concurrent request execution.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::generator::LoadRequest;
use crate::adapters::http::recommend::RecommendResponse;
use crate::domain::catalog::ScoreTriple;

#[derive(Debug, Clone)]
pub struct LoadTestConfig {
    pub url: String,
    /// Requests in flight at once.
    pub concurrency: usize,
    /// Pause each worker takes after its request.
    pub delay: Duration,
    pub verbose: bool,
}

impl Default for LoadTestConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8080/api/recommend".to_string(),
            concurrency: 10,
            delay: Duration::ZERO,
            verbose: false,
        }
    }
}

/// Outcome of one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestStat {
    pub duration: Duration,
    /// `None` when no response arrived.
    pub status: Option<u16>,
    pub error: Option<String>,
    pub recommendation: Option<String>,
    pub totals: Option<ScoreTriple>,
}

impl RequestStat {
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.status == Some(200)
    }
}

#[derive(Debug, Clone)]
pub struct LoadTestRun {
    /// In request order.
    pub stats: Vec<RequestStat>,
    pub elapsed: Duration,
}

impl LoadTestRun {
    pub fn requests_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.stats.len() as f64 / secs
        } else {
            0.0
        }
    }
}

/// Sends every request, at most `config.concurrency` at a time.
pub async fn run_load_test(
    client: &reqwest::Client,
    requests: Vec<LoadRequest>,
    config: &LoadTestConfig,
) -> LoadTestRun {
    let total = requests.len();
    let semaphore = Arc::new(Semaphore::new(config.concurrency.max(1)));
    let mut tasks = JoinSet::new();
    let started = Instant::now();

    for (index, request) in requests.into_iter().enumerate() {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };
        let client = client.clone();
        let url = config.url.clone();
        let delay = config.delay;

        tasks.spawn(async move {
            let stat = send_request(&client, &url, &request).await;
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            drop(permit);
            (index, stat)
        });
    }

    let mut stats = vec![RequestStat::default(); total];
    let mut done = 0;
    while let Some(joined) = tasks.join_next().await {
        let (index, stat) = match joined {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "load test task failed");
                continue;
            }
        };
        done += 1;
        if config.verbose {
            info!(
                request = index + 1,
                total,
                ms = stat.duration.as_millis() as u64,
                status = ?stat.status,
                recommendation = stat.recommendation.as_deref().unwrap_or("-"),
                "request finished"
            );
        } else if done % 10 == 0 || done == total {
            info!(done, total, "progress {:.1}%", done as f64 * 100.0 / total as f64);
        }
        stats[index] = stat;
    }

    LoadTestRun {
        stats,
        elapsed: started.elapsed(),
    }
}

async fn send_request(client: &reqwest::Client, url: &str, request: &LoadRequest) -> RequestStat {
    let started = Instant::now();
    let response = client.post(url).json(request).send().await;
    let mut stat = RequestStat {
        duration: started.elapsed(),
        ..RequestStat::default()
    };

    let response = match response {
        Ok(response) => response,
        Err(e) => {
            debug!(error = %e, "request failed");
            stat.error = Some(e.to_string());
            return stat;
        }
    };

    let status = response.status();
    stat.status = Some(status.as_u16());
    if !status.is_success() {
        return stat;
    }

    match response.json::<RecommendResponse>().await {
        Ok(body) => {
            stat.recommendation = Some(body.recommendation);
            stat.totals = Some(ScoreTriple::new(
                body.on_prem_total,
                body.private_total,
                body.public_total,
            ));
        }
        Err(e) => stat.error = Some(format!("invalid response body: {}", e)),
    }
    stat
}
