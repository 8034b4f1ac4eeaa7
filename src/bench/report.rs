//! Statistics over a finished run.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;
use std::time::Duration;

use serde::Serialize;

use super::runner::RequestStat;

/// Per-request line in the saved results.
#[derive(Debug, Clone, Serialize)]
pub struct RequestRecord {
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_prem_total: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_total: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_total: Option<i32>,
}

impl From<&RequestStat> for RequestRecord {
    fn from(stat: &RequestStat) -> Self {
        Self {
            duration_ms: millis(stat.duration),
            status_code: stat.status,
            error: stat.error.clone(),
            recommendation: stat.recommendation.clone(),
            on_prem_total: stat.totals.map(|t| t.on_prem),
            private_total: stat.totals.map(|t| t.private),
            public_total: stat.totals.map(|t| t.public),
        }
    }
}

/// Aggregate statistics. Latencies cover successful requests only.
#[derive(Debug, Clone, Serialize)]
pub struct LoadTestReport {
    pub total_requests: usize,
    pub successful_requests: usize,
    pub error_requests: usize,
    pub min_time_ms: u64,
    pub max_time_ms: u64,
    pub avg_time_ms: u64,
    pub median_time_ms: u64,
    pub p95_time_ms: u64,
    pub recommendations: BTreeMap<String, usize>,
    pub detailed_stats: Vec<RequestRecord>,
}

impl LoadTestReport {
    pub fn from_stats(stats: &[RequestStat]) -> Self {
        let mut durations: Vec<Duration> = Vec::with_capacity(stats.len());
        let mut recommendations = BTreeMap::new();

        for stat in stats.iter().filter(|s| s.is_success()) {
            durations.push(stat.duration);
            if let Some(ref recommendation) = stat.recommendation {
                *recommendations.entry(recommendation.clone()).or_insert(0) += 1;
            }
        }
        durations.sort();

        let successful = durations.len();
        let (min, max, avg, median, p95) = if durations.is_empty() {
            (0, 0, 0, 0, 0)
        } else {
            let sum: Duration = durations.iter().sum();
            let p95_index = ((successful as f64 * 0.95) as usize).min(successful - 1);
            (
                millis(durations[0]),
                millis(durations[successful - 1]),
                millis(sum / successful as u32),
                millis(durations[successful / 2]),
                millis(durations[p95_index]),
            )
        };

        Self {
            total_requests: stats.len(),
            successful_requests: successful,
            error_requests: stats.len() - successful,
            min_time_ms: min,
            max_time_ms: max,
            avg_time_ms: avg,
            median_time_ms: median,
            p95_time_ms: p95,
            recommendations,
            detailed_stats: stats.iter().map(RequestRecord::from).collect(),
        }
    }

    /// Human-readable summary.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.total_requests == 0 {
            out.push_str("Нет данных для анализа\n");
            return out;
        }

        if self.successful_requests > 0 {
            let _ = writeln!(out, "Статистика времени ответа:");
            let _ = writeln!(out, "  Минимум: {} мс", self.min_time_ms);
            let _ = writeln!(out, "  Среднее: {} мс", self.avg_time_ms);
            let _ = writeln!(out, "  Медиана: {} мс", self.median_time_ms);
            let _ = writeln!(out, "  95-й перцентиль: {} мс", self.p95_time_ms);
            let _ = writeln!(out, "  Максимум: {} мс", self.max_time_ms);
            out.push('\n');
        }

        let _ = writeln!(
            out,
            "Успешных запросов: {} ({:.1}%)",
            self.successful_requests,
            percent(self.successful_requests, self.total_requests)
        );
        if self.error_requests > 0 {
            let _ = writeln!(
                out,
                "Ошибок: {} ({:.1}%)",
                self.error_requests,
                percent(self.error_requests, self.total_requests)
            );
        }

        let _ = writeln!(out, "\nРаспределение рекомендаций:");
        for (recommendation, count) in &self.recommendations {
            let _ = writeln!(
                out,
                "  {}: {} ({:.1}%)",
                recommendation,
                count,
                percent(*count, self.successful_requests)
            );
        }
        out
    }

    /// Writes the report as pretty JSON.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }
}

fn millis(duration: Duration) -> u64 {
    duration.as_millis() as u64
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}
