use tokio::io::AsyncWriteExt;

use crate::sink::{RunSummary, TRANSPORT_ERROR_KEY};

/// Divisor for values scaled by 100.
const PERCENT_DIVISOR: u64 = 100;

#[must_use]
pub fn summary_lines(summary: &RunSummary) -> Vec<String> {
    let pass_rate = summary.pass_rate_x100();
    let rps = summary.avg_rps_x100();
    let mut lines = vec![
        format!("Target: {} ({})", summary.target, summary.protocol.as_str()),
        format!(
            "Virtual Users: {} (peak active {})",
            summary.virtual_users, summary.peak_active_vus
        ),
        format!("Duration: {}ms", summary.elapsed_ms),
        format!("Iterations: {}", summary.total_checks),
        format!(
            "Checks Passed: {} ({}.{:02}%)",
            summary.passed_checks,
            pass_rate / PERCENT_DIVISOR,
            pass_rate % PERCENT_DIVISOR
        ),
        format!("Checks Failed: {}", summary.failed_checks),
        format!("Transport Errors: {}", summary.transport_errors),
        format!("Retried Requests: {}", summary.retried_requests),
        format!("Data Received: {} bytes", summary.received_bytes),
        format!(
            "Avg Iterations/s: {}.{:02}",
            rps / PERCENT_DIVISOR,
            rps % PERCENT_DIVISOR
        ),
        format!("Avg Latency: {}ms", summary.avg_latency_ms),
        format!(
            "Min/Max Latency: {}ms / {}ms",
            summary.min_latency_ms, summary.max_latency_ms
        ),
        format!(
            "P50/P90/P99 Latency: {}ms / {}ms / {}ms",
            summary.p50_latency_ms, summary.p90_latency_ms, summary.p99_latency_ms
        ),
    ];
    if summary.abandoned_vus > 0 {
        lines.push(format!("Abandoned VUs: {}", summary.abandoned_vus));
    }
    for (label, counts) in &summary.checks {
        lines.push(format!(
            "Check '{}': {} passed / {} failed",
            label, counts.passed, counts.failed
        ));
    }
    for (status, count) in &summary.statuses {
        if status == TRANSPORT_ERROR_KEY {
            lines.push(format!("Status (no response): {}", count));
        } else {
            lines.push(format!("Status {}: {}", status, count));
        }
    }
    lines
}

pub fn print_summary(summary: &RunSummary) {
    for line in summary_lines(summary) {
        println!("{}", line);
    }
}

/// Writes the summary as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error when serialization or the file write fails.
pub async fn write_summary_json(path: &str, summary: &RunSummary) -> Result<(), std::io::Error> {
    let body = serde_json::to_vec_pretty(summary).map_err(std::io::Error::other)?;
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(&body).await?;
    file.write_all(b"\n").await?;
    file.flush().await?;
    Ok(())
}
