use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Checked before `RUST_LOG`.
const LOG_ENV: &str = "TANK_LOG";
const FALLBACK_ENV: &str = "RUST_LOG";

/// Picks the filter directive: `TANK_LOG`, then `RUST_LOG`, then the
/// verbosity default. Blank values are skipped.
fn filter_directive(tank_log: Option<String>, rust_log: Option<String>, verbose: bool) -> String {
    tank_log
        .into_iter()
        .chain(rust_log)
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| if verbose { "debug" } else { "info" }.to_owned())
}

pub fn init_logging(verbose: bool, no_color: bool) {
    let directive = filter_directive(
        std::env::var(LOG_ENV).ok(),
        std::env::var(FALLBACK_ENV).ok(),
        verbose,
    );
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|err| {
        eprintln!("Ignoring log filter '{}': {}", directive, err);
        EnvFilter::new("info")
    });

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(!no_color)
        .with_target(false)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tank_log_wins_over_rust_log() -> Result<(), String> {
        let directive = filter_directive(
            Some("library_tank=trace".to_owned()),
            Some("warn".to_owned()),
            false,
        );
        if directive != "library_tank=trace" {
            return Err(format!("Unexpected directive: {}", directive));
        }
        Ok(())
    }

    #[test]
    fn blank_values_fall_through_to_verbosity() -> Result<(), String> {
        let directive = filter_directive(Some("  ".to_owned()), None, true);
        if directive != "debug" {
            return Err(format!("Unexpected directive: {}", directive));
        }
        let directive = filter_directive(None, Some("warn".to_owned()), true);
        if directive != "warn" {
            return Err(format!("Unexpected directive: {}", directive));
        }
        Ok(())
    }

    #[test]
    fn init_logging_is_idempotent() {
        init_logging(false, true);
        init_logging(true, true);
    }
}
