use clap::ArgMatches;
use tracing::{debug, info, warn};

use crate::app::{OutputOptions, RunPlan, print_summary, run_local, write_summary_json};
use crate::args::TesterArgs;
use crate::config::{apply_config, apply_preset, load_config, load_profile};
use crate::domain::ProtocolKind;
use crate::error::{AppError, AppResult, ConfigError};
use crate::scheduler::SchedulerConfig;
use crate::shutdown::shutdown_channel;
use crate::shutdown_handlers::setup_signal_shutdown_handler;
use crate::transport::{TransportConfig, build_transport};
use crate::workload::{
    ExecutorSettings, ParameterPool, RETRY_BACKOFF, RequestTemplate, SuccessStatuses,
};

/// Merges preset, config file, and command line, then validates everything
/// a run needs. Nothing touches the network here.
///
/// # Errors
///
/// Returns a configuration error for the first invalid setting.
pub(crate) fn build_plan(mut args: TesterArgs, matches: &ArgMatches) -> AppResult<RunPlan> {
    let config = load_config(args.config.as_deref())?;

    let preset = args
        .preset
        .or_else(|| config.as_ref().and_then(|config| config.preset));
    if let Some(preset) = preset {
        apply_preset(&mut args, matches, preset);
    }
    if let Some(config) = config.as_ref() {
        apply_config(&mut args, matches, config)?;
    }

    let profile = load_profile(&args)?;
    let protocol = ProtocolKind::from(args.protocol);

    let Some(target) = args.url.clone() else {
        return Err(AppError::config(ConfigError::MissingTarget));
    };
    let transport = TransportConfig {
        protocol,
        target,
        request_timeout: args.request_timeout,
        connect_timeout: args.connect_timeout,
    };
    transport.validate()?;

    let pool = ParameterPool::new(args.author_ids.iter().cloned())?;
    debug!(
        "Author pool ({}): {}",
        pool.size(),
        pool.iter().collect::<Vec<_>>().join(", ")
    );
    let template = RequestTemplate::new(args.name_template.clone(), pool)?;
    let success = SuccessStatuses::new(protocol, &args.success_statuses)?;

    if args.think_time.is_zero() {
        warn!("Think time is zero; virtual users will send back-to-back requests.");
    }

    Ok(RunPlan {
        transport,
        template,
        executor: ExecutorSettings {
            success,
            retries: args.retries,
            think_time: args.think_time,
            retry_backoff: RETRY_BACKOFF,
        },
        scheduler: SchedulerConfig {
            profile,
            grace_period: args.grace_period,
            seed: args.seed,
            preflight: !args.no_preflight,
        },
        output: OutputOptions {
            summary_json: args.summary_json,
            fail_on_check: args.fail_on_check,
        },
    })
}

/// Builds the transport, runs the plan, and reports the summary.
///
/// # Errors
///
/// Returns an error when the transport cannot be built, the preflight fails,
/// the summary cannot be written, or `fail_on_check` is set and a check
/// failed.
pub(crate) async fn execute_plan(plan: RunPlan) -> AppResult<()> {
    let transport = build_transport(&plan.transport)?;
    let (shutdown_tx, _shutdown_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let outcome = run_local(&plan, transport, &shutdown_tx, false).await;
    drop(shutdown_tx.send(()));
    if let Err(err) = signal_handle.await {
        warn!("Signal handler task failed: {}", err);
    }
    let outcome = outcome?;
    let summary = outcome.summary;

    print_summary(&summary);

    if let Some(path) = plan.output.summary_json.as_deref() {
        write_summary_json(path, &summary).await?;
        info!("Summary written to {}", path);
    }

    if plan.output.fail_on_check && summary.failed_checks > 0 {
        return Err(AppError::ChecksFailed {
            failed: summary.failed_checks,
            total: summary.total_checks,
        });
    }
    Ok(())
}
