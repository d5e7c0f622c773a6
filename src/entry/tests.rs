use std::ffi::OsString;
use std::time::Duration;

use clap::{CommandFactory, FromArgMatches};
use tempfile::tempdir;

use super::{build_plan, should_show_help};
use crate::app::RunPlan;
use crate::args::TesterArgs;
use crate::domain::{ProtocolKind, RampStrategy};
use crate::error::{AppError, AppResult, ConfigError};

fn plan_from(args: &[&str]) -> AppResult<RunPlan> {
    let mut argv = vec!["library-tank"];
    argv.extend_from_slice(args);
    let matches = TesterArgs::command().try_get_matches_from(argv)?;
    let parsed = TesterArgs::from_arg_matches(&matches)?;
    build_plan(parsed, &matches)
}

#[test]
fn rest_preset_builds_a_complete_plan() -> AppResult<()> {
    let plan = plan_from(&["--preset", "rest"])?;
    let profile = plan.scheduler.profile;
    if profile.virtual_users() != 100 || profile.duration() != Duration::from_secs(2) {
        return Err(AppError::validation(format!("Unexpected profile: {:?}", profile)));
    }
    if plan.transport.protocol != ProtocolKind::Http
        || plan.transport.target != "http://localhost:8080/v1/library/book"
    {
        return Err(AppError::validation(format!(
            "Unexpected transport: {:?}",
            plan.transport
        )));
    }
    if plan.template.pool().size() != 2 || !plan.scheduler.preflight {
        return Err(AppError::validation("Unexpected pool or preflight"));
    }
    if plan.executor.retries != 3 || plan.executor.think_time != Duration::from_millis(100) {
        return Err(AppError::validation("Unexpected executor defaults"));
    }
    Ok(())
}

#[test]
fn grpc_preset_defaults_to_ok_check() -> AppResult<()> {
    let plan = plan_from(&["--preset", "grpc", "--vus", "5", "--no-preflight"])?;
    if plan.transport.protocol != ProtocolKind::Grpc || plan.scheduler.profile.virtual_users() != 5
    {
        return Err(AppError::validation("Unexpected grpc plan"));
    }
    if plan.executor.success.label() != "status is OK" || plan.scheduler.preflight {
        return Err(AppError::validation("Unexpected grpc check settings"));
    }
    Ok(())
}

#[test]
fn config_file_feeds_the_plan() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("tank.toml");
    std::fs::write(
        &path,
        r#"
preset = "soak"
duration = "20s"
ramp_up = "5s"
seed = 11
"#,
    )?;
    let path_str = path.to_string_lossy().into_owned();
    let plan = plan_from(&["--config", path_str.as_str(), "--vus", "12"])?;

    let profile = plan.scheduler.profile;
    let expected_ramp = RampStrategy::Ramping {
        ramp_up: Duration::from_secs(5),
    };
    if profile.virtual_users() != 12
        || profile.duration() != Duration::from_secs(20)
        || profile.ramp() != expected_ramp
    {
        return Err(AppError::validation(format!("Unexpected profile: {:?}", profile)));
    }
    if plan.template.pool().size() != 5 || plan.scheduler.seed != Some(11) {
        return Err(AppError::validation("Preset pool or seed missing"));
    }
    Ok(())
}

#[test]
fn missing_target_is_a_config_error() -> AppResult<()> {
    match plan_from(&["--author-id", "a1"]) {
        Err(AppError::Config(ConfigError::MissingTarget)) => Ok(()),
        other => Err(AppError::validation(format!(
            "Expected missing target, got {:?}",
            other.map(|plan| plan.transport)
        ))),
    }
}

#[test]
fn missing_authors_is_a_config_error() -> AppResult<()> {
    match plan_from(&["--url", "http://localhost:8080/v1/library/book"]) {
        Err(AppError::Config(ConfigError::EmptyAuthorPool)) => Ok(()),
        other => Err(AppError::validation(format!(
            "Expected empty pool, got {:?}",
            other.map(|plan| plan.transport)
        ))),
    }
}

#[test]
fn zero_virtual_users_is_a_config_error() -> AppResult<()> {
    match plan_from(&["--preset", "rest", "--vus", "0"]) {
        Err(AppError::Config(ConfigError::VirtualUsersTooSmall { value: 0 })) => Ok(()),
        other => Err(AppError::validation(format!(
            "Expected vus error, got {:?}",
            other.map(|plan| plan.transport)
        ))),
    }
}

#[test]
fn ramp_longer_than_run_is_a_config_error() -> AppResult<()> {
    match plan_from(&["--preset", "rest", "--ramp-up", "5s"]) {
        Err(AppError::Config(ConfigError::RampLongerThanDuration { .. })) => Ok(()),
        other => Err(AppError::validation(format!(
            "Expected ramp error, got {:?}",
            other.map(|plan| plan.transport)
        ))),
    }
}

#[test]
fn explicit_arguments_skip_help() -> Result<(), String> {
    let args = vec![OsString::from("library-tank"), OsString::from("--preset")];
    if should_show_help(&args) {
        return Err("Help should only show for a bare invocation".to_owned());
    }
    Ok(())
}
