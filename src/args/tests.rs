use std::time::Duration;

use clap::Parser;

use super::defaults::{DEFAULT_NAME_TEMPLATE, DEFAULT_RETRIES};
use super::parsers::{parse_bool_env, parse_delay_arg, parse_duration_arg, parse_status_code};
use super::{Preset, Protocol, TesterArgs};
use crate::error::{AppError, AppResult, ValidationError};

fn parse(args: &[&str]) -> AppResult<TesterArgs> {
    let mut argv = vec!["library-tank"];
    argv.extend_from_slice(args);
    Ok(TesterArgs::try_parse_from(argv)?)
}

#[test]
fn defaults_match_the_tank_scripts() -> AppResult<()> {
    let args = parse(&["--url", "http://localhost:8080/v1/library/book"])?;
    if args.protocol != Protocol::Http || args.vus != 1 {
        return Err(AppError::validation("Unexpected protocol or vus default"));
    }
    if args.think_time != Duration::from_millis(100) {
        return Err(AppError::validation(format!(
            "Unexpected think time: {:?}",
            args.think_time
        )));
    }
    if args.name_template != DEFAULT_NAME_TEMPLATE || args.retries != DEFAULT_RETRIES {
        return Err(AppError::validation("Unexpected template or retries"));
    }
    if args.grace_period != Duration::from_secs(2) || args.duration != Duration::from_secs(10) {
        return Err(AppError::validation("Unexpected duration defaults"));
    }
    if !args.author_ids.is_empty() || !args.success_statuses.is_empty() {
        return Err(AppError::validation("Expected empty pool and status lists"));
    }
    Ok(())
}

#[test]
fn author_ids_accept_commas_and_repeats() -> AppResult<()> {
    let args = parse(&["-a", "a1,a2", "--author-id", " a3 "])?;
    if args.author_ids != vec!["a1".to_owned(), "a2".to_owned(), "a3".to_owned()] {
        return Err(AppError::validation(format!(
            "Unexpected author ids: {:?}",
            args.author_ids
        )));
    }
    Ok(())
}

#[test]
fn blank_author_id_is_rejected() -> AppResult<()> {
    match parse(&["--author-id", "  "]) {
        Err(AppError::Clap { .. }) => Ok(()),
        other => Err(AppError::validation(format!(
            "Expected clap error, got {:?}",
            other.map(|args| args.author_ids)
        ))),
    }
}

#[test]
fn preset_and_protocol_are_case_insensitive() -> AppResult<()> {
    let args = parse(&["--preset", "SOAK", "--protocol", "GRPC"])?;
    if args.preset != Some(Preset::Soak) || args.protocol != Protocol::Grpc {
        return Err(AppError::validation("Unexpected preset or protocol"));
    }
    Ok(())
}

#[test]
fn zero_duration_is_rejected_on_the_command_line() -> AppResult<()> {
    match parse(&["--duration", "0s"]) {
        Err(AppError::Clap { .. }) => Ok(()),
        other => Err(AppError::validation(format!(
            "Expected clap error, got {:?}",
            other.map(|args| args.duration)
        ))),
    }
}

#[test]
fn zero_think_time_is_allowed() -> AppResult<()> {
    let args = parse(&["--think-time", "0"])?;
    if !args.think_time.is_zero() {
        return Err(AppError::validation("Expected zero think time"));
    }
    Ok(())
}

#[test]
fn success_statuses_parse_as_list() -> AppResult<()> {
    let args = parse(&["--success-status", "200,202"])?;
    if args.success_statuses != vec![200, 202] {
        return Err(AppError::validation(format!(
            "Unexpected statuses: {:?}",
            args.success_statuses
        )));
    }
    Ok(())
}

#[test]
fn virtual_users_alias_is_accepted() -> AppResult<()> {
    let args = parse(&["--virtual-users", "25"])?;
    if args.vus != 25 {
        return Err(AppError::validation(format!("Unexpected vus: {}", args.vus)));
    }
    Ok(())
}

#[test]
fn parse_duration_units() -> Result<(), String> {
    let cases = [
        ("250ms", Duration::from_millis(250)),
        ("2", Duration::from_secs(2)),
        ("2s", Duration::from_secs(2)),
        ("3m", Duration::from_secs(180)),
        ("1h", Duration::from_secs(3_600)),
    ];
    for (input, expected) in cases {
        let parsed = parse_duration_arg(input).map_err(|err| err.to_string())?;
        if parsed != expected {
            return Err(format!("{} parsed as {:?}", input, parsed));
        }
    }
    Ok(())
}

#[test]
fn parse_duration_rejects_bad_input() -> Result<(), String> {
    match parse_duration_arg("0") {
        Err(ValidationError::DurationZero) => {}
        other => return Err(format!("Expected zero error, got {:?}", other)),
    }
    match parse_duration_arg("5d") {
        Err(ValidationError::InvalidDurationUnit { .. }) => {}
        other => return Err(format!("Expected unit error, got {:?}", other)),
    }
    match parse_duration_arg("ms") {
        Err(ValidationError::InvalidDurationFormat { .. }) => {}
        other => return Err(format!("Expected format error, got {:?}", other)),
    }
    match parse_delay_arg("") {
        Err(ValidationError::DurationEmpty) => Ok(()),
        other => Err(format!("Expected empty error, got {:?}", other)),
    }
}

#[test]
fn parse_status_code_rejects_out_of_range() -> Result<(), String> {
    match parse_status_code("70000") {
        Err(ValidationError::InvalidStatusCode { .. }) => Ok(()),
        other => Err(format!("Expected status error, got {:?}", other)),
    }
}

#[test]
fn parse_bool_env_accepts_common_spellings() -> AppResult<()> {
    for value in ["1", "true", "YES", "on"] {
        if !parse_bool_env(value)? {
            return Err(AppError::validation(format!("{} should be true", value)));
        }
    }
    for value in ["0", "false", "No", "off"] {
        if parse_bool_env(value)? {
            return Err(AppError::validation(format!("{} should be false", value)));
        }
    }
    if parse_bool_env("maybe").is_ok() {
        return Err(AppError::validation("Expected invalid boolean error"));
    }
    Ok(())
}
