use clap::ArgMatches;
use clap::parser::ValueSource;
use tracing::debug;

use crate::args::{Preset, TesterArgs};
use crate::error::ConfigError;

use super::presets::preset_values;
use super::types::{ConfigFile, DurationValue};

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn duration_field(
    value: &DurationValue,
    field: &'static str,
) -> Result<std::time::Duration, ConfigError> {
    value
        .to_duration()
        .map_err(|source| ConfigError::InvalidDuration { field, source })
}

fn delay_field(
    value: &DurationValue,
    field: &'static str,
) -> Result<std::time::Duration, ConfigError> {
    value
        .to_delay()
        .map_err(|source| ConfigError::InvalidDuration { field, source })
}

/// Fills every argument the user did not pass explicitly from a built-in
/// preset.
pub fn apply_preset(args: &mut TesterArgs, matches: &ArgMatches, preset: Preset) {
    let values = preset_values(preset);
    debug!("Applying preset '{}'", preset.as_str());

    if !is_cli(matches, "protocol") {
        args.protocol = values.protocol;
    }
    if !is_cli(matches, "url") {
        args.url = Some(values.url.to_owned());
    }
    if !is_cli(matches, "vus") {
        args.vus = values.vus;
    }
    if !is_cli(matches, "duration") {
        args.duration = values.duration;
    }
    if !is_cli(matches, "author_ids") {
        args.author_ids = values
            .author_ids
            .iter()
            .map(|id| (*id).to_owned())
            .collect();
    }
}

/// Applies configuration values to CLI arguments. Values passed on the
/// command line always win.
///
/// # Errors
///
/// Returns an error when a config duration is malformed.
pub fn apply_config(
    args: &mut TesterArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> Result<(), ConfigError> {
    if !is_cli(matches, "protocol")
        && let Some(protocol) = config.protocol
    {
        args.protocol = protocol;
    }

    if !is_cli(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = Some(url);
    }

    if !is_cli(matches, "vus")
        && let Some(vus) = config.vus
    {
        args.vus = vus;
    }

    if !is_cli(matches, "duration")
        && let Some(duration) = config.duration.as_ref()
    {
        args.duration = duration_field(duration, "duration")?;
    }

    if !is_cli(matches, "ramp_up")
        && let Some(ramp_up) = config.ramp_up.as_ref()
    {
        args.ramp_up = Some(duration_field(ramp_up, "ramp_up")?);
    }

    if !is_cli(matches, "author_ids")
        && let Some(author_ids) = config.author_ids.clone()
    {
        args.author_ids = author_ids;
    }

    if !is_cli(matches, "name_template")
        && let Some(template) = config.name_template.clone()
    {
        args.name_template = template;
    }

    if !is_cli(matches, "success_statuses")
        && let Some(statuses) = config.success_statuses.clone()
    {
        args.success_statuses = statuses;
    }

    if !is_cli(matches, "think_time")
        && let Some(think_time) = config.think_time.as_ref()
    {
        args.think_time = delay_field(think_time, "think_time")?;
    }

    if !is_cli(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = duration_field(timeout, "timeout")?;
    }

    if !is_cli(matches, "connect_timeout")
        && let Some(timeout) = config.connect_timeout.as_ref()
    {
        args.connect_timeout = duration_field(timeout, "connect_timeout")?;
    }

    if !is_cli(matches, "retries")
        && let Some(retries) = config.retries
    {
        args.retries = retries;
    }

    if !is_cli(matches, "grace_period")
        && let Some(grace) = config.grace_period.as_ref()
    {
        args.grace_period = delay_field(grace, "grace_period")?;
    }

    if !is_cli(matches, "seed")
        && let Some(seed) = config.seed
    {
        args.seed = Some(seed);
    }

    if !is_cli(matches, "summary_json")
        && let Some(path) = config.summary_json.clone()
    {
        args.summary_json = Some(path);
    }

    if !is_cli(matches, "fail_on_check")
        && let Some(fail_on_check) = config.fail_on_check
    {
        args.fail_on_check = fail_on_check;
    }

    Ok(())
}
