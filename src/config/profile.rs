use crate::args::TesterArgs;
use crate::domain::{LoadProfile, RampStrategy};
use crate::error::ConfigError;

/// Turns the merged arguments into a validated [`LoadProfile`].
///
/// # Errors
///
/// Returns `ConfigError` when the virtual-user count is below one, the
/// duration is zero, or the ramp-up is longer than the run.
pub fn load_profile(args: &TesterArgs) -> Result<LoadProfile, ConfigError> {
    let ramp = match args.ramp_up {
        Some(ramp_up) => RampStrategy::Ramping { ramp_up },
        None => RampStrategy::Constant,
    };
    LoadProfile::new(args.vus, args.duration, ramp)
}
