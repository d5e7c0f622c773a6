//! Core run types shared by the loader, scheduler, and executor.
mod payload;
mod run;

pub use payload::BookPayload;
pub use run::{
    CheckResult, Iteration, LoadProfile, MAX_VIRTUAL_USERS, ProtocolKind, RampStrategy,
};
