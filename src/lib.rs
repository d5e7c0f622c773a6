//! Core library for the `library-tank` CLI.
//!
//! `library-tank` drives synthetic book-creation traffic against the library
//! service. A run is described by a load profile (virtual users, duration,
//! ramp), a request template with a fixed author pool, and a transport (REST
//! or gRPC). Virtual users loop over the request executor until the run ends
//! and every iteration produces one pass/fail check.
pub mod app;
pub mod args;
pub mod config;
pub mod domain;
pub mod entry;
pub mod error;
pub mod scheduler;
pub mod shutdown;
pub mod shutdown_handlers;
pub mod sink;
pub mod transport;
pub mod workload;

mod system;
