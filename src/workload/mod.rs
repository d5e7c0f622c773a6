//! Request building and per-iteration execution.
mod check;
mod executor;
mod pool;
mod template;


pub use check::SuccessStatuses;
pub use executor::{ExecutorSettings, RequestExecutor};
pub use pool::ParameterPool;
pub use template::RequestTemplate;

pub(crate) use executor::RETRY_BACKOFF;
