mod plan;
mod report;
mod runner;


pub use plan::{OutputOptions, RunPlan};
pub use report::{print_summary, summary_lines, write_summary_json};
pub use runner::{RunOutcome, run_local};
