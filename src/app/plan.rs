use crate::scheduler::SchedulerConfig;
use crate::transport::TransportConfig;
use crate::workload::{ExecutorSettings, RequestTemplate};

/// Where the finished run is reported.
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    pub summary_json: Option<String>,
    pub fail_on_check: bool,
}

/// Fully validated inputs for one run. Nothing in here is re-checked once the
/// run starts.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub transport: TransportConfig,
    pub template: RequestTemplate,
    pub executor: ExecutorSettings,
    pub scheduler: SchedulerConfig,
    pub output: OutputOptions,
}
