use std::time::Duration;

use crate::args::{Preset, Protocol};

const REST_TARGET: &str = "http://localhost:8080/v1/library/book";
const GRPC_TARGET: &str = "localhost:9090";

const REST_AUTHORS: [&str; 2] = [
    "1430e926-b935-4dd5-b0dc-07b0457149c6",
    "c57ebf06-004b-414e-9f06-76bb3000efc9",
];

const GRPC_AUTHORS: [&str; 1] = ["0404622f-aa36-481c-b64d-c93f87357ff5"];

const SOAK_AUTHORS: [&str; 5] = [
    "bd0768a8-6dea-4e78-936c-e4f6d44a94d3",
    "9671ee22-8ab3-4fd2-93f3-2e6e8eb8cbd8",
    "68ce72ad-5e25-4db0-a3ab-3840519ec31e",
    "6541a244-6b43-4d5e-8c12-913b27eebf4e",
    "9f4d696d-daad-4e9a-95b5-9051c5791858",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PresetValues {
    pub(crate) protocol: Protocol,
    pub(crate) url: &'static str,
    pub(crate) vus: u64,
    pub(crate) duration: Duration,
    pub(crate) author_ids: &'static [&'static str],
}

#[must_use]
pub(crate) const fn preset_values(preset: Preset) -> PresetValues {
    match preset {
        Preset::Rest => PresetValues {
            protocol: Protocol::Http,
            url: REST_TARGET,
            vus: 100,
            duration: Duration::from_secs(2),
            author_ids: &REST_AUTHORS,
        },
        Preset::Grpc => PresetValues {
            protocol: Protocol::Grpc,
            url: GRPC_TARGET,
            vus: 100,
            duration: Duration::from_secs(2),
            author_ids: &GRPC_AUTHORS,
        },
        Preset::Soak => PresetValues {
            protocol: Protocol::Http,
            url: REST_TARGET,
            vus: 300,
            duration: Duration::from_secs(10),
            author_ids: &SOAK_AUTHORS,
        },
    }
}
