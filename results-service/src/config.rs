use std::path::{Path, PathBuf};

use tracing::warn;

use crate::records::{StudyResult, SusSubmission};
use crate::store::RowStore;

pub const STUDY_RESULTS_FILE: &str = "study_results.csv";
pub const SUS_RESPONSES_FILE: &str = "sus_responses.csv";

#[derive(Debug, Clone)]
pub struct AppState {
    pub results: RowStore<StudyResult>,
    pub sus: RowStore<SusSubmission>,
}

impl AppState {
    pub fn new(data_dir: &Path) -> Self {
        AppState {
            results: RowStore::new(data_dir.join(STUDY_RESULTS_FILE)),
            sus: RowStore::new(data_dir.join(SUS_RESPONSES_FILE)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnvVars {
    pub data_dir: PathBuf,
    pub port: u16,
    pub request_body_size_limit: usize,
    pub request_timeout_in_ms: u64,
}

impl EnvVars {
    pub fn new() -> Self {
        let data_dir = match std::env::var("DATA_DIR") {
            Ok(s) if !s.is_empty() => PathBuf::from(s),
            _ => {
                warn!("DATA_DIR not set. Defaulting to current directory");
                PathBuf::from(".")
            }
        };

        let port = match std::env::var("PORT") {
            Ok(port_string) => port_string.parse().expect("PORT to be parseable as u16"),
            Err(_e) => {
                let default_port = 8080;
                warn!("PORT not set. Defaulting to {default_port}");
                default_port
            }
        };

        let request_timeout_in_ms = match std::env::var("REQUEST_TIMEOUT_IN_MS") {
            Ok(s) => s
                .parse()
                .expect("REQUEST_TIMEOUT_IN_MS to be valid unsigned integer"),
            Err(_e) => {
                let default_request_timeout = 30_000;
                warn!("REQUEST_TIMEOUT_IN_MS not set. Defaulting to {default_request_timeout}");
                default_request_timeout
            }
        };

        let request_body_size_limit = match std::env::var("REQUEST_BODY_SIZE_LIMIT") {
            Ok(s) => s
                .parse()
                .expect("REQUEST_BODY_SIZE_LIMIT to be valid unsigned integer"),
            Err(_e) => {
                let default_request_body_size_limit = 1024 * 1024;
                warn!(
                    "REQUEST_BODY_SIZE_LIMIT not set. Defaulting to {default_request_body_size_limit}"
                );
                default_request_body_size_limit
            }
        };

        EnvVars {
            data_dir,
            port,
            request_body_size_limit,
            request_timeout_in_ms,
        }
    }
}
