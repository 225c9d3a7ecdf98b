use serde::{Deserialize, Serialize};

/// Where to write error-report artifacts for failing checks.
///
/// When no directory is configured, failing checks only show up in the
/// summary output.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ReportsConfig {
    #[serde(default)]
    pub directory: Option<String>,
}
