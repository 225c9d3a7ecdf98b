use dns_sentinel_infrastructure::CheckResult;
use std::fs;
use std::path::{Path, PathBuf};

/// Write the error-report artifact for a failing check, creating the target
/// directory if needed. The filename is keyed by check name and timestamp.
pub fn write_error_report(result: &CheckResult, directory: &str) -> std::io::Result<PathBuf> {
    fs::create_dir_all(directory)?;

    let filename = format!(
        "{}-{}-error.report",
        result.name,
        result.timestamp.timestamp_nanos_opt().unwrap_or_default()
    );
    let path = Path::new(directory).join(filename);

    fs::write(&path, result.render_report())?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dns_sentinel_domain::{CheckConfig, ProbeError};
    use dns_sentinel_infrastructure::compile;
    use std::collections::BTreeMap;
    use std::time::Duration;

    fn sample_result() -> CheckResult {
        let config: CheckConfig = toml::from_str(
            r#"
            resolver = "192.0.2.1:53"
            resolve = "example.com"
            expect = { answer_section = ["example.com. 300 IN A 93.184.216.34"] }
            "#,
        )
        .unwrap();

        let mut configs = BTreeMap::new();
        configs.insert("sample".to_string(), config);
        let checks = compile(&configs).unwrap();

        CheckResult::failed(
            "sample".to_string(),
            chrono::Utc::now(),
            Duration::from_millis(12),
            ProbeError::TransportTimeout {
                server: "192.0.2.1:53".to_string(),
            },
            None,
            checks["sample"].clone(),
        )
    }

    #[test]
    fn writes_report_file_keyed_by_name_and_timestamp() {
        let result = sample_result();
        let dir = tempfile::tempdir().unwrap();
        let dir_path = dir.path().join("reports");

        let path = write_error_report(&result, dir_path.to_str().unwrap()).unwrap();

        let filename = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(filename.starts_with("sample-"));
        assert!(filename.ends_with("-error.report"));

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("--- Metadata:"));
        assert!(contents.contains("Transport timeout"));
        assert!(contents.contains("<no response>"));
        assert!(contents.contains("example.com. 300 IN A 93.184.216.34"));
    }
}
