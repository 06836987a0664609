//! CLI command implementations
//!
//! All functions return `CliResult<ExitCode>` instead of calling `process::exit`.

use std::fs;
use std::path::{Path, PathBuf};

use pytest_discovery_core::fully_qualified_name_from_id;

use super::{CliError, CliResult, ExitCode};
use crate::discovery::{ConsoleSink, DiscoveryBatch, DiscoverySink, NullSink, load_report, normalize_batches};
use crate::settings::AdapterSettings;

/// Maximum discovery report size (100 MB)
///
/// Larger reports are rejected before they are read into memory.
const MAX_REPORT_SIZE: u64 = 100 * 1024 * 1024;

/// Check that a report exists and is within `MAX_REPORT_SIZE`.
fn check_report_size(path: &Path) -> CliResult<()> {
    let metadata = fs::metadata(path)
        .map_err(|e| CliError::failure(format!("Cannot access report '{}': {}", path.display(), e)))?;

    if metadata.len() > MAX_REPORT_SIZE {
        return Err(CliError::failure(format!(
            "Discovery report '{}' is too large ({} bytes, max {} bytes)",
            path.display(),
            metadata.len(),
            MAX_REPORT_SIZE
        )));
    }
    Ok(())
}

/// Load every report, keeping batch order across files.
pub fn load_reports(reports: &[PathBuf]) -> CliResult<Vec<DiscoveryBatch>> {
    let mut batches = Vec::new();
    for path in reports {
        check_report_size(path)?;
        let loaded = load_report(path).map_err(|e| CliError::failure(format!("Error: {}", e)))?;
        batches.extend(loaded);
    }
    Ok(batches)
}

/// Normalize the given reports and print the resulting test cases.
///
/// Text output streams one line per record as it is produced; `--json` prints the full list at the end.
pub fn discover(reports: &[PathBuf], settings: &AdapterSettings, json: bool, verbose: bool) -> CliResult<ExitCode> {
    let batches = load_reports(reports)?;

    let mut console = ConsoleSink::new(verbose);
    let mut silent = NullSink;
    let sink: &mut dyn DiscoverySink = if json { &mut silent } else { &mut console };

    let Some(output) = normalize_batches(&batches, settings, sink).into_output() else {
        return Err(CliError::failure("No discovery results found in the given report(s)"));
    };

    if json {
        let rendered = serde_json::to_string_pretty(&output.test_cases)
            .map_err(|e| CliError::failure(format!("Error serializing test cases: {}", e)))?;
        println!("{}", rendered);
    }

    if output.test_cases.is_empty() {
        // "no tests collected" is not a failure
        eprintln!("No tests collected");
    }
    if !output.failures.is_empty() {
        eprintln!("\x1b[33m{} test(s) could not be parsed and were skipped\x1b[0m", output.failures.len());
    }

    Ok(ExitCode::SUCCESS)
}

/// Print the fully qualified name for a runner id (debug).
pub fn print_fully_qualified_name(id: &str) -> CliResult<ExitCode> {
    if id.trim().is_empty() {
        return Err(CliError::failure("Error: --fqn requires a non-empty runner id"));
    }
    println!("{}", fully_qualified_name_from_id(id));
    Ok(ExitCode::SUCCESS)
}
