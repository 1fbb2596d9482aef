//! Shared helpers for batch scenarios.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use ipamr_common::config::RunConfig;
use ipamr_core::pipeline;
use ipamr_core::report::RunReport;
use ipamr_core::segment::SegmentRules;
use ipamr_io::csv::CsvSource;
use ipamr_io::sqlite::SqliteStore;

pub const HEADER: &str =
    "ifIP,host_name,ifName,ifDescr,ifType,domain,vendor,model,ifAdminStatus,ifOperStatus";

/// Write a full export file: the contract header plus the given data
/// lines, one comma-separated row each.
pub fn write_export(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp export");
    writeln!(file, "{HEADER}").unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file.flush().unwrap();
    file
}

/// Run one batch with the stock rules and default configuration.
pub fn run_import(path: &Path, store: &mut SqliteStore) -> anyhow::Result<RunReport> {
    run_import_with(path, store, &RunConfig::default())
}

pub fn run_import_with(
    path: &Path,
    store: &mut SqliteStore,
    cfg: &RunConfig,
) -> anyhow::Result<RunReport> {
    let source = CsvSource::open(path)?;
    let rules = SegmentRules::standard();
    Ok(pipeline::run(source.records(), store, &rules, cfg, |_| {}))
}
