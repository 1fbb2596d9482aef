use anyhow::Context;
use colored::*;
use tracing::{info, warn};

use ipamr_common::config::RunConfig;
use ipamr_core::pipeline;
use ipamr_core::report::RunReport;
use ipamr_core::segment::SegmentRules;
use ipamr_io::csv::CsvSource;
use ipamr_io::sqlite::SqliteStore;

use crate::commands::ImportArgs;
use crate::terminal::{print, progress, prompt};

pub fn import(args: ImportArgs) -> anyhow::Result<()> {
    let source = CsvSource::open(&args.file)
        .with_context(|| format!("cannot open export {}", args.file.display()))?;
    info!(
        "Loaded {} ({} columns)",
        args.file.display(),
        source.headers().len()
    );

    let mut store = SqliteStore::open(&args.db)
        .with_context(|| format!("cannot open inventory store {}", args.db.display()))?;

    if !args.keep {
        let confirmed = args.yes
            || prompt::confirm("Proceed with import? This will replace existing data.")?;
        if !confirmed {
            warn!("Import cancelled");
            return Ok(());
        }
        let removed = store.clear().context("clearing existing entries")?;
        info!("Cleared {removed} existing entries");
    }

    let limit = match args.limit {
        Some(limit) => Some(limit),
        None if args.yes => None,
        None => prompt::read_limit()?,
    };
    if let Some(limit) = limit {
        info!("Importing at most {limit} records");
    }

    let cfg = RunConfig {
        policy: args.policy,
        limit,
        ..RunConfig::default()
    };
    info!("Subnet inference policy: {}", cfg.policy.as_str());

    let rules = SegmentRules::standard();

    progress::start("Reconciling records...");
    let report = pipeline::run(
        source.records(),
        &mut store,
        &rules,
        &cfg,
        progress::report_batch_progress,
    );
    progress::finish();

    render_summary(&report);
    Ok(())
}

fn render_summary(report: &RunReport) {
    print::fat_separator();
    print::header("import summary");
    print::aligned_line("Processed", report.processed.to_string().bold());
    print::aligned_line("Inserted", report.inserted.to_string().green().bold());
    print::aligned_line("Updated", report.updated.to_string().green());
    print::aligned_line("Skipped", report.skipped().to_string().yellow().bold());
    for (label, count) in report.skip_breakdown() {
        if count > 0 {
            print::aligned_line(label, count.to_string().dimmed());
        }
    }
    print::aligned_line(
        "Success rate",
        format!("{:.1}%", report.write_rate() * 100.0).bold(),
    );
    print::end_of_program();
}
