use std::path::Path;

use anyhow::Context;
use tracing::{info, warn};

use ipamr_common::inventory::record::{CONTRACT_COLUMNS, COL_ADDRESS};
use ipamr_io::csv::CsvSource;

use crate::terminal::print;

/// Show the header row and a handful of sample rows, restricted to the
/// columns the pipeline actually recognizes.
pub fn inspect(file: &Path, rows: usize) -> anyhow::Result<()> {
    let source = CsvSource::open(file)
        .with_context(|| format!("cannot open export {}", file.display()))?;

    info!("{} ({} columns)", file.display(), source.headers().len());
    for (idx, header) in source.headers().iter().enumerate() {
        print::aligned_line(&format!("{:2}", idx + 1), header);
    }

    print::blank();
    print::header("sample rows");

    let mut shown = 0usize;
    for (idx, record) in source.records().take(rows).enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                warn!("row {}: {err:#}", idx + 1);
                continue;
            }
        };

        let name = record.get(COL_ADDRESS).unwrap_or("(no address)").to_string();
        print::tree_head(idx + 1, &name);

        let details: Vec<(String, String)> = CONTRACT_COLUMNS
            .iter()
            .filter_map(|column| {
                record
                    .get(column)
                    .filter(|value| !value.trim().is_empty() && value.trim() != "-")
                    .map(|value| (column.to_string(), value.to_string()))
            })
            .collect();
        print::as_tree_one_level(details);
        shown += 1;
        print::blank();
    }

    if shown == 0 {
        warn!("No readable rows in this export");
    }
    Ok(())
}
