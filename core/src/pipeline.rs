//! The reconciliation pipeline: one raw record in, one store write out.
//!
//! Records flow through strictly in order and independently of each
//! other; the only state shared between them is the tally. Every
//! per-record problem is absorbed here and surfaces only in the
//! [`RunReport`] — the run itself fails only before it starts, when the
//! caller cannot acquire the source or the store.

use std::net::Ipv4Addr;

use tracing::{debug, warn};

use ipamr_common::config::{InferencePolicy, RunConfig};
use ipamr_common::inventory::entry::InventoryEntry;
use ipamr_common::inventory::record::RawRecord;

use crate::address::{self, AddressClass};
use crate::describe::{self, Facets};
use crate::normalize::{self, NormalizedRow};
use crate::report::{RunReport, SkipReason};
use crate::segment::SegmentRules;
use crate::status;
use crate::subnet;

/// Per-entry result of the idempotent insert-or-update.
///
/// Failures are classified at the store boundary; the pipeline never
/// inspects error text to decide control flow. A uniqueness collision
/// the store resolves through its upsert path reports `Updated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Inserted,
    Updated,
    /// Rejected on a constraint other than the upsert key.
    ConflictSkipped,
    /// Any other store-level failure; logged by the store, the batch
    /// moves on.
    Failed,
}

/// The persistence seam. One entry at a time, keyed by address.
pub trait InventoryStore {
    fn upsert(&mut self, entry: &InventoryEntry) -> WriteOutcome;
}

/// Drive a full batch: read, normalize, derive, reconcile, tally.
///
/// `on_progress` fires every [`RunConfig::progress_interval`] records
/// with the counters so far. Returns the final immutable report.
pub fn run<R>(
    records: R,
    store: &mut dyn InventoryStore,
    rules: &SegmentRules,
    cfg: &RunConfig,
    mut on_progress: impl FnMut(&RunReport),
) -> RunReport
where
    R: IntoIterator<Item = anyhow::Result<RawRecord>>,
{
    let mut report = RunReport::default();

    for record in records {
        if cfg.limit.is_some_and(|limit| report.processed >= limit) {
            break;
        }
        report.processed += 1;

        match record {
            Ok(record) => process_record(&record, store, rules, cfg.policy, &mut report),
            Err(err) => {
                warn!("row {} unreadable: {err:#}", report.processed);
                report.skip(SkipReason::UnreadableRow);
            }
        }

        if cfg.progress_interval > 0 && report.processed % cfg.progress_interval == 0 {
            on_progress(&report);
        }
    }

    report
}

fn process_record(
    record: &RawRecord,
    store: &mut dyn InventoryStore,
    rules: &SegmentRules,
    policy: InferencePolicy,
    report: &mut RunReport,
) {
    let row = normalize::normalize(record);

    let address = match address::classify(row.address.as_deref()) {
        AddressClass::Missing => {
            report.skip(SkipReason::MissingAddress);
            return;
        }
        AddressClass::Invalid => {
            debug!("skipping invalid address {:?}", row.address);
            report.skip(SkipReason::InvalidAddress);
            return;
        }
        AddressClass::Loopback(addr) => {
            debug!("skipping loopback address {addr}");
            report.skip(SkipReason::Loopback);
            return;
        }
        AddressClass::Routable(addr) => addr,
    };

    let entry = assemble(address, &row, rules, policy);
    match store.upsert(&entry) {
        WriteOutcome::Inserted => report.inserted += 1,
        WriteOutcome::Updated => report.updated += 1,
        WriteOutcome::ConflictSkipped => report.skip(SkipReason::WriteConflict),
        WriteOutcome::Failed => report.skip(SkipReason::WriteFailed),
    }
}

/// Build the canonical entry for a routable address. Pure derivation,
/// exposed separately so the rules can be exercised without a store.
pub fn assemble(
    address: Ipv4Addr,
    row: &NormalizedRow,
    rules: &SegmentRules,
    policy: InferencePolicy,
) -> InventoryEntry {
    let subnet = subnet::infer(address, policy);
    let segment = rules.extract(
        row.service_domain.as_deref(),
        &[row.interface_desc.as_deref(), row.host_name.as_deref()],
    );
    let status = status::derive(row.admin_status.as_deref(), row.oper_status.as_deref());

    let facets = Facets {
        interface_name: row.interface_name.as_deref(),
        interface_desc: row.interface_desc.as_deref(),
        vendor: row.vendor.as_deref(),
        device_model: row.device_model.as_deref(),
        interface_type: row.interface_type.as_deref(),
        service_domain: row.service_domain.as_deref(),
    };
    let description = describe::compose(&facets, row.host_name.as_deref());
    let hostname = describe::hostname(row.host_name.as_deref(), address);

    InventoryEntry {
        address,
        subnet,
        status,
        segment,
        hostname,
        description,
        service_domain: row.service_domain.clone(),
        interface_name: row.interface_name.clone(),
        interface_desc: row.interface_desc.clone(),
        interface_type: row.interface_type.clone(),
        vendor: row.vendor.clone(),
        device_model: row.device_model.clone(),
        admin_status: row.admin_status.clone(),
        oper_status: row.oper_status.clone(),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
