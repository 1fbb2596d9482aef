//! Field normalization: the only place raw column text is touched.
//!
//! Exports routinely carry `"-"` or the literal `"None"` where a value is
//! absent. Those sentinels, empty strings, and missing columns all
//! collapse to the same absent state here, so downstream components never
//! see a placeholder. Missing data is valid input, not an error.

use ipamr_common::inventory::record::{self, RawRecord};

/// A raw record with every contract column resolved exactly once.
/// Downstream components consume these typed fields, never raw lookups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedRow {
    pub address: Option<String>,
    pub host_name: Option<String>,
    pub interface_name: Option<String>,
    pub interface_desc: Option<String>,
    pub interface_type: Option<String>,
    pub service_domain: Option<String>,
    pub vendor: Option<String>,
    pub device_model: Option<String>,
    pub admin_status: Option<String>,
    pub oper_status: Option<String>,
}

pub fn normalize(record: &RawRecord) -> NormalizedRow {
    NormalizedRow {
        address: field(record, record::COL_ADDRESS),
        host_name: field(record, record::COL_HOST_NAME),
        interface_name: field(record, record::COL_INTERFACE_NAME),
        interface_desc: field(record, record::COL_INTERFACE_DESC),
        interface_type: field(record, record::COL_INTERFACE_TYPE),
        service_domain: field(record, record::COL_SERVICE_DOMAIN),
        vendor: field(record, record::COL_VENDOR),
        device_model: field(record, record::COL_DEVICE_MODEL),
        admin_status: field(record, record::COL_ADMIN_STATUS),
        oper_status: field(record, record::COL_OPER_STATUS),
    }
}

fn field(record: &RawRecord, column: &str) -> Option<String> {
    let value = record.get(column)?.trim();
    match value {
        "" | "-" | "None" => None,
        _ => Some(value.to_string()),
    }
}
