//! SQLite-backed inventory store.
//!
//! One table, keyed uniquely by address. The store owns the error
//! classification: per-entry write problems become a [`WriteOutcome`]
//! here, so the pipeline never looks at error text. Only opening the
//! database (and the destructive maintenance operations) can fail the
//! run.

use std::net::Ipv4Addr;
use std::path::Path;

use chrono::NaiveDateTime;
use rusqlite::{Connection, ErrorCode, params};
use thiserror::Error;
use tracing::warn;

use ipamr_common::inventory::entry::{AllocationStatus, Cidr, InventoryEntry};
use ipamr_core::pipeline::{InventoryStore, WriteOutcome};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot open inventory store: {0}")]
    Open(#[source] rusqlite::Error),
    #[error("cannot prepare inventory schema: {0}")]
    Schema(#[source] rusqlite::Error),
    #[error("inventory query failed: {0}")]
    Query(#[from] rusqlite::Error),
    #[error("corrupt inventory row for {address}: {detail}")]
    Corrupt { address: String, detail: String },
}

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS ip_inventory (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    ip_address      TEXT NOT NULL UNIQUE,
    subnet          TEXT NOT NULL,
    status          TEXT NOT NULL DEFAULT 'available'
                    CHECK (status IN ('available', 'allocated', 'reserved')),
    vrf_vpn         TEXT,
    hostname        TEXT,
    description     TEXT,
    service_domain  TEXT,
    interface_name  TEXT,
    interface_desc  TEXT,
    interface_type  TEXT,
    vendor          TEXT,
    device_model    TEXT,
    admin_status    TEXT,
    oper_status     TEXT,
    created_at      TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at      TEXT NOT NULL DEFAULT (datetime('now'))
);
CREATE INDEX IF NOT EXISTS idx_subnet ON ip_inventory (subnet);
CREATE INDEX IF NOT EXISTS idx_vrf_vpn ON ip_inventory (vrf_vpn);
CREATE INDEX IF NOT EXISTS idx_hostname ON ip_inventory (hostname);
CREATE INDEX IF NOT EXISTS idx_service ON ip_inventory (service_domain);
"#;

// The subnet is derived at insert time and is not part of the mutable
// field set; only the identity-free fields are replaced on conflict.
const UPSERT: &str = r#"
INSERT INTO ip_inventory
    (ip_address, subnet, status, vrf_vpn, hostname, description, service_domain,
     interface_name, interface_desc, interface_type, vendor, device_model,
     admin_status, oper_status)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
ON CONFLICT (ip_address) DO UPDATE SET
    status = excluded.status,
    vrf_vpn = excluded.vrf_vpn,
    hostname = excluded.hostname,
    description = excluded.description,
    service_domain = excluded.service_domain,
    interface_name = excluded.interface_name,
    interface_desc = excluded.interface_desc,
    interface_type = excluded.interface_type,
    vendor = excluded.vendor,
    device_model = excluded.device_model,
    admin_status = excluded.admin_status,
    oper_status = excluded.oper_status,
    updated_at = datetime('now')
"#;

/// A stored row read back out, timestamps included.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEntry {
    pub address: Ipv4Addr,
    pub subnet: Cidr,
    pub status: AllocationStatus,
    pub segment: Option<String>,
    pub hostname: Option<String>,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and make sure the schema
    /// exists. The connection lives as long as the store value; dropping
    /// it on any exit path releases the resource.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Self::with_connection(Connection::open(path).map_err(StoreError::Open)?)
    }

    /// Private throwaway database, used by tests and dry runs.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory().map_err(StoreError::Open)?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA).map_err(StoreError::Schema)?;
        Ok(Self { conn })
    }

    /// Destructive full-table clear. Returns how many rows went away.
    pub fn clear(&mut self) -> Result<usize, StoreError> {
        Ok(self.conn.execute("DELETE FROM ip_inventory", [])?)
    }

    pub fn count(&self) -> Result<u64, StoreError> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM ip_inventory", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    pub fn fetch(&self, address: Ipv4Addr) -> Result<Option<StoredEntry>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT ip_address, subnet, status, vrf_vpn, hostname, description,
                    created_at, updated_at
             FROM ip_inventory WHERE ip_address = ?1",
        )?;
        let mut rows = stmt.query(params![address.to_string()])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };

        let address_text: String = row.get(0)?;
        let subnet_text: String = row.get(1)?;
        let status_text: String = row.get(2)?;
        let created_text: String = row.get(6)?;
        let updated_text: String = row.get(7)?;

        Ok(Some(StoredEntry {
            address: parse_field(&address_text, &address_text, "ip_address")?,
            subnet: parse_field(&subnet_text, &address_text, "subnet")?,
            status: parse_field(&status_text, &address_text, "status")?,
            segment: row.get(3)?,
            hostname: row.get(4)?,
            description: row.get(5)?,
            created_at: parse_timestamp(&created_text, &address_text)?,
            updated_at: parse_timestamp(&updated_text, &address_text)?,
        }))
    }

    fn write(&mut self, entry: &InventoryEntry) -> Result<WriteOutcome, rusqlite::Error> {
        // Single-writer run model (no overlapping writes by design), so
        // an existence probe is a race-free way to tell insert from
        // update; the statement itself stays atomic either way.
        let existing: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM ip_inventory WHERE ip_address = ?1)",
            params![entry.address.to_string()],
            |row| row.get(0),
        )?;

        self.conn.execute(
            UPSERT,
            params![
                entry.address.to_string(),
                entry.subnet.to_string(),
                entry.status.as_str(),
                entry.segment,
                entry.hostname,
                entry.description,
                entry.service_domain,
                entry.interface_name,
                entry.interface_desc,
                entry.interface_type,
                entry.vendor,
                entry.device_model,
                entry.admin_status,
                entry.oper_status,
            ],
        )?;

        Ok(if existing {
            WriteOutcome::Updated
        } else {
            WriteOutcome::Inserted
        })
    }
}

impl InventoryStore for SqliteStore {
    fn upsert(&mut self, entry: &InventoryEntry) -> WriteOutcome {
        match self.write(entry) {
            Ok(outcome) => outcome,
            Err(err) => classify_failure(entry.address, &err),
        }
    }
}

/// A constraint the upsert path did not absorb means this row conflicts
/// with the schema; anything else is a real store failure. Neither
/// aborts the batch.
fn classify_failure(address: Ipv4Addr, err: &rusqlite::Error) -> WriteOutcome {
    match err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            warn!("constraint rejected {address}: {err}");
            WriteOutcome::ConflictSkipped
        }
        _ => {
            warn!("write failed for {address}: {err}");
            WriteOutcome::Failed
        }
    }
}

fn parse_field<T: std::str::FromStr>(
    text: &str,
    address: &str,
    column: &str,
) -> Result<T, StoreError> {
    text.parse().map_err(|_| StoreError::Corrupt {
        address: address.to_string(),
        detail: format!("bad {column}: {text}"),
    })
}

fn parse_timestamp(text: &str, address: &str) -> Result<NaiveDateTime, StoreError> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").map_err(|_| StoreError::Corrupt {
        address: address.to_string(),
        detail: format!("bad timestamp: {text}"),
    })
}
