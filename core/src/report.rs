//! Per-batch tallies and the final summary.

/// Why a record failed to produce a written entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The address column was absent after normalization.
    MissingAddress,
    /// Not a valid IPv4 dotted-quad.
    InvalidAddress,
    /// 127.0.0.0/8, never inventoried.
    Loopback,
    /// The store rejected the write on a constraint other than the
    /// upsert key.
    WriteConflict,
    /// Any other store-level write failure.
    WriteFailed,
    /// The source could not parse the row at all.
    UnreadableRow,
}

/// Counters for one batch run. Accumulated record by record, exposed as
/// an immutable summary when the run ends; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub processed: u64,
    pub inserted: u64,
    pub updated: u64,
    pub missing_address: u64,
    pub invalid_address: u64,
    pub loopback: u64,
    pub write_conflicts: u64,
    pub write_failures: u64,
    pub unreadable_rows: u64,
}

impl RunReport {
    pub fn skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::MissingAddress => self.missing_address += 1,
            SkipReason::InvalidAddress => self.invalid_address += 1,
            SkipReason::Loopback => self.loopback += 1,
            SkipReason::WriteConflict => self.write_conflicts += 1,
            SkipReason::WriteFailed => self.write_failures += 1,
            SkipReason::UnreadableRow => self.unreadable_rows += 1,
        }
    }

    /// Records that reached the store: inserts plus updates.
    pub fn written(&self) -> u64 {
        self.inserted + self.updated
    }

    pub fn skipped(&self) -> u64 {
        self.missing_address
            + self.invalid_address
            + self.loopback
            + self.write_conflicts
            + self.write_failures
            + self.unreadable_rows
    }

    /// Fraction of processed records that were written. Zero for an
    /// empty batch, never a division by zero.
    pub fn write_rate(&self) -> f64 {
        if self.processed == 0 {
            0.0
        } else {
            self.written() as f64 / self.processed as f64
        }
    }

    /// Skip counts with display labels, for diagnostics output.
    pub fn skip_breakdown(&self) -> [(&'static str, u64); 6] {
        [
            ("No address", self.missing_address),
            ("Invalid address", self.invalid_address),
            ("Loopback", self.loopback),
            ("Write conflict", self.write_conflicts),
            ("Write failed", self.write_failures),
            ("Unreadable row", self.unreadable_rows),
        ]
    }
}
