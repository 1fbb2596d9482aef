use ipamr_common::inventory::entry::AllocationStatus;

/// Allocation status from the (administrative, operational) state pair.
///
/// Comparison is exact on the export's literal `Up` / `Down` values;
/// unknown or absent states fall through to `Available`. Total function,
/// no failure mode.
pub fn derive(admin: Option<&str>, oper: Option<&str>) -> AllocationStatus {
    match (admin, oper) {
        (Some("Up"), Some("Up")) => AllocationStatus::Allocated,
        (Some("Up"), Some("Down")) => AllocationStatus::Reserved,
        _ => AllocationStatus::Available,
    }
}
