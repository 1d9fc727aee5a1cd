//! Business logic for the two toolkit cores.
//!
//! - [`allocator`] - unused-subnet allocation over a vnet address space
//! - [`reconcile`] - skip-list reconciliation against JUnit results

mod allocator;
mod reconcile;

// Re-export public functions
pub use allocator::{
    find_available_subnet, find_available_subnet_in_space, AllocationError, DEFAULT_MIN_PREFIX_LEN,
};
pub use reconcile::{group_observed_reports, reconcile, ReconcileOutcome};
