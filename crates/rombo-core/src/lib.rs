pub mod compat;
pub mod error;
pub mod hazard;
pub mod inventory;
pub mod matrix;
pub mod model;
pub mod trace;

pub use compat::{assess_pair, check_compatibility, Status, Verdict};
pub use hazard::{classify, HazardClass, HazardSet};
pub use matrix::{build_matrix, CompatibilityMatrix};
pub use model::InventoryItem;

use error::RomboError;
use std::path::Path;

/// Load an inventory file and build its compatibility matrix.
///
/// Items keep the order in which the file lists them.
pub fn matrix_for_file(path: &Path) -> Result<CompatibilityMatrix, RomboError> {
    let items = inventory::load_inventory(path)?;
    Ok(build_matrix(&items))
}

/// Load an inventory file and check two of its items, each looked up by id
/// or product name.
pub fn check_pair_in_file(
    path: &Path,
    key_a: &str,
    key_b: &str,
) -> Result<compat::PairAssessment, RomboError> {
    let items = inventory::load_inventory(path)?;
    let a = inventory::find_item(&items, key_a)?;
    let b = inventory::find_item(&items, key_b)?;
    Ok(assess_pair(a, b))
}
