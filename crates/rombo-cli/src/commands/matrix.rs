use rombo_core::matrix::PairConflict;
use std::path::Path;

use crate::output;

pub fn run(
    inventory: &Path,
    output_format: &str,
    conflicts_only: bool,
) -> Result<(), rombo_core::error::RomboError> {
    let matrix = rombo_core::matrix_for_file(inventory)?;
    tracing::debug!(items = matrix.len(), "matrix ready for output");

    if conflicts_only {
        let conflicts: Vec<PairConflict> = matrix.conflicts();
        match output_format {
            "json" => output::json::print(&conflicts)?,
            _ => output::table::print_conflicts(&conflicts),
        }
        return Ok(());
    }

    match output_format {
        "json" => {
            #[derive(serde::Serialize)]
            struct MatrixOutput<'a> {
                summary: rombo_core::matrix::MatrixSummary,
                matrix: &'a rombo_core::CompatibilityMatrix,
            }
            output::json::print(&MatrixOutput {
                summary: matrix.summary(),
                matrix: &matrix,
            })?
        }
        _ => output::table::print_matrix(&matrix),
    }

    Ok(())
}
