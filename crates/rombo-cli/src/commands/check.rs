use rombo_core::trace::trace_pair;
use std::path::Path;

use crate::output;

pub fn run(
    inventory: &Path,
    key_a: &str,
    key_b: &str,
    output_format: &str,
    trace: bool,
) -> Result<(), rombo_core::error::RomboError> {
    if trace {
        let items = rombo_core::inventory::load_inventory(inventory)?;
        let a = rombo_core::inventory::find_item(&items, key_a)?;
        let b = rombo_core::inventory::find_item(&items, key_b)?;
        let pair_trace = trace_pair(a, b);
        match output_format {
            "json" => output::json::print(&pair_trace)?,
            _ => output::table::print_trace(&pair_trace),
        }
        return Ok(());
    }

    let assessment = rombo_core::check_pair_in_file(inventory, key_a, key_b)?;
    match output_format {
        "json" => output::json::print(&assessment)?,
        _ => output::table::print_assessment(key_a, key_b, &assessment),
    }

    Ok(())
}
