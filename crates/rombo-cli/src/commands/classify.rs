use rombo_core::inventory::load_inventory;
use rombo_core::matrix::item_label;
use rombo_core::{classify, HazardSet};
use serde::Serialize;
use std::path::Path;

use crate::output;

#[derive(Serialize)]
struct ClassifiedItem {
    label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    classes: HazardSet,
    unrecognized_labels: Vec<String>,
}

pub fn run(inventory: &Path, output_format: &str) -> Result<(), rombo_core::error::RomboError> {
    let items = load_inventory(inventory)?;

    let classified: Vec<ClassifiedItem> = items
        .iter()
        .enumerate()
        .map(|(i, item)| ClassifiedItem {
            label: item_label(item, i),
            id: item.id.clone(),
            classes: classify(item),
            unrecognized_labels: item
                .ghs_classes
                .unrecognized()
                .map(str::to_string)
                .collect(),
        })
        .collect();

    match output_format {
        "json" => output::json::print(&classified)?,
        _ => {
            let rows: Vec<(String, String)> = classified
                .iter()
                .map(|c| {
                    let mut tags = c.classes.to_string();
                    if !c.unrecognized_labels.is_empty() {
                        tags.push_str(&format!(
                            "  (ignored: {})",
                            c.unrecognized_labels.join(", ")
                        ));
                    }
                    (c.label.clone(), tags)
                })
                .collect();
            output::table::print_classification(&rows);
        }
    }

    Ok(())
}
