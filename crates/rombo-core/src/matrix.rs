use crate::compat::{evaluate, Status, Verdict};
use crate::hazard::{classify, HazardSet};
use crate::model::InventoryItem;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Pairwise compatibility grid for an inventory.
///
/// Row and column `i` both refer to the `i`-th item as supplied by the
/// caller; `cells[i][j]` is the verdict for items `i` and `j`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityMatrix {
    pub labels: Vec<String>,
    pub classes: Vec<HazardSet>,
    pub cells: Vec<Vec<Verdict>>,
}

/// Counts of unordered item pairs (diagonal excluded) per status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixSummary {
    pub items: usize,
    pub pairs: usize,
    pub same: usize,
    pub danger: usize,
    pub caution: usize,
    pub ok: usize,
}

/// A pair that must not (DANGER) or should not (CAUTION) share storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairConflict {
    pub row: usize,
    pub col: usize,
    pub item_a: String,
    pub item_b: String,
    pub verdict: Verdict,
}

/// Build the full N x N verdict grid, preserving the caller's item order.
pub fn build_matrix(items: &[InventoryItem]) -> CompatibilityMatrix {
    let classes: Vec<HazardSet> = items.iter().map(classify).collect();

    let cells: Vec<Vec<Verdict>> = items
        .iter()
        .zip(&classes)
        .map(|(a, classes_a)| {
            items
                .iter()
                .zip(&classes)
                .map(|(b, classes_b)| evaluate(a, classes_a, b, classes_b))
                .collect()
        })
        .collect();

    let labels = items
        .iter()
        .enumerate()
        .map(|(i, item)| item_label(item, i))
        .collect();

    debug!(items = items.len(), "built compatibility matrix");

    CompatibilityMatrix {
        labels,
        classes,
        cells,
    }
}

/// Display label for the item at `index`: product name, then id, then its
/// 1-based position.
pub fn item_label(item: &InventoryItem, index: usize) -> String {
    item.display_name()
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{}", index + 1))
}

impl CompatibilityMatrix {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Verdict> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    fn upper_triangle(&self) -> impl Iterator<Item = (usize, usize, &Verdict)> + '_ {
        self.cells.iter().enumerate().flat_map(|(i, row)| {
            row.iter()
                .enumerate()
                .skip(i + 1)
                .map(move |(j, verdict)| (i, j, verdict))
        })
    }

    pub fn summary(&self) -> MatrixSummary {
        let mut summary = MatrixSummary {
            items: self.len(),
            ..Default::default()
        };
        for (_, _, verdict) in self.upper_triangle() {
            summary.pairs += 1;
            match verdict.status {
                Status::Same => summary.same += 1,
                Status::Danger => summary.danger += 1,
                Status::Caution => summary.caution += 1,
                Status::Ok => summary.ok += 1,
            }
        }
        summary
    }

    /// DANGER and CAUTION pairs, most severe first, then by position.
    pub fn conflicts(&self) -> Vec<PairConflict> {
        let mut conflicts: Vec<PairConflict> = self
            .upper_triangle()
            .filter(|(_, _, v)| matches!(v.status, Status::Danger | Status::Caution))
            .map(|(row, col, verdict)| PairConflict {
                row,
                col,
                item_a: self.labels[row].clone(),
                item_b: self.labels[col].clone(),
                verdict: verdict.clone(),
            })
            .collect();
        conflicts.sort_by(|a, b| {
            b.verdict
                .status
                .severity()
                .cmp(&a.verdict.status.severity())
                .then(a.row.cmp(&b.row))
                .then(a.col.cmp(&b.col))
        });
        conflicts
    }
}
