pub mod rules;
pub mod verdict;

pub use rules::{first_match, CompatibilityRule, RULES};
pub use verdict::{PairAssessment, RuleId, Status, Verdict};

use crate::hazard::{classify, HazardSet};
use crate::model::InventoryItem;
use tracing::trace;
use verdict::{COMPATIBLE, SAME_SUBSTANCE};

/// Decide whether two inventory items may be stored together.
pub fn check_compatibility(a: &InventoryItem, b: &InventoryItem) -> Verdict {
    assess_pair(a, b).verdict
}

/// Classify both items and decide their compatibility, keeping the tags.
pub fn assess_pair(a: &InventoryItem, b: &InventoryItem) -> PairAssessment {
    let classes_a = classify(a);
    let classes_b = classify(b);
    let verdict = evaluate(a, &classes_a, b, &classes_b);
    PairAssessment {
        verdict,
        classes_a,
        classes_b,
    }
}

/// Decide compatibility from already classified items.
///
/// `classes_a` and `classes_b` must be the classification of `a` and `b`.
/// The identity check runs first, then [`RULES`] in order, then the default.
pub fn evaluate(
    a: &InventoryItem,
    classes_a: &HazardSet,
    b: &InventoryItem,
    classes_b: &HazardSet,
) -> Verdict {
    if a.is_same_substance(b) {
        return SAME_SUBSTANCE.to_verdict(RuleId::Identity);
    }

    match first_match(classes_a, classes_b) {
        Some(rule) => {
            trace!(
                a = ?a.display_name(),
                b = ?b.display_name(),
                rule = %rule.id,
                "compatibility rule matched"
            );
            rule.verdict.to_verdict(rule.id)
        }
        None => COMPATIBLE.to_verdict(RuleId::Default),
    }
}
