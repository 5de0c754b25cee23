use crate::compat::rules::RULES;
use crate::compat::{evaluate, RuleId, Verdict};
use crate::hazard::{classify, HazardSet};
use crate::model::InventoryItem;
use serde::{Deserialize, Serialize};

pub const TRACE_SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStepType {
    Classify,
    IdentityCheck,
    RuleEvaluated,
    Decision,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStep {
    pub step_type: TraceStepType,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<RuleId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<bool>,
}

impl TraceStep {
    fn new(step_type: TraceStepType, message: String) -> Self {
        Self {
            step_type,
            message,
            rule: None,
            matched: None,
        }
    }
}

/// Step-by-step record of how a pair verdict was reached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairTrace {
    pub trace_schema_version: String,
    pub item_a: String,
    pub item_b: String,
    pub classes_a: HazardSet,
    pub classes_b: HazardSet,
    pub steps: Vec<TraceStep>,
    pub verdict: Verdict,
}

/// Evaluate a pair and record every step taken.
///
/// The verdict is the one [`crate::compat::check_compatibility`] returns;
/// rules after the first match are not listed.
pub fn trace_pair(a: &InventoryItem, b: &InventoryItem) -> PairTrace {
    let item_a = a.display_name().unwrap_or("A").to_string();
    let item_b = b.display_name().unwrap_or("B").to_string();
    let classes_a = classify(a);
    let classes_b = classify(b);

    let mut steps = vec![
        TraceStep::new(
            TraceStepType::Classify,
            format!("{item_a}: {}", describe_sources(a, &classes_a)),
        ),
        TraceStep::new(
            TraceStepType::Classify,
            format!("{item_b}: {}", describe_sources(b, &classes_b)),
        ),
    ];

    let same = a.is_same_substance(b);
    steps.push(TraceStep {
        rule: Some(RuleId::Identity),
        matched: Some(same),
        ..TraceStep::new(
            TraceStepType::IdentityCheck,
            if same {
                "Same id or product name".to_string()
            } else {
                "Different substances".to_string()
            },
        )
    });

    if !same {
        for rule in RULES {
            let matched = rule.matches(&classes_a, &classes_b);
            steps.push(TraceStep {
                rule: Some(rule.id),
                matched: Some(matched),
                ..TraceStep::new(TraceStepType::RuleEvaluated, rule.description.to_string())
            });
            if matched {
                break;
            }
        }
    }

    let verdict = evaluate(a, &classes_a, b, &classes_b);
    steps.push(TraceStep {
        rule: Some(verdict.rule),
        ..TraceStep::new(
            TraceStepType::Decision,
            format!("{} {} {}", verdict.status, verdict.icon, verdict.message),
        )
    });

    PairTrace {
        trace_schema_version: TRACE_SCHEMA_VERSION.to_string(),
        item_a,
        item_b,
        classes_a,
        classes_b,
        steps,
        verdict,
    }
}

fn describe_sources(item: &InventoryItem, classes: &HazardSet) -> String {
    let labels: Vec<&str> = item.ghs_classes.iter().map(|l| l.raw.as_str()).collect();
    let diamond = &item.nfpa_diamond;
    format!(
        "GHS [{}], NFPA {}-{}-{} '{}' -> {}",
        labels.join(", "),
        diamond.health,
        diamond.flammability,
        diamond.reactivity,
        diamond.special,
        classes
    )
}
