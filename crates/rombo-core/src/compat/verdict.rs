use crate::hazard::HazardSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a pairwise compatibility decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Same,
    Danger,
    Caution,
    Ok,
}

impl Status {
    /// Rank used to order conflicts; higher is more severe.
    pub fn severity(self) -> u8 {
        match self {
            Status::Danger => 3,
            Status::Caution => 2,
            Status::Ok => 1,
            Status::Same => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Same => "SAME",
            Status::Danger => "DANGER",
            Status::Caution => "CAUTION",
            Status::Ok => "OK",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Which rule of the decision list produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    Identity,
    Explosives,
    FlammableOxidizer,
    FlammablePeroxide,
    AcidBase,
    CorrosiveFlammable,
    WaterReactive,
    FlammableGasToxicGas,
    ToxicAsymmetry,
    Default,
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleId::Identity => "identity",
            RuleId::Explosives => "explosives",
            RuleId::FlammableOxidizer => "flammable_oxidizer",
            RuleId::FlammablePeroxide => "flammable_peroxide",
            RuleId::AcidBase => "acid_base",
            RuleId::CorrosiveFlammable => "corrosive_flammable",
            RuleId::WaterReactive => "water_reactive",
            RuleId::FlammableGasToxicGas => "flammable_gas_toxic_gas",
            RuleId::ToxicAsymmetry => "toxic_asymmetry",
            RuleId::Default => "default",
        };
        f.pad(name)
    }
}

/// The fixed display data a rule hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerdictTemplate {
    pub status: Status,
    pub severity_color: &'static str,
    pub icon: &'static str,
    pub message: &'static str,
}

impl VerdictTemplate {
    pub fn to_verdict(&self, rule: RuleId) -> Verdict {
        Verdict {
            status: self.status,
            severity_color: self.severity_color.to_string(),
            icon: self.icon.to_string(),
            message: self.message.to_string(),
            rule,
        }
    }
}

pub const SAME_SUBSTANCE: VerdictTemplate = VerdictTemplate {
    status: Status::Same,
    severity_color: "#e9ecef",
    icon: "—",
    message: "Misma Sustancia",
};

pub const COMPATIBLE: VerdictTemplate = VerdictTemplate {
    status: Status::Ok,
    severity_color: "#198754",
    icon: "✅",
    message: "Compatible",
};

/// Storage compatibility decision for a pair of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub status: Status,
    /// CSS color for the matrix cell.
    pub severity_color: String,
    pub icon: String,
    pub message: String,
    pub rule: RuleId,
}

/// A verdict together with the hazard tags both items classified into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairAssessment {
    pub verdict: Verdict,
    pub classes_a: HazardSet,
    pub classes_b: HazardSet,
}
