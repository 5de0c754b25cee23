use super::verdict::{RuleId, Status, VerdictTemplate};
use crate::hazard::{HazardClass, HazardSet};

/// One entry of the compatibility decision list.
pub struct CompatibilityRule {
    pub id: RuleId,
    /// Plain-language statement of when the rule fires.
    pub description: &'static str,
    pub verdict: VerdictTemplate,
    predicate: fn(&HazardSet, &HazardSet) -> bool,
}

impl CompatibilityRule {
    pub fn matches(&self, a: &HazardSet, b: &HazardSet) -> bool {
        (self.predicate)(a, b)
    }
}

const DANGER_RED: &str = "#dc3545";
const DANGER_ORANGE: &str = "#fd7e14";
const CAUTION_YELLOW: &str = "#ffc107";
const OK_GREEN: &str = "#198754";

/// Hazard rules in precedence order. The first rule that matches decides the
/// verdict, so the most severe hazards come first and an item matching
/// several rules is never under-classified. Identity is checked before this
/// list and the default verdict applies after it.
///
/// Every predicate is symmetric in its two arguments.
pub static RULES: &[CompatibilityRule] = &[
    // Explosives are segregated from everything, whatever the other item is.
    CompatibilityRule {
        id: RuleId::Explosives,
        description: "Either item is an explosive (Clase 1)",
        verdict: VerdictTemplate {
            status: Status::Danger,
            severity_color: DANGER_RED,
            icon: "💥",
            message: "EXPLOSIVOS: Segregar aisladamente de todo.",
        },
        predicate: explosives,
    },
    CompatibilityRule {
        id: RuleId::FlammableOxidizer,
        description: "A flammable item next to an oxidizer",
        verdict: VerdictTemplate {
            status: Status::Danger,
            severity_color: DANGER_RED,
            icon: "🔥",
            message: "PELIGRO: Inflamable + Oxidante = Riesgo de Incendio Vigoroso.",
        },
        predicate: flammable_oxidizer,
    },
    CompatibilityRule {
        id: RuleId::FlammablePeroxide,
        description: "A flammable item next to an organic peroxide",
        verdict: VerdictTemplate {
            status: Status::Danger,
            severity_color: DANGER_RED,
            icon: "💣",
            message: "PELIGRO CRÍTICO: Peróxidos son muy inestables con combustibles.",
        },
        predicate: flammable_peroxide,
    },
    // Only the ACID/ALK special symbols count here; a generic corrosive does not.
    CompatibilityRule {
        id: RuleId::AcidBase,
        description: "An acid next to a base",
        verdict: VerdictTemplate {
            status: Status::Danger,
            severity_color: DANGER_ORANGE,
            icon: "⚠️",
            message: "Reacción Exotérmica Violenta (Ácido + Base).",
        },
        predicate: acid_base,
    },
    CompatibilityRule {
        id: RuleId::CorrosiveFlammable,
        description: "A corrosive next to a flammable item",
        verdict: VerdictTemplate {
            status: Status::Caution,
            severity_color: CAUTION_YELLOW,
            icon: "⚠️",
            message: "Precaución: Corrosivos pueden dañar contenedores inflamables.",
        },
        predicate: corrosive_flammable,
    },
    // Fires on presence alone; the other item is not inspected.
    CompatibilityRule {
        id: RuleId::WaterReactive,
        description: "Either item reacts with water",
        verdict: VerdictTemplate {
            status: Status::Caution,
            severity_color: CAUTION_YELLOW,
            icon: "💧",
            message: "Sustancia reacciona con agua/humedad. Almacenar SECO.",
        },
        predicate: water_reactive,
    },
    CompatibilityRule {
        id: RuleId::FlammableGasToxicGas,
        description: "A flammable gas next to a toxic gas",
        verdict: VerdictTemplate {
            status: Status::Caution,
            severity_color: CAUTION_YELLOW,
            icon: "💨",
            message: "Segregar Gases Inflamables de Gases Tóxicos.",
        },
        predicate: flammable_gas_toxic_gas,
    },
    // Reported as OK even though the message asks for care. Changing the
    // status changes the cell color in the rendered matrix.
    CompatibilityRule {
        id: RuleId::ToxicAsymmetry,
        description: "Exactly one of the items is toxic (Clase 6.1)",
        verdict: VerdictTemplate {
            status: Status::Ok,
            severity_color: OK_GREEN,
            icon: "✅",
            message: "Compatible (Mantener orden).",
        },
        predicate: toxic_asymmetry,
    },
];

/// Look up a rule of the table by id.
pub fn rule(id: RuleId) -> Option<&'static CompatibilityRule> {
    RULES.iter().find(|r| r.id == id)
}

/// The first rule of [`RULES`] matching the pair, if any.
pub fn first_match(a: &HazardSet, b: &HazardSet) -> Option<&'static CompatibilityRule> {
    RULES.iter().find(|r| r.matches(a, b))
}

fn either_way(a: &HazardSet, b: &HazardSet, f: impl Fn(&HazardSet, &HazardSet) -> bool) -> bool {
    f(a, b) || f(b, a)
}

fn explosives(a: &HazardSet, b: &HazardSet) -> bool {
    a.contains(HazardClass::Explosivo) || b.contains(HazardClass::Explosivo)
}

fn flammable_oxidizer(a: &HazardSet, b: &HazardSet) -> bool {
    either_way(a, b, |x, y| x.is_flammable() && y.contains(HazardClass::Oxidante))
}

fn flammable_peroxide(a: &HazardSet, b: &HazardSet) -> bool {
    either_way(a, b, |x, y| x.is_flammable() && y.contains(HazardClass::Peroxido))
}

fn acid_base(a: &HazardSet, b: &HazardSet) -> bool {
    either_way(a, b, |x, y| {
        x.contains(HazardClass::Acido) && y.contains(HazardClass::Base)
    })
}

fn corrosive_flammable(a: &HazardSet, b: &HazardSet) -> bool {
    either_way(a, b, |x, y| x.contains(HazardClass::Corrosivo) && y.is_flammable())
}

fn water_reactive(a: &HazardSet, b: &HazardSet) -> bool {
    a.contains(HazardClass::ReactivoAgua) || b.contains(HazardClass::ReactivoAgua)
}

fn flammable_gas_toxic_gas(a: &HazardSet, b: &HazardSet) -> bool {
    either_way(a, b, |x, y| {
        x.contains(HazardClass::GasInflamable) && y.contains(HazardClass::GasToxico)
    })
}

fn toxic_asymmetry(a: &HazardSet, b: &HazardSet) -> bool {
    a.contains(HazardClass::Toxico) != b.contains(HazardClass::Toxico)
}

#[cfg(test)]
mod tests {
    use super::*;
    use HazardClass::*;

    fn set(classes: &[HazardClass]) -> HazardSet {
        classes.iter().copied().collect()
    }

    fn first(a: &[HazardClass], b: &[HazardClass]) -> Option<RuleId> {
        first_match(&set(a), &set(b)).map(|r| r.id)
    }

    #[test]
    fn test_table_order() {
        let ids: Vec<RuleId> = RULES.iter().map(|r| r.id).collect();
        assert_eq!(
            ids,
            vec![
                RuleId::Explosives,
                RuleId::FlammableOxidizer,
                RuleId::FlammablePeroxide,
                RuleId::AcidBase,
                RuleId::CorrosiveFlammable,
                RuleId::WaterReactive,
                RuleId::FlammableGasToxicGas,
                RuleId::ToxicAsymmetry,
            ]
        );
    }

    #[test]
    fn test_explosive_beats_everything() {
        assert_eq!(
            first(&[Explosivo, Inflamable], &[Oxidante]),
            Some(RuleId::Explosives)
        );
        assert_eq!(first(&[], &[Explosivo]), Some(RuleId::Explosives));
    }

    #[test]
    fn test_every_flammable_tag_meets_oxidizer() {
        for tag in crate::hazard::FLAMMABLE {
            assert_eq!(first(&[tag], &[Oxidante]), Some(RuleId::FlammableOxidizer));
            assert_eq!(first(&[Oxidante], &[tag]), Some(RuleId::FlammableOxidizer));
        }
    }

    #[test]
    fn test_oxidizer_precedes_peroxide() {
        assert_eq!(
            first(&[Inflamable], &[Oxidante, Peroxido]),
            Some(RuleId::FlammableOxidizer)
        );
        assert_eq!(first(&[Peroxido], &[GasInflamable]), Some(RuleId::FlammablePeroxide));
    }

    #[test]
    fn test_acid_base_requires_specific_tags() {
        assert_eq!(first(&[Acido], &[Base]), Some(RuleId::AcidBase));
        assert_eq!(first(&[Corrosivo], &[Base]), None);
        assert_eq!(first(&[Acido], &[Acido]), None);
    }

    #[test]
    fn test_corrosive_flammable() {
        assert_eq!(
            first(&[Corrosivo], &[SolidoInflamable]),
            Some(RuleId::CorrosiveFlammable)
        );
        // Flammable and corrosive on the same item is not a pair conflict.
        assert_eq!(first(&[Corrosivo, Inflamable], &[]), None);
    }

    #[test]
    fn test_water_reactive_on_presence() {
        assert_eq!(first(&[ReactivoAgua], &[]), Some(RuleId::WaterReactive));
        assert_eq!(first(&[], &[ReactivoAgua]), Some(RuleId::WaterReactive));
    }

    #[test]
    fn test_gas_pair() {
        assert_eq!(
            first(&[GasToxico], &[GasInflamable]),
            Some(RuleId::FlammableGasToxicGas)
        );
        assert_eq!(first(&[GasToxico], &[GasToxico]), None);
    }

    #[test]
    fn test_toxic_asymmetry_is_ok() {
        assert_eq!(first(&[Toxico], &[]), Some(RuleId::ToxicAsymmetry));
        assert_eq!(first(&[Toxico], &[Toxico]), None);
        let rule = rule(RuleId::ToxicAsymmetry).unwrap();
        assert_eq!(rule.verdict.status, Status::Ok);
    }

    #[test]
    fn test_predicates_symmetric_over_single_tags() {
        for a in HazardClass::ALL {
            for b in HazardClass::ALL {
                assert_eq!(first(&[a], &[b]), first(&[b], &[a]), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn test_rule_lookup() {
        assert!(rule(RuleId::Identity).is_none());
        assert!(rule(RuleId::Default).is_none());
        assert_eq!(rule(RuleId::AcidBase).unwrap().verdict.icon, "⚠️");
    }
}
