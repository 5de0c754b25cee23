use super::tags::{HazardClass, HazardSet};
use crate::model::{GhsClass, InventoryItem, SpecialHazard};
use std::collections::BTreeSet;
use tracing::debug;

/// GHS classes that carry a compatibility tag. Classes 2.2, 6.2, 7 and 9
/// have no storage rule and are absent on purpose.
const GHS_TAGS: &[(GhsClass, HazardClass)] = &[
    (GhsClass::Explosive, HazardClass::Explosivo),
    (GhsClass::FlammableGas, HazardClass::GasInflamable),
    (GhsClass::ToxicGas, HazardClass::GasToxico),
    (GhsClass::FlammableLiquid, HazardClass::Inflamable),
    (GhsClass::FlammableSolid, HazardClass::SolidoInflamable),
    (GhsClass::SpontaneouslyCombustible, HazardClass::Espontaneo),
    (GhsClass::DangerousWhenWet, HazardClass::ReactivoAgua),
    (GhsClass::Oxidizer, HazardClass::Oxidante),
    (GhsClass::OrganicPeroxide, HazardClass::Peroxido),
    (GhsClass::Toxic, HazardClass::Toxico),
    (GhsClass::Corrosive, HazardClass::Corrosivo),
];

/// NFPA flammability rating from which an item counts as flammable.
///
/// Applies to the rating as parsed: an out-of-range source value such as 5
/// has already been read as 0 and does not reach this threshold.
pub const NFPA_FLAMMABLE_FROM: u8 = 2;

/// The hazard tag for a GHS class, if it has one.
pub fn ghs_tag(class: GhsClass) -> Option<HazardClass> {
    GHS_TAGS
        .iter()
        .find(|(ghs, _)| *ghs == class)
        .map(|(_, tag)| *tag)
}

/// Classify an inventory item into its set of hazard tags.
///
/// GHS labels and the NFPA diamond are independent sources; a tag reported
/// by both appears once. Unrecognized input adds nothing.
pub fn classify(item: &InventoryItem) -> HazardSet {
    let mut tags = BTreeSet::new();

    tags.extend(item.ghs_classes.classes().filter_map(ghs_tag));

    for label in item.ghs_classes.unrecognized() {
        debug!(item = ?item.display_name(), label, "GHS label names no known class");
    }

    let diamond = &item.nfpa_diamond;
    if diamond.flammability >= NFPA_FLAMMABLE_FROM {
        tags.insert(HazardClass::Inflamable);
    }

    match &diamond.special {
        SpecialHazard::Oxidizer => {
            tags.insert(HazardClass::Oxidante);
        }
        SpecialHazard::WaterReactive => {
            tags.insert(HazardClass::ReactivoAgua);
        }
        SpecialHazard::Acid => {
            tags.insert(HazardClass::Acido);
        }
        SpecialHazard::Alkali => {
            tags.insert(HazardClass::Base);
        }
        SpecialHazard::Unknown(symbol) => {
            debug!(item = ?item.display_name(), symbol, "ignoring unknown NFPA special symbol");
        }
        SpecialHazard::None => {}
    }

    tags.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NfpaDiamond;

    fn set(classes: &[HazardClass]) -> HazardSet {
        classes.iter().copied().collect()
    }

    fn ghs(labels: &[&str]) -> InventoryItem {
        InventoryItem::named("test").with_ghs(labels.iter().copied())
    }

    fn diamond(flammability: u8, special: &str) -> NfpaDiamond {
        NfpaDiamond {
            flammability,
            special: SpecialHazard::from_str_loose(special),
            ..Default::default()
        }
    }

    #[test]
    fn test_ghs_table() {
        let cases = [
            ("Clase 1", HazardClass::Explosivo),
            ("Clase 2.1", HazardClass::GasInflamable),
            ("Clase 2.3", HazardClass::GasToxico),
            ("Clase 3", HazardClass::Inflamable),
            ("Clase 4.1", HazardClass::SolidoInflamable),
            ("Clase 4.2", HazardClass::Espontaneo),
            ("Clase 4.3", HazardClass::ReactivoAgua),
            ("Clase 5.1", HazardClass::Oxidante),
            ("Clase 5.2", HazardClass::Peroxido),
            ("Clase 6.1", HazardClass::Toxico),
            ("Clase 8", HazardClass::Corrosivo),
        ];
        for (label, tag) in cases {
            assert_eq!(classify(&ghs(&[label])), set(&[tag]), "label {label}");
        }
    }

    #[test]
    fn test_untagged_ghs_classes() {
        for label in ["Clase 2.2", "Clase 6.2", "Clase 7", "Clase 9", "Clase 2"] {
            assert!(classify(&ghs(&[label])).is_empty(), "label {label}");
        }
    }

    #[test]
    fn test_toxic_gas_is_not_flammable_gas() {
        let classes = classify(&ghs(&["Clase 2.3"]));
        assert_eq!(classes, set(&[HazardClass::GasToxico]));
        assert!(!classes.contains(HazardClass::GasInflamable));
    }

    #[test]
    fn test_ghs_and_nfpa_deduplicate() {
        let item = ghs(&["Clase 3"]).with_nfpa(diamond(3, ""));
        assert_eq!(classify(&item), set(&[HazardClass::Inflamable]));
    }

    #[test]
    fn test_nfpa_flammability_threshold() {
        let low = InventoryItem::named("a").with_nfpa(diamond(1, ""));
        let high = InventoryItem::named("b").with_nfpa(diamond(2, ""));
        assert!(classify(&low).is_empty());
        assert_eq!(classify(&high), set(&[HazardClass::Inflamable]));
    }

    #[test]
    fn test_special_symbols() {
        let cases = [
            ("OX", HazardClass::Oxidante),
            ("W", HazardClass::ReactivoAgua),
            ("W\u{0336}", HazardClass::ReactivoAgua),
            ("ACID", HazardClass::Acido),
            ("ALC", HazardClass::Base),
            ("ALK", HazardClass::Base),
        ];
        for (symbol, tag) in cases {
            let item = InventoryItem::named("x").with_nfpa(diamond(0, symbol));
            assert_eq!(classify(&item), set(&[tag]), "symbol {symbol}");
        }
    }

    #[test]
    fn test_unknown_special_ignored() {
        let item = InventoryItem::named("x").with_nfpa(diamond(0, "RAD"));
        assert!(classify(&item).is_empty());
    }

    #[test]
    fn test_sources_combine() {
        let item = ghs(&["Clase 8", "Clase 6.1"]).with_nfpa(diamond(0, "ACID"));
        assert_eq!(
            classify(&item),
            set(&[HazardClass::Toxico, HazardClass::Corrosivo, HazardClass::Acido])
        );
    }

    #[test]
    fn test_empty_item() {
        assert!(classify(&InventoryItem::default()).is_empty());
    }

    #[test]
    fn test_classify_is_repeatable() {
        let item = ghs(&["Clase 3", "Clase 5.1"]).with_nfpa(diamond(2, "OX"));
        assert_eq!(classify(&item), classify(&item));
    }

    #[test]
    fn test_out_of_range_flammability_is_not_flammable() {
        for raw in [r#"5"#, r#"2.5"#, r#""7""#] {
            let json = format!(r#"{{ "product_name": "X", "nfpa_diamond": {{ "flammability": {raw} }} }}"#);
            let item: InventoryItem = serde_json::from_str(&json).unwrap();
            assert!(!classify(&item).contains(HazardClass::Inflamable), "{raw}");
        }
    }
}
