use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Normalized hazard tag derived from GHS labels or the NFPA diamond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HazardClass {
    Explosivo,
    GasInflamable,
    GasToxico,
    Inflamable,
    SolidoInflamable,
    Espontaneo,
    ReactivoAgua,
    Oxidante,
    Peroxido,
    Toxico,
    Corrosivo,
    Acido,
    Base,
}

/// Tags that count as a fuel when paired with oxidizers, peroxides or
/// corrosives.
pub const FLAMMABLE: [HazardClass; 4] = [
    HazardClass::Inflamable,
    HazardClass::GasInflamable,
    HazardClass::SolidoInflamable,
    HazardClass::Espontaneo,
];

impl HazardClass {
    pub const ALL: [HazardClass; 13] = [
        HazardClass::Explosivo,
        HazardClass::GasInflamable,
        HazardClass::GasToxico,
        HazardClass::Inflamable,
        HazardClass::SolidoInflamable,
        HazardClass::Espontaneo,
        HazardClass::ReactivoAgua,
        HazardClass::Oxidante,
        HazardClass::Peroxido,
        HazardClass::Toxico,
        HazardClass::Corrosivo,
        HazardClass::Acido,
        HazardClass::Base,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HazardClass::Explosivo => "EXPLOSIVO",
            HazardClass::GasInflamable => "GAS_INFLAMABLE",
            HazardClass::GasToxico => "GAS_TOXICO",
            HazardClass::Inflamable => "INFLAMABLE",
            HazardClass::SolidoInflamable => "SOLIDO_INFLAMABLE",
            HazardClass::Espontaneo => "ESPONTANEO",
            HazardClass::ReactivoAgua => "REACTIVO_AGUA",
            HazardClass::Oxidante => "OXIDANTE",
            HazardClass::Peroxido => "PEROXIDO",
            HazardClass::Toxico => "TOXICO",
            HazardClass::Corrosivo => "CORROSIVO",
            HazardClass::Acido => "ACIDO",
            HazardClass::Base => "BASE",
        }
    }
}

impl fmt::Display for HazardClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// The hazard tags of one item. Built once by the classifier and read-only
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HazardSet(BTreeSet<HazardClass>);

impl HazardSet {
    pub fn contains(&self, class: HazardClass) -> bool {
        self.0.contains(&class)
    }

    pub fn contains_any(&self, classes: &[HazardClass]) -> bool {
        classes.iter().any(|c| self.0.contains(c))
    }

    /// Carries at least one tag of the [`FLAMMABLE`] group.
    pub fn is_flammable(&self) -> bool {
        self.contains_any(&FLAMMABLE)
    }

    pub fn iter(&self) -> impl Iterator<Item = HazardClass> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<HazardClass> for HazardSet {
    fn from_iter<I: IntoIterator<Item = HazardClass>>(iter: I) -> Self {
        HazardSet(iter.into_iter().collect())
    }
}

impl fmt::Display for HazardSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("-");
        }
        let names: Vec<&str> = self.0.iter().map(|c| c.as_str()).collect();
        f.write_str(&names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_names() {
        assert_eq!(
            serde_json::to_string(&HazardClass::SolidoInflamable).unwrap(),
            r#""SOLIDO_INFLAMABLE""#
        );
        for class in HazardClass::ALL {
            let json = serde_json::to_string(&class).unwrap();
            assert_eq!(json, format!("\"{}\"", class.as_str()));
        }
    }

    #[test]
    fn test_set_deduplicates() {
        let set: HazardSet = [HazardClass::Inflamable, HazardClass::Inflamable]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_flammable_group() {
        let set: HazardSet = [HazardClass::Espontaneo].into_iter().collect();
        assert!(set.is_flammable());
        let set: HazardSet = [HazardClass::Toxico, HazardClass::Oxidante]
            .into_iter()
            .collect();
        assert!(!set.is_flammable());
        assert!(!HazardSet::default().is_flammable());
    }

    #[test]
    fn test_display() {
        let set: HazardSet = [HazardClass::Corrosivo, HazardClass::Acido]
            .into_iter()
            .collect();
        assert_eq!(set.to_string(), "CORROSIVO, ACIDO");
        assert_eq!(HazardSet::default().to_string(), "-");
    }
}
