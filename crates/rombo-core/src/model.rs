use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// UN/GHS transport hazard class, parsed from labels such as "Clase 5.1".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GhsClass {
    Explosive,
    FlammableGas,
    NonFlammableGas,
    ToxicGas,
    FlammableLiquid,
    FlammableSolid,
    SpontaneouslyCombustible,
    DangerousWhenWet,
    Oxidizer,
    OrganicPeroxide,
    Toxic,
    Infectious,
    Radioactive,
    Corrosive,
    Miscellaneous,
}

/// Keywords that introduce a class number inside a label, longest first.
const CLASS_KEYWORDS: &[&str] = &["classe", "clase", "class"];

impl GhsClass {
    /// Map a numeric class code (e.g. 5.1 as `(5, Some(1))`) to a class.
    ///
    /// The match is exact: "2" alone is not a class, and "2.3" never
    /// resolves to the flammable gas division.
    pub fn from_code(major: u32, minor: Option<u32>) -> Option<GhsClass> {
        use GhsClass::*;
        match (major, minor) {
            (1, _) => Some(Explosive),
            (2, Some(1)) => Some(FlammableGas),
            (2, Some(2)) => Some(NonFlammableGas),
            (2, Some(3)) => Some(ToxicGas),
            (3, _) => Some(FlammableLiquid),
            (4, Some(1)) => Some(FlammableSolid),
            (4, Some(2)) => Some(SpontaneouslyCombustible),
            (4, Some(3)) => Some(DangerousWhenWet),
            (5, Some(1)) => Some(Oxidizer),
            (5, Some(2)) => Some(OrganicPeroxide),
            (6, Some(1)) => Some(Toxic),
            (6, Some(2)) => Some(Infectious),
            (7, _) => Some(Radioactive),
            (8, _) => Some(Corrosive),
            (9, _) => Some(Miscellaneous),
            _ => None,
        }
    }

    /// Extract every class named in a free-text label.
    ///
    /// A label may name several classes ("Clase 3, Clase 8"). Each class
    /// appears once in the result, in order of first appearance.
    pub fn parse_label(label: &str) -> Vec<GhsClass> {
        let lower = label.to_lowercase();
        let mut found = Vec::new();
        let mut rest = lower.as_str();

        while let Some((pos, keyword_len)) = next_keyword(rest) {
            let after = &rest[pos + keyword_len..];
            let code = after.trim_start_matches(|c: char| c.is_whitespace() || c == ':');
            let token: String = code
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == '.')
                .collect();

            if let Some(class) = parse_code(&token).and_then(|(major, minor)| Self::from_code(major, minor)) {
                if !found.contains(&class) {
                    found.push(class);
                }
            }
            rest = after;
        }

        found
    }

    /// The class code as written on placards ("2.1", "8").
    pub fn code(&self) -> &'static str {
        match self {
            GhsClass::Explosive => "1",
            GhsClass::FlammableGas => "2.1",
            GhsClass::NonFlammableGas => "2.2",
            GhsClass::ToxicGas => "2.3",
            GhsClass::FlammableLiquid => "3",
            GhsClass::FlammableSolid => "4.1",
            GhsClass::SpontaneouslyCombustible => "4.2",
            GhsClass::DangerousWhenWet => "4.3",
            GhsClass::Oxidizer => "5.1",
            GhsClass::OrganicPeroxide => "5.2",
            GhsClass::Toxic => "6.1",
            GhsClass::Infectious => "6.2",
            GhsClass::Radioactive => "7",
            GhsClass::Corrosive => "8",
            GhsClass::Miscellaneous => "9",
        }
    }
}

impl fmt::Display for GhsClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Clase {}", self.code())
    }
}

fn next_keyword(haystack: &str) -> Option<(usize, usize)> {
    CLASS_KEYWORDS
        .iter()
        .filter_map(|kw| haystack.find(kw).map(|pos| (pos, kw.len())))
        // Earliest position wins; at the same position the longest keyword.
        .min_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)))
}

fn parse_code(token: &str) -> Option<(u32, Option<u32>)> {
    let token = token.trim_end_matches('.');
    let mut parts = token.split('.');
    let major = parts.next()?.parse::<u32>().ok()?;
    let minor = match parts.next() {
        Some(m) => Some(m.parse::<u32>().ok()?),
        None => None,
    };
    Some((major, minor))
}

/// One transport-class label as supplied by the inventory, with the classes
/// it names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GhsLabel {
    pub raw: String,
    pub classes: Vec<GhsClass>,
}

impl GhsLabel {
    pub fn parse(raw: impl Into<String>) -> GhsLabel {
        let raw = raw.into();
        let classes = GhsClass::parse_label(&raw);
        GhsLabel { raw, classes }
    }

    pub fn is_recognized(&self) -> bool {
        !self.classes.is_empty()
    }
}

/// The `ghs_classes` field of an item, always a sequence.
///
/// Source data supplies either a single string or a list of strings; both
/// deserialize into this type, as does `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GhsLabels(Vec<GhsLabel>);

impl GhsLabels {
    pub fn new<I, S>(labels: I) -> GhsLabels
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        GhsLabels(labels.into_iter().map(GhsLabel::parse).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &GhsLabel> {
        self.0.iter()
    }

    /// All classes named by the labels, in label order (may repeat).
    pub fn classes(&self) -> impl Iterator<Item = GhsClass> + '_ {
        self.0.iter().flat_map(|l| l.classes.iter().copied())
    }

    /// Labels that name no known class.
    pub fn unrecognized(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|l| !l.is_recognized())
            .map(|l| l.raw.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for GhsLabels {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|l| l.raw.as_str()))
    }
}

impl GhsLabels {
    /// Labels from a loosely typed value: a string, a sequence of strings
    /// (other entries dropped), or anything else as no labels.
    fn from_value(value: Value) -> GhsLabels {
        let labels = match value {
            Value::String(s) => vec![s],
            Value::Array(values) => values
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };
        GhsLabels::new(labels.into_iter().filter(|s| !s.trim().is_empty()))
    }
}

impl<'de> Deserialize<'de> for GhsLabels {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(GhsLabels::from_value(Value::deserialize(deserializer)?))
    }
}

/// The special-hazard quadrant of an NFPA 704 diamond.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum SpecialHazard {
    #[default]
    None,
    Oxidizer,
    WaterReactive,
    Acid,
    Alkali,
    /// Any other marking; carried for display only.
    Unknown(String),
}

impl SpecialHazard {
    pub fn from_str_loose(s: &str) -> SpecialHazard {
        let upper = s.trim().to_uppercase();
        if upper.is_empty() {
            return SpecialHazard::None;
        }

        // "W̶" and "-W-" are the struck-through variants of the water marking.
        let unstruck: String = upper
            .chars()
            .filter(|c| !matches!(c, '-' | '\u{0335}' | '\u{0336}' | '\u{0337}' | '\u{0338}'))
            .collect();

        match (upper.as_str(), unstruck.as_str()) {
            ("OX", _) => SpecialHazard::Oxidizer,
            (_, "W") => SpecialHazard::WaterReactive,
            ("ACID", _) => SpecialHazard::Acid,
            ("ALC" | "ALK", _) => SpecialHazard::Alkali,
            _ => SpecialHazard::Unknown(s.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SpecialHazard::None => "",
            SpecialHazard::Oxidizer => "OX",
            SpecialHazard::WaterReactive => "W",
            SpecialHazard::Acid => "ACID",
            SpecialHazard::Alkali => "ALK",
            SpecialHazard::Unknown(s) => s,
        }
    }
}

impl fmt::Display for SpecialHazard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SpecialHazard {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl SpecialHazard {
    fn from_value(value: Value) -> SpecialHazard {
        match value {
            Value::String(s) => SpecialHazard::from_str_loose(&s),
            _ => SpecialHazard::None,
        }
    }
}

impl<'de> Deserialize<'de> for SpecialHazard {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(SpecialHazard::from_value(Value::deserialize(deserializer)?))
    }
}

/// NFPA 704 safety diamond ("rombo de seguridad").
///
/// Deserializes from the English or Spanish field names. Ratings outside
/// 0..=4 read as 0, so an out-of-range flammability of 5 does not count as
/// flammable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NfpaDiamond {
    pub health: u8,
    pub flammability: u8,
    pub reactivity: u8,
    pub special: SpecialHazard,
}

impl NfpaDiamond {
    fn from_value(value: Value) -> NfpaDiamond {
        let Value::Object(mut fields) = value else {
            return NfpaDiamond::default();
        };
        NfpaDiamond {
            health: take_field(&mut fields, &["health", "salud"])
                .map(rating_from_value)
                .unwrap_or(0),
            flammability: take_field(&mut fields, &["flammability", "inflamabilidad"])
                .map(rating_from_value)
                .unwrap_or(0),
            reactivity: take_field(&mut fields, &["reactivity", "reactividad"])
                .map(rating_from_value)
                .unwrap_or(0),
            special: take_field(&mut fields, &["special", "especial"])
                .map(SpecialHazard::from_value)
                .unwrap_or_default(),
        }
    }
}

impl<'de> Deserialize<'de> for NfpaDiamond {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(NfpaDiamond::from_value(Value::deserialize(deserializer)?))
    }
}

/// Highest rating on any NFPA 704 axis.
pub const NFPA_MAX_RATING: u8 = 4;

/// A chemical product as recorded in an inventory.
///
/// Every field is optional; a record with nothing but a name is valid and
/// simply classifies as carrying no hazards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InventoryItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    pub ghs_classes: GhsLabels,
    pub nfpa_diamond: NfpaDiamond,
}

/// Accepts snake_case, camelCase and Spanish field names. When a record
/// carries several spellings of one field the first one that is neither null
/// nor blank, in that order, wins.
impl<'de> Deserialize<'de> for InventoryItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = serde_json::Map::deserialize(deserializer)?;
        Ok(InventoryItem {
            id: take_field(&mut fields, &["id"]).and_then(text_from_value),
            product_name: take_field(
                &mut fields,
                &["product_name", "productName", "nombreProducto"],
            )
            .and_then(text_from_value),
            ghs_classes: take_field(
                &mut fields,
                &["ghs_classes", "ghsClasses", "clasificacionPeligro"],
            )
            .map(GhsLabels::from_value)
            .unwrap_or_default(),
            nfpa_diamond: take_field(
                &mut fields,
                &["nfpa_diamond", "nfpaDiamond", "romboSeguridad"],
            )
            .map(NfpaDiamond::from_value)
            .unwrap_or_default(),
        })
    }
}

impl InventoryItem {
    pub fn named(product_name: impl Into<String>) -> InventoryItem {
        InventoryItem {
            product_name: non_blank(product_name.into()),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> InventoryItem {
        self.id = non_blank(id.into());
        self
    }

    pub fn with_ghs<I, S>(mut self, labels: I) -> InventoryItem
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ghs_classes = GhsLabels::new(labels);
        self
    }

    pub fn with_nfpa(mut self, diamond: NfpaDiamond) -> InventoryItem {
        self.nfpa_diamond = diamond;
        self
    }

    /// Whether two records describe the same substance.
    ///
    /// True when both carry the same id, or both carry the same product name
    /// (exact, case-sensitive). Missing fields never match each other.
    pub fn is_same_substance(&self, other: &InventoryItem) -> bool {
        let same_id = matches!((&self.id, &other.id), (Some(a), Some(b)) if a == b);
        let same_name =
            matches!((&self.product_name, &other.product_name), (Some(a), Some(b)) if a == b);
        same_id || same_name
    }

    /// Name for display: the product name, falling back to the id.
    pub fn display_name(&self) -> Option<&str> {
        self.product_name.as_deref().or(self.id.as_deref())
    }
}

fn non_blank(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Parse an NFPA rating from a number. Anything outside 0..=4 or with a
/// fractional part reads as 0.
pub(crate) fn rating_from_f64(v: f64) -> u8 {
    if v.fract() == 0.0 && (0.0..=f64::from(NFPA_MAX_RATING)).contains(&v) {
        v as u8
    } else {
        tracing::debug!(value = v, "ignoring out-of-range NFPA rating");
        0
    }
}

pub(crate) fn rating_from_str(s: &str) -> u8 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0;
    }
    match trimmed.parse::<f64>() {
        Ok(v) => rating_from_f64(v),
        Err(_) => {
            tracing::debug!(value = trimmed, "ignoring non-numeric NFPA rating");
            0
        }
    }
}

/// Remove every spelling of a field and return the first value that is
/// neither null nor a blank string.
fn take_field(fields: &mut serde_json::Map<String, Value>, names: &[&str]) -> Option<Value> {
    let mut found = None;
    for name in names {
        match fields.remove(*name) {
            Some(Value::Null) | None => {}
            Some(Value::String(s)) if s.trim().is_empty() => {}
            Some(value) => {
                found.get_or_insert(value);
            }
        }
    }
    found
}

fn rating_from_value(value: Value) -> u8 {
    match value {
        Value::Number(n) => n.as_f64().map(rating_from_f64).unwrap_or(0),
        Value::String(s) => rating_from_str(&s),
        _ => 0,
    }
}

fn text_from_value(value: Value) -> Option<String> {
    match value {
        Value::String(s) => non_blank(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
