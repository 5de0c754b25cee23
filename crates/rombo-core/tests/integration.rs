//! End-to-end tests over the fixture inventories in `tests/fixtures`.

use pretty_assertions::assert_eq;
use rombo_core::compat::RuleId;
use rombo_core::inventory::{find_item, parse_json, xlsx::parse_inventory_xlsx};
use rombo_core::model::{InventoryItem, NfpaDiamond, SpecialHazard};
use rombo_core::{build_matrix, check_compatibility, classify, HazardClass, HazardSet, Status};

const BODEGA_JSON: &[u8] = include_bytes!("fixtures/bodega.json");
const INVENTARIO_XLSX: &[u8] = include_bytes!("fixtures/inventario.xlsx");

fn tags(classes: &[HazardClass]) -> HazardSet {
    classes.iter().copied().collect()
}

fn bodega() -> Vec<InventoryItem> {
    parse_json(BODEGA_JSON).unwrap()
}

fn check(items: &[InventoryItem], a: &str, b: &str) -> rombo_core::Verdict {
    check_compatibility(find_item(items, a).unwrap(), find_item(items, b).unwrap())
}

// ---------------------------------------------------------------------------
// Classification of the Firestore-shaped fixture
// ---------------------------------------------------------------------------
#[test]
fn bodega_classification() {
    let items = bodega();
    assert_eq!(items.len(), 8);

    let classes: Vec<HazardSet> = items.iter().map(classify).collect();
    assert_eq!(classes[0], tags(&[HazardClass::Inflamable]));
    assert_eq!(
        classes[1],
        tags(&[HazardClass::Oxidante, HazardClass::Corrosivo])
    );
    assert_eq!(
        classes[2],
        tags(&[HazardClass::ReactivoAgua, HazardClass::Corrosivo])
    );
    assert_eq!(classes[3], tags(&[HazardClass::Corrosivo, HazardClass::Base]));
    assert_eq!(
        classes[4],
        tags(&[HazardClass::GasInflamable, HazardClass::Inflamable])
    );
    assert_eq!(classes[5], tags(&[HazardClass::GasToxico, HazardClass::Oxidante]));
    assert_eq!(
        classes[6],
        tags(&[HazardClass::Explosivo, HazardClass::Inflamable])
    );
    assert!(classes[7].is_empty());
}

// ---------------------------------------------------------------------------
// Pairwise verdicts across the fixture
// ---------------------------------------------------------------------------
#[test]
fn bodega_pair_verdicts() {
    let items = bodega();

    let v = check(&items, "etanol-96", "peroxido-hidrogeno");
    assert_eq!((v.status, v.rule), (Status::Danger, RuleId::FlammableOxidizer));

    let v = check(&items, "nitroglicerina", "arena");
    assert_eq!(v.status, Status::Danger);
    assert_eq!(v.message, "EXPLOSIVOS: Segregar aisladamente de todo.");

    // Oxidizing toxic gas next to a flammable gas: the oxidizer rule wins
    // over the gas segregation rule.
    let v = check(&items, "acetileno", "cloro");
    assert_eq!(v.rule, RuleId::FlammableOxidizer);

    let v = check(&items, "acido-sulfurico", "soda-caustica");
    assert_eq!((v.status, v.rule), (Status::Caution, RuleId::WaterReactive));

    let v = check(&items, "soda-caustica", "Etanol 96%");
    assert_eq!((v.status, v.rule), (Status::Caution, RuleId::CorrosiveFlammable));

    let v = check(&items, "arena", "Soda cáustica");
    assert_eq!(v.status, Status::Ok);
    assert_eq!(v.message, "Compatible");
}

#[test]
fn bodega_matrix() {
    let items = bodega();
    let matrix = build_matrix(&items);
    assert_eq!(matrix.len(), items.len());
    assert_eq!(matrix.labels()[1], "Peróxido de hidrógeno 35%");

    let summary = matrix.summary();
    assert_eq!(summary.pairs, 28);
    assert_eq!(
        summary.same + summary.danger + summary.caution + summary.ok,
        summary.pairs
    );
    // The explosive conflicts with all seven other items.
    let explosive_conflicts = matrix
        .conflicts()
        .into_iter()
        .filter(|c| c.verdict.rule == RuleId::Explosives)
        .count();
    assert_eq!(explosive_conflicts, 7);

    for i in 0..matrix.len() {
        for j in 0..matrix.len() {
            assert_eq!(
                matrix.get(i, j).unwrap().status,
                matrix.get(j, i).unwrap().status
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Spreadsheet inventory
// ---------------------------------------------------------------------------
#[test]
fn xlsx_inventory_rows() {
    let items = parse_inventory_xlsx(INVENTARIO_XLSX).unwrap();
    // Parsing stops at the first empty product cell.
    assert_eq!(items.len(), 6);

    let acetona = &items[0];
    assert_eq!(acetona.id.as_deref(), Some("Q-001"));
    assert_eq!(acetona.product_name.as_deref(), Some("Acetona"));
    assert_eq!(acetona.nfpa_diamond.flammability, 3);
    assert_eq!(acetona.nfpa_diamond.special, SpecialHazard::None);

    let cianuro = &items[5];
    assert_eq!(cianuro.ghs_classes.len(), 2);
    assert_eq!(
        classify(cianuro),
        tags(&[HazardClass::Toxico, HazardClass::Corrosivo])
    );
}

#[test]
fn xlsx_inventory_verdicts() {
    let items = parse_inventory_xlsx(INVENTARIO_XLSX).unwrap();

    let v = check(&items, "Acetona", "Permanganato de potasio");
    assert_eq!(v.status, Status::Danger);
    assert_eq!(v.icon, "🔥");

    let v = check(&items, "Q-003", "Q-004");
    assert_eq!(v.rule, RuleId::AcidBase);
    assert_eq!(v.severity_color, "#fd7e14");

    let v = check(&items, "Q-005", "Q-002");
    assert_eq!(v.rule, RuleId::WaterReactive);
}

// ---------------------------------------------------------------------------
// Behaviour examples for the engine contract
// ---------------------------------------------------------------------------
#[test]
fn flammable_from_two_sources_is_one_tag() {
    let item = InventoryItem::default()
        .with_ghs(["Clase 3"])
        .with_nfpa(NfpaDiamond {
            flammability: 3,
            ..Default::default()
        });
    assert_eq!(classify(&item), tags(&[HazardClass::Inflamable]));
}

#[test]
fn corrosive_with_acid_symbol_meets_base() {
    let corrosive = InventoryItem::default().with_id("a").with_ghs(["Clase 8"]);
    let acid = corrosive.clone().with_nfpa(NfpaDiamond {
        special: SpecialHazard::Acid,
        ..Default::default()
    });
    let base = InventoryItem::default().with_id("b").with_nfpa(NfpaDiamond {
        special: SpecialHazard::from_str_loose("ALC"),
        ..Default::default()
    });

    assert_eq!(check_compatibility(&corrosive, &base).status, Status::Ok);
    assert_eq!(check_compatibility(&acid, &base).status, Status::Danger);
}

#[test]
fn items_without_fields() {
    let json = br#"[{}, {}]"#;
    let items = parse_json(json).unwrap();
    let v = check_compatibility(&items[0], &items[1]);
    assert_eq!(v.status, Status::Ok);
    assert_eq!(v.icon, "✅");
    assert_eq!(v.message, "Compatible");
}
