use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use tracing::debug;

use crate::error::RomboError;
use crate::model::{
    rating_from_f64, rating_from_str, GhsLabels, InventoryItem, NfpaDiamond, SpecialHazard,
};

/// Preferred sheet name; the first sheet is used when it is absent.
pub const INVENTORY_SHEET: &str = "Inventario";

/// Column positions located from the header row.
#[derive(Debug, Default, PartialEq, Eq)]
struct Columns {
    product: usize,
    id: Option<usize>,
    ghs: Option<usize>,
    health: Option<usize>,
    flammability: Option<usize>,
    reactivity: Option<usize>,
    special: Option<usize>,
}

impl Columns {
    fn locate(header: &[Data]) -> Result<Columns, RomboError> {
        let mut product = None;
        let mut columns = Columns::default();

        for (idx, cell) in header.iter().enumerate() {
            let Some(name) = cell_as_string(cell) else {
                continue;
            };
            let name = fold_header(&name);

            if name == "id" {
                columns.id.get_or_insert(idx);
            } else if name.starts_with("producto") || name.starts_with("nombre") {
                product.get_or_insert(idx);
            } else if name.contains("clasificacion") || name.contains("ghs") {
                columns.ghs.get_or_insert(idx);
            } else if name.contains("salud") {
                columns.health.get_or_insert(idx);
            } else if name.contains("inflamabilidad") {
                columns.flammability.get_or_insert(idx);
            } else if name.contains("reactividad") {
                columns.reactivity.get_or_insert(idx);
            } else if name.contains("especial") {
                columns.special.get_or_insert(idx);
            }
        }

        columns.product = product.ok_or_else(|| {
            RomboError::ParseError("header row has no 'Producto' or 'Nombre' column".into())
        })?;
        Ok(columns)
    }
}

/// Parse an inventory spreadsheet into items.
///
/// Reads the "Inventario" sheet (or the first sheet). Row 1 is the header;
/// data rows follow until the first row with an empty product cell.
pub fn parse_inventory_xlsx(bytes: &[u8]) -> Result<Vec<InventoryItem>, RomboError> {
    let cursor = Cursor::new(bytes);
    let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(cursor)
        .map_err(|e| RomboError::ParseError(format!("failed to open xlsx: {e}")))?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = sheet_names
        .iter()
        .find(|name| fold_header(name) == fold_header(INVENTORY_SHEET))
        .or_else(|| sheet_names.first())
        .cloned()
        .ok_or_else(|| RomboError::ParseError("workbook has no sheets".into()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| RomboError::ParseError(format!("failed to read sheet '{sheet_name}': {e}")))?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| RomboError::ParseError(format!("sheet '{sheet_name}' is empty")))?;
    let columns = Columns::locate(header)?;

    let mut items = Vec::new();
    for row in rows {
        let product_name = match row.get(columns.product).and_then(cell_as_string) {
            Some(name) => name,
            None => break, // Empty product cell = end of data
        };

        let text = |col: Option<usize>| col.and_then(|c| row.get(c)).and_then(cell_as_string);
        let rating = |col: Option<usize>| col.and_then(|c| row.get(c)).map(cell_as_rating).unwrap_or(0);

        let ghs_classes = text(columns.ghs)
            .map(|cell| GhsLabels::new(split_labels(&cell)))
            .unwrap_or_default();

        items.push(InventoryItem {
            id: text(columns.id),
            product_name: Some(product_name),
            ghs_classes,
            nfpa_diamond: NfpaDiamond {
                health: rating(columns.health),
                flammability: rating(columns.flammability),
                reactivity: rating(columns.reactivity),
                special: text(columns.special)
                    .map(|s| SpecialHazard::from_str_loose(&s))
                    .unwrap_or_default(),
            },
        });
    }

    if items.is_empty() {
        return Err(RomboError::ParseError(format!(
            "no inventory rows found in sheet '{sheet_name}'"
        )));
    }

    debug!(sheet = %sheet_name, items = items.len(), "parsed inventory spreadsheet");
    Ok(items)
}

/// Split a cell holding several labels ("Clase 3; Clase 8").
fn split_labels(cell: &str) -> Vec<String> {
    cell.split([',', ';', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lowercase and strip Spanish accents so "Clasificación" matches
/// "clasificacion".
fn fold_header(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' => 'a',
            'é' | 'è' | 'ë' => 'e',
            'í' | 'ì' | 'ï' => 'i',
            'ó' | 'ò' | 'ö' => 'o',
            'ú' | 'ù' | 'ü' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

fn cell_as_string(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Empty => None,
        _ => Some(format!("{cell}")),
    }
}

fn cell_as_rating(cell: &Data) -> u8 {
    match cell {
        Data::Float(f) => rating_from_f64(*f),
        Data::Int(i) => rating_from_f64(*i as f64),
        Data::String(s) => rating_from_str(s),
        _ => 0,
    }
}
