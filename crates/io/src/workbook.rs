// Excel workbook reading (xlsx, xls, xlsb, ods)
//
// Sheet listing and formula extraction only. Files are never written back;
// extracted formulas are carried as literal text for the CSV tables.

use std::collections::BTreeSet;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use tracing::{error, info};

/// List the workbook's sheet names in file order.
pub fn read_sheet_names(path: &Path) -> Result<Vec<String>, String> {
    info!("loading workbook from {}", path.display());
    let workbook: Sheets<_> = open_workbook_auto(path)
        .map_err(|e| format!("Failed to open workbook '{}': {}", path.display(), e))?;
    let names = workbook.sheet_names().to_vec();
    info!("found sheets: {:?}", names);
    Ok(names)
}

/// Extract the distinct formula strings found in the first `row_bound`
/// rows of one sheet, across all columns.
///
/// Two sources contribute:
/// - the sheet's formula range. Stored formula text carries no leading
///   `=`, so it is reconstituted here;
/// - string cells in the data range whose text begins with `=`. A literal
///   text cell that looks like a formula cannot be told apart from a real
///   one at this layer, and both are kept.
///
/// Each result is prefixed with an apostrophe so downstream CSV consumers
/// treat it as text rather than a live formula.
pub fn read_formulas(
    path: &Path,
    sheet_name: &str,
    row_bound: usize,
) -> Result<BTreeSet<String>, String> {
    let mut workbook: Sheets<_> = open_workbook_auto(path)
        .map_err(|e| format!("Failed to open workbook '{}': {}", path.display(), e))?;

    let mut formulas = BTreeSet::new();

    let formula_range = workbook
        .worksheet_formula(sheet_name)
        .map_err(|e| format!("Failed to read sheet '{}': {}", sheet_name, e))?;

    // Ranges may not begin at A1; the bound applies to absolute rows.
    let (start_row, _) = formula_range.start().unwrap_or((0, 0));
    for (row_idx, row) in formula_range.rows().enumerate() {
        let target_row = start_row as usize + row_idx;
        if target_row >= row_bound {
            break;
        }
        for cell in row {
            if !cell.is_empty() {
                formulas.insert(format!("'={}", cell));
            }
        }
    }

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| format!("Failed to read sheet '{}': {}", sheet_name, e))?;

    let (start_row, _) = range.start().unwrap_or((0, 0));
    for (row_idx, row) in range.rows().enumerate() {
        let target_row = start_row as usize + row_idx;
        if target_row >= row_bound {
            break;
        }
        for cell in row {
            if let Data::String(s) = cell {
                if s.starts_with('=') {
                    formulas.insert(format!("'{}", s));
                }
            }
        }
    }

    if formulas.is_empty() {
        info!("no formulas found in sheet '{}'", sheet_name);
    } else {
        info!("found {} formulas in sheet '{}'", formulas.len(), sheet_name);
    }
    Ok(formulas)
}

/// Sheet listing that swallows read failures into an empty list.
///
/// The error is logged and lost; an empty result is ambiguous between
/// "workbook has no sheets" and "workbook could not be read". Callers
/// that need to distinguish should use [`read_sheet_names`].
pub fn sheet_names_or_empty(path: &Path) -> Vec<String> {
    read_sheet_names(path).unwrap_or_else(|e| {
        error!("{}", e);
        Vec::new()
    })
}

/// Formula extraction that swallows read failures into an empty set.
///
/// Same ambiguity as [`sheet_names_or_empty`]; use [`read_formulas`] to
/// observe the failure.
pub fn formulas_or_empty(path: &Path, sheet_name: &str, row_bound: usize) -> BTreeSet<String> {
    read_formulas(path, sheet_name, row_bound).unwrap_or_else(|e| {
        error!("{}", e);
        BTreeSet::new()
    })
}
