// Cross-sheet dependency inference by substring matching

use std::collections::BTreeSet;

use crate::map::DependencyMap;

/// One sheet's extracted formula set, in workbook order.
#[derive(Debug, Clone, Default)]
pub struct SheetFormulas {
    pub sheet: String,
    pub formulas: BTreeSet<String>,
}

impl SheetFormulas {
    pub fn new(sheet: impl Into<String>, formulas: BTreeSet<String>) -> Self {
        Self {
            sheet: sheet.into(),
            formulas,
        }
    }
}

/// Inference output at both granularities.
///
/// `by_sheet` has one entry per input sheet (empty list when nothing
/// matched). `by_formula` has one entry per formula, keyed by the
/// composite label `"{sheet} - {formula}"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inference {
    pub by_sheet: DependencyMap,
    pub by_formula: DependencyMap,
}

/// Infer which sheets reference which other sheets.
///
/// For every sheet S, every formula of S, and every other sheet T, record
/// T as a dependency of S when T's name occurs as a contiguous substring
/// of the formula text. No normalization or word-boundary check is
/// applied: a sheet named "A" matches inside "=AA1+1". That imprecision
/// is the tool's documented matching policy, not an accident.
///
/// A sheet never depends on itself, and a dependency is appended once per
/// matching formula, so the per-sheet lists can repeat names.
pub fn infer_dependencies(sheets: &[SheetFormulas]) -> Inference {
    let names: Vec<&str> = sheets.iter().map(|s| s.sheet.as_str()).collect();
    let mut inference = Inference::default();

    for entry in sheets {
        inference.by_sheet.entry(&entry.sheet);

        for formula in &entry.formulas {
            let label = format!("{} - {}", entry.sheet, formula);
            inference.by_formula.entry(&label);

            for &other in &names {
                if other != entry.sheet && formula.contains(other) {
                    inference.by_sheet.push_dependency(&entry.sheet, other);
                    inference.by_formula.push_dependency(&label, other);
                }
            }
        }
    }

    inference
}
