// End-to-end pipeline tests over fabricated workbooks

use std::fs;
use std::path::Path;

use rust_xlsxwriter::Workbook;
use tempfile::tempdir;

use sheetgraph_cli::analyze;
use sheetgraph_cli::settings::Settings;
use sheetgraph_io::table;

fn write_workbook(path: &Path) {
    let mut workbook = Workbook::new();

    let plan = workbook.add_worksheet();
    plan.set_name("Plan").unwrap();
    plan.write_formula(0, 0, "=Actuals!B2").unwrap();

    let actuals = workbook.add_worksheet();
    actuals.set_name("Actuals").unwrap();
    actuals.write_number(1, 1, 42.0).unwrap();

    let notes = workbook.add_worksheet();
    notes.set_name("Notes").unwrap();
    notes.write_formula(2, 0, "=Plan!A1+Actuals!A1").unwrap();

    workbook.save(path).unwrap();
}

fn settings_for(dir: &Path, input_name: &str) -> Settings {
    let mut settings = Settings::default();
    settings.input = dir.join(input_name);
    settings.derive_outputs(dir);
    settings
}

fn quiet() -> analyze::Options {
    analyze::Options {
        per_formula: false,
        dot: false,
        no_view: true,
    }
}

#[test]
fn test_analyze_end_to_end() {
    let dir = tempdir().unwrap();
    let settings = settings_for(dir.path(), "plan_q3.xlsx");
    write_workbook(&settings.input);

    analyze::run(&settings, &quiet()).unwrap();

    // Output names derive from the input file's first four characters
    assert_eq!(
        settings.dependencies_csv.file_name().unwrap(),
        "plan_dependencies.csv"
    );

    let map = table::load_dependencies(&settings.dependencies_csv).unwrap();
    assert_eq!(map.get("Plan"), Some(&["Actuals".to_string()][..]));
    assert_eq!(map.get("Actuals"), Some(&[][..]));
    assert_eq!(
        map.get("Notes"),
        Some(&["Plan".to_string(), "Actuals".to_string()][..])
    );

    let formulas = fs::read_to_string(&settings.formulas_csv).unwrap();
    let header = formulas.lines().next().unwrap();
    assert!(header.starts_with("sheet_name,formula001,"));
    assert!(formulas.contains("'=Actuals!B2"));

    let svg = fs::read_to_string(&settings.graph_svg).unwrap();
    assert!(svg.contains(">Plan</text>"));
    assert!(svg.contains(">Actuals</text>"));
}

#[test]
fn test_analyze_writes_dot_and_formula_graph_on_request() {
    let dir = tempdir().unwrap();
    let settings = settings_for(dir.path(), "plan_q3.xlsx");
    write_workbook(&settings.input);

    let opts = analyze::Options {
        per_formula: true,
        dot: true,
        no_view: true,
    };
    analyze::run(&settings, &opts).unwrap();

    let dot = fs::read_to_string(settings.graph_svg.with_extension("dot")).unwrap();
    assert!(dot.contains("\"Plan\" -> \"Actuals\";"));

    let formula_svg = fs::read_to_string(settings.formula_graph_path()).unwrap();
    assert!(formula_svg.contains("Plan - '=Actuals!B2"));
}

#[test]
fn test_missing_workbook_still_reaches_persistence() {
    let dir = tempdir().unwrap();
    let settings = settings_for(dir.path(), "gone.xlsx");

    analyze::run(&settings, &quiet()).unwrap();

    // No sheets: an empty dependency table and a header-only formulas table
    let deps = fs::read_to_string(&settings.dependencies_csv).unwrap();
    assert!(deps.is_empty());
    let formulas = fs::read_to_string(&settings.formulas_csv).unwrap();
    assert_eq!(formulas.lines().count(), 1);
    assert!(settings.graph_svg.exists());
}

#[test]
fn test_unknown_layout_aborts_after_tables_before_drawing() {
    let dir = tempdir().unwrap();
    let mut settings = settings_for(dir.path(), "plan_q3.xlsx");
    write_workbook(&settings.input);
    settings.layout = "hexagonal".to_string();

    let err = analyze::run(&settings, &quiet()).unwrap_err();
    assert!(err.contains("hexagonal"));

    // Tables were persisted before the failure; nothing was drawn
    assert!(settings.dependencies_csv.exists());
    assert!(!settings.graph_svg.exists());
}

#[test]
fn test_render_existing_table_round_trip() {
    let dir = tempdir().unwrap();
    let settings = settings_for(dir.path(), "plan_q3.xlsx");
    write_workbook(&settings.input);
    analyze::run(&settings, &quiet()).unwrap();

    let out = dir.path().join("replay.svg");
    let opts = sheetgraph_cli::existing::Options {
        dot: false,
        no_view: true,
    };
    sheetgraph_cli::existing::run(
        &settings.dependencies_csv,
        "kamada_kawai",
        Some(out.clone()),
        &opts,
    )
    .unwrap();

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains(">Notes</text>"));
}
