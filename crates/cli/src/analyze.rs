// The analyze pipeline: list sheets, extract formulas, infer
// dependencies, persist both tables, draw the graph

use std::fs;
use std::path::Path;
use std::time::Instant;

use sheetgraph_core::{infer_dependencies, SheetFormulas};
use sheetgraph_io::{table, workbook};
use sheetgraph_render::viewer;

use crate::settings::Settings;

#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Also draw the per-formula dependency graph
    pub per_formula: bool,
    /// Also write the graph in Graphviz DOT form
    pub dot: bool,
    /// Skip launching the system viewer
    pub no_view: bool,
}

/// Run the whole pipeline for one workbook.
///
/// Read failures are swallowed into empty sheets/formula sets so the run
/// always reaches persistence; only table writes and rendering abort.
pub fn run(settings: &Settings, opts: &Options) -> Result<(), String> {
    let started = Instant::now();

    let sheet_names = workbook::sheet_names_or_empty(&settings.input);
    println!(
        "The workbook at {} contains sheets {:?}",
        settings.input.display(),
        sheet_names
    );

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for name in &sheet_names {
        println!("Processing sheet: {} ...", name);
        let formulas = workbook::formulas_or_empty(&settings.input, name, settings.rows);
        sheets.push(SheetFormulas::new(name.clone(), formulas));
    }

    let inference = infer_dependencies(&sheets);

    ensure_parent(&settings.formulas_csv)?;
    ensure_parent(&settings.dependencies_csv)?;
    ensure_parent(&settings.graph_svg)?;

    table::save_formulas(&sheets, &settings.formulas_csv, settings.cols)?;
    table::save_dependencies(&inference.by_sheet, &settings.dependencies_csv)?;
    println!(
        "Dependencies have been written to {}",
        settings.dependencies_csv.display()
    );
    println!(
        "Formulas have been written to {}",
        settings.formulas_csv.display()
    );

    // Render-time layout validation: an unknown name aborts here, after
    // persistence but before anything is drawn
    let svg = sheetgraph_render::render_svg(
        &inference.by_sheet,
        &settings.layout,
        "Sheet Dependencies Overview",
    )?;
    fs::write(&settings.graph_svg, svg).map_err(|e| e.to_string())?;

    let mut formula_graph = None;
    if opts.per_formula {
        let svg = sheetgraph_render::render_svg(
            &inference.by_formula,
            &settings.layout,
            "Formula Dependencies Overview",
        )?;
        let path = settings.formula_graph_path();
        fs::write(&path, svg).map_err(|e| e.to_string())?;
        formula_graph = Some(path);
    }

    if opts.dot {
        let dot = sheetgraph_render::render_dot(&inference.by_sheet, "Sheet Dependencies Overview");
        fs::write(settings.graph_svg.with_extension("dot"), dot).map_err(|e| e.to_string())?;
    }

    if !opts.no_view {
        // All-but-last viewers are non-blocking so the graphs can coexist;
        // the last one holds the run open until it is dismissed
        if let Some(path) = &formula_graph {
            viewer::open(path, false)?;
        }
        viewer::open(&settings.graph_svg, true)?;
    }

    println!(
        "Analysis finished in {:.2} seconds",
        started.elapsed().as_secs_f64()
    );
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
    }
    Ok(())
}
