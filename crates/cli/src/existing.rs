// Re-render a previously persisted dependency table
//
// The skip-recomputation entry path: no workbook access, just load the
// table a prior analyze run wrote and draw it again.

use std::fs;
use std::path::{Path, PathBuf};

use sheetgraph_io::table;
use sheetgraph_render::viewer;

#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub dot: bool,
    pub no_view: bool,
}

pub fn run(
    table_path: &Path,
    layout: &str,
    out: Option<PathBuf>,
    opts: &Options,
) -> Result<(), String> {
    let map = table::load_dependencies(table_path)?;
    println!(
        "Loaded {} sheets ({} dependency entries) from {}",
        map.len(),
        map.pair_count(),
        table_path.display()
    );

    let svg = sheetgraph_render::render_svg(&map, layout, "Existing Sheet Dependencies Overview")?;
    let out = out.unwrap_or_else(|| table_path.with_extension("svg"));
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
    }
    fs::write(&out, svg).map_err(|e| e.to_string())?;
    println!("Graph written to {}", out.display());

    if opts.dot {
        let dot = sheetgraph_render::render_dot(&map, "Existing Sheet Dependencies Overview");
        fs::write(out.with_extension("dot"), dot).map_err(|e| e.to_string())?;
    }

    if !opts.no_view {
        viewer::open(&out, true)?;
    }
    Ok(())
}
