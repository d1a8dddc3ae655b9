// Run settings
// Built-in defaults, optionally overridden by ~/.config/sheetgraph/settings.toml

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

/// Everything one run needs: where to read, how far to scan, how to draw,
/// where to write.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Workbook to analyze
    pub input: PathBuf,

    /// How many rows down to expect formulas
    pub rows: usize,

    /// Width of the formulas table (26 = through column Z, 702 = through ZZ)
    pub cols: usize,

    /// Layout name; validated at render time, not here
    pub layout: String,

    /// Extracted-formulas table
    pub formulas_csv: PathBuf,

    /// Dependency table
    pub dependencies_csv: PathBuf,

    /// Rendered graph
    pub graph_svg: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/input/workbook.xlsx"),
            rows: 15,
            cols: 50,
            layout: "circular".to_string(),
            formulas_csv: PathBuf::from("data/output/formulas.csv"),
            dependencies_csv: PathBuf::from("data/output/dependencies.csv"),
            graph_svg: PathBuf::from("data/output/dependencies.svg"),
        }
    }
}

impl Settings {
    /// Load from the user config file when present, defaults otherwise.
    /// An unreadable config file is reported and ignored.
    pub fn load_or_default() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };
        match Self::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("ignoring config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse a settings file; missing file means defaults. Every field is
    /// optional in the file and falls back to its default.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        toml::from_str(&content).map_err(|e| e.to_string())
    }

    /// Point the three output files at `out_dir`, named after the input
    /// file's first four characters.
    pub fn derive_outputs(&mut self, out_dir: &Path) {
        let name = self
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let prefix: String = name.chars().take(4).collect();
        self.formulas_csv = out_dir.join(format!("{}_formulas.csv", prefix));
        self.dependencies_csv = out_dir.join(format!("{}_dependencies.csv", prefix));
        self.graph_svg = out_dir.join(format!("{}_dependencies.svg", prefix));
    }

    /// Move the output files into `out_dir`, keeping their names.
    pub fn set_out_dir(&mut self, out_dir: &Path) {
        for path in [
            &mut self.formulas_csv,
            &mut self.dependencies_csv,
            &mut self.graph_svg,
        ] {
            if let Some(name) = path.file_name() {
                *path = out_dir.join(name);
            }
        }
    }

    /// Sibling path for the per-formula graph.
    pub fn formula_graph_path(&self) -> PathBuf {
        let stem = self
            .graph_svg
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.graph_svg.with_file_name(format!("{}_formulas.svg", stem))
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sheetgraph").join("settings.toml"))
}
