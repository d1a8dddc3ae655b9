// CSV persistence for dependency mappings and extracted formulas

use std::io::Read;
use std::path::Path;

use sheetgraph_core::{DependencyMap, SheetFormulas};
use tracing::info;

/// Write the dependency mapping, one record per sheet: the sheet name
/// followed by its dependency names in list order. Overwrites the target.
pub fn save_dependencies(map: &DependencyMap, path: &Path) -> Result<(), String> {
    // Rows are variable width (one field per dependency), so the writer
    // must be flexible.
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| e.to_string())?;

    for (sheet, deps) in map.iter() {
        let mut record: Vec<&str> = Vec::with_capacity(deps.len() + 1);
        record.push(sheet);
        record.extend(deps.iter().map(|d| d.as_str()));
        writer.write_record(&record).map_err(|e| e.to_string())?;
    }

    writer.flush().map_err(|e| e.to_string())?;
    info!("dependencies written to {}", path.display());
    Ok(())
}

/// Read a dependency mapping back from disk.
///
/// Fields are trimmed. Records with a blank sheet name are skipped and
/// blank dependency fields are dropped, so `load(save(m)) == m` holds for
/// any mapping whose names are non-empty after trimming.
pub fn load_dependencies(path: &Path) -> Result<DependencyMap, String> {
    let content = read_file_as_utf8(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut map = DependencyMap::new();
    for result in reader.records() {
        let record = result.map_err(|e| e.to_string())?;
        let mut fields = record.iter();
        let sheet = fields.next().unwrap_or("").trim();
        if sheet.is_empty() {
            continue;
        }
        let deps = map.entry(sheet);
        for field in fields {
            let dep = field.trim();
            if !dep.is_empty() {
                deps.push(dep.to_string());
            }
        }
    }
    Ok(map)
}

/// Write the extracted-formulas table.
///
/// Header: `sheet_name` plus zero-padded `formulaNNN` labels up to
/// `col_bound - 1`. Each record is the sheet name followed by its formula
/// strings, padded or truncated to the header width. The column bound
/// shapes only this table; extraction itself scans every column.
pub fn save_formulas(
    sheets: &[SheetFormulas],
    path: &Path,
    col_bound: usize,
) -> Result<(), String> {
    let width = col_bound.saturating_sub(1);
    let mut writer = csv::Writer::from_path(path).map_err(|e| e.to_string())?;

    let mut header = Vec::with_capacity(width + 1);
    header.push("sheet_name".to_string());
    for i in 1..col_bound {
        header.push(format!("formula{:03}", i));
    }
    writer.write_record(&header).map_err(|e| e.to_string())?;

    for entry in sheets {
        let mut record = Vec::with_capacity(width + 1);
        record.push(entry.sheet.clone());
        record.extend(entry.formulas.iter().take(width).cloned());
        record.resize(width + 1, String::new());
        writer.write_record(&record).map_err(|e| e.to_string())?;
    }

    writer.flush().map_err(|e| e.to_string())?;
    info!("formulas written to {}", path.display());
    Ok(())
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let mut file = std::fs::File::open(path).map_err(|e| e.to_string())?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| e.to_string())?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            // Fall back to Windows-1252 (common for Excel-exported CSVs)
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::fs;
    use tempfile::tempdir;

    fn sample_map() -> DependencyMap {
        let mut map = DependencyMap::new();
        map.push_dependency("Summary", "Costs");
        map.push_dependency("Summary", "Revenue");
        map.push_dependency("Summary", "Costs");
        map.entry("Costs");
        map.push_dependency("Revenue", "Costs");
        map
    }

    #[test]
    fn test_dependencies_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dependencies.csv");

        let map = sample_map();
        save_dependencies(&map, &path).unwrap();
        let loaded = load_dependencies(&path).unwrap();

        assert_eq!(loaded, map);
    }

    #[test]
    fn test_empty_dependency_sheet_still_gets_a_row() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dependencies.csv");

        let mut map = DependencyMap::new();
        map.entry("Alone");
        save_dependencies(&map, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim(), "Alone");

        let loaded = load_dependencies(&path).unwrap();
        assert_eq!(loaded.get("Alone"), Some(&[][..]));
    }

    #[test]
    fn test_load_skips_blank_sheets_and_blank_deps() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dependencies.csv");
        fs::write(&path, "Summary,Costs,,Revenue\n,Orphan\n  ,\nCosts\n").unwrap();

        let loaded = load_dependencies(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(
            loaded.get("Summary"),
            Some(&["Costs".to_string(), "Revenue".to_string()][..])
        );
        assert_eq!(loaded.get("Costs"), Some(&[][..]));
    }

    #[test]
    fn test_load_non_utf8_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dependencies.csv");
        // "Coûts" in Windows-1252: 0xFB for û
        fs::write(&path, b"Summary,Co\xfbts\nCo\xfbts\n").unwrap();

        let loaded = load_dependencies(&path).unwrap();
        assert_eq!(loaded.get("Summary"), Some(&["Coûts".to_string()][..]));
    }

    #[test]
    fn test_formulas_table_header_and_padding() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("formulas.csv");

        let rows = vec![
            SheetFormulas::new(
                "Summary",
                ["'=Costs!B2", "'=SUM(Revenue!A1:A9)"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            ),
            SheetFormulas::new("Costs", Default::default()),
        ];
        save_formulas(&rows, &path, 4).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "sheet_name,formula001,formula002,formula003");
        // BTreeSet order: '=Costs... sorts before '=SUM...
        assert_eq!(lines[1], "Summary,'=Costs!B2,'=SUM(Revenue!A1:A9),");
        assert_eq!(lines[2], "Costs,,,");
    }

    #[test]
    fn test_formulas_table_truncates_to_width() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("formulas.csv");

        let formulas = (0..5).map(|i| format!("'=Other!A{}", i)).collect();
        let rows = vec![SheetFormulas::new("Busy", formulas)];
        save_formulas(&rows, &path, 3).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let first_record: Vec<&str> = content.lines().nth(1).unwrap().split(',').collect();
        assert_eq!(first_record.len(), 3);
    }

    proptest! {
        #[test]
        fn prop_round_trip_preserves_rows(
            entries in proptest::collection::btree_map(
                "[A-Za-z0-9_]{1,12}",
                proptest::collection::vec("[A-Za-z0-9_]{1,12}", 0..5),
                1..8,
            )
        ) {
            let dir = tempdir().unwrap();
            let path = dir.path().join("dependencies.csv");

            let map: DependencyMap = entries.into_iter().collect();
            save_dependencies(&map, &path).unwrap();
            let loaded = load_dependencies(&path).unwrap();
            prop_assert_eq!(loaded, map);
        }
    }
}
