// Interactive configuration prompts (the CUSTOM path)

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::settings::Settings;

/// Resolve run settings interactively: one y/n question, then four
/// sequential prompts for the custom path. Output files are named after
/// the input file's first four characters.
///
/// The layout answer is taken verbatim; validation happens at render
/// time, so a typo surfaces only once the pipeline reaches drawing.
pub fn resolve(defaults: Settings) -> Result<Settings, String> {
    let stdin = io::stdin();
    resolve_from(&mut stdin.lock(), &mut io::stdout(), defaults)
}

fn resolve_from<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    defaults: Settings,
) -> Result<Settings, String> {
    let choice = ask(
        input,
        output,
        "Proceed with the default settings? ('y' = built-in defaults, 'n' = enter your own) (y/n): ",
    )?;
    if !choice.trim().eq_ignore_ascii_case("n") {
        return Ok(defaults);
    }

    let mut settings = defaults;

    let workbook = ask(
        input,
        output,
        "(1/4) Enter the path to your input file (e.g. 'data/input/FILENAME.xlsx'): ",
    )?;
    settings.input = PathBuf::from(workbook.trim());

    let rows = ask(
        input,
        output,
        "(2/4) Enter the number of rows (how many rows down would you expect formulas?): ",
    )?;
    settings.rows = rows
        .trim()
        .parse()
        .map_err(|e| format!("Invalid row count '{}': {}", rows.trim(), e))?;

    let cols = ask(
        input,
        output,
        "(3/4) Enter the number of columns (702 columns = going out to ZZ): ",
    )?;
    settings.cols = cols
        .trim()
        .parse()
        .map_err(|e| format!("Invalid column count '{}': {}", cols.trim(), e))?;

    let layout = ask(
        input,
        output,
        "(4/4) Enter your graph layout choice ('circular', 'spring', 'shell', 'planar', \
         or 'kamada_kawai' ... 'circular' is recommended): ",
    )?;
    settings.layout = layout.trim().to_string();

    settings.derive_outputs(Path::new("data/output"));
    Ok(settings)
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<String, String> {
    write!(output, "{}", question).map_err(|e| e.to_string())?;
    output.flush().map_err(|e| e.to_string())?;
    let mut line = String::new();
    input.read_line(&mut line).map_err(|e| e.to_string())?;
    Ok(line)
}
