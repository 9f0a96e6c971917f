//! # File I/O Module
//!
//! Reading inputs and catalogs, writing reports.
//!
//! - **Atomic saves**: write to `.tmp`, sync, rename to prevent truncated files
//! - **Inputs**: JSON-serialized [`EvaluationInput`]
//! - **Catalogs**: TOML, see [`crate::catalog`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use hearth_core::catalog::Catalog;
//! use hearth_core::evaluation::{evaluate, EvaluationInput};
//! use hearth_core::file_io::save_report;
//! use hearth_core::report::{render_report, ReportOptions};
//! use std::path::Path;
//!
//! let input = EvaluationInput::default();
//! let evaluation = evaluate(&input, Catalog::builtin()).unwrap();
//! let text = render_report(&input, &evaluation, &ReportOptions::default());
//! let path = save_report(Path::new("reports"), &input, &text).unwrap();
//! println!("saved {}", path.display());
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::errors::{CalcError, CalcResult};
use crate::evaluation::EvaluationInput;
use crate::report::report_filename;

/// Write `contents` to `path` atomically.
///
/// The text goes to a sibling `.tmp` file first, which is synced and then
/// renamed over the target.
pub fn write_atomic(path: &Path, contents: &str) -> CalcResult<()> {
    let tmp_path = path.with_extension("tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(contents.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

fn read_to_string(path: &Path) -> CalcResult<String> {
    fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))
}

/// Save a rendered report into `dir` under its download filename.
///
/// Creates `dir` if needed and returns the full path written.
pub fn save_report(dir: &Path, input: &EvaluationInput, text: &str) -> CalcResult<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| {
        CalcError::file_error("create directory", dir.display().to_string(), e.to_string())
    })?;
    let path = dir.join(report_filename(input));
    write_atomic(&path, text)?;
    tracing::info!(path = %path.display(), bytes = text.len(), "report saved");
    Ok(path)
}

/// Load an evaluation input from a JSON file.
///
/// Missing fields take their defaults. The input is not validated here.
pub fn load_input(path: &Path) -> CalcResult<EvaluationInput> {
    let contents = read_to_string(path)?;
    let input = serde_json::from_str(&contents)?;
    Ok(input)
}

/// Save an evaluation input as pretty JSON
pub fn save_input(input: &EvaluationInput, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(input)?;
    write_atomic(path, &json)
}

/// Load and validate a furnace catalog from a TOML file
pub fn load_catalog(path: &Path) -> CalcResult<Catalog> {
    let contents = read_to_string(path)?;
    Catalog::from_toml_str(&contents)
}
