//! Data directory loading.
//!
//! A data directory looks like this:
//!
//! ```text
//! data/
//!   ruleset.ron      facility and craft types
//!   view.ron         view configuration (optional)
//!   bases/*.ron      saved bases
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use basescape_core::config::ViewConfig;
use basescape_core::data::{parse_ron, BaseData, RulesetData};
use basescape_core::ruleset::Ruleset;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::{Result, ToolError};

/// Ruleset file name inside a data directory.
pub const RULESET_FILE: &str = "ruleset.ron";
/// View configuration file name inside a data directory.
pub const VIEW_FILE: &str = "view.ron";
/// Base directory name inside a data directory.
pub const BASES_DIR: &str = "bases";

/// A saved base together with the file it came from.
#[derive(Debug, Clone)]
pub struct BaseFile {
    /// Source path.
    pub path: PathBuf,
    /// Parsed record.
    pub data: BaseData,
}

impl BaseFile {
    /// File stem, used to name outputs.
    #[must_use]
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map_or_else(|| self.data.name.clone(), |s| s.to_string_lossy().into_owned())
    }
}

/// Everything loaded from a data directory.
#[derive(Debug, Clone)]
pub struct DataSet {
    /// Resolved ruleset.
    pub ruleset: Ruleset,
    /// View configuration (defaults when `view.ron` is absent).
    pub config: ViewConfig,
    /// Saved bases, sorted by path.
    pub bases: Vec<BaseFile>,
}

/// Read and parse one RON file.
pub fn read_ron<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|e| ToolError::io(path, e))?;
    Ok(parse_ron(&path.display().to_string(), &text)?)
}

/// Load and resolve a ruleset file.
pub fn load_ruleset(path: &Path) -> Result<Ruleset> {
    let data: RulesetData = read_ron(path)?;
    Ok(Ruleset::from_data(&data)?)
}

/// Load a view configuration file, or defaults if it does not exist.
pub fn load_config(path: &Path) -> Result<ViewConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "No view configuration, using defaults");
        return Ok(ViewConfig::default());
    }
    let text = fs::read_to_string(path).map_err(|e| ToolError::io(path, e))?;
    Ok(ViewConfig::from_ron(&text)?)
}

/// Load one saved base.
pub fn load_base(path: &Path) -> Result<BaseFile> {
    Ok(BaseFile {
        path: path.to_path_buf(),
        data: read_ron(path)?,
    })
}

/// List the `.ron` files of a directory, sorted.
fn ron_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| ToolError::io(dir, e))? {
        let path = entry.map_err(|e| ToolError::io(dir, e))?.path();
        if path.extension().is_some_and(|ext| ext == "ron") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Load a whole data directory.
pub fn load_data_directory(dir: &Path) -> Result<DataSet> {
    let ruleset = load_ruleset(&dir.join(RULESET_FILE))?;
    let config = load_config(&dir.join(VIEW_FILE))?;
    let bases = ron_files(&dir.join(BASES_DIR))?
        .iter()
        .map(|path| load_base(path))
        .collect::<Result<Vec<_>>>()?;

    info!(
        dir = %dir.display(),
        facilities = ruleset.facility_count(),
        crafts = ruleset.craft_count(),
        bases = bases.len(),
        "Data directory loaded"
    );
    Ok(DataSet {
        ruleset,
        config,
        bases,
    })
}
