// src/project.rs

//! Where the project lives and what it is called.
//!
//! The argument builder needs three facts about its surroundings:
//! - the package root that holds `intern/<config>` and the externals loader,
//! - a stable project name for the capabilities,
//! - the working directory that relative paths are emitted against and
//!   reporter output directories are created in.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::Result;

/// Directory under the package root holding runner configs and helpers.
pub const INTERN_DIR: &str = "intern";

/// File name of the externals loader script inside [`INTERN_DIR`].
pub const EXTERNALS_LOADER_SCRIPT: &str = "externals-loader.js";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    pub package_root: PathBuf,
    pub project_name: String,
    pub working_dir: PathBuf,
}

#[derive(Deserialize)]
struct PackageJson {
    name: Option<String>,
}

#[derive(Deserialize)]
struct CargoManifest {
    package: Option<CargoPackage>,
}

#[derive(Deserialize)]
struct CargoPackage {
    name: String,
}

impl ProjectContext {
    pub fn new(
        package_root: impl Into<PathBuf>,
        project_name: impl Into<String>,
        working_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            package_root: package_root.into(),
            project_name: project_name.into(),
            working_dir: working_dir.into(),
        }
    }

    /// Walk up from `start` to the nearest project manifest.
    ///
    /// `package.json` wins over `Cargo.toml` in the same directory. When no
    /// manifest is found, `start` itself is the root and its directory name
    /// is the project name.
    pub fn discover(start: impl AsRef<Path>) -> Result<Self> {
        let start = start.as_ref();
        let working_dir = start
            .canonicalize()
            .unwrap_or_else(|_| start.to_path_buf());

        for dir in working_dir.ancestors() {
            if let Some(name) = read_manifest_name(dir)? {
                debug!(root = ?dir, project = %name, "discovered project root");
                return Ok(Self::new(dir, name, &working_dir));
            }
        }

        let name = working_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "project".to_string());
        warn!(dir = ?working_dir, "no project manifest found; using working directory");
        Ok(Self::new(&working_dir, name, &working_dir))
    }

    /// `<package root>/intern/<file>`.
    pub fn intern_path(&self, file: &str) -> PathBuf {
        self.package_root.join(INTERN_DIR).join(file)
    }

    pub fn externals_loader_script(&self) -> PathBuf {
        self.intern_path(EXTERNALS_LOADER_SCRIPT)
    }

    /// Express `path` relative to the working directory, using forward
    /// slashes.
    ///
    /// Falls back to the path as given when the two share no common prefix
    /// (e.g. different drives).
    pub fn relative_to_working_dir(&self, path: &Path) -> String {
        let rel = relative_path(&self.working_dir, path).unwrap_or_else(|| path.to_path_buf());
        rel.to_string_lossy().replace('\\', "/")
    }
}

fn read_manifest_name(dir: &Path) -> Result<Option<String>> {
    let package_json = dir.join("package.json");
    if package_json.is_file() {
        let contents = fs::read_to_string(&package_json)?;
        let pkg: PackageJson = serde_json::from_str(&contents)?;
        if let Some(name) = pkg.name {
            return Ok(Some(name));
        }
    }

    let cargo_toml = dir.join("Cargo.toml");
    if cargo_toml.is_file() {
        let contents = fs::read_to_string(&cargo_toml)?;
        let manifest: CargoManifest = toml::from_str(&contents)?;
        if let Some(pkg) = manifest.package {
            return Ok(Some(pkg.name));
        }
    }

    Ok(None)
}

/// Purely lexical relative path from `base` to `target`.
fn relative_path(base: &Path, target: &Path) -> Option<PathBuf> {
    use std::path::Component;

    if base.is_absolute() != target.is_absolute() {
        return None;
    }

    let base: Vec<Component<'_>> = base.components().collect();
    let target: Vec<Component<'_>> = target.components().collect();

    let common = base
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();

    if common == 0 && base.first().is_some_and(|c| matches!(c, Component::Prefix(_))) {
        return None;
    }

    let mut rel = PathBuf::new();
    for _ in &base[common..] {
        rel.push("..");
    }
    for part in &target[common..] {
        rel.push(part.as_os_str());
    }
    Some(rel)
}
