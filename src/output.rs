//! Output artifacts: the entity catalog and the template catalog.

use crate::errors::HarvestResult;
use schema::{EntityRecord, Template};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

pub const CATALOG_FILE: &str = "all-pokemon.json";
pub const TEMPLATES_FILE: &str = "templates.json";

/// Where one run's JSON artifacts land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub catalog: PathBuf,
    pub templates: PathBuf,
}

impl ArtifactPaths {
    pub fn in_dir(output_dir: &Path) -> Self {
        Self {
            catalog: output_dir.join(CATALOG_FILE),
            templates: output_dir.join(TEMPLATES_FILE),
        }
    }
}

pub fn write_artifacts(
    paths: &ArtifactPaths,
    entities: &[EntityRecord],
    templates: &[Template],
) -> HarvestResult<()> {
    info!("Saving {} pokemon to {}...", entities.len(), paths.catalog.display());
    write_pretty_json(&paths.catalog, entities)?;

    info!("Saving templates to {}...", paths.templates.display());
    write_pretty_json(&paths.templates, templates)?;
    Ok(())
}

fn write_pretty_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> HarvestResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_writes_pretty_json_and_creates_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::in_dir(&dir.path().join("nested"));

        write_artifacts(&paths, &[], &[Template::empty()]).unwrap();

        assert_eq!(fs::read_to_string(&paths.catalog).unwrap(), "[]\n");
        let templates = fs::read_to_string(&paths.templates).unwrap();
        assert!(templates.contains("\n  {\n"), "not pretty-printed: {}", templates);
        let parsed: Vec<Template> = serde_json::from_str(&templates).unwrap();
        assert_eq!(parsed, vec![Template::empty()]);
    }
}
