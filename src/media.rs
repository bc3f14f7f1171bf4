//! Fill-gaps image cache.
//!
//! Images are stored as `{output_dir}/{sprites|artwork}/{id}.png`. A file that
//! already exists is never downloaded again or overwritten, even if the
//! remote image has changed since. Downloads land in a `.part` sibling first,
//! so only complete images ever appear under the final name.
//!
//! The catalog refers to images relative to the output directory's parent
//! (`data/sprites/1.png` for an output dir `/srv/site/data`), never by host path.

use crate::fetch::ApiClient;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Sprite,
    Artwork,
}

impl MediaKind {
    pub fn dir_name(self) -> &'static str {
        match self {
            MediaKind::Sprite => "sprites",
            MediaKind::Artwork => "artwork",
        }
    }
}

#[derive(Debug, Clone)]
pub struct MediaCache {
    root: PathBuf,
    /// Last component of `root`; empty when `root` has none (`.`, `/`).
    catalog_prefix: String,
}

impl MediaCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let catalog_prefix = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            root,
            catalog_prefix,
        }
    }

    /// Where the image lives on this host.
    pub fn path_for(&self, kind: MediaKind, id: u32) -> PathBuf {
        self.root.join(kind.dir_name()).join(file_name(id))
    }

    /// How the catalog refers to the image.
    pub fn catalog_path_for(&self, kind: MediaKind, id: u32) -> String {
        if self.catalog_prefix.is_empty() {
            format!("{}/{}", kind.dir_name(), file_name(id))
        } else {
            format!("{}/{}/{}", self.catalog_prefix, kind.dir_name(), file_name(id))
        }
    }

    /// Makes sure the image for `id` is on disk, downloading it from `url`
    /// only if missing. Returns the catalog path when the file exists
    /// afterwards.
    pub async fn ensure(
        &self,
        client: &ApiClient,
        kind: MediaKind,
        id: u32,
        url: &str,
    ) -> Option<String> {
        let path = self.path_for(kind, id);
        if exists(&path).await {
            debug!(path = %path.display(), "media already cached");
            return Some(self.catalog_path_for(kind, id));
        }

        let bytes = client.get_bytes(url).await?;
        if let Err(err) = write(&path, &bytes).await {
            warn!(path = %path.display(), error = %err, "cannot store {}", kind.dir_name());
            return None;
        }
        Some(self.catalog_path_for(kind, id))
    }
}

fn file_name(id: u32) -> String {
    format!("{}.png", id)
}

async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}

async fn write(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let partial = partial_path(path);
    fs::write(&partial, bytes).await?;
    fs::rename(&partial, path).await
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}
