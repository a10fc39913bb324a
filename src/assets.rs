use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::error::{Error, Result};

/// Turns asset-relative names into filesystem paths and decodes images.
///
/// The slicer and sprite sheet never touch the filesystem themselves; callers
/// resolve and decode through this type and pass the images in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetResolver {
    assets_dir: PathBuf,
    game_data_dir: PathBuf,
}

impl AssetResolver {
    pub fn new(assets_dir: impl Into<PathBuf>, game_data_dir: impl Into<PathBuf>) -> Self {
        Self { assets_dir: assets_dir.into(), game_data_dir: game_data_dir.into() }
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    pub fn game_data_dir(&self) -> &Path {
        &self.game_data_dir
    }

    /// Resolve a `/`-separated asset path such as `"tiles/grass.png"`.
    ///
    /// Components are joined one by one so the result uses the platform
    /// separator; empty components (leading, doubled or trailing `/`) are
    /// dropped.
    pub fn asset_file(&self, relative: &str) -> PathBuf {
        join_components(&self.assets_dir, relative)
    }

    pub fn game_data_file(&self, file_name: &str) -> PathBuf {
        join_components(&self.game_data_dir, file_name)
    }

    /// Decode an asset into an RGBA buffer.
    pub fn load_image(&self, relative: &str) -> Result<RgbaImage> {
        load_image(self.asset_file(relative))
    }

    /// Every `.png` under the assets directory, sorted. Unreadable entries are
    /// logged and skipped.
    pub fn find_sheets(&self) -> Vec<PathBuf> {
        let mut sheets = Vec::new();

        for entry in walkdir::WalkDir::new(&self.assets_dir) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    log::warn!("assets: skipping unreadable entry: {e}");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let is_png = entry
                .path()
                .extension()
                .and_then(|s| s.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
            if is_png {
                sheets.push(entry.into_path());
            }
        }

        sheets.sort();
        sheets
    }
}

/// Decode the image at `path` into an RGBA buffer.
pub fn load_image(path: impl AsRef<Path>) -> Result<RgbaImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|source| Error::Image { path: path.to_path_buf(), source })?;
    Ok(img.to_rgba8())
}

/// Encode `image` as PNG at `path`.
pub fn save_image(image: &RgbaImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    image
        .save(path)
        .map_err(|source| Error::Image { path: path.to_path_buf(), source })
}

fn join_components(root: &Path, relative: &str) -> PathBuf {
    relative
        .split(['/', '\\'])
        .filter(|c| !c.is_empty())
        .fold(root.to_path_buf(), |path, c| path.join(c))
}
