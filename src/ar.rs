//! AR placement: on each "select" input the named model asset is reloaded and
//! a new instance is placed at a fixed offset in front of the viewer. The XR
//! session, renderer and model parsing are external; this module owns only
//! the placement state.

use anyhow::{Context, Result};
use glam::Vec3;
use std::path::PathBuf;

/// Offset of a newly placed model relative to the viewer
pub const PLACEMENT_OFFSET: Vec3 = Vec3::new(0.0, 0.0, -0.5);

/// Uniform scale applied to every placed model
pub const MODEL_SCALE: f32 = 0.2;

/// Source of raw model asset bytes. The default implementation reads from a
/// directory; the renderer side decides what the bytes mean.
pub trait AssetLoader {
    fn load(&self, name: &str) -> Result<Vec<u8>>;
}

/// Filesystem-backed asset loader.
pub struct FsAssetLoader {
    root: PathBuf,
}

impl FsAssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetLoader for FsAssetLoader {
    fn load(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.root.join(name);
        std::fs::read(&path).with_context(|| format!("failed to read asset {}", path.display()))
    }
}

/// One placed model.
#[derive(Debug, Clone)]
pub struct ModelInstance {
    pub asset: String,
    pub position: Vec3,
    pub scale: Vec3,
    /// Raw asset bytes, handed to the external renderer as-is
    pub data: Vec<u8>,
}

/// Placement state for an AR session.
///
/// There is no caching: every select reloads the asset and adds another
/// instance, so repeated selects accumulate copies in the scene. That quirk
/// is kept from the behavior being reproduced.
#[derive(Debug, Default)]
pub struct ArScene {
    instances: Vec<ModelInstance>,
}

impl ArScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one "select" input. A load failure is logged and leaves the
    /// scene unchanged; it is never surfaced to the user.
    pub fn handle_select(&mut self, loader: &dyn AssetLoader, asset: &str) {
        match loader.load(asset) {
            Ok(data) => {
                self.instances.push(ModelInstance {
                    asset: asset.to_string(),
                    position: PLACEMENT_OFFSET,
                    scale: Vec3::splat(MODEL_SCALE),
                    data,
                });
                tracing::debug!(
                    "Placed {} ({} instances in scene)",
                    asset,
                    self.instances.len()
                );
            }
            Err(e) => {
                tracing::error!("Model failed to load: {:#}", e);
            }
        }
    }

    pub fn instances(&self) -> &[ModelInstance] {
        &self.instances
    }
}
