pub mod init;
pub mod overlay;
pub mod simulate;
pub mod validate;

use std::path::Path;

use smoothcam_common::SmoothCamError;
use smoothcam_scene::SceneDescription;

/// Load a scene, reporting a missing file distinctly from a bad one.
pub(crate) fn load_scene(path: &Path) -> anyhow::Result<SceneDescription> {
    if !path.exists() {
        return Err(SmoothCamError::FileNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }
    SceneDescription::load(path).map_err(|e| anyhow::anyhow!("Failed to load scene: {e}"))
}
