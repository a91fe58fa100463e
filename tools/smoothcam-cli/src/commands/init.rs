//! Write the demo scene.

use std::path::PathBuf;

use smoothcam_scene::SceneDescription;

pub fn run(path: PathBuf, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let scene = SceneDescription::demo();
    scene
        .save(&path)
        .map_err(|e| anyhow::anyhow!("Failed to write scene: {e}"))?;

    println!("Demo scene written to {}", path.display());
    println!("  Points of interest: {}", scene.points.len());
    println!("  Waypoints: {}", scene.track.waypoints.len());
    println!("  Track length: {:.1}s", scene.track.duration_secs());

    Ok(())
}
