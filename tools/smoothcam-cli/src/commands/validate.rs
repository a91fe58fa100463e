//! Validate a scene file.

use std::path::PathBuf;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating scene at: {}", path.display());

    let scene = super::load_scene(&path)?;

    println!("  Velocity radius: {}", scene.subject.velocity_radius);
    match scene.subject.max_speed {
        Some(max_speed) => println!("  Max speed: {max_speed}"),
        None => println!("  Max speed: (driver default)"),
    }
    println!("  Points of interest: {}", scene.points.len());
    for (i, p) in scene.points.iter().enumerate() {
        println!(
            "    #{i}: ({}, {}) inner={} outer={} falloff={:?}",
            p.x, p.y, p.inner_radius, p.outer_radius, p.falloff
        );
    }
    println!(
        "  Track: {} waypoints, {:.2}s, peak speed {:.1}",
        scene.track.waypoints.len(),
        scene.track.duration_secs(),
        scene.track.max_speed()
    );

    let issues = scene.validate();
    if issues.is_empty() {
        println!("\nScene is valid.");
        return Ok(());
    }

    println!("\nValidation issues:");
    for issue in &issues {
        println!("  - {issue}");
    }
    anyhow::bail!("{} issue(s) found", issues.len())
}
