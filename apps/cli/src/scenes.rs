// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Demo scenes assembled from the geometry utilities

use crate::config::Config;
use anyhow::{bail, Result};
use std::f64::consts::PI;
use uvlab_geometry::{
    circle_line_points, complete_contour, extrude, offset_contour, planar_geometry_from_points,
    planar_project_uv, points_on_arc, rotate_uv_incremental, Board, BlendMaterial, Color,
    ExtrudeOptions, Mesh, Point3, Vector3,
};

pub const SCENES: [&str; 4] = ["room", "wall", "board", "disc"];

/// Named meshes that make up one scene
pub type Scene = Vec<(String, Mesh)>;

fn extrude_options(config: &Config) -> ExtrudeOptions {
    let mut options = if config.bevel {
        ExtrudeOptions::default()
    } else {
        ExtrudeOptions::flat(config.depth)
    };
    options.depth = config.depth;
    options.steps = 1;
    options
}

fn unwrap_uvs(mesh: &mut Mesh, config: &Config) -> Result<()> {
    planar_project_uv(mesh)?;
    if config.uv_rotation != 0.0 {
        rotate_uv_incremental(config.uv_rotation, mesh)?;
    }
    Ok(())
}

/// Floor with a plinth running around its outside
fn room(config: &Config) -> Result<Scene> {
    let outline = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(0.0, 8.0, 0.0),
        Point3::new(10.0, 8.0, 0.0),
        Point3::new(10.0, 0.0, 0.0),
    ];

    let mut floor = planar_geometry_from_points(&outline)?;
    unwrap_uvs(&mut floor, config)?;

    let plinth_outline = offset_contour(config.padding, &outline)?;
    let plinth = extrude(
        &plinth_outline,
        &ExtrudeOptions::flat(config.depth * 0.1),
    )?;

    Ok(vec![("floor".into(), floor), ("plinth".into(), plinth)])
}

/// L-shaped wall thickened from its centre line
fn wall(config: &Config) -> Result<Scene> {
    let path = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(6.0, 0.0, 0.0),
        Point3::new(6.0, 4.0, 0.0),
    ];
    let outline = complete_contour(config.padding / 2.0, &path)?;
    let mut wall = extrude(&outline, &extrude_options(config))?;
    if config.uv_rotation != 0.0 {
        rotate_uv_incremental(config.uv_rotation, &mut wall)?;
    }

    let arch_path: Vec<Point3<f64>> = points_on_arc(2.0, config.arc_segments, PI, 0.0, true)?
        .into_iter()
        .map(|p| p + Vector3::new(10.0, 0.0, 0.0))
        .collect();
    let arch = extrude(
        &complete_contour(config.padding / 2.0, &arch_path)?,
        &extrude_options(config),
    )?;

    Ok(vec![("wall".into(), wall), ("arch".into(), arch)])
}

/// Board with the blend material used in the browser demo
fn board(config: &Config) -> Result<Scene> {
    let material = BlendMaterial::new("planks")
        .with_blend("scratches")
        .with_tint(Color::Wood)
        .with_repeat(4.0, 1.0)
        .with_size_scaling(true);
    let mut board = Board::from_extent(
        Point3::new(-2.0, -0.15, 0.0),
        Point3::new(2.0, 0.15, config.depth * 0.05),
        material,
    )?;
    if config.uv_rotation != 0.0 {
        rotate_uv_incremental(config.uv_rotation, &mut board.mesh)?;
    }

    for (name, value) in board.material.uniforms() {
        tracing::debug!(uniform = name, ?value, "Board material");
    }
    Ok(vec![("board".into(), board.mesh)])
}

/// Flat disc unwrapped onto its bounding box
fn disc(config: &Config) -> Result<Scene> {
    let mut outline = circle_line_points(3.0, config.arc_segments)?;
    outline.pop();
    let mut disc = planar_geometry_from_points(&outline)?;
    unwrap_uvs(&mut disc, config)?;
    Ok(vec![("disc".into(), disc)])
}

pub fn build(name: &str, config: &Config) -> Result<Scene> {
    match name {
        "room" => room(config),
        "wall" => wall(config),
        "board" => board(config),
        "disc" => disc(config),
        other => bail!("unknown scene '{other}', expected one of {}", SCENES.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config() -> Config {
        Config {
            output_dir: PathBuf::from("out"),
            arc_segments: 12,
            padding: 0.3,
            depth: 2.0,
            bevel: false,
            uv_rotation: 30.0,
        }
    }

    #[test]
    fn test_every_scene_builds() {
        for name in SCENES {
            let scene = build(name, &config()).unwrap();
            assert!(!scene.is_empty());
            for (mesh_name, mesh) in &scene {
                assert!(mesh.triangle_count() > 0, "{name}/{mesh_name} is empty");
                assert!(mesh.has_uv_set(0), "{name}/{mesh_name} has no UVs");
            }
        }
    }

    #[test]
    fn test_bevelled_wall() {
        let mut config = config();
        config.bevel = true;
        let scene = build("wall", &config).unwrap();
        let (_, max) = scene[0].1.bounds();
        assert!(max.z > 2.0);
    }

    #[test]
    fn test_unknown_scene() {
        assert!(build("castle", &config()).is_err());
    }
}
