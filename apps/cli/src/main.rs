// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! uvlab: write the demo scenes as OBJ files
//!
//! Usage: uvlab [scene ...] [--output-dir DIR] [--segments N] [--padding P]
//!              [--depth D] [--uv-rotate DEG] [--no-bevel]
//!
//! Scenes: room, wall, board, disc, all (default).

mod config;
mod obj;
mod scenes;

use anyhow::{Context, Result};
use config::Config;
use obj::ObjWriter;
use std::fs::File;
use std::io::BufWriter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn print_usage() {
    eprintln!("Usage: uvlab [scene ...] [options]");
    eprintln!();
    eprintln!("Scenes: {}, all", scenes::SCENES.join(", "));
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --output-dir DIR   Directory for OBJ files (env UVLAB_OUTPUT_DIR, default out)");
    eprintln!("  --segments N       Arc and circle segments (env UVLAB_ARC_SEGMENTS, default 32)");
    eprintln!("  --padding P        Contour padding (env UVLAB_PADDING, default 0.5)");
    eprintln!("  --depth D          Extrusion depth (env UVLAB_DEPTH, default 1.0)");
    eprintln!("  --uv-rotate DEG    Rotate UVs after unwrapping");
    eprintln!("  --no-bevel         Extrude without bevels");
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,uvlab_geometry=debug")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage();
        return Ok(());
    }

    let mut config = Config::from_env();
    let mut names = config.apply_args(&args)?;
    if names.is_empty() || names.iter().any(|n| n == "all") {
        names = scenes::SCENES.iter().map(|s| s.to_string()).collect();
    }

    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating {}", config.output_dir.display()))?;

    for name in &names {
        let scene = scenes::build(name, &config).with_context(|| format!("building scene {name}"))?;

        let path = config.output_dir.join(format!("{name}.obj"));
        let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        let mut writer = ObjWriter::new(BufWriter::new(file), name)?;
        for (mesh_name, mesh) in &scene {
            writer
                .write_mesh(mesh_name, mesh)
                .with_context(|| format!("writing {mesh_name} to {}", path.display()))?;
        }
        writer.finish()?;

        let triangles: usize = scene.iter().map(|(_, m)| m.triangle_count()).sum();
        tracing::info!(scene = %name, meshes = scene.len(), triangles, path = %path.display(), "Wrote scene");
    }

    Ok(())
}
