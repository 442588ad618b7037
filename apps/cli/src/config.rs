// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI configuration loaded from environment variables and flags.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

/// Scene writer configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory the OBJ files are written to.
    pub output_dir: PathBuf,
    /// Segments used when sampling circles and arcs.
    pub arc_segments: usize,
    /// Wall thickness / outline padding.
    pub padding: f64,
    /// Extrusion depth.
    pub depth: f64,
    /// Bevel extruded outlines.
    pub bevel: bool,
    /// Degrees applied with an incremental UV rotation after unwrapping.
    pub uv_rotation: f64,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            output_dir: std::env::var("UVLAB_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("out")),
            arc_segments: env_or("UVLAB_ARC_SEGMENTS", 32),
            padding: env_or("UVLAB_PADDING", 0.5),
            depth: env_or("UVLAB_DEPTH", 1.0),
            bevel: true,
            uv_rotation: 0.0,
        }
    }

    /// Apply `--flag value` overrides; returns the remaining positional arguments.
    pub fn apply_args(&mut self, args: &[String]) -> Result<Vec<String>> {
        let mut positional = Vec::new();
        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "--output-dir" => self.output_dir = PathBuf::from(next_value(args, &mut i)?),
                "--segments" => {
                    self.arc_segments = parse_value(args, &mut i)?;
                }
                "--padding" => self.padding = parse_value(args, &mut i)?,
                "--depth" => self.depth = parse_value(args, &mut i)?,
                "--uv-rotate" => self.uv_rotation = parse_value(args, &mut i)?,
                "--no-bevel" => self.bevel = false,
                other if other.starts_with("--") => bail!("unknown option: {other}"),
                other => positional.push(other.to_string()),
            }
            i += 1;
        }

        if self.arc_segments < 3 {
            bail!("--segments must be at least 3, got {}", self.arc_segments);
        }
        Ok(positional)
    }
}

fn next_value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .with_context(|| format!("missing value for {flag}"))
}

fn parse_value<T>(args: &[String], i: &mut usize) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let flag = args[*i].clone();
    next_value(args, i)?
        .parse()
        .with_context(|| format!("invalid {flag} value"))
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
