// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wavefront OBJ output
//!
//! Meshes are Z-up; OBJ files are written Y-up as (x, z, -y). Texture
//! coordinates are per face corner, so every face gets its own three `vt`
//! records.

use std::io::{self, Write};
use uvlab_geometry::Mesh;

/// Writes several meshes into one OBJ stream, keeping index offsets
pub struct ObjWriter<W: Write> {
    out: W,
    vertex_offset: usize,
    uv_offset: usize,
}

impl<W: Write> ObjWriter<W> {
    pub fn new(mut out: W, title: &str) -> io::Result<Self> {
        writeln!(out, "# Generated by uvlab")?;
        writeln!(out, "# {}", title)?;
        writeln!(out, "# Coordinate system: Y-up (OBJ convention)")?;
        writeln!(out)?;
        Ok(Self {
            out,
            vertex_offset: 0,
            uv_offset: 0,
        })
    }

    /// Append `mesh` as object `name`
    pub fn write_mesh(&mut self, name: &str, mesh: &Mesh) -> io::Result<()> {
        writeln!(self.out, "o {}", name)?;

        for p in mesh.positions.chunks_exact(3) {
            writeln!(self.out, "v {:.6} {:.6} {:.6}", p[0], p[2], -p[1])?;
        }
        for n in mesh.normals.chunks_exact(3) {
            writeln!(self.out, "vn {:.6} {:.6} {:.6}", n[0], n[2], -n[1])?;
        }

        let has_uvs = mesh.has_uv_set(0);
        if has_uvs {
            for uv in &mesh.uv_sets[0] {
                writeln!(self.out, "vt {:.6} {:.6}", uv[0], uv[1])?;
            }
        }

        for (face, tri) in mesh.indices.chunks_exact(3).enumerate() {
            write!(self.out, "f")?;
            for (corner, &index) in tri.iter().enumerate() {
                let v = self.vertex_offset + index as usize + 1;
                if has_uvs {
                    let vt = self.uv_offset + face * 3 + corner + 1;
                    write!(self.out, " {}/{}/{}", v, vt, v)?;
                } else {
                    write!(self.out, " {}//{}", v, v)?;
                }
            }
            writeln!(self.out)?;
        }
        writeln!(self.out)?;

        self.vertex_offset += mesh.vertex_count();
        if has_uvs {
            self.uv_offset += mesh.indices.len();
        }
        Ok(())
    }

    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
