// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tolerances and option structs shared by the geometry components

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default epsilon for 3D point equality (compared as squared distance)
pub const POINT_EPSILON: f64 = 0.01;

/// Tolerance used by the colinear-and-between segment test
pub const SEGMENT_EPSILON: f64 = 0.001;

/// Tolerance used when removing adjacent duplicates from thickened contours
pub const CONTOUR_DEDUP_EPSILON: f64 = 0.001;

/// Distance under which two mesh vertices are welded together
pub const WELD_EPSILON: f64 = 1e-4;

/// Numeric tolerances used by comparisons and clean-up passes
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Tolerances {
    pub point_epsilon: f64,
    pub segment_epsilon: f64,
    pub contour_dedup_epsilon: f64,
    pub weld_epsilon: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            point_epsilon: POINT_EPSILON,
            segment_epsilon: SEGMENT_EPSILON,
            contour_dedup_epsilon: CONTOUR_DEDUP_EPSILON,
            weld_epsilon: WELD_EPSILON,
        }
    }
}

/// Parameters handed to the extrusion builder
///
/// Mirrors the usual WebGL extrude settings: `depth` along +Z, `steps`
/// subdivisions of the side walls and an optional rounded bevel on both caps.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ExtrudeOptions {
    /// Extrusion depth along +Z
    pub depth: f64,
    /// Number of wall subdivisions along the depth
    pub steps: u32,
    pub bevel_enabled: bool,
    /// Number of rings used to round each bevel
    pub bevel_segments: u32,
    /// Distance the bevel extends outward from the outline
    pub bevel_size: f64,
    /// Depth of each bevel beyond the extruded body
    pub bevel_thickness: f64,
}

impl Default for ExtrudeOptions {
    fn default() -> Self {
        Self {
            depth: 1.0,
            steps: 1,
            bevel_enabled: true,
            bevel_segments: 3,
            bevel_size: 0.1,
            bevel_thickness: 0.2,
        }
    }
}

impl ExtrudeOptions {
    /// Plain prism without bevel
    pub fn flat(depth: f64) -> Self {
        Self {
            depth,
            bevel_enabled: false,
            ..Default::default()
        }
    }

    /// Check the options before any geometry is produced
    pub fn validate(&self) -> Result<()> {
        if self.depth <= 0.0 || !self.depth.is_finite() {
            return Err(Error::invalid_argument(format!(
                "extrusion depth must be positive and finite, got {}",
                self.depth
            )));
        }
        if self.steps == 0 {
            return Err(Error::invalid_argument("extrusion needs at least one step"));
        }
        if self.bevel_enabled {
            if self.bevel_segments == 0 {
                return Err(Error::invalid_argument(
                    "bevel needs at least one segment",
                ));
            }
            if self.bevel_size < 0.0 || self.bevel_thickness < 0.0 {
                return Err(Error::invalid_argument(
                    "bevel size and thickness must not be negative",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tolerances() {
        let tol = Tolerances::default();
        assert_eq!(tol.point_epsilon, 0.01);
        assert_eq!(tol.segment_epsilon, 0.001);
        assert_eq!(tol.contour_dedup_epsilon, 0.001);
    }

    #[test]
    fn test_extrude_options_validation() {
        assert!(ExtrudeOptions::default().validate().is_ok());
        assert!(ExtrudeOptions::flat(2.0).validate().is_ok());

        let bad_depth = ExtrudeOptions::flat(0.0);
        assert!(matches!(bad_depth.validate(), Err(Error::InvalidArgument(_))));

        let no_steps = ExtrudeOptions {
            steps: 0,
            ..Default::default()
        };
        assert!(no_steps.validate().is_err());

        let no_segments = ExtrudeOptions {
            bevel_segments: 0,
            ..Default::default()
        };
        assert!(no_segments.validate().is_err());

        // Segment count only matters when the bevel is on
        let unused_segments = ExtrudeOptions {
            bevel_enabled: false,
            bevel_segments: 0,
            ..Default::default()
        };
        assert!(unused_segments.validate().is_ok());
    }
}
