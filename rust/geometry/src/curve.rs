// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parametric curves sampled into point sequences

use crate::error::{Error, Result};
use nalgebra::{Point3, Vector3};
use std::f64::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const SWEEP_EPSILON: f64 = f64::EPSILON;

/// Elliptical arc in the XY plane around `center`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EllipseArc {
    pub center: Point3<f64>,
    pub radius_x: f64,
    pub radius_y: f64,
    /// Start angle in radians
    pub start_angle: f64,
    /// End angle in radians
    pub end_angle: f64,
    pub clockwise: bool,
}

impl EllipseArc {
    pub fn new(radius_x: f64, radius_y: f64, start_angle: f64, end_angle: f64, clockwise: bool) -> Self {
        Self {
            center: Point3::origin(),
            radius_x,
            radius_y,
            start_angle,
            end_angle,
            clockwise,
        }
    }

    pub fn circle(radius: f64) -> Self {
        Self::new(radius, radius, 0.0, TAU, false)
    }

    pub fn with_center(mut self, center: Point3<f64>) -> Self {
        self.center = center;
        self
    }

    /// Signed angle swept from start to end
    ///
    /// The raw difference is wrapped into `[0, 2π]`. Start and end that differ
    /// but land on the same direction sweep a full turn. Clockwise arcs sweep
    /// the complementary (negative) angle.
    pub fn sweep(&self) -> f64 {
        let raw = self.end_angle - self.start_angle;
        let same_points = raw.abs() < SWEEP_EPSILON;

        let mut delta = raw.rem_euclid(TAU);
        if delta < SWEEP_EPSILON {
            delta = if same_points { 0.0 } else { TAU };
        }

        if self.clockwise && !same_points {
            delta = if delta == TAU { -TAU } else { delta - TAU };
        }
        delta
    }

    /// Point at normalised parameter `t` in `[0, 1]`
    pub fn point_at(&self, t: f64) -> Point3<f64> {
        let angle = self.start_angle + t * self.sweep();
        Point3::new(
            self.center.x + self.radius_x * angle.cos(),
            self.center.y + self.radius_y * angle.sin(),
            self.center.z,
        )
    }

    /// `segments + 1` evenly spaced points, both ends included
    pub fn sample(&self, segments: usize) -> Result<Vec<Point3<f64>>> {
        if segments == 0 {
            return Err(Error::invalid_argument("arc sampling needs at least one segment"));
        }
        if !(self.radius_x.is_finite() && self.radius_y.is_finite()) {
            return Err(Error::invalid_argument(format!(
                "arc radii must be finite, got ({}, {})",
                self.radius_x, self.radius_y
            )));
        }

        Ok((0..=segments)
            .map(|i| self.point_at(i as f64 / segments as f64))
            .collect())
    }
}

/// Sample a circular arc around the origin
pub fn points_on_arc(
    radius: f64,
    segments: usize,
    start_theta: f64,
    end_theta: f64,
    clockwise: bool,
) -> Result<Vec<Point3<f64>>> {
    EllipseArc::new(radius, radius, start_theta, end_theta, clockwise).sample(segments)
}

/// Sample an elliptical arc around the origin
pub fn points_on_circle(
    radius_x: f64,
    radius_y: f64,
    segments: usize,
    start_angle: f64,
    end_angle: f64,
    clockwise: bool,
) -> Result<Vec<Point3<f64>>> {
    EllipseArc::new(radius_x, radius_y, start_angle, end_angle, clockwise).sample(segments)
}

/// Curve families known to the sampler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CurveKind {
    Line,
    Arc,
    QuadraticBezier,
    CubicBezier,
}

impl CurveKind {
    pub const ALL: [CurveKind; 4] = [
        CurveKind::Line,
        CurveKind::Arc,
        CurveKind::QuadraticBezier,
        CurveKind::CubicBezier,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CurveKind::Line => "LineCurve",
            CurveKind::Arc => "EllipseCurve",
            CurveKind::QuadraticBezier => "QuadraticBezierCurve",
            CurveKind::CubicBezier => "CubicBezierCurve",
        }
    }

    /// Look up a kind by class name, with or without the `3` suffix
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.strip_suffix('3').unwrap_or(name);
        match name {
            "ArcCurve" => Some(CurveKind::Arc),
            _ => Self::ALL.into_iter().find(|kind| kind.name() == name),
        }
    }
}

/// A single curve segment
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "camelCase"))]
pub enum Curve {
    Line {
        start: Point3<f64>,
        end: Point3<f64>,
    },
    Arc(EllipseArc),
    QuadraticBezier {
        start: Point3<f64>,
        control: Point3<f64>,
        end: Point3<f64>,
    },
    CubicBezier {
        start: Point3<f64>,
        control1: Point3<f64>,
        control2: Point3<f64>,
        end: Point3<f64>,
    },
}

impl Curve {
    pub fn kind(&self) -> CurveKind {
        match self {
            Curve::Line { .. } => CurveKind::Line,
            Curve::Arc(_) => CurveKind::Arc,
            Curve::QuadraticBezier { .. } => CurveKind::QuadraticBezier,
            Curve::CubicBezier { .. } => CurveKind::CubicBezier,
        }
    }

    pub fn point_at(&self, t: f64) -> Point3<f64> {
        match self {
            Curve::Line { start, end } => start + (end - start) * t,
            Curve::Arc(arc) => arc.point_at(t),
            Curve::QuadraticBezier {
                start,
                control,
                end,
            } => {
                let s = 1.0 - t;
                let v: Vector3<f64> =
                    start.coords * (s * s) + control.coords * (2.0 * s * t) + end.coords * (t * t);
                Point3::from(v)
            }
            Curve::CubicBezier {
                start,
                control1,
                control2,
                end,
            } => {
                let s = 1.0 - t;
                let v: Vector3<f64> = start.coords * (s * s * s)
                    + control1.coords * (3.0 * s * s * t)
                    + control2.coords * (3.0 * s * t * t)
                    + end.coords * (t * t * t);
                Point3::from(v)
            }
        }
    }

    /// `segments + 1` points at evenly spaced parameters
    pub fn sample(&self, segments: usize) -> Result<Vec<Point3<f64>>> {
        if let Curve::Arc(arc) = self {
            return arc.sample(segments);
        }
        if segments == 0 {
            return Err(Error::invalid_argument("curve sampling needs at least one segment"));
        }
        Ok((0..=segments)
            .map(|i| self.point_at(i as f64 / segments as f64))
            .collect())
    }
}
