//! Triangle-mesh containers and the small amount of mesh arithmetic the core
//! needs: index validation, bounding boxes and numerical volume integration.
//!
//! The integration here exists for cross-checking and clearance tests only;
//! reported volumes always come from the closed-form formulas in
//! [`crate::geometry`].

use nalgebra::{Isometry3, Point3, Vector3};

/// Position in three dimensional space measured in metres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    /// Distance along the global X (longitudinal) axis.
    pub x: f64,
    /// Distance along the global Y (lateral) axis.
    pub y: f64,
    /// Distance along the global Z (vertical) axis.
    pub z: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Convert the point into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// The point shifted by a translation vector.
    #[must_use]
    pub fn translated(self, offset: Vector3<f64>) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.z + offset.z)
    }
}

impl From<Vector3<f64>> for Point {
    fn from(value: Vector3<f64>) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

impl From<Point> for Vector3<f64> {
    fn from(value: Point) -> Self {
        value.to_vector()
    }
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use aerocraft::mesh::point;
///
/// let origin = point(0.0, 0.0, 0.0);
/// assert_eq!(origin.x, 0.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64, z: f64) -> Point {
    Point::new(x, y, z)
}

/// Indexed triangle mesh with optional per-vertex normals.
#[derive(Clone, Debug, PartialEq)]
pub struct TriangleMesh {
    /// Ordered vertex positions.
    pub vertices: Vec<Point>,
    /// Triangles as index triples into `vertices`, counter-clockwise outward.
    pub indices: Vec<[u32; 3]>,
    /// Optional per-vertex unit normals, parallel to `vertices`.
    pub normals: Option<Vec<Vector3<f64>>>,
}

impl TriangleMesh {
    /// Create an empty mesh.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            normals: None,
        }
    }

    /// Whether every index triple references an existing vertex.
    #[must_use]
    pub fn indices_are_valid(&self) -> bool {
        let count = self.vertices.len();
        self.indices
            .iter()
            .all(|tri| tri.iter().all(|&idx| (idx as usize) < count))
    }

    /// Signed enclosed volume via the divergence theorem, in cubic metres.
    ///
    /// Positive for a watertight mesh with outward-facing triangles. Used by
    /// tests to cross-check the closed-form volume formulas.
    #[must_use]
    pub fn signed_volume_m3(&self) -> f64 {
        let mut six_v = 0.0;
        for tri in &self.indices {
            let a = self.vertices[tri[0] as usize].to_vector();
            let b = self.vertices[tri[1] as usize].to_vector();
            let c = self.vertices[tri[2] as usize].to_vector();
            six_v += a.dot(&b.cross(&c));
        }
        six_v / 6.0
    }

    /// Recompute per-vertex normals by area-weighted facet accumulation.
    pub fn recompute_normals(&mut self) {
        let mut normals = vec![Vector3::zeros(); self.vertices.len()];
        for tri in &self.indices {
            let a = self.vertices[tri[0] as usize].to_vector();
            let b = self.vertices[tri[1] as usize].to_vector();
            let c = self.vertices[tri[2] as usize].to_vector();
            // Cross product length carries the facet area weighting.
            let facet = (b - a).cross(&(c - a));
            for &idx in tri {
                normals[idx as usize] += facet;
            }
        }
        for normal in &mut normals {
            let length = normal.norm();
            if length > f64::EPSILON {
                *normal /= length;
            }
        }
        self.normals = Some(normals);
    }

    /// Axis-aligned bounding box of the vertices.
    ///
    /// Returns `None` for an empty mesh.
    #[must_use]
    pub fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices.iter().copied())
    }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point,
    /// Maximum corner.
    pub max: Point,
}

impl Aabb {
    /// Tightest box around a set of points; `None` when the set is empty.
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut min = first;
        let mut max = first;
        for p in iter {
            min = Point::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
            max = Point::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
        }
        Some(Self { min, max })
    }

    /// The box shifted by a translation vector.
    #[must_use]
    pub fn translated(&self, offset: Vector3<f64>) -> Self {
        Self {
            min: self.min.translated(offset),
            max: self.max.translated(offset),
        }
    }

    /// Tightest axis-aligned box around the image of this box under a rigid
    /// transform.
    ///
    /// All eight corners are mapped, so a rotated box grows to cover its
    /// swept extent instead of silently keeping the local extents.
    #[must_use]
    pub fn transformed(&self, isometry: &Isometry3<f64>) -> Self {
        let corner = |x: f64, y: f64, z: f64| {
            let image = isometry * Point3::new(x, y, z);
            Point::new(image.x, image.y, image.z)
        };
        let first = corner(self.min.x, self.min.y, self.min.z);
        let mut min = first;
        let mut max = first;
        for &x in &[self.min.x, self.max.x] {
            for &y in &[self.min.y, self.max.y] {
                for &z in &[self.min.z, self.max.z] {
                    let p = corner(x, y, z);
                    min = Point::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
                    max = Point::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
                }
            }
        }
        Self { min, max }
    }

    /// Euclidean gap between two boxes in metres; zero when they overlap.
    #[must_use]
    pub fn clearance_to(&self, other: &Self) -> f64 {
        let gap_x = axis_gap(self.min.x, self.max.x, other.min.x, other.max.x);
        let gap_y = axis_gap(self.min.y, self.max.y, other.min.y, other.max.y);
        let gap_z = axis_gap(self.min.z, self.max.z, other.min.z, other.max.z);
        (gap_x * gap_x + gap_y * gap_y + gap_z * gap_z).sqrt()
    }
}

/// Separation between two intervals along one axis; zero when they overlap.
fn axis_gap(a_min: f64, a_max: f64, b_min: f64, b_max: f64) -> f64 {
    (b_min - a_max).max(a_min - b_max).max(0.0)
}
