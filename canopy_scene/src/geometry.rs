// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mesh builders for every [`Shape`].

use alloc::vec::Vec;
use core::f32::consts::{PI, TAU};

use glam::Vec3;
use libm::{cosf, sinf};
use peniko::Color;

use crate::element::Shape;

/// How indices (or vertices, when unindexed) form primitives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
    /// Every three indices form a triangle.
    Triangles,
    /// Every two indices form a line segment.
    Lines,
    /// Every vertex is a point.
    Points,
}

/// Vertex and index buffers ready for upload.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshData {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Per‑vertex unit normals; empty for line and point sets.
    pub normals: Vec<Vec3>,
    /// Per‑vertex colors; empty when the material color applies.
    pub colors: Vec<Color>,
    /// Primitive indices into `positions`.
    pub indices: Vec<u32>,
    /// Primitive kind.
    pub topology: Topology,
}

impl MeshData {
    fn new(topology: Topology) -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            colors: Vec::new(),
            indices: Vec::new(),
            topology,
        }
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of primitives.
    #[must_use]
    pub fn primitive_count(&self) -> usize {
        match self.topology {
            Topology::Triangles => self.indices.len() / 3,
            Topology::Lines => self.indices.len() / 2,
            Topology::Points => self.positions.len(),
        }
    }

    /// Builds the mesh for `shape`.
    #[must_use]
    pub fn from_shape(shape: &Shape) -> Self {
        match shape {
            Shape::Box {
                width,
                height,
                depth,
            } => box_mesh(*width, *height, *depth),
            Shape::Sphere {
                radius,
                width_segments,
                height_segments,
            } => sphere(*radius, *width_segments, *height_segments),
            Shape::Cylinder {
                radius_top,
                radius_bottom,
                height,
                radial_segments,
            } => cylinder(*radius_top, *radius_bottom, *height, *radial_segments),
            Shape::Cone {
                radius,
                height,
                radial_segments,
            } => cylinder(0.0, *radius, *height, *radial_segments),
            Shape::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => torus(*radius, *tube, *radial_segments, *tubular_segments),
            Shape::Parametric {
                func,
                segments_u,
                segments_v,
            } => parametric(&**func, *segments_u, *segments_v),
            Shape::Points(points) => point_cloud(points),
            Shape::Axes { size } => axes(*size),
            Shape::Grid { size, divisions } => grid(*size, *divisions),
        }
    }

    /// Appends two triangles for the quad `a b c d` (counter‑clockwise).
    fn quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    fn next_index(&self) -> u32 {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "segment counts are u32, so vertex counts fit"
        )]
        let n = self.positions.len() as u32;
        n
    }
}

/// An axis‑aligned box centred on the origin, four vertices per face.
#[must_use]
pub fn box_mesh(width: f32, height: f32, depth: f32) -> MeshData {
    let h = Vec3::new(width, height, depth) * 0.5;
    let mut mesh = MeshData::new(Topology::Triangles);
    // (normal, u axis, v axis) with u × v = normal.
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    for (n, u, v) in faces {
        let base = mesh.next_index();
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            mesh.positions.push((n + u * su + v * sv) * h);
            mesh.normals.push(n);
        }
        mesh.quad(base, base + 1, base + 2, base + 3);
    }
    mesh
}

/// A UV sphere.
#[must_use]
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let mut mesh = MeshData::new(Topology::Triangles);
    for iy in 0..=hs {
        let theta = iy as f32 / hs as f32 * PI;
        for ix in 0..=ws {
            let phi = ix as f32 / ws as f32 * TAU;
            let n = Vec3::new(
                -cosf(phi) * sinf(theta),
                cosf(theta),
                sinf(phi) * sinf(theta),
            );
            mesh.positions.push(n * radius);
            mesh.normals.push(n);
        }
    }
    let row = ws + 1;
    for iy in 0..hs {
        for ix in 0..ws {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            // Skip the degenerate triangle at each pole.
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

/// A capped cylinder along Y. A zero radius omits that cap.
#[must_use]
pub fn cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial_segments: u32,
) -> MeshData {
    let rs = radial_segments.max(3);
    let half = height * 0.5;
    let slope = (radius_bottom - radius_top) / if height == 0.0 { 1.0 } else { height };
    let mut mesh = MeshData::new(Topology::Triangles);

    for (y, r) in [(half, radius_top), (-half, radius_bottom)] {
        for i in 0..=rs {
            let a = i as f32 / rs as f32 * TAU;
            let (sin, cos) = (sinf(a), cosf(a));
            mesh.positions.push(Vec3::new(r * sin, y, r * cos));
            mesh.normals.push(Vec3::new(sin, slope, cos).normalize_or_zero());
        }
    }
    let row = rs + 1;
    for i in 0..rs {
        mesh.quad(i, i + row, i + row + 1, i + 1);
    }

    for (y, r, up) in [(half, radius_top, 1.0), (-half, radius_bottom, -1.0)] {
        if r <= 0.0 {
            continue;
        }
        let normal = Vec3::Y * up;
        let center = mesh.next_index();
        mesh.positions.push(Vec3::new(0.0, y, 0.0));
        mesh.normals.push(normal);
        for i in 0..=rs {
            let a = i as f32 / rs as f32 * TAU;
            mesh.positions.push(Vec3::new(r * sinf(a), y, r * cosf(a)));
            mesh.normals.push(normal);
        }
        for i in 0..rs {
            let (p, q) = (center + 1 + i, center + 2 + i);
            if up > 0.0 {
                mesh.indices.extend_from_slice(&[p, q, center]);
            } else {
                mesh.indices.extend_from_slice(&[q, p, center]);
            }
        }
    }
    mesh
}

/// A torus in the XY plane.
#[must_use]
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let rs = radial_segments.max(2);
    let ts = tubular_segments.max(3);
    let mut mesh = MeshData::new(Topology::Triangles);
    for j in 0..=rs {
        let v = j as f32 / rs as f32 * TAU;
        for i in 0..=ts {
            let u = i as f32 / ts as f32 * TAU;
            let p = Vec3::new(
                (radius + tube * cosf(v)) * cosf(u),
                (radius + tube * cosf(v)) * sinf(u),
                tube * sinf(v),
            );
            let ring = Vec3::new(radius * cosf(u), radius * sinf(u), 0.0);
            mesh.positions.push(p);
            mesh.normals.push((p - ring).normalize_or_zero());
        }
    }
    grid_indices(&mut mesh, ts, rs);
    mesh
}

/// Samples `func` over a `(segments_u + 1) × (segments_v + 1)` grid of
/// `(u, v)` in `[0, 1]²`.
///
/// Normals come from central differences; degenerate points get a zero
/// normal.
#[must_use]
pub fn parametric(func: &dyn Fn(f32, f32) -> Vec3, segments_u: u32, segments_v: u32) -> MeshData {
    let su = segments_u.max(1);
    let sv = segments_v.max(1);
    let eps = 1e-4;
    let mut mesh = MeshData::new(Topology::Triangles);
    for j in 0..=sv {
        let v = j as f32 / sv as f32;
        for i in 0..=su {
            let u = i as f32 / su as f32;
            let p = func(u, v);
            let du = func((u + eps).min(1.0), v) - func((u - eps).max(0.0), v);
            let dv = func(u, (v + eps).min(1.0)) - func(u, (v - eps).max(0.0));
            mesh.positions.push(p);
            mesh.normals.push(du.cross(dv).normalize_or_zero());
        }
    }
    grid_indices(&mut mesh, su, sv);
    mesh
}

/// One point per position.
#[must_use]
pub fn point_cloud(points: &[Vec3]) -> MeshData {
    let mut mesh = MeshData::new(Topology::Points);
    mesh.positions.extend_from_slice(points);
    mesh
}

/// Red, green and blue lines from the origin along +X, +Y and +Z.
#[must_use]
pub fn axes(size: f32) -> MeshData {
    let mut mesh = MeshData::new(Topology::Lines);
    let colors = [
        Color::from_rgb8(0xff, 0x00, 0x00),
        Color::from_rgb8(0x00, 0xff, 0x00),
        Color::from_rgb8(0x00, 0x00, 0xff),
    ];
    for (dir, color) in [Vec3::X, Vec3::Y, Vec3::Z].into_iter().zip(colors) {
        let base = mesh.next_index();
        mesh.positions.extend_from_slice(&[Vec3::ZERO, dir * size]);
        mesh.colors.extend_from_slice(&[color, color]);
        mesh.indices.extend_from_slice(&[base, base + 1]);
    }
    mesh
}

/// A square grid of lines on the XZ plane, `divisions` cells per side.
#[must_use]
pub fn grid(size: f32, divisions: u32) -> MeshData {
    let n = divisions.max(1);
    let half = size * 0.5;
    let step = size / n as f32;
    let mut mesh = MeshData::new(Topology::Lines);
    for i in 0..=n {
        let k = -half + i as f32 * step;
        let base = mesh.next_index();
        mesh.positions.extend_from_slice(&[
            Vec3::new(-half, 0.0, k),
            Vec3::new(half, 0.0, k),
            Vec3::new(k, 0.0, -half),
            Vec3::new(k, 0.0, half),
        ]);
        mesh.indices.extend_from_slice(&[base, base + 1, base + 2, base + 3]);
    }
    mesh
}

/// Triangulates a row‑major `(cols + 1) × (rows + 1)` vertex grid.
fn grid_indices(mesh: &mut MeshData, cols: u32, rows: u32) {
    let row = cols + 1;
    for j in 0..rows {
        for i in 0..cols {
            let a = j * row + i;
            mesh.quad(a, a + 1, a + row + 1, a + row);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;

    use glam::Vec3;

    use super::{MeshData, Topology, axes, box_mesh, cylinder, grid, parametric, sphere, torus};
    use crate::element::Shape;

    fn indices_in_range(mesh: &MeshData) -> bool {
        mesh.indices.iter().all(|&i| (i as usize) < mesh.positions.len())
    }

    #[test]
    fn box_has_six_quads() {
        let m = box_mesh(2.0, 4.0, 6.0);
        assert_eq!(m.vertex_count(), 24);
        assert_eq!(m.primitive_count(), 12);
        assert!(indices_in_range(&m));
        for p in &m.positions {
            assert_eq!(p.abs(), Vec3::new(1.0, 2.0, 3.0));
        }
    }

    #[test]
    fn box_winding_faces_outward() {
        let m = box_mesh(1.0, 1.0, 1.0);
        for tri in m.indices.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|k| m.positions[tri[k] as usize]);
            let face_normal = (b - a).cross(c - a);
            assert!(face_normal.dot(m.normals[tri[0] as usize]) > 0.0);
        }
    }

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let m = sphere(2.0, 8, 6);
        assert_eq!(m.vertex_count(), 9 * 7);
        // Two pole rows contribute one triangle per segment.
        assert_eq!(m.primitive_count(), 8 * 6 * 2 - 2 * 8);
        assert!(indices_in_range(&m));
        for p in &m.positions {
            assert!((p.length() - 2.0).abs() < 1e-5);
        }
    }

    #[test]
    fn segment_counts_are_clamped() {
        assert_eq!(sphere(1.0, 0, 0).vertex_count(), 4 * 3);
        assert_eq!(torus(1.0, 0.2, 0, 0).vertex_count(), 4 * 3);
    }

    #[test]
    fn cone_has_only_a_base_cap() {
        let cone = cylinder(0.0, 1.0, 2.0, 8);
        let can = cylinder(1.0, 1.0, 2.0, 8);
        assert_eq!(can.vertex_count() - cone.vertex_count(), 10);
        assert!(indices_in_range(&cone));
        assert_eq!(
            MeshData::from_shape(&Shape::Cone {
                radius: 1.0,
                height: 2.0,
                radial_segments: 8
            }),
            cone
        );
    }

    #[test]
    fn parametric_grid_size() {
        let m = parametric(&|u, v| Vec3::new(u, v, 0.0), 4, 3);
        assert_eq!(m.vertex_count(), 5 * 4);
        assert_eq!(m.primitive_count(), 4 * 3 * 2);
        assert!(indices_in_range(&m));
        for n in &m.normals {
            assert!((*n - Vec3::Z).length() < 1e-3);
        }
        let shape = Shape::Parametric {
            func: Rc::new(|u, v| Vec3::new(u, 0.0, v)),
            segments_u: 2,
            segments_v: 2,
        };
        assert_eq!(MeshData::from_shape(&shape).vertex_count(), 9);
    }

    #[test]
    fn line_sets() {
        let a = axes(2.0);
        assert_eq!(a.topology, Topology::Lines);
        assert_eq!(a.primitive_count(), 3);
        assert_eq!(a.colors.len(), a.positions.len());
        assert_eq!(a.positions[5], Vec3::new(0.0, 0.0, 2.0));

        let g = grid(10.0, 4);
        assert_eq!(g.primitive_count(), 10);
        assert!(indices_in_range(&g));
        assert!(g.positions.iter().all(|p| p.y == 0.0 && p.x.abs() <= 5.0));
    }

    #[test]
    fn point_cloud_is_unindexed() {
        let pts: Rc<[Vec3]> = Rc::from([Vec3::ZERO, Vec3::ONE].as_slice());
        let m = MeshData::from_shape(&Shape::Points(pts));
        assert_eq!(m.topology, Topology::Points);
        assert_eq!(m.primitive_count(), 2);
        assert!(m.indices.is_empty());
    }
}
