// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The declarative scene tree.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

use glam::{EulerRot, Mat4, Quat, Vec3};
use peniko::Color;

/// Stable identity of a node across renders.
///
/// Two trees rendered in sequence match nodes by key, never by position.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(Rc<str>);

impl NodeKey {
    /// The key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeKey {
    fn from(s: &str) -> Self {
        Self(Rc::from(s))
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Local transform of a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform3D {
    /// Translation.
    pub position: Vec3,
    /// Euler angles in radians, applied in X, Y, Z order.
    pub rotation: Vec3,
    /// Per‑axis scale.
    pub scale: Vec3,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform3D {
    /// No translation, rotation or scale.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    /// A pure translation.
    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Replaces the rotation.
    #[must_use]
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Replaces the scale.
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Component‑wise linear interpolation.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            rotation: self.rotation.lerp(other.rotation, t),
            scale: self.scale.lerp(other.scale, t),
        }
    }

    /// The equivalent matrix.
    #[must_use]
    pub fn to_mat4(&self) -> Mat4 {
        let r = self.rotation;
        Mat4::from_scale_rotation_translation(
            self.scale,
            Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z),
            self.position,
        )
    }
}

/// Surface appearance of a mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Base color.
    pub color: Color,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    /// Render edges only.
    pub wireframe: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            opacity: 1.0,
            wireframe: false,
        }
    }
}

impl Material {
    /// An opaque material of `color`.
    #[must_use]
    pub fn solid(color: Color) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    /// Sets wireframe rendering.
    #[must_use]
    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.wireframe = wireframe;
        self
    }

    /// Sets the opacity.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

/// Kind of light source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightKind {
    /// Uniform light from every direction.
    Ambient,
    /// Parallel rays along the node's −Z axis.
    Directional,
    /// Light radiating from the node's position.
    Point,
}

/// A light source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    /// Kind of light.
    pub kind: LightKind,
    /// Light color.
    pub color: Color,
    /// Scalar intensity.
    pub intensity: f32,
}

/// A surface sampled from `(u, v)` in `[0, 1]²`.
pub type SurfaceFn = Rc<dyn Fn(f32, f32) -> Vec3>;

/// Geometry of a mesh.
///
/// Any change to a shape, including its segment counts, replaces the
/// backend geometry.
#[derive(Clone)]
pub enum Shape {
    /// An axis‑aligned box centred on the origin.
    Box {
        /// Size along X.
        width: f32,
        /// Size along Y.
        height: f32,
        /// Size along Z.
        depth: f32,
    },
    /// A UV sphere.
    Sphere {
        /// Radius.
        radius: f32,
        /// Segments around the equator (at least 3).
        width_segments: u32,
        /// Segments from pole to pole (at least 2).
        height_segments: u32,
    },
    /// A capped cylinder along Y.
    Cylinder {
        /// Radius at +Y.
        radius_top: f32,
        /// Radius at −Y.
        radius_bottom: f32,
        /// Height.
        height: f32,
        /// Segments around the axis (at least 3).
        radial_segments: u32,
    },
    /// A cone along Y with its apex at +Y.
    Cone {
        /// Base radius.
        radius: f32,
        /// Height.
        height: f32,
        /// Segments around the axis (at least 3).
        radial_segments: u32,
    },
    /// A torus in the XY plane.
    Torus {
        /// Distance from the centre to the middle of the tube.
        radius: f32,
        /// Tube radius.
        tube: f32,
        /// Segments around the tube (at least 2).
        radial_segments: u32,
        /// Segments around the ring (at least 3).
        tubular_segments: u32,
    },
    /// A parametric surface.
    Parametric {
        /// The surface function. Compared by identity.
        func: SurfaceFn,
        /// Samples along `u` minus one.
        segments_u: u32,
        /// Samples along `v` minus one.
        segments_v: u32,
    },
    /// A point cloud.
    Points(Rc<[Vec3]>),
    /// Red, green and blue lines along +X, +Y and +Z.
    Axes {
        /// Line length.
        size: f32,
    },
    /// A square line grid on the XZ plane.
    Grid {
        /// Edge length.
        size: f32,
        /// Cells per side.
        divisions: u32,
    },
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        use Shape::*;
        match (self, other) {
            (
                Box {
                    width: a,
                    height: b,
                    depth: c,
                },
                Box {
                    width: x,
                    height: y,
                    depth: z,
                },
            ) => (a, b, c) == (x, y, z),
            (
                Sphere {
                    radius: a,
                    width_segments: b,
                    height_segments: c,
                },
                Sphere {
                    radius: x,
                    width_segments: y,
                    height_segments: z,
                },
            ) => (a, b, c) == (x, y, z),
            (
                Cylinder {
                    radius_top: a,
                    radius_bottom: b,
                    height: c,
                    radial_segments: d,
                },
                Cylinder {
                    radius_top: w,
                    radius_bottom: x,
                    height: y,
                    radial_segments: z,
                },
            ) => (a, b, c, d) == (w, x, y, z),
            (
                Cone {
                    radius: a,
                    height: b,
                    radial_segments: c,
                },
                Cone {
                    radius: x,
                    height: y,
                    radial_segments: z,
                },
            ) => (a, b, c) == (x, y, z),
            (
                Torus {
                    radius: a,
                    tube: b,
                    radial_segments: c,
                    tubular_segments: d,
                },
                Torus {
                    radius: w,
                    tube: x,
                    radial_segments: y,
                    tubular_segments: z,
                },
            ) => (a, b, c, d) == (w, x, y, z),
            (
                Parametric {
                    func: f,
                    segments_u: a,
                    segments_v: b,
                },
                Parametric {
                    func: g,
                    segments_u: x,
                    segments_v: y,
                },
            ) => Rc::ptr_eq(f, g) && (a, b) == (x, y),
            (Points(a), Points(b)) => Rc::ptr_eq(a, b) || a == b,
            (Axes { size: a }, Axes { size: b }) => a == b,
            (
                Grid {
                    size: a,
                    divisions: b,
                },
                Grid {
                    size: x,
                    divisions: y,
                },
            ) => (a, b) == (x, y),
            _ => false,
        }
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Box {
                width,
                height,
                depth,
            } => f
                .debug_struct("Box")
                .field("width", width)
                .field("height", height)
                .field("depth", depth)
                .finish(),
            Self::Sphere {
                radius,
                width_segments,
                height_segments,
            } => f
                .debug_struct("Sphere")
                .field("radius", radius)
                .field("width_segments", width_segments)
                .field("height_segments", height_segments)
                .finish(),
            Self::Cylinder {
                radius_top,
                radius_bottom,
                height,
                radial_segments,
            } => f
                .debug_struct("Cylinder")
                .field("radius_top", radius_top)
                .field("radius_bottom", radius_bottom)
                .field("height", height)
                .field("radial_segments", radial_segments)
                .finish(),
            Self::Cone {
                radius,
                height,
                radial_segments,
            } => f
                .debug_struct("Cone")
                .field("radius", radius)
                .field("height", height)
                .field("radial_segments", radial_segments)
                .finish(),
            Self::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => f
                .debug_struct("Torus")
                .field("radius", radius)
                .field("tube", tube)
                .field("radial_segments", radial_segments)
                .field("tubular_segments", tubular_segments)
                .finish(),
            Self::Parametric {
                segments_u,
                segments_v,
                ..
            } => f
                .debug_struct("Parametric")
                .field("segments_u", segments_u)
                .field("segments_v", segments_v)
                .finish_non_exhaustive(),
            Self::Points(points) => f.debug_tuple("Points").field(&points.len()).finish(),
            Self::Axes { size } => f.debug_struct("Axes").field("size", size).finish(),
            Self::Grid { size, divisions } => f
                .debug_struct("Grid")
                .field("size", size)
                .field("divisions", divisions)
                .finish(),
        }
    }
}

/// What a node is.
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    /// A container that publishes itself as the parent of its children.
    Group,
    /// A drawable shape.
    Mesh {
        /// Geometry.
        shape: Shape,
        /// Appearance.
        material: Material,
    },
    /// A light source.
    Light(Light),
}

/// One node of a declarative scene tree.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    /// Identity across renders.
    pub key: NodeKey,
    /// What the node is.
    pub element: Element,
    /// Local transform.
    pub transform: Transform3D,
    /// Children; only meaningful under a [`Element::Group`].
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// An empty group.
    #[must_use]
    pub fn group(key: impl Into<NodeKey>) -> Self {
        Self::new(key, Element::Group)
    }

    /// A mesh.
    #[must_use]
    pub fn mesh(key: impl Into<NodeKey>, shape: Shape, material: Material) -> Self {
        Self::new(key, Element::Mesh { shape, material })
    }

    /// A light.
    #[must_use]
    pub fn light(key: impl Into<NodeKey>, light: Light) -> Self {
        Self::new(key, Element::Light(light))
    }

    fn new(key: impl Into<NodeKey>, element: Element) -> Self {
        Self {
            key: key.into(),
            element,
            transform: Transform3D::IDENTITY,
            children: Vec::new(),
        }
    }

    /// Replaces the transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform3D) -> Self {
        self.transform = transform;
        self
    }

    /// Appends a child.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }
}
