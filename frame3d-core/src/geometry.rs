//! Geometry primitives for 3D rendering

use nalgebra::{Matrix3x2, Point3, Vector2, Vector3};

use crate::error::DegenerateInputError;
use crate::tangent::try_tangent_bitangent;

/// A 3D vertex with position, normal and texture coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
    pub uv: Vector2<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            normal: Vector3::new(nx, ny, nz),
            uv: Vector2::zeros(),
        }
    }

    pub fn with_uv(mut self, u: f32, v: f32) -> Self {
        self.uv = Vector2::new(u, v);
        self
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).normalize()
    }

    /// Tangent and bitangent columns for normal mapping
    pub fn tangent_basis(&self) -> Result<Matrix3x2<f32>, DegenerateInputError> {
        let [a, b, c] = &self.vertices;
        try_tangent_bitangent(
            &a.position.coords,
            &b.position.coords,
            &c.position.coords,
            &a.uv,
            &b.uv,
            &c.uv,
        )
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Add a square face as two triangles, textured with the unit square.
    ///
    /// `u` and `v` are the face's texture directions with `u × v` along
    /// `normal`, so both triangles wind counter-clockwise seen from outside.
    fn add_face(&mut self, half: f32, normal: Vector3<f32>, u: Vector3<f32>, v: Vector3<f32>) {
        let corner = |s: f32, t: f32| {
            let p = (normal + u * (2.0 * s - 1.0) + v * (2.0 * t - 1.0)) * half;
            Vertex::new(p.x, p.y, p.z, normal.x, normal.y, normal.z).with_uv(s, t)
        };
        self.add_triangle(Triangle::new(corner(0.0, 0.0), corner(1.0, 0.0), corner(1.0, 1.0)));
        self.add_triangle(Triangle::new(corner(0.0, 0.0), corner(1.0, 1.0), corner(0.0, 1.0)));
    }

    /// Create a textured cube mesh centred on the origin
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let (x, y, z) = (Vector3::x(), Vector3::y(), Vector3::z());
        let mut mesh = Self::with_capacity(12);

        mesh.add_face(half, z, x, y); // front
        mesh.add_face(half, -z, -x, y); // back
        mesh.add_face(half, y, z, x); // top
        mesh.add_face(half, -y, x, z); // bottom
        mesh.add_face(half, x, y, z); // right
        mesh.add_face(half, -x, z, y); // left

        mesh
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
