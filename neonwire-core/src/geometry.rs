/// Wireframe geometry: vertices joined by edges
use nalgebra::{Point3, Vector3};
use std::f32::consts::TAU;

use crate::config::{RenderConfig, Shape};

/// A line mesh. Edges index into `vertices`.
#[derive(Debug, Clone, Default)]
pub struct Wireframe {
    pub vertices: Vec<Point3<f32>>,
    pub edges: Vec<(usize, usize)>,
}

impl Wireframe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            edges: Vec::with_capacity(edges),
        }
    }

    pub fn add_vertex(&mut self, position: Point3<f32>) -> usize {
        self.vertices.push(position);
        self.vertices.len() - 1
    }

    pub fn add_edge(&mut self, a: usize, b: usize) {
        self.edges.push((a, b));
    }

    /// Build the mesh selected by the render config
    pub fn from_config(render: &RenderConfig) -> Self {
        match render.shape {
            Shape::TorusKnot => Self::torus_knot(
                1.0,
                0.3,
                render.tubular_segments,
                render.radial_segments,
                2,
                3,
            ),
            Shape::Cube => Self::cube(1.6),
        }
    }

    /// Axis-aligned cube centered on the origin
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let mut mesh = Self::with_capacity(8, 12);
        for &(x, y, z) in &[
            (-half, -half, -half),
            (half, -half, -half),
            (half, half, -half),
            (-half, half, -half),
            (-half, -half, half),
            (half, -half, half),
            (half, half, half),
            (-half, half, half),
        ] {
            mesh.add_vertex(Point3::new(x, y, z));
        }
        for i in 0..4 {
            mesh.add_edge(i, (i + 1) % 4); // back ring
            mesh.add_edge(i + 4, (i + 1) % 4 + 4); // front ring
            mesh.add_edge(i, i + 4); // struts
        }
        mesh
    }

    /// Tube of radius `tube` swept along a (p, q) torus knot.
    ///
    /// Vertices form a `(tubular + 1) × (radial + 1)` grid with a duplicated
    /// seam; edges run along both grid directions.
    pub fn torus_knot(radius: f32, tube: f32, tubular: usize, radial: usize, p: u32, q: u32) -> Self {
        let columns = radial + 1;
        let mut mesh = Self::with_capacity((tubular + 1) * columns, tubular * radial * 2);

        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * p as f32 * TAU;
            let p1 = knot_point(u, p, q, radius);
            let p2 = knot_point(u + 0.01, p, q, radius);

            // Frame around the curve
            let tangent = p2 - p1;
            let mut normal = p2.coords + p1.coords;
            let binormal = tangent.cross(&normal).normalize();
            normal = binormal.cross(&tangent).normalize();

            for j in 0..=radial {
                let v = j as f32 / radial as f32 * TAU;
                let cx = -tube * v.cos();
                let cy = tube * v.sin();
                mesh.add_vertex(p1 + normal * cx + binormal * cy);
            }
        }

        for i in 0..tubular {
            for j in 0..radial {
                let a = i * columns + j;
                mesh.add_edge(a, a + columns);
                mesh.add_edge(a, a + 1);
            }
        }

        mesh
    }

    /// Largest distance from the origin to any vertex
    pub fn bounding_radius(&self) -> f32 {
        self.vertices
            .iter()
            .map(|v| v.coords.norm())
            .fold(0.0, f32::max)
    }
}

fn knot_point(u: f32, p: u32, q: u32, radius: f32) -> Point3<f32> {
    let cu = u.cos();
    let su = u.sin();
    let qu_over_p = q as f32 / p as f32 * u;
    let cs = qu_over_p.cos();
    Point3::from(Vector3::new(
        radius * (2.0 + cs) * 0.5 * cu,
        radius * (2.0 + cs) * su * 0.5,
        radius * qu_over_p.sin() * 0.5,
    ))
}
