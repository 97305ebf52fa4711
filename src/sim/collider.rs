//! Circle and convex polygon colliders
//!
//! A collider owns its world position and a cached broad-phase box. Shape data
//! (radius, polygon vertices, edge normals, winding) is computed once at
//! construction; only the position changes afterwards, and every position
//! change goes through [`Collider::set_position`] or [`Collider::translate`]
//! so the cached bounds never go stale.

use glam::Vec2;

use super::geometry::{Aabb, cross};
use crate::consts::BOUNDS_MARGIN;

/// Construction failures for polygon colliders
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("a polygon needs at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },
    #[error("polygon is not convex at vertex {vertex}")]
    NotConvex { vertex: usize },
    #[error("polygon is degenerate (zero-length edge or collinear vertices)")]
    Degenerate,
}

/// Circle shape. Radius is clamped to at least 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    radius: f32,
    radius_squared: f32,
}

impl Circle {
    pub fn new(radius: f32) -> Self {
        let radius = radius.max(1.0);
        Self {
            radius,
            radius_squared: radius * radius,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn radius_squared(&self) -> f32 {
        self.radius_squared
    }

    fn local_bounds(&self) -> Aabb {
        Aabb::from_center(Vec2::ZERO, Vec2::splat(self.radius))
    }
}

/// Strictly convex polygon with vertices relative to the collider position
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexPolygon {
    vertices: Vec<Vec2>,
    /// Clockwise in screen space (y down)
    clockwise: bool,
    /// Outward unit normal of edge `i` (vertex `i` to vertex `i + 1`)
    normals: Vec<Vec2>,
    /// Mean of the vertices, relative to the collider position
    centroid: Vec2,
    local_bounds: Aabb,
}

impl ConvexPolygon {
    pub fn new(vertices: Vec<Vec2>) -> Result<Self, GeometryError> {
        let count = vertices.len();
        if count < 3 {
            return Err(GeometryError::TooFewVertices { count });
        }

        let clockwise = winding(&vertices)?;
        let normals = edge_normals(&vertices, clockwise)?;
        enclosed(&vertices, &normals)?;
        let centroid = vertices.iter().copied().sum::<Vec2>() / count as f32;
        let local_bounds = Aabb::from_points(&vertices).ok_or(GeometryError::Degenerate)?;

        Ok(Self {
            vertices,
            clockwise,
            normals,
            centroid,
            local_bounds,
        })
    }

    /// Vertices relative to the collider position
    pub fn local_vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn normals(&self) -> &[Vec2] {
        &self.normals
    }

    pub fn is_clockwise(&self) -> bool {
        self.clockwise
    }

    /// Number of vertices (and edges)
    pub fn degree(&self) -> usize {
        self.vertices.len()
    }
}

/// Winding of a convex vertex loop, or an error if the loop is not convex.
///
/// The reference sign is the first non-zero corner cross product; collinear
/// corners (zero cross product) neither violate convexity nor set the sign.
fn winding(vertices: &[Vec2]) -> Result<bool, GeometryError> {
    let n = vertices.len();
    let mut sign = 0.0_f32;

    for i in 0..n {
        let prev = vertices[(i + n - 1) % n];
        let next = vertices[(i + 1) % n];
        let corner = cross(prev - vertices[i], next - vertices[i]);

        if corner == 0.0 {
            continue;
        }
        if sign == 0.0 {
            sign = corner.signum();
        } else if sign * corner < 0.0 {
            return Err(GeometryError::NotConvex { vertex: i });
        }
    }

    if sign == 0.0 {
        return Err(GeometryError::Degenerate);
    }
    Ok(sign < 0.0)
}

/// Every vertex must lie on or behind every edge. A loop that turns the same
/// way at each corner but winds around more than once (a star) fails here.
fn enclosed(vertices: &[Vec2], normals: &[Vec2]) -> Result<(), GeometryError> {
    const TOLERANCE: f32 = 1e-3;

    for (i, (&start, &normal)) in vertices.iter().zip(normals).enumerate() {
        let outside = vertices
            .iter()
            .position(|&v| (v - start).dot(normal) > TOLERANCE);
        if let Some(vertex) = outside {
            log::debug!("vertex {} lies outside edge {}", vertex, i);
            return Err(GeometryError::NotConvex { vertex });
        }
    }
    Ok(())
}

fn edge_normals(vertices: &[Vec2], clockwise: bool) -> Result<Vec<Vec2>, GeometryError> {
    let n = vertices.len();
    (0..n)
        .map(|i| {
            let edge = (vertices[(i + 1) % n] - vertices[i])
                .try_normalize()
                .ok_or(GeometryError::Degenerate)?;
            Ok(if clockwise {
                Vec2::new(edge.y, -edge.x)
            } else {
                Vec2::new(-edge.y, edge.x)
            })
        })
        .collect()
}

/// Collider shape variants
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Polygon(ConvexPolygon),
}

/// A positioned shape with a cached, skin-inflated bounding box
#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    pos: Vec2,
    shape: Shape,
    bounds: Aabb,
}

impl Collider {
    pub fn circle(pos: Vec2, radius: f32) -> Self {
        Self::from_shape(pos, Shape::Circle(Circle::new(radius)))
    }

    /// `vertices` are relative to `pos`
    pub fn polygon(pos: Vec2, vertices: Vec<Vec2>) -> Result<Self, GeometryError> {
        Ok(Self::from_shape(pos, Shape::Polygon(ConvexPolygon::new(vertices)?)))
    }

    fn from_shape(pos: Vec2, shape: Shape) -> Self {
        let mut collider = Self {
            pos,
            shape,
            bounds: Aabb::new(pos, pos),
        };
        collider.recompute_bounds();
        collider
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// World-space broad-phase box, inflated by [`BOUNDS_MARGIN`]
    #[inline]
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
        self.recompute_bounds();
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.set_position(self.pos + offset);
    }

    pub fn recompute_bounds(&mut self) {
        let local = match &self.shape {
            Shape::Circle(c) => c.local_bounds(),
            Shape::Polygon(p) => p.local_bounds,
        };
        self.bounds = local.translated(self.pos).inflated(BOUNDS_MARGIN);
    }

    pub fn as_circle(&self) -> Option<&Circle> {
        match &self.shape {
            Shape::Circle(c) => Some(c),
            Shape::Polygon(_) => None,
        }
    }

    /// World-space polygon vertices; empty for circles
    pub fn world_vertices(&self) -> Vec<Vec2> {
        match &self.shape {
            Shape::Circle(_) => Vec::new(),
            Shape::Polygon(p) => p.vertices.iter().map(|&v| v + self.pos).collect(),
        }
    }

    /// Centre of rotation in world space
    pub fn centroid(&self) -> Vec2 {
        match &self.shape {
            Shape::Circle(_) => self.pos,
            Shape::Polygon(p) => p.centroid + self.pos,
        }
    }
}
