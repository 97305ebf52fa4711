//! Collision detection between the player's circle and platform colliders
//!
//! Broad phase is a box overlap test on the skin-inflated bounds. The narrow
//! phase handles circle-circle exactly; circle-polygon is reduced to
//! circle-vs-edge followed by circle-vs-vertex, which is enough for a small
//! agent against convex platforms without a full SAT test.

use glam::Vec2;

use super::collider::{Circle, Collider, ConvexPolygon, Shape};
use super::geometry::inverse_lerp;
use crate::consts::{SKIN_WIDTH, WORLD_UP};

/// Result of a narrow-phase test
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionInfo {
    /// Unit normal pointing from the obstacle toward the agent
    pub normal: Vec2,
    /// Penetration depth (>= 0)
    pub overlap: f32,
    /// Contact point in world space
    pub point: Vec2,
    /// Displacement of a moving obstacle during this step (zero when static)
    pub inherited_offset: Vec2,
}

impl CollisionInfo {
    pub fn new(normal: Vec2, overlap: f32, point: Vec2) -> Self {
        Self {
            normal,
            overlap,
            point,
            inherited_offset: Vec2::ZERO,
        }
    }

    pub fn with_inherited_offset(mut self, offset: Vec2) -> Self {
        self.inherited_offset = offset;
        self
    }

    /// Correction that leaves the agent one skin width inside the surface,
    /// so the next step still registers contact
    pub fn offset_in(&self) -> Vec2 {
        self.normal * (self.overlap - SKIN_WIDTH)
    }

    /// Correction that pushes the agent fully out, one skin width clear
    pub fn offset_out(&self) -> Vec2 {
        self.normal * (self.overlap + SKIN_WIDTH)
    }
}

/// Test the agent's circle collider against any other collider.
///
/// Returns `None` when the bounds do not overlap, the shapes do not touch,
/// or the agent is not a circle.
pub fn detect(agent: &Collider, other: &Collider) -> Option<CollisionInfo> {
    if !agent.bounds().overlaps(other.bounds()) {
        return None;
    }

    match (agent.shape(), other.shape()) {
        (Shape::Circle(a), Shape::Circle(b)) => circle_circle(agent.pos(), a, other.pos(), b),
        (Shape::Circle(a), Shape::Polygon(p)) => circle_polygon(agent.pos(), a, other.pos(), p),
        (Shape::Polygon(_), _) => {
            log::warn!("collision detection requires a circle agent, got a polygon");
            None
        }
    }
}

/// Circle vs circle. Touching circles (distance == sum of radii) collide with
/// zero overlap.
pub fn circle_circle(pos_a: Vec2, a: &Circle, pos_b: Vec2, b: &Circle) -> Option<CollisionInfo> {
    let d2 = (pos_a - pos_b).length_squared();
    let radii = a.radius() + b.radius();

    if radii * radii < d2 {
        return None;
    }

    let d = d2.sqrt();
    // Coincident centres have no separating direction; push the agent up
    let normal = if d > 0.0 { (pos_a - pos_b) / d } else { WORLD_UP };
    Some(CollisionInfo::new(
        normal,
        radii - d,
        pos_a - normal * (d - b.radius()),
    ))
}

/// Circle vs convex polygon.
///
/// Edges are tested in winding order and the first edge whose segment the
/// centre projects onto, within one radius on the outside, wins. Otherwise
/// the nearest vertex inside the circle is used.
///
/// A centre lying inside the polygon is reported as no collision.
pub fn circle_polygon(
    center: Vec2,
    circle: &Circle,
    pos: Vec2,
    poly: &ConvexPolygon,
) -> Option<CollisionInfo> {
    let radius = circle.radius();
    let vertices: Vec<Vec2> = poly.local_vertices().iter().map(|&v| v + pos).collect();
    let n = vertices.len();

    // Signed distance of the centre from each edge line, positive outside
    let distances: Vec<f32> = poly
        .normals()
        .iter()
        .zip(&vertices)
        .map(|(normal, v)| (center - *v).dot(*normal))
        .collect();

    if distances.iter().all(|&d| d < 0.0) {
        log::debug!("circle centre inside polygon at {:?}; not resolved", center);
        return None;
    }

    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let Some(t) = inverse_lerp(a, b, center) else {
            continue;
        };
        if !(0.0..=1.0).contains(&t) {
            continue;
        }

        let d = distances[i];
        if (0.0..=radius).contains(&d) {
            let normal = poly.normals()[i];
            return Some(CollisionInfo::new(normal, radius - d, center - normal * d));
        }
    }

    vertices.iter().find_map(|&v| {
        let offset = center - v;
        let d2 = offset.length_squared();
        if d2 > circle.radius_squared() {
            return None;
        }
        let normal = offset.try_normalize()?;
        Some(CollisionInfo::new(normal, radius - d2.sqrt(), v))
    })
}
