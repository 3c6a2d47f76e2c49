use rapier3d::parry::{query::PointQuery, shape as pshape};

use super::{
    settings::{CONTACT_EPS, DIST_EPS, INSIDE_EPS},
    types::{Point3, TriangleVerts, Vec3},
};

/// Push-out found for one shape/triangle pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Penetration {
    /// Unit direction pointing from the triangle toward the shape.
    pub normal: Vec3,
    /// Overlap along `normal` (always > `CONTACT_EPS`).
    pub depth: f32,
}

/// Unit face normal `(b - a) x (c - a)`, or `None` for a degenerate triangle.
#[inline]
pub fn face_normal(tri: &TriangleVerts) -> Option<Vec3> {
    let [a, b, c] = tri;
    let n = (b - a).cross(&(c - a));
    let len = n.norm();
    if len > DIST_EPS * DIST_EPS {
        Some(n / len)
    } else {
        None
    }
}

/// Closest point on a triangle (boundary or interior) to `p`.
#[inline]
pub fn closest_point_on_triangle(p: &Vec3, tri: &TriangleVerts) -> Vec3 {
    let [a, b, c] = tri;
    let shape = pshape::Triangle::new(Point3::from(*a), Point3::from(*b), Point3::from(*c));
    shape.project_local_point(&Point3::from(*p), false).point.coords
}

/// Sphere vs triangle penetration.
///
/// - `center`, `radius`: the sphere in world space.
/// - `tri`, `normal`: the triangle and its unit face normal (see [`face_normal`]).
///
/// Triangles are two-sided. When the centre projects inside the triangle the push-out is along
/// the face normal, flipped toward the centre's side. Otherwise it points from the closest point
/// on the triangle boundary toward the centre.
pub fn sphere_triangle(
    center: &Vec3,
    radius: f32,
    tri: &TriangleVerts,
    normal: &Vec3,
) -> Option<Penetration> {
    let s = normal.dot(&(center - tri[0]));
    if s.abs() >= radius {
        return None;
    }

    let on_plane = center - normal * s;
    if projects_inside(&on_plane, tri) {
        let side = if s >= 0.0 { 1.0 } else { -1.0 };
        return penetration(normal * side, radius - s.abs());
    }

    let closest = closest_point_on_triangle(center, tri);
    from_closest_pair(center, &closest, radius, normal)
}

/// Capsule vs triangle penetration.
///
/// - `start`, `end`: the capsule's inner segment in world space.
/// - `radius`: the capsule radius.
/// - `tri`, `normal`: the triangle and its unit face normal.
///
/// Face contacts (segment piercing the triangle, or the endpoint nearest the plane projecting
/// inside it) push along the face normal toward whichever side needs the shorter move. All other
/// overlaps are resolved from the closest pair between the segment and the triangle.
pub fn capsule_triangle(
    start: &Vec3,
    end: &Vec3,
    radius: f32,
    tri: &TriangleVerts,
    normal: &Vec3,
) -> Option<Penetration> {
    let origin = tri[0];
    let sa = normal.dot(&(start - origin));
    let sb = normal.dot(&(end - origin));

    // Entirely beyond one radius on a single side.
    if (sa >= radius && sb >= radius) || (sa <= -radius && sb <= -radius) {
        return None;
    }

    let min_s = sa.min(sb);
    let max_s = sa.max(sb);

    if sa * sb < 0.0 {
        // Segment crosses the plane: test the crossing point.
        let crossing = start + (end - start) * (sa / (sa - sb));
        if projects_inside(&crossing, tri) {
            return if -min_s <= max_s {
                penetration(*normal, radius - min_s)
            } else {
                penetration(-normal, radius + max_s)
            };
        }
    } else {
        // Both endpoints on one side: the one nearest the plane decides.
        let (nearest, dist, side) = if min_s >= 0.0 {
            (if sa <= sb { start } else { end }, min_s, 1.0)
        } else {
            (if sa >= sb { start } else { end }, -max_s, -1.0)
        };
        let on_plane = nearest - normal * normal.dot(&(nearest - origin));
        if dist < radius && projects_inside(&on_plane, tri) {
            return penetration(normal * side, radius - dist);
        }
    }

    // Closest pair between the segment and the triangle boundary (or endpoint projections).
    let mut best: Option<(Vec3, Vec3, f32)> = None;
    let mut consider = |on_segment: Vec3, on_triangle: Vec3| {
        let dist_sq = (on_segment - on_triangle).norm_squared();
        if best.map_or(true, |(_, _, d)| dist_sq < d) {
            best = Some((on_segment, on_triangle, dist_sq));
        }
    };

    for p in [start, end] {
        consider(*p, closest_point_on_triangle(p, tri));
    }
    for i in 0..3 {
        let (on_segment, on_edge) =
            closest_points_segment_segment(start, end, &tri[i], &tri[(i + 1) % 3]);
        consider(on_segment, on_edge);
    }

    let (on_segment, on_triangle, _) = best?;
    from_closest_pair(&on_segment, &on_triangle, radius, normal)
}

/// Closest points between segments `p1..q1` and `p2..q2`.
///
/// Returns `(point on first, point on second)`. Degenerate segments are treated as points.
pub fn closest_points_segment_segment(p1: &Vec3, q1: &Vec3, p2: &Vec3, q2: &Vec3) -> (Vec3, Vec3) {
    let d1 = q1 - p1;
    let d2 = q2 - p2;
    let r = p1 - p2;
    let a = d1.norm_squared();
    let e = d2.norm_squared();
    let f = d2.dot(&r);

    if a <= f32::EPSILON && e <= f32::EPSILON {
        return (*p1, *p2);
    }

    let (s, t) = if a <= f32::EPSILON {
        (0.0, (f / e).clamp(0.0, 1.0))
    } else {
        let c = d1.dot(&r);
        if e <= f32::EPSILON {
            ((-c / a).clamp(0.0, 1.0), 0.0)
        } else {
            let b = d1.dot(&d2);
            let denom = a * e - b * b;

            // Parallel segments: pick an arbitrary s and let the clamp below fix t.
            let s = if denom > f32::EPSILON {
                ((b * f - c * e) / denom).clamp(0.0, 1.0)
            } else {
                0.0
            };

            let t = (b * s + f) / e;
            if t < 0.0 {
                ((-c / a).clamp(0.0, 1.0), 0.0)
            } else if t > 1.0 {
                (((b - c) / a).clamp(0.0, 1.0), 1.0)
            } else {
                (s, t)
            }
        }
    };

    (p1 + d1 * s, p2 + d2 * t)
}

/// Is `on_plane` (a point already in the triangle's plane) inside the triangle?
#[inline]
fn projects_inside(on_plane: &Vec3, tri: &TriangleVerts) -> bool {
    let closest = closest_point_on_triangle(on_plane, tri);
    (closest - on_plane).norm_squared() <= INSIDE_EPS * INSIDE_EPS
}

fn from_closest_pair(
    shape_point: &Vec3,
    triangle_point: &Vec3,
    radius: f32,
    face: &Vec3,
) -> Option<Penetration> {
    let delta = shape_point - triangle_point;
    let dist = delta.norm();
    if dist >= radius {
        return None;
    }
    let normal = if dist > DIST_EPS { delta / dist } else { *face };
    penetration(normal, radius - dist)
}

#[inline]
fn penetration(normal: Vec3, depth: f32) -> Option<Penetration> {
    if depth > CONTACT_EPS {
        Some(Penetration { normal, depth })
    } else {
        None
    }
}
