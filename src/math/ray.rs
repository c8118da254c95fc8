use glam::DVec3;

/// Slab test of a ray against a box.
///
/// Returns the distance along `ray_dir` to the first hit, the exit distance
/// when the origin is inside the box, or `None` on a miss.
pub fn intersect_aabb(ray_origin: DVec3, ray_dir: DVec3, box_min: DVec3, box_max: DVec3) -> Option<f64> {
    const EPSILON: f64 = 1e-12;

    // Near-zero components are clamped so the inverse stays finite
    let inv = |d: f64| if d.abs() < EPSILON { 1.0 / EPSILON.copysign(d) } else { 1.0 / d };
    let inv_dir = DVec3::new(inv(ray_dir.x), inv(ray_dir.y), inv(ray_dir.z));

    let t_min = (box_min - ray_origin) * inv_dir;
    let t_max = (box_max - ray_origin) * inv_dir;

    let t1 = t_min.min(t_max);
    let t2 = t_min.max(t_max);

    let t_near = t1.max_element();
    let t_far = t2.min_element();

    if t_near > t_far || t_far < 0.0 {
        return None;
    }

    if t_near < 0.0 {
        (t_far > 1e-9).then_some(t_far)
    } else {
        Some(t_near)
    }
}

/// Distance from `point` to the line through `origin` along the unit vector `dir`,
/// `None` when the point lies behind the origin
pub fn distance_to_ray(origin: DVec3, dir: DVec3, point: DVec3) -> Option<f64> {
    let t = (point - origin).dot(dir);
    if t < 0.0 {
        return None;
    }
    Some((origin + dir * t - point).length())
}
