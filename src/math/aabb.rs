use glam::DVec3;

/// Axis-aligned scene bounds, used to frame the camera and to pick geometry
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AABB {
    pub min: DVec3,
    pub max: DVec3,
}

impl AABB {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Box centered on `center` with the given full extent
    pub fn around(center: DVec3, size: DVec3) -> Self {
        Self::new(center - size * 0.5, center + size * 0.5)
    }

    pub fn union(&self, other: &AABB) -> AABB {
        AABB {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Bounds of a set of boxes, `None` when the set is empty
    pub fn enclosing<'a, I>(boxes: I) -> Option<AABB>
    where
        I: IntoIterator<Item = &'a AABB>,
    {
        boxes.into_iter().fold(None, |acc, b| match acc {
            None => Some(*b),
            Some(a) => Some(a.union(b)),
        })
    }

    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Radius of the bounding sphere
    pub fn radius(&self) -> f64 {
        (self.max - self.min).length() * 0.5
    }

    pub fn corners(&self) -> [DVec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            DVec3::new(a.x, a.y, a.z),
            DVec3::new(b.x, a.y, a.z),
            DVec3::new(a.x, b.y, a.z),
            DVec3::new(b.x, b.y, a.z),
            DVec3::new(a.x, a.y, b.z),
            DVec3::new(b.x, a.y, b.z),
            DVec3::new(a.x, b.y, b.z),
            DVec3::new(b.x, b.y, b.z),
        ]
    }
}
