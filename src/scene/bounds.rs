use glamx::{Mat4, Vec3};

/// An axis-aligned bounding box.
///
/// The empty box has `mins > maxs` and absorbs nothing until a point is added.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    /// Lower corner.
    pub mins: Vec3,
    /// Upper corner.
    pub maxs: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Aabb {
    /// The box containing nothing.
    pub const EMPTY: Aabb = Aabb {
        mins: Vec3::splat(f32::INFINITY),
        maxs: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Creates a box from two corners, in any order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Aabb {
            mins: a.min(b),
            maxs: a.max(b),
        }
    }

    /// The smallest box containing every point of the iterator.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut res = Self::EMPTY;
        for pt in points {
            res.take_point(pt);
        }
        res
    }

    /// Whether this box contains no point at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mins.x > self.maxs.x || self.mins.y > self.maxs.y || self.mins.z > self.maxs.z
    }

    /// Grows this box so it contains `pt`.
    #[inline]
    pub fn take_point(&mut self, pt: Vec3) {
        self.mins = self.mins.min(pt);
        self.maxs = self.maxs.max(pt);
    }

    /// The smallest box containing both `self` and `other`.
    pub fn merged(&self, other: &Aabb) -> Aabb {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        Aabb {
            mins: self.mins.min(other.mins),
            maxs: self.maxs.max(other.maxs),
        }
    }

    /// The eight corners of this box.
    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.mins, self.maxs);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }

    /// The box enclosing this one after an affine transformation.
    pub fn transformed(&self, transform: &Mat4) -> Aabb {
        if self.is_empty() {
            return *self;
        }
        Aabb::from_points(self.corners().iter().map(|c| transform.transform_point3(*c)))
    }

    /// The box enclosing this one after `map` is applied to its corners.
    pub fn mapped(&self, map: impl Fn(Vec3) -> Vec3) -> Aabb {
        if self.is_empty() {
            return *self;
        }
        Aabb::from_points(self.corners().iter().map(|c| map(*c)))
    }

    /// Center of the box. Meaningless for the empty box.
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.mins + self.maxs) * 0.5
    }

    /// Extent of the box along each axis; zero for the empty box.
    #[inline]
    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.maxs - self.mins
        }
    }
}
