use crate::*;

/// A 2D axis-aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Extents2 {
    pub origin: Point2,
    pub size: Point2,
}

impl Extents2 {
    pub fn zero() -> Self {
        Self {
            origin: Point2::zero(),
            size: Point2::zero(),
        }
    }

    pub fn from_min_max(min: Point2, max: Point2) -> Self {
        let size = max.sub(min);

        Self { origin: min, size }
    }

    pub fn width(&self) -> f64 {
        self.size[0]
    }

    pub fn height(&self) -> f64 {
        self.size[1]
    }

    /// Expand the extents by a value.
    ///
    /// A negative value can be used to _shrink_ the extents.
    /// Note that shrinking beyond `size / 2` will result in a [`Self::zero`].
    /// `by` values that are non-finite are ignored and the original self is returned.
    ///
    /// # Example
    /// ```rust
    /// # use dxf2stix::*;
    /// let e = Extents2::from_min_max(Point2::zero(), Point2::one());
    ///
    /// assert_eq!(e.expand(0.5), Extents2 {
    ///     origin: [-0.5, -0.5],
    ///     size: [2.0, 2.0]
    /// });
    /// ```
    pub fn expand(self, by: f64) -> Self {
        if !by.is_finite() {
            return self;
        }

        let x = Point2::all(by);

        let size = self.size.add(x.scale(2.0));
        if size.into_iter().any(|x| x < 0.0) {
            return Self::zero();
        }

        let origin = self.origin.sub(x);

        Self { origin, size }
    }

    /// Make the extents square about its centre, growing the shorter side.
    pub fn squared(self) -> Self {
        let side = self.width().max(self.height());
        let centre = self.origin.add(self.size.scale(0.5));
        let half = Point2::all(side * 0.5);
        Self::from_min_max(centre.sub(half), centre.add(half))
    }
}

impl FromIterator<Point2> for Extents2 {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = Point2>,
    {
        let mut iter = iter.into_iter();
        let Some(init) = iter.next() else {
            return Self::zero();
        };

        let (mut min, mut max) = (init, init);
        for p in iter {
            min = min.min_all(p);
            max = max.max_all(p);
        }

        Self::from_min_max(min, max)
    }
}

/// Objects with an axis-aligned bounding box.
pub trait Aabb {
    fn aabb(&self) -> Extents2;
}
