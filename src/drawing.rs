use crate::*;
use std::path::{Path, PathBuf};

/// A closed polyline sourced from one drawing entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
    /// The drawing entity handle.
    pub id: String,
    pub points: Vec<Point2>,
}

impl Ring {
    /// Create a ring, rounding every point with [`round_p2`].
    pub fn new<I, P>(id: impl Into<String>, points: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: ToPoint2,
    {
        Self {
            id: id.into(),
            points: points.into_iter().map(round_p2).collect(),
        }
    }

    /// Build the polygon this ring describes.
    pub fn to_polygon(&self) -> Result<Polygon2> {
        Polygon2::new(self.points.iter())
            .map_err(|e| Error::Geometry(format!("ring {}: {}", self.id, e)))
    }
}

/// The rings extracted from one drawing, in entity order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawingModel {
    pub source: PathBuf,
    pub rings: Vec<Ring>,
}

impl DrawingModel {
    pub fn new(source: impl AsRef<Path>) -> Self {
        Self {
            source: source.as_ref().to_path_buf(),
            rings: Vec::new(),
        }
    }

    pub fn push(&mut self, ring: Ring) {
        self.rings.push(ring);
    }

    pub fn len(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    pub fn polygons(&self) -> Result<Vec<Polygon2>> {
        self.rings.iter().map(Ring::to_polygon).collect()
    }
}

impl Aabb for DrawingModel {
    fn aabb(&self) -> Extents2 {
        self.rings
            .iter()
            .flat_map(|r| r.points.iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_rounds_points() {
        let r = Ring::new("1F", [[1.23456, 7.89123], [0.0, 0.0]]);
        assert_eq!(r.points, vec![[1.23, 7.89], [0.0, 0.0]]);
    }

    #[test]
    fn degenerate_ring_names_itself() {
        let r = Ring::new("2A", [[0.0, 0.0], [1.0, 1.0]]);
        let e = r.to_polygon().unwrap_err();
        assert!(matches!(e, Error::Geometry(_)));
        assert!(e.to_string().contains("ring 2A"));
    }

    #[test]
    fn model_extents() {
        let mut m = DrawingModel::new("a.dxf");
        assert!(m.is_empty());
        m.push(Ring::new("1", [[0.0, 0.0], [5.0, 0.0], [5.0, 5.0]]));
        m.push(Ring::new("2", [[-1.0, 2.0], [3.0, 8.0], [0.0, 6.0]]));
        assert_eq!(m.len(), 2);
        assert_eq!(m.aabb(), Extents2::from_min_max([-1.0, 0.0], [5.0, 8.0]));
        assert_eq!(m.polygons().unwrap().len(), 2);
    }
}
