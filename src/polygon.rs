use crate::*;

/// Rotational direction of a polygon's point sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

/// A simple polygon with a closed exterior ring.
///
/// The ring always repeats the first point as its last point; [`Polygon2::new`] closes an open
/// sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon2(Vec<Point2>);

impl Polygon2 {
    pub fn new<I, P>(points: I) -> Result<Self, &'static str>
    where
        I: IntoIterator<Item = P>,
        P: ToPoint2,
    {
        let mut points = points.into_iter().map(ToPoint2::to_p2).collect::<Vec<_>>();

        if points.iter().flatten().any(|x| !x.is_finite()) {
            return Err("polygon coordinates must be finite");
        }

        let open = points
            .first()
            .zip(points.last())
            .map_or(false, |(a, b)| a != b);
        if open {
            points.push(points[0]);
        }

        // closed, so the first point is counted twice
        if points.len() < 4 {
            Err("polygon requires 3 or more points to be valid")
        } else {
            Ok(Polygon2(points))
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shoelace sum over the closed ring.
    pub fn signed_area(&self) -> f64 {
        self.0
            .windows(2)
            .map(|w| {
                let [ax, ay] = w[0];
                let [bx, by] = w[1];
                ax * by - ay * bx
            })
            .sum::<f64>()
            * 0.5
    }

    /// Orientation of the ring as laid out on the drawing sheet, y running down the sheet.
    ///
    /// A positive shoelace sum is clockwise, so `(0,0) -> (10,0) -> (10,10) -> (0,10)` is
    /// clockwise. Degenerate (zero area) rings count as clockwise.
    pub fn winding(&self) -> Winding {
        if self.signed_area() < 0.0 {
            Winding::CounterClockwise
        } else {
            Winding::Clockwise
        }
    }

    pub fn is_ccw(&self) -> bool {
        self.winding() == Winding::CounterClockwise
    }

    pub fn is_clockwise(&self) -> bool {
        !self.is_ccw()
    }

    /// The closed ring in clockwise order.
    ///
    /// Counter-clockwise rings are reversed, others are returned untouched.
    pub fn clockwise(&self) -> Vec<Point2> {
        let mut pts = self.0.clone();
        if self.is_ccw() {
            pts.reverse();
        }
        pts
    }

    /// The ring without its closing point, in clockwise order: a soil layer boundary.
    ///
    /// The closing point is dropped _before_ any reversal, so a counter-clockwise ring comes out
    /// as the exact reversal of its open point list.
    ///
    /// # Example
    /// ```rust
    /// use dxf2stix::*;
    /// let p = Polygon2::new([[0.0, 0.0], [0.0, 10.0], [10.0, 10.0], [10.0, 0.0]]).unwrap();
    ///
    /// assert_eq!(
    ///     p.open_clockwise(),
    ///     vec![[10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]]
    /// );
    /// ```
    pub fn open_clockwise(&self) -> Vec<Point2> {
        let mut pts = self.0[..self.0.len() - 1].to_vec();
        if self.is_ccw() {
            pts.reverse();
        }
        pts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::TestResult;

    /// A convex ring built from distinct angles, with a positive shoelace sum.
    fn clockwise_ring(angles: &[u16]) -> Option<Vec<Point2>> {
        let mut angles = angles.iter().map(|a| a % 360).collect::<Vec<_>>();
        angles.sort_unstable();
        angles.dedup();
        if angles.len() < 3 {
            return None;
        }
        let mut pts = angles
            .into_iter()
            .map(|a| (a as f64).to_radians())
            .map(|a| [(a.cos() * 100.0).round(), (a.sin() * 100.0).round()])
            .collect::<Vec<_>>();
        pts.dedup();
        let p = Polygon2::new(pts.iter().copied()).ok()?;
        // rounding to whole units can collapse a thin ring
        if p.signed_area() > 1.0 && p.len() == pts.len() + 1 {
            Some(pts)
        } else {
            None
        }
    }

    #[quickcheck]
    fn clockwise_rings_are_untouched(angles: Vec<u16>) -> TestResult {
        let Some(pts) = clockwise_ring(&angles) else {
            return TestResult::discard();
        };
        let p = Polygon2::new(pts.iter().copied()).unwrap();

        let mut closed = pts.clone();
        closed.push(pts[0]);

        TestResult::from_bool(
            p.is_clockwise() && p.clockwise() == closed && p.open_clockwise() == pts,
        )
    }

    #[quickcheck]
    fn counter_clockwise_rings_are_reversed(angles: Vec<u16>) -> TestResult {
        let Some(mut pts) = clockwise_ring(&angles) else {
            return TestResult::discard();
        };
        pts.reverse();
        let p = Polygon2::new(pts.iter().copied()).unwrap();

        let mut reversed = pts.clone();
        reversed.reverse();

        TestResult::from_bool(p.is_ccw() && p.open_clockwise() == reversed)
    }

    #[test]
    fn new_closes_ring() {
        let open = Polygon2::new([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]).unwrap();
        let closed = Polygon2::new([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]).unwrap();
        assert_eq!(open, closed);
        assert_eq!(open.len(), 4);
    }

    #[test]
    fn new_rejects_degenerate() {
        assert!(Polygon2::new(Vec::<Point2>::new()).is_err());
        assert!(Polygon2::new([[0.0, 0.0], [1.0, 0.0]]).is_err());
        assert!(Polygon2::new([[0.0, 0.0], [1.0, 0.0], [0.0, 0.0]]).is_err());
        assert!(Polygon2::new([[0.0, 0.0], [1.0, f64::NAN], [1.0, 1.0]]).is_err());
    }

    #[test]
    fn clockwise_square_keeps_order() {
        let square = [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]];
        let p = Polygon2::new(square).unwrap();
        assert_eq!(p.winding(), Winding::Clockwise);
        assert_eq!(p.signed_area(), 100.0);
        assert_eq!(p.open_clockwise(), square.to_vec());
    }

    #[test]
    fn counter_clockwise_square_is_reversed() {
        let square = [[0.0, 0.0], [0.0, 10.0], [10.0, 10.0], [10.0, 0.0]];
        let p = Polygon2::new(square).unwrap();
        assert!(p.is_ccw());
        assert_eq!(p.signed_area(), -100.0);

        let expected = vec![[10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]];
        assert_eq!(p.open_clockwise(), expected);

        let mut closed = expected.clone();
        closed.insert(0, [0.0, 0.0]);
        assert_eq!(p.clockwise(), closed);
    }

    #[test]
    fn repeated_closing_point_is_kept() {
        let ring = [
            [0.0, 0.0],
            [10.0, 0.0],
            [10.0, 10.0],
            [0.0, 0.0],
            [0.0, 0.0],
        ];
        let p = Polygon2::new(ring).unwrap();
        assert_eq!(p.len(), 5);
        assert_eq!(p.open_clockwise(), ring[..4].to_vec());
    }

    #[test]
    fn zero_area_counts_as_clockwise() {
        let p = Polygon2::new([[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]).unwrap();
        assert_eq!(p.signed_area(), 0.0);
        assert!(p.is_clockwise());
    }
}
