//! Debug plots of extracted drawings.
//!
//! These are only rendered when a drawing fails to convert. The composite image overlays every
//! ring, and one image per ring shows the rings being added one after another, the newest in
//! colour with its points marked, so the ring that broke the conversion can be spotted.
use crate::pipeline::suffixed;
use crate::*;
use crate::Point as _;
use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point;
use log::warn;
use rand::Rng;
use std::path::{Path, PathBuf};

/// Width and height of the images in pixels.
const SIZE: u32 = 1000;
/// Margin about the geometry, as a fraction of the drawn extents.
const MARGIN: f64 = 0.05;
const MARKER_RADIUS: i32 = 4;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const GREY: Rgb<u8> = Rgb([190, 190, 190]);

/// Line colours cycled through for the per ring images.
const PALETTE: [Rgb<u8>; 10] = [
    Rgb([31, 119, 180]),
    Rgb([255, 127, 14]),
    Rgb([44, 160, 44]),
    Rgb([214, 39, 40]),
    Rgb([148, 103, 189]),
    Rgb([140, 86, 75]),
    Rgb([227, 119, 194]),
    Rgb([127, 127, 127]),
    Rgb([188, 189, 34]),
    Rgb([23, 190, 207]),
];

/// The images written by [`debug_plot`].
#[derive(Clone, Debug, PartialEq)]
pub struct PlotFiles {
    pub composite: PathBuf,
    pub rings: Vec<PathBuf>,
}

/// A random RGB colour, each channel in `[0, 1)`.
pub fn random_color() -> [f64; 3] {
    let mut rng = rand::rng();
    [rng.random(), rng.random(), rng.random()]
}

/// Render the debug images of `model` next to `base`.
///
/// Writes `<base>.shapely.png` and `<base>.debug.NN.png` for each ring.
pub fn debug_plot(model: &DrawingModel, base: impl AsRef<Path>) -> Result<PlotFiles> {
    let base = base.as_ref();
    let frame = Frame::new(model.aabb());

    let composite = suffixed(base, ".shapely.png");
    {
        let mut img = RgbImage::from_pixel(SIZE, SIZE, WHITE);
        for ring in &model.rings {
            let [r, g, b] = random_color().map(|c| (c * 255.0) as u8);
            fill(&mut img, &frame.pixels(&ring.points), Rgb([r, g, b]));
            outline(&mut img, &frame, &ring.points, BLACK);
        }
        save(&img, &composite)?;
    }

    let mut rings = Vec::with_capacity(model.len());
    for (i, ring) in model.rings.iter().enumerate() {
        let mut img = RgbImage::from_pixel(SIZE, SIZE, WHITE);
        for prev in &model.rings[..i] {
            outline(&mut img, &frame, &prev.points, GREY);
        }

        let pts = match ring.to_polygon() {
            Ok(p) => p.clockwise(),
            Err(e) => {
                warn!("{}: plotting raw points ({})", model.source.display(), e);
                ring.points.clone()
            }
        };
        let colour = PALETTE[i % PALETTE.len()];
        path(&mut img, &frame, &pts, colour);
        for p in frame.pixels(&pts) {
            draw_filled_circle_mut(&mut img, (p.x, p.y), MARKER_RADIUS, colour);
        }

        let file = suffixed(base, &format!(".debug.{:02}.png", i));
        save(&img, &file)?;
        rings.push(file);
    }

    Ok(PlotFiles { composite, rings })
}

/// Maps drawing coordinates onto the image, y up.
struct Frame {
    origin: Point2,
    scale: f64,
}

impl Frame {
    fn new(extents: Extents2) -> Self {
        let extents = extents.squared();
        // a single point, or nothing at all, still needs some room
        let extents = if extents.width() > 0.0 {
            extents.expand(extents.width() * MARGIN)
        } else {
            extents.expand(1.0)
        };

        Self {
            origin: extents.origin,
            scale: SIZE as f64 / extents.width(),
        }
    }

    fn project(&self, p: Point2) -> (f32, f32) {
        let [x, y] = p.sub(self.origin).scale(self.scale);
        (x as f32, (SIZE as f64 - y) as f32)
    }

    fn pixels(&self, pts: &[Point2]) -> Vec<Point<i32>> {
        pts.iter()
            .map(|&p| self.project(p))
            .map(|(x, y)| Point::new(x.round() as i32, y.round() as i32))
            .collect()
    }
}

/// Fill the polygon at half opacity.
fn fill(img: &mut RgbImage, poly: &[Point<i32>], colour: Rgb<u8>) {
    let mut poly = poly.to_vec();
    poly.dedup();
    // the fill closes the polygon itself and refuses a repeated end point
    while poly.len() > 1 && poly.first() == poly.last() {
        poly.pop();
    }
    if poly.len() < 3 {
        return;
    }

    let mut mask = GrayImage::new(img.width(), img.height());
    draw_polygon_mut(&mut mask, &poly, Luma([255]));

    for (px, m) in img.pixels_mut().zip(mask.pixels()) {
        if m[0] > 0 {
            for (a, b) in px.0.iter_mut().zip(colour.0) {
                *a = ((*a as u16 + b as u16) / 2) as u8;
            }
        }
    }
}

/// Draw the closed ring.
fn outline(img: &mut RgbImage, frame: &Frame, pts: &[Point2], colour: Rgb<u8>) {
    if let (Some(&first), Some(&last)) = (pts.first(), pts.last()) {
        draw_line_segment_mut(img, frame.project(last), frame.project(first), colour);
    }
    path(img, frame, pts, colour);
}

/// Draw the point sequence as connected segments.
fn path(img: &mut RgbImage, frame: &Frame, pts: &[Point2], colour: Rgb<u8>) {
    for w in pts.windows(2) {
        draw_line_segment_mut(img, frame.project(w[0]), frame.project(w[1]), colour);
    }
}

fn save(img: &RgbImage, path: &Path) -> Result<()> {
    img.save(path)
        .map_err(|e| Error::Plot(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> DrawingModel {
        let mut m = DrawingModel::new("plan.dxf");
        let lower = [[0.0, 0.0], [10.0, 0.0], [10.0, 5.0], [0.0, 5.0]];
        let upper = [[0.0, 5.0], [10.0, 5.0], [5.0, 10.0], [0.0, 5.0]];
        m.push(Ring::new("A", lower));
        m.push(Ring::new("B", upper));
        // too short for a polygon, plotted from its raw points
        m.push(Ring::new("C", [[2.0, 2.0], [3.0, 3.0]]));
        m
    }

    #[test]
    fn colours_in_unit_range() {
        for _ in 0..100 {
            assert!(random_color().iter().all(|c| (0.0..1.0).contains(c)));
        }
    }

    #[test]
    fn frame_is_y_up() {
        let f = Frame::new(Extents2::from_min_max([0.0, 0.0], [10.0, 10.0]));
        let (x0, y0) = f.project([0.0, 0.0]);
        let (x1, y1) = f.project([10.0, 10.0]);
        assert!(x0 < x1);
        assert!(y0 > y1);
        let inside = |v: f32| (0.0..SIZE as f32).contains(&v);
        assert!([x0, y0, x1, y1].into_iter().all(inside));
    }

    #[test]
    fn writes_composite_and_one_image_per_ring() {
        let dir = tempfile::tempdir().unwrap();
        let files = debug_plot(&model(), dir.path().join("plan")).unwrap();

        assert_eq!(files.composite, dir.path().join("plan.shapely.png"));
        assert_eq!(
            files.rings,
            vec![
                dir.path().join("plan.debug.00.png"),
                dir.path().join("plan.debug.01.png"),
                dir.path().join("plan.debug.02.png"),
            ]
        );
        assert!(files.composite.exists());
        assert!(files.rings.iter().all(|p| p.exists()));

        let img = image::open(&files.composite).unwrap();
        assert_eq!((img.width(), img.height()), (SIZE, SIZE));
    }

    #[test]
    fn empty_model_plots_an_empty_frame() {
        let dir = tempfile::tempdir().unwrap();
        let empty = DrawingModel::new("x.dxf");
        let files = debug_plot(&empty, dir.path().join("x")).unwrap();
        assert!(files.composite.exists());
        assert!(files.rings.is_empty());
    }

    #[test]
    fn unwritable_target_is_a_plot_error() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("missing").join("plan");
        let e = debug_plot(&model(), base).unwrap_err();
        assert!(matches!(e, Error::Plot(_)));
    }
}
