use kiss3d::renderer::LineRenderer;
use nalgebra::Point3;
use simba::scalar::SupersetOf;

/// Samples `curve` at `segments + 1` evenly spaced parameters from `start` to
/// `end`, both ends included.
pub fn sample_curve<F, S>(
    curve: F,
    start: S,
    end: S,
    segments: usize,
) -> impl Iterator<Item = Point3<f32>>
where
    F: Fn(S) -> Point3<f32>,
    S: nalgebra::RealField + SupersetOf<usize> + Copy,
{
    assert!(segments > 0, "a curve needs at least one segment");
    let step = (end - start) / nalgebra::convert::<usize, S>(segments);
    (0..=segments).map(move |i| curve(start + step * nalgebra::convert::<usize, S>(i)))
}

/// Draws a polyline, asking `color_at` for the color of each segment given
/// its midpoint.
pub fn draw_path<I, C>(line_renderer: &mut LineRenderer, points: I, color_at: C)
where
    I: Iterator<Item = Point3<f32>>,
    C: Fn(&Point3<f32>) -> Point3<f32>,
{
    let mut prev_pt = None;
    for pt in points {
        if let Some(prev_pt) = prev_pt {
            let midpoint = nalgebra::center(&prev_pt, &pt);
            line_renderer.draw_line(prev_pt, pt, color_at(&midpoint));
        }
        prev_pt = Some(pt);
    }
}
