use crate::grid::*;
use crate::util::*;

/// Smallest and largest cell value.
pub fn value_range(grid: &Grid) -> (f64, f64) {
    grid.buffer()
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        })
}

/// Render the grid as a heat map, rows top to bottom,
/// values scaled to the grid's own min/max.
pub fn grid_to_image(grid: &Grid) -> image::RgbImage {
    let size = grid.size();
    let (lo, hi) = value_range(grid);
    let span = hi - lo;
    let gradient = colorous::TURBO;
    let mut img = image::RgbImage::new(size as u32, size as u32);
    for (l, v) in grid.buffer().iter().enumerate() {
        let (row, col) = linear_to_coord(l, size);
        let t = if span > 0.0 { (v - lo) / span } else { 0.0 };
        let c = gradient.eval_continuous(t);
        img.put_pixel(col as u32, row as u32, image::Rgb(c.as_array()));
    }
    img
}

pub fn write_png<P: AsRef<std::path::Path>>(
    grid: &Grid,
    path: &P,
) -> image::ImageResult<()> {
    log::info!("Writing: {:?}", path.as_ref());
    grid_to_image(grid).save(path)
}
