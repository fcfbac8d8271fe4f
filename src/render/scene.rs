//! Frame composition: background, grid, and one plot style per frame.

use log::debug;

use crate::config::RenderConfig;
use crate::core::cloud::Cloud;
use crate::core::transforms::{auto_scale, polar_to_pixel};

use super::canvas::Canvas;
use super::color::{Color, Gradient};
use super::glyphs;
use super::RenderError;

/// How a cloud is turned into pixels.
///
/// A `scale` of 0 asks the renderer to auto-fit the farthest return to the
/// canvas height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlotStyle {
    /// Consecutive points joined by gradient-colored edges, closed into a
    /// loop; edges touching an invalid reading are broken.
    Connected {
        scale: f32,
        y_offset: i32,
        lightness: f32,
    },
    /// One horizontal bar per canvas row, sampled nearest-neighbor across
    /// the sweep, length proportional to distance.
    Bars { max_bar_width: u32 },
    /// A 3x3 point per valid sample with a stamped numeric distance label.
    Markers { scale: f32, lightness: f32 },
}

/// Render one frame: background, optional grid, then the selected style.
///
/// The canvas is fully initialized (background drawn) before any point
/// drawing happens, so the buffer is always presentable afterwards.
pub fn render_frame(
    canvas: &mut Canvas,
    cloud: &Cloud,
    style: PlotStyle,
    config: &RenderConfig,
    show_grid: bool,
) -> Result<(), RenderError> {
    canvas.draw_background(Color::from(config.palette.background));
    if show_grid {
        canvas.draw_grid(Color::from(config.palette.grid));
    }

    let gradient = Gradient::new(config.palette.anchors);
    let origin = config.canvas.origin();

    match style {
        PlotStyle::Connected {
            scale,
            y_offset,
            lightness,
        } => draw_connected(canvas, cloud, &gradient, origin, scale, y_offset, lightness),
        PlotStyle::Bars { max_bar_width } => {
            draw_bars(canvas, cloud, &gradient, max_bar_width);
            Ok(())
        }
        PlotStyle::Markers { scale, lightness } => {
            draw_markers(canvas, cloud, &gradient, origin, scale, lightness)
        }
    }
}

/// Resolve an explicit or auto-fit display scale.
fn resolve_scale(scale: f32, cloud: &Cloud, canvas: &Canvas) -> Result<f32, RenderError> {
    if scale == 0.0 {
        let fitted = auto_scale(cloud, canvas.height())?;
        debug!("auto-fit scale: {:.4} px/mm", fitted);
        Ok(fitted)
    } else {
        Ok(scale)
    }
}

fn draw_connected(
    canvas: &mut Canvas,
    cloud: &Cloud,
    gradient: &Gradient,
    origin: (i32, i32),
    scale: f32,
    y_offset: i32,
    lightness: f32,
) -> Result<(), RenderError> {
    let scale = resolve_scale(scale, cloud, canvas)?;
    let points = cloud.points();
    let count = points.len();

    let project =
        |i: usize| polar_to_pixel(points[i].angle, points[i].distance, scale, origin);

    for i in 1..=count {
        // The final iteration wraps back to the first point, closing the loop
        let (prev, curr) = (i - 1, i % count);
        if !points[prev].is_valid() || !points[curr].is_valid() {
            continue;
        }

        let (x0, y0) = project(prev);
        let (x1, y1) = project(curr);
        if (x0, y0) == (x1, y1) {
            // Neighbors landing on the same pixel have no edge to draw
            continue;
        }

        let color = gradient.angle_color(i as f32 / count as f32, lightness);
        canvas.draw_line(
            x0 as f32,
            (y0 + y_offset) as f32,
            x1 as f32,
            (y1 + y_offset) as f32,
            color,
        )?;
    }
    Ok(())
}

fn draw_bars(canvas: &mut Canvas, cloud: &Cloud, gradient: &Gradient, max_bar_width: u32) {
    let points = cloud.points();
    let count = points.len();
    let height = canvas.height() as usize;

    for j in 0..height {
        let idx = j * count / height;
        let distance = points[idx].distance;
        if distance <= 0.0 {
            continue;
        }

        let width = (distance / cloud.max_distance() * max_bar_width as f32).round() as i32;
        let color = gradient.angle_color(idx as f32 / count as f32, 1.0);
        for i in 0..width {
            canvas.draw_pixel(i, j as i32, color);
        }
    }
}

fn draw_markers(
    canvas: &mut Canvas,
    cloud: &Cloud,
    gradient: &Gradient,
    origin: (i32, i32),
    scale: f32,
    lightness: f32,
) -> Result<(), RenderError> {
    let scale = resolve_scale(scale, cloud, canvas)?;

    for point in cloud.points() {
        if !point.is_valid() {
            continue;
        }
        let (x, y) = polar_to_pixel(point.angle, point.distance, scale, origin);
        let color = gradient.dist_color(point.distance, cloud.max_distance(), lightness);

        let whole = point.distance as u32;
        let tenths = (point.distance * 10.0) as u32 % 10;
        draw_mark(canvas, x, y, whole, tenths, color);
    }
    Ok(())
}

/// Stamp a point plus its `whole.frac` label offset above-left of it.
fn draw_mark(canvas: &mut Canvas, x: i32, y: i32, whole: u32, frac: u32, color: Color) {
    canvas.draw_point(x, y, color, 1.0);

    let label = format!("{}.{}", whole, frac);
    let mut cx = x - 12;
    let cy = y + 5;

    for ch in label.chars() {
        if let Some(mask) = glyphs::glyph(ch) {
            for (gy, row) in mask.iter().enumerate() {
                for (gx, cell) in row.bytes().enumerate() {
                    if cell == b'#' {
                        canvas.draw_pixel(cx + gx as i32, cy + gy as i32, color);
                    }
                }
            }
            cx += glyphs::glyph_width(mask) as i32 + 1;
        }
    }
}
