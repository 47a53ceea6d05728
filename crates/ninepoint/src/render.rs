//! 3D surface plots of interior fields.

use crate::error::{LaplaceError, Result};

use common::linalg::nalgebra::{Matrix, Vector};
use itertools::iproduct;
use plotters::prelude::*;

use std::path::Path;

pub const DEFAULT_TITLE: &str = "Approximate solution of Laplace equation by nine-points";

/// Draws a field sampled on a tensor-product grid and saves it to `path`.
///
/// `field` has one row per entry of `ys` and one column per entry of `xs`.
pub trait SurfaceRenderer {
  fn render(&self, xs: &Vector, ys: &Vector, field: &Matrix, path: &Path) -> Result<()>;
}

/// PNG surface plot drawn with `plotters`.
#[derive(Debug, Clone)]
pub struct PlottersSurface {
  pub size: (u32, u32),
  pub title: String,
  /// Rotation around the vertical axis, in radians.
  pub yaw: f64,
  /// Elevation of the viewpoint, in radians.
  pub pitch: f64,
}

impl Default for PlottersSurface {
  fn default() -> Self {
    Self {
      size: (1024, 768),
      title: DEFAULT_TITLE.to_string(),
      yaw: 0.6,
      pitch: 0.35,
    }
  }
}

impl PlottersSurface {
  pub fn with_size(mut self, width: u32, height: u32) -> Self {
    self.size = (width, height);
    self
  }
  pub fn with_title(mut self, title: impl Into<String>) -> Self {
    self.title = title.into();
    self
  }
}

impl SurfaceRenderer for PlottersSurface {
  fn render(&self, xs: &Vector, ys: &Vector, field: &Matrix, path: &Path) -> Result<()> {
    if xs.is_empty() || ys.is_empty() {
      return Err(LaplaceError::RenderFailure("no sample points".to_string()));
    }
    if field.shape() != (ys.len(), xs.len()) {
      return Err(LaplaceError::RenderFailure(format!(
        "field of shape {:?} does not match {} x-samples and {} y-samples",
        field.shape(),
        xs.len(),
        ys.len()
      )));
    }
    if let Some(dir) = path.parent() {
      if !dir.as_os_str().is_empty() && !dir.is_dir() {
        return Err(LaplaceError::RenderFailure(format!(
          "output directory {} does not exist",
          dir.display()
        )));
      }
    }

    self
      .draw(xs, ys, field, path)
      .map_err(|err| LaplaceError::RenderFailure(err.to_string()))?;

    tracing::info!(path = %path.display(), "saved surface plot");
    Ok(())
  }
}

impl PlottersSurface {
  fn draw(
    &self,
    xs: &Vector,
    ys: &Vector,
    field: &Matrix,
    path: &Path,
  ) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let (xmin, xmax) = padded_range(xs.min(), xs.max());
    let (ymin, ymax) = padded_range(ys.min(), ys.max());
    let (zmin, zmax) = padded_range(field.min(), field.max());

    let root = BitMapBackend::new(path, self.size).into_drawing_area();
    root.fill(&WHITE)?;

    // plotters' vertical axis is the second one, so the field goes there.
    let mut chart = ChartBuilder::on(&root)
      .margin(20)
      .caption(&self.title, ("sans-serif", 24))
      .build_cartesian_3d(xmin..xmax, zmin..zmax, ymin..ymax)?;

    chart.with_projection(|mut pb| {
      pb.yaw = self.yaw;
      pb.pitch = self.pitch;
      pb.scale = 0.8;
      pb.into_matrix()
    });

    chart
      .configure_axes()
      .light_grid_style(BLACK.mix(0.15))
      .max_light_lines(3)
      .draw()?;

    let (nrows, ncols) = field.shape();
    let (fmin, fmax) = (field.min(), field.max());
    let point = |(r, c): (usize, usize)| (xs[c], field[(r, c)], ys[r]);

    if nrows == 1 || ncols == 1 {
      // A single row or column of samples spans no cells, draw it as a curve.
      let samples: Vec<_> = iproduct!(0..nrows, 0..ncols).collect();
      chart.draw_series(LineSeries::new(
        samples.iter().map(|&idx| point(idx)),
        BLACK.stroke_width(2),
      ))?;
      chart.draw_series(samples.iter().map(|&idx| {
        Circle::new(point(idx), 5, height_color(field[idx], fmin, fmax).filled())
      }))?;
    } else {
      chart.draw_series(iproduct!(1..nrows, 1..ncols).map(|(r, c)| {
        let quad = [(r - 1, c - 1), (r - 1, c), (r, c), (r, c - 1)];
        let mean = quad.iter().map(|&idx| field[idx]).sum::<f64>() / 4.0;
        let points: Vec<_> = quad.into_iter().map(point).collect();
        Polygon::new(points, height_color(mean, fmin, fmax).mix(0.8).filled())
      }))?;
    }

    let labels = [
      ("x", (xmax, zmin, ymin)),
      ("y", (xmin, zmin, ymax)),
      ("z", (xmin, zmax, ymin)),
    ];
    chart.draw_series(
      labels
        .into_iter()
        .map(|(label, pos)| Text::new(label, pos, ("sans-serif", 20))),
    )?;

    root.present()?;
    Ok(())
  }
}

/// Widens degenerate ranges so the chart axes stay valid.
fn padded_range(min: f64, max: f64) -> (f64, f64) {
  if max - min > 1e-12 {
    (min, max)
  } else {
    (min - 1.0, max + 1.0)
  }
}

/// Blue at `min`, white halfway, red at `max`.
fn height_color(z: f64, min: f64, max: f64) -> RGBColor {
  let t = if max - min > 1e-12 {
    ((z - min) / (max - min)).clamp(0.0, 1.0)
  } else {
    0.5
  };

  let r = (255.0 * (2.0 * t).min(1.0)) as u8;
  let g = (255.0 * (1.0 - 2.0 * (t - 0.5).abs())) as u8;
  let b = (255.0 * (2.0 * (1.0 - t)).min(1.0)) as u8;
  RGBColor(r, g, b)
}
