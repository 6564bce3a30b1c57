use std::error::Error;
use std::fmt;

use crate::complex::{c, C};

pub const ZOOM_MIN: f64 = 1.0;
pub const ZOOM_MAX: f64 = 1e12;
pub const ZOOM_IN_FACTOR: f64 = 1.25;
pub const ZOOM_OUT_FACTOR: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapError {
    InvalidDimension { width: usize, height: usize },
    InvalidZoom(f64),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { width, height } => {
                write!(f, "invalid grid dimensions {}x{}", width, height)
            }
            Self::InvalidZoom(zoom) => write!(f, "invalid zoom factor {}", zoom),
        }
    }
}

impl Error for MapError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub x: usize,
    pub y: usize,
}

impl Pixel {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Pixel-to-plane transform: zoom factor, accumulated pan shift, and the
/// fixed plane extent covered by the grid width at zoom 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub zoom: f64,
    pub shift_x: f64,
    pub shift_y: f64,
    pub range: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            shift_x: -0.8,
            shift_y: 0.0,
            range: 3.3,
        }
    }
}

impl Viewport {
    pub fn new(zoom: f64, shift_x: f64, shift_y: f64, range: f64) -> Self {
        Self {
            zoom,
            shift_x,
            shift_y,
            range,
        }
    }

    /// The unzoomed, unshifted viewport with the same plane range. Julia
    /// fields are always sampled through this one.
    pub fn base(&self) -> Self {
        Self::new(1.0, 0.0, 0.0, self.range)
    }

    /// One discrete zoom-in step, capped so the pixel step never collapses
    /// below f64 resolution under repeated events.
    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * ZOOM_IN_FACTOR).min(ZOOM_MAX);
    }

    /// One discrete zoom-out step, floored at 1.0.
    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom * ZOOM_OUT_FACTOR).max(ZOOM_MIN);
    }

    /// Adjusts the pan shift so the plane location under `pointer` at
    /// `old_zoom` is still under it at `new_zoom`.
    pub fn recenter(
        &mut self,
        pointer: Pixel,
        width: usize,
        height: usize,
        old_zoom: f64,
        new_zoom: f64,
    ) {
        let px = pointer.x as f64 / width as f64 - 0.5;
        let py = pointer.y as f64 / height as f64 - 0.5;
        let old_x = self.range / old_zoom * px;
        let old_y = self.range / old_zoom * py;
        let new_x = old_x * old_zoom / new_zoom;
        let new_y = old_y * old_zoom / new_zoom;
        self.shift_x += old_x - new_x;
        self.shift_y += old_y - new_y;
    }

    pub fn validate(&self, width: usize, height: usize) -> Result<(), MapError> {
        if width == 0 || height == 0 {
            return Err(MapError::InvalidDimension { width, height });
        }
        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return Err(MapError::InvalidZoom(self.zoom));
        }
        Ok(())
    }

    fn step(&self, width: usize) -> f64 {
        self.range / width as f64 / self.zoom
    }

    /// Maps a grid position to its complex-plane sample point.
    pub fn map_pixel(&self, pixel: Pixel, width: usize, height: usize) -> Result<C<f64>, MapError> {
        self.validate(width, height)?;
        let step = self.step(width);
        let center_x = (width / 2) as f64;
        let center_y = (height / 2) as f64;
        Ok(c(
            (pixel.x as f64 - center_x) * step + self.shift_x,
            (pixel.y as f64 - center_y) * step + self.shift_y,
        ))
    }

    /// Inverse of `map_pixel`, as fractional grid coordinates.
    pub fn unmap(
        &self,
        sample: C<f64>,
        width: usize,
        height: usize,
    ) -> Result<(f64, f64), MapError> {
        self.validate(width, height)?;
        let step = self.step(width);
        let center_x = (width / 2) as f64;
        let center_y = (height / 2) as f64;
        Ok((
            (sample.re - self.shift_x) / step + center_x,
            (sample.im - self.shift_y) / step + center_y,
        ))
    }

    /// Sample points for the whole grid in row-major order.
    pub fn sample_grid(&self, width: usize, height: usize) -> Result<Vec<C<f64>>, MapError> {
        self.validate(width, height)?;
        let step = self.step(width);
        let center_x = (width / 2) as f64;
        let center_y = (height / 2) as f64;
        let mut grid = Vec::with_capacity(width * height);
        for y in 0..height {
            let im = (y as f64 - center_y) * step + self.shift_y;
            for x in 0..width {
                let re = (x as f64 - center_x) * step + self.shift_x;
                grid.push(c(re, im));
            }
        }
        Ok(grid)
    }

    /// The Julia constant for the current view: the plane point the pointer
    /// is over in the zoomed Mandelbrot field.
    pub fn julia_parameter(
        &self,
        pointer: Pixel,
        width: usize,
        height: usize,
    ) -> Result<C<f64>, MapError> {
        self.map_pixel(pointer, width, height)
    }
}
