use crate::coord::{Pixel, Viewport};
use crate::field::IterationField;
use crate::solver::{FractalKind, GenerateError, Generator};
use crate::stats::{StatsCollector, StatsSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Mandelbrot,
    Julia,
}

/// A discrete view-change event from the input collaborator, delivered
/// once per frame tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewEvent {
    ZoomIn,
    ZoomOut,
    Pointer(Pixel),
    SetMode(Mode),
}

/// Interactive front door: owns the viewport, the latest valid field and
/// the pass statistics. Exactly one generation pass runs at a time and it
/// blocks the caller; events pushed while the caller is between pumps
/// queue up and are applied in order before the next pass.
pub struct Explorer {
    width: usize,
    height: usize,
    viewport: Viewport,
    mode: Mode,
    pointer: Pixel,
    generator: Generator,
    stats: StatsCollector,
    field: IterationField,
    pending: Vec<ViewEvent>,
}

impl Explorer {
    /// Runs the initial Mandelbrot pass so a field is available from the
    /// first frame, as the original interactive loop does.
    pub fn new(width: usize, height: usize, generator: Generator) -> Result<Self, GenerateError> {
        let viewport = Viewport::default();
        let (field, pass) = generator.generate(width, height, &viewport, FractalKind::Mandelbrot)?;
        let mut stats = StatsCollector::new();
        stats.record(pass);
        Ok(Self {
            width,
            height,
            viewport,
            mode: Mode::Mandelbrot,
            pointer: Pixel::new(width / 2, height / 2),
            generator,
            stats,
            field,
            pending: Vec::new(),
        })
    }

    pub fn push(&mut self, event: ViewEvent) {
        self.pending.push(event);
    }

    /// Drains the event queue, then runs at most one regeneration pass.
    /// Returns whether the field was replaced. On error the queue is still
    /// drained but the previous field stays in place for the consumer.
    pub fn pump(&mut self) -> Result<bool, GenerateError> {
        if self.pending.is_empty() {
            return Ok(false);
        }
        let old_viewport = self.viewport;
        let old_mode = self.mode;
        let old_pointer = self.pointer;

        for event in std::mem::take(&mut self.pending) {
            match event {
                ViewEvent::ZoomIn => self.apply_zoom(Viewport::zoom_in),
                ViewEvent::ZoomOut => self.apply_zoom(Viewport::zoom_out),
                ViewEvent::Pointer(p) => self.pointer = p,
                ViewEvent::SetMode(mode) => self.mode = mode,
            }
        }

        // Pointer movement alone only matters in Julia mode, where it
        // picks a different constant.
        let dirty = self.viewport != old_viewport
            || self.mode != old_mode
            || (self.mode == Mode::Julia && self.pointer != old_pointer);
        if !dirty {
            return Ok(false);
        }
        self.regenerate()?;
        Ok(true)
    }

    fn apply_zoom(&mut self, zoom_step: fn(&mut Viewport)) {
        let old_zoom = self.viewport.zoom;
        zoom_step(&mut self.viewport);
        let new_zoom = self.viewport.zoom;
        if new_zoom != old_zoom {
            self.viewport
                .recenter(self.pointer, self.width, self.height, old_zoom, new_zoom);
            log::debug!("zoom change from {} to {}", old_zoom, new_zoom);
        }
    }

    /// The kind the next pass will compute: in Julia mode the constant is
    /// re-derived from the pointer through the zoomed Mandelbrot view.
    pub fn kind(&self) -> Result<FractalKind, GenerateError> {
        match self.mode {
            Mode::Mandelbrot => Ok(FractalKind::Mandelbrot),
            Mode::Julia => {
                let c = self
                    .viewport
                    .julia_parameter(self.pointer, self.width, self.height)?;
                Ok(FractalKind::Julia(c))
            }
        }
    }

    fn regenerate(&mut self) -> Result<(), GenerateError> {
        let kind = self.kind()?;
        let (field, pass) =
            self.generator
                .generate(self.width, self.height, &self.viewport, kind)?;
        self.field = field;
        self.stats.record(pass);
        log::info!(
            "pass complete: zoom {} total_iterations {} elapsed {:?}",
            self.viewport.zoom,
            pass.total_iterations,
            pass.elapsed
        );
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn pointer(&self) -> Pixel {
        self.pointer
    }

    /// The latest completed field. Stale the instant `pump` replaces it.
    pub fn field(&self) -> &IterationField {
        &self.field
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::solver::MAX_ITERATION;

    fn explorer(width: usize, height: usize) -> Explorer {
        Explorer::new(width, height, Generator::sequential()).unwrap()
    }

    #[test]
    fn test_initial_pass() {
        let e = explorer(8, 8);
        assert_eq!(e.field().width(), 8);
        assert_eq!(e.field().height(), 8);
        assert_eq!(e.stats().passes, 1);
        assert_eq!(e.viewport().zoom, 1.0);
    }

    #[test]
    fn test_zoom_out_at_floor_is_not_dirty() {
        let mut e = explorer(8, 8);
        e.push(ViewEvent::ZoomOut);
        assert!(!e.pump().unwrap());
        assert_eq!(e.viewport().zoom, 1.0);
        assert_eq!(e.stats().passes, 1);
    }

    #[test]
    fn test_zoom_in_regenerates_once() {
        let mut e = explorer(8, 8);
        e.push(ViewEvent::Pointer(Pixel::new(1, 2)));
        e.push(ViewEvent::ZoomIn);
        e.push(ViewEvent::ZoomIn);
        assert!(e.pump().unwrap());
        // Two queued zoom events, one coalesced pass.
        assert_eq!(e.stats().passes, 2);
        assert!((e.viewport().zoom - 1.5625).abs() < 1e-12);
    }

    #[test]
    fn test_pointer_move_only_affects_julia() {
        let mut e = explorer(8, 8);
        e.push(ViewEvent::Pointer(Pixel::new(3, 3)));
        assert!(!e.pump().unwrap());

        e.push(ViewEvent::SetMode(Mode::Julia));
        assert!(e.pump().unwrap());
        let passes = e.stats().passes;

        e.push(ViewEvent::Pointer(Pixel::new(5, 1)));
        assert!(e.pump().unwrap());
        assert_eq!(e.stats().passes, passes + 1);
    }

    #[test]
    fn test_julia_kind_tracks_pointer() {
        let mut e = explorer(8, 8);
        e.push(ViewEvent::SetMode(Mode::Julia));
        e.push(ViewEvent::Pointer(Pixel::new(2, 6)));
        e.pump().unwrap();
        let expected = e.viewport().julia_parameter(Pixel::new(2, 6), 8, 8).unwrap();
        assert_eq!(e.kind().unwrap(), FractalKind::Julia(expected));
    }

    #[test]
    fn test_zoom_keeps_pointed_location_fixed() {
        let mut e = explorer(64, 64);
        let pointer = Pixel::new(10, 50);
        let before = e.viewport().map_pixel(pointer, 64, 64).unwrap();
        e.push(ViewEvent::Pointer(pointer));
        e.push(ViewEvent::ZoomIn);
        e.pump().unwrap();
        let after = e.viewport().map_pixel(pointer, 64, 64).unwrap();
        assert!((after.re - before.re).abs() < 1e-9);
        assert!((after.im - before.im).abs() < 1e-9);
    }

    #[test]
    fn test_field_counts_bounded() {
        let e = explorer(8, 8);
        assert!(e.field().as_slice().iter().all(|&n| n <= MAX_ITERATION));
    }

    #[test]
    fn test_invalid_dims_rejected() {
        assert!(Explorer::new(0, 8, Generator::sequential()).is_err());
    }
}
