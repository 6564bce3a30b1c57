use ndarray::Array2;

/// A completed generation pass: one escape-time count per pixel, stored
/// row-major in a single contiguous buffer. Replaced wholesale on every
/// regeneration; consumers never see a partially written field.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationField {
    counts: Array2<u32>,
    max_iter: u32,
}

impl IterationField {
    /// Builds a field from a row-major count buffer. The buffer length must
    /// be exactly `width * height`; backends guarantee this.
    pub(crate) fn from_counts(
        width: usize,
        height: usize,
        max_iter: u32,
        counts: Vec<u32>,
    ) -> Self {
        let counts = Array2::from_shape_vec((height, width), counts)
            .expect("count buffer does not match grid dimensions");
        Self { counts, max_iter }
    }

    pub fn width(&self) -> usize {
        self.counts.ncols()
    }

    pub fn height(&self) -> usize {
        self.counts.nrows()
    }

    pub fn max_iter(&self) -> u32 {
        self.max_iter
    }

    pub fn count(&self, x: usize, y: usize) -> u32 {
        self.counts[[y, x]]
    }

    /// Grayscale display value: interior pixels (count == max_iter) are
    /// darkest at 0, immediate escapees brightest at max_iter.
    pub fn intensity(&self, x: usize, y: usize) -> u32 {
        self.max_iter - self.count(x, y)
    }

    pub fn counts(&self) -> &Array2<u32> {
        &self.counts
    }

    /// The flat row-major buffer, indexed `y * width + x`.
    pub fn as_slice(&self) -> &[u32] {
        self.counts
            .as_slice()
            .expect("field storage is standard layout")
    }
}
