use image::{GrayImage, Luma};

use crate::field::IterationField;

pub trait Painter {
    fn intensity_value(&self, intensity: u32, max_iter: u32) -> u8;

    fn paint(&self, field: &IterationField) -> GrayImage {
        let width: u32 = field.width().try_into().unwrap();
        let height: u32 = field.height().try_into().unwrap();

        let mut img = GrayImage::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let intensity = field.intensity(x as usize, y as usize);
                let v = self.intensity_value(intensity, field.max_iter());
                img.put_pixel(x, y, Luma([v]));
            }
        }
        img
    }
}

/// Interior pixels black, immediate escapees white, linear in between.
pub struct Greyscale;

impl Painter for Greyscale {
    fn intensity_value(&self, intensity: u32, max_iter: u32) -> u8 {
        if max_iter == 0 {
            return 0;
        }
        let frac = (intensity as f64 / max_iter as f64).clamp(0.0, 1.0);
        (frac * 255.0).round() as u8
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_greyscale_endpoints() {
        assert_eq!(Greyscale.intensity_value(0, 255), 0);
        assert_eq!(Greyscale.intensity_value(255, 255), 255);
        assert_eq!(Greyscale.intensity_value(0, 0), 0);
    }

    #[test]
    fn test_paint_dimensions_and_values() {
        let field = IterationField::from_counts(2, 2, 255, vec![255, 0, 255, 100]);
        let img = Greyscale.paint(&field);
        assert_eq!(img.dimensions(), (2, 2));
        // count 255 -> intensity 0 -> black; count 0 -> intensity 255 -> white
        assert_eq!(img.get_pixel(0, 0).0, [0]);
        assert_eq!(img.get_pixel(1, 0).0, [255]);
    }
}
