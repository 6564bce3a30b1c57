use std::io::{self, Write};

use crate::complex::C;
use crate::field::IterationField;

/// Writes the field as a plain-text greyscale bitmap: `P2` header, one
/// width/height line, the maximum intensity, then one line of
/// space-separated intensities per pixel row. Intensities are rescaled
/// from `[0, max_iter]` to `[0, max_value]`.
pub fn write_pgm<W: Write>(w: &mut W, field: &IterationField, max_value: u32) -> io::Result<()> {
    writeln!(w, "P2")?;
    writeln!(w, "{} {}", field.width(), field.height())?;
    writeln!(w, "{}", max_value)?;
    for y in 0..field.height() {
        let row: Vec<String> = (0..field.width())
            .map(|x| rescale(field.intensity(x, y), field.max_iter(), max_value).to_string())
            .collect();
        writeln!(w, "{}", row.join(" "))?;
    }
    Ok(())
}

fn rescale(intensity: u32, max_iter: u32, max_value: u32) -> u32 {
    if max_iter == 0 {
        return 0;
    }
    (intensity as u64 * max_value as u64 / max_iter as u64) as u32
}

/// Dumps a row-major sample grid as comma-separated `re,im` pairs, one
/// pixel row per line.
pub fn write_sample_csv<W: Write>(w: &mut W, samples: &[C<f64>], width: usize) -> io::Result<()> {
    if width == 0 {
        return Ok(());
    }
    for row in samples.chunks(width) {
        let cells: Vec<String> = row
            .iter()
            .flat_map(|s| [s.re.to_string(), s.im.to_string()])
            .collect();
        writeln!(w, "{}", cells.join(","))?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::complex::c;

    #[test]
    fn test_pgm_format() {
        let field = IterationField::from_counts(2, 2, 255, vec![255, 0, 155, 55]);
        let mut buf = Vec::new();
        write_pgm(&mut buf, &field, 255).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "P2\n2 2\n255\n0 255\n100 200\n");
    }

    #[test]
    fn test_pgm_rescales() {
        let field = IterationField::from_counts(1, 1, 255, vec![0]);
        let mut buf = Vec::new();
        write_pgm(&mut buf, &field, 20).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "P2\n1 1\n20\n20\n");
    }

    #[test]
    fn test_sample_csv() {
        let samples = vec![c(0.0, 1.0), c(-0.5, 0.25), c(2.0, -2.0), c(0.0, 0.0)];
        let mut buf = Vec::new();
        write_sample_csv(&mut buf, &samples, 2).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "0,1,-0.5,0.25\n2,-2,0,0\n");
    }
}
