use num::complex::Complex;

pub type C<T> = Complex<T>;

pub fn c(re: f64, im: f64) -> C<f64> {
    Complex::new(re, im)
}

pub fn cr(re: f64) -> C<f64> {
    c(re, 0.0)
}

pub fn ci(im: f64) -> C<f64> {
    c(0.0, im)
}

pub const ESCAPE_RADIUS: f64 = 2.0;
const ESCAPE_RADIUS_SQR: f64 = ESCAPE_RADIUS * ESCAPE_RADIUS;

/// One application of the quadratic map `z² + c`.
pub fn step(z: C<f64>, c: C<f64>) -> C<f64> {
    (z * z) + c
}

/// Escape test against the squared radius; comparing squares avoids the
/// square root and is monotonic, so the outcome is the same.
pub fn escaped(z: C<f64>) -> bool {
    z.norm_sqr() > ESCAPE_RADIUS_SQR
}
