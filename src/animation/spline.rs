/// Uniform Catmull-Rom interpolation of one axis.
///
/// `p0` and `p3` are the neighbouring control values that keep the curve
/// first-derivative continuous when the `p1..p2` window slides along a list of
/// points. The result equals `p1` at `t = 0` and `p2` at `t = 1`. `t` is not
/// clamped; values outside `[0, 1]` extrapolate.
pub fn spline(t: f64, p0: f64, p1: f64, p2: f64, p3: f64) -> f64 {
    (t * ((2.0 - t) * t - 1.0) * p0
        + (t * t * (3.0 * t - 5.0) + 2.0) * p1
        + t * ((4.0 - 3.0 * t) * t + 1.0) * p2
        + (t - 1.0) * t * t * p3)
        / 2.0
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spline.rs"]
mod tests;
