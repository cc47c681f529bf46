/// Ordinary least-squares fit of `y = slope * x + intercept`.
///
/// # Arguments
///
/// * `x` - Sample x-values.
/// * `y` - Sample y-values, same length as `x`.
///
/// # Returns
///
/// `Some((slope, intercept))`, or `None` when fewer than two samples are
/// given or all x-values coincide.
pub fn linear_fit(x: &[f64], y: &[f64]) -> Option<(f64, f64)> {
    assert_eq!(x.len(), y.len(), "x and y must have the same length");

    let n = x.len();
    if n < 2 {
        return None;
    }

    let n_f = n as f64;
    let mean_x = x.iter().sum::<f64>() / n_f;
    let mean_y = y.iter().sum::<f64>() / n_f;

    let mut ss_xx = 0.0;
    let mut ss_xy = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        ss_xx += dx * dx;
        ss_xy += dx * (yi - mean_y);
    }

    if ss_xx == 0.0 {
        return None;
    }

    let slope = ss_xy / ss_xx;
    Some((slope, mean_y - slope * mean_x))
}
