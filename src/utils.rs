/// Round to 2 decimal places (price and dollar magnitudes)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to 4 decimal places (percent magnitudes)
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Percent change from `previous` to `current`, 0.0 when previous is zero
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        0.0
    } else {
        (current - previous) / previous * 100.0
    }
}

/// Bar-over-bar simple returns from a close series
pub fn simple_returns(closes: &[f64]) -> Vec<f64> {
    closes
        .windows(2)
        .map(|w| if w[0] == 0.0 { 0.0 } else { (w[1] - w[0]) / w[0] })
        .collect()
}

/// Pearson correlation of two equal-length series, 0.0 when degenerate
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return 0.0;
    }
    let xs = &xs[..n];
    let ys = &ys[..n];
    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for i in 0..n {
        let dx = xs[i] - mean_x;
        let dy = ys[i] - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        0.0
    } else {
        cov / (var_x.sqrt() * var_y.sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(25870.684999), 25870.68);
        assert_eq!(round2(1.005_001), 1.01);
    }

    #[test]
    fn test_round4() {
        assert_eq!(round4(0.47461), 0.4746);
    }

    #[test]
    fn test_percent_change() {
        assert!((percent_change(110.0, 100.0) - 10.0).abs() < 1e-12);
        assert_eq!(percent_change(110.0, 0.0), 0.0);
    }

    #[test]
    fn test_simple_returns() {
        let closes = vec![100.0, 110.0, 99.0];
        let rets = simple_returns(&closes);
        assert_eq!(rets.len(), 2);
        assert!((rets[0] - 0.10).abs() < 1e-12);
        assert!((rets[1] + 0.10).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_correlation_perfect() {
        let xs = vec![1.0, 2.0, 3.0, 4.0];
        let ys = vec![2.0, 4.0, 6.0, 8.0];
        assert!((pearson_correlation(&xs, &ys) - 1.0).abs() < 1e-12);

        let inverse: Vec<f64> = ys.iter().map(|y| -y).collect();
        assert!((pearson_correlation(&xs, &inverse) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_correlation_degenerate() {
        let flat = vec![3.0, 3.0, 3.0];
        let xs = vec![1.0, 2.0, 3.0];
        assert_eq!(pearson_correlation(&xs, &flat), 0.0);
        assert_eq!(pearson_correlation(&xs[..1], &flat[..1]), 0.0);
    }
}
