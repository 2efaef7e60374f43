use nalgebra::DVector;
use std::f64::consts::PI;

/// `n` evenly spaced samples over `[start, end]`, endpoints included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// `n` samples spaced evenly in log10 between `10^start_exp` and `10^end_exp`.
pub fn logspace(start_exp: f64, end_exp: f64, n: usize) -> Vec<f64> {
    linspace(start_exp, end_exp, n)
        .into_iter()
        .map(|e| 10f64.powf(e))
        .collect()
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(DVector::from_column_slice(values).mean())
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(DVector::from_column_slice(values).variance().sqrt())
}

/// Pearson correlation coefficient; `None` for mismatched, short, or constant input.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let x = DVector::from_column_slice(xs);
    let y = DVector::from_column_slice(ys);
    let dx = x.add_scalar(-x.mean());
    let dy = y.add_scalar(-y.mean());
    let denom = dx.norm() * dy.norm();
    if denom == 0.0 {
        return None;
    }
    Some(dx.dot(&dy) / denom)
}

/// Least-squares `(slope, intercept)`; `None` for mismatched, short, or constant `xs`.
pub fn linear_fit(xs: &[f64], ys: &[f64]) -> Option<(f64, f64)> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let x = DVector::from_column_slice(xs);
    let y = DVector::from_column_slice(ys);
    let dx = x.add_scalar(-x.mean());
    let spread = dx.norm_squared();
    if spread == 0.0 {
        return None;
    }
    let slope = dx.dot(&y.add_scalar(-y.mean())) / spread;
    Some((slope, y.mean() - slope * x.mean()))
}

/// Two-sided p-value of a Pearson `r` over `n` pairs, from Student's t with `n − 2`
/// degrees of freedom.
pub fn pearson_p_value(r: f64, n: usize) -> Option<f64> {
    if n < 3 || !r.is_finite() || r.abs() > 1.0 {
        return None;
    }
    if r.abs() == 1.0 {
        return Some(0.0);
    }
    let df = (n - 2) as f64;
    let t_squared = r * r * df / (1.0 - r * r);
    Some(regularized_beta(df / (df + t_squared), df / 2.0, 0.5))
}

/// Lanczos approximation, `g = 7`.
fn ln_gamma(x: f64) -> f64 {
    const G: f64 = 7.0;
    const COEFFS: [f64; 9] = [
        0.999_999_999_999_809_9,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_1,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];
    if x < 0.5 {
        return (PI / (PI * x).sin()).ln() - ln_gamma(1.0 - x);
    }
    let x = x - 1.0;
    let sum = COEFFS
        .iter()
        .enumerate()
        .skip(1)
        .fold(COEFFS[0], |acc, (i, c)| acc + c / (x + i as f64));
    let t = x + G + 0.5;
    0.5 * (2.0 * PI).ln() + (x + 0.5) * t.ln() - t + sum.ln()
}

/// `I_x(a, b)`.
fn regularized_beta(x: f64, a: f64, b: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let front = (ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (1.0 - x).ln())
        .exp();
    if x < (a + 1.0) / (a + b + 2.0) {
        front * beta_continued_fraction(x, a, b) / a
    } else {
        1.0 - front * beta_continued_fraction(1.0 - x, b, a) / b
    }
}

/// Modified Lentz evaluation of the incomplete-beta continued fraction.
fn beta_continued_fraction(x: f64, a: f64, b: f64) -> f64 {
    const MAX_TERMS: usize = 300;
    const EPSILON: f64 = 1e-14;
    const TINY: f64 = 1e-300;
    let floor = |v: f64| if v.abs() < TINY { TINY } else { v };

    let mut c = 1.0;
    let mut d = 1.0 / floor(1.0 - (a + b) * x / (a + 1.0));
    let mut h = d;
    for m in 1..=MAX_TERMS {
        let m = m as f64;
        let even = m * (b - m) * x / ((a - 1.0 + 2.0 * m) * (a + 2.0 * m));
        d = 1.0 / floor(1.0 + even * d);
        c = floor(1.0 + even / c);
        h *= d * c;

        let odd = -(a + m) * (a + b + m) * x / ((a + 2.0 * m) * (a + 1.0 + 2.0 * m));
        d = 1.0 / floor(1.0 + odd * d);
        c = floor(1.0 + odd / c);
        let step = d * c;
        h *= step;
        if (step - 1.0).abs() < EPSILON {
            break;
        }
    }
    h
}

/// Indices of interior local maxima strictly above `threshold × max`.
pub fn local_maxima(values: &[f64], threshold: f64) -> Vec<usize> {
    let Some(max) = values.iter().copied().reduce(f64::max) else {
        return Vec::new();
    };
    (1..values.len().saturating_sub(1))
        .filter(|&i| {
            values[i] > values[i - 1] && values[i] > values[i + 1] && values[i] > threshold * max
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_both_endpoints() {
        let v = linspace(250.0, 400.0, 4);
        assert_eq!(v, vec![250.0, 300.0, 350.0, 400.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
    }

    #[test]
    fn logspace_spans_decades() {
        let v = logspace(-1.0, 5.0, 7);
        assert!((v[0] - 0.1).abs() < 1e-12);
        assert!((v[6] - 1e5).abs() < 1e-6);
    }

    #[test]
    fn population_std_dev() {
        let sd = std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((sd - 2.0).abs() < 1e-12);
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn pearson_of_linear_data_is_unity() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let up: Vec<f64> = xs.iter().map(|x| 2.0 * x + 1.0).collect();
        let down: Vec<f64> = xs.iter().map(|x| -3.0 * x).collect();
        assert!((pearson(&xs, &up).unwrap() - 1.0).abs() < 1e-12);
        assert!((pearson(&xs, &down).unwrap() + 1.0).abs() < 1e-12);
        assert_eq!(pearson(&xs, &[1.0, 1.0, 1.0, 1.0]), None);
    }

    #[test]
    fn local_maxima_respects_threshold() {
        let v = [0.0, 1.0, 0.0, 0.2, 0.0, 0.9, 0.1];
        assert_eq!(local_maxima(&v, 0.5), vec![1, 5]);
    }

    #[test]
    fn linear_fit_recovers_line() {
        let (slope, intercept) = linear_fit(&[0.0, 1.0, 2.0], &[1.0, 3.0, 5.0]).unwrap();
        assert!((slope - 2.0).abs() < 1e-12);
        assert!((intercept - 1.0).abs() < 1e-12);
        assert_eq!(linear_fit(&[1.0, 1.0], &[0.0, 2.0]), None);
    }

    #[test]
    fn ln_gamma_matches_factorials() {
        assert!((ln_gamma(5.0) - 24f64.ln()).abs() < 1e-10);
        assert!((ln_gamma(0.5) - PI.sqrt().ln()).abs() < 1e-10);
    }

    #[test]
    fn pearson_p_value_matches_closed_forms() {
        // Two degrees of freedom: p = 1 − |r|.
        for r in [0.1, 0.5, 0.9, -0.7] {
            let p = pearson_p_value(r, 4).unwrap();
            assert!((p - (1.0 - f64::abs(r))).abs() < 1e-9, "r = {r}: {p}");
        }
        // Critical r at α = 0.05 with eight degrees of freedom.
        assert!((pearson_p_value(0.6319, 10).unwrap() - 0.05).abs() < 1e-3);
        assert_eq!(pearson_p_value(0.0, 10), Some(1.0));
        assert_eq!(pearson_p_value(1.0, 5), Some(0.0));
        assert_eq!(pearson_p_value(0.5, 2), None);
    }
}
