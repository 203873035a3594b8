//! Curve engine: fits an interpolating curve through control points and samples it.
//!
//! Each axis is fitted independently against the point index `0, 1, .., n-1`.
//! With up to four control points the fit is the single polynomial of degree
//! `n - 1` through all of them (the cubic case for four points). Longer
//! control polygons fall back to a natural cubic spline so the degree never
//! exceeds three. Both pass through every control point exactly.

use crate::models::point::Point;

const MAX_POLYNOMIAL_POINTS: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct Spline {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl Spline {
    /// Returns `None` when fewer than two control points are given.
    pub fn from_points(points: &[Point], sample_count: usize) -> Option<Spline> {
        if points.len() < 2 {
            return None;
        }

        let x_curve = AxisCurve::fit(points.iter().map(|point| point.x).collect());
        let y_curve = AxisCurve::fit(points.iter().map(|point| point.y).collect());
        let params = sample_params(points.len(), sample_count);

        Some(Spline {
            xs: params.iter().map(|t| x_curve.evaluate(*t)).collect(),
            ys: params.iter().map(|t| y_curve.evaluate(*t)).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.xs
            .iter()
            .zip(self.ys.iter())
            .map(|(x, y)| Point::new(*x, *y))
    }
}

/// Uniform steps over `[0, control_count - 1]`, endpoints included.
fn sample_params(control_count: usize, sample_count: usize) -> Vec<f64> {
    let span = (control_count - 1) as f64;
    match sample_count {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let last = (sample_count - 1) as f64;
            (0..sample_count)
                .map(|step| span * step as f64 / last)
                .collect()
        }
    }
}

#[derive(Debug, Clone)]
enum AxisCurve {
    Polynomial { values: Vec<f64> },
    NaturalCubic { values: Vec<f64>, second: Vec<f64> },
}

impl AxisCurve {
    fn fit(values: Vec<f64>) -> Self {
        if values.len() <= MAX_POLYNOMIAL_POINTS {
            AxisCurve::Polynomial { values }
        } else {
            let second = natural_second_derivatives(&values);
            AxisCurve::NaturalCubic { values, second }
        }
    }

    fn evaluate(&self, t: f64) -> f64 {
        match self {
            AxisCurve::Polynomial { values } => lagrange(values, t),
            AxisCurve::NaturalCubic { values, second } => cubic_segment(values, second, t),
        }
    }
}

fn lagrange(values: &[f64], t: f64) -> f64 {
    let mut sum = 0.0;
    for (j, value) in values.iter().enumerate() {
        let mut basis = 1.0;
        for m in 0..values.len() {
            if m != j {
                basis *= (t - m as f64) / (j as f64 - m as f64);
            }
        }
        sum += value * basis;
    }
    sum
}

/// Second derivatives of the natural cubic spline on unit knot spacing.
///
/// Solves `M[i-1] + 4 M[i] + M[i+1] = 6 (y[i+1] - 2 y[i] + y[i-1])` with
/// `M[0] = M[n-1] = 0` by forward elimination and back substitution.
fn natural_second_derivatives(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut second = vec![0.0f64; n];
    if n < 3 {
        return second;
    }

    let inner = n - 2;
    let mut diag = vec![4.0f64; inner];
    let mut rhs: Vec<f64> = (1..n - 1)
        .map(|i| 6.0 * (values[i + 1] - 2.0 * values[i] + values[i - 1]))
        .collect();

    for row in 1..inner {
        let factor = 1.0 / diag[row - 1];
        diag[row] -= factor;
        rhs[row] -= factor * rhs[row - 1];
    }

    second[inner] = rhs[inner - 1] / diag[inner - 1];
    for row in (0..inner - 1).rev() {
        second[row + 1] = (rhs[row] - second[row + 2]) / diag[row];
    }

    second
}

fn cubic_segment(values: &[f64], second: &[f64], t: f64) -> f64 {
    let last_segment = values.len() - 2;
    let k = (t.floor().max(0.0) as usize).min(last_segment);
    let u = t - k as f64;
    let v = 1.0 - u;

    second[k] * v * v * v / 6.0
        + second[k + 1] * u * u * u / 6.0
        + (values[k] - second[k] / 6.0) * v
        + (values[k + 1] - second[k + 1] / 6.0) * u
}
