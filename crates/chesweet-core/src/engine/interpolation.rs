//! Scattered-data interpolation over the handful of rows inside one grid cell.

use nalgebra::{Matrix3, Point2, Vector2, Vector3};

const TOLERANCE: f64 = 1e-9;

/// One tabulated conformer projected onto the phi/psi plane, carrying its two
/// shielding values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub position: Point2<f64>,
    pub values: Vector2<f64>,
}

impl Sample {
    pub fn new(phi: f64, psi: f64, shielding: [f64; 2]) -> Self {
        Self {
            position: Point2::new(phi, psi),
            values: Vector2::new(shielding[0], shielding[1]),
        }
    }
}

/// Value of the sample closest to `at` (Euclidean distance in phi/psi).
///
/// On equal distances the earliest sample wins. Returns `None` only for an empty slice.
pub fn nearest(samples: &[Sample], at: &Point2<f64>) -> Option<Vector2<f64>> {
    let mut best: Option<(f64, &Sample)> = None;
    for sample in samples {
        let distance = (sample.position - at).norm_squared();
        match best {
            Some((best_distance, _)) if distance >= best_distance => {}
            _ => best = Some((distance, sample)),
        }
    }
    best.map(|(_, sample)| sample.values)
}

/// Linear interpolation of the samples at `at`.
///
/// Four samples on the corners of an axis-aligned rectangle are interpolated
/// bilinearly. Anything else is interpolated barycentrically inside the smallest
/// sample triangle that contains `at`. Returns `None` when `at` lies outside every
/// such rectangle or triangle, or when the samples are all collinear.
pub fn linear(samples: &[Sample], at: &Point2<f64>) -> Option<Vector2<f64>> {
    bilinear(samples, at).or_else(|| barycentric(samples, at))
}

fn bilinear(samples: &[Sample], at: &Point2<f64>) -> Option<Vector2<f64>> {
    if samples.len() != 4 {
        return None;
    }
    let (x0, x1) = bounds(samples.iter().map(|s| s.position.x));
    let (y0, y1) = bounds(samples.iter().map(|s| s.position.y));
    if x1 - x0 <= TOLERANCE || y1 - y0 <= TOLERANCE {
        return None;
    }

    let corner = |x: f64, y: f64| {
        samples
            .iter()
            .find(|s| s.position.x == x && s.position.y == y)
            .map(|s| s.values)
    };
    let v00 = corner(x0, y0)?;
    let v10 = corner(x1, y0)?;
    let v01 = corner(x0, y1)?;
    let v11 = corner(x1, y1)?;

    let t = (at.x - x0) / (x1 - x0);
    let u = (at.y - y0) / (y1 - y0);
    let unit = -TOLERANCE..=1.0 + TOLERANCE;
    if !unit.contains(&t) || !unit.contains(&u) {
        return None;
    }

    Some(
        v00 * ((1.0 - t) * (1.0 - u))
            + v10 * (t * (1.0 - u))
            + v01 * ((1.0 - t) * u)
            + v11 * (t * u),
    )
}

fn barycentric(samples: &[Sample], at: &Point2<f64>) -> Option<Vector2<f64>> {
    let target = Vector3::new(at.x, at.y, 1.0);
    let mut best: Option<(f64, Vector2<f64>)> = None;

    for i in 0..samples.len() {
        for j in (i + 1)..samples.len() {
            for k in (j + 1)..samples.len() {
                let (a, b, c) = (&samples[i], &samples[j], &samples[k]);
                #[rustfmt::skip]
                let m = Matrix3::new(
                    a.position.x, b.position.x, c.position.x,
                    a.position.y, b.position.y, c.position.y,
                    1.0, 1.0, 1.0,
                );
                let area = m.determinant().abs() / 2.0;
                if area <= TOLERANCE {
                    continue;
                }
                if matches!(best, Some((best_area, _)) if area >= best_area) {
                    continue;
                }
                let Some(inverse) = m.try_inverse() else {
                    continue;
                };
                let w = inverse * target;
                if w.iter().all(|&weight| weight >= -TOLERANCE) {
                    let value = a.values * w[0] + b.values * w[1] + c.values * w[2];
                    best = Some((area, value));
                }
            }
        }
    }

    best.map(|(_, value)| value)
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}
