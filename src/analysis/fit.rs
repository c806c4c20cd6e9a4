/// Least squares polynomial. Inputs are mapped onto `[0, 1]` before fitting so that high
/// powers of large sample indices stay well conditioned.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    /// Lowest power first.
    coefficients: Vec<f64>,
    x_min: f64,
    x_span: f64,
}

impl Polynomial {
    /// Fits a polynomial of at most `degree` through `points`. The degree is lowered when there
    /// are not enough distinct points. Returns `None` for an empty input or a singular system.
    pub fn fit(points: &[(f64, f64)], degree: usize) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let x_min = points.iter().map(|v| v.0).fold(f64::INFINITY, f64::min);
        let x_max = points.iter().map(|v| v.0).fold(f64::NEG_INFINITY, f64::max);
        let x_span = if x_max > x_min { x_max - x_min } else { 1. };

        let terms = (degree + 1).min(points.len());
        let scaled = points
            .iter()
            .map(|(x, y)| ((x - x_min) / x_span, *y))
            .collect::<Vec<_>>();

        // Normal equations: (XᵀX) c = Xᵀy
        let mut matrix = vec![vec![0.; terms + 1]; terms];
        for (x, y) in &scaled {
            let powers = (0..terms * 2).scan(1., |acc, _| {
                let current = *acc;
                *acc *= x;
                Some(current)
            });
            let powers = powers.collect::<Vec<_>>();
            for row in 0..terms {
                for col in 0..terms {
                    matrix[row][col] += powers[row + col];
                }
                matrix[row][terms] += powers[row] * y;
            }
        }

        let coefficients = solve(matrix)?;
        Some(Self {
            coefficients,
            x_min,
            x_span,
        })
    }

    pub fn eval(&self, x: f64) -> f64 {
        let x = (x - self.x_min) / self.x_span;
        self.coefficients
            .iter()
            .rev()
            .fold(0., |acc, coefficient| acc * x + coefficient)
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }
}

/// Gaussian elimination with partial pivoting on an augmented matrix.
fn solve(mut matrix: Vec<Vec<f64>>) -> Option<Vec<f64>> {
    let size = matrix.len();
    for col in 0..size {
        let pivot = (col..size).max_by(|a, b| matrix[*a][col].abs().total_cmp(&matrix[*b][col].abs()))?;
        if matrix[pivot][col].abs() < 1e-12 {
            return None;
        }
        matrix.swap(col, pivot);

        for row in col + 1..size {
            let factor = matrix[row][col] / matrix[col][col];
            for k in col..=size {
                let eliminated = factor * matrix[col][k];
                matrix[row][k] -= eliminated;
            }
        }
    }

    let mut result = vec![0.; size];
    for row in (0..size).rev() {
        let known = (row + 1..size)
            .map(|k| matrix[row][k] * result[k])
            .sum::<f64>();
        result[row] = (matrix[row][size] - known) / matrix[row][row];
    }
    Some(result)
}
