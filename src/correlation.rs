use failure::Fail;
use std::fmt;

/// Misuse of the statistics functions. Unlike `Correlation::Undefined`
/// these never come from the data itself.
#[derive(Debug, Fail, PartialEq, Eq, Clone, Copy)]
pub enum AnalysisError {
    #[fail(display = "series lengths differ: {} vs {}", _0, _1)]
    LengthMismatch(usize, usize),
    #[fail(display = "{} needs at least one value", _0)]
    EmptySeries(&'static str)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Correlation {
    Defined(f64),
    /// One of the series has zero variance.
    Undefined
}

impl Correlation {
    pub fn value(self) -> Option<f64> {
        match self {
            Correlation::Defined(r) => Some(r),
            Correlation::Undefined => None
        }
    }
}

impl fmt::Display for Correlation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Correlation::Defined(r) => write!(f, "{:.3}", r),
            Correlation::Undefined => write!(f, "undefined")
        }
    }
}

pub fn mean(values: &[f64]) -> Result<f64, AnalysisError> {
    if values.is_empty() {
        return Err(AnalysisError::EmptySeries("mean"));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Pearson correlation coefficient of two paired series.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<Correlation, AnalysisError> {
    if x.len() != y.len() {
        return Err(AnalysisError::LengthMismatch(x.len(), y.len()));
    }
    if x.is_empty() {
        return Err(AnalysisError::EmptySeries("pearson"));
    }
    let x_mean = mean(x)?;
    let y_mean = mean(y)?;

    let mut numerator = 0.0;
    let mut denom_x = 0.0;
    let mut denom_y = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - x_mean;
        let dy = yi - y_mean;
        numerator += dx * dy;
        denom_x += dx * dx;
        denom_y += dy * dy;
    }

    let denominator = (denom_x * denom_y).sqrt();
    if denominator == 0.0 {
        Ok(Correlation::Undefined)
    } else {
        Ok(Correlation::Defined(numerator / denominator))
    }
}
