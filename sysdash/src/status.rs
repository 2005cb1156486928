//! Green/amber/red bucketing of a percentage, shared by every status indicator.

/// Values at or above this are amber.
pub const AMBER_AT: f64 = 60.0;
/// Values at or above this are red.
pub const RED_AT: f64 = 85.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Green,
    Amber,
    Red,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::Green => "OK",
            Status::Amber => "WARN",
            Status::Red => "CRIT",
        }
    }
}

/// Classify a percentage. NaN compares false against both thresholds and so
/// lands in `Red`.
pub fn classify(v: f64) -> Status {
    if v < AMBER_AT {
        Status::Green
    } else if v < RED_AT {
        Status::Amber
    } else {
        Status::Red
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_exact() {
        assert_eq!(classify(59.9), Status::Green);
        assert_eq!(classify(60.0), Status::Amber);
        assert_eq!(classify(84.9), Status::Amber);
        assert_eq!(classify(85.0), Status::Red);
    }

    #[test]
    fn out_of_range_values_are_not_rejected() {
        assert_eq!(classify(-5.0), Status::Green);
        assert_eq!(classify(0.0), Status::Green);
        assert_eq!(classify(100.0), Status::Red);
        assert_eq!(classify(250.0), Status::Red);
        assert_eq!(classify(f64::NAN), Status::Red);
    }
}
