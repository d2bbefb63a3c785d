
/// Celsius/Kelvin offset.
pub const K0: f64 = 273.15;

/// Reference temperature of the published tables (37 C), in Kelvin.
pub const T37: f64 = 310.15;

/// The reaction condition of one hybridization experiment.
///
/// This value is passed explicitly into every free energy evaluation;
/// there is no process-wide temperature. The salt molarity is carried
/// for completeness but no ionic correction is applied yet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReactionCondition {
    pub temperature_celsius: f64,
    pub salt_molarity: f64,
}

impl Default for ReactionCondition {
    fn default() -> Self {
        ReactionCondition {
            temperature_celsius: 37.0,
            salt_molarity: 1.0,
        }
    }
}

impl ReactionCondition {
    pub fn new(temperature_celsius: f64, salt_molarity: f64) -> Self {
        ReactionCondition { temperature_celsius, salt_molarity }
    }

    /// Absolute reaction temperature in Kelvin.
    pub fn absolute_temperature(&self) -> f64 {
        self.temperature_celsius + K0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_temperature() {
        let cond = ReactionCondition::default();
        assert!((cond.absolute_temperature() - T37).abs() < 1e-9);
        let cond = ReactionCondition::new(25.0, 0.05);
        assert!((cond.absolute_temperature() - 298.15).abs() < 1e-9);
    }
}
