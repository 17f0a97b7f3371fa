pub mod buffer;
pub mod general;
pub mod units;



#[cfg(test)]
mod units_tests {
    use crate::units::{celsius_to_fahrenheit, fraction_to_percent, round_to_decimals};
    use approx::assert_ulps_eq;

    #[test]
    fn test_celsius_to_fahrenheit_body_temp() {
        assert_ulps_eq!(round_to_decimals(celsius_to_fahrenheit(37.0), 1), 98.6);
    }
    #[test]
    fn test_celsius_to_fahrenheit_freezing() {
        assert_ulps_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_ulps_eq!(celsius_to_fahrenheit(-40.0), -40.0);
    }
    #[test]
    fn test_round_to_decimals() {
        assert_ulps_eq!(round_to_decimals(90.1234, 2), 90.12);
        assert_ulps_eq!(round_to_decimals(99.5, 0), 100.0);
    }
    #[test]
    fn test_fraction_to_percent() {
        assert_ulps_eq!(fraction_to_percent(0.25), 25.0);
    }
}
