/// celsius_to_fahrenheit converts a temperature from degree Celsius to degree Fahrenheit.
pub fn celsius_to_fahrenheit(temp_c: f64) -> f64 {
    temp_c * 9.0 / 5.0 + 32.0
}

/// round_to_decimals rounds x half away from zero to the inserted number of decimal places.
pub fn round_to_decimals(x: f64, decimals: u32) -> f64 {
    let factor = 10.0_f64.powi(decimals as i32);
    (x * factor).round() / factor
}

/// fraction_to_percent scales a fraction in [0.0, 1.0] to a percentage in [0.0, 100.0].
pub fn fraction_to_percent(x: f64) -> f64 {
    x * 100.0
}
