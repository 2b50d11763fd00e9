pub mod openweather;
pub mod types;

/// Fixed query parameters for the current-weather lookup.
pub const UNITS: &str = "imperial";
pub const COUNTRY_CODE: &str = "us";
