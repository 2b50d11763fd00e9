use serde::{Deserialize, Deserializer, Serialize};

// Every struct defaults field-by-field: anything the provider omits comes back zero-valued.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherCondition {
    pub id: i32,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasurementSet {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: i32,
    pub humidity: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wind {
    pub speed: f64,
    pub deg: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudCover {
    pub all: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemInfo {
    #[serde(rename = "type")]
    pub kind: i32,
    pub id: i64,
    pub message: f64,
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
}

/// Current conditions for one location, shaped like the provider's `/weather` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentWeatherReport {
    pub coord: Coordinate,
    pub weather: Vec<WeatherCondition>,
    pub base: String,
    pub main: MeasurementSet,
    pub visibility: i32,
    pub wind: Wind,
    pub clouds: CloudCover,
    pub dt: i64,
    pub sys: SystemInfo,
    pub timezone: i32,
    pub id: i64,
    pub name: String,
    #[serde(deserialize_with = "deserialize_cod")]
    pub cod: i64,
}

/// The provider sends `cod` as a number on success and as a string on most errors.
fn deserialize_cod<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Cod {
        Number(i64),
        Text(String),
    }

    match Cod::deserialize(deserializer)? {
        Cod::Number(code) => Ok(code),
        Cod::Text(code) => code.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Error payload the provider returns alongside a non-success status.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpstreamErrorBody {
    pub message: String,
}
