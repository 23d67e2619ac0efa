use serde::Deserialize;
use std::fs;

pub const CONFIG_FILE: &str = "./eto.toml";

/// Fixed site constants; the calculation never mutates these.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct Site {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

/// How the data source reports its raw readings. Defaults match an OWM-style
/// feed: wind in km/h at 10 m, humidity in percent, irradiance in W/m2.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SourceUnits {
    pub wind_height_m: f64,
    pub wind_in_kmh: bool,
    pub humidity_in_percent: bool,
    pub solar_in_watts: bool,
}

impl Default for SourceUnits {
    fn default() -> Self {
        Self { wind_height_m: 10.0, wind_in_kmh: true, humidity_in_percent: true, solar_in_watts: true }
    }
}

/// Smart-zone watering parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Zone {
    pub throughput_mm_h: f64,
    pub scale_percent: u8,
    pub max_minutes: u32,
}

impl Default for Zone {
    fn default() -> Self {
        Self { throughput_mm_h: 10.0, scale_percent: 100, max_minutes: 30 }
    }
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: Site,
    #[serde(default)]
    pub source: SourceUnits,
    #[serde(default)]
    pub zone: Zone,
}

impl Config {
    pub fn load(path: &str) -> Self {
        let config_content = fs::read_to_string(path).expect("Unable to read config file");
        let config: Config = toml::from_str(&config_content).expect("Unable to parse config");
        config
    }

    // test helper
    pub fn load_from_str(config_str: &str) -> Self {
        let config: Config = toml::from_str(config_str).expect("Unable to parse config");
        config
    }
}
