use crate::config::{Site, SourceUnits};
use crate::error::EtoError;
use crate::units;
use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use tracing::debug;

// Reading names the data source is asked for, matching the configured entity
// bindings upstream.
pub const READING_TEMP_MIN: &str = "temp_min";
pub const READING_TEMP_MAX: &str = "temp_max";
pub const READING_HUMIDITY_MIN: &str = "humidity_min";
pub const READING_HUMIDITY_MAX: &str = "humidity_max";
pub const READING_WIND: &str = "wind";
pub const READING_SOLAR_RAD: &str = "solar_rad";
pub const READING_ALBEDO: &str = "albedo";
pub const READING_RAIN: &str = "rain";

/// External data source: supplies named numeric readings on demand. A reading
/// that is not yet produced must surface as `EtoError::UnavailableInput` so
/// the scheduler retries instead of treating it as a configuration bug.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn reading(&self, name: &str) -> Result<f64, EtoError>;
}

/// One day's worth of normalized weather observations plus the site
/// constants, immutable per calculation run. Construction rejects non-finite
/// or out-of-range fields; there are no defaults for missing readings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeatherInputs {
    /// deg C
    pub temp_min: f64,
    /// deg C
    pub temp_max: f64,
    /// fraction 0-1
    pub humidity_min: f64,
    /// fraction 0-1
    pub humidity_max: f64,
    /// m/s at the 2 m reference height
    pub wind_speed: f64,
    /// MJ m-2 day-1
    pub solar_radiation: f64,
    /// fraction 0-1
    pub albedo: f64,
    /// 1-366
    pub day_of_year: u16,
    /// degrees, -90..90
    pub latitude: f64,
    /// meters above sea level
    pub elevation: f64,
}

impl WeatherInputs {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        temp_min: f64, temp_max: f64, humidity_min: f64, humidity_max: f64, wind_speed: f64, solar_radiation: f64,
        albedo: f64, day_of_year: u16, latitude: f64, elevation: f64,
    ) -> Result<Self, EtoError> {
        for (name, value) in [
            (READING_TEMP_MIN, temp_min),
            (READING_TEMP_MAX, temp_max),
            (READING_HUMIDITY_MIN, humidity_min),
            (READING_HUMIDITY_MAX, humidity_max),
            (READING_WIND, wind_speed),
            (READING_SOLAR_RAD, solar_radiation),
            (READING_ALBEDO, albedo),
            ("latitude", latitude),
            ("elevation", elevation),
        ] {
            if !value.is_finite() {
                return Err(EtoError::InvalidReading { reading: name.to_owned(), value });
            }
        }
        for (step, value) in [
            ("humidity_min", humidity_min),
            ("humidity_max", humidity_max),
            ("albedo", albedo),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(EtoError::Domain { step, value, min: 0.0, max: 1.0 });
            }
        }
        if wind_speed <= 0.0 {
            return Err(EtoError::Domain { step: "wind_speed", value: wind_speed, min: 0.0, max: f64::INFINITY });
        }
        if solar_radiation < 0.0 {
            return Err(EtoError::Domain {
                step: "solar_radiation",
                value: solar_radiation,
                min: 0.0,
                max: f64::INFINITY,
            });
        }
        Ok(Self {
            temp_min,
            temp_max,
            humidity_min,
            humidity_max,
            wind_speed,
            solar_radiation,
            albedo,
            day_of_year,
            latitude,
            elevation,
        })
    }
}

/// Day of year (1-366) from a UTC timestamp.
pub fn day_of_year(now: DateTime<Utc>) -> u16 {
    now.ordinal() as u16
}

/// Pull every weather reading from the source, convert to calculation units
/// per the declared source units, and stamp the site constants plus day of
/// year. Snapshot semantics: all readings for one tick come from this single
/// pass.
pub async fn collect_weather(
    source: &dyn WeatherSource, site: &Site, source_units: &SourceUnits, now: DateTime<Utc>,
) -> Result<WeatherInputs, EtoError> {
    let temp_min = source.reading(READING_TEMP_MIN).await?;
    let temp_max = source.reading(READING_TEMP_MAX).await?;

    let mut humidity_min = source.reading(READING_HUMIDITY_MIN).await?;
    let mut humidity_max = source.reading(READING_HUMIDITY_MAX).await?;
    if source_units.humidity_in_percent {
        humidity_min = units::percent_to_fraction(READING_HUMIDITY_MIN, humidity_min)?;
        humidity_max = units::percent_to_fraction(READING_HUMIDITY_MAX, humidity_max)?;
    }

    let mut wind = source.reading(READING_WIND).await?;
    if source_units.wind_in_kmh {
        wind = units::kmh_to_ms(READING_WIND, wind)?;
    }
    let wind = units::wind_speed_2m(READING_WIND, wind, source_units.wind_height_m)?;

    let mut solar_rad = source.reading(READING_SOLAR_RAD).await?;
    if source_units.solar_in_watts {
        solar_rad = units::watts_to_mj_day(READING_SOLAR_RAD, solar_rad)?;
    }

    let albedo = source.reading(READING_ALBEDO).await?;

    let inputs = WeatherInputs::new(
        temp_min,
        temp_max,
        humidity_min,
        humidity_max,
        wind,
        solar_rad,
        albedo,
        day_of_year(now),
        site.latitude,
        site.elevation,
    )?;
    debug!("collected weather inputs: {:?}", inputs);
    Ok(inputs)
}

/// Rainfall [mm] for the duration calculation; same availability rules as the
/// weather readings.
pub async fn collect_rainfall(source: &dyn WeatherSource) -> Result<f64, EtoError> {
    let rain = source.reading(READING_RAIN).await?;
    if !rain.is_finite() {
        return Err(EtoError::InvalidReading { reading: READING_RAIN.to_owned(), value: rain });
    }
    Ok(rain)
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    fn valid_inputs() -> Result<WeatherInputs, EtoError> {
        WeatherInputs::new(15.0, 25.0, 0.4, 0.8, 2.0, 18.0, 0.23, 180, 51.5, 50.0)
    }

    #[test]
    fn construction_accepts_valid_inputs() {
        let inputs = valid_inputs().unwrap();
        assert_eq!(inputs.day_of_year, 180);
        assert_eq!(inputs.wind_speed, 2.0);
    }

    #[test]
    fn construction_rejects_nan() {
        let err = WeatherInputs::new(f64::NAN, 25.0, 0.4, 0.8, 2.0, 18.0, 0.23, 180, 51.5, 50.0).unwrap_err();
        assert!(matches!(err, EtoError::InvalidReading { .. }));
    }

    #[test]
    fn construction_rejects_percent_humidity() {
        // A raw 40 % that skipped normalization must not slip through.
        let err = WeatherInputs::new(15.0, 25.0, 40.0, 0.8, 2.0, 18.0, 0.23, 180, 51.5, 50.0).unwrap_err();
        assert!(matches!(err, EtoError::Domain { step: "humidity_min", .. }));
    }

    #[test]
    fn construction_rejects_calm_wind() {
        let err = WeatherInputs::new(15.0, 25.0, 0.4, 0.8, 0.0, 18.0, 0.23, 180, 51.5, 50.0).unwrap_err();
        assert!(matches!(err, EtoError::Domain { step: "wind_speed", .. }));
    }

    #[test]
    fn doy_from_utc_ordinal() {
        let midsummer = Utc.with_ymd_and_hms(2024, 6, 28, 6, 0, 0).unwrap();
        assert_eq!(day_of_year(midsummer), 180);
        let leap_year_end = Utc.with_ymd_and_hms(2024, 12, 31, 23, 0, 0).unwrap();
        assert_eq!(day_of_year(leap_year_end), 366);
    }
}
