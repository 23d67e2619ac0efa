use crate::error::EtoError;

pub const K_TO_C_FACTOR: f64 = 273.15;
/// W/m2 * factor = MJ m-2 day-1
pub const W_TO_MJ_DAY_FACTOR: f64 = 0.0864;
pub const KMH_TO_MS_FACTOR: f64 = 1.0 / 3.6;
pub const WIND_REFERENCE_HEIGHT_M: f64 = 2.0;

// Below this height the log wind profile argument drops under 1 and the
// adjustment is meaningless.
const MIN_WIND_HEIGHT_M: f64 = 6.42 / 67.8;

fn check_finite(reading: &str, value: f64) -> Result<f64, EtoError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EtoError::InvalidReading { reading: reading.to_owned(), value })
    }
}

pub fn c_to_k(celsius: f64) -> f64 {
    celsius + K_TO_C_FACTOR
}

pub fn deg2rad(degrees: f64) -> f64 {
    degrees * (std::f64::consts::PI / 180.0)
}

/// Reduce a wind speed measured at `height` m above ground to the 2 m
/// reference (FAO-56 step 3, eq. 7). Readings already taken at 2 m pass
/// through unchanged.
pub fn wind_speed_2m(reading: &str, wind: f64, height: f64) -> Result<f64, EtoError> {
    let wind = check_finite(reading, wind)?;
    if height == WIND_REFERENCE_HEIGHT_M {
        return Ok(wind);
    }
    if !height.is_finite() || height <= MIN_WIND_HEIGHT_M {
        return Err(EtoError::Domain {
            step: "wind_measurement_height",
            value: height,
            min: MIN_WIND_HEIGHT_M,
            max: f64::INFINITY,
        });
    }
    Ok(wind * 4.87 / (67.8 * height - 5.42).ln())
}

pub fn kmh_to_ms(reading: &str, speed: f64) -> Result<f64, EtoError> {
    Ok(check_finite(reading, speed)? * KMH_TO_MS_FACTOR)
}

pub fn percent_to_fraction(reading: &str, percent: f64) -> Result<f64, EtoError> {
    Ok(check_finite(reading, percent)? / 100.0)
}

/// Gross irradiance in W/m2 to the daily energy total the radiation steps use.
pub fn watts_to_mj_day(reading: &str, watts: f64) -> Result<f64, EtoError> {
    Ok(check_finite(reading, watts)? * W_TO_MJ_DAY_FACTOR)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::EtoError;

    #[test]
    fn wind_height_adjustment() {
        let u2 = wind_speed_2m("wind", 2.0, 10.0).unwrap();
        assert!((u2 - 1.4959021503358882).abs() < 1e-12);
    }

    #[test]
    fn wind_at_reference_height_passes_through() {
        assert_eq!(wind_speed_2m("wind", 2.0, 2.0).unwrap(), 2.0);
    }

    #[test]
    fn wind_monotonic_in_measured_speed() {
        let mut prev = 0.0;
        for uh in [0.5, 1.0, 2.0, 4.0, 8.0] {
            let u2 = wind_speed_2m("wind", uh, 10.0).unwrap();
            assert!(u2 > prev, "u2 should grow with u_h: {} vs {}", u2, prev);
            prev = u2;
        }
    }

    #[test]
    fn wind_height_below_profile_limit_fails() {
        let err = wind_speed_2m("wind", 2.0, 0.05).unwrap_err();
        assert!(matches!(err, EtoError::Domain { step: "wind_measurement_height", .. }));
    }

    #[test]
    fn nan_reading_is_rejected() {
        let err = percent_to_fraction("humidity_min", f64::NAN).unwrap_err();
        assert!(matches!(err, EtoError::InvalidReading { .. }));
        assert!(wind_speed_2m("wind", f64::INFINITY, 10.0).is_err());
    }

    #[test]
    fn scalar_conversions() {
        assert_eq!(percent_to_fraction("humidity_max", 80.0).unwrap(), 0.8);
        assert!((watts_to_mj_day("solar_rad", 100.0).unwrap() - 8.64).abs() < 1e-12);
        assert!((kmh_to_ms("wind", 36.0).unwrap() - 10.0).abs() < 1e-12);
        assert_eq!(c_to_k(20.0), 293.15);
        assert!((deg2rad(180.0) - std::f64::consts::PI).abs() < 1e-15);
    }
}
