//! Per-step FAO-56 Penman-Monteith formulas ("Step by Step Calculation of
//! the Penman-Monteith Evapotranspiration", step/equation numbers noted).
//! All angles in radians.

use super::{SOLAR_CONSTANT, STEFAN_BOLTZMANN_CONSTANT};
use crate::error::EtoError;
use crate::units::c_to_k;
use std::f64::consts::PI;

const MIN_LAT_RAD: f64 = -PI / 2.0;
const MAX_LAT_RAD: f64 = PI / 2.0;

// Solar declination stays within +-23.5 degrees over the year.
const MIN_SOLDEC_RAD: f64 = -23.5 * PI / 180.0;
const MAX_SOLDEC_RAD: f64 = 23.5 * PI / 180.0;

const MIN_SHA_RAD: f64 = 0.0;
const MAX_SHA_RAD: f64 = PI;

pub fn check_day_of_year(doy: u16) -> Result<(), EtoError> {
    if (1..=366).contains(&doy) {
        return Ok(());
    }
    Err(EtoError::Domain { step: "day_of_year", value: doy as f64, min: 1.0, max: 366.0 })
}

fn check_latitude_rad(latitude: f64) -> Result<(), EtoError> {
    if (MIN_LAT_RAD..=MAX_LAT_RAD).contains(&latitude) {
        return Ok(());
    }
    Err(EtoError::Domain { step: "latitude_radians", value: latitude, min: MIN_LAT_RAD, max: MAX_LAT_RAD })
}

fn check_sol_dec_rad(sol_dec: f64) -> Result<(), EtoError> {
    if (MIN_SOLDEC_RAD..=MAX_SOLDEC_RAD).contains(&sol_dec) {
        return Ok(());
    }
    Err(EtoError::Domain { step: "solar_declination", value: sol_dec, min: MIN_SOLDEC_RAD, max: MAX_SOLDEC_RAD })
}

fn check_sunset_hour_angle_rad(sha: f64) -> Result<(), EtoError> {
    if (MIN_SHA_RAD..=MAX_SHA_RAD).contains(&sha) {
        return Ok(());
    }
    Err(EtoError::Domain { step: "sunset_hour_angle", value: sha, min: MIN_SHA_RAD, max: MAX_SHA_RAD })
}

/// Slope of the saturation vapour pressure curve at temperature `t` [deg C]
/// (step 4, eq. 9).
pub fn delta_svp(t: f64) -> f64 {
    let tmp = 4098.0 * (0.6108 * ((17.27 * t) / c_to_k(t)).exp());
    tmp / c_to_k(t).powi(2)
}

/// Atmospheric pressure [kPa] from elevation [m] (step 5, eq. 10).
pub fn atm_pressure(elevation: f64) -> f64 {
    ((293.0 - 0.0065 * elevation) / 293.0).powf(5.26) * 101.3
}

/// Psychrometric constant [kPa degC-1] (step 6, eq. 11).
pub fn psy_const(atmos_pres: f64) -> f64 {
    0.000665 * atmos_pres
}

/// Delta term DT, auxiliary for the radiation term (step 7, eq. 12).
pub fn delta_term(slope: f64, psycho: f64, u2: f64) -> f64 {
    slope / (slope + psycho * (1.0 + 0.34 * u2))
}

/// Psi term PT, auxiliary for the wind term (step 8, eq. 13).
pub fn psi_term(slope: f64, psycho: f64, u2: f64) -> f64 {
    psycho / (slope + psycho * (1.0 + 0.34 * u2))
}

/// Temperature term TT (step 9, eq. 14).
pub fn temperature_term(mean_temp: f64, u2: f64) -> f64 {
    (900.0 / (mean_temp + 273.0)) * u2
}

/// Saturation vapour pressure es [kPa] at temperature `t` [deg C]
/// (step 10, eq. 15-17).
pub fn svp_from_t(t: f64) -> f64 {
    0.6108 * ((17.27 * t) / c_to_k(t)).exp()
}

/// Actual vapour pressure from a saturation pressure and a relative humidity
/// fraction (step 11, eq. 19).
pub fn avp_from_rh(svp: f64, rh_fraction: f64) -> f64 {
    svp * rh_fraction
}

/// Inverse relative earth-sun distance dr (step 12, eq. 23).
pub fn inv_rel_dist_earth_sun(day_of_year: u16) -> Result<f64, EtoError> {
    check_day_of_year(day_of_year)?;
    Ok(1.0 + 0.033 * ((2.0 * PI / 365.0) * day_of_year as f64).cos())
}

/// Solar declination [radians] (step 12, eq. 24).
pub fn sol_dec(day_of_year: u16) -> Result<f64, EtoError> {
    check_day_of_year(day_of_year)?;
    Ok(0.409 * ((2.0 * PI / 365.0) * day_of_year as f64 - 1.39).sin())
}

/// Site latitude in radians (step 13, eq. 25).
pub fn latitude_rad(latitude_deg: f64) -> Result<f64, EtoError> {
    let phi = crate::units::deg2rad(latitude_deg);
    check_latitude_rad(phi)?;
    Ok(phi)
}

/// Sunset hour angle ws [radians] (step 14, eq. 26). The acos argument is
/// clamped to [-1, 1]: above 1 there is no sunset (24 h daylight), below -1
/// no sunrise.
pub fn sunset_hour_angle(latitude: f64, sol_dec: f64) -> Result<f64, EtoError> {
    check_latitude_rad(latitude)?;
    check_sol_dec_rad(sol_dec)?;
    let cos_sha = -latitude.tan() * sol_dec.tan();
    Ok(cos_sha.clamp(-1.0, 1.0).acos())
}

/// Daily extraterrestrial radiation Ra [MJ m-2 day-1] (step 15, eq. 27).
pub fn et_rad(latitude: f64, sol_dec: f64, sha: f64, ird: f64) -> Result<f64, EtoError> {
    check_latitude_rad(latitude)?;
    check_sol_dec_rad(sol_dec)?;
    check_sunset_hour_angle_rad(sha)?;

    let tmp1 = (24.0 * 60.0) / PI;
    let tmp2 = sha * latitude.sin() * sol_dec.sin();
    let tmp3 = latitude.cos() * sol_dec.cos() * sha.sin();
    Ok(tmp1 * SOLAR_CONSTANT * ird * (tmp2 + tmp3))
}

/// Clear sky radiation Rso [MJ m-2 day-1] (step 16, eq. 28).
pub fn cs_rad(elevation: f64, et_rad: f64) -> f64 {
    (0.00002 * elevation + 0.75) * et_rad
}

/// Net incoming shortwave radiation Rns [MJ m-2 day-1] (step 17, eq. 29).
pub fn net_in_sol_rad(sol_rad: f64, albedo: f64) -> f64 {
    (1.0 - albedo) * sol_rad
}

/// Net outgoing longwave radiation Rnl [MJ m-2 day-1] (step 18, eq. 30).
/// Stefan-Boltzmann corrected for humidity (actual vapour pressure) and
/// cloudiness (Rs/Rso); temperatures in Kelvin.
pub fn net_out_lw_rad(tmin_k: f64, tmax_k: f64, sol_rad: f64, cs_rad: f64, avp: f64) -> f64 {
    let tmp1 = STEFAN_BOLTZMANN_CONSTANT * ((tmax_k.powi(4) + tmin_k.powi(4)) / 2.0);
    let tmp2 = 0.34 - 0.14 * avp.sqrt();
    let tmp3 = 1.35 * (sol_rad / cs_rad) - 0.35;
    tmp1 * tmp2 * tmp3
}

/// Net radiation Rn = Rns - Rnl (step 19, eq. 31).
pub fn net_rad(net_solar: f64, lw_rad: f64) -> f64 {
    net_solar - lw_rad
}

/// Net radiation expressed as equivalent evaporation Rng [mm] (step 19, eq. 32).
pub fn net_rad_evap(net_rad: f64) -> f64 {
    net_rad * 0.408
}

/// Radiation term [mm day-1] (final step, eq. 33).
pub fn radiation_term(delta_term: f64, net_rad_evap: f64) -> f64 {
    delta_term * net_rad_evap
}

/// Wind term [mm day-1] (final step, eq. 34).
pub fn wind_term(psi_term: f64, temp_term: f64, mean_svp: f64, avp: f64) -> f64 {
    psi_term * temp_term * (mean_svp - avp)
}

/// Final ETo [mm day-1], rounded to one decimal (final step, eq. 35).
pub fn eto(rad_term: f64, wind_term: f64) -> f64 {
    round1(rad_term + wind_term)
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
