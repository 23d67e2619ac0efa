use serde_json::{Map, Number, Value};
use std::fmt;

/// Identifier of one computed step of the Penman-Monteith chain. Key strings
/// double as observer attribute names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcStep {
    MeanDailyTemp,
    MeanDailySolarRad,
    WindSpeed2m,
    SlopeSvp,
    AtmPressure,
    PsychrometricConstant,
    DeltaTerm,
    PsiTerm,
    TemperatureTerm,
    MaxSvp,
    MinSvp,
    MeanSvp,
    ActualVaporPressure,
    RelDistEarthSun,
    SolarDeclination,
    LatitudeRadians,
    SunsetHourAngle,
    EtRad,
    ClearSkySolarRad,
    NetSolarRad,
    NetLongWaveSolarRad,
    NetRadiation,
    NetRadiationEvap,
    RadiationTerm,
    WindTerm,
    Eto,
}

impl CalcStep {
    pub const ALL: [CalcStep; 26] = [
        CalcStep::MeanDailyTemp,
        CalcStep::MeanDailySolarRad,
        CalcStep::WindSpeed2m,
        CalcStep::SlopeSvp,
        CalcStep::AtmPressure,
        CalcStep::PsychrometricConstant,
        CalcStep::DeltaTerm,
        CalcStep::PsiTerm,
        CalcStep::TemperatureTerm,
        CalcStep::MaxSvp,
        CalcStep::MinSvp,
        CalcStep::MeanSvp,
        CalcStep::ActualVaporPressure,
        CalcStep::RelDistEarthSun,
        CalcStep::SolarDeclination,
        CalcStep::LatitudeRadians,
        CalcStep::SunsetHourAngle,
        CalcStep::EtRad,
        CalcStep::ClearSkySolarRad,
        CalcStep::NetSolarRad,
        CalcStep::NetLongWaveSolarRad,
        CalcStep::NetRadiation,
        CalcStep::NetRadiationEvap,
        CalcStep::RadiationTerm,
        CalcStep::WindTerm,
        CalcStep::Eto,
    ];

    pub fn key(self) -> &'static str {
        match self {
            CalcStep::MeanDailyTemp => "calc_mean_daily_temp_tmean",
            CalcStep::MeanDailySolarRad => "calc_mean_daily_solar_rad_rs",
            CalcStep::WindSpeed2m => "calc_wind_speed_u2",
            CalcStep::SlopeSvp => "calc_slope_delta",
            CalcStep::AtmPressure => "calc_atm_pressure_p",
            CalcStep::PsychrometricConstant => "calc_psychrometric_constant_gamma",
            CalcStep::DeltaTerm => "calc_delta_term_dt",
            CalcStep::PsiTerm => "calc_psi_term_pt",
            CalcStep::TemperatureTerm => "calc_temperature_term_tt",
            CalcStep::MaxSvp => "calc_max_saturation_vapor_pressure_etmax",
            CalcStep::MinSvp => "calc_min_saturation_vapor_pressure_etmin",
            CalcStep::MeanSvp => "calc_mean_saturation_vapor_pressure_es",
            CalcStep::ActualVaporPressure => "calc_actual_vapor_pressure_ea",
            CalcStep::RelDistEarthSun => "calc_relative_distance_earth_sun_dr",
            CalcStep::SolarDeclination => "calc_solar_declination_sd",
            CalcStep::LatitudeRadians => "calc_latitude_radians_phi",
            CalcStep::SunsetHourAngle => "calc_sunset_hour_angle_ws",
            CalcStep::EtRad => "calc_et_rad_ra",
            CalcStep::ClearSkySolarRad => "calc_clear_sky_solar_rad_rso",
            CalcStep::NetSolarRad => "calc_net_solar_rad_rns",
            CalcStep::NetLongWaveSolarRad => "calc_net_long_wave_solar_rad_rnl",
            CalcStep::NetRadiation => "calc_net_radiation_rn",
            CalcStep::NetRadiationEvap => "calc_net_radiation_eto_rng",
            CalcStep::RadiationTerm => "calc_radiation_term_etrad",
            CalcStep::WindTerm => "calc_wind_term_etwind",
            CalcStep::Eto => "calc_evapotranspiration_eto",
        }
    }
}

impl fmt::Display for CalcStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Ordered record of every intermediate value of one calculation run. Built
/// incrementally, owned by the invocation, discarded with the result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculationTrace {
    entries: Vec<(CalcStep, f64)>,
}

impl CalculationTrace {
    pub fn new() -> Self {
        Self { entries: Vec::with_capacity(CalcStep::ALL.len()) }
    }

    pub fn push(&mut self, step: CalcStep, value: f64) {
        self.entries.push((step, value));
    }

    pub fn get(&self, step: CalcStep) -> Option<f64> {
        self.entries.iter().find(|(s, _)| *s == step).map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(CalcStep, f64)> {
        self.entries.iter()
    }

    /// Export for observer attributes, step key to value.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::with_capacity(self.entries.len());
        for (step, value) in &self.entries {
            let num = Number::from_f64(*value).map(Value::Number).unwrap_or(Value::Null);
            map.insert(step.key().to_owned(), num);
        }
        map
    }
}
