use super::formulas;
use super::trace::{CalcStep, CalculationTrace};
use crate::error::EtoError;
use crate::units::c_to_k;
use crate::weather::WeatherInputs;
use serde_json::{Map, Value};
use tracing::debug;

/// Final ETo [mm day-1, one decimal] together with the full step trace.
#[derive(Debug, Clone, PartialEq)]
pub struct EtoResult {
    pub eto: f64,
    pub trace: CalculationTrace,
}

impl EtoResult {
    /// Observer export: every trace key plus the final value.
    pub fn to_map(&self) -> Map<String, Value> {
        self.trace.to_map()
    }
}

fn record(trace: &mut CalculationTrace, step: CalcStep, value: f64) -> f64 {
    debug!("{} = {}", step, value);
    trace.push(step, value);
    value
}

/// Run the 19-step Penman-Monteith chain over one day's inputs. Strictly
/// ordered: every step consumes only earlier trace entries and the inputs.
/// Any domain violation aborts the run; there is no partial result.
pub fn calculate(inputs: &WeatherInputs) -> Result<EtoResult, EtoError> {
    let mut trace = CalculationTrace::new();
    let t = &mut trace;

    // Step 1: mean daily temperature.
    let tmean = record(t, CalcStep::MeanDailyTemp, (inputs.temp_min + inputs.temp_max) / 2.0);

    // Step 2: mean daily solar radiation Rs, already in MJ m-2 day-1.
    let rs = record(t, CalcStep::MeanDailySolarRad, inputs.solar_radiation);

    // Step 3: wind speed at 2 m, already normalized at collection.
    let u2 = record(t, CalcStep::WindSpeed2m, inputs.wind_speed);

    // Step 4: slope of the saturation vapour pressure curve.
    let slope = record(t, CalcStep::SlopeSvp, formulas::delta_svp(tmean));

    // Steps 5-6: atmospheric pressure and psychrometric constant.
    let pressure = record(t, CalcStep::AtmPressure, formulas::atm_pressure(inputs.elevation));
    let psycho = record(t, CalcStep::PsychrometricConstant, formulas::psy_const(pressure));

    // Steps 7-9: delta, psi and temperature terms.
    let dt = record(t, CalcStep::DeltaTerm, formulas::delta_term(slope, psycho, u2));
    let pt = record(t, CalcStep::PsiTerm, formulas::psi_term(slope, psycho, u2));
    let tt = record(t, CalcStep::TemperatureTerm, formulas::temperature_term(tmean, u2));

    // Step 10: saturation vapour pressure at Tmax/Tmin and their mean.
    let svp_max = record(t, CalcStep::MaxSvp, formulas::svp_from_t(inputs.temp_max));
    let svp_min = record(t, CalcStep::MinSvp, formulas::svp_from_t(inputs.temp_min));
    let svp_mean = record(t, CalcStep::MeanSvp, (svp_max + svp_min) / 2.0);

    // Step 11: actual vapour pressure from the humidity extremes.
    let avp = record(
        t,
        CalcStep::ActualVaporPressure,
        (formulas::avp_from_rh(svp_max, inputs.humidity_min) + formulas::avp_from_rh(svp_min, inputs.humidity_max))
            / 2.0,
    );

    // Step 12: inverse relative earth-sun distance and solar declination.
    let dr = record(t, CalcStep::RelDistEarthSun, formulas::inv_rel_dist_earth_sun(inputs.day_of_year)?);
    let sd = record(t, CalcStep::SolarDeclination, formulas::sol_dec(inputs.day_of_year)?);

    // Step 13: latitude in radians.
    let phi = record(t, CalcStep::LatitudeRadians, formulas::latitude_rad(inputs.latitude)?);

    // Step 14: sunset hour angle.
    let sha = record(t, CalcStep::SunsetHourAngle, formulas::sunset_hour_angle(phi, sd)?);

    // Steps 15-16: extraterrestrial and clear-sky radiation.
    let ra = record(t, CalcStep::EtRad, formulas::et_rad(phi, sd, sha, dr)?);
    let rso = record(t, CalcStep::ClearSkySolarRad, formulas::cs_rad(inputs.elevation, ra));

    // Steps 17-18: net shortwave and net longwave radiation.
    let rns = record(t, CalcStep::NetSolarRad, formulas::net_in_sol_rad(rs, inputs.albedo));
    let rnl = record(
        t,
        CalcStep::NetLongWaveSolarRad,
        formulas::net_out_lw_rad(c_to_k(inputs.temp_min), c_to_k(inputs.temp_max), rs, rso, avp),
    );

    // Step 19: net radiation and its equivalent evaporation.
    let rn = record(t, CalcStep::NetRadiation, formulas::net_rad(rns, rnl));
    let rng = record(t, CalcStep::NetRadiationEvap, formulas::net_rad_evap(rn));

    // Final step: radiation term, wind term, ETo.
    let rad_term = record(t, CalcStep::RadiationTerm, formulas::radiation_term(dt, rng));
    let wind_term = record(t, CalcStep::WindTerm, formulas::wind_term(pt, tt, svp_mean, avp));
    let eto = record(t, CalcStep::Eto, formulas::eto(rad_term, wind_term));

    Ok(EtoResult { eto, trace })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::weather::WeatherInputs;

    fn reference_inputs() -> WeatherInputs {
        WeatherInputs::new(15.0, 25.0, 0.4, 0.8, 2.0, 18.0, 0.23, 180, 51.5, 50.0).unwrap()
    }

    #[test]
    fn full_trace_is_recorded_in_order() {
        let result = calculate(&reference_inputs()).unwrap();
        assert_eq!(result.trace.len(), CalcStep::ALL.len());
        let order: Vec<_> = result.trace.iter().map(|(s, _)| *s).collect();
        assert_eq!(order, CalcStep::ALL.to_vec());
    }

    #[test]
    fn no_partial_trace_leaks_on_domain_error() {
        let mut inputs = reference_inputs();
        inputs.day_of_year = 0;
        assert!(calculate(&inputs).is_err());
    }

    #[test]
    fn export_contains_final_value() {
        let result = calculate(&reference_inputs()).unwrap();
        let map = result.to_map();
        assert_eq!(map.len(), CalcStep::ALL.len());
        assert_eq!(map["calc_evapotranspiration_eto"], serde_json::json!(result.eto));
    }
}
