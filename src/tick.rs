use crate::config::Config;
use crate::error::EtoError;
use crate::eto::calculator::{self, EtoResult};
use crate::watering::{DurationCalculator, IrrigationDecision};
use crate::weather::{self, WeatherInputs, WeatherSource};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Everything one scheduling tick produced. Fresh per tick; the pipeline
/// keeps no state between runs.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    pub inputs: WeatherInputs,
    pub eto: EtoResult,
    pub decision: IrrigationDecision,
}

/// One run-to-completion tick: collect readings, normalize, run the ETo
/// chain, derive the watering decision. The external coordinator calls this
/// once per polling interval and applies its own retry policy based on
/// `EtoError::kind`.
pub async fn run_tick(source: &dyn WeatherSource, config: &Config) -> Result<TickOutcome, EtoError> {
    run_tick_at(source, config, Utc::now()).await
}

/// Same as `run_tick` with the timestamp snapshotted by the caller, so a tick
/// spanning midnight keeps one consistent day of year.
pub async fn run_tick_at(
    source: &dyn WeatherSource, config: &Config, now: DateTime<Utc>,
) -> Result<TickOutcome, EtoError> {
    let inputs = weather::collect_weather(source, &config.site, &config.source, now).await?;
    let rainfall = weather::collect_rainfall(source).await?;

    let eto = calculator::calculate(&inputs)?;

    let calc =
        DurationCalculator::smart_zone(config.zone.throughput_mm_h, config.zone.scale_percent, config.zone.max_minutes)?;
    let decision = calc.decide(Some(eto.eto), Some(rainfall))?;

    debug!("tick done: eto {} mm/day, runtime {} s", eto.eto, decision.clamped_runtime_seconds);
    Ok(TickOutcome { inputs, eto, decision })
}
