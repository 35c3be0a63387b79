use chrono::{DateTime, Utc};
use prognose_core::{
    Location, PrognoseError, Resolution, TimeTable, resample_interpolated, time_grid,
};

use crate::core::Prognose;

/// Weather parameter catalog requested for every location.
///
/// Wind speed is requested at ground level and at 100 m; the clear-sky
/// flux comes in its upward- and downward-longwave variants.
pub const WEATHER_PARAMETERS: &[&str] = &[
    "clouds",
    "radiation",
    "temp",
    "winddeg",
    "windspeed",
    "windspeed_100m",
    "pressure",
    "humidity",
    "rain",
    "mxlD",
    "snowDepth",
    "clearSky_ulf",
    "clearSky_dlf",
    "ssrunoff",
];

impl Prognose {
    /// Fetch, normalize, and resample weather observations for one
    /// location.
    ///
    /// The provider's schema may carry provenance artifacts next to the
    /// requested parameters; those are metadata, not predictors, and are
    /// stripped by name before resampling.
    ///
    /// With a resolution, the series is interpolated linearly onto the
    /// grid, capped at one native weather interval's worth of synthesized
    /// points; longer gaps stay missing.
    ///
    /// # Errors
    /// Collaborator failures are surfaced unchanged.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "prognose::weather_data",
            skip(self, location),
            fields(location = %location),
        )
    )]
    pub async fn weather_data(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        location: &Location,
        resolution: Option<Resolution>,
    ) -> Result<TimeTable, PrognoseError> {
        let mut observations = self
            .weather
            .get_weather_data(
                location,
                WEATHER_PARAMETERS,
                start,
                end,
                &self.cfg.weather_source,
            )
            .await?;

        normalize_provenance_columns(&mut observations);

        match resolution {
            Some(res) if !observations.is_empty() => resample_interpolated(
                &observations,
                &time_grid(start, end, Some(res))?,
                synthesized_run_cap(self.cfg.weather_cadence, res),
            ),
            _ => Ok(observations),
        }
    }
}

/// Strip provider provenance columns. Order matters: `source_1` first
/// replaces any original `source`, then the surviving `source` column is
/// dropped. Only one of `input_city_1`/`input_city` is expected;
/// `input_city_1` takes precedence when both occur.
fn normalize_provenance_columns(table: &mut TimeTable) {
    table.rename_column("source_1", "source");
    table.drop_column("source");
    if !table.drop_column("input_city_1") {
        table.drop_column("input_city");
    }
}

/// Longest synthesized run the interpolation may bridge: one native
/// weather interval expressed in grid steps, minus the closing
/// observation.
///
/// At the default 3-hour cadence a 15-minute grid yields a cap of 11; the
/// cadence ratio, not that number, is the stable parameter.
fn synthesized_run_cap(native: Resolution, target: Resolution) -> usize {
    native.minutes().div_ceil(target.minutes()).saturating_sub(1) as usize
}
