use chrono::{DateTime, Utc};
use prognose_core::{
    LOAD_PROFILES_MEASUREMENT, PrognoseError, Resolution, TimeTable, resample_interpolated,
    time_grid,
};

use crate::core::Prognose;
use crate::router::util::query_time;

impl Prognose {
    /// Fetch the standard load profiles for the window.
    ///
    /// Standard load profiles are statistically typical consumption and
    /// production curves used as proxy predictors where individual metering
    /// data is unavailable. Every field under the profile prefix is
    /// selected; the measurement also carries a year tag which the regex
    /// select leaves out.
    ///
    /// The source cadence is coarser than typical target resolutions, so
    /// with a resolution the series is interpolated linearly onto the grid,
    /// capped at `load_profile_gap_limit` consecutive synthesized points.
    /// Points beyond the cap stay missing, so a genuine source outage is
    /// visible to downstream consumers instead of being smoothed over.
    ///
    /// # Errors
    /// Collaborator failures are surfaced unchanged.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "prognose::load_profiles", skip(self))
    )]
    pub async fn load_profiles(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        resolution: Option<Resolution>,
    ) -> Result<TimeTable, PrognoseError> {
        let query = format!(
            "SELECT /^{LOAD_PROFILES_MEASUREMENT}/ FROM \"realised\"..\"{LOAD_PROFILES_MEASUREMENT}\" \
             WHERE time >= '{}' AND time <= '{}'",
            query_time(start),
            query_time(end),
        );
        let profiles = self
            .tsdb
            .exec_influx_query(&query)
            .await?
            .remove(LOAD_PROFILES_MEASUREMENT)
            .unwrap_or_default();
        match resolution {
            Some(res) if !profiles.is_empty() => resample_interpolated(
                &profiles,
                &time_grid(start, end, Some(res))?,
                self.cfg.load_profile_gap_limit,
            ),
            _ => Ok(profiles),
        }
    }
}
