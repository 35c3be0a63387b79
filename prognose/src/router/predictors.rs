use futures::future::BoxFuture;
use prognose_core::{
    PredictorGroup, PredictorRequest, PrognoseError, TimeTable, grid_table, outer_join,
};

use crate::core::Prognose;

impl Prognose {
    /// Assemble the requested predictor groups onto the canonical grid.
    ///
    /// Validation happens before any fetch: requesting
    /// [`PredictorGroup::WeatherData`] without a location is a
    /// configuration error and no collaborator is touched. The requested
    /// group fetches then run concurrently (they are independent pure
    /// functions of the request) and are merged by outer join in the fixed
    /// group order — weather, market, load profiles — so output column
    /// order is deterministic regardless of completion order.
    ///
    /// A group whose source has no data contributes no columns; the result
    /// keeps the full requested index either way, so a zero-column table
    /// over the whole grid is the "no data available" outcome, not an
    /// error. Should two groups ever emit the same column name, the
    /// later-merged group's column wins (see
    /// [`prognose_core::outer_join`]).
    ///
    /// # Errors
    /// - `Config` when weather data is requested without a location.
    /// - `InvalidArg` when the window is inverted.
    /// - Collaborator failures are surfaced unchanged.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "prognose::predictors",
            skip(self, req),
            fields(start = %req.start(), end = %req.end(), groups = req.groups().len()),
        )
    )]
    pub async fn predictors(&self, req: &PredictorRequest) -> Result<TimeTable, PrognoseError> {
        if req.includes(PredictorGroup::WeatherData) && req.location().is_none() {
            return Err(PrognoseError::config(
                "a location is required when weather data predictors are requested",
            ));
        }

        let mut table = grid_table(req.start(), req.end(), req.resolution())?;

        let fetches: Vec<BoxFuture<'_, Result<TimeTable, PrognoseError>>> = PredictorGroup::ALL
            .iter()
            .filter(|group| req.includes(**group))
            .map(|group| self.fetch_group(*group, req))
            .collect();
        for fetched in futures::future::join_all(fetches).await {
            table = outer_join(&table, &fetched?)?;
        }
        Ok(table)
    }

    fn fetch_group<'a>(
        &'a self,
        group: PredictorGroup,
        req: &'a PredictorRequest,
    ) -> BoxFuture<'a, Result<TimeTable, PrognoseError>> {
        match group {
            PredictorGroup::WeatherData => Box::pin(async move {
                let location = req.location().ok_or_else(|| {
                    PrognoseError::config(
                        "a location is required when weather data predictors are requested",
                    )
                })?;
                self.weather_data(req.start(), req.end(), location, req.resolution())
                    .await
            }),
            PredictorGroup::MarketData => {
                Box::pin(self.market_data(req.start(), req.end(), req.resolution()))
            }
            PredictorGroup::LoadProfiles => {
                Box::pin(self.load_profiles(req.start(), req.end(), req.resolution()))
            }
        }
    }
}
