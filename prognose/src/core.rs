use std::sync::Arc;

use prognose_core::{
    PrognoseConfig, PrognoseError, Resolution, SqlStore, TimeSeriesStore, WeatherService,
};

/// Aggregator that assembles predictor groups from the wired collaborators.
pub struct Prognose {
    pub(crate) sql: Arc<dyn SqlStore>,
    pub(crate) tsdb: Arc<dyn TimeSeriesStore>,
    pub(crate) weather: Arc<dyn WeatherService>,
    pub(crate) cfg: PrognoseConfig,
}

impl std::fmt::Debug for Prognose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prognose").field("cfg", &self.cfg).finish_non_exhaustive()
    }
}

/// Builder for constructing a [`Prognose`] aggregator with custom
/// configuration.
pub struct PrognoseBuilder {
    sql: Option<Arc<dyn SqlStore>>,
    tsdb: Option<Arc<dyn TimeSeriesStore>>,
    weather: Option<Arc<dyn WeatherService>>,
    cfg: PrognoseConfig,
}

impl Default for PrognoseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PrognoseBuilder {
    /// Create a new builder with default configuration.
    ///
    /// All three collaborators must be wired before [`build`] succeeds.
    /// Defaults cover the weather source tag (`optimum`), its native
    /// 3-hour cadence, and a load-profile gap limit of 3.
    ///
    /// [`build`]: Self::build
    #[must_use]
    pub fn new() -> Self {
        Self {
            sql: None,
            tsdb: None,
            weather: None,
            cfg: PrognoseConfig::default(),
        }
    }

    /// Wire the relational store used for the gas-price series.
    #[must_use]
    pub fn with_sql_store(mut self, store: Arc<dyn SqlStore>) -> Self {
        self.sql = Some(store);
        self
    }

    /// Wire the time-series store used for electricity prices and load
    /// profiles.
    #[must_use]
    pub fn with_timeseries_store(mut self, store: Arc<dyn TimeSeriesStore>) -> Self {
        self.tsdb = Some(store);
        self
    }

    /// Wire the external weather provider.
    #[must_use]
    pub fn with_weather_service(mut self, service: Arc<dyn WeatherService>) -> Self {
        self.weather = Some(service);
        self
    }

    /// Override the source tag requested from the weather provider.
    #[must_use]
    pub fn weather_source(mut self, tag: impl Into<String>) -> Self {
        self.cfg.weather_source = tag.into();
        self
    }

    /// Declare the weather feed's native cadence.
    ///
    /// The interpolation cap used when resampling weather data is derived
    /// from the ratio of this cadence to the requested resolution, so a
    /// feed change is a configuration change rather than a new constant.
    #[must_use]
    pub const fn weather_cadence(mut self, cadence: Resolution) -> Self {
        self.cfg.weather_cadence = cadence;
        self
    }

    /// Override the maximum synthesized run when resampling load profiles.
    #[must_use]
    pub const fn load_profile_gap_limit(mut self, limit: usize) -> Self {
        self.cfg.load_profile_gap_limit = limit;
        self
    }

    /// Replace the whole configuration at once.
    #[must_use]
    pub fn config(mut self, cfg: PrognoseConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Build the [`Prognose`] aggregator.
    ///
    /// # Errors
    /// Returns `InvalidArg` when any of the three collaborators is missing.
    pub fn build(self) -> Result<Prognose, PrognoseError> {
        let Some(sql) = self.sql else {
            return Err(PrognoseError::invalid_arg(
                "no relational store wired; add one via with_sql_store(...)",
            ));
        };
        let Some(tsdb) = self.tsdb else {
            return Err(PrognoseError::invalid_arg(
                "no time-series store wired; add one via with_timeseries_store(...)",
            ));
        };
        let Some(weather) = self.weather else {
            return Err(PrognoseError::invalid_arg(
                "no weather service wired; add one via with_weather_service(...)",
            ));
        };
        Ok(Prognose {
            sql,
            tsdb,
            weather,
            cfg: self.cfg,
        })
    }
}

impl Prognose {
    /// Start building a new `Prognose` instance.
    ///
    /// Typical usage wires the three collaborators and tweaks the weather
    /// configuration, e.g.:
    ///
    /// ```rust,ignore
    /// let prognose = Prognose::builder()
    ///     .with_sql_store(sql)
    ///     .with_timeseries_store(tsdb)
    ///     .with_weather_service(weather)
    ///     .weather_cadence(Resolution::HOUR)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> PrognoseBuilder {
        PrognoseBuilder::new()
    }

    /// Current aggregator configuration.
    #[must_use]
    pub const fn config(&self) -> &PrognoseConfig {
        &self.cfg
    }
}
