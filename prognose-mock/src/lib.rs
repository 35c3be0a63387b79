//! Deterministic mock collaborators for tests and examples.
//!
//! Each mock answers every query with a preconfigured table (or a forced
//! failure) regardless of the query text, and counts invocations so tests
//! can assert that validation failures short-circuit before any fetch
//! happens. The weather mock additionally records the arguments of its
//! most recent call.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use prognose_core::{
    Location, PrognoseError, SqlStore, TimeSeriesStore, TimeTable, WeatherService,
};

pub mod fixtures;

/// Relational store mock; answers every query with one configured table.
pub struct MockSqlStore {
    result: Result<TimeTable, String>,
    calls: AtomicUsize,
}

impl MockSqlStore {
    /// Always answer with `table`.
    #[must_use]
    pub fn returning(table: TimeTable) -> Self {
        Self {
            result: Ok(table),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always answer with an empty result set.
    #[must_use]
    pub fn empty() -> Self {
        Self::returning(TimeTable::default())
    }

    /// Always fail with a collaborator error carrying `msg`.
    #[must_use]
    pub fn failing(msg: impl Into<String>) -> Self {
        Self {
            result: Err(msg.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of queries executed so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SqlStore for MockSqlStore {
    async fn exec_sql_query(&self, _query: &str) -> Result<TimeTable, PrognoseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.result {
            Ok(table) => Ok(table.clone()),
            Err(msg) => Err(PrognoseError::source("mock-sql", msg.clone())),
        }
    }
}

/// Time-series store mock keyed by measurement name.
///
/// Every query receives the full configured measurement map; callers pick
/// out the measurement they asked for, exactly as with the real store.
pub struct MockTimeSeriesStore {
    measurements: HashMap<String, TimeTable>,
    fail: Option<String>,
    calls: AtomicUsize,
}

impl MockTimeSeriesStore {
    /// Start with no measurements: every query answers an empty map.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            measurements: HashMap::new(),
            fail: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Add a measurement table answered on every query.
    #[must_use]
    pub fn with_measurement(mut self, name: impl Into<String>, table: TimeTable) -> Self {
        self.measurements.insert(name.into(), table);
        self
    }

    /// Always fail with a collaborator error carrying `msg`.
    #[must_use]
    pub fn failing(msg: impl Into<String>) -> Self {
        Self {
            measurements: HashMap::new(),
            fail: Some(msg.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of queries executed so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TimeSeriesStore for MockTimeSeriesStore {
    async fn exec_influx_query(
        &self,
        _query: &str,
    ) -> Result<HashMap<String, TimeTable>, PrognoseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(msg) = &self.fail {
            return Err(PrognoseError::source("mock-influx", msg.clone()));
        }
        Ok(self.measurements.clone())
    }
}

/// Arguments captured from the most recent `get_weather_data` call.
#[derive(Debug, Clone)]
pub struct WeatherCall {
    /// Requested location.
    pub location: Location,
    /// Requested parameter names.
    pub parameters: Vec<String>,
    /// Window start.
    pub start: DateTime<Utc>,
    /// Window end.
    pub end: DateTime<Utc>,
    /// Requested data source tag.
    pub source: String,
}

/// Weather provider mock; records the most recent request it served.
pub struct MockWeatherService {
    result: Result<TimeTable, String>,
    calls: AtomicUsize,
    last_call: Mutex<Option<WeatherCall>>,
}

impl MockWeatherService {
    /// Always answer with `table`.
    #[must_use]
    pub fn returning(table: TimeTable) -> Self {
        Self {
            result: Ok(table),
            calls: AtomicUsize::new(0),
            last_call: Mutex::new(None),
        }
    }

    /// Always answer with an empty result set.
    #[must_use]
    pub fn empty() -> Self {
        Self::returning(TimeTable::default())
    }

    /// Always fail with a collaborator error carrying `msg`.
    #[must_use]
    pub fn failing(msg: impl Into<String>) -> Self {
        Self {
            result: Err(msg.into()),
            calls: AtomicUsize::new(0),
            last_call: Mutex::new(None),
        }
    }

    /// Number of fetches served so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Arguments of the most recent fetch, if any.
    ///
    /// # Panics
    /// Panics when the internal lock is poisoned, which only happens after
    /// a panic on another test thread.
    #[must_use]
    pub fn last_call(&self) -> Option<WeatherCall> {
        self.last_call.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl WeatherService for MockWeatherService {
    async fn get_weather_data(
        &self,
        location: &Location,
        parameters: &[&str],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        source: &str,
    ) -> Result<TimeTable, PrognoseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_call.lock().expect("lock poisoned") = Some(WeatherCall {
            location: location.clone(),
            parameters: parameters.iter().map(ToString::to_string).collect(),
            start,
            end,
            source: source.to_string(),
        });
        match &self.result {
            Ok(table) => Ok(table.clone()),
            Err(msg) => Err(PrognoseError::source("mock-weather", msg.clone())),
        }
    }
}
