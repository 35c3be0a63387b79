//! Request vocabulary and configuration for predictor assembly.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::PrognoseError;

/// The three fixed categories of predictor series.
///
/// Declaration order is load-bearing: it is the merge order of the
/// aggregation and therefore the column order of the assembled table, so
/// [`PredictorGroup::ALL`] is an ordered list rather than a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictorGroup {
    /// Weather observations for one location.
    WeatherData,
    /// Electricity- and gas-price series.
    MarketData,
    /// Standard load profiles (typical consumption/production curves).
    LoadProfiles,
}

impl PredictorGroup {
    /// All groups in the fixed merge order.
    pub const ALL: [Self; 3] = [Self::WeatherData, Self::MarketData, Self::LoadProfiles];

    /// Canonical wire identifier for this group.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WeatherData => "weather_data",
            Self::MarketData => "market_data",
            Self::LoadProfiles => "load_profiles",
        }
    }
}

impl fmt::Display for PredictorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PredictorGroup {
    type Err = PrognoseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weather_data" => Ok(Self::WeatherData),
            "market_data" => Ok(Self::MarketData),
            "load_profiles" => Ok(Self::LoadProfiles),
            other => Err(PrognoseError::invalid_arg(format!(
                "unknown predictor group: {other:?}"
            ))),
        }
    }
}

/// Fixed interval between successive points on the canonical output grid.
///
/// Stored as a whole number of minutes; none of the source systems publish
/// below minute cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Resolution {
    minutes: u32,
}

impl Resolution {
    /// Fifteen-minute grid, the common settlement cadence.
    pub const QUARTER_HOUR: Self = Self { minutes: 15 };
    /// One-hour grid.
    pub const HOUR: Self = Self { minutes: 60 };
    /// Three-hour grid, the native cadence of the default weather feed.
    pub const THREE_HOURS: Self = Self { minutes: 180 };
    /// One-day grid.
    pub const DAY: Self = Self { minutes: 1_440 };

    /// Build a resolution from a whole number of minutes.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `minutes` is zero.
    pub fn from_minutes(minutes: u32) -> Result<Self, PrognoseError> {
        if minutes == 0 {
            return Err(PrognoseError::invalid_arg(
                "resolution must be a positive number of minutes",
            ));
        }
        Ok(Self { minutes })
    }

    /// Grid step in minutes.
    #[must_use]
    pub const fn minutes(self) -> u32 {
        self.minutes
    }

    /// Grid step in seconds.
    #[must_use]
    pub const fn seconds(self) -> i64 {
        self.minutes as i64 * 60
    }

    /// Grid step as a chrono duration.
    #[must_use]
    pub fn duration(self) -> Duration {
        Duration::minutes(i64::from(self.minutes))
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.minutes % 1_440 == 0 {
            write!(f, "{}D", self.minutes / 1_440)
        } else if self.minutes % 60 == 0 {
            write!(f, "{}H", self.minutes / 60)
        } else {
            write!(f, "{}T", self.minutes)
        }
    }
}

impl FromStr for Resolution {
    type Err = PrognoseError;

    /// Parses pandas-style frequency strings: `"15T"`/`"15min"`, `"1H"`,
    /// `"3H"`, `"1D"`. A bare unit means a count of one (`"H"` == `"1H"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || PrognoseError::invalid_arg(format!("unrecognized resolution: {s:?}"));
        let t = s.trim();
        let digits = t.len() - t.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        let (count, unit) = t.split_at(digits);
        let count: u32 = if count.is_empty() {
            1
        } else {
            count.parse().map_err(|_| bad())?
        };
        let unit_minutes: u32 = match unit {
            "T" | "min" => 1,
            "H" | "h" => 60,
            "D" | "d" => 1_440,
            _ => return Err(bad()),
        };
        let minutes = count.checked_mul(unit_minutes).ok_or_else(bad)?;
        Self::from_minutes(minutes)
    }
}

impl TryFrom<String> for Resolution {
    type Error = PrognoseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Resolution> for String {
    fn from(r: Resolution) -> Self {
        r.to_string()
    }
}

/// Geographic reference for weather data: a named place or explicit
/// coordinates, whichever the weather provider resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Location {
    /// A place name resolvable by the weather provider.
    Name(String),
    /// A latitude/longitude pair in degrees.
    Coordinates {
        /// Latitude in degrees, north positive.
        lat: f64,
        /// Longitude in degrees, east positive.
        lon: f64,
    },
}

impl Location {
    /// Build a named location.
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Build a coordinate location.
    #[must_use]
    pub const fn coordinates(lat: f64, lon: f64) -> Self {
        Self::Coordinates { lat, lon }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Coordinates { lat, lon } => write!(f, "{lat:.4},{lon:.4}"),
        }
    }
}

impl From<&str> for Location {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<(f64, f64)> for Location {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::Coordinates { lat, lon }
    }
}

/// Immutable, call-scoped description of one predictor assembly.
///
/// Construct through [`PredictorRequest::builder`]; requests validate on
/// construction (window ordering, group identifiers) so an invalid request
/// never reaches a collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictorRequest {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    resolution: Option<Resolution>,
    location: Option<Location>,
    groups: Vec<PredictorGroup>,
}

impl PredictorRequest {
    /// Start building a request for the inclusive window `[start, end]`.
    #[must_use]
    pub const fn builder(start: DateTime<Utc>, end: DateTime<Utc>) -> PredictorRequestBuilder {
        PredictorRequestBuilder {
            start,
            end,
            resolution: None,
            location: None,
            groups: None,
        }
    }

    /// Window start (inclusive).
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Window end (inclusive).
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Requested grid resolution, if any.
    #[must_use]
    pub const fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    /// Location for weather data, if any.
    #[must_use]
    pub const fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Requested groups, deduplicated, in request order.
    #[must_use]
    pub fn groups(&self) -> &[PredictorGroup] {
        &self.groups
    }

    /// Whether the request includes the given group.
    #[must_use]
    pub fn includes(&self, group: PredictorGroup) -> bool {
        self.groups.contains(&group)
    }
}

enum GroupSelection {
    Typed(Vec<PredictorGroup>),
    Named(Vec<String>),
}

/// Builder for [`PredictorRequest`].
pub struct PredictorRequestBuilder {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    resolution: Option<Resolution>,
    location: Option<Location>,
    groups: Option<GroupSelection>,
}

impl PredictorRequestBuilder {
    /// Set the target grid resolution. Without one, no resampling happens
    /// and the assembled index keeps source-native density.
    #[must_use]
    pub const fn resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = Some(resolution);
        self
    }

    /// Set the location used for weather data.
    #[must_use]
    pub fn location(mut self, location: impl Into<Location>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Select the predictor groups to assemble. Defaults to all three.
    #[must_use]
    pub fn groups(mut self, groups: impl IntoIterator<Item = PredictorGroup>) -> Self {
        self.groups = Some(GroupSelection::Typed(groups.into_iter().collect()));
        self
    }

    /// Select groups by wire identifier (`"market_data"`, `"weather_data"`,
    /// `"load_profiles"`). Unrecognized identifiers fail at [`build`].
    ///
    /// [`build`]: Self::build
    #[must_use]
    pub fn group_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = Some(GroupSelection::Named(
            names.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Build the request.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the window is inverted or a group
    /// identifier does not parse. The weather-location precondition is
    /// checked at assembly time, before any fetch.
    pub fn build(self) -> Result<PredictorRequest, PrognoseError> {
        if self.start > self.end {
            return Err(PrognoseError::invalid_arg(format!(
                "window start {} is after window end {}",
                self.start, self.end
            )));
        }
        let groups = match self.groups {
            None => PredictorGroup::ALL.to_vec(),
            Some(GroupSelection::Typed(groups)) => groups,
            Some(GroupSelection::Named(names)) => names
                .iter()
                .map(|name| name.parse())
                .collect::<Result<Vec<_>, _>>()?,
        };
        let mut deduped = Vec::with_capacity(groups.len());
        for group in groups {
            if !deduped.contains(&group) {
                deduped.push(group);
            }
        }
        Ok(PredictorRequest {
            start: self.start,
            end: self.end,
            resolution: self.resolution,
            location: self.location,
            groups: deduped,
        })
    }
}

/// Global configuration for the `Prognose` aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrognoseConfig {
    /// Source tag passed to the weather provider on every fetch.
    pub weather_source: String,
    /// Native cadence of the weather feed.
    ///
    /// The interpolation cap used when resampling weather data is derived
    /// from the ratio of this cadence to the requested resolution, so it
    /// bridges exactly one native interval and never a multi-interval
    /// outage. At the default 3-hour cadence and a 15-minute grid the cap
    /// works out to 11 synthesized points.
    pub weather_cadence: Resolution,
    /// Maximum run of synthesized points when resampling load profiles.
    pub load_profile_gap_limit: usize,
}

impl Default for PrognoseConfig {
    fn default() -> Self {
        Self {
            weather_source: "optimum".to_string(),
            weather_cadence: Resolution::THREE_HOURS,
            load_profile_gap_limit: 3,
        }
    }
}
