use std::{
    fmt,
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
};

use chrono::{DateTime, Utc};
use prometheus::{core::Collector, GaugeVec, Opts, Registry};
use snafu::ResultExt;

use crate::{error, Error};

pub const GENRE_PLAYS_METRIC_NAME: &str = "spotify_genre_plays_total";
pub const GENRE_PLAYS_METRIC_HELP: &str = "Number of times a genre appears in listening history";
pub const GENRE_LABEL: &str = "genre";

/// Play counts partitioned by the `genre` label.
///
/// Cloning is cheap, every clone shares the same series. Values are gauges:
/// they can be overwritten and moved in both directions. Series are never
/// removed once created.
#[derive(Clone)]
pub struct GenrePlayGauge {
    gauge: GaugeVec,

    // Unix seconds of the latest mutation, `0` until the first one
    last_updated: Arc<AtomicI64>,
}

impl GenrePlayGauge {
    /// # Errors
    ///
    /// Returns an error if the metric descriptor is rejected.
    pub fn new() -> Result<Self, Error> {
        let gauge =
            GaugeVec::new(Opts::new(GENRE_PLAYS_METRIC_NAME, GENRE_PLAYS_METRIC_HELP), &[
                GENRE_LABEL,
            ])
            .context(error::CreateMetricSnafu { name: GENRE_PLAYS_METRIC_NAME })?;

        Ok(Self { gauge, last_updated: Arc::new(AtomicI64::new(0)) })
    }

    /// Add the gauge to `registry`.
    ///
    /// # Errors
    ///
    /// Returns an error if a collector with the same name is already
    /// registered in `registry`.
    pub fn register(&self, registry: &Registry) -> Result<(), Error> {
        registry
            .register(Box::new(self.gauge.clone()))
            .context(error::RegisterMetricSnafu { name: GENRE_PLAYS_METRIC_NAME })
    }

    pub fn set(&self, genre: &str, value: f64) {
        self.gauge.with_label_values(&[genre]).set(value);
        self.touch();
    }

    pub fn increment(&self, genre: &str, delta: f64) {
        self.gauge.with_label_values(&[genre]).add(delta);
        self.touch();
    }

    pub fn decrement(&self, genre: &str, delta: f64) {
        self.gauge.with_label_values(&[genre]).sub(delta);
        self.touch();
    }

    /// Current value of `genre`, `None` if the series does not exist.
    ///
    /// Unlike the mutators this never creates a series.
    #[must_use]
    pub fn get(&self, genre: &str) -> Option<f64> {
        self.snapshot().into_iter().find_map(|(key, value)| (key == genre).then_some(value))
    }

    /// Every `(genre, value)` pair currently present.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(String, f64)> {
        self.gauge
            .collect()
            .iter()
            .flat_map(|family| family.get_metric())
            .filter_map(|metric| {
                let genre = metric
                    .get_label()
                    .iter()
                    .find(|label| label.get_name() == GENRE_LABEL)?
                    .get_value()
                    .to_string();
                Some((genre, metric.get_gauge().get_value()))
            })
            .collect()
    }

    #[must_use]
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        match self.last_updated.load(Ordering::Acquire) {
            0 => None,
            secs => DateTime::from_timestamp(secs, 0),
        }
    }

    fn touch(&self) { self.last_updated.store(Utc::now().timestamp(), Ordering::Release); }
}

impl fmt::Debug for GenrePlayGauge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenrePlayGauge")
            .field("name", &GENRE_PLAYS_METRIC_NAME)
            .field("last_updated", &self.last_updated())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use prometheus::Registry;

    use super::GenrePlayGauge;
    use crate::{DefaultMetrics, Error, Metrics};

    #[test]
    fn test_increment_starts_from_zero() {
        let gauge = GenrePlayGauge::new().unwrap();
        assert_eq!(gauge.get("rock"), None);

        gauge.increment("rock", 3.0);
        assert_eq!(gauge.get("rock"), Some(3.0));

        gauge.increment("rock", -1.5);
        assert_eq!(gauge.get("rock"), Some(1.5));
    }

    #[test]
    fn test_set_overwrites() {
        let gauge = GenrePlayGauge::new().unwrap();

        gauge.set("jazz", 42.0);
        gauge.set("jazz", -7.0);
        assert_eq!(gauge.get("jazz"), Some(-7.0));

        gauge.decrement("jazz", 3.0);
        assert_eq!(gauge.get("jazz"), Some(-10.0));
    }

    #[test]
    fn test_get_does_not_create_series() {
        let gauge = GenrePlayGauge::new().unwrap();
        gauge.set("pop", 1.0);

        assert_eq!(gauge.get("metal"), None);
        assert_eq!(gauge.snapshot(), vec![("pop".to_string(), 1.0)]);
    }

    #[test]
    fn test_last_updated_tracks_mutations() {
        let gauge = GenrePlayGauge::new().unwrap();
        assert!(gauge.last_updated().is_none());

        gauge.increment("indie", 1.0);
        assert!(gauge.last_updated().is_some());

        // clones share the same series
        let other = gauge.clone();
        other.set("indie", 5.0);
        assert_eq!(gauge.get("indie"), Some(5.0));
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let registry = Registry::new();

        GenrePlayGauge::new().unwrap().register(&registry).unwrap();
        let err = GenrePlayGauge::new().unwrap().register(&registry).unwrap_err();

        assert!(matches!(err, Error::RegisterMetric { source: prometheus::Error::AlreadyReg, .. }));
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        const THREADS: usize = 16;
        const INCREMENTS: usize = 1_000;

        let metrics = DefaultMetrics::new().unwrap();
        let gauge = metrics.genre_plays();

        thread::scope(|scope| {
            for _ in 0..THREADS {
                let _handle = scope.spawn(|| {
                    for _ in 0..INCREMENTS {
                        gauge.increment("hip-hop", 1.0);
                    }
                });
            }

            // renders interleaved with writers must always parse
            let _handle = scope.spawn(|| {
                for _ in 0..100 {
                    let text = metrics.render().unwrap();
                    assert!(text.lines().filter(|line| line.contains("hip-hop")).count() <= 1);
                }
            });
        });

        #[allow(clippy::cast_precision_loss)]
        let expected = (THREADS * INCREMENTS) as f64;
        assert_eq!(gauge.get("hip-hop"), Some(expected));
    }
}
