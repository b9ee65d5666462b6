pub mod error;
mod genre;
mod server;
mod traits;

pub use self::{
    error::Error,
    genre::{GenrePlayGauge, GENRE_LABEL, GENRE_PLAYS_METRIC_HELP, GENRE_PLAYS_METRIC_NAME},
    server::router,
    traits::Metrics,
};

/// Process-wide metric registry holding every Beatlytics metric.
#[derive(Clone, Debug)]
pub struct DefaultMetrics {
    registry: prometheus::Registry,

    genre_plays: GenrePlayGauge,
}

impl DefaultMetrics {
    /// Create a fresh registry and register every metric in it.
    ///
    /// # Errors
    ///
    /// Returns an error if a metric can not be created or is registered twice.
    pub fn new() -> Result<Self, Error> {
        let registry = prometheus::Registry::new();

        let genre_plays = GenrePlayGauge::new()?;
        genre_plays.register(&registry)?;

        Ok(Self { registry, genre_plays })
    }

    #[must_use]
    pub const fn genre_plays(&self) -> &GenrePlayGauge { &self.genre_plays }
}

impl Metrics for DefaultMetrics {
    fn gather(&self) -> Vec<prometheus::proto::MetricFamily> { self.registry.gather() }
}

#[cfg(test)]
mod tests {
    use crate::{DefaultMetrics, Metrics};

    #[test]
    fn test_new() { drop(DefaultMetrics::new().unwrap()); }

    #[test]
    fn test_render_empty_gauge() {
        let metrics = DefaultMetrics::new().unwrap();

        // a label vector without series exposes nothing
        assert_eq!(metrics.render().unwrap(), "");
    }

    #[test]
    fn test_render_format() {
        let metrics = DefaultMetrics::new().unwrap();
        metrics.genre_plays().set("rock", 42.0);
        metrics.genre_plays().increment("R&B", 2.5);

        let text = metrics.render().unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "# HELP spotify_genre_plays_total Number of times a genre appears in listening history"
        );
        assert_eq!(lines[1], "# TYPE spotify_genre_plays_total gauge");
        assert!(lines.contains(&r#"spotify_genre_plays_total{genre="rock"} 42"#));
        assert!(lines.contains(&r#"spotify_genre_plays_total{genre="R&B"} 2.5"#));
    }

    #[test]
    fn test_render_is_idempotent() {
        let metrics = DefaultMetrics::new().unwrap();
        metrics.genre_plays().increment("pop", 1.0);
        metrics.genre_plays().set("indie", 15.0);
        metrics.genre_plays().decrement("electronic", 12.0);

        assert_eq!(metrics.render().unwrap(), metrics.render().unwrap());
    }

    #[test]
    fn test_render_escapes_label_values() {
        let metrics = DefaultMetrics::new().unwrap();
        metrics.genre_plays().set(r#"nu-"metal""#, 1.0);
        metrics.genre_plays().set(r"back\slash", 2.0);

        let text = metrics.render().unwrap();

        assert!(text.contains(r#"spotify_genre_plays_total{genre="nu-\"metal\""} 1"#));
        assert!(text.contains(r#"spotify_genre_plays_total{genre="back\\slash"} 2"#));
    }

    #[test]
    fn test_registries_are_independent() {
        let first = DefaultMetrics::new().unwrap();
        let second = DefaultMetrics::new().unwrap();

        first.genre_plays().set("rock", 1.0);

        assert_eq!(second.genre_plays().get("rock"), None);
    }
}
