use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Could not create metric `{name}`, error: {source}"))]
    CreateMetric { name: &'static str, source: prometheus::Error },

    #[snafu(display("Could not register metric `{name}`, error: {source}"))]
    RegisterMetric { name: &'static str, source: prometheus::Error },

    #[snafu(display("Could not encode metrics, error: {source}"))]
    EncodeMetrics { source: prometheus::Error },
}
