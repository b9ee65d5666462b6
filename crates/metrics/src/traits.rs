use prometheus::{proto::MetricFamily, TextEncoder};
use snafu::ResultExt;

use crate::{error, Error};

pub trait Metrics: Clone + Send + Sync {
    fn gather(&self) -> Vec<MetricFamily>;

    /// Encode every gathered family in the Prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns an error if the encoder rejects a metric family.
    fn render(&self) -> Result<String, Error> {
        TextEncoder::new().encode_to_string(&self.gather()).context(error::EncodeMetricsSnafu)
    }
}
