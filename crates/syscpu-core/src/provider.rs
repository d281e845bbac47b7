//! Contract every metric source implements.

use crate::error::SampleError;
use crate::sample::MetricSample;

/// A source of metric samples polled by a [`MetricsCollector`].
///
/// The collector tracks failures through the provider's own counter so that
/// a provider can be inspected (and reset) independently of any collector.
///
/// [`MetricsCollector`]: crate::collector::MetricsCollector
pub trait MetricsProvider: Send {
    /// Human-readable name used in diagnostics.
    fn dbg_name(&self) -> &str;

    /// Number of failed reads in a row.
    fn consecutive_failed_reads(&self) -> u32;

    fn set_consecutive_failed_reads(&mut self, count: u32);

    /// Take one round of samples. An empty vector means "no data this cycle".
    fn get_samples(&mut self) -> Result<Vec<MetricSample>, SampleError>;
}
