/// measurement holds the samples handed to the host's time series store after a switch
use crate::metadata;

/// A single sample for one measurement channel
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub measurement: &'static str,
    pub unit: &'static str,
    pub value: f64,
}

/// Samples keyed by measurement channel
pub type Measurements = std::collections::BTreeMap<usize, Measurement>;

impl Measurement {
    /// Sample for a measurement channel of this output, if the channel exists
    pub fn for_channel(channel: usize, value: f64) -> Option<Self> {
        metadata::output_information()
            .measurement(channel)
            .map(|info| Self {
                measurement: info.measurement,
                unit: info.unit,
                value,
            })
    }
}

/// Destination for measurements, implemented by the host
pub trait MeasurementSink {
    fn add_measurements(&self, unique_id: &str, measurements: &Measurements);
}

/// Sink that only writes the measurements to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl MeasurementSink for LogSink {
    fn add_measurements(&self, unique_id: &str, measurements: &Measurements) {
        for (channel, measurement) in measurements {
            log::info!(
                "Output {} channel #{} measured {} {} ({})",
                unique_id,
                channel,
                measurement.value,
                measurement.unit,
                measurement.measurement
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_for_known_channel() {
        let measurement = Measurement::for_channel(0, 42.0).expect("Could not build measurement");
        assert_eq!(measurement.measurement, "unitless");
        assert_eq!(measurement.unit, "none");
        assert_eq!(measurement.value, 42.0);
    }

    #[test]
    fn test_measurement_for_unknown_channel() {
        assert!(Measurement::for_channel(3, 1.0).is_none());
    }
}
