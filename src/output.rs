/// output contains the controller that turns on/off requests into MQTT publishes
use crate::config::{ChannelConfig, OutputConfig};
use crate::errors::{ConfigError, OutputError};
use crate::measurement::{Measurement, MeasurementSink, Measurements};
use crate::mqtt::publish::Publisher;
use crate::mqtt::{format_payload, PublishRequest};

/// Measurement channel every switch is recorded on
const MEASUREMENT_CHANNEL: usize = 0;

/// Requested state of an output channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputState {
    On,
    Off,
}

impl std::str::FromStr for OutputState {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(OutputState::On),
            "off" => Ok(OutputState::Off),
            _ => Err(OutputError::InvalidState(s.to_string())),
        }
    }
}

/// Last known state of a channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChannelState {
    /// Last amount published
    On(f64),
    Off,
}

/// Answer to a state query
#[derive(Debug, Clone, PartialEq)]
pub enum StateReport {
    Channel(ChannelState),
    All(std::collections::BTreeMap<usize, ChannelState>),
}

/// What a switch request ended up doing
#[derive(Debug, Clone, PartialEq)]
pub enum SwitchOutcome {
    /// Value went out; the measurement was handed to the sink
    Published(Measurement),
    /// Nothing to publish, e.g. "on" without an amount
    Ignored,
}

/// Output whose channels publish values to MQTT topics
pub struct OutputModule<P: Publisher, S: MeasurementSink> {
    unique_id: String,
    options_channels: std::vec::Vec<ChannelConfig>,
    output_states: std::sync::Mutex<std::collections::BTreeMap<usize, ChannelState>>,
    output_setup: std::sync::atomic::AtomicBool,
    publisher: P,
    sink: S,
}

impl<P: Publisher, S: MeasurementSink> OutputModule<P, S> {
    /// Store the channel configuration of an output; no connection is made here
    pub fn new(config: OutputConfig, publisher: P, sink: S) -> Result<Self, ConfigError> {
        config.check()?;
        log::debug!(
            "Output {} configured with {} channel(s)",
            config.unique_id,
            config.channels.len()
        );
        Ok(Self {
            unique_id: config.unique_id,
            options_channels: config.channels,
            output_states: std::sync::Mutex::new(std::collections::BTreeMap::new()),
            output_setup: std::sync::atomic::AtomicBool::new(false),
            publisher,
            sink,
        })
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn options_channels(&self) -> &[ChannelConfig] {
        &self.options_channels
    }

    pub fn channel(&self, channel: usize) -> Option<&ChannelConfig> {
        self.options_channels.get(channel)
    }

    /// Mark the output ready; publishing is set up lazily per switch
    pub fn setup_output(&self) {
        self.output_setup
            .store(true, std::sync::atomic::Ordering::SeqCst);
        log::info!("Output {} set up", self.unique_id);
    }

    pub fn is_setup(&self) -> bool {
        self.output_setup.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// Publish the value belonging to the requested state of a channel.
    ///
    /// State and measurements are only updated once the publish went through.
    /// Failures are logged here and handed back to the caller.
    pub fn output_switch(
        &self,
        state: OutputState,
        amount: Option<f64>,
        channel: usize,
    ) -> Result<SwitchOutcome, OutputError> {
        if !self.is_setup() {
            return Err(OutputError::NotSetUp);
        }
        let config = self
            .options_channels
            .get(channel)
            .ok_or(OutputError::UnknownChannel(channel))?;

        let (payload, new_state, value) = match (state, amount) {
            (OutputState::On, Some(amount)) => {
                if !amount.is_finite() {
                    return Err(OutputError::InvalidAmount(amount));
                }
                (format_payload(amount), ChannelState::On(amount), amount)
            }
            (OutputState::Off, _) => (
                config.off_value.to_string(),
                ChannelState::Off,
                config.off_value as f64,
            ),
            (OutputState::On, None) => {
                log::debug!(
                    "Output {} channel #{}: on without amount, nothing to publish",
                    self.unique_id,
                    channel
                );
                return Ok(SwitchOutcome::Ignored);
            }
        };

        let request = PublishRequest::new(config, payload);
        if let Err(e) = self.publisher.single(&request) {
            log::error!("State change error: {}", e);
            return Err(e.into());
        }

        let measurement = Measurement::for_channel(MEASUREMENT_CHANNEL, value)
            .ok_or(OutputError::UnknownChannel(MEASUREMENT_CHANNEL))?;

        self.lock_states().insert(channel, new_state);
        log::info!(
            "Output {} channel #{} is now {:?}",
            self.unique_id,
            channel,
            new_state
        );

        let mut measurements = Measurements::new();
        measurements.insert(MEASUREMENT_CHANNEL, measurement.clone());
        self.sink.add_measurements(&self.unique_id, &measurements);

        Ok(SwitchOutcome::Published(measurement))
    }

    /// State of one channel, or of all channels when none is given.
    ///
    /// Returns `None` before the output is set up or for a channel never switched.
    pub fn is_on(&self, channel: Option<usize>) -> Option<StateReport> {
        if !self.is_setup() {
            return None;
        }
        let states = self.lock_states();
        match channel {
            Some(channel) => states.get(&channel).copied().map(StateReport::Channel),
            None => Some(StateReport::All(states.clone())),
        }
    }

    fn lock_states(
        &self,
    ) -> std::sync::MutexGuard<'_, std::collections::BTreeMap<usize, ChannelState>> {
        // The map is never left half updated, so a poisoned lock is still usable
        self.output_states
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
