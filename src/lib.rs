/// mqtt-value realizes an output channel as an MQTT publish of a value
pub mod config;
pub mod constraints;
pub mod errors;
pub mod measurement;
pub mod metadata;
pub mod mqtt;
pub mod output;

pub use config::{ChannelConfig, OutputConfig};
pub use errors::{ConfigError, OutputError, PublishError};
pub use measurement::{LogSink, Measurement, MeasurementSink, Measurements};
pub use metadata::{output_information, OutputInformation};
pub use mqtt::publish::{Publisher, RumqttPublisher};
pub use mqtt::PublishRequest;
pub use output::{ChannelState, OutputModule, OutputState, StateReport, SwitchOutcome};
