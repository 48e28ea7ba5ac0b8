/// metadata describes the output to the host's plugin registry
use crate::constraints;

pub const OUTPUT_NAME_UNIQUE: &str = "MQTT_PAHO_VALUE";

pub const DEFAULT_HOSTNAME: &str = "localhost";
pub const DEFAULT_PORT: u16 = 1883;
pub const DEFAULT_TOPIC: &str = "paho/test/single";
pub const DEFAULT_KEEPALIVE: i64 = 60;
pub const DEFAULT_CLIENT_ID: &str = "mycodo_mqtt_client";
pub const DEFAULT_OFF_VALUE: i64 = 0;

/// Kind of value the host collects for an option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    Text,
    Integer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Text(&'static str),
    Integer(i64),
}

/// One user editable option of an output channel
#[derive(Debug)]
pub struct ChannelOption {
    pub id: &'static str,
    pub option_type: OptionType,
    pub default_value: DefaultValue,
    pub required: bool,
    pub name: &'static str,
    pub phrase: &'static str,
    pub constraints_pass: Option<constraints::ConstraintCheck>,
}

/// Measurement recorded for a measurement channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasurementInfo {
    pub channel: usize,
    pub measurement: &'static str,
    pub unit: &'static str,
}

/// Output channel with its types and the measurement channels it feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelInfo {
    pub channel: usize,
    pub types: &'static [&'static str],
    pub measurements: &'static [usize],
}

/// Dependency the host installs before loading the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dependency {
    pub installer: &'static str,
    pub import: &'static str,
    pub package: &'static str,
}

/// Static descriptor consumed by the host's output registry
#[derive(Debug)]
pub struct OutputInformation {
    pub output_name_unique: &'static str,
    pub output_manufacturer: &'static str,
    pub output_name: &'static str,
    pub output_library: &'static str,
    pub measurements: &'static [MeasurementInfo],
    pub channels: &'static [ChannelInfo],
    pub output_types: &'static [&'static str],
    pub url_additional: &'static str,
    pub interfaces: &'static [&'static str],
    pub message: &'static str,
    pub dependencies_module: &'static [Dependency],
    pub options_enabled: &'static [&'static str],
    pub options_disabled: &'static [&'static str],
    pub custom_channel_options: &'static [ChannelOption],
}

impl OutputInformation {
    /// Look up a channel option by its id
    pub fn option(&self, id: &str) -> Option<&ChannelOption> {
        self.custom_channel_options.iter().find(|o| o.id == id)
    }

    /// Measurement info for a measurement channel
    pub fn measurement(&self, channel: usize) -> Option<&MeasurementInfo> {
        self.measurements.iter().find(|m| m.channel == channel)
    }
}

pub static OUTPUT_INFORMATION: OutputInformation = OutputInformation {
    output_name_unique: OUTPUT_NAME_UNIQUE,
    output_manufacturer: "Mycodo",
    output_name: "MQTT Publish: Value",
    output_library: "paho-mqtt",
    measurements: &[MeasurementInfo {
        channel: 0,
        measurement: "unitless",
        unit: "none",
    }],
    channels: &[ChannelInfo {
        channel: 0,
        types: &["value"],
        measurements: &[0],
    }],
    output_types: &["value"],
    url_additional: "http://www.eclipse.org/paho/",
    interfaces: &["Mycodo"],
    message: "An output to publish a value to an MQTT server.",
    dependencies_module: &[Dependency {
        installer: "pip-pypi",
        import: "paho",
        package: "paho-mqtt",
    }],
    options_enabled: &["button_send_value"],
    options_disabled: &["interface"],
    custom_channel_options: &[
        ChannelOption {
            id: "hostname",
            option_type: OptionType::Text,
            default_value: DefaultValue::Text(DEFAULT_HOSTNAME),
            required: true,
            name: "Hostname",
            phrase: "The hostname of the MQTT server",
            constraints_pass: None,
        },
        ChannelOption {
            id: "port",
            option_type: OptionType::Integer,
            default_value: DefaultValue::Integer(DEFAULT_PORT as i64),
            required: true,
            name: "Port",
            phrase: "The port of the MQTT server",
            constraints_pass: Some(constraints::positive_value),
        },
        ChannelOption {
            id: "topic",
            option_type: OptionType::Text,
            default_value: DefaultValue::Text(DEFAULT_TOPIC),
            required: true,
            name: "Topic",
            phrase: "The topic to publish with",
            constraints_pass: Some(constraints::publish_topic),
        },
        ChannelOption {
            id: "keepalive",
            option_type: OptionType::Integer,
            default_value: DefaultValue::Integer(DEFAULT_KEEPALIVE),
            required: true,
            name: "Keep Alive",
            phrase: "The keepalive timeout value for the client. Set to 0 to disable.",
            constraints_pass: Some(constraints::keepalive_seconds),
        },
        ChannelOption {
            id: "clientid",
            option_type: OptionType::Text,
            default_value: DefaultValue::Text(DEFAULT_CLIENT_ID),
            required: true,
            name: "Client ID",
            phrase: "Unique client ID for connecting to the MQTT server",
            constraints_pass: Some(constraints::client_id),
        },
        ChannelOption {
            id: "off_value",
            option_type: OptionType::Integer,
            default_value: DefaultValue::Integer(DEFAULT_OFF_VALUE),
            required: true,
            name: "Off Value",
            phrase: "The value to send when an Off command is given",
            constraints_pass: None,
        },
    ],
};

/// Registration hook for the host's output catalog
pub fn output_information() -> &'static OutputInformation {
    &OUTPUT_INFORMATION
}
