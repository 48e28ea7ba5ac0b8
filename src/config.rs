/// config contains the per channel settings the host persists for an output
use serde::{Deserialize, Serialize};

use crate::constraints::ConstraintValue;
use crate::errors::ConfigError;
use crate::metadata;

/// Connection and payload settings of one output channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    pub hostname: String,
    pub port: u16,
    pub topic: String,
    /// Seconds; 0 disables the keepalive. Signed so negative host input reaches the checks.
    pub keepalive: i64,
    #[serde(alias = "clientid")]
    pub client_id: String,
    pub off_value: i64,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            hostname: metadata::DEFAULT_HOSTNAME.to_string(),
            port: metadata::DEFAULT_PORT,
            topic: metadata::DEFAULT_TOPIC.to_string(),
            keepalive: metadata::DEFAULT_KEEPALIVE,
            client_id: metadata::DEFAULT_CLIENT_ID.to_string(),
            off_value: metadata::DEFAULT_OFF_VALUE,
        }
    }
}

impl ChannelConfig {
    /// Value of an option by its schema id
    pub fn option_value(&self, id: &str) -> Option<ConstraintValue> {
        match id {
            "hostname" => Some(ConstraintValue::Text(self.hostname.clone())),
            "port" => Some(ConstraintValue::Integer(self.port as i64)),
            "topic" => Some(ConstraintValue::Text(self.topic.clone())),
            "keepalive" => Some(ConstraintValue::Integer(self.keepalive)),
            "clientid" => Some(ConstraintValue::Text(self.client_id.clone())),
            "off_value" => Some(ConstraintValue::Integer(self.off_value)),
            _ => None,
        }
    }

    /// Run every constraint of the option schema against this channel
    pub fn check(&self, channel: usize) -> Result<(), ConfigError> {
        for option in metadata::output_information().custom_channel_options {
            let (Some(constraint), Some(value)) = (option.constraints_pass, self.option_value(option.id))
            else {
                continue;
            };
            let (passed, errors) = constraint(&value);
            if !passed {
                return Err(ConfigError::Constraint {
                    channel,
                    option: option.id,
                    errors,
                });
            }
        }
        Ok(())
    }
}

/// Output record as handed over by the host, channels ordered by index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub unique_id: String,
    #[serde(default)]
    pub channels: std::vec::Vec<ChannelConfig>,
}

impl OutputConfig {
    /// Output with a single channel using all defaults
    pub fn with_defaults(unique_id: &str) -> Self {
        Self {
            unique_id: unique_id.to_string(),
            channels: vec![ChannelConfig::default()],
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: OutputConfig = toml::from_str(contents)?;
        Ok(config)
    }

    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        log::debug!("Loading output config from {:?}", path);
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Check all channels; an output without channels is rejected
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.channels.is_empty() {
            return Err(ConfigError::NoChannels(self.unique_id.clone()));
        }
        for (channel, config) in self.channels.iter().enumerate() {
            config.check(channel)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempdir;

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = OutputConfig::from_toml_str(
            r#"
            unique_id = "fan"
            [[channels]]
            topic = "t/1"
            "#,
        )
        .expect("Could not parse config");
        assert_eq!(config.unique_id, "fan");
        assert_eq!(config.channels.len(), 1);
        let channel = &config.channels[0];
        assert_eq!(channel.hostname, "localhost");
        assert_eq!(channel.port, 1883);
        assert_eq!(channel.topic, "t/1");
        assert_eq!(channel.keepalive, 60);
        assert_eq!(channel.client_id, "mycodo_mqtt_client");
        assert_eq!(channel.off_value, 0);
    }

    #[test]
    fn test_clientid_alias() {
        let config = OutputConfig::from_toml_str(
            r#"
            unique_id = "fan"
            [[channels]]
            clientid = "c1"
            "#,
        )
        .expect("Could not parse config");
        assert_eq!(config.channels[0].client_id, "c1");
    }

    #[test]
    fn test_negative_keepalive_rejected() {
        let mut config = OutputConfig::with_defaults("fan");
        config.channels[0].keepalive = -1;
        match config.check() {
            Err(ConfigError::Constraint {
                channel,
                option,
                errors,
            }) => {
                assert_eq!(channel, 0);
                assert_eq!(option, "keepalive");
                assert_eq!(errors, vec!["Must be zero or a positive value".to_string()]);
            }
            other => panic!("Expected keepalive constraint error, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_keepalive_accepted() {
        let mut config = OutputConfig::with_defaults("fan");
        config.channels[0].keepalive = 0;
        config.check().expect("Zero keepalive should pass");
    }

    #[test]
    fn test_keepalive_past_wire_limit_rejected() {
        let mut config = OutputConfig::with_defaults("fan");
        config.channels[0].keepalive = 70000;
        match config.check() {
            Err(ConfigError::Constraint { option, errors, .. }) => {
                assert_eq!(option, "keepalive");
                assert_eq!(errors, vec!["Must be at most 65535 seconds".to_string()]);
            }
            other => panic!("Expected keepalive constraint error, got {:?}", other),
        }
    }

    #[test]
    fn test_unusable_client_id_rejected() {
        for client_id in ["", " c1"] {
            let mut config = OutputConfig::with_defaults("fan");
            config.channels[0].client_id = client_id.to_string();
            match config.check() {
                Err(ConfigError::Constraint { option, .. }) => assert_eq!(option, "clientid"),
                other => panic!("Expected client id constraint error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_port_zero_rejected() {
        let mut config = OutputConfig::with_defaults("fan");
        config.channels.push(ChannelConfig {
            port: 0,
            ..ChannelConfig::default()
        });
        match config.check() {
            Err(ConfigError::Constraint { channel, option, .. }) => {
                assert_eq!(channel, 1);
                assert_eq!(option, "port");
            }
            other => panic!("Expected port constraint error, got {:?}", other),
        }
    }

    #[test]
    fn test_no_channels_rejected() {
        let config = OutputConfig::from_toml_str(r#"unique_id = "fan""#)
            .expect("Could not parse config");
        assert!(matches!(config.check(), Err(ConfigError::NoChannels(_))));
    }

    #[test]
    fn test_port_out_of_range_fails_parse() {
        let result = OutputConfig::from_toml_str(
            r#"
            unique_id = "fan"
            [[channels]]
            port = 70000
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_from_file() {
        let tmp_dir =
            tempdir::TempDir::new("mqtt-value").expect("Could not create a temporary folder");
        let path = tmp_dir.path().join("output.toml");
        let mut tmp_file = std::fs::File::create(&path).expect("Could not open a new temp file");
        writeln!(
            tmp_file,
            "unique_id = \"greenhouse\"\n[[channels]]\nhostname = \"broker.local\"\nport = 1884\noff_value = -5"
        )
        .expect("Could not write contents to temp file");

        let config = OutputConfig::from_file(&path).expect("Could not load config file");
        assert_eq!(config.channels[0].hostname, "broker.local");
        assert_eq!(config.channels[0].port, 1884);
        assert_eq!(config.channels[0].off_value, -5);

        let missing = OutputConfig::from_file(&tmp_dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
