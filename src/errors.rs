/// errors contains the error types for configuring, publishing and switching outputs
use thiserror::Error;

/// Raised while loading or validating the channel configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A channel option failed its constraint check
    #[error("channel {channel} option '{option}' rejected: {}", .errors.join(", "))]
    Constraint {
        channel: usize,
        option: &'static str,
        errors: std::vec::Vec<String>,
    },

    #[error("output '{0}' has no channels configured")]
    NoChannels(String),

    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Raised by a publisher when a single-shot publish could not be completed
#[derive(Debug, Error)]
pub enum PublishError {
    /// The publish or disconnect request could not be handed to the client
    #[error("client error: {0}")]
    Client(#[from] rumqttc::ClientError),

    /// Connecting, sending or the broker itself failed
    #[error("connection error: {0}")]
    Connection(#[from] rumqttc::ConnectionError),

    /// Anything else a publisher implementation wants to report
    #[error("{0}")]
    Other(String),
}

/// Raised by a state change on an output channel
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("output is not set up")]
    NotSetUp,

    #[error("no configuration for channel {0}")]
    UnknownChannel(usize),

    #[error("amount {0} can not be published")]
    InvalidAmount(f64),

    #[error("unknown output state '{0}', expected 'on' or 'off'")]
    InvalidState(String),

    #[error("state change error: {0}")]
    Publish(#[from] PublishError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_message_lists_errors() {
        let err = ConfigError::Constraint {
            channel: 1,
            option: "keepalive",
            errors: vec!["Must be zero or a positive value".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "channel 1 option 'keepalive' rejected: Must be zero or a positive value"
        );
    }

    #[test]
    fn test_publish_error_wraps_into_output_error() {
        let err: OutputError = PublishError::Other("broker said no".to_string()).into();
        assert_eq!(err.to_string(), "state change error: broker said no");
    }
}
