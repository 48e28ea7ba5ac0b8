/// mqtt contains everything needed to hand a value over to a broker
pub mod publish;

use crate::config::ChannelConfig;

/// Everything needed for one single-shot publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    pub topic: String,
    pub payload: String,
    pub hostname: String,
    pub port: u16,
    pub client_id: String,
    pub keepalive: std::time::Duration,
}

impl PublishRequest {
    /// Build a request for a channel; a negative keepalive is treated as disabled and
    /// anything past the 16 bit wire field is capped
    pub fn new(channel: &ChannelConfig, payload: String) -> Self {
        let keepalive = u64::try_from(channel.keepalive)
            .unwrap_or(0)
            .min(u16::MAX as u64);
        Self {
            topic: channel.topic.clone(),
            payload,
            hostname: channel.hostname.clone(),
            port: channel.port,
            client_id: channel.client_id.clone(),
            keepalive: std::time::Duration::from_secs(keepalive),
        }
    }
}

/// Render a numeric payload the way it is sent on the wire
pub fn format_payload(value: f64) -> String {
    format!("{}", value)
}
