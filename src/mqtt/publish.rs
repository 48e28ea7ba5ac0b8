/// publish module sends a single message to a broker and hangs up again
use log;
use rumqttc;

use crate::errors::PublishError;
use crate::mqtt::PublishRequest;

const REQUEST_CHANNEL_CAPACITY: usize = 10;
/// Shortest keepalive the rumqttc client accepts
const MIN_KEEP_ALIVE: std::time::Duration = std::time::Duration::from_secs(5);
/// Stand-in for a disabled keepalive, the client can't send 0
const DISABLED_KEEP_ALIVE: std::time::Duration = std::time::Duration::from_secs(u16::MAX as u64);

/// Keepalive handed to the client for a requested one
fn client_keep_alive(requested: std::time::Duration) -> std::time::Duration {
    if requested.is_zero() {
        DISABLED_KEEP_ALIVE
    } else {
        requested.clamp(MIN_KEEP_ALIVE, DISABLED_KEEP_ALIVE)
    }
}

/// Something that can deliver a single message to a broker
pub trait Publisher {
    fn single(&self, request: &PublishRequest) -> Result<(), PublishError>;
}

/// Publisher on top of the rumqttc blocking client: connect, publish, disconnect per call
#[derive(Debug, Default, Clone, Copy)]
pub struct RumqttPublisher;

impl Publisher for RumqttPublisher {
    fn single(&self, request: &PublishRequest) -> Result<(), PublishError> {
        log::debug!(
            "Publishing {:?} to {:?} on {}:{} as {:?}",
            request.payload,
            request.topic,
            request.hostname,
            request.port,
            request.client_id
        );
        if request.client_id.is_empty() || request.client_id.starts_with(' ') {
            return Err(PublishError::Other(format!(
                "invalid client id {:?}",
                request.client_id
            )));
        }
        let mut mqtt_options = rumqttc::MqttOptions::new(
            request.client_id.clone(),
            request.hostname.clone(),
            request.port,
        );
        mqtt_options
            .set_keep_alive(client_keep_alive(request.keepalive))
            .set_clean_session(true);

        let (mut client, mut connection) = rumqttc::Client::new(mqtt_options, REQUEST_CHANNEL_CAPACITY);
        client.publish(
            request.topic.clone(),
            rumqttc::QoS::AtMostOnce,
            false,
            request.payload.as_bytes().to_vec(),
        )?;
        client.disconnect()?;

        // Drive the event loop until our disconnect went out
        for notification in connection.iter() {
            match notification? {
                rumqttc::Event::Outgoing(rumqttc::Outgoing::Publish(_)) => {
                    log::debug!("Sent publish to {:?}", request.topic);
                }
                rumqttc::Event::Outgoing(rumqttc::Outgoing::Disconnect) => {
                    log::debug!("Disconnected from {}:{}", request.hostname, request.port);
                    return Ok(());
                }
                _ => {}
            }
        }
        Err(PublishError::Other(format!(
            "connection to {}:{} closed before the message was sent",
            request.hostname, request.port
        )))
    }
}
