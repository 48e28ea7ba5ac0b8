/// constraints holds the checks the host runs on user supplied channel options

/// Characters a publish topic can't carry
const TOPIC_FORBIDDEN_CHARS: [char; 3] = ['+', '#', '\0'];
const MAX_TOPIC_LENGTH: usize = 65535;
const MAX_CLIENT_ID_LENGTH: usize = 65535;
/// Keepalive is a 16 bit field on the wire
pub const MAX_KEEPALIVE: i64 = u16::MAX as i64;

/// Result of a constraint check: whether it passed and the reasons it did not
pub type ConstraintResult = (bool, std::vec::Vec<String>);

/// Signature shared by all option checks
pub type ConstraintCheck = fn(&ConstraintValue) -> ConstraintResult;

/// Value handed to a constraint check
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintValue {
    Integer(i64),
    Text(String),
}

/// Ensure value is strictly positive
pub fn positive_value(value: &ConstraintValue) -> ConstraintResult {
    let mut errors = std::vec::Vec::new();
    match value {
        ConstraintValue::Integer(v) if *v > 0 => {}
        ConstraintValue::Integer(_) => errors.push("Must be a positive value".to_string()),
        ConstraintValue::Text(_) => errors.push("Must be a number".to_string()),
    }
    (errors.is_empty(), errors)
}

/// Ensure value is zero or positive
pub fn positive_or_zero_value(value: &ConstraintValue) -> ConstraintResult {
    let mut errors = std::vec::Vec::new();
    match value {
        ConstraintValue::Integer(v) if *v >= 0 => {}
        ConstraintValue::Integer(_) => errors.push("Must be zero or a positive value".to_string()),
        ConstraintValue::Text(_) => errors.push("Must be a number".to_string()),
    }
    (errors.is_empty(), errors)
}

/// Ensure value is a keepalive the broker can be told about
pub fn keepalive_seconds(value: &ConstraintValue) -> ConstraintResult {
    let (_, mut errors) = positive_or_zero_value(value);
    if let ConstraintValue::Integer(v) = value {
        if *v > MAX_KEEPALIVE {
            errors.push(format!("Must be at most {} seconds", MAX_KEEPALIVE));
        }
    }
    (errors.is_empty(), errors)
}

/// Ensure value can be used to identify the client to the broker
pub fn client_id(value: &ConstraintValue) -> ConstraintResult {
    let mut errors = std::vec::Vec::new();
    match value {
        ConstraintValue::Text(id) if id.is_empty() => errors.push("Must not be empty".to_string()),
        ConstraintValue::Text(id) => {
            if id.starts_with(' ') {
                errors.push("Must not start with a space".to_string());
            }
            if id.len() > MAX_CLIENT_ID_LENGTH {
                errors.push(format!("Must be at most {} bytes", MAX_CLIENT_ID_LENGTH));
            }
        }
        ConstraintValue::Integer(_) => errors.push("Must be text".to_string()),
    }
    (errors.is_empty(), errors)
}

/// Ensure value can be used as a topic to publish on
pub fn publish_topic(value: &ConstraintValue) -> ConstraintResult {
    let mut errors = std::vec::Vec::new();
    match value {
        ConstraintValue::Text(topic) => {
            if topic.is_empty() || topic.contains(TOPIC_FORBIDDEN_CHARS) {
                errors.push("Must be a non-empty topic without '+' or '#' wildcards".to_string());
            }
            if topic.len() > MAX_TOPIC_LENGTH {
                errors.push(format!("Must be at most {} bytes", MAX_TOPIC_LENGTH));
            }
        }
        ConstraintValue::Integer(_) => errors.push("Must be text".to_string()),
    }
    (errors.is_empty(), errors)
}
