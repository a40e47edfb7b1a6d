//! The response envelope, the sole wire contract of the service.

use recognizer::Match;
use serde::{Deserialize, Serialize};

/// Fixed JSON shape returned for every `/recognize` outcome and for routing
/// misses: `{ code, message?, data? }`.
///
/// `code` 200 signals success, including the no-match case; any other value
/// signals failure with `message` explaining why. Optional fields are
/// omitted from the serialized form, never emitted as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub code: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<EnvelopeData>,
}

/// Payload of a successful recognition: the facility's match records,
/// verbatim and in order. Empty when nothing matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeData {
    pub result: Vec<Match>,
}

impl ResponseEnvelope {
    /// Success envelope wrapping `result`. An empty list is still code 200.
    pub fn success(result: Vec<Match>) -> Self {
        Self {
            code: 200,
            message: None,
            data: Some(EnvelopeData { result }),
        }
    }

    /// Failure envelope with code -1 and a reason.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            code: -1,
            message: Some(message.into()),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_omits_message() {
        let envelope = ResponseEnvelope::success(vec![json!({ "id": 1 })]);
        let wire = serde_json::to_value(&envelope).unwrap();
        assert_eq!(wire, json!({ "code": 200, "data": { "result": [{ "id": 1 }] } }));
    }

    #[test]
    fn empty_result_is_success() {
        let wire = serde_json::to_value(ResponseEnvelope::success(Vec::new())).unwrap();
        assert_eq!(wire, json!({ "code": 200, "data": { "result": [] } }));
    }

    #[test]
    fn failure_omits_data() {
        let wire = serde_json::to_value(ResponseEnvelope::failure("Not found")).unwrap();
        assert_eq!(wire, json!({ "code": -1, "message": "Not found" }));
    }
}
