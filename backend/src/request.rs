use std::collections::HashMap;

use serde::{
    Serialize,
    Deserialize,
};

use serde_json::{Map, Value};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub new:         bool,
    #[serde(default)]
    pub session_id:  String,
    #[serde(default)]
    pub application: Application,
    /// Opaque to the skill; handed back untouched
    #[serde(default)]
    pub attributes:  Option<Map<String, Value>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotValue {
    pub name:  String,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub name:  String,
    #[serde(default)]
    pub slots: HashMap<String, SlotValue>,
}

impl Intent {
    /// The value the user gave for a slot, if any. Blank values count as missing.
    #[must_use] pub fn slot(&self, name: &str) -> Option<&str> {
        self.slots.get(name)
            .and_then(|s| s.value.as_deref())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    #[serde(rename_all = "camelCase")]
    LaunchRequest {
        request_id: String,
    },
    #[serde(rename_all = "camelCase")]
    IntentRequest {
        request_id: String,
        intent:     Intent,
    },
    #[serde(rename_all = "camelCase")]
    SessionEndedRequest {
        request_id: String,
        #[serde(default)]
        reason:     Option<String>,
    },
    #[serde(other)]
    Unsupported,
}

impl Request {
    #[must_use] pub fn request_id(&self) -> &str {
        match self {
            Request::LaunchRequest { request_id }
            | Request::IntentRequest { request_id, .. }
            | Request::SessionEndedRequest { request_id, .. } => request_id.as_str(),
            Request::Unsupported => "",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub session: Session,
    pub request: Request,
}
