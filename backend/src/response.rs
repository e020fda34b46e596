use serde::{
    Serialize,
    Deserialize,
};

use serde_json::{Map, Value};

use crate::error::Slot;

pub const VERSION: &str = "1.0";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl OutputSpeech {
    #[must_use] pub fn plain_text(text: &str) -> Self {
        Self {
            kind: "PlainText".into(),
            text: text.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "type")]
    pub kind:    String,
    pub title:   String,
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

/// Asks the platform to collect one particular slot from the user next
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Directive {
    #[serde(rename = "type")]
    pub kind:           String,
    pub slot_to_elicit: String,
}

impl Directive {
    #[must_use] pub fn elicit_slot(slot: Slot) -> Self {
        Self {
            kind:           "Dialog.ElicitSlot".into(),
            slot_to_elicit: slot.name().into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechletResponse {
    pub output_speech:      OutputSpeech,
    pub card:               Card,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt:           Option<Reprompt>,
    pub should_end_session: bool,
    /// Absent, rather than empty, when nothing needs eliciting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directives:         Option<Vec<Directive>>,
}

impl SpeechletResponse {
    /// A response whose card shows the same text that is spoken
    #[must_use] pub fn new(title: &str, text: &str, should_end_session: bool) -> Self {
        Self {
            output_speech: OutputSpeech::plain_text(text),
            card: Card {
                kind:    "Simple".into(),
                title:   title.into(),
                content: text.into(),
            },
            reprompt: None,
            should_end_session,
            directives: None,
        }
    }

    #[must_use] pub fn with_reprompt(mut self, reprompt: &str) -> Self {
        self.reprompt = Some(Reprompt { output_speech: OutputSpeech::plain_text(reprompt) });
        self
    }

    #[must_use] pub fn eliciting(mut self, slot: Slot) -> Self {
        self.directives = Some(vec![Directive::elicit_slot(slot)]);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version:            String,
    pub session_attributes: Map<String, Value>,
    pub response:           SpeechletResponse,
}

impl ResponseEnvelope {
    #[must_use] pub fn new(session_attributes: Map<String, Value>, response: SpeechletResponse) -> Self {
        Self {
            version: VERSION.into(),
            session_attributes,
            response,
        }
    }
}
