//! TwiML generation
//!
//! Renders voice response documents into the provider's call handling
//! markup. Rendering is deterministic: equal documents serialize to
//! byte-identical output.

use crate::domain::shared::{DomainError, Result};
use crate::domain::voice_response::{VoiceInstruction, VoiceResponse};
use quick_xml::events::{BytesDecl, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

/// Content type of serialized documents
pub const TWIML_CONTENT_TYPE: &str = "text/xml";

/// TwiML document serializer
pub struct TwimlSerializer;

impl TwimlSerializer {
    pub fn new() -> Self {
        Self
    }

    /// Render `response` as a TwiML XML document
    pub fn serialize(&self, response: &VoiceResponse) -> Result<String> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(serialization_error)?;

        writer
            .write_event(Event::Start(BytesStart::new("Response")))
            .map_err(serialization_error)?;

        for instruction in response.instructions() {
            match instruction {
                VoiceInstruction::Say { text } => {
                    writer
                        .write_event(Event::Start(BytesStart::new("Say")))
                        .map_err(serialization_error)?;
                    writer
                        .write_event(Event::Text(BytesText::new(text)))
                        .map_err(serialization_error)?;
                    writer
                        .write_event(Event::End(BytesStart::new("Say").to_end()))
                        .map_err(serialization_error)?;
                }
                VoiceInstruction::DialClient { identity } => {
                    writer
                        .write_event(Event::Start(BytesStart::new("Dial")))
                        .map_err(serialization_error)?;
                    writer
                        .write_event(Event::Start(BytesStart::new("Client")))
                        .map_err(serialization_error)?;
                    writer
                        .write_event(Event::Text(BytesText::new(identity)))
                        .map_err(serialization_error)?;
                    writer
                        .write_event(Event::End(BytesStart::new("Client").to_end()))
                        .map_err(serialization_error)?;
                    writer
                        .write_event(Event::End(BytesStart::new("Dial").to_end()))
                        .map_err(serialization_error)?;
                }
                VoiceInstruction::Hold => {
                    writer
                        .write_event(Event::Empty(BytesStart::new("Pause")))
                        .map_err(serialization_error)?;
                }
            }
        }

        writer
            .write_event(Event::End(BytesStart::new("Response").to_end()))
            .map_err(serialization_error)?;

        String::from_utf8(writer.into_inner().into_inner())
            .map_err(|e| DomainError::Internal(format!("twiml is not valid utf-8: {}", e)))
    }
}

impl Default for TwimlSerializer {
    fn default() -> Self {
        Self::new()
    }
}

fn serialization_error(e: impl std::fmt::Display) -> DomainError {
    DomainError::Internal(format!("twiml serialization failed: {}", e))
}
