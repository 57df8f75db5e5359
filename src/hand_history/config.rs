use super::errors::{ParseError, Result};

/// Configuration for the hand history parser
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParserConfig {
    /// Any line containing one of these starts a new hand
    pub hand_markers: Vec<String>,
    /// Lines containing this are table chat and are ignored
    pub chat_marker: String,
    /// `chrono` format of the timestamp in a cash game header
    pub timestamp_format: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            hand_markers: vec!["PokerStars Game".to_string(), "PokerStars Hand".to_string()],
            chat_marker: " said, \"".to_string(),
            timestamp_format: "%Y/%m/%d %H:%M:%S ET".to_string(),
        }
    }
}

impl ParserConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hand_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hand_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_chat_marker(mut self, marker: impl Into<String>) -> Self {
        self.chat_marker = marker.into();
        self
    }

    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    /// Validate the parser configuration
    pub fn validate(&self) -> Result<()> {
        if self.hand_markers.is_empty() {
            return Err(ParseError::InvalidConfig(
                "at least one hand marker is required".to_string(),
            ));
        }

        if self.hand_markers.iter().any(|m| m.is_empty()) {
            return Err(ParseError::InvalidConfig(
                "hand markers must not be empty".to_string(),
            ));
        }

        // An empty marker is contained in every line
        if self.chat_marker.is_empty() {
            return Err(ParseError::InvalidConfig(
                "chat_marker must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub(crate) fn is_hand_header(&self, line: &str) -> bool {
        self.hand_markers.iter().any(|m| line.contains(m.as_str()))
    }

    pub(crate) fn is_chat(&self, line: &str) -> bool {
        line.contains(self.chat_marker.as_str())
    }
}
