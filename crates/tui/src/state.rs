//! Input state: the current text value and the current status message.
//!
//! Pure storage. Validation lives in the submission pipeline, event
//! interpretation in [`crate::input`]; nothing here decides anything.

/// Warning shown when the user submits an empty (or whitespace-only) line.
pub const EMPTY_INPUT_WARNING: &str = "Input cannot be empty.";

/// Generic message shown when the host fails to process a submission.
pub const DISPATCH_FAILURE_MESSAGE: &str = "An error occurred while processing the message.";

/// Severity of a status message, used only for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Local validation problem; the user can fix it by typing.
    Warning,
    /// A dispatch or host-reported failure.
    Error,
}

/// The single user-visible feedback line.
///
/// At most one is visible at a time; setting a new one always replaces the
/// prior one. There is no queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    /// A warning-level status.
    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Warning,
            text: text.into(),
        }
    }

    /// An error-level status.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }

    /// An error pushed by the host, shown with its detail verbatim.
    pub fn host_error(message: &str) -> Self {
        Self::error(format!("Error: {}", message))
    }
}

/// Owner of the input value and the status message.
#[derive(Debug, Default)]
pub struct InputState {
    value: String,
    status: Option<StatusMessage>,
}

impl InputState {
    /// The literal contents of the text field.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the text field contents.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Append one typed character.
    pub fn push_char(&mut self, c: char) {
        self.value.push(c);
    }

    /// Append pasted text.
    pub fn push_str(&mut self, text: &str) {
        self.value.push_str(text);
    }

    /// Remove the last character, if any.
    pub fn pop_char(&mut self) {
        self.value.pop();
    }

    /// Clear the text field.
    pub fn clear_value(&mut self) {
        self.value.clear();
    }

    /// The currently visible status message, if any.
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Show a status message, replacing whatever was there.
    pub fn set_status(&mut self, status: StatusMessage) {
        self.status = Some(status);
    }

    /// Drop the status message.
    pub fn clear_status(&mut self) {
        self.status = None;
    }
}
