use std::{borrow::Cow, fmt, panic::Location};

/// Error text paired with the call-site that raised it.
///
/// `Display` renders only the text, because the CLI shows it to users
/// verbatim. The recorded [`Location`] is kept for `Debug` output and for the
/// `debug!` lines emitted when a failure is translated at the command boundary.
///
/// Build one with [`DiagnosticMessage::new`].
#[derive(Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    message: Cow<'static, str>,
    location: &'static Location<'static>,
}

impl DiagnosticMessage {
    #[track_caller]
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
            location: Location::caller(),
        }
    }

    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// `file:line` of the call-site, handy for log fields.
    pub fn origin(&self) -> String {
        format!("{}:{}", self.location.file(), self.location.line())
    }
}

impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl fmt::Debug for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} (at {})", self.message, self.origin())
    }
}
