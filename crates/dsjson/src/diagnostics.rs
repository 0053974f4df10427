//! Structured error and warning messages produced while parsing.
//!
//! Every parse collects its messages in a [`Diagnostics`] value owned by the
//! returned [`Document`](crate::Document). The convenience entry points
//! [`parse`](crate::parse) and [`parse_stream`](crate::parse_stream) also
//! append their messages to a thread-local log read with [`get_messages`] and
//! emptied with [`clear_messages`].
use std::{
    cell::RefCell,
    fmt,
    time::{SystemTime, UNIX_EPOCH},
};

use crate::{error::SyntaxError, source::Position};

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Warn,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        })
    }
}

/// A single diagnostic.
///
/// `file` and `line` identify the place in this crate that reported the
/// problem; `input` and `position` identify the place in the document.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub timestamp: SystemTime,
    pub file: &'static str,
    pub line: u32,
    pub severity: Severity,
    /// Logical name of the input, as passed to the parse call.
    pub input: String,
    pub position: Position,
    pub error: SyntaxError,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let since_epoch = self
            .timestamp
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        write!(
            f,
            "{}.{:03} {}:{} {} [{}:{}] {}",
            since_epoch.as_secs(),
            since_epoch.subsec_millis(),
            self.file,
            self.line,
            self.severity,
            self.input,
            self.position,
            self.error
        )
    }
}

/// An ordered collection of [`Message`]s.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    messages: Vec<Message>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message and mirrors it to the `log` facade.
    pub fn push(&mut self, message: Message) {
        match message.severity {
            Severity::Error => log::error!(
                "{}:{}: {}",
                message.input,
                message.position,
                message.error
            ),
            Severity::Warn => log::warn!(
                "{}:{}: {}",
                message.input,
                message.position,
                message.error
            ),
        }
        self.messages.push(message);
    }

    pub(crate) fn report(
        &mut self,
        location: (&'static str, u32),
        severity: Severity,
        input: &str,
        position: Position,
        error: SyntaxError,
    ) {
        self.push(Message {
            timestamp: SystemTime::now(),
            file: location.0,
            line: location.1,
            severity,
            input: input.into(),
            position,
            error,
        });
    }

    /// Moves every message of `other` to the end of `self`.
    pub fn append(&mut self, other: &mut Diagnostics) {
        self.messages.append(&mut other.messages);
    }

    /// Formatted messages, most recent first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.iter().rev().map(ToString::to_string).collect()
    }

    /// Structured messages in the order they were reported.
    pub fn iter(&self) -> core::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warn)
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    fn count(&self, severity: Severity) -> usize {
        self.messages
            .iter()
            .filter(|m| m.severity == severity)
            .count()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Message;
    type IntoIter = core::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Message;
    type IntoIter = std::vec::IntoIter<Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

thread_local! {
    static LOG: RefCell<Diagnostics> = RefCell::new(Diagnostics::new());
}

pub(crate) fn record(diagnostics: &Diagnostics) {
    if diagnostics.is_empty() {
        return;
    }
    LOG.with(|log| {
        log.borrow_mut()
            .messages
            .extend(diagnostics.iter().cloned());
    });
}

/// Snapshot of the thread-local message log, most recent first.
///
/// Only [`parse`](crate::parse), [`parse_stream`](crate::parse_stream) and
/// [`parse_file`](crate::parse_file) write to this log.
#[must_use]
pub fn get_messages() -> Vec<String> {
    LOG.with(|log| log.borrow().messages())
}

/// Empties the thread-local message log.
pub fn clear_messages() {
    LOG.with(|log| log.borrow_mut().clear());
}
