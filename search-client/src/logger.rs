//! Request logging.
//!
//! A [`RequestLogger`] sees every round trip made by a [`SearchClient`]
//! that has one attached. [`TextLogger`] writes them as plain text lines,
//! to standard output unless told otherwise.
//!
//! [`SearchClient`]: crate::SearchClient

use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::config::LoggerSettings;

/// One request/response exchange as seen by a logger.
#[derive(Debug, Clone)]
pub struct RoundTrip<'a> {
    pub method: &'a str,
    pub url: &'a str,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
    /// HTTP status, absent when no response was received.
    pub status: Option<u16>,
    /// Only set when the logger asked for request bodies.
    pub request_body: Option<&'a str>,
    /// Only set when the logger asked for response bodies.
    pub response_body: Option<&'a str>,
    pub error: Option<&'a str>,
}

/// Receives every round trip of a search client.
pub trait RequestLogger: Send + Sync {
    /// Record a finished round trip.
    fn log_round_trip(&self, round_trip: &RoundTrip<'_>);

    /// Whether request bodies should be captured.
    fn request_bodies(&self) -> bool {
        false
    }

    /// Whether response bodies should be captured.
    fn response_bodies(&self) -> bool {
        false
    }
}

/// Plain text request logger.
///
/// Each round trip is written as
/// `<timestamp> <METHOD> <url> [status:<code> request:<ms>ms]`, followed by
/// the request body (lines prefixed `> `), the response body (lines
/// prefixed `< `) and the error (prefixed `! ERROR: `) when present. The
/// status is `-1` when no response arrived; the duration is truncated to
/// whole milliseconds.
pub struct TextLogger {
    output: Mutex<Box<dyn Write + Send>>,
    settings: LoggerSettings,
}

impl TextLogger {
    /// Logger writing to standard output.
    pub fn stdout(settings: LoggerSettings) -> Self {
        Self::new(io::stdout(), settings)
    }

    /// Logger writing to an arbitrary sink.
    pub fn new(output: impl Write + Send + 'static, settings: LoggerSettings) -> Self {
        Self {
            output: Mutex::new(Box::new(output)),
            settings,
        }
    }

    fn render(round_trip: &RoundTrip<'_>) -> String {
        let mut text = format!(
            "{} {} {} [status:{} request:{}ms]\n",
            round_trip
                .started_at
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            round_trip.method,
            round_trip.url,
            round_trip.status.map_or(-1, i32::from),
            round_trip.duration.as_millis(),
        );

        if let Some(body) = round_trip.request_body {
            push_body(&mut text, body, '>');
        }
        if let Some(body) = round_trip.response_body {
            push_body(&mut text, body, '<');
        }
        if let Some(error) = round_trip.error {
            text.push_str(&format!("! ERROR: {}\n", error));
        }
        text
    }
}

impl RequestLogger for TextLogger {
    fn log_round_trip(&self, round_trip: &RoundTrip<'_>) {
        let text = Self::render(round_trip);
        let mut output = self
            .output
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        // Logging must never fail a request.
        let _ = output.write_all(text.as_bytes()).and_then(|_| output.flush());
    }

    fn request_bodies(&self) -> bool {
        self.settings.request_bodies
    }

    fn response_bodies(&self) -> bool {
        self.settings.response_bodies
    }
}

fn push_body(text: &mut String, body: &str, marker: char) {
    for line in body.lines() {
        text.push(marker);
        text.push(' ');
        text.push_str(line);
        text.push('\n');
    }
}
