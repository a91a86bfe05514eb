//! Telemetry event record and its log-line form.

use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Event fields. Values are always strings; keys are kept sorted.
pub type Fields = BTreeMap<String, String>;

/// Build [`Fields`] from key/value pairs.
pub fn fields<const N: usize>(pairs: [(&str, String); N]) -> Fields {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// One named, timestamped occurrence. Immutable once emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryEvent {
    pub name: String,
    pub fields: Fields,
    /// Capture time, truncated to whole seconds
    pub emitted_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct LogLine<'a> {
    timestamp: String,
    event: &'a str,
    fields: &'a Fields,
}

impl TelemetryEvent {
    pub(crate) fn now(name: impl Into<String>, fields: Fields) -> Self {
        Self {
            name: name.into(),
            fields,
            emitted_at: Utc::now().trunc_subsecs(0),
        }
    }

    /// Value of a field, if present.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// `YYYY-MM-DDTHH:MM:SSZ`
    pub fn timestamp(&self) -> String {
        self.emitted_at.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }

    /// Single-line JSON record, newline-terminated.
    pub(crate) fn to_json_line(&self) -> serde_json::Result<String> {
        let mut line = serde_json::to_string(&LogLine {
            timestamp: self.timestamp(),
            event: &self.name,
            fields: &self.fields,
        })?;
        line.push('\n');
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> TelemetryEvent {
        TelemetryEvent {
            name: "enhance_clicked".to_string(),
            fields: fields([
                ("scale_factor", "4".to_string()),
                ("denoise_enabled", "true".to_string()),
            ]),
            emitted_at: Utc.with_ymd_and_hms(2026, 3, 9, 7, 5, 1).unwrap(),
        }
    }

    #[test]
    fn test_timestamp_format() {
        assert_eq!(sample().timestamp(), "2026-03-09T07:05:01Z");
    }

    #[test]
    fn test_json_line_shape() {
        let line = sample().to_json_line().unwrap();
        assert_eq!(
            line,
            "{\"timestamp\":\"2026-03-09T07:05:01Z\",\"event\":\"enhance_clicked\",\
             \"fields\":{\"denoise_enabled\":\"true\",\"scale_factor\":\"4\"}}\n"
        );
    }

    #[test]
    fn test_now_truncates_to_seconds() {
        let event = TelemetryEvent::now("x", Fields::new());
        assert_eq!(event.emitted_at.timestamp_subsec_nanos(), 0);
    }
}
