//! Log redaction for patient identifiers.
//!
//! Formatted log lines pass through `SanitizingMakeWriter` before reaching
//! their sink. Each line is scanned once with a `RegexSet`; only patterns
//! that hit are then applied. Redacted:
//! - Roster ids (`patient-17`) and UUIDs
//! - Medical record numbers and SSN-like numbers
//! - Email addresses and phone numbers
//! - `name=...` / `dob=...` style key-value fields
//!
//! Call sites should still avoid logging names in the first place; this is
//! a backstop for the ones that slip through.

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

use crate::config::SANITIZE_MAX_BYTES_ENV;

static PATTERNS: OnceLock<RedactionPatterns> = OnceLock::new();

/// Per-call sanitize cap, overridable via `CARDIOCHECK_SANITIZE_MAX_BYTES`.
pub const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

struct Redaction {
    regex: Regex,
    replacement: &'static str,
}

struct RedactionPatterns {
    set: RegexSet,
    redactions: Vec<Redaction>,
}

const RULES: [(&str, &str); 8] = [
    (
        r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
        "[REDACTED-UUID]",
    ),
    (r"\bpatient-[A-Za-z0-9_]+\b", "[REDACTED-PATIENT-ID]"),
    (r"\b\d{3}-\d{2}-\d{4}\b", "[REDACTED-SSN]"),
    (r"(?i)\bMRN[:\s#]?\s*\d{6,10}\b", "[REDACTED-MRN]"),
    (
        r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b",
        "[REDACTED-EMAIL]",
    ),
    (
        r"\b(?:\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}\b",
        "[REDACTED-PHONE]",
    ),
    (
        r#"(?i)\b(?:patient_?name|name)\s*[:=]\s*(?:"[^"]{0,128}"|[^\s,;]{1,64})"#,
        "name=[REDACTED-NAME]",
    ),
    (
        r"(?i)\b(?:dob|birth_?date|date_of_birth)\s*[:=]\s*[^\s,;]{1,32}",
        "dob=[REDACTED-DOB]",
    ),
];

fn patterns() -> &'static RedactionPatterns {
    PATTERNS.get_or_init(|| {
        // The rules are static literals, so compilation failure is a programming error.
        let set = RegexSet::new(RULES.iter().map(|(p, _)| *p)).expect("Valid regex set");
        let redactions = RULES
            .iter()
            .map(|&(pattern, replacement)| Redaction {
                regex: Regex::new(pattern).expect("Valid regex"),
                replacement,
            })
            .collect();
        RedactionPatterns { set, redactions }
    })
}

fn max_sanitize_bytes() -> usize {
    std::env::var(SANITIZE_MAX_BYTES_ENV)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }
    let mut end = max_bytes;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

/// Redact patient identifiers from a string.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_sanitize_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let patterns = patterns();
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut result = prefix.to_string();
    for idx in patterns.set.matches(prefix).iter() {
        let redaction = &patterns.redactions[idx];
        result = redaction
            .regex
            .replace_all(&result, redaction.replacement)
            .into_owned();
    }

    if truncated {
        result.push_str(" [TRUNCATED]");
    }
    result
}

/// Check whether a string contains anything `sanitize` would redact.
#[must_use]
pub fn contains_identifiers(input: &str) -> bool {
    let (prefix, _) = truncate_to_char_boundary(input, max_sanitize_bytes());
    patterns().set.is_match(prefix)
}

/// `MakeWriter` wrapper that redacts each formatted line before writing it.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

/// Line-buffering writer produced by `SanitizingMakeWriter`.
pub struct SanitizingWriter<W: std::io::Write> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W: std::io::Write> SanitizingWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
        }
    }

    fn write_sanitized(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        let sanitized = sanitize(&String::from_utf8_lossy(bytes));
        self.inner.write_all(sanitized.as_bytes())
    }

    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            self.write_sanitized(&line)?;
        }
        Ok(())
    }
}

impl<W: std::io::Write> std::io::Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        // A formatter that never emits a newline must not grow the buffer without bound.
        if self.buffer.len() > max_sanitize_bytes().saturating_mul(2) {
            let pending = std::mem::take(&mut self.buffer);
            self.write_sanitized(&pending)?;
            self.inner.write_all(b"\n")?;
            return Ok(buf.len());
        }

        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;
        if !self.buffer.is_empty() {
            let pending = std::mem::take(&mut self.buffer);
            self.write_sanitized(&pending)?;
        }
        self.inner.flush()
    }
}

impl<W: std::io::Write> Drop for SanitizingWriter<W> {
    fn drop(&mut self) {
        let _ = std::io::Write::flush(self);
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter::new(self.inner.make_writer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_redacts_roster_id() {
        let sanitized = sanitize("Assessed patient-17: overall=high");
        assert_eq!(sanitized, "Assessed [REDACTED-PATIENT-ID]: overall=high");
    }

    #[test]
    fn test_redacts_uuid() {
        let sanitized = sanitize("record 550e8400-e29b-41d4-a716-446655440000 loaded");
        assert!(sanitized.contains("[REDACTED-UUID]"));
        assert!(!sanitized.contains("550e8400"));
    }

    #[test]
    fn test_redacts_mrn_and_ssn() {
        assert!(sanitize("MRN:12345678 found").contains("[REDACTED-MRN]"));
        assert!(sanitize("SSN 123-45-6789").contains("[REDACTED-SSN]"));
    }

    #[test]
    fn test_redacts_name_fields() {
        let sanitized = sanitize(r#"loaded name="John Smith" age=65"#);
        assert!(sanitized.contains("name=[REDACTED-NAME]"));
        assert!(!sanitized.contains("Smith"));
        assert!(sanitized.contains("age=65"));

        let sanitized = sanitize("patient_name=Sarah, dob=1972-03-04");
        assert!(!sanitized.contains("Sarah"));
        assert!(!sanitized.contains("1972"));
    }

    #[test]
    fn test_leaves_clinical_summary_alone() {
        let line = "Assessment complete: overall=HIGH score=430.0 ten_year=50.0% urgency=IMMEDIATE";
        assert!(!contains_identifiers(line));
        assert_eq!(sanitize(line), line);
    }

    #[test]
    fn test_truncates_large_inputs() {
        let sanitized = sanitize_with_limit("prefix patient-1 and a long tail", 16);
        assert!(sanitized.ends_with("[TRUNCATED]"));
        assert!(sanitized.contains("[REDACTED-PATIENT-ID]"));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let (prefix, truncated) = truncate_to_char_boundary("≥20%", 2);
        assert!(truncated);
        assert!(prefix.is_empty());
    }

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0
                .lock()
                .expect("Capture lock poisoned")
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = Capture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_writer_sanitizes_each_line() {
        let capture = Capture::default();
        let make = SanitizingMakeWriter::new(capture.clone());
        {
            let mut writer = make.make_writer();
            writer
                .write_all(b"first patient-3\nsecond line")
                .expect("Should write");
        }
        let out = String::from_utf8(capture.0.lock().expect("Capture lock poisoned").clone())
            .expect("Should be UTF-8");
        assert_eq!(out, "first [REDACTED-PATIENT-ID]\nsecond line");
    }
}
