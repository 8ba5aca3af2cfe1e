// Logging utilities
// Structured logging with JSON and human-readable formats

use log::Level;
use serde_json::json;

/// Mask sensitive data in logs
pub fn mask_sensitive(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    if chars.len() <= 8 {
        return "***".to_string();
    }

    let visible = 4;
    let start: String = chars[..visible].iter().collect();
    let end: String = chars[chars.len() - visible..].iter().collect();

    format!("{}...{}", start, end)
}

/// Mask an email address, keeping the first character of the local part and the domain.
pub fn mask_email(email: &str) -> String {
    let e = email.trim();
    if e.is_empty() {
        return String::new();
    }

    match e.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        _ => mask_sensitive(e),
    }
}

/// Parse phase and step from log message
/// Extracts [PHASE: ...] and [STEP: ...] patterns
pub fn parse_log_metadata(message: &str) -> (Option<String>, Option<String>, String) {
    let mut phase = None;
    let mut step = None;
    let mut cleaned_message = message.to_string();

    if let Some((value, rest)) = extract_tag(&cleaned_message, "[PHASE:") {
        phase = Some(value);
        cleaned_message = rest;
    }

    if let Some((value, rest)) = extract_tag(&cleaned_message, "[STEP:") {
        step = Some(value);
        cleaned_message = rest;
    }

    (phase, step, cleaned_message)
}

fn extract_tag(message: &str, tag: &str) -> Option<(String, String)> {
    let start = message.find(tag)?;
    let end = start + message[start..].find(']')?;
    let value = message[start + tag.len()..end].trim().to_string();
    let rest = format!("{} {}", &message[..start], &message[end + 1..])
        .trim()
        .to_string();
    Some((value, rest))
}

/// Format log entry as JSON for structured logging
pub fn format_json_log(
    timestamp: &str,
    level: Level,
    target: &str,
    message: &str,
    phase: Option<&str>,
    step: Option<&str>,
    session: Option<&str>,
) -> String {
    let mut log_entry = json!({
        "timestamp": timestamp,
        "level": level.as_str(),
        "target": target,
        "message": message,
    });

    if let Some(phase) = phase {
        log_entry["phase"] = json!(phase);
    }

    if let Some(step) = step {
        log_entry["step"] = json!(step);
    }

    if let Some(session) = session {
        log_entry["session"] = json!(session);
    }

    serde_json::to_string(&log_entry).unwrap_or_else(|_| "{}".to_string())
}

/// Format log entry as human-readable text
pub fn format_human_readable_log(
    timestamp: &str,
    level: Level,
    target: &str,
    message: &str,
    phase: Option<&str>,
    step: Option<&str>,
) -> String {
    let mut log_line = format!("[{}] [{}]", timestamp, level.as_str());

    if let Some(phase) = phase {
        log_line.push_str(&format!(" [PHASE: {}]", phase));
    }

    if let Some(step) = step {
        log_line.push_str(&format!(" [STEP: {}]", step));
    }

    log_line.push_str(&format!(" [{}] {}", target, message));
    log_line
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // A) Personal data masking
    // -------------------------------------------------------------------------

    #[test]
    fn mask_email_keeps_domain_only() {
        let masked = mask_email("ada.lovelace@example.com");
        assert_eq!(masked, "a***@example.com");
        assert!(!masked.contains("lovelace"), "Local part leaked: {}", masked);
    }

    #[test]
    fn mask_email_handles_empty_and_malformed() {
        assert_eq!(mask_email(""), "");
        assert_eq!(mask_email("   "), "");
        assert_eq!(mask_email("a@"), "***");
        assert_eq!(mask_email("not-an-email-address"), "not-...ress");
    }

    #[test]
    fn mask_sensitive_short_values_fully_masked() {
        assert_eq!(mask_sensitive("abc"), "***");
        assert_eq!(mask_sensitive("12345678"), "***");
    }

    #[test]
    fn mask_sensitive_is_char_boundary_safe() {
        let masked = mask_sensitive("ééééééééééé");
        assert_eq!(masked, "éééé...éééé");
    }

    // -------------------------------------------------------------------------
    // B) Metadata extraction + formatting
    // -------------------------------------------------------------------------

    #[test]
    fn parse_log_metadata_extracts_phase_and_step() {
        let (phase, step, msg) =
            parse_log_metadata("[PHASE: submit] [STEP: request] POST http://x/api");
        assert_eq!(phase.as_deref(), Some("submit"));
        assert_eq!(step.as_deref(), Some("request"));
        assert_eq!(msg, "POST http://x/api");
    }

    #[test]
    fn parse_log_metadata_without_tags_is_passthrough() {
        let (phase, step, msg) = parse_log_metadata("plain message");
        assert!(phase.is_none());
        assert!(step.is_none());
        assert_eq!(msg, "plain message");
    }

    #[test]
    fn json_log_contains_structured_fields() {
        let line = format_json_log(
            "2024-01-01T00:00:00Z",
            Level::Info,
            "careerflow",
            "hello",
            Some("wizard"),
            None,
            Some("abc"),
        );
        let v: serde_json::Value = serde_json::from_str(&line).expect("valid json");
        assert_eq!(v["level"], "INFO");
        assert_eq!(v["phase"], "wizard");
        assert_eq!(v["session"], "abc");
        assert!(v.get("step").is_none());
    }

    #[test]
    fn human_readable_log_keeps_tags() {
        let line = format_human_readable_log(
            "2024-01-01 00:00:00.000",
            Level::Warn,
            "careerflow",
            "fetch failed",
            Some("admin"),
            Some("list"),
        );
        assert_eq!(
            line,
            "[2024-01-01 00:00:00.000] [WARN] [PHASE: admin] [STEP: list] [careerflow] fetch failed"
        );
    }
}
