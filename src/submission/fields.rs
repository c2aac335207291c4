use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9 ()-]{7,20}$").expect("phone regex is valid"));

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    Email,
    Phone,
    Number,
    OneOf(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRule {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldRule {
    pub const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
        }
    }
}

pub fn is_valid_email(s: &str) -> bool {
    EMAIL_RE.is_match(s.trim())
}

/// Check a flat payload against `rules`. Returns the first problem found.
pub fn validate(payload: &Value, rules: &[FieldRule]) -> Result<(), String> {
    let Some(obj) = payload.as_object() else {
        return Err("Request body must be a JSON object".to_string());
    };

    for rule in rules {
        let value = obj.get(rule.name);

        let text = match value {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(Value::String(s)) => Some(s.trim().to_string()),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            Some(_) => return Err(format!("{} has an unsupported value", rule.label)),
        };

        let Some(text) = text else {
            if rule.required {
                return Err(format!("{} is required", rule.label));
            }
            continue;
        };

        match rule.kind {
            FieldKind::Text => {}
            FieldKind::Email if !is_valid_email(&text) => {
                return Err("Invalid email address".to_string());
            }
            FieldKind::Phone if !PHONE_RE.is_match(&text) => {
                return Err(format!("{} is not a valid phone number", rule.label));
            }
            FieldKind::Number if text.parse::<f64>().is_err() => {
                return Err(format!("{} must be a number", rule.label));
            }
            FieldKind::OneOf(options) if !options.iter().any(|o| *o == text) => {
                return Err(format!(
                    "{} must be one of {}",
                    rule.label,
                    options.join(", ")
                ));
            }
            _ => {}
        }
    }

    Ok(())
}

/// Flatten a payload into spreadsheet cells in rule order.
pub fn to_row(payload: &Value, rules: &[FieldRule]) -> Vec<String> {
    rules
        .iter()
        .map(|rule| match payload.get(rule.name) {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        })
        .collect()
}
