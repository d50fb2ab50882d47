use serde::Serialize;
use validator::ValidationErrors;

/// A single field-level validation problem, as returned in `details`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub code: String,
    pub path: Vec<String>,
    pub message: String,
}

impl Issue {
    pub fn new(field: &str, code: &str, message: impl Into<String>) -> Self {
        Issue {
            code: code.to_string(),
            path: vec![camel_case(field)],
            message: message.into(),
        }
    }

    /// An issue about the request as a whole rather than one field.
    pub fn body(code: &str, message: impl Into<String>) -> Self {
        Issue {
            code: code.to_string(),
            path: Vec::new(),
            message: message.into(),
        }
    }

    pub fn field(&self) -> Option<&str> {
        self.path.first().map(String::as_str)
    }
}

/// Flattens `validator` errors into issues, sorted by field so the output is stable.
pub fn issues_from(errors: &ValidationErrors) -> Vec<Issue> {
    let mut issues = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors.iter() {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| default_message(&error.code));
            issues.push(Issue::new(&field, &error.code, message));
        }
    }

    issues.sort_by(|a, b| a.path.cmp(&b.path));
    issues
}

fn default_message(code: &str) -> String {
    match code {
        "required" => "Required".to_string(),
        "length" => "Must not be empty".to_string(),
        "range" => "Must be a non-negative integer".to_string(),
        other => format!("Invalid value ({})", other),
    }
}

// Field names go out in their wire form: home_team -> homeTeam
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;

    for ch in field.chars() {
        if ch == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }

    out
}
