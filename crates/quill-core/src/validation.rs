//! Field validation and sanitization pipeline.
//!
//! A [`Pipeline`] is an ordered list of [`Field`] rules. Running it over an
//! [`Input`] either produces a [`Sanitized`] field set or the list of every
//! field that failed, one [`FieldError`] per field.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static SCRIPT_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("script tag pattern is valid")
});

static NEWLINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n+").expect("newline pattern is valid"));

/// A labeled validation failure for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Raw request input, keyed by field name.
#[derive(Debug, Default, Clone)]
pub struct Input<'a> {
    values: HashMap<&'static str, &'a str>,
}

impl<'a> Input<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field value. `None` leaves the field absent.
    pub fn with(mut self, name: &'static str, value: Option<&'a str>) -> Self {
        if let Some(value) = value {
            self.values.insert(name, value);
        }
        self
    }

    fn get(&self, name: &str) -> Option<&'a str> {
        self.values.get(name).copied()
    }
}

#[derive(Debug, Clone)]
enum Step {
    Trim,
    Lowercase,
    Escape,
    StripScripts,
    NotEmpty(&'static str),
    OneOf(&'static [&'static str], String),
}

/// Rules for one field, applied in declaration order.
#[derive(Debug, Clone)]
pub struct Field {
    name: &'static str,
    optional: bool,
    default: Option<&'static str>,
    steps: Vec<Step>,
}

impl Field {
    /// A field that must be present. Absent input is treated as an empty string.
    pub fn required(name: &'static str) -> Self {
        Self {
            name,
            optional: false,
            default: None,
            steps: Vec::new(),
        }
    }

    /// A field that may be absent. Absent optional fields skip every rule.
    pub fn optional(name: &'static str) -> Self {
        Self {
            optional: true,
            ..Self::required(name)
        }
    }

    /// Substitute `value` when the field is absent, then run every rule on it.
    pub fn default_to(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    pub fn trim(self) -> Self {
        self.step(Step::Trim)
    }

    pub fn lowercase(self) -> Self {
        self.step(Step::Lowercase)
    }

    pub fn escape(self) -> Self {
        self.step(Step::Escape)
    }

    pub fn strip_scripts(self) -> Self {
        self.step(Step::StripScripts)
    }

    pub fn not_empty(self, message: &'static str) -> Self {
        self.step(Step::NotEmpty(message))
    }

    pub fn one_of(self, allowed: &'static [&'static str], message: impl Into<String>) -> Self {
        self.step(Step::OneOf(allowed, message.into()))
    }

    fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    fn run(&self, raw: Option<&str>) -> Result<Option<String>, FieldError> {
        let mut value = match (raw, self.default) {
            (Some(raw), _) => raw.to_string(),
            (None, Some(default)) => default.to_string(),
            (None, None) if self.optional => return Ok(None),
            (None, None) => String::new(),
        };

        for step in &self.steps {
            match step {
                Step::Trim => value = value.trim().to_string(),
                Step::Lowercase => value = value.to_lowercase(),
                Step::Escape => value = escape_html(&value),
                Step::StripScripts => value = strip_scripts(&value),
                Step::NotEmpty(message) => {
                    if value.trim().is_empty() {
                        return Err(self.error(*message));
                    }
                }
                Step::OneOf(allowed, message) => {
                    if !allowed.contains(&value.as_str()) {
                        return Err(self.error(message.clone()));
                    }
                }
            }
        }

        Ok(Some(value))
    }

    fn error(&self, message: impl Into<String>) -> FieldError {
        FieldError {
            field: self.name,
            message: message.into(),
        }
    }
}

/// An ordered set of field rules.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    fields: Vec<Field>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Run every field, collecting one error per failing field.
    pub fn run(&self, input: &Input<'_>) -> Result<Sanitized, Vec<FieldError>> {
        let mut values = HashMap::new();
        let mut errors = Vec::new();

        for field in &self.fields {
            match field.run(input.get(field.name)) {
                Ok(Some(value)) => {
                    values.insert(field.name, value);
                }
                Ok(None) => {}
                Err(error) => errors.push(error),
            }
        }

        if errors.is_empty() {
            Ok(Sanitized { values })
        } else {
            Err(errors)
        }
    }
}

/// The transformed output of a successful pipeline run.
#[derive(Debug, Clone, Default)]
pub struct Sanitized {
    values: HashMap<&'static str, String>,
}

impl Sanitized {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn take(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }

    /// Take a free-text field as an ordered list of paragraphs.
    pub fn take_paragraphs(&mut self, name: &str) -> Option<Vec<String>> {
        self.take(name).map(|text| to_paragraphs(&text))
    }

    /// Read a yes/no selection field as a boolean.
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.get(name).map(is_yes)
    }
}

/// Split free text into paragraphs.
///
/// Carriage returns are dropped and runs of newlines collapse into one
/// before splitting.
pub fn to_paragraphs(text: &str) -> Vec<String> {
    let text = text.replace('\r', "");
    NEWLINE_RUN
        .replace_all(&text, "\n")
        .split('\n')
        .map(str::to_string)
        .collect()
}

/// Whether a sanitized selection value means "yes".
pub fn is_yes(value: &str) -> bool {
    value == "yes"
}

/// Remove `<script>...</script>` blocks.
pub fn strip_scripts(text: &str) -> String {
    SCRIPT_TAG.replace_all(text, "").into_owned()
}

/// Replace HTML-significant characters with entities.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '/' => escaped.push_str("&#x2F;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
