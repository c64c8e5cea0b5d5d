// Declarative field validation.
//
// Each route owns an ordered table of rules. Every rule is evaluated, the
// messages of the failing ones are joined in declaration order, and the
// request halts with a single 400.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::database::{is_valid_id, ContactType};
use crate::error::ApiError;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("email pattern is a valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    NotEmpty,
    Email,
    OneOf(&'static [&'static str]),
    MinLength(usize),
    Identifier,
}

impl Predicate {
    fn holds(&self, text: &str) -> bool {
        match self {
            Predicate::NotEmpty => !text.is_empty(),
            Predicate::Email => EMAIL_PATTERN.is_match(text),
            Predicate::OneOf(allowed) => allowed.contains(&text),
            Predicate::MinLength(min) => text.chars().count() >= *min,
            Predicate::Identifier => is_valid_id(text),
        }
    }
}

/// One (field, predicate, message) entry of a rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub field: &'static str,
    pub predicate: Predicate,
    pub message: &'static str,
    /// Skip the rule when the field is absent
    pub optional: bool,
}

impl Rule {
    pub const fn new(field: &'static str, predicate: Predicate, message: &'static str) -> Self {
        Self { field, predicate, message, optional: false }
    }

    pub const fn optional(self) -> Self {
        Self { optional: true, ..self }
    }

    /// `None` when the rule passes or does not apply.
    fn violation(&self, fields: &Map<String, Value>) -> Option<&'static str> {
        let value = fields.get(self.field);
        if self.optional && value.is_none() {
            return None;
        }
        if self.predicate.holds(&field_text(value)) {
            None
        } else {
            Some(self.message)
        }
    }
}

/// Textual view of a field: absent and null read as empty, scalars by their
/// display form.
pub(crate) fn field_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

pub const SIGNUP_RULES: &[Rule] = &[
    Rule::new("name", Predicate::NotEmpty, "Name is required"),
    Rule::new("email", Predicate::Email, "Please include a valid email"),
    Rule::new("password", Predicate::MinLength(6), "Password must be at least 6 characters"),
];

pub const LOGIN_RULES: &[Rule] = &[
    Rule::new("email", Predicate::Email, "Please include a valid email"),
    Rule::new("password", Predicate::NotEmpty, "Password is required"),
];

pub const CONTACT_CREATE_RULES: &[Rule] = &[
    Rule::new("firstName", Predicate::NotEmpty, "First name is required"),
    Rule::new("lastName", Predicate::NotEmpty, "Last name is required"),
    Rule::new("phoneNumber", Predicate::NotEmpty, "Phone number is required"),
    Rule::new("email", Predicate::Email, "Please include a valid email").optional(),
    Rule::new(
        "type",
        Predicate::OneOf(ContactType::ALLOWED),
        "Type must be either personal or professional",
    )
    .optional(),
];

pub const CONTACT_UPDATE_RULES: &[Rule] = &[
    Rule::new("firstName", Predicate::NotEmpty, "First name must not be empty").optional(),
    Rule::new("lastName", Predicate::NotEmpty, "Last name must not be empty").optional(),
    Rule::new("phoneNumber", Predicate::NotEmpty, "Phone number must not be empty").optional(),
    Rule::new("email", Predicate::Email, "Please include a valid email").optional(),
    Rule::new(
        "type",
        Predicate::OneOf(ContactType::ALLOWED),
        "Type must be either personal or professional",
    )
    .optional(),
];

pub const CONTACT_ID_RULES: &[Rule] = &[Rule::new("id", Predicate::Identifier, "Invalid contact ID")];

/// Evaluate every rule against `body`; a non-object body has no fields.
pub fn validate(rules: &[Rule], body: &Value) -> Result<(), ApiError> {
    let empty = Map::new();
    let fields = body.as_object().unwrap_or(&empty);

    let violations: Vec<&str> = rules.iter().filter_map(|rule| rule.violation(fields)).collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation(violations.join(", ")))
    }
}

/// Validate a contact id path parameter.
pub fn validate_contact_id(id: &str) -> Result<(), ApiError> {
    let mut params = Map::new();
    params.insert("id".to_string(), Value::String(id.to_string()));
    validate(CONTACT_ID_RULES, &Value::Object(params))
}
