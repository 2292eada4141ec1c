use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Error payload returned to the form when a required field is missing.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Name, email, and message are required";

/// Placeholder rendered for optional fields the visitor left empty.
pub const NOT_PROVIDED: &str = "Not provided";

/// A contact form submission as posted by the website.
///
/// Only presence is checked: `email` is not parsed as an address here. Missing
/// or `null` required fields deserialize to an empty string so they fail
/// validation instead of failing to parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ContactSubmission {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 1, message = "message is required"))]
    pub message: String,
}

impl ContactSubmission {
    /// Drops optional fields that were sent empty. Values are otherwise kept
    /// exactly as submitted.
    pub fn normalize(self) -> Self {
        Self {
            phone: non_empty(self.phone),
            company: non_empty(self.company),
            ..self
        }
    }

    /// Normalizes then validates, returning the submission ready for templating.
    pub fn validated(self) -> crate::Result<Self> {
        let submission = self.normalize();
        submission.validate()?;

        Ok(submission)
    }

    pub fn phone_or_placeholder(&self) -> &str {
        self.phone.as_deref().unwrap_or(NOT_PROVIDED)
    }

    pub fn company_or_placeholder(&self) -> &str {
        self.company.as_deref().unwrap_or(NOT_PROVIDED)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
