//! Contact details value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Singapore phone number stored as `+65XXXXXXXX`.
///
/// Accepts an optional `+65`/`65` prefix, spaces and dashes. The local part
/// is eight digits starting with 3, 6, 8 or 9.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let digits: String = raw
            .as_ref()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();
        let local = digits
            .strip_prefix("+65")
            .or_else(|| (digits.len() == 10).then(|| digits.strip_prefix("65")).flatten())
            .unwrap_or(&digits);

        let valid = local.len() == 8
            && local.bytes().all(|b| b.is_ascii_digit())
            && matches!(local.as_bytes()[0], b'3' | b'6' | b'8' | b'9');
        if !valid {
            return Err(ValidationError::invalid_format(
                "phone",
                "expected an 8-digit Singapore number starting with 3, 6, 8 or 9",
            ));
        }
        Ok(Self(format!("+65{}", local)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}

/// Channel a customer wants reminders and greetings on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactChannel {
    #[default]
    Whatsapp,
    Sms,
    Email,
}

impl ContactChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactChannel::Whatsapp => "whatsapp",
            ContactChannel::Sms => "sms",
            ContactChannel::Email => "email",
        }
    }
}

impl fmt::Display for ContactChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactChannel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "whatsapp" => Ok(ContactChannel::Whatsapp),
            "sms" => Ok(ContactChannel::Sms),
            "email" => Ok(ContactChannel::Email),
            other => Err(ValidationError::invalid_format(
                "contact_channel",
                format!("unknown channel '{}'", other),
            )),
        }
    }
}
