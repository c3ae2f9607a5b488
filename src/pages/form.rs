//! Submitted user form fields.

use serde::Deserialize;

use crate::api::{User, UserPayload};
use crate::pages::error::PageError;

/// Raw form body of the create and edit pages. A field left out of the
/// body stays `None`, which is distinct from a field submitted empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
}

impl UserForm {
    /// Build the backend payload. A blank age is `None`; anything else must
    /// be an integer.
    pub fn payload(&self) -> Result<UserPayload, PageError> {
        let age = match self.age.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                raw.parse::<i64>()
                    .map_err(|_| PageError::InvalidAge(raw.to_string()))?,
            ),
        };

        Ok(UserPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            age,
        })
    }
}

/// Values echoed back into a form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub age: String,
}

impl From<&UserForm> for FormValues {
    fn from(form: &UserForm) -> Self {
        Self {
            name: form.name.clone().unwrap_or_default(),
            email: form.email.clone().unwrap_or_default(),
            age: form.age.clone().unwrap_or_default(),
        }
    }
}

impl From<&User> for FormValues {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            age: user.age.map(|age| age.to_string()).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(age: Option<&str>) -> UserForm {
        UserForm {
            name: Some("Alice".into()),
            email: Some("alice@example.com".into()),
            age: age.map(String::from),
        }
    }

    #[test]
    fn test_age_parsed() {
        assert_eq!(form(Some("30")).payload().unwrap().age, Some(30));
        assert_eq!(form(Some(" 30 ")).payload().unwrap().age, Some(30));
    }

    #[test]
    fn test_blank_or_missing_age_is_none() {
        assert_eq!(form(None).payload().unwrap().age, None);
        assert_eq!(form(Some("")).payload().unwrap().age, None);
        assert_eq!(form(Some("   ")).payload().unwrap().age, None);
    }

    #[test]
    fn test_non_numeric_age_rejected() {
        let err = form(Some("thirty")).payload().unwrap_err();
        assert!(matches!(err, PageError::InvalidAge(ref raw) if raw == "thirty"));
    }

    #[test]
    fn test_missing_fields_stay_absent() {
        let payload = UserForm {
            age: Some("5".into()),
            ..UserForm::default()
        }
        .payload()
        .unwrap();
        assert_eq!(payload.name, None);
        assert_eq!(payload.email, None);

        let payload = UserForm {
            name: Some(String::new()),
            ..UserForm::default()
        }
        .payload()
        .unwrap();
        assert_eq!(payload.name.as_deref(), Some(""));
    }

    #[test]
    fn test_form_values_from_user() {
        let values = FormValues::from(&User {
            id: 3,
            name: "Carol".into(),
            email: "carol@example.com".into(),
            age: None,
        });
        assert_eq!(values.age, "");
        assert_eq!(values.name, "Carol");
    }
}
