use serde::Deserialize;

use crate::error::{AppError, FieldErrors};
use crate::users::repo_types::{NewUser, UserPatch};
use crate::validation::{email as checked_email, optional_text, required_text};

/// Request body for `POST /users`. Fields are optional here so missing
/// ones can be reported per field.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Request body for `PUT /users/{id}`; absent fields are left alone.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl CreateUserRequest {
    pub fn validate(self) -> Result<NewUser, AppError> {
        let mut errors = FieldErrors::new();
        let name = required_text(&mut errors, "name", self.name);
        let email = required_text(&mut errors, "email", self.email).and_then(|e| checked_email(&mut errors, e));
        let address = required_text(&mut errors, "address", self.address);

        match (name, email, address) {
            (Some(name), Some(email), Some(address)) => errors.finish(NewUser { name, email, address }),
            _ => Err(AppError::Validation(errors)),
        }
    }
}

impl UpdateUserRequest {
    pub fn validate(self) -> Result<UserPatch, AppError> {
        let mut errors = FieldErrors::new();
        let patch = UserPatch {
            name: optional_text(&mut errors, "name", self.name),
            email: optional_text(&mut errors, "email", self.email).and_then(|e| checked_email(&mut errors, e)),
            address: optional_text(&mut errors, "address", self.address),
        };
        errors.finish(patch)
    }
}
