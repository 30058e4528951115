//! Identity store: user creation and listing.

use model::{User, UserProfile};
use tracing::{debug, info, instrument, trace};

use crate::error::{BillingError, Result};
use crate::input::FieldValue;
use crate::password::hash_password;
use crate::store::{next_id, now, BillingStore};

/// Fields for a new user, as received.
#[derive(Clone, Default)]
pub struct NewUser {
    pub username: Option<FieldValue>,
    pub email: Option<FieldValue>,
    pub password: Option<FieldValue>,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl BillingStore {
    /// Register a user and return its public projection.
    ///
    /// The password is hashed before the store lock is taken; only the hash is
    /// retained.
    #[instrument(skip(self))]
    pub fn create_user(&self, input: NewUser) -> Result<UserProfile> {
        trace!("Entering create_user");
        self.require_all(&[
            input.username.as_ref(),
            input.email.as_ref(),
            input.password.as_ref(),
        ])?;

        let username = text_field(input.username)?;
        let email = text_field(input.email)?;
        // Only a string is hashed; numbers and booleans are not passwords.
        let password = match input.password {
            Some(FieldValue::Text(password)) => password,
            _ => return Err(BillingError::Validation),
        };

        let password_hash = hash_password(&password)?;
        drop(password);

        let mut state = self.write()?;
        let user = User {
            id: next_id(state.users.len()),
            username,
            email,
            password_hash,
            created_at: now(),
        };
        let profile = user.profile();
        state.users.push(user);

        info!("User created with ID: {}, username: {}", profile.id, profile.username);
        Ok(profile)
    }

    /// All users in insertion order, without password hashes.
    pub fn list_users(&self) -> Result<Vec<UserProfile>> {
        let state = self.read()?;
        debug!("Listing {} users", state.users.len());
        Ok(state.users.iter().map(UserProfile::from).collect())
    }
}

fn text_field(field: Option<FieldValue>) -> Result<String> {
    field
        .as_ref()
        .and_then(FieldValue::to_text)
        .ok_or(BillingError::Validation)
}
