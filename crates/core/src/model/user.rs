use chrono::{DateTime, Duration, Utc};
use std::fmt;
use thiserror::Error;

use crate::model::ids::UserId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionValidationError {
    #[error("user email cannot be empty")]
    EmptyEmail,

    #[error("session token cannot be empty")]
    EmptyToken,

    #[error("session lifetime must be positive")]
    InvalidLifetime,

    #[error("expires_at is before issued_at")]
    InvalidTimeRange,
}

/// The signed-in learner as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: String,
    name: String,
    picture: Option<String>,
}

impl User {
    /// Build a user record.
    ///
    /// An empty display name falls back to the local part of the email,
    /// which is what the backend does for providers that send no name.
    ///
    /// # Errors
    ///
    /// Returns `SessionValidationError::EmptyEmail` if the email is blank.
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        name: impl Into<String>,
        picture: Option<String>,
    ) -> Result<Self, SessionValidationError> {
        let email = email.into().trim().to_owned();
        if email.is_empty() {
            return Err(SessionValidationError::EmptyEmail);
        }
        let name = name.into().trim().to_owned();
        let name = if name.is_empty() {
            email.split('@').next().unwrap_or(&email).to_owned()
        } else {
            name
        };
        let picture = picture
            .map(|p| p.trim().to_owned())
            .filter(|p| !p.is_empty());
        Ok(Self {
            id,
            email,
            name,
            picture,
        })
    }

    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn picture(&self) -> Option<&str> {
        self.picture.as_deref()
    }
}

/// Bearer token handed out by the session exchange.
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// # Errors
    ///
    /// Returns `SessionValidationError::EmptyToken` for a blank token.
    pub fn new(raw: impl Into<String>) -> Result<Self, SessionValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SessionValidationError::EmptyToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// Client-side record of an authenticated session.
///
/// Unlike a bare cached user, a session carries its own expiry and is
/// re-validated on every protected route entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: User,
    token: SessionToken,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl Session {
    /// Issue a fresh session valid for `ttl` from `now`.
    ///
    /// # Errors
    ///
    /// Returns `SessionValidationError::InvalidLifetime` if `ttl` is not
    /// positive or the expiry falls outside the representable date range.
    pub fn issue(
        user: User,
        token: SessionToken,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, SessionValidationError> {
        if ttl <= Duration::zero() {
            return Err(SessionValidationError::InvalidLifetime);
        }
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or(SessionValidationError::InvalidLifetime)?;
        Ok(Self {
            user,
            token,
            issued_at: now,
            expires_at,
        })
    }

    /// Rehydrate a session from client storage.
    ///
    /// # Errors
    ///
    /// Returns `SessionValidationError::InvalidTimeRange` if the expiry precedes issuance.
    pub fn from_persisted(
        user: User,
        token: SessionToken,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<Self, SessionValidationError> {
        if expires_at < issued_at {
            return Err(SessionValidationError::InvalidTimeRange);
        }
        Ok(Self {
            user,
            token,
            issued_at,
            expires_at,
        })
    }

    /// Same token, confirmed user, new validity window.
    ///
    /// # Errors
    ///
    /// Returns `SessionValidationError::InvalidLifetime` if `ttl` is not positive.
    pub fn renew(
        &self,
        user: User,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, SessionValidationError> {
        Self::issue(user, self.token.clone(), now, ttl)
    }

    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.issued_at && now < self.expires_at
    }

    #[must_use]
    pub fn user(&self) -> &User {
        &self.user
    }

    #[must_use]
    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    #[must_use]
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn user() -> User {
        User::new(UserId::new("u1").unwrap(), "ada@example.com", "Ada", None).unwrap()
    }

    #[test]
    fn blank_name_falls_back_to_email_local_part() {
        let user = User::new(UserId::new("u2").unwrap(), "grace@example.com", "  ", None).unwrap();
        assert_eq!(user.name(), "grace");
    }

    #[test]
    fn session_expires_after_ttl() {
        let now = fixed_now();
        let session = Session::issue(
            user(),
            SessionToken::new("tok").unwrap(),
            now,
            Duration::days(7),
        )
        .unwrap();

        assert!(session.is_valid_at(now));
        assert!(session.is_valid_at(now + Duration::days(6)));
        assert!(!session.is_valid_at(now + Duration::days(7)));
        assert!(!session.is_valid_at(now - Duration::seconds(1)));
    }

    #[test]
    fn issue_rejects_expiry_past_the_calendar() {
        let err = Session::issue(
            user(),
            SessionToken::new("tok").unwrap(),
            fixed_now(),
            Duration::days(100_000_000),
        )
        .unwrap_err();
        assert_eq!(err, SessionValidationError::InvalidLifetime);
    }

    #[test]
    fn issue_rejects_non_positive_ttl() {
        let err = Session::issue(
            user(),
            SessionToken::new("tok").unwrap(),
            fixed_now(),
            Duration::zero(),
        )
        .unwrap_err();
        assert_eq!(err, SessionValidationError::InvalidLifetime);
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = SessionToken::new("super-secret").unwrap();
        assert!(!format!("{token:?}").contains("super-secret"));
    }

    #[test]
    fn renew_keeps_token() {
        let now = fixed_now();
        let session =
            Session::issue(user(), SessionToken::new("tok").unwrap(), now, Duration::days(1))
                .unwrap();
        let later = now + Duration::days(3);
        let renewed = session.renew(user(), later, Duration::days(1)).unwrap();
        assert_eq!(renewed.token().expose(), "tok");
        assert!(renewed.is_valid_at(later));
    }
}
