//! Simulated OTP login.
//!
//! Step one collects role and contact details, step two accepts any code of
//! at least [`MIN_OTP_LEN`] characters.

use crate::types::{Role, Session, User};

/// Shortest accepted one-time code
pub const MIN_OTP_LEN: usize = 4;

/// Where the login form is
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoginStep {
    /// Entering role, name, email, mobile
    #[default]
    Details,
    /// Code "sent", waiting for it
    OtpSent,
}

/// Login screen state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Role chosen
    pub role: Role,
    /// Full name
    pub name: String,
    /// Email
    pub email: String,
    /// Mobile number
    pub mobile: String,
    /// Current step
    pub step: LoginStep,
    /// Message shown above the form (e.g. unreadable saved session)
    pub notice: Option<String>,
}

impl LoginForm {
    /// Empty form showing `notice`
    #[must_use]
    pub fn with_notice(notice: impl Into<String>) -> Self {
        Self {
            notice: Some(notice.into()),
            ..Self::default()
        }
    }

    /// Record the details and "send" the code
    ///
    /// Returns `false`, leaving the form untouched, if any field is blank
    /// after trimming or the code was already sent.
    pub fn submit_details(&mut self, role: Role, name: &str, email: &str, mobile: &str) -> bool {
        let (name, email, mobile) = (name.trim(), email.trim(), mobile.trim());
        if self.step != LoginStep::Details
            || name.is_empty()
            || email.is_empty()
            || mobile.is_empty()
        {
            return false;
        }

        self.role = role;
        self.name = name.to_string();
        self.email = email.to_string();
        self.mobile = mobile.to_string();
        self.step = LoginStep::OtpSent;
        self.notice = None;
        true
    }

    /// Go back from the code step to edit details
    pub fn edit(&mut self) {
        self.step = LoginStep::Details;
    }

    /// Check the code; yields the session to start when accepted
    #[must_use]
    pub fn verify(&self, otp: &str) -> Option<Session> {
        if self.step != LoginStep::OtpSent || otp.trim().chars().count() < MIN_OTP_LEN {
            return None;
        }

        Some(Session {
            role: self.role,
            user: User {
                name: self.name.clone(),
                email: self.email.clone(),
                mobile: self.mobile.clone(),
            },
        })
    }
}
