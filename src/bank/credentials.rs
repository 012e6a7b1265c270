//! Credential verification for log-in.

use std::fmt;

use crate::{Error, bank::User};

/// Checks an email and password pair and returns the matching account holder.
///
/// Sessions only talk to this trait, so the demo check can be swapped for a
/// real mechanism without touching the session or transfer logic.
pub trait CredentialVerifier: fmt::Debug + Send + Sync {
    /// Return the user that owns `email` if `password` is correct.
    ///
    /// # Errors
    /// - [Error::WrongEmail] if no user has the email `email`.
    /// - [Error::WrongPassword] if the email is known but the password does not match.
    fn verify(&self, email: &str, password: &str) -> Result<User, Error>;
}

/// A single hardcoded credential pair, compared in plain text.
#[derive(Clone, PartialEq, Eq)]
pub struct DemoCredentials {
    /// The only email that can log in.
    pub email: String,
    /// The password for `email`.
    pub password: String,
    /// The account holder's first name.
    pub first_name: String,
    /// The account holder's last name.
    pub last_name: String,
}

impl fmt::Debug for DemoCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DemoCredentials")
            .field("email", &self.email)
            .field("password", &"********")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish()
    }
}

impl CredentialVerifier for DemoCredentials {
    fn verify(&self, email: &str, password: &str) -> Result<User, Error> {
        // The email is checked first so that the error names the right field.
        if email != self.email {
            return Err(Error::WrongEmail);
        }

        if password != self.password {
            return Err(Error::WrongPassword);
        }

        Ok(User {
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        bank::{CredentialVerifier, DemoCredentials, User},
    };

    fn credentials() -> DemoCredentials {
        DemoCredentials {
            email: "demo@mybank.com".to_owned(),
            password: "Demo123!".to_owned(),
            first_name: "John".to_owned(),
            last_name: "Smith".to_owned(),
        }
    }

    #[test]
    fn correct_credentials_return_user() {
        let got = credentials().verify("demo@mybank.com", "Demo123!");

        assert_eq!(
            got,
            Ok(User {
                email: "demo@mybank.com".to_owned(),
                first_name: "John".to_owned(),
                last_name: "Smith".to_owned(),
            })
        );
    }

    #[test]
    fn wrong_email_is_reported_before_wrong_password() {
        assert_eq!(
            credentials().verify("other@mybank.com", "wrong"),
            Err(Error::WrongEmail)
        );
        assert_eq!(
            credentials().verify("other@mybank.com", "Demo123!"),
            Err(Error::WrongEmail)
        );
    }

    #[test]
    fn wrong_password_with_correct_email() {
        assert_eq!(
            credentials().verify("demo@mybank.com", "demo123!"),
            Err(Error::WrongPassword)
        );
    }

    #[test]
    fn debug_output_hides_password() {
        let debug = format!("{:?}", credentials());

        assert!(!debug.contains("Demo123!"), "password leaked: {debug}");
    }
}
