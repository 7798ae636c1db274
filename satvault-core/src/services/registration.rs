//! Registration service - user onboarding and API key issuance

use std::sync::Arc;

use anyhow::Result;
use uuid::Uuid;

use crate::domain::{RegisterUserResponse, Response, User};
use crate::ports::Repository;

/// Registration service
///
/// The one business rule in the core: an email registers at most once,
/// and a successful registration mints the API key the user holds from
/// then on.
pub struct RegistrationService {
    repository: Arc<dyn Repository>,
}

impl RegistrationService {
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self { repository }
    }

    /// Register a new user by email
    ///
    /// A duplicate email is a business outcome, not a fault: it comes back
    /// as a 409 envelope with no key. Storage faults still surface as
    /// errors. The existence check and the insert are two separate store
    /// calls, so two concurrent registrations of the same email can race;
    /// the store's UNIQUE constraint turns the loser into a storage fault.
    pub fn register_user(&self, email: &str) -> Result<RegisterUserResponse> {
        if self.repository.get_user_by_email(email)?.is_some() {
            return Ok(RegisterUserResponse::new(
                Response::fail("User with this email already exists", 409),
                None,
            ));
        }

        let api_key = Self::generate_api_key();
        let user = User::new(api_key.clone(), email);
        self.repository.register_user(&user)?;

        Ok(RegisterUserResponse::new(
            Response::ok("Here is your api key, keep it safe!", 201),
            Some(api_key),
        ))
    }

    /// Mint a fresh API key: the 32 lowercase hex characters of a random
    /// UUID, which is unique for any realistic number of users
    fn generate_api_key() -> String {
        Uuid::new_v4().simple().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryRepository;

    fn service() -> RegistrationService {
        RegistrationService::new(Arc::new(MemoryRepository::new()))
    }

    #[test]
    fn test_registration_issues_api_key() {
        let service = service();
        let response = service.register_user("satoshi@example.com").unwrap();

        assert!(response.success());
        assert_eq!(response.status_code(), 201);
        assert_eq!(
            response.response.message,
            "Here is your api key, keep it safe!"
        );
        let key = response.api_key.expect("successful registration carries a key");
        assert_eq!(key.len(), 32);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_registered_user_is_persisted() {
        let repository = Arc::new(MemoryRepository::new());
        let service = RegistrationService::new(repository.clone());

        let response = service.register_user("satoshi@example.com").unwrap();
        let key = response.api_key.unwrap();

        let stored = repository.get_user(&key).unwrap().unwrap();
        assert_eq!(stored.email, "satoshi@example.com");
        assert_eq!(stored.api_key, key);
    }

    #[test]
    fn test_duplicate_email_conflicts() {
        let service = service();
        service.register_user("satoshi@example.com").unwrap();

        let response = service.register_user("satoshi@example.com").unwrap();
        assert!(!response.success());
        assert_eq!(response.status_code(), 409);
        assert_eq!(
            response.response.message,
            "User with this email already exists"
        );
        assert!(response.api_key.is_none());
    }

    #[test]
    fn test_each_registration_gets_a_distinct_key() {
        let service = service();
        let first = service.register_user("a@example.com").unwrap();
        let second = service.register_user("b@example.com").unwrap();

        assert_ne!(first.api_key.unwrap(), second.api_key.unwrap());
    }
}
