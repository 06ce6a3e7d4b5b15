use super::TEST_JWT_SECRET;
use tubely_api::auth::JwtValidator;
use uuid::Uuid;

/// A caller with a freshly issued access token.
pub struct TestUser {
    pub user_id: Uuid,
    pub token: String,
}

impl TestUser {
    pub fn new() -> Self {
        let user_id = Uuid::new_v4();
        let token = JwtValidator::new(TEST_JWT_SECRET)
            .issue_token(user_id, chrono::Duration::hours(1))
            .expect("Failed to issue test token");
        Self { user_id, token }
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}
