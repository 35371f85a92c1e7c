use serde::{Deserialize, Serialize};

pub const RECIPES_PATH: &str = "/api/recipes";
pub const LOGIN_PATH: &str = "/api/auth/login";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Value placed after `Bearer ` when no token is stored. Kept for wire
/// compatibility with the browser form, which interpolated a missing token.
pub const MISSING_TOKEN: &str = "null";

pub fn bearer_header_value(token: Option<&str>) -> String {
    format!("Bearer {}", token.unwrap_or(MISSING_TOKEN))
}
