//! Authentication request/response models

use serde::{Deserialize, Serialize};

use super::{Role, UserProfile};

/// Email/password login
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// New account
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
}

/// Exchange of a Google credential for a platform token
#[derive(Debug, Clone, Serialize)]
pub struct GoogleOAuthRequest {
    pub google_token: String,
    pub role: Role,
}

/// Shape shared by login, signup, OAuth and refresh responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub user: Option<UserProfile>,

    #[serde(default)]
    pub message: Option<String>,
}
