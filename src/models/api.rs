use crate::models::user::Role;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginPageResponse {
    pub page: String,
    pub users: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub status: String,
    pub user: String,
    pub role: Role,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetResponse {
    pub status: String,
    pub users: Vec<String>,
}
