use crate::models::ClientResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AdminLoginRequest {
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ClientLoginRequest {
    pub phone: String,
    /// Required on first contact; ignored for returning clients.
    pub name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminAuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClientAuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub client: ClientResponse,
}
