use crate::config::AdminConfig;
use crate::error::{AppError, AppResult};
use crate::models::{AdminAuthResponse, ClientAuthResponse, ClientLoginRequest};
use crate::services::ClientService;
use crate::utils::{JwtService, verify_password};
use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AuthService {
    jwt_service: JwtService,
    admin_config: AdminConfig,
    client_service: ClientService,
}

impl AuthService {
    pub fn new(
        pool: DatabaseConnection,
        jwt_service: JwtService,
        admin_config: AdminConfig,
    ) -> Self {
        let client_service = ClientService::new(pool);
        Self {
            jwt_service,
            admin_config,
            client_service,
        }
    }

    /// Validate the configured panel password and issue an admin token.
    /// A bcrypt `password_hash` wins over the plain `password` when present.
    pub async fn admin_login(&self, password: &str) -> AppResult<AdminAuthResponse> {
        let accepted = match &self.admin_config.password_hash {
            Some(hash) => verify_password(password, hash)?,
            None => {
                !self.admin_config.password.is_empty() && password == self.admin_config.password
            }
        };

        if !accepted {
            log::warn!("Rejected admin login attempt");
            return Err(AppError::AuthError("Incorrect admin password".to_string()));
        }

        Ok(AdminAuthResponse {
            access_token: self.jwt_service.generate_admin_token()?,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_service.get_token_expires_in(),
        })
    }

    /// Identify a client by phone (find-or-create) and issue a client token.
    pub async fn client_login(&self, request: ClientLoginRequest) -> AppResult<ClientAuthResponse> {
        let client = self
            .client_service
            .identify(&request.phone, request.name.as_deref())
            .await?;

        Ok(ClientAuthResponse {
            access_token: self.jwt_service.generate_client_token(client.id)?,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_service.get_token_expires_in(),
            client: client.into(),
        })
    }
}
