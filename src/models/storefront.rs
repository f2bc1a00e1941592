use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogResponse {
    /// Platforms with at least one account in stock.
    pub platforms: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentInfoResponse {
    pub qr_url: String,
    pub instructions: String,
    pub accounts: Vec<String>,
    pub support_whatsapp: String,
}
