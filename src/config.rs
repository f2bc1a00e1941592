use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub smtp: SmtpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub token_expires_in: i64, // seconds
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    pub password: String,
    /// Bcrypt hash form; takes precedence over `password` when set so
    /// deployments need not keep the plaintext around.
    #[serde(default)]
    pub password_hash: Option<String>,
    #[serde(default)]
    pub notification_email: Option<String>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password: "admin123".to_string(),
            password_hash: None,
            notification_email: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub subscription_days: i64,
    pub payment_qr_url: String,
    pub payment_instructions: String,
    /// Newline-separated display lines (e.g. "Yape: 987654321").
    pub payment_accounts: String,
    pub support_whatsapp: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            subscription_days: 30,
            payment_qr_url: "https://via.placeholder.com/280x280.png?text=QR".to_string(),
            payment_instructions:
                "Paga usando Yape o transferencia bancaria a los números listados.".to_string(),
            payment_accounts: "Yape: 987654321\nBCP: 123-4567890\nInterbank: 123-9876543"
                .to_string(),
            support_whatsapp: "51987654321".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SmtpConfig {
    #[serde(default)]
    pub server: String,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub from_email: String,
}

impl SmtpConfig {
    pub fn is_configured(&self) -> bool {
        !self.server.is_empty() && self.port != 0
    }
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => {
                // File present: parse it, then apply env overrides below
                toml::from_str(&config_str)
                    .map_err(|e| format!("Failed to parse config file: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // No file: build entirely from env vars and defaults
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    database: DatabaseConfig {
                        url: get_env("DATABASE_URL")
                            .unwrap_or_else(|| "sqlite://app.db?mode=rwc".to_string()),
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    },
                    jwt: JwtConfig {
                        secret: get_env("SECRET_KEY")
                            .unwrap_or_else(|| "dev-secret-key".to_string()),
                        token_expires_in: get_env_parse("TOKEN_EXPIRES_IN", 86_400i64),
                    },
                    admin: AdminConfig::default(),
                    store: StoreConfig::default(),
                    smtp: SmtpConfig::default(),
                }
            }
            Err(e) => {
                return Err(format!("Cannot read config file {config_path}: {e}").into());
            }
        };

        // Env overrides apply even when the file exists
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            config.database.max_connections = mc;
        }
        if let Ok(v) = env::var("SECRET_KEY") {
            config.jwt.secret = v;
        }
        if let Ok(v) = env::var("TOKEN_EXPIRES_IN")
            && let Ok(n) = v.parse()
        {
            config.jwt.token_expires_in = n;
        }
        if let Ok(v) = env::var("ADMIN_PASSWORD") {
            config.admin.password = v;
        }
        if let Ok(v) = env::var("ADMIN_PASSWORD_HASH") {
            config.admin.password_hash = Some(v);
        }
        if let Ok(v) = env::var("ADMIN_NOTIFICATION_EMAIL") {
            config.admin.notification_email = Some(v);
        }
        if let Ok(v) = env::var("SUBSCRIPTION_DAYS")
            && let Ok(n) = v.parse()
        {
            config.store.subscription_days = n;
        }
        if let Ok(v) = env::var("PAYMENT_QR_URL") {
            config.store.payment_qr_url = v;
        }
        if let Ok(v) = env::var("PAYMENT_INSTRUCTIONS") {
            config.store.payment_instructions = v;
        }
        if let Ok(v) = env::var("PAYMENT_ACCOUNTS") {
            config.store.payment_accounts = v;
        }
        if let Ok(v) = env::var("SUPPORT_WHATSAPP") {
            config.store.support_whatsapp = v;
        }
        if let Ok(v) = env::var("SMTP_SERVER") {
            config.smtp.server = v;
        }
        if let Ok(v) = env::var("SMTP_PORT")
            && let Ok(p) = v.parse()
        {
            config.smtp.port = p;
        }
        if let Ok(v) = env::var("SMTP_USERNAME") {
            config.smtp.username = v;
        }
        if let Ok(v) = env::var("SMTP_PASSWORD") {
            config.smtp.password = v;
        }
        if let Ok(v) = env::var("SMTP_FROM_EMAIL") {
            config.smtp.from_email = v;
        }

        if config.store.subscription_days <= 0 {
            return Err("subscription_days must be positive".into());
        }

        Ok(config)
    }
}
