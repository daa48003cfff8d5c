use anyhow::Result;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub gateway: GatewayConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: std::env::var("DATABASE_HOST")?,
            port: std::env::var("DATABASE_PORT")?.parse()?,
            username: std::env::var("DATABASE_USERNAME")?,
            password: std::env::var("DATABASE_PASSWORD")?,
            database: std::env::var("DATABASE_NAME")?,
        };
        let gateway = GatewayConfig {
            api_base_url: std::env::var("GATEWAY_API_BASE_URL")
                .unwrap_or_else(|_| "https://api.stripe.com".into()),
            secret_key: std::env::var("GATEWAY_SECRET_KEY")?,
            webhook_secret: std::env::var("GATEWAY_WEBHOOK_SECRET")?,
            app_base_url: std::env::var("APP_BASE_URL")?,
            signature_tolerance_secs: std::env::var("GATEWAY_SIGNATURE_TOLERANCE_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
        };
        Ok(Self { database, gateway })
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

// 決済ゲートウェイへの接続設定
// webhook_secret は通知の署名検証に使う共有シークレット
#[derive(Clone)]
pub struct GatewayConfig {
    pub api_base_url: String,
    pub secret_key: String,
    pub webhook_secret: String,
    pub app_base_url: String,
    pub signature_tolerance_secs: i64,
}
