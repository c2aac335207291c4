use std::net::IpAddr;
use std::time::Duration;

use axum::http::StatusCode;

pub const DEFAULT_CORS_ORIGINS: [&str; 4] = [
    "https://obana.africa",
    "https://www.obana.africa",
    "https://shop.obana.africa",
    "http://localhost:3000",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub max_body_size: usize,
    pub upstream_timeout: Duration,
    pub cors: CorsConfig,
    pub zoho: Option<ZohoConfig>,
    pub sheets: Option<SheetsConfig>,
    pub cloudinary: Option<CloudinaryConfig>,
    pub geonames: Option<GeonamesConfig>,
    pub terminal: Option<TerminalConfig>,
    pub shop: Option<ShopConfig>,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub preflight_status: StatusCode,
}

#[derive(Debug, Clone)]
pub struct ZohoConfig {
    pub accounts_url: String,
    pub campaigns_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub list_key: String,
}

#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub client_email: String,
    pub private_key: String,
    pub sheet_id: String,
    pub token_uri: String,
    pub api_url: String,
}

#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub upload_preset: String,
    pub api_url: String,
}

#[derive(Debug, Clone)]
pub struct GeonamesConfig {
    pub username: String,
    pub api_url: String,
}

#[derive(Debug, Clone)]
pub struct TerminalConfig {
    pub base_url: String,
    pub secret_key: String,
}

#[derive(Debug, Clone)]
pub struct ShopConfig {
    pub api_url: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
            preflight_status: StatusCode::NO_CONTENT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("OBANA_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid OBANA_HOST: {e}"))?;

        let port: u16 = env_or("OBANA_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid OBANA_PORT: {e}"))?;

        let log_level = env_or("OBANA_LOG_LEVEL", "info");

        let max_body_size: usize = env_or("OBANA_MAX_BODY_SIZE", "10485760")
            .parse()
            .map_err(|e| format!("Invalid OBANA_MAX_BODY_SIZE: {e}"))?;

        let upstream_timeout: u64 = env_or("OBANA_UPSTREAM_TIMEOUT_SECS", "30")
            .parse()
            .map_err(|e| format!("Invalid OBANA_UPSTREAM_TIMEOUT_SECS: {e}"))?;

        Ok(Config {
            host,
            port,
            log_level,
            max_body_size,
            upstream_timeout: Duration::from_secs(upstream_timeout),
            cors: cors_from_env()?,
            zoho: zoho_from_env(),
            sheets: sheets_from_env(),
            cloudinary: cloudinary_from_env(),
            geonames: geonames_from_env(),
            terminal: terminal_from_env(),
            shop: env_opt("OBANA_SHOP_API_URL").map(|api_url| ShopConfig {
                api_url: trim_base(&api_url),
            }),
        })
    }
}

fn cors_from_env() -> Result<CorsConfig, String> {
    let mut cors = CorsConfig::default();

    if let Some(origins) = env_opt("OBANA_CORS_ORIGINS") {
        let parsed = parse_origins(&origins);
        if parsed.is_empty() {
            return Err("OBANA_CORS_ORIGINS must list at least one origin".to_string());
        }
        cors.allowed_origins = parsed;
    }

    if let Some(status) = env_opt("OBANA_CORS_PREFLIGHT_STATUS") {
        cors.preflight_status = parse_preflight_status(&status)?;
    }

    Ok(cors)
}

pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/'))
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

pub fn parse_preflight_status(raw: &str) -> Result<StatusCode, String> {
    match raw.trim() {
        "200" => Ok(StatusCode::OK),
        "204" => Ok(StatusCode::NO_CONTENT),
        other => Err(format!(
            "Invalid OBANA_CORS_PREFLIGHT_STATUS '{other}': expected 200 or 204"
        )),
    }
}

fn zoho_from_env() -> Option<ZohoConfig> {
    match (
        env_opt("ZOHO_CLIENT_ID"),
        env_opt("ZOHO_CLIENT_SECRET"),
        env_opt("ZOHO_REFRESH_TOKEN"),
        env_opt("ZOHO_LIST_KEY"),
    ) {
        (Some(client_id), Some(client_secret), Some(refresh_token), Some(list_key)) => {
            Some(ZohoConfig {
                accounts_url: trim_base(&env_or("ZOHO_ACCOUNTS_URL", "https://accounts.zoho.com")),
                campaigns_url: trim_base(&env_or(
                    "ZOHO_CAMPAIGNS_URL",
                    "https://campaigns.zoho.com",
                )),
                client_id,
                client_secret,
                refresh_token,
                list_key,
            })
        }
        _ => None,
    }
}

fn sheets_from_env() -> Option<SheetsConfig> {
    match (
        env_opt("GOOGLE_CLIENT_EMAIL"),
        env_opt("GOOGLE_PRIVATE_KEY"),
        env_opt("GOOGLE_SHEET_ID"),
    ) {
        (Some(client_email), Some(private_key), Some(sheet_id)) => Some(SheetsConfig {
            client_email,
            // Keys pasted into .env files carry literal "\n" sequences
            private_key: private_key.replace("\\n", "\n"),
            sheet_id,
            token_uri: env_or("GOOGLE_TOKEN_URI", "https://oauth2.googleapis.com/token"),
            api_url: trim_base(&env_or("GOOGLE_SHEETS_URL", "https://sheets.googleapis.com")),
        }),
        _ => None,
    }
}

fn cloudinary_from_env() -> Option<CloudinaryConfig> {
    match (
        env_opt("CLOUDINARY_CLOUD_NAME"),
        env_opt("CLOUDINARY_UPLOAD_PRESET"),
    ) {
        (Some(cloud_name), Some(upload_preset)) => Some(CloudinaryConfig {
            cloud_name,
            upload_preset,
            api_url: trim_base(&env_or("CLOUDINARY_API_URL", "https://api.cloudinary.com")),
        }),
        _ => None,
    }
}

fn geonames_from_env() -> Option<GeonamesConfig> {
    env_opt("GEONAMES_USERNAME").map(|username| GeonamesConfig {
        username,
        api_url: trim_base(&env_or("GEONAMES_API_URL", "http://api.geonames.org")),
    })
}

fn terminal_from_env() -> Option<TerminalConfig> {
    match (
        env_opt("TERMINAL_AFRICA_BASE_URL"),
        env_opt("TERMINAL_AFRICA_SECRET_KEY"),
    ) {
        (Some(base_url), Some(secret_key)) => Some(TerminalConfig {
            base_url: trim_base(&base_url),
            secret_key,
        }),
        _ => None,
    }
}

fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}
