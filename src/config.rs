use clap::Parser;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;

pub const JWT_EXPIRED_TIME: i64 = 86400i64;

/// Flat fee every student owes per term
pub const TERM_FEE: Decimal = Decimal::from_parts(1500, 0, 0, false, 0);

pub const DEFAULT_LESSON_AMOUNT: Decimal = Decimal::from_parts(400, 0, 0, false, 0);

pub const DEFAULT_TERM: &str = "Term 1";

pub static APP_CONFIG: Lazy<Config> = Lazy::new(Config::parse);

#[derive(Debug, Parser, Clone)]
pub struct Config {
    #[clap(long, env, default_value_t = 8080)]
    pub port: u16,

    #[clap(long, env, default_value_t = true)]
    pub swagger_enabled: bool,

    #[clap(long, env, default_value = "info")]
    pub log_level: String,

    #[clap(long, env)]
    pub database_url: String,

    #[clap(long, env)]
    pub jwt_secret: String,

    #[clap(long, env)]
    pub admin_username: String,

    #[clap(long, env)]
    pub admin_password: String,

    #[clap(long, env, default_value = "./uploads")]
    pub media_root: String,

    #[clap(long, env, default_value = DEFAULT_TERM)]
    pub current_term: String,

    #[clap(long, env, default_value = "*")]
    pub cors_allowed_origins: String,

    #[clap(long, env, default_value = "local")]
    pub app_env: String,
}
