use anyhow::Result;
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub plugin_url: String,
    pub compiler_url: String,
    pub compiler_credit_url: String,
    pub compiler_client_id: String,
    pub compiler_client_secret: String,
    pub webhook_user_agent: String,
    pub interpreter_bin: String,
    pub static_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgresql://localhost/code_runner".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            plugin_url: env::var("PLUGIN_URL")
                .unwrap_or_else(|_| "https://runcode-one.vercel.app".to_string()),
            compiler_url: env::var("COMPILER_URL")
                .unwrap_or_else(|_| "https://api.jdoodle.com/v1/execute".to_string()),
            compiler_credit_url: env::var("COMPILER_CREDIT_URL")
                .unwrap_or_else(|_| "https://api.jdoodle.com/v1/credit-spent".to_string()),
            compiler_client_id: env::var("COMPILER_CLIENT_ID").unwrap_or_default(),
            compiler_client_secret: env::var("COMPILER_CLIENT_SECRET").unwrap_or_default(),
            webhook_user_agent: env::var("WEBHOOK_USER_AGENT")
                .unwrap_or_else(|_| "PluginLab-Webhook-Delivery".to_string()),
            interpreter_bin: env::var("INTERPRETER_BIN")
                .unwrap_or_else(|_| "python3".to_string()),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "./static".to_string()),
        })
    }
}
