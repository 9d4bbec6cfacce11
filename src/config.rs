use crate::error::Error;
use crate::error::Result;
use crate::webhook::data_types::ReplyMode;
use std::env;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_API_URL: &str = "https://api.telegram.org";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
const DEFAULT_HOOK_PORT: u16 = 5000;
const DEFAULT_API_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub reply_mode: ReplyMode,
    pub api_url: String,
    /// Upper bound for one Bot API call, connect included.
    pub api_timeout: Duration,
    pub bind_addr: String,
    pub hook_port: u16,
    /// Expected value of `X-Telegram-Bot-Api-Secret-Token` on webhook posts.
    pub webhook_secret: Option<String>,
    /// Public URL registered with `setWebhook` on startup.
    pub webhook_url: Option<String>,
}

impl Config {
    pub fn new(bot_token: impl Into<String>, reply_mode: ReplyMode) -> Self {
        Self {
            bot_token: bot_token.into(),
            reply_mode,
            api_url: DEFAULT_API_URL.to_string(),
            api_timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            hook_port: DEFAULT_HOOK_PORT,
            webhook_secret: None,
            webhook_url: None,
        }
    }

    pub fn load_from_env() -> Result<Config> {
        // a missing .env is fine, the platform may provide real env vars
        let _ = dotenvy::dotenv();
        Config::load_from(|name| env::var(name).ok())
    }

    fn load_from(lookup: impl Fn(&'static str) -> Option<String>) -> Result<Config> {
        let vars = Vars(lookup);

        let bot_token = vars
            .get("BOT_TOKEN")
            .or_else(|_| vars.get("TELEGRAM_TOKEN"))
            .map_err(|_| Error::ConfigMissingEnv("BOT_TOKEN"))?;
        let reply_mode = vars.parse_or("REPLY_MODE", ReplyMode::Command)?;

        let mut config = Config::new(bot_token, reply_mode);
        config.api_url = vars
            .get_or("TELEGRAM_API_URL", DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();
        config.api_timeout =
            Duration::from_secs(vars.parse_or("API_TIMEOUT_SECS", DEFAULT_API_TIMEOUT_SECS)?);
        config.bind_addr = vars.get_or("BIND_ADDR", DEFAULT_BIND_ADDR);
        config.hook_port = vars.parse_or("PORT", DEFAULT_HOOK_PORT)?;
        config.webhook_secret = vars.get("WEBHOOK_SECRET").ok();
        config.webhook_url = vars.get("WEBHOOK_URL").ok();
        Ok(config)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.hook_port)
    }
}

/// Variable source; blank values count as unset.
struct Vars<F>(F);

impl<F: Fn(&'static str) -> Option<String>> Vars<F> {
    fn get(&self, name: &'static str) -> Result<String> {
        match (self.0)(name) {
            Some(val) if !val.trim().is_empty() => Ok(val),
            _ => Err(Error::ConfigMissingEnv(name)),
        }
    }

    fn get_or(&self, name: &'static str, default: &str) -> String {
        self.get(name).unwrap_or_else(|_| default.to_string())
    }

    fn parse_or<T: FromStr>(&self, name: &'static str, default: T) -> Result<T> {
        match self.get(name) {
            Err(_) => Ok(default),
            Ok(val) => val
                .trim()
                .parse::<T>()
                .map_err(|_| Error::ConfigWrongFormat(name)),
        }
    }
}
