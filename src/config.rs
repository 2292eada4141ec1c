use agentlead_contact::ContactSettings;
use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use lettre::message::Mailbox;
use serde::Deserialize;
use std::env;

/// Agency inbox that receives every contact form notification.
pub const DEFAULT_ADMIN_ADDRESS: &str = "hello@agentlead.co";
pub const DEFAULT_SITE_URL: &str = "https://agentlead.co";
pub const DEFAULT_SITE_NAME: &str = "AgentLead";
pub const DEFAULT_FROM_EMAIL: &str = "noreply@agentlead.co";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_username: String,
    #[serde(default)]
    pub smtp_password: String,
    /// Sender address, falls back to the SMTP account when empty.
    #[serde(default)]
    pub from_email: String,
    /// Sender display name, falls back to the site name when empty.
    #[serde(default)]
    pub from_name: String,
    /// Log emails instead of talking to SMTP (local development).
    #[serde(default)]
    pub skip_sending: bool,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_email: String::new(),
            from_name: String::new(),
            skip_sending: false,
        }
    }
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContactConfig {
    #[serde(default = "default_admin_address")]
    pub admin_address: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            admin_address: default_admin_address(),
        }
    }
}

fn default_admin_address() -> String {
    DEFAULT_ADMIN_ADDRESS.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    #[serde(default = "default_site_name")]
    pub name: String,
    #[serde(default = "default_site_url")]
    pub url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            url: default_site_url(),
        }
    }
}

fn default_site_name() -> String {
    DEFAULT_SITE_NAME.to_string()
}

fn default_site_url() -> String {
    DEFAULT_SITE_URL.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy deployment variables (EMAIL_USER, EMAIL_PASS, SITE_URL)
    /// 2. Environment variables (AGENTLEAD__EMAIL__SMTP_HOST, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional, ignored when missing
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("AGENTLEAD")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(user) = env::var("EMAIL_USER") {
            builder = builder.set_override("email.smtp_username", user)?;
        }
        if let Ok(pass) = env::var("EMAIL_PASS") {
            builder = builder.set_override("email.smtp_password", pass)?;
        }
        if let Ok(site_url) = env::var("SITE_URL") {
            builder = builder.set_override("site.url", site_url)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if let Err(e) = url::Url::parse(&self.site.url) {
            return Err(format!("Site url '{}' is invalid: {e}", self.site.url));
        }
        if let Err(e) = self.contact.admin_address.parse::<Mailbox>() {
            return Err(format!(
                "Contact admin address '{}' is invalid: {e}",
                self.contact.admin_address
            ));
        }
        if !self.email.smtp_username.is_empty() && self.email.smtp_password.is_empty() {
            return Err("SMTP password is required when a username is set".to_string());
        }
        if let Err(e) = self.contact_settings().sender.parse::<Mailbox>() {
            return Err(format!("Email sender is invalid: {e}"));
        }
        Ok(())
    }

    /// Sender, recipients and branding for the contact emails.
    pub fn contact_settings(&self) -> ContactSettings {
        let from_email = [&self.email.from_email, &self.email.smtp_username]
            .into_iter()
            .find(|address| !address.is_empty())
            .map(String::as_str)
            .unwrap_or(DEFAULT_FROM_EMAIL);

        let from_name = if self.email.from_name.is_empty() {
            &self.site.name
        } else {
            &self.email.from_name
        };

        ContactSettings {
            sender: format!("{from_name} <{from_email}>"),
            admin_address: self.contact.admin_address.to_owned(),
            site_name: self.site.name.to_owned(),
            site_url: self.site.url.to_owned(),
        }
    }
}
