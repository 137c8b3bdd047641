use std::{
    net::IpAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{File, FileFormat};
use portfolio_models::email_address::EmailAddressWithName;
use serde::Deserialize;
use url::Url;

pub use self::secret::Secret;

mod secret;

pub const DEFAULT_CONFIG: &str = include_str!("../../config.toml");
pub const DEV_CONFIG: &str = include_str!("../../config.dev.toml");

/// Colon separated list of additional config files.
pub const CONFIG_PATH_ENV: &str = "PORTFOLIO_CONFIG";
pub const RESEND_API_KEY_ENV: &str = "RESEND_API_KEY";

/// Load the bundled defaults, the development overlay if `dev` is set, the
/// files listed in `PORTFOLIO_CONFIG` and finally `RESEND_API_KEY`.
pub fn load(dev: bool) -> anyhow::Result<Config> {
    let paths = extra_config_paths();
    let resend_api_key = std::env::var(RESEND_API_KEY_ENV)
        .ok()
        .filter(|key| !key.trim().is_empty());

    load_with(dev, &paths, resend_api_key)
}

pub fn load_with(
    dev: bool,
    paths: &[impl AsRef<Path>],
    resend_api_key: Option<String>,
) -> anyhow::Result<Config> {
    let mut builder = config::Config::builder()
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

    if dev {
        builder = builder.add_source(File::from_str(DEV_CONFIG, FileFormat::Toml));
    }

    builder = paths.iter().try_fold(builder, |builder, path| {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        let source = File::from_str(&content, FileFormat::Toml);
        anyhow::Ok(builder.add_source(source))
    })?;

    builder
        .set_override_option("email.resend.api_key", resend_api_key)?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

pub fn extra_config_paths() -> Vec<PathBuf> {
    std::env::var_os(CONFIG_PATH_ENV)
        .map(|paths| std::env::split_paths(&paths).collect())
        .unwrap_or_default()
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub provider: EmailProvider,
    pub from: EmailAddressWithName,
    pub smtp_url: Option<Secret>,
    pub resend: ResendConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailProvider {
    Resend,
    Smtp,
}

#[derive(Debug, Deserialize)]
pub struct ResendConfig {
    pub endpoint: Url,
    pub api_key: Option<Secret>,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub require_subject: bool,
    pub reply_to: Option<EmailAddressWithName>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn load_default_config() {
        // Act
        let config = load_with(false, &[] as &[&Path], None).unwrap();

        // Assert
        assert_eq!(config.http.port, 8000);
        assert_eq!(config.email.provider, EmailProvider::Resend);
        assert_eq!(config.email.from.address(), "onboarding@resend.dev");
        assert_eq!(config.email.resend.endpoint.as_str(), "https://api.resend.com/");
        assert!(config.email.resend.api_key.is_none());
        assert!(config.contact.require_subject);
        assert!(config.contact.reply_to.is_none());
    }

    #[test]
    fn load_dev_config() {
        let config = load_with(true, &[] as &[&Path], None).unwrap();

        assert_eq!(config.http.host, IpAddr::from([127, 0, 0, 1]));
        assert_eq!(config.http.port, 8787);
        assert!(!config.contact.require_subject);
    }

    #[test]
    fn api_key_override() {
        let config = load_with(false, &[] as &[&Path], Some("re_123".into())).unwrap();

        assert_eq!(
            config.email.resend.api_key.as_ref().map(Secret::expose),
            Some("re_123")
        );
    }

    #[test]
    fn extra_config_file() {
        // Arrange
        let path = std::env::temp_dir().join(format!(
            "portfolio-config-test-{}.toml",
            std::process::id()
        ));
        std::fs::write(
            &path,
            "[email]\nprovider = \"smtp\"\nsmtp_url = \"smtp://localhost:2525\"\n\n[contact]\nreply_to = \"Owner <owner@example.com>\"\n",
        )
        .unwrap();

        // Act
        let config = load_with(true, &[&path], None);
        std::fs::remove_file(&path).unwrap();

        // Assert
        let config = config.unwrap();
        assert_eq!(config.email.provider, EmailProvider::Smtp);
        assert_eq!(
            config.email.smtp_url.as_ref().map(Secret::expose),
            Some("smtp://localhost:2525")
        );
        assert_eq!(
            config.contact.reply_to.unwrap().address(),
            "owner@example.com"
        );
        assert_eq!(config.http.port, 8787);
    }

    #[test]
    fn missing_config_file() {
        let err = load_with(false, &[Path::new("/nonexistent/portfolio.toml")], None).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/portfolio.toml"));
    }
}
