use std::env;
use std::time::Duration;

use config::{Config, ConfigError, File};
use dotenv::dotenv;
use secrecy::{ExposeSecret, SecretString};

#[derive(serde::Deserialize, Debug)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
}

#[derive(serde::Deserialize, Debug)]
pub struct DatabaseSettings {
    #[serde(default)]
    pub user: String,
    #[serde(default = "empty_secret")]
    pub password: SecretString,
    pub port: u16,
    pub host: String,
    pub db_name: String,
    #[serde(default)]
    pub uri: Option<SecretString>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new().into_boxed_str())
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_max_retries() -> u32 {
    2
}

impl DatabaseSettings {
    pub fn connection_string(&self) -> SecretString {
        match &self.uri {
            Some(uri) => uri.clone(),
            None if self.user.is_empty() => {
                SecretString::new(format!("mongodb://{}:{}", self.host, self.port).into_boxed_str())
            }
            None => SecretString::new(
                format!(
                    "mongodb://{}:{}@{}:{}",
                    self.user,
                    self.password.expose_secret(),
                    self.host,
                    self.port
                )
                .into_boxed_str(),
            ),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(serde::Deserialize, Debug)]
pub struct ApplicationSettings {
    pub port: u16,
    pub host: String,
    pub log_level: String,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct DashboardSettings {
    /// Length of the trailing window of the series endpoints, in days.
    #[serde(default = "default_series_days")]
    pub series_days: u32,
    /// Enables the MAF heart rate on the today view.
    #[serde(default)]
    pub age: Option<u32>,
}

fn default_series_days() -> u32 {
    90
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            series_days: default_series_days(),
            age: None,
        }
    }
}

pub fn get_config() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");

    dotenv().ok();

    let environment: Environment = env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENVIRONMENT.");

    let env_filename = format!("{}.yml", environment.as_str());
    let config = Config::builder()
        .add_source(File::from(configuration_directory.join("base.yml")))
        .add_source(File::from(configuration_directory.join(env_filename)))
        .add_source(
            config::Environment::default()
                .prefix("MONGO")
                .prefix_separator("__")
                .separator("__"),
        )
        .add_source(
            config::Environment::default()
                .prefix("APP")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    let mut settings = config.try_deserialize::<Settings>()?;

    // Hosted deployments expose the full connection string directly
    if let Ok(uri) = env::var("MONGODB_URI") {
        settings.database.uri = Some(SecretString::new(uri.into_boxed_str()));
    }

    Ok(settings)
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. \
                Use either `local` or `production`.",
                other
            )),
        }
    }
}
