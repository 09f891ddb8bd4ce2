use chrono::{FixedOffset, Offset, Utc};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ApiConfig {
    pub cors: Option<CorsConfig>,
    pub server: Option<ServerConfig>,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CalendarConfig {
    /// Offset of the users' wall clock from UTC; the host's offset when unset
    pub utc_offset_minutes: Option<i32>,
}

impl CalendarConfig {
    pub fn utc_offset(&self) -> FixedOffset {
        let seconds = match self.utc_offset_minutes {
            Some(minutes) => minutes * 60,
            None => chrono::Local::now().offset().local_minus_utc(),
        };
        FixedOffset::east_opt(seconds).unwrap_or_else(|| {
            tracing::warn!("Invalid UTC offset {}s, falling back to UTC", seconds);
            Utc.fix()
        })
    }
}

/// A reminder fires once when minutes-until-start falls in
/// `[minutes - window_minutes, minutes]`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ReminderThreshold {
    /// Human readable lead time, e.g. "1 hora"; also the dedup key
    pub label: String,
    pub minutes: i64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NotificationsConfig {
    pub recipient: Option<String>,
    #[serde(default = "default_tick_interval_secs")]
    pub tick_interval_secs: u64,
    #[serde(default = "default_thresholds")]
    pub thresholds: Vec<ReminderThreshold>,
    #[serde(default = "default_window_minutes")]
    pub window_minutes: i64,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            recipient: None,
            tick_interval_secs: default_tick_interval_secs(),
            thresholds: default_thresholds(),
            window_minutes: default_window_minutes(),
        }
    }
}

fn default_tick_interval_secs() -> u64 {
    60
}

fn default_window_minutes() -> i64 {
    2
}

fn default_thresholds() -> Vec<ReminderThreshold> {
    vec![
        ReminderThreshold {
            label: "24 horas".to_string(),
            minutes: 24 * 60,
        },
        ReminderThreshold {
            label: "1 hora".to_string(),
            minutes: 60,
        },
        ReminderThreshold {
            label: "30 minutos".to_string(),
            minutes: 30,
        },
    ]
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MailConfig {
    /// HTTP endpoint that accepts `{from, to, subject, text}`; mail is only logged when unset
    pub relay_url: Option<String>,
    pub from: Option<String>,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_send_delay_ms")]
    pub send_delay_ms: u64,
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            relay_url: None,
            from: None,
            max_retries: default_max_retries(),
            send_delay_ms: default_send_delay_ms(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_send_delay_ms() -> u64 {
    100
}

fn default_queue_capacity() -> usize {
    256
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct StorageConfig {
    /// Keep events and chat history in memory only
    #[serde(default)]
    pub in_memory: bool,
}

const DEFAULT_CONFIG: &str = r#"
[cors]
allowed_origins = ["http://localhost:3000"]

[server]
host = "127.0.0.1"
port = 8080

[calendar]
# Minutes east of UTC used to read and print wall-clock times (-180 for Brasília)
# utc_offset_minutes = -180

[notifications]
# Address that receives reminders and new-event notices
# recipient = "you@example.com"
tick_interval_secs = 60
window_minutes = 2

[[notifications.thresholds]]
label = "24 horas"
minutes = 1440

[[notifications.thresholds]]
label = "1 hora"
minutes = 60

[[notifications.thresholds]]
label = "30 minutos"
minutes = 30

[mail]
# relay_url = "http://localhost:8025/send"
# from = "secretaria@example.com"
max_retries = 3
send_delay_ms = 100
queue_capacity = 256

[storage]
in_memory = false
"#;

impl ApiConfig {
    /// Loads the TOML config, writing a commented default on first run.
    ///
    /// `SECRETARIA__<SECTION>__<KEY>` environment variables override the file.
    pub fn load(path_override: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = path_override
            .map(Path::to_path_buf)
            .unwrap_or_else(get_config_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        if !config_path.exists() {
            std::fs::write(&config_path, DEFAULT_CONFIG).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.clone()))
            .add_source(Environment::with_prefix("SECRETARIA").separator("__"))
            .build()?;

        let config: ApiConfig = builder.try_deserialize()?;

        Ok((config, config_path))
    }

    pub fn server_address(&self) -> (String, u16) {
        match &self.server {
            Some(server) => (server.host.clone(), server.port),
            None => ("127.0.0.1".to_string(), 8080),
        }
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("secretaria").join("api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}
