use serde::Deserialize;

/// Environment name that hides error detail from clients.
pub const PRODUCTION: &str = "production";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub docker: DockerConfig,
    #[serde(default)]
    pub health: HealthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
    /// "production" suppresses internal error messages in 500 responses.
    #[serde(default = "default_environment")]
    pub environment: String,
    /// Directory with the dashboard's static pages; API-only when unset.
    #[serde(default)]
    pub static_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            environment: default_environment(),
            static_dir: None,
        }
    }
}

fn default_port() -> u16 {
    3000
}

fn default_host() -> String {
    "0.0.0.0".into()
}

fn default_environment() -> String {
    "development".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct DockerConfig {
    /// Upper bound on a single container listing call.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            query_timeout_ms: default_query_timeout_ms(),
        }
    }
}

fn default_query_timeout_ms() -> u64 {
    5000
}

/// Where health readings come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthSourceKind {
    #[default]
    Simulated,
    Sysinfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthConfig {
    #[serde(default)]
    pub source: HealthSourceKind,
    #[serde(default = "default_cpu_threshold")]
    pub cpu_threshold: f64,
    #[serde(default = "default_memory_threshold")]
    pub memory_threshold: f64,
    #[serde(default = "default_disk_threshold")]
    pub disk_threshold: f64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            source: HealthSourceKind::default(),
            cpu_threshold: default_cpu_threshold(),
            memory_threshold: default_memory_threshold(),
            disk_threshold: default_disk_threshold(),
        }
    }
}

fn default_cpu_threshold() -> f64 {
    80.0
}

fn default_memory_threshold() -> f64 {
    85.0
}

fn default_disk_threshold() -> f64 {
    90.0
}

impl AppConfig {
    /// Reads `CONFIG_FILE` (default `config.toml`) if present, then applies `PORT` and `APP_ENV`.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let mut config = match std::fs::read_to_string(&path) {
            Ok(s) => toml::from_str::<AppConfig>(&s)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}, using defaults", path);
                AppConfig::default()
            }
            Err(e) => return Err(anyhow::anyhow!("read {}: {}", path, e)),
        };
        config.apply_env_overrides(
            std::env::var("PORT").ok().as_deref(),
            std::env::var("APP_ENV").ok().as_deref(),
        )?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Environment variables win over the file.
    pub fn apply_env_overrides(
        &mut self,
        port: Option<&str>,
        environment: Option<&str>,
    ) -> anyhow::Result<()> {
        if let Some(port) = port {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("PORT must be a valid port number, got {:?}: {}", port, e))?;
        }
        if let Some(env) = environment
            && !env.trim().is_empty()
        {
            self.server.environment = env.trim().to_string();
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.environment.eq_ignore_ascii_case(PRODUCTION)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(!self.server.host.is_empty(), "server.host must be non-empty");
        if let Some(dir) = &self.server.static_dir {
            anyhow::ensure!(!dir.is_empty(), "server.static_dir must be non-empty when set");
        }
        anyhow::ensure!(
            self.docker.query_timeout_ms > 0,
            "docker.query_timeout_ms must be > 0, got {}",
            self.docker.query_timeout_ms
        );
        for (name, value) in [
            ("health.cpu_threshold", self.health.cpu_threshold),
            ("health.memory_threshold", self.health.memory_threshold),
            ("health.disk_threshold", self.health.disk_threshold),
        ] {
            anyhow::ensure!(
                value > 0.0 && value <= 100.0,
                "{} must be in (0, 100], got {}",
                name,
                value
            );
        }
        Ok(())
    }
}
