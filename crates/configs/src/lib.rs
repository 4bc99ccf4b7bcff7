use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub meme: MemeConfig,
    #[serde(default)]
    pub cce: Option<CceConfig>,
    #[serde(default)]
    pub cerino: Option<CerinoConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

/// `/meme`: configurable activation phrases persisted to a JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct MemeConfig {
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_persistence")]
    pub persistence: String,
}

impl Default for MemeConfig {
    fn default() -> Self {
        Self { token: String::new(), persistence: default_persistence() }
    }
}

/// `/cce`: picture lookup over a file of member names, one per line.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CceConfig {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub names: String,
    #[serde(default)]
    pub picture_url: String,
}

/// `/cerino`: random pick among the given words.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CerinoConfig {
    #[serde(default)]
    pub token: String,
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 10000 }
fn default_persistence() -> String { "persistence.json".into() }

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to defaults when the
    /// file does not exist, then apply environment overrides and validate.
    pub fn load_and_validate() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path).map_err(|e| anyhow!("cannot load {path}: {e}"))?
        } else {
            AppConfig::default()
        };
        cfg.apply_env(|key| std::env::var(key).ok());
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Override fields from environment-style variables.
    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("SERVER_PORT").and_then(|p| p.parse::<u16>().ok()) {
            self.server.port = port;
        }
        if let Some(token) = var("MEME_TOKEN") {
            self.meme.token = token;
        }
        if let Some(path) = var("MEME_PERSISTENCE") {
            self.meme.persistence = path;
        }

        let cce_token = var("CCE_TOKEN");
        let cce_names = var("CCE_NAMES");
        let cce_url = var("CCE_PICTURE_URL");
        if cce_token.is_some() || cce_names.is_some() || cce_url.is_some() {
            let cce = self.cce.get_or_insert_with(CceConfig::default);
            if let Some(token) = cce_token { cce.token = token; }
            if let Some(names) = cce_names { cce.names = names; }
            if let Some(url) = cce_url { cce.picture_url = url; }
        }

        if let Some(token) = var("CERINO_TOKEN") {
            self.cerino.get_or_insert_with(CerinoConfig::default).token = token;
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.meme.validate()?;
        if let Some(cce) = &self.cce {
            cce.validate()?;
        }
        if let Some(cerino) = &self.cerino {
            cerino.validate()?;
        }
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl MemeConfig {
    fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(anyhow!("meme.token is empty; set it in config.toml or MEME_TOKEN"));
        }
        if self.persistence.trim().is_empty() {
            return Err(anyhow!("meme.persistence must name a file"));
        }
        Ok(())
    }
}

impl CceConfig {
    fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(anyhow!("cce.token is empty; set it in config.toml or CCE_TOKEN"));
        }
        if self.names.trim().is_empty() {
            return Err(anyhow!("cce.names must name a file"));
        }
        if !self.picture_url.contains("{name}") {
            return Err(anyhow!("cce.picture_url must contain the {{name}} placeholder"));
        }
        Ok(())
    }
}

impl CerinoConfig {
    fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(anyhow!("cerino.token is empty; set it in config.toml or CERINO_TOKEN"));
        }
        Ok(())
    }
}
