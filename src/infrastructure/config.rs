use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub backend: BackendSettings,
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub token: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub listen_addr: String,
}

/// Load configuration from `config/backend` with `FLEET_`-prefixed
/// environment overrides (e.g. `FLEET_BACKEND__TOKEN`).
pub fn load_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .set_default("backend.timeout_secs", 30)?
        .set_default("backend.token", "")?
        .set_default("server.listen_addr", "0.0.0.0:8080")?
        .add_source(config::File::with_name("config/backend").required(false))
        .add_source(config::Environment::with_prefix("FLEET").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
