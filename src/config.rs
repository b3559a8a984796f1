use std::{env, path::PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::web::status::TransitionPolicy;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_STORAGE_ROOT: &str = "storage";
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

/// Process-wide configuration, read once at startup and injected through
/// [`crate::web::AppState`]. Handlers never consult the environment directly.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub storage_root: PathBuf,
    pub public_base_url: String,
    pub allowed_origins: Vec<String>,
    pub transition_policy: TransitionPolicy,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL env var is missing")?;

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| anyhow!("PORT must be a number, got `{raw}`"))?,
            Err(_) => DEFAULT_PORT,
        };

        let storage_root = env::var("STORAGE_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORAGE_ROOT));

        let public_base_url = env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{port}"))
            .trim_end_matches('/')
            .to_string();

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().trim_end_matches('/').to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let transition_policy = match env::var("STATUS_TRANSITION_POLICY") {
            Ok(raw) => TransitionPolicy::parse(&raw)
                .ok_or_else(|| anyhow!("unknown STATUS_TRANSITION_POLICY `{raw}`"))?,
            Err(_) => TransitionPolicy::ForwardOnly,
        };

        Ok(Self {
            database_url,
            port,
            storage_root,
            public_base_url,
            allowed_origins,
            transition_policy,
        })
    }
}
