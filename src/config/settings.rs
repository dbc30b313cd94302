use std::{
    fmt,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use tracing::{debug, warn};
use url::Url;

use crate::env::{load_env_file, lookup, EnvMap};

pub const DEFAULT_CONFIG_FILE: &str = "deploy-config.json";
pub const DEFAULT_ENDPOINT: &str = "https://space.ai-builders.com/backend/v1/deployments";
pub const DEFAULT_ORIGIN: &str = "https://www.superlinear.academy/";
/// Sent when no credential is configured anywhere.
pub const DEFAULT_TOKEN: &str = "sk_unset_deploy_token";

pub const PRIME_TIMEOUT: Duration = Duration::from_secs(10);
pub const SUBMIT_TIMEOUT: Duration = Duration::from_secs(120);

const CONFIG_KEY: &str = "DEPLOY_CONFIG";
const ENDPOINT_KEY: &str = "DEPLOY_ENDPOINT";
const ORIGIN_KEY: &str = "DEPLOY_ORIGIN";
const TOKEN_KEY: &str = "DEPLOY_TOKEN";

fn resolve_relative(base: &Path, value: &Path) -> PathBuf {
    if value.is_absolute() {
        value.to_path_buf()
    } else {
        base.join(value)
    }
}

/// Everything a single submission needs, resolved before any I/O happens.
#[derive(Clone)]
pub struct SubmitSettings {
    pub config_path: PathBuf,
    pub endpoint: Url,
    pub origin: Url,
    pub token: String,
    pub prime_timeout: Duration,
    pub submit_timeout: Duration,
    pub env_files: Vec<PathBuf>,
}

impl fmt::Debug for SubmitSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmitSettings")
            .field("config_path", &self.config_path)
            .field("endpoint", &self.endpoint.as_str())
            .field("origin", &self.origin.as_str())
            .field("token", &"<redacted>")
            .field("prime_timeout", &self.prime_timeout)
            .field("submit_timeout", &self.submit_timeout)
            .field("env_files", &self.env_files)
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub config_path: Option<PathBuf>,
    pub endpoint: Option<String>,
    pub origin: Option<String>,
    pub token: Option<String>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct SettingsBuilder {
    base_dir: PathBuf,
    overrides: SettingsOverrides,
}

impl SettingsBuilder {
    pub fn new(base_dir: PathBuf, overrides: SettingsOverrides) -> Self {
        Self {
            base_dir,
            overrides,
        }
    }

    pub fn build(&self) -> Result<SubmitSettings> {
        let mut env: EnvMap = EnvMap::new();
        let mut env_files = Vec::new();

        if let Some(explicit) = &self.overrides.env_file {
            let path = resolve_relative(&self.base_dir, explicit);
            env_files.push(load_env_file(&path, &mut env)?);
        } else {
            // a .env in the working directory is optional and may belong to other tools
            let implicit = self.base_dir.join(".env");
            if implicit.is_file() {
                let mut loaded = EnvMap::new();
                match load_env_file(&implicit, &mut loaded) {
                    Ok(path) => {
                        env.extend(loaded);
                        env_files.push(path);
                    }
                    Err(err) => warn!(
                        path = %implicit.display(),
                        error = %format!("{err:#}"),
                        "skipping unreadable .env"
                    ),
                }
            }
        }

        let config_path = self
            .overrides
            .config_path
            .clone()
            .or_else(|| lookup(&env, CONFIG_KEY).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        let config_path = resolve_relative(&self.base_dir, &config_path);

        let endpoint = pick(
            self.overrides.endpoint.as_ref(),
            &env,
            ENDPOINT_KEY,
            DEFAULT_ENDPOINT,
        );
        let endpoint = parse_http_url("endpoint", &endpoint)?;

        let origin = pick(
            self.overrides.origin.as_ref(),
            &env,
            ORIGIN_KEY,
            DEFAULT_ORIGIN,
        );
        let origin = parse_http_url("origin", &origin)?;

        let token = match self
            .overrides
            .token
            .clone()
            .or_else(|| lookup(&env, TOKEN_KEY))
        {
            Some(token) => token,
            None => {
                warn!("no {TOKEN_KEY} configured, sending the built-in placeholder credential");
                DEFAULT_TOKEN.to_string()
            }
        };

        debug!(
            config = %config_path.display(),
            endpoint = %endpoint,
            origin = %origin,
            env_files = env_files.len(),
            "resolved settings"
        );

        Ok(SubmitSettings {
            config_path,
            endpoint,
            origin,
            token,
            prime_timeout: PRIME_TIMEOUT,
            submit_timeout: SUBMIT_TIMEOUT,
            env_files,
        })
    }
}

fn pick(explicit: Option<&String>, env: &EnvMap, key: &str, default: &str) -> String {
    explicit
        .cloned()
        .or_else(|| lookup(env, key))
        .unwrap_or_else(|| default.to_string())
}

fn parse_http_url(name: &str, value: &str) -> Result<Url> {
    let url = Url::parse(value).with_context(|| format!("invalid {name} URL {value}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("{name} URL must use http or https: {value}");
    }
    Ok(url)
}
