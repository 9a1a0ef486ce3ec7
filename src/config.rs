// Configuration for both binaries. A `Config` is built once at startup
// (defaults, then environment overrides) and handed to every component by
// reference. Nothing in the crate reads the environment on its own.

use crate::error::{ClientError, Result};
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_UPLOAD_WEBHOOK_URL: &str =
    "https://fondly-assisting-setter.cloudpub.ru/webhook/pinecone-upload";
pub const DEFAULT_SEARCH_WEBHOOK_URL: &str =
    "https://fondly-assisting-setter.cloudpub.ru/webhook/pinecone-search";
pub const DEFAULT_NAMESPACE: &str = "default";
pub const DEFAULT_DATA_DIR: &str = "./data";

const MB: u64 = 1024 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub upload_url: String,
    pub search_url: String,
    pub namespace: String,
    pub data_dir: PathBuf,
    pub upload_timeout: Duration,
    pub search_timeout: Duration,
    /// Characters per chunk, applied by the remote service.
    pub chunk_size: u32,
    pub chunk_overlap: u32,
    /// Model and dimension the remote index was built with. Informational.
    pub embedding_model: String,
    pub embedding_dimension: u32,
    pub top_k: usize,
    pub min_score: f64,
    pub max_file_size_bytes: u64,
    /// Lowercase extensions including the dot, e.g. `.txt`.
    pub supported_extensions: Vec<String>,
    pub verbose_logging: bool,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            upload_url: DEFAULT_UPLOAD_WEBHOOK_URL.into(),
            search_url: DEFAULT_SEARCH_WEBHOOK_URL.into(),
            namespace: DEFAULT_NAMESPACE.into(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            upload_timeout: Duration::from_secs(300),
            search_timeout: Duration::from_secs(120),
            chunk_size: 600,
            chunk_overlap: 100,
            embedding_model: "text-embedding-3-large".into(),
            embedding_dimension: 1024,
            top_k: 5,
            min_score: 0.0,
            max_file_size_bytes: 50 * MB,
            supported_extensions: vec![".txt".into()],
            verbose_logging: false,
            log_level: "info".into(),
        }
    }
}

impl Config {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with whatever `lookup` returns. Empty values are
    /// treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut cfg = Config::default();

        if let Some(dir) = get("DATA_DIR") {
            cfg.data_dir = expand_home(&dir);
        }
        if let Some(url) = get("N8N_UPLOAD_WEBHOOK_URL") {
            cfg.upload_url = url;
        }
        if let Some(url) = get("N8N_SEARCH_WEBHOOK_URL") {
            cfg.search_url = url;
        }
        if let Some(ns) = get("PINECONE_NAMESPACE") {
            cfg.namespace = ns;
        }
        if let Some(secs) = parse_var::<u64, _>(&get, "UPLOAD_TIMEOUT")? {
            cfg.upload_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var::<u64, _>(&get, "SEARCH_TIMEOUT")? {
            cfg.search_timeout = Duration::from_secs(secs);
        }
        if let Some(size) = parse_var(&get, "CHUNK_SIZE")? {
            cfg.chunk_size = size;
        }
        if let Some(overlap) = parse_var(&get, "CHUNK_OVERLAP")? {
            cfg.chunk_overlap = overlap;
        }
        if let Some(k) = parse_var(&get, "SEARCH_TOP_K")? {
            cfg.top_k = k;
        }
        if let Some(score) = parse_var(&get, "SEARCH_MIN_SCORE")? {
            cfg.min_score = score;
        }
        if let Some(mb) = parse_var::<f64, _>(&get, "MAX_FILE_SIZE_MB")? {
            if !mb.is_finite() || mb < 0.0 {
                return Err(ClientError::Config(format!(
                    "MAX_FILE_SIZE_MB must be a finite, non-negative number, got {mb}"
                )));
            }
            cfg.max_file_size_bytes = (mb * MB as f64) as u64;
        }
        if let Some(flag) = get("ENABLE_VERBOSE_LOGGING") {
            cfg.verbose_logging = parse_flag("ENABLE_VERBOSE_LOGGING", &flag)?;
        }
        if let Some(level) = get("LOG_LEVEL") {
            cfg.log_level = level.to_lowercase();
        }

        if cfg.chunk_overlap >= cfg.chunk_size {
            return Err(ClientError::Config(format!(
                "chunk overlap ({}) must be smaller than chunk size ({})",
                cfg.chunk_overlap, cfg.chunk_size
            )));
        }
        Ok(cfg)
    }

    pub fn max_file_size_mb(&self) -> f64 {
        self.max_file_size_bytes as f64 / MB as f64
    }

    /// Filter directive for `tracing_subscriber::EnvFilter` when `RUST_LOG`
    /// is not set.
    pub fn log_filter(&self) -> String {
        let level = if self.verbose_logging {
            "debug"
        } else {
            self.log_level.as_str()
        };
        format!("pinecone_hook={level},pinecone_search={level},pinecone_upload={level}")
    }
}

fn parse_var<T, G>(get: &G, key: &str) -> Result<Option<T>>
where
    G: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match get(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| ClientError::Config(format!("{key}={raw:?}: {e}"))),
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ClientError::Config(format!(
            "{key}={other:?}: expected true or false"
        ))),
    }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(path));
    }
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
