//! Process configuration, read once from the environment at start-up.

use std::net::SocketAddr;
use std::path::PathBuf;

use snipbin_core::query::DEFAULT_MAX_LIMIT;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Memory,
    S3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub store: StoreKind,
    /// Required when `store` is [`StoreKind::S3`].
    pub bucket: Option<String>,
    /// Prepended to every object key. Empty, or ends with `/`.
    pub key_prefix: String,
    /// Custom S3 endpoint for MinIO, LocalStack and the like.
    pub s3_endpoint: Option<String>,
    pub max_page_size: usize,
    pub static_dir: Option<PathBuf>,
    pub log_format: LogFormat,
    /// Running inside AWS Lambda rather than as a standalone server.
    pub lambda: bool,
}

impl ServerConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key/value source. Blank values count as
    /// unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let addr = match (get("SNIPBIN_ADDR"), get("PORT")) {
            (Some(addr), _) => addr
                .parse()
                .map_err(|e| eyre::eyre!("invalid SNIPBIN_ADDR {addr:?}: {e}"))?,
            (None, Some(port)) => {
                let port: u16 = port
                    .parse()
                    .map_err(|e| eyre::eyre!("invalid PORT {port:?}: {e}"))?;
                SocketAddr::from(([0, 0, 0, 0], port))
            }
            (None, None) => DEFAULT_ADDR.parse()?,
        };

        let store = match get("SNIPBIN_STORE").as_deref().map(str::to_ascii_lowercase) {
            None => StoreKind::Memory,
            Some(kind) if kind == "memory" => StoreKind::Memory,
            Some(kind) if kind == "s3" => StoreKind::S3,
            Some(other) => {
                return Err(eyre::eyre!(
                    "invalid SNIPBIN_STORE {other:?}: expected \"memory\" or \"s3\""
                ));
            }
        };

        let bucket = get("SNIPBIN_BUCKET");
        if store == StoreKind::S3 && bucket.is_none() {
            return Err(eyre::eyre!("SNIPBIN_BUCKET is required when SNIPBIN_STORE=s3"));
        }

        let key_prefix = match get("SNIPBIN_KEY_PREFIX") {
            Some(p) if p.ends_with('/') => p,
            Some(p) => format!("{p}/"),
            None => String::new(),
        };

        let max_page_size = match get("SNIPBIN_MAX_PAGE_SIZE") {
            Some(raw) => {
                let n: usize = raw
                    .parse()
                    .map_err(|e| eyre::eyre!("invalid SNIPBIN_MAX_PAGE_SIZE {raw:?}: {e}"))?;
                if n == 0 {
                    return Err(eyre::eyre!("SNIPBIN_MAX_PAGE_SIZE must be at least 1"));
                }
                n
            }
            None => DEFAULT_MAX_LIMIT,
        };

        let log_format = match get("SNIPBIN_LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            Some("text") | None => LogFormat::Text,
            Some(other) => {
                return Err(eyre::eyre!(
                    "invalid SNIPBIN_LOG_FORMAT {other:?}: expected \"text\" or \"json\""
                ));
            }
        };

        Ok(Self {
            addr,
            store,
            bucket,
            key_prefix,
            s3_endpoint: get("SNIPBIN_S3_ENDPOINT"),
            max_page_size,
            static_dir: get("SNIPBIN_STATIC_DIR").map(PathBuf::from),
            log_format,
            lambda: lookup("AWS_LAMBDA_RUNTIME_API").is_some(),
        })
    }
}
