use serde::Deserialize;

/// Main configuration structure for Web Analyzer
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub links: LinksConfig,
    #[serde(default)]
    pub parser: ParserConfig,
}

/// Settings for the single page fetch
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Overall timeout for the page request (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: format!("web-analyzer/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Settings for link reachability probing
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Maximum number of concurrent probe workers
    #[serde(rename = "max-workers")]
    pub max_workers: usize,

    /// Shared deadline for the whole probing phase (seconds)
    #[serde(rename = "deadline-secs")]
    pub deadline_secs: u64,

    /// Timeout for a single probe request (seconds)
    #[serde(rename = "probe-timeout-secs")]
    pub probe_timeout_secs: u64,

    /// Redirect hops followed before the last response is accepted as-is
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            max_workers: 20,
            deadline_secs: 30,
            probe_timeout_secs: 5,
            max_redirects: 3,
        }
    }
}

/// Settings for building the document tree
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Maximum element nesting depth accepted in a document
    #[serde(rename = "max-depth")]
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { max_depth: 512 }
    }
}
