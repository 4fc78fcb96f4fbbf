use std::path::PathBuf;

use serde::Deserialize;

use crate::services::vectorizer::VectorizerOptions;

/// How catalog entries are turned into documents for the vector index
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IndexMode {
    /// Normalized titles, unigrams and bigrams
    #[default]
    Titles,
    /// Title, overview and genre names, unigrams with English stop words removed
    Content,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the TMDB CSV exports
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_movies_file")]
    pub movies_file: String,

    #[serde(default = "default_credits_file")]
    pub credits_file: String,

    /// Remote movies CSV; takes precedence over the local file when set
    #[serde(default)]
    pub movies_url: Option<String>,

    /// Serve the built-in sample catalog without reading any CSV
    #[serde(default)]
    pub use_sample_data: bool,

    #[serde(default)]
    pub index_mode: IndexMode,

    /// Vocabulary cap used in content mode
    #[serde(default = "default_max_features")]
    pub max_features: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5002
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_movies_file() -> String {
    "tmdb_5000_movies.csv".to_string()
}

fn default_credits_file() -> String {
    "tmdb_5000_credits.csv".to_string()
}

fn default_max_features() -> usize {
    5000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_dir: default_data_dir(),
            movies_file: default_movies_file(),
            credits_file: default_credits_file(),
            movies_url: None,
            use_sample_data: false,
            index_mode: IndexMode::default(),
            max_features: default_max_features(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn movies_path(&self) -> PathBuf {
        self.data_dir.join(&self.movies_file)
    }

    pub fn credits_path(&self) -> PathBuf {
        self.data_dir.join(&self.credits_file)
    }

    /// Vectorizer settings for the configured index mode
    pub fn vectorizer_options(&self) -> VectorizerOptions {
        match self.index_mode {
            IndexMode::Titles => VectorizerOptions::titles(),
            IndexMode::Content => VectorizerOptions::content(self.max_features),
        }
    }
}
