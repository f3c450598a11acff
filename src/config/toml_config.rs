use crate::core::matcher::MatchPolicy;
use crate::utils::error::{Result, ScoutError};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_selector, validate_unique,
    validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Provider set shipped with the binary, used when no file is given.
const BUILTIN_PROVIDERS: &str = include_str!("../../config/providers.toml");

pub const QUERY_PLACEHOLDER: &str = "{query}";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoutConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    pub providers: Vec<ProviderConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout_seconds() -> u64 {
    15
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

/// One retail site scraped from its search results page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub id: String,
    pub base_url: String,
    /// Path appended to `base_url`; `{query}` is replaced by the encoded model.
    pub search_path: String,
    pub selectors: CardSelectors,
    /// When set, the matched card's link is fetched and read with these.
    pub detail: Option<DetailSelectors>,
    #[serde(default)]
    pub matching: MatchPolicy,
    /// Overrides `http.timeout_seconds` for this provider.
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardSelectors {
    pub card: String,
    pub title: String,
    pub link: String,
    pub price: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetailSelectors {
    pub title: Option<String>,
    pub sub_title: Option<String>,
    pub sale_price: Option<String>,
    pub regular_price: Option<String>,
    pub short_description: Option<String>,
    pub status: Option<String>,
    pub sku: Option<String>,
    pub image: Option<String>,
}

impl DetailSelectors {
    /// Selectors whose text is copied verbatim into a listing's `extra`.
    pub fn extra_fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("sub_title", &self.sub_title),
            ("regular_price", &self.regular_price),
            ("short_description", &self.short_description),
            ("status", &self.status),
            ("sku", &self.sku),
        ]
        .into_iter()
        .filter_map(|(name, selector)| selector.as_deref().map(|s| (name, s)))
        .collect()
    }

    fn all(&self) -> Vec<(&'static str, &str)> {
        let mut selectors = self.extra_fields();
        for (name, selector) in [
            ("title", &self.title),
            ("sale_price", &self.sale_price),
            ("image", &self.image),
        ] {
            if let Some(selector) = selector.as_deref() {
                selectors.push((name, selector));
            }
        }
        selectors
    }
}

impl ScoutConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScoutError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScoutError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_PROVIDERS)
    }

    /// Loads `path` when given, the built-in provider set otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::builtin()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScoutError::ParseError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn provider(&self, id: &str) -> Option<&ProviderConfig> {
        self.providers.iter().find(|p| p.id == id)
    }
}

impl ProviderConfig {
    pub fn timeout_seconds(&self, http: &HttpConfig) -> u64 {
        self.timeout_seconds.unwrap_or(http.timeout_seconds)
    }

    fn validate_with_prefix(&self, prefix: &str) -> Result<()> {
        validate_non_empty_string(&format!("{}.id", prefix), &self.id)?;
        validate_url(&format!("{}.base_url", prefix), &self.base_url)?;

        if !self.search_path.contains(QUERY_PLACEHOLDER) {
            return Err(ScoutError::InvalidConfigValueError {
                field: format!("{}.search_path", prefix),
                value: self.search_path.clone(),
                reason: format!("Must contain the {} placeholder", QUERY_PLACEHOLDER),
            });
        }

        validate_selector(&format!("{}.selectors.card", prefix), &self.selectors.card)?;
        validate_selector(&format!("{}.selectors.title", prefix), &self.selectors.title)?;
        validate_selector(&format!("{}.selectors.link", prefix), &self.selectors.link)?;
        let optional = [
            ("price", &self.selectors.price),
            ("image", &self.selectors.image),
        ];
        for (name, selector) in optional {
            if let Some(selector) = selector {
                validate_selector(&format!("{}.selectors.{}", prefix, name), selector)?;
            }
        }
        if let Some(detail) = &self.detail {
            for (name, selector) in detail.all() {
                validate_selector(&format!("{}.detail.{}", prefix, name), selector)?;
            }
        }

        if let Some(timeout) = self.timeout_seconds {
            validate_positive_number(&format!("{}.timeout_seconds", prefix), timeout, 1)?;
        }
        Ok(())
    }
}

impl Validate for ScoutConfig {
    fn validate(&self) -> Result<()> {
        if self.providers.is_empty() {
            return Err(ScoutError::MissingConfigError {
                field: "providers".to_string(),
            });
        }
        validate_unique("providers.id", self.providers.iter().map(|p| p.id.as_str()))?;
        validate_positive_number("http.timeout_seconds", self.http.timeout_seconds, 1)?;
        validate_non_empty_string("http.user_agent", &self.http.user_agent)?;

        for (index, provider) in self.providers.iter().enumerate() {
            provider.validate_with_prefix(&format!("providers[{}]", index))?;
        }
        Ok(())
    }
}
