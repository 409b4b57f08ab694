//! Loader for `domseek.yaml` with environment overlays.
//!
//! Sources are merged in the order they are attached; `DOMSEEK__`-prefixed
//! environment variables are layered last and win over every file
//! (`DOMSEEK__FETCH__TIMEOUT_SECS=5` sets `fetch.timeout_secs`). After
//! merging, every string value has `${VAR}` / `$VAR` references expanded,
//! recursively up to a fixed depth.
//!
//! ```yaml
//! version: "1"
//! logging:
//!   level: debug
//!   format: json
//!   stderr: true
//! normalize:
//!   case_insensitive: true
//! jobs:
//!   - id: pricing
//!     source: url
//!     url: "https://example.com/${PAGE}"
//!     query:
//!       price: "per month"
//! ```
use config::{Config, ConfigError, Environment, File};
use domseek_search::NormalizeOptions;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

#[derive(Debug, Deserialize)]
pub struct DomseekConfig {
    pub version: Option<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub normalize: NormalizeOptions,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub jobs: Vec<JobSpec>,
}

impl DomseekConfig {
    /// Enabled jobs, optionally narrowed to a single id.
    pub fn active_jobs<'a>(&'a self, only: Option<&'a str>) -> impl Iterator<Item = &'a JobSpec> {
        self.jobs
            .iter()
            .filter(|job| job.enabled.unwrap_or(true))
            .filter(move |job| only.is_none_or(|id| job.id == id))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
    /// Mirror events to stderr as well as the log file.
    pub stderr: bool,
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Text,
            stderr: false,
            dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub user_agent: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            user_agent: None,
        }
    }
}

/// One configured search: where the HTML comes from and what to look for.
#[derive(Debug, Deserialize)]
pub struct JobSpec {
    pub id: String,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(flatten)]
    pub source: JobSource,
    #[serde(default)]
    pub query: BTreeMap<String, String>,
}

/// The tag is `source`; the payload sits beside it.
#[derive(Debug, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum JobSource {
    File { path: PathBuf },
    Url { url: String },
    Inline { html: String },
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hiding the `config` crate wiring (YAML + env overrides).
pub struct DomseekConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for DomseekConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DomseekConfigLoader {
    /// Start from defaults; environment overrides are applied by [`Self::load`].
    ///
    /// ```
    /// use domseek_config::DomseekConfigLoader;
    ///
    /// let config = DomseekConfigLoader::new()
    ///     .with_yaml_str("version: '1'\njobs: []")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.version.as_deref(), Some("1"));
    /// assert!(config.jobs.is_empty());
    /// assert_eq!(config.fetch.timeout_secs, 15);
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a YAML/TOML/JSON file; the format is inferred from the suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that may be absent, so a run can be driven by the
    /// environment alone.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Merge an inline YAML snippet.
    ///
    /// ```
    /// use domseek_config::{DomseekConfigLoader, JobSource};
    ///
    /// let cfg = DomseekConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// jobs:
    ///   - id: "greeting"
    ///     source: inline
    ///     html: "<p>Hello</p>"
    ///     query:
    ///       a: hello
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.jobs.len(), 1);
    /// assert!(matches!(cfg.jobs[0].source, JobSource::Inline { .. }));
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Layer the environment, build the merged sources, expand `${VAR}` placeholders and
    /// deserialize into [`DomseekConfig`].
    ///
    /// ```
    /// use domseek_config::{DomseekConfigLoader, JobSource};
    ///
    /// unsafe { std::env::set_var("DOMSEEK_DOC_PAGE", "pricing"); }
    ///
    /// let config = DomseekConfigLoader::new()
    ///     .with_yaml_str(r#"
    /// jobs:
    ///   - id: "remote"
    ///     source: url
    ///     url: "https://example.com/${DOMSEEK_DOC_PAGE}"
    ///     query:
    ///       plan: "per month"
    /// "#)
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// match &config.jobs[0].source {
    ///     JobSource::Url { url } => assert_eq!(url, "https://example.com/pricing"),
    ///     other => panic!("expected url source, got {other:?}"),
    /// }
    ///
    /// unsafe { std::env::remove_var("DOMSEEK_DOC_PAGE"); }
    /// ```
    pub fn load(self) -> Result<DomseekConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix("DOMSEEK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: DomseekConfig =
            serde_json::from_value(v).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}
