use anyhow::{Context, Result, bail};
use globset::{Glob, GlobSet, GlobSetBuilder};
use loopguard_binder::{BinderOptions, GlobalAccess, SourceType};
use loopguard_lint::{LintOptions, RuleSeverity};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "loopguard.json";

/// Extensions linted when a directory is walked.
pub const LINTABLE_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "ts", "mts", "cts"];

fn default_include() -> Vec<String> {
    LINTABLE_EXTENSIONS
        .iter()
        .map(|ext| format!("**/*.{ext}"))
        .collect()
}

fn default_exclude() -> Vec<String> {
    vec!["**/node_modules/**".to_string()]
}

/// Contents of `loopguard.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoopguardConfig {
    #[serde(default = "default_include")]
    pub include: Vec<String>,
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub globals: BTreeMap<String, GlobalAccess>,
    /// Forces every file to `script` or `module`; by default `.cjs`/`.cts`
    /// files are scripts and the rest are modules
    #[serde(default)]
    pub source_type: Option<SourceType>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RulesConfig {
    #[serde(rename = "no-loop-func", default)]
    pub no_loop_func: RuleSeverity,
}

impl Default for LoopguardConfig {
    fn default() -> Self {
        LoopguardConfig {
            include: default_include(),
            exclude: default_exclude(),
            rules: RulesConfig::default(),
            globals: BTreeMap::new(),
            source_type: None,
        }
    }
}

impl LoopguardConfig {
    /// Options for linting the file at `path`.
    pub fn lint_options(&self, path: &Path) -> LintOptions {
        LintOptions {
            no_loop_func: self.rules.no_loop_func,
            binder: BinderOptions {
                source_type: self
                    .source_type
                    .unwrap_or_else(|| SourceType::from_path(path)),
                globals: self.globals.clone(),
            },
        }
    }

    /// Merge `--global NAME[:ACCESS]` flags over the configured globals.
    pub fn apply_global_flags(&mut self, flags: &[String]) -> Result<()> {
        for flag in flags {
            let (name, access) = match flag.split_once(':') {
                Some((name, access)) => (name, parse_global_access(access)?),
                None => (flag.as_str(), GlobalAccess::Readonly),
            };
            if name.is_empty() {
                bail!("--global needs a variable name, got '{flag}'");
            }
            self.globals.insert(name.to_string(), access);
        }
        Ok(())
    }

    pub fn file_filter(&self) -> Result<FileFilter> {
        Ok(FileFilter {
            include: build_glob_set(&self.include).context("invalid include pattern")?,
            exclude: build_glob_set(&self.exclude).context("invalid exclude pattern")?,
        })
    }
}

fn parse_global_access(access: &str) -> Result<GlobalAccess> {
    serde_json::from_value(serde_json::Value::String(access.to_string()))
        .with_context(|| format!("invalid access '{access}' for --global"))
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).with_context(|| format!("failed to compile glob '{pattern}'"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

/// Include/exclude patterns, matched against paths relative to the walked
/// root.
#[derive(Debug, Clone)]
pub struct FileFilter {
    include: GlobSet,
    exclude: GlobSet,
}

impl FileFilter {
    pub fn is_included(&self, relative: &Path) -> bool {
        self.include.is_match(relative) && !self.exclude.is_match(relative)
    }

    pub fn is_excluded(&self, relative: &Path) -> bool {
        self.exclude.is_match(relative)
    }
}

pub fn parse_config(source: &str) -> Result<LoopguardConfig> {
    let config = serde_json::from_str(source).context("failed to parse loopguard config JSON")?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<LoopguardConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("failed to parse config: {}", path.display()))
}

/// Nearest `loopguard.json` in `start` or one of its ancestors.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}
