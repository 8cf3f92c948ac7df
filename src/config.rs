// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Configuration system

use crate::ast::{EvalOptions, UnknownLabelPolicy, DEFAULT_MAX_DEPTH};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "xmlexpr.toml";

/// Prompt shown by the interactive session
pub const DEFAULT_PROMPT: &str = "Enter the name of an expression XML file: ";

/// What the interactive session does after a failed input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Report the error and end the session
    #[default]
    Halt,
    /// Report the error and prompt for the next file
    Continue,
}

impl ErrorPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "halt" => Some(ErrorPolicy::Halt),
            "continue" => Some(ErrorPolicy::Continue),
            _ => None,
        }
    }
}

fn unknown_labels_from_str(s: &str) -> Option<UnknownLabelPolicy> {
    match s.to_lowercase().as_str() {
        "reject" => Some(UnknownLabelPolicy::Reject),
        "zero" => Some(UnknownLabelPolicy::Zero),
        _ => None,
    }
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Deepest expression nesting accepted
    pub max_depth: usize,
    /// Handling of labels that are not operators
    pub unknown_labels: UnknownLabelPolicy,
    /// Interactive session behaviour after an error
    pub on_error: ErrorPolicy,
    /// Interactive prompt text
    pub prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            unknown_labels: UnknownLabelPolicy::Reject,
            on_error: ErrorPolicy::Halt,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Reads `path` if given, otherwise `xmlexpr.toml` when it exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if PathBuf::from(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `XMLEXPR_*` overrides obtained through `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(depth) = lookup("XMLEXPR_MAX_DEPTH") {
            self.max_depth = depth
                .parse()
                .with_context(|| format!("XMLEXPR_MAX_DEPTH is not a number: {:?}", depth))?;
        }

        if let Some(policy) = lookup("XMLEXPR_ON_ERROR") {
            self.on_error = ErrorPolicy::from_str(&policy)
                .ok_or_else(|| anyhow!("XMLEXPR_ON_ERROR must be halt or continue, got {:?}", policy))?;
        }

        if let Some(policy) = lookup("XMLEXPR_UNKNOWN_LABELS") {
            self.unknown_labels = unknown_labels_from_str(&policy).ok_or_else(|| {
                anyhow!("XMLEXPR_UNKNOWN_LABELS must be reject or zero, got {:?}", policy)
            })?;
        }

        if let Some(prompt) = lookup("XMLEXPR_PROMPT") {
            self.prompt = prompt;
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Evaluator settings derived from this configuration
    pub fn eval_options(&self) -> EvalOptions {
        EvalOptions {
            max_depth: self.max_depth,
            unknown_labels: self.unknown_labels,
        }
    }
}
