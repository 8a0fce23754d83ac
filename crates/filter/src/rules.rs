//! Configurable admission rules.

use crate::{AdmissionFilter, Decision, Error, Result};
use events::{Level, LogEvent};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Admission rules loaded from TOML. The default admits everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterRules {
    /// Reject events less severe than this level.
    #[serde(default)]
    pub min_level: Option<Level>,

    /// Explicit rejections (checked first).
    #[serde(default)]
    pub deny: DenyRules,
}

/// Rules for rejected events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DenyRules {
    /// Reject these levels outright.
    #[serde(default)]
    pub levels: HashSet<Level>,

    /// Reject these loggers and their dotted descendants.
    #[serde(default)]
    pub loggers: Vec<String>,
}

impl FilterRules {
    /// Parse rules from a TOML string.
    pub fn parse(toml: &str) -> Result<Self> {
        toml::from_str(toml).map_err(|e| Error::Parse(e.to_string()))
    }

    /// True when the rules admit every event.
    pub fn is_permissive(&self) -> bool {
        self.min_level.is_none() && self.deny.levels.is_empty() && self.deny.loggers.is_empty()
    }

    fn logger_denied(&self, logger: &str) -> Option<&str> {
        self.deny
            .loggers
            .iter()
            .find(|denied| {
                logger == denied.as_str()
                    || logger
                        .strip_prefix(denied.as_str())
                        .is_some_and(|rest| rest.starts_with('.'))
            })
            .map(String::as_str)
    }
}

impl AdmissionFilter for FilterRules {
    fn decide(&self, event: &LogEvent) -> Decision {
        if self.deny.levels.contains(&event.level) {
            return Decision::Reject {
                reason: format!("level {} is denied", event.level),
            };
        }

        if let Some(denied) = event.logger.as_deref().and_then(|l| self.logger_denied(l)) {
            return Decision::Reject {
                reason: format!("logger is under denied '{denied}'"),
            };
        }

        match self.min_level {
            Some(min) if event.level < min => Decision::Reject {
                reason: format!("level {} is below {min}", event.level),
            },
            _ => Decision::Admit,
        }
    }
}
