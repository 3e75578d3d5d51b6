//! Node path tracking and capture-key resolution.
//!
//! The path is a single dot-joined string of ancestor node names. Leaving a node
//! truncates by the leaving name's length plus the separator. It does not pop a
//! structural segment, so names that themselves contain '.' still truncate by
//! character count.

use crate::config::{Mode, PropertyManagerConfig};
use crate::value::PropertyKind;

pub const SEPARATOR: char = '.';

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodePath {
    current: String,
}

impl NodePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.current
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn enter(&mut self, name: &str) {
        if !self.current.is_empty() {
            self.current.push(SEPARATOR);
        }
        self.current.push_str(name);
    }

    /// Resets to empty when the path is not longer than `name` (unbalanced leave).
    pub fn leave(&mut self, name: &str) {
        if self.current.len() > name.len() {
            let mut cut = self.current.len() - name.len() - 1;
            // Unbalanced leaves can land inside a multi-byte char; round down.
            while !self.current.is_char_boundary(cut) {
                cut -= 1;
            }
            self.current.truncate(cut);
        } else {
            self.current.clear();
        }
    }
}

/// Decides whether a property is captured and under which key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPolicy {
    mode: Mode,
    prefix: String,
}

impl KeyPolicy {
    pub fn new(mode: Mode, prefix: impl Into<String>) -> Self {
        Self {
            mode,
            prefix: prefix.into(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// `None` rejects the property: unnamed node or name without the prefix.
    pub fn accept_key(
        &self,
        node_name: Option<&str>,
        kind: PropertyKind,
        path: &NodePath,
    ) -> Option<String> {
        let name = node_name?;
        if !name.starts_with(self.prefix.as_str()) {
            return None;
        }
        let key = match self.mode {
            Mode::Collapse => name.to_string(),
            Mode::Namespaced => format!("{}{}", path.as_str(), kind.suffix()),
        };
        Some(key)
    }
}

impl From<&PropertyManagerConfig> for KeyPolicy {
    fn from(cfg: &PropertyManagerConfig) -> Self {
        KeyPolicy::new(cfg.mode, cfg.prefix.clone())
    }
}
