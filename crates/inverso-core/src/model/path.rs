use serde::{Deserialize, Serialize};

use crate::errors::{InversoError, Result};

/// Absolute hierarchical path of a spec, e.g. `/World/Cube`
///
/// Paths order component-wise, so a parent sorts before all of its
/// descendants and every subtree occupies a contiguous range of an
/// ordered map. The absolute root `/` has no components.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentPath {
    components: Vec<String>,
}

impl DocumentPath {
    /// The absolute root `/`
    pub fn root() -> Self {
        Self {
            components: Vec::new(),
        }
    }

    /// Parse an absolute path
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` if the text is not absolute or contains an
    /// empty or malformed component.
    pub fn parse(text: &str) -> Result<Self> {
        let rest = text.strip_prefix('/').ok_or_else(|| InversoError::InvalidPath {
            path: text.to_string(),
            reason: "path must be absolute".to_string(),
        })?;

        if rest.is_empty() {
            return Ok(Self::root());
        }

        let mut components = Vec::new();
        for name in rest.split('/') {
            validate_component(text, name)?;
            components.push(name.to_string());
        }
        Ok(Self { components })
    }

    /// Path of a direct child named `name`
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` if `name` is not a valid component.
    pub fn child(&self, name: &str) -> Result<Self> {
        validate_component(&format!("{}/{}", self, name), name)?;
        let mut components = self.components.clone();
        components.push(name.to_string());
        Ok(Self { components })
    }

    /// Parent path; `None` for the absolute root
    pub fn parent(&self) -> Option<Self> {
        if self.components.is_empty() {
            return None;
        }
        Some(Self {
            components: self.components[..self.components.len() - 1].to_vec(),
        })
    }

    /// Last component; `None` for the absolute root
    pub fn name(&self) -> Option<&str> {
        self.components.last().map(String::as_str)
    }

    pub fn is_root(&self) -> bool {
        self.components.is_empty()
    }

    /// Number of components
    pub fn depth(&self) -> usize {
        self.components.len()
    }

    /// True if `self` equals `prefix` or lies beneath it
    pub fn has_prefix(&self, prefix: &DocumentPath) -> bool {
        self.components.starts_with(&prefix.components)
    }

    /// Rebase `self` from under `old_prefix` to under `new_prefix`
    pub fn replace_prefix(
        &self,
        old_prefix: &DocumentPath,
        new_prefix: &DocumentPath,
    ) -> Option<Self> {
        if !self.has_prefix(old_prefix) {
            return None;
        }
        let mut components = new_prefix.components.clone();
        components.extend_from_slice(&self.components[old_prefix.components.len()..]);
        Some(Self { components })
    }
}

fn validate_component(path: &str, name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        Some("empty component")
    } else if name.contains('/') {
        Some("component contains '/'")
    } else if name.chars().any(char::is_whitespace) {
        Some("component contains whitespace")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(InversoError::InvalidPath {
            path: path.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

impl std::fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.components.is_empty() {
            return f.write_str("/");
        }
        for name in &self.components {
            write!(f, "/{}", name)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for DocumentPath {
    type Err = InversoError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
