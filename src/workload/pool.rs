use std::sync::Arc;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::ConfigError;

/// Non-empty, fixed set of identifiers sampled uniformly per request.
/// Cloning shares the underlying slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterPool {
    ids: Arc<[String]>,
}

impl ParameterPool {
    /// # Errors
    ///
    /// Returns `EmptyAuthorPool` for an empty list and `BlankAuthorId` when
    /// any identifier is blank.
    pub fn new<I, S>(ids: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut collected = Vec::new();
        for id in ids {
            let id = id.into();
            let trimmed = id.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::BlankAuthorId);
            }
            collected.push(trimmed.to_owned());
        }
        if collected.is_empty() {
            return Err(ConfigError::EmptyAuthorPool);
        }
        Ok(Self {
            ids: collected.into(),
        })
    }

    pub fn sample<R>(&self, rng: &mut R) -> &str
    where
        R: Rng + ?Sized,
    {
        // `new` guarantees at least one entry.
        self.ids
            .choose(rng)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Number of identifiers; always at least one.
    #[must_use]
    pub fn size(&self) -> usize {
        self.ids.len()
    }

    #[cfg(test)]
    #[must_use]
    pub(crate) fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|candidate| candidate == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}
