//! Validated API keys.

use std::fmt;

use crate::KeyError;

/// A non-empty API key.
///
/// The key is redacted from `Debug` output.
///
/// # Examples
///
/// ```
/// use waymark_client::{ApiKey, KeyError};
///
/// assert_eq!(ApiKey::parse(None), Err(KeyError::Missing));
/// assert_eq!(ApiKey::parse(Some("")), Err(KeyError::Empty));
/// let key = ApiKey::parse(Some("my-api-key"))?;
/// assert_eq!(key.as_str(), "my-api-key");
/// # Ok::<(), KeyError>(())
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Validate a possibly absent key.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Missing`] for `None` and [`KeyError::Empty`] for an
    /// empty string.
    pub fn parse(key: Option<&str>) -> Result<Self, KeyError> {
        match key {
            None => Err(KeyError::Missing),
            Some("") => Err(KeyError::Empty),
            Some(value) => Ok(Self(value.to_owned())),
        }
    }

    /// The key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}
