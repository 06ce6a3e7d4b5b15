//! Storage key generation.
//!
//! Keys are drawn from the operating system's CSPRNG. A failure to read
//! entropy is reported, never papered over with a weaker source.

use std::fmt::{Display, Formatter, Result as FmtResult};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::rngs::OsRng;
use rand::TryRngCore;
use thiserror::Error;
use tubely_core::constants::STORAGE_KEY_BYTES;

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("Entropy source unavailable: {0}")]
    EntropySource(String),

    #[error("Invalid key extension: {0:?}")]
    InvalidExtension(String),
}

/// Random, collision-resistant object name: `{base64url(32 bytes)}.{extension}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey {
    value: String,
    extension_start: usize,
}

impl StorageKey {
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Extension without the leading dot.
    pub fn extension(&self) -> &str {
        &self.value[self.extension_start..]
    }

    /// The random part of the key, without extension.
    pub fn stem(&self) -> &str {
        &self.value[..self.extension_start - 1]
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

fn validate_extension(extension: &str) -> Result<(), KeyError> {
    let valid = !extension.is_empty()
        && extension
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '+');
    if valid {
        Ok(())
    } else {
        Err(KeyError::InvalidExtension(extension.to_string()))
    }
}

/// Generate a fresh storage key using the OS random source.
pub fn generate_key(extension: &str) -> Result<StorageKey, KeyError> {
    let mut rng = OsRng;
    generate_key_with(&mut rng, extension)
}

/// Generate a storage key from `rng`.
pub fn generate_key_with<R>(rng: &mut R, extension: &str) -> Result<StorageKey, KeyError>
where
    R: TryRngCore + ?Sized,
{
    validate_extension(extension)?;

    let mut bytes = [0u8; STORAGE_KEY_BYTES];
    rng.try_fill_bytes(&mut bytes)
        .map_err(|e| KeyError::EntropySource(e.to_string()))?;

    let stem = URL_SAFE_NO_PAD.encode(bytes);
    let extension_start = stem.len() + 1;

    Ok(StorageKey {
        value: format!("{}.{}", stem, extension),
        extension_start,
    })
}
