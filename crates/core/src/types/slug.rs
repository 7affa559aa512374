//! Slug type for taxonomy terms, brands, and content handles.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Slug`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum SlugError {
    /// The input string is empty.
    #[error("slug cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("slug must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `[a-z0-9-_]`.
    #[error("slug contains invalid character {0:?}")]
    InvalidChar(char),
}

/// A URL-safe identifier for a taxonomy term, brand, or content item.
///
/// Slugs are the currency of the catalog: category filters, brand filters,
/// and attribute option selections are all sets of slugs, and they travel
/// through URL query parameters unescaped.
///
/// ## Constraints
///
/// - Length: 1-100 characters
/// - Characters: lowercase ASCII letters, digits, `-`, `_`
///
/// Uppercase input is lowered rather than rejected, since WooCommerce
/// tolerates mixed-case term slugs in URLs.
///
/// ## Examples
///
/// ```
/// use bramble_core::Slug;
///
/// assert!(Slug::parse("dark-roast").is_ok());
/// assert!(Slug::parse("pa_colour").is_ok());
/// assert_eq!(Slug::parse("Dark-Roast").unwrap().as_str(), "dark-roast");
///
/// assert!(Slug::parse("").is_err());
/// assert!(Slug::parse("two words").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Maximum length of a slug.
    pub const MAX_LENGTH: usize = 100;

    /// Parse a `Slug` from a string, lowercasing ASCII letters.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 100 characters,
    /// or contains characters outside `[a-zA-Z0-9-_]`.
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        if s.is_empty() {
            return Err(SlugError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(SlugError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(c) = s
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(SlugError::InvalidChar(c));
        }

        Ok(Self(s.to_ascii_lowercase()))
    }

    /// Get the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Slug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}
