//! Supported locales.
//!
//! The locale set is closed: every rendered page resolves to exactly one of
//! these values, and every localized URL carries one of them as its first
//! path segment. Adding a locale means adding a variant here and a segment
//! for every per-locale entry in the route table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A supported storefront locale.
///
/// Spanish is the default: requests without a recognized locale prefix are
/// redirected to the Spanish rendition of the same path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Spanish (default).
    Es,
    /// English.
    En,
    /// French.
    Fr,
}

impl Locale {
    /// All supported locales, in display order.
    pub const ALL: [Self; 3] = [Self::Es, Self::En, Self::Fr];

    /// The default locale used when a request carries no recognized prefix.
    pub const DEFAULT: Self = Self::Es;

    /// Parse a locale from its URL path segment (e.g. `"en"`).
    ///
    /// Returns `None` for anything outside the supported set; callers decide
    /// whether that means "redirect to the default locale" or "reject".
    #[must_use]
    pub fn from_path_segment(segment: &str) -> Option<Self> {
        match segment {
            "es" => Some(Self::Es),
            "en" => Some(Self::En),
            "fr" => Some(Self::Fr),
            _ => None,
        }
    }

    /// The URL path segment and `lang` query value for this locale.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::En => "en",
            Self::Fr => "fr",
        }
    }

    /// The language name in its own language, for the language switcher.
    #[must_use]
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::Es => "Español",
            Self::En => "English",
            Self::Fr => "Français",
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_segment_known() {
        assert_eq!(Locale::from_path_segment("es"), Some(Locale::Es));
        assert_eq!(Locale::from_path_segment("en"), Some(Locale::En));
        assert_eq!(Locale::from_path_segment("fr"), Some(Locale::Fr));
    }

    #[test]
    fn test_from_path_segment_unknown() {
        assert_eq!(Locale::from_path_segment("de"), None);
        assert_eq!(Locale::from_path_segment(""), None);
        assert_eq!(Locale::from_path_segment("ES"), None);
        assert_eq!(Locale::from_path_segment("en-US"), None);
    }

    #[test]
    fn test_round_trip_through_segment() {
        for locale in Locale::ALL {
            assert_eq!(Locale::from_path_segment(locale.as_str()), Some(locale));
        }
    }

    #[test]
    fn test_default_is_spanish() {
        assert_eq!(Locale::default(), Locale::Es);
        assert_eq!(Locale::DEFAULT, Locale::Es);
    }

    #[test]
    fn test_display_matches_segment() {
        assert_eq!(Locale::En.to_string(), "en");
    }
}
