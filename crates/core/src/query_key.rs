//! Hierarchical cache keys for remote data.
//!
//! Every cached remote-data request is identified by an ordered tuple of
//! segments. All keys for one entity kind share that kind as their first
//! segment, so "everything about products" can be invalidated with a single
//! prefix match, while keys that differ in any parameter stay distinct.
//!
//! Factories live in per-kind modules ([`product_keys`], [`brand_keys`],
//! [`wordpress_keys`]) so call sites never assemble segments by hand.

use std::fmt;

/// An ordered, collision-free identifier for one cached remote request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    segments: Vec<String>,
}

impl QueryKey {
    fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether this key falls under `prefix` (used for bulk invalidation).
    #[must_use]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.segments.len() >= prefix.segments.len()
            && self.segments[..prefix.segments.len()] == prefix.segments[..]
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join(":"))
    }
}

/// Render an optional parameter so that `None` and `Some("")` stay distinct
/// from each other and from literal values.
fn opt(value: Option<&str>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("={v}"))
}

/// Keys for the product catalog.
pub mod product_keys {
    use super::{QueryKey, opt};

    /// Prefix covering every product-related key.
    #[must_use]
    pub fn all() -> QueryKey {
        QueryKey::new(["products"])
    }

    /// A single product detail lookup.
    #[must_use]
    pub fn detail(slug: &str) -> QueryKey {
        QueryKey::new(["products", "detail", slug])
    }

    /// A product search result page. Every parameter participates in the
    /// key so differing filters never share a cache entry.
    #[must_use]
    pub fn search(
        query: Option<&str>,
        brand: Option<&str>,
        sort: Option<&str>,
        page: u32,
        page_size: u32,
    ) -> QueryKey {
        QueryKey::new([
            "products".to_string(),
            "search".to_string(),
            opt(query),
            opt(brand),
            opt(sort),
            page.to_string(),
            page_size.to_string(),
        ])
    }

    /// Autocomplete suggestions for a prefix.
    #[must_use]
    pub fn suggest(prefix: &str) -> QueryKey {
        QueryKey::new(["products", "suggest", prefix])
    }
}

/// Keys for brand data.
pub mod brand_keys {
    use super::QueryKey;

    /// Prefix covering every brand-related key.
    #[must_use]
    pub fn all() -> QueryKey {
        QueryKey::new(["brands"])
    }

    /// The full brand list.
    #[must_use]
    pub fn list() -> QueryKey {
        QueryKey::new(["brands", "list"])
    }

    /// A single brand detail lookup.
    #[must_use]
    pub fn detail(slug: &str) -> QueryKey {
        QueryKey::new(["brands", "detail", slug])
    }
}

/// Keys for WordPress content. Content is localized upstream, so the locale
/// is part of every key.
pub mod wordpress_keys {
    use super::QueryKey;
    use crate::locale::Locale;

    /// Prefix covering every WordPress-related key.
    #[must_use]
    pub fn all() -> QueryKey {
        QueryKey::new(["wordpress"])
    }

    /// A CMS page by slug.
    #[must_use]
    pub fn page(locale: Locale, slug: &str) -> QueryKey {
        QueryKey::new(["wordpress", "page", locale.as_str(), slug])
    }

    /// A blog post listing page.
    #[must_use]
    pub fn posts(locale: Locale, page: u32, per_page: u32) -> QueryKey {
        QueryKey::new([
            "wordpress".to_string(),
            "posts".to_string(),
            locale.as_str().to_string(),
            page.to_string(),
            per_page.to_string(),
        ])
    }

    /// A single blog post by slug.
    #[must_use]
    pub fn post(locale: Locale, slug: &str) -> QueryKey {
        QueryKey::new(["wordpress", "post", locale.as_str(), slug])
    }

    /// A named navigation menu.
    #[must_use]
    pub fn menu(locale: Locale, slug: &str) -> QueryKey {
        QueryKey::new(["wordpress", "menu", locale.as_str(), slug])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;

    #[test]
    fn test_equal_parameters_produce_equal_keys() {
        let a = product_keys::search(Some("lamp"), None, Some("price"), 0, 21);
        let b = product_keys::search(Some("lamp"), None, Some("price"), 0, 21);
        assert_eq!(a, b);
    }

    #[test]
    fn test_differing_parameters_produce_distinct_keys() {
        let base = product_keys::search(Some("lamp"), None, None, 0, 21);
        assert_ne!(base, product_keys::search(Some("lamps"), None, None, 0, 21));
        assert_ne!(base, product_keys::search(Some("lamp"), None, None, 1, 21));
        assert_ne!(base, product_keys::search(Some("lamp"), None, None, 0, 20));
        assert_ne!(
            base,
            product_keys::search(Some("lamp"), Some("acme"), None, 0, 21)
        );
    }

    #[test]
    fn test_none_and_empty_string_stay_distinct() {
        assert_ne!(
            product_keys::search(None, None, None, 0, 21),
            product_keys::search(Some(""), None, None, 0, 21)
        );
    }

    #[test]
    fn test_kind_prefix_covers_all_keys_of_kind() {
        let prefix = product_keys::all();
        assert!(product_keys::detail("lamp").starts_with(&prefix));
        assert!(
            product_keys::search(None, None, None, 0, 21).starts_with(&prefix)
        );
        assert!(product_keys::suggest("la").starts_with(&prefix));
        assert!(!brand_keys::list().starts_with(&prefix));
    }

    #[test]
    fn test_wordpress_keys_are_locale_scoped() {
        assert_ne!(
            wordpress_keys::menu(Locale::Es, "footer"),
            wordpress_keys::menu(Locale::En, "footer")
        );
        assert!(
            wordpress_keys::menu(Locale::Es, "footer").starts_with(&wordpress_keys::all())
        );
    }

    #[test]
    fn test_display_joins_segments() {
        assert_eq!(
            product_keys::detail("lamp").to_string(),
            "products:detail:lamp"
        );
    }

    #[test]
    fn test_prefix_is_segment_wise_not_textual() {
        // "brandsx" must not fall under the "brands" prefix.
        let key = QueryKey::new(["brandsx", "detail"]);
        assert!(!key.starts_with(&brand_keys::all()));
    }
}
