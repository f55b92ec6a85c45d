//! Locale-aware route table and resolver.
//!
//! Every page lives under a mandatory locale prefix (`/es/...`, `/en/...`,
//! `/fr/...`). Below that prefix, a route is either *invariant* (same path in
//! every locale, e.g. `/blog`) or *per-locale* (a distinct translated path per
//! locale, e.g. `/marcas` vs `/brands` vs `/marques`).
//!
//! The table is data, not code: [`ROUTE_TABLE`] is a static slice of
//! [`RouteDef`] entries, and both directions of resolution operate over it —
//! [`Route::href`] renders a concrete localized path, and [`resolve_path`]
//! maps a concrete request path back to `(Locale, Route)`. The storefront
//! registers its axum routes by iterating the same table, so the two can
//! never drift apart.

use crate::locale::Locale;

// =============================================================================
// Route identifiers and the table
// =============================================================================

/// Identifier for an abstract route, independent of locale and parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteId {
    Home,
    Products,
    ProductDetail,
    Brands,
    BrandDetail,
    Blog,
    BlogPost,
    Contact,
    Login,
    Logout,
    Account,
    Orders,
    Settings,
    Privacy,
    Terms,
    CookiePolicy,
}

/// Path pattern for one route, below the locale prefix.
///
/// Patterns use `{slug}` for the single dynamic segment a route may carry;
/// the syntax deliberately matches axum's capture syntax so the table can be
/// registered with the router verbatim.
#[derive(Debug, Clone, Copy)]
pub enum PathSpec {
    /// The same path in every locale.
    Invariant(&'static str),
    /// A distinct translated path per locale.
    PerLocale {
        es: &'static str,
        en: &'static str,
        fr: &'static str,
    },
}

impl PathSpec {
    /// The pattern for a given locale.
    #[must_use]
    pub const fn for_locale(&self, locale: Locale) -> &'static str {
        match self {
            Self::Invariant(path) => path,
            Self::PerLocale { es, en, fr } => match locale {
                Locale::Es => es,
                Locale::En => en,
                Locale::Fr => fr,
            },
        }
    }
}

/// One entry of the route table.
#[derive(Debug, Clone, Copy)]
pub struct RouteDef {
    pub id: RouteId,
    pub spec: PathSpec,
}

/// The complete route surface, one entry per abstract route.
///
/// Within a single locale no two entries may render the same pattern; the
/// test module asserts this so resolution stays deterministic.
pub const ROUTE_TABLE: &[RouteDef] = &[
    RouteDef {
        id: RouteId::Home,
        spec: PathSpec::Invariant("/"),
    },
    RouteDef {
        id: RouteId::Products,
        spec: PathSpec::PerLocale {
            es: "/productos",
            en: "/products",
            fr: "/produits",
        },
    },
    RouteDef {
        id: RouteId::ProductDetail,
        spec: PathSpec::PerLocale {
            es: "/productos/{slug}",
            en: "/products/{slug}",
            fr: "/produits/{slug}",
        },
    },
    RouteDef {
        id: RouteId::Brands,
        spec: PathSpec::PerLocale {
            es: "/marcas",
            en: "/brands",
            fr: "/marques",
        },
    },
    RouteDef {
        id: RouteId::BrandDetail,
        spec: PathSpec::PerLocale {
            es: "/marcas/{slug}",
            en: "/brands/{slug}",
            fr: "/marques/{slug}",
        },
    },
    RouteDef {
        id: RouteId::Blog,
        spec: PathSpec::Invariant("/blog"),
    },
    RouteDef {
        id: RouteId::BlogPost,
        spec: PathSpec::Invariant("/blog/{slug}"),
    },
    RouteDef {
        id: RouteId::Contact,
        spec: PathSpec::PerLocale {
            es: "/contacto",
            en: "/contact",
            fr: "/contact",
        },
    },
    RouteDef {
        id: RouteId::Login,
        spec: PathSpec::PerLocale {
            es: "/iniciar-sesion",
            en: "/login",
            fr: "/connexion",
        },
    },
    RouteDef {
        id: RouteId::Logout,
        spec: PathSpec::PerLocale {
            es: "/cerrar-sesion",
            en: "/logout",
            fr: "/deconnexion",
        },
    },
    RouteDef {
        id: RouteId::Account,
        spec: PathSpec::PerLocale {
            es: "/cuenta",
            en: "/account",
            fr: "/compte",
        },
    },
    RouteDef {
        id: RouteId::Orders,
        spec: PathSpec::PerLocale {
            es: "/cuenta/pedidos",
            en: "/account/orders",
            fr: "/compte/commandes",
        },
    },
    RouteDef {
        id: RouteId::Settings,
        spec: PathSpec::PerLocale {
            es: "/cuenta/ajustes",
            en: "/account/settings",
            fr: "/compte/parametres",
        },
    },
    RouteDef {
        id: RouteId::Privacy,
        spec: PathSpec::PerLocale {
            es: "/privacidad",
            en: "/privacy",
            fr: "/confidentialite",
        },
    },
    RouteDef {
        id: RouteId::Terms,
        spec: PathSpec::PerLocale {
            es: "/terminos",
            en: "/terms",
            fr: "/conditions",
        },
    },
    RouteDef {
        id: RouteId::CookiePolicy,
        spec: PathSpec::Invariant("/cookies"),
    },
];

/// The pattern (below the locale prefix) for a route in a locale.
///
/// Used by the storefront to register concrete axum routes for every
/// locale × route combination.
#[must_use]
pub fn localized_pattern(id: RouteId, locale: Locale) -> &'static str {
    ROUTE_TABLE
        .iter()
        .find(|def| def.id == id)
        .map_or("/", |def| def.spec.for_locale(locale))
}

// =============================================================================
// Concrete routes
// =============================================================================

/// An abstract route together with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Products,
    ProductDetail { slug: String },
    Brands,
    BrandDetail { slug: String },
    Blog,
    BlogPost { slug: String },
    Contact,
    Login,
    Logout,
    Account,
    Orders,
    Settings,
    Privacy,
    Terms,
    CookiePolicy,
}

impl Route {
    /// The identifier of this route, without parameters.
    #[must_use]
    pub const fn id(&self) -> RouteId {
        match self {
            Self::Home => RouteId::Home,
            Self::Products => RouteId::Products,
            Self::ProductDetail { .. } => RouteId::ProductDetail,
            Self::Brands => RouteId::Brands,
            Self::BrandDetail { .. } => RouteId::BrandDetail,
            Self::Blog => RouteId::Blog,
            Self::BlogPost { .. } => RouteId::BlogPost,
            Self::Contact => RouteId::Contact,
            Self::Login => RouteId::Login,
            Self::Logout => RouteId::Logout,
            Self::Account => RouteId::Account,
            Self::Orders => RouteId::Orders,
            Self::Settings => RouteId::Settings,
            Self::Privacy => RouteId::Privacy,
            Self::Terms => RouteId::Terms,
            Self::CookiePolicy => RouteId::CookiePolicy,
        }
    }

    /// The dynamic segment of this route, if it has one.
    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        match self {
            Self::ProductDetail { slug } | Self::BrandDetail { slug } | Self::BlogPost { slug } => {
                Some(slug)
            }
            _ => None,
        }
    }

    /// Render the concrete localized path for this route, locale prefix
    /// included (e.g. `/es/marcas/acme`).
    #[must_use]
    pub fn href(&self, locale: Locale) -> String {
        let pattern = localized_pattern(self.id(), locale);
        if pattern == "/" {
            return format!("/{locale}");
        }
        match self.slug() {
            Some(slug) => format!("/{locale}{}", pattern.replace("{slug}", slug)),
            None => format!("/{locale}{pattern}"),
        }
    }
}

/// Build a route from its identifier and an optional captured slug.
///
/// Returns `None` when the slug presence does not match what the route
/// requires; resolution treats that as "no match".
fn route_from(id: RouteId, slug: Option<String>) -> Option<Route> {
    match (id, slug) {
        (RouteId::Home, None) => Some(Route::Home),
        (RouteId::Products, None) => Some(Route::Products),
        (RouteId::ProductDetail, Some(slug)) => Some(Route::ProductDetail { slug }),
        (RouteId::Brands, None) => Some(Route::Brands),
        (RouteId::BrandDetail, Some(slug)) => Some(Route::BrandDetail { slug }),
        (RouteId::Blog, None) => Some(Route::Blog),
        (RouteId::BlogPost, Some(slug)) => Some(Route::BlogPost { slug }),
        (RouteId::Contact, None) => Some(Route::Contact),
        (RouteId::Login, None) => Some(Route::Login),
        (RouteId::Logout, None) => Some(Route::Logout),
        (RouteId::Account, None) => Some(Route::Account),
        (RouteId::Orders, None) => Some(Route::Orders),
        (RouteId::Settings, None) => Some(Route::Settings),
        (RouteId::Privacy, None) => Some(Route::Privacy),
        (RouteId::Terms, None) => Some(Route::Terms),
        (RouteId::CookiePolicy, None) => Some(Route::CookiePolicy),
        _ => None,
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Outcome of resolving an incoming request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The path carries a recognized locale and matches a route.
    Match { locale: Locale, route: Route },
    /// The first segment is not a recognized locale; the request must be
    /// redirected to the same path under the default locale.
    MissingLocale { redirect_to: String },
    /// The locale prefix is valid but nothing below it matches.
    NotFound { locale: Locale },
}

/// Resolve a concrete request path (query string excluded) to its route.
///
/// The first path segment must be a recognized locale; anything else —
/// including the bare `/` — resolves to [`Resolution::MissingLocale`] with
/// the default-locale redirect target.
#[must_use]
pub fn resolve_path(path: &str) -> Resolution {
    let mut segments = path.split('/').filter(|s| !s.is_empty());

    let Some(locale) = segments.next().and_then(Locale::from_path_segment) else {
        let redirect_to = if path == "/" || path.is_empty() {
            format!("/{}", Locale::DEFAULT)
        } else {
            format!("/{}{path}", Locale::DEFAULT)
        };
        return Resolution::MissingLocale { redirect_to };
    };

    let rest: Vec<&str> = segments.collect();

    for def in ROUTE_TABLE {
        let pattern = def.spec.for_locale(locale);
        if let Some(slug) = match_pattern(pattern, &rest) {
            if let Some(route) = route_from(def.id, slug) {
                return Resolution::Match { locale, route };
            }
        }
    }

    Resolution::NotFound { locale }
}

/// Match a pattern against path segments, capturing `{slug}` if present.
///
/// Returns `None` on no match, `Some(None)` on a literal match, and
/// `Some(Some(slug))` when the dynamic segment captured a value.
fn match_pattern(pattern: &str, segments: &[&str]) -> Option<Option<String>> {
    let pattern_segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    if pattern_segments.len() != segments.len() {
        return None;
    }

    let mut slug = None;
    for (pat, seg) in pattern_segments.iter().zip(segments) {
        if *pat == "{slug}" {
            if seg.is_empty() {
                return None;
            }
            slug = Some((*seg).to_string());
        } else if pat != seg {
            return None;
        }
    }
    Some(slug)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    /// One concrete sample of every route, for round-trip checks.
    fn sample_routes() -> Vec<Route> {
        vec![
            Route::Home,
            Route::Products,
            Route::ProductDetail {
                slug: "aurora-lamp".to_string(),
            },
            Route::Brands,
            Route::BrandDetail {
                slug: "acme".to_string(),
            },
            Route::Blog,
            Route::BlogPost {
                slug: "summer-launch".to_string(),
            },
            Route::Contact,
            Route::Login,
            Route::Logout,
            Route::Account,
            Route::Orders,
            Route::Settings,
            Route::Privacy,
            Route::Terms,
            Route::CookiePolicy,
        ]
    }

    #[test]
    fn test_round_trip_all_locales_all_routes() {
        for locale in Locale::ALL {
            for route in sample_routes() {
                let href = route.href(locale);
                let resolved = resolve_path(&href);
                assert_eq!(
                    resolved,
                    Resolution::Match {
                        locale,
                        route: route.clone()
                    },
                    "round trip failed for {href}"
                );
            }
        }
    }

    #[test]
    fn test_patterns_unique_within_each_locale() {
        for locale in Locale::ALL {
            let mut seen = HashSet::new();
            for def in ROUTE_TABLE {
                let pattern = def.spec.for_locale(locale);
                assert!(
                    seen.insert(pattern),
                    "duplicate pattern {pattern} in locale {locale}"
                );
            }
        }
    }

    #[test]
    fn test_href_examples() {
        assert_eq!(Route::Home.href(Locale::Es), "/es");
        assert_eq!(Route::Brands.href(Locale::Es), "/es/marcas");
        assert_eq!(Route::Brands.href(Locale::En), "/en/brands");
        assert_eq!(Route::Brands.href(Locale::Fr), "/fr/marques");
        assert_eq!(
            Route::ProductDetail {
                slug: "soft-serve".to_string()
            }
            .href(Locale::En),
            "/en/products/soft-serve"
        );
        assert_eq!(Route::Blog.href(Locale::Fr), "/fr/blog");
    }

    #[test]
    fn test_missing_locale_redirects_to_default() {
        assert_eq!(
            resolve_path("/brands"),
            Resolution::MissingLocale {
                redirect_to: "/es/brands".to_string()
            }
        );
        assert_eq!(
            resolve_path("/"),
            Resolution::MissingLocale {
                redirect_to: "/es".to_string()
            }
        );
        assert_eq!(
            resolve_path("/de/products"),
            Resolution::MissingLocale {
                redirect_to: "/es/de/products".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_path_under_valid_locale_is_not_found() {
        assert_eq!(
            resolve_path("/en/does-not-exist"),
            Resolution::NotFound { locale: Locale::En }
        );
        // A localized segment from another locale does not leak across.
        assert_eq!(
            resolve_path("/en/marcas"),
            Resolution::NotFound { locale: Locale::En }
        );
    }

    #[test]
    fn test_trailing_slash_is_tolerated() {
        assert_eq!(
            resolve_path("/en/brands/"),
            Resolution::Match {
                locale: Locale::En,
                route: Route::Brands
            }
        );
    }

    #[test]
    fn test_nested_account_routes_resolve() {
        assert_eq!(
            resolve_path("/es/cuenta/pedidos"),
            Resolution::Match {
                locale: Locale::Es,
                route: Route::Orders
            }
        );
        assert_eq!(
            resolve_path("/fr/compte/parametres"),
            Resolution::Match {
                locale: Locale::Fr,
                route: Route::Settings
            }
        );
    }

    #[test]
    fn test_localized_pattern_lookup() {
        assert_eq!(localized_pattern(RouteId::Brands, Locale::Fr), "/marques");
        assert_eq!(
            localized_pattern(RouteId::BlogPost, Locale::Es),
            "/blog/{slug}"
        );
    }
}
