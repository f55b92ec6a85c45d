//! Shared template context: header, footer, language switcher, user menu.
//!
//! Every page template embeds a [`PageContext`]. It carries everything the
//! base layout renders: localized navigation hrefs from the route table, the
//! language switcher (the *same* route in every other locale), the user menu
//! derived from the session, and the footer menu fetched from WordPress.

use velora_core::{Locale, Route};

use crate::i18n::UiStrings;
use crate::session::Session;
use crate::state::AppState;

/// WordPress menu slug for the footer navigation.
const FOOTER_MENU_SLUG: &str = "footer";

/// Localized hrefs for the fixed navigation links.
#[derive(Debug, Clone)]
pub struct NavLinks {
    pub home: String,
    pub products: String,
    pub brands: String,
    pub blog: String,
    pub contact: String,
    pub privacy: String,
    pub terms: String,
    pub cookie_policy: String,
    pub login: String,
    pub logout: String,
    pub account: String,
    pub orders: String,
    pub settings: String,
}

impl NavLinks {
    fn for_locale(locale: Locale) -> Self {
        Self {
            home: Route::Home.href(locale),
            products: Route::Products.href(locale),
            brands: Route::Brands.href(locale),
            blog: Route::Blog.href(locale),
            contact: Route::Contact.href(locale),
            privacy: Route::Privacy.href(locale),
            terms: Route::Terms.href(locale),
            cookie_policy: Route::CookiePolicy.href(locale),
            login: Route::Login.href(locale),
            logout: Route::Logout.href(locale),
            account: Route::Account.href(locale),
            orders: Route::Orders.href(locale),
            settings: Route::Settings.href(locale),
        }
    }
}

/// One entry of the language switcher.
#[derive(Debug, Clone)]
pub struct LanguageLink {
    pub code: &'static str,
    pub name: &'static str,
    pub href: String,
    pub active: bool,
}

/// One link of the footer menu (WordPress-managed).
#[derive(Debug, Clone)]
pub struct FooterLink {
    pub title: String,
    pub url: String,
}

/// The signed-in user as the header renders it.
#[derive(Debug, Clone)]
pub struct UserMenu {
    pub name: String,
}

/// Everything the base layout needs, embedded in every page template.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub locale_code: &'static str,
    pub strings: &'static UiStrings,
    pub nav: NavLinks,
    pub languages: Vec<LanguageLink>,
    pub user: Option<UserMenu>,
    pub footer_menu: Vec<FooterLink>,
    pub ga4_measurement_id: Option<String>,
}

impl PageContext {
    /// Build the full context for a page render.
    ///
    /// The footer menu comes from WordPress through the cache; a failed
    /// fetch degrades to an empty menu and never fails the page.
    pub async fn build(
        state: &AppState,
        locale: Locale,
        current: &Route,
        session: Option<&Session>,
    ) -> Self {
        let footer_menu = match state.queries().menu(locale, FOOTER_MENU_SLUG).await {
            Ok(items) => items
                .into_iter()
                .map(|item| FooterLink {
                    title: item.title,
                    url: item.url,
                })
                .collect(),
            Err(err) => {
                tracing::warn!(error = %err, "footer menu unavailable, rendering without it");
                Vec::new()
            }
        };

        let mut ctx = Self::bare(locale, current, session);
        ctx.footer_menu = footer_menu;
        ctx.ga4_measurement_id = state.config().analytics.ga4_measurement_id.clone();
        ctx
    }

    /// Build a context without remote data (error pages, tests).
    #[must_use]
    pub fn bare(locale: Locale, current: &Route, session: Option<&Session>) -> Self {
        let languages = Locale::ALL
            .iter()
            .map(|&l| LanguageLink {
                code: l.as_str(),
                name: l.native_name(),
                href: current.href(l),
                active: l == locale,
            })
            .collect();

        Self {
            locale_code: locale.as_str(),
            strings: UiStrings::for_locale(locale),
            nav: NavLinks::for_locale(locale),
            languages,
            user: session.map(|s| UserMenu {
                name: s.display_name().to_string(),
            }),
            footer_menu: Vec::new(),
            ga4_measurement_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_switcher_preserves_route_and_slug() {
        let route = Route::BrandDetail {
            slug: "acme".to_string(),
        };
        let ctx = PageContext::bare(Locale::En, &route, None);

        let hrefs: Vec<&str> = ctx.languages.iter().map(|l| l.href.as_str()).collect();
        assert_eq!(hrefs, vec!["/es/marcas/acme", "/en/brands/acme", "/fr/marques/acme"]);

        let active: Vec<bool> = ctx.languages.iter().map(|l| l.active).collect();
        assert_eq!(active, vec![false, true, false]);
    }

    #[test]
    fn test_nav_links_are_localized() {
        let ctx = PageContext::bare(Locale::Fr, &Route::Home, None);
        assert_eq!(ctx.nav.brands, "/fr/marques");
        assert_eq!(ctx.nav.account, "/fr/compte");
        assert_eq!(ctx.nav.blog, "/fr/blog");
    }

    #[test]
    fn test_no_session_means_no_user_menu() {
        let ctx = PageContext::bare(Locale::Es, &Route::Home, None);
        assert!(ctx.user.is_none());
    }
}
