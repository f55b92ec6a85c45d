//! Localized user-facing strings.
//!
//! One [`UiStrings`] table per supported locale, resolved once per request
//! from the active locale. Strings live here rather than in the templates so
//! every locale renders from the same markup.

use velora_core::Locale;

/// All localized user-facing strings for one locale.
#[derive(Debug, Clone, Copy)]
pub struct UiStrings {
    // ==================== Navigation ====================
    pub nav_products: &'static str,
    pub nav_brands: &'static str,
    pub nav_blog: &'static str,
    pub nav_contact: &'static str,

    // ==================== User menu ====================
    pub sign_in: &'static str,
    pub sign_out: &'static str,
    pub account: &'static str,
    pub orders: &'static str,
    pub settings: &'static str,

    // ==================== Search ====================
    pub search_placeholder: &'static str,
    pub search_no_results: &'static str,

    // ==================== Commerce ====================
    pub in_stock: &'static str,
    pub out_of_stock: &'static str,
    pub previous_page: &'static str,
    pub next_page: &'static str,

    // ==================== Forms ====================
    pub email_label: &'static str,
    pub password_label: &'static str,
    pub sign_in_action: &'static str,
    pub invalid_credentials: &'static str,

    // ==================== Errors ====================
    pub error_title: &'static str,
    pub error_body: &'static str,
    pub error_retry: &'static str,
    pub not_found_title: &'static str,
    pub not_found_body: &'static str,

    // ==================== Footer ====================
    pub footer_privacy: &'static str,
    pub footer_terms: &'static str,
    pub footer_cookies: &'static str,
}

pub const ES_STRINGS: UiStrings = UiStrings {
    nav_products: "Productos",
    nav_brands: "Marcas",
    nav_blog: "Blog",
    nav_contact: "Contacto",

    sign_in: "Iniciar sesión",
    sign_out: "Cerrar sesión",
    account: "Mi cuenta",
    orders: "Mis pedidos",
    settings: "Ajustes",

    search_placeholder: "Buscar productos…",
    search_no_results: "No hemos encontrado nada.",

    in_stock: "En stock",
    out_of_stock: "Agotado",
    previous_page: "Anterior",
    next_page: "Siguiente",

    email_label: "Correo electrónico",
    password_label: "Contraseña",
    sign_in_action: "Entrar",
    invalid_credentials: "Correo o contraseña incorrectos.",

    error_title: "Algo ha ido mal",
    error_body: "No hemos podido cargar esta página.",
    error_retry: "Inténtalo de nuevo",
    not_found_title: "Página no encontrada",
    not_found_body: "La página que buscas no existe.",

    footer_privacy: "Privacidad",
    footer_terms: "Términos",
    footer_cookies: "Cookies",
};

pub const EN_STRINGS: UiStrings = UiStrings {
    nav_products: "Products",
    nav_brands: "Brands",
    nav_blog: "Blog",
    nav_contact: "Contact",

    sign_in: "Sign in",
    sign_out: "Sign out",
    account: "My account",
    orders: "My orders",
    settings: "Settings",

    search_placeholder: "Search products…",
    search_no_results: "We couldn't find anything.",

    in_stock: "In stock",
    out_of_stock: "Out of stock",
    previous_page: "Previous",
    next_page: "Next",

    email_label: "Email",
    password_label: "Password",
    sign_in_action: "Sign in",
    invalid_credentials: "Wrong email or password.",

    error_title: "Something went wrong",
    error_body: "We couldn't load this page.",
    error_retry: "Try again",
    not_found_title: "Page not found",
    not_found_body: "The page you're looking for doesn't exist.",

    footer_privacy: "Privacy",
    footer_terms: "Terms",
    footer_cookies: "Cookies",
};

pub const FR_STRINGS: UiStrings = UiStrings {
    nav_products: "Produits",
    nav_brands: "Marques",
    nav_blog: "Blog",
    nav_contact: "Contact",

    sign_in: "Se connecter",
    sign_out: "Se déconnecter",
    account: "Mon compte",
    orders: "Mes commandes",
    settings: "Paramètres",

    search_placeholder: "Rechercher des produits…",
    search_no_results: "Nous n'avons rien trouvé.",

    in_stock: "En stock",
    out_of_stock: "Épuisé",
    previous_page: "Précédent",
    next_page: "Suivant",

    email_label: "E-mail",
    password_label: "Mot de passe",
    sign_in_action: "Connexion",
    invalid_credentials: "E-mail ou mot de passe incorrect.",

    error_title: "Une erreur est survenue",
    error_body: "Nous n'avons pas pu charger cette page.",
    error_retry: "Réessayer",
    not_found_title: "Page introuvable",
    not_found_body: "La page que vous cherchez n'existe pas.",

    footer_privacy: "Confidentialité",
    footer_terms: "Conditions",
    footer_cookies: "Cookies",
};

impl UiStrings {
    /// The string table for a locale.
    #[must_use]
    pub const fn for_locale(locale: Locale) -> &'static Self {
        match locale {
            Locale::Es => &ES_STRINGS,
            Locale::En => &EN_STRINGS,
            Locale::Fr => &FR_STRINGS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_locale_has_a_table() {
        for locale in Locale::ALL {
            let strings = UiStrings::for_locale(locale);
            assert!(!strings.error_title.is_empty());
            assert!(!strings.nav_products.is_empty());
        }
    }

    #[test]
    fn test_tables_differ_per_locale() {
        assert_ne!(
            UiStrings::for_locale(Locale::Es).sign_in,
            UiStrings::for_locale(Locale::En).sign_in
        );
    }
}
