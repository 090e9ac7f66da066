//! Header and navigation bar.
//!
//! `HeaderState` owns the only mutable cell (menu open/closed). Language lives
//! in `LanguageContext`. `render_header` turns both plus the current route
//! into a `HeaderView` without touching the network.

use std::fmt;

use shared::domain::Language;

pub const LOGO_SRC: &str = "https://storage.123fakturera.se/public/icons/diamond.png";
pub const LOGO_ALT: &str = "123fakturera";
const FLAG_GB_SRC: &str = "https://storage.123fakturere.no/public/flags/GB.png";
const FLAG_SE_SRC: &str = "https://storage.123fakturere.no/public/flags/SE.png";
pub const HAMBURGER_LINES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavRoute {
    Terms,
    Pricelist,
}

impl NavRoute {
    pub const ALL: [NavRoute; 2] = [NavRoute::Terms, NavRoute::Pricelist];

    pub fn path(self) -> &'static str {
        match self {
            NavRoute::Terms => "/terms",
            NavRoute::Pricelist => "/pricelist",
        }
    }

    pub fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (NavRoute::Terms, Language::En) => "Terms",
            (NavRoute::Terms, Language::Sv) => "Villkor",
            (NavRoute::Pricelist, Language::En) => "Pricelist",
            (NavRoute::Pricelist, Language::Sv) => "Prislista",
        }
    }

    /// Whether `current_path` is this route or nested below it.
    pub fn is_active(self, current_path: &str) -> bool {
        let path = self.path();
        match current_path.strip_prefix(path) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderState {
    menu_open: bool,
}

impl HeaderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Activating a nav link collapses the mobile menu and yields the target path.
    pub fn follow_link(&mut self, route: NavRoute) -> &'static str {
        self.close_menu();
        route.path()
    }

    pub fn render(&self, language: Language, active_path: &str) -> HeaderView {
        render_header(language, self.menu_open, active_path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLinkView {
    pub route: NavRoute,
    pub href: &'static str,
    pub label: &'static str,
    pub active: bool,
}

impl NavLinkView {
    pub fn class_name(&self) -> &'static str {
        if self.active {
            "active"
        } else {
            ""
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub logo_src: &'static str,
    pub logo_alt: &'static str,
    pub links: Vec<NavLinkView>,
    pub flag_src: &'static str,
    pub flag_alt: &'static str,
    pub menu_open: bool,
    pub hamburger_line_classes: [&'static str; HAMBURGER_LINES],
}

pub fn render_header(language: Language, menu_open: bool, active_path: &str) -> HeaderView {
    let links = NavRoute::ALL
        .iter()
        .map(|&route| NavLinkView {
            route,
            href: route.path(),
            label: route.label(language),
            active: route.is_active(active_path),
        })
        .collect();

    let (flag_src, flag_alt) = match language {
        Language::En => (FLAG_GB_SRC, "English"),
        Language::Sv => (FLAG_SE_SRC, "Swedish"),
    };

    let line_class = if menu_open {
        "hamburger-line open"
    } else {
        "hamburger-line"
    };

    HeaderView {
        logo_src: LOGO_SRC,
        logo_alt: LOGO_ALT,
        links,
        flag_src,
        flag_alt,
        menu_open,
        hamburger_line_classes: [line_class; HAMBURGER_LINES],
    }
}

impl fmt::Display for HeaderView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.logo_alt)?;
        for link in &self.links {
            if link.active {
                write!(f, "  *{}*", link.label)?;
            } else {
                write!(f, "  {}", link.label)?;
            }
        }
        write!(f, "  ({})", self.flag_alt)?;
        f.write_str(if self.menu_open { "  [x]" } else { "  [=]" })
    }
}

#[cfg(test)]
#[path = "tests/header_tests.rs"]
mod tests;
