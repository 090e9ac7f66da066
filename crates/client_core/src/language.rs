use shared::domain::Language;

/// Current UI language, shared by every component that renders text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageContext {
    language: Language,
}

impl LanguageContext {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn toggle_language(&mut self) -> Language {
        self.language = self.language.toggled();
        self.language
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_and_returns_new_language() {
        let mut ctx = LanguageContext::default();
        assert_eq!(ctx.language(), Language::En);
        assert_eq!(ctx.toggle_language(), Language::Sv);
        assert_eq!(ctx.toggle_language(), Language::En);
    }
}
