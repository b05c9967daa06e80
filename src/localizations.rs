use std::collections::HashMap;

use i18n_embed::DesktopLanguageRequester;
use unic_langid::LanguageIdentifier;

// Simple in-memory translations
#[derive(Default)]
pub struct Translations {
    strings: HashMap<&'static str, &'static str>,
}

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &'static str, value: &'static str) {
        self.strings.insert(key, value);
    }

    pub fn lookup(&self, key: &str) -> Option<&'static str> {
        self.strings.get(key).copied()
    }
}

pub struct Localizations {
    translations: HashMap<&'static str, Translations>,
    current_lang: &'static str,
}

const FALLBACK_LANG: &str = "en-US";

impl Default for Localizations {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Localizations {
    pub fn new(requested: Option<&LanguageIdentifier>) -> Self {
        let mut translations = HashMap::new();

        let mut en = Translations::new();
        en.insert("app-title", "TXT Converter");
        en.insert("upload-placeholder", "📄 Drag & Drop TXT file");
        en.insert("upload-browse", "or click to browse");
        en.insert("separator-label", "Separator:");
        en.insert("separator-placeholder", "e.g. , or ;");
        en.insert("hint-comma", "Comma ,");
        en.insert("hint-semicolon", "Semicolon ;");
        en.insert("hint-tab", "Tab");
        en.insert("hint-pipe", "Pipe |");
        en.insert("output-label", "Convert to:");
        en.insert("output-none", "Select output type");
        en.insert("output-csv", "CSV");
        en.insert("output-excel", "Excel");
        en.insert("convert-button", "Convert File");
        en.insert("convert-button-busy", "⏳ Converting...");
        en.insert("saved-to", "Saved to:");
        en.insert("error-invalid-file-type", "Only .txt files are allowed");
        en.insert("error-conversion-failed", "Conversion failed. Please try again.");
        translations.insert("en-US", en);

        let mut es = Translations::new();
        es.insert("app-title", "Convertidor TXT");
        es.insert("upload-placeholder", "📄 Arrastre y suelte un archivo TXT");
        es.insert("upload-browse", "o haga clic para buscar");
        es.insert("separator-label", "Separador:");
        es.insert("separator-placeholder", "p. ej. , o ;");
        es.insert("hint-comma", "Coma ,");
        es.insert("hint-semicolon", "Punto y coma ;");
        es.insert("hint-tab", "Tabulador");
        es.insert("hint-pipe", "Barra |");
        es.insert("output-label", "Convertir a:");
        es.insert("output-none", "Seleccione el tipo de salida");
        es.insert("convert-button", "Convertir archivo");
        es.insert("convert-button-busy", "⏳ Convirtiendo...");
        es.insert("saved-to", "Guardado en:");
        es.insert("error-invalid-file-type", "Solo se permiten archivos .txt");
        es.insert("error-conversion-failed", "La conversión falló. Inténtelo de nuevo.");
        translations.insert("es-ES", es);

        let mut localizer = Self {
            translations,
            current_lang: FALLBACK_LANG,
        };

        match requested {
            Some(lang) => localizer.select(lang),
            None => {
                let desktop = DesktopLanguageRequester::requested_languages();
                if let Some(lang) = desktop.first() {
                    localizer.select(lang);
                }
            }
        }

        localizer
    }

    pub fn current_lang(&self) -> &'static str {
        self.current_lang
    }

    fn lookup(&self, key: &str) -> Option<&'static str> {
        self.translations
            .get(self.current_lang)
            .and_then(|t| t.lookup(key))
            .or_else(|| {
                // Fallback to English if the current language doesn't have the key
                self.translations
                    .get(FALLBACK_LANG)
                    .and_then(|t| t.lookup(key))
            })
    }

    /// Looks up `key`, falling back to the key itself.
    pub fn text(&self, key: &str) -> String {
        self.lookup(key)
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string())
    }

    pub fn select(&mut self, lang: &LanguageIdentifier) {
        let requested = lang.language.as_str();

        let matched = self.translations.keys().copied().find(|key| {
            key.parse::<LanguageIdentifier>()
                .map(|known| known.language.as_str() == requested)
                .unwrap_or(false)
        });

        self.current_lang = match matched {
            Some(key) => key,
            None => {
                if requested != "en" {
                    log::info!("no translation for {lang}, using English");
                }
                FALLBACK_LANG
            }
        };
    }
}
