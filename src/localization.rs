use anyhow::{anyhow, Result};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

const EN_MESSAGES: &str = include_str!("../locales/en/main.ftl");
const RU_MESSAGES: &str = include_str!("../locales/ru/main.ftl");

pub const DEFAULT_LANGUAGE: &str = "en";

/// Localization manager for the sticker bot
///
/// Message files are compiled into the binary; one manager is built at
/// startup and shared by all handlers.
pub struct LocalizationManager {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
}

impl LocalizationManager {
    /// Create a new localization manager with every bundled language loaded
    pub fn new() -> Result<Self> {
        let mut bundles = HashMap::new();
        for (language, source) in [("en", EN_MESSAGES), ("ru", RU_MESSAGES)] {
            bundles.insert(language.to_string(), Self::create_bundle(language, source)?);
        }
        Ok(Self { bundles })
    }

    fn create_bundle(language: &str, source: &str) -> Result<FluentBundle<FluentResource>> {
        let locale: LanguageIdentifier = language.parse()?;
        let mut bundle = FluentBundle::new_concurrent(vec![locale]);
        // Keep links and ids free of bidi isolation marks
        bundle.set_use_isolating(false);

        let resource = FluentResource::try_new(source.to_string())
            .map_err(|(_, errors)| anyhow!("failed to parse {language} messages: {errors:?}"))?;
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow!("failed to load {language} messages: {errors:?}"))?;

        Ok(bundle)
    }

    /// Map a Telegram `language_code` onto a bundled language
    pub fn resolve_language(language_code: Option<&str>) -> &'static str {
        match language_code {
            Some(code) if code.to_lowercase().starts_with("ru") => "ru",
            _ => DEFAULT_LANGUAGE,
        }
    }

    /// Get a localized message in a specific language, falling back to English
    pub fn get_message_in_language(
        &self,
        key: &str,
        language: &str,
        args: Option<&HashMap<&str, &str>>,
    ) -> String {
        let Some(bundle) = self
            .bundles
            .get(language)
            .or_else(|| self.bundles.get(DEFAULT_LANGUAGE))
        else {
            return format!("Missing translation: {key}");
        };

        let Some(pattern) = bundle.get_message(key).and_then(|msg| msg.value()) else {
            return format!("Missing translation: {key}");
        };

        let fluent_args = args.map(|args| {
            let mut fluent_args = FluentArgs::new();
            for (name, value) in args {
                fluent_args.set(*name, FluentValue::from(*value));
            }
            fluent_args
        });

        let mut errors = vec![];
        bundle
            .format_pattern(pattern, fluent_args.as_ref(), &mut errors)
            .into_owned()
    }

    /// Localized message for a Telegram `language_code`
    pub fn t(&self, key: &str, language_code: Option<&str>) -> String {
        self.get_message_in_language(key, Self::resolve_language(language_code), None)
    }

    /// Localized message with simple string arguments
    pub fn t_args(&self, key: &str, args: &[(&str, &str)], language_code: Option<&str>) -> String {
        let args_map: HashMap<&str, &str> = args.iter().cloned().collect();
        self.get_message_in_language(key, Self::resolve_language(language_code), Some(&args_map))
    }
}
