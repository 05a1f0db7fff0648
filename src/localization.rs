use crate::language::Language;
use anyhow::{anyhow, Result};
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use log::warn;
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

/// Fluent sources compiled into the binary, one per supported language
fn resource_source(language: Language) -> &'static str {
    match language {
        Language::English => include_str!("../locales/en/main.ftl"),
        Language::Telugu => include_str!("../locales/te/main.ftl"),
        Language::Tamil => include_str!("../locales/ta/main.ftl"),
        Language::Hindi => include_str!("../locales/hi/main.ftl"),
        Language::Kannada => include_str!("../locales/kn/main.ftl"),
        Language::Malayalam => include_str!("../locales/ml/main.ftl"),
    }
}

/// Localization manager for the recipe assistant
pub struct LocalizationManager {
    bundles: HashMap<Language, FluentBundle<FluentResource>>,
}

impl LocalizationManager {
    /// Create a new localization manager with a bundle for every supported language
    pub fn new() -> Result<Self> {
        let mut bundles = HashMap::new();

        for language in Language::ALL {
            let bundle = Self::create_bundle(language)?;
            bundles.insert(language, bundle);
        }

        Ok(Self { bundles })
    }

    /// Create a fluent bundle for a specific language
    fn create_bundle(language: Language) -> Result<FluentBundle<FluentResource>> {
        let locale: LanguageIdentifier = language.code().parse()?;
        let mut bundle = FluentBundle::new(vec![locale]);
        bundle.set_use_isolating(false);

        let resource = FluentResource::try_new(resource_source(language).to_string())
            .map_err(|(_, errors)| anyhow!("Invalid {} messages: {:?}", language, errors))?;
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow!("Duplicate {} messages: {:?}", language, errors))?;

        Ok(bundle)
    }

    /// Format `key` from one bundle, or `None` if that bundle lacks it
    fn format(&self, language: Language, key: &str, args: Option<&FluentArgs>) -> Option<String> {
        let bundle = self.bundles.get(&language)?;
        let pattern = bundle.get_message(key)?.value()?;

        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, args, &mut errors);
        if !errors.is_empty() {
            warn!("Formatting '{key}' for {language} reported {errors:?}");
        }
        Some(value.into_owned())
    }

    /// Get a localized message, falling back to English when the language lacks it
    pub fn get_message(&self, key: &str, language: Language, args: Option<&[(&str, &str)]>) -> String {
        let fluent_args = args.map(|args| {
            let mut fluent_args = FluentArgs::new();
            for (name, value) in args {
                fluent_args.set(*name, FluentValue::from(*value));
            }
            fluent_args
        });

        self.format(language, key, fluent_args.as_ref())
            .or_else(|| self.format(Language::English, key, fluent_args.as_ref()))
            .unwrap_or_else(|| format!("Missing translation: {key}"))
    }

    /// Get a localized message without arguments
    pub fn t(&self, key: &str, language: Language) -> String {
        self.get_message(key, language, None)
    }

    /// Get a localized message with simple string arguments
    pub fn t_args(&self, key: &str, language: Language, args: &[(&str, &str)]) -> String {
        self.get_message(key, language, Some(args))
    }
}
