//=========================================================================
// Localization
//=========================================================================
//
// Process-wide locale selection and key → text lookup.
//
// The storage backend is abstracted behind `Localizer`; `LocaleTable` is
// the in-memory implementation used by the engine by default. All
// user-facing text goes through `format_text`, which substitutes
// positional `{0}`, `{1}`, ... arguments and falls back to `<key>` for
// missing entries.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt;

use log::warn;

//=== Locale ==============================================================

/// Locale identifier such as `en` or `fr`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(String);

impl Locale {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locale {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

//=== Localizer Trait =====================================================

/// Localization backend.
pub trait Localizer: Send {
    /// Available locales in display order.
    fn available_locales(&self) -> &[Locale];

    /// The locale all UI text is currently rendered in, if any.
    fn selected_locale(&self) -> Option<&Locale>;

    /// Changes the process-wide locale.
    fn select_locale(&mut self, locale: Locale);

    /// Raw (unformatted) text for `key` in the selected locale.
    fn lookup(&self, key: &str) -> Option<&str>;
}

//=== Formatting ==========================================================

/// Looks up `key` and substitutes positional arguments.
///
/// Returns `<key>` when the key has no entry in the selected locale.
pub fn format_text(localizer: &dyn Localizer, key: &str, args: &[&dyn fmt::Display]) -> String {
    match localizer.lookup(key) {
        Some(template) => substitute(template, args),
        None => format!("<{}>", key),
    }
}

fn substitute(template: &str, args: &[&dyn fmt::Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let placeholder = after
            .find('}')
            .and_then(|close| after[..close].parse::<usize>().ok().map(|index| (index, close)));

        match placeholder {
            Some((index, close)) if index < args.len() => {
                out.push_str(&args[index].to_string());
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

//=== LocaleTable =========================================================

/// In-memory string tables keyed by locale.
///
/// The first locale added becomes the selected one.
#[derive(Debug, Default)]
pub struct LocaleTable {
    locales: Vec<Locale>,
    selected: Option<Locale>,
    tables: HashMap<Locale, HashMap<String, String>>,
}

impl LocaleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a locale with its entries, merging into an existing table.
    pub fn with_locale<I, K, V>(mut self, locale: impl Into<Locale>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let locale = locale.into();

        if !self.locales.contains(&locale) {
            self.locales.push(locale.clone());
        }
        if self.selected.is_none() {
            self.selected = Some(locale.clone());
        }

        self.tables
            .entry(locale)
            .or_default()
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

impl Localizer for LocaleTable {
    fn available_locales(&self) -> &[Locale] {
        &self.locales
    }

    fn selected_locale(&self) -> Option<&Locale> {
        self.selected.as_ref()
    }

    fn select_locale(&mut self, locale: Locale) {
        if !self.tables.contains_key(&locale) {
            warn!(target: "localization", "Selected locale {} has no string table", locale);
        }
        self.selected = Some(locale);
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        let selected = self.selected.as_ref()?;
        self.tables.get(selected)?.get(key).map(String::as_str)
    }
}

//=========================================================================
// Tests
//=========================================================================
