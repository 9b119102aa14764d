//! i18n - Internationalization Module
//!
//! Thin lookups over the `locales/*.yml` catalogs. Unknown locales fall back
//! to English.

use gpui::SharedString;
use rust_i18n::t;

use crate::domain::ColumnDefinition;

/// Locales shipped with the application
pub const SUPPORTED_LOCALES: [&str; 2] = ["en", "ja"];

/// Map any locale tag (`ja-JP`, `en_US`, `fr`) onto a shipped locale
pub fn normalize_locale(locale: &str) -> &'static str {
    let lang = locale
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    SUPPORTED_LOCALES
        .into_iter()
        .find(|supported| *supported == lang)
        .unwrap_or("en")
}

/// Translate a key
pub fn tr(locale: &str, key: &str) -> SharedString {
    t!(key, locale = normalize_locale(locale)).to_string().into()
}

/// Header label of a column, falling back to its definition label
pub fn column_label(locale: &str, column: &ColumnDefinition) -> SharedString {
    let key = format!("columns.{}", column.id);
    let text = t!(key.as_str(), locale = normalize_locale(locale)).to_string();
    if text.ends_with(&key) {
        column.label.clone().into()
    } else {
        text.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::default_columns;

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("ja-JP"), "ja");
        assert_eq!(normalize_locale("en_US"), "en");
        assert_eq!(normalize_locale("fr"), "en");
        assert_eq!(normalize_locale(""), "en");
    }

    #[test]
    fn test_translations() {
        assert_eq!(tr("ja", "grid.empty").as_ref(), "データがありません");
        assert_eq!(tr("en", "grid.empty").as_ref(), "No data");
        assert_eq!(tr("de", "grid.retry").as_ref(), "Retry");
    }

    #[test]
    fn test_column_label_falls_back_to_definition() {
        let columns = default_columns();
        assert_eq!(column_label("ja", &columns[2]).as_ref(), "ステータス");

        let custom = ColumnDefinition::new("region", "Region", 120);
        assert_eq!(column_label("ja", &custom).as_ref(), "Region");
    }
}
