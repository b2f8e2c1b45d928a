//! Numerus form resolution using CLDR plural rules.
//!
//! Qt stores one `<numerusform>` per plural form of the target language, in a
//! fixed order. That order matches CLDR's category order (zero, one, two,
//! few, many, other) restricted to the categories that whole numbers can
//! reach: Russian has `one`/`few`/`many`, English `one`/`other`, Japanese
//! only `other`. Decimal-only categories are not counted because `%n` is
//! always an integer.
//!
//! A few languages are the exception: Qt's own tables give Latvian, Irish
//! and Macedonian different forms than CLDR does, and catalogs for them are
//! written against Qt's forms. Those languages use `QT_RULES` instead.
//!
//! Plural rules are cached per thread per language.

use std::cell::RefCell;

use icu_locale_core::Locale;
use icu_plurals::{PluralCategory, PluralRuleType, PluralRules};

/// Languages with CLDR cardinal plural data.
const SUPPORTED_LANGUAGES: &[&str] = &[
    "af", "ar", "az", "be", "bg", "bn", "bs", "ca", "cs", "cy", "da", "de", "el", "en", "eo", "es",
    "et", "eu", "fa", "fi", "fil", "fr", "ga", "gl", "he", "hi", "hr", "hu", "hy", "id", "is",
    "it", "ja", "ka", "kk", "km", "ko", "ky", "lo", "lt", "lv", "mk", "ml", "mn", "mr", "ms", "my",
    "nb", "ne", "nl", "nn", "pa", "pl", "ps", "pt", "ro", "ru", "si", "sk", "sl", "sq", "sr", "sv",
    "sw", "ta", "te", "th", "tk", "tr", "uk", "ur", "uz", "vi", "zh", "zu",
];

/// Category order of numerus forms.
const CATEGORY_ORDER: [PluralCategory; 6] = [
    PluralCategory::Zero,
    PluralCategory::One,
    PluralCategory::Two,
    PluralCategory::Few,
    PluralCategory::Many,
    PluralCategory::Other,
];

/// Integers sampled to find the categories a language uses.
const SAMPLE_LIMIT: i64 = 200;

/// A language whose Qt numerus forms do not follow its CLDR categories.
struct QtRule {
    language: &'static str,
    /// Closest CLDR category name for each form, in form order.
    forms: &'static [&'static str],
    form_for: fn(u64) -> usize,
}

const QT_RULES: &[QtRule] = &[
    QtRule {
        language: "ga",
        forms: &["one", "two", "other"],
        form_for: irish_form,
    },
    QtRule {
        language: "lv",
        forms: &["one", "other", "zero"],
        form_for: latvian_form,
    },
    QtRule {
        language: "mk",
        forms: &["one", "two", "other"],
        form_for: macedonian_form,
    },
];

/// Singular, dual, plural.
fn irish_form(n: u64) -> usize {
    match n {
        1 => 0,
        2 => 1,
        _ => 2,
    }
}

/// Singular, plural, nullar.
fn latvian_form(n: u64) -> usize {
    if n % 10 == 1 && n % 100 != 11 {
        0
    } else if n != 0 {
        1
    } else {
        2
    }
}

/// Singular, dual, plural by last digit.
fn macedonian_form(n: u64) -> usize {
    match n % 10 {
        1 => 0,
        2 => 1,
        _ => 2,
    }
}

fn qt_rule(language: &str) -> Option<&'static QtRule> {
    let lang = normalize_lang(language)?;
    QT_RULES.iter().find(|rule| rule.language == lang)
}

thread_local! {
    static PLURAL_RULES_CACHE: RefCell<Vec<(&'static str, PluralRules, Vec<PluralCategory>)>> =
        const { RefCell::new(Vec::new()) };
}

/// Reduce a catalog language (`pt_BR`, `sr-Latn`, `RU`) to a supported
/// primary language subtag.
fn normalize_lang(language: &str) -> Option<&'static str> {
    let primary = language
        .split(['_', '-', '.', '@'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    SUPPORTED_LANGUAGES
        .iter()
        .find(|&&code| code == primary)
        .copied()
}

fn build_rules(lang: &'static str) -> Option<(PluralRules, Vec<PluralCategory>)> {
    let locale = Locale::try_from_str(lang).ok()?;
    let rules = PluralRules::try_new(locale.into(), PluralRuleType::Cardinal.into()).ok()?;
    let reachable: Vec<PluralCategory> = (0..=SAMPLE_LIMIT)
        .map(|n| rules.category_for(n))
        .collect();
    let categories = CATEGORY_ORDER
        .into_iter()
        .filter(|category| reachable.contains(category))
        .collect();
    Some((rules, categories))
}

fn with_rules<T>(
    language: &str,
    f: impl FnOnce(&PluralRules, &[PluralCategory]) -> T,
) -> Option<T> {
    let lang = normalize_lang(language)?;
    PLURAL_RULES_CACHE.with_borrow_mut(|cache| {
        if let Some((_, rules, categories)) = cache.iter().find(|(code, _, _)| *code == lang) {
            return Some(f(rules, categories));
        }
        let (rules, categories) = build_rules(lang)?;
        let result = f(&rules, &categories);
        cache.push((lang, rules, categories));
        Some(result)
    })
}

/// Translate a `PluralCategory` to its CLDR name.
pub fn category_str(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::Zero => "zero",
        PluralCategory::One => "one",
        PluralCategory::Two => "two",
        PluralCategory::Few => "few",
        PluralCategory::Many => "many",
        PluralCategory::Other => "other",
    }
}

/// Whether plural rules are known for a catalog language.
pub fn is_supported_language(language: &str) -> bool {
    normalize_lang(language).is_some()
}

/// The plural categories of `language`, in numerus form order.
///
/// Returns `None` for languages without plural data.
///
/// # Examples
///
/// ```
/// use tscat::lookup::numerus_categories;
///
/// assert_eq!(numerus_categories("ru"), Some(vec!["one", "few", "many"]));
/// assert_eq!(numerus_categories("en_US"), Some(vec!["one", "other"]));
/// assert_eq!(numerus_categories("tlh"), None);
/// ```
pub fn numerus_categories(language: &str) -> Option<Vec<&'static str>> {
    if let Some(rule) = qt_rule(language) {
        return Some(rule.forms.to_vec());
    }
    with_rules(language, |_, categories| {
        categories.iter().copied().map(category_str).collect()
    })
}

/// How many `<numerusform>` elements a catalog in `language` should carry.
///
/// # Examples
///
/// ```
/// use tscat::lookup::numerus_form_count;
///
/// assert_eq!(numerus_form_count("bg"), Some(2));
/// assert_eq!(numerus_form_count("cs"), Some(3));
/// assert_eq!(numerus_form_count("ja"), Some(1));
/// ```
pub fn numerus_form_count(language: &str) -> Option<usize> {
    if let Some(rule) = qt_rule(language) {
        return Some(rule.forms.len());
    }
    with_rules(language, |_, categories| categories.len())
}

/// Which numerus form to use for the count `n`.
///
/// # Examples
///
/// ```
/// use tscat::lookup::numerus_form_index;
///
/// // Russian: one, few, many
/// assert_eq!(numerus_form_index("ru", 1), Some(0));
/// assert_eq!(numerus_form_index("ru", 3), Some(1));
/// assert_eq!(numerus_form_index("ru", 11), Some(2));
/// assert_eq!(numerus_form_index("ru", 21), Some(0));
///
/// // Latvian follows Qt: singular, plural, nullar
/// assert_eq!(numerus_form_index("lv", 0), Some(2));
/// ```
pub fn numerus_form_index(language: &str, n: i64) -> Option<usize> {
    if let Some(rule) = qt_rule(language) {
        return Some((rule.form_for)(n.unsigned_abs()));
    }
    with_rules(language, |rules, categories| {
        let category = rules.category_for(n);
        categories.iter().position(|c| *c == category)
    })
    .flatten()
}
