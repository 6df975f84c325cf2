/// Script ranges checked per character, in priority order.
const SCRIPT_RANGES: &[(char, char, &str)] = &[
    ('\u{4E00}', '\u{9FFF}', "zh"),
    ('\u{3040}', '\u{30FF}', "ja"),
    ('\u{AC00}', '\u{D7AF}', "ko"),
    ('\u{0400}', '\u{04FF}', "ru"),
];

/// Language tag used when no recognized script appears.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Tag a subject by the first character that falls in a known script range.
///
/// Mixed-script subjects are tagged by whichever script appears first, not
/// by majority.
///
/// # Examples
///
/// ```
/// use gitai_gitpulse::language::detect_language;
///
/// assert_eq!(detect_language("feat: 添加用户认证功能"), "zh");
/// assert_eq!(detect_language("feat: add auth"), "en");
/// ```
pub fn detect_language(subject: &str) -> &'static str {
    subject
        .chars()
        .find_map(|c| {
            SCRIPT_RANGES
                .iter()
                .find(|(lo, hi, _)| (*lo..=*hi).contains(&c))
                .map(|(_, _, tag)| *tag)
        })
        .unwrap_or(DEFAULT_LANGUAGE)
}

/// Display name for a language tag; unknown tags are returned as is.
pub fn language_name(tag: &str) -> &str {
    match tag {
        "en" => "English",
        "zh" => "中文",
        "ja" => "日本語",
        "ko" => "한국어",
        "de" => "Deutsch",
        "fr" => "Français",
        "es" => "Español",
        "pt" => "Português",
        "ru" => "Русский",
        "it" => "Italiano",
        other => other,
    }
}
