//! Status-line templates.
//!
//! A template is plain text with `$`-prefixed placeholders. Variable
//! placeholders pull fields out of a [`StreamRecord`]; color placeholders
//! expand to ANSI SGR foreground sequences.
//!
//! ## Variables
//!
//!   $game  $viewers  $mature  $status  $language  $name  $url  $followers
//!
//! ## Colors
//!
//!   $color_default  $color_black  $color_red  $color_green  $color_yellow
//!   $color_blue  $color_magenta  $color_cyan  $color_lgray  $color_dgray
//!   $color_lred  $color_lgreen  $color_lyellow  $color_lblue
//!   $color_lmagenta  $color_lcyan  $color_white
//!
//! Rendering is a single left-to-right pass: at every `$` the longest known
//! placeholder wins, substituted text is never rescanned, and unknown `$...`
//! sequences are copied through untouched.

use std::path::Path;

use tracing::debug;

use crate::stream::StreamRecord;

pub const DEFAULT_FORMAT: &str = "$name is playing $game for $viewers viewers";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Game,
    Viewers,
    Mature,
    Status,
    Language,
    Name,
    Url,
    Followers,
}

#[derive(Debug, Clone, Copy)]
enum Placeholder {
    Field(Field),
    Color(&'static str),
}

const PLACEHOLDERS: &[(&str, Placeholder)] = &[
    ("game", Placeholder::Field(Field::Game)),
    ("viewers", Placeholder::Field(Field::Viewers)),
    ("mature", Placeholder::Field(Field::Mature)),
    ("status", Placeholder::Field(Field::Status)),
    ("language", Placeholder::Field(Field::Language)),
    ("name", Placeholder::Field(Field::Name)),
    ("url", Placeholder::Field(Field::Url)),
    ("followers", Placeholder::Field(Field::Followers)),
    ("color_default", Placeholder::Color("\x1b[39m")),
    ("color_black", Placeholder::Color("\x1b[30m")),
    ("color_red", Placeholder::Color("\x1b[31m")),
    ("color_green", Placeholder::Color("\x1b[32m")),
    ("color_yellow", Placeholder::Color("\x1b[33m")),
    ("color_blue", Placeholder::Color("\x1b[34m")),
    ("color_magenta", Placeholder::Color("\x1b[35m")),
    ("color_cyan", Placeholder::Color("\x1b[36m")),
    ("color_lgray", Placeholder::Color("\x1b[37m")),
    ("color_dgray", Placeholder::Color("\x1b[90m")),
    ("color_lred", Placeholder::Color("\x1b[91m")),
    ("color_lgreen", Placeholder::Color("\x1b[92m")),
    ("color_lyellow", Placeholder::Color("\x1b[93m")),
    ("color_lblue", Placeholder::Color("\x1b[94m")),
    ("color_lmagenta", Placeholder::Color("\x1b[95m")),
    ("color_lcyan", Placeholder::Color("\x1b[96m")),
    ("color_white", Placeholder::Color("\x1b[97m")),
];

/// Longest placeholder name that `rest` starts with.
fn match_placeholder(rest: &str) -> Option<(&'static str, Placeholder)> {
    PLACEHOLDERS
        .iter()
        .filter(|(name, _)| rest.starts_with(name))
        .max_by_key(|(name, _)| name.len())
        .copied()
}

fn push_field(out: &mut String, field: Field, record: &StreamRecord) {
    match field {
        Field::Game => out.push_str(&record.game),
        Field::Viewers => out.push_str(&record.viewer_count.to_string()),
        Field::Mature => out.push_str(if record.is_mature { "true" } else { "false" }),
        Field::Status => out.push_str(&record.status),
        Field::Language => out.push_str(&record.broadcaster_language),
        Field::Name => out.push_str(&record.display_name),
        Field::Url => out.push_str(&record.url),
        Field::Followers => out.push_str(&record.follower_count.to_string()),
    }
}

/// Expand every known placeholder in `template` against `record`.
pub fn render(template: &str, record: &StreamRecord) -> String {
    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        match match_placeholder(after) {
            Some((name, Placeholder::Field(field))) => {
                push_field(&mut out, field, record);
                rest = &after[name.len()..];
            }
            Some((name, Placeholder::Color(code))) => {
                out.push_str(code);
                rest = &after[name.len()..];
            }
            None => {
                out.push('$');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// The active status-line format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
}

impl Default for Template {
    fn default() -> Self {
        Self::new(DEFAULT_FORMAT)
    }
}

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Build a template from the contents of a format file: `#` comment lines
    /// and blank lines are dropped, the rest are joined with `\n`.
    pub fn from_format_file(content: &str) -> Self {
        let source = content
            .lines()
            .filter(|line| !line.starts_with('#') && !line.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        Self { source }
    }

    /// Read the override file at `path`, or fall back to [`DEFAULT_FORMAT`]
    /// when it does not exist.
    pub fn load(path: &Path) -> crate::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                debug!("Using format file {:?}", path);
                Ok(Self::from_format_file(&content))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(crate::Error::io(path, e)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn render(&self, record: &StreamRecord) -> String {
        render(&self.source, record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> StreamRecord {
        StreamRecord {
            game: "Bar".into(),
            viewer_count: 5,
            is_mature: false,
            status: "hello chat".into(),
            broadcaster_language: "en".into(),
            display_name: "Foo".into(),
            url: "https://www.twitch.tv/foo".into(),
            follower_count: 42,
        }
    }

    #[test]
    fn test_default_format() {
        assert_eq!(
            Template::default().render(&record()),
            "Foo is playing Bar for 5 viewers"
        );
    }

    #[test]
    fn test_all_variables() {
        let out = render(
            "$name|$game|$viewers|$mature|$status|$language|$url|$followers",
            &record(),
        );
        assert_eq!(
            out,
            "Foo|Bar|5|false|hello chat|en|https://www.twitch.tv/foo|42"
        );
    }

    #[test]
    fn test_mature_true_literal() {
        let r = StreamRecord { is_mature: true, ..record() };
        assert_eq!(render("$mature", &r), "true");
    }

    #[test]
    fn test_color_tokens() {
        let r = record();
        assert_eq!(render("$color_red", &r), "\x1b[31m");
        assert_eq!(render("$color_lred", &r), "\x1b[91m");
        assert_eq!(render("$color_default", &r), "\x1b[39m");
        assert_eq!(render("$color_white$name$color_default", &r), "\x1b[97mFoo\x1b[39m");
    }

    #[test]
    fn test_every_color_is_sgr() {
        for (name, placeholder) in PLACEHOLDERS {
            if let Placeholder::Color(code) = placeholder {
                let out = render(&format!("${}", name), &StreamRecord::default());
                assert_eq!(&out, code);
                assert!(out.starts_with("\x1b[") && out.ends_with('m'));
            }
        }
    }

    #[test]
    fn test_no_placeholders_is_identity() {
        let r = record();
        for s in ["", "plain text", "price: $5", "$$", "$unknown $ $colour_red", "trailing $"] {
            assert_eq!(render(s, &r), s);
        }
    }

    #[test]
    fn test_placeholder_followed_by_text() {
        assert_eq!(render("$gameXYZ", &record()), "BarXYZ");
        assert_eq!(render("$$name", &record()), "$Foo");
    }

    #[test]
    fn test_substituted_values_not_rescanned() {
        let r = StreamRecord { status: "$name".into(), ..record() };
        assert_eq!(render("$status", &r), "$name");
    }

    #[test]
    fn test_empty_fields_render_empty() {
        assert_eq!(render("[$game][$status]", &StreamRecord::default()), "[][]");
    }

    #[test]
    fn test_format_file_strips_comments_and_blanks() {
        let content = "# header comment\n\n$name\n#another\n   \n$color_green$game\n";
        let t = Template::from_format_file(content);
        assert_eq!(t.as_str(), "$name\n$color_green$game");
    }

    #[test]
    fn test_load_missing_file_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        let t = Template::load(&dir.path().join("format.txt")).unwrap();
        assert_eq!(t.as_str(), DEFAULT_FORMAT);
    }

    #[test]
    fn test_load_override_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("format.txt");
        std::fs::write(&path, "# mine\n$name ($viewers)\n").unwrap();
        let t = Template::load(&path).unwrap();
        assert_eq!(t.render(&record()), "Foo (5)");
    }
}
