//! Lenient dotenv parsing on top of `dotenvy`
//!
//! `dotenvy` handles quoting, comments and `export`. Two things are changed
//! around it: bytes are decoded line by line so one bad line cannot hide the
//! rest of the file, and `$` is escaped before parsing so values are never
//! expanded from the file or from the process environment.

use std::io::Cursor;
use std::path::Path;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Parse dotenv bytes into `(key, value)` pairs in file order.
///
/// Lines that are not valid UTF-8, or that do not parse, are skipped.
pub(crate) fn parse_entries(bytes: &[u8], origin: &Path) -> Vec<(String, String)> {
    let text = escape_substitutions(&decode_lines(bytes, origin));

    let mut entries = Vec::new();
    for item in dotenvy::from_read_iter(Cursor::new(text)) {
        match item {
            Ok(pair) => entries.push(pair),
            Err(dotenvy::Error::LineParse(line, _)) => {
                tracing::debug!("Skipping malformed line in {}: {}", origin.display(), line);
            }
            // Only line errors are expected from an in-memory UTF-8 buffer
            Err(err) => {
                tracing::debug!("Stopped reading {}: {}", origin.display(), err);
                break;
            }
        }
    }
    entries
}

fn decode_lines(bytes: &[u8], origin: &Path) -> String {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut text = String::with_capacity(bytes.len());
    for (index, line) in bytes.split_inclusive(|b| *b == b'\n').enumerate() {
        match std::str::from_utf8(line) {
            Ok(line) => text.push_str(line),
            Err(_) => {
                tracing::debug!(
                    "Skipping line {} of {}: not valid UTF-8",
                    index + 1,
                    origin.display()
                );
            }
        }
    }
    text
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    Bare,
    Double,
    Single,
}

/// Backslash-escape every `$` the parser would expand.
///
/// Tracks quoting the same way the parser does. Single-quoted text is already
/// literal and comments are dropped, so neither is touched.
fn escape_substitutions(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut quote = Quote::Bare;
    let mut escaped = false;
    let mut comment = false;
    let mut line_start = true;
    let mut after_blank = false;

    for c in text.chars() {
        if c == '\n' {
            if quote == Quote::Bare {
                comment = false;
                line_start = true;
            }
            escaped = false;
            after_blank = false;
            out.push(c);
            continue;
        }
        if comment {
            out.push(c);
            continue;
        }
        if line_start {
            if c.is_whitespace() {
                out.push(c);
                continue;
            }
            line_start = false;
            if c == '#' {
                comment = true;
                out.push(c);
                continue;
            }
        }

        let was_escaped = escaped;
        escaped = false;
        match quote {
            Quote::Single => {
                if c == '\'' {
                    quote = Quote::Bare;
                }
            }
            _ if was_escaped => {}
            Quote::Double => match c {
                '\\' => escaped = true,
                '"' => quote = Quote::Bare,
                '$' => out.push('\\'),
                _ => {}
            },
            Quote::Bare => match c {
                '\\' => escaped = true,
                '\'' => quote = Quote::Single,
                '"' => quote = Quote::Double,
                '$' => out.push('\\'),
                '#' if after_blank => comment = true,
                _ => {}
            },
        }
        after_blank = quote == Quote::Bare && !was_escaped && matches!(c, ' ' | '\t');
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{escape_substitutions, parse_entries};
    use std::collections::BTreeMap;
    use std::path::Path;

    fn parse(bytes: &[u8]) -> BTreeMap<String, String> {
        parse_entries(bytes, Path::new(".env")).into_iter().collect()
    }

    fn value<'a>(map: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
        map.get(key).map(String::as_str)
    }

    #[test]
    fn dollar_signs_are_kept_literally() {
        let map = parse(
            b"DATABASE_URL=postgres://u:pa$word@db/app\n\
OPENAI_API_KEY=sk-abc$defghijklmnop\n\
BRACED=\"${HOME}/cache\"\n\
SINGLE='a$b'\n\
TRAILING=cost$\n",
        );

        assert_eq!(value(&map, "DATABASE_URL"), Some("postgres://u:pa$word@db/app"));
        assert_eq!(value(&map, "OPENAI_API_KEY"), Some("sk-abc$defghijklmnop"));
        assert_eq!(value(&map, "BRACED"), Some("${HOME}/cache"));
        assert_eq!(value(&map, "SINGLE"), Some("a$b"));
        assert_eq!(value(&map, "TRAILING"), Some("cost$"));
    }

    #[test]
    fn earlier_keys_and_process_env_are_not_substituted() {
        temp_env::with_var("ENVDOCTOR_PARSE_OUTER", Some("outer"), || {
            let map = parse(b"FIRST=one\nREF=$FIRST\nOUTER=$ENVDOCTOR_PARSE_OUTER\n");
            assert_eq!(value(&map, "REF"), Some("$FIRST"));
            assert_eq!(value(&map, "OUTER"), Some("$ENVDOCTOR_PARSE_OUTER"));
        });
    }

    #[test]
    fn invalid_utf8_line_is_skipped_without_losing_later_lines() {
        let map = parse(b"FIRST=1\nBAD=\xff\xfe\nOPENAI_API_KEY=sk-0123456789abcdef\n");

        assert_eq!(value(&map, "FIRST"), Some("1"));
        assert_eq!(value(&map, "BAD"), None);
        assert_eq!(value(&map, "OPENAI_API_KEY"), Some("sk-0123456789abcdef"));
    }

    #[test]
    fn comments_with_quotes_do_not_change_escaping() {
        let map = parse(b"# don't expand $HOME\nAFTER=x$y\nINLINE=v # it's $z\nNEXT=$w\n");

        assert_eq!(value(&map, "AFTER"), Some("x$y"));
        assert_eq!(value(&map, "INLINE"), Some("v"));
        assert_eq!(value(&map, "NEXT"), Some("$w"));
    }

    #[test]
    fn byte_order_mark_and_multiline_values() {
        let map = parse(b"\xEF\xBB\xBFFOO=1\nMULTI=\"line one\nline $two\"\nLAST=2\n");

        assert_eq!(value(&map, "FOO"), Some("1"));
        assert_eq!(value(&map, "MULTI"), Some("line one\nline $two"));
        assert_eq!(value(&map, "LAST"), Some("2"));
    }

    #[test]
    fn escaping_leaves_single_quotes_and_escaped_dollars_alone() {
        assert_eq!(escape_substitutions("A='$x'\n"), "A='$x'\n");
        assert_eq!(escape_substitutions("A=\\$x\n"), "A=\\$x\n");
        assert_eq!(escape_substitutions("A=\"$x\"\n"), "A=\"\\$x\"\n");
    }
}
