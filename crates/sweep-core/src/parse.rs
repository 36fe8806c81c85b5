//! Record-line parsing.
//!
//! Each input line carries `<identity> <address> <port>` separated by
//! whitespace. Address and port are carried through opaquely; only the
//! identity participates in compaction decisions. Field values are scoped to
//! their own line — a short line never inherits tokens from a previous one.

use crate::error::Error;

/// Policy for lines with fewer than three tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Fail the whole pass with [`Error::MalformedRecord`].
    #[default]
    Strict,
    /// Treat missing tokens as empty strings, scoped to this line only.
    Lenient,
}

/// The three fields of one parsed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub identity: String,
    pub address: String,
    pub port: String,
}

/// Split `line` into identity/address/port.
///
/// `line_no` is 1-based and only used for error reporting. Tokens past the
/// third are ignored.
///
/// # Errors
///
/// Under [`MalformedPolicy::Strict`], returns [`Error::MalformedRecord`] when
/// the line holds fewer than three tokens.
pub fn parse_line(line: &str, line_no: usize, policy: MalformedPolicy) -> Result<ParsedLine, Error> {
    let mut tokens = line.split_whitespace();
    let identity = tokens.next();
    let address = tokens.next();
    let port = tokens.next();

    if port.is_none() && policy == MalformedPolicy::Strict {
        let found = [identity, address, port].iter().flatten().count();
        return Err(Error::MalformedRecord {
            line: line_no,
            found,
        });
    }

    Ok(ParsedLine {
        identity: identity.unwrap_or_default().to_string(),
        address: address.unwrap_or_default().to_string(),
        port: port.unwrap_or_default().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{MalformedPolicy, parse_line};
    use crate::error::Error;

    #[test]
    fn splits_three_tokens() {
        let parsed = parse_line("bob 1.1.1.1 10", 1, MalformedPolicy::Strict).expect("well-formed");
        assert_eq!(parsed.identity, "bob");
        assert_eq!(parsed.address, "1.1.1.1");
        assert_eq!(parsed.port, "10");
    }

    #[test]
    fn handles_repeated_whitespace_and_tabs() {
        let parsed =
            parse_line("  may\t2.2.2.2   20 ", 1, MalformedPolicy::Strict).expect("well-formed");
        assert_eq!(parsed.identity, "may");
        assert_eq!(parsed.address, "2.2.2.2");
        assert_eq!(parsed.port, "20");
    }

    #[test]
    fn ignores_tokens_past_the_third() {
        let parsed =
            parse_line("doe 4.4.4.4 40 extra junk", 1, MalformedPolicy::Strict).expect("ok");
        assert_eq!(parsed.port, "40");
    }

    #[test]
    fn strict_rejects_short_line() {
        let err = parse_line("bob 1.1.1.1", 3, MalformedPolicy::Strict).expect_err("short line");
        assert_eq!(err, Error::MalformedRecord { line: 3, found: 2 });
    }

    #[test]
    fn strict_rejects_empty_line() {
        let err = parse_line("", 9, MalformedPolicy::Strict).expect_err("empty line");
        assert_eq!(err, Error::MalformedRecord { line: 9, found: 0 });
    }

    #[test]
    fn lenient_fills_missing_tokens_with_empty_strings() {
        let parsed = parse_line("bob", 1, MalformedPolicy::Lenient).expect("lenient");
        assert_eq!(parsed.identity, "bob");
        assert_eq!(parsed.address, "");
        assert_eq!(parsed.port, "");
    }

    #[test]
    fn lenient_never_carries_values_across_lines() {
        // Parse a full line, then a short one. The short line must not see
        // the earlier line's fields.
        let _full = parse_line("bob 1.1.1.1 10", 1, MalformedPolicy::Lenient).expect("full");
        let short = parse_line("may 2.2.2.2", 2, MalformedPolicy::Lenient).expect("short");
        assert_eq!(short.identity, "may");
        assert_eq!(short.address, "2.2.2.2");
        assert_eq!(short.port, "");
    }
}
