use thiserror::Error;

/// Errors surfaced by the sweep-core library.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A line held fewer whitespace-separated tokens than the record format
    /// requires. `line` is 1-based for error messages.
    #[error("malformed record on line {line}: expected 3 tokens, found {found}")]
    MalformedRecord { line: usize, found: usize },
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn malformed_record_message_is_one_based() {
        let err = Error::MalformedRecord { line: 7, found: 1 };
        assert_eq!(
            err.to_string(),
            "malformed record on line 7: expected 3 tokens, found 1"
        );
    }
}
