use log::debug;
use std::ops::Range;

/// Characters that separate arguments on a command line.
pub const DELIMITERS: [char; 5] = [' ', '\t', '\r', '\n', '\x07'];

fn is_delimiter(byte: u8) -> bool {
    DELIMITERS.contains(&char::from(byte))
}

/// Byte ranges of every maximal run of non-delimiter characters in `line`.
///
/// All delimiters are ASCII, so each range starts and ends on a char boundary.
pub fn token_spans(line: &str) -> Vec<Range<usize>> {
    let bytes = line.as_bytes();
    let n = bytes.len();
    let mut cursor = 0;
    let mut spans = Vec::new();

    loop {
        cursor += bytes[cursor..]
            .iter()
            .take_while(|&&b| is_delimiter(b))
            .count();

        if cursor == n {
            return spans;
        }

        let start = cursor;
        cursor += bytes[cursor..]
            .iter()
            .take_while(|&&b| !is_delimiter(b))
            .count();

        spans.push(start..cursor);
    }
}

/// Splits a line into its argument vector. The first element, if any, is the
/// command name. Tokens borrow from `line` and cannot outlive it.
pub fn tokenize(line: &str) -> Vec<&str> {
    let argv: Vec<&str> = token_spans(line)
        .into_iter()
        .map(|span| &line[span])
        .collect();

    debug!("tokens: {:?}", argv);
    argv
}
