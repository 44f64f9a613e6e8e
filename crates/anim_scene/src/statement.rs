//! Localised statement lookup.
//!
//! A statement file is a sequence of blocks separated by lines holding only
//! `---`. The first line of each block is its language tag; the remaining
//! lines are the statement text.
//!
//! ```text
//! en
//! Given a right angle triangle, ...
//! ---
//! fr
//! Dans un triangle rectangle, ...
//! ---
//! ```

use std::path::{Path, PathBuf};

use tracing::debug;

/// Errors raised while reading statements.
#[derive(Debug, thiserror::Error)]
pub enum StatementError {
    /// No block tagged with the requested language.
    #[error("theorem statement not found in language - {lang}")]
    NotImplemented { lang: String },

    /// The statement file could not be read.
    #[error("failed to read statement file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

enum BlockState {
    /// Next non-separator line is a language tag.
    Seeking,
    /// Inside a block for another language.
    Skipping,
    /// Inside the requested block.
    Reading,
}

/// Extract the text of the block tagged `lang` from `contents`.
///
/// Lines keep their line endings. The block ends at the next `---` line or
/// at end of input.
///
/// # Errors
///
/// Returns [`StatementError::NotImplemented`] if no block for `lang` has
/// any text.
pub fn parse_statement(contents: &str, lang: &str) -> Result<String, StatementError> {
    let mut state = BlockState::Seeking;
    let mut text = String::new();

    for line in contents.split_inclusive('\n') {
        let trimmed = line.trim();
        if trimmed == "---" {
            if matches!(state, BlockState::Reading) {
                break;
            }
            state = BlockState::Seeking;
            continue;
        }
        match state {
            BlockState::Seeking => {
                state = if trimmed == lang {
                    BlockState::Reading
                } else {
                    BlockState::Skipping
                };
            }
            BlockState::Reading => text.push_str(line),
            BlockState::Skipping => {}
        }
    }

    if text.is_empty() {
        return Err(StatementError::NotImplemented {
            lang: lang.to_string(),
        });
    }
    Ok(text)
}

/// Read `filename` under `dir` and extract the block tagged `lang`.
///
/// # Errors
///
/// Returns [`StatementError::Io`] if the file cannot be read and
/// [`StatementError::NotImplemented`] if it has no block for `lang`.
pub fn read_statement(dir: &Path, filename: &str, lang: &str) -> Result<String, StatementError> {
    let path = dir.join(filename);
    debug!(path = %path.display(), lang, "reading statement");
    let contents = std::fs::read_to_string(&path).map_err(|source| StatementError::Io {
        path: path.clone(),
        source,
    })?;
    parse_statement(&contents, lang)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_LANGUAGES: &str = "en\nGiven a right angle triangle,\nthe sum of squares...\n---\nfr\nDans un triangle rectangle...\n---\n";

    #[test]
    fn test_reads_requested_block_only() {
        let text = parse_statement(TWO_LANGUAGES, "en").unwrap();
        assert_eq!(text, "Given a right angle triangle,\nthe sum of squares...\n");
    }

    #[test]
    fn test_reads_later_block() {
        let text = parse_statement(TWO_LANGUAGES, "fr").unwrap();
        assert_eq!(text, "Dans un triangle rectangle...\n");
    }

    #[test]
    fn test_missing_language() {
        let err = parse_statement(TWO_LANGUAGES, "de").unwrap_err();
        assert!(matches!(err, StatementError::NotImplemented { ref lang } if lang == "de"));
        assert_eq!(err.to_string(), "theorem statement not found in language - de");
    }

    #[test]
    fn test_last_block_without_separator() {
        let text = parse_statement("en\nhello\n---\nfr\nbonjour", "fr").unwrap();
        assert_eq!(text, "bonjour");
    }

    #[test]
    fn test_tag_line_is_trimmed() {
        let text = parse_statement("  en  \r\nhello\r\n---\r\n", "en").unwrap();
        assert_eq!(text, "hello\r\n");
    }

    #[test]
    fn test_language_tag_inside_text_is_not_a_tag() {
        // "fr" on the second line of the English block is text, not a tag.
        let text = parse_statement("en\nfr\n---\nfr\nbonjour\n---\n", "fr").unwrap();
        assert_eq!(text, "bonjour\n");
    }

    #[test]
    fn test_read_statement_from_file() {
        let dir = std::env::temp_dir().join(format!("anim_scene_statement_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("pythagoras.txt"), TWO_LANGUAGES).unwrap();

        let text = read_statement(&dir, "pythagoras.txt", "fr").unwrap();
        assert_eq!(text, "Dans un triangle rectangle...\n");
        let missing = read_statement(&dir, "missing.txt", "en").unwrap_err();
        assert!(matches!(missing, StatementError::Io { .. }));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
