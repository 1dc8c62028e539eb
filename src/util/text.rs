//! Utility functions for word scanning and document statistics

/// Check if a character is part of a word (`\w` in regex terms)
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// A maximal run of word characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordSpan<'a> {
    /// Character offset of the first character
    pub index: usize,
    pub word: &'a str,
}

impl WordSpan<'_> {
    /// Length in characters
    pub fn len_chars(&self) -> usize {
        self.word.chars().count()
    }
}

/// Iterate over word runs with their character offsets
pub fn words(text: &str) -> Words<'_> {
    Words {
        text,
        byte: 0,
        char_index: 0,
    }
}

pub struct Words<'a> {
    text: &'a str,
    byte: usize,
    char_index: usize,
}

impl<'a> Iterator for Words<'a> {
    type Item = WordSpan<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.text[self.byte..];
        let mut start = None;
        for (offset, ch) in rest.char_indices() {
            match (start, is_word_char(ch)) {
                (None, true) => start = Some((self.byte + offset, self.char_index)),
                (Some((byte_start, index)), false) => {
                    let end = self.byte + offset;
                    // The terminating char is rescanned on the next call
                    self.byte = end;
                    return Some(WordSpan {
                        index,
                        word: &self.text[byte_start..end],
                    });
                }
                _ => {}
            }
            self.char_index += 1;
        }
        self.byte = self.text.len();
        start.map(|(byte_start, index)| WordSpan {
            index,
            word: &self.text[byte_start..],
        })
    }
}

/// Whitespace-separated word count (gate for proactive analysis)
pub fn whitespace_word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Word and character counts shown alongside the document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct DocumentStats {
    pub words: usize,
    pub characters: usize,
}

impl DocumentStats {
    pub fn of(text: &str) -> Self {
        let trimmed = text.trim();
        Self {
            words: words(trimmed).count(),
            characters: trimmed.chars().count(),
        }
    }

    /// e.g. "3 words, 1 character"
    pub fn label(&self) -> String {
        let plural = |n: usize, one: &str, many: &str| {
            format!("{} {}", n, if n == 1 { one } else { many })
        };
        format!(
            "{}, {}",
            plural(self.words, "word", "words"),
            plural(self.characters, "character", "characters")
        )
    }
}

/// Split text into non-empty lines (storybook pages)
pub fn paragraphs(text: &str) -> Vec<String> {
    text.split('\n')
        .filter(|p| !p.trim().is_empty())
        .map(str::to_string)
        .collect()
}
