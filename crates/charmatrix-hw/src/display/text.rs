//! Styled text blocks and normalization to the display capacity.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::color::{prefix_byte, prefix_in_range, Background, Foreground};
use crate::DISPLAY_CHARS;

/// One styled run of text.
///
/// Color names are kept as given; unknown or empty names fall back to the
/// palette defaults when the block is encoded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<String>,
}

impl TextBlock {
    /// Creates a block rendered in the default colors.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fg: None,
            bg: None,
        }
    }

    /// Creates a block with explicit foreground and background names.
    pub fn styled(text: impl Into<String>, fg: impl Into<String>, bg: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fg: Some(fg.into()),
            bg: Some(bg.into()),
        }
    }

    /// Effective foreground color.
    pub fn foreground(&self) -> Foreground {
        Foreground::resolve(self.fg.as_deref())
    }

    /// Effective background color.
    pub fn background(&self) -> Background {
        Background::resolve(self.bg.as_deref())
    }

    /// Prefix byte for every character of this block.
    pub fn prefix(&self) -> u8 {
        let (fg, bg) = (self.foreground(), self.background());
        if !prefix_in_range(fg, bg) {
            debug!("{} on {} does not fit a prefix byte, using black background", fg, bg);
        }
        prefix_byte(fg, bg)
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn with_text(&self, text: String) -> Self {
        Self {
            text,
            fg: self.fg.clone(),
            bg: self.bg.clone(),
        }
    }
}

/// Forces the blocks to hold exactly [`DISPLAY_CHARS`] characters in total.
///
/// Overflow is cut from the end of the concatenation, emptying later blocks
/// first. A shortfall is padded with spaces on the last block. An empty
/// sequence stays empty. Lengths count characters, not bytes.
pub fn normalize(blocks: &[TextBlock]) -> Vec<TextBlock> {
    let total: usize = blocks.iter().map(TextBlock::char_len).sum();

    if total > DISPLAY_CHARS {
        let mut remaining = DISPLAY_CHARS;
        blocks
            .iter()
            .map(|block| {
                let len = block.char_len();
                if remaining == 0 {
                    block.with_text(String::new())
                } else if len > remaining {
                    let cut = block.text.chars().take(remaining).collect();
                    remaining = 0;
                    block.with_text(cut)
                } else {
                    remaining -= len;
                    block.clone()
                }
            })
            .collect()
    } else {
        let mut normalized = blocks.to_vec();
        if let Some(last) = normalized.last_mut() {
            let padding = DISPLAY_CHARS - total;
            last.text.extend(std::iter::repeat(' ').take(padding));
        }
        normalized
    }
}
