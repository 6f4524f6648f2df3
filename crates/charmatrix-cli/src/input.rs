//! Styled-text input from JSON files, stdin or command-line flags.

use anyhow::{Context, Result};
use charmatrix_hw::TextBlock;
use std::io::Read;

/// Where the text to display comes from.
#[derive(Debug, Clone, clap::Args)]
pub struct TextSource {
    /// JSON file holding an array of {"text", "fg", "bg"} objects ("-" for stdin)
    #[arg(long, short, conflicts_with = "text")]
    pub file: Option<String>,

    /// Plain text to show as a single block
    #[arg(long, short)]
    pub text: Option<String>,

    /// Foreground color for --text
    #[arg(long, requires = "text")]
    pub fg: Option<String>,

    /// Background color for --text
    #[arg(long, requires = "text")]
    pub bg: Option<String>,
}

impl TextSource {
    /// Reads the blocks described by this source.
    pub fn blocks(&self) -> Result<Vec<TextBlock>> {
        if let Some(text) = &self.text {
            return Ok(vec![TextBlock {
                text: text.clone(),
                fg: self.fg.clone(),
                bg: self.bg.clone(),
            }]);
        }

        let content = match self.file.as_deref() {
            Some("-") => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("Failed to read text from stdin")?;
                buf
            }
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read text file {}", path))?,
            None => anyhow::bail!("No text given; use --file or --text"),
        };

        parse_blocks(&content)
    }
}

/// Parses a JSON array of styled blocks.
pub fn parse_blocks(content: &str) -> Result<Vec<TextBlock>> {
    serde_json::from_str(content).context("Failed to parse styled text JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blocks() {
        let blocks = parse_blocks(
            r#"[
                {"text": "This is some text", "bg": "black", "fg": "white"},
                {"text": "No formatting defaults to black and white"}
            ]"#,
        )
        .unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].fg.as_deref(), Some("white"));
        assert!(blocks[1].fg.is_none());
    }

    #[test]
    fn test_text_is_required() {
        assert!(parse_blocks(r#"[{"fg": "red"}]"#).is_err());
    }

    #[test]
    fn test_inline_text() {
        let source = TextSource {
            file: None,
            text: Some("hello".to_string()),
            fg: Some("cyan".to_string()),
            bg: None,
        };
        let blocks = source.blocks().unwrap();
        assert_eq!(
            blocks,
            vec![TextBlock {
                text: "hello".to_string(),
                fg: Some("cyan".to_string()),
                bg: None,
            }]
        );
    }

    #[test]
    fn test_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("text.json");
        std::fs::write(&path, r#"[{"text": "AB", "fg": "green"}]"#).unwrap();

        let source = TextSource {
            file: Some(path.display().to_string()),
            text: None,
            fg: None,
            bg: None,
        };
        let blocks = source.blocks().unwrap();
        assert_eq!(blocks[0].text, "AB");
    }
}
