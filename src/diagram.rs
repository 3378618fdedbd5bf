//! Extraction of embedded Mermaid diagrams from explanation prose.
//!
//! A diagram travels inside the prose as a fenced block opened by
//! ```` ```mermaid ```` followed by a newline and closed by a newline and
//! ```` ``` ````. Only the first such block is taken; its interior is handed
//! to the renderer untouched and the block is cut out of the prose.

use regex::Regex;
use std::sync::LazyLock;

static MERMAID_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```mermaid\n([\s\S]*?)\n```").expect("mermaid fence pattern is valid")
});

/// Prose split into displayable text and optional diagram markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    pub prose: String,
    pub diagram: Option<String>,
}

impl Explanation {
    pub fn has_diagram(&self) -> bool {
        self.diagram.is_some()
    }
}

pub fn extract_diagram(text: &str) -> Explanation {
    let captures = MERMAID_FENCE
        .captures(text)
        .and_then(|caps| Some((caps.get(0)?, caps.get(1)?)));

    match captures {
        Some((block, interior)) if !interior.as_str().is_empty() => {
            let mut prose = String::with_capacity(text.len() - block.len());
            prose.push_str(&text[..block.start()]);
            prose.push_str(&text[block.end()..]);

            Explanation {
                prose: prose.trim().to_string(),
                diagram: Some(interior.as_str().to_string()),
            }
        }
        _ => Explanation {
            prose: text.to_string(),
            diagram: None,
        },
    }
}
