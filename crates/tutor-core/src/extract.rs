//! Reply extraction — splits raw tutor text into narrative and chart.
//!
//! The tutor is told to end a reply with a fenced block:
//!
//! ````text
//! Here is a comparison.
//!
//! ```json:vis
//! {"type":"bar","title":"X","data":[{"name":"A","value":1}]}
//! ```
//! ````
//!
//! Only the first block counts. The opening marker must be followed by
//! whitespace, and the block ends at the next fence. A block that fails to
//! decode leaves the reply exactly as received.

use tutor_types::error::VisualizationError;
use tutor_types::visualization::VisualizationPayload;

pub const OPEN_MARKER: &str = "```json:vis";
pub const FENCE: &str = "```";

/// Byte offsets of a marker block inside a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerBlock {
    /// First byte of the opening marker
    pub start: usize,
    pub body_start: usize,
    pub body_end: usize,
    /// One past the closing fence
    pub end: usize,
}

impl MarkerBlock {
    pub fn body<'a>(&self, text: &'a str) -> &'a str {
        &text[self.body_start..self.body_end]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub narrative: String,
    pub visualization: Option<VisualizationPayload>,
    /// Set when a block was found but could not be decoded
    pub malformed: Option<VisualizationError>,
}

impl Extraction {
    fn verbatim(raw: &str) -> Self {
        Self {
            narrative: raw.to_string(),
            visualization: None,
            malformed: None,
        }
    }
}

/// Find the first marker block, if any.
pub fn locate_block(text: &str) -> Option<MarkerBlock> {
    let mut search_from = 0;
    while let Some(offset) = text[search_from..].find(OPEN_MARKER) {
        let start = search_from + offset;
        let after_marker = start + OPEN_MARKER.len();

        let gap: usize = text[after_marker..]
            .chars()
            .take_while(|c| c.is_whitespace())
            .map(char::len_utf8)
            .sum();
        if gap == 0 {
            // e.g. "```json:visual", not our marker
            search_from = after_marker;
            continue;
        }

        let body_start = after_marker + gap;
        let body_end = body_start + text[body_start..].find(FENCE)?;
        return Some(MarkerBlock {
            start,
            body_start,
            body_end,
            end: body_end + FENCE.len(),
        });
    }
    None
}

pub fn contains_marker(text: &str) -> bool {
    locate_block(text).is_some()
}

/// Decode the payload inside a located block.
pub fn parse_block(text: &str, block: &MarkerBlock) -> Result<VisualizationPayload, VisualizationError> {
    VisualizationPayload::parse(block.body(text))
}

/// Split a raw reply into narrative and optional visualization.
///
/// Never fails: a malformed block is logged and the raw text is returned
/// untouched so the explanation still reaches the user.
pub fn extract(raw: &str) -> Extraction {
    let Some(block) = locate_block(raw) else {
        return Extraction::verbatim(raw);
    };

    match parse_block(raw, &block) {
        Ok(payload) => {
            let mut narrative = String::with_capacity(raw.len() - (block.end - block.start));
            narrative.push_str(&raw[..block.start]);
            narrative.push_str(&raw[block.end..]);
            Extraction {
                narrative: narrative.trim().to_string(),
                visualization: Some(payload),
                malformed: None,
            }
        }
        Err(e) => {
            log::warn!("Failed to parse visualization block: {}", e);
            Extraction {
                malformed: Some(e),
                ..Extraction::verbatim(raw)
            }
        }
    }
}
