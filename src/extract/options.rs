//! Extraction options and page selection.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Options controlling how a document is turned into text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// OCR language code (Tesseract syntax, e.g. "eng" or "eng+deu")
    pub language: String,

    /// Resolution used when rasterizing pages for OCR
    pub dpi: u32,

    /// Text inserted between consecutive page outputs
    pub separator: String,

    /// Which pages to process (1-indexed)
    pub pages: PageSelection,

    /// Whether pages without embedded text are sent to OCR
    pub ocr_fallback: bool,

    /// Minimum number of non-whitespace characters for embedded text to count
    pub min_text_chars: usize,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the OCR language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the render resolution. Values below 1 are clamped to 1.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi.max(1);
        self
    }

    /// Insert `separator` between page outputs.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Disable the OCR fallback; pages without embedded text stay empty.
    pub fn without_ocr(mut self) -> Self {
        self.ocr_fallback = false;
        self
    }

    /// Require at least `chars` non-whitespace characters of embedded text
    /// before skipping OCR.
    pub fn with_min_text_chars(mut self, chars: usize) -> Self {
        self.min_text_chars = chars.max(1);
        self
    }

    /// Whether embedded text is substantial enough to skip OCR.
    pub(crate) fn accepts_direct_text(&self, text: &str) -> bool {
        text.chars()
            .filter(|c| !c.is_whitespace())
            .take(self.min_text_chars)
            .count()
            >= self.min_text_chars
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            dpi: 72,
            separator: String::new(),
            pages: PageSelection::All,
            ocr_fallback: true,
            min_text_chars: 1,
        }
    }
}

/// Page selection for extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Every page
    #[default]
    All,
    /// A range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Several ranges (inclusive, 1-indexed); single pages are one-page ranges
    Ranges(Vec<RangeInclusive<u32>>),
}

impl PageSelection {
    /// Check if a 1-indexed page number is selected.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Ranges(ranges) => ranges.iter().any(|r| r.contains(&page)),
        }
    }

    /// Parse a page selection string (e.g., "all", "2-5", "1,3,7-9").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        if !s.contains(',') {
            if let Some((start, end)) = s.split_once('-') {
                let (start, end) = (parse_page(start, s)?, parse_page(end, s)?);
                if start > end {
                    return Err(Error::InvalidPageRange(s.to_string()));
                }
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut ranges = Vec::new();
        for part in s.split(',') {
            let range = match part.split_once('-') {
                Some((start, end)) => {
                    let (start, end) = (parse_page(start, s)?, parse_page(end, s)?);
                    if start > end {
                        return Err(Error::InvalidPageRange(s.to_string()));
                    }
                    start..=end
                }
                None => {
                    let page = parse_page(part, s)?;
                    page..=page
                }
            };
            ranges.push(range);
        }

        Ok(PageSelection::Ranges(merge_ranges(ranges)))
    }
}

/// Sort ranges and merge the ones that overlap or touch.
fn merge_ranges(mut ranges: Vec<RangeInclusive<u32>>) -> Vec<RangeInclusive<u32>> {
    ranges.sort_unstable_by_key(|r| (*r.start(), *r.end()));

    let mut merged: Vec<RangeInclusive<u32>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if *range.start() <= last.end().saturating_add(1) => {
                if range.end() > last.end() {
                    *last = *last.start()..=*range.end();
                }
            }
            _ => merged.push(range),
        }
    }
    merged
}

fn parse_page(part: &str, whole: &str) -> Result<u32> {
    match part.trim().parse::<u32>() {
        Ok(0) | Err(_) => Err(Error::InvalidPageRange(whole.to_string())),
        Ok(page) => Ok(page),
    }
}
