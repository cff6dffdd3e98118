//! Extraction of the general document information from the HTML
//! rendition of an RFC.
//!
//! The markup of the published pages is a hard dependency: the title is
//! read from `<span class="h1">`, the status from the
//! `<span class="pre noprint docinfo">` header lines and the release date
//! from the first `<pre>` block.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use super::RfcStatus;
use crate::constants::MAX_RFC_TITLE_LENGTH;

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"span[class="h1"]"#).expect("valid selector"));

static DOCINFO_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"span[class="pre noprint docinfo"]"#).expect("valid selector")
});

static PRE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("pre").expect("valid selector"));

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A full month name followed by a four digit year, e.g. `August 2008`.
static MONTH_AND_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b(?:{})\b ([0-9]{{4}})", MONTHS.join("|"))).expect("valid regex")
});

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("The document doesn't contain a release date (month followed by year)")]
    MissingReleaseYear,
    #[error("The document title is longer than {max} characters")]
    TitleTooLong { max: usize },
}

/// The information of an RFC that is derived from its published document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RfcMetadata {
    pub title: String,
    pub status: RfcStatus,
    pub release_year: u16,
}

impl RfcMetadata {
    pub fn extract(html: &str) -> Result<Self, ExtractError> {
        let document = Html::parse_document(html);

        Ok(Self {
            title: extract_title(&document)?,
            status: extract_status(&document),
            release_year: extract_release_year(&document)?,
        })
    }
}

/// Joins the text nodes that are direct children of `element`.
fn own_text<'a>(element: ElementRef<'a>) -> impl Iterator<Item = &'a str> {
    element
        .children()
        .filter_map(|child| child.value().as_text())
        .map(|text| &*text.text)
}

fn joined_own_text<'a>(elements: impl Iterator<Item = ElementRef<'a>>) -> String {
    elements.flat_map(own_text).collect::<Vec<_>>().join(" ")
}

pub fn extract_title(document: &Html) -> Result<String, ExtractError> {
    let title = joined_own_text(document.select(&TITLE_SELECTOR));

    if title.chars().count() > MAX_RFC_TITLE_LENGTH {
        return Err(ExtractError::TitleTooLong {
            max: MAX_RFC_TITLE_LENGTH,
        });
    }

    Ok(title)
}

pub fn extract_status(document: &Html) -> RfcStatus {
    let docinfo = joined_own_text(document.select(&DOCINFO_SELECTOR));
    RfcStatus::detect(&docinfo)
}

pub fn extract_release_year(document: &Html) -> Result<u16, ExtractError> {
    let header = joined_own_text(document.select(&PRE_SELECTOR).take(1));

    MONTH_AND_YEAR
        .captures(&header)
        .and_then(|captures| captures.get(1))
        .and_then(|year| year.as_str().parse::<u16>().ok())
        .ok_or(ExtractError::MissingReleaseYear)
}
