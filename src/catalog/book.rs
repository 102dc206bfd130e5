//! Volume normalization.
//!
//! Maps a [`RawVolume`] into the fixed [`NormalizedBook`] shape served to
//! clients. Missing data is never an error here.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::catalog::error::CatalogResult;
use crate::catalog::raw::RawVolume;

/// A book in the shape this service guarantees to its callers.
///
/// Every field is always serialized; absent scalars become `null` and
/// list fields become `[]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedBook {
    pub id: Option<String>,
    pub title: Option<String>,
    pub authors: Vec<String>,
    pub thumbnail: Option<String>,
    pub published_date: Option<String>,
    pub description: Option<String>,
    pub page_count: Option<i64>,
    pub categories: Vec<String>,
    pub language: Option<String>,
    pub info_link: Option<String>,
    pub preview_link: Option<String>,
    pub publisher: Option<String>,
    pub rating: Option<Number>,
    pub ratings_count: Option<i64>,
}

impl From<RawVolume<'_>> for NormalizedBook {
    fn from(raw: RawVolume<'_>) -> Self {
        let item = raw.record();
        let volume = item.record("volumeInfo");
        let images = volume.record("imageLinks");

        Self {
            id: item.text("id"),
            title: volume.text("title"),
            authors: volume.strings("authors"),
            thumbnail: images
                .non_empty_text("thumbnail")
                .or_else(|| images.text("smallThumbnail")),
            published_date: volume.text("publishedDate"),
            description: volume.text("description"),
            page_count: volume.integer("pageCount"),
            categories: volume.strings("categories"),
            language: volume.text("language"),
            info_link: volume
                .non_empty_text("infoLink")
                .or_else(|| volume.text("canonicalVolumeLink")),
            preview_link: volume.text("previewLink"),
            publisher: volume.text("publisher"),
            rating: volume.number("averageRating"),
            ratings_count: volume.integer("ratingsCount"),
        }
    }
}

/// Normalize one upstream item. Fails only when `raw` is not a JSON object.
pub fn normalize(raw: &Value) -> CatalogResult<NormalizedBook> {
    Ok(NormalizedBook::from(RawVolume::try_from(raw)?))
}
