//! Artist records and the display values derived from them.
//!
//! Records come from a bulk-loaded, loosely structured store, so every
//! optional list is an `Option` and the accessors define a fallback for
//! each missing field instead of failing.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Shown when an artist has no Wikipedia link.
pub const NO_WIKI_ENTRY: &str = "No wikipedia entry found";
/// Shown when an artist has an empty or missing profile.
pub const NO_PROFILE: &str = "No profile available";
/// Shown when an artist has no images.
pub const NO_IMAGES: &str = "No images available";

/// Home-page record from the `artist_info` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistInfo {
    pub name: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    #[serde(default)]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub resource_url: String,
}

/// Full record from the `artist_details` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistDetail {
    /// Stable id used for navigation between cards and detail pages
    pub id: i64,
    pub name: String,
    /// Canonical profile URI at the record's source
    pub uri: String,
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub members: Option<Vec<Member>>,
    #[serde(default)]
    pub urls: Option<Vec<String>>,
    #[serde(default)]
    pub images: Option<Vec<Image>>,
}

/// Image URLs of an artist, or the marker for having none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageList<'a> {
    Missing,
    Urls(Vec<&'a str>),
}

impl fmt::Display for ImageList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageList::Missing => f.write_str(NO_IMAGES),
            ImageList::Urls(urls) => f.write_str(&urls.join(", ")),
        }
    }
}

/// Names of the active members, or the artist's own name for solo records.
pub fn active_members(artist: &ArtistDetail) -> Vec<&str> {
    match &artist.members {
        None => vec![artist.name.as_str()],
        Some(members) => members
            .iter()
            .filter(|m| m.active)
            .map(|m| m.name.as_str())
            .collect(),
    }
}

/// First listed URL, falling back to the record's canonical URI.
pub fn website(artist: &ArtistDetail) -> &str {
    artist
        .urls
        .as_deref()
        .and_then(|urls| urls.first())
        .map(String::as_str)
        .unwrap_or(artist.uri.as_str())
}

/// First URL mentioning wikipedia, or [`NO_WIKI_ENTRY`].
pub fn wiki_link(artist: &ArtistDetail) -> &str {
    artist
        .urls
        .iter()
        .flatten()
        .find(|url| url.contains("wikipedia"))
        .map(String::as_str)
        .unwrap_or(NO_WIKI_ENTRY)
}

/// Profile text with `[tag]` markup rewritten to `<tag>`, or [`NO_PROFILE`].
///
/// This is a literal bracket substitution; the result is not escaped.
pub fn profile_html(artist: &ArtistDetail) -> Cow<'_, str> {
    match artist.profile.as_deref() {
        None | Some("") => Cow::Borrowed(NO_PROFILE),
        Some(profile) => Cow::Owned(profile.replace('[', "<").replace(']', ">")),
    }
}

pub fn image_urls(artist: &ArtistDetail) -> ImageList<'_> {
    match &artist.images {
        None => ImageList::Missing,
        Some(images) => {
            ImageList::Urls(images.iter().map(|i| i.resource_url.as_str()).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artist(name: &str) -> ArtistDetail {
        ArtistDetail {
            id: 1,
            name: name.to_string(),
            uri: "https://example.com/artist/1".to_string(),
            profile: None,
            members: None,
            urls: None,
            images: None,
        }
    }

    #[test]
    fn test_active_members_solo() {
        assert_eq!(active_members(&artist("Solo")), vec!["Solo"]);
    }

    #[test]
    fn test_active_members_filters_inactive_in_order() {
        let mut band = artist("Band");
        band.members = Some(vec![
            Member { name: "A".into(), active: true },
            Member { name: "B".into(), active: false },
            Member { name: "C".into(), active: true },
        ]);
        assert_eq!(active_members(&band), vec!["A", "C"]);
    }

    #[test]
    fn test_active_members_none_active() {
        let mut band = artist("Band");
        band.members = Some(vec![Member { name: "B".into(), active: false }]);
        assert!(active_members(&band).is_empty());
    }

    #[test]
    fn test_website_falls_back_to_uri() {
        assert_eq!(website(&artist("X")), "https://example.com/artist/1");

        let mut empty_urls = artist("X");
        empty_urls.urls = Some(vec![]);
        assert_eq!(website(&empty_urls), "https://example.com/artist/1");
    }

    #[test]
    fn test_website_prefers_first_url() {
        let mut a = artist("X");
        a.urls = Some(vec![
            "https://a.example".into(),
            "https://b.example".into(),
        ]);
        assert_eq!(website(&a), "https://a.example");
    }

    #[test]
    fn test_wiki_link_sentinel_in_both_branches() {
        assert_eq!(wiki_link(&artist("X")), NO_WIKI_ENTRY);

        let mut no_wiki = artist("X");
        no_wiki.urls = Some(vec!["https://a.example".into()]);
        assert_eq!(wiki_link(&no_wiki), NO_WIKI_ENTRY);
    }

    #[test]
    fn test_wiki_link_found() {
        let mut a = artist("X");
        a.urls = Some(vec![
            "https://a.example".into(),
            "https://en.wikipedia.org/wiki/X".into(),
        ]);
        assert_eq!(wiki_link(&a), "https://en.wikipedia.org/wiki/X");
    }

    #[test]
    fn test_profile_bracket_translation() {
        let mut a = artist("X");
        a.profile = Some("[b]Bold[/b]".into());
        assert_eq!(profile_html(&a), "<b>Bold</b>");
    }

    #[test]
    fn test_profile_does_not_escape() {
        let mut a = artist("X");
        a.profile = Some("Tom & Jerry [i]<live>[/i]".into());
        assert_eq!(profile_html(&a), "Tom & Jerry <i><live></i>");
    }

    #[test]
    fn test_profile_missing_or_empty() {
        let mut a = artist("X");
        assert_eq!(profile_html(&a), NO_PROFILE);
        a.profile = Some(String::new());
        assert_eq!(profile_html(&a), NO_PROFILE);
    }

    #[test]
    fn test_image_urls() {
        let mut a = artist("X");
        assert_eq!(image_urls(&a), ImageList::Missing);
        assert_eq!(image_urls(&a).to_string(), NO_IMAGES);

        a.images = Some(vec![
            Image { resource_url: "https://img.example/1.jpg".into() },
            Image { resource_url: "https://img.example/2.jpg".into() },
        ]);
        assert_eq!(
            image_urls(&a),
            ImageList::Urls(vec!["https://img.example/1.jpg", "https://img.example/2.jpg"])
        );
    }

    #[test]
    fn test_detail_requires_name_and_uri() {
        let missing_uri = serde_json::json!({ "id": 3, "name": "X" });
        assert!(serde_json::from_value::<ArtistDetail>(missing_uri).is_err());

        let minimal = serde_json::json!({
            "id": 3,
            "name": "X",
            "uri": "https://example.com/artist/3",
            "extra": { "ignored": true }
        });
        let parsed: ArtistDetail = serde_json::from_value(minimal).unwrap();
        assert_eq!(parsed.members, None);
    }
}
