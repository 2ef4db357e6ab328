//! Request-header conventions that pick a full page or a fragment.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use super::response::AppError;

/// Set by htmx on every request it issues
pub const HX_REQUEST: &str = "hx-request";
/// Id of the element that triggered an htmx request
pub const HX_TRIGGER: &str = "hx-trigger";
/// Carries the artist id when a profile card is toggled back
pub const ARTIST_ID: &str = "artist-id";

/// Whether a request is a direct navigation or an in-page interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    /// Render the whole page
    Full,
    /// Render one named block only
    Fragment,
}

impl RequestMode {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        match headers.get(HX_REQUEST).and_then(|v| v.to_str().ok()) {
            Some(value) if !value.eq_ignore_ascii_case("false") => RequestMode::Fragment,
            _ => RequestMode::Full,
        }
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for RequestMode
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Infallible> {
        Ok(RequestMode::from_headers(&parts.headers))
    }
}

/// Which face of a catalog card a fragment request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogTarget {
    /// A name card was clicked: show the profile of artist `id`
    Profile(i64),
    /// A profile card was clicked: flip back to the name card of artist `id`
    Name(i64),
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn parse_id(raw: &str, header: &str) -> Result<i64, AppError> {
    raw.parse().map_err(|_| {
        AppError::bad_request(format!("{header} header must be an artist id, got '{raw}'"))
    })
}

impl CatalogTarget {
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, AppError> {
        let trigger = header_str(headers, HX_TRIGGER)
            .ok_or_else(|| AppError::bad_request("HX-Trigger header is required"))?;

        if trigger.contains("toggle") {
            let id = header_str(headers, ARTIST_ID)
                .ok_or_else(|| AppError::bad_request("artist-id header is required"))?;
            Ok(CatalogTarget::Name(parse_id(id, "artist-id")?))
        } else {
            Ok(CatalogTarget::Profile(parse_id(trigger, "HX-Trigger")?))
        }
    }

    pub fn artist_id(self) -> i64 {
        match self {
            CatalogTarget::Profile(id) | CatalogTarget::Name(id) => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for &(name, value) in pairs {
            map.insert(name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_request_mode() {
        assert_eq!(RequestMode::from_headers(&headers(&[])), RequestMode::Full);
        assert_eq!(
            RequestMode::from_headers(&headers(&[("hx-request", "true")])),
            RequestMode::Fragment
        );
        assert_eq!(
            RequestMode::from_headers(&headers(&[("hx-request", "false")])),
            RequestMode::Full
        );
    }

    #[test]
    fn test_catalog_target_profile() {
        let target = CatalogTarget::from_headers(&headers(&[("hx-trigger", "42")])).unwrap();
        assert_eq!(target, CatalogTarget::Profile(42));
    }

    #[test]
    fn test_catalog_target_toggle_uses_artist_id() {
        let target = CatalogTarget::from_headers(&headers(&[
            ("hx-trigger", "toggle-42"),
            ("artist-id", "42"),
        ]))
        .unwrap();
        assert_eq!(target, CatalogTarget::Name(42));
    }

    #[test]
    fn test_catalog_target_rejects_bad_ids() {
        assert!(CatalogTarget::from_headers(&headers(&[])).is_err());
        assert!(CatalogTarget::from_headers(&headers(&[("hx-trigger", "abc")])).is_err());
        assert!(CatalogTarget::from_headers(&headers(&[("hx-trigger", "toggle-1")])).is_err());
    }
}
