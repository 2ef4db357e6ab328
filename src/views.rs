//! HTML for full pages and the named fragments swapped in by htmx.
//!
//! Every page is a [`layout`] around a `#content` block; fragment responses
//! return one block on its own, never the layout. Text is escaped by `maud`;
//! only translated profile markup is spliced in raw.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::catalog::{self, ArtistDetail, ArtistInfo, ImageList};

pub fn layout(site_title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (site_title) }
                link rel="stylesheet" href="/static/css/main.css";
                script src="https://unpkg.com/htmx.org@1.9.12" {}
            }
            body class="font-livvic bg-turquoise-50" {
                nav class="flex gap-4 p-4 bg-primary text-white" {
                    a href="/" class="font-bold" { (site_title) }
                    a href="/catalog" { "Catalog" }
                    a href="/search" { "Search" }
                    a href="/detail" { "Details" }
                    a hx-get="/about" hx-target="#content" hx-swap="outerHTML" hx-push-url="true" class="cursor-pointer" { "About" }
                }
                (content)
            }
        }
    }
}

// ============================================================================
// Home
// ============================================================================

/// `main_image` block: the randomly picked artist
pub fn main_image(artist: Option<&ArtistInfo>) -> Markup {
    html! {
        @match artist {
            Some(artist) => {
                div id="main-image" class="flex flex-col items-center" {
                    img src=(artist.image) alt=(artist.name) class="rounded-lg shadow-lg max-h-96";
                    h2 class="text-2xl mt-4" { (artist.name) }
                }
            }
            None => {
                div id="main-image" { p { "The catalog is empty." } }
            }
        }
    }
}

pub fn home_content(artist_count: u64, artist: Option<&ArtistInfo>) -> Markup {
    html! {
        main id="content" class="p-8 flex flex-col items-center gap-6" {
            p { "Browse " (artist_count) " artists." }
            (main_image(artist))
            button hx-get="/" hx-target="#main-image" hx-swap="outerHTML" class="px-4 py-2 rounded bg-secondary text-white" { "Randomize" }
        }
    }
}

// ============================================================================
// About
// ============================================================================

pub fn about_content(site_title: &str) -> Markup {
    html! {
        main id="content" class="p-8 prose" {
            h1 { "About " (site_title) }
            p {
                (site_title)
                " is a small music catalog. Pages are rendered on the server and parts of them are swapped in place as you click, search and scroll."
            }
        }
    }
}

// ============================================================================
// Catalog and search
// ============================================================================

/// `artist_name` block: the front of a catalog card
pub fn artist_name(artist: &ArtistDetail) -> Markup {
    html! {
        div id=(artist.id) hx-get="/catalog" hx-target="this" hx-swap="outerHTML" class="card cursor-pointer p-4 rounded shadow bg-white" {
            h3 class="text-xl" { (artist.name) }
            p class="text-sm" { (catalog::active_members(artist).join(", ")) }
        }
    }
}

/// `artist_profile` block: the back of a catalog card
pub fn artist_profile(artist: &ArtistDetail) -> Markup {
    let toggle_headers = format!(r#"{{"artist-id": "{}"}}"#, artist.id);
    html! {
        div id={ "toggle-" (artist.id) } hx-get="/catalog" hx-headers=(toggle_headers) hx-target="this" hx-swap="outerHTML" class="card cursor-pointer p-4 rounded shadow bg-white" {
            h3 class="text-xl" { (artist.name) }
            div class="text-sm" { (PreEscaped(catalog::profile_html(artist))) }
            a href=(catalog::website(artist)) target="_blank" rel="noopener" { "Website" }
        }
    }
}

/// `artist_cards` block: the card grid body
pub fn artist_cards(artists: &[ArtistDetail]) -> Markup {
    html! {
        @if artists.is_empty() {
            p class="col-span-full" { "No artists found." }
        }
        @for artist in artists {
            (artist_name(artist))
        }
    }
}

/// `content` block of the catalog page, with a search box when `from_search`
pub fn catalog_content(artists: &[ArtistDetail], from_search: bool) -> Markup {
    html! {
        main id="content" class="p-8" {
            @if from_search {
                input type="search" name="search" placeholder="Search artists" hx-post="/search" hx-trigger="keyup changed delay:500ms" hx-target="#artist-cards" class="w-full p-2 mb-4 rounded border";
            }
            div id="artist-cards" class="grid grid-cols-1 md:grid-cols-3 gap-4" {
                (artist_cards(artists))
            }
        }
    }
}

// ============================================================================
// Detail
// ============================================================================

/// `details` block: one artist section plus the trigger that loads the next one
pub fn details(artist: &ArtistDetail, next_id: Option<u64>) -> Markup {
    let wiki = catalog::wiki_link(artist);
    html! {
        section id={ "artist-" (artist.id) } class="p-8 border-b" {
            h2 class="text-3xl" { (artist.name) }
            div class="flex gap-2 overflow-x-auto" {
                @match catalog::image_urls(artist) {
                    ImageList::Missing => p { (ImageList::Missing) },
                    ImageList::Urls(urls) => {
                        @for url in urls {
                            img src=(url) alt=(artist.name) class="h-48 rounded";
                        }
                    }
                }
            }
            div class="my-4" { (PreEscaped(catalog::profile_html(artist))) }
            ul {
                @for member in catalog::active_members(artist) {
                    li { (member) }
                }
            }
            p {
                a href=(catalog::website(artist)) target="_blank" rel="noopener" { "Website" }
                " | "
                @if wiki == catalog::NO_WIKI_ENTRY {
                    span { (wiki) }
                } @else {
                    a href=(wiki) target="_blank" rel="noopener" { "Wikipedia" }
                }
            }
        }
        @match next_id {
            Some(next_id) => {
                div hx-get={ "/detail?doc_id=" (next_id) } hx-trigger="revealed" hx-swap="outerHTML" { "Loading..." }
            }
            None => p class="text-center" { "End of catalog." },
        }
    }
}

pub fn details_content(artist: &ArtistDetail, next_id: Option<u64>) -> Markup {
    html! {
        main id="content" { (details(artist, next_id)) }
    }
}

// ============================================================================
// Errors
// ============================================================================

pub fn error_block(status: u16, message: &str) -> Markup {
    html! {
        div class="error p-4 text-red-700" data-status=(status) { (message) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band() -> ArtistDetail {
        ArtistDetail {
            id: 7,
            name: "Sly & The Family".to_string(),
            uri: "https://example.com/artist/7".to_string(),
            profile: Some("[b]Funk[/b]".to_string()),
            members: None,
            urls: None,
            images: None,
        }
    }

    #[test]
    fn test_text_is_escaped() {
        let html = error_block(400, r#"<script>alert("x")</script>"#).into_string();
        assert!(html.contains("&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_profile_markup_is_not_escaped_but_name_is() {
        let html = artist_profile(&band()).into_string();
        assert!(html.contains("<b>Funk</b>"));
        assert!(html.contains("Sly &amp; The Family"));
        assert!(html.starts_with(r#"<div id="toggle-7""#));
        assert!(html.contains(r#"hx-headers="{&quot;artist-id&quot;: &quot;7&quot;}""#));
    }

    #[test]
    fn test_details_end_of_catalog() {
        let html = details(&band(), None).into_string();
        assert!(!html.contains("hx-trigger=\"revealed\""));
        assert!(html.contains("End of catalog."));
        assert!(html.contains(catalog::NO_IMAGES));
        assert!(html.contains(catalog::NO_WIKI_ENTRY));

        let html = details(&band(), Some(8)).into_string();
        assert!(html.contains("/detail?doc_id=8"));
    }

    #[test]
    fn test_fragments_exclude_layout() {
        assert!(!artist_cards(&[band()]).into_string().contains("<html"));
        let page = layout("Music Binder", html! { main {} }).into_string();
        assert!(page.starts_with("<!DOCTYPE html>"));
    }
}
