//! Document `<head>` assembly.
//!
//! Pure string and URL composition over a [`Location`] and the site
//! defaults. Absent optional values (favicon, social image) are omitted.

use crate::config::HeadConfig;
use crate::types::{Location, Site, absolute_path};
use maud::{Markup, html};

/// `<title>`: the site name alone for untitled locations, otherwise
/// `title + separator + site name`.
pub fn document_title(title: &str, site_name: &str, separator: &str) -> String {
    if title.is_empty() {
        site_name.to_string()
    } else {
        format!("{title}{separator}{site_name}")
    }
}

pub fn document_description<'a>(description: &'a str, site: &'a Site) -> &'a str {
    if description.is_empty() {
        &site.description
    } else {
        description
    }
}

/// The location's own image wins over the site default.
pub fn social_image<'a>(location: &'a Location, site: &'a Site) -> Option<&'a str> {
    location.image.as_deref().or(site.image.as_deref())
}

fn favicon_type(path: &str) -> Option<&'static str> {
    let (_, extension) = super::image::split_extension(path)?;
    match extension.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "ico" => Some("image/x-icon"),
        "svg" => Some("image/svg+xml"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

pub fn head(location: &Location, site: &Site, settings: &HeadConfig) -> Markup {
    let title = document_title(&location.title, &site.name, &settings.title_separator);
    let description = document_description(&location.description, site);
    let url = site.url_for(&location.path);
    let card = if location.image.is_some() {
        "summary_large_image"
    } else {
        "summary"
    };
    let image_url = social_image(location, site).map(|path| site.url_for(path));

    html! {
        head {
            meta charset="UTF-8";
            meta property="og:site_name" content=(site.name);
            link rel="canonical" href=(url);
            meta name="twitter:url" content=(url);
            meta property="og:url" content=(url);
            @for origin in &settings.preconnect {
                link rel="preconnect" href=(origin);
            }
            title { (title) }
            meta name="twitter:title" content=(title);
            meta property="og:title" content=(title);
            meta name="description" content=(description);
            meta name="twitter:description" content=(description);
            meta property="og:description" content=(description);
            meta name="twitter:card" content=(card);
            @for stylesheet in &settings.stylesheets {
                link rel="stylesheet" href=(stylesheet) type="text/css";
            }
            meta name="viewport" content="initial-scale=1, viewport-fit=cover";
            base href=(site.url);
            @if let Some(favicon) = &site.favicon {
                link rel="shortcut icon" href=(absolute_path(favicon)) type=[favicon_type(favicon)];
            }
            @if let Some(image_url) = image_url {
                meta name="twitter:image" content=(image_url);
                meta property="og:image" content=(image_url);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::site;

    fn location(title: &str, description: &str) -> Location {
        Location {
            title: title.to_string(),
            description: description.to_string(),
            path: "/about".to_string(),
            image: None,
        }
    }

    fn render(location: &Location, site: &Site) -> String {
        head(location, site, &HeadConfig::default()).into_string()
    }

    #[test]
    fn empty_title_is_site_name() {
        assert_eq!(document_title("", "Demacia", " | "), "Demacia");
    }

    #[test]
    fn title_gets_separator_and_site_name() {
        assert_eq!(document_title("About", "Demacia", " | "), "About | Demacia");
    }

    #[test]
    fn rendered_title_element() {
        let site = site();
        assert!(render(&location("", ""), &site).contains("<title>Demacia</title>"));
        assert!(render(&location("About", ""), &site).contains("<title>About | Demacia</title>"));
    }

    #[test]
    fn description_falls_back_to_site() {
        let site = site();
        let html = render(&location("About", ""), &site);
        assert!(html.contains(
            r#"<meta name="description" content="The Demacia#5635 FRC team website">"#
        ));

        let html = render(&location("About", "Who we are"), &site);
        assert!(html.contains(r#"<meta name="description" content="Who we are">"#));
    }

    #[test]
    fn canonical_url_joins_base_and_path() {
        let html = render(&location("About", ""), &site());
        assert!(html.contains(r#"<link rel="canonical" href="https://demacia5635.github.io/about">"#));
    }

    #[test]
    fn stylesheets_and_viewport() {
        let settings = HeadConfig {
            stylesheets: vec!["/styles.css".into(), "/extra.css".into()],
            ..HeadConfig::default()
        };
        let html = head(&location("", ""), &site(), &settings).into_string();
        assert!(html.contains(r#"href="/styles.css""#));
        assert!(html.contains(r#"href="/extra.css""#));
        assert!(html.contains(r#"content="initial-scale=1, viewport-fit=cover""#));
    }

    #[test]
    fn favicon_link_when_configured() {
        let html = render(&location("", ""), &site());
        assert!(html.contains(
            r#"<link rel="shortcut icon" href="/favicon.png" type="image/png">"#
        ));
    }

    #[test]
    fn favicon_omitted_when_absent() {
        let mut site = site();
        site.favicon = None;
        assert!(!render(&location("", ""), &site).contains("shortcut icon"));
    }

    #[test]
    fn social_image_prefers_location() {
        let site = site();
        let mut loc = location("About", "");
        assert_eq!(social_image(&loc, &site), Some("logos/logo.png"));

        loc.image = Some("img/about.jpg".into());
        assert_eq!(social_image(&loc, &site), Some("img/about.jpg"));
        let html = render(&loc, &site);
        assert!(html.contains(
            r#"<meta name="twitter:image" content="https://demacia5635.github.io/img/about.jpg">"#
        ));
        assert!(html.contains(r#"content="summary_large_image""#));
    }

    #[test]
    fn social_image_omitted_when_absent_everywhere() {
        let mut site = site();
        site.image = None;
        let html = render(&location("About", ""), &site);
        assert!(!html.contains("og:image"));
        assert!(html.contains(r#"<meta name="twitter:card" content="summary">"#));
    }

    #[test]
    fn title_is_escaped() {
        let html = render(&location("<R&D>", ""), &site());
        assert!(html.contains("<title>&lt;R&amp;D&gt; | Demacia</title>"));
    }
}
