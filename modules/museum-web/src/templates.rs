use museum_locale::link::html_escape;
use museum_locale::{alternate_paths, LinkTarget, Locale, Locales, LocalizedLink, UrlObject};
use url::form_urlencoded;

use crate::content::{self, Story, COUNTRIES, REGIONS, STORIES};
use crate::messages::{endonym, Messages};

/// Everything a page needs to render in the request's locale.
pub struct PageContext<'a> {
    pub locales: &'a Locales,
    pub locale: &'a Locale,
    /// Locale-free path of the page being rendered.
    pub path: &'a str,
    pub messages: &'static Messages,
}

impl PageContext<'_> {
    pub fn link(&self, target: impl Into<LinkTarget>) -> LocalizedLink {
        LocalizedLink::new(self.locales, target, self.locale)
    }

    fn lang(&self) -> &str {
        self.locale.as_str()
    }
}

pub const SITE_CSS: &str = r#"
* { box-sizing: border-box; margin: 0; padding: 0; }
body { font-family: system-ui, -apple-system, "PingFang SC", sans-serif; color: #1d1d1f; background: #faf8f5; }
header { display: flex; align-items: center; gap: 24px; padding: 14px 32px; background: #1d1d1f; color: #fff; }
header a { color: #ddd; text-decoration: none; font-size: 14px; }
header a:hover { color: #fff; }
.brand { font-weight: 600; font-size: 18px; color: #fff; }
.switcher { margin-left: auto; display: flex; gap: 10px; font-size: 13px; }
.switcher .current { color: #fff; font-weight: 600; }
main { max-width: 960px; margin: 0 auto; padding: 32px; }
h1 { margin-bottom: 16px; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 16px; }
.card { background: #fff; border: 1px solid #e6e1da; border-radius: 8px; padding: 16px; }
.card h3 { margin-bottom: 8px; font-size: 16px; }
.card a { color: #8a4b08; text-decoration: none; }
.meta { font-size: 12px; color: #888; margin-bottom: 6px; }
::view-transition-old(root), ::view-transition-new(root) { animation-duration: 180ms; }
"#;

/// Wrap page content in the site layout.
pub fn build_page(ctx: &PageContext<'_>, title: &str, content: &str) -> String {
    let m = ctx.messages;

    let alternates: String = alternate_paths(ctx.locales, ctx.path)
        .iter()
        .map(|(locale, href)| {
            format!(
                r#"<link rel="alternate" hreflang="{}" href="{}">"#,
                html_escape(locale.as_str()),
                html_escape(href)
            )
        })
        .collect();

    let nav = [
        ("/", m.nav_home),
        ("/regions", m.nav_regions),
        ("/countries", m.nav_countries),
        ("/stories", m.nav_stories),
    ]
    .iter()
    .map(|(href, label)| ctx.link(*href).render(label))
    .collect::<Vec<_>>()
    .join("");

    let switcher = render_switcher(ctx);
    let brand = ctx.link("/").class("brand").render(m.site_name);

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | {site}</title>
{alternates}
<link rel="stylesheet" href="/_assets/site.css">
</head>
<body>
<header>{brand}<nav>{nav}</nav>{switcher}</header>
<main>{content}</main>
</body>
</html>"#,
        lang = html_escape(ctx.lang()),
        title = html_escape(title),
        site = html_escape(m.site_name),
    )
}

/// Language links go through the switch endpoint so the preference cookie
/// is written; they opt out of client-side interception.
fn render_switcher(ctx: &PageContext<'_>) -> String {
    let from = ctx.link(ctx.path).href().to_string();
    let links: String = ctx
        .locales
        .supported()
        .map(|tag| {
            if tag == ctx.lang() {
                format!(r#"<span class="current">{}</span>"#, html_escape(endonym(tag)))
            } else {
                let href = switch_href(tag, &from);
                format!(
                    r#"<a href="{}" hreflang="{}" data-no-transition>{}</a>"#,
                    html_escape(&href),
                    html_escape(tag),
                    html_escape(endonym(tag))
                )
            }
        })
        .collect();
    format!(
        r#"<div class="switcher" aria-label="{}">{links}</div>"#,
        html_escape(ctx.messages.switch_language)
    )
}

/// Link to the locale switch action, returning to `from` afterwards.
fn switch_href(tag: &str, from: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("to", tag)
        .append_pair("from", from)
        .finish();
    format!("/api/locale?{query}")
}

pub fn render_home(ctx: &PageContext<'_>) -> String {
    let m = ctx.messages;
    let featured: String = STORIES.iter().take(3).map(|s| story_card(ctx, s)).collect();
    let content = format!(
        r#"<h1>{site}</h1><p style="margin-bottom:24px;">{intro}</p><div class="grid">{featured}</div>"#,
        site = html_escape(m.site_name),
        intro = html_escape(m.home_intro),
    );
    build_page(ctx, m.nav_home, &content)
}

pub fn render_regions(ctx: &PageContext<'_>) -> String {
    let m = ctx.messages;
    let lang = ctx.lang();
    let cards: String = REGIONS
        .iter()
        .map(|region| {
            let link = ctx.link(UrlObject {
                pathname: Some("/countries".to_string()),
                query: Some(format!("region={}", region.slug)),
                hash: None,
            });
            format!(
                r#"<div class="card"><h3>{}</h3></div>"#,
                link.render(region.name.get(lang))
            )
        })
        .collect();
    let content = format!(
        r#"<h1>{}</h1><div class="grid">{cards}</div>"#,
        html_escape(m.regions_heading)
    );
    build_page(ctx, m.nav_regions, &content)
}

pub fn render_countries(ctx: &PageContext<'_>, region_filter: Option<&str>) -> String {
    let m = ctx.messages;
    let lang = ctx.lang();
    let cards: String = COUNTRIES
        .iter()
        .filter(|c| region_filter.map_or(true, |r| c.region == r))
        .map(|country| {
            let region = content::region(country.region)
                .map(|r| r.name.get(lang))
                .unwrap_or_default();
            let stories: String = STORIES
                .iter()
                .filter(|s| s.country == country.slug)
                .map(|s| ctx.link(format!("/stories/{}", s.slug)).render(s.title.get(lang)))
                .collect::<Vec<_>>()
                .join(" · ");
            format!(
                r#"<div class="card"><div class="meta">{label}: {region}</div><h3>{name}</h3><p>{stories}</p></div>"#,
                label = html_escape(m.region_label),
                region = html_escape(region),
                name = html_escape(country.name.get(lang)),
            )
        })
        .collect();
    let content = format!(
        r#"<h1>{}</h1><div class="grid">{cards}</div>"#,
        html_escape(m.countries_heading)
    );
    build_page(ctx, m.nav_countries, &content)
}

pub fn render_stories(ctx: &PageContext<'_>) -> String {
    let m = ctx.messages;
    let cards: String = STORIES.iter().map(|s| story_card(ctx, s)).collect();
    let content = format!(
        r#"<h1>{}</h1><div class="grid">{cards}</div>"#,
        html_escape(m.stories_heading)
    );
    build_page(ctx, m.nav_stories, &content)
}

pub fn render_story(ctx: &PageContext<'_>, story: &Story) -> String {
    let m = ctx.messages;
    let lang = ctx.lang();
    let country = content::country(story.country)
        .map(|c| c.name.get(lang))
        .unwrap_or_default();
    let content = format!(
        r#"<article><div class="meta">{country}</div><h1>{title}</h1><p style="margin-bottom:12px;"><strong>{summary}</strong></p><p>{body}</p></article><p style="margin-top:24px;">{back}</p>"#,
        country = html_escape(country),
        title = html_escape(story.title.get(lang)),
        summary = html_escape(story.summary.get(lang)),
        body = html_escape(story.body.get(lang)),
        back = ctx.link("/stories").render(m.back_to_stories),
    );
    build_page(ctx, story.title.get(lang), &content)
}

pub fn render_not_found(ctx: &PageContext<'_>) -> String {
    let m = ctx.messages;
    let content = format!(
        r#"<h1>{}</h1><p>{}</p>"#,
        html_escape(m.not_found),
        ctx.link("/").render(m.nav_home)
    );
    build_page(ctx, m.not_found, &content)
}

fn story_card(ctx: &PageContext<'_>, story: &Story) -> String {
    let lang = ctx.lang();
    format!(
        r#"<div class="card"><h3>{title}</h3><p>{summary}</p><p style="margin-top:8px;">{more}</p></div>"#,
        title = ctx
            .link(format!("/stories/{}", story.slug))
            .render(story.title.get(lang)),
        summary = html_escape(story.summary.get(lang)),
        more = ctx
            .link(format!("/stories/{}", story.slug))
            .render(ctx.messages.read_more),
    )
}
