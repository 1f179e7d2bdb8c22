//! XML sitemap generation

use anyhow::Result;
use chrono::NaiveDate;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::config::SitemapConfig;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// A page listed in the sitemap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    /// Path below the site root, without leading slash ("" = homepage)
    pub slug: String,
    pub lastmod: NaiveDate,
}

/// Pages generated from content. Nothing is wired in yet.
pub fn dynamic_pages() -> Vec<SitemapEntry> {
    Vec::new()
}

/// Static pages from config plus dynamic pages, all stamped `today`
pub fn collect_entries(config: &SitemapConfig, today: NaiveDate) -> Vec<SitemapEntry> {
    config
        .pages
        .iter()
        .map(|slug| SitemapEntry {
            slug: slug.trim_matches('/').to_string(),
            lastmod: today,
        })
        .chain(dynamic_pages())
        .collect()
}

fn page_url(base_url: &str, slug: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if slug.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, slug)
    }
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Render a sitemaps.org `urlset` document.
pub fn render_sitemap(config: &SitemapConfig, entries: &[SitemapEntry]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", SITEMAP_NS));
    writer.write_event(Event::Start(urlset))?;

    let priority = format!("{:.1}", config.priority);
    for entry in entries {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        write_text_element(&mut writer, "loc", &page_url(&config.base_url, &entry.slug))?;
        write_text_element(&mut writer, "lastmod", &entry.lastmod.format("%Y-%m-%d").to_string())?;
        write_text_element(&mut writer, "changefreq", &config.changefreq)?;
        write_text_element(&mut writer, "priority", &priority)?;
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;
    Ok(String::from_utf8(writer.into_inner())?)
}
