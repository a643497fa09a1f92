//! Markdown source to sanitized article markup.

use pulldown_cmark::{html, CowStr, Event, Parser, Tag};

use super::ArticleDescriptor;

/// Marker line opening and closing the metadata block.
const FRONT_MATTER_MARKER: &str = "---";

/// Remove a leading metadata block.
///
/// Only a block starting on the very first line counts; it ends at the first
/// following marker line. An unterminated block leaves the source untouched.
pub fn strip_front_matter(source: &str) -> &str {
    let mut lines = source.split_inclusive('\n');
    let mut offset = match lines.next() {
        Some(first) if first.trim_end() == FRONT_MATTER_MARKER => first.len(),
        _ => return source,
    };
    for line in lines {
        offset += line.len();
        if line.trim_end() == FRONT_MATTER_MARKER {
            return &source[offset..];
        }
    }
    source
}

/// Escape text for interpolation into markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render markdown to markup. Raw HTML in the source is escaped, and
/// script-capable link targets are neutralized.
pub fn render_markdown(markdown: &str) -> String {
    let events = Parser::new(markdown).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    let lowered = url.trim_start().to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("vbscript:")
        || lowered.starts_with("data:text/html")
    {
        CowStr::Borrowed("#")
    } else {
        url
    }
}

/// Header block with the descriptor's metadata, every field escaped.
pub fn render_header(article: &ArticleDescriptor) -> String {
    let mut out = String::from("<div class=\"article-meta\">\n");
    out.push_str(&format!(
        "<h2 class=\"article-title\">{}</h2>\n",
        escape_html(&article.title)
    ));
    out.push_str(&format!(
        "<p class=\"byline\">{} · {}</p>\n",
        escape_html(&article.author),
        escape_html(&article.date)
    ));
    if !article.tags.is_empty() {
        out.push_str("<ul class=\"tags\">");
        for tag in &article.tags {
            out.push_str(&format!("<li>{}</li>", escape_html(tag)));
        }
        out.push_str("</ul>\n");
    }
    out.push_str("</div>\n");
    out
}

/// Full article markup: header plus rendered body.
pub fn render_article(article: &ArticleDescriptor, source: &str) -> String {
    let body = render_markdown(strip_front_matter(source));
    format!(
        "{}<div class=\"article-body\">\n{}</div>\n",
        render_header(article),
        body
    )
}

/// Inline notice stored in place of a body that failed to load.
pub fn failure_notice(article: &ArticleDescriptor) -> String {
    format!(
        "<p class=\"load-error\">Failed to load “{}”.</p>\n",
        escape_html(&article.title)
    )
}
