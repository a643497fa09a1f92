use scraper::{ElementRef, Html, Node};

use super::Block;

/// Tags whose content is never displayed.
const SKIP_CHILDREN: &[&str] = &["script", "style", "noscript", "svg", "template"];

/// Parse rendered article markup into display blocks, in document order.
pub fn parse_markup(markup: &str) -> Vec<Block> {
    let fragment = Html::parse_fragment(markup);
    let mut blocks = Vec::new();
    walk(fragment.root_element(), &mut blocks);
    blocks
}

fn walk(el: ElementRef<'_>, out: &mut Vec<Block>) {
    for child in el.children() {
        match child.value() {
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    convert_element(child_el, out);
                }
            }
            Node::Text(t) => {
                // Loose text between blocks (e.g. escaped raw HTML).
                let text = collapse_whitespace(&t.text);
                if !text.is_empty() {
                    out.push(Block::Paragraph(text));
                }
            }
            _ => {}
        }
    }
}

fn convert_element(el: ElementRef<'_>, out: &mut Vec<Block>) {
    let tag = el.value().name();
    if SKIP_CHILDREN.contains(&tag) {
        return;
    }

    match tag {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = tag[1..].parse().unwrap_or(1);
            push_text(out, element_text(el), |text| Block::Heading { level, text });
        }
        "p" if has_class(el, "byline") => push_text(out, element_text(el), Block::Byline),
        "p" if has_class(el, "load-error") => push_text(out, element_text(el), Block::Notice),
        "p" => {
            let text = element_text(el);
            if text.is_empty() {
                // Image-only paragraph.
                walk(el, out);
            } else {
                out.push(Block::Paragraph(text));
            }
        }
        "ul" if has_class(el, "tags") => {
            let tags: Vec<String> = el
                .children()
                .filter_map(ElementRef::wrap)
                .map(element_text)
                .filter(|t| !t.is_empty())
                .collect();
            if !tags.is_empty() {
                out.push(Block::Tags(tags));
            }
        }
        "li" => push_text(out, element_text(el), Block::ListItem),
        "pre" => {
            let code: String = el.text().collect();
            out.push(Block::Code(code.trim_end_matches('\n').to_string()));
        }
        "blockquote" => push_text(out, element_text(el), Block::Quote),
        "hr" => out.push(Block::Rule),
        "img" => out.push(Block::Image {
            alt: el.value().attr("alt").unwrap_or_default().to_string(),
            src: el.value().attr("src").unwrap_or_default().to_string(),
        }),
        _ => walk(el, out),
    }
}

fn push_text(out: &mut Vec<Block>, text: String, make: impl FnOnce(String) -> Block) {
    if !text.is_empty() {
        out.push(make(text));
    }
}

fn element_text(el: ElementRef<'_>) -> String {
    collapse_whitespace(&el.text().collect::<String>())
}

fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
