//! Display blocks extracted from rendered article markup, for hosts that
//! draw native widgets instead of laying out HTML.

pub mod parser;

pub use parser::parse_markup;

/// One block-level piece of an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph(String),
    /// Author and date line of the article header.
    Byline(String),
    Tags(Vec<String>),
    ListItem(String),
    Code(String),
    Quote(String),
    Image { alt: String, src: String },
    Rule,
    /// Inline failure notice.
    Notice(String),
}
