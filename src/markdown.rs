use crate::html::{escape_attr, escape_text};
use linkify::{LinkFinder, LinkKind};
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd, TextMergeStream};

/// Render Markdown to HTML.
///
/// Raw HTML is passed through, single newlines inside a paragraph
/// become `<br />` and bare URLs in text become links.
pub fn render_markdown(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let events = linkify_events(TextMergeStream::new(Parser::new_ext(text, options)));

    let mut output = String::new();
    html::push_html(&mut output, events.into_iter());
    output
}

fn linkify_events<'a>(events: impl Iterator<Item = Event<'a>>) -> Vec<Event<'a>> {
    let mut finder = LinkFinder::new();
    finder.kinds(&[LinkKind::Url]);

    let mut out = Vec::new();
    // Text already inside a link or a code block is left alone
    let mut link_depth = 0usize;
    let mut in_code_block = false;

    for event in events {
        match event {
            Event::Start(Tag::Link { .. }) => {
                link_depth += 1;
                out.push(event);
            }
            Event::End(TagEnd::Link) => {
                link_depth = link_depth.saturating_sub(1);
                out.push(event);
            }
            Event::Start(Tag::CodeBlock(_)) => {
                in_code_block = true;
                out.push(event);
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                out.push(event);
            }
            Event::Text(text) if link_depth == 0 && !in_code_block => {
                for span in finder.spans(&text) {
                    let piece = span.as_str();
                    if span.kind().is_some() {
                        out.push(Event::InlineHtml(CowStr::from(format!(
                            "<a href=\"{}\">{}</a>",
                            escape_attr(piece),
                            escape_text(piece)
                        ))));
                    } else {
                        out.push(Event::Text(CowStr::from(piece.to_string())));
                    }
                }
            }
            Event::SoftBreak => out.push(Event::HardBreak),
            other => out.push(other),
        }
    }

    out
}

/// Convert an imported HTML fragment to Markdown
pub fn html_to_markdown(html: &str) -> String {
    clean_markdown(&html2md::rewrite_html(html, false))
}

fn clean_markdown(md: &str) -> String {
    let mut result = md.to_string();

    // Collapse 3+ consecutive blank lines to 2
    while result.contains("\n\n\n") {
        result = result.replace("\n\n\n", "\n\n");
    }

    result = result
        .lines()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n");

    let trimmed = result.trim_end().to_string();
    if trimmed.is_empty() {
        String::new()
    } else {
        trimmed + "\n"
    }
}
