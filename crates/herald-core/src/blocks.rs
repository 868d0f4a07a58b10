//! Markdown to Slack Block Kit conversion.
//!
//! Headings become `header` blocks, thematic breaks become `divider`
//! blocks, and everything else is rendered as Slack `mrkdwn` inside
//! `section` blocks. Consecutive list items share one section.

use pulldown_cmark::{Event, Options, Parser, Tag};

use herald_types::blocks::{Block, MAX_HEADER_CHARS, MAX_SECTION_CHARS};

/// Convert markdown into a list of chat blocks.
pub fn markdown_to_blocks(markdown: &str) -> Vec<Block> {
    let mut builder = BlockBuilder::default();
    let parser = Parser::new_ext(
        markdown,
        Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS,
    );

    for event in parser {
        builder.handle(event);
    }

    builder.finish()
}

/// Escape the three characters Slack reserves in `mrkdwn` text.
pub fn escape_mrkdwn(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[derive(Default)]
struct BlockBuilder {
    blocks: Vec<Block>,
    buf: String,
    /// Next ordinal for each open list; `None` for bullet lists.
    lists: Vec<Option<u64>>,
    /// Link destinations and the buffer offset where their text starts.
    /// `None` marks an image nested inside a link, which keeps only its alt text.
    links: Vec<Option<(String, usize)>>,
    heading: Option<String>,
    in_code_block: bool,
    quote_depth: usize,
}

impl BlockBuilder {
    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                if let Some(heading) = self.heading.as_mut() {
                    heading.push_str(&code);
                } else {
                    self.buf.push('`');
                    self.buf.push_str(&escape_mrkdwn(&code));
                    self.buf.push('`');
                }
            }
            Event::Html(html) => self.text(&html),
            Event::SoftBreak | Event::HardBreak => {
                if let Some(heading) = self.heading.as_mut() {
                    heading.push(' ');
                } else {
                    self.buf.push('\n');
                }
            }
            Event::Rule => {
                self.flush_section();
                self.blocks.push(Block::Divider);
            }
            Event::TaskListMarker(checked) => {
                self.buf.push_str(if checked { "☑ " } else { "☐ " });
            }
            Event::FootnoteReference(label) => {
                self.buf.push_str(&format!("[{label}]"));
            }
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading(..) => {
                self.flush_section();
                self.heading = Some(String::new());
            }
            Tag::CodeBlock(_) => {
                // Slack has no syntax highlighting; the info string is dropped.
                self.flush_section();
                self.in_code_block = true;
                self.buf.push_str("```\n");
            }
            Tag::BlockQuote => {
                self.flush_section();
                self.quote_depth += 1;
            }
            Tag::List(first) => {
                if self.lists.is_empty() {
                    self.flush_section();
                }
                self.lists.push(first);
            }
            Tag::Item => {
                if !self.buf.is_empty() && !self.buf.ends_with('\n') {
                    self.buf.push('\n');
                }
                let depth = self.lists.len().saturating_sub(1);
                self.buf.push_str(&"    ".repeat(depth));
                match self.lists.last_mut() {
                    Some(Some(n)) => {
                        self.buf.push_str(&format!("{n}. "));
                        *n += 1;
                    }
                    _ => self.buf.push_str("• "),
                }
            }
            Tag::Emphasis => self.mark("_"),
            Tag::Strong => self.mark("*"),
            Tag::Strikethrough => self.mark("~"),
            Tag::Image(..) if self.heading.is_none() && !self.links.is_empty() => {
                self.links.push(None);
            }
            Tag::Link(_, dest, _) | Tag::Image(_, dest, _) => {
                if self.heading.is_none() {
                    self.links.push(Some((dest.to_string(), self.buf.len())));
                }
            }
            Tag::Paragraph
            | Tag::Table(_)
            | Tag::TableHead
            | Tag::TableRow
            | Tag::TableCell
            | Tag::FootnoteDefinition(_) => {}
        }
    }

    fn end(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading(..) => {
                if let Some(text) = self.heading.take() {
                    let text = text.trim();
                    if !text.is_empty() {
                        self.blocks.push(Block::header(truncate_chars(text, MAX_HEADER_CHARS)));
                    }
                }
            }
            Tag::Paragraph => {
                if self.lists.is_empty() {
                    self.flush_section();
                } else if !self.buf.ends_with('\n') {
                    self.buf.push('\n');
                }
            }
            Tag::CodeBlock(_) => {
                if !self.buf.ends_with('\n') {
                    self.buf.push('\n');
                }
                self.buf.push_str("```");
                self.in_code_block = false;
                self.flush_section();
            }
            Tag::BlockQuote => {
                self.flush_section();
                self.quote_depth = self.quote_depth.saturating_sub(1);
            }
            Tag::List(_) => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.flush_section();
                }
            }
            Tag::Item => {
                if !self.buf.ends_with('\n') {
                    self.buf.push('\n');
                }
            }
            Tag::Emphasis => self.mark("_"),
            Tag::Strong => self.mark("*"),
            Tag::Strikethrough => self.mark("~"),
            Tag::Link(..) | Tag::Image(..) if self.heading.is_none() => {
                if let Some(Some((dest, start))) = self.links.pop() {
                    let label = self.buf.split_off(start);
                    let label = label.trim();
                    if label.is_empty() {
                        self.buf.push_str(&format!("<{dest}>"));
                    } else {
                        self.buf.push_str(&format!("<{dest}|{label}>"));
                    }
                }
            }
            Tag::Link(..) | Tag::Image(..) => {}
            Tag::TableCell => self.buf.push_str(" | "),
            Tag::TableHead | Tag::TableRow => {
                if self.buf.ends_with(" | ") {
                    self.buf.truncate(self.buf.len() - 3);
                }
                self.buf.push('\n');
            }
            Tag::Table(_) => self.flush_section(),
            Tag::FootnoteDefinition(_) => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(heading) = self.heading.as_mut() {
            heading.push_str(text);
        } else {
            self.buf.push_str(&escape_mrkdwn(text));
        }
    }

    /// Emphasis markers are dropped inside headers (plain text only).
    fn mark(&mut self, marker: &str) {
        if self.heading.is_none() && !self.in_code_block {
            self.buf.push_str(marker);
        }
    }

    fn flush_section(&mut self) {
        let raw = std::mem::take(&mut self.buf);
        let text = raw.trim_matches(|c: char| c == '\n' || c == ' ');
        if text.trim().is_empty() {
            return;
        }

        let text = if self.quote_depth > 0 {
            text.lines()
                .map(|line| format!("> {line}"))
                .collect::<Vec<_>>()
                .join("\n")
        } else {
            text.to_string()
        };

        for chunk in split_chars(&text, MAX_SECTION_CHARS) {
            self.blocks.push(Block::section(chunk));
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush_section();
        self.blocks
    }
}

/// Truncate to at most `max` characters, marking the cut with an ellipsis.
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Split text into chunks of at most `max` characters, preferring to break
/// at the last newline inside each window. A hard cut never lands inside an
/// `&amp;`-style entity.
fn split_chars(text: &str, max: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut rest = text;

    while rest.chars().count() > max {
        let window_end = rest
            .char_indices()
            .nth(max)
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());
        let window = &rest[..window_end];

        match window.rfind('\n') {
            Some(nl) if nl > 0 => {
                chunks.push(window[..nl].to_string());
                rest = &rest[nl + 1..];
            }
            _ => {
                let cut = entity_safe_cut(window);
                chunks.push(window[..cut].to_string());
                rest = &rest[cut..];
            }
        }
    }

    if !rest.is_empty() {
        chunks.push(rest.to_string());
    }
    chunks
}

/// Byte offset to cut `window` at so a trailing, unterminated entity moves
/// to the next chunk.
fn entity_safe_cut(window: &str) -> usize {
    const LONGEST_ENTITY: usize = "&amp;".len();

    match window.rfind('&') {
        Some(amp)
            if amp > 0
                && window.len() - amp < LONGEST_ENTITY
                && !window[amp..].contains(';') =>
        {
            amp
        }
        _ => window.len(),
    }
}
