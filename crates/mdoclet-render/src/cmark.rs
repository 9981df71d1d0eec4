//! Markup engine backed by pulldown-cmark.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::LazyLock;

use pulldown_cmark::{
    BlockQuoteKind, CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd,
};
use regex::Regex;

use mdoclet_config::{AttributeTable, Doctype, RenderOptions, SafeMode};

use crate::engine::{MarkupEngine, RenderError};
use crate::util::{escape_html, slugify};

static ATTR_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-zA-Z][a-zA-Z0-9_-]*)\}").unwrap());

/// Markup engine rendering doc-comment markup to HTML5.
///
/// Honors the options wire contract:
/// - `{name}` attribute references are substituted from textual attributes
///   before parsing; references to flags or unknown names are left untouched
/// - [`SafeMode::Safe`] escapes raw HTML instead of passing it through
/// - the `notitle` flag drops a leading H1 in block doctype
/// - `idprefix` prefixes generated heading ids
/// - `highlight-css=class` selects `language-*` classes on code blocks
/// - the `icons` flag disables icon markup on alert blocks
///
/// [`Doctype::Inline`] emits paragraph content without `<p>` wrappers so the
/// fragment can be embedded mid-line.
///
/// The optional `template_dir` in the options is passed through untouched:
/// this engine renders with its built-in output only, so output is identical
/// whether or not custom templates were extracted.
pub struct CmarkEngine;

impl MarkupEngine for CmarkEngine {
    fn convert(
        &self,
        source: &str,
        options: &RenderOptions,
        doctype: Doctype,
    ) -> Result<String, RenderError> {
        let source = substitute_attr_refs(source, options.attributes());
        let parser = Parser::new_ext(&source, Options::ENABLE_STRIKETHROUGH | Options::ENABLE_GFM);

        let mut emitter = HtmlEmitter::new(options, doctype);
        for event in parser {
            emitter.event(event);
        }
        Ok(emitter.finish())
    }
}

/// Substitute `{name}` references from textual attributes.
fn substitute_attr_refs(source: &str, attrs: &AttributeTable) -> String {
    ATTR_REF
        .replace_all(source, |caps: &regex::Captures<'_>| match attrs.text(&caps[1]) {
            Some(value) => value.to_owned(),
            None => caps[0].to_owned(),
        })
        .into_owned()
}

fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn alert_class(kind: BlockQuoteKind) -> &'static str {
    match kind {
        BlockQuoteKind::Note => "note",
        BlockQuoteKind::Tip => "tip",
        BlockQuoteKind::Important => "important",
        BlockQuoteKind::Warning => "warning",
        BlockQuoteKind::Caution => "caution",
    }
}

fn alert_title(kind: BlockQuoteKind) -> &'static str {
    match kind {
        BlockQuoteKind::Note => "Note",
        BlockQuoteKind::Tip => "Tip",
        BlockQuoteKind::Important => "Important",
        BlockQuoteKind::Warning => "Warning",
        BlockQuoteKind::Caution => "Caution",
    }
}

/// Heading being captured (opening tag is written once the id is known).
struct HeadingCapture {
    level: u8,
    text: String,
    html: String,
    dropped: bool,
}

/// Event-stream HTML emitter.
struct HtmlEmitter {
    out: String,
    doctype: Doctype,
    safe: bool,
    idprefix: String,
    class_highlighting: bool,
    notitle: bool,
    icons_enabled: bool,
    seen_block: bool,
    heading: Option<HeadingCapture>,
    used_slugs: HashMap<String, usize>,
    code: Option<(Option<String>, String)>,
    image_alt: Option<String>,
    pending_image: Option<(String, String)>,
}

impl HtmlEmitter {
    fn new(options: &RenderOptions, doctype: Doctype) -> Self {
        let attrs = options.attributes();
        Self {
            out: String::with_capacity(1024),
            doctype,
            safe: options.safe_mode() == SafeMode::Safe,
            idprefix: attrs.text("idprefix").unwrap_or_default().to_owned(),
            class_highlighting: attrs.text("highlight-css") == Some("class"),
            notitle: attrs.is_flag("notitle"),
            icons_enabled: !attrs.is_flag("icons") && attrs.get("icons").is_some(),
            seen_block: false,
            heading: None,
            used_slugs: HashMap::new(),
            code: None,
            image_alt: None,
            pending_image: None,
        }
    }

    fn finish(self) -> String {
        self.out
    }

    /// Push inline content to the active heading buffer or the output.
    ///
    /// While image alt text is being captured, formatting markup is
    /// suppressed entirely: an alt attribute holds plain text, and its
    /// content arrives through the text and code events instead.
    fn push_inline(&mut self, content: &str) {
        if self.image_alt.is_some() {
            return;
        }
        match self.heading.as_mut() {
            Some(heading) => heading.html.push_str(content),
            None => self.out.push_str(content),
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(&tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.raw_html(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => self.hard_break(),
            Event::Rule => {
                self.seen_block = true;
                self.out.push_str("<hr>");
            }
            // Footnotes, math and task lists are not part of the doc-comment
            // format.
            _ => {}
        }
    }

    fn start_tag(&mut self, tag: &Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                let first = !self.seen_block;
                self.seen_block = true;
                match self.doctype {
                    Doctype::Block => self.out.push_str("<p>"),
                    // Inline fragments carry no wrapper; keep subsequent
                    // paragraphs separated by a single space.
                    Doctype::Inline => {
                        if !first && !self.out.is_empty() {
                            self.out.push(' ');
                        }
                    }
                }
            }
            Tag::Heading { level, .. } => {
                let level = heading_level_to_num(*level);
                let dropped =
                    self.doctype == Doctype::Block && self.notitle && level == 1 && !self.seen_block;
                self.seen_block = true;
                self.heading = Some(HeadingCapture {
                    level,
                    text: String::new(),
                    html: String::new(),
                    dropped,
                });
            }
            Tag::BlockQuote(kind) => {
                self.seen_block = true;
                match kind {
                    Some(kind) => {
                        let class = alert_class(*kind);
                        let icon = if self.icons_enabled {
                            format!(r#"<span class="alert-icon" data-icon="{class}"></span>"#)
                        } else {
                            String::new()
                        };
                        write!(
                            self.out,
                            r#"<div class="alert alert-{class}"><div class="alert-title">{icon}{}</div><div class="alert-content">"#,
                            alert_title(*kind)
                        )
                        .unwrap();
                    }
                    None => self.out.push_str("<blockquote>"),
                }
            }
            Tag::CodeBlock(kind) => {
                self.seen_block = true;
                let lang = match kind {
                    CodeBlockKind::Fenced(info) if !info.is_empty() => info
                        .split_whitespace()
                        .next()
                        .map(std::borrow::ToOwned::to_owned),
                    _ => None,
                };
                self.code = Some((lang, String::new()));
            }
            Tag::List(start) => {
                self.seen_block = true;
                match start {
                    Some(1) => self.out.push_str("<ol>"),
                    Some(n) => write!(self.out, r#"<ol start="{n}">"#).unwrap(),
                    None => self.out.push_str("<ul>"),
                }
            }
            Tag::Item => self.out.push_str("<li>"),
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<s>"),
            Tag::Link { dest_url, .. } => {
                let link = format!(r#"<a href="{}">"#, escape_html(dest_url));
                self.push_inline(&link);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.image_alt = Some(String::new());
                self.pending_image = Some((dest_url.to_string(), title.to_string()));
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if self.doctype == Doctype::Block {
                    self.out.push_str("</p>");
                }
            }
            TagEnd::Heading(_) => {
                if let Some(heading) = self.heading.take()
                    && !heading.dropped
                {
                    let id = self.unique_slug(&heading.text);
                    let level = heading.level;
                    write!(
                        self.out,
                        r#"<h{level} id="{id}">{}</h{level}>"#,
                        heading.html.trim()
                    )
                    .unwrap();
                }
            }
            TagEnd::BlockQuote(kind) => {
                if kind.is_some() {
                    self.out.push_str("</div></div>");
                } else {
                    self.out.push_str("</blockquote>");
                }
            }
            TagEnd::CodeBlock => {
                if let Some((lang, content)) = self.code.take() {
                    match lang {
                        Some(lang) if self.class_highlighting => write!(
                            self.out,
                            r#"<pre><code class="language-{}">{}</code></pre>"#,
                            escape_html(&lang),
                            escape_html(&content)
                        )
                        .unwrap(),
                        Some(lang) => write!(
                            self.out,
                            r#"<pre><code class="{}">{}</code></pre>"#,
                            escape_html(&lang),
                            escape_html(&content)
                        )
                        .unwrap(),
                        None => write!(
                            self.out,
                            "<pre><code>{}</code></pre>",
                            escape_html(&content)
                        )
                        .unwrap(),
                    }
                }
            }
            TagEnd::List(ordered) => self
                .out
                .push_str(if ordered { "</ol>" } else { "</ul>" }),
            TagEnd::Item => self.out.push_str("</li>"),
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</s>"),
            TagEnd::Link => self.push_inline("</a>"),
            TagEnd::Image => {
                let alt = self.image_alt.take().unwrap_or_default();
                if let Some((src, title)) = self.pending_image.take() {
                    if title.is_empty() {
                        write!(
                            self.out,
                            r#"<img src="{}" alt="{}">"#,
                            escape_html(&src),
                            escape_html(&alt)
                        )
                        .unwrap();
                    } else {
                        write!(
                            self.out,
                            r#"<img src="{}" title="{}" alt="{}">"#,
                            escape_html(&src),
                            escape_html(&title),
                            escape_html(&alt)
                        )
                        .unwrap();
                    }
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some((_, content)) = self.code.as_mut() {
            content.push_str(text);
        } else if let Some(alt) = self.image_alt.as_mut() {
            alt.push_str(text);
        } else if let Some(heading) = self.heading.as_mut() {
            heading.text.push_str(text);
            heading.html.push_str(&escape_html(text));
        } else {
            self.out.push_str(&escape_html(text));
        }
    }

    fn inline_code(&mut self, code: &str) {
        if let Some(alt) = self.image_alt.as_mut() {
            alt.push_str(code);
        } else if let Some(heading) = self.heading.as_mut() {
            heading.text.push_str(code);
            write!(heading.html, "<code>{}</code>", escape_html(code)).unwrap();
        } else {
            write!(self.out, "<code>{}</code>", escape_html(code)).unwrap();
        }
    }

    fn raw_html(&mut self, html: &str) {
        // The sandbox: raw HTML never passes through at SafeMode::Safe.
        if self.safe {
            self.push_inline(&escape_html(html));
        } else {
            self.push_inline(html);
        }
    }

    fn soft_break(&mut self) {
        if let Some((_, content)) = self.code.as_mut() {
            content.push('\n');
        } else if let Some(alt) = self.image_alt.as_mut() {
            alt.push(' ');
        } else {
            self.push_inline(match self.doctype {
                Doctype::Block => "\n",
                Doctype::Inline => " ",
            });
        }
    }

    fn hard_break(&mut self) {
        if let Some(alt) = self.image_alt.as_mut() {
            alt.push(' ');
        } else {
            self.push_inline("<br>");
        }
    }

    /// Slug for a heading id, deduplicated with `-N` suffixes.
    fn unique_slug(&mut self, text: &str) -> String {
        let base = format!("{}{}", self.idprefix, slugify(text));
        let count = self.used_slugs.entry(base.clone()).or_insert(0);
        let slug = if *count == 0 {
            base.clone()
        } else {
            format!("{base}-{count}")
        };
        *count += 1;
        slug
    }
}
