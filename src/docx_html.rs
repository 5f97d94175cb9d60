use crate::html::{escape_attr, escape_text};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use docx_rust::document::{
    BodyContent, ParagraphContent, RunContent, TableCellContent, TableRowContent,
};
use docx_rust::formatting::CharacterProperty;
use docx_rust::Docx;

/// Convert a parsed DOCX document body to an HTML fragment
pub fn docx_to_html(docx: &Docx) -> String {
    let mut ctx = ConvertContext {
        docx,
        output: String::new(),
        open_lists: Vec::new(),
    };

    for content in &docx.document.body.content {
        ctx.convert_body_content(content);
    }
    ctx.close_lists_to(0);

    ctx.output
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Bullet,
    Ordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            ListKind::Bullet => "ul",
            ListKind::Ordered => "ol",
        }
    }
}

struct ConvertContext<'a> {
    docx: &'a Docx<'a>,
    output: String,
    /// Lists currently open, outermost first; each has an unclosed `<li>`
    open_lists: Vec<ListKind>,
}

impl<'a> ConvertContext<'a> {
    fn convert_body_content(&mut self, content: &BodyContent) {
        match content {
            BodyContent::Paragraph(para) => self.convert_paragraph(para),
            BodyContent::Table(table) => {
                self.close_lists_to(0);
                self.convert_table(table);
            }
            BodyContent::Sdt(sdt) => {
                if let Some(ref sdt_content) = sdt.content {
                    for item in &sdt_content.content {
                        self.convert_body_content(item);
                    }
                }
            }
            _ => {}
        }
    }

    fn convert_paragraph(&mut self, para: &docx_rust::document::Paragraph) {
        let mut heading_level: Option<u8> = None;
        let mut numbering: Option<(isize, isize)> = None; // (num_id, level)

        if let Some(ref prop) = para.property {
            if let Some(ref style_id) = prop.style_id {
                heading_level = heading_level_for_style(style_id.value.as_ref());
            }

            if let Some(ref num_prop) = prop.numbering {
                if let (Some(ref id), Some(ref level)) = (&num_prop.id, &num_prop.level) {
                    numbering = Some((id.value, level.value));
                }
            }
        }

        let inline_html = self.collect_inline_content(para);
        let inline_html = inline_html.trim();

        if let Some((num_id, level)) = numbering.filter(|_| heading_level.is_none()) {
            let kind = self.resolve_list_kind(num_id, level);
            self.push_list_item(kind, level.max(0) as usize, inline_html);
            return;
        }

        self.close_lists_to(0);

        if inline_html.is_empty() {
            return;
        }

        match heading_level {
            Some(level) => {
                self.output
                    .push_str(&format!("<h{0}>{1}</h{0}>", level, inline_html));
            }
            None => {
                self.output.push_str("<p>");
                self.output.push_str(inline_html);
                self.output.push_str("</p>");
            }
        }
    }

    fn push_list_item(&mut self, kind: ListKind, level: usize, inline_html: &str) {
        let depth = level + 1;

        if self.open_lists.len() > depth {
            self.close_lists_to(depth);
        }

        if self.open_lists.len() == depth && self.open_lists[depth - 1] != kind {
            self.close_lists_to(depth - 1);
        }

        if self.open_lists.len() == depth {
            self.output.push_str("</li><li>");
        } else {
            // Skipped levels are opened with the same kind
            while self.open_lists.len() < depth {
                self.output.push('<');
                self.output.push_str(kind.tag());
                self.output.push_str("><li>");
                self.open_lists.push(kind);
            }
        }

        self.output.push_str(inline_html);
    }

    fn close_lists_to(&mut self, depth: usize) {
        while self.open_lists.len() > depth {
            if let Some(kind) = self.open_lists.pop() {
                self.output.push_str("</li></");
                self.output.push_str(kind.tag());
                self.output.push('>');
            }
        }
    }

    fn collect_inline_content(&self, para: &docx_rust::document::Paragraph) -> String {
        let mut result = String::new();

        for pc in &para.content {
            match pc {
                ParagraphContent::Run(run) => {
                    let text = self.collect_run_html(run);
                    if !text.is_empty() {
                        result.push_str(&format_run_html(&text, &run.property));
                    }
                }
                ParagraphContent::Link(link) => {
                    let display_html = link
                        .content
                        .as_ref()
                        .map(|run| self.collect_run_html(run))
                        .unwrap_or_default();

                    match self.resolve_hyperlink_target(link) {
                        Some(url) => {
                            let label = if display_html.is_empty() {
                                escape_text(&url)
                            } else {
                                display_html
                            };
                            result.push_str(&format!(
                                "<a href=\"{}\">{}</a>",
                                escape_attr(&url),
                                label
                            ));
                        }
                        None => result.push_str(&display_html),
                    }
                }
                _ => {}
            }
        }

        result
    }

    fn collect_run_html(&self, run: &docx_rust::document::Run) -> String {
        let mut html = String::new();

        for rc in &run.content {
            match rc {
                RunContent::Text(t) => html.push_str(&escape_text(&t.text)),
                RunContent::Break(_) => html.push_str("<br />"),
                RunContent::Tab(_) => html.push('\t'),
                RunContent::Drawing(drawing) => {
                    if let Some(img) = self.convert_drawing(drawing) {
                        html.push_str(&img);
                    }
                }
                _ => {}
            }
        }

        html
    }

    fn convert_drawing(&self, drawing: &docx_rust::document::Drawing) -> Option<String> {
        if let Some(ref inline) = drawing.inline {
            if let Some(ref graphic) = inline.graphic {
                if let Some(pic) = graphic.data.children.first() {
                    let embed_id = pic.fill.blip.embed.as_ref();
                    let alt = inline.doc_property.descr.as_deref().unwrap_or("");
                    return self.resolve_image(embed_id, alt);
                }
            }
        }

        // Floating images
        if let Some(ref anchor) = drawing.anchor {
            if let Some(ref graphic) = anchor.graphic {
                if let Some(pic) = graphic.data.children.first() {
                    let embed_id = pic.fill.blip.embed.as_ref();
                    let alt = anchor.doc_property.descr.as_deref().unwrap_or("");
                    return self.resolve_image(embed_id, alt);
                }
            }
        }

        None
    }

    /// Inline an embedded image as a `data:` URI
    fn resolve_image(&self, embed_id: &str, alt: &str) -> Option<String> {
        let target: &str = self
            .docx
            .document_rels
            .as_ref()?
            .relationships
            .iter()
            .find(|r| r.id.as_ref() == embed_id)?
            .target
            .as_ref();

        // Media is stored as word/media/..., relationships are relative to word/
        let full_path = format!("word/{}", target);
        let (_media_type, data) = self
            .docx
            .media
            .get(target)
            .or_else(|| self.docx.media.get(full_path.as_str()))?;

        Some(format!(
            "<img src=\"data:{};base64,{}\" alt=\"{}\" />",
            mime_for_path(target),
            STANDARD.encode(data.to_vec()),
            escape_attr(alt)
        ))
    }

    fn resolve_hyperlink_target(&self, link: &docx_rust::document::Hyperlink) -> Option<String> {
        if let Some(ref anchor) = link.anchor {
            return Some(format!("#{}", anchor));
        }

        if let Some(ref id) = link.id {
            if let Some(ref rels) = self.docx.document_rels {
                for r in &rels.relationships {
                    if r.id.as_ref() == id.as_ref() {
                        return Some(r.target.to_string());
                    }
                }
            }
        }

        None
    }

    fn resolve_list_kind(&self, num_id: isize, level: isize) -> ListKind {
        let Some(ref numbering) = self.docx.numbering else {
            return ListKind::Bullet;
        };

        let abstract_id = numbering
            .numberings
            .iter()
            .find(|num| num.num_id == Some(num_id))
            .and_then(|num| num.abstract_num_id.as_ref())
            .map(|aid| aid.value);

        let Some(abstract_id) = abstract_id else {
            return ListKind::Bullet;
        };

        let format = numbering
            .abstract_numberings
            .iter()
            .filter(|a| a.abstract_num_id == abstract_id)
            .flat_map(|a| a.levels.iter())
            .find(|lvl| lvl.i_level == Some(level))
            .and_then(|lvl| lvl.number_format.as_ref())
            .map(|fmt| fmt.value.to_string());

        match format.as_deref() {
            Some("decimal" | "upperRoman" | "lowerRoman" | "upperLetter" | "lowerLetter") => {
                ListKind::Ordered
            }
            _ => ListKind::Bullet,
        }
    }

    fn convert_table(&mut self, table: &docx_rust::document::Table) {
        let mut rows: Vec<Vec<String>> = Vec::new();

        for row in &table.rows {
            let mut cells: Vec<String> = Vec::new();

            for cell_content in &row.cells {
                if let TableRowContent::TableCell(cell) = cell_content {
                    cells.push(self.collect_cell_html(cell));
                }
            }

            if !cells.is_empty() {
                rows.push(cells);
            }
        }

        if rows.is_empty() {
            return;
        }

        self.output.push_str("<table>");
        for row in &rows {
            self.output.push_str("<tr>");
            for cell in row {
                self.output.push_str("<td>");
                self.output.push_str(cell);
                self.output.push_str("</td>");
            }
            self.output.push_str("</tr>");
        }
        self.output.push_str("</table>");
    }

    fn collect_cell_html(&self, cell: &docx_rust::document::TableCell) -> String {
        let mut html = String::new();

        for tc in &cell.content {
            let TableCellContent::Paragraph(para) = tc;
            let text = self.collect_inline_content(para);
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                html.push_str("<p>");
                html.push_str(trimmed);
                html.push_str("</p>");
            }
        }

        html
    }
}

fn heading_level_for_style(id: &str) -> Option<u8> {
    match id {
        "Heading1" | "heading1" | "heading 1" => Some(1),
        "Heading2" | "heading2" | "heading 2" => Some(2),
        "Heading3" | "heading3" | "heading 3" => Some(3),
        "Heading4" | "heading4" | "heading 4" => Some(4),
        "Heading5" | "heading5" | "heading 5" => Some(5),
        "Heading6" | "heading6" | "heading 6" => Some(6),
        "Title" | "title" => Some(1),
        "Subtitle" | "subtitle" => Some(2),
        _ => None,
    }
}

fn mime_for_path(path: &str) -> &'static str {
    match crate::source::extension_of(path).as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "tif" | "tiff" => "image/tiff",
        "emf" => "image/x-emf",
        "wmf" => "image/x-wmf",
        _ => "application/octet-stream",
    }
}

/// Wrap run HTML in inline formatting elements based on run properties
fn format_run_html(html: &str, props: &Option<CharacterProperty>) -> String {
    let Some(props) = props else {
        return html.to_string();
    };

    let is_bold = props
        .bold
        .as_ref()
        .map(|b| b.value != Some(false))
        .unwrap_or(false);
    let is_italic = props
        .italics
        .as_ref()
        .map(|i| i.value != Some(false))
        .unwrap_or(false);
    let is_strike = props
        .strike
        .as_ref()
        .map(|s| s.value != Some(false))
        .unwrap_or(false)
        || props
            .dstrike
            .as_ref()
            .map(|s| s.value != Some(false))
            .unwrap_or(false);

    if html.trim().is_empty() {
        return html.to_string();
    }

    let mut result = html.to_string();

    if is_strike {
        result = format!("<s>{}</s>", result);
    }
    if is_italic {
        result = format!("<em>{}</em>", result);
    }
    if is_bold {
        result = format!("<strong>{}</strong>", result);
    }

    result
}
