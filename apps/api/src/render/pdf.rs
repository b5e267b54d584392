//! PDF renderer built directly on `lopdf`.
//!
//! Blocks flow top-to-bottom inside the page margins. Anything that does not
//! fit on the current page (a text line, a table row) moves to a new page;
//! vertical gaps are dropped at the top of a page. Text uses the standard
//! Helvetica faces with WinAnsi encoding, so no font program is embedded.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};
use tracing::debug;

use crate::document::{Color, DocumentBlock, HeadingLevel, TableBlock, INCH};
use crate::render::font_metrics::FontFace;
use crate::render::{DocumentRenderer, RenderError};

/// Horizontal padding inside each table cell, per side.
const CELL_PADDING_X: f32 = 6.0;
/// Vertical padding inside each table cell unless the style overrides it.
const CELL_PADDING_Y: f32 = 3.0;

// ────────────────────────────────────────────────────────────────────────────
// Page and text styles
// ────────────────────────────────────────────────────────────────────────────

/// Paper size and margins, in points.
#[derive(Debug, Clone)]
pub struct PageSetup {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageSetup {
    /// US letter with 1" margins on every side.
    pub fn letter() -> Self {
        PageSetup {
            width: 8.5 * INCH,
            height: 11.0 * INCH,
            margin: INCH,
        }
    }

    fn frame_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }
}

#[derive(Debug, Clone, Copy)]
struct TextStyle {
    face: FontFace,
    size: f32,
    leading: f32,
    color: Color,
    space_before: f32,
    space_after: f32,
}

const TITLE_STYLE: TextStyle = TextStyle {
    face: FontFace::HelveticaBold,
    size: 24.0,
    leading: 28.0,
    color: Color::NAVY,
    space_before: 0.0,
    space_after: 30.0,
};

const SECTION_STYLE: TextStyle = TextStyle {
    face: FontFace::HelveticaBold,
    size: 14.0,
    leading: 18.0,
    color: Color::NAVY,
    space_before: 12.0,
    space_after: 12.0,
};

const BODY_STYLE: TextStyle = TextStyle {
    face: FontFace::Helvetica,
    size: 10.0,
    leading: 12.0,
    color: Color::BLACK,
    space_before: 0.0,
    space_after: 0.0,
};

// ────────────────────────────────────────────────────────────────────────────
// Renderer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PdfRenderer {
    page: PageSetup,
}

impl PdfRenderer {
    pub fn new(page: PageSetup) -> Self {
        PdfRenderer { page }
    }
}

impl Default for PdfRenderer {
    fn default() -> Self {
        PdfRenderer::new(PageSetup::letter())
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(&self, blocks: &[DocumentBlock]) -> Result<Vec<u8>, RenderError> {
        let mut writer = PageWriter::new(&self.page);

        for block in blocks {
            match block {
                DocumentBlock::Heading { text, level } => {
                    let style = match level {
                        HeadingLevel::Title => TITLE_STYLE,
                        HeadingLevel::Section => SECTION_STYLE,
                    };
                    writer.paragraph(text, &style);
                }
                DocumentBlock::BodyText(text) => writer.paragraph(text, &BODY_STYLE),
                DocumentBlock::Spacer(height) => writer.gap(*height),
                DocumentBlock::Table(table) => writer.table(table)?,
            }
        }

        let pages = writer.finish();
        debug!(pages = pages.len(), blocks = blocks.len(), "Laid out résumé");
        assemble(&self.page, pages, document_title(blocks))
    }
}

fn document_title(blocks: &[DocumentBlock]) -> Option<&str> {
    blocks.iter().find_map(|block| match block {
        DocumentBlock::Heading {
            text,
            level: HeadingLevel::Title,
        } => Some(text.as_str()),
        _ => None,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Page flow
// ────────────────────────────────────────────────────────────────────────────

/// Accumulates content-stream operations page by page.
struct PageWriter<'a> {
    setup: &'a PageSetup,
    finished: Vec<Vec<Operation>>,
    ops: Vec<Operation>,
    /// Y coordinate of the top of the next piece of content.
    cursor: f32,
}

impl<'a> PageWriter<'a> {
    fn new(setup: &'a PageSetup) -> Self {
        PageWriter {
            setup,
            finished: Vec::new(),
            ops: Vec::new(),
            cursor: setup.height - setup.margin,
        }
    }

    fn top(&self) -> f32 {
        self.setup.height - self.setup.margin
    }

    fn at_page_top(&self) -> bool {
        self.cursor >= self.top()
    }

    fn new_page(&mut self) {
        self.finished.push(std::mem::take(&mut self.ops));
        self.cursor = self.top();
    }

    /// Starts a new page unless `height` still fits above the bottom margin.
    fn ensure_room(&mut self, height: f32) {
        if !self.at_page_top() && self.cursor - height < self.setup.margin {
            self.new_page();
        }
    }

    fn gap(&mut self, height: f32) {
        if height <= 0.0 || self.at_page_top() {
            return;
        }
        if self.cursor - height < self.setup.margin {
            self.new_page();
        } else {
            self.cursor -= height;
        }
    }

    fn paragraph(&mut self, text: &str, style: &TextStyle) {
        self.gap(style.space_before);

        let lines = style
            .face
            .metrics()
            .wrap(text, style.size, self.setup.frame_width());
        for line in &lines {
            self.ensure_room(style.leading);
            let baseline = self.cursor - style.size;
            self.text(
                style.face,
                style.size,
                style.color,
                self.setup.margin,
                baseline,
                line,
            );
            self.cursor -= style.leading;
        }

        self.gap(style.space_after);
    }

    fn table(&mut self, table: &TableBlock) -> Result<(), RenderError> {
        let columns = table.column_widths.len();
        for row in std::iter::once(&table.header).chain(table.rows.iter()) {
            if row.len() != columns {
                return Err(RenderError::TableShape {
                    cells: row.len(),
                    columns,
                });
            }
        }

        let style = &table.style;
        let header = RowStyle {
            face: if style.header_bold {
                FontFace::HelveticaBold
            } else {
                FontFace::Helvetica
            },
            size: style.header_font_size,
            leading: style.header_font_size * 1.2,
            padding_bottom: style.header_bottom_padding,
            background: style.header_background,
            text_color: style.header_text_color,
        };
        let body = RowStyle {
            face: FontFace::Helvetica,
            size: BODY_STYLE.size,
            leading: BODY_STYLE.leading,
            padding_bottom: CELL_PADDING_Y,
            background: style.body_background,
            text_color: style.body_text_color,
        };

        let grid = (style.grid_width, style.grid_color);
        self.table_row(&table.header, &table.column_widths, &header, grid)?;
        for row in &table.rows {
            self.table_row(row, &table.column_widths, &body, grid)?;
        }
        Ok(())
    }

    fn table_row(
        &mut self,
        cells: &[String],
        widths: &[f32],
        row: &RowStyle,
        (grid_width, grid_color): (f32, Color),
    ) -> Result<(), RenderError> {
        let metrics = row.face.metrics();
        let wrapped: Vec<Vec<String>> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| metrics.wrap(cell, row.size, width - 2.0 * CELL_PADDING_X))
            .collect();
        let line_count = wrapped.iter().map(Vec::len).max().unwrap_or(0).max(1);
        let height = CELL_PADDING_Y + line_count as f32 * row.leading + row.padding_bottom;

        // Rows are never split, so one taller than the frame cannot be placed.
        let available = self.setup.height - 2.0 * self.setup.margin;
        if height > available {
            return Err(RenderError::RowTooTall { height, available });
        }

        self.ensure_room(height);
        let top = self.cursor;
        let bottom = top - height;
        let total_width: f32 = widths.iter().sum();

        self.fill_rect(self.setup.margin, bottom, total_width, height, row.background);

        let mut x = self.setup.margin;
        for (lines, width) in wrapped.iter().zip(widths) {
            let mut baseline = top - CELL_PADDING_Y - row.size;
            for line in lines {
                let text_x = x + CELL_PADDING_X;
                self.text(row.face, row.size, row.text_color, text_x, baseline, line);
                baseline -= row.leading;
            }
            if grid_width > 0.0 {
                self.stroke_rect(x, bottom, *width, height, grid_width, grid_color);
            }
            x += width;
        }

        self.cursor = bottom;
        Ok(())
    }

    // ── drawing primitives ──────────────────────────────────────────────────

    fn text(&mut self, face: FontFace, size: f32, color: Color, x: f32, y: f32, text: &str) {
        self.ops.extend([
            Operation::new("BT", vec![]),
            Operation::new("rg", vec![color.r.into(), color.g.into(), color.b.into()]),
            Operation::new("Tf", vec![face.resource_name().into(), size.into()]),
            Operation::new("Td", vec![x.into(), y.into()]),
            Operation::new(
                "Tj",
                vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ]);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.ops.extend([
            Operation::new("rg", vec![color.r.into(), color.g.into(), color.b.into()]),
            Operation::new("re", vec![x.into(), y.into(), w.into(), h.into()]),
            Operation::new("f", vec![]),
        ]);
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, line_width: f32, color: Color) {
        self.ops.extend([
            Operation::new("w", vec![line_width.into()]),
            Operation::new("RG", vec![color.r.into(), color.g.into(), color.b.into()]),
            Operation::new("re", vec![x.into(), y.into(), w.into(), h.into()]),
            Operation::new("S", vec![]),
        ]);
    }

    /// Closes the last page. A document always has at least one page.
    fn finish(mut self) -> Vec<Vec<Operation>> {
        if !self.ops.is_empty() || self.finished.is_empty() {
            self.finished.push(self.ops);
        }
        self.finished
    }
}

struct RowStyle {
    face: FontFace,
    size: f32,
    leading: f32,
    padding_bottom: f32,
    background: Color,
    text_color: Color,
}

// ────────────────────────────────────────────────────────────────────────────
// Document assembly
// ────────────────────────────────────────────────────────────────────────────

fn assemble(
    setup: &PageSetup,
    pages: Vec<Vec<Operation>>,
    title: Option<&str>,
) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for face in [FontFace::Helvetica, FontFace::HelveticaBold] {
        fonts.set(
            face.resource_name(),
            dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => face.base_font(),
                "Encoding" => "WinAnsiEncoding",
            },
        );
    }
    let resources_id = doc.add_object(dictionary! { "Font" => fonts });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let encoded = Content { operations }
            .encode()
            .map_err(|e| RenderError::Content(e.into()))?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                setup.width.into(),
                setup.height.into(),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut info = dictionary! {
        "Producer" => Object::string_literal(env!("CARGO_PKG_NAME")),
    };
    if let Some(title) = title {
        info.set("Title", Object::String(to_win_ansi(title), StringFormat::Literal));
    }
    let info_id = doc.add_object(info);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| RenderError::Serialize(e.into()))?;
    Ok(bytes)
}

/// Encodes text for a WinAnsi-encoded standard font.
///
/// Latin-1 maps straight through; the Windows-1252 extras (curly quotes,
/// dashes, euro, bullet) get their code points; `₹` becomes `Rs.`; control
/// characters become spaces; anything else becomes `?`.
pub fn to_win_ansi(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            ' '..='~' => out.push(c as u8),
            '\u{a0}'..='\u{ff}' => out.push(c as u32 as u8),
            '\t' | '\n' | '\r' => out.push(b' '),
            '₹' => out.extend_from_slice(b"Rs."),
            _ => out.push(cp1252_extra(c).unwrap_or(b'?')),
        }
    }
    out
}

fn cp1252_extra(c: char) -> Option<u8> {
    let byte = match c {
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(byte)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::document::TableStyle;

    /// Every `Tj` string on every page, in page order.
    pub(crate) fn shown_text(pdf: &[u8]) -> Vec<Vec<String>> {
        let doc = Document::load_mem(pdf).expect("rendered bytes should parse as PDF");
        doc.get_pages()
            .values()
            .map(|page_id| {
                let data = doc.get_page_content(*page_id).unwrap();
                Content::decode(&data)
                    .unwrap()
                    .operations
                    .into_iter()
                    .filter(|op| op.operator == "Tj")
                    .filter_map(|op| match op.operands.first() {
                        Some(Object::String(bytes, _)) => {
                            Some(bytes.iter().map(|b| *b as char).collect::<String>())
                        }
                        _ => None,
                    })
                    .collect::<Vec<String>>()
            })
            .collect()
    }

    fn heading(text: &str, level: HeadingLevel) -> DocumentBlock {
        DocumentBlock::Heading {
            text: text.to_string(),
            level,
        }
    }

    #[test]
    fn test_render_produces_single_page_pdf() {
        let blocks = vec![
            heading("Jane Doe", HeadingLevel::Title),
            DocumentBlock::BodyText("Mobile: 9999999999".to_string()),
            DocumentBlock::Spacer(21.6),
        ];
        let bytes = PdfRenderer::default().render(&blocks).unwrap();

        assert!(bytes.starts_with(b"%PDF-1.5"));
        let pages = shown_text(&bytes);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0], vec!["Jane Doe", "Mobile: 9999999999"]);
    }

    #[test]
    fn test_empty_block_list_still_has_one_page() {
        let bytes = PdfRenderer::default().render(&[]).unwrap();
        assert_eq!(shown_text(&bytes).len(), 1);
    }

    #[test]
    fn test_long_body_flows_onto_more_pages() {
        let paragraph = "Shipped reliable systems and mentored engineers across teams. ".repeat(400);
        let blocks = vec![
            heading("Jane Doe", HeadingLevel::Title),
            DocumentBlock::BodyText(paragraph),
        ];
        let bytes = PdfRenderer::default().render(&blocks).unwrap();
        let pages = shown_text(&bytes);
        assert!(pages.len() > 1, "expected pagination, got {} page(s)", pages.len());
        assert_eq!(pages[0][0], "Jane Doe");
    }

    #[test]
    fn test_table_cells_are_drawn_in_order() {
        let table = TableBlock {
            header: vec!["Skill".into(), "Proficiency".into(), "Experience".into()],
            rows: vec![vec!["Python".into(), "Expert".into(), "5 years".into()]],
            column_widths: vec![216.0, 108.0, 108.0],
            style: TableStyle::skills(),
        };
        let bytes = PdfRenderer::default()
            .render(&[DocumentBlock::Table(table)])
            .unwrap();
        assert_eq!(
            shown_text(&bytes)[0],
            vec!["Skill", "Proficiency", "Experience", "Python", "Expert", "5 years"]
        );
    }

    #[test]
    fn test_table_shape_mismatch_is_an_error() {
        let table = TableBlock {
            header: vec!["Skill".into(), "Proficiency".into()],
            rows: vec![],
            column_widths: vec![216.0, 108.0, 108.0],
            style: TableStyle::skills(),
        };
        let err = PdfRenderer::default()
            .render(&[DocumentBlock::Table(table)])
            .unwrap_err();
        assert!(matches!(err, RenderError::TableShape { cells: 2, columns: 3 }));
    }

    #[test]
    fn test_row_taller_than_a_page_is_an_error() {
        let table = TableBlock {
            header: vec!["Skill".into(), "Proficiency".into(), "Experience".into()],
            rows: vec![vec!["word ".repeat(4000), "Expert".into(), "5 years".into()]],
            column_widths: vec![216.0, 108.0, 108.0],
            style: TableStyle::skills(),
        };
        let err = PdfRenderer::default()
            .render(&[DocumentBlock::Table(table)])
            .unwrap_err();
        match err {
            RenderError::RowTooTall { height, available } => {
                assert_eq!(available, 648.0);
                assert!(height > available);
            }
            other => panic!("expected RowTooTall, got {other:?}"),
        }
    }

    #[test]
    fn test_rows_that_fit_flow_onto_new_pages() {
        let rows = (0..80)
            .map(|i| vec![format!("Skill {i}"), "Expert".to_string(), "3 years".to_string()])
            .collect();
        let table = TableBlock {
            header: vec!["Skill".into(), "Proficiency".into(), "Experience".into()],
            rows,
            column_widths: vec![216.0, 108.0, 108.0],
            style: TableStyle::skills(),
        };
        let bytes = PdfRenderer::default()
            .render(&[DocumentBlock::Table(table)])
            .unwrap();
        let pages = shown_text(&bytes);
        assert!(pages.len() > 1);
        assert_eq!(pages.last().unwrap().last().unwrap(), "3 years");
    }

    #[test]
    fn test_to_win_ansi_substitutions() {
        assert_eq!(to_win_ansi("abc"), b"abc".to_vec());
        assert_eq!(to_win_ansi("café"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(to_win_ansi("₹50,000"), b"Rs.50,000".to_vec());
        assert_eq!(to_win_ansi("a–b"), vec![b'a', 0x96, b'b']);
        assert_eq!(to_win_ansi("日"), b"?".to_vec());
        assert_eq!(to_win_ansi("a\nb"), b"a b".to_vec());
    }
}
