//! Abstract document model for the résumé.
//!
//! The builder produces an ordered `Vec<DocumentBlock>` (top-to-bottom visual
//! order); the renderer lays the blocks onto pages. Nothing here knows about PDF.

pub mod builder;

pub use builder::build_resume;

/// Points per inch. All block dimensions are expressed in points.
pub const INCH: f32 = 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    /// Document title (the person's name).
    Title,
    /// Section heading such as "Skills" or "Education".
    Section,
}

/// One visual block of the résumé.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentBlock {
    Heading { text: String, level: HeadingLevel },
    BodyText(String),
    /// Vertical gap, in points.
    Spacer(f32),
    Table(TableBlock),
}

/// A table with a single header row followed by data rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TableBlock {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Column widths in points; one entry per header cell.
    pub column_widths: Vec<f32>,
    pub style: TableStyle,
}

/// RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };
    /// #f5f5f5
    pub const WHITESMOKE: Color = Color { r: 0.9608, g: 0.9608, b: 0.9608 };
    /// #f5f5dc
    pub const BEIGE: Color = Color { r: 0.9608, g: 0.9608, b: 0.8627 };
    /// #1e3a8a, used for the title, section headings and the table header band.
    pub const NAVY: Color = Color { r: 0.1176, g: 0.2275, b: 0.5412 };
}

/// Visual style applied to a whole table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableStyle {
    pub header_background: Color,
    pub header_text_color: Color,
    pub header_bold: bool,
    pub header_font_size: f32,
    pub header_bottom_padding: f32,
    pub body_background: Color,
    pub body_text_color: Color,
    pub grid_width: f32,
    pub grid_color: Color,
}

impl TableStyle {
    /// Navy header band with bold whitesmoke text, beige body, full black grid.
    pub fn skills() -> Self {
        TableStyle {
            header_background: Color::NAVY,
            header_text_color: Color::WHITESMOKE,
            header_bold: true,
            header_font_size: 12.0,
            header_bottom_padding: 12.0,
            body_background: Color::BEIGE,
            body_text_color: Color::BLACK,
            grid_width: 1.0,
            grid_color: Color::BLACK,
        }
    }
}
