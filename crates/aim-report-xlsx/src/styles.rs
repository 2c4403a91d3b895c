//! Cell formats shared by both sheets

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder};

use crate::options::RenderOptions;

/// Formats built once per workbook
#[derive(Debug, Clone)]
pub(crate) struct SheetStyles {
    pub header: Format,
    pub body: Format,
    pub description: Format,
    pub dashboard_header: Format,
    pub dashboard_body: Format,
}

impl SheetStyles {
    pub fn new(options: &RenderOptions) -> Self {
        Self {
            header: Format::new()
                .set_bold()
                .set_background_color(Color::RGB(options.header_fill))
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_text_wrap()
                .set_border(FormatBorder::Thin),
            body: Format::new()
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin),
            description: Format::new()
                .set_align(FormatAlign::Top)
                .set_text_wrap()
                .set_border(FormatBorder::Thin),
            dashboard_header: Format::new().set_bold().set_border(FormatBorder::Thin),
            dashboard_body: Format::new().set_border(FormatBorder::Thin),
        }
    }
}

/// Fill-only format for conditional rules
pub(crate) fn fill(rgb: u32) -> Format {
    Format::new().set_background_color(Color::RGB(rgb))
}
