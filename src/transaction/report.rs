//! Rendering of transaction search results as a PDF report.

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rect, Rgb,
};
use time::Date;
use unicode_segmentation::UnicodeSegmentation;

use crate::{Error, transaction::Transaction};

/// A4 in landscape.
const PAGE_WIDTH: f32 = 297.0;
const PAGE_HEIGHT: f32 = 210.0;
const MARGIN: f32 = 15.0;
const ROW_HEIGHT: f32 = 8.0;
const CELL_PADDING: f32 = 2.0;
const FONT_SIZE: f32 = 10.0;
const TITLE_FONT_SIZE: f32 = 18.0;

/// Roughly how wide one character of 10pt Helvetica is, in millimetres.
const CHARACTER_WIDTH: f32 = 2.2;

/// The report columns as (heading, width in millimetres).
///
/// The widths add up to the page width minus the margins.
const COLUMNS: [(&str, f32); 6] = [
    ("id", 20.0),
    ("expense_date", 35.0),
    ("category", 45.0),
    ("sub_category", 92.0),
    ("transaction_type", 40.0),
    ("amount", 35.0),
];

fn header_fill() -> Color {
    // darkgoldenrod
    Color::Rgb(Rgb::new(184.0 / 255.0, 134.0 / 255.0, 11.0 / 255.0, None))
}

fn header_text() -> Color {
    // whitesmoke
    Color::Rgb(Rgb::new(245.0 / 255.0, 245.0 / 255.0, 245.0 / 255.0, None))
}

fn stripe_fill() -> Color {
    Color::Rgb(Rgb::new(0.94, 0.94, 0.94, None))
}

fn body_text() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

fn pdf_error(error: printpdf::Error) -> Error {
    Error::PdfError(error.to_string())
}

/// Render `transactions` as a PDF table headed by the report title and
/// `generated_on`.
///
/// The header row is repeated at the top of every page the table spills onto.
///
/// # Errors
/// Returns [Error::PdfError] if the document cannot be written.
pub fn transactions_to_pdf(
    transactions: &[Transaction],
    generated_on: Date,
) -> Result<Vec<u8>, Error> {
    let (document, page, layer) = PdfDocument::new(
        "Bilancio - Report",
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Table",
    );
    let font = document
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_error)?;
    let bold_font = document
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_error)?;

    let mut layer = document.get_page(page).get_layer(layer);
    let top = PAGE_HEIGHT - MARGIN;

    layer.set_fill_color(body_text());
    layer.use_text(
        "Bilancio - Report",
        TITLE_FONT_SIZE,
        Mm(MARGIN),
        Mm(top - 6.0),
        &bold_font,
    );
    layer.use_text(
        format!("Generated on: {generated_on}"),
        FONT_SIZE,
        Mm(MARGIN),
        Mm(top - 14.0),
        &font,
    );

    let headings = COLUMNS.map(|(heading, _)| heading.to_owned());
    let mut row_bottom = top - 20.0 - ROW_HEIGHT;
    draw_row(&layer, row_bottom, &headings, Some(header_fill()), header_text(), &bold_font);

    for (index, transaction) in transactions.iter().enumerate() {
        row_bottom -= ROW_HEIGHT;

        if row_bottom < MARGIN {
            let (page, page_layer) = document.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Table");
            layer = document.get_page(page).get_layer(page_layer);
            row_bottom = top - ROW_HEIGHT;
            draw_row(&layer, row_bottom, &headings, Some(header_fill()), header_text(), &bold_font);
            row_bottom -= ROW_HEIGHT;
        }

        let stripe = (index % 2 == 1).then(stripe_fill);
        draw_row(&layer, row_bottom, &row_cells(transaction), stripe, body_text(), &font);
    }

    document.save_to_bytes().map_err(pdf_error)
}

fn row_cells(transaction: &Transaction) -> [String; 6] {
    [
        transaction.id.to_string(),
        transaction.expense_date.to_string(),
        transaction.category.clone(),
        transaction.sub_category.clone(),
        transaction.transaction_type.clone(),
        format!("{:.2}", transaction.amount),
    ]
}

fn draw_row(
    layer: &PdfLayerReference,
    bottom: f32,
    cells: &[String; 6],
    background: Option<Color>,
    text_color: Color,
    font: &IndirectFontRef,
) {
    if let Some(background) = background {
        layer.set_fill_color(background);
        layer.add_rect(Rect::new(
            Mm(MARGIN),
            Mm(bottom),
            Mm(PAGE_WIDTH - MARGIN),
            Mm(bottom + ROW_HEIGHT),
        ));
    }

    layer.set_fill_color(text_color);

    let mut left = MARGIN;
    for ((_, width), cell) in COLUMNS.iter().zip(cells) {
        layer.use_text(
            fit_to_width(cell, *width),
            FONT_SIZE,
            Mm(left + CELL_PADDING),
            Mm(bottom + 2.5),
            font,
        );
        left += width;
    }
}

/// Shorten `text` with a trailing "..." so that it fits in a cell `width` millimetres wide.
fn fit_to_width(text: &str, width: f32) -> String {
    let max_graphemes = ((width - 2.0 * CELL_PADDING) / CHARACTER_WIDTH) as usize;

    if text.graphemes(true).count() <= max_graphemes {
        return text.to_owned();
    }

    let truncated: String = text
        .graphemes(true)
        .take(max_graphemes.saturating_sub(3))
        .collect();

    truncated + "..."
}
