//! # Receipt Document
//!
//! Single-page PDF receipt rendering: title, underlined heading, the four
//! label/value lines, and a thank-you line. Layout is fixed; only the
//! values vary.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use checkout_core::{CheckoutError, CheckoutResult, TransactionId};
use printpdf::{BuiltinFont, Line, Mm, PdfDocument, Point};

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
const MARGIN: Mm = Mm(18.0);

/// Render the receipt document and return the raw PDF bytes
pub fn render_receipt_pdf(
    full_name: &str,
    amount: &str,
    transaction_id: &TransactionId,
    date: &str,
) -> CheckoutResult<Vec<u8>> {
    let (doc, page, layer) =
        PdfDocument::new("FTUK Payment Receipt", PAGE_WIDTH, PAGE_HEIGHT, "receipt");

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(render_error)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(render_error)?;

    let layer = doc.get_page(page).get_layer(layer);

    // Header
    layer.use_text("FTUK", 20.0, MARGIN, Mm(272.0), &bold);
    layer.use_text("Payment Receipt", 14.0, MARGIN, Mm(258.0), &regular);

    let underline = Line {
        points: vec![
            (Point::new(MARGIN, Mm(256.2)), false),
            (Point::new(Mm(58.0), Mm(256.2)), false),
        ],
        is_closed: false,
    };
    layer.set_outline_thickness(0.6);
    layer.add_line(underline);

    // Recipient & meta
    let lines = [
        format!("Name: {}", full_name),
        format!("Amount: ${}", amount),
        format!("Transaction ID: {}", transaction_id),
        format!("Date: {}", date),
    ];
    let mut y = Mm(246.0);
    for line in &lines {
        layer.use_text(line.as_str(), 12.0, MARGIN, y, &regular);
        y = Mm(y.0 - 7.0);
    }

    // Footer / thanks
    layer.use_text(
        "Thank you for your payment.",
        12.0,
        MARGIN,
        Mm(y.0 - 7.0),
        &regular,
    );

    doc.save_to_bytes().map_err(render_error)
}

/// Render the receipt and base64-encode it for attachment
pub fn render_receipt_attachment(
    full_name: &str,
    amount: &str,
    transaction_id: &TransactionId,
    date: &str,
) -> CheckoutResult<String> {
    let bytes = render_receipt_pdf(full_name, amount, transaction_id, date)?;
    Ok(BASE64.encode(bytes))
}

fn render_error(err: printpdf::Error) -> CheckoutError {
    CheckoutError::Render(err.to_string())
}
