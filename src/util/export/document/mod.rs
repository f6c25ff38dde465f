use std::{fs::File, io::BufWriter, io::Write, path::Path};

use chrono::NaiveDate;
use log::{info, warn};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Pt, Rgb,
};

use crate::{
    DATE_FORMAT, GuiError, Messages,
    config::ShopProfile,
    data::{
        ComputedLineItem, Customer, Document, DocumentType, LineItem,
        currency::{CurrencyValue, format_measure},
    },
};

use super::{
    FONT_SIZE, LINE_WIDTH, MARGIN, PADDING, SMALL_FONT_SIZE, THIN_LINE_WIDTH, get_text_width,
    wrap_text,
};

const HEIGHT: Mm = Mm(297.0);
const WIDTH: Mm = Mm(210.0);
const LEFT: Mm = Mm(MARGIN);
const RIGHT: Mm = Mm(WIDTH.0 - MARGIN);
const TOP: Mm = Mm(HEIGHT.0 - MARGIN);
const BOTTOM: Mm = Mm(MARGIN);

const SHOP_NAME_FONT_SIZE: Pt = Pt(20.0);
const TITLE_FONT_SIZE: Pt = Pt(14.0);

// COL WIDTHS
const DESC_WIDTH: f32 = 94.0;
const SQFT_WIDTH: f32 = 20.0;
const QTY_WIDTH: f32 = 16.0;
const RATE_WIDTH: f32 = 24.0;
const TOTAL_WIDTH: f32 = 26.0;
const COL_WIDTHS: [f32; 5] = [DESC_WIDTH, SQFT_WIDTH, QTY_WIDTH, RATE_WIDTH, TOTAL_WIDTH];

const HEADER_ROW_HEIGHT: f32 = 8.0; // Mm
const ROW_HEIGHT: f32 = 7.0; // Mm
const DESCRIPTION_LINE_HEIGHT: f32 = 4.0; // Mm
const ARROW_HEIGHT: f32 = 3.0; // Mm
const ARROW_INDENT: f32 = 3.0; // Mm
const DESCRIPTION_INDENT: f32 = 8.0; // Mm
const BRACKET_TICK: f32 = 1.5; // Mm
// room between the indent and the bracket's right edge
const DESCRIPTION_WIDTH: f32 = DESC_WIDTH - PADDING - DESCRIPTION_INDENT - 2.0 * BRACKET_TICK - 1.0;

const BOX_GAP: f32 = 2.0; // Mm
const SUMMARY_BOX_HEIGHT: f32 = 7.0; // Mm
const NOTE_BOX_WIDTH: f32 = 90.0; // Mm
const NOTE_BOX_HEIGHT: f32 = 22.0; // Mm
const NOTE_MAX_LINES: usize = 3;

const SIGNATURE_WIDTH: f32 = 60.0; // Mm
const SIGNATURE_Y: Mm = Mm(BOTTOM.0 + 15.0);

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

/// Renders the document and writes it to `file_name`, overwriting it.
pub(crate) fn create_document_pdf(
    file_name: &Path,
    document: &Document,
    shop: &ShopProfile,
) -> Result<(), GuiError> {
    let bytes = render_document(document, shop)?;
    let mut file = File::create(file_name).map_err(|e| GuiError::ExportFailed(e.to_string()))?;
    file.write_all(&bytes)
        .map_err(|e| GuiError::ExportFailed(e.to_string()))?;
    info!("{} written to {:?}", document.document_type.file_stem(), file_name);
    Ok(())
}

/// Renders the document onto a single A4 page and returns the PDF bytes.
pub(crate) fn render_document(document: &Document, shop: &ShopProfile) -> Result<Vec<u8>, GuiError> {
    let (doc, page1, layer) = PdfDocument::new(
        document.document_type.name(),
        WIDTH,
        HEIGHT,
        "layer",
    );
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| GuiError::ExportFailed(e.to_string()))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| GuiError::ExportFailed(e.to_string()))?,
        italic: doc
            .add_builtin_font(BuiltinFont::HelveticaOblique)
            .map_err(|e| GuiError::ExportFailed(e.to_string()))?,
    };

    let current_layer = doc.get_page(page1).get_layer(layer);
    current_layer.set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    current_layer.set_outline_thickness(LINE_WIDTH);

    let header_bottom = render_header(
        shop,
        &document.date,
        document.document_type,
        &current_layer,
        &fonts,
        TOP,
    );
    let customer_bottom = render_customer(&document.customer, &current_layer, &fonts, header_bottom);
    let table_bottom = render_items(&document.items, &current_layer, &fonts, customer_bottom);
    let summary_bottom = render_summary(&summary_rows(document), &current_layer, &fonts, table_bottom);
    let note_bottom = render_note(&document.note, &current_layer, &fonts, table_bottom);
    document
        .items
        .iter()
        .enumerate()
        .filter(|(_, computed)| {
            description_lines(&computed.item)
                .iter()
                .any(|l| get_text_width(l, SMALL_FONT_SIZE, false) > DESCRIPTION_WIDTH)
        })
        .for_each(|(idx, _)| {
            warn!(
                "description of item {} has a word too long for its column, output will overlap",
                idx + 1
            );
        });

    let lowest = summary_bottom.0.min(note_bottom.0);
    if lowest < SIGNATURE_Y.0 + ROW_HEIGHT {
        warn!(
            "{} with {} items runs into the signature area ({:.1}mm), output will overlap",
            document.document_type.file_stem(),
            document.items.len(),
            lowest
        );
    }
    render_signatures(&current_layer, &fonts);

    let mut writer = BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer)
        .map_err(|e| GuiError::ExportFailed(e.to_string()))?;
    writer
        .into_inner()
        .map_err(|e| GuiError::ExportFailed(e.to_string()))
}

/// Label and value of each summary box, top to bottom.
pub(crate) fn summary_rows(document: &Document) -> Vec<(String, CurrencyValue)> {
    let mut rows: Vec<(String, CurrencyValue)> =
        vec![(Messages::GrandTotal.into(), document.grand_total.clone())];
    if let Some(ref adjustment) = document.adjustment {
        if !adjustment.discount.is_zero() {
            rows.push((Messages::Discount.into(), adjustment.discount.clone()));
        }
        if !adjustment.tax_rate.is_zero() {
            rows.push((
                format!("{} ({}%)", Messages::Tax, adjustment.tax_rate.normalize()),
                adjustment.tax.clone(),
            ));
        }
        rows.push((Messages::NetTotal.into(), adjustment.net_total.clone()));
    }
    // quotations never show payment boxes, even if an advance sneaked in
    if document.document_type.has_payment_boxes() {
        if let Some(ref payment) = document.payment {
            rows.push((Messages::Advance.into(), payment.advance.clone()));
            rows.push((Messages::Due.into(), payment.due.clone()));
        }
    }
    rows
}

/// Title and the four numeric cells of an item row, a dash for zero.
pub(crate) fn row_cells(idx: usize, computed: &ComputedLineItem) -> [String; 5] {
    let item = &computed.item;
    let quantity = if item.quantity == 0 {
        String::from("-")
    } else {
        item.quantity.to_string()
    };
    [
        format!("{}. {}", idx + 1, item.title),
        format_measure(&item.feet),
        quantity,
        CurrencyValue::new_from_decimal(item.rate)
            .to_cell_str()
            .to_owned(),
        computed.total.to_cell_str().to_owned(),
    ]
}

fn centered_x(left: f32, width: f32, text: &str, font_size: Pt, bold: bool) -> Mm {
    Mm(left + (width - get_text_width(text, font_size, bold)) / 2.0)
}

fn right_aligned_x(right: f32, text: &str, font_size: Pt, bold: bool) -> Mm {
    Mm(right - get_text_width(text, font_size, bold))
}

/// x positions of the vertical rules between columns
fn column_boundaries() -> Vec<f32> {
    let mut x = LEFT.0;
    COL_WIDTHS[..COL_WIDTHS.len() - 1]
        .iter()
        .map(|width| {
            x += width;
            x
        })
        .collect()
}

fn column_left(idx: usize) -> f32 {
    LEFT.0 + COL_WIDTHS[..idx].iter().sum::<f32>()
}

fn description_lines(item: &LineItem) -> Vec<String> {
    if item.description.trim().is_empty() {
        return vec![];
    }
    wrap_text(&item.description, DESCRIPTION_WIDTH, SMALL_FONT_SIZE)
}

fn description_block_height(lines: usize) -> f32 {
    ARROW_HEIGHT + 1.0 + lines as f32 * DESCRIPTION_LINE_HEIGHT + 2.0
}

/// Vertical space an item takes in the table.
fn item_height(item: &LineItem) -> f32 {
    let lines = description_lines(item).len();
    if lines == 0 {
        ROW_HEIGHT
    } else {
        ROW_HEIGHT + description_block_height(lines)
    }
}

fn render_header(
    shop: &ShopProfile,
    date: &NaiveDate,
    document_type: DocumentType,
    layer: &PdfLayerReference,
    fonts: &Fonts,
    top: Mm,
) -> Mm {
    let mut y = top.0 - 7.0;
    let name = shop.name.trim();
    layer.use_text(
        name,
        SHOP_NAME_FONT_SIZE.0,
        centered_x(0.0, WIDTH.0, name, SHOP_NAME_FONT_SIZE, true),
        Mm(y),
        &fonts.bold,
    );

    y -= 6.0;
    let address = shop.address.trim();
    layer.use_text(
        address,
        FONT_SIZE.0,
        centered_x(0.0, WIDTH.0, address, FONT_SIZE, false),
        Mm(y),
        &fonts.regular,
    );

    let tagline = shop.tagline.trim();
    if !tagline.is_empty() {
        y -= 5.0;
        layer.use_text(
            tagline,
            FONT_SIZE.0,
            centered_x(0.0, WIDTH.0, tagline, FONT_SIZE, false),
            Mm(y),
            &fonts.italic,
        );
    }

    // proprietor and phones on the left, date and number on the right
    y -= 8.0;
    let date_str = format!("{}: {}", Messages::Date, date.format(DATE_FORMAT));
    let number_str = format!(
        "{}: {}",
        Messages::DocumentNumberShort,
        shop.document_number.trim()
    );
    layer.use_text(
        shop.proprietor.trim(),
        FONT_SIZE.0,
        LEFT,
        Mm(y),
        &fonts.bold,
    );
    layer.use_text(
        &date_str,
        FONT_SIZE.0,
        right_aligned_x(RIGHT.0, &date_str, FONT_SIZE, false),
        Mm(y),
        &fonts.regular,
    );
    let phones: Vec<&str> = shop
        .phones
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect();
    let rows = phones.len().max(1);
    for i in 0..rows {
        y -= 4.5;
        if let Some(phone) = phones.get(i) {
            layer.use_text(
                format!("{}: {}", Messages::Phone, phone),
                FONT_SIZE.0,
                LEFT,
                Mm(y),
                &fonts.regular,
            );
        }
        if i == 0 {
            layer.use_text(
                &number_str,
                FONT_SIZE.0,
                right_aligned_x(RIGHT.0, &number_str, FONT_SIZE, false),
                Mm(y),
                &fonts.regular,
            );
        }
    }

    y -= 3.0;
    render_horizontal_line(LEFT.0, RIGHT.0, y, layer);

    y -= 8.0;
    let title = document_type.name().to_uppercase();
    layer.use_text(
        &title,
        TITLE_FONT_SIZE.0,
        centered_x(0.0, WIDTH.0, &title, TITLE_FONT_SIZE, true),
        Mm(y),
        &fonts.bold,
    );

    // return bottom of text for next alignment
    Mm(y - 2.0)
}

fn render_customer(customer: &Customer, layer: &PdfLayerReference, fonts: &Fonts, top: Mm) -> Mm {
    let mut y = top.0 - 6.0;
    layer.use_text(
        format!("{}: {}", Messages::Customer, customer.name),
        FONT_SIZE.0,
        LEFT,
        Mm(y),
        &fonts.regular,
    );
    y -= 5.0;
    layer.use_text(
        format!("{}: {}", Messages::Mobile, customer.mobile),
        FONT_SIZE.0,
        LEFT,
        Mm(y),
        &fonts.regular,
    );
    Mm(y - 4.0)
}

// TABLE
//
// -------------------------------------------------
// | Description        | Sq.Ft | Qty | Rate | Total |
// -------------------------------------------------
// | 1. Window          |  10   |  -  |  50  |  500  |
// |    |               |       |     |      |       |
// |    v [ 5mm glass ] |       |     |      |       |
// | 2. Door            |   -   |  3  | 200  |  600  |
// -------------------------------------------------
//                               | Grand Total  600 |
//                               --------------------
// Rules are drawn once at the end, so no line is stroked twice.
fn render_items(
    items: &[ComputedLineItem],
    layer: &PdfLayerReference,
    fonts: &Fonts,
    top: Mm,
) -> Mm {
    render_table_header(top, layer, fonts);
    let mut y = top.0 - HEADER_ROW_HEIGHT;
    let mut min_y = y;

    for (idx, computed) in items.iter().enumerate() {
        render_row(idx, computed, Mm(y), layer, fonts);
        y -= item_height(&computed.item);
        min_y = min_y.min(y);
    }

    let bottom = min_y;
    layer.set_outline_thickness(LINE_WIDTH);
    render_rect(LEFT.0, top.0, RIGHT.0, bottom, layer);
    render_horizontal_line(LEFT.0, RIGHT.0, top.0 - HEADER_ROW_HEIGHT, layer);
    column_boundaries().into_iter().for_each(|x| {
        render_vertical_line(x, top.0, bottom, layer);
    });
    Mm(bottom)
}

fn render_table_header(top: Mm, layer: &PdfLayerReference, fonts: &Fonts) {
    let y = Mm(top.0 - HEADER_ROW_HEIGHT + PADDING + 0.5);
    layer.use_text(
        Messages::Description.msg(),
        FONT_SIZE.0,
        Mm(column_left(0) + PADDING),
        y,
        &fonts.bold,
    );
    [Messages::SquareFeet, Messages::Qty, Messages::Rate, Messages::Total]
        .iter()
        .enumerate()
        .for_each(|(i, label)| {
            let col = i + 1;
            layer.use_text(
                label.msg(),
                FONT_SIZE.0,
                centered_x(column_left(col), COL_WIDTHS[col], label.msg(), FONT_SIZE, true),
                y,
                &fonts.bold,
            );
        });
}

fn render_row(
    idx: usize,
    computed: &ComputedLineItem,
    top: Mm,
    layer: &PdfLayerReference,
    fonts: &Fonts,
) {
    let baseline = Mm(top.0 - ROW_HEIGHT + PADDING);
    let [title, numbers @ ..] = row_cells(idx, computed);
    layer.use_text(
        title,
        FONT_SIZE.0,
        Mm(column_left(0) + PADDING),
        baseline,
        &fonts.regular,
    );
    numbers.iter().enumerate().for_each(|(i, text)| {
        let col = i + 1;
        layer.use_text(
            text,
            FONT_SIZE.0,
            centered_x(column_left(col), COL_WIDTHS[col], text, FONT_SIZE, false),
            baseline,
            &fonts.regular,
        );
    });

    let lines = description_lines(&computed.item);
    if !lines.is_empty() {
        render_description(&lines, Mm(top.0 - ROW_HEIGHT), layer, fonts);
    }
}

fn render_description(lines: &[String], top: Mm, layer: &PdfLayerReference, fonts: &Fonts) {
    layer.set_outline_thickness(THIN_LINE_WIDTH);

    // arrow pointing from the title down to the block
    let arrow_x = column_left(0) + PADDING + ARROW_INDENT;
    let arrow_bottom = top.0 - ARROW_HEIGHT;
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(arrow_x), Mm(top.0 + 1.0)), false),
            (Point::new(Mm(arrow_x), Mm(arrow_bottom)), false),
        ],
        is_closed: false,
    });
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(arrow_x - 1.0), Mm(arrow_bottom + 1.2)), false),
            (Point::new(Mm(arrow_x), Mm(arrow_bottom)), false),
            (Point::new(Mm(arrow_x + 1.0), Mm(arrow_bottom + 1.2)), false),
        ],
        is_closed: false,
    });

    let block_top = arrow_bottom - 1.0;
    let text_x = column_left(0) + PADDING + DESCRIPTION_INDENT;
    lines.iter().enumerate().for_each(|(i, line)| {
        layer.use_text(
            line,
            SMALL_FONT_SIZE.0,
            Mm(text_x),
            Mm(block_top - (i + 1) as f32 * DESCRIPTION_LINE_HEIGHT + 1.0),
            &fonts.regular,
        );
    });
    let block_bottom = block_top - lines.len() as f32 * DESCRIPTION_LINE_HEIGHT;

    let widest = lines
        .iter()
        .map(|l| get_text_width(l, SMALL_FONT_SIZE, false))
        .fold(0.0_f32, f32::max);
    let bracket_left = text_x - BRACKET_TICK;
    let bracket_right = (text_x + widest + BRACKET_TICK).min(column_left(1) - 1.0);
    render_bracket(bracket_left, bracket_right, block_top, block_bottom, layer);

    layer.set_outline_thickness(LINE_WIDTH);
}

// `[` on the left and `]` on the right, not a closed box
fn render_bracket(left: f32, right: f32, top: f32, bottom: f32, layer: &PdfLayerReference) {
    [(left, BRACKET_TICK), (right, -BRACKET_TICK)]
        .iter()
        .for_each(|(x, tick)| {
            layer.add_line(Line {
                points: vec![
                    (Point::new(Mm(x + tick), Mm(top)), false),
                    (Point::new(Mm(*x), Mm(top)), false),
                    (Point::new(Mm(*x), Mm(bottom)), false),
                    (Point::new(Mm(x + tick), Mm(bottom)), false),
                ],
                is_closed: false,
            });
        });
}

fn render_summary(
    rows: &[(String, CurrencyValue)],
    layer: &PdfLayerReference,
    fonts: &Fonts,
    top: Mm,
) -> Mm {
    let box_left = column_left(3);
    let mut y = top.0;
    rows.iter().for_each(|(label, value)| {
        let box_top = y - BOX_GAP;
        let box_bottom = box_top - SUMMARY_BOX_HEIGHT;
        render_rect(box_left, box_top, RIGHT.0, box_bottom, layer);
        let baseline = Mm(box_bottom + PADDING + 0.5);
        layer.use_text(label, FONT_SIZE.0, Mm(box_left + PADDING), baseline, &fonts.bold);
        let value_str = value.to_str();
        layer.use_text(
            value_str,
            FONT_SIZE.0,
            right_aligned_x(RIGHT.0 - PADDING, value_str, FONT_SIZE, true),
            baseline,
            &fonts.bold,
        );
        y = box_bottom;
    });
    Mm(y)
}

fn render_note(note: &str, layer: &PdfLayerReference, fonts: &Fonts, top: Mm) -> Mm {
    if note.trim().is_empty() {
        return top;
    }
    let box_top = top.0 - BOX_GAP;
    let box_bottom = box_top - NOTE_BOX_HEIGHT;
    render_rect(LEFT.0, box_top, LEFT.0 + NOTE_BOX_WIDTH, box_bottom, layer);

    let mut y = box_top - 5.0;
    layer.use_text(
        format!("{}:", Messages::Note),
        FONT_SIZE.0,
        Mm(LEFT.0 + PADDING),
        Mm(y),
        &fonts.bold,
    );
    let lines = note_lines(note);
    if lines.len() > NOTE_MAX_LINES {
        warn!(
            "note has {} lines, only the first {} fit into the box",
            lines.len(),
            NOTE_MAX_LINES
        );
    }
    lines.iter().take(NOTE_MAX_LINES).for_each(|line| {
        y -= DESCRIPTION_LINE_HEIGHT + 0.5;
        layer.use_text(
            line,
            SMALL_FONT_SIZE.0,
            Mm(LEFT.0 + PADDING),
            Mm(y),
            &fonts.regular,
        );
    });
    Mm(box_bottom)
}

fn note_lines(note: &str) -> Vec<String> {
    wrap_text(note.trim(), NOTE_BOX_WIDTH - 2.0 * PADDING, SMALL_FONT_SIZE)
}

fn render_signatures(layer: &PdfLayerReference, fonts: &Fonts) {
    let left_start = LEFT.0 + 5.0;
    let right_start = RIGHT.0 - 5.0 - SIGNATURE_WIDTH;
    [
        (left_start, Messages::CustomerSignature.msg()),
        (right_start, Messages::AuthorizedSignature.msg()),
    ]
    .iter()
    .for_each(|(x, caption)| {
        render_horizontal_line(*x, x + SIGNATURE_WIDTH, SIGNATURE_Y.0, layer);
        layer.use_text(
            *caption,
            SMALL_FONT_SIZE.0,
            centered_x(*x, SIGNATURE_WIDTH, caption, SMALL_FONT_SIZE, false),
            Mm(SIGNATURE_Y.0 - 5.0),
            &fonts.regular,
        );
    });
}

fn render_horizontal_line(from: f32, to: f32, y: f32, layer: &PdfLayerReference) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(from), Mm(y)), false),
            (Point::new(Mm(to), Mm(y)), false),
        ],
        is_closed: false,
    });
}

fn render_vertical_line(x: f32, from: f32, to: f32, layer: &PdfLayerReference) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(x), Mm(from)), false),
            (Point::new(Mm(x), Mm(to)), false),
        ],
        is_closed: false,
    });
}

fn render_rect(left: f32, top: f32, right: f32, bottom: f32, layer: &PdfLayerReference) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(left), Mm(top)), false),
            (Point::new(Mm(right), Mm(top)), false),
            (Point::new(Mm(right), Mm(bottom)), false),
            (Point::new(Mm(left), Mm(bottom)), false),
        ],
        is_closed: true,
    });
}
