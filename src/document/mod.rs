use crate::{
    AppContext, DATE_FORMAT, Event, State,
    config::Config,
    data::{CustomerEntry, Document, DocumentType, ProductEntry},
    messages::Messages,
    pricing::{self, DocumentAmounts, DocumentInput, LineItemInput, Totals},
    ui::{self, autosuggest::AutoSuggest, render_errors, render_field_errors},
    util::{
        self,
        export::document::create_document_pdf,
        files::with_pdf_extension,
        validation::{Field, ValidationResult},
    },
};
use chrono::NaiveDate;
use eframe::egui::{Context, Grid, RichText, SelectableLabel, TextEdit, Ui};
use egui_extras::{Size, StripBuilder};
use egui_extras_datepicker_fork::DatePickerButton;
use egui_file::FileDialog;
use log::info;
use std::path::{Path, PathBuf};
use uuid::Uuid;

mod items_table;

fn export_pdf(
    ctx: &Context,
    path: &Path,
    config: &Config,
    app_context: &AppContext,
    document: &Document,
) {
    match create_document_pdf(path, document, &config.shop) {
        Ok(()) => {
            util::send_info_notification(&app_context.gui_event_sender, Messages::PDFCreated);
            if let Some(ref command) = config.file_open_command {
                util::send_event_and_request_repaint(
                    ctx,
                    &app_context.background_event_sender,
                    Event::OpenFile(path.to_path_buf(), command.clone()),
                );
            }
        }
        Err(e) => {
            log::error!("PDF was not created: {}", e);
            util::send_error_notification(&app_context.gui_event_sender, Messages::PDFNotCreated);
        }
    }
}

#[derive(Debug)]
pub(crate) struct DocumentState {
    document_type: DocumentType,
    date: NaiveDate,
    date_field: String,
    customer_name: String,
    customer_mobile: String,
    advance: String,
    discount: String,
    tax_rate: String,
    note: String,
    items: Vec<Item>,
    item_to_add: Item,
    validation: ValidationResult,
    item_validation: ValidationResult,
    export_state: ExportState,
    customer_suggest: AutoSuggest,
    product_suggest: AutoSuggest,
}

#[derive(Debug)]
struct ExportState {
    open_file_dialog: Option<FileDialog>,
    selected_path: Option<PathBuf>,
}

impl ExportState {
    fn new() -> Self {
        Self {
            open_file_dialog: None,
            selected_path: None,
        }
    }
}

/// An item in the form, kept as typed until the document is computed.
#[derive(Debug, Clone)]
pub(crate) struct Item {
    id: Uuid,
    input: LineItemInput,
}

impl Default for Item {
    fn default() -> Self {
        Self {
            id: Uuid::now_v7(),
            input: LineItemInput::default(),
        }
    }
}

impl DocumentState {
    pub(crate) fn new() -> Self {
        let now = chrono::Local::now().date_naive();
        Self {
            document_type: DocumentType::Invoice,
            date: now,
            date_field: now.format(DATE_FORMAT).to_string(),
            customer_name: String::default(),
            customer_mobile: String::default(),
            advance: String::default(),
            discount: String::default(),
            tax_rate: String::default(),
            note: String::default(),
            items: vec![],
            item_to_add: Item::default(),
            validation: ValidationResult::new(),
            item_validation: ValidationResult::new(),
            export_state: ExportState::new(),
            customer_suggest: AutoSuggest::new(),
            product_suggest: AutoSuggest::new(),
        }
    }

    fn item_inputs(&self) -> Vec<LineItemInput> {
        self.items.iter().map(|i| i.input.clone()).collect()
    }

    fn validate(&self) -> ValidationResult {
        let mut validation_result = ValidationResult::new();
        if NaiveDate::parse_from_str(self.date_field.trim(), DATE_FORMAT).is_err() {
            validation_result.add_error(Field::Date, Messages::DateNotValid.msg().to_owned());
        }
        validation_result
    }

    /// Validates the form and computes the document to export.
    pub(crate) fn to_document(&self) -> Result<Document, ValidationResult> {
        let mut validation_result = self.validate();
        let date = NaiveDate::parse_from_str(self.date_field.trim(), DATE_FORMAT)
            .unwrap_or(self.date);
        let items = self.item_inputs();
        let computed = pricing::compute_document(&DocumentInput {
            document_type: self.document_type,
            customer_name: &self.customer_name,
            customer_mobile: &self.customer_mobile,
            date,
            advance: &self.advance,
            discount: &self.discount,
            tax_rate: &self.tax_rate,
            note: &self.note,
            items: &items,
        });
        match computed {
            Ok(document) if validation_result.is_ok() => Ok(document),
            Ok(_) => Err(validation_result),
            Err(errors) => {
                validation_result.merge(errors);
                Err(validation_result)
            }
        }
    }

    /// Totals of the items so far, not validated yet.
    pub(crate) fn preview(&self) -> Totals {
        let items: Vec<_> = self.items.iter().map(|i| i.input.normalize()).collect();
        let (_, grand_total) = pricing::compute_items(&items);
        pricing::compute_totals(
            self.document_type,
            grand_total,
            &DocumentAmounts::parse(&self.advance, &self.discount, &self.tax_rate),
        )
    }

    pub(crate) fn fill_customer(&mut self, customer: &CustomerEntry) {
        self.customer_name = customer.name.clone();
        self.customer_mobile = customer.mobile.clone();
    }

    /// Takes over rate and, unless already typed, description of a product.
    pub(crate) fn fill_product(&mut self, product: &ProductEntry) {
        let input = &mut self.item_to_add.input;
        input.title = product.name.clone();
        input.rate = product.rate.normalize().to_string();
        if input.description.trim().is_empty() {
            input.description = product.description.clone();
        }
        self.item_validation.clear_for_field(&Field::Title);
    }

    /// Adds the item in the form, or replaces it if it's being edited.
    pub(crate) fn save_item(&mut self) {
        self.item_validation = self.item_to_add.input.validate();
        if !self.item_validation.is_ok() {
            return;
        }
        match self.items.iter_mut().find(|i| i.id == self.item_to_add.id) {
            Some(item) => {
                *item = self.item_to_add.clone();
            }
            None => self.items.push(self.item_to_add.clone()),
        }
        self.item_to_add = Item::default();
        self.validation.clear_for_field(&Field::Items);
    }

    pub(crate) fn clear(&mut self) {
        *self = DocumentState::new();
    }
}

pub(crate) fn build(
    ctx: &Context,
    state: &mut State,
    config: &Config,
    app_context: &AppContext,
    ui: &mut Ui,
) {
    ui.label(RichText::new(Messages::CreateNewDocument).strong());
    ui.separator();
    StripBuilder::new(ui)
        .size(Size::relative(0.5))
        .size(Size::remainder())
        .horizontal(|mut strip| {
            strip.cell(|ui| {
                build_metadata(state, ui);
            });
            strip.cell(|ui| {
                build_item_form(state, ui);
            });
        });
    ui.separator();
    ui.label(RichText::new(Messages::Items).strong());
    items_table::build(&mut state.document, ui);
    render_errors(&Field::Items, &state.document.validation, ui);
    ui.separator();
    build_totals(&state.document, ui);
    ui.separator();
    build_export(ctx, state, config, app_context, ui);
}

fn build_metadata(state: &mut State, ui: &mut Ui) {
    let document = &mut state.document;
    Grid::new("document_metadata_grid")
        .num_columns(2)
        .min_col_width(70.0)
        .show(ui, |ui| {
            ui.label(Messages::DocumentType);
            ui.horizontal(|ui| {
                [DocumentType::Invoice, DocumentType::Quotation]
                    .iter()
                    .for_each(|document_type| {
                        if ui
                            .add(SelectableLabel::new(
                                document.document_type == *document_type,
                                *document_type,
                            ))
                            .clicked()
                        {
                            document.document_type = *document_type;
                        }
                    });
            });
            ui.end_row();
            ui.label(Messages::Date);
            ui.horizontal(|ui| {
                if ui
                    .add(TextEdit::singleline(&mut document.date_field).desired_width(65.0))
                    .changed()
                {
                    document.validation.clear_for_field(&Field::Date);
                }
                let date_response = ui.add(
                    DatePickerButton::new(&mut document.date)
                        .id_salt("document_date")
                        .calendar_week(false)
                        .save_button_text(Messages::Save.msg())
                        .cancel_button_text(Messages::Cancel.msg())
                        .show_icon(true)
                        .day_names(Messages::days())
                        .month_names(Messages::months())
                        .highlight_weekends(false),
                );
                if date_response.changed() {
                    document.date_field = document.date.format(DATE_FORMAT).to_string();
                    document.validation.clear_for_field(&Field::Date);
                }
            });
            render_field_errors(&Field::Date, &document.validation, ui);
            ui.end_row();
            ui.label(Messages::Customer);
            let names: Vec<String> = state
                .customers
                .entries
                .iter()
                .map(|c| c.name.clone())
                .collect();
            let suggestion = document
                .customer_suggest
                .ui(ui, &mut document.customer_name, &names);
            if let Some(customer) = suggestion.picked.and_then(|idx| state.customers.entries.get(idx)) {
                info!("customer {} picked", customer.id);
                document.fill_customer(customer);
            }
            ui.end_row();
            ui.label(Messages::Mobile);
            ui.text_edit_singleline(&mut document.customer_mobile);
            ui.end_row();
            if document.document_type.has_payment_boxes() {
                ui.label(Messages::Advance);
                if ui.text_edit_singleline(&mut document.advance).changed() {
                    document.validation.clear_for_field(&Field::Advance);
                }
                render_field_errors(&Field::Advance, &document.validation, ui);
                ui.end_row();
            }
            ui.label(Messages::Discount);
            if ui.text_edit_singleline(&mut document.discount).changed() {
                document.validation.clear_for_field(&Field::Discount);
            }
            render_field_errors(&Field::Discount, &document.validation, ui);
            ui.end_row();
            ui.label(Messages::TaxRate);
            if ui.text_edit_singleline(&mut document.tax_rate).changed() {
                document.validation.clear_for_field(&Field::TaxRate);
            }
            render_field_errors(&Field::TaxRate, &document.validation, ui);
            ui.end_row();
            ui.label(Messages::Note);
            ui.text_edit_multiline(&mut document.note);
            ui.end_row();
        });
}

fn build_item_form(state: &mut State, ui: &mut Ui) {
    let document = &mut state.document;
    Grid::new("document_item_grid")
        .num_columns(2)
        .min_col_width(70.0)
        .show(ui, |ui| {
            ui.label(RichText::new(Messages::NewItem).strong());
            ui.end_row();
            ui.label(Messages::Title);
            let names: Vec<String> = state
                .products
                .entries
                .iter()
                .map(|p| p.name.clone())
                .collect();
            let suggestion =
                document
                    .product_suggest
                    .ui(ui, &mut document.item_to_add.input.title, &names);
            if suggestion.response.changed() {
                document.item_validation.clear_for_field(&Field::Title);
            }
            if let Some(product) = suggestion.picked.and_then(|idx| state.products.entries.get(idx)) {
                info!("product {} picked", product.id);
                document.fill_product(product);
            }
            render_field_errors(&Field::Title, &document.item_validation, ui);
            ui.end_row();
            ui.label(Messages::Description);
            ui.text_edit_multiline(&mut document.item_to_add.input.description);
            ui.end_row();

            let input = &mut document.item_to_add.input;
            let mut measure_changed = false;
            ui.label(Messages::SquareFeet);
            measure_changed |= ui.text_edit_singleline(&mut input.feet).changed();
            ui.end_row();
            ui.label(Messages::Qty);
            measure_changed |= ui.text_edit_singleline(&mut input.quantity).changed();
            ui.end_row();
            ui.label(Messages::Rate);
            ui.text_edit_singleline(&mut input.rate);
            ui.end_row();
            ui.label(Messages::ManualTotal);
            measure_changed |= ui.text_edit_singleline(&mut input.manual_total).changed();
            if measure_changed {
                document.item_validation.clear_for_field(&Field::Measure);
            }
            render_field_errors(&Field::Measure, &document.item_validation, ui);
            ui.end_row();
            ui.label(Messages::Total);
            ui.label(pricing::compute_item(&document.item_to_add.input.normalize()).total);
            ui.end_row();
            ui.horizontal(|ui| {
                if ui.button(Messages::Save).clicked() {
                    document.save_item();
                }
                if ui.button(Messages::Clear).clicked() {
                    document.item_to_add = Item::default();
                    document.item_validation = ValidationResult::new();
                }
            });
            ui.end_row();
        });
}

fn build_totals(document: &DocumentState, ui: &mut Ui) {
    let totals = document.preview();
    Grid::new("document_totals_grid")
        .num_columns(2)
        .min_col_width(70.0)
        .show(ui, |ui| {
            ui.strong(Messages::GrandTotal);
            ui.strong(&totals.grand_total);
            ui.end_row();
            if let Some(ref adjustment) = totals.adjustment {
                ui.label(Messages::Discount);
                ui.label(&adjustment.discount);
                ui.end_row();
                ui.label(format!("{} ({}%)", Messages::Tax, adjustment.tax_rate.normalize()));
                ui.label(&adjustment.tax);
                ui.end_row();
                ui.strong(Messages::NetTotal);
                ui.strong(&adjustment.net_total);
                ui.end_row();
            }
            if let Some(ref payment) = totals.payment {
                ui.label(Messages::Advance);
                ui.label(&payment.advance);
                ui.end_row();
                ui.strong(Messages::Due);
                ui.strong(&payment.due);
                ui.end_row();
            }
        });
}

fn build_export(
    ctx: &Context,
    state: &mut State,
    config: &Config,
    app_context: &AppContext,
    ui: &mut Ui,
) {
    ui.horizontal(|ui| {
        if ui.button(Messages::Export).clicked() {
            match state.document.to_document() {
                Ok(_) => {
                    state.document.validation = ValidationResult::new();
                    let mut dialog = ui::get_pdf_save_dialog(
                        state.file_picker_startpoint.clone(),
                        state.document.document_type,
                    );
                    dialog.open();
                    state.document.export_state.open_file_dialog = Some(dialog);
                }
                Err(validation) => {
                    state.document.validation = validation;
                }
            }
        }
        if ui.button(Messages::Clear).clicked() {
            state.document.clear();
        }
        let selected_file = match &mut state.document.export_state.open_file_dialog {
            Some(dialog) => {
                if dialog.show(ctx).selected() {
                    dialog.path().map(with_pdf_extension)
                } else {
                    None
                }
            }
            None => None,
        };
        if let Some(path_buf) = selected_file {
            state.file_picker_startpoint = path_buf.parent().map(|parent| parent.to_path_buf());
            state.document.export_state.selected_path = Some(path_buf);
        }
        if let Some(path_buf) = state.document.export_state.selected_path.take() {
            state.document.export_state.open_file_dialog = None;
            match state.document.to_document() {
                Ok(document) => export_pdf(ctx, &path_buf, config, app_context, &document),
                Err(validation) => state.document.validation = validation,
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn item(title: &str, feet: &str, quantity: &str, rate: &str) -> Item {
        Item {
            id: Uuid::now_v7(),
            input: LineItemInput {
                title: title.to_owned(),
                feet: feet.to_owned(),
                quantity: quantity.to_owned(),
                rate: rate.to_owned(),
                ..LineItemInput::default()
            },
        }
    }

    fn filled_state() -> DocumentState {
        let mut state = DocumentState::new();
        state.customer_name = String::from("Rahim");
        state.date_field = String::from("01.05.2024");
        state.advance = String::from("500");
        state.items = vec![item("Window", "10", "", "50"), item("Door", "", "3", "500")];
        state
    }

    #[test]
    fn computes_document_from_form() {
        let document = filled_state().to_document().unwrap();
        assert_eq!(document.date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(document.grand_total.value, Decimal::from(2000));
        assert_eq!(
            document.payment.map(|p| p.due.value),
            Some(Decimal::from(1500))
        );
    }

    #[test]
    fn invalid_date_rejects_export() {
        let mut state = filled_state();
        state.date_field = String::from("2024-05-01");
        let errors = state.to_document().unwrap_err();
        assert!(errors.get_errors(&Field::Date).is_some());
    }

    #[test]
    fn empty_form_collects_all_errors() {
        let mut state = DocumentState::new();
        state.date_field = String::from("nope");
        let errors = state.to_document().unwrap_err();
        assert!(errors.get_errors(&Field::Date).is_some());
        assert!(errors.get_errors(&Field::Items).is_some());
    }

    #[test]
    fn preview_follows_document_type() {
        let mut state = filled_state();
        let totals = state.preview();
        assert_eq!(totals.grand_total.value, Decimal::from(2000));
        assert_eq!(totals.payment.map(|p| p.advance.value), Some(Decimal::from(500)));

        state.document_type = DocumentType::Quotation;
        let totals = state.preview();
        assert_eq!(totals.grand_total.value, Decimal::from(2000));
        assert!(totals.payment.is_none());
    }

    #[test]
    fn discount_and_tax_reach_the_document() {
        let mut state = filled_state();
        state.discount = String::from("1000");
        state.tax_rate = String::from("10");
        let totals = state.preview();
        assert_eq!(totals.payable().value, Decimal::from(1100));

        let document = state.to_document().unwrap();
        assert_eq!(
            document.adjustment.map(|a| a.tax.value),
            Some(Decimal::from(100))
        );
        assert_eq!(document.payment.map(|p| p.due.value), Some(Decimal::from(600)));

        state.tax_rate = String::from("150");
        let errors = state.to_document().unwrap_err();
        assert!(errors.get_errors(&Field::TaxRate).is_some());
    }

    #[test]
    fn save_item_adds_and_replaces() {
        let mut state = DocumentState::new();
        state.item_to_add = item("Window", "10", "", "50");
        state.save_item();
        assert_eq!(state.items.len(), 1);
        assert!(state.item_to_add.input.title.is_empty());

        // edit the saved item
        state.item_to_add = state.items[0].clone();
        state.item_to_add.input.rate = String::from("60");
        state.save_item();
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].input.rate, "60");
    }

    #[test]
    fn invalid_item_is_not_saved() {
        let mut state = DocumentState::new();
        state.item_to_add = item("", "", "", "50");
        state.save_item();
        assert!(state.items.is_empty());
        assert!(state.item_validation.get_errors(&Field::Title).is_some());
        assert!(state.item_validation.get_errors(&Field::Measure).is_some());
    }

    #[test]
    fn picking_entries_fills_the_form() {
        let mut state = DocumentState::new();
        let customer = CustomerEntry::new("Karim".into(), "01811111111".into(), String::default());
        state.fill_customer(&customer);
        assert_eq!(state.customer_mobile, "01811111111");

        let product = ProductEntry::new(
            "Sliding Window".into(),
            "5mm glass".into(),
            "sq.ft".into(),
            Decimal::new(5500, 2),
        );
        state.fill_product(&product);
        assert_eq!(state.item_to_add.input.title, "Sliding Window");
        assert_eq!(state.item_to_add.input.rate, "55");
        assert_eq!(state.item_to_add.input.description, "5mm glass");

        // a typed description is kept
        state.item_to_add.input.description = String::from("tinted");
        state.fill_product(&product);
        assert_eq!(state.item_to_add.input.description, "tinted");
    }
}
