use crate::{
    AppContext, Event,
    data::{ProductEntry, currency::CurrencyValue},
    messages::Messages,
    pricing::lenient_decimal,
    ui::{
        dialog::{self, Dialog, DialogResponse},
        render_field_errors,
    },
    util::{
        self,
        validation::{Field, ValidationResult},
    },
};
use eframe::egui::{Align, Context, Grid, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use log::info;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

const ROW_HEIGHT: f32 = 30.0;

#[derive(Debug)]
pub(crate) struct ProductsState {
    pub(crate) entries: Vec<ProductEntry>,
    form: ProductForm,
    validation: ValidationResult,
    delete_dialog: Option<Dialog<Uuid>>,
}

#[derive(Debug, Default)]
struct ProductForm {
    id: Option<Uuid>,
    name: String,
    description: String,
    unit: String,
    rate: String,
}

impl ProductForm {
    fn validate(&self) -> ValidationResult {
        let mut validation_result = ValidationResult::new();
        if self.name.trim().is_empty() {
            validation_result.add_error(
                Field::Name,
                format!("{} {}", Messages::Name, Messages::CanNotBeEmpty),
            );
        }
        // an empty rate is fine, the rate is then typed per document
        let rate = self.rate.trim();
        if !rate.is_empty() && !Decimal::from_str(rate).is_ok_and(|r| r.is_sign_positive()) {
            validation_result.add_error(
                Field::Rate,
                format!("{} {}", Messages::Rate, Messages::NotANumber),
            );
        }
        validation_result
    }

    fn to_entry(&self) -> ProductEntry {
        let entry = ProductEntry::new(
            self.name.trim().to_owned(),
            self.description.trim_end().to_owned(),
            self.unit.trim().to_owned(),
            lenient_decimal(&self.rate),
        );
        match self.id {
            Some(id) => ProductEntry { id, ..entry },
            None => entry,
        }
    }
}

impl From<&ProductEntry> for ProductForm {
    fn from(entry: &ProductEntry) -> Self {
        Self {
            id: Some(entry.id),
            name: entry.name.clone(),
            description: entry.description.clone(),
            unit: entry.unit.clone(),
            rate: if entry.rate.is_zero() {
                String::default()
            } else {
                entry.rate.normalize().to_string()
            },
        }
    }
}

impl ProductsState {
    pub(crate) fn new() -> Self {
        Self {
            entries: vec![],
            form: ProductForm::default(),
            validation: ValidationResult::new(),
            delete_dialog: None,
        }
    }

    fn take_entry(&mut self) -> Option<Event> {
        self.validation = self.form.validate();
        if !self.validation.is_ok() {
            return None;
        }
        let entry = self.form.to_entry();
        let event = match self.form.id {
            Some(_) => Event::UpdateProduct(entry),
            None => Event::SaveProduct(entry),
        };
        self.form = ProductForm::default();
        Some(event)
    }

    fn edit(&mut self, idx: usize) {
        if let Some(entry) = self.entries.get(idx) {
            info!("editing product {}", entry.id);
            self.form = ProductForm::from(entry);
            self.validation = ValidationResult::new();
        }
    }

    fn cancel_edit(&mut self) {
        self.form = ProductForm::default();
        self.validation = ValidationResult::new();
    }
}

pub(crate) fn build(ctx: &Context, state: &mut ProductsState, app_context: &AppContext, ui: &mut Ui) {
    let editing = state.form.id.is_some();
    ui.label(
        RichText::new(if editing {
            Messages::EditProduct
        } else {
            Messages::NewProduct
        })
        .strong(),
    );
    Grid::new("product_add_grid")
        .num_columns(2)
        .min_col_width(70.0)
        .show(ui, |ui| {
            ui.label(Messages::Name);
            if ui.text_edit_singleline(&mut state.form.name).changed() {
                state.validation.clear_for_field(&Field::Name);
            }
            render_field_errors(&Field::Name, &state.validation, ui);
            ui.end_row();
            ui.label(Messages::Description);
            ui.text_edit_multiline(&mut state.form.description);
            ui.end_row();
            ui.label(Messages::Unit);
            ui.text_edit_singleline(&mut state.form.unit);
            ui.end_row();
            ui.label(Messages::Rate);
            if ui.text_edit_singleline(&mut state.form.rate).changed() {
                state.validation.clear_for_field(&Field::Rate);
            }
            render_field_errors(&Field::Rate, &state.validation, ui);
            ui.end_row();
            ui.horizontal(|ui| {
                let label = if editing { Messages::Save } else { Messages::Add };
                if ui.button(label).clicked() {
                    if let Some(event) = state.take_entry() {
                        util::send_event_and_request_repaint(
                            ctx,
                            &app_context.background_event_sender,
                            event,
                        );
                    }
                }
                if editing && ui.button(Messages::Cancel).clicked() {
                    state.cancel_edit();
                }
            });
            ui.end_row();
        });
    ui.separator();
    ui.label(RichText::new(Messages::Products).strong());
    if state.entries.is_empty() {
        ui.label(Messages::NoEntries);
    } else {
        build_table(state, ui);
    }

    if let Some(ref dialog) = state.delete_dialog {
        match dialog::render_dialog(ctx, dialog) {
            DialogResponse::Ok => {
                util::send_event_and_request_repaint(
                    ctx,
                    &app_context.background_event_sender,
                    Event::RemoveProduct(dialog.subject),
                );
                state.delete_dialog = None;
            }
            DialogResponse::Cancel => {
                state.delete_dialog = None;
            }
            DialogResponse::None => (),
        }
    }
}

fn build_table(state: &mut ProductsState, ui: &mut Ui) {
    let mut to_edit = None;
    TableBuilder::new(ui)
        .striped(true)
        .max_scroll_height(400.0)
        .auto_shrink(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::initial(180.0).clip(true))
        .column(Column::remainder().clip(true))
        .column(Column::exact(60.0))
        .column(Column::exact(100.0))
        .column(Column::auto())
        .column(Column::auto())
        .header(ROW_HEIGHT, |mut header| {
            [
                Messages::Name,
                Messages::Description,
                Messages::Unit,
                Messages::Rate,
            ]
            .into_iter()
            .for_each(|label| {
                header.col(|ui| {
                    ui.strong(label);
                });
            });
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, state.entries.len(), |mut row| {
                let row_index = row.index();
                let entry = &state.entries[row_index];
                row.col(|ui| {
                    ui.label(&entry.name);
                });
                row.col(|ui| {
                    ui.label(entry.description.lines().next().unwrap_or_default())
                        .on_hover_text(&entry.description);
                });
                row.col(|ui| {
                    ui.label(&entry.unit);
                });
                row.col(|ui| {
                    ui.label(CurrencyValue::new_from_decimal(entry.rate).to_cell_str());
                });
                row.col(|ui| {
                    if ui.button(Messages::Edit.msg()).clicked() {
                        to_edit = Some(row_index);
                    }
                });
                row.col(|ui| {
                    if ui.button(Messages::Delete.msg()).clicked() {
                        info!("delete clicked on product {}", entry.id);
                        state.delete_dialog = Some(Dialog::new(
                            format!("{}\n{}", Messages::ReallyDelete, entry.name),
                            Messages::Delete.msg(),
                            Messages::Cancel.msg(),
                            entry.id,
                        ));
                    }
                });
            });
        });
    if let Some(idx) = to_edit {
        state.edit(idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, rate: &str) -> ProductForm {
        ProductForm {
            name: name.to_owned(),
            rate: rate.to_owned(),
            ..ProductForm::default()
        }
    }

    #[test]
    fn rate_must_be_a_number_if_given() {
        assert!(form("Door", "").validate().is_ok());
        assert!(form("Door", "120.5").validate().is_ok());
        assert!(form("Door", "abc").validate().get_errors(&Field::Rate).is_some());
        assert!(form("Door", "-5").validate().get_errors(&Field::Rate).is_some());
    }

    #[test]
    fn name_is_required() {
        let result = form(" ", "10").validate();
        assert!(result.get_errors(&Field::Name).is_some());
        assert!(result.get_errors(&Field::Rate).is_none());
    }

    #[test]
    fn valid_form_becomes_entry() {
        let mut state = ProductsState::new();
        state.form = ProductForm {
            id: None,
            name: String::from("Sliding Window "),
            description: String::from("5mm glass\n2 tracks\n"),
            unit: String::from("sq.ft"),
            rate: String::from("55"),
        };
        let Some(Event::SaveProduct(entry)) = state.take_entry() else {
            panic!("expected a new product");
        };
        assert_eq!(entry.name, "Sliding Window");
        assert_eq!(entry.description, "5mm glass\n2 tracks");
        assert_eq!(entry.rate, Decimal::from(55));
        assert!(state.form.name.is_empty());
    }

    #[test]
    fn edited_product_keeps_its_id() {
        let door = ProductEntry::new(
            "Door".into(),
            "Thai profile".into(),
            "sq.ft".into(),
            Decimal::new(4250, 2),
        );
        let mut state = ProductsState::new();
        state.entries = vec![door.clone()];
        state.edit(0);
        assert_eq!(state.form.rate, "42.5");
        assert_eq!(state.form.description, "Thai profile");

        state.form.name = String::from("Swing Door");
        let Some(Event::UpdateProduct(entry)) = state.take_entry() else {
            panic!("expected an update");
        };
        assert_eq!(entry.id, door.id);
        assert_eq!(entry.name, "Swing Door");
        assert_eq!(entry.rate, Decimal::new(425, 1));
        assert!(state.form.id.is_none());
    }

    #[test]
    fn invalid_edit_stays_in_the_form() {
        let mut state = ProductsState::new();
        state.entries = vec![ProductEntry::new("Door".into(), String::default(), String::default(), Decimal::ZERO)];
        state.edit(0);
        assert!(state.form.rate.is_empty());
        state.form.rate = String::from("abc");
        assert!(state.take_entry().is_none());
        assert!(state.form.id.is_some());
        state.cancel_edit();
        assert!(state.form.id.is_none());
        assert!(state.validation.is_ok());
    }
}
