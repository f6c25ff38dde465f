use crate::{
    AppContext, Event,
    data::CustomerEntry,
    messages::Messages,
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
use uuid::Uuid;

const ROW_HEIGHT: f32 = 30.0;

#[derive(Debug)]
pub(crate) struct CustomersState {
    pub(crate) entries: Vec<CustomerEntry>,
    form: CustomerForm,
    validation: ValidationResult,
    delete_dialog: Option<Dialog<Uuid>>,
}

#[derive(Debug, Default)]
struct CustomerForm {
    /// set while an existing customer is edited
    id: Option<Uuid>,
    name: String,
    mobile: String,
    address: String,
}

impl CustomerForm {
    fn validate(&self) -> ValidationResult {
        let mut validation_result = ValidationResult::new();
        if self.name.trim().is_empty() {
            validation_result.add_error(
                Field::Name,
                format!("{} {}", Messages::Name, Messages::CanNotBeEmpty),
            );
        }
        validation_result
    }

    fn to_entry(&self) -> CustomerEntry {
        let entry = CustomerEntry::new(
            self.name.trim().to_owned(),
            self.mobile.trim().to_owned(),
            self.address.trim().to_owned(),
        );
        match self.id {
            Some(id) => CustomerEntry { id, ..entry },
            None => entry,
        }
    }
}

impl From<&CustomerEntry> for CustomerForm {
    fn from(entry: &CustomerEntry) -> Self {
        Self {
            id: Some(entry.id),
            name: entry.name.clone(),
            mobile: entry.mobile.clone(),
            address: entry.address.clone(),
        }
    }
}

impl CustomersState {
    pub(crate) fn new() -> Self {
        Self {
            entries: vec![],
            form: CustomerForm::default(),
            validation: ValidationResult::new(),
            delete_dialog: None,
        }
    }

    /// Validates the form, returns the event storing it and resets the form.
    fn take_entry(&mut self) -> Option<Event> {
        self.validation = self.form.validate();
        if !self.validation.is_ok() {
            return None;
        }
        let entry = self.form.to_entry();
        let event = if self.form.id.is_some() {
            Event::UpdateCustomer(entry)
        } else {
            Event::SaveCustomer(entry)
        };
        self.form = CustomerForm::default();
        Some(event)
    }

    fn edit(&mut self, idx: usize) {
        if let Some(entry) = self.entries.get(idx) {
            info!("editing customer {}", entry.id);
            self.form = CustomerForm::from(entry);
            self.validation = ValidationResult::new();
        }
    }

    fn cancel_edit(&mut self) {
        self.form = CustomerForm::default();
        self.validation = ValidationResult::new();
    }
}

pub(crate) fn build(
    ctx: &Context,
    state: &mut CustomersState,
    app_context: &AppContext,
    ui: &mut Ui,
) {
    let heading = if state.form.id.is_some() {
        Messages::EditCustomer
    } else {
        Messages::NewCustomer
    };
    ui.label(RichText::new(heading).strong());
    Grid::new("customer_add_grid")
        .num_columns(2)
        .min_col_width(70.0)
        .show(ui, |ui| {
            ui.label(Messages::Name);
            if ui.text_edit_singleline(&mut state.form.name).changed() {
                state.validation.clear_for_field(&Field::Name);
            }
            render_field_errors(&Field::Name, &state.validation, ui);
            ui.end_row();
            ui.label(Messages::Mobile);
            ui.text_edit_singleline(&mut state.form.mobile);
            ui.end_row();
            ui.label(Messages::Address);
            ui.text_edit_singleline(&mut state.form.address);
            ui.end_row();
            let editing = state.form.id.is_some();
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
    ui.label(RichText::new(Messages::Customers).strong());
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
                    Event::RemoveCustomer(dialog.subject),
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

fn build_table(state: &mut CustomersState, ui: &mut Ui) {
    let mut to_edit: Option<usize> = None;
    TableBuilder::new(ui)
        .striped(true)
        .max_scroll_height(400.0)
        .auto_shrink(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::initial(200.0).clip(true))
        .column(Column::exact(120.0))
        .column(Column::remainder().clip(true))
        .column(Column::auto())
        .column(Column::auto())
        .header(ROW_HEIGHT, |mut header| {
            header.col(|ui| {
                ui.strong(Messages::Name);
            });
            header.col(|ui| {
                ui.strong(Messages::Mobile);
            });
            header.col(|ui| {
                ui.strong(Messages::Address);
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
                    ui.label(&entry.mobile);
                });
                row.col(|ui| {
                    ui.label(&entry.address);
                });
                row.col(|ui| {
                    if ui.button(Messages::Edit.msg()).clicked() {
                        to_edit = Some(row_index);
                    }
                });
                row.col(|ui| {
                    if ui.button(Messages::Delete.msg()).clicked() {
                        info!("delete clicked on customer {}", entry.id);
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

    #[test]
    fn name_is_required() {
        let mut state = CustomersState::new();
        state.form.mobile = String::from("01711111111");
        assert!(state.take_entry().is_none());
        assert!(state.validation.get_errors(&Field::Name).is_some());
        // form is kept for correction
        assert_eq!(state.form.mobile, "01711111111");
    }

    #[test]
    fn valid_form_becomes_entry() {
        let mut state = CustomersState::new();
        state.form.name = String::from("  Rahim Uddin ");
        state.form.mobile = String::from("01711111111");
        match state.take_entry() {
            Some(Event::SaveCustomer(entry)) => {
                assert_eq!(entry.name, "Rahim Uddin");
                assert_eq!(entry.mobile, "01711111111");
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert!(state.form.name.is_empty());
        assert!(state.validation.is_ok());
    }

    #[test]
    fn edited_customer_keeps_its_id() {
        let mut state = CustomersState::new();
        let karim = CustomerEntry::new("Karim".into(), "01811111111".into(), "Mirpur".into());
        state.entries = vec![karim.clone()];
        state.edit(0);
        assert_eq!(state.form.address, "Mirpur");

        state.form.name = String::from("Karim Ahmed");
        match state.take_entry() {
            Some(Event::UpdateCustomer(entry)) => {
                assert_eq!(entry.id, karim.id);
                assert_eq!(entry.name, "Karim Ahmed");
                assert_eq!(entry.mobile, "01811111111");
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert!(state.form.id.is_none());
    }

    #[test]
    fn cancelling_an_edit_resets_the_form() {
        let mut state = CustomersState::new();
        state.entries = vec![CustomerEntry::new("Karim".into(), String::default(), String::default())];
        state.edit(0);
        state.edit(5);
        assert!(state.form.id.is_some());
        state.cancel_edit();
        assert!(state.form.id.is_none());
        assert!(state.form.name.is_empty());
    }
}
