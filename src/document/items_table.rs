use super::DocumentState;
use crate::{
    data::currency::{CurrencyValue, format_measure},
    messages::Messages,
    pricing::compute_item,
};
use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};
use log::info;

const ROW_HEIGHT: f32 = 30.0;

pub(super) fn build(state: &mut DocumentState, ui: &mut Ui) {
    let mut item_to_remove: Option<usize> = None;
    let table = TableBuilder::new(ui)
        .striped(true)
        .max_scroll_height(250.0)
        .min_scrolled_height(100.0)
        .auto_shrink(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::exact(30.0))
        .column(Column::remainder().clip(true))
        .column(Column::exact(60.0))
        .column(Column::exact(40.0))
        .column(Column::exact(80.0))
        .column(Column::exact(100.0))
        .column(Column::auto())
        .column(Column::auto());

    table
        .header(ROW_HEIGHT, |mut header| {
            [
                Messages::Pos,
                Messages::Title,
                Messages::SquareFeet,
                Messages::Qty,
                Messages::Rate,
                Messages::Total,
            ]
            .into_iter()
            .for_each(|label| {
                header.col(|ui| {
                    ui.strong(label);
                });
            });
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, state.items.len(), |mut row| {
                let row_index = row.index();
                let item = state.items[row_index].clone();
                let computed = compute_item(&item.input.normalize());
                row.col(|ui| {
                    ui.label((row_index + 1).to_string());
                });
                row.col(|ui| {
                    ui.label(&computed.item.title)
                        .on_hover_text(&computed.item.description);
                });
                row.col(|ui| {
                    ui.label(format_measure(&computed.item.feet));
                });
                row.col(|ui| {
                    ui.label(if computed.item.quantity == 0 {
                        String::from("-")
                    } else {
                        computed.item.quantity.to_string()
                    });
                });
                row.col(|ui| {
                    ui.label(CurrencyValue::new_from_decimal(computed.item.rate).to_cell_str());
                });
                row.col(|ui| {
                    ui.label(computed.total.to_cell_str());
                });
                row.col(|ui| {
                    if ui.button(Messages::Edit.msg()).clicked() {
                        info!("edit clicked on {}", item.id);
                        state.item_to_add = item.clone();
                    }
                });
                row.col(|ui| {
                    if ui.button(Messages::Delete.msg()).clicked() {
                        info!("delete clicked on {}", item.id);
                        item_to_remove = Some(row_index);
                    }
                });
            });
        });
    if let Some(index) = item_to_remove {
        state.items.remove(index);
    }
}
