use eframe::egui::{Align, Align2, Context, Layout, Window};

/// Confirmation dialog about `subject`, e.g. the entry to delete or the
/// folder to move to.
#[derive(Debug, Clone)]
pub(crate) struct Dialog<T> {
    text: String,
    ok_text: &'static str,
    cancel_text: &'static str,
    pub(crate) subject: T,
}

impl<T> Dialog<T> {
    pub(crate) fn new(
        text: String,
        ok_text: &'static str,
        cancel_text: &'static str,
        subject: T,
    ) -> Self {
        Self {
            text,
            ok_text,
            cancel_text,
            subject,
        }
    }
}

#[derive(Debug, PartialEq)]
pub(crate) enum DialogResponse {
    Cancel,
    Ok,
    None,
}

pub(crate) fn render_dialog<T>(ctx: &Context, dialog: &Dialog<T>) -> DialogResponse {
    let mut result = DialogResponse::None;
    Window::new("dialog")
        .movable(false)
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .fade_in(false)
        .fade_out(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .drag_to_scroll(false)
        .fixed_size([400.0, 100.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(15.0);
                ui.label(&dialog.text);
                ui.add_space(15.0);
                ui.columns(2, |columns| {
                    columns[0].with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button(dialog.cancel_text).clicked() {
                            result = DialogResponse::Cancel;
                        }
                    });
                    columns[1].with_layout(Layout::left_to_right(Align::Center), |ui| {
                        if ui.button(dialog.ok_text).clicked() {
                            result = DialogResponse::Ok;
                        }
                    });
                });
                ui.add_space(10.0);
            });
        });
    result
}
