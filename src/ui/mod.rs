use crate::{
    data::DocumentType,
    messages::Messages,
    util::{
        Colors,
        files::build_document_file_name,
        validation::{Field, ValidationResult},
    },
};
use eframe::egui::Ui;
use egui_file::FileDialog;
use std::path::{Path, PathBuf};

pub(crate) mod autosuggest;
pub(crate) mod dialog;
pub(crate) mod notification;

fn get_localized_file_dialog(dialog: FileDialog, title: &str) -> FileDialog {
    dialog
        .title(title)
        .open_button_text(Messages::Open.msg().into())
        .save_button_text(Messages::Save.msg().into())
        .cancel_button_text(Messages::Cancel.msg().into())
        .rename_button_text(Messages::Rename.msg().into())
        .refresh_button_hover_text(Messages::Refresh.msg().into())
        .new_folder_name_text(Messages::NewFolder.msg().into())
        .new_folder_button_text(Messages::NewFolder.msg().into())
        .file_label_text(Messages::FileTitle.msg().into())
        .parent_folder_button_hover_text(Messages::ParentFolder.msg().into())
        .show_hidden_checkbox_text(Messages::ShowHidden.msg().into())
}

/// Save dialog for an exported document, only lists PDFs and suggests
/// `{documentType}.pdf`.
pub(crate) fn get_pdf_save_dialog(path: Option<PathBuf>, document_type: DocumentType) -> FileDialog {
    let filter = Box::new(|path: &Path| -> bool {
        path.extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
    });
    get_localized_file_dialog(FileDialog::save_file(path), Messages::SaveFile.msg())
        .default_filename(build_document_file_name(document_type))
        .show_files_filter(filter)
}

pub(crate) fn get_localized_select_folder_dialog(path: Option<PathBuf>, title: &str) -> FileDialog {
    let dialog = FileDialog::select_folder(path);
    get_localized_file_dialog(dialog, title)
}

/// Errors of `field` as extra rows in a two column grid.
pub(crate) fn render_field_errors(field: &Field, validation_result: &ValidationResult, ui: &mut Ui) {
    if let Some(errors) = validation_result.get_errors(field) {
        errors.iter().for_each(|e| {
            ui.end_row();
            ui.label(""); // workaround because we can't span columns in a grid
            ui.colored_label(Colors::Error.col(), format!("❎ {}", e));
        });
    }
}

pub(crate) fn render_errors(field: &Field, validation_result: &ValidationResult, ui: &mut Ui) {
    if let Some(errors) = validation_result.get_errors(field) {
        errors.iter().for_each(|e| {
            ui.colored_label(Colors::Error.col(), format!("❎ {}", e));
        });
    }
}
