use crate::GuiError;
use crate::data::DocumentType;
use std::fs::{copy, create_dir_all, read_dir, remove_dir_all};
use std::io;
use std::path::{Path, PathBuf};

const PDF_EXTENSION: &str = "pdf";

pub(crate) fn move_folder_recursively(source: &Path, target: &Path) -> Result<(), GuiError> {
    if target.starts_with(source) {
        return Err(GuiError::FileAccessError(String::from(
            "target folder can't be inside source folder",
        )));
    }
    if !source.exists() {
        return Err(GuiError::FileAccessError(format!(
            "source folder does not exist: {:?}",
            source
        )));
    }
    if !target.exists() {
        return Err(GuiError::FileAccessError(format!(
            "target folder does not exist: {:?}",
            target
        )));
    }

    copy_dir_all(source, target).map_err(|e| GuiError::FileAccessError(e.to_string()))?;

    if let Err(e) = remove_dir_all(source) {
        log::error!("error while removing source data folder: {e}");
    }
    Ok(())
}

fn copy_dir_all(source: impl AsRef<Path>, target: impl AsRef<Path>) -> io::Result<()> {
    if !target.as_ref().exists() {
        create_dir_all(&target)?;
    }
    for entry in read_dir(source)? {
        let entry = entry?;
        let t = entry.file_type()?;
        if t.is_dir() {
            copy_dir_all(entry.path(), target.as_ref().join(entry.file_name()))?;
        } else {
            copy(entry.path(), target.as_ref().join(entry.file_name()))?;
        }
    }
    Ok(())
}

/// Suggested file name in the save dialog, e.g. `Invoice.pdf`
pub(crate) fn build_document_file_name(document_type: DocumentType) -> String {
    format!("{}.{}", document_type.file_stem(), PDF_EXTENSION)
}

// whatever the user typed, the export is a pdf
pub(crate) fn with_pdf_extension(file: &Path) -> PathBuf {
    match file.extension() {
        Some(ext) if ext == PDF_EXTENSION => file.to_path_buf(),
        _ => file.with_extension(PDF_EXTENSION),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn file_name_per_document_type() {
        assert_eq!(build_document_file_name(DocumentType::Invoice), "Invoice.pdf");
        assert_eq!(
            build_document_file_name(DocumentType::Quotation),
            "Quotation.pdf"
        );
    }

    #[test]
    fn pdf_extension_is_enforced() {
        assert_eq!(
            with_pdf_extension(Path::new("/tmp/Invoice")),
            PathBuf::from("/tmp/Invoice.pdf")
        );
        assert_eq!(
            with_pdf_extension(Path::new("/tmp/Invoice.txt")),
            PathBuf::from("/tmp/Invoice.pdf")
        );
        assert_eq!(
            with_pdf_extension(Path::new("/tmp/Invoice.pdf")),
            PathBuf::from("/tmp/Invoice.pdf")
        );
    }

    #[test]
    fn moves_data_folder() {
        let base = std::env::temp_dir().join(format!("alubill-move-{}", Uuid::now_v7()));
        let source = base.join("source");
        let target = base.join("target");
        create_dir_all(source.join("nested")).unwrap();
        create_dir_all(&target).unwrap();
        std::fs::write(source.join("alubill.redb"), b"db").unwrap();
        std::fs::write(source.join("nested").join("a.txt"), b"a").unwrap();

        move_folder_recursively(&source, &target).unwrap();
        assert!(!source.exists());
        assert_eq!(std::fs::read(target.join("alubill.redb")).unwrap(), b"db");
        assert!(target.join("nested").join("a.txt").exists());
        let _ = remove_dir_all(base);
    }

    #[test]
    fn refuses_to_move_into_itself() {
        let source = std::env::temp_dir().join(format!("alubill-move-{}", Uuid::now_v7()));
        assert!(move_folder_recursively(&source, &source.join("inner")).is_err());
    }
}
