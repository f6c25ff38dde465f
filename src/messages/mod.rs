use eframe::egui::{RichText, WidgetText};

use crate::get_language;

#[derive(Debug, Clone, Eq, PartialEq, Copy)]
pub(crate) enum Language {
    EN,
    DE,
}

impl Language {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Language::EN => "en",
            Language::DE => "de",
        }
    }
}

impl From<String> for Language {
    fn from(value: String) -> Self {
        Language::from(value.as_str())
    }
}

impl From<&str> for Language {
    fn from(value: &str) -> Self {
        match value {
            "de" => Language::DE,
            _ => Language::EN,
        }
    }
}

#[derive(Debug)]
pub(crate) enum Messages {
    // General
    AppTitle,

    // Settings
    DataFolder,
    Language,
    FileOpenProgram,
    SuccessFullyChangedDataFolder,
    ErrorChangingDataFolder,
    SuccessFullyChangedProgramToOpen,
    ReallyChangeDataFolder,
    ShopProfile,
    ShopName,
    Address,
    Tagline,
    Proprietor,
    Phones,
    DocumentNumber,
    ShopProfileSaved,

    // Document
    Invoice,
    Quotation,
    DocumentType,
    CreateNewDocument,
    Customer,
    Name,
    Mobile,
    Date,
    Advance,
    Due,
    GrandTotal,
    Discount,
    Tax,
    TaxRate,
    NetTotal,
    Note,
    NewItem,
    Item,
    Items,
    Title,
    Description,
    SquareFeet,
    Qty,
    Rate,
    Total,
    ManualTotal,
    Unit,
    Export,
    Pos,

    // Pdf
    DocumentNumberShort,
    CustomerSignature,
    AuthorizedSignature,
    Phone,

    // Customers & Products
    NewCustomer,
    NewProduct,
    EditCustomer,
    EditProduct,
    NoEntries,

    // Actions
    Save,
    Cancel,
    Edit,
    Delete,
    Add,
    Change,
    Open,
    Done,
    Clear,

    // Navigation
    Home,
    Document,
    Customers,
    Products,
    Settings,
    Welcome,

    // File Dialog
    SaveFile,
    SelectFolder,
    FileTitle,
    Rename,
    Refresh,
    NewFolder,
    ParentFolder,
    ShowHidden,

    // Suggestions
    NoDataFolder,
    ReallyDelete,

    // Infos
    PDFCreated,
    EntryCreated,
    EntryUpdated,
    EntryDeleted,

    // Errors
    DateNotValid,
    CanNotBeEmpty,
    NotANumber,
    NeedsMeasure,
    NumberTooLarge,
    DiscountTooHigh,
    TaxRateTooHigh,
    NoItems,
    InvalidItem,
    PDFNotCreated,
    CouldNotFetchCustomers,
    CouldNotFetchProducts,
    CouldNotSaveEntry,
    CouldNotDeleteEntry,
    CouldNotOpenFile,
}

impl From<Messages> for &str {
    fn from(val: Messages) -> Self {
        val.msg()
    }
}

impl From<Messages> for WidgetText {
    fn from(val: Messages) -> Self {
        WidgetText::from(val.msg())
    }
}

impl From<Messages> for RichText {
    fn from(val: Messages) -> Self {
        RichText::from(val.msg())
    }
}

impl From<Messages> for String {
    fn from(val: Messages) -> Self {
        val.msg().to_owned()
    }
}

impl std::fmt::Display for Messages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.msg())
    }
}

impl Messages {
    pub(crate) fn months() -> &'static [&'static str] {
        match get_language() {
            Language::EN => &[
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ],
            Language::DE => &[
                "Jänner",
                "Februar",
                "März",
                "April",
                "Mai",
                "Juni",
                "Juli",
                "August",
                "September",
                "Oktober",
                "November",
                "Dezember",
            ],
        }
    }

    pub(crate) fn days() -> &'static [&'static str] {
        match get_language() {
            Language::EN => &["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"],
            Language::DE => &["Mo", "Di", "Mi", "Do", "Fr", "Sa", "So"],
        }
    }

    // Strings that end up in the PDF stay within the builtin font's charset.
    pub(crate) fn msg(&self) -> &'static str {
        match get_language() {
            Language::EN => {
                match self {
                    // General
                    Messages::AppTitle => "Alubill",

                    // Settings
                    Messages::DataFolder => "Data Folder",
                    Messages::Language => "Language",
                    Messages::FileOpenProgram => "Program to open Files",
                    Messages::SuccessFullyChangedDataFolder => "Data folder changed successfully!",
                    Messages::ErrorChangingDataFolder => {
                        "There was an error changing the data folder."
                    }
                    Messages::SuccessFullyChangedProgramToOpen => {
                        "Program to open files changed successfully!"
                    }
                    Messages::ReallyChangeDataFolder => {
                        "Do you really want to move all data to the selected folder?"
                    }
                    Messages::ShopProfile => "Shop",
                    Messages::ShopName => "Shop Name",
                    Messages::Address => "Address",
                    Messages::Tagline => "Tagline",
                    Messages::Proprietor => "Proprietor",
                    Messages::Phones => "Phone Numbers (one per line)",
                    Messages::DocumentNumber => "Document Number",
                    Messages::ShopProfileSaved => "Shop data saved.",

                    // Document
                    Messages::Invoice => "Invoice",
                    Messages::Quotation => "Quotation",
                    Messages::DocumentType => "Type",
                    Messages::CreateNewDocument => "Create new Document",
                    Messages::Customer => "Customer",
                    Messages::Name => "Name",
                    Messages::Mobile => "Mobile",
                    Messages::Date => "Date",
                    Messages::Advance => "Advance",
                    Messages::Due => "Due",
                    Messages::GrandTotal => "Grand Total",
                    Messages::Discount => "Discount",
                    Messages::Tax => "Tax",
                    Messages::TaxRate => "Tax Rate (%)",
                    Messages::NetTotal => "Net Total",
                    Messages::Note => "Note",
                    Messages::NewItem => "New Item",
                    Messages::Item => "Item",
                    Messages::Items => "Items",
                    Messages::Title => "Title",
                    Messages::Description => "Description",
                    Messages::SquareFeet => "Sq.Ft",
                    Messages::Qty => "Qty",
                    Messages::Rate => "Rate",
                    Messages::Total => "Total",
                    Messages::ManualTotal => "Manual Total",
                    Messages::Unit => "Unit",
                    Messages::Export => "Export as PDF",
                    Messages::Pos => "Pos",

                    // Pdf
                    Messages::DocumentNumberShort => "No",
                    Messages::CustomerSignature => "Customer Signature",
                    Messages::AuthorizedSignature => "Authorized Signature",
                    Messages::Phone => "Phone",

                    // Customers & Products
                    Messages::NewCustomer => "New Customer",
                    Messages::NewProduct => "New Product",
                    Messages::EditCustomer => "Edit Customer",
                    Messages::EditProduct => "Edit Product",
                    Messages::NoEntries => "No entries yet.",

                    // Actions
                    Messages::Save => "Save",
                    Messages::Cancel => "Cancel",
                    Messages::Edit => "Edit",
                    Messages::Delete => "Delete",
                    Messages::Add => "Add",
                    Messages::Change => "Change",
                    Messages::Open => "Open",
                    Messages::Done => "Done",
                    Messages::Clear => "Clear",

                    // Navigation
                    Messages::Home => "Home",
                    Messages::Document => "Invoice / Quotation",
                    Messages::Customers => "Customers",
                    Messages::Products => "Products",
                    Messages::Settings => "Settings",
                    Messages::Welcome => "Welcome!",

                    // File Dialog
                    Messages::SaveFile => "Save File",
                    Messages::SelectFolder => "Select Folder",
                    Messages::FileTitle => "File",
                    Messages::Rename => "Rename",
                    Messages::Refresh => "Refresh",
                    Messages::NewFolder => "New Folder",
                    Messages::ParentFolder => "Parent Folder",
                    Messages::ShowHidden => "Show Hidden",

                    // Suggestions
                    Messages::NoDataFolder => {
                        "Please set a folder to store your customers and products. Make sure the folder is safe and backed up regularly."
                    }
                    Messages::ReallyDelete => "Do you really want to delete this entry?",

                    // Infos
                    Messages::PDFCreated => "The PDF was created.",
                    Messages::EntryCreated => "Entry created successfully.",
                    Messages::EntryUpdated => "Entry updated successfully.",
                    Messages::EntryDeleted => "Entry deleted successfully.",

                    // Errors
                    Messages::DateNotValid => "Not a valid date.",
                    Messages::CanNotBeEmpty => "can't be empty.",
                    Messages::NotANumber => "is not a number.",
                    Messages::NeedsMeasure => {
                        "Sq.Ft, Qty or Manual Total has to be greater than 0."
                    }
                    Messages::NumberTooLarge => "Numbers can't be larger than 1,000,000,000.",
                    Messages::DiscountTooHigh => "The discount can't exceed the grand total.",
                    Messages::TaxRateTooHigh => "The tax rate can't be more than 100%.",
                    Messages::NoItems => "Add at least one item.",
                    Messages::InvalidItem => "is not valid.",
                    Messages::PDFNotCreated => "The PDF was not created.",
                    Messages::CouldNotFetchCustomers => "Could not fetch customers.",
                    Messages::CouldNotFetchProducts => "Could not fetch products.",
                    Messages::CouldNotSaveEntry => "Could not save entry.",
                    Messages::CouldNotDeleteEntry => "Could not delete entry.",
                    Messages::CouldNotOpenFile => "Could not open file.",
                }
            }
            Language::DE => {
                match self {
                    // General
                    Messages::AppTitle => "Alubill",

                    // Settings
                    Messages::DataFolder => "Datenverzeichnis",
                    Messages::Language => "Sprache",
                    Messages::FileOpenProgram => "Programm zum Öffnen von Dateien",
                    Messages::SuccessFullyChangedDataFolder => {
                        "Datenverzeichnis erfolgreich geändert!"
                    }
                    Messages::ErrorChangingDataFolder => {
                        "Beim Ändern des Datenverzeichnisses ist ein Fehler aufgetreten."
                    }
                    Messages::SuccessFullyChangedProgramToOpen => {
                        "Programm zum Öffnen von Dateien erfolgreich geändert!"
                    }
                    Messages::ReallyChangeDataFolder => {
                        "Willst du wirklich alle Daten in das ausgewählte Verzeichnis verschieben?"
                    }
                    Messages::ShopProfile => "Geschäft",
                    Messages::ShopName => "Name des Geschäfts",
                    Messages::Address => "Adresse",
                    Messages::Tagline => "Slogan",
                    Messages::Proprietor => "Inhaber",
                    Messages::Phones => "Telefonnummern (eine pro Zeile)",
                    Messages::DocumentNumber => "Dokumentnummer",
                    Messages::ShopProfileSaved => "Geschäftsdaten gespeichert.",

                    // Document
                    Messages::Invoice => "Rechnung",
                    Messages::Quotation => "Angebot",
                    Messages::DocumentType => "Art",
                    Messages::CreateNewDocument => "Neues Dokument erstellen",
                    Messages::Customer => "Kunde",
                    Messages::Name => "Name",
                    Messages::Mobile => "Mobil",
                    Messages::Date => "Datum",
                    Messages::Advance => "Anzahlung",
                    Messages::Due => "Offen",
                    Messages::GrandTotal => "Gesamtbetrag",
                    Messages::Discount => "Rabatt",
                    Messages::Tax => "Steuer",
                    Messages::TaxRate => "Steuersatz (%)",
                    Messages::NetTotal => "Endbetrag",
                    Messages::Note => "Notiz",
                    Messages::NewItem => "Neuer Posten",
                    Messages::Item => "Posten",
                    Messages::Items => "Posten",
                    Messages::Title => "Titel",
                    Messages::Description => "Beschreibung",
                    Messages::SquareFeet => "Qu.Fuss",
                    Messages::Qty => "Menge",
                    Messages::Rate => "Preis",
                    Messages::Total => "Summe",
                    Messages::ManualTotal => "Fixe Summe",
                    Messages::Unit => "Einheit",
                    Messages::Export => "Als PDF exportieren",
                    Messages::Pos => "Pos",

                    // Pdf
                    Messages::DocumentNumberShort => "Nr",
                    Messages::CustomerSignature => "Unterschrift Kunde",
                    Messages::AuthorizedSignature => "Unterschrift Firma",
                    Messages::Phone => "Tel",

                    // Customers & Products
                    Messages::NewCustomer => "Neuer Kunde",
                    Messages::NewProduct => "Neues Produkt",
                    Messages::EditCustomer => "Kunde bearbeiten",
                    Messages::EditProduct => "Produkt bearbeiten",
                    Messages::NoEntries => "Noch keine Einträge.",

                    // Actions
                    Messages::Save => "Speichern",
                    Messages::Cancel => "Abbrechen",
                    Messages::Edit => "Bearbeiten",
                    Messages::Delete => "Löschen",
                    Messages::Add => "Hinzufügen",
                    Messages::Change => "Ändern",
                    Messages::Open => "Öffnen",
                    Messages::Done => "Fertig",
                    Messages::Clear => "Leeren",

                    // Navigation
                    Messages::Home => "Start",
                    Messages::Document => "Rechnung / Angebot",
                    Messages::Customers => "Kunden",
                    Messages::Products => "Produkte",
                    Messages::Settings => "Einstellungen",
                    Messages::Welcome => "Willkommen!",

                    // File Dialog
                    Messages::SaveFile => "Datei speichern",
                    Messages::SelectFolder => "Verzeichnis auswählen",
                    Messages::FileTitle => "Datei",
                    Messages::Rename => "Umbenennen",
                    Messages::Refresh => "Neu laden",
                    Messages::NewFolder => "Neues Verzeichnis",
                    Messages::ParentFolder => "Übergeordnetes Verzeichnis",
                    Messages::ShowHidden => "Versteckte anzeigen",

                    // Suggestions
                    Messages::NoDataFolder => {
                        "Bitte setz einen Ordner um deine Kunden und Produkte zu speichern. Stell sicher, dass der Ordner sicher ist und regelmäßig gebackuppt wird."
                    }
                    Messages::ReallyDelete => "Willst du diesen Eintrag wirklich löschen?",

                    // Infos
                    Messages::PDFCreated => "Das PDF wurde erstellt.",
                    Messages::EntryCreated => "Eintrag erfolgreich erstellt.",
                    Messages::EntryUpdated => "Eintrag erfolgreich geändert.",
                    Messages::EntryDeleted => "Eintrag erfolgreich gelöscht.",

                    // Errors
                    Messages::DateNotValid => "Kein gültiges Datum.",
                    Messages::CanNotBeEmpty => "kann nicht leer sein.",
                    Messages::NotANumber => "ist keine Zahl.",
                    Messages::NeedsMeasure => {
                        "Qu.Fuss, Menge oder fixe Summe muss größer als 0 sein."
                    }
                    Messages::NumberTooLarge => "Zahlen dürfen nicht größer als 1.000.000.000 sein.",
                    Messages::DiscountTooHigh => "Der Rabatt darf den Gesamtbetrag nicht übersteigen.",
                    Messages::TaxRateTooHigh => "Der Steuersatz darf nicht über 100% liegen.",
                    Messages::NoItems => "Füge zumindest einen Posten hinzu.",
                    Messages::InvalidItem => "ist nicht gültig.",
                    Messages::PDFNotCreated => "Das PDF wurde nicht erstellt.",
                    Messages::CouldNotFetchCustomers => "Kunden konnten nicht gefunden werden.",
                    Messages::CouldNotFetchProducts => "Produkte konnten nicht gefunden werden.",
                    Messages::CouldNotSaveEntry => "Eintrag konnte nicht gespeichert werden.",
                    Messages::CouldNotDeleteEntry => "Eintrag konnte nicht gelöscht werden.",
                    Messages::CouldNotOpenFile => "Datei konnte nicht geöffnet werden.",
                }
            }
        }
    }
}
