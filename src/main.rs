use anyhow::{Result, anyhow};
use config::{Config, ShopProfile};
use data::{CustomerEntry, ProductEntry};
use db::{CUSTOMERS_TABLE, PRODUCTS_TABLE, Repository, Store};
use eframe::{
    App,
    egui::{
        self, Align2, Color32, Grid, RichText, ScrollArea, SelectableLabel, Shadow, TextEdit,
        Window,
    },
};
use egui_file::FileDialog;
use log::{error, info};
use messages::{Language, Messages};
use once_cell::sync::Lazy;
use std::sync::Mutex;
use std::{
    path::PathBuf,
    sync::mpsc::{Receiver, Sender, channel},
};
use ui::{
    dialog::{self, Dialog, DialogResponse},
    notification::{self, InnerNotification, Notification},
};
use util::Colors;
use uuid::Uuid;

mod config;
mod customers;
mod data;
mod db;
mod document;
mod messages;
mod pricing;
mod products;
mod ui;
mod util;

static LANGUAGE: Lazy<Mutex<Language>> = Lazy::new(|| Mutex::new(Language::EN));

fn update_language(new_val: &str) {
    let mut config = LANGUAGE.lock().expect("failed to get LANGUAGE lock");
    *config = Language::from(new_val);
}

fn get_language() -> Language {
    let config = LANGUAGE.lock().expect("failed to get LANGUAGE lock");
    *config
}

const DATE_FORMAT: &str = "%d.%m.%Y";

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let (background_event_sender, background_event_receiver) = channel::<Event>();
    let (gui_event_sender, gui_event_receiver) = channel::<GuiEvent>();
    let config = config::load_config()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_app_id(Messages::AppTitle)
            .with_inner_size([1200.0, 1000.0]),
        ..Default::default()
    };

    info!("Starting background thread...");
    let gui_event_sender_clone = gui_event_sender.clone();
    std::thread::spawn(move || {
        let mut stores: Option<(Store<CustomerEntry>, Store<ProductEntry>)> = None;
        while let Ok(event) = background_event_receiver.recv() {
            if let Event::SetDB(ref data_folder) = event {
                // close the previous database before opening the new one
                stores = None;
                match db::open_db(data_folder.as_path()) {
                    Ok(database) => {
                        info!("Opened database in {:?}", data_folder);
                        let customers = Store::new(database.clone(), CUSTOMERS_TABLE);
                        let products = Store::new(database, PRODUCTS_TABLE);
                        handle_background_events(
                            Event::FetchCustomers(),
                            &gui_event_sender_clone,
                            &customers,
                            &products,
                        );
                        handle_background_events(
                            Event::FetchProducts(),
                            &gui_event_sender_clone,
                            &customers,
                            &products,
                        );
                        stores = Some((customers, products));
                    }
                    Err(e) => {
                        error!("Could not open database in {:?}: {e}", data_folder);
                        util::send_gui_event(
                            &gui_event_sender_clone,
                            GuiEvent::ShowErrorNotification(e.to_string()),
                        );
                    }
                }
                continue;
            }
            if let Some((ref customers, ref products)) = stores {
                handle_background_events(event, &gui_event_sender_clone, customers, products);
            }
        }
    });

    info!("Starting alubill...");

    eframe::run_native(
        Messages::AppTitle.into(),
        options,
        Box::new(|context| {
            context.egui_ctx.style_mut(|style| {
                // remove window shadow
                style.visuals.window_shadow = Shadow {
                    offset: [0, 0],
                    blur: 0,
                    spread: 0,
                    color: Color32::BLACK,
                };
            });
            Ok(Alubill::new(
                background_event_sender,
                gui_event_receiver,
                gui_event_sender,
                config,
            ))
        }),
    )
    .map_err(|e| anyhow!("eframe error: {}", e))
}

fn handle_background_events<C, P>(
    event: Event,
    sender: &Sender<GuiEvent>,
    customers: &C,
    products: &P,
) where
    C: Repository<CustomerEntry>,
    P: Repository<ProductEntry>,
{
    match event {
        Event::OpenFile(file, command) => {
            if let Err(e) = open::with(&file, &command) {
                error!("Could not open file {:?} with {command}: {e}", file);
                util::send_error_notification(sender, Messages::CouldNotOpenFile);
            };
        }
        Event::SetDB(_) => (),
        Event::FetchCustomers() => match customers.list() {
            Ok(entries) => util::send_gui_event(sender, GuiEvent::SetCustomers(entries)),
            Err(e) => {
                error!("Could not fetch customers: {e}");
                util::send_error_notification(sender, Messages::CouldNotFetchCustomers);
            }
        },
        Event::SaveCustomer(entry) => match customers.add(&entry) {
            Ok(()) => {
                util::send_info_notification(sender, Messages::EntryCreated);
                handle_background_events(Event::FetchCustomers(), sender, customers, products);
            }
            Err(e) => {
                error!("Could not save customer {}: {e}", entry.id);
                util::send_error_notification(sender, Messages::CouldNotSaveEntry);
            }
        },
        Event::UpdateCustomer(entry) => match customers.update(&entry) {
            Ok(()) => {
                util::send_info_notification(sender, Messages::EntryUpdated);
                handle_background_events(Event::FetchCustomers(), sender, customers, products);
            }
            Err(e) => {
                error!("Could not update customer {}: {e}", entry.id);
                util::send_error_notification(sender, Messages::CouldNotSaveEntry);
            }
        },
        Event::RemoveCustomer(id) => match customers.remove(&id) {
            Ok(()) => {
                util::send_info_notification(sender, Messages::EntryDeleted);
                handle_background_events(Event::FetchCustomers(), sender, customers, products);
            }
            Err(e) => {
                error!("Could not delete customer {id}: {e}");
                util::send_error_notification(sender, Messages::CouldNotDeleteEntry);
            }
        },
        Event::FetchProducts() => match products.list() {
            Ok(entries) => util::send_gui_event(sender, GuiEvent::SetProducts(entries)),
            Err(e) => {
                error!("Could not fetch products: {e}");
                util::send_error_notification(sender, Messages::CouldNotFetchProducts);
            }
        },
        Event::SaveProduct(entry) => match products.add(&entry) {
            Ok(()) => {
                util::send_info_notification(sender, Messages::EntryCreated);
                handle_background_events(Event::FetchProducts(), sender, customers, products);
            }
            Err(e) => {
                error!("Could not save product {}: {e}", entry.id);
                util::send_error_notification(sender, Messages::CouldNotSaveEntry);
            }
        },
        Event::UpdateProduct(entry) => match products.update(&entry) {
            Ok(()) => {
                util::send_info_notification(sender, Messages::EntryUpdated);
                handle_background_events(Event::FetchProducts(), sender, customers, products);
            }
            Err(e) => {
                error!("Could not update product {}: {e}", entry.id);
                util::send_error_notification(sender, Messages::CouldNotSaveEntry);
            }
        },
        Event::RemoveProduct(id) => match products.remove(&id) {
            Ok(()) => {
                util::send_info_notification(sender, Messages::EntryDeleted);
                handle_background_events(Event::FetchProducts(), sender, customers, products);
            }
            Err(e) => {
                error!("Could not delete product {id}: {e}");
                util::send_error_notification(sender, Messages::CouldNotDeleteEntry);
            }
        },
    }
}

#[derive(Debug)]
struct Alubill {
    state: State,
    context: AppContext,
    config: Config,
}

#[derive(Debug)]
struct AppContext {
    background_event_sender: Sender<Event>,
    gui_event_receiver: Receiver<GuiEvent>,
    gui_event_sender: Sender<GuiEvent>,
    db_set: bool,
}

#[derive(Debug)]
struct State {
    navigation: NavigationState,
    document: document::DocumentState,
    customers: customers::CustomersState,
    products: products::ProductsState,
    notifications: Vec<Notification>,
    config_state: ConfigState,
    file_picker_startpoint: Option<PathBuf>,
}

impl State {
    fn new(config: &Config) -> Self {
        Self {
            navigation: NavigationState::new(),
            document: document::DocumentState::new(),
            customers: customers::CustomersState::new(),
            products: products::ProductsState::new(),
            notifications: vec![],
            config_state: ConfigState::new(config),
            file_picker_startpoint: None,
        }
    }
}

#[derive(Debug)]
struct ConfigState {
    open_file_dialog: Option<FileDialog>,
    selected_folder: Option<PathBuf>,
    change_data_folder_dialog: Option<Dialog<PathBuf>>,
    file_open_command: String,
    file_open_command_change: bool,
    shop: ShopForm,
}

impl ConfigState {
    fn new(config: &Config) -> Self {
        Self {
            open_file_dialog: None,
            selected_folder: None,
            change_data_folder_dialog: None,
            file_open_command: config.file_open_command.clone().unwrap_or_default(),
            file_open_command_change: false,
            shop: ShopForm::from(&config.shop),
        }
    }
}

/// Shop profile as edited in the settings, phones one per line.
#[derive(Debug, Clone, PartialEq)]
struct ShopForm {
    name: String,
    address: String,
    tagline: String,
    proprietor: String,
    phones: String,
    document_number: String,
}

impl From<&ShopProfile> for ShopForm {
    fn from(shop: &ShopProfile) -> Self {
        Self {
            name: shop.name.clone(),
            address: shop.address.clone(),
            tagline: shop.tagline.clone(),
            proprietor: shop.proprietor.clone(),
            phones: shop.phones.join("\n"),
            document_number: shop.document_number.clone(),
        }
    }
}

impl From<&ShopForm> for ShopProfile {
    fn from(form: &ShopForm) -> Self {
        Self {
            name: form.name.trim().to_owned(),
            address: form.address.trim().to_owned(),
            tagline: form.tagline.trim().to_owned(),
            proprietor: form.proprietor.trim().to_owned(),
            phones: form
                .phones
                .lines()
                .map(|p| p.trim())
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect(),
            document_number: form.document_number.trim().to_owned(),
        }
    }
}

#[derive(Debug)]
struct NavigationState {
    current_screen: Screen,
}

impl NavigationState {
    fn new() -> Self {
        Self {
            current_screen: Screen::Home,
        }
    }
}

impl Alubill {
    fn new(
        background_event_sender: Sender<Event>,
        gui_event_receiver: Receiver<GuiEvent>,
        gui_event_sender: Sender<GuiEvent>,
        config: Config,
    ) -> Box<Self> {
        Box::new(Self {
            state: State::new(&config),
            config,
            context: AppContext {
                background_event_sender,
                gui_event_receiver,
                gui_event_sender,
                db_set: false,
            },
        })
    }

    fn save_config(&mut self, cfg: Config, success: Option<Messages>) {
        match config::save_config(&cfg) {
            Ok(()) => {
                self.config = cfg;
                if let Some(msg) = success {
                    util::send_info_notification(&self.context.gui_event_sender, msg);
                }
            }
            Err(e) => {
                error!("Could not save config: {e}");
                util::send_gui_event(
                    &self.context.gui_event_sender,
                    GuiEvent::ShowErrorNotification(e.to_string()),
                );
            }
        }
    }

    fn handle_config_init(&mut self, ctx: &egui::Context) {
        match self.config.data_folder {
            None => {
                let mut done = false;
                Window::new("config_missing")
                    .movable(false)
                    .resizable(false)
                    .collapsible(false)
                    .title_bar(false)
                    .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
                    .fixed_size([400.0, 120.0])
                    .show(ctx, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(10.0);
                            ui.label(Messages::NoDataFolder.msg());
                            ui.add_space(10.0);
                            ui.horizontal(|ui| {
                                let mut selected = self
                                    .state
                                    .config_state
                                    .selected_folder
                                    .as_ref()
                                    .map(|path| path.to_string_lossy().to_string())
                                    .unwrap_or_default();
                                ui.add_enabled(false, TextEdit::singleline(&mut selected));
                                if ui.button(Messages::Open).clicked() {
                                    let mut dialog = ui::get_localized_select_folder_dialog(
                                        self.state.config_state.selected_folder.clone(),
                                        Messages::SelectFolder.msg(),
                                    );
                                    dialog.open();
                                    self.state.config_state.open_file_dialog = Some(dialog);
                                }
                            });
                            ui.add_space(10.0);
                            if ui.button(Messages::Done.msg()).clicked() {
                                done = true;
                            }
                        });
                    });

                if let Some(dialog) = &mut self.state.config_state.open_file_dialog {
                    if dialog.show(ctx).selected() {
                        if let Some(folder) = dialog.path() {
                            self.state.file_picker_startpoint = Some(folder.to_path_buf());
                            self.state.config_state.selected_folder = Some(folder.to_path_buf());
                        }
                    }
                }

                if done {
                    if let Some(data_folder) = self.state.config_state.selected_folder.take() {
                        let cfg = Config {
                            data_folder: Some(data_folder),
                            ..self.config.clone()
                        };
                        self.save_config(cfg, None);
                    }
                    self.state.config_state.open_file_dialog = None;
                }
            }
            Some(ref data_folder) => {
                if !self.context.db_set {
                    self.context.db_set = true;
                    util::send_event_and_request_repaint(
                        ctx,
                        &self.context.background_event_sender,
                        Event::SetDB(data_folder.clone()),
                    );
                }
            }
        }
    }

    fn handle_gui_events(&mut self) {
        while let Ok(event) = self.context.gui_event_receiver.try_recv() {
            match event {
                GuiEvent::ShowInfoNotification(text) => self
                    .state
                    .notifications
                    .push(Notification::Info(InnerNotification::new(text))),
                GuiEvent::ShowErrorNotification(text) => self
                    .state
                    .notifications
                    .push(Notification::Error(InnerNotification::new(text))),
                GuiEvent::SetCustomers(entries) => {
                    self.state.customers.entries = entries;
                }
                GuiEvent::SetProducts(entries) => {
                    self.state.products.entries = entries;
                }
            }
        }
    }

    fn build_navigation(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let current_screen = self.state.navigation.current_screen;
            [
                (Screen::Home, Messages::Home),
                (Screen::Document, Messages::Document),
                (Screen::Customers, Messages::Customers),
                (Screen::Products, Messages::Products),
                (Screen::Settings, Messages::Settings),
            ]
            .into_iter()
            .for_each(|(screen, label)| {
                let color = if current_screen == screen {
                    Colors::ButtonActive.col()
                } else {
                    Colors::ButtonDefault.col()
                };
                if ui.button(RichText::new(label).color(color)).clicked() {
                    self.state.navigation.current_screen = screen;
                }
            });
        });
    }

    fn build_home(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new(Messages::Welcome).strong());
        ui.add_space(10.0);
        ui.label(self.config.shop.summary());
        ui.add_space(10.0);
        if ui.button(Messages::CreateNewDocument).clicked() {
            self.state.navigation.current_screen = Screen::Document;
        }
    }

    fn build_settings(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new(Messages::Settings).strong());
        Grid::new("settings_grid").num_columns(3).show(ui, |ui| {
            ui.label(Messages::Language);
            ui.horizontal(|ui| {
                let current_lang = Language::from(self.config.language.clone());
                [Language::EN, Language::DE].iter().for_each(|lang| {
                    if ui
                        .add(SelectableLabel::new(current_lang == *lang, lang.name()))
                        .clicked()
                    {
                        let cfg = Config {
                            language: lang.name().into(),
                            ..self.config.clone()
                        };
                        self.save_config(cfg, None);
                    }
                });
            });
            ui.end_row();

            ui.label(Messages::FileOpenProgram);
            if ui.button(Messages::Change.msg()).clicked() {
                self.state.config_state.file_open_command_change =
                    !self.state.config_state.file_open_command_change;
            }
            let mut file_open_command = self.config.file_open_command.clone().unwrap_or_default();
            ui.add_enabled(
                false,
                TextEdit::singleline(&mut file_open_command).desired_width(250.0),
            );
            if self.state.config_state.file_open_command_change {
                ui.end_row();
                ui.label("");
                if ui.button(Messages::Save.msg()).clicked() {
                    let command = self.state.config_state.file_open_command.trim().to_owned();
                    let cfg = Config {
                        file_open_command: if command.is_empty() { None } else { Some(command) },
                        ..self.config.clone()
                    };
                    self.save_config(cfg, Some(Messages::SuccessFullyChangedProgramToOpen));
                    self.state.config_state.file_open_command_change = false;
                }
                ui.text_edit_singleline(&mut self.state.config_state.file_open_command);
            }
            ui.end_row();

            ui.label(Messages::DataFolder);
            if ui.button(Messages::Open.msg()).clicked() {
                let mut dialog =
                    ui::get_localized_select_folder_dialog(None, Messages::SelectFolder.msg());
                dialog.open();
                self.state.config_state.open_file_dialog = Some(dialog);
            }
            let mut data_folder = self
                .config
                .data_folder
                .as_ref()
                .map(|path| path.to_string_lossy().to_string())
                .unwrap_or_default();
            ui.add_enabled(
                false,
                TextEdit::singleline(&mut data_folder).desired_width(250.0),
            );
            ui.end_row();
        });

        self.build_data_folder_change(ui);
        ui.separator();
        self.build_shop_profile(ui);
    }

    fn build_data_folder_change(&mut self, ui: &mut egui::Ui) {
        let selected_folder = match &mut self.state.config_state.open_file_dialog {
            Some(dialog) => {
                if dialog.show(ui.ctx()).selected() {
                    dialog.path().map(|folder| folder.to_path_buf())
                } else {
                    None
                }
            }
            None => None,
        };
        if let Some(folder) = selected_folder {
            self.state.config_state.open_file_dialog = None;
            self.state.config_state.change_data_folder_dialog = Some(Dialog::new(
                Messages::ReallyChangeDataFolder.msg().to_string(),
                Messages::Save.msg(),
                Messages::Cancel.msg(),
                folder,
            ));
        }

        let response = match self.state.config_state.change_data_folder_dialog {
            Some(ref dialog) => dialog::render_dialog(ui.ctx(), dialog),
            None => return,
        };
        match response {
            DialogResponse::Ok => {
                let Some(dialog) = self.state.config_state.change_data_folder_dialog.take() else {
                    return;
                };
                let target = dialog.subject;
                let Some(source) = self.config.data_folder.clone() else {
                    return;
                };
                match util::files::move_folder_recursively(source.as_path(), target.as_path()) {
                    Err(e) => {
                        error!("error while changing data folder: {e}");
                        util::send_error_notification(
                            &self.context.gui_event_sender,
                            Messages::ErrorChangingDataFolder,
                        );
                    }
                    Ok(()) => {
                        let cfg = Config {
                            data_folder: Some(target.clone()),
                            ..self.config.clone()
                        };
                        self.save_config(cfg, Some(Messages::SuccessFullyChangedDataFolder));
                        util::send_event_and_request_repaint(
                            ui.ctx(),
                            &self.context.background_event_sender,
                            Event::SetDB(target),
                        );
                    }
                }
            }
            DialogResponse::Cancel => {
                self.state.config_state.change_data_folder_dialog = None;
                info!("data folder change canceled");
            }
            DialogResponse::None => (),
        }
    }

    fn build_shop_profile(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new(Messages::ShopProfile).strong());
        let form = &mut self.state.config_state.shop;
        Grid::new("shop_profile_grid")
            .num_columns(2)
            .min_col_width(120.0)
            .show(ui, |ui| {
                ui.label(Messages::ShopName);
                ui.add(TextEdit::singleline(&mut form.name).desired_width(300.0));
                ui.end_row();
                ui.label(Messages::Address);
                ui.add(TextEdit::singleline(&mut form.address).desired_width(300.0));
                ui.end_row();
                ui.label(Messages::Tagline);
                ui.add(TextEdit::singleline(&mut form.tagline).desired_width(300.0));
                ui.end_row();
                ui.label(Messages::Proprietor);
                ui.add(TextEdit::singleline(&mut form.proprietor).desired_width(300.0));
                ui.end_row();
                ui.label(Messages::Phones);
                ui.add(
                    TextEdit::multiline(&mut form.phones)
                        .desired_rows(3)
                        .desired_width(300.0),
                );
                ui.end_row();
                ui.label(Messages::DocumentNumber);
                ui.add(TextEdit::singleline(&mut form.document_number).desired_width(300.0));
                ui.end_row();
            });
        if ui.button(Messages::Save).clicked() {
            let cfg = Config {
                shop: ShopProfile::from(&self.state.config_state.shop),
                ..self.config.clone()
            };
            self.save_config(cfg, Some(Messages::ShopProfileSaved));
        }
    }
}

impl App for Alubill {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_config_init(ctx);
        self.handle_gui_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    notification::render_notifications(ctx, &mut self.state.notifications);
                    ui.label(RichText::new(Messages::AppTitle).strong());
                    ui.separator();
                    self.build_navigation(ui);
                    ui.separator();
                    match self.state.navigation.current_screen {
                        Screen::Home => {
                            self.build_home(ui);
                        }
                        Screen::Document => {
                            document::build(ctx, &mut self.state, &self.config, &self.context, ui);
                        }
                        Screen::Customers => {
                            customers::build(ctx, &mut self.state.customers, &self.context, ui);
                        }
                        Screen::Products => {
                            products::build(ctx, &mut self.state.products, &self.context, ui);
                        }
                        Screen::Settings => {
                            self.build_settings(ui);
                        }
                    };
                    ui.separator();
                });
            });
        });
    }
}

#[derive(Debug)]
enum GuiError {
    FileAccessError(String),
    ExportFailed(String),
    DatabaseError(String),
}

impl std::fmt::Display for GuiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GuiError::FileAccessError(msg) => {
                write!(f, "file access failed: {}", msg)
            }
            GuiError::ExportFailed(msg) => {
                write!(f, "export failed: {}", msg)
            }
            GuiError::DatabaseError(msg) => {
                write!(f, "database error: {}", msg)
            }
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
enum Screen {
    Home,
    Document,
    Customers,
    Products,
    Settings,
}

#[derive(Debug)]
enum Event {
    SetDB(PathBuf),
    OpenFile(PathBuf, String),
    FetchCustomers(),
    SaveCustomer(CustomerEntry),
    UpdateCustomer(CustomerEntry),
    RemoveCustomer(Uuid),
    FetchProducts(),
    SaveProduct(ProductEntry),
    UpdateProduct(ProductEntry),
    RemoveProduct(Uuid),
}

#[derive(Debug)]
enum GuiEvent {
    ShowInfoNotification(String),
    ShowErrorNotification(String),
    SetCustomers(Vec<CustomerEntry>),
    SetProducts(Vec<ProductEntry>),
}
