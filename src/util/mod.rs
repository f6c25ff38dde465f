use crate::{Event, GuiEvent, messages::Messages};
use eframe::egui::Color32;
use eframe::egui::Context;
use log::error;
use std::sync::mpsc::Sender;

pub(crate) mod export;
pub(crate) mod files;
pub(crate) mod validation;

#[derive(Debug)]
pub(crate) enum Colors {
    Error,
    Info,
    ButtonDefault,
    ButtonActive,
}

impl Colors {
    pub(crate) fn col(&self) -> Color32 {
        match self {
            Colors::Error => Color32::LIGHT_RED,
            Colors::Info => Color32::LIGHT_GREEN,
            Colors::ButtonDefault => Color32::LIGHT_GRAY,
            Colors::ButtonActive => Color32::LIGHT_BLUE,
        }
    }
}

pub(crate) fn send_event_and_request_repaint(ctx: &Context, sender: &Sender<Event>, event: Event) {
    match sender.send(event) {
        Ok(_) => {
            ctx.request_repaint();
        }
        Err(err) => {
            error!("Could not send event, {}", err);
        }
    }
}

pub(crate) fn send_gui_event(sender: &Sender<GuiEvent>, event: GuiEvent) {
    if let Err(err) = sender.send(event) {
        error!("Could not send gui event, {err}");
    }
}

pub(crate) fn send_info_notification(sender: &Sender<GuiEvent>, msg: Messages) {
    send_gui_event(sender, GuiEvent::ShowInfoNotification(msg.into()));
}

pub(crate) fn send_error_notification(sender: &Sender<GuiEvent>, msg: Messages) {
    send_gui_event(sender, GuiEvent::ShowErrorNotification(msg.into()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;

    #[test]
    fn notifications_carry_the_message() {
        let (sender, receiver) = channel::<GuiEvent>();
        send_info_notification(&sender, Messages::EntryUpdated);
        send_error_notification(&sender, Messages::CouldNotSaveEntry);
        match receiver.try_recv() {
            Ok(GuiEvent::ShowInfoNotification(msg)) => {
                assert_eq!(msg, Messages::EntryUpdated.msg())
            }
            other => panic!("unexpected event {other:?}"),
        }
        match receiver.try_recv() {
            Ok(GuiEvent::ShowErrorNotification(msg)) => {
                assert_eq!(msg, Messages::CouldNotSaveEntry.msg())
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn sending_to_a_closed_channel_is_not_fatal() {
        let (sender, receiver) = channel::<GuiEvent>();
        drop(receiver);
        send_info_notification(&sender, Messages::EntryCreated);
    }
}
