use crate::util::Colors;
use chrono::{DateTime, Duration, Local};
use eframe::egui::{
    Align, Align2, Color32, Context, CursorIcon, Id, Label, Layout, RichText, Sense, Window,
};
use egui_extras::{Size, StripBuilder};

const TIMEOUT_MS: i64 = 5000;
const MAX_SHOW_TEXT_LEN: usize = 100;
const WINDOW_HEIGHT: f32 = 50.0;

#[derive(Debug, Clone)]
pub(crate) enum Notification {
    Error(InnerNotification),
    Info(InnerNotification),
}

impl Notification {
    fn inner(&self) -> &InnerNotification {
        match self {
            Notification::Info(inner) | Notification::Error(inner) => inner,
        }
    }

    fn inner_mut(&mut self) -> &mut InnerNotification {
        match self {
            Notification::Info(inner) | Notification::Error(inner) => inner,
        }
    }

    fn icon_and_color(&self) -> (&'static str, Color32) {
        match self {
            Notification::Error(_) => ("❎", Colors::Error.col()),
            Notification::Info(_) => ("ℹ", Colors::Info.col()),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct InnerNotification {
    ts: DateTime<Local>,
    text: String,
    hidden: bool,
}

impl InnerNotification {
    pub(crate) fn new(text: String) -> Self {
        Self {
            ts: Local::now(),
            hidden: false,
            text,
        }
    }
}

/// Renders the toasts stacked at the top right, dropping the ones that
/// timed out or were clicked away.
pub(crate) fn render_notifications(ctx: &Context, notifications: &mut Vec<Notification>) {
    let now = Local::now();
    expire(notifications, &now);
    notifications
        .iter_mut()
        .enumerate()
        .for_each(|(i, notification)| {
            let (icon, color) = notification.icon_and_color();
            let text = notification.inner().text.clone();
            if render_notification(ctx, i, &text, icon, color) {
                notification.inner_mut().hidden = true;
            }
        });
    notifications.retain(|n| !n.inner().hidden);
}

fn expire(notifications: &mut [Notification], now: &DateTime<Local>) {
    notifications.iter_mut().for_each(|n| {
        if !is_within_timeout(&n.inner().ts, now) {
            n.inner_mut().hidden = true;
        }
    });
}

fn is_within_timeout(ts: &DateTime<Local>, now: &DateTime<Local>) -> bool {
    let to = *ts + Duration::milliseconds(TIMEOUT_MS);
    to.ge(now)
}

fn shortened(text: &str) -> String {
    if text.chars().count() > MAX_SHOW_TEXT_LEN {
        let mut short: String = text.chars().take(MAX_SHOW_TEXT_LEN).collect();
        short.push_str("...");
        short
    } else {
        text.to_owned()
    }
}

// returns true if the notification was clicked away
fn render_notification(ctx: &Context, idx: usize, text: &str, icon: &str, color: Color32) -> bool {
    let mut hide = false;
    let offset_top: f32 = idx as f32 * WINDOW_HEIGHT + (10.0 + idx as f32 * 20.0);
    Window::new(format!("notification_{idx}"))
        .movable(false)
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .fade_in(false)
        .fade_out(false)
        .anchor(Align2::RIGHT_TOP, [-10.0, offset_top])
        .drag_to_scroll(false)
        .fixed_size([200.0, WINDOW_HEIGHT])
        .show(ctx, |ui| {
            if ui
                .interact(
                    ui.max_rect(),
                    Id::new(format!("notification{idx}clicked")),
                    Sense::click(),
                )
                .clicked()
            {
                hide = true;
            }

            ui.set_width(ui.available_width());
            ui.set_height(ui.available_height());

            StripBuilder::new(ui)
                .size(Size::exact(20.0))
                .size(Size::remainder())
                .size(Size::exact(15.0))
                .horizontal(|mut strip| {
                    strip.cell(|ui| {
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            ui.label(RichText::new(icon).color(color).size(15.0))
                                .on_hover_and_drag_cursor(CursorIcon::Default);
                        });
                    });
                    strip.cell(|ui| {
                        ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
                            ui.add(Label::new(shortened(text)).wrap())
                                .on_hover_text(text);
                        });
                    });
                    strip.cell(|ui| {
                        if ui
                            .label("✖")
                            .on_hover_and_drag_cursor(CursorIcon::Default)
                            .clicked()
                        {
                            hide = true;
                        }
                    });
                });
        });
    hide
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn old_notifications_expire() {
        let mut notifications = vec![
            Notification::Info(InnerNotification::new(String::from("saved"))),
            Notification::Error(InnerNotification::new(String::from("failed"))),
        ];
        let now = Local::now();
        expire(&mut notifications, &now);
        assert!(notifications.iter().all(|n| !n.inner().hidden));

        let later = now + Duration::milliseconds(TIMEOUT_MS + 1000);
        expire(&mut notifications, &later);
        assert!(notifications.iter().all(|n| n.inner().hidden));
    }

    #[test]
    fn long_texts_are_shortened() {
        assert_eq!(shortened("PDF created"), "PDF created");
        let long = "x".repeat(MAX_SHOW_TEXT_LEN + 20);
        let short = shortened(&long);
        assert_eq!(short.chars().count(), MAX_SHOW_TEXT_LEN + 3);
        assert!(short.ends_with("..."));
    }
}
