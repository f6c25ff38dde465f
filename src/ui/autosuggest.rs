use eframe::egui::{
    Key, Modifiers, PopupCloseBehavior, Response, ScrollArea, TextBuffer, Ui,
    popup::popup_below_widget,
};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use std::cmp::Reverse;

/// Text field with a fuzzy matched popup of known names.
#[derive(Debug)]
pub(crate) struct AutoSuggest {
    selected_index: Option<usize>,
    focused_last_frame: bool,
}

#[derive(Debug)]
enum SelectionMove {
    Up,
    Down,
}

pub(crate) struct AutoSuggestResponse {
    pub(crate) response: Response,
    /// index into the suggested values, set in the frame a suggestion was taken
    pub(crate) picked: Option<usize>,
}

impl AutoSuggest {
    pub(crate) fn new() -> Self {
        Self {
            selected_index: None,
            focused_last_frame: false,
        }
    }

    pub(crate) fn ui(
        &mut self,
        ui: &mut Ui,
        input: &mut String,
        values: &[String],
    ) -> AutoSuggestResponse {
        let data = filter(values, input.as_str());
        let mut picked = None;

        let mut tab_pressed = false;
        let mut enter_pressed = false;

        if self.focused_last_frame {
            ui.input_mut(|i| {
                if i.consume_key(Modifiers::default(), Key::Enter) {
                    enter_pressed = true;
                }

                if i.consume_key(Modifiers::default(), Key::ArrowDown) {
                    self.update_index(SelectionMove::Down, data.len());
                }

                if i.consume_key(Modifiers::default(), Key::ArrowUp) {
                    self.update_index(SelectionMove::Up, data.len());
                }

                if i.consume_key(Modifiers::default(), Key::Tab) {
                    tab_pressed = true;
                }
            });
        }

        let text_field = ui.text_edit_singleline(input);
        let field_id = ui.make_persistent_id(text_field.id);

        let popup_id = field_id.with("popup");

        if tab_pressed {
            if let Some(idx) = self.selected_index.filter(|idx| *idx < data.len()) {
                let (value_idx, text) = data[idx];
                input.replace_with(text);
                picked = Some(value_idx);
                self.selected_index = None;
            }
            ui.memory_mut(|m| {
                m.surrender_focus(field_id);
                m.close_popup();
            });
        }

        popup_below_widget(
            ui,
            popup_id,
            &text_field,
            PopupCloseBehavior::IgnoreClicks,
            |ui| {
                ScrollArea::vertical().max_height(100.0).show(ui, |ui| {
                    for (row, (_, text)) in data.iter().enumerate() {
                        let mut selected = self.selected_index == Some(row);
                        let resp = ui.toggle_value(&mut selected, text.to_string());
                        if resp.hovered() {
                            self.selected_index = Some(row);
                        }
                        if selected {
                            resp.scroll_to_me(None);
                        }
                    }
                });
            },
        );

        self.focused_last_frame = text_field.has_focus();
        if text_field.changed() {
            self.selected_index = None;
        }

        if let Some(idx) = self.selected_index {
            if idx >= data.len() {
                self.selected_index = None;
            }
        }

        if let (Some(idx), true) = (
            self.selected_index,
            self.focused_last_frame && enter_pressed || !ui.memory(|m| m.is_popup_open(popup_id)),
        ) {
            let (value_idx, text) = data[idx];
            input.replace_with(text);
            picked = Some(value_idx);
            self.selected_index = None;
            ui.memory_mut(|m| {
                if m.is_popup_open(popup_id) {
                    m.close_popup();
                    if enter_pressed {
                        m.surrender_focus(field_id);
                    }
                }
            });
        }

        if text_field.has_focus() {
            ui.memory_mut(|m| m.open_popup(popup_id));
        } else {
            ui.memory_mut(|m| {
                if m.is_popup_open(popup_id) {
                    m.close_popup();
                }
            });
        }

        AutoSuggestResponse {
            response: text_field,
            picked,
        }
    }

    fn update_index(&mut self, selection_move: SelectionMove, results_len: usize) {
        if results_len == 0 {
            self.selected_index = None;
            return;
        }

        self.selected_index = match (self.selected_index, selection_move) {
            (None, SelectionMove::Up) => Some(results_len - 1),
            (None, SelectionMove::Down) => Some(0),
            (Some(0), SelectionMove::Up) => None,
            (Some(idx), SelectionMove::Up) => Some(idx - 1),
            (Some(idx), SelectionMove::Down) if idx >= results_len - 1 => None,
            (Some(idx), SelectionMove::Down) => Some(idx + 1),
        };
    }
}

// best match first, each with its index in `data`
fn filter<'a>(data: &'a [String], input: &str) -> Vec<(usize, &'a String)> {
    let matcher = SkimMatcherV2::default();
    let mut res = data
        .iter()
        .enumerate()
        .filter_map(|(idx, s)| {
            let score = matcher.fuzzy_match(s, input);
            score.map(|score| (idx, s, score))
        })
        .collect::<Vec<(usize, &String, i64)>>();
    res.sort_by_key(|k| Reverse(k.2));
    res.into_iter().map(|(idx, s, _)| (idx, s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        vec![
            String::from("Sliding Window"),
            String::from("Door"),
            String::from("Window Grill"),
        ]
    }

    #[test]
    fn filter_keeps_original_indices() {
        let names = names();
        let res = filter(&names, "door");
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].0, 1);
        assert_eq!(res[0].1, "Door");
    }

    #[test]
    fn filter_with_empty_input_returns_all() {
        let names = names();
        assert_eq!(filter(&names, "").len(), 3);
        assert!(filter(&names, "xyz").is_empty());
    }

    #[test]
    fn selection_wraps_to_none() {
        let mut suggest = AutoSuggest::new();
        suggest.update_index(SelectionMove::Down, 2);
        assert_eq!(suggest.selected_index, Some(0));
        suggest.update_index(SelectionMove::Down, 2);
        assert_eq!(suggest.selected_index, Some(1));
        suggest.update_index(SelectionMove::Down, 2);
        assert_eq!(suggest.selected_index, None);
        suggest.update_index(SelectionMove::Up, 2);
        assert_eq!(suggest.selected_index, Some(1));
        suggest.update_index(SelectionMove::Up, 0);
        assert_eq!(suggest.selected_index, None);
    }
}
