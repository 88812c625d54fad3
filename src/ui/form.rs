use crossterm::event::{Event, KeyCode, KeyEvent};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use crate::store::{Category, Draft, DraftField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Number,
    Category,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Name, FormField::Number, FormField::Category];

    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Number,
            FormField::Number => FormField::Category,
            FormField::Category => FormField::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Name => FormField::Category,
            FormField::Number => FormField::Name,
            FormField::Category => FormField::Number,
        }
    }

    pub fn prompt(self, creating: bool) -> &'static str {
        match (self, creating) {
            (FormField::Name, true) => "Enter the contact's name:",
            (FormField::Name, false) => "Edit the name:",
            (FormField::Number, true) => "Enter the contact's number:",
            (FormField::Number, false) => "Edit the number:",
            (FormField::Category, true) => "Choose a category:",
            (FormField::Category, false) => "Edit the category:",
        }
    }
}

/// Widget state for the add/edit modal.
///
/// The form only mirrors the store's draft buffer: every change is handed
/// back as a [`DraftField`] for the store to apply.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    focus: FormField,
    name: Input,
    number: Input,
    category: Option<Category>,
}

impl ContactForm {
    pub fn from_draft(draft: &Draft) -> Self {
        Self {
            focus: FormField::Name,
            name: Input::new(draft.name.clone()),
            number: Input::new(draft.number.clone()),
            category: draft.category,
        }
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn set_focus(&mut self, field: FormField) {
        self.focus = field;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn name(&self) -> &str {
        self.name.value()
    }

    pub fn number(&self) -> &str {
        self.number.value()
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    /// Cursor column inside the focused text field.
    pub fn visual_cursor(&self) -> Option<usize> {
        match self.focus {
            FormField::Name => Some(self.name.visual_cursor()),
            FormField::Number => Some(self.number.visual_cursor()),
            FormField::Category => None,
        }
    }

    /// Feed a key to the focused field and return the resulting draft update.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<DraftField> {
        match self.focus {
            FormField::Name => {
                let change = self.name.handle_event(&Event::Key(key))?;
                change
                    .value
                    .then(|| DraftField::Name(self.name.value().to_string()))
            }
            FormField::Number => {
                let change = self.number.handle_event(&Event::Key(key))?;
                change
                    .value
                    .then(|| DraftField::Number(self.number.value().to_string()))
            }
            FormField::Category => {
                let next = match key.code {
                    KeyCode::Right | KeyCode::Char(' ') | KeyCode::Char('l') => {
                        Category::cycle_next(self.category)
                    }
                    KeyCode::Left | KeyCode::Char('h') => Category::cycle_prev(self.category),
                    KeyCode::Backspace | KeyCode::Delete => None,
                    _ => return None,
                };
                self.category = next;
                Some(DraftField::Category(next))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_updates_name() {
        let mut form = ContactForm::default();
        assert_eq!(
            form.handle_key_event(key(KeyCode::Char('A'))),
            Some(DraftField::Name("A".into()))
        );
        assert_eq!(
            form.handle_key_event(key(KeyCode::Char('n'))),
            Some(DraftField::Name("An".into()))
        );
        assert_eq!(form.name(), "An");
        assert_eq!(form.visual_cursor(), Some(2));
    }

    #[test]
    fn test_cursor_moves_without_update() {
        let mut form = ContactForm::from_draft(&Draft {
            name: "Ana".into(),
            ..Draft::default()
        });
        assert_eq!(form.handle_key_event(key(KeyCode::Left)), None);
        assert_eq!(form.name(), "Ana");
    }

    #[test]
    fn test_focus_cycles_through_fields() {
        let mut form = ContactForm::default();
        let mut seen = Vec::new();
        for _ in 0..FormField::ALL.len() {
            seen.push(form.focus());
            form.focus_next();
        }
        assert_eq!(seen, FormField::ALL.to_vec());
        assert_eq!(form.focus(), FormField::Name);
        form.focus_prev();
        assert_eq!(form.focus(), FormField::Category);
    }

    #[test]
    fn test_number_field_accepts_any_text() {
        let mut form = ContactForm::default();
        form.set_focus(FormField::Number);
        form.handle_key_event(key(KeyCode::Char('+')));
        let update = form.handle_key_event(key(KeyCode::Char('x')));
        assert_eq!(update, Some(DraftField::Number("+x".into())));
        assert_eq!(form.name(), "");
    }

    #[test]
    fn test_category_cycles_and_clears() {
        let mut form = ContactForm::from_draft(&Draft {
            category: Some(Category::Work),
            ..Draft::default()
        });
        form.set_focus(FormField::Category);
        assert_eq!(form.visual_cursor(), None);

        assert_eq!(
            form.handle_key_event(key(KeyCode::Right)),
            Some(DraftField::Category(Some(Category::Family)))
        );
        assert_eq!(
            form.handle_key_event(key(KeyCode::Char(' '))),
            Some(DraftField::Category(None))
        );
        assert_eq!(
            form.handle_key_event(key(KeyCode::Left)),
            Some(DraftField::Category(Some(Category::Family)))
        );
        assert_eq!(
            form.handle_key_event(key(KeyCode::Backspace)),
            Some(DraftField::Category(None))
        );
        assert_eq!(form.handle_key_event(key(KeyCode::Char('z'))), None);
        assert_eq!(form.category(), None);
    }
}
