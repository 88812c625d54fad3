use std::cell::RefCell;
use std::io::stdout;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use log::{debug, error, info};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tui_widgets::popup::PopupState;

use crate::config::{Config, UiColors, UiIcons};
use crate::store::{Change, ContactStore, DeleteRequest, EditSession, Snapshot, StoreError};

use super::draw;
use super::form::{ContactForm, FormField};

#[derive(Debug, Clone)]
pub struct ConfirmModal {
    pub title: String,
    pub message: String,
    pub request: DeleteRequest,
}

/// Help modal state with scroll support
#[derive(Debug, Clone)]
pub struct HelpModal {
    /// Current scroll offset (line index at top of viewport)
    pub scroll: usize,
    /// Total number of content lines
    pub total_lines: usize,
    /// Viewport height (set during rendering)
    pub viewport_height: usize,
}

impl HelpModal {
    pub fn new(total_lines: usize) -> Self {
        Self {
            scroll: 0,
            total_lines,
            viewport_height: 10, // Will be updated during render
        }
    }

    pub fn scroll_down(&mut self, lines: usize) {
        let max_scroll = self.total_lines.saturating_sub(self.viewport_height);
        self.scroll = (self.scroll + lines).min(max_scroll);
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn can_scroll_up(&self) -> bool {
        self.scroll > 0
    }

    pub fn can_scroll_down(&self) -> bool {
        self.scroll + self.viewport_height < self.total_lines
    }
}

/// A section in the help modal (e.g., "Global", "List")
pub struct HelpSection {
    pub title: &'static str,
    pub entries: Vec<HelpEntry>,
}

/// A single help entry (action name + key bindings)
pub struct HelpEntry {
    pub action: &'static str,
    pub keys: String,
}

pub struct App<'a> {
    config: &'a Config,
    store: ContactStore,
    pub selected: usize,
    pub form: Option<ContactForm>,
    pub status: Option<String>,
    // Popup state for modal dialog (tui-widgets popup)
    pub modal_popup: PopupState,
    // Delete confirmation modal
    pub confirm_modal: Option<ConfirmModal>,
    // Help modal (F1)
    pub help_modal: Option<HelpModal>,
    // Store notifications not yet applied to the view
    changes: Rc<RefCell<Vec<Change>>>,
    needs_redraw: bool,
}

impl<'a> App<'a> {
    pub fn new(config: &'a Config) -> Self {
        let mut store = ContactStore::new();
        let changes: Rc<RefCell<Vec<Change>>> = Rc::default();
        let sink = Rc::clone(&changes);
        store.subscribe(move |event| sink.borrow_mut().push(event.change.clone()));

        Self {
            config,
            store,
            selected: 0,
            form: None,
            status: None,
            modal_popup: PopupState::default(),
            confirm_modal: None,
            help_modal: None,
            changes,
            needs_redraw: true,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        info!("event=ui_start");
        let result = self.event_loop(&mut terminal);

        restore_terminal()?;
        terminal.show_cursor()?;
        info!("event=ui_stop contacts={}", self.store.len());

        result
    }

    fn event_loop<B>(&mut self, terminal: &mut Terminal<B>) -> Result<()>
    where
        B: ratatui::backend::Backend,
    {
        loop {
            if self.needs_redraw {
                draw::render(terminal, self)?;
                self.needs_redraw = false;
            }

            if event::poll(Duration::from_millis(250))? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key)? {
                            break;
                        }
                        self.needs_redraw = true;
                    }
                    Event::Resize(_, _) => self.needs_redraw = true,
                    _ => {}
                }
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        // Ctrl+C always quits (hardcoded for safety)
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            return Ok(true);
        }

        let quit = if self.help_modal.is_some() {
            self.handle_help_modal_key(key);
            false
        } else if self.confirm_modal.is_some() {
            self.handle_confirm_modal_key(key);
            false
        } else if self.form.is_some() {
            self.handle_form_key(key);
            false
        } else {
            self.handle_list_key(key)
        };

        self.apply_changes();
        Ok(quit)
    }

    /// Handle keys while the contact list has focus
    fn handle_list_key(&mut self, key: KeyEvent) -> bool {
        let config = self.config;
        let global = &config.keys.global;
        let list = &config.keys.list;

        if key_matches_any(&key, &global.quit) {
            return true;
        }

        if key_matches_any(&key, &global.help) {
            self.show_help();
            return false;
        }

        if key_matches_any(&key, &list.next) {
            self.move_selection(1);
            return false;
        }
        if key_matches_any(&key, &list.prev) {
            self.move_selection(-1);
            return false;
        }

        if key_matches_any(&key, &list.add) {
            self.store.begin_create();
            self.open_form();
            self.set_status("New contact");
            return false;
        }

        if key_matches_any(&key, &list.edit) {
            if self.store.is_empty() {
                self.set_status("No contact selected");
                return false;
            }
            match self.store.begin_edit(self.selected) {
                Ok(()) => {
                    self.open_form();
                    self.set_status("Edit contact");
                }
                Err(err) => self.fault(err),
            }
            return false;
        }

        if key_matches_any(&key, &list.delete) {
            if self.store.is_empty() {
                self.set_status("No contact selected");
                return false;
            }
            match self.store.request_delete(self.selected) {
                Ok(request) => {
                    self.modal_popup = PopupState::default();
                    self.confirm_modal = Some(ConfirmModal {
                        title: "DELETE CONTACT?".to_string(),
                        message: format!("Remove \"{}\"?", request.contact().name),
                        request,
                    });
                }
                Err(err) => self.fault(err),
            }
            return false;
        }

        false
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let config = self.config;
        let form_keys = &config.keys.form;

        if key_matches_any(&key, &form_keys.cancel) {
            self.store.cancel();
            self.form = None;
            self.set_status("Cancelled");
            return;
        }

        if key_matches_any(&key, &form_keys.confirm) {
            let editing = self.store.session().is_editing();
            match self.store.commit() {
                Ok(_) => {
                    self.form = None;
                    self.set_status(if editing { "Contact updated" } else { "Contact added" });
                }
                Err(StoreError::EmptyName) => {
                    if let Some(form) = self.form.as_mut() {
                        form.set_focus(FormField::Name);
                    }
                    self.set_status("Name is required");
                }
                Err(err) => {
                    self.store.cancel();
                    self.form = None;
                    self.fault(err);
                }
            }
            return;
        }

        let Some(form) = self.form.as_mut() else {
            return;
        };

        if key_matches_any(&key, &form_keys.next_field) {
            form.focus_next();
            return;
        }
        if key_matches_any(&key, &form_keys.prev_field) {
            form.focus_prev();
            return;
        }

        if let Some(update) = form.handle_key_event(key) {
            if let Err(err) = self.store.update_draft_field(update) {
                self.fault(err);
            }
        }
    }

    fn handle_confirm_modal_key(&mut self, key: KeyEvent) {
        let Some(modal) = self.confirm_modal.take() else {
            return;
        };

        let config = self.config;
        let modal_keys = &config.keys.modal;

        // Cancel: close modal without action
        if key_matches_any(&key, &modal_keys.cancel) {
            debug!("event=delete_declined index={}", modal.request.index());
            self.set_status("Delete cancelled");
            return;
        }

        if key_matches_any(&key, &modal_keys.confirm) {
            match self.store.confirm_delete(&modal.request) {
                Ok(removed) => self.set_status(format!("Removed \"{}\"", removed.name)),
                Err(err) => self.fault(err),
            }
            return;
        }

        // Put the modal back if key wasn't handled
        self.confirm_modal = Some(modal);
    }

    fn handle_help_modal_key(&mut self, key: KeyEvent) {
        let keys = &self.config.keys;
        let close = key_matches_any(&key, &keys.modal.cancel)
            || key_matches_any(&key, &keys.modal.confirm)
            || key_matches_any(&key, &keys.global.help)
            || key_matches_any(&key, &keys.global.quit);
        if close {
            self.help_modal = None;
            return;
        }

        let down = key_matches_any(&key, &keys.list.next);
        let up = key_matches_any(&key, &keys.list.prev);
        if let Some(modal) = self.help_modal.as_mut() {
            if down {
                modal.scroll_down(1);
            } else if up {
                modal.scroll_up(1);
            }
        }
    }

    fn open_form(&mut self) {
        self.form = self.store.session().draft().map(ContactForm::from_draft);
    }

    fn show_help(&mut self) {
        let total = self
            .help_entries()
            .iter()
            .map(|section| section.entries.len() + 2)
            .sum();
        self.help_modal = Some(HelpModal::new(total));
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.store.len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let next = self.selected as isize + delta;
        self.selected = next.clamp(0, len as isize - 1) as usize;
    }

    /// Follow store notifications: select what was just written and keep the
    /// selection inside the list after a removal.
    fn apply_changes(&mut self) {
        let changes: Vec<Change> = self.changes.borrow_mut().drain(..).collect();
        if changes.is_empty() {
            return;
        }
        for change in &changes {
            match change {
                Change::Added { index } | Change::Updated { index } => self.selected = *index,
                Change::Removed { index, .. } => {
                    if self.selected > *index {
                        self.selected -= 1;
                    }
                }
            }
        }
        self.selected = self.selected.min(self.store.len().saturating_sub(1));
        self.needs_redraw = true;
    }

    /// A store call was made with an index or session the store rejected.
    ///
    /// Only reachable through a bug in the key routing, so debug builds stop
    /// here; release builds log and leave the list alone.
    fn fault(&mut self, err: StoreError) {
        error!(
            "event=contract_violation index_fault={} error={}",
            err.is_index_fault(),
            err
        );
        if cfg!(debug_assertions) {
            if let Err(restore_err) = restore_terminal() {
                error!("event=terminal_restore_failed error={}", restore_err);
            }
            panic!("contact store contract violated: {err}");
        }
        self.set_status("Internal error; see log");
    }

    fn set_status<S: Into<String>>(&mut self, message: S) {
        self.status = Some(message.into());
    }

    pub fn contacts(&self) -> Snapshot {
        self.store.contacts()
    }

    pub fn session(&self) -> &EditSession {
        self.store.session()
    }

    pub fn ui_colors(&self) -> &UiColors {
        &self.config.ui.colors
    }

    pub fn icons(&self) -> &UiIcons {
        &self.config.ui.icons
    }

    /// Generate help content from current keybindings configuration
    pub fn help_entries(&self) -> Vec<HelpSection> {
        let keys = &self.config.keys;

        vec![
            HelpSection {
                title: "Global",
                entries: vec![
                    HelpEntry {
                        action: "Quit",
                        keys: keys.global.quit.join(", "),
                    },
                    HelpEntry {
                        action: "Help",
                        keys: keys.global.help.join(", "),
                    },
                ],
            },
            HelpSection {
                title: "List",
                entries: vec![
                    HelpEntry {
                        action: "Next contact",
                        keys: keys.list.next.join(", "),
                    },
                    HelpEntry {
                        action: "Previous contact",
                        keys: keys.list.prev.join(", "),
                    },
                    HelpEntry {
                        action: "New contact",
                        keys: keys.list.add.join(", "),
                    },
                    HelpEntry {
                        action: "Edit contact",
                        keys: keys.list.edit.join(", "),
                    },
                    HelpEntry {
                        action: "Delete contact",
                        keys: keys.list.delete.join(", "),
                    },
                ],
            },
            HelpSection {
                title: "Form",
                entries: vec![
                    HelpEntry {
                        action: "Save",
                        keys: keys.form.confirm.join(", "),
                    },
                    HelpEntry {
                        action: "Cancel",
                        keys: keys.form.cancel.join(", "),
                    },
                    HelpEntry {
                        action: "Next field",
                        keys: keys.form.next_field.join(", "),
                    },
                    HelpEntry {
                        action: "Previous field",
                        keys: keys.form.prev_field.join(", "),
                    },
                    HelpEntry {
                        action: "Change category",
                        keys: "Left, Right, Space".to_string(),
                    },
                ],
            },
            HelpSection {
                title: "Dialogs",
                entries: vec![
                    HelpEntry {
                        action: "Confirm",
                        keys: keys.modal.confirm.join(", "),
                    },
                    HelpEntry {
                        action: "Cancel",
                        keys: keys.modal.cancel.join(", "),
                    },
                ],
            },
        ]
    }
}

/// Check if the key event matches any of the given bindings
/// Leave raw mode and the alternate screen. Safe to call when neither is active.
fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

fn key_matches_any(event: &KeyEvent, bindings: &[String]) -> bool {
    bindings.iter().any(|b| key_matches_single(event, b))
}

/// Check if the key event matches a single binding string
fn key_matches_single(event: &KeyEvent, binding: &str) -> bool {
    let trimmed = binding.trim();
    if trimmed.is_empty() {
        return false;
    }

    // Disallow Ctrl/Alt/Super modifiers (we don't support them)
    let disallowed = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER;
    if event.modifiers.intersects(disallowed) {
        return false;
    }

    match trimmed.to_ascii_lowercase().as_str() {
        // Special keys
        "enter" => matches!(event.code, KeyCode::Enter),
        "tab" => matches!(event.code, KeyCode::Tab),
        "backtab" | "shift+tab" => matches!(event.code, KeyCode::BackTab),
        "backspace" => matches!(event.code, KeyCode::Backspace),
        "delete" | "del" => matches!(event.code, KeyCode::Delete),
        "esc" | "escape" => matches!(event.code, KeyCode::Esc),
        "space" => matches!(event.code, KeyCode::Char(' ')),
        // Arrow keys
        "up" => matches!(event.code, KeyCode::Up),
        "down" => matches!(event.code, KeyCode::Down),
        "left" => matches!(event.code, KeyCode::Left),
        "right" => matches!(event.code, KeyCode::Right),
        // Page navigation
        "pageup" | "page_up" => matches!(event.code, KeyCode::PageUp),
        "pagedown" | "page_down" => matches!(event.code, KeyCode::PageDown),
        "home" => matches!(event.code, KeyCode::Home),
        "end" => matches!(event.code, KeyCode::End),
        // Function keys
        name if name.len() > 1 && name.starts_with('f') => match name[1..].parse::<u8>() {
            Ok(n) if (1..=12).contains(&n) => event.code == KeyCode::F(n),
            _ => false,
        },
        // Single character - case-sensitive (n != N, since N requires Shift)
        _ => {
            let mut chars = trimmed.chars();
            if let (Some(first), None) = (chars.next(), chars.next()) {
                matches!(event.code, KeyCode::Char(c) if c == first)
            } else {
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Category, Contact};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(key(code)).unwrap()
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn add_contact(app: &mut App, name: &str, number: &str) {
        press(app, KeyCode::Char('a'));
        type_text(app, name);
        press(app, KeyCode::Tab);
        type_text(app, number);
        press(app, KeyCode::Enter);
    }

    #[test]
    fn test_key_matching() {
        assert!(key_matches_single(&key(KeyCode::Enter), "Enter"));
        assert!(key_matches_single(&key(KeyCode::Esc), "esc"));
        assert!(key_matches_single(&key(KeyCode::F(1)), "F1"));
        assert!(key_matches_single(&key(KeyCode::F(12)), "f12"));
        assert!(!key_matches_single(&key(KeyCode::F(1)), "F13"));
        assert!(key_matches_single(&key(KeyCode::Char('n')), "n"));
        assert!(!key_matches_single(&key(KeyCode::Char('N')), "n"));
        assert!(key_matches_single(&key(KeyCode::Char('f')), "f"));
        let ctrl_n = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL);
        assert!(!key_matches_single(&ctrl_n, "n"));
    }

    #[test]
    fn test_add_contact_through_form() {
        let config = Config::default();
        let mut app = App::new(&config);

        press(&mut app, KeyCode::Char('a'));
        assert!(app.form.is_some());
        assert!(matches!(app.session(), EditSession::Creating { .. }));

        type_text(&mut app, "Ana");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "123");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        assert_eq!(
            app.session().draft().map(|d| d.category),
            Some(Some(Category::Personal))
        );
        press(&mut app, KeyCode::Enter);

        assert!(app.form.is_none());
        assert!(!app.session().is_open());
        assert_eq!(
            app.contacts().contacts(),
            &[Contact::new("Ana", "123", Some(Category::Personal))]
        );
        assert_eq!(app.status.as_deref(), Some("Contact added"));
    }

    #[test]
    fn test_form_swallows_list_keys() {
        let config = Config::default();
        let mut app = App::new(&config);

        press(&mut app, KeyCode::Char('a'));
        // 'q' is typed into the name, not treated as quit
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.session().draft().unwrap().name, "q");
    }

    #[test]
    fn test_empty_name_keeps_form_open() {
        let config = Config::default();
        let mut app = App::new(&config);

        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "555");
        press(&mut app, KeyCode::Enter);

        assert!(app.form.is_some());
        assert_eq!(app.form.as_ref().unwrap().focus(), FormField::Name);
        assert_eq!(app.status.as_deref(), Some("Name is required"));
        assert!(app.contacts().is_empty());
        assert!(matches!(app.session(), EditSession::Creating { .. }));
    }

    #[test]
    fn test_edit_prefills_and_replaces_selected() {
        let config = Config::default();
        let mut app = App::new(&config);
        add_contact(&mut app, "Ana", "123");
        add_contact(&mut app, "Bruno", "456");
        assert_eq!(app.selected, 1);

        press(&mut app, KeyCode::Char('k'));
        press(&mut app, KeyCode::Char('e'));
        let form = app.form.as_ref().unwrap();
        assert_eq!(form.name(), "Ana");
        assert_eq!(form.number(), "123");

        press(&mut app, KeyCode::Tab);
        for _ in 0..3 {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "999");
        press(&mut app, KeyCode::Enter);

        let contacts = app.contacts();
        assert_eq!(contacts.get(0), Some(&Contact::new("Ana", "999", None)));
        assert_eq!(contacts.get(1), Some(&Contact::new("Bruno", "456", None)));
        assert_eq!(app.selected, 0);
        assert_eq!(app.status.as_deref(), Some("Contact updated"));
    }

    #[test]
    fn test_cancel_edit_discards_changes() {
        let config = Config::default();
        let mut app = App::new(&config);
        add_contact(&mut app, "Ana", "123");
        let before = app.contacts();

        press(&mut app, KeyCode::Enter);
        type_text(&mut app, " Maria");
        press(&mut app, KeyCode::Esc);

        assert!(app.form.is_none());
        assert!(before.same_list(&app.contacts()));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let config = Config::default();
        let mut app = App::new(&config);
        add_contact(&mut app, "Ana", "1");
        add_contact(&mut app, "Bruno", "2");
        add_contact(&mut app, "Carla", "3");
        press(&mut app, KeyCode::Char('k'));

        press(&mut app, KeyCode::Char('d'));
        let modal = app.confirm_modal.as_ref().unwrap();
        assert_eq!(modal.message, "Remove \"Bruno\"?");
        assert_eq!(app.contacts().len(), 3);

        // Unrelated keys leave the modal up
        press(&mut app, KeyCode::Char('j'));
        assert!(app.confirm_modal.is_some());

        press(&mut app, KeyCode::Char('n'));
        assert!(app.confirm_modal.is_none());
        assert_eq!(app.contacts().len(), 3);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        let contacts = app.contacts();
        let names: Vec<&str> = contacts.contacts().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Carla"]);
        assert_eq!(app.selected, 1);
        assert_eq!(app.status.as_deref(), Some("Removed \"Bruno\""));
    }

    #[test]
    fn test_deleting_last_row_clamps_selection() {
        let config = Config::default();
        let mut app = App::new(&config);
        add_contact(&mut app, "Ana", "1");
        add_contact(&mut app, "Bruno", "2");
        assert_eq!(app.selected, 1);

        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.selected, 0);

        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Enter);
        assert!(app.contacts().is_empty());
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_edit_and_delete_on_empty_list() {
        let config = Config::default();
        let mut app = App::new(&config);
        press(&mut app, KeyCode::Char('e'));
        assert!(app.form.is_none());
        press(&mut app, KeyCode::Char('d'));
        assert!(app.confirm_modal.is_none());
        assert_eq!(app.status.as_deref(), Some("No contact selected"));
    }

    #[test]
    fn test_help_modal_and_quit() {
        let config = Config::default();
        let mut app = App::new(&config);

        press(&mut app, KeyCode::Char('?'));
        assert!(app.help_modal.is_some());
        // Quit closes help first
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert!(app.help_modal.is_none());
        assert!(press(&mut app, KeyCode::Char('q')));

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        press(&mut app, KeyCode::Char('a'));
        assert!(app.handle_key(ctrl_c).unwrap());
    }

    #[test]
    fn test_help_lists_configured_keys() {
        let config = Config::default();
        let app = App::new(&config);
        let sections = app.help_entries();
        let list = sections.iter().find(|s| s.title == "List").unwrap();
        let delete = list.entries.iter().find(|e| e.action == "Delete contact").unwrap();
        assert_eq!(delete.keys, "d, x");
    }

    #[test]
    fn test_restore_terminal_outside_raw_mode() {
        restore_terminal().unwrap();
        restore_terminal().unwrap();
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "contact store contract violated")]
    fn test_fault_panics_in_debug_builds() {
        let config = Config::default();
        let mut app = App::new(&config);
        app.fault(StoreError::IndexOutOfRange { index: 3, len: 0 });
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_fault_sets_status_in_release_builds() {
        let config = Config::default();
        let mut app = App::new(&config);
        app.fault(StoreError::IndexOutOfRange { index: 3, len: 0 });
        assert_eq!(app.status.as_deref(), Some("Internal error; see log"));
        assert!(app.contacts().is_empty());
    }
}
