use anyhow::Result;
use ratatui::backend::Backend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::line::NORMAL as LINE;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};
use ratatui::{Frame, Terminal};
// Use Popup from tui-widgets to render modals
use tui_widgets::popup::Popup;

use crate::config::RgbColor;
use crate::store::{Category, Contact, EditSession};

use super::app::App;
use super::form::{ContactForm, FormField};

const LIST_HELP: &str = "a: add  e/Enter: edit  d: delete  ?: help  q: quit";
const FORM_HELP: &str = "Tab: next field  Left/Right: category  Enter: save  Esc: cancel";
const CONFIRM_HELP: &str = "Y/Enter: confirm  N/Esc: cancel";
const HELP_MODAL_FOOTER: &str = "j/k: scroll  Esc/q: close";
const EMPTY_LIST: &str = "No contacts yet!";

pub fn render<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    terminal.draw(|frame| draw_frame(frame, app))?;
    Ok(())
}

fn draw_frame(frame: &mut Frame<'_>, app: &mut App) {
    let size = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(size);

    draw_header(frame, layout[0], app);
    draw_list(frame, layout[1], app);
    draw_footer(frame, layout[2], app);
    draw_form_modal(frame, size, app);
    draw_confirm_modal(frame, size, app);
    draw_help_modal(frame, size, app);
}

fn draw_header(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let count = app.contacts().len();
    let label = match count {
        1 => "1 CONTACT".to_string(),
        n => format!("{n} CONTACTS"),
    };
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(14)])
        .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(label, header_text_style(app)))),
        chunks[0],
    );

    let colors = app.ui_colors();
    let button_style = Style::default()
        .fg(color(colors.selection_fg))
        .bg(color(colors.selection_bg))
        .add_modifier(Modifier::BOLD);
    frame.render_widget(
        Paragraph::new(" + NEW CONTACT")
            .style(button_style)
            .alignment(Alignment::Center),
        chunks[1],
    );
}

fn draw_list(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(app))
        .title(Span::styled(" CONTACTS ", header_text_style(app)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let snapshot = app.contacts();
    if snapshot.is_empty() {
        render_centered_words(frame, inner, EMPTY_LIST);
        return;
    }

    let name_width = snapshot
        .contacts()
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0);
    let items: Vec<ListItem> = snapshot
        .contacts()
        .iter()
        .map(|contact| build_contact_item(contact, app, name_width))
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.selected.min(snapshot.len() - 1)));

    let list = List::new(items)
        .highlight_style(selection_style(app))
        .highlight_symbol(" ")
        .repeat_highlight_symbol(false);

    frame.render_stateful_widget(list, inner, &mut state);
}

fn build_contact_item(contact: &Contact, app: &App, name_width: usize) -> ListItem<'static> {
    let icon = app.icons().for_category(contact.category).to_string();
    let category = contact.category.map(Category::title).unwrap_or("");
    let text = format!(
        "{} {:<width$}  {:<16} {}",
        icon,
        contact.name,
        contact.number,
        category,
        width = name_width
    );
    ListItem::new(Line::from(text))
}

fn draw_footer(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let message: String = if app.confirm_modal.is_some() {
        CONFIRM_HELP.to_string()
    } else if app.help_modal.is_some() {
        HELP_MODAL_FOOTER.to_string()
    } else if app.form.is_some() {
        match &app.status {
            Some(status) => format!("{status}  |  {FORM_HELP}"),
            None => FORM_HELP.to_string(),
        }
    } else {
        match &app.status {
            Some(status) => format!("{status}  |  {LIST_HELP}"),
            None => LIST_HELP.to_string(),
        }
    };
    let colors = app.ui_colors();
    let style = Style::default()
        .fg(color(colors.status_fg))
        .bg(color(colors.status_bg));

    let background = Block::default().style(Style::default().bg(color(colors.status_bg)));
    frame.render_widget(background, area);

    frame.render_widget(Paragraph::new(message).style(style), area);
}

fn draw_form_modal(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let Some(form) = app.form.as_ref() else {
        return;
    };
    let creating = !matches!(app.session(), EditSession::Editing { .. });

    let width = area.width.saturating_mul(4).saturating_div(5).max(30).min(area.width);
    let height = 13u16.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let modal_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, modal_area);

    let title = if creating { " NEW CONTACT " } else { " EDIT CONTACT " };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(app))
        .title(Span::styled(title, header_text_style(app)));
    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    let mut cursor = None;
    for field in FormField::ALL {
        lines.push(Line::from(Span::styled(
            field.prompt(creating),
            header_text_style(app),
        )));
        let focused = form.focus() == field;
        let marker = if focused { "> " } else { "  " };
        let value_line = match field {
            FormField::Name => Line::from(vec![Span::raw(marker), Span::raw(form.name().to_string())]),
            FormField::Number => {
                Line::from(vec![Span::raw(marker), Span::raw(form.number().to_string())])
            }
            FormField::Category => category_line(form, app, marker, focused),
        };
        if focused {
            if let Some(column) = form.visual_cursor() {
                cursor = Some((lines.len(), marker.len() + column));
            }
        }
        lines.push(value_line);
        lines.push(Line::from(""));
    }

    let submit = if creating { "Add" } else { "Save changes" };
    lines.push(Line::from(vec![
        Span::styled(format!("[Enter] {submit}"), selection_style(app)),
        Span::raw("   "),
        Span::raw("[Esc] Cancel"),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);

    if let Some((line_idx, column)) = cursor {
        let x = inner.x.saturating_add(column as u16);
        let y = inner.y.saturating_add(line_idx as u16);
        frame.set_cursor_position((x, y));
    }
}

fn category_line(form: &ContactForm, app: &App, marker: &'static str, focused: bool) -> Line<'static> {
    let mut spans = vec![Span::raw(marker)];
    let options = std::iter::once(None).chain(Category::ALL.into_iter().map(Some));
    for (idx, option) in options.enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" "));
        }
        let label = match option {
            Some(category) => format!(
                "{} {}",
                app.icons().for_category(Some(category)),
                category.title()
            ),
            None => "None".to_string(),
        };
        let style = if form.category() == option {
            if focused {
                selection_style(app)
            } else {
                header_text_style(app).add_modifier(Modifier::BOLD)
            }
        } else {
            Style::default()
        };
        spans.push(Span::styled(format!(" {label} "), style));
    }
    Line::from(spans)
}

fn draw_confirm_modal(frame: &mut Frame<'_>, area: Rect, app: &mut App) {
    let Some(modal) = app.confirm_modal.as_ref() else {
        return;
    };

    let lines = vec![
        Line::from(modal.message.clone()),
        Line::from("".to_string()),
        Line::from(CONFIRM_HELP.to_string()),
    ];
    let body_text = ratatui::text::Text::from(lines);

    let title_line = Line::from(Span::styled(modal.title.clone(), header_text_style(app)));
    let popup = Popup::new(body_text)
        .title(title_line)
        .border_style(border_style(app));

    frame.render_stateful_widget_ref(popup, area, &mut app.modal_popup);
}

fn draw_help_modal(frame: &mut Frame<'_>, area: Rect, app: &mut App) {
    if app.help_modal.is_none() {
        return;
    }

    // Calculate modal size: 2/3 width, 80% height
    let width = area.width.saturating_mul(2).saturating_div(3).max(40).min(area.width);
    let height = area.height.saturating_mul(4).saturating_div(5).max(10).min(area.height);

    // Center the modal
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let modal_area = Rect::new(x, y, width, height);

    // Clear the area behind the modal
    frame.render_widget(Clear, modal_area);

    // Get styles before any mutable borrows
    let header_style = header_text_style(app);
    let border_s = border_style(app);

    let sections = app.help_entries();
    let mut lines: Vec<Line> = Vec::new();

    let content_width = width.saturating_sub(4) as usize; // Account for borders and padding
    let action_width = 20usize;

    for (section_idx, section) in sections.iter().enumerate() {
        let header_text = format!(" {} ", section.title);
        let padding_total = content_width.saturating_sub(header_text.len());
        let left_pad = padding_total / 2;
        let right_pad = padding_total - left_pad;
        let header_line = format!(
            "{}{}{}",
            LINE.horizontal.repeat(left_pad),
            header_text,
            LINE.horizontal.repeat(right_pad)
        );
        lines.push(Line::from(Span::styled(header_line, header_style)));

        for entry in &section.entries {
            let action = format!("{:<width$}", entry.action, width = action_width);
            lines.push(Line::from(vec![
                Span::styled(action, Style::default()),
                Span::styled(entry.keys.clone(), header_style),
            ]));
        }

        // Blank line between sections (except after the last one)
        if section_idx < sections.len() - 1 {
            lines.push(Line::from(""));
        }
    }

    let total_lines = lines.len();
    // Viewport height is the inner height minus space for footer
    let inner_height = height.saturating_sub(3) as usize; // borders (2) + footer line (1)

    let Some(modal) = app.help_modal.as_mut() else {
        return;
    };
    modal.total_lines = total_lines;
    modal.viewport_height = inner_height;

    // Clamp scroll to valid range
    let max_scroll = modal.total_lines.saturating_sub(modal.viewport_height);
    if modal.scroll > max_scroll {
        modal.scroll = max_scroll;
    }

    let scroll_indicator = match (modal.can_scroll_up(), modal.can_scroll_down()) {
        (true, true) => "▲▼",
        (true, false) => "▲ ",
        (false, true) => " ▼",
        (false, false) => "  ",
    };

    let visible_lines: Vec<Line> = lines
        .into_iter()
        .skip(modal.scroll)
        .take(modal.viewport_height)
        .collect();

    let title = Line::from(vec![
        Span::styled(" HELP ", header_style),
        Span::styled(scroll_indicator, header_style),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_s)
        .title(title);
    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    frame.render_widget(Paragraph::new(visible_lines), layout[0]);
    frame.render_widget(
        Paragraph::new(HELP_MODAL_FOOTER)
            .style(header_style)
            .alignment(Alignment::Center),
        layout[1],
    );
}

fn selection_style(app: &App) -> Style {
    let colors = app.ui_colors();
    Style::default()
        .fg(color(colors.selection_fg))
        .bg(color(colors.selection_bg))
}

fn border_style(app: &App) -> Style {
    let colors = app.ui_colors();
    Style::default().fg(color(colors.border))
}

fn header_text_style(app: &App) -> Style {
    let colors = app.ui_colors();
    Style::default().fg(color(colors.separator))
}

fn render_centered_words(frame: &mut Frame<'_>, area: Rect, text: &str) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let target = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1) / 2,
        width: area.width,
        height: 1,
    };

    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), target);
}

fn color(rgb: RgbColor) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}
