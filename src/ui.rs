use ratatui::{
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, List, ListItem, ListState, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState,
    },
    Frame,
};

use crate::picker::Picker;
use crate::selection::{PickerRow, Section};
use crate::theme::Theme;

pub fn draw(frame: &mut Frame, picker: &Picker, theme: &Theme) {
    let show_search_line = picker.config().show_search && picker.navigation().is_searching();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(if show_search_line { 1 } else { 0 }),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_crumbs(frame, picker, theme, chunks[0]);
    if show_search_line {
        draw_search_line(frame, picker, theme, chunks[1]);
    }
    draw_candidates(frame, picker, theme, chunks[2]);
    draw_status_bar(frame, picker, theme, chunks[3]);
}

fn draw_crumbs(frame: &mut Frame, picker: &Picker, theme: &Theme, area: Rect) {
    let crumbs = picker.crumbs();
    let last = crumbs.len().saturating_sub(1);

    let mut spans = Vec::new();
    for (i, crumb) in crumbs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" / ", Style::default().fg(theme.crumb)));
        }
        let style = if i == last {
            Style::default().fg(theme.crumb_current).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.crumb)
        };
        spans.push(Span::styled(crumb.name.clone(), style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_search_line(frame: &mut Frame, picker: &Picker, theme: &Theme, area: Rect) {
    let line = Line::from(vec![
        Span::styled("Search: ", Style::default().fg(theme.crumb)),
        Span::styled(
            format!("{}█", picker.search_draft()),
            Style::default().fg(theme.search_text),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn row_line(row: &PickerRow, theme: &Theme) -> Line<'static> {
    let presentation = theme.resolve(&row.item);
    let marker = if row.selected { "✓ " } else { "  " };
    let suffix = if row.expandable { " ›" } else { "" };

    let name_style = if row.is_navigable_only() {
        Style::default().fg(theme.navigable_only)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::styled(marker, Style::default().fg(theme.selected_marker)),
        Span::styled(format!("{} ", presentation.icon), Style::default().fg(presentation.color)),
        Span::styled(row.item.name().to_string(), name_style),
        Span::styled(suffix, Style::default().fg(theme.crumb)),
    ])
}

fn draw_candidates(frame: &mut Frame, picker: &Picker, theme: &Theme, area: Rect) {
    let title = match picker.navigation().search_string() {
        "" => " Collections ".to_string(),
        query => format!(" Results for \"{}\" ", query),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.active_border));

    let rows = picker.rows();
    if rows.is_empty() {
        let placeholder = if picker.is_loading_tree() || picker.is_loading_search() {
            "Loading..."
        } else {
            "Nothing to pick here"
        };
        let paragraph = Paragraph::new(placeholder)
            .block(block)
            .style(Style::default().fg(theme.placeholder));
        frame.render_widget(paragraph, area);
        return;
    }

    let mut items: Vec<ListItem> = Vec::with_capacity(rows.len() + 1);
    let mut previous_section = None;
    let mut cursor_index = picker.cursor();
    for (i, row) in rows.iter().enumerate() {
        // Separate the tree listing from search hits
        if previous_section == Some(Section::Tree) && row.section == Section::Search {
            items.push(ListItem::new(Line::styled("──", Style::default().fg(theme.placeholder))));
            if i <= picker.cursor() {
                cursor_index += 1;
            }
        }
        previous_section = Some(row.section);
        items.push(ListItem::new(row_line(row, theme)));
    }
    let item_count = items.len();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(theme.cursor_bg)
            .fg(theme.cursor_fg)
            .add_modifier(Modifier::BOLD),
    );

    let mut list_state = ListState::default().with_selected(Some(cursor_index));
    frame.render_stateful_widget(list, area, &mut list_state);

    if picker.config().show_scroll {
        let mut scrollbar_state = ScrollbarState::new(item_count).position(cursor_index);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

fn draw_status_bar(frame: &mut Frame, picker: &Picker, theme: &Theme, area: Rect) {
    let keys = &picker.config().keybindings;
    let help = if picker.navigation().is_searching() {
        "Enter: search/pick  Esc: close search".to_string()
    } else if picker.config().show_search {
        format!(
            "Enter: pick  →: open  ←: up  {}: search  {}: quit",
            keys.search, keys.quit
        )
    } else {
        format!("Enter: pick  →: open  ←: up  {}: quit", keys.quit)
    };

    let line = Line::from(vec![
        Span::raw(format!(" {} ", picker.status_message)),
        Span::raw("│ "),
        Span::raw(help),
    ]);
    let paragraph = Paragraph::new(line)
        .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg));
    frame.render_widget(paragraph, area);
}
