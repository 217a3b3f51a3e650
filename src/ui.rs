use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::engine::{SortDirection, WindowState};
use crate::mode::Mode;
use crate::util::display_width;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    if app.engine.has_data() {
        render_table(frame, app, chunks[0]);
    } else {
        render_placeholder(frame, app, chunks[0]);
    }
    render_status_bar(frame, app, chunks[1]);
    render_prompt_line(frame, app, chunks[2]);
}

fn render_placeholder(frame: &mut Frame, app: &App, area: Rect) {
    let text = match &app.message {
        Some(msg) => format!("no dataset: {}", msg),
        None => "no dataset: open a .csv file".to_string(),
    };
    let placeholder = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(placeholder, area);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let headers = app.engine.headers();
    let view = app.engine.current_view();

    // First visible row's 1-based position within the filtered view, for
    // the row-number gutter
    let first_pos = match view.window {
        WindowState::Paged {
            page, page_size, ..
        } => (page - 1) * page_size + 1,
        WindowState::Reveal { .. } => 1,
    };

    // Content-driven column widths over the header and the visible rows
    let data_col_widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            view.rows
                .iter()
                .filter_map(|(_, cells)| cells.get(col))
                .map(|cell| display_width(cell))
                .max()
                .unwrap_or(0)
                .max(display_width(header))
                .max(3)
                .min(app.config.max_col_width)
        })
        .collect();

    let row_num_width = (first_pos + view.rows.len()).to_string().len().max(3);

    let mut col_widths: Vec<Constraint> = Vec::with_capacity(headers.len() + 1);
    col_widths.push(Constraint::Length(row_num_width as u16 + 1));
    for w in &data_col_widths {
        col_widths.push(Constraint::Length(*w as u16 + 2));
    }

    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut header_cells: Vec<Cell> = Vec::with_capacity(headers.len() + 1);
    header_cells.push(Cell::from("").style(header_style));
    for (col, name) in headers.iter().enumerate() {
        let label = match view.sort {
            Some(spec) if spec.column == col => match spec.direction {
                SortDirection::Ascending => format!("{} ▲", name),
                SortDirection::Descending => format!("{} ▼", name),
            },
            _ => name.clone(),
        };
        let style = if col == app.sel_col {
            header_style.bg(Color::DarkGray)
        } else {
            header_style
        };
        header_cells.push(Cell::from(label).style(style));
    }
    let header_row = Row::new(header_cells);

    let rows: Vec<Row> = view
        .rows
        .iter()
        .enumerate()
        .map(|(row_idx, (_, cells))| {
            let is_cursor_row = row_idx == app.cursor;

            let mut out: Vec<Cell> = Vec::with_capacity(headers.len() + 1);

            let num_style = if is_cursor_row {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            out.push(Cell::from(format!("{}", first_pos + row_idx)).style(num_style));

            for (col_idx, content) in cells.iter().enumerate() {
                let is_cursor = is_cursor_row && col_idx == app.sel_col;

                let style = if is_cursor {
                    Style::default()
                        .bg(Color::Blue)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else if is_cursor_row {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };

                let display = if is_cursor && app.mode == Mode::Edit {
                    format!("{}_", app.edit_buffer())
                } else {
                    content.clone()
                };

                out.push(Cell::from(display).style(style));
            }

            Row::new(out)
        })
        .collect();

    let table = Table::new(rows, col_widths)
        .header(header_row)
        .block(Block::default().borders(Borders::ALL).title(app.title()));

    frame.render_widget(table, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mode_style = match app.mode {
        Mode::Normal => Style::default().bg(Color::Blue).fg(Color::White),
        Mode::Search => Style::default().bg(Color::Yellow).fg(Color::Black),
        Mode::Edit => Style::default().bg(Color::Green).fg(Color::Black),
    };

    let view = app.engine.current_view();

    let counts = if view.filtered_count == view.total_count {
        format!("rows {}", view.total_count)
    } else {
        format!("rows {}/{}", view.filtered_count, view.total_count)
    };

    let position = match view.window {
        WindowState::Paged {
            page, total_pages, ..
        } => format!("page {}/{}", page, total_pages.max(1)),
        WindowState::Reveal {
            shown, available, ..
        } => format!("shown {}/{}", shown, available),
    };

    let right = format!("{}  {} ", counts, position);

    let status = Line::from(vec![
        Span::styled(
            format!(" {} ", app.mode.display_name()),
            mode_style.add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::raw(app.title()),
        Span::raw(" ".repeat(
            (area.width as usize)
                .saturating_sub(app.title().len() + app.mode.display_name().len() + 3)
                .saturating_sub(right.len()),
        )),
        Span::raw(right),
    ]);

    let status_bar = Paragraph::new(status).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status_bar, area);
}

fn render_prompt_line(frame: &mut Frame, app: &App, area: Rect) {
    let content = match app.mode {
        Mode::Search => format!("/{}", app.search_buffer()),
        Mode::Edit => format!("= {}", app.edit_buffer()),
        Mode::Normal => app.message.clone().unwrap_or_default(),
    };

    let prompt = Paragraph::new(content);
    frame.render_widget(prompt, area);
}
