// Terminal UI: event loop, board rendering, menu and modal dialogs.
// The model is queried for state and never touches any widget.

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEventKind,
};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Span, Spans, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::{Frame, Terminal};
use std::error::Error;
use std::io;
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

use crate::xsp_board::{Board, BoardConfig, ConfigError};
use crate::xsp_color::{adapt, number_color};
use crate::xsp_config::{self, parse_field, Settings};
use crate::xsp_lang::Lang;
use crate::xsp_session::{ClickOutcome, GameSession, GameState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modal {
    None,
    Rules,
    About,
    Settings,
    Win,
    Loss,
}

// Text entry state of the settings dialog
#[derive(Debug)]
struct SettingsForm {
    rows: String,
    columns: String,
    mines: String,
    focus: u8, // 0=rows, 1=columns, 2=mines
    error: Option<String>,
    field_rects: [Option<Rect>; 3],
}

impl SettingsForm {
    fn from_settings(settings: &Settings) -> Self {
        SettingsForm {
            rows: settings.rows.to_string(),
            columns: settings.columns.to_string(),
            mines: settings.mines.to_string(),
            focus: 0,
            error: None,
            field_rects: [None; 3],
        }
    }

    fn field_mut(&mut self, focus: u8) -> &mut String {
        match focus {
            0 => &mut self.rows,
            1 => &mut self.columns,
            _ => &mut self.mines,
        }
    }
}

// Group runtime UI variables into a single structure to simplify passing them around
#[derive(Debug)]
struct UiState {
    modal: Modal,
    cursor: (usize, usize),
    left_press: Option<(usize, usize)>,
    hover_index: Option<usize>,
    clicked_index: Option<usize>,
    click_instant: Option<Instant>,
    hit_cell: Option<(usize, usize)>,
    modal_rect: Option<Rect>,
    modal_close_rect: Option<Rect>,
    modal_close_hovered: bool,
    modal_close_pressed: bool,
    exit_status_hovered: bool,
    form: SettingsForm,
}

impl UiState {
    fn new(settings: &Settings) -> Self {
        UiState {
            modal: Modal::None,
            cursor: (0, 0),
            left_press: None,
            hover_index: None,
            clicked_index: None,
            click_instant: None,
            hit_cell: None,
            modal_rect: None,
            modal_close_rect: None,
            modal_close_hovered: false,
            modal_close_pressed: false,
            exit_status_hovered: false,
            form: SettingsForm::from_settings(settings),
        }
    }

    fn reset_after_new_game(&mut self) {
        self.modal = Modal::None;
        self.cursor = (0, 0);
        self.left_press = None;
        self.hit_cell = None;
        self.modal_rect = None;
        self.modal_close_rect = None;
        self.modal_close_hovered = false;
        self.modal_close_pressed = false;
        self.form.error = None;
    }
}

pub fn run(settings: &mut Settings, lang: &Lang) -> Result<(), Box<dyn Error>> {
    let config = settings.board_config()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnableMouseCapture, terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut session = GameSession::new(config);
    let mut ui = UiState::new(settings);
    let mut menu_rect: Option<Rect> = None;
    let mut board_rect: Option<Rect> = None;
    let mut status_rect: Option<Rect> = None;
    let mut exit_requested = false;

    // Centralized menu items (key, label); Esc lives in the status bar
    let menu_items = [
        ("F1", lang.assets.menu_rules),
        ("F2", lang.assets.menu_new),
        ("F5", lang.assets.menu_settings),
        ("F9", lang.assets.menu_about),
    ];
    let exit_label = format!("Esc: {}", lang.assets.menu_exit);

    // Glyphs and colors, resolved once for the terminal's capabilities
    let glyph_unopened = "■";
    let glyph_mine = "☼";
    let glyph_flag = "⚑";
    let glyph_misflag = "✕";
    let board_bg = adapt(Color::DarkGray);
    let cursor_bg = adapt(Color::LightBlue);
    let press_bg = adapt(Color::Gray);
    let hit_bg = adapt(Color::Red);
    let unopened_fg = adapt(Color::Gray);
    let mine_fg = adapt(Color::Black);
    let flag_fg = adapt(Color::Red);
    let misflag_fg = adapt(Color::White);
    let err_fg = adapt(Color::Red);
    let field_bg = adapt(Color::DarkGray);
    let field_focus_bg = adapt(Color::Yellow);
    let menu_key_fg = adapt(Color::Yellow);
    let menu_bg_hover = adapt(Color::LightBlue);
    let menu_bg_pressed = adapt(Color::Green);
    let menu_fg_pressed = adapt(Color::Black);
    let num_colors: [Color; 8] = std::array::from_fn(|i| number_color(i as u8 + 1));

    let tick_rate = Duration::from_millis(200);
    let mut last_second = Instant::now();

    loop {
        terminal.draw(|f| {
            let size = f.size();
            let board = session.board();
            let min_width = ((board.columns() * 2 + 7) as u16).max(70);
            let min_height = board.rows() as u16 + 8;
            // If the terminal is too small, render a centered warning and skip normal UI
            if size.width < min_width || size.height < min_height {
                let warn_lines = vec![
                    Spans::from(Span::raw(lang.assets.tsmsg_line1)),
                    Spans::from(Span::raw(
                        lang.assets
                            .tsmsg_line2
                            .replacen("{}", &min_width.to_string(), 1)
                            .replacen("{}", &min_height.to_string(), 1),
                    )),
                ];
                let warn = Paragraph::new(Text::from(warn_lines))
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(lang.assets.tsmsg_title),
                    )
                    .alignment(Alignment::Center);
                f.render_widget(Clear, size);
                let w = 44u16.min(size.width.saturating_sub(2));
                let h = 5u16.min(size.height.saturating_sub(2));
                f.render_widget(warn, centered_block(w, h, size));
                return;
            }

            // layout: top menu row, center board, bottom status
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(0)
                .constraints(
                    [
                        Constraint::Length(3),
                        Constraint::Min(6),
                        Constraint::Length(3),
                    ]
                    .as_ref(),
                )
                .split(size);

            // menu row, per-item styled so hover/click mapping aligns with mouse offsets
            let mut spans_vec: Vec<Span> = Vec::new();
            for (i, (key, rest)) in menu_items.iter().enumerate() {
                if i > 0 {
                    spans_vec.push(Span::raw("   "));
                }
                let (key_style, rest_style) = if Some(i) == ui.clicked_index {
                    (
                        Style::default()
                            .bg(menu_bg_pressed)
                            .fg(menu_fg_pressed)
                            .add_modifier(Modifier::BOLD),
                        Style::default().bg(menu_bg_pressed).fg(menu_fg_pressed),
                    )
                } else if Some(i) == ui.hover_index {
                    (
                        Style::default()
                            .bg(menu_bg_hover)
                            .fg(menu_fg_pressed)
                            .add_modifier(Modifier::BOLD),
                        Style::default().bg(menu_bg_hover).fg(menu_fg_pressed),
                    )
                } else {
                    (
                        Style::default().fg(menu_key_fg).add_modifier(Modifier::BOLD),
                        Style::default(),
                    )
                };
                spans_vec.push(Span::styled(key.to_string(), key_style));
                spans_vec.push(Span::styled(format!(": {}", rest), rest_style));
            }
            spans_vec.insert(0, Span::raw(" "));
            spans_vec.push(Span::raw(" "));
            let menu = Paragraph::new(Spans::from(spans_vec))
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Left);
            f.render_widget(menu, chunks[0]);
            menu_rect = Some(chunks[0]);

            // status row: timer and mine counter left, Esc exit right
            let left_text = status_left_text(lang, &session);
            let inner_w = chunks[2].width.saturating_sub(2) as usize;
            let left_w = left_text.as_str().width();
            let right_w = exit_label.as_str().width();
            let mid_spaces = if inner_w > left_w + right_w + 1 {
                inner_w - left_w - right_w - 1
            } else {
                1
            };
            let exit_style = if ui.exit_status_hovered {
                Style::default()
                    .bg(menu_bg_hover)
                    .fg(menu_fg_pressed)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(menu_key_fg).add_modifier(Modifier::BOLD)
            };
            let status_spans = vec![
                Span::raw(left_text),
                Span::raw(" ".repeat(mid_spaces)),
                Span::styled(exit_label.clone(), exit_style),
                Span::raw(" "),
            ];
            let status = Paragraph::new(Spans::from(status_spans))
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Left);
            f.render_widget(status, chunks[2]);
            status_rect = Some(chunks[2]);

            // board pane
            let board_area = centered_block(
                (board.columns() * 2 + 3) as u16,
                (board.rows() + 2) as u16,
                chunks[1],
            );
            board_rect = Some(board_area);
            let mut lines = vec![];
            for r in 0..board.rows() {
                let mut spans = vec![];
                for c in 0..board.columns() {
                    let Some(cell) = board.cell(r, c) else { continue };
                    let mut text = glyph_unopened.to_string();
                    let mut style = Style::default().fg(unopened_fg).bg(board_bg);
                    if cell.is_revealed {
                        if cell.is_mine {
                            text = glyph_mine.to_string();
                            style = style.fg(mine_fg);
                            if ui.hit_cell == Some((r, c)) {
                                style = style.bg(hit_bg);
                            }
                        } else if cell.adjacent_mines > 0 {
                            text = cell.adjacent_mines.to_string();
                            style = style.fg(num_colors[(cell.adjacent_mines - 1) as usize]);
                        } else {
                            text = " ".to_string();
                        }
                    } else if cell.is_flagged {
                        if session.state() == GameState::Lost && !cell.is_mine {
                            // wrong flag, shown once the game is lost
                            text = glyph_misflag.to_string();
                            style = style.fg(misflag_fg);
                        } else {
                            text = glyph_flag.to_string();
                            style = style.fg(flag_fg);
                        }
                    }
                    if ui.cursor == (r, c) && !session.is_over() {
                        style = style.bg(cursor_bg);
                    }
                    if ui.left_press == Some((r, c)) && !cell.is_revealed && !cell.is_flagged {
                        style = style.bg(press_bg).fg(press_bg);
                    }
                    spans.push(Span::styled(format!(" {}", text), style));
                }
                spans.push(Span::styled(" ", Style::default().bg(board_bg)));
                lines.push(Spans::from(spans));
            }
            let board_widget = Paragraph::new(Text::from(lines))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!("{}x{}", board.rows(), board.columns()))
                        .title_alignment(Alignment::Center),
                )
                .alignment(Alignment::Left);
            f.render_widget(board_widget, board_area);

            // modals
            ui.modal_rect = None;
            ui.modal_close_rect = None;
            match ui.modal {
                Modal::None => {}
                Modal::Rules => {
                    let mrect = centered_block(58, 12, size);
                    ui.modal_rect = Some(mrect);
                    f.render_widget(Clear, mrect);
                    f.render_widget(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(lang.assets.menu_rules),
                        mrect,
                    );
                    let inner = inner_rect(mrect);
                    let rule_lines = vec![
                        Spans::from(Span::raw("")),
                        Spans::from(Span::raw(lang.assets.rules_goal)),
                        Spans::from(Span::raw(lang.assets.rules_left)),
                        Spans::from(Span::raw(lang.assets.rules_right)),
                        Spans::from(Span::raw(lang.assets.rules_numbers)),
                        Spans::from(Span::raw(lang.assets.rules_mine)),
                        Spans::from(Span::raw(lang.assets.rules_win)),
                    ];
                    let p = Paragraph::new(Text::from(rule_lines)).alignment(Alignment::Left);
                    f.render_widget(p, inner);
                    render_modal_button(f, &mut ui, mrect, lang.assets.btn_close);
                }
                Modal::About => {
                    let mrect = centered_block(48, 9, size);
                    ui.modal_rect = Some(mrect);
                    f.render_widget(Clear, mrect);
                    f.render_widget(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(lang.assets.menu_about),
                        mrect,
                    );
                    let inner = inner_rect(mrect);
                    let about_lines = vec![
                        Spans::from(Span::raw("")),
                        Spans::from(Span::raw(lang.assets.about_description)),
                        Spans::from(Span::raw("")),
                        Spans::from(Span::raw(
                            lang.assets
                                .about_version_fmt
                                .replacen("{}", env!("CARGO_PKG_VERSION"), 1),
                        )),
                    ];
                    let p = Paragraph::new(Text::from(about_lines)).alignment(Alignment::Center);
                    f.render_widget(p, inner);
                    render_modal_button(f, &mut ui, mrect, lang.assets.btn_close);
                }
                Modal::Settings => {
                    let mrect = centered_block(44, 12, size);
                    ui.modal_rect = Some(mrect);
                    f.render_widget(Clear, mrect);
                    f.render_widget(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(lang.assets.menu_settings),
                        mrect,
                    );
                    let inner = inner_rect(mrect);
                    let labels = [
                        lang.assets.set_rows_label,
                        lang.assets.set_columns_label,
                        lang.assets.set_mines_label,
                    ];
                    let label_width = labels.iter().map(|s| s.width()).max().unwrap_or(0) + 2;
                    let values = [&ui.form.rows, &ui.form.columns, &ui.form.mines];
                    let mut form_lines = vec![Spans::from(Span::raw(""))];
                    for (i, (label, value)) in labels.iter().zip(values.iter()).enumerate() {
                        let field_style = if ui.form.focus == i as u8 {
                            Style::default().bg(field_focus_bg).fg(menu_fg_pressed)
                        } else {
                            Style::default().bg(field_bg)
                        };
                        let mut padded = label.to_string();
                        padded.push_str(&" ".repeat(label_width.saturating_sub(label.width())));
                        form_lines.push(Spans::from(vec![
                            Span::raw(" "),
                            Span::raw(padded),
                            Span::styled(format!("{:<3}", value), field_style),
                        ]));
                        form_lines.push(Spans::from(Span::raw("")));
                    }
                    if let Some(err) = &ui.form.error {
                        form_lines.push(Spans::from(Span::styled(
                            format!(" {}", err),
                            Style::default().fg(err_fg).add_modifier(Modifier::BOLD),
                        )));
                    }
                    let p = Paragraph::new(Text::from(form_lines)).alignment(Alignment::Left);
                    f.render_widget(p, inner);
                    let field_x = inner.x + 1 + label_width as u16;
                    ui.form.field_rects = [
                        Some(Rect::new(field_x, inner.y + 1, 3, 1)),
                        Some(Rect::new(field_x, inner.y + 3, 3, 1)),
                        Some(Rect::new(field_x, inner.y + 5, 3, 1)),
                    ];
                    render_modal_button(f, &mut ui, mrect, lang.assets.btn_ok);
                }
                Modal::Win => {
                    let mrect = bottom_centered_block(46, 9, size);
                    ui.modal_rect = Some(mrect);
                    f.render_widget(Clear, mrect);
                    f.render_widget(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(lang.assets.win_title),
                        mrect,
                    );
                    let inner = inner_rect(mrect);
                    let win_lines = vec![
                        Spans::from(Span::raw("")),
                        Spans::from(Span::raw(lang.assets.win_message)),
                        Spans::from(Span::raw(
                            lang.assets
                                .win_time_fmt
                                .replacen("{}", &session.elapsed_seconds().to_string(), 1),
                        )),
                        Spans::from(Span::raw(lang.assets.win_hint)),
                    ];
                    let p = Paragraph::new(Text::from(win_lines)).alignment(Alignment::Center);
                    f.render_widget(p, inner);
                    render_modal_button(f, &mut ui, mrect, lang.assets.btn_close);
                }
                Modal::Loss => {
                    let mrect = bottom_centered_block(46, 8, size);
                    ui.modal_rect = Some(mrect);
                    f.render_widget(Clear, mrect);
                    f.render_widget(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(lang.assets.loss_title),
                        mrect,
                    );
                    let inner = inner_rect(mrect);
                    let loss_lines = vec![
                        Spans::from(Span::raw("")),
                        Spans::from(Span::raw(lang.assets.loss_message)),
                        Spans::from(Span::raw(lang.assets.win_hint)),
                    ];
                    let p = Paragraph::new(Text::from(loss_lines)).alignment(Alignment::Center);
                    f.render_widget(p, inner);
                    render_modal_button(f, &mut ui, mrect, lang.assets.btn_close);
                }
            }
        })?;

        // If no modal was rendered this frame, the close button state is stale
        if ui.modal_rect.is_none() {
            ui.modal_close_hovered = false;
            ui.modal_close_pressed = false;
        }

        if event::poll(tick_rate)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match ui.modal {
                    Modal::Settings => match key.code {
                        KeyCode::Char(ch) if ch.is_ascii_digit() => {
                            let focus = ui.form.focus;
                            let max_len = if focus == 2 { 3 } else { 2 };
                            let field = ui.form.field_mut(focus);
                            if field.len() < max_len {
                                field.push(ch);
                            }
                            ui.form.error = None;
                        }
                        KeyCode::Backspace => {
                            let focus = ui.form.focus;
                            ui.form.field_mut(focus).pop();
                            ui.form.error = None;
                        }
                        KeyCode::Tab | KeyCode::Down => {
                            ui.form.focus = (ui.form.focus + 1) % 3;
                        }
                        KeyCode::BackTab | KeyCode::Up => {
                            ui.form.focus = if ui.form.focus == 0 { 2 } else { ui.form.focus - 1 };
                        }
                        KeyCode::Enter => {
                            apply_settings_form(settings, &mut session, &mut ui, lang);
                        }
                        KeyCode::Esc => {
                            ui.modal = Modal::None;
                            ui.form.error = None;
                        }
                        _ => {}
                    },
                    Modal::Rules | Modal::About | Modal::Win | Modal::Loss => {
                        // any key closes the dialog; the finished board stays visible
                        ui.modal = Modal::None;
                        ui.modal_close_hovered = false;
                        ui.modal_close_pressed = false;
                    }
                    Modal::None => match key.code {
                        KeyCode::Esc => break,
                        KeyCode::F(1) => ui.modal = Modal::Rules,
                        KeyCode::F(2) => do_restart(&mut session, &mut ui, None),
                        KeyCode::F(5) => {
                            ui.form = SettingsForm::from_settings(settings);
                            ui.modal = Modal::Settings;
                        }
                        KeyCode::F(9) => ui.modal = Modal::About,
                        KeyCode::Left => step_cursor(&mut ui, session.board(), 0, -1),
                        KeyCode::Right => step_cursor(&mut ui, session.board(), 0, 1),
                        KeyCode::Up => step_cursor(&mut ui, session.board(), -1, 0),
                        KeyCode::Down => step_cursor(&mut ui, session.board(), 1, 0),
                        KeyCode::Char(' ') => {
                            let (r, c) = ui.cursor;
                            do_reveal(&mut session, &mut ui, &mut last_second, r, c);
                        }
                        KeyCode::Char('f') | KeyCode::Char('F') => {
                            let (r, c) = ui.cursor;
                            let _ = session.on_right_click(r, c);
                        }
                        _ => {}
                    },
                },
                Event::Mouse(me) => {
                    if ui.modal != Modal::None {
                        match me.kind {
                            MouseEventKind::Moved => {
                                ui.modal_close_hovered = ui
                                    .modal_close_rect
                                    .map_or(false, |b| hit(b, me.column, me.row));
                            }
                            MouseEventKind::Down(MouseButton::Left) => {
                                if let Some(btn) = ui.modal_close_rect {
                                    if hit(btn, me.column, me.row) {
                                        ui.modal_close_pressed = true;
                                        continue;
                                    }
                                }
                                if ui.modal == Modal::Settings {
                                    for i in 0..3 {
                                        if let Some(rect) = ui.form.field_rects[i] {
                                            if hit(rect, me.column, me.row) {
                                                ui.form.focus = i as u8;
                                            }
                                        }
                                    }
                                }
                            }
                            MouseEventKind::Up(MouseButton::Left) => {
                                if ui.modal_close_pressed {
                                    ui.modal_close_pressed = false;
                                    if let Some(btn) = ui.modal_close_rect {
                                        if hit(btn, me.column, me.row) {
                                            if ui.modal == Modal::Settings {
                                                apply_settings_form(
                                                    settings,
                                                    &mut session,
                                                    &mut ui,
                                                    lang,
                                                );
                                            } else {
                                                ui.modal = Modal::None;
                                            }
                                        }
                                    }
                                }
                            }
                            MouseEventKind::Down(MouseButton::Right) => {
                                // right click cancels any modal, like Esc
                                ui.modal = Modal::None;
                                ui.form.error = None;
                                ui.modal_close_pressed = false;
                            }
                            _ => {}
                        }
                    } else {
                        // no modal: decide whether the mouse targets the menu or the board
                        let mut menu_handled = false;
                        if let Some(rect) = menu_rect {
                            if me.row == rect.y + 1 {
                                match me.kind {
                                    MouseEventKind::Moved => {
                                        ui.hover_index = menu_item_at(&menu_items, rect, me.column);
                                        menu_handled = true;
                                    }
                                    MouseEventKind::Down(MouseButton::Left) => {
                                        if let Some(i) = menu_item_at(&menu_items, rect, me.column)
                                        {
                                            ui.clicked_index = Some(i);
                                            ui.click_instant = Some(Instant::now());
                                            match i {
                                                0 => ui.modal = Modal::Rules,
                                                1 => do_restart(&mut session, &mut ui, None),
                                                2 => {
                                                    ui.form = SettingsForm::from_settings(settings);
                                                    ui.modal = Modal::Settings;
                                                }
                                                3 => ui.modal = Modal::About,
                                                _ => {}
                                            }
                                            menu_handled = true;
                                        }
                                    }
                                    MouseEventKind::Up(_) => {
                                        menu_handled = true;
                                    }
                                    _ => {}
                                }
                            } else if let MouseEventKind::Moved = me.kind {
                                ui.hover_index = None;
                            }
                        }
                        if !menu_handled {
                            // status bar Esc label
                            if let Some(srect) = status_rect {
                                if me.row == srect.y + 1 {
                                    let left_w =
                                        status_left_text(lang, &session).as_str().width();
                                    let right_w = exit_label.as_str().width();
                                    let inner_w = srect.width.saturating_sub(2) as usize;
                                    let mid_spaces = if inner_w > left_w + right_w + 1 {
                                        inner_w - left_w - right_w - 1
                                    } else {
                                        1
                                    };
                                    let start_x = srect.x + 1 + (left_w + mid_spaces) as u16;
                                    let end_x = start_x + (right_w as u16).saturating_sub(1);
                                    match me.kind {
                                        MouseEventKind::Moved => {
                                            ui.exit_status_hovered =
                                                me.column >= start_x && me.column <= end_x;
                                        }
                                        MouseEventKind::Down(MouseButton::Left) => {
                                            if me.column >= start_x && me.column <= end_x {
                                                exit_requested = true;
                                            }
                                        }
                                        _ => {}
                                    }
                                } else if let MouseEventKind::Moved = me.kind {
                                    ui.exit_status_hovered = false;
                                }
                            }
                            if let Some(brect) = board_rect {
                                match me.kind {
                                    MouseEventKind::Moved => {
                                        if let Some(cell) = board_cell_at(
                                            brect,
                                            session.board(),
                                            me.column,
                                            me.row,
                                        ) {
                                            ui.cursor = cell;
                                        }
                                    }
                                    MouseEventKind::Down(MouseButton::Left) => {
                                        ui.left_press = board_cell_at(
                                            brect,
                                            session.board(),
                                            me.column,
                                            me.row,
                                        );
                                    }
                                    MouseEventKind::Up(MouseButton::Left) => {
                                        let target = board_cell_at(
                                            brect,
                                            session.board(),
                                            me.column,
                                            me.row,
                                        );
                                        if let (Some(press), Some((r, c))) = (ui.left_press, target)
                                        {
                                            if press == (r, c) {
                                                do_reveal(
                                                    &mut session,
                                                    &mut ui,
                                                    &mut last_second,
                                                    r,
                                                    c,
                                                );
                                            }
                                        }
                                        ui.left_press = None;
                                    }
                                    MouseEventKind::Down(MouseButton::Right) => {
                                        if let Some((r, c)) = board_cell_at(
                                            brect,
                                            session.board(),
                                            me.column,
                                            me.row,
                                        ) {
                                            let _ = session.on_right_click(r, c);
                                        }
                                    }
                                    _ => {}
                                }
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        // one-second game timer, driven by the event loop
        if last_second.elapsed() >= Duration::from_secs(1) {
            session.tick();
            last_second += Duration::from_secs(1);
        }

        // clear menu click feedback after a short duration
        if let Some(t0) = ui.click_instant {
            if t0.elapsed() > Duration::from_millis(200) {
                ui.clicked_index = None;
                ui.click_instant = None;
            }
        }

        if exit_requested {
            break;
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        terminal::LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Apply a left click at (row, column) and open the end-of-game dialog if due
fn do_reveal(
    session: &mut GameSession,
    ui: &mut UiState,
    last_second: &mut Instant,
    row: usize,
    column: usize,
) {
    let was_not_started = session.state() == GameState::NotStarted;
    match session.on_left_click(row, column) {
        ClickOutcome::Lost { row, column } => {
            ui.hit_cell = Some((row, column));
            ui.modal = Modal::Loss;
        }
        ClickOutcome::Won { .. } => {
            ui.modal = Modal::Win;
        }
        _ => {}
    }
    // align the timer to the click that started the game
    if was_not_started && session.state() == GameState::InProgress {
        *last_second = Instant::now();
    }
}

fn do_restart(session: &mut GameSession, ui: &mut UiState, config: Option<BoardConfig>) {
    session.on_restart(config);
    ui.reset_after_new_game();
}

/// Validate the settings form; on success save and restart, otherwise keep
/// the dialog open with a message and the prior configuration active
fn apply_settings_form(
    settings: &mut Settings,
    session: &mut GameSession,
    ui: &mut UiState,
    lang: &Lang,
) {
    let rows = match parse_field(&ui.form.rows) {
        Ok(v) => v,
        Err(_) => {
            ui.form.error = Some(lang.assets.err_integer.to_string());
            return;
        }
    };
    let columns = match parse_field(&ui.form.columns) {
        Ok(v) => v,
        Err(_) => {
            ui.form.error = Some(lang.assets.err_integer.to_string());
            return;
        }
    };
    let mines = match parse_field(&ui.form.mines) {
        Ok(v) => v,
        Err(_) => {
            ui.form.error = Some(lang.assets.err_integer.to_string());
            return;
        }
    };
    match BoardConfig::new(rows, columns, mines) {
        Ok(config) => {
            settings.rows = rows;
            settings.columns = columns;
            settings.mines = mines;
            xsp_config::save(settings);
            session.on_restart(Some(config));
            ui.reset_after_new_game();
        }
        Err(e) => ui.form.error = Some(config_error_message(&e, lang)),
    }
}

fn config_error_message(err: &ConfigError, lang: &Lang) -> String {
    match err {
        ConfigError::Rows(_) => lang.assets.err_rows.to_string(),
        ConfigError::Columns(_) => lang.assets.err_columns.to_string(),
        ConfigError::Mines { max, .. } => lang
            .assets
            .err_mines_fmt
            .replacen("{}", &max.to_string(), 1),
    }
}

fn status_left_text(lang: &Lang, session: &GameSession) -> String {
    let secs = session.elapsed_seconds();
    format!(
        " {}: {:02}:{:02}   {}: {}/{} ",
        lang.assets.status_time,
        secs / 60,
        secs % 60,
        lang.assets.status_mines,
        session.flags_placed(),
        session.board().mines()
    )
}

fn step_cursor(ui: &mut UiState, board: &Board, dr: isize, dc: isize) {
    let r = (ui.cursor.0 as isize + dr).clamp(0, board.rows() as isize - 1) as usize;
    let c = (ui.cursor.1 as isize + dc).clamp(0, board.columns() as isize - 1) as usize;
    ui.cursor = (r, c);
}

fn hit(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column <= rect.x + rect.width.saturating_sub(1)
        && row >= rect.y
        && row <= rect.y + rect.height.saturating_sub(1)
}

/// Map a mouse position to a board cell; each cell is two columns wide
fn board_cell_at(board_rect: Rect, board: &Board, column: u16, row: u16) -> Option<(usize, usize)> {
    let inner = inner_rect(board_rect);
    if !hit(inner, column, row) {
        return None;
    }
    let c = (column - inner.x) as usize / 2;
    let r = (row - inner.y) as usize;
    if r < board.rows() && c < board.columns() {
        Some((r, c))
    } else {
        None
    }
}

/// Walk the rendered menu row and find the item under a mouse column
fn menu_item_at(items: &[(&str, &str)], rect: Rect, column: u16) -> Option<usize> {
    let mut offset = rect.x + 2;
    for (i, (key, rest)) in items.iter().enumerate() {
        if i > 0 {
            offset += 3;
        }
        // account for the ": " added when rendering (use display width)
        let full_len = (key.width() + 2 + rest.width()) as u16;
        let end = offset + full_len.saturating_sub(1);
        if column >= offset && column <= end {
            return Some(i);
        }
        offset = end + 1;
    }
    None
}

fn render_modal_button<B: Backend>(f: &mut Frame<B>, ui: &mut UiState, mrect: Rect, label: &str) {
    let btn_w = label.width() as u16;
    let bx = mrect.x + (mrect.width.saturating_sub(btn_w)) / 2;
    let by = mrect.y + mrect.height.saturating_sub(2);
    let btn_rect = Rect::new(bx, by, btn_w, 1);
    ui.modal_close_rect = Some(btn_rect);
    let mut style = Style::default()
        .bg(Color::Gray)
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD);
    if ui.modal_close_pressed {
        style = Style::default()
            .bg(Color::Green)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD);
    } else if ui.modal_close_hovered {
        style = Style::default()
            .bg(Color::White)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD);
    }
    let btn = Paragraph::new(Spans::from(Span::styled(label.to_string(), style)))
        .alignment(Alignment::Center);
    f.render_widget(btn, btn_rect);
}

fn inner_rect(r: Rect) -> Rect {
    Rect::new(
        r.x + 1,
        r.y + 1,
        r.width.saturating_sub(2),
        r.height.saturating_sub(2),
    )
}

fn center_rect(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn centered_block(w: u16, h: u16, r: Rect) -> Rect {
    center_rect(w, h, r)
}

fn bottom_centered_block(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + r.height.saturating_sub(height);
    Rect::new(x, y, width, height)
}
