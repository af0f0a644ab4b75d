use crate::application::{App, AppMode};
use crate::infrastructure::ClipboardSink;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('c') | KeyCode::Char('q') => {
                    app.should_quit = true;
                    return;
                }
                KeyCode::Char('g') if app.mode != AppMode::Help => {
                    app.submit();
                    return;
                }
                KeyCode::Char('y') if app.mode != AppMode::Help => {
                    Self::copy_report(app);
                    return;
                }
                KeyCode::Char('r') if app.mode == AppMode::Form => {
                    app.start_report_browsing();
                    return;
                }
                _ => {}
            }

            // Unbound Ctrl+letter must not type into a field. AltGr arrives as Ctrl+Alt.
            if app.mode == AppMode::Form
                && matches!(key, KeyCode::Char(_))
                && !modifiers.contains(KeyModifiers::ALT)
            {
                return;
            }
        }

        match app.mode {
            AppMode::Form => Self::handle_form_mode(app, key),
            AppMode::Report => Self::handle_report_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn copy_report(app: &mut App) {
        match app.report_markdown() {
            Some(text) => {
                let result = ClipboardSink::copy_text(&text);
                app.set_copy_result(result);
            }
            None => {
                app.status_message = Some("No report to copy yet".to_string());
            }
        }
    }

    fn handle_form_mode(app: &mut App, key: KeyCode) {
        // Status messages only live until the next keystroke
        app.status_message = None;

        match key {
            KeyCode::F(1) => {
                app.show_help();
            }
            KeyCode::Tab | KeyCode::Down => {
                app.form.focus_next();
            }
            KeyCode::BackTab | KeyCode::Up => {
                app.form.focus_previous();
            }
            KeyCode::Enter => {
                if app.form.focus.is_multiline() {
                    app.form.insert_char('\n');
                } else if app.can_submit() {
                    app.submit();
                } else {
                    app.form.focus_next();
                }
            }
            KeyCode::Backspace => {
                app.form.delete_before_cursor();
            }
            KeyCode::Delete => {
                app.form.delete_at_cursor();
            }
            KeyCode::Left => {
                app.form.move_cursor_left();
            }
            KeyCode::Right => {
                app.form.move_cursor_right();
            }
            KeyCode::Home => {
                app.form.move_cursor_home();
            }
            KeyCode::End => {
                app.form.move_cursor_end();
            }
            KeyCode::Char(c) => {
                app.form.insert_char(c);
            }
            _ => {}
        }
    }

    fn handle_report_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Tab => {
                app.return_to_form();
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.show_help();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.scroll_report_up(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.scroll_report_down(1);
            }
            KeyCode::PageUp => {
                app.scroll_report_up(10);
            }
            KeyCode::PageDown => {
                app.scroll_report_down(10);
            }
            KeyCode::Home => {
                app.report_scroll = 0;
            }
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = AppMode::Form;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}
