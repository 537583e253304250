use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, View};
use crate::data::TeamFilter;
use crate::ui::CONTENT_START_ROW;

/// Default file written by the `e` key.
pub const EXPORT_PATH: &str = "fleet_export.json";

/// Rows above the first table row: block border plus header row, and the
/// metric cards in the Sprites view.
const SPRITES_TABLE_OFFSET: u16 = 4 + 2;
const TABLE_OFFSET: u16 = 2;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Dispatch a terminal event to the app.
pub fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        // Terminal will redraw on next iteration
        _ => {}
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    if app.show_detail_overlay {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => {
                app.close_overlay();
            }
            // Step through sprites while the overlay stays open
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::PageUp => app.select_prev_n(10),
            KeyCode::PageDown => app.select_next_n(10),
            KeyCode::Home => app.select_first(),
            KeyCode::End => app.select_last(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),

        KeyCode::Char('1') => app.set_view(View::Sprites),
        KeyCode::Char('2') => app.set_view(View::Teams),
        KeyCode::Char('3') => app.set_view(View::Errors),

        // Navigation (up/down for items, left/right for tabs)
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        KeyCode::Enter => app.enter_detail(),
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        KeyCode::Char('r') => {
            app.reload();
            app.set_status_message(format!("Reloading {}", app.source_description()));
        }

        KeyCode::Char('?') => app.toggle_help(),

        // Team filter
        KeyCode::Char('t') => app.next_team_filter(),
        KeyCode::Char('T') => app.prev_team_filter(),
        KeyCode::Char('a') => app.set_team_filter(TeamFilter::All),

        KeyCode::Char('e') => {
            let export_path = PathBuf::from(EXPORT_PATH);
            match app.export_state(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),

        MouseEventKind::Down(MouseButton::Left) => {
            let clicked_row = mouse.row;

            // Tab bar sits right under the header
            if clicked_row == CONTENT_START_ROW - 1 {
                // Approximate tab positions: Sprites (0-11), Teams (12-21), Errors (22-)
                let col = mouse.column;
                if col < 12 {
                    app.set_view(View::Sprites);
                } else if col < 22 {
                    app.set_view(View::Teams);
                } else if col < 38 {
                    app.set_view(View::Errors);
                }
                return;
            }

            let offset = match app.current_view {
                View::Sprites => SPRITES_TABLE_OFFSET,
                View::Teams | View::Errors => TABLE_OFFSET,
            };
            let first_item_row = CONTENT_START_ROW + offset;
            if clicked_row >= first_item_row {
                app.select_row((clicked_row - first_item_row) as usize);
            }
        }

        // Right-click goes back
        MouseEventKind::Down(MouseButton::Right) => app.go_back(),

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TeamRegistry;
    use crate::source::{ChannelSource, FleetReport};
    use crate::ui::Theme;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn loaded_app() -> App {
        let (tx, source) = ChannelSource::create("test");
        let mut app = App::new(Box::new(source), TeamRegistry::default(), Theme::dark());
        let report = FleetReport::parse(
            r#"{
                "timestamp": "2026-01-12T09:30:00Z",
                "total": 3, "healthy": 2, "unhealthy": 1,
                "sprites": [
                    { "name": "agents-synth-01", "healthy": true },
                    { "name": "dev-workspace-01", "api_status": "cold", "healthy": false },
                    { "name": "mobile-worker-01", "healthy": true }
                ],
                "errors": []
            }"#,
        )
        .unwrap();
        tx.send(Some(report)).unwrap();
        app.tick();
        app
    }

    #[test]
    fn test_view_keys() {
        let mut app = loaded_app();
        handle_key_event(&mut app, key(KeyCode::Char('2')));
        assert_eq!(app.current_view, View::Teams);
        handle_key_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.current_view, View::Errors);
        handle_key_event(&mut app, key(KeyCode::Char('l')));
        assert_eq!(app.current_view, View::Sprites);
        handle_key_event(&mut app, key(KeyCode::BackTab));
        assert_eq!(app.current_view, View::Errors);
    }

    #[test]
    fn test_team_filter_keys() {
        let mut app = loaded_app();
        handle_key_event(&mut app, key(KeyCode::Char('t')));
        assert_eq!(app.team_filter, TeamFilter::Team("agents".into()));
        handle_key_event(&mut app, key(KeyCode::Char('T')));
        assert_eq!(app.team_filter, TeamFilter::All);
        handle_key_event(&mut app, key(KeyCode::Char('T')));
        assert_eq!(app.team_filter, TeamFilter::Team("mobile".into()));
        handle_key_event(&mut app, key(KeyCode::Char('a')));
        assert_eq!(app.team_filter, TeamFilter::All);
    }

    #[test]
    fn test_help_swallows_next_key() {
        let mut app = loaded_app();
        handle_key_event(&mut app, key(KeyCode::Char('?')));
        assert!(app.show_help);
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.show_help);
        assert!(app.running);
    }

    #[test]
    fn test_overlay_keys() {
        let mut app = loaded_app();
        handle_key_event(&mut app, key(KeyCode::Enter));
        assert!(app.show_detail_overlay);

        handle_key_event(&mut app, key(KeyCode::Down));
        assert_eq!(app.selected_row().unwrap().sprite.name, "dev-workspace-01");

        // q closes the overlay instead of quitting
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.show_detail_overlay);
        assert!(app.running);

        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn test_mouse_selects_rows_and_tabs() {
        let mut app = loaded_app();

        handle_mouse_event(&mut app, click(5, CONTENT_START_ROW + SPRITES_TABLE_OFFSET + 2));
        assert_eq!(app.selected_sprite_index, 2);

        // Past the last row is ignored
        handle_mouse_event(&mut app, click(5, CONTENT_START_ROW + SPRITES_TABLE_OFFSET + 9));
        assert_eq!(app.selected_sprite_index, 2);

        handle_mouse_event(&mut app, click(15, 1));
        assert_eq!(app.current_view, View::Teams);
        handle_mouse_event(&mut app, click(5, CONTENT_START_ROW + TABLE_OFFSET + 1));
        assert_eq!(app.selected_team_index, 1);
    }
}
