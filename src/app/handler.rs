//! Input handling: maps key/mouse events to state mutations.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::Action;
use crate::core::category_bar::BarDirection;
use crate::ui::layout::{contains, ARROW_WIDTH};

use super::state::AppState;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let action = state.config.match_key(key);

    if state.show_help {
        // Any key closes the overlay; quit still quits.
        state.show_help = false;
        if action == Some(Action::Quit) {
            state.should_quit = true;
        }
        return;
    }

    let Some(action) = action else {
        return;
    };

    match action {
        Action::Quit => state.should_quit = true,
        Action::Help => state.show_help = true,
        Action::ScrollUp => state.scroll_page_by(-state.config.page.scroll_step),
        Action::ScrollDown => state.scroll_page_by(state.config.page.scroll_step),
        Action::PageUp => state.scroll_page_by(-state.page_step()),
        Action::PageDown => state.scroll_page_by(state.page_step()),
        Action::Top => state.scroll_page_to(0.0),
        Action::Bottom => state.scroll_page_to(f64::MAX),
        Action::PrevCategory => select_relative(state, -1),
        Action::NextCategory => select_relative(state, 1),
        Action::BarLeft => state.navigator.bar_mut().scroll_by(BarDirection::Left),
        Action::BarRight => state.navigator.bar_mut().scroll_by(BarDirection::Right),
    }
}

fn select_relative(state: &mut AppState, delta: isize) {
    if let Some(node) = state.navigator.select_relative(delta) {
        state.jump_to_node(node);
    }
}

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let layout = state.layout();
    let on_bar =
        state.navigator.bar_visible() && contains(layout.bar_area, mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::ScrollDown if on_bar => {
            state.navigator.bar_mut().scroll_by(BarDirection::Right);
        }
        MouseEventKind::ScrollUp if on_bar => {
            state.navigator.bar_mut().scroll_by(BarDirection::Left);
        }
        MouseEventKind::ScrollDown => state.scroll_page_by(state.config.page.scroll_step),
        MouseEventKind::ScrollUp => state.scroll_page_by(-state.config.page.scroll_step),
        MouseEventKind::ScrollRight => state.navigator.bar_mut().scroll_by(BarDirection::Right),
        MouseEventKind::ScrollLeft => state.navigator.bar_mut().scroll_by(BarDirection::Left),
        MouseEventKind::Down(MouseButton::Left) => {
            if state.show_help {
                state.show_help = false;
                return;
            }
            if !on_bar {
                return;
            }
            let bar = layout.bar_area;
            if mouse.column < bar.x + ARROW_WIDTH {
                state.navigator.bar_mut().scroll_by(BarDirection::Left);
                return;
            }
            if mouse.column >= (bar.x + bar.width).saturating_sub(ARROW_WIDTH) {
                state.navigator.bar_mut().scroll_by(BarDirection::Right);
                return;
            }
            let x = f64::from(mouse.column - layout.bar_container.x);
            let Some(key) = state.navigator.bar().pill_at(x).cloned() else {
                return;
            };
            if let Some(node) = state.navigator.select(&key) {
                state.jump_to_node(node);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::catalog::Catalog;
    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;

    fn state() -> AppState {
        AppState::new(Catalog::demo(), AppConfig::default(), Rect::new(0, 0, 80, 24)).unwrap()
    }

    fn press(code: KeyCode) -> KeyEvent {
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

    #[test]
    fn scroll_keys_move_page_target() {
        let mut state = state();
        handle_key(&mut state, press(KeyCode::Char('j')));
        assert_eq!(state.page_scroll.target(), 3.0);
        handle_key(&mut state, press(KeyCode::Up));
        assert_eq!(state.page_scroll.target(), 0.0);
        handle_key(&mut state, press(KeyCode::Up));
        assert_eq!(state.page_scroll.target(), 0.0);
    }

    #[test]
    fn next_market_selects_and_jumps() {
        let mut state = state();
        handle_key(&mut state, press(KeyCode::Right));
        let second = &state.catalog.categories[1].key;
        assert_eq!(state.navigator.active_key(), second);
        assert!(state.navigator.is_jumping());
        assert!(state.page_scroll.target() > 0.0);
    }

    #[test]
    fn help_overlay_swallows_next_key() {
        let mut state = state();
        handle_key(&mut state, press(KeyCode::Char('?')));
        assert!(state.show_help);
        handle_key(&mut state, press(KeyCode::Char('j')));
        assert!(!state.show_help);
        assert_eq!(state.page_scroll.target(), 0.0);
    }

    #[test]
    fn release_events_are_ignored_and_ctrl_c_quits() {
        let mut state = state();
        let mut release = press(KeyCode::Char('q'));
        release.kind = KeyEventKind::Release;
        release.state = KeyEventState::NONE;
        handle_key(&mut state, release);
        assert!(!state.should_quit);
        handle_key(&mut state, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(state.should_quit);
    }

    #[test]
    fn clicking_a_pill_selects_its_market() {
        let mut state = state();
        let layout = state.layout();
        let row = layout.bar_area.y + layout.bar_area.height / 2;
        let second = state.catalog.categories[1].key.clone();
        let pill = state.navigator.bar().pill(&second).unwrap();
        let column = layout.bar_container.x + pill.offset as u16 + 1;

        handle_mouse(&mut state, click(column, row));
        assert_eq!(state.navigator.active_key(), &second);
        assert!(state.navigator.is_jumping());
    }

    #[test]
    fn clicking_right_arrow_scrolls_bar() {
        let mut state = state();
        let layout = state.layout();
        let row = layout.bar_area.y;
        let before = state.navigator.bar().scroll_left();
        handle_mouse(&mut state, click(layout.bar_area.width - 1, row));
        for _ in 0..200 {
            state.navigator.bar_mut().tick();
        }
        assert!(state.navigator.bar().scroll_left() >= before);
    }
}
