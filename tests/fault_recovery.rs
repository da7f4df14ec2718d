//! Fault boundary integration tests
//!
//! Screens render through the app's root boundary; a failing screen must
//! not disturb preferences and must be recoverable.

use app_ui::{BuildMode, ColorPalette, Recovery, RecoveryAction, Rendered};
use campus_trace::{App, AppConfig};
use storage::StorageBackend;

fn app(mode: BuildMode) -> App {
    App::bootstrap(AppConfig::new().build_mode(mode).storage(StorageBackend::Memory)).unwrap()
}

#[derive(Debug)]
struct ScreenError(&'static str);

impl std::fmt::Display for ScreenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "screen failed: {}", self.0)
    }
}

fn failing_screen() -> Result<String, ScreenError> {
    Err(ScreenError("leaderboard missing"))
}

fn working_screen() -> Result<String, ScreenError> {
    Ok("leaderboard".to_string())
}

#[test]
fn test_development_fallback_shows_fault() {
    let mut app = app(BuildMode::Development);

    match app.render(failing_screen) {
        Rendered::Fallback(view) => {
            assert_eq!(view.detail.as_deref(), Some("screen failed: leaderboard missing"));
            assert_eq!(view.actions, [RecoveryAction::Reload, RecoveryAction::GoHome]);
        }
        Rendered::Children(_) => panic!("expected fallback"),
    }
}

#[test]
fn test_production_fallback_hides_fault() {
    let mut app = app(BuildMode::Production);

    match app.render(failing_screen) {
        Rendered::Fallback(view) => assert!(view.detail.is_none()),
        Rendered::Children(_) => panic!("expected fallback"),
    }
    // The fault is still recorded for diagnostics.
    assert!(app.boundary().fault().is_some());
}

#[test]
fn test_faulted_boundary_stays_faulted_until_recovery() {
    let mut app = app(BuildMode::Production);
    app.render(failing_screen);

    assert!(matches!(app.render(working_screen), Rendered::Fallback(_)));
    assert!(matches!(app.render(working_screen), Rendered::Fallback(_)));
}

#[test]
fn test_reload_returns_to_normal() {
    let mut app = app(BuildMode::Production);
    app.render(failing_screen);

    assert_eq!(app.recover(RecoveryAction::Reload), Recovery::Reloaded);
    assert_eq!(app.render(working_screen), Rendered::Children("leaderboard".to_string()));
}

#[test]
fn test_go_home_navigates_to_root_route() {
    let mut app = app(BuildMode::Production);
    app.render(failing_screen);

    assert_eq!(app.recover(RecoveryAction::GoHome), Recovery::Navigate("/"));
    assert!(!app.boundary().is_faulted());
}

#[test]
fn test_panicking_screen_is_contained() {
    let mut app = app(BuildMode::Development);

    let rendered = app.render(|| -> Result<(), ScreenError> { panic!("unexpected null post") });

    assert!(matches!(rendered, Rendered::Fallback(_)));
    assert_eq!(app.boundary().fault().map(|f| f.message()), Some("unexpected null post"));
}

#[test]
fn test_fault_does_not_touch_preferences() {
    let mut app = app(BuildMode::Production);
    app.preferences().set_color_palette(ColorPalette::Purple);

    app.render(failing_screen);
    app.recover(RecoveryAction::Reload);

    assert_eq!(app.preferences().color_palette(), ColorPalette::Purple);
    assert!(app.root_style().has_class("theme-purple"));
}
