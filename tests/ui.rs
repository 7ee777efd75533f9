mod common;

use common::{Op, RecordingCanvas, state};
use dungeon_client::audio::MusicState;
use dungeon_client::renderer::{Color, Rect, TextMetrics};
use dungeon_client::ui::hud::{MIN_FRAME_HEIGHT, PANEL_WIDTH};
use dungeon_client::ui::status::{CRITICAL, HEALTHY, WOUNDED, bar_color};
use dungeon_client::ui::{
    Hud, HudAction, HudView, MessageLog, StatusPanel, progress_bar, rect_contains, word_wrap,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ── word_wrap ────────────────────────────────────────────────────────────────

#[test]
fn wrap_empty_string_returns_no_lines() {
    assert!(word_wrap("", 10).is_empty());
}

#[test]
fn wrap_two_words_break_at_boundary() {
    assert_eq!(word_wrap("hello world", 8), vec!["hello", "world"]);
}

#[test]
fn wrap_exactly_at_limit_keeps_on_one_line() {
    assert_eq!(word_wrap("ab cd", 5), vec!["ab cd"]);
}

#[test]
fn wrap_long_paragraph_preserves_all_words() {
    let text = "alpha beta gamma delta epsilon zeta eta theta iota kappa";
    let lines = word_wrap(text, 12);
    assert!(lines.iter().all(|l| l.chars().count() <= 12));
    assert_eq!(lines.join(" "), text);
}

#[test]
fn wrap_single_word_longer_than_max_gets_split() {
    assert_eq!(word_wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
}

#[test]
fn wrap_zero_max_cols_returns_empty() {
    assert!(word_wrap("anything", 0).is_empty());
}

// ── rect_contains / progress_bar ─────────────────────────────────────────────

#[test]
fn rect_contains_is_half_open() {
    assert!(rect_contains(10.0, 10.0, 100.0, 100.0, 10.0, 10.0));
    assert!(!rect_contains(10.0, 10.0, 100.0, 100.0, 110.0, 50.0));
    assert!(!rect_contains(10.0, 10.0, 100.0, 100.0, 50.0, 110.0));
    assert!(!rect_contains(10.0, 10.0, 0.0, 0.0, 10.0, 10.0));
}

#[test]
fn progress_bar_splits_filled_and_empty() {
    let mut canvas = RecordingCanvas::default();
    progress_bar(&mut canvas, Rect::new(0.0, 0.0, 200.0, 10.0), 0.25, Color::GREEN, Color::RED);
    let fills = canvas.fills();
    assert_eq!(fills.len(), 2);
    assert_eq!(fills[0], (Rect::new(0.0, 0.0, 50.0, 10.0), Color::GREEN));
    assert_eq!(fills[1], (Rect::new(50.0, 0.0, 150.0, 10.0), Color::RED));
}

#[test]
fn progress_bar_clamps_percentage() {
    let mut canvas = RecordingCanvas::default();
    progress_bar(&mut canvas, Rect::new(0.0, 0.0, 200.0, 10.0), 1.5, Color::GREEN, Color::RED);
    assert_eq!(canvas.fills(), vec![(Rect::new(0.0, 0.0, 200.0, 10.0), Color::GREEN)]);
}

// ── MessageLog ───────────────────────────────────────────────────────────────

#[test]
fn log_update_replaces_in_order() {
    let mut log = MessageLog::new();
    log.update(Some(strings(&["a", "b"]).as_slice()));
    log.update(Some(strings(&["c", "d", "e"]).as_slice()));
    assert_eq!(log.entries(), ["c", "d", "e"]);
}

#[test]
fn log_update_none_keeps_content() {
    let mut log = MessageLog::new();
    log.update(Some(strings(&["kept"]).as_slice()));
    log.update(None);
    assert_eq!(log.entries(), ["kept"]);
}

#[test]
fn log_update_empty_clears() {
    let mut log = MessageLog::new();
    log.update(Some(strings(&["gone"]).as_slice()));
    log.update(Some(&[][..]));
    assert!(log.entries().is_empty());
}

#[test]
fn log_shows_newest_lines_that_fit() {
    let mut log = MessageLog::new();
    log.update(Some(strings(&["one", "two", "three", "four"]).as_slice()));
    // 8 px padding + 2 rows of 16 px
    let area = Rect::new(0.0, 0.0, 200.0, 40.0);
    assert_eq!(log.visible_lines(area, TextMetrics::default()), ["three", "four"]);
}

#[test]
fn log_scrolls_back_and_update_returns_to_bottom() {
    let mut log = MessageLog::new();
    log.update(Some(strings(&["one", "two", "three", "four"]).as_slice()));
    let area = Rect::new(0.0, 0.0, 200.0, 40.0);

    log.scroll_by(1);
    assert_eq!(log.visible_lines(area, TextMetrics::default()), ["two", "three"]);
    log.scroll_by(10);
    assert_eq!(log.visible_lines(area, TextMetrics::default()), ["one", "two"]);
    log.scroll_by(-100);
    assert_eq!(log.scroll_offset(), 0);

    log.scroll_by(2);
    log.update(Some(strings(&["five"]).as_slice()));
    assert_eq!(log.scroll_offset(), 0);
}

#[test]
fn log_wraps_long_entries_to_panel_width() {
    let mut log = MessageLog::new();
    log.update(Some(strings(&["the goblin hits you"]).as_slice()));
    // (88 - 8) / 8 = 10 columns
    let area = Rect::new(0.0, 0.0, 88.0, 200.0);
    assert_eq!(log.visible_lines(area, TextMetrics::default()), ["the goblin", "hits you"]);
}

#[test]
fn log_draw_writes_each_visible_line() {
    let mut log = MessageLog::new();
    log.update(Some(strings(&["hello", "world"]).as_slice()));
    let mut canvas = RecordingCanvas::default();
    log.draw(&mut canvas, Rect::new(0.0, 0.0, 200.0, 100.0));
    assert_eq!(canvas.texts(), ["hello", "world"]);
}

// ── StatusPanel ──────────────────────────────────────────────────────────────

#[test]
fn bar_color_thresholds() {
    assert_eq!(bar_color(61.0), HEALTHY);
    assert_eq!(bar_color(60.0), WOUNDED);
    assert_eq!(bar_color(59.0), WOUNDED);
    assert_eq!(bar_color(31.0), WOUNDED);
    assert_eq!(bar_color(30.0), CRITICAL);
    assert_eq!(bar_color(0.0), CRITICAL);
}

#[test]
fn status_tracks_first_player() {
    let snapshot = state(
        r#"{"width": 1, "height": 1, "entities": {
            "e": {"type": "enemy", "x": 0, "y": 0, "health": 5},
            "p1": {"type": "player", "x": 0, "y": 0, "health": 45},
            "p2": {"type": "player", "x": 0, "y": 0, "health": 90}
        }}"#,
    );
    let mut status = StatusPanel::new();
    status.update_health(&snapshot.entities);
    assert_eq!(status.health_percent(), 45.0);
    assert_eq!(status.health_color(), WOUNDED);
}

#[test]
fn status_clamps_health() {
    let mut status = StatusPanel::new();
    status.update_health(&state(
        r#"{"width": 1, "height": 1, "entities": {"p": {"type": "player", "x": 0, "y": 0, "health": 150}}}"#,
    ).entities);
    assert_eq!(status.health_percent(), 100.0);
    status.update_health(&state(
        r#"{"width": 1, "height": 1, "entities": {"p": {"type": "player", "x": 0, "y": 0, "health": -10}}}"#,
    ).entities);
    assert_eq!(status.health_percent(), 0.0);
}

#[test]
fn status_without_player_is_unchanged() {
    let mut status = StatusPanel::new();
    status.update_health(&state(
        r#"{"width": 1, "height": 1, "entities": {"p": {"type": "player", "x": 0, "y": 0, "health": 20}}}"#,
    ).entities);
    status.update_health(&[]);
    assert_eq!(status.health_percent(), 20.0);
}

#[test]
fn score_and_level_are_plain_text() {
    let mut status = StatusPanel::new();
    status.update_score(1250);
    status.update_level(3);
    assert_eq!(status.score_text(), "1250");
    assert_eq!(status.level_text(), "3");

    let mut canvas = RecordingCanvas::default();
    status.draw(&mut canvas, Rect::new(0.0, 0.0, 200.0, 100.0));
    let texts = canvas.texts();
    assert!(texts.contains(&"SCORE: 1250".to_string()));
    assert!(texts.contains(&"LEVEL: 3".to_string()));
}

// ── Hud ──────────────────────────────────────────────────────────────────────

#[test]
fn frame_is_scene_plus_panel() {
    let hud = Hud::new(320, 640, TextMetrics::default());
    assert_eq!(hud.frame_size(), (320 + PANEL_WIDTH, 640));
    let small = Hud::new(64, 64, TextMetrics::default());
    assert_eq!(small.frame_size(), (64 + PANEL_WIDTH, MIN_FRAME_HEIGHT));
}

#[test]
fn hit_test_finds_every_control() {
    let hud = Hud::new(320, 320, TextMetrics::default());
    let l = hud.layout().clone();
    let centre = |r: Rect| (r.x + r.w / 2.0, r.y + r.h / 2.0);

    let (x, y) = centre(l.music_button);
    assert_eq!(hud.hit_test(x, y), Some(HudAction::ToggleMusic));
    let (x, y) = centre(l.reset_button);
    assert_eq!(hud.hit_test(x, y), Some(HudAction::Reset));
    let (_, y) = centre(l.volume_slider);
    assert_eq!(hud.hit_test(l.volume_slider.x, y), Some(HudAction::SetVolume(0.0)));
    let (x, y) = centre(l.volume_slider);
    assert_eq!(hud.hit_test(x, y), Some(HudAction::SetVolume(0.5)));
    assert_eq!(hud.hit_test(10.0, 10.0), None);
}

#[test]
fn layout_elements_stay_inside_panel() {
    let hud = Hud::new(320, 320, TextMetrics::default());
    let l = hud.layout();
    for r in [l.status, l.music_button, l.volume_slider, l.log, l.reset_button] {
        assert!(r.x >= l.panel.x && r.x + r.w <= l.panel.x + l.panel.w);
        assert!(r.y >= l.panel.y && r.y + r.h <= l.panel.y + l.panel.h);
    }
    assert!(l.log.h > 0.0);
}

#[test]
fn overlay_is_drawn_only_when_game_over() {
    let hud = Hud::new(320, 320, TextMetrics::default());
    let status = StatusPanel::new();
    let log = MessageLog::new();
    let mut view = HudView {
        status: &status,
        log: &log,
        music: MusicState::Paused,
        volume: 0.5,
        notice: None,
        game_over: false,
    };

    let mut canvas = RecordingCanvas::default();
    hud.draw(&mut canvas, &view);
    assert!(canvas.texts().contains(&"MUSIC: OFF".to_string()));
    assert!(!canvas.texts().contains(&"GAME OVER".to_string()));

    view.game_over = true;
    view.notice = Some("Audio error");
    let mut canvas = RecordingCanvas::default();
    hud.draw(&mut canvas, &view);
    assert!(canvas.texts().contains(&"GAME OVER".to_string()));
    assert!(canvas.texts().contains(&"Audio error".to_string()));
    assert!(canvas.ops.iter().any(|op| matches!(op, Op::Fill { rect, .. } if *rect == hud.scene_rect())));
}
