//! The orchestrator: owns the current snapshot and fans it out.

use std::rc::Rc;

use image::RgbaImage;

use crate::audio::{AudioBackend, AudioController, MusicState};
use crate::error::NetError;
use crate::net::{Command, Dispatcher, Ticket};
use crate::renderer::atlas::cell_at;
use crate::renderer::scene::SceneRenderer;
use crate::renderer::Canvas;
use crate::state::GameState;
use crate::ui::{HudView, MessageLog, StatusPanel};

/// Ties the server, the scene, the HUD widgets and audio together.
///
/// All requests go out through the [`Dispatcher`]; their outcomes come back
/// through [`GameClient::on_response`]. A response is applied only if no
/// newer request has been applied before it.
pub struct GameClient<C: Canvas, B: AudioBackend, D: Dispatcher> {
    dispatcher: D,
    renderer: SceneRenderer<C>,
    audio: AudioController<B>,
    log: MessageLog,
    status: StatusPanel,
    state: Option<Rc<GameState>>,
    last_issued: Ticket,
    last_applied: Option<Ticket>,
    overlay_visible: bool,
    notice: Option<String>,
    dirty: bool,
}

impl<C: Canvas, B: AudioBackend, D: Dispatcher> GameClient<C, B, D> {
    /// Build the client and immediately request the current game state.
    pub fn new(canvas: C, audio: AudioController<B>, dispatcher: D) -> Self {
        let mut client = Self {
            dispatcher,
            renderer: SceneRenderer::new(canvas),
            audio,
            log: MessageLog::new(),
            status: StatusPanel::new(),
            state: None,
            last_issued: Ticket(0),
            last_applied: None,
            overlay_visible: false,
            notice: None,
            dirty: true,
        };
        client.send(Command::FetchState);
        client
    }

    fn send(&mut self, command: Command) -> Ticket {
        self.last_issued = self.last_issued.next();
        let ticket = self.last_issued;
        tracing::debug!(?ticket, ?command, "dispatching");
        self.dispatcher.dispatch(ticket, command);
        ticket
    }

    /// Turn a click at window-space `(px, py)` into a move request for the
    /// grid cell under it. `origin` is where the scene canvas starts.
    pub fn handle_click(&mut self, px: f32, py: f32, origin: [f32; 2]) -> Ticket {
        let (x, y) = cell_at(px, py, origin);
        tracing::info!(x, y, "player clicked");
        self.send(Command::Move { x, y })
    }

    pub fn request_reset(&mut self) -> Ticket {
        tracing::info!("resetting level");
        self.send(Command::Reset)
    }

    /// Apply the outcome of the request identified by `ticket`.
    ///
    /// Returns `true` when a new snapshot was taken over. Errors are logged
    /// and leave everything as it was.
    pub fn on_response(&mut self, ticket: Ticket, result: Result<GameState, NetError>) -> bool {
        if self.last_applied.is_some_and(|applied| ticket < applied) {
            tracing::debug!(?ticket, applied = ?self.last_applied, "dropping stale response");
            return false;
        }
        match result {
            Ok(state) => {
                self.last_applied = Some(ticket);
                self.apply(Rc::new(state));
                true
            }
            Err(e) => {
                tracing::error!(?ticket, "request failed: {e}");
                false
            }
        }
    }

    fn apply(&mut self, state: Rc<GameState>) {
        let dims = (state.width, state.height);
        if self.renderer.dimensions() != Some(dims) {
            tracing::info!(width = dims.0, height = dims.1, "initializing scene");
            self.renderer.initialize(dims.0, dims.1);
        }

        self.log.update(state.messages.as_deref());
        self.status.update_health(&state.entities);
        if let Some(score) = state.score {
            self.status.update_score(score);
        }
        if let Some(level) = state.level {
            self.status.update_level(level);
        }
        self.renderer.render(Rc::clone(&state));

        if state.combat_this_turn {
            self.audio.play_random_effect();
        }
        if state.game_over && !self.overlay_visible {
            tracing::info!("game over");
        }
        self.overlay_visible = state.game_over;

        self.state = Some(state);
        self.dirty = true;
    }

    /// The tilesheet finished loading; any deferred render happens now.
    pub fn tiles_loaded(&mut self, sheet: RgbaImage) {
        self.renderer.tiles_loaded(sheet);
        self.dirty = true;
    }

    /// Flip background music. A failure is kept as a notice for the HUD.
    pub fn toggle_music(&mut self) -> Option<MusicState> {
        self.dirty = true;
        match self.audio.toggle_music() {
            Ok(state) => {
                self.notice = None;
                Some(state)
            }
            Err(e) => {
                self.notice = Some(format!("Audio error: {e}"));
                None
            }
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.audio.set_volume(volume);
        self.dirty = true;
    }

    pub fn adjust_volume(&mut self, delta: f32) {
        self.set_volume(self.audio.volume() + delta);
    }

    pub fn scroll_log(&mut self, lines: i32) {
        self.log.scroll_by(lines);
        self.dirty = true;
    }

    /// `true` once after anything visible changed.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn hud_view(&self) -> HudView<'_> {
        HudView {
            status: &self.status,
            log: &self.log,
            music: self.audio.music_state(),
            volume: self.audio.volume(),
            notice: self.notice.as_deref(),
            game_over: self.overlay_visible,
        }
    }

    pub fn state(&self) -> Option<&GameState> { self.state.as_deref() }

    pub fn renderer(&self) -> &SceneRenderer<C> { &self.renderer }

    pub fn audio(&self) -> &AudioController<B> { &self.audio }

    pub fn log(&self) -> &MessageLog { &self.log }

    pub fn status(&self) -> &StatusPanel { &self.status }

    pub fn dispatcher(&self) -> &D { &self.dispatcher }

    pub fn overlay_visible(&self) -> bool { self.overlay_visible }

    pub fn notice(&self) -> Option<&str> { self.notice.as_deref() }
}
