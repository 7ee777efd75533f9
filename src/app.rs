//! Native host: window, input, GPU presentation and background work.

use std::sync::Arc;
use std::thread;

use image::RgbaImage;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use crate::audio::{AudioController, KiraBackend};
use crate::client::GameClient;
use crate::config::ClientConfig;
use crate::error::{AssetError, ClientError, NetError};
use crate::input::{Action, ActionMap, InputState};
use crate::net::{Command, Dispatcher, GameServer, HttpServer, Ticket};
use crate::renderer::framebuffer::FrameBuffer;
use crate::renderer::present::Presenter;
use crate::renderer::text::{FontSheet, load_rgba};
use crate::renderer::utils::letterbox_viewport;
use crate::renderer::Canvas;
use crate::state::GameState;
use crate::ui::{Hud, HudAction};
use crate::window::{WindowConfig, WindowMode, apply_window_settings};

const VOLUME_STEP: f32 = 0.1;

/// Work finished off the event-loop thread.
pub enum ClientEvent {
    Response(Ticket, Result<GameState, NetError>),
    TilesLoaded(RgbaImage),
    FontLoaded(FontSheet),
    AssetFailed(AssetError),
}

// ── ThreadDispatcher ────────────────────────────────────────────────────────

/// Runs each command on its own worker thread and posts the outcome back to
/// the event loop. Requests may overlap; ordering is the client's concern.
pub struct ThreadDispatcher<S> {
    server: Arc<S>,
    proxy: EventLoopProxy<ClientEvent>,
}

impl<S> ThreadDispatcher<S> {
    pub fn new(server: S, proxy: EventLoopProxy<ClientEvent>) -> Self {
        Self { server: Arc::new(server), proxy }
    }
}

impl<S: GameServer + Send + Sync + 'static> Dispatcher for ThreadDispatcher<S> {
    fn dispatch(&mut self, ticket: Ticket, command: Command) {
        let server = Arc::clone(&self.server);
        let proxy = self.proxy.clone();
        let spawned = thread::Builder::new()
            .name(format!("request-{}", ticket.0))
            .spawn(move || {
                let result = command.execute(server.as_ref());
                if proxy.send_event(ClientEvent::Response(ticket, result)).is_err() {
                    tracing::debug!(?ticket, "event loop closed; response dropped");
                }
            });
        if let Err(e) = spawned {
            tracing::error!("failed to spawn request thread: {e}");
        }
    }
}

/// Decode the tilesheet and the HUD font in the background.
fn spawn_asset_loads(config: &ClientConfig, proxy: &EventLoopProxy<ClientEvent>) {
    let tiles = config.tilesheet_path();
    let tiles_proxy = proxy.clone();
    thread::spawn(move || {
        let event = match load_rgba(&tiles) {
            Ok(sheet) => ClientEvent::TilesLoaded(sheet),
            Err(e) => ClientEvent::AssetFailed(e),
        };
        let _ = tiles_proxy.send_event(event);
    });

    let (png, glyphs) = config.font_paths();
    let font_proxy = proxy.clone();
    thread::spawn(move || {
        let event = match FontSheet::load(&png, &glyphs) {
            Ok(font) => ClientEvent::FontLoaded(font),
            Err(e) => ClientEvent::AssetFailed(e),
        };
        let _ = font_proxy.send_event(event);
    });
}

// ── App (winit ApplicationHandler) ──────────────────────────────────────────

type Client = GameClient<FrameBuffer, KiraBackend, ThreadDispatcher<HttpServer>>;

struct App {
    config: ClientConfig,
    client: Client,
    presenter: Option<Presenter>,
    window_config: WindowConfig,
    /// Scene plus side panel, as uploaded to the GPU.
    frame: FrameBuffer,
    hud: Hud,
    input: InputState,
    actions: ActionMap<Action>,
    needs_compose: bool,
    error: Option<ClientError>,
}

impl App {
    fn window(&self) -> Option<&Arc<Window>> {
        self.presenter.as_ref().map(|p| &p.window)
    }

    /// Redraw the frame from the scene canvas and the HUD. Grows or shrinks
    /// the window when the frame size changed.
    fn compose(&mut self) {
        let scene = self.client.renderer().canvas().image();
        let hud = Hud::new(scene.width(), scene.height(), self.frame.text_metrics());
        let (width, height) = hud.frame_size();

        if self.frame.size() == (width, height) {
            self.frame.clear();
        } else {
            tracing::debug!(width, height, "frame resized");
            self.frame.resize(width, height);
            self.window_config.logical_width = width;
            self.window_config.logical_height = height;
            if self.window_config.mode == WindowMode::Windowed {
                self.window_config.physical_width = width;
                self.window_config.physical_height = height;
                if let Some(presenter) = self.presenter.as_ref() {
                    apply_window_settings(&presenter.window, &self.window_config);
                }
            }
        }

        self.frame.paste(scene, 0, 0);
        hud.draw(&mut self.frame, &self.client.hud_view());
        self.hud = hud;

        if let Some(presenter) = self.presenter.as_mut() {
            presenter.upload(self.frame.image());
        }
    }

    fn handle_input(&mut self, event_loop: &ActiveEventLoop) {
        for action in self.actions.triggered(&self.input) {
            match action {
                Action::ToggleMusic => { self.client.toggle_music(); }
                Action::VolumeUp => self.client.adjust_volume(VOLUME_STEP),
                Action::VolumeDown => self.client.adjust_volume(-VOLUME_STEP),
                Action::Reset => { self.client.request_reset(); }
                Action::Quit => event_loop.exit(),
            }
        }

        let viewport = letterbox_viewport(&self.window_config);
        let [mx, my] = self.input.mouse_pos;
        let pointer = viewport.to_frame(&self.window_config, mx, my);

        if let Some([fx, fy]) = pointer {
            if self.input.is_mouse_pressed(MouseButton::Left) {
                if self.hud.scene_rect().contains(fx, fy) {
                    self.client.handle_click(fx, fy, [0.0, 0.0]);
                } else {
                    match self.hud.hit_test(fx, fy) {
                        Some(HudAction::ToggleMusic) => { self.client.toggle_music(); }
                        Some(HudAction::SetVolume(v)) => self.client.set_volume(v),
                        Some(HudAction::Reset) => { self.client.request_reset(); }
                        None => {}
                    }
                }
            }
            if self.input.mouse_wheel != 0.0 && self.hud.layout().log.contains(fx, fy) {
                self.client.scroll_log(self.input.mouse_wheel.round() as i32);
            }
        }

        self.input.clear_frame_state();
    }

    fn present(&mut self) {
        let viewport = letterbox_viewport(&self.window_config);
        let Some(presenter) = self.presenter.as_mut() else { return };
        match presenter.present(viewport) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = presenter.window.inner_size();
                presenter.resize(size);
            }
            Err(e) => tracing::error!("present failed: {e}"),
        }
    }

    fn create_presenter(&mut self, event_loop: &ActiveEventLoop) -> Result<Presenter, ClientError> {
        let (width, height) = self.frame.size();
        let window = Arc::new(event_loop.create_window(
            Window::default_attributes()
                .with_title(&self.config.title)
                .with_inner_size(PhysicalSize::new(width, height)),
        )?);
        apply_window_settings(&window, &self.window_config);
        pollster::block_on(Presenter::new(window))
    }
}

impl ApplicationHandler<ClientEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.presenter.is_some() {
            return;
        }
        match self.create_presenter(event_loop) {
            Ok(presenter) => {
                let size = presenter.window.inner_size();
                self.window_config.physical_width = size.width;
                self.window_config.physical_height = size.height;
                self.presenter = Some(presenter);
                self.needs_compose = true;
            }
            Err(e) => {
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: ClientEvent) {
        match event {
            ClientEvent::Response(ticket, result) => {
                self.client.on_response(ticket, result);
            }
            ClientEvent::TilesLoaded(sheet) => {
                tracing::info!(width = sheet.width(), height = sheet.height(), "tilesheet loaded");
                self.client.tiles_loaded(sheet);
            }
            ClientEvent::FontLoaded(font) => {
                tracing::info!(glyphs = font.font.glyphs.len(), "font loaded");
                self.frame.set_font(font);
                self.needs_compose = true;
            }
            ClientEvent::AssetFailed(e) => tracing::error!("{e}"),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.handle_input(event_loop);
        if self.client.take_dirty() {
            self.needs_compose = true;
        }
        if self.needs_compose {
            if let Some(window) = self.window() {
                window.request_redraw();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(presenter) = self.presenter.as_mut() {
                    presenter.resize(size);
                    presenter.window.request_redraw();
                }
                self.window_config.physical_width = size.width;
                self.window_config.physical_height = size.height;
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.input.mouse_pos = [position.x as f32, position.y as f32];
            }

            WindowEvent::MouseInput { button, state: ElementState::Pressed, .. } => {
                self.input.mouse_pressed.insert(button);
            }

            WindowEvent::MouseWheel { delta, .. } => match delta {
                MouseScrollDelta::LineDelta(_, y) => self.input.mouse_wheel += y,
                MouseScrollDelta::PixelDelta(pos) => self.input.mouse_wheel += (pos.y / 16.0) as f32,
            },

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.input.keys_pressed.insert(code);
            }

            WindowEvent::RedrawRequested => {
                if std::mem::take(&mut self.needs_compose) {
                    self.compose();
                }
                self.present();
            }

            _ => {}
        }
    }
}

/// Open the window and run until it is closed.
pub fn run(config: ClientConfig) -> Result<(), ClientError> {
    let event_loop = EventLoop::<ClientEvent>::with_user_event().build()?;
    let proxy = event_loop.create_proxy();

    spawn_asset_loads(&config, &proxy);

    let backend = KiraBackend::load(config.music_path(), &config.effect_paths());
    let audio = AudioController::new(backend, config.volume);
    let dispatcher = ThreadDispatcher::new(HttpServer::new(config.server_url.as_str()), proxy);
    tracing::info!(server = %config.server_url, assets = %config.asset_root().display(), "starting");
    let client = GameClient::new(FrameBuffer::new(0, 0), audio, dispatcher);

    let frame = FrameBuffer::new(0, 0);
    let hud = Hud::new(0, 0, frame.text_metrics());
    let (width, height) = hud.frame_size();
    let mut window_config = WindowConfig::fitted(width, height);
    window_config.mode = config.window_mode;

    let mut app = App {
        config,
        client,
        presenter: None,
        window_config,
        frame: FrameBuffer::new(width, height),
        hud,
        input: InputState::new(),
        actions: ActionMap::standard(),
        needs_compose: true,
        error: None,
    };
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
