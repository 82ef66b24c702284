//! Neon Breakout entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use neon_breakout::config::GameConfig;
    use neon_breakout::platform::LoopToken;
    use neon_breakout::renderer::{RenderState, build_scene};
    use neon_breakout::sim::{GameEvent, GamePhase};
    use neon_breakout::{Game, HudSnapshot};

    /// Browser-side game instance
    struct App {
        game: Game,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        start_time: f64,
        /// Game-over/victory dim layer is showing
        overlay_visible: bool,
    }

    impl App {
        /// Render the current frame
        fn render(&mut self) {
            let show_overlay = self.game.state.phase == GamePhase::Paused || self.overlay_visible;
            let time_secs = ((js_sys::Date::now() - self.start_time) / 1000.0) as f32;
            let vertices = build_scene(
                &self.game.state,
                &self.game.effects,
                time_secs,
                show_overlay,
            );

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Push HUD values to the DOM when they change
        fn update_hud(&mut self) {
            let Some(HudSnapshot {
                score,
                lives,
                level,
            }) = self.game.hud_update()
            else {
                return;
            };
            let Some(document) = document() else {
                return;
            };
            set_text(&document, "score", &score.to_string());
            set_text(&document, "lives", &lives.to_string());
            set_text(&document, "level", &level.to_string());
        }

        /// Show/hide the DOM overlays for the current phase
        fn update_overlays(&self) {
            let Some(document) = document() else {
                return;
            };
            let phase = self.game.state.phase;
            let score = self.game.state.score.to_string();

            set_visible(&document, "paused", phase == GamePhase::Paused);

            let game_over = self.overlay_visible && phase == GamePhase::GameOver;
            set_visible(&document, "game-over", game_over);
            if game_over {
                set_text(&document, "final-score", &score);
            }

            let victory = self.overlay_visible && phase == GamePhase::Victory;
            set_visible(&document, "victory", victory);
            if victory {
                set_text(&document, "victory-score", &score);
            }
        }

        /// Size the canvas to its container; returns the playfield width
        fn fit_canvas(&mut self) -> f32 {
            let config = &self.game.state.config;
            let container_width = document()
                .and_then(|d| d.query_selector(".game-container").ok().flatten())
                .map(|el| el.client_width() as f32)
                .unwrap_or(config.canvas.max_width + config.canvas.container_margin);
            let width = config.canvas.fit_width(container_width, config.paddle.width);
            let height = config.canvas.height;

            let dpr = web_sys::window()
                .map(|w| w.device_pixel_ratio())
                .unwrap_or(1.0);
            let physical = ((width as f64 * dpr) as u32, (height as f64 * dpr) as u32);
            self.canvas.set_width(physical.0);
            self.canvas.set_height(physical.1);
            let _ = self.canvas.set_attribute(
                "style",
                &format!("width:{}px;height:{}px", width, height),
            );

            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(physical.0, physical.1);
                render_state.set_playfield(width, height);
            }
            width
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    /// Optional JSON overrides embedded in the page
    fn load_config(document: &Document) -> GameConfig {
        let Some(json) = document
            .get_element_by_id("game-config")
            .and_then(|el| el.text_content())
        else {
            return GameConfig::default();
        };
        match GameConfig::from_json(&json) {
            Ok(config) => {
                log::info!("Loaded game config from page");
                config
            }
            Err(e) => {
                log::warn!("{}; using default config", e);
                GameConfig::default()
            }
        }
    }

    /// Boot the game into the host page
    ///
    /// The page provides `<canvas id="gameCanvas">` inside a `.game-container`,
    /// HUD text elements `#score`, `#lives` and `#level`, and overlay elements
    /// `#paused`, `#game-over` (with `#final-score`) and `#victory` (with
    /// `#victory-score`), hidden via a `hidden` class. An optional
    /// `<script id="game-config" type="application/json">` overrides config.
    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Neon Breakout starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #gameCanvas element");
            return;
        };

        let config = load_config(&document);
        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App {
            game: Game::new(config.clone(), config.canvas.max_width, seed),
            render_state: None,
            canvas: canvas.clone(),
            start_time: js_sys::Date::now(),
            overlay_visible: false,
        }));
        let width = app.borrow_mut().fit_canvas();
        app.borrow_mut().game.resize(width);

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU, falling back to WebGL2
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {}", e);
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let (physical_w, physical_h) = (canvas.width(), canvas.height());
        match RenderState::new(
            surface,
            &adapter,
            physical_w,
            physical_h,
            (width, config.canvas.height),
        )
        .await
        {
            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                log::error!("Failed to create device: {}", e);
                return;
            }
        }

        setup_input_handlers(&canvas, app.clone());
        setup_auto_pause(app.clone());
        setup_resize(app.clone());

        // Start the first round
        app.borrow_mut().game.input.request_restart();
        start_loop(app);

        log::info!("Neon Breakout running!");
    }

    /// Cancel any pending frame and begin a fresh loop chain
    fn start_loop(app: Rc<RefCell<App>>) {
        let (token, cancel) = app.borrow_mut().game.loop_handle.restart();
        if let (Some(id), Some(window)) = (cancel, web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
        request_animation_frame(app, token);
    }

    fn request_animation_frame(app: Rc<RefCell<App>>, token: LoopToken) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let frame_app = app.clone();
        let closure = Closure::once(move |_time: f64| {
            game_loop(frame_app, token);
        });
        if let Ok(id) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            app.borrow_mut().game.loop_handle.scheduled(token, id);
        }
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, token: LoopToken) {
        let (events, keep_going, delay_ms) = {
            let mut a = app.borrow_mut();
            if !a.game.loop_handle.fired(token) {
                return;
            }

            let events = a.game.frame();
            if events.contains(&GameEvent::Restarted) {
                a.overlay_visible = false;
            }
            a.render();
            a.update_hud();
            a.update_overlays();
            (
                events,
                a.game.wants_next_frame(),
                a.game.state.config.overlay_delay_ms,
            )
        };

        let ended = events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. } | GameEvent::Victory { .. }));
        if ended {
            schedule_terminal_overlay(app.clone(), delay_ms);
        }

        if keep_going {
            request_animation_frame(app, token);
        } else {
            app.borrow_mut().game.loop_handle.stop();
        }
    }

    /// Show the game-over/victory screen after a short delay, unless a
    /// restart got there first
    fn schedule_terminal_overlay(app: Rc<RefCell<App>>, delay_ms: u32) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move || {
            let mut a = app.borrow_mut();
            if a.game.state.phase.is_terminal() && !a.game.loop_handle.is_active() {
                a.overlay_visible = true;
                a.render();
                a.update_overlays();
            }
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            i32::try_from(delay_ms).unwrap_or(i32::MAX),
        );
        closure.forget();
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Mouse move - paddle follows pointer
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let x = event.client_x() as f32 - rect.left() as f32;
                app.borrow_mut().game.pointer_moved(x);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move - first touch point
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    app.borrow_mut().game.pointer_moved(x);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let Some(document) = document() else {
            return;
        };

        // Key down - pause, restart, demo mode, arrows
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                let handled = app.borrow_mut().game.input.key_down(&code, event.repeat());
                if handled {
                    event.prevent_default();
                }
                if code == "KeyR" {
                    app.borrow_mut().overlay_visible = false;
                    start_loop(app.clone());
                    log::info!("Restart requested");
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up - release arrows
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if app.borrow_mut().game.input.key_up(&event.code()) {
                    event.prevent_default();
                }
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    app.borrow_mut().game.auto_pause();
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().game.auto_pause();
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut a = app.borrow_mut();
            let width = a.fit_canvas();
            a.game.resize(width);
            // No loop is running to redraw idle or finished games
            if !a.game.state.phase.keeps_loop_alive() {
                a.render();
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use neon_breakout::sim::{GameEvent, GamePhase};
    use neon_breakout::{Game, GameConfig};

    /// Upper bound on frames for the headless demo (about five minutes at 60 Hz)
    const MAX_FRAMES: u32 = 18_000;

    env_logger::init();
    log::info!("Neon Breakout (native) starting...");
    log::info!("Native mode runs a headless demo - build for wasm32 to play in the browser");

    let config = GameConfig::default();
    let width = config.canvas.max_width;
    let mut game = Game::new(config, width, 2024);
    game.input.key_down("KeyI", false);
    game.input.request_restart();

    let mut frames = 0;
    while frames < MAX_FRAMES {
        for event in game.frame() {
            if let GameEvent::BrickDestroyed { row, col, points, .. } = event {
                log::debug!("Brick ({}, {}) destroyed for {}", row, col, points);
            }
        }
        frames += 1;
        if !game.wants_next_frame() {
            break;
        }
    }

    let state = &game.state;
    let outcome = match state.phase {
        GamePhase::Victory => "victory",
        GamePhase::GameOver => "game over",
        _ => "time limit",
    };
    println!(
        "Demo finished after {} frames: {}, score {}, lives {}, bricks left {}",
        frames,
        outcome,
        state.score,
        state.lives,
        state.bricks.active_count()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
