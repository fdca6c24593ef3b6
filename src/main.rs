//! Munch entry point
//!
//! In the browser this builds the page chrome (canvas, sound prompt, sound
//! toggle, toast) and drives the surface from requestAnimationFrame. Natively
//! it plays one headless session with an autopilot pointer.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, MouseEvent};

    use munch::audio::AudioManager;
    use munch::renderer::CanvasPainter;
    use munch::toast::ToastTicket;
    use munch::{FrameOutcome, GameSurface, SessionController, Tuning};

    const CANVAS_ID: &str = "munch-canvas";
    const SOUND_ON_LABEL: &str = "🔊";
    const SOUND_OFF_LABEL: &str = "🔇";

    /// DOM chrome around the canvas
    struct Ui {
        prompt: HtmlElement,
        sound_btn: HtmlElement,
        toast: HtmlElement,
    }

    impl Ui {
        fn set_shown(el: &HtmlElement, display: &str) {
            let _ = el.style().set_property("display", display);
        }

        fn hide_prompt(&self) {
            Self::set_shown(&self.prompt, "none");
        }

        fn set_sound_label(&self, on: bool) {
            self.sound_btn
                .set_text_content(Some(if on { SOUND_ON_LABEL } else { SOUND_OFF_LABEL }));
        }

        fn sync_toast(&self, message: &str, visible: bool) {
            self.toast.set_text_content(Some(message));
            Self::set_shown(&self.toast, if visible { "block" } else { "none" });
        }
    }

    /// Game state shared by every browser callback
    struct Game {
        surface: GameSurface,
        session: SessionController<AudioManager>,
        painter: CanvasPainter,
        canvas: HtmlCanvasElement,
        ui: Ui,
        /// Pending animation frame, cancelled on teardown
        raf_id: Option<i32>,
    }

    impl Game {
        fn fit_to_window(&mut self) {
            let Some(window) = web_sys::window() else { return };
            let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            self.canvas.set_width(w as u32);
            self.canvas.set_height(h as u32);
            self.surface.resize(w as f32, h as f32);
            log::debug!("Viewport {}x{}", w, h);
        }

        fn sync_toast(&self) {
            let toast = self.session.toast();
            self.ui.sync_toast(toast.message(), toast.is_visible());
        }

        fn teardown(&mut self) {
            if let Some(id) = self.raf_id.take()
                && let Some(window) = web_sys::window()
            {
                let _ = window.cancel_animation_frame(id);
            }
            self.surface.teardown();
        }
    }

    pub fn run() -> Result<(), JsValue> {
        log::info!("Munch starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let body = document.body().ok_or("no body")?;

        let canvas: HtmlCanvasElement = match document.get_element_by_id(CANVAS_ID) {
            Some(el) => el.dyn_into()?,
            None => {
                let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
                canvas.set_id(CANVAS_ID);
                canvas.set_attribute("style", "position:fixed;inset:0;display:block;background:#fff")?;
                body.append_child(&canvas)?;
                canvas
            }
        };
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d context unavailable")?
            .dyn_into()?;

        let ui = build_ui(&document, &body)?;

        let tuning = Tuning::load();
        let seed = js_sys::Date::now() as u64;
        let session = SessionController::new(AudioManager::new(), &tuning);
        let surface = GameSurface::new(seed, tuning);
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            surface,
            session,
            painter: CanvasPainter::new(ctx),
            canvas,
            ui,
            raf_id: None,
        }));
        game.borrow_mut().fit_to_window();

        setup_window_handlers(game.clone())?;
        setup_prompt(&document, game.clone())?;
        setup_sound_toggle(game)?;

        log::info!("Munch ready, waiting for sound prompt");
        Ok(())
    }

    fn styled(document: &Document, tag: &str, id: &str, style: &str) -> Result<HtmlElement, JsValue> {
        let el: HtmlElement = document.create_element(tag)?.dyn_into()?;
        el.set_id(id);
        el.set_attribute("style", style)?;
        Ok(el)
    }

    fn build_ui(document: &Document, body: &HtmlElement) -> Result<Ui, JsValue> {
        let prompt = styled(
            document,
            "div",
            "munch-prompt",
            "position:fixed;inset:0;display:flex;flex-direction:column;align-items:center;\
             justify-content:center;gap:16px;background:rgba(255,255,255,.9);\
             font:18px Poppins,sans-serif;z-index:3",
        )?;
        let question = document.create_element("p")?;
        question.set_text_content(Some("Enable sound for a better experience?"));
        prompt.append_child(&question)?;
        let buttons = styled(document, "div", "munch-prompt-buttons", "display:flex;gap:12px")?;
        for (id, label) in [("munch-sound-yes", "Yes"), ("munch-sound-no", "No")] {
            let btn = styled(document, "button", id, "padding:8px 24px;font:inherit;cursor:pointer")?;
            btn.set_text_content(Some(label));
            buttons.append_child(&btn)?;
        }
        prompt.append_child(&buttons)?;

        // Above the prompt overlay so sound can be toggled at any time
        let sound_btn = styled(
            document,
            "button",
            "munch-sound-toggle",
            "position:fixed;top:12px;right:12px;display:block;font-size:22px;\
             background:none;border:none;cursor:pointer;z-index:4",
        )?;
        sound_btn.set_text_content(Some(SOUND_OFF_LABEL));
        let toast = styled(
            document,
            "div",
            "munch-toast",
            "position:fixed;top:20%;left:50%;transform:translateX(-50%);display:none;\
             padding:10px 20px;background:#000;color:#fff;font:600 16px Poppins,sans-serif;\
             border-radius:8px;pointer-events:none;z-index:2",
        )?;

        body.append_child(&prompt)?;
        body.append_child(&sound_btn)?;
        body.append_child(&toast)?;
        Ok(Ui { prompt, sound_btn, toast })
    }

    fn setup_window_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Resize
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().fit_to_window();
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Pointer
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .surface
                    .pointer_moved(event.client_x() as f32, event.client_y() as f32);
            });
            window.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Page going away
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().teardown();
            });
            window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_prompt(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        for (id, enable) in [("munch-sound-yes", true), ("munch-sound-no", false)] {
            let Some(btn) = document.get_element_by_id(id) else { continue };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let started = {
                    let mut g = game.borrow_mut();
                    if !g.session.answer_prompt(enable) {
                        return;
                    }
                    g.ui.hide_prompt();
                    let on = g.session.sound_on();
                    g.ui.set_sound_label(on);
                    g.sync_toast();
                    g.surface.start()
                };
                schedule_toast_timers(&game);
                if started {
                    request_animation_frame(game.clone());
                }
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_sound_toggle(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let btn = game.borrow().ui.sound_btn.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let mut g = game.borrow_mut();
            let on = g.session.toggle_sound();
            g.ui.set_sound_label(on);
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Start a browser timer for every toast shown since the last call
    fn schedule_toast_timers(game: &Rc<RefCell<Game>>) {
        let tickets = game.borrow_mut().session.drain_toast_timers();
        let Some(window) = web_sys::window() else { return };
        for ticket in tickets {
            let game = game.clone();
            let closure = Closure::once(move || hide_toast(&game, ticket));
            let scheduled = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                ticket.hide_after_ms as i32,
            );
            if scheduled.is_err() {
                log::warn!("Failed to schedule toast timer");
            }
            closure.forget();
        }
    }

    fn hide_toast(game: &Rc<RefCell<Game>>, ticket: ToastTicket) {
        let mut g = game.borrow_mut();
        if g.session.hide_toast(ticket) {
            g.sync_toast();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let next = game.clone();
        let closure = Closure::once(move |_time: f64| {
            game_loop(next);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => game.borrow_mut().raf_id = Some(id),
            Err(_) => log::error!("requestAnimationFrame failed"),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let outcome = {
            let mut guard = game.borrow_mut();
            let g = &mut *guard;
            g.raf_id = None;

            let outcome = g.surface.frame(&mut g.painter, &mut g.session);
            g.sync_toast();
            if outcome == FrameOutcome::Completed && g.surface.enter_finale() {
                FrameOutcome::Continue
            } else {
                outcome
            }
        };

        schedule_toast_timers(&game);
        if outcome == FrameOutcome::Continue {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    if let Err(e) = wasm_game::run() {
        log::error!("Munch failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod harness {
    //! Headless session: autopilot pointer, recorded draws, logged cues

    use glam::Vec2;

    use munch::audio::{CueLog, SoundCue};
    use munch::renderer::Recorder;
    use munch::sim::SimState;
    use munch::toast::ToastTicket;
    use munch::{FrameOutcome, GameSurface, SessionController, Tuning};

    const VIEWPORT: (f32, f32) = (800.0, 600.0);
    /// Simulated display refresh
    const FRAME_MS: u32 = 16;
    /// Pointer speed (pixels/frame)
    const AUTOPILOT_SPEED: f32 = 8.0;
    const MAX_FRAMES: u64 = 50_000;
    const FINALE_FRAMES: u32 = 120;

    /// Nearest uneaten particle to the pointer
    pub fn autopilot_target(state: &SimState) -> Option<Vec2> {
        state
            .remaining()
            .map(|p| p.pos)
            .min_by(|a, b| {
                a.distance_squared(state.pointer)
                    .partial_cmp(&b.distance_squared(state.pointer))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// Step the pointer toward the target, capped at `speed`
    pub fn steer(pointer: Vec2, target: Vec2, speed: f32) -> Vec2 {
        let to = target - pointer;
        if to.length() <= speed {
            target
        } else {
            pointer + to.normalize() * speed
        }
    }

    pub fn play(seed: u64) {
        let tuning = Tuning::load();
        let mut surface = GameSurface::new(seed, tuning.clone());
        let mut session = SessionController::new(CueLog::new(), &tuning);
        let mut painter = Recorder::new();

        surface.resize(VIEWPORT.0, VIEWPORT.1);
        session.answer_prompt(true);
        surface.start();

        let mut now_ms: u32 = 0;
        let mut timers: Vec<(u32, ToastTicket)> = Vec::new();
        let mut toasts_hidden = 0;

        loop {
            for ticket in session.drain_toast_timers() {
                timers.push((now_ms + ticket.hide_after_ms, ticket));
            }
            timers.retain(|(due, ticket)| {
                if *due > now_ms {
                    return true;
                }
                if session.hide_toast(*ticket) {
                    toasts_hidden += 1;
                }
                false
            });

            if let Some(target) = autopilot_target(&surface.state) {
                let p = steer(surface.state.pointer, target, AUTOPILOT_SPEED);
                surface.pointer_moved(p.x, p.y);
            }

            painter.clear_log();
            match surface.frame(&mut painter, &mut session) {
                FrameOutcome::Continue => {}
                FrameOutcome::Completed => break,
                FrameOutcome::Stopped => {
                    log::error!("Surface stopped before completion");
                    return;
                }
            }
            now_ms += FRAME_MS;

            if surface.state.frames >= MAX_FRAMES {
                log::error!("Autopilot gave up after {} frames", MAX_FRAMES);
                return;
            }
        }

        let frames = surface.state.frames;
        if !surface.enter_finale() {
            log::error!("Finale did not start");
            return;
        }
        for _ in 0..FINALE_FRAMES {
            painter.clear_log();
            surface.frame(&mut painter, &mut session);
        }

        let cues = &session.audio().played;
        let count = |cue: SoundCue| cues.iter().filter(|c| **c == cue).count();
        log::info!(
            "Collected {}/{} in {} frames (~{:.1}s), halfway toast: {}",
            session.eaten_count(),
            surface.state.total(),
            frames,
            frames as f32 / 60.0,
            session.halfway_shown()
        );
        log::info!(
            "Cues: {} collect, {} milestone, {} celebration; toasts hidden: {}",
            count(SoundCue::Collect),
            count(SoundCue::Milestone),
            count(SoundCue::Celebration),
            toasts_hidden
        );
        log::info!("Finale frame draws {} commands", painter.commands.len());

        match serde_json::to_string(&surface.state) {
            Ok(json) => log::debug!("Final state: {}", json),
            Err(e) => log::warn!("Failed to serialize state: {}", e),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_steer_caps_speed() {
            let p = steer(Vec2::ZERO, Vec2::new(100.0, 0.0), 8.0);
            assert_eq!(p, Vec2::new(8.0, 0.0));
            let p = steer(Vec2::ZERO, Vec2::new(3.0, 4.0), 8.0);
            assert_eq!(p, Vec2::new(3.0, 4.0));
        }

        #[test]
        fn test_target_is_nearest_live_particle() {
            let mut state = SimState::new(3);
            state.resize(800.0, 600.0, &Tuning::default());
            state.move_pointer(0.0, 0.0);
            let nearest = state.particles[0].pos;
            for p in state.particles.iter_mut().skip(1) {
                p.pos = nearest * 2.0 + Vec2::splat(50.0);
            }
            assert_eq!(autopilot_target(&state), Some(nearest));

            state.particles[0].eaten = true;
            assert_ne!(autopilot_target(&state), Some(nearest));
            for p in state.particles.iter_mut() {
                p.eaten = true;
            }
            assert_eq!(autopilot_target(&state), None);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(42);
    log::info!("Munch (native) starting with seed {}", seed);
    log::info!("Run the wasm build in a browser to play; playing a headless session");

    harness::play(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
