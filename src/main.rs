//! Road Rush entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent};

    use road_rush::renderer::{CanvasSurface, Surface, draw_frame};
    use road_rush::sim::{GameState, tick};
    use road_rush::tuning::Tuning;

    /// Canvas the page must provide
    const CANVAS_ID: &str = "gameCanvas";

    /// Game instance holding all state
    struct Game {
        state: GameState,
        surface: CanvasSurface,
    }

    impl Game {
        /// Advance one frame and draw it. Returns whether the run continues.
        fn frame(&mut self, time: f64) -> bool {
            tick(&mut self.state, time);
            draw_frame(&mut self.surface, &self.state);
            self.state.is_running()
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Road Rush starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| JsValue::from_str("missing <canvas id=\"gameCanvas\">"))?
            .dyn_into()?;

        let surface = CanvasSurface::new(&canvas)?;
        let size = surface.size();
        let tuning = Tuning::load_or_default(
            canvas.get_attribute("data-tuning").as_deref(),
            size.x,
            size.y,
        );

        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(tuning, size.x, size.y, seed);
        log::info!(
            "Game initialized with seed {} on a {}x{} surface",
            seed,
            size.x,
            size.y
        );

        let game = Rc::new(RefCell::new(Game { state, surface }));

        setup_input_handlers(&canvas, game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Road Rush running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        // Mouse move - steer toward the pointer
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let x = event.client_x() as f32 - rect.left() as f32;
                game.borrow_mut().state.pointer_moved(x);
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse leave - driving off the canvas ends the run
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().state.pointer_left();
            });
            canvas.add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("no window, game loop not scheduled");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let running = game.borrow_mut().frame(time);

        // The terminal frame (with overlay) has been drawn; stop scheduling
        if running {
            request_animation_frame(game);
        } else {
            log::info!("Game loop stopped");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use road_rush::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH, FRAME_MS};
    use road_rush::sim::{GameState, tick};
    use road_rush::tuning::Tuning;

    env_logger::init();
    log::info!("Road Rush (native) starting...");
    log::info!("Native mode runs a headless autopilot session - use `trunk serve` for the web version");

    // Usage: road-rush [tuning.json] [seed]
    let mut args = std::env::args().skip(1);
    let json = args.next().and_then(|path| match std::fs::read_to_string(&path) {
        Ok(json) => Some(json),
        Err(e) => {
            log::warn!("Could not read tuning file {}: {}", path, e);
            None
        }
    });
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    let tuning = Tuning::load_or_default(json.as_deref(), DEFAULT_WIDTH, DEFAULT_HEIGHT);
    let mut state = GameState::new(tuning, DEFAULT_WIDTH, DEFAULT_HEIGHT, seed);
    log::info!(
        "Game initialized with seed {} on a {}x{} surface",
        seed,
        DEFAULT_WIDTH,
        DEFAULT_HEIGHT
    );

    // Two minutes of 60 Hz frames at most
    let mut now = 0.0;
    for _ in 0..(120 * 60) {
        now += FRAME_MS;
        state.pointer_moved(autopilot::pointer_x(&state));
        tick(&mut state, now);
        if !state.is_running() {
            break;
        }
    }

    log::info!(
        "Session over after {} frames: score {} speed {:.1}",
        state.frames(),
        state.score(),
        state.speed()
    );
    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not serialize snapshot: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Demo driver for headless runs
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use road_rush::sim::GameState;

    /// How far ahead of the car obstacles are considered
    const LOOKAHEAD: f32 = 260.0;
    /// Candidate lane positions are tried every this many pixels
    const STEP: f32 = 5.0;

    /// Pointer x that steers toward the clearest lane ahead
    pub fn pointer_x(state: &GameState) -> f32 {
        let car = state.player_rect();
        let (left, right) = (state.left_limit(), state.right_limit());

        let threats: Vec<(f32, f32)> = state
            .obstacles()
            .iter()
            .map(|o| o.rect())
            .filter(|r| r.bottom() >= car.top() - LOOKAHEAD && r.top() <= car.bottom())
            .map(|r| (r.left(), r.right()))
            .collect();

        // Horizontal clearance between the car at `x` and the nearest threat
        let clearance = |x: f32| {
            threats
                .iter()
                .map(|&(l, r)| {
                    if x + car.size.x < l {
                        l - (x + car.size.x)
                    } else if x > r {
                        x - r
                    } else {
                        -1.0
                    }
                })
                .fold(f32::INFINITY, f32::min)
        };

        let mut best = car.left();
        let mut best_score = f32::NEG_INFINITY;
        let mut x = left;
        while x <= right {
            // Prefer clear lanes, then staying close to the current lane
            let score = clearance(x).min(60.0) - (x - car.left()).abs() * 0.01;
            if score > best_score {
                best_score = score;
                best = x;
            }
            x += STEP;
        }

        best + car.size.x / 2.0
    }
}
