//! Lane Rush entry point
//!
//! Native builds run headless autopilot sessions; the web build drives the
//! session from `requestAnimationFrame` with keyboard input and a DOM HUD.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use lane_rush::audio::{AudioEngine, WebAudioBackend};
    use lane_rush::autopilot::choose_lane_change;
    use lane_rush::persistence::LocalStore;
    use lane_rush::{BestScore, LaneDirection, Phase, Session, SessionSnapshot, Settings};

    /// HUD is refreshed every this many frames
    const HUD_INTERVAL: u32 = 6;
    /// Frame delta used before the first timestamp arrives (ms)
    const FIRST_FRAME_MS: f64 = 1000.0 / 60.0;

    /// Game instance holding all state
    struct Game {
        session: Session,
        audio: Rc<RefCell<AudioEngine<WebAudioBackend>>>,
        settings: Settings,
        snapshot: SessionSnapshot,
        last_time: f64,
        frame: u32,
        /// Attract mode: autopilot steers and restarts after a crash
        autopilot: bool,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = match LocalStore::open() {
                Ok(store) => Settings::load(&store),
                Err(err) => {
                    log::warn!("Settings unavailable: {}", err);
                    Settings::default()
                }
            };
            let best = match LocalStore::open() {
                Ok(store) => BestScore::load(Box::new(store)),
                Err(err) => {
                    log::warn!("Best score will not persist: {}", err);
                    BestScore::in_memory(0)
                }
            };

            let audio = Rc::new(RefCell::new(
                AudioEngine::new(WebAudioBackend::new()).with_settings(&settings),
            ));
            let mut session = Session::with_seed(seed, best);
            session.subscribe(Box::new(audio.clone()));
            let snapshot = session.snapshot();

            Self {
                session,
                audio,
                settings,
                snapshot,
                last_time: 0.0,
                frame: 0,
                autopilot: false,
            }
        }

        /// Start or restart with the saved track and car
        fn start(&mut self) {
            self.audio.borrow().backend().resume();
            let track = self.settings.track_profile();
            let car = self.settings.car();
            match self.session.start_session(track, &car) {
                Ok(snapshot) => self.snapshot = snapshot,
                Err(err) => log::error!("Cannot start session: {}", err),
            }
        }

        fn reset(&mut self) {
            self.session.reset();
            self.snapshot = self.session.snapshot();
        }

        fn steer(&mut self, direction: LaneDirection) {
            self.session.set_lane(direction);
        }

        fn update(&mut self, time: f64) {
            let delta_ms = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                FIRST_FRAME_MS
            };
            self.last_time = time;

            if self.autopilot {
                if self.snapshot.phase != Phase::Running {
                    self.start();
                } else if let Some(direction) = choose_lane_change(&self.snapshot) {
                    self.steer(direction);
                }
            }

            self.snapshot = self.session.tick(delta_ms);
            self.frame = self.frame.wrapping_add(1);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let snap = &self.snapshot;

            let set_text = |id: &str, text: &str| {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(text));
                }
            };

            set_text("hud-score", &snap.score.to_string());
            set_text("hud-best", &snap.best_score.to_string());
            set_text("hud-speed", &format!("{:.1}", snap.speed));
            set_text("hud-track", self.settings.track_profile().name);
            set_text("hud-lane", &(snap.player.lane + 1).to_string());

            let status = match (snap.phase, self.autopilot) {
                (_, true) => "Autopilot (I to take over)",
                (Phase::Idle, false) => "Press Space to start",
                (Phase::Running, false) => "",
                (Phase::Terminated, false) => "Crashed! Space to restart, Esc to reset",
            };
            set_text("status", status);

            // Show/hide game over
            if let Some(el) = document.get_element_by_id("game-over") {
                if snap.phase == Phase::Terminated && !self.autopilot {
                    let _ = el.set_attribute("class", "");
                    set_text("final-score", &snap.score.to_string());
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(err) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {err}").into());
        }

        log::info!("Lane Rush starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document, cannot run");
            return;
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(game.clone());
        game.borrow().update_hud();

        // Start game loop
        request_animation_frame(game);

        log::info!("Lane Rush running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut g = game.borrow_mut();
            match event.key().as_str() {
                "ArrowLeft" | "a" | "A" => g.steer(LaneDirection::Left),
                "ArrowRight" | "d" | "D" => g.steer(LaneDirection::Right),
                " " => {
                    event.prevent_default();
                    g.start();
                }
                "Escape" => g.reset(),
                "i" | "I" => {
                    g.autopilot = !g.autopilot;
                    log::info!("Autopilot: {}", g.autopilot);
                }
                _ => {}
            }
        });
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            if g.frame % HUD_INTERVAL == 0 {
                g.update_hud();
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::str::FromStr;
    use std::time::{SystemTime, UNIX_EPOCH};

    use clap::Parser;
    use lane_rush::audio::{AudioEngine, SilentBackend};
    use lane_rush::autopilot::choose_lane_change;
    use lane_rush::persistence::FileStore;
    use lane_rush::{BestScore, Phase, Session, Settings, TrackId};

    /// Simulated frame length (ms)
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Stop a run that outlives this many ticks
    const MAX_TICKS: u64 = 100_000;

    #[derive(Debug, Parser)]
    #[command(name = "lane-rush", version)]
    #[command(about = "Run a headless Lane Rush session driven by the autopilot")]
    pub struct Args {
        /// RNG seed (defaults to the current time)
        seed: Option<u64>,

        /// Track: highway, desert, forest or neon-city (defaults to saved settings)
        #[arg(value_parser = TrackId::from_str)]
        track: Option<TrackId>,

        /// Clear the stored best score before running
        #[arg(long)]
        reset_best: bool,
    }

    impl Args {
        fn seed(&self) -> u64 {
            self.seed.unwrap_or_else(|| {
                SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_millis() as u64)
                    .unwrap_or_default()
            })
        }
    }

    pub fn run(args: Args) -> Result<(), String> {
        let seed = args.seed();
        let store = FileStore::open(".").map_err(|err| err.to_string())?;
        let settings = Settings::load(&store);
        let track = args.track.unwrap_or(settings.track).profile();
        let car = settings.car();

        let mut best = BestScore::load(Box::new(store));
        if args.reset_best {
            best.clear();
        }
        let mut session = Session::with_seed(seed, best);
        session.subscribe(Box::new(
            AudioEngine::new(SilentBackend).with_settings(&settings),
        ));

        log::info!(
            "Lane Rush (headless) seed {} on {}, best so far {}",
            seed,
            track.name,
            session.best_score()
        );

        let mut snap = session
            .start_session(track, &car)
            .map_err(|err| err.to_string())?;
        while snap.phase == Phase::Running && snap.score < MAX_TICKS {
            if let Some(direction) = choose_lane_change(&snap) {
                session.set_lane(direction);
            }
            snap = session.tick(FRAME_MS);
        }

        if snap.phase == Phase::Running {
            log::warn!("Tick limit reached, stopping at score {}", snap.score);
            session.reset();
        }

        log::info!(
            "Final score {} at speed {:.2} ({:.1}s), best {}",
            snap.score,
            snap.speed,
            snap.elapsed_ms / 1000.0,
            session.best_score()
        );
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_seed_and_track() {
            let args = Args::try_parse_from(["lane-rush", "7", "desert"]).unwrap();
            assert_eq!(args.seed(), 7);
            assert_eq!(args.track, Some(TrackId::Desert));
            assert!(!args.reset_best);
        }

        #[test]
        fn test_parse_rejects_bad_input() {
            assert!(Args::try_parse_from(["lane-rush", "fast"]).is_err());
            assert!(Args::try_parse_from(["lane-rush", "1", "moon"]).is_err());
            assert!(Args::try_parse_from(["lane-rush", "1", "highway", "extra"]).is_err());
        }

        #[test]
        fn test_parse_defaults() {
            let args = Args::try_parse_from(["lane-rush"]).unwrap();
            assert_eq!(args.seed, None);
            assert_eq!(args.track, None);
        }

        #[test]
        fn test_parse_reset_flag() {
            let args = Args::try_parse_from(["lane-rush", "--reset-best", "3"]).unwrap();
            assert!(args.reset_best);
            assert_eq!(args.seed(), 3);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = <headless::Args as clap::Parser>::parse();
    if let Err(err) = headless::run(args) {
        log::error!("{}", err);
        std::process::exit(2);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
