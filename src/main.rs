//! Bounce entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use bounce::audio::AudioManager;
    use bounce::input::{InputEvent, Key, TouchZone};
    use bounce::persistence::{LocalStorage, MemoryStorage, Storage};
    use bounce::platform::{self, request_frame};
    use bounce::renderer::CanvasRenderer;
    use bounce::sim::GameEvent;
    use bounce::{BounceError, Game};

    type WebGame = Game<Box<dyn Storage>, AudioManager>;

    /// Game instance plus the page it lives on
    struct App {
        game: WebGame,
        renderer: CanvasRenderer,
        document: Document,
    }

    impl App {
        fn set_class(&self, id: &str, class: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.set_attribute("class", class);
            }
        }

        fn set_text(&self, selector: &str, text: &str) {
            if let Some(el) = self.document.query_selector(selector).ok().flatten() {
                el.set_text_content(Some(text));
            }
        }

        /// Reflect session transitions in the menu and score panels
        fn present(&self, events: &[GameEvent]) {
            for event in events {
                match *event {
                    GameEvent::SessionStarted => self.set_class("menu", "hidden"),
                    GameEvent::SessionEnded {
                        score, high_score, ..
                    } => {
                        self.set_text("#score p", &score.to_string());
                        self.set_text("#highscore p", &high_score.to_string());
                        self.set_class("score", "panel");
                        self.set_class("highscore", "panel");
                        self.set_class("menu", "");
                    }
                    _ => {}
                }
            }
        }

        fn input(&mut self, event: InputEvent) {
            self.game.handle_input(event);
            let events = self.game.take_events();
            self.present(&events);
        }
    }

    pub fn run() -> Result<(), BounceError> {
        log::info!("Bounce starting...");

        let window = web_sys::window().ok_or_else(|| BounceError::MissingElement("window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| BounceError::MissingElement("document".into()))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| BounceError::MissingElement("#canvas".into()))?
            .dyn_into()
            .map_err(|_| BounceError::UnsupportedSurface("#canvas is not a canvas".into()))?;
        let renderer = CanvasRenderer::new(canvas)?;

        let touch = platform::is_touch_device();
        let (vw, vh) = platform::viewport_size();
        let world = platform::world_for(touch, vw, vh);
        renderer.resize(world.width as u32, world.height as u32);
        log::info!("World {}x{} (touch: {})", world.width, world.height, touch);

        let storage: Box<dyn Storage> = match LocalStorage::open() {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                log::warn!("{} - scores will not persist", e);
                Box::new(MemoryStorage::new())
            }
        };

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(world, storage, AudioManager::new(), seed);
        let app = Rc::new(RefCell::new(App {
            game,
            renderer,
            document: document.clone(),
        }));

        setup_keyboard(&document, app.clone());
        setup_touch(&document, app.clone(), touch);
        setup_sound_button(&document, app.clone());
        app.borrow().set_class("menu", "");

        // Start game loop
        request_frame(move |time| game_loop(app, time));

        log::info!("Bounce running!");
        Ok(())
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            let frame = a.game.frame(time);
            a.renderer.draw(&frame);
            let events = a.game.take_events();
            a.present(&events);
        }

        request_frame(move |time| game_loop(app, time));
    }

    fn setup_keyboard(document: &Document, app: Rc<RefCell<App>>) {
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom(&event.key()) {
                    app.borrow_mut().input(InputEvent::KeyDown(key));
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let Some(key) = Key::from_dom(&event.key()) else {
                return;
            };
            let mut a = app.borrow_mut();
            if key == Key::Confirm && !a.game.is_playing() {
                event.prevent_default();
            }
            a.input(InputEvent::KeyUp(key));
        });
        let _ = document.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_touch(document: &Document, app: Rc<RefCell<App>>, touch: bool) {
        let bind = |id: &str, kind: &str, event: InputEvent| {
            let Some(el) = document.get_element_by_id(id) else {
                return;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |e: TouchEvent| {
                e.prevent_default();
                app.borrow_mut().input(event);
            });
            let _ = el.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            closure.forget();
        };

        bind("menu", "touchstart", InputEvent::TouchStart(TouchZone::Generic));
        if touch {
            bind("leftButton", "touchstart", InputEvent::TouchStart(TouchZone::Left));
            bind("leftButton", "touchend", InputEvent::TouchEnd(TouchZone::Left));
            bind("rightButton", "touchstart", InputEvent::TouchStart(TouchZone::Right));
            bind("rightButton", "touchend", InputEvent::TouchEnd(TouchZone::Right));
        }
    }

    fn setup_sound_button(document: &Document, app: Rc<RefCell<App>>) {
        let Some(button) = document.get_element_by_id("soundButton") else {
            return;
        };
        let label = button.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
            event.stop_immediate_propagation();
            let muted = app.borrow_mut().game.toggle_mute();
            label.set_text_content(Some(if muted { "Sound: off" } else { "Sound: on" }));
            log::info!("Muted: {}", muted);
        });
        let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    if let Err(e) = wasm_game::run() {
        log::error!("{}", e);
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(&format!("Bounce cannot run here: {}", e));
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run: one fixed-seed session until the player dies or time runs out
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use bounce::Game;
    use bounce::audio::SilentAudio;
    use bounce::consts::FRAME_MS;
    use bounce::persistence::MemoryStorage;
    use bounce::sim::World;

    env_logger::init();
    log::info!("Bounce (native) starting...");
    log::info!("Native mode is headless - build for wasm32 to play");

    let mut game = Game::new(World::default(), MemoryStorage::new(), SilentAudio, 0xB0_0CE);
    game.start();

    let max_frames = 60 * 60 * 5;
    let mut frames = 0;
    let mut commands = 0;
    while game.is_playing() && frames < max_frames {
        let frame = game.frame(frames as f64 * FRAME_MS);
        commands += frame.len();
        frames += 1;
    }
    game.stop();

    println!(
        "Simulated {} frames ({} draw commands): score {}, best {}",
        frames,
        commands,
        game.score(),
        game.high_score()
    );
}
