mod canvas;
mod config;
mod entities;
mod error;
mod game;
mod geom;
mod graphics;
mod input;
mod logging;

use std::{cell::RefCell, rc::Rc, sync::mpsc};

use wasm_bindgen::{prelude::*, JsCast};

pub use crate::config::GameConfig;
pub use crate::error::GameError;
pub use crate::game::{Game, Status};
pub use crate::graphics::{Color, Draw, PixelBuffer};
pub use crate::input::{Key, KeyState};

use crate::canvas::Canvas;
use crate::graphics::TimeStamp;

const CANVAS_ID: &str = "game";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or(GameError::MissingWindow)?;
    let document = window.document().ok_or(GameError::MissingDocument)?;
    let element = Canvas::find(&document, CANVAS_ID)?;
    let config = GameConfig::from_element(&element)?;
    logging::init(config.log_level);

    let (key_sender, key_receiver) = mpsc::sync_channel(100);
    let key_event_closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
        // keep the space bar and arrows from scrolling the page
        if Key::from_dom(&event.key()).is_some() {
            event.prevent_default();
        }
        // try_send so filling the buffer with backlogged keystrokes never blocks this closure
        if let Err(ref err @ (mpsc::TrySendError::Full(ref evt) | mpsc::TrySendError::Disconnected(ref evt))) =
            key_sender.try_send(event)
        {
            log::warn!("failed to send key event, {}: {}", err, evt.key());
        }
    });
    window.add_event_listener_with_callback("keydown", key_event_closure.as_ref().unchecked_ref())?;
    window.add_event_listener_with_callback("keyup", key_event_closure.as_ref().unchecked_ref())?;
    // Must std::mem::forget() the closure so JavaScript holds onto the memory for the lifetime of
    // the program
    key_event_closure.forget();

    let canvas = Canvas::new(element, &config)?;
    let mut pixels = canvas.pixel_buffer();

    let seed = config
        .seed
        .unwrap_or_else(|| (js_sys::Math::random() * u64::MAX as f64) as u64);
    log::info!(
        "starting a {}x{} game with seed {}",
        config.width,
        config.height,
        seed
    );
    let mut game = Game::new(config, seed);
    let mut keys = KeyState::default();
    let mut last_ts = window
        .performance()
        .map(|performance| performance.now())
        .unwrap_or_default();

    // The closure will need to be held onto and re-submitted for `request_animation_frame`
    // callbacks from within the body of the closure, so we need a reference-counted pointer that
    // we can hold within the closure and also a handle to it from the outside to kick off the loop
    let animation_closure: Rc<RefCell<Option<Closure<dyn FnMut(TimeStamp)>>>> =
        Rc::new(RefCell::new(None));
    let animation_closure_initial = animation_closure.clone();

    let closure_inner: Closure<dyn FnMut(TimeStamp)> = Closure::new(move |ts: TimeStamp| {
        loop {
            match key_receiver.try_recv() {
                Ok(evt) => {
                    let pressed = evt.type_() == "keydown";
                    log::trace!("key event: {} {}", evt.type_(), evt.key());
                    if let Some(key) = Key::from_dom(&evt.key()) {
                        keys.apply(key, pressed);
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(err) => {
                    log::error!("failed to receive key event, {}", err);
                    break;
                }
            }
        }

        let ts_offset = ts - last_ts;
        last_ts = ts;
        game.advance(graphics::to_seconds(ts_offset), &keys);
        game.draw(&mut pixels);
        if let Err(err) = canvas.present(&pixels) {
            log::error!("failed to present frame: {}", err);
        }

        if let Some(closure) = animation_closure.borrow().as_ref() {
            if let Err(err) = request_animation_frame(closure) {
                log::error!("{}", err);
            }
        }
    });
    *animation_closure_initial.borrow_mut() = Some(closure_inner);

    if let Some(closure) = animation_closure_initial.borrow().as_ref() {
        request_animation_frame(closure)?;
    }
    Ok(())
}

fn request_animation_frame(f: &Closure<dyn FnMut(TimeStamp)>) -> Result<i32, GameError> {
    let window = web_sys::window().ok_or(GameError::MissingWindow)?;
    Ok(window.request_animation_frame(f.as_ref().unchecked_ref())?)
}
