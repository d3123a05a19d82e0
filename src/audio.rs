//! Alert sound playback.
//!
//! One `<audio>` element is owned by [`AlertPlayer`]. Each alert plays it
//! [`ALERT_REPEAT_COUNT`] times back to back; the next play waits for the
//! `ended` event of the previous one. Which rounds may still start is decided
//! by [`Sequencer`], which knows nothing about the element. The sequence
//! itself runs as an abortable task so [`AlertPlayer::stop`] can drop the
//! pending repeat at once.

use exam_timer::alerts::ALERT_REPEAT_COUNT;
use futures::channel::oneshot;
use futures::future::{AbortHandle, Abortable};
use log::{debug, warn};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

/// Round bookkeeping for alert sequences.
///
/// Every sequence gets a token from [`Sequencer::begin`]; a newer `begin` or a
/// `stop` invalidates older tokens. A round can only start once the previous
/// round of the same sequence has ended.
#[derive(Debug, Default)]
struct Sequencer {
    generation: u64,
    active: Option<u64>,
    rounds_started: u32,
    playing: bool,
}

impl Sequencer {
    fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.active = Some(self.generation);
        self.rounds_started = 0;
        self.playing = false;
        self.generation
    }

    /// Claim the next round for `token`, returning its 1-based number.
    fn next_round(&mut self, token: u64) -> Option<u32> {
        if self.active != Some(token) || self.playing || self.rounds_started >= ALERT_REPEAT_COUNT {
            return None;
        }
        self.playing = true;
        self.rounds_started += 1;
        Some(self.rounds_started)
    }

    fn round_ended(&mut self, token: u64) {
        if self.active != Some(token) {
            return;
        }
        self.playing = false;
        if self.rounds_started >= ALERT_REPEAT_COUNT {
            self.active = None;
        }
    }

    /// Give up on `token` only; a newer sequence is left alone.
    fn abandon(&mut self, token: u64) {
        if self.active == Some(token) {
            self.stop();
        }
    }

    fn stop(&mut self) {
        self.active = None;
        self.playing = false;
    }
}

pub struct AlertPlayer {
    url: &'static str,
    audio: Option<HtmlAudioElement>,
    sequencer: Rc<RefCell<Sequencer>>,
    task: Option<AbortHandle>,
}

impl AlertPlayer {
    pub fn new(url: &'static str) -> Self {
        Self {
            url,
            audio: None,
            sequencer: Rc::new(RefCell::new(Sequencer::default())),
            task: None,
        }
    }

    /// Lazily create the audio element; failures are logged and retried on the next alert.
    fn element(&mut self) -> Option<HtmlAudioElement> {
        if self.audio.is_none() {
            match HtmlAudioElement::new_with_src(self.url) {
                Ok(audio) => self.audio = Some(audio),
                Err(e) => warn!("Could not create alert audio element: {:?}", e),
            }
        }
        self.audio.clone()
    }

    /// Start a new sequence, stopping any sequence still in flight.
    pub fn play_sequence(&mut self) {
        self.stop();
        let Some(audio) = self.element() else {
            return;
        };

        let token = self.sequencer.borrow_mut().begin();
        let (handle, registration) = AbortHandle::new_pair();
        self.task = Some(handle);
        let sequence = Abortable::new(
            play_rounds(audio, self.sequencer.clone(), token),
            registration,
        );
        wasm_bindgen_futures::spawn_local(async move {
            if sequence.await.is_err() {
                debug!("Alert sequence aborted");
            }
        });
    }

    /// Stop playback immediately and discard any pending repeat.
    pub fn stop(&mut self) {
        self.sequencer.borrow_mut().stop();
        if let Some(handle) = self.task.take() {
            handle.abort();
        }
        if let Some(audio) = &self.audio {
            audio.set_onended(None);
            if let Err(e) = audio.pause() {
                warn!("Could not pause alert audio: {:?}", e);
            }
            audio.set_current_time(0.0);
        }
    }
}

impl Drop for AlertPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn play_rounds(audio: HtmlAudioElement, sequencer: Rc<RefCell<Sequencer>>, token: u64) {
    loop {
        let Some(round) = sequencer.borrow_mut().next_round(token) else {
            return;
        };
        audio.set_current_time(0.0);
        let ended = ended_signal(&audio);
        let started = match audio.play() {
            Ok(promise) => JsFuture::from(promise).await,
            Err(e) => Err(e),
        };
        if let Err(e) = started {
            // Typically the autoplay policy blocking playback before any user gesture.
            warn!("Alert sound playback failed: {:?}", e);
            audio.set_onended(None);
            sequencer.borrow_mut().abandon(token);
            return;
        }
        debug!("Alert sound {}/{}", round, ALERT_REPEAT_COUNT);
        ended.await;
        sequencer.borrow_mut().round_ended(token);
    }
}

/// Resolves once the element fires `ended`.
///
/// The callback lives inside the returned future, so an aborted sequence
/// releases it together with the task.
fn ended_signal(audio: &HtmlAudioElement) -> impl std::future::Future<Output = ()> {
    let (tx, rx) = oneshot::channel::<()>();
    let mut tx = Some(tx);
    let on_ended = Closure::<dyn FnMut()>::new(move || {
        if let Some(tx) = tx.take() {
            let _ = tx.send(());
        }
    });
    audio.set_onended(Some(on_ended.as_ref().unchecked_ref()));

    let audio = audio.clone();
    async move {
        let _ = rx.await;
        audio.set_onended(None);
        drop(on_ended);
    }
}
