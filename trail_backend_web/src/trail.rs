// Copyright 2026 the Pointer Trail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `mousemove`-driven trail.
//!
//! [`WebTrail`] binds a [`TrailEmitter`] over a [`DomSurface`] to the
//! document's `mousemove` events. Every event inserts one marker and arms one
//! `setTimeout` whose callback removes exactly that marker via
//! [`TrailEmitter::fire`].
//!
//! The listener is registered by [`start`](WebTrail::start) and unregistered
//! by [`stop`](WebTrail::stop) or on drop. Timers already armed keep the shared
//! state alive until they have run, so markers inserted before a stop (or
//! before the `WebTrail` was dropped) are still removed.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, MouseEvent};

use trail_core::config::TrailConfig;
use trail_core::emitter::{TrailEmitter, TrailStats};
use trail_core::marker::MarkerId;
use trail_core::surface::Surface;
use trail_core::time::Duration;
use trail_core::trace::{TraceSink, Tracer};

use crate::dom::DomSurface;
use crate::{event, timer};

const POINTER_EVENT: &str = "mousemove";

type MoveClosure = Closure<dyn FnMut(MouseEvent)>;

/// A pointer trail attached to a document.
///
/// Create with [`WebTrail::new`], then call [`start`](Self::start) to begin
/// receiving pointer moves. The listener stays registered until
/// [`stop`](Self::stop) is called or the `WebTrail` is dropped.
pub struct WebTrail {
    inner: Rc<WebInner>,
}

struct WebInner {
    document: Document,

    /// The JS closure registered as the `mousemove` listener.
    ///
    /// Created on first start and reused across stop/start so the same
    /// function reference can be unregistered.
    listener: RefCell<Option<MoveClosure>>,

    /// Emitter and trace sink, borrowed by the listener and every timer.
    state: RefCell<TrailState<DomSurface>>,

    /// Whether the listener is currently registered.
    running: Cell<bool>,
}

struct TrailState<S: Surface> {
    emitter: TrailEmitter<S>,
    sink: Option<Box<dyn TraceSink>>,
}

impl<S: Surface> TrailState<S> {
    fn split(&mut self) -> (&mut TrailEmitter<S>, Tracer<'_>) {
        let tracer = match &mut self.sink {
            Some(sink) => Tracer::new(&mut **sink),
            None => Tracer::none(),
        };
        (&mut self.emitter, tracer)
    }
}

impl WebTrail {
    /// Creates a trail over `document.body` that is **not yet running**.
    ///
    /// # Errors
    ///
    /// Fails if the document has no body.
    pub fn new(document: &Document, config: TrailConfig) -> Result<Self, JsValue> {
        let surface = DomSurface::for_body(document)?;
        Ok(Self::with_surface(document, surface, config))
    }

    /// Creates a trail that inserts markers into `surface` but listens on
    /// `document`.
    #[must_use]
    pub fn with_surface(document: &Document, surface: DomSurface, config: TrailConfig) -> Self {
        Self {
            inner: Rc::new(WebInner {
                document: document.clone(),
                listener: RefCell::new(None),
                state: RefCell::new(TrailState {
                    emitter: TrailEmitter::new(surface, config),
                    sink: None,
                }),
                running: Cell::new(false),
            }),
        }
    }

    /// Routes lifecycle events to `sink`.
    ///
    /// Events are only dispatched when the `trace` feature is enabled;
    /// otherwise the sink is kept but never called.
    #[must_use]
    pub fn with_sink(self, sink: impl TraceSink + 'static) -> Self {
        self.inner.state.borrow_mut().sink = Some(Box::new(sink));
        self
    }

    /// Registers the `mousemove` listener.
    ///
    /// If already running, this is a no-op.
    ///
    /// # Errors
    ///
    /// Propagates a failure to register the listener.
    pub fn start(&self) -> Result<(), JsValue> {
        if self.inner.running.get() {
            return Ok(());
        }

        let mut listener = self.inner.listener.borrow_mut();
        let closure = listener.get_or_insert_with(|| {
            let weak = Rc::downgrade(&self.inner);
            Closure::wrap(Box::new(move |event: MouseEvent| {
                if let Some(inner) = weak.upgrade() {
                    on_pointer_move(&inner, &event);
                }
            }) as Box<dyn FnMut(MouseEvent)>)
        });
        self.inner
            .document
            .add_event_listener_with_callback(POINTER_EVENT, closure.as_ref().unchecked_ref())?;

        self.inner.running.set(true);
        let mut state = self.inner.state.borrow_mut();
        let (emitter, mut tracer) = state.split();
        emitter.subscribe(crate::now(), &mut tracer);
        Ok(())
    }

    /// Unregisters the `mousemove` listener.
    ///
    /// Markers already on the page are still removed when their timers fire.
    /// Can be restarted by calling [`start`](Self::start) again.
    ///
    /// # Errors
    ///
    /// Propagates a failure to unregister the listener.
    pub fn stop(&self) -> Result<(), JsValue> {
        if !self.inner.running.get() {
            return Ok(());
        }

        if let Some(closure) = &*self.inner.listener.borrow() {
            self.inner.document.remove_event_listener_with_callback(
                POINTER_EVENT,
                closure.as_ref().unchecked_ref(),
            )?;
        }

        self.inner.running.set(false);
        let mut state = self.inner.state.borrow_mut();
        let (emitter, mut tracer) = state.split();
        emitter.unsubscribe(crate::now(), &mut tracer);
        Ok(())
    }

    /// Returns `true` while the listener is registered.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }

    /// Number of markers currently on the page.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.inner.state.borrow().emitter.live_count()
    }

    /// Lifetime counters of the underlying emitter.
    #[must_use]
    pub fn stats(&self) -> TrailStats {
        self.inner.state.borrow().emitter.stats()
    }
}

/// Handles one `mousemove`: insert a marker, then arm its removal.
fn on_pointer_move(inner: &Rc<WebInner>, event: &MouseEvent) {
    let now = crate::now();
    let pointer = event::pointer_move(event);

    let (marker, lifetime) = {
        let mut state = inner.state.borrow_mut();
        let (emitter, mut tracer) = state.split();
        // Host dispatch is fire-and-forget; insert failures go to the trace sink.
        let Ok(Some(marker)) = emitter.notify(&pointer, now, &mut tracer) else {
            return;
        };
        (marker, emitter.config().lifetime)
    };

    arm_removal(inner, marker, lifetime);
}

/// Arms the one-shot timer that removes `marker`.
fn arm_removal(inner: &Rc<WebInner>, marker: MarkerId, lifetime: Duration) {
    // The timer holds a strong reference so the removal runs even if the
    // `WebTrail` is dropped first.
    let inner = Rc::clone(inner);
    let callback = Closure::once_into_js(move || {
        let mut state = inner.state.borrow_mut();
        let (emitter, mut tracer) = state.split();
        emitter.fire(marker, crate::now(), &mut tracer);
    });
    timer::set_timeout(&callback, lifetime);
}

impl Drop for WebTrail {
    fn drop(&mut self) {
        let _ = self.stop();
        // Drop the JS closure so it doesn't leak.
        self.inner.listener.borrow_mut().take();
    }
}

impl core::fmt::Debug for WebTrail {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("WebTrail")
            .field("running", &self.inner.running.get())
            .field("live", &state.emitter.live_count())
            .field("stats", &state.emitter.stats())
            .finish_non_exhaustive()
    }
}
