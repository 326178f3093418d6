// Copyright 2026 the Pointer Trail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web example: a Kenya-flag pointer trail driven by `trail_backend_web`.
//!
//! Every `mousemove` over the page appends a flag `<img>` at the pointer and
//! removes it 100 ms later. The page's stylesheet (see `index.html`) gives the
//! `trail` class its absolute positioning and size.
//!
//! Build with: `wasm-pack build --target web demos/web_trail`
//!
//! Then serve `demos/web_trail/` (with the flag image at `../assets/kenya-flag.png`
//! relative to the page) and open `index.html` in a browser.

// This crate only runs in the browser; suppress dead-code warnings when
// cargo-checking on a native host target.
#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

use wasm_bindgen::prelude::*;

use trail_backend_web::WebTrail;
use trail_core::config::TrailConfig;

/// Entry point, called automatically by `wasm_bindgen(start)`.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let trail = WebTrail::new(&document, TrailConfig::web())?;
    trail.start()?;

    // The trail lives for the lifetime of the page.
    core::mem::forget(trail);

    Ok(())
}
