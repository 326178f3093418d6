// Copyright 2026 the Pointer Trail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM marker elements.
//!
//! [`DomSurface`] renders each [`Marker`] as an `<img>` appended to a
//! container element and removes it by element reference.

use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{Document, HtmlElement, HtmlImageElement};

use trail_core::marker::Marker;
use trail_core::surface::Surface;

/// Appends marker `<img>` elements to a container.
///
/// Only `src`, `class`, `left` and `top` are set; size, positioning scheme,
/// opacity and stacking come from the page's stylesheet for the marker class.
pub struct DomSurface {
    document: Document,
    container: HtmlElement,
}

impl core::fmt::Debug for DomSurface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomSurface")
            .field("document", &"Document")
            .field("container", &"HtmlElement")
            .finish()
    }
}

impl DomSurface {
    /// Creates a surface that appends to `container`.
    ///
    /// # Errors
    ///
    /// Fails if `container` is not attached to a document.
    pub fn new(container: HtmlElement) -> Result<Self, JsValue> {
        let document = container
            .owner_document()
            .ok_or_else(|| JsValue::from_str("container has no owner document"))?;
        Ok(Self {
            document,
            container,
        })
    }

    /// Creates a surface that appends to `document.body`.
    ///
    /// # Errors
    ///
    /// Fails if the document has no body yet.
    pub fn for_body(document: &Document) -> Result<Self, JsValue> {
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        Ok(Self {
            document: document.clone(),
            container: body,
        })
    }
}

impl Surface for DomSurface {
    type Node = HtmlImageElement;
    type Error = JsValue;

    fn insert(&mut self, marker: &Marker) -> Result<HtmlImageElement, JsValue> {
        let img: HtmlImageElement = self.document.create_element("img")?.unchecked_into();
        // A missing asset is left to the browser's broken-image rendering.
        img.set_src(marker.source);
        img.set_class_name(marker.class);

        let style = img.style();
        style.set_property("left", &marker.left)?;
        style.set_property("top", &marker.top)?;

        self.container.append_child(&img)?;
        Ok(img)
    }

    fn remove(&mut self, node: &HtmlImageElement) {
        node.remove();
    }
}
