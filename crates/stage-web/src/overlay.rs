//! Status banner above the canvas: batch progress and user-visible
//! error messages.

use web_sys as web;

const BANNER_ID: &str = "status-banner";

#[inline]
pub fn show_status(document: &web::Document, message: &str) {
    if let Some(el) = document.get_element_by_id(BANNER_ID) {
        el.set_text_content(Some(message));
        let _ = el.set_attribute("data-kind", "status");
        let _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn show_error(document: &web::Document, message: &str) {
    if let Some(el) = document.get_element_by_id(BANNER_ID) {
        el.set_text_content(Some(message));
        let _ = el.set_attribute("data-kind", "error");
        let _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(BANNER_ID) {
        let _ = el.set_attribute("style", "display:none");
    }
}
