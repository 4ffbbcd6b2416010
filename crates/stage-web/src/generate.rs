//! Generation client: the fetch-backed collaborator plus the button,
//! upload and results wiring around the core batch driver.

use crate::controls;
use crate::dom;
use crate::overlay;
use js_sys::{Array, Object, Reflect};
use stage_core::generate::{
    generate_batch, GenerateError, GeneratedImage, ImageGenerator, ReferenceImage, ReferenceImages,
};
use stage_core::pose::SphericalPose;
use stage_core::prompt::{compose, AspectRatio};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

const DEFAULT_ENDPOINT: &str = "/api/generate";

fn js_err(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

/// Collaborator backed by `window.fetch`. Posts the prompt, the aspect
/// token and the encoded reference images as JSON; expects
/// `{ image: { mimeType, data } }` back.
pub struct FetchGenerator {
    endpoint: String,
}

impl Default for FetchGenerator {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
        }
    }
}

impl FetchGenerator {
    fn build_body(
        images: &[ReferenceImage],
        prompt: &str,
        aspect: AspectRatio,
    ) -> Result<String, GenerateError> {
        let body = Object::new();
        let set = |key: &str, value: &JsValue| {
            Reflect::set(&body, &JsValue::from_str(key), value)
                .map_err(|e| GenerateError::Transport(js_err(e)))
                .map(|_| ())
        };
        set("prompt", &JsValue::from_str(prompt))?;
        set("aspectRatio", &JsValue::from_str(aspect.token()))?;
        let list = Array::new();
        for img in images {
            let entry = Object::new();
            Reflect::set(
                &entry,
                &JsValue::from_str("mimeType"),
                &JsValue::from_str(&img.mime_type),
            )
            .map_err(|e| GenerateError::Transport(js_err(e)))?;
            Reflect::set(
                &entry,
                &JsValue::from_str("data"),
                &JsValue::from_str(&img.data),
            )
            .map_err(|e| GenerateError::Transport(js_err(e)))?;
            list.push(&entry);
        }
        set("images", &list)?;
        js_sys::JSON::stringify(&body)
            .map_err(|e| GenerateError::Transport(js_err(e)))?
            .as_string()
            .ok_or_else(|| GenerateError::Transport("could not encode request body".into()))
    }
}

impl ImageGenerator for FetchGenerator {
    async fn generate(
        &self,
        images: &[ReferenceImage],
        prompt: &str,
        aspect: AspectRatio,
    ) -> Result<GeneratedImage, GenerateError> {
        let body = Self::build_body(images, prompt, aspect)?;

        let opts = web::RequestInit::new();
        opts.set_method("POST");
        opts.set_body(&JsValue::from_str(&body));
        let request = web::Request::new_with_str_and_init(&self.endpoint, &opts)
            .map_err(|e| GenerateError::Transport(js_err(e)))?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|e| GenerateError::Transport(js_err(e)))?;

        let window = web::window().ok_or_else(|| GenerateError::Transport("no window".into()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| GenerateError::Transport(js_err(e)))?;
        let resp: web::Response = resp_value
            .dyn_into()
            .map_err(|e| GenerateError::Transport(js_err(e)))?;
        if !resp.ok() {
            return Err(GenerateError::Transport(format!(
                "HTTP {} from image service",
                resp.status()
            )));
        }
        let json = JsFuture::from(
            resp.json()
                .map_err(|e| GenerateError::Transport(js_err(e)))?,
        )
        .await
        .map_err(|e| GenerateError::Transport(js_err(e)))?;

        let image = Reflect::get(&json, &JsValue::from_str("image")).ok();
        let image = match image {
            Some(v) if !v.is_null() && !v.is_undefined() => v,
            _ => {
                // Prefer the service's own message when it sent one.
                let msg = Reflect::get(&json, &JsValue::from_str("error"))
                    .ok()
                    .and_then(|v| v.as_string())
                    .unwrap_or_else(|| "image service returned no image".into());
                return Err(GenerateError::Service(msg));
            }
        };
        let mime_type = Reflect::get(&image, &JsValue::from_str("mimeType"))
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_else(|| "image/png".into());
        let data = Reflect::get(&image, &JsValue::from_str("data"))
            .ok()
            .and_then(|v| v.as_string())
            .ok_or_else(|| GenerateError::Service("image service returned no image".into()))?;
        Ok(GeneratedImage { mime_type, data })
    }
}

/// Split a `data:<mime>;base64,<payload>` URL from FileReader.
fn reference_from_data_url(url: &str) -> Option<ReferenceImage> {
    let rest = url.strip_prefix("data:")?;
    let (mime_type, data) = rest.split_once(";base64,")?;
    Some(ReferenceImage {
        mime_type: mime_type.to_owned(),
        data: data.to_owned(),
    })
}

/// Wire the file input: each chosen file is read as a data URL, staged
/// as a reference image and shown as a thumbnail.
pub fn wire_upload(document: &web::Document, images: Rc<RefCell<ReferenceImages>>) {
    let doc = document.clone();
    dom::add_event_listener(document, "image-input", "change", move || {
        let Some(input) = doc
            .get_element_by_id("image-input")
            .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(files) = input.files() else {
            return;
        };
        for i in 0..files.length() {
            let Some(file) = files.get(i) else { continue };
            let reader = match web::FileReader::new() {
                Ok(r) => r,
                Err(e) => {
                    log::error!("FileReader error: {:?}", e);
                    continue;
                }
            };
            let reader_cb = reader.clone();
            let images = images.clone();
            let doc = doc.clone();
            let onload = Closure::wrap(Box::new(move |_ev: web::ProgressEvent| {
                let Ok(result) = reader_cb.result() else {
                    return;
                };
                let Some(url) = result.as_string() else {
                    return;
                };
                let Some(reference) = reference_from_data_url(&url) else {
                    log::warn!("[upload] skipped non-base64 file payload");
                    return;
                };
                images.borrow_mut().push(reference);
                append_image(&doc, "thumbs", &url, "reference thumbnail");
            }) as Box<dyn FnMut(_)>);
            reader.set_onload(Some(onload.as_ref().unchecked_ref()));
            onload.forget();
            if let Err(e) = reader.read_as_data_url(&file) {
                log::error!("read_as_data_url error: {:?}", e);
            }
        }
        // Allow re-selecting the same file later.
        input.set_value("");
    });
}

fn append_image(document: &web::Document, container_id: &str, src: &str, alt: &str) {
    let Some(container) = document.get_element_by_id(container_id) else {
        return;
    };
    if let Ok(el) = document.create_element("img") {
        if let Ok(img) = el.dyn_into::<web::HtmlImageElement>() {
            img.set_src(src);
            img.set_alt(alt);
            let _ = container.append_child(&img);
        }
    }
}

fn clear_children(document: &web::Document, container_id: &str) {
    if let Some(container) = document.get_element_by_id(container_id) {
        container.set_inner_html("");
    }
}

pub struct GenerateWiring {
    pub pose: Rc<RefCell<SphericalPose>>,
    pub aspect: Rc<RefCell<AspectRatio>>,
    pub images: Rc<RefCell<ReferenceImages>>,
    pub generating: Rc<RefCell<bool>>,
}

/// Wire the generate button: serial batch, all-or-nothing results,
/// mutual exclusion via the `generating` flag.
pub fn wire_generate(document: &web::Document, w: GenerateWiring) {
    let doc = document.clone();
    dom::add_click_listener(document, "generate-btn", move || {
        if *w.generating.borrow() {
            return;
        }
        let staged: Vec<_> = w.images.borrow().iter().cloned().collect();
        if staged.is_empty() {
            // InputError: reject locally, no service call, pose untouched.
            overlay::show_error(&doc, &GenerateError::NoReferenceImages.to_string());
            return;
        }
        let count = controls::batch_count(&doc);
        let prompt = compose(&w.pose.borrow(), *w.aspect.borrow());
        let aspect = *w.aspect.borrow();

        *w.generating.borrow_mut() = true;
        dom::set_disabled(&doc, "generate-btn", true);
        overlay::show_status(
            &doc,
            &format!("Generating {count} image{}...", if count == 1 { "" } else { "s" }),
        );

        let doc = doc.clone();
        let generating = w.generating.clone();
        spawn_local(async move {
            let generator = FetchGenerator::default();
            match generate_batch(&generator, &staged, &prompt, aspect, count).await {
                Ok(results) => {
                    clear_children(&doc, "results");
                    for img in &results {
                        append_image(&doc, "results", &img.to_data_url(), "generated image");
                    }
                    overlay::hide(&doc);
                }
                Err(e) => {
                    // All-or-nothing: earlier results from this batch
                    // are never shown.
                    overlay::show_error(&doc, &e.to_string());
                }
            }
            *generating.borrow_mut() = false;
            dom::set_disabled(&doc, "generate-btn", false);
        });
    });
}
