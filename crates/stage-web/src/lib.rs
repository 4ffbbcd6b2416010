#![cfg(target_arch = "wasm32")]
//! Web front-end for shotstage. Owns the canvas, the rig camera and
//! every event stream; all pose logic lives in `stage-core`.

mod controls;
mod dom;
mod events;
mod frame;
mod generate;
mod input;
mod overlay;
mod render;

use instant::Instant;
use stage_core::drag::{DragController, PickTarget};
use stage_core::generate::ReferenceImages;
use stage_core::pose::SphericalPose;
use stage_core::prompt::AspectRatio;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("stage-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document =
        dom::window_document().ok_or_else(|| anyhow::anyhow!("no window/document"))?;

    let canvas_el = document
        .get_element_by_id("stage-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #stage-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Keep the canvas backing size in step with CSS size * dpr.
    dom::sync_canvas_backing_size(&canvas);
    {
        let canvas_resize = canvas.clone();
        let resize_closure = Closure::wrap(Box::new(move || {
            dom::sync_canvas_backing_size(&canvas_resize);
        }) as Box<dyn FnMut()>);
        if let Some(window) = web::window() {
            let _ = window
                .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
        }
        resize_closure.forget();
    }

    // Session state. One writer at a time on the UI thread, so plain
    // Rc<RefCell> is enough.
    let pose = Rc::new(RefCell::new(SphericalPose::default()));
    let drag = Rc::new(RefCell::new(DragController::default()));
    let hover: Rc<RefCell<Option<PickTarget>>> = Rc::new(RefCell::new(None));
    let aspect = Rc::new(RefCell::new(AspectRatio::default()));
    let images: Rc<RefCell<ReferenceImages>> = Rc::new(RefCell::new(ReferenceImages::new()));
    let generating = Rc::new(RefCell::new(false));

    events::wire_pointer_handlers(events::PointerWiring {
        canvas: canvas.clone(),
        pose: pose.clone(),
        drag: drag.clone(),
        hover: hover.clone(),
        aspect: aspect.clone(),
    });
    events::wire_global_keydown(pose.clone(), aspect.clone());
    controls::wire_pose_inputs(&document, pose.clone(), aspect.clone());
    controls::wire_direction_presets(&document, pose.clone(), aspect.clone());
    controls::wire_shot_buttons(&document, pose.clone(), aspect.clone());
    controls::wire_aspect_select(&document, pose.clone(), aspect.clone());
    generate::wire_upload(&document, images.clone());
    generate::wire_generate(
        &document,
        generate::GenerateWiring {
            pose: pose.clone(),
            aspect: aspect.clone(),
            images,
            generating,
        },
    );
    controls::sync_from_pose(&document, &pose.borrow(), *aspect.borrow());
    overlay::hide(&document);

    let gpu = frame::init_gpu(&canvas).await;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        pose,
        hover,
        canvas,
        gpu,
        started: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    log::info!("stage-web ready");
    Ok(())
}
