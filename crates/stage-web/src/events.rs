//! Pointer and keyboard wiring. The pointer handlers build a world ray
//! from the rig camera and hand it to the core drag controller; every
//! resulting pose goes back through `clamped()` inside the core.

use crate::controls;
use crate::input;
use crate::render;
use stage_core::constants::{NUDGE_DEGREES, NUDGE_DISTANCE};
use stage_core::drag::{pick, DragController, DragMode, PickTarget, Ray};
use stage_core::pose::{ShotType, SphericalPose};
use stage_core::prompt::AspectRatio;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct PointerWiring {
    pub canvas: web::HtmlCanvasElement,
    pub pose: Rc<RefCell<SphericalPose>>,
    pub drag: Rc<RefCell<DragController>>,
    pub hover: Rc<RefCell<Option<PickTarget>>>,
    pub aspect: Rc<RefCell<AspectRatio>>,
}

fn pointer_ray(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Ray {
    let pos = input::pointer_canvas_px(ev, canvas);
    let (ro, rd) = render::screen_to_world_ray(canvas, pos.x, pos.y);
    Ray::new(ro, rd)
}

pub fn wire_pointer_handlers(w: PointerWiring) {
    // pointerdown
    {
        let canvas = w.canvas.clone();
        let pose = w.pose.clone();
        let drag = w.drag.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let ray = pointer_ray(&ev, &canvas);
            let mode = drag.borrow_mut().pointer_down(&pose.borrow(), ray);
            if mode != DragMode::Idle {
                let _ = canvas.set_pointer_capture(ev.pointer_id());
                log::info!("[pointer] begin {:?}", mode);
            }
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        let _ = w
            .canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointermove
    {
        let canvas = w.canvas.clone();
        let pose = w.pose.clone();
        let drag = w.drag.clone();
        let hover = w.hover.clone();
        let aspect = w.aspect.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let ray = pointer_ray(&ev, &canvas);
            if drag.borrow().mode() == DragMode::Idle {
                *hover.borrow_mut() = pick(&pose.borrow(), ray);
                return;
            }
            let updated = {
                let d = drag.borrow();
                let p = *pose.borrow();
                d.pointer_move(&p, ray)
            };
            // A miss (ray off the orbit sphere, degenerate projection)
            // leaves the previous valid pose in place.
            if let Some(next) = updated {
                *pose.borrow_mut() = next;
                if let Some(doc) = crate::dom::window_document() {
                    controls::sync_from_pose(&doc, &next, *aspect.borrow());
                }
            }
        }) as Box<dyn FnMut(_)>);
        if let Some(wnd) = web::window() {
            let _ = wnd
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    // pointerup ends any drag, wherever the pointer is.
    {
        let drag = w.drag.clone();
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
                drag.borrow_mut().pointer_up();
            }) as Box<dyn FnMut(_)>);
        if let Some(wnd) = web::window() {
            let _ =
                wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    // Leaving the surface also releases the drag.
    {
        let drag = w.drag.clone();
        let hover = w.hover.clone();
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
                drag.borrow_mut().pointer_up();
                *hover.borrow_mut() = None;
            }) as Box<dyn FnMut(_)>);
        let _ = w
            .canvas
            .add_event_listener_with_callback("pointerleave", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    pose: &Rc<RefCell<SphericalPose>>,
    aspect: &Rc<RefCell<AspectRatio>>,
) {
    let key = ev.key();
    let current = *pose.borrow();
    let next = match key.as_str() {
        "ArrowLeft" => Some(SphericalPose {
            azimuth: current.azimuth - NUDGE_DEGREES,
            ..current
        }),
        "ArrowRight" => Some(SphericalPose {
            azimuth: current.azimuth + NUDGE_DEGREES,
            ..current
        }),
        "ArrowUp" => Some(SphericalPose {
            elevation: current.elevation + NUDGE_DEGREES,
            ..current
        }),
        "ArrowDown" => Some(SphericalPose {
            elevation: current.elevation - NUDGE_DEGREES,
            ..current
        }),
        "+" | "=" => Some(SphericalPose {
            distance: current.distance - NUDGE_DISTANCE,
            ..current
        }),
        "-" | "_" => Some(SphericalPose {
            distance: current.distance + NUDGE_DISTANCE,
            ..current
        }),
        "1" => Some(current.with_shot(ShotType::Long)),
        "2" => Some(current.with_shot(ShotType::Medium)),
        "3" => Some(current.with_shot(ShotType::Close)),
        "4" => Some(current.with_shot(ShotType::Extreme)),
        _ => None,
    };
    if let Some(next) = next {
        let next = next.clamped();
        *pose.borrow_mut() = next;
        if let Some(doc) = crate::dom::window_document() {
            controls::sync_from_pose(&doc, &next, *aspect.borrow());
        }
        if key.starts_with("Arrow") {
            ev.prevent_default();
        }
    }
}

pub fn wire_global_keydown(pose: Rc<RefCell<SphericalPose>>, aspect: Rc<RefCell<AspectRatio>>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &pose, &aspect);
            }) as Box<dyn FnMut(_)>);
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
