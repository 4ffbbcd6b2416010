//! Form controls: sliders, numeric fields, preset-direction and
//! shot-type buttons, aspect selection. Each one builds a candidate
//! pose and funnels it through `clamped()`, then re-syncs the readouts
//! so every control agrees with the authoritative pose.

use crate::dom;
use stage_core::constants::{DISTANCE_MAX, DISTANCE_MIN, ELEVATION_MAX, ELEVATION_MIN};
use stage_core::pose::{sanitize_field, ShotType, SphericalPose};
use stage_core::prompt::{compose, AspectRatio};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

const DIRECTION_PRESETS: [(&str, f32); 8] = [
    ("dir-front", 0.0),
    ("dir-front-right", 45.0),
    ("dir-right", 90.0),
    ("dir-back-right", 135.0),
    ("dir-back", 180.0),
    ("dir-back-left", 225.0),
    ("dir-left", 270.0),
    ("dir-front-left", 315.0),
];

/// Push the authoritative pose back into every control and refresh the
/// prompt preview.
pub fn sync_from_pose(document: &web::Document, pose: &SphericalPose, aspect: AspectRatio) {
    let az = format!("{}", pose.azimuth.round() as i32);
    let el = format!("{}", pose.elevation.round() as i32);
    let dist = format!("{:.2}", pose.distance);
    dom::set_input_value(document, "azimuth-slider", &az);
    dom::set_input_value(document, "azimuth-value", &az);
    dom::set_input_value(document, "elevation-slider", &el);
    dom::set_input_value(document, "elevation-value", &el);
    dom::set_input_value(document, "distance-slider", &dist);
    dom::set_input_value(document, "distance-value", &dist);
    for shot in ShotType::ALL {
        if let Some(el) = document.get_element_by_id(&format!("shot-{}", shot.id())) {
            let _ = el.set_attribute(
                "data-active",
                if shot == pose.shot { "1" } else { "0" },
            );
        }
    }
    dom::set_text(document, "prompt-preview", &compose(pose, aspect));
}

fn apply(
    document: &web::Document,
    pose: &Rc<RefCell<SphericalPose>>,
    aspect: &Rc<RefCell<AspectRatio>>,
    candidate: SphericalPose,
) {
    let next = candidate.clamped();
    *pose.borrow_mut() = next;
    sync_from_pose(document, &next, *aspect.borrow());
}

/// Which pose field a slider/numeric pair edits.
#[derive(Clone, Copy)]
enum Field {
    Azimuth,
    Elevation,
    Distance,
}

fn wire_field(
    document: &web::Document,
    element_id: &'static str,
    event: &str,
    field: Field,
    pose: Rc<RefCell<SphericalPose>>,
    aspect: Rc<RefCell<AspectRatio>>,
) {
    let doc = document.clone();
    dom::add_event_listener(document, element_id, event, move || {
        let Some(text) = dom::input_value(&doc, element_id) else {
            return;
        };
        let current = *pose.borrow();
        let candidate = match field {
            // Azimuth wraps rather than clamps; sanitize only guards
            // against garbage text, then clamped() reduces mod 360.
            Field::Azimuth => SphericalPose {
                azimuth: sanitize_field(&text, current.azimuth, -360.0, 720.0),
                ..current
            },
            Field::Elevation => SphericalPose {
                elevation: sanitize_field(&text, current.elevation, ELEVATION_MIN, ELEVATION_MAX),
                ..current
            },
            Field::Distance => SphericalPose {
                distance: sanitize_field(&text, current.distance, DISTANCE_MIN, DISTANCE_MAX),
                ..current
            },
        };
        apply(&doc, &pose, &aspect, candidate);
    });
}

pub fn wire_pose_inputs(
    document: &web::Document,
    pose: Rc<RefCell<SphericalPose>>,
    aspect: Rc<RefCell<AspectRatio>>,
) {
    let fields: [(&'static str, &str, Field); 6] = [
        ("azimuth-slider", "input", Field::Azimuth),
        ("azimuth-value", "change", Field::Azimuth),
        ("elevation-slider", "input", Field::Elevation),
        ("elevation-value", "change", Field::Elevation),
        ("distance-slider", "input", Field::Distance),
        ("distance-value", "change", Field::Distance),
    ];
    for (id, event, field) in fields {
        wire_field(document, id, event, field, pose.clone(), aspect.clone());
    }
}

pub fn wire_direction_presets(
    document: &web::Document,
    pose: Rc<RefCell<SphericalPose>>,
    aspect: Rc<RefCell<AspectRatio>>,
) {
    for (id, azimuth) in DIRECTION_PRESETS {
        let doc = document.clone();
        let pose = pose.clone();
        let aspect = aspect.clone();
        dom::add_click_listener(document, id, move || {
            let current = *pose.borrow();
            apply(&doc, &pose, &aspect, SphericalPose { azimuth, ..current });
        });
    }
}

pub fn wire_shot_buttons(
    document: &web::Document,
    pose: Rc<RefCell<SphericalPose>>,
    aspect: Rc<RefCell<AspectRatio>>,
) {
    for shot in ShotType::ALL {
        let doc = document.clone();
        let pose = pose.clone();
        let aspect = aspect.clone();
        dom::add_click_listener(document, &format!("shot-{}", shot.id()), move || {
            let current = *pose.borrow();
            apply(&doc, &pose, &aspect, current.with_shot(shot));
        });
    }
}

pub fn wire_aspect_select(
    document: &web::Document,
    pose: Rc<RefCell<SphericalPose>>,
    aspect: Rc<RefCell<AspectRatio>>,
) {
    let doc = document.clone();
    dom::add_event_listener(document, "aspect-select", "change", move || {
        let Some(select) = doc
            .get_element_by_id("aspect-select")
            .and_then(|el| el.dyn_into::<web::HtmlSelectElement>().ok())
        else {
            return;
        };
        if let Some(a) = AspectRatio::from_token(&select.value()) {
            *aspect.borrow_mut() = a;
            sync_from_pose(&doc, &pose.borrow(), a);
        }
    });
}

/// Batch size from the count field, kept within a small sane range.
pub fn batch_count(document: &web::Document) -> usize {
    dom::input_value(document, "count-input")
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(1)
        .clamp(1, 4)
}
