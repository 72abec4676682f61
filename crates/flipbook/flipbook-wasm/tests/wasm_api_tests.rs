#![cfg(target_arch = "wasm32")]
use flipbook_wasm::{abi_version, Flipbook};
use js_sys::{Array, Reflect};
use serde_json::json;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn get(obj: &JsValue, key: &str) -> JsValue {
    Reflect::get(obj, &JsValue::from_str(key)).expect("property")
}

fn js(value: serde_json::Value) -> JsValue {
    JsValue::from_str(&value.to_string())
}

fn command(value: serde_json::Value) -> JsValue {
    js_sys::JSON::parse(&value.to_string()).expect("command object")
}

fn abc() -> JsValue {
    js(json!({
        "name": "abc",
        "fps": 10,
        "frames": [
            { "image": "a", "action": "enter" },
            { "image": "b", "action": "action", "data": { "type": "integer", "value": 3 } },
            { "image": "c", "action": "leave" }
        ]
    }))
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn load_play_and_tick_to_idle() {
    let mut fb = Flipbook::new();
    assert_eq!(fb.load_sequence(abc()).unwrap(), "abc");
    let p = fb
        .create_player(JsValue::UNDEFINED, Some("idle".into()))
        .unwrap();
    assert!(fb
        .apply(p, command(json!({ "type": "play", "sequence": "abc" })), None)
        .unwrap());

    let mut outcomes = Vec::new();
    let mut images = Vec::new();
    let mut event_count = 0;
    for t in [0.0, 0.1, 0.2, 0.3] {
        let report = fb.tick(p, t).unwrap();
        outcomes.push(get(&report, "outcome").as_string());
        images.push(get(&report, "image").as_string());
        event_count += Array::from(&get(&report, "events")).length();
    }
    assert_eq!(
        outcomes,
        vec![
            Some("played".to_string()),
            Some("played".to_string()),
            Some("played".to_string()),
            Some("not_playing".to_string())
        ]
    );
    assert_eq!(
        images,
        vec![
            Some("a".to_string()),
            Some("b".to_string()),
            Some("c".to_string()),
            Some("idle".to_string())
        ]
    );
    assert_eq!(event_count, 3);

    let idle_report = fb.tick(p, 0.4).unwrap();
    assert!(get(&idle_report, "outcome").is_null());
}

#[wasm_bindgen_test]
fn unknown_sequence_returns_false() {
    let mut fb = Flipbook::new();
    let p = fb.create_player(JsValue::NULL, None).unwrap();
    assert!(!fb
        .apply(p, command(json!({ "type": "queue", "sequence": "nope" })), None)
        .unwrap());
    assert_eq!(fb.image(p).unwrap(), None);
}

#[wasm_bindgen_test]
fn invalid_input_is_an_error() {
    let mut fb = Flipbook::new();
    assert!(fb.load_sequence(JsValue::NULL).is_err());
    assert!(fb.load_sequence(js(json!({ "name": "x", "fps": 0 }))).is_err());
    assert!(fb.tick(42, 0.0).is_err());
    assert!(fb
        .create_player(command(json!({ "speed": -1.0 })), None)
        .is_err());
}

#[wasm_bindgen_test]
fn player_ids_are_reused_after_removal() {
    let mut fb = Flipbook::new();
    let a = fb.create_player(JsValue::UNDEFINED, None).unwrap();
    let b = fb.create_player(JsValue::UNDEFINED, None).unwrap();
    assert_ne!(a, b);
    assert!(fb.remove_player(a));
    assert!(!fb.remove_player(a));
    assert_eq!(fb.create_player(JsValue::UNDEFINED, None).unwrap(), a);
}

#[wasm_bindgen_test]
fn library_fixture_loads() {
    let raw = include_str!("../../../../fixtures/sequences/hero-library.json");
    let mut fb = Flipbook::new();
    assert_eq!(fb.load_library(JsValue::from_str(raw)).unwrap(), 3);
    assert_eq!(fb.sequence_names(), vec!["idle", "jump", "hurt"]);

    let p = fb.create_player(JsValue::UNDEFINED, None).unwrap();
    fb.apply(
        p,
        command(json!({ "type": "play", "sequence": "jump", "mode": "overwrite" })),
        None,
    )
    .unwrap();
    assert_eq!(fb.image(p).unwrap().as_deref(), Some("jump_0.png"));
    let report = fb.advance_frame(p).unwrap();
    // The overwrite already delivered the entering frame.
    let events = Array::from(&get(&report, "events"));
    assert_eq!(events.length(), 2);
    assert_eq!(get(&events.get(0), "kind").as_string().as_deref(), Some("entered"));
    let payload = get(&events.get(1), "payload");
    assert_eq!(get(&payload, "type").as_string().as_deref(), Some("float"));
    assert_eq!(get(&payload, "value").as_f64(), Some(3.5));
}

#[wasm_bindgen_test]
fn overwrite_is_timed_from_host_clock() {
    let mut fb = Flipbook::new();
    fb.load_sequence(abc()).unwrap();
    let p = fb.create_player(JsValue::UNDEFINED, None).unwrap();
    fb.apply(
        p,
        command(json!({ "type": "play", "sequence": "abc", "mode": "overwrite" })),
        Some(5.0),
    )
    .unwrap();
    assert_eq!(fb.image(p).unwrap().as_deref(), Some("a"));

    let held = fb.tick(p, 5.05).unwrap();
    assert!(get(&held, "outcome").is_null());
    let next = fb.tick(p, 5.1).unwrap();
    assert_eq!(get(&next, "outcome").as_string().as_deref(), Some("played"));
    assert_eq!(get(&next, "image").as_string().as_deref(), Some("b"));
}
