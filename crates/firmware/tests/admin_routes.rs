//! Admin HTTP surface end to end through the control loop. Run with
//! `cargo test -p stick-firmware --test admin_routes`
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]

mod common;

use base64::prelude::{Engine as _, BASE64_STANDARD};
use common::MockBoard;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::{Point, RgbColor};
use serde_json::{json, Value};
use stick_firmware::admin::reply::WRONG_CREDENTIALS;
use stick_firmware::bitmap::DATA_URI_PREFIX;
use stick_firmware::color::from_raw;
use stick_firmware::{App, Peripherals};
use stick_platform::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH, WLAN_PROFILE_PATH};
use stick_platform::mocks::{DisplayOp, MockImu, MockRadio, MockStorage, MockTransport, ToneOp};
use stick_platform::{Body, Request, Response};

fn app_with(peripherals: Peripherals<MockBoard>) -> App<MockBoard> {
    App::new(peripherals).unwrap()
}

fn call(app: &mut App<MockBoard>, request: Request) -> Response {
    let mut transport = MockTransport::new();
    transport.push(request);
    app.tick(&mut transport);
    assert_eq!(transport.pending(), 0);
    transport.responses()[0].clone()
}

fn call_json(app: &mut App<MockBoard>, request: Request) -> (u16, Value) {
    let response = call(app, request);
    assert_eq!(response.body.content_type(), "application/json");
    (
        response.status,
        serde_json::from_slice(response.body.as_bytes()).unwrap(),
    )
}

fn get(app: &mut App<MockBoard>, path: &str) -> (u16, Value) {
    call_json(app, Request::get(path))
}

fn post(app: &mut App<MockBoard>, path: &str, body: &Value) -> (u16, Value) {
    call_json(app, Request::post(path, body.to_string().as_bytes()))
}

fn ok(result: Value) -> (u16, Value) {
    (200, json!({"message": "OK", "result": result}))
}

fn failure(status: u16, message: &str) -> (u16, Value) {
    (status, json!({"message": message, "result": null}))
}

// ─── Routing ───────────────────────────────────────────────────────────────

#[test]
fn test_root_serves_admin_page() {
    let mut app = common::app();
    let response = call(&mut app, Request::get("/"));
    assert_eq!(response.status, 200);
    assert!(matches!(response.body, Body::Html(page) if page.contains("/api/wlan/connect")));
}

#[test]
fn test_unknown_path_and_method() {
    let mut app = common::app();
    assert_eq!(get(&mut app, "/api/nope"), failure(404, "Not found"));
    assert_eq!(
        get(&mut app, "/api/display/text"),
        failure(405, "Method not allowed")
    );
    assert_eq!(
        post(&mut app, "/api/ap", &json!({})),
        failure(405, "Method not allowed")
    );
}

#[test]
fn test_every_route_registered_once() {
    let app = common::app();
    let paths: Vec<_> = app.dispatcher().routes().iter().map(|r| r.path()).collect();
    assert_eq!(paths.len(), 16);
    let mut unique = paths.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), paths.len());
}

#[test]
fn test_one_request_per_tick() {
    let mut app = common::app();
    let mut transport = MockTransport::new();
    transport.push(Request::get("/api/ap"));
    transport.push(Request::get("/api/sta"));
    app.tick(&mut transport);
    assert_eq!(transport.responses().len(), 1);
    assert_eq!(transport.pending(), 1);
    app.tick(&mut transport);
    assert_eq!(transport.responses().len(), 2);
}

// ─── Network ───────────────────────────────────────────────────────────────

#[test]
fn test_ap_and_sta_info() {
    let mut app = common::app();
    assert_eq!(
        get(&mut app, "/api/ap"),
        ok(json!({
            "ssid": "M5StickC",
            "ip": "192.168.4.1",
            "netmask": "255.255.255.0",
            "gateway": "192.168.4.1",
            "dns": "0.0.0.0",
        }))
    );
    assert_eq!(get(&mut app, "/api/sta"), ok(Value::Null));
}

#[test]
fn test_wlan_scan() {
    let record = stick_platform::ScanRecord {
        ssid: heapless::String::try_from("cafe").unwrap(),
        bssid: [0x10, 0x20, 0x30, 0x40, 0x50, 0x6a],
        channel: 11,
        rssi: -70,
        auth_mode: 3,
    };
    let mut app = app_with(Peripherals {
        radio: MockRadio::new().with_scan_results(vec![record]),
        ..common::peripherals()
    });
    assert_eq!(
        get(&mut app, "/api/wlan"),
        ok(json!([{
            "ssid": "cafe",
            "bssid": "10203040506a",
            "channel": 11,
            "dbm": -70,
            "is_open": false,
        }]))
    );
}

#[test]
fn test_connect_success_persists_profile() {
    let mut app = app_with(Peripherals {
        radio: MockRadio::new().accept("home", "pw"),
        ..common::peripherals()
    });
    assert_eq!(
        post(
            &mut app,
            "/api/wlan/connect",
            &json!({"ssid": "home", "password": "pw"})
        ),
        ok(Value::Null)
    );
    let saved = app
        .context()
        .config
        .storage()
        .file(WLAN_PROFILE_PATH)
        .unwrap();
    assert_eq!(saved, br#"{"password":"pw","ssid":"home"}"#);
    assert_eq!(app.context().config.storage().writes(), 1);
    assert_eq!(get(&mut app, "/api/sta").1["result"]["ssid"], "home");
}

#[test]
fn test_connect_failure_falls_back_and_reports_400() {
    let storage = MockStorage::new().with_file(
        WLAN_PROFILE_PATH,
        br#"{"ssid":"old","password":"stale"}"#,
    );
    let mut app = app_with(Peripherals {
        storage,
        ..common::peripherals()
    });
    assert_eq!(
        post(
            &mut app,
            "/api/wlan/connect",
            &json!({"ssid": "home", "password": "bad"})
        ),
        failure(400, WRONG_CREDENTIALS)
    );
    let attempts = app.context().wifi.radio().connect_attempts();
    assert_eq!(
        attempts,
        &[
            ("home".to_string(), "bad".to_string()),
            ("old".to_string(), "stale".to_string()),
        ]
    );
    // Profile unchanged.
    assert_eq!(app.context().config.storage().writes(), 0);
}

#[test]
fn test_connect_failure_with_working_fallback_still_400() {
    let storage = MockStorage::new().with_file(
        WLAN_PROFILE_PATH,
        br#"{"ssid":"old","password":"good"}"#,
    );
    let mut app = app_with(Peripherals {
        storage,
        radio: MockRadio::new().accept("old", "good"),
        ..common::peripherals()
    });
    assert_eq!(
        post(
            &mut app,
            "/api/wlan/connect",
            &json!({"ssid": "home", "password": "bad"})
        ),
        failure(400, WRONG_CREDENTIALS)
    );
    assert_eq!(get(&mut app, "/api/sta").1["result"]["ssid"], "old");
}

#[test]
fn test_connect_missing_field_or_bad_json() {
    let mut app = common::app();
    assert_eq!(
        post(&mut app, "/api/wlan/connect", &json!({"ssid": "home"})),
        failure(400, WRONG_CREDENTIALS)
    );
    assert!(app.context().wifi.radio().connect_attempts().is_empty());
    assert_eq!(
        call_json(&mut app, Request::post("/api/wlan/connect", b"{ssid")),
        failure(400, "Invalid request body")
    );
}

// ─── Clock ─────────────────────────────────────────────────────────────────

#[test]
fn test_rtc_roundtrip_and_validation() {
    let mut app = common::app();
    let now = json!({
        "year": 2025, "month": 3, "day": 14,
        "hour": 15, "minute": 9, "second": 26, "weekday": 5,
    });
    assert_eq!(post(&mut app, "/api/rtc", &now), ok(Value::Null));
    assert_eq!(get(&mut app, "/api/rtc"), ok(now.clone()));

    let mut bad = now;
    bad["month"] = json!(13);
    assert_eq!(
        post(&mut app, "/api/rtc", &bad),
        failure(400, "Invalid date or time")
    );
    assert_eq!(get(&mut app, "/api/rtc").1["result"]["month"], 3);
}

// ─── Display ───────────────────────────────────────────────────────────────

#[test]
fn test_backlight_toggle() {
    let mut app = common::app();
    assert_eq!(
        get(&mut app, "/api/display/backlight/toggle"),
        ok(json!({"on": true}))
    );
    assert!(app.context().backlight.is_on());
    assert_eq!(
        get(&mut app, "/api/display/backlight/toggle"),
        ok(json!({"on": false}))
    );
}

#[test]
fn test_background_color_then_text() {
    let mut app = common::app();
    let red = from_raw(0xF800);
    assert_eq!(
        post(
            &mut app,
            "/api/display/background/color",
            &json!({"r": 255, "g": 0, "b": 0})
        ),
        ok(Value::Null)
    );
    assert_eq!(
        post(
            &mut app,
            "/api/display/foreground/color",
            &json!({"r": 0, "g": 0, "b": 255})
        ),
        ok(Value::Null)
    );
    assert_eq!(app.context().display.background(), red);
    assert_eq!(app.context().display.foreground(), Rgb565::BLUE);

    app.context_mut().framebuffer.clear_ops();
    assert_eq!(
        post(&mut app, "/api/display/text", &json!({"text": "hello"})),
        ok(Value::Null)
    );
    assert_eq!(
        app.context().framebuffer.ops(),
        &[
            DisplayOp::Fill(red),
            DisplayOp::Text {
                text: "hello".into(),
                origin: Point::new(10, 20),
                foreground: Rgb565::BLUE,
                background: red,
            },
        ]
    );
}

#[test]
fn test_background_image_upload() {
    let mut app = common::app();
    let rows = vec![vec![(0u8, 0u8, 255u8); DISPLAY_WIDTH as usize]; DISPLAY_HEIGHT as usize];
    let file = format!(
        "{DATA_URI_PREFIX}{}",
        BASE64_STANDARD.encode(common::bmp24(DISPLAY_WIDTH, &rows))
    );
    assert_eq!(
        post(&mut app, "/api/display/background/image", &json!({"file": file})),
        ok(Value::Null)
    );
    let image = app.context().display.image().unwrap();
    assert_eq!(image.len(), (DISPLAY_WIDTH * DISPLAY_HEIGHT) as usize);
    assert!(image.iter().all(|&p| p == 0xF800));

    // Text now redraws the image instead of filling.
    app.context_mut().framebuffer.clear_ops();
    post(&mut app, "/api/display/text", &json!({"text": "hi"}));
    assert!(matches!(
        app.context().framebuffer.ops()[0],
        DisplayOp::Blit { .. }
    ));

    // A colour drops the image.
    post(
        &mut app,
        "/api/display/background/color",
        &json!({"r": 0, "g": 0, "b": 0}),
    );
    assert!(app.context().display.image().is_none());
}

#[test]
fn test_background_image_rejected() {
    let mut app = common::app();
    let small = common::bmp24(2, &[vec![(0, 0, 0); 2]]);
    let file = format!("{DATA_URI_PREFIX}{}", BASE64_STANDARD.encode(small));
    assert_eq!(
        post(&mut app, "/api/display/background/image", &json!({"file": file})),
        failure(400, "Wrong image size: expecting 240x135 dimension")
    );
    assert_eq!(
        post(
            &mut app,
            "/api/display/background/image",
            &json!({"file": "data:text/plain;base64,AAAA"})
        ),
        failure(400, "Wrong base64 format: expecting data:image/bmp;base64,")
    );
    assert!(app.context().display.image().is_none());
    assert!(app.context().framebuffer.ops().is_empty());
}

// ─── Sensors ───────────────────────────────────────────────────────────────

#[test]
fn test_sensor_snapshots() {
    let mut app = common::app();
    assert_eq!(
        get(&mut app, "/api/sensor/temperature"),
        ok(json!({"temperature": 25.5}))
    );
    assert_eq!(
        get(&mut app, "/api/sensor/rotation"),
        ok(json!({"x": 0.5, "y": -1.0, "z": 2.0}))
    );
    assert_eq!(
        get(&mut app, "/api/sensor/acceleration"),
        ok(json!({"x": 0.0, "y": 0.0, "z": 1.0}))
    );
}

#[test]
fn test_sensor_failure_is_500() {
    let mut app = app_with(Peripherals {
        imu: MockImu {
            fail: true,
            ..MockImu::default()
        },
        ..common::peripherals()
    });
    assert_eq!(
        get(&mut app, "/api/sensor/temperature"),
        failure(500, "Sensor bus error")
    );
}

// ─── LED / buzzer ──────────────────────────────────────────────────────────

#[test]
fn test_led_toggle() {
    let mut app = common::app();
    assert_eq!(get(&mut app, "/api/led/toggle"), ok(json!({"on": true})));
    assert!(app.context().led.is_on());
    // Idle button polls leave the toggled LED alone.
    assert_eq!(get(&mut app, "/api/ap").0, 200);
    assert!(app.context().led.is_on());
}

#[test]
fn test_buzzer_notes() {
    let mut app = common::app();
    assert_eq!(
        post(
            &mut app,
            "/api/buzzer/notes",
            &json!({"bpm": 120, "step": 4, "notes": ["A4", "_", "~"]})
        ),
        ok(Value::Null)
    );
    assert_eq!(
        app.context().buzzer.tone().ops(),
        &[
            ToneOp::Start,
            ToneOp::Duty(512),
            ToneOp::Frequency(440),
            ToneOp::Duty(0),
            ToneOp::Stop,
        ]
    );
    assert_eq!(app.context().buzzer.delay().total_us(), 1_500_000);
}

#[test]
fn test_buzzer_rejects_bad_input() {
    let mut app = common::app();
    assert_eq!(
        post(
            &mut app,
            "/api/buzzer/notes",
            &json!({"bpm": 120, "step": 4, "notes": ["C4", "H1"]})
        ),
        failure(400, "Wrong note: H1")
    );
    assert!(app.context().buzzer.tone().is_running());
    assert_eq!(
        post(
            &mut app,
            "/api/buzzer/notes",
            &json!({"bpm": 0, "step": 4, "notes": []})
        ),
        failure(400, "bpm and step must be greater than zero")
    );
}
