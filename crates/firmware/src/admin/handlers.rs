//! Route handlers.
//!
//! One unit struct per path. Each declares the methods it answers and does
//! all of its work against the [`AdminContext`] it is lent.

use alloc::string::String;
use alloc::vec::Vec;

use embedded_graphics::pixelcolor::Rgb565;
use serde::{Deserialize, Serialize};
use stick_platform::{DateTime, Framebuffer, Method, MotionSensor, RealTimeClock};

use crate::bitmap;
use crate::board::Board;
use crate::color::Rgb;
use crate::config_store::{KEY_PASSWORD, KEY_SSID};

use super::context::{toggle, AdminContext};
use super::dispatcher::{HandlerResult, Resource};
use super::reply::{HandlerError, Reply};

const GET: &[Method] = &[Method::Get];
const POST: &[Method] = &[Method::Post];
const GET_POST: &[Method] = &[Method::Get, Method::Post];

static INDEX_PAGE: &str = include_str!("../assets/index.html");

/// Parse a JSON request body.
pub fn parse_body<'de, T: Deserialize<'de>>(body: &'de [u8]) -> Result<T, HandlerError> {
    serde_json::from_slice(body).map_err(|_| HandlerError::BadBody)
}

// ─── Page ──────────────────────────────────────────────────────────────────

/// `GET /`
pub struct IndexPage;

impl<B: Board> Resource<AdminContext<B>> for IndexPage {
    fn methods(&self) -> &'static [Method] {
        GET
    }

    fn get(&self, _ctx: &mut AdminContext<B>) -> HandlerResult {
        Ok(Reply::Page(INDEX_PAGE))
    }
}

// ─── Network ───────────────────────────────────────────────────────────────

/// `GET /api/ap`
pub struct AccessPoint;

impl<B: Board> Resource<AdminContext<B>> for AccessPoint {
    fn methods(&self) -> &'static [Method] {
        GET
    }

    fn get(&self, ctx: &mut AdminContext<B>) -> HandlerResult {
        Reply::ok_with(&ctx.wifi.ap_info()?)
    }
}

/// `GET /api/sta`, null result while disconnected
pub struct Station;

impl<B: Board> Resource<AdminContext<B>> for Station {
    fn methods(&self) -> &'static [Method] {
        GET
    }

    fn get(&self, ctx: &mut AdminContext<B>) -> HandlerResult {
        Reply::ok_with(&ctx.wifi.sta_info())
    }
}

/// `GET /api/wlan`
pub struct Scan;

impl<B: Board> Resource<AdminContext<B>> for Scan {
    fn methods(&self) -> &'static [Method] {
        GET
    }

    fn get(&self, ctx: &mut AdminContext<B>) -> HandlerResult {
        Reply::ok_with(&ctx.wifi.scan()?)
    }
}

#[derive(Deserialize)]
struct Credentials {
    ssid: Option<String>,
    password: Option<String>,
}

/// `POST /api/wlan/connect`
///
/// Drops the current station link, then joins the requested network. On
/// success the profile is saved. On failure the stored profile is rejoined
/// if there is one, and the request still fails.
pub struct Connect;

impl<B: Board> Resource<AdminContext<B>> for Connect {
    fn methods(&self) -> &'static [Method] {
        POST
    }

    fn post(&self, ctx: &mut AdminContext<B>, body: &[u8]) -> HandlerResult {
        let credentials: Credentials = parse_body(body)?;
        let (Some(ssid), Some(password)) = (credentials.ssid, credentials.password) else {
            return Err(HandlerError::WrongCredentials);
        };

        ctx.wifi.disconnect();
        if ctx.wifi.connect(&ssid, &password) {
            ctx.config.set_many(&[
                (KEY_SSID, ssid.as_str()),
                (KEY_PASSWORD, password.as_str()),
            ])?;
            return Ok(Reply::ok());
        }

        let stored_ssid = String::from(ctx.config.get(KEY_SSID).unwrap_or_default());
        let stored_password = String::from(ctx.config.get(KEY_PASSWORD).unwrap_or_default());
        if stored_ssid.is_empty() {
            warn!("Connect failed, no stored profile to fall back to");
        } else if !ctx.wifi.connect(&stored_ssid, &stored_password) {
            warn!("Fallback to stored profile {} failed", stored_ssid.as_str());
        }
        Err(HandlerError::WrongCredentials)
    }
}

// ─── Clock ─────────────────────────────────────────────────────────────────

/// `GET`/`POST /api/rtc`
pub struct Clock;

impl<B: Board> Resource<AdminContext<B>> for Clock {
    fn methods(&self) -> &'static [Method] {
        GET_POST
    }

    fn get(&self, ctx: &mut AdminContext<B>) -> HandlerResult {
        Reply::ok_with(&ctx.rtc.datetime()?)
    }

    fn post(&self, ctx: &mut AdminContext<B>, body: &[u8]) -> HandlerResult {
        let datetime: DateTime = parse_body(body)?;
        if !datetime.is_valid() {
            return Err(HandlerError::InvalidDateTime);
        }
        ctx.rtc.set_datetime(&datetime)?;
        Ok(Reply::ok())
    }
}

// ─── Display ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Level {
    on: bool,
}

/// `GET /api/display/backlight/toggle`
pub struct Backlight;

impl<B: Board> Resource<AdminContext<B>> for Backlight {
    fn methods(&self) -> &'static [Method] {
        GET
    }

    fn get(&self, ctx: &mut AdminContext<B>) -> HandlerResult {
        let on = toggle(&mut ctx.backlight)?;
        Reply::ok_with(&Level { on })
    }
}

/// `POST /api/display/background/color`
pub struct BackgroundColor;

impl<B: Board> Resource<AdminContext<B>> for BackgroundColor {
    fn methods(&self) -> &'static [Method] {
        POST
    }

    fn post(&self, ctx: &mut AdminContext<B>, body: &[u8]) -> HandlerResult {
        let rgb: Rgb = parse_body(body)?;
        ctx.display
            .set_background_color(&mut ctx.framebuffer, Rgb565::from(rgb))?;
        Ok(Reply::ok())
    }
}

#[derive(Deserialize)]
struct Upload {
    file: String,
}

/// `POST /api/display/background/image`
pub struct BackgroundImage;

impl<B: Board> Resource<AdminContext<B>> for BackgroundImage {
    fn methods(&self) -> &'static [Method] {
        POST
    }

    fn post(&self, ctx: &mut AdminContext<B>, body: &[u8]) -> HandlerResult {
        let upload: Upload = parse_body(body)?;
        let size = ctx.framebuffer.size();
        let pixels = bitmap::decode(&upload.file, size.width, size.height)?;
        ctx.display
            .set_background_image(&mut ctx.framebuffer, pixels)?;
        Ok(Reply::ok())
    }
}

/// `POST /api/display/foreground/color`
pub struct ForegroundColor;

impl<B: Board> Resource<AdminContext<B>> for ForegroundColor {
    fn methods(&self) -> &'static [Method] {
        POST
    }

    fn post(&self, ctx: &mut AdminContext<B>, body: &[u8]) -> HandlerResult {
        let rgb: Rgb = parse_body(body)?;
        ctx.display.set_foreground_color(Rgb565::from(rgb));
        Ok(Reply::ok())
    }
}

#[derive(Deserialize)]
struct Text {
    text: String,
}

/// `POST /api/display/text`
pub struct DisplayText;

impl<B: Board> Resource<AdminContext<B>> for DisplayText {
    fn methods(&self) -> &'static [Method] {
        POST
    }

    fn post(&self, ctx: &mut AdminContext<B>, body: &[u8]) -> HandlerResult {
        let Text { text } = parse_body(body)?;
        ctx.display.draw_text(&mut ctx.framebuffer, &text)?;
        Ok(Reply::ok())
    }
}

// ─── Sensors ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Temperature {
    temperature: f32,
}

/// `GET /api/sensor/temperature`
pub struct SensorTemperature;

impl<B: Board> Resource<AdminContext<B>> for SensorTemperature {
    fn methods(&self) -> &'static [Method] {
        GET
    }

    fn get(&self, ctx: &mut AdminContext<B>) -> HandlerResult {
        let temperature = ctx.imu.temperature()?;
        Reply::ok_with(&Temperature { temperature })
    }
}

/// `GET /api/sensor/rotation`
pub struct SensorRotation;

impl<B: Board> Resource<AdminContext<B>> for SensorRotation {
    fn methods(&self) -> &'static [Method] {
        GET
    }

    fn get(&self, ctx: &mut AdminContext<B>) -> HandlerResult {
        Reply::ok_with(&ctx.imu.gyro()?)
    }
}

/// `GET /api/sensor/acceleration`
pub struct SensorAcceleration;

impl<B: Board> Resource<AdminContext<B>> for SensorAcceleration {
    fn methods(&self) -> &'static [Method] {
        GET
    }

    fn get(&self, ctx: &mut AdminContext<B>) -> HandlerResult {
        Reply::ok_with(&ctx.imu.acceleration()?)
    }
}

// ─── LED / buzzer ──────────────────────────────────────────────────────────

/// `GET /api/led/toggle`
pub struct Led;

impl<B: Board> Resource<AdminContext<B>> for Led {
    fn methods(&self) -> &'static [Method] {
        GET
    }

    fn get(&self, ctx: &mut AdminContext<B>) -> HandlerResult {
        let on = toggle(&mut ctx.led)?;
        Reply::ok_with(&Level { on })
    }
}

#[derive(Deserialize)]
struct Melody {
    bpm: u32,
    step: u32,
    notes: Vec<String>,
}

/// `POST /api/buzzer/notes`. Blocks until the melody ends.
pub struct BuzzerNotes;

impl<B: Board> Resource<AdminContext<B>> for BuzzerNotes {
    fn methods(&self) -> &'static [Method] {
        POST
    }

    fn post(&self, ctx: &mut AdminContext<B>, body: &[u8]) -> HandlerResult {
        let melody: Melody = parse_body(body)?;
        ctx.buzzer.play(melody.bpm, melody.step, &melody.notes)?;
        Ok(Reply::ok())
    }
}
