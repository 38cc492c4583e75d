//! Admin HTTP surface.
//!
//! The transport hands over one parsed [`Request`](stick_platform::Request)
//! at a time; the [`Dispatcher`] picks a handler, runs it against the
//! [`AdminContext`] and encodes the [`Reply`] as a JSON envelope or the
//! admin page.
//!
//! | Method   | Path                              |
//! |----------|-----------------------------------|
//! | GET      | `/`                               |
//! | GET      | `/api/ap`                         |
//! | GET      | `/api/sta`                        |
//! | GET      | `/api/wlan`                       |
//! | POST     | `/api/wlan/connect`               |
//! | GET/POST | `/api/rtc`                        |
//! | GET      | `/api/display/backlight/toggle`   |
//! | POST     | `/api/display/background/color`   |
//! | POST     | `/api/display/background/image`   |
//! | POST     | `/api/display/foreground/color`   |
//! | POST     | `/api/display/text`               |
//! | GET      | `/api/sensor/temperature`         |
//! | GET      | `/api/sensor/rotation`            |
//! | GET      | `/api/sensor/acceleration`        |
//! | GET      | `/api/led/toggle`                 |
//! | POST     | `/api/buzzer/notes`               |

pub mod context;
pub mod dispatcher;
pub mod handlers;
pub mod reply;

pub use context::AdminContext;
pub use dispatcher::{DispatchError, Dispatcher, HandlerResult, Resource, RouteEntry};
pub use reply::{HandlerError, Reply};

use crate::board::Board;

/// Build the full route table.
pub fn routes<B: Board>() -> Result<Dispatcher<AdminContext<B>>, DispatchError> {
    use handlers as h;

    let mut dispatcher = Dispatcher::new();
    dispatcher.add_route("/", h::IndexPage)?;
    dispatcher.add_route("/api/ap", h::AccessPoint)?;
    dispatcher.add_route("/api/sta", h::Station)?;
    dispatcher.add_route("/api/wlan", h::Scan)?;
    dispatcher.add_route("/api/wlan/connect", h::Connect)?;
    dispatcher.add_route("/api/rtc", h::Clock)?;
    dispatcher.add_route("/api/display/backlight/toggle", h::Backlight)?;
    dispatcher.add_route("/api/display/background/color", h::BackgroundColor)?;
    dispatcher.add_route("/api/display/background/image", h::BackgroundImage)?;
    dispatcher.add_route("/api/display/foreground/color", h::ForegroundColor)?;
    dispatcher.add_route("/api/display/text", h::DisplayText)?;
    dispatcher.add_route("/api/sensor/temperature", h::SensorTemperature)?;
    dispatcher.add_route("/api/sensor/rotation", h::SensorRotation)?;
    dispatcher.add_route("/api/sensor/acceleration", h::SensorAcceleration)?;
    dispatcher.add_route("/api/led/toggle", h::Led)?;
    dispatcher.add_route("/api/buzzer/notes", h::BuzzerNotes)?;
    Ok(dispatcher)
}
