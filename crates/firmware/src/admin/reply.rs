//! Response envelope and handler errors.
//!
//! Every JSON response has the same shape:
//!
//! ```json
//! {"message": "OK", "result": null}
//! ```
//!
//! `message` is `"OK"` on success and a human-readable reason otherwise.

use alloc::borrow::Cow;
use alloc::vec::Vec;

use serde::Serialize;
use serde_json::Value;
use stick_platform::{
    Body, DisplayError, RadioError, Response, RtcError, SensorError, ToneError,
};

use crate::bitmap::BitmapError;
use crate::config_store::ConfigError;
use crate::sequencer::SequencerError;

/// HTTP status codes used by the admin surface.
pub mod status {
    /// Success
    pub const OK: u16 = 200;
    /// Validation failure
    pub const BAD_REQUEST: u16 = 400;
    /// Unknown path
    pub const NOT_FOUND: u16 = 404;
    /// Path exists, method does not
    pub const METHOD_NOT_ALLOWED: u16 = 405;
    /// Hardware or persistence failure
    pub const INTERNAL_SERVER_ERROR: u16 = 500;
}

/// Success message.
pub const DEFAULT_MESSAGE: &str = "OK";

/// Message for a failed station connect.
pub const WRONG_CREDENTIALS: &str = "Wrong ssid or password.";

#[derive(Serialize)]
struct Envelope<'a> {
    message: &'a str,
    result: &'a Value,
}

/// What a handler produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// JSON envelope
    Envelope {
        /// HTTP status
        status: u16,
        /// `message` field
        message: Cow<'static, str>,
        /// `result` field
        result: Value,
    },
    /// Static HTML page
    Page(&'static str),
}

impl Reply {
    /// 200, `"OK"`, null result.
    pub fn ok() -> Self {
        Self::with_result(Value::Null)
    }

    /// 200, `"OK"`, `result` serialized.
    pub fn ok_with<T: Serialize>(result: &T) -> Result<Self, HandlerError> {
        let result = serde_json::to_value(result).map_err(|_| HandlerError::Encode)?;
        Ok(Self::with_result(result))
    }

    /// Failure envelope with a null result.
    pub fn error(status: u16, message: impl Into<Cow<'static, str>>) -> Self {
        Self::Envelope {
            status,
            message: message.into(),
            result: Value::Null,
        }
    }

    fn with_result(result: Value) -> Self {
        Self::Envelope {
            status: status::OK,
            message: Cow::Borrowed(DEFAULT_MESSAGE),
            result,
        }
    }

    /// HTTP status of this reply.
    pub fn status(&self) -> u16 {
        match self {
            Self::Envelope { status, .. } => *status,
            Self::Page(_) => status::OK,
        }
    }

    /// Encode for the transport.
    pub fn into_response(self) -> Response {
        match self {
            Self::Page(page) => Response {
                status: status::OK,
                body: Body::Html(page),
            },
            Self::Envelope {
                status,
                message,
                result,
            } => {
                let envelope = Envelope {
                    message: &message,
                    result: &result,
                };
                match serde_json::to_vec(&envelope) {
                    Ok(bytes) => Response {
                        status,
                        body: Body::Json(bytes),
                    },
                    Err(_) => Response {
                        status: status::INTERNAL_SERVER_ERROR,
                        body: Body::Json(Vec::from(
                            &br#"{"message":"Response encoding failed","result":null}"#[..],
                        )),
                    },
                }
            }
        }
    }
}

/// Why a handler failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandlerError {
    /// Body is not the JSON the route expects.
    #[error("Invalid request body")]
    BadBody,
    /// Station connect failed or the credentials were incomplete.
    #[error("Wrong ssid or password.")]
    WrongCredentials,
    /// RTC fields out of range.
    #[error("Invalid date or time")]
    InvalidDateTime,
    /// Method not supported by the route.
    #[error("Method not allowed")]
    MethodNotAllowed,
    /// Uploaded image rejected.
    #[error(transparent)]
    Bitmap(#[from] BitmapError),
    /// Melody rejected or buzzer failed.
    #[error(transparent)]
    Sequencer(#[from] SequencerError),
    /// LCD write failed.
    #[error("{0}")]
    Lcd(#[from] DisplayError),
    /// IMU read failed.
    #[error("{0}")]
    Sensor(#[from] SensorError),
    /// RTC access failed.
    #[error("{0}")]
    Rtc(#[from] RtcError),
    /// Radio failed.
    #[error("{0}")]
    Radio(#[from] RadioError),
    /// Settings could not be saved.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// GPIO write failed.
    #[error("Pin write failed")]
    Pin,
    /// Result could not be serialized.
    #[error("Response encoding failed")]
    Encode,
}

impl From<ToneError> for HandlerError {
    fn from(err: ToneError) -> Self {
        Self::Sequencer(SequencerError::Tone(err))
    }
}

impl HandlerError {
    /// HTTP status for this error: 400 for anything the caller can fix,
    /// 500 for hardware and persistence failures.
    pub fn status(&self) -> u16 {
        match self {
            Self::BadBody
            | Self::WrongCredentials
            | Self::InvalidDateTime
            | Self::Bitmap(_)
            | Self::Sequencer(SequencerError::InvalidToken(_) | SequencerError::InvalidTempo) => {
                status::BAD_REQUEST
            }
            Self::MethodNotAllowed => status::METHOD_NOT_ALLOWED,
            Self::Sequencer(SequencerError::Tone(_))
            | Self::Lcd(_)
            | Self::Sensor(_)
            | Self::Rtc(_)
            | Self::Radio(_)
            | Self::Config(_)
            | Self::Pin
            | Self::Encode => status::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<HandlerError> for Reply {
    fn from(err: HandlerError) -> Self {
        Self::error(err.status(), alloc::string::ToString::to_string(&err))
    }
}
