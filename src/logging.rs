//! Log setup.
//!
//! The terminal belongs to the table, so logs only go to a file. Set
//! `CSVTV_LOG=<path>` to enable them and `RUST_LOG` to filter, e.g.
//! `RUST_LOG=csvtv=trace`.

use std::fs::File;
use std::sync::Mutex;

use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::domain::TVError;

pub const LOG_FILE_ENV: &str = "CSVTV_LOG";

pub fn init() -> Result<(), TVError> {
    let Some(path) = std::env::var_os(LOG_FILE_ENV) else {
        return Ok(());
    };
    let file = File::create(&path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(ErrorLayer::default())
        .try_init()
        .map_err(|e| TVError::Logging(e.to_string()))
}
