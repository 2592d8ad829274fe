//! # Status Subcommand
//!
//! Shows the transport status a code maps to and the exact boundary body a
//! client would receive for it.

use std::io::Write;

use clap::Args;
use serde::Serialize;

use dscm_core::{ErrorCode, StatusClass, DEFAULT_LOCALE};
use dscm_http::HttpError;

/// Arguments for the status subcommand.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Machine code, e.g. `too_many_requests`.
    pub code: String,

    /// Locale of the sample body's message.
    #[arg(long, default_value = DEFAULT_LOCALE)]
    pub locale: String,

    /// Request id placed in the sample body.
    #[arg(long, default_value = "00000000-0000-0000-0000-000000000000")]
    pub request_id: String,
}

/// Status mapping and sample boundary body for one code.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub status: u16,
    pub class: Option<&'static str>,
    pub body: HttpError,
}

pub fn report(args: &StatusArgs) -> anyhow::Result<StatusReport> {
    let code: ErrorCode = args.code.parse()?;
    let body = HttpError::from_code(args.request_id.clone(), code, "", &[args.locale.as_str()]);
    let status = body.status();
    Ok(StatusReport {
        status,
        class: StatusClass::of(status).map(StatusClass::as_str),
        body,
    })
}

pub fn run(args: &StatusArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let report = report(args)?;
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}
