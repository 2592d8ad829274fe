//! # Codes Subcommand
//!
//! Lists the machine-code taxonomy with the status each code maps to, its
//! default retry hint and its catalog template in one locale.

use std::io::Write;

use clap::Args;
use serde::Serialize;

use dscm_core::{ErrorCode, MessageCatalog, DEFAULT_LOCALE};

/// Arguments for the codes subcommand.
#[derive(Args, Debug)]
pub struct CodesArgs {
    /// Locale for the message column.
    #[arg(long, default_value = DEFAULT_LOCALE)]
    pub locale: String,

    /// Emit a JSON array instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// One line of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeRow {
    pub code: &'static str,
    pub status: u16,
    pub retry_after: i64,
    pub template: &'static str,
}

/// Every code in canonical order.
pub fn rows(locale: &str) -> Vec<CodeRow> {
    let catalog = MessageCatalog::global();
    ErrorCode::all()
        .iter()
        .map(|code| CodeRow {
            code: code.as_str(),
            status: code.default_status(),
            retry_after: code.default_retry_after(),
            template: catalog.template(locale, code.as_str()),
        })
        .collect()
}

pub fn run(args: &CodesArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let rows = rows(&args.locale);
    tracing::debug!(count = rows.len(), locale = %args.locale, "listing codes");
    if args.json {
        serde_json::to_writer_pretty(&mut *out, &rows)?;
        writeln!(out)?;
        return Ok(());
    }
    let width = rows.iter().map(|r| r.code.len()).max().unwrap_or(0);
    for row in &rows {
        writeln!(
            out,
            "{:<width$}  {}  {:>3}  {}",
            row.code, row.status, row.retry_after, row.template
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_code() {
        let rows = rows("en");
        assert_eq!(rows.len(), dscm_core::ERROR_CODE_COUNT);
        let busy = rows.iter().find(|r| r.code == "service_unavailable").unwrap();
        assert_eq!((busy.status, busy.retry_after), (503, 30));
    }

    #[test]
    fn table_output_in_norwegian() {
        let args = CodesArgs {
            locale: "nb".into(),
            json: false,
        };
        let mut buf = Vec::new();
        run(&args, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), dscm_core::ERROR_CODE_COUNT);
        let line = text.lines().find(|l| l.starts_with("required ")).unwrap();
        assert!(line.contains("400"));
        assert!(line.ends_with("%s er påkrevd."));
    }

    #[test]
    fn json_output_parses() {
        let args = CodesArgs {
            locale: "en".into(),
            json: true,
        };
        let mut buf = Vec::new();
        run(&args, &mut buf).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v[0]["code"], "internal_error");
        assert_eq!(v[0]["status"], 500);
    }
}
