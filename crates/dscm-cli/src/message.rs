//! # Message Subcommand
//!
//! Renders a catalog message the way services resolve it for clients.

use std::fmt::Display;
use std::io::Write;

use clap::Args;

use dscm_core::{human_message_locale, ErrorCode, Locale, DEFAULT_LOCALE};

/// Arguments for the message subcommand.
#[derive(Args, Debug)]
pub struct MessageArgs {
    /// Machine code, e.g. `required`.
    pub code: String,

    /// Locale tag.
    #[arg(long, default_value = DEFAULT_LOCALE)]
    pub locale: String,

    /// Values substituted into the template's placeholders, in order.
    pub args: Vec<String>,
}

pub fn run(args: &MessageArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let code: ErrorCode = args.code.parse()?;
    if Locale::parse(&args.locale).is_none() {
        tracing::warn!(locale = %args.locale, "unsupported locale, falling back to default");
    }
    let values: Vec<&dyn Display> = args.args.iter().map(|a| a as &dyn Display).collect();
    writeln!(out, "{}", human_message_locale(&args.locale, code, &values))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(code: &str, locale: &str, values: &[&str]) -> anyhow::Result<String> {
        let args = MessageArgs {
            code: code.into(),
            locale: locale.into(),
            args: values.iter().map(|v| v.to_string()).collect(),
        };
        let mut buf = Vec::new();
        run(&args, &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }

    #[test]
    fn fills_placeholders() {
        assert_eq!(render("required", "nb", &["name"]).unwrap(), "name er påkrevd.\n");
    }

    #[test]
    fn template_without_args_is_verbatim() {
        assert_eq!(render("required", "en", &[]).unwrap(), "%s is required.\n");
    }

    #[test]
    fn unknown_code_is_an_error() {
        let err = render("no_such_code", "en", &[]).unwrap_err();
        assert!(err.to_string().contains("no_such_code"));
    }
}
