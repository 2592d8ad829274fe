//! # Message Catalog
//!
//! Locale-keyed tables of human message templates, one entry per machine
//! code. Templates carry zero or more positional `%s` placeholders that are
//! filled from caller-supplied arguments, conventionally the offending field
//! name:
//!
//! ```
//! use dscm_core::catalog::{human_message, human_message_locale};
//! use dscm_core::ErrorCode;
//!
//! assert_eq!(human_message(ErrorCode::Required, &[&"email"]), "email is required.");
//! assert_eq!(
//!     human_message_locale("nb", ErrorCode::InvalidEmailFormat, &[&"E-post"]),
//!     "E-post må være en gyldig e-postadresse."
//! );
//! ```
//!
//! ## Fallbacks
//!
//! Resolution never fails and never yields an empty string:
//!
//! - an unsupported locale tag (including `""`) resolves against English;
//! - a code missing from the selected locale resolves to that locale's own
//!   `internal_error` entry, so the answer stays in the requested language.
//!
//! The catalog is built once per process and is read-only afterwards.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::codes::ErrorCode;

/// Locale tag used when the caller supplies none.
pub const DEFAULT_LOCALE: &str = "en";

/// Locales with a message table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English. The universal fallback.
    #[default]
    En,
    /// Norwegian Bokmål.
    Nb,
}

impl Locale {
    /// Returns every supported locale.
    pub fn all() -> &'static [Locale] {
        &[Self::En, Self::Nb]
    }

    /// Exact tag match against the supported set.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "en" => Some(Self::En),
            "nb" => Some(Self::Nb),
            _ => None,
        }
    }

    /// Like [`Locale::parse`], but unsupported tags fall back to English.
    pub fn from_tag(tag: &str) -> Self {
        Self::parse(tag).unwrap_or_default()
    }

    /// The locale tag, e.g. `"nb"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Nb => "nb",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick the authoritative locale tag from an optional, ordered list.
///
/// The first non-empty tag wins; with none, [`DEFAULT_LOCALE`] is returned.
/// The tag is returned as given; whether a catalog exists for it is decided
/// at resolution time.
pub fn get_locale<'a>(locales: &[&'a str]) -> &'a str {
    locales
        .iter()
        .copied()
        .find(|tag| !tag.is_empty())
        .unwrap_or(DEFAULT_LOCALE)
}

/// Read-only `(locale, code) -> template` tables.
#[derive(Debug)]
pub struct MessageCatalog {
    tables: HashMap<Locale, HashMap<&'static str, &'static str>>,
}

static GLOBAL: OnceLock<MessageCatalog> = OnceLock::new();

impl MessageCatalog {
    /// The process-wide catalog holding the built-in tables.
    pub fn global() -> &'static MessageCatalog {
        GLOBAL.get_or_init(Self::builtin)
    }

    fn builtin() -> Self {
        let tables = Locale::all()
            .iter()
            .map(|locale| {
                let table = ErrorCode::all()
                    .iter()
                    .map(|code| (code.as_str(), builtin_template(*locale, *code)))
                    .collect();
                (*locale, table)
            })
            .collect();
        Self { tables }
    }

    /// Locales this catalog has tables for, sorted.
    pub fn locales(&self) -> Vec<Locale> {
        let mut locales: Vec<Locale> = self.tables.keys().copied().collect();
        locales.sort();
        locales
    }

    /// Unformatted template for `(locale, code)`, with both fallbacks applied.
    pub fn template(&self, locale: &str, code: &str) -> &'static str {
        let locale = Locale::from_tag(locale);
        self.tables
            .get(&locale)
            .and_then(|table| table.get(code))
            .copied()
            .unwrap_or_else(|| builtin_template(locale, ErrorCode::Internal))
    }

    /// Resolve a human message.
    ///
    /// Supplying any argument triggers positional substitution; with no
    /// arguments the template is returned verbatim.
    pub fn resolve(&self, locale: &str, code: &str, args: &[&dyn fmt::Display]) -> String {
        let template = self.template(locale, code);
        if args.is_empty() {
            template.to_string()
        } else {
            format_template(template, args)
        }
    }
}

/// English message for `code`. See [`human_message_locale`].
pub fn human_message(code: impl AsRef<str>, args: &[&dyn fmt::Display]) -> String {
    human_message_locale(DEFAULT_LOCALE, code, args)
}

/// Human message for `code` in `locale`, resolved against the global catalog.
pub fn human_message_locale(
    locale: &str,
    code: impl AsRef<str>,
    args: &[&dyn fmt::Display],
) -> String {
    MessageCatalog::global().resolve(locale, code.as_ref(), args)
}

/// Fill `%s` (also `%v`, `%d`) placeholders left to right from `args`.
///
/// `%%` renders a literal percent sign. Placeholders beyond the supplied
/// arguments are left in place; surplus arguments are ignored.
pub fn format_template(template: &str, args: &[&dyn fmt::Display]) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut args = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some(verb @ ('s' | 'v' | 'd')) => {
                chars.next();
                match args.next() {
                    Some(arg) => out.push_str(&arg.to_string()),
                    None => {
                        out.push('%');
                        out.push(verb);
                    }
                }
            }
            _ => out.push('%'),
        }
    }
    out
}

/// An ad hoc bilingual message supplied by the caller rather than the
/// shared catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomMessage {
    /// English text. Used for every tag other than the Norwegian ones.
    pub en: String,
    /// Norwegian text.
    pub no: String,
}

/// Language selector for [`CustomMessage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomLocale {
    /// English (primary).
    En,
    /// Norwegian (secondary).
    No,
}

impl CustomLocale {
    /// `"no"` and `"nb"` select Norwegian; anything else selects English.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "no" | "nb" => Self::No,
            _ => Self::En,
        }
    }
}

impl CustomMessage {
    /// Build a bilingual message.
    pub fn new(en: impl Into<String>, no: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            no: no.into(),
        }
    }

    /// Text for the given selector.
    pub fn pick(&self, locale: CustomLocale) -> &str {
        match locale {
            CustomLocale::En => &self.en,
            CustomLocale::No => &self.no,
        }
    }
}

/// Choose the text of a [`CustomMessage`] for a locale tag, defaulting to
/// English for any unrecognized tag.
pub fn custom_human_message_locale<'a>(locale: &str, message: &'a CustomMessage) -> &'a str {
    message.pick(CustomLocale::from_tag(locale))
}

fn builtin_template(locale: Locale, code: ErrorCode) -> &'static str {
    match locale {
        Locale::En => english(code),
        Locale::Nb => norwegian(code),
    }
}

fn english(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::Internal => "Something went wrong on our side. Please try again.",
        ErrorCode::Unauthorized => "You need to sign in to continue.",
        ErrorCode::Forbidden => "You don't have permission to perform this action.",
        ErrorCode::NotFound => "The requested resource was not found.",
        ErrorCode::Conflict => "The resource is in a conflicting state.",
        ErrorCode::BadRequest => "Your request could not be understood.",
        ErrorCode::ValidationFailed => "One or more fields failed validation.",
        ErrorCode::TooManyRequests => "Too many requests. Please slow down.",
        ErrorCode::Required => "%s is required.",
        ErrorCode::InvalidEmailFormat => "%s must be a valid email address.",
        ErrorCode::InvalidJsonFormat => "Request body must be valid JSON.",
        ErrorCode::InvalidStatus => "The provided status %s is invalid. Allowed values include active, deleted, suspended, rejected, draft",
        ErrorCode::Invalid => "Invalid",
        ErrorCode::InvalidDataType => "The provided data type %s is invalid. Allowed values include string, int64, float64, decimal, time, datetime, bytes, uuid, map",
        ErrorCode::BadGateway => "The server received an invalid response from an upstream service. Please try again later.",
        ErrorCode::Ok => "Success.",
        ErrorCode::Created => "Resource created successfully.",
        ErrorCode::Accepted => "Request accepted for processing.",
        ErrorCode::NonAuthoritativeInfo => "Non-authoritative information.",
        ErrorCode::NoContent => "No content.",
        ErrorCode::ResetContent => "Reset content.",
        ErrorCode::PartialContent => "Partial content delivered.",
        ErrorCode::MultiStatus => "Multiple status responses.",
        ErrorCode::AlreadyReported => "Already reported.",
        ErrorCode::ImUsed => "IM used.",
        ErrorCode::MultipleChoices => "Multiple choices available.",
        ErrorCode::MovedPermanently => "Resource moved permanently.",
        ErrorCode::Found => "Resource found.",
        ErrorCode::SeeOther => "See other resource.",
        ErrorCode::NotModified => "Resource not modified.",
        ErrorCode::UseProxy => "Use proxy.",
        ErrorCode::Unused => "Unused status code.",
        ErrorCode::TemporaryRedirect => "Temporary redirect.",
        ErrorCode::PermanentRedirect => "Permanent redirect.",
        ErrorCode::PaymentRequired => "Payment required.",
        ErrorCode::MethodNotAllowed => "Method not allowed.",
        ErrorCode::NotAcceptable => "Not acceptable.",
        ErrorCode::ProxyAuthRequired => "Proxy authentication required.",
        ErrorCode::RequestTimeout => "Request timeout.",
        ErrorCode::Gone => "Resource gone.",
        ErrorCode::LengthRequired => "Content length required.",
        ErrorCode::PreconditionFailed => "Precondition failed.",
        ErrorCode::ContentTooLarge => "Content too large.",
        ErrorCode::UriTooLong => "URI too long.",
        ErrorCode::UnsupportedMediaType => "Unsupported media type.",
        ErrorCode::RangeNotSatisfiable => "Range not satisfiable.",
        ErrorCode::ExpectationFailed => "Expectation failed.",
        ErrorCode::ImATeapot => "I'm a teapot.",
        ErrorCode::MisdirectedRequest => "Misdirected request.",
        ErrorCode::UnprocessableContent => "Unprocessable content.",
        ErrorCode::Locked => "Resource locked.",
        ErrorCode::FailedDependency => "Failed dependency.",
        ErrorCode::TooEarly => "Too early.",
        ErrorCode::UpgradeRequired => "Upgrade required.",
        ErrorCode::PreconditionRequired => "Precondition required.",
        ErrorCode::RequestHeaderFieldsTooLarge => "Request header fields too large.",
        ErrorCode::UnavailableForLegalReasons => "Unavailable for legal reasons.",
        ErrorCode::NotImplemented => "Not implemented.",
        ErrorCode::ServiceUnavailable => "Service unavailable.",
        ErrorCode::GatewayTimeout => "Gateway timeout.",
        ErrorCode::HttpVersionNotSupported => "HTTP version not supported.",
        ErrorCode::VariantAlsoNegotiates => "Variant also negotiates.",
        ErrorCode::InsufficientStorage => "Insufficient storage.",
        ErrorCode::LoopDetected => "Loop detected.",
        ErrorCode::NotExtended => "Not extended.",
        ErrorCode::NetworkAuthenticationRequired => "Network authentication required.",
        ErrorCode::RequirePositiveInt => "Integer must be positive.",
    }
}

fn norwegian(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::Internal => "Noe gikk galt hos oss. Prøv igjen.",
        ErrorCode::Unauthorized => "Du må være innlogget for å fortsette.",
        ErrorCode::Forbidden => "Du har ikke tilgang til denne handlingen.",
        ErrorCode::NotFound => "Forespurt ressurs ble ikke funnet.",
        ErrorCode::Conflict => "Ressursen er i konflikt.",
        ErrorCode::BadRequest => "Forespørselen kunne ikke forstås.",
        ErrorCode::ValidationFailed => "Ett eller flere felt feilet validering.",
        ErrorCode::TooManyRequests => "For mange forespørsler. Vent litt.",
        ErrorCode::Required => "%s er påkrevd.",
        ErrorCode::InvalidEmailFormat => "%s må være en gyldig e-postadresse.",
        ErrorCode::InvalidJsonFormat => "Kroppen i forespørselen må være gyldig JSON.",
        ErrorCode::InvalidStatus => "Oppgitt statusverdi er ugyldig. Gyldige verdier inkluderer active, deleted, suspended, rejected, draft",
        ErrorCode::Invalid => "Ugyldig",
        ErrorCode::InvalidDataType => "Oppgitt datatypeverdi er ugyldig. Gyldige verdier inkluderer string, int64, float64, decimal, time, datetime, bytes, uuid, map",
        ErrorCode::BadGateway => "Serveren mottok et ugyldig svar fra en ekstern tjeneste. Prøv igjen senere.",
        ErrorCode::Ok => "Vellykket.",
        ErrorCode::Created => "Ressurs opprettet.",
        ErrorCode::Accepted => "Forespørsel akseptert for behandling.",
        ErrorCode::NonAuthoritativeInfo => "Ikke-autoritativ informasjon.",
        ErrorCode::NoContent => "Ingen innhold.",
        ErrorCode::ResetContent => "Tilbakestill innhold.",
        ErrorCode::PartialContent => "Delvis innhold levert.",
        ErrorCode::MultiStatus => "Flere statusresponser.",
        ErrorCode::AlreadyReported => "Allerede rapportert.",
        ErrorCode::ImUsed => "IM brukt.",
        ErrorCode::MultipleChoices => "Flere valg tilgjengelig.",
        ErrorCode::MovedPermanently => "Ressursen er permanent flyttet.",
        ErrorCode::Found => "Ressurs funnet.",
        ErrorCode::SeeOther => "Se annen ressurs.",
        ErrorCode::NotModified => "Ressurs ikke endret.",
        ErrorCode::UseProxy => "Bruk proxy.",
        ErrorCode::Unused => "Ubrukt statuskode.",
        ErrorCode::TemporaryRedirect => "Midlertidig omdirigering.",
        ErrorCode::PermanentRedirect => "Permanent omdirigering.",
        ErrorCode::PaymentRequired => "Betaling kreves.",
        ErrorCode::MethodNotAllowed => "Metode ikke tillatt.",
        ErrorCode::NotAcceptable => "Ikke akseptabelt.",
        ErrorCode::ProxyAuthRequired => "Proxy-autentisering kreves.",
        ErrorCode::RequestTimeout => "Forespørselen har tidsavbrudd.",
        ErrorCode::Gone => "Ressursen er fjernet.",
        ErrorCode::LengthRequired => "Content-Length kreves.",
        ErrorCode::PreconditionFailed => "Forutsetning feilet.",
        ErrorCode::ContentTooLarge => "Innholdet er for stort.",
        ErrorCode::UriTooLong => "URI er for lang.",
        ErrorCode::UnsupportedMediaType => "Medietype ikke støttet.",
        ErrorCode::RangeNotSatisfiable => "Område ikke tilfredsstillende.",
        ErrorCode::ExpectationFailed => "Forventning feilet.",
        ErrorCode::ImATeapot => "Jeg er en tekanne.",
        ErrorCode::MisdirectedRequest => "Feilrettet forespørsel.",
        ErrorCode::UnprocessableContent => "Kan ikke behandle innhold.",
        ErrorCode::Locked => "Ressursen er låst.",
        ErrorCode::FailedDependency => "Avhengighet feilet.",
        ErrorCode::TooEarly => "For tidlig.",
        ErrorCode::UpgradeRequired => "Oppgradering kreves.",
        ErrorCode::PreconditionRequired => "Forutsetning kreves.",
        ErrorCode::RequestHeaderFieldsTooLarge => "Forespørselens header-felt er for store.",
        ErrorCode::UnavailableForLegalReasons => "Utilgjengelig av juridiske årsaker.",
        ErrorCode::NotImplemented => "Ikke implementert.",
        ErrorCode::ServiceUnavailable => "Tjenesten er utilgjengelig.",
        ErrorCode::GatewayTimeout => "Gateway tidsavbrudd.",
        ErrorCode::HttpVersionNotSupported => "HTTP-versjon ikke støttet.",
        ErrorCode::VariantAlsoNegotiates => "Variant forhandler også.",
        ErrorCode::InsufficientStorage => "Utilstrekkelig lagringsplass.",
        ErrorCode::LoopDetected => "Sløyfe oppdaget.",
        ErrorCode::NotExtended => "Ikke utvidet.",
        ErrorCode::NetworkAuthenticationRequired => "Nettverksautentisering kreves.",
        ErrorCode::RequirePositiveInt => "Heltallet må være positivt.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_substitutes_field() {
        assert_eq!(human_message(ErrorCode::Required, &[&"email"]), "email is required.");
        assert_eq!(
            human_message_locale("nb", ErrorCode::Required, &[&"e-post"]),
            "e-post er påkrevd."
        );
    }

    #[test]
    fn norwegian_not_found_is_verbatim() {
        assert_eq!(
            human_message_locale("nb", "not_found", &[]),
            "Forespurt ressurs ble ikke funnet."
        );
        assert_ne!(
            human_message_locale("nb", "not_found", &[]),
            human_message_locale("en", "not_found", &[])
        );
    }

    #[test]
    fn unknown_locale_behaves_like_english() {
        for code in ErrorCode::all() {
            assert_eq!(
                human_message_locale("pl", *code, &[]),
                human_message_locale("en", *code, &[])
            );
            assert_eq!(
                human_message_locale("", *code, &[]),
                human_message_locale("en", *code, &[])
            );
        }
    }

    #[test]
    fn unknown_code_falls_back_to_locale_internal_entry() {
        assert_eq!(
            human_message_locale("en", "no_such_code", &[]),
            "Something went wrong on our side. Please try again."
        );
        assert_eq!(
            human_message_locale("nb", "no_such_code", &[]),
            "Noe gikk galt hos oss. Prøv igjen."
        );
    }

    #[test]
    fn no_args_leaves_placeholders() {
        assert_eq!(human_message(ErrorCode::Required, &[]), "%s is required.");
    }

    #[test]
    fn args_always_trigger_substitution() {
        // Templates without placeholders are unaffected by surplus args.
        assert_eq!(
            human_message(ErrorCode::NotFound, &[&"id"]),
            "The requested resource was not found."
        );
    }

    #[test]
    fn format_template_edge_cases() {
        assert_eq!(format_template("%s and %s", &[&"a"]), "a and %s");
        assert_eq!(format_template("100%% of %s", &[&"x"]), "100% of x");
        assert_eq!(format_template("%d items", &[&3]), "3 items");
        assert_eq!(format_template("trailing %", &[&"x"]), "trailing %");
        assert_eq!(format_template("%q stays", &[&"x"]), "%q stays");
    }

    #[test]
    fn every_code_has_entries_in_every_locale() {
        let catalog = MessageCatalog::global();
        assert_eq!(catalog.locales(), vec![Locale::En, Locale::Nb]);
        for locale in Locale::all() {
            for code in ErrorCode::all() {
                assert!(
                    !catalog.template(locale.as_str(), code.as_str()).is_empty(),
                    "empty template for {locale}/{code}"
                );
            }
        }
    }

    #[test]
    fn get_locale_picks_first_non_empty() {
        assert_eq!(get_locale(&[]), "en");
        assert_eq!(get_locale(&[""]), "en");
        assert_eq!(get_locale(&["nb"]), "nb");
        assert_eq!(get_locale(&["", "nb"]), "nb");
        assert_eq!(get_locale(&["de", "nb"]), "de");
    }

    #[test]
    fn locale_parsing() {
        assert_eq!(Locale::parse("nb"), Some(Locale::Nb));
        assert_eq!(Locale::parse("NB"), None);
        assert_eq!(Locale::from_tag("xx"), Locale::En);
        assert_eq!(Locale::default().as_str(), DEFAULT_LOCALE);
    }

    #[test]
    fn custom_message_hit() {
        let msg = CustomMessage::new("Hello", "Hei");
        assert_eq!(custom_human_message_locale("no", &msg), "Hei");
        assert_eq!(custom_human_message_locale("nb", &msg), "Hei");
        assert_eq!(custom_human_message_locale("en", &msg), "Hello");
    }

    #[test]
    fn custom_message_unknown_tag_defaults_to_english() {
        let msg = CustomMessage::new("Hello", "Hei");
        assert_eq!(custom_human_message_locale("pl", &msg), "Hello");
        assert_eq!(custom_human_message_locale("", &msg), "Hello");
    }
}
