//! Helper filters available to every template, path, condition and default.

use chrono::{DateTime, FixedOffset};
use cruet::Inflector;
use minijinja::{Environment, Error, ErrorKind, Value};
use regex::Regex;
use std::fmt::Write;

const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Registers the helper filters on `env`.
pub fn register(env: &mut Environment<'static>) {
    env.add_filter("camel_case", camel_case);
    env.add_filter("pascal_case", pascal_case);
    env.add_filter("snake_case", snake_case);
    env.add_filter("kebab_case", kebab_case);
    env.add_filter("screaming_snake_case", screaming_snake_case);
    env.add_filter("train_case", train_case);
    env.add_filter("title_case", title_case);
    env.add_filter("sentence_case", sentence_case);
    env.add_filter("plural", plural);
    env.add_filter("singular", singular);
    env.add_filter("trim_prefix", trim_prefix);
    env.add_filter("trim_suffix", trim_suffix);
    env.add_filter("regex_replace", regex_replace);
    env.add_filter("regex_match", regex_match);
    env.add_filter("quote", quote);
    env.add_filter("ceil", ceil);
    env.add_filter("floor", floor);
    env.add_filter("max_of", max_of);
    env.add_filter("min_of", min_of);
    env.add_filter("date", date);
}

pub fn camel_case(value: String) -> String {
    value.to_camel_case()
}

pub fn pascal_case(value: String) -> String {
    value.to_pascal_case()
}

pub fn snake_case(value: String) -> String {
    value.to_snake_case()
}

pub fn kebab_case(value: String) -> String {
    value.to_kebab_case()
}

pub fn screaming_snake_case(value: String) -> String {
    value.to_screaming_snake_case()
}

pub fn train_case(value: String) -> String {
    value.to_train_case()
}

pub fn title_case(value: String) -> String {
    value.to_title_case()
}

pub fn sentence_case(value: String) -> String {
    value.to_sentence_case()
}

pub fn plural(value: String) -> String {
    value.to_plural()
}

pub fn singular(value: String) -> String {
    value.to_singular()
}

pub fn trim_prefix(value: String, prefix: String) -> String {
    value.strip_prefix(prefix.as_str()).map(str::to_string).unwrap_or(value)
}

pub fn trim_suffix(value: String, suffix: String) -> String {
    value.strip_suffix(suffix.as_str()).map(str::to_string).unwrap_or(value)
}

fn compile(pattern: &str) -> Result<Regex, Error> {
    Regex::new(pattern).map_err(|e| {
        Error::new(ErrorKind::InvalidOperation, format!("invalid regex '{pattern}': {e}"))
    })
}

pub fn regex_replace(value: String, pattern: String, replacement: String) -> Result<String, Error> {
    Ok(compile(&pattern)?.replace_all(&value, replacement.as_str()).into_owned())
}

pub fn regex_match(value: String, pattern: String) -> Result<bool, Error> {
    Ok(compile(&pattern)?.is_match(&value))
}

pub fn quote(value: String) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

pub fn ceil(value: f64) -> f64 {
    value.ceil()
}

pub fn floor(value: f64) -> f64 {
    value.floor()
}

pub fn max_of(value: Value, other: Value) -> Value {
    if other > value {
        other
    } else {
        value
    }
}

pub fn min_of(value: Value, other: Value) -> Value {
    if other < value {
        other
    } else {
        value
    }
}

fn parse_timestamp(value: &Value) -> Result<DateTime<FixedOffset>, Error> {
    if let Some(text) = value.as_str() {
        return DateTime::parse_from_rfc3339(text).map_err(|e| {
            Error::new(ErrorKind::InvalidOperation, format!("invalid date '{text}': {e}"))
        });
    }
    let seconds = i64::try_from(value.clone())?;
    DateTime::from_timestamp(seconds, 0)
        .map(|utc| utc.fixed_offset())
        .ok_or_else(|| {
            Error::new(ErrorKind::InvalidOperation, format!("timestamp {seconds} out of range"))
        })
}

/// Formats a unix timestamp in seconds (UTC) or an RFC 3339 string (its own offset)
/// with a strftime `format`, `%Y-%m-%d` by default. The current time is never consulted.
pub fn date(value: Value, format: Option<String>) -> Result<String, Error> {
    let timestamp = parse_timestamp(&value)?;
    let format = format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT);

    let mut out = String::new();
    write!(out, "{}", timestamp.format(format)).map_err(|_| {
        Error::new(ErrorKind::InvalidOperation, format!("invalid date format '{format}'"))
    })?;
    Ok(out)
}
