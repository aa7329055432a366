//! Output options given as `key=value[,key=value...]`.

use crate::error::*;

/// An ordered list of output options.
///
/// Options are only parsed here; each output format decides which keys it
/// understands and rejects everything else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputOptions {
    options: Vec<(String, Option<String>)>,
}

impl OutputOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma separated option list. Empty items are ignored.
    pub fn parse(s: &str) -> Self {
        Self::from_items(s.split(','))
    }

    /// Parse individual `key=value` items.
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a str>) -> Self {
        let options = items
            .into_iter()
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| match item.split_once('=') {
                Some((key, value)) => (key.trim().to_string(), Some(value.trim().to_string())),
                None => (item.to_string(), None),
            })
            .collect();
        Self { options }
    }

    /// Split an output specification such as `edk2,filesize=512` into the
    /// format name and its options.
    pub fn split_spec(spec: &str) -> (&str, Self) {
        let mut items = spec.split(',');
        let format = items.next().unwrap_or_default().trim();
        (format, Self::from_items(items))
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.options.push((key.into(), Some(value.into())));
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.options
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Fail with `OptionsNotSupported` if any option was given.
    pub fn expect_none(&self, format: &'static str) -> Result<(), UVError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(UVError::OptionsNotSupported(format))
        }
    }
}

/// Return the value of an option that requires one.
pub(crate) fn required_value<'a>(key: &str, value: Option<&'a str>) -> Result<&'a str, UVError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(UVError::InvalidOption {
            key: key.to_string(),
            reason: "requires a value".to_string(),
        }),
    }
}
