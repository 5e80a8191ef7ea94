//! `printf`-style output filename patterns such as `cap-%06d.png`.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::CaptureError;

/// A filename template with exactly one integer placeholder.
///
/// The placeholder is `%d`, optionally with a field width (`%6d`) and a zero
/// flag (`%06d`). `%%` is a literal percent sign.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPattern {
    source: String,
    prefix: String,
    suffix: String,
    width: usize,
    zero_pad: bool,
}

impl OutputPattern {
    pub fn parse(pattern: &str) -> Result<Self, CaptureError> {
        let invalid = |why: &str| CaptureError::Pattern(format!("{pattern:?}: {why}"));

        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut placeholder: Option<(usize, bool)> = None;
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            let out = if placeholder.is_some() {
                &mut suffix
            } else {
                &mut prefix
            };
            if c != '%' {
                out.push(c);
                continue;
            }
            if chars.peek() == Some(&'%') {
                chars.next();
                out.push('%');
                continue;
            }
            if placeholder.is_some() {
                return Err(invalid("more than one placeholder"));
            }

            let zero_pad = chars.next_if_eq(&'0').is_some();
            let mut digits = String::new();
            while let Some(d) = chars.next_if(char::is_ascii_digit) {
                digits.push(d);
            }
            if chars.next() != Some('d') {
                return Err(invalid("only %d placeholders are supported"));
            }
            let width = if digits.is_empty() {
                0
            } else {
                digits.parse().map_err(|_| invalid("field width out of range"))?
            };
            placeholder = Some((width, zero_pad));
        }

        let (width, zero_pad) = placeholder.ok_or_else(|| invalid("missing %d placeholder"))?;
        Ok(Self {
            source: pattern.to_owned(),
            prefix,
            suffix,
            width,
            zero_pad,
        })
    }

    /// Substitute `index` into the placeholder.
    pub fn render(&self, index: u64) -> PathBuf {
        let number = if self.zero_pad {
            format!("{index:0width$}", width = self.width)
        } else {
            format!("{index:width$}", width = self.width)
        };
        PathBuf::from(format!("{}{number}{}", self.prefix, self.suffix))
    }
}

impl Default for OutputPattern {
    fn default() -> Self {
        Self {
            source: "cap-%06d.png".into(),
            prefix: "cap-".into(),
            suffix: ".png".into(),
            width: 6,
            zero_pad: true,
        }
    }
}

impl FromStr for OutputPattern {
    type Err = CaptureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for OutputPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
