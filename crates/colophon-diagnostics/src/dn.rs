//! X.500 distinguished names in RFC 4514 string form.
//!
//! Only what signer attribution needs is modelled: a DN is parsed into its
//! attribute type/value pairs in the order they are written, and the common
//! names can be pulled out of it.
//!
//! ```rust
//! use colophon_diagnostics::extract_common_names;
//!
//! let names = extract_common_names(r"CN=Smith\, Jane, O=Example, C=DE").unwrap();
//! assert_eq!(names, vec!["Smith, Jane".to_string()]);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{MalformedNameError, Result};

/// One `type=value` pair of a distinguished name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameComponent {
    /// The attribute type as written, e.g. `CN` or `2.5.4.3`.
    pub attribute_type: String,
    /// The unescaped value. `#`-prefixed BER values are kept verbatim.
    pub value: String,
}

impl NameComponent {
    /// Returns `true` if this component holds a common name.
    ///
    /// Attribute types compare case-insensitively; the numeric form
    /// `2.5.4.3` is also recognized.
    pub fn is_common_name(&self) -> bool {
        let ty = self.attribute_type.as_str();
        ty.eq_ignore_ascii_case("CN")
            || ty == "2.5.4.3"
            || ty.eq_ignore_ascii_case("OID.2.5.4.3")
    }
}

/// Parses a distinguished name into its components, in declaration order.
///
/// Multi-valued RDNs (`CN=a+UID=b`) contribute every pair. An empty string
/// is a valid DN with no components.
pub fn parse_distinguished_name(input: &str) -> Result<Vec<NameComponent>> {
    DnParser::new(input).parse()
}

/// Returns the common-name values of a distinguished name, in declaration order.
pub fn extract_common_names(input: &str) -> Result<Vec<String>> {
    Ok(parse_distinguished_name(input)?
        .into_iter()
        .filter(NameComponent::is_common_name)
        .map(|c| c.value)
        .collect())
}

/// Characters that may follow a backslash literally.
const ESCAPABLE: &[u8] = b",=+<>#;\\\" ";

struct DnParser<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> DnParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    fn error(&self, reason: &'static str) -> MalformedNameError {
        MalformedNameError::new(self.input, self.pos, reason)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_spaces(&mut self) {
        while self.peek() == Some(b' ') {
            self.pos += 1;
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn parse(mut self) -> Result<Vec<NameComponent>> {
        let mut components = Vec::new();

        self.skip_spaces();
        if self.at_end() {
            return Ok(components);
        }

        loop {
            components.push(self.attribute()?);
            self.skip_spaces();
            match self.peek() {
                None => return Ok(components),
                Some(b',' | b';' | b'+') => {
                    self.pos += 1;
                    self.skip_spaces();
                    if self.at_end() {
                        return Err(self.error("expected attribute after separator"));
                    }
                }
                Some(_) => return Err(self.error("expected ',', ';' or '+'")),
            }
        }
    }

    fn attribute(&mut self) -> Result<NameComponent> {
        self.skip_spaces();
        let attribute_type = self.attribute_type()?;
        self.skip_spaces();
        if self.peek() != Some(b'=') {
            return Err(self.error("expected '='"));
        }
        self.pos += 1;
        self.skip_spaces();

        let value = match self.peek() {
            Some(b'#') => self.hex_value()?,
            Some(b'"') => self.quoted_value()?,
            _ => self.string_value()?,
        };

        Ok(NameComponent {
            attribute_type,
            value,
        })
    }

    fn attribute_type(&mut self) -> Result<String> {
        let start = self.pos;
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() => {
                let oid_prefix = self.bytes[start..].len() > 4
                    && self.bytes[start..start + 4].eq_ignore_ascii_case(b"OID.")
                    && self.bytes[start + 4].is_ascii_digit();
                if oid_prefix {
                    self.pos += 4;
                    self.numeric_oid()?;
                } else {
                    while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == b'-')
                    {
                        self.pos += 1;
                    }
                }
            }
            Some(c) if c.is_ascii_digit() => self.numeric_oid()?,
            _ => return Err(self.error("expected attribute type")),
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn numeric_oid(&mut self) -> Result<()> {
        loop {
            if !matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                return Err(self.error("expected digit in numeric OID"));
            }
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.pos += 1;
            }
            if self.peek() != Some(b'.') {
                return Ok(());
            }
            self.pos += 1;
        }
    }

    /// `#` followed by hex pairs, kept as written.
    fn hex_value(&mut self) -> Result<String> {
        let start = self.pos;
        self.pos += 1;
        let digits = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_hexdigit()) {
            self.pos += 1;
        }
        let count = self.pos - digits;
        if count == 0 || count % 2 != 0 {
            return Err(self.error("expected hex pairs after '#'"));
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn quoted_value(&mut self) -> Result<String> {
        self.pos += 1;
        let mut buf = Vec::new();
        loop {
            match self.peek() {
                None => return Err(self.error("unterminated quoted value")),
                Some(b'"') => {
                    self.pos += 1;
                    break;
                }
                Some(b'\\') => self.escape(&mut buf)?,
                Some(c) => {
                    buf.push(c);
                    self.pos += 1;
                }
            }
        }
        self.decode(buf)
    }

    fn string_value(&mut self) -> Result<String> {
        let mut buf = Vec::new();
        // Unescaped trailing spaces are not part of the value.
        let mut keep = 0;
        loop {
            match self.peek() {
                None | Some(b',' | b';' | b'+') => break,
                Some(b'\\') => {
                    self.escape(&mut buf)?;
                    keep = buf.len();
                }
                Some(c) => {
                    buf.push(c);
                    self.pos += 1;
                    if c != b' ' {
                        keep = buf.len();
                    }
                }
            }
        }
        buf.truncate(keep);
        self.decode(buf)
    }

    /// Consumes a backslash escape, appending the byte it stands for.
    fn escape(&mut self, buf: &mut Vec<u8>) -> Result<()> {
        self.pos += 1;
        match self.peek() {
            Some(c) if ESCAPABLE.contains(&c) => {
                buf.push(c);
                self.pos += 1;
                Ok(())
            }
            Some(hi) if hi.is_ascii_hexdigit() => {
                let lo = self
                    .bytes
                    .get(self.pos + 1)
                    .copied()
                    .filter(u8::is_ascii_hexdigit)
                    .ok_or_else(|| self.error("expected two hex digits after '\\'"))?;
                buf.push(hex_nibble(hi) << 4 | hex_nibble(lo));
                self.pos += 2;
                Ok(())
            }
            _ => Err(self.error("invalid escape sequence")),
        }
    }

    fn decode(&self, buf: Vec<u8>) -> Result<String> {
        String::from_utf8(buf).map_err(|_| self.error("escaped bytes are not valid UTF-8"))
    }
}

fn hex_nibble(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        _ => c - b'A' + 10,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn escape(value: &str) -> String {
        let mut out = String::new();
        for c in value.chars() {
            if c.is_ascii() && ESCAPABLE.contains(&(c as u8)) {
                out.push('\\');
            }
            out.push(c);
        }
        out
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn escaped_values_round_trip(
            values in prop::collection::vec("[a-zA-Z0-9 ,=+<>#;\"\\\\äß]{0,12}", 1..5)
        ) {
            let dn = values
                .iter()
                .map(|v| format!("CN={}", escape(v)))
                .collect::<Vec<_>>()
                .join(",");
            prop_assert_eq!(extract_common_names(&dn).unwrap(), values);
        }

        #[test]
        fn never_panics(input in "[ -~äé]{0,40}") {
            let _ = parse_distinguished_name(&input);
        }
    }
}
