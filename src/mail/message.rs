use anyhow::{Result, bail};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

/// A single header field. Name case is preserved as parsed; lookups
/// compare case-insensitively.
#[derive(Debug, Clone)]
pub struct Header {
    pub name: String,
    pub value: String,
}

/// An email message: an ordered header sequence plus an opaque body.
///
/// Headers keep their parsed order; removals delete in place and new
/// headers are appended at the end. The body is carried verbatim and
/// written back untouched.
#[derive(Debug, Clone)]
pub struct Message {
    headers: Vec<Header>,
    body: String,
}

impl Message {
    /// Parse a raw message into headers and body.
    ///
    /// Lenient where it can be (folded continuation lines, missing body,
    /// CRLF or LF line endings), but a header line with no colon is a
    /// hard error.
    pub fn parse(raw: &str) -> Result<Message> {
        let mut headers: Vec<Header> = Vec::new();
        let mut body = "";

        let mut offset = 0;
        while offset < raw.len() {
            let line_end = raw[offset..]
                .find('\n')
                .map(|i| offset + i + 1)
                .unwrap_or(raw.len());
            let line = raw[offset..line_end].trim_end_matches(['\r', '\n']);

            if line.is_empty() {
                // Blank line ends the header block; the rest is the body.
                body = &raw[line_end..];
                break;
            }

            if line.starts_with([' ', '\t']) {
                // Folded continuation of the previous header. Keep the
                // leading whitespace so serialization re-folds as-is.
                match headers.last_mut() {
                    Some(header) => {
                        header.value.push('\n');
                        header.value.push_str(line);
                    }
                    None => bail!("continuation line before any header"),
                }
            } else if let Some((name, value)) = line.split_once(':') {
                headers.push(Header {
                    name: name.to_string(),
                    value: value.trim_start().to_string(),
                });
            } else {
                bail!("malformed header line: {line:?}");
            }

            offset = line_end;
        }

        Ok(Message {
            headers,
            body: body.to_string(),
        })
    }

    /// First value for `name`, unfolded into a single line. Comparison is
    /// case-insensitive.
    pub fn get(&self, name: &str) -> Option<String> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.replace('\n', ""))
    }

    /// Append a header at the end of the sequence. Existing headers with
    /// the same name are left in place.
    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers.push(Header {
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    /// Remove every header named `name` (case-insensitive). Does nothing
    /// when none match.
    pub fn remove_header(&mut self, name: &str) {
        self.headers.retain(|h| !h.name.eq_ignore_ascii_case(name));
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for header in &self.headers {
            writeln!(f, "{}: {}", header.name, encode_value(&header.value))?;
        }
        writeln!(f)?;
        write!(f, "{}", self.body)
    }
}

/// Render a header value for the wire. ASCII-safe values pass through
/// untouched (never re-encoded); anything else becomes a single RFC 2047
/// UTF-8 B encoded-word.
fn encode_value(value: &str) -> String {
    if value.is_ascii() {
        return value.to_string();
    }
    let unfolded = value.replace('\n', "");
    format!("=?utf-8?B?{}?=", BASE64.encode(unfolded.as_bytes()))
}
