//! Cookie parsing and `Set-Cookie` directives.

use axum::http::{header, header::InvalidHeaderValue, HeaderMap, HeaderValue};

/// Expiry attached to invalidating directives.
pub const EXPIRED: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// One `Set-Cookie` header to emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieDirective {
    /// `name=value`
    Set { name: String, value: String },
    /// Empty value with an expiry in the past.
    Invalidate { name: String },
}

impl CookieDirective {
    /// One `Set` per pair, in the order given.
    pub fn set_all(pairs: impl IntoIterator<Item = (String, String)>) -> Vec<Self> {
        let mut directives = Vec::new();
        for (name, value) in pairs {
            directives.push(Self::Set { name, value });
        }
        directives
    }

    /// One `Invalidate` per key, in the order given. Values are ignored.
    pub fn invalidate_all(pairs: impl IntoIterator<Item = (String, String)>) -> Vec<Self> {
        let mut directives = Vec::new();
        for (name, _) in pairs {
            directives.push(Self::Invalidate { name });
        }
        directives
    }

    /// Render the directive as a `Set-Cookie` line.
    ///
    /// Values made only of cookie-octets are written bare; anything else is
    /// written as a quoted-string with `"` and `\` backslash-escaped.
    pub fn render(&self) -> String {
        match self {
            Self::Set { name, value } => format!("{}={}", escape_name(name), quote_value(value)),
            Self::Invalidate { name } => {
                format!("{}=; Max-Age=0; Expires={}", escape_name(name), EXPIRED)
            }
        }
    }

    /// Control bytes in a value cannot be carried in a header and are rejected.
    pub fn header_value(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        HeaderValue::from_bytes(self.render().as_bytes())
    }
}

/// Percent-encode name bytes outside the token set.
fn escape_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if is_token(byte) {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

fn quote_value(raw: &str) -> String {
    if raw.bytes().all(is_cookie_octet) {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    for c in raw.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// RFC 6265 `cookie-octet`.
fn is_cookie_octet(b: u8) -> bool {
    matches!(b, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E)
}

/// RFC 7230 `tchar`.
fn is_token(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

/// All `name=value` pairs from every `Cookie` header, in order.
///
/// A pair without `=` is a cookie with an empty value. Quoted values are
/// unquoted and unescaped; a `;` inside quotes does not end the pair.
pub fn request_cookies(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .flat_map(|value| {
            split_pairs(&String::from_utf8_lossy(value.as_bytes()))
                .into_iter()
                .map(|pair| parse_pair(&pair))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Split on `;` outside quoted-strings, dropping empty pieces.
fn split_pairs(raw: &str) -> Vec<String> {
    let mut pairs = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut escaped = false;

    for c in raw.chars() {
        match c {
            _ if escaped => escaped = false,
            '\\' if quoted => escaped = true,
            '"' => quoted = !quoted,
            ';' if !quoted => {
                pairs.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    pairs.push(current);

    pairs
        .into_iter()
        .map(|pair| pair.trim().to_string())
        .filter(|pair| !pair.is_empty())
        .collect()
}

fn parse_pair(pair: &str) -> (String, String) {
    let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
    let value = value.trim();
    let value = match value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        Some(inner) => unescape(inner),
        None => value.to_string(),
    };
    (name.trim().to_string(), value)
}

fn unescape(quoted: &str) -> String {
    let mut out = String::with_capacity(quoted.len());
    let mut chars = quoted.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.extend(chars.next()),
            _ => out.push(c),
        }
    }
    out
}
