// src/core/net.rs
// HTTP/1.0 form POST over TCP (std-only), behind the `Transport` seam.
// HTTP/1.0 so the server closes the connection at the end (no chunked transfer).

use std::{
    collections::BTreeMap,
    io::{Read, Write},
    net::TcpStream,
    time::Duration,
};

use crate::config::consts::{HOST, NET_TIMEOUT_SECS, PORT, PREFIX, USER_AGENT};
use crate::error::{OracleError, Result};

/// Form field name → values (a name may repeat, e.g. `search_sel_10[]`).
pub type FormFields = BTreeMap<String, Vec<String>>;

/// Build form fields from `(name, value)` pairs; repeated names accumulate.
pub fn form<K, V, I>(pairs: I) -> FormFields
where
    K: Into<String>,
    V: Into<String>,
    I: IntoIterator<Item = (K, V)>,
{
    let mut out = FormFields::new();
    for (k, v) in pairs {
        out.entry(k.into()).or_default().push(v.into());
    }
    out
}

/// Something that can submit a form to an endpoint and hand back the body.
///
/// The remote site is the only implementation in production; tests swap in
/// canned pages. Must be shareable across resolver workers.
pub trait Transport: Send + Sync {
    fn fetch_page(&self, endpoint: &str, form: &FormFields) -> Result<String>;
}

/// Plain-HTTP transport for the Oracle site.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    pub host: String,
    pub port: u16,
    pub prefix: String,
    pub timeout: Duration,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self {
            host: s!(HOST),
            port: PORT,
            prefix: s!(PREFIX),
            timeout: Duration::from_secs(NET_TIMEOUT_SECS),
        }
    }
}

impl Transport for HttpTransport {
    fn fetch_page(&self, endpoint: &str, form: &FormFields) -> Result<String> {
        let path = join!(&self.prefix, endpoint);
        self.http_post_form(&path, &encode_form(form))
    }
}

impl HttpTransport {
    fn http_post_form(&self, path: &str, body: &str) -> Result<String> {
        let net_err = |e: std::io::Error| {
            OracleError::transport(format!("{}{}: {}", self.host, path, e))
        };

        let mut s = TcpStream::connect((self.host.as_str(), self.port)).map_err(net_err)?;
        s.set_read_timeout(Some(self.timeout)).map_err(net_err)?;
        s.set_write_timeout(Some(self.timeout)).map_err(net_err)?;

        let req = format!(
            "POST {} HTTP/1.0\r\nHost: {}\r\nUser-Agent: {}\r\n\
             Content-Type: application/x-www-form-urlencoded\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n{}",
            path,
            self.host,
            USER_AGENT,
            body.len(),
            body
        );
        s.write_all(req.as_bytes()).map_err(net_err)?;
        s.flush().map_err(net_err)?;

        let mut buf = Vec::new();
        s.read_to_end(&mut buf).map_err(net_err)?;
        let resp = String::from_utf8_lossy(&buf);

        split_response(&resp)
            .map(str::to_string)
            .map_err(|msg| OracleError::transport(format!("{msg} ({}{})", self.host, path)))
    }
}

/// Check the status line and return the body after the header block.
fn split_response(resp: &str) -> std::result::Result<&str, String> {
    let status = resp.split("\r\n").next().unwrap_or("");
    let code = status.split_whitespace().nth(1).unwrap_or("");
    if code != "200" {
        return Err(format!("HTTP error: {status}"));
    }
    let body_idx = resp.find("\r\n\r\n").ok_or_else(|| s!("Malformed HTTP response"))? + 4;
    Ok(&resp[body_idx..])
}

/// `application/x-www-form-urlencoded` body, fields in key order.
pub fn encode_form(form: &FormFields) -> String {
    let mut out = s!();
    for (key, values) in form {
        for v in values {
            if !out.is_empty() {
                out.push('&');
            }
            out.push_str(&url_encode(key));
            out.push('=');
            out.push_str(&url_encode(v));
        }
    }
    out
}

fn url_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_body_escapes_reserved_bytes() {
        let f = form([("search_sel_10[]", "Ivory Edition"), ("page", "2")]);
        assert_eq!(encode_form(&f), "page=2&search_sel_10%5B%5D=Ivory+Edition");
    }

    #[test]
    fn repeated_names_keep_every_value() {
        let f = form([("k", "a"), ("k", "b&c")]);
        assert_eq!(encode_form(&f), "k=a&k=b%26c");
    }

    #[test]
    fn utf8_is_percent_encoded_per_byte() {
        assert_eq!(url_encode("•"), "%E2%80%A2");
    }

    #[test]
    fn response_split_requires_200() {
        let ok = "HTTP/1.1 200 OK\r\nX: y\r\n\r\n<html>";
        assert_eq!(split_response(ok).unwrap(), "<html>");

        let not_found = "HTTP/1.1 404 Not Found\r\n\r\n";
        assert!(split_response(not_found).unwrap_err().contains("404"));

        let cut = "HTTP/1.0 200 OK\r\nX: y";
        assert!(split_response(cut).is_err());
    }
}
