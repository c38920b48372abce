//! uri operations
use crate::error::ParseErr;
use std::{fmt, str};

const HTTP_PORT: u16 = 80;
const HTTPS_PORT: u16 = 443;

///Representation of Uniform Resource Identifier
///
///# Example
///```
///use fetch_status::uri::Uri;
///
///let uri: Uri = "http://example.com:8080/index.html?lang=en".parse().unwrap();
///assert_eq!(uri.host(), Some("example.com"));
///assert_eq!(uri.resource(), "/index.html?lang=en");
///```
#[derive(Clone, Debug, PartialEq)]
pub struct Uri {
    scheme: String,
    authority: Option<Authority>,
    path: Option<String>,
    query: Option<String>,
    fragment: Option<String>,
}

impl Uri {
    ///Returns scheme of this `Uri`.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    ///Returns host of this `Uri`.
    pub fn host(&self) -> Option<&str> {
        self.authority.as_ref().and_then(|a| a.host())
    }

    ///Returns port of this `Uri`, if it was set explicitly.
    pub fn port(&self) -> Option<u16> {
        self.authority.as_ref().and_then(|a| a.port())
    }

    ///Returns port corresponding to this `Uri`.
    ///Returns default port for the scheme if it hasn't been set in the uri.
    pub fn corr_port(&self) -> u16 {
        self.port().unwrap_or_else(|| self.default_port())
    }

    fn default_port(&self) -> u16 {
        match self.scheme() {
            "https" => HTTPS_PORT,
            _ => HTTP_PORT,
        }
    }

    ///Returns host of this `Uri` to use in a header.
    ///Port is appended only when it differs from the scheme's default one.
    pub fn host_header(&self) -> Option<String> {
        let host = self.authority.as_ref()?.host_display()?;

        match self.port() {
            Some(p) if p != self.default_port() => Some(format!("{}:{}", host, p)),
            _ => Some(host),
        }
    }

    ///Returns path of this `Uri`.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    ///Returns query of this `Uri`.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    ///Returns fragment of this `Uri`.
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    ///Returns resource `Uri` points to, as it appears in a request line.
    ///Fragment is never sent to the server.
    pub fn resource(&self) -> String {
        let mut resource = self.path().unwrap_or("/").to_string();

        if let Some(q) = self.query() {
            resource.push('?');
            resource.push_str(q);
        }

        resource
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:", self.scheme)?;

        if let Some(a) = &self.authority {
            write!(f, "//{}", a)?;
        }
        if let Some(p) = &self.path {
            write!(f, "{}", p)?;
        }
        if let Some(q) = &self.query {
            write!(f, "?{}", q)?;
        }
        if let Some(fr) = &self.fragment {
            write!(f, "#{}", fr)?;
        }

        Ok(())
    }
}

impl str::FromStr for Uri {
    type Err = ParseErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s: String = s.chars().filter(|c| !c.is_whitespace()).collect();

        let (scheme, rest) = match s.split_once(':') {
            Some((scheme, rest)) if !scheme.is_empty() => (scheme, rest),
            _ => return Err(ParseErr::Empty),
        };

        if !scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        {
            return Err(ParseErr::UriErr);
        }

        let (rest, fragment) = split_off(rest, '#');
        let (rest, query) = split_off(rest, '?');

        let (authority, path) = match rest.strip_prefix("//") {
            Some(r) => {
                let (auth, path) = match r.find('/') {
                    Some(i) => r.split_at(i),
                    None => (r, ""),
                };

                (Some(auth.parse::<Authority>()?), path)
            }
            None => (None, rest),
        };

        Ok(Uri {
            scheme: scheme.to_ascii_lowercase(),
            authority,
            path: non_empty(path),
            query,
            fragment,
        })
    }
}

///Authority of Uri. User information, if present, is dropped while parsing.
///
///# Example
///```
///use fetch_status::uri::Authority;
///
///let auth: Authority = "user:info@foo.com:443".parse().unwrap();
///assert_eq!(auth.host(), Some("foo.com"));
///assert_eq!(auth.port(), Some(443));
///```
#[derive(Clone, Debug, PartialEq)]
pub struct Authority {
    host: Option<String>,
    port: Option<u16>,
}

impl Authority {
    ///Returns host of this `Authority`. IPv6 addresses are returned without brackets.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    ///Returns port of this `Authority`
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    fn host_display(&self) -> Option<String> {
        self.host().map(|h| {
            if h.contains(':') {
                format!("[{}]", h)
            } else {
                h.to_string()
            }
        })
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(h) = self.host_display() {
            write!(f, "{}", h)?;
        }
        if let Some(p) = self.port {
            write!(f, ":{}", p)?;
        }

        Ok(())
    }
}

impl str::FromStr for Authority {
    type Err = ParseErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = match s.rfind('@') {
            Some(i) => &s[i + 1..],
            None => s,
        };

        let (host, port) = match s.strip_prefix('[') {
            Some(rest) => {
                let end = rest.find(']').ok_or(ParseErr::UriErr)?;
                let port = match &rest[end + 1..] {
                    "" => None,
                    p => Some(p.strip_prefix(':').ok_or(ParseErr::UriErr)?),
                };

                (&rest[..end], port)
            }
            None => match s.rsplit_once(':') {
                Some((h, p)) => (h, Some(p)),
                None => (s, None),
            },
        };

        let port = match port {
            Some(p) if !p.is_empty() => Some(p.parse()?),
            _ => None,
        };

        Ok(Authority {
            host: non_empty(host),
            port,
        })
    }
}

//Splits `s` at the first `separator`. Returns part before it and `Some` with the rest,
//or whole `s` and `None` if the separator was not found.
fn split_off(s: &str, separator: char) -> (&str, Option<String>) {
    match s.split_once(separator) {
        Some((head, tail)) => (head, Some(tail.to_string())),
        None => (s, None),
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
