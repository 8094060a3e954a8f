//! Mapping string parsing.
//!
//! A mapping is what a plain-file entry holds: `PORT`, `HOST:PORT`, or
//! `[IPv6]:PORT`. A bare port or an empty host means loopback.

use std::fmt;
use std::str::FromStr;

use super::error::MappingError;

/// Host used when a mapping omits one.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// A parsed, validated mapping.
///
/// Derived from an entry's raw string on demand and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    /// Host name or IP literal (IPv6 without brackets).
    pub host: String,
    /// Port in 1..=65535.
    pub port: u16,
    /// The trimmed input the mapping was parsed from.
    pub raw: String,
}

impl Mapping {
    /// Parse a mapping string.
    pub fn parse(input: &str) -> Result<Self, MappingError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(MappingError::Empty);
        }

        // A pure integer is a bare port, even when out of range.
        if let Ok(n) = s.parse::<i64>() {
            let port = port_in_range(n).ok_or_else(|| MappingError::InvalidPort(n.to_string()))?;
            return Ok(Self {
                host: DEFAULT_HOST.to_string(),
                port,
                raw: s.to_string(),
            });
        }

        let (host, port_str) = split_host_port(s)?;
        let port = port_str
            .parse::<i64>()
            .ok()
            .and_then(port_in_range)
            .ok_or_else(|| MappingError::InvalidPort(port_str.to_string()))?;
        let host = if host.is_empty() { DEFAULT_HOST } else { host };

        Ok(Self {
            host: host.to_string(),
            port,
            raw: s.to_string(),
        })
    }

    /// Address pair suitable for `ToSocketAddrs`.
    #[must_use]
    pub fn addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

impl FromStr for Mapping {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// Convenience wrapper around [`Mapping::parse`].
pub fn parse_mapping(input: &str) -> Result<Mapping, MappingError> {
    Mapping::parse(input)
}

fn port_in_range(n: i64) -> Option<u16> {
    u16::try_from(n).ok().filter(|p| *p >= 1)
}

/// Split `host:port` or `[host]:port`. The host may come back empty.
fn split_host_port(s: &str) -> Result<(&str, &str), MappingError> {
    let malformed = |reason| MappingError::Malformed {
        input: s.to_string(),
        reason,
    };

    if let Some(rest) = s.strip_prefix('[') {
        let close = rest.find(']').ok_or_else(|| malformed("missing ']'"))?;
        let host = &rest[..close];
        let after = &rest[close + 1..];
        let port = match after.strip_prefix(':') {
            Some(port) => port,
            None if after.is_empty() => return Err(malformed("missing port")),
            None => return Err(malformed("unexpected text after ']'")),
        };
        if host.contains('[') || host.contains(']') || port.contains(['[', ']']) {
            return Err(malformed("unexpected bracket"));
        }
        return Ok((host, port));
    }

    let colon = s.rfind(':').ok_or_else(|| malformed("missing port"))?;
    let (host, port) = (&s[..colon], &s[colon + 1..]);
    if host.contains(':') {
        return Err(malformed("too many colons"));
    }
    if s.contains(['[', ']']) {
        return Err(malformed("unexpected bracket"));
    }
    Ok((host, port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_port_defaults_to_loopback() {
        for p in 1..=u16::MAX {
            let m = parse_mapping(&p.to_string()).unwrap();
            assert_eq!(m.host, DEFAULT_HOST);
            assert_eq!(m.port, p);
            assert_eq!(m.raw, p.to_string());
        }
    }

    #[test]
    fn test_bare_port_out_of_range() {
        for s in ["0", "65536", "-1", "100000"] {
            assert!(
                matches!(parse_mapping(s), Err(MappingError::InvalidPort(_))),
                "{s} should be rejected"
            );
        }
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(parse_mapping(""), Err(MappingError::Empty));
        assert_eq!(parse_mapping("   \n"), Err(MappingError::Empty));
    }

    #[test]
    fn test_host_port_forms() {
        let m = parse_mapping("localhost:3000").unwrap();
        assert_eq!((m.host.as_str(), m.port), ("localhost", 3000));

        let m = parse_mapping("  127.0.0.1:8080 ").unwrap();
        assert_eq!((m.host.as_str(), m.port), ("127.0.0.1", 8080));
        assert_eq!(m.raw, "127.0.0.1:8080");

        let m = parse_mapping("[::1]:4000").unwrap();
        assert_eq!((m.host.as_str(), m.port), ("::1", 4000));
        assert_eq!(m.to_string(), "[::1]:4000");
    }

    #[test]
    fn test_empty_host_defaults() {
        let m = parse_mapping(":5000").unwrap();
        assert_eq!(m.host, DEFAULT_HOST);
        assert_eq!(m.port, 5000);
    }

    #[test]
    fn test_malformed_rejected() {
        for s in [
            "localhost",
            "localhost:",
            "localhost:abc",
            "host:0",
            "host:65536",
            "::1:3000",
            "[::1]",
            "[::1:3000",
            "[::1]x:3000",
        ] {
            assert!(parse_mapping(s).is_err(), "{s} should be rejected");
        }
    }

    #[test]
    fn test_from_str() {
        let m: Mapping = "example.test:9000".parse().unwrap();
        assert_eq!(m.addr(), ("example.test", 9000));
    }
}
