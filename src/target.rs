//! Target parsing and normalization.
//!
//! A target is a bare hostname or `host:port`; the port defaults to 443 when
//! absent. Bracketed IPv6 literals (`[::1]`, `[::1]:8443`) are accepted, and
//! an unbracketed IPv6 literal is treated as a host with the default port.

use std::fmt;
use std::str::FromStr;

use crate::config::DEFAULT_TLS_PORT;
use crate::error_handling::InspectError;

/// A normalized connection target: hostname (or IP literal) plus port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Hostname or IP literal, without brackets.
    pub host: String,
    /// TCP port, 443 unless the target carried an explicit one.
    pub port: u16,
}

impl Target {
    /// Parses `host` or `host:port` into a normalized target.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError::InvalidTargetError`] when the host part is
    /// empty, the brackets of an IPv6 literal are malformed, or the port
    /// part is not a valid non-zero port number.
    pub fn parse(s: &str) -> Result<Self, InspectError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(InspectError::InvalidTargetError(
                "target is required".to_string(),
            ));
        }

        // Bracketed IPv6: `[::1]` or `[::1]:8443`.
        if let Some(rest) = s.strip_prefix('[') {
            let Some((host, suffix)) = rest.split_once(']') else {
                return Err(InspectError::InvalidTargetError(format!(
                    "unclosed bracket in {s:?}"
                )));
            };
            if host.is_empty() {
                return Err(InspectError::InvalidTargetError(format!(
                    "empty host in {s:?}"
                )));
            }
            return match suffix.strip_prefix(':') {
                Some(port) => Ok(Self {
                    host: host.to_string(),
                    port: parse_port(port, s)?,
                }),
                None if suffix.is_empty() => Ok(Self {
                    host: host.to_string(),
                    port: DEFAULT_TLS_PORT,
                }),
                None => Err(InspectError::InvalidTargetError(format!(
                    "unexpected characters after ']' in {s:?}"
                ))),
            };
        }

        match s.split_once(':') {
            // Two or more colons without brackets: an IPv6 literal, no port.
            Some((_, rest)) if rest.contains(':') => Ok(Self {
                host: s.to_string(),
                port: DEFAULT_TLS_PORT,
            }),
            Some((host, port)) => {
                if host.is_empty() {
                    return Err(InspectError::InvalidTargetError(format!(
                        "empty host in {s:?}"
                    )));
                }
                Ok(Self {
                    host: host.to_string(),
                    port: parse_port(port, s)?,
                })
            }
            None => Ok(Self {
                host: s.to_string(),
                port: DEFAULT_TLS_PORT,
            }),
        }
    }
}

fn parse_port(port: &str, target: &str) -> Result<u16, InspectError> {
    match port.parse::<u16>() {
        Ok(0) | Err(_) => Err(InspectError::InvalidTargetError(format!(
            "invalid port in {target:?}"
        ))),
        Ok(port) => Ok(port),
    }
}

impl FromStr for Target {
    type Err = InspectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Target::parse(s)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_hostname_gets_default_port() {
        let target = Target::parse("github.com").unwrap();
        assert_eq!(target.host, "github.com");
        assert_eq!(target.port, 443);
    }

    #[test]
    fn test_explicit_port_is_kept() {
        let target = Target::parse("github.com:8443").unwrap();
        assert_eq!(target.host, "github.com");
        assert_eq!(target.port, 8443);
    }

    #[test]
    fn test_ipv4_literal_with_port() {
        let target = Target::parse("127.0.0.1:8443").unwrap();
        assert_eq!(target.host, "127.0.0.1");
        assert_eq!(target.port, 8443);
    }

    #[test]
    fn test_bracketed_ipv6() {
        let target = Target::parse("[::1]").unwrap();
        assert_eq!(target.host, "::1");
        assert_eq!(target.port, 443);

        let target = Target::parse("[::1]:8443").unwrap();
        assert_eq!(target.host, "::1");
        assert_eq!(target.port, 8443);
    }

    #[test]
    fn test_unbracketed_ipv6_is_host_only() {
        let target = Target::parse("2606:50c0:8000::153").unwrap();
        assert_eq!(target.host, "2606:50c0:8000::153");
        assert_eq!(target.port, 443);
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let target = Target::parse("  github.com  ").unwrap();
        assert_eq!(target.host, "github.com");
    }

    #[test]
    fn test_empty_target_is_rejected() {
        for input in ["", "   ", ":443", "[]", "[]:443"] {
            let err = Target::parse(input).unwrap_err();
            assert_eq!(err.kind(), "invalid_target", "input {input:?}");
        }
    }

    #[test]
    fn test_bad_port_is_rejected() {
        for input in ["host:", "host:0", "host:99999", "host:https"] {
            let err = Target::parse(input).unwrap_err();
            assert_eq!(err.kind(), "invalid_target", "input {input:?}");
        }
    }

    #[test]
    fn test_malformed_brackets_are_rejected() {
        for input in ["[::1", "[::1]x", "[::1]:"] {
            let err = Target::parse(input).unwrap_err();
            assert_eq!(err.kind(), "invalid_target", "input {input:?}");
        }
    }

    #[test]
    fn test_display_renders_host_port() {
        assert_eq!(
            Target::parse("github.com").unwrap().to_string(),
            "github.com:443"
        );
        assert_eq!(Target::parse("[::1]:8443").unwrap().to_string(), "[::1]:8443");
    }
}
