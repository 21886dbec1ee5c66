//! Opaque attribute values and the capabilities they may offer
//!
//! An "any" value is inspected through a fixed, ordered set of optional
//! capabilities. A type implements [`AnyValue`] and overrides only the
//! accessors that apply to it; the bridge asks them in order and uses the
//! first one that answers.

use super::error::{LoggerError, Result};
use serde::Serialize;
use std::error::Error as StdError;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use std::sync::Arc;

/// Error produced by a failed JSON or text serialization
pub type MarshalError = Box<dyn StdError + Send + Sync>;

/// Capability set of an opaque attribute value.
///
/// Every accessor defaults to "not supported". The bridge consults them in
/// declaration order and the first supported capability decides how the value
/// is written; [`AnyValue::to_json_value`] is the fallback when none apply.
pub trait AnyValue: fmt::Debug + Send + Sync {
    /// Network address
    fn ip_addr(&self) -> Option<IpAddr> {
        None
    }

    /// Network address with prefix length
    fn ip_prefix(&self) -> Option<IpPrefix> {
        None
    }

    /// Hardware address
    fn mac_addr(&self) -> Option<MacAddr> {
        None
    }

    /// The value is an error
    fn as_error(&self) -> Option<&(dyn StdError + 'static)> {
        None
    }

    /// The value describes itself as text
    fn as_display(&self) -> Option<&dyn fmt::Display> {
        None
    }

    /// The value serializes itself to JSON text
    fn marshal_json(&self) -> Option<std::result::Result<String, MarshalError>> {
        None
    }

    /// The value serializes itself to plain text
    fn marshal_text(&self) -> Option<std::result::Result<String, MarshalError>> {
        None
    }

    /// Structural representation used when no capability applies
    fn to_json_value(&self) -> serde_json::Value {
        serde_json::Value::String(format!("{:?}", self))
    }
}

impl AnyValue for IpAddr {
    fn ip_addr(&self) -> Option<IpAddr> {
        Some(*self)
    }
}

impl AnyValue for Ipv4Addr {
    fn ip_addr(&self) -> Option<IpAddr> {
        Some(IpAddr::V4(*self))
    }
}

impl AnyValue for Ipv6Addr {
    fn ip_addr(&self) -> Option<IpAddr> {
        Some(IpAddr::V6(*self))
    }
}

/// Network address with a prefix length, shown in CIDR notation.
///
/// Host bits are cleared on construction, so `192.168.1.2/24` becomes
/// `192.168.1.0/24`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IpPrefix {
    addr: IpAddr,
    prefix_len: u8,
}

impl IpPrefix {
    pub fn new(addr: IpAddr, prefix_len: u8) -> Result<Self> {
        let addr = match addr {
            IpAddr::V4(v4) if prefix_len <= 32 => {
                let mask = u32::MAX.checked_shl(32 - u32::from(prefix_len)).unwrap_or(0);
                IpAddr::V4(Ipv4Addr::from(u32::from(v4) & mask))
            }
            IpAddr::V6(v6) if prefix_len <= 128 => {
                let mask = u128::MAX.checked_shl(128 - u32::from(prefix_len)).unwrap_or(0);
                IpAddr::V6(Ipv6Addr::from(u128::from(v6) & mask))
            }
            _ => {
                return Err(LoggerError::InvalidPrefix {
                    addr: addr.to_string(),
                    prefix_len,
                })
            }
        };
        Ok(Self { addr, prefix_len })
    }

    pub fn addr(&self) -> IpAddr {
        self.addr
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }
}

impl fmt::Display for IpPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix_len)
    }
}

impl FromStr for IpPrefix {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        let (addr, len) = s
            .split_once('/')
            .ok_or_else(|| LoggerError::address("IP prefix", s))?;
        let addr: IpAddr = addr
            .parse()
            .map_err(|_| LoggerError::address("IP prefix", s))?;
        let len: u8 = len
            .parse()
            .map_err(|_| LoggerError::address("IP prefix", s))?;
        IpPrefix::new(addr, len)
    }
}

impl AnyValue for IpPrefix {
    fn ip_prefix(&self) -> Option<IpPrefix> {
        Some(*self)
    }
}

/// Hardware address, shown as colon separated lowercase hex
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MacAddr(Vec<u8>);

impl MacAddr {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        MacAddr(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, byte) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(":")?;
            }
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl FromStr for MacAddr {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = s
            .split([':', '-'])
            .map(|part| {
                if part.len() != 2 {
                    return Err(LoggerError::address("MAC address", s));
                }
                u8::from_str_radix(part, 16).map_err(|_| LoggerError::address("MAC address", s))
            })
            .collect::<Result<Vec<u8>>>()?;
        Ok(MacAddr(bytes))
    }
}

impl AnyValue for MacAddr {
    fn mac_addr(&self) -> Option<MacAddr> {
        Some(self.clone())
    }
}

/// Error-valued attribute
#[derive(Debug, Clone)]
pub struct ErrorValue(Arc<dyn StdError + Send + Sync>);

impl ErrorValue {
    pub fn new<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        ErrorValue(Arc::new(err))
    }
}

impl AnyValue for ErrorValue {
    fn as_error(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&*self.0)
    }
}

/// Value written through its `Display` implementation
#[derive(Debug, Clone)]
pub struct Stringer<T>(pub T);

impl<T: fmt::Display + fmt::Debug + Send + Sync> AnyValue for Stringer<T> {
    fn as_display(&self) -> Option<&dyn fmt::Display> {
        Some(&self.0)
    }
}

/// Value that serializes itself to JSON and is embedded as-is
#[derive(Debug, Clone)]
pub struct Json<T>(pub T);

impl<T: Serialize + fmt::Debug + Send + Sync> AnyValue for Json<T> {
    fn marshal_json(&self) -> Option<std::result::Result<String, MarshalError>> {
        Some(serde_json::to_string(&self.0).map_err(Into::into))
    }
}

/// Plain value without any capability, reflected field by field
#[derive(Debug, Clone)]
pub struct Serialized<T>(pub T);

impl<T: Serialize + fmt::Debug + Send + Sync> AnyValue for Serialized<T> {
    fn to_json_value(&self) -> serde_json::Value {
        serde_json::to_value(&self.0)
            .unwrap_or_else(|err| serde_json::Value::String(format!("!ERROR:{}", err)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip_prefix_masks_host_bits() {
        let prefix = IpPrefix::new(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 2)), 24).unwrap();
        assert_eq!(prefix.to_string(), "192.168.1.0/24");

        let prefix: IpPrefix = "2001:db8::1/32".parse().unwrap();
        assert_eq!(prefix.to_string(), "2001:db8::/32");

        let prefix = IpPrefix::new(IpAddr::V4(Ipv4Addr::new(10, 1, 2, 3)), 0).unwrap();
        assert_eq!(prefix.to_string(), "0.0.0.0/0");
    }

    #[test]
    fn test_ip_prefix_rejects_bad_length() {
        assert!(IpPrefix::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 33).is_err());
        assert!("10.0.0.0".parse::<IpPrefix>().is_err());
        assert!("10.0.0.0/x".parse::<IpPrefix>().is_err());
    }

    #[test]
    fn test_mac_addr_format() {
        let mac = MacAddr::new([0x00, 0x00, 0x5e, 0x00, 0x53, 0x01]);
        assert_eq!(mac.to_string(), "00:00:5e:00:53:01");

        let parsed: MacAddr = "00-00-5E-00-53-01".parse().unwrap();
        assert_eq!(parsed, mac);
        assert!("0:1".parse::<MacAddr>().is_err());
    }

    #[test]
    fn test_default_capabilities_absent() {
        #[derive(Debug)]
        struct Plain;
        impl AnyValue for Plain {}

        let plain = Plain;
        assert!(plain.ip_addr().is_none());
        assert!(plain.as_error().is_none());
        assert!(plain.marshal_json().is_none());
        assert_eq!(plain.to_json_value(), serde_json::json!("Plain"));
    }

    #[test]
    fn test_serialized_reflects_structure() {
        #[derive(Debug, Serialize)]
        struct Unknown {
            foo: String,
        }
        let value = Serialized(Unknown {
            foo: "bar".to_string(),
        });
        assert_eq!(value.to_json_value(), serde_json::json!({"foo": "bar"}));
    }
}
