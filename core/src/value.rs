//! Conversion of raw command-line tokens into typed values.
//!
//! Every type that can back a declared option or positional input implements
//! [`ArgumentValue`]. Conversion is a pure function of the raw string; a
//! failure is always [`CommandLineError::InvalidArgumentFormat`] carrying the
//! offending text.
//!
//! Collections use a flat textual syntax:
//!
//! - arrays: `value1,value2,...`
//! - maps: `key1=value1,key2=value2,...`
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use cmdline_core::ArgumentValue;
//!
//! let numbers = Vec::<u32>::from_argument("1,2,3").unwrap();
//! assert_eq!(numbers, vec![1, 2, 3]);
//!
//! let env = BTreeMap::<String, i64>::from_argument("a=1,b=-2").unwrap();
//! assert_eq!(env["b"], -2);
//! assert_eq!(env.to_argument(), "a=1,b=-2");
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::Hash;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{CommandLineError, Result};

/// A type that can be parsed from, and rendered back to, a single
/// command-line token.
pub trait ArgumentValue: Sized {
    /// Converts a raw token into a value.
    ///
    /// # Errors
    ///
    /// Returns [`CommandLineError::InvalidArgumentFormat`] when the token is
    /// not a valid textual form of `Self`.
    fn from_argument(raw: &str) -> Result<Self>;

    /// Renders the value in the same textual form accepted by
    /// [`from_argument`](ArgumentValue::from_argument).
    fn to_argument(&self) -> String;
}

fn invalid(raw: &str) -> CommandLineError {
    CommandLineError::InvalidArgumentFormat(raw.to_string())
}

macro_rules! from_str_argument_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ArgumentValue for $ty {
                fn from_argument(raw: &str) -> Result<Self> {
                    raw.parse::<$ty>().map_err(|_| invalid(raw))
                }

                fn to_argument(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

from_str_argument_value!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl ArgumentValue for String {
    fn from_argument(raw: &str) -> Result<Self> {
        Ok(raw.to_string())
    }

    fn to_argument(&self) -> String {
        self.clone()
    }
}

impl ArgumentValue for PathBuf {
    fn from_argument(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(invalid(raw));
        }
        Ok(PathBuf::from(raw))
    }

    fn to_argument(&self) -> String {
        self.to_string_lossy().into_owned()
    }
}

static URI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9\-._~:/?#\[\]@!$&'()*+,;=]|%[0-9A-Fa-f]{2})+$")
        .expect("static regex must compile")
});

static SCHEME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*):").expect("static regex must compile")
});

/// A syntactically valid URI reference, absolute (`https://host/x`) or
/// relative (`docs/index.html`).
///
/// Only the character set and `%XX` escapes are checked; no network or
/// filesystem access happens.
///
/// # Examples
///
/// ```
/// use cmdline_core::{ArgumentValue, Uri};
///
/// let uri = Uri::from_argument("https://example.com/a%20b?q=1").unwrap();
/// assert_eq!(uri.scheme(), Some("https"));
///
/// assert!(Uri::from_argument("not a uri").is_err());
/// assert!(Uri::from_argument("50%off").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Uri(String);

impl Uri {
    /// Returns the URI text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the scheme (`https`, `file`, ...) if the reference is absolute.
    pub fn scheme(&self) -> Option<&str> {
        SCHEME_RE
            .captures(&self.0)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl ArgumentValue for Uri {
    fn from_argument(raw: &str) -> Result<Self> {
        if URI_RE.is_match(raw) {
            Ok(Uri(raw.to_string()))
        } else {
            Err(invalid(raw))
        }
    }

    fn to_argument(&self) -> String {
        self.0.clone()
    }
}

/// Splits a collection token on `,`, dropping empty chunks so that `""` is
/// the empty collection and `"a,,b"` has two elements.
fn chunks(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').filter(|chunk| !chunk.is_empty())
}

fn key_value(raw: &str, chunk: &str) -> Result<(String, String)> {
    let mut parts = chunk.split('=');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) if !key.is_empty() && !value.is_empty() => {
            Ok((key.to_string(), value.to_string()))
        }
        _ => Err(invalid(raw)),
    }
}

impl<T: ArgumentValue> ArgumentValue for Vec<T> {
    fn from_argument(raw: &str) -> Result<Self> {
        chunks(raw).map(T::from_argument).collect()
    }

    fn to_argument(&self) -> String {
        self.iter()
            .map(ArgumentValue::to_argument)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl<K, V> ArgumentValue for HashMap<K, V>
where
    K: ArgumentValue + Eq + Hash,
    V: ArgumentValue,
{
    fn from_argument(raw: &str) -> Result<Self> {
        let mut map = HashMap::new();
        for chunk in chunks(raw) {
            let (key, value) = key_value(raw, chunk)?;
            map.insert(K::from_argument(&key)?, V::from_argument(&value)?);
        }
        Ok(map)
    }

    fn to_argument(&self) -> String {
        self.iter()
            .map(|(key, value)| format!("{}={}", key.to_argument(), value.to_argument()))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl<K, V> ArgumentValue for BTreeMap<K, V>
where
    K: ArgumentValue + Ord,
    V: ArgumentValue,
{
    fn from_argument(raw: &str) -> Result<Self> {
        let mut map = BTreeMap::new();
        for chunk in chunks(raw) {
            let (key, value) = key_value(raw, chunk)?;
            map.insert(K::from_argument(&key)?, V::from_argument(&value)?);
        }
        Ok(map)
    }

    fn to_argument(&self) -> String {
        self.iter()
            .map(|(key, value)| format!("{}={}", key.to_argument(), value.to_argument()))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// A present token always converts the wrapped type; absence is modelled by
/// the cell keeping `None`, never by converting anything.
impl<T: ArgumentValue> ArgumentValue for Option<T> {
    fn from_argument(raw: &str) -> Result<Self> {
        T::from_argument(raw).map(Some)
    }

    fn to_argument(&self) -> String {
        match self {
            Some(value) => value.to_argument(),
            None => "none".to_string(),
        }
    }
}
