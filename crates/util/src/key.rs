use std::borrow::Cow;
use std::fmt;

/// Name of the pseudo-property exposing an array's length.
pub const LENGTH: &str = "length";

/// A property address: an object field or an array index.
///
/// Objects coerce indices to their decimal field name. Arrays accept indices
/// and canonical decimal field names (`"3"` but not `"03"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Field(String),
    Index(usize),
}

impl Key {
    pub fn as_field(&self) -> Cow<'_, str> {
        match self {
            Key::Field(s) => Cow::Borrowed(s),
            Key::Index(i) => Cow::Owned(i.to_string()),
        }
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            Key::Index(i) => Some(*i),
            Key::Field(s) => {
                let i: usize = s.parse().ok()?;
                (i.to_string() == *s).then_some(i)
            }
        }
    }

    /// `true` for the array `length` pseudo-property.
    pub fn is_length(&self) -> bool {
        matches!(self, Key::Field(s) if s == LENGTH)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Field(s) => f.write_str(s),
            Key::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Field(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Field(s)
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key::Field(s.clone())
    }
}

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        Key::Index(i)
    }
}

impl From<&Key> for Key {
    fn from(k: &Key) -> Self {
        k.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_parsing_is_canonical() {
        assert_eq!(Key::from("0").as_index(), Some(0));
        assert_eq!(Key::from("42").as_index(), Some(42));
        assert_eq!(Key::from("042").as_index(), None);
        assert_eq!(Key::from("-1").as_index(), None);
        assert_eq!(Key::from("x").as_index(), None);
        assert_eq!(Key::from(7usize).as_index(), Some(7));
    }

    #[test]
    fn fields_coerce_indices() {
        assert_eq!(Key::from(3usize).as_field(), "3");
        assert_eq!(Key::from("a").as_field(), "a");
    }

    #[test]
    fn length_detection() {
        assert!(Key::from(LENGTH).is_length());
        assert!(!Key::from(0usize).is_length());
    }
}
