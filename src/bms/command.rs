//! Definitions of command argument data.
//!
//! Structures in this module are shared by the lexer, the parser and the output models.

pub mod channel;
pub mod mixin;
pub mod time;

/// Converts a character into a base-62 byte `0-9A-Za-z`, or `None` if out of range.
#[must_use]
pub const fn char_to_base62(ch: char) -> Option<u8> {
    if ch.is_ascii_alphanumeric() {
        Some(ch as u8)
    } else {
        None
    }
}

#[test]
fn test_char_to_base62() {
    assert_eq!(char_to_base62('0'), Some(b'0'));
    assert_eq!(char_to_base62('9'), Some(b'9'));
    assert_eq!(char_to_base62(':'), None);
    assert_eq!(char_to_base62('A'), Some(b'A'));
    assert_eq!(char_to_base62('z'), Some(b'z'));
    assert_eq!(char_to_base62('_'), None);
}

/// A symbol id of `#BPMxx` and `#STOPxx` definitions, also used by cells of the symbol channels.
///
/// The representation is 2 digits of ASCII characters, always stored uppercase so lookups are
/// case-insensitive.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjId([u8; 2]);

#[cfg(feature = "serde")]
impl serde::Serialize for ObjId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ObjId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::try_from(raw.as_str())
            .map_err(|_| serde::de::Error::custom(format!("invalid object id `{raw}`")))
    }
}

impl std::fmt::Debug for ObjId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ObjId")
            .field(&format!("{}{}", self.0[0] as char, self.0[1] as char))
            .finish()
    }
}

impl std::fmt::Display for ObjId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.0[0] as char, self.0[1] as char)
    }
}

impl TryFrom<[char; 2]> for ObjId {
    type Error = [char; 2];
    fn try_from(value: [char; 2]) -> core::result::Result<Self, Self::Error> {
        let [first, second] = value;
        Ok(Self([
            char_to_base62(first).ok_or(value)?.to_ascii_uppercase(),
            char_to_base62(second).ok_or(value)?.to_ascii_uppercase(),
        ]))
    }
}

impl<'a> TryFrom<&'a str> for ObjId {
    type Error = &'a str;
    fn try_from(value: &'a str) -> core::result::Result<Self, Self::Error> {
        let mut chars = value.chars();
        let [Some(ch1), Some(ch2), None] = [chars.next(), chars.next(), chars.next()] else {
            return Err(value);
        };
        Self::try_from([ch1, ch2]).map_err(|_| value)
    }
}

impl ObjId {
    /// Interprets the id as a hexadecimal byte, used by the `#xxx03` BPM channel.
    #[must_use]
    pub fn as_hex(self) -> Option<u8> {
        let hi = (self.0[0] as char).to_digit(16)?;
        let lo = (self.0[1] as char).to_digit(16)?;
        u8::try_from(hi * 16 + lo).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::ObjId;

    #[test]
    fn obj_id_is_case_insensitive() {
        assert_eq!(ObjId::try_from("aa"), ObjId::try_from("AA"));
        assert_eq!(ObjId::try_from("0z").map(|id| id.to_string()), Ok("0Z".into()));
    }

    #[test]
    fn obj_id_rejects_bad_input() {
        assert!(ObjId::try_from("0").is_err());
        assert!(ObjId::try_from("012").is_err());
        assert!(ObjId::try_from("0:").is_err());
    }

    #[test]
    fn obj_id_as_hex() {
        assert_eq!(ObjId::try_from("78").ok().and_then(ObjId::as_hex), Some(120));
        assert_eq!(ObjId::try_from("FF").ok().and_then(ObjId::as_hex), Some(255));
        assert_eq!(ObjId::try_from("ZZ").ok().and_then(ObjId::as_hex), None);
    }
}
