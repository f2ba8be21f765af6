use crate::Key;

/// Modifier keys the palette distinguishes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[allow(missing_docs)]
pub enum Modifier {
    Command,
    Shift,
    Option,
    Control,
}

impl From<Modifier> for Key {
    fn from(m: Modifier) -> Self {
        match m {
            Modifier::Command => Self::Command,
            Modifier::Shift => Self::Shift,
            Modifier::Option => Self::Option,
            Modifier::Control => Self::Control,
        }
    }
}

impl TryFrom<Key> for Modifier {
    type Error = ();
    fn try_from(k: Key) -> Result<Self, Self::Error> {
        match k {
            Key::Command => Ok(Self::Command),
            Key::Shift => Ok(Self::Shift),
            Key::Option => Ok(Self::Option),
            Key::Control => Ok(Self::Control),
            _ => Err(()),
        }
    }
}

impl Modifier {
    /// Parses a modifier specification string via key specs, then converts.
    ///
    /// Accepts case-insensitive variant names and alias words (cmd, meta,
    /// super, ctrl, opt, alt). Fails for non-modifier keys.
    pub fn from_spec(s: &str) -> Option<Self> {
        Key::from_spec(s).and_then(|k| Self::try_from(k).ok())
    }

    /// Returns the canonical lowercase spec string for this modifier.
    pub fn to_spec(self) -> String {
        match self {
            Self::Command => "cmd".to_string(),
            Self::Control => "ctrl".to_string(),
            Self::Option => "opt".to_string(),
            Self::Shift => "shift".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_modifiers() {
        for m in [
            Modifier::Command,
            Modifier::Shift,
            Modifier::Option,
            Modifier::Control,
        ] {
            let k: Key = m.into();
            assert_eq!(Modifier::try_from(k), Ok(m));
            assert_eq!(Modifier::from_spec(&m.to_spec()), Some(m));
        }
    }

    #[test]
    fn modifier_specs() {
        assert_eq!(Modifier::from_spec("cmd"), Some(Modifier::Command));
        assert_eq!(Modifier::from_spec("Meta"), Some(Modifier::Command));
        assert_eq!(Modifier::from_spec("ctrl"), Some(Modifier::Control));
        assert_eq!(Modifier::from_spec("control"), Some(Modifier::Control));
        assert_eq!(Modifier::from_spec("alt"), Some(Modifier::Option));
        assert_eq!(Modifier::from_spec("k"), None);
    }
}
