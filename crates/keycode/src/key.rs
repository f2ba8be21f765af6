/// Declares the `Key` enum together with its name table.
macro_rules! define_keys {
    ( $( $variant:ident ),* $(,)? ) => {
        /// A key the palette can observe, independent of the host platform.
        ///
        /// Letter keys are case-insensitive by construction: `a` and `A` both
        /// map to `Key::A`.
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
        #[allow(missing_docs)]
        pub enum Key {
            $( $variant, )*
        }

        impl Key {
            /// Every key, in declaration order.
            pub const ALL: &'static [Self] = &[ $( Self::$variant, )* ];

            /// Returns the enum variant name.
            pub fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => stringify!($variant), )*
                }
            }

            /// Parses a variant name, ignoring ASCII case.
            pub fn from_name(s: &str) -> Option<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|k| k.name().eq_ignore_ascii_case(s))
            }
        }
    };
}

define_keys! {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,
    Space,
    Minus,
    Equal,
    LeftBracket,
    RightBracket,
    Backslash,
    Semicolon,
    Quote,
    Comma,
    Period,
    Slash,
    Grave,
    Return,
    Tab,
    Delete,
    ForwardDelete,
    Escape,
    Command,
    Shift,
    Option,
    Control,
    LeftArrow,
    RightArrow,
    UpArrow,
    DownArrow,
    Home,
    End,
    PageUp,
    PageDown,
}

impl Key {
    /// Maps a single printable character to its key.
    ///
    /// Letters ignore case; digits, punctuation and space use their symbol.
    pub fn from_char(c: char) -> Option<Self> {
        let mut buf = [0u8; 4];
        let s: &str = c.encode_utf8(&mut buf);
        if c.is_ascii_alphabetic() {
            Self::from_name(s)
        } else {
            crate::spec::from_symbol(s)
        }
    }
}
