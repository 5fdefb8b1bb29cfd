//! # Move Types
//!
//! The closed set of types the analyzer reasons about. Generic instantiations
//! of user structs are erased to the struct name, and anything the analyzer
//! cannot determine reads as [`MoveType::Unknown`], which is compatible with
//! everything and suppresses diagnostics.

use std::fmt;

use move_ide_parser::TokenKind;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MoveType {
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
    Bool,
    Address,
    Signer,
    Vector(Box<MoveType>),
    Reference { mutable: bool, inner: Box<MoveType> },
    /// A user struct; `module` holds everything before the last `::`
    Struct { name: String, module: Option<String> },
    /// The unit type `()`
    Void,
    Unknown,
}

impl MoveType {
    pub fn vector(element: Self) -> Self {
        Self::Vector(Box::new(element))
    }

    pub fn reference(mutable: bool, inner: Self) -> Self {
        Self::Reference {
            mutable,
            inner: Box::new(inner),
        }
    }

    /// The type named by a primitive keyword. A bare `vector` has an unknown
    /// element type.
    pub fn from_primitive_name(name: &str) -> Option<Self> {
        let ty = match name {
            "u8" => Self::U8,
            "u16" => Self::U16,
            "u32" => Self::U32,
            "u64" => Self::U64,
            "u128" => Self::U128,
            "u256" => Self::U256,
            "bool" => Self::Bool,
            "address" => Self::Address,
            "signer" => Self::Signer,
            "vector" => Self::vector(Self::Unknown),
            _ => return None,
        };
        Some(ty)
    }

    /// The integer type selected by a literal suffix such as `u8`
    pub fn from_int_suffix(literal: &str) -> Option<Self> {
        // Longer suffixes first: `1u128` must not be read as `u8`.
        const SUFFIXES: [(&str, MoveType); 6] = [
            ("u128", MoveType::U128),
            ("u256", MoveType::U256),
            ("u16", MoveType::U16),
            ("u32", MoveType::U32),
            ("u64", MoveType::U64),
            ("u8", MoveType::U8),
        ];
        SUFFIXES
            .iter()
            .find(|(suffix, _)| literal.ends_with(suffix))
            .map(|(_, ty)| ty.clone())
    }

    /// The type of a literal token, or `None` for non-literal tokens.
    ///
    /// Unsuffixed integers default to `u64`.
    pub fn of_literal(kind: TokenKind, text: &str) -> Option<Self> {
        let ty = match kind {
            TokenKind::IntegerLiteral | TokenKind::HexLiteral => {
                Self::from_int_suffix(text).unwrap_or(Self::U64)
            }
            TokenKind::True | TokenKind::False => Self::Bool,
            TokenKind::AddressLiteral => Self::Address,
            TokenKind::ByteStringLiteral | TokenKind::HexStringLiteral => Self::vector(Self::U8),
            _ => return None,
        };
        Some(ty)
    }

    pub const fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::U8 | Self::U16 | Self::U32 | Self::U64 | Self::U128 | Self::U256
        )
    }

    /// Move has no floating point types, so numeric means integer
    pub const fn is_numeric(&self) -> bool {
        self.is_integer()
    }

    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    pub const fn bit_width(&self) -> Option<u32> {
        match self {
            Self::U8 => Some(8),
            Self::U16 => Some(16),
            Self::U32 => Some(32),
            Self::U64 => Some(64),
            Self::U128 => Some(128),
            Self::U256 => Some(256),
            _ => None,
        }
    }

    /// The type behind any number of references
    pub fn strip_references(&self) -> &Self {
        let mut ty = self;
        while let Self::Reference { inner, .. } = ty {
            ty = inner;
        }
        ty
    }
}

impl fmt::Display for MoveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U8 => write!(f, "u8"),
            Self::U16 => write!(f, "u16"),
            Self::U32 => write!(f, "u32"),
            Self::U64 => write!(f, "u64"),
            Self::U128 => write!(f, "u128"),
            Self::U256 => write!(f, "u256"),
            Self::Bool => write!(f, "bool"),
            Self::Address => write!(f, "address"),
            Self::Signer => write!(f, "signer"),
            Self::Vector(element) => write!(f, "vector<{element}>"),
            Self::Reference { mutable, inner } => {
                if *mutable {
                    write!(f, "&mut {inner}")
                } else {
                    write!(f, "&{inner}")
                }
            }
            Self::Struct { name, module } => match module {
                Some(module) => write!(f, "{module}::{name}"),
                None => write!(f, "{name}"),
            },
            Self::Void => write!(f, "()"),
            Self::Unknown => write!(f, "<unknown>"),
        }
    }
}

/// Whether a value of type `from` may be stored where `to` is expected.
///
/// `Unknown` on either side is compatible, also as a vector element at any
/// depth. A mutable reference may be used where an immutable one is
/// expected, but not the other way around.
pub fn is_assignable(from: &MoveType, to: &MoveType) -> bool {
    if from == to || from.is_unknown() || to.is_unknown() {
        return true;
    }
    match (from, to) {
        (
            MoveType::Reference {
                mutable: from_mut,
                inner: from_inner,
            },
            MoveType::Reference {
                mutable: to_mut,
                inner: to_inner,
            },
        ) => (*from_mut || !*to_mut) && is_assignable(from_inner, to_inner),
        (MoveType::Vector(from_elem), MoveType::Vector(to_elem)) => {
            is_assignable(from_elem, to_elem)
        }
        _ => false,
    }
}
