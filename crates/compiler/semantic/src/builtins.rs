//! Built-in functions registry and helpers.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinFn {
    MoveTo,
    MoveFrom,
    BorrowGlobal,
    BorrowGlobalMut,
    Exists,
    Freeze,
    Assert,
    Abort,
}

impl BuiltinFn {
    pub const ALL: [Self; 8] = [
        Self::MoveTo,
        Self::MoveFrom,
        Self::BorrowGlobal,
        Self::BorrowGlobalMut,
        Self::Exists,
        Self::Freeze,
        Self::Assert,
        Self::Abort,
    ];

    /// The name as written at a call site; `assert!` keeps its bang
    pub const fn name(self) -> &'static str {
        match self {
            Self::MoveTo => "move_to",
            Self::MoveFrom => "move_from",
            Self::BorrowGlobal => "borrow_global",
            Self::BorrowGlobalMut => "borrow_global_mut",
            Self::Exists => "exists",
            Self::Freeze => "freeze",
            Self::Assert => "assert!",
            Self::Abort => "abort",
        }
    }

    /// Number of value arguments; type arguments are not counted
    pub const fn arity(self) -> usize {
        match self {
            Self::MoveTo | Self::Assert => 2,
            Self::MoveFrom
            | Self::BorrowGlobal
            | Self::BorrowGlobalMut
            | Self::Exists
            | Self::Freeze
            | Self::Abort => 1,
        }
    }
}

/// Return the built-in called by the given name, if it is one.
pub fn is_builtin_function_name(name: &str) -> Option<BuiltinFn> {
    BuiltinFn::ALL
        .into_iter()
        .find(|builtin| builtin.name() == name)
}
