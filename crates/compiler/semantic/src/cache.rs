use std::cell::RefCell;

use rustc_hash::FxHashMap;

use crate::type_parser::parse_type;
use crate::types::MoveType;

/// Memo table for parsed type annotations.
///
/// Owned by whoever drives the analysis and passed in explicitly. Dropping or
/// clearing it only costs re-parsing; results never depend on its contents.
#[derive(Debug, Default)]
pub struct TypeCache {
    parsed: RefCell<FxHashMap<String, MoveType>>,
}

impl TypeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// [`parse_type`], answered from the table when the text was seen before
    pub fn parse_type(&self, text: &str) -> MoveType {
        let key = text.trim();
        if let Some(ty) = self.parsed.borrow().get(key) {
            return ty.clone();
        }
        let ty = parse_type(key);
        self.parsed.borrow_mut().insert(key.to_string(), ty.clone());
        ty
    }

    pub fn len(&self) -> usize {
        self.parsed.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsed.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.parsed.borrow_mut().clear();
    }
}
