//! The database shared by every command of the driver.

use move_ide_parser::{Db as ParserDb, Upcast};
use move_ide_semantic::SemanticDb;

/// Database implementing the parser and semantic layers.
///
/// Each source file is a salsa input; parsing a file again after an
/// unchanged read is served from the cache.
#[salsa::db]
#[derive(Clone, Default)]
pub struct IdeDatabase {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl salsa::Database for IdeDatabase {}

#[salsa::db]
impl ParserDb for IdeDatabase {}

#[salsa::db]
impl SemanticDb for IdeDatabase {}

impl Upcast<dyn ParserDb> for IdeDatabase {
    fn upcast(&self) -> &(dyn ParserDb + 'static) {
        self
    }
    fn upcast_mut(&mut self) -> &mut (dyn ParserDb + 'static) {
        self
    }
}

impl IdeDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}
