pub mod cursor;
pub mod instruction;
