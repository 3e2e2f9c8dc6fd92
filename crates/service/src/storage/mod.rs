//! Small file-backed stores for state that must survive a restart but does
//! not warrant a database.

pub mod json_map_store;
