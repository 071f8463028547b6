mod catalog;

pub use catalog::CatalogCommands;
