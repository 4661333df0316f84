pub mod changes;
pub mod hero;
pub mod menu;
pub mod public;
pub mod settings;
