pub mod change_log;
pub mod hero_slide;
pub mod menu_item;
pub mod settings;
