pub mod change_log_repo;
pub mod hero_slide_repo;
pub mod menu_item_repo;
pub mod settings_repo;

pub use change_log_repo::ChangeLogRepo;
pub use hero_slide_repo::HeroSlideRepo;
pub use menu_item_repo::{MenuItemRepo, MenuTable};
pub use settings_repo::SettingsRepo;
