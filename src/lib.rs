pub mod app_state;
pub mod constants;
pub mod events;
pub mod history;
pub mod seo_client;
pub mod theme;
pub mod ui;
