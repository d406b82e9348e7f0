pub mod app;
pub mod db;

pub use app::AppConfig;
pub use db::DbKind;
