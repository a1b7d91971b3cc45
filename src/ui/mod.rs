//! 表示層
//!
//! レイアウト計算・テーマ・描画

pub mod layout;
pub mod renderer;
pub mod theme;

pub use layout::{calculate_layout, AppLayout};
pub use renderer::Renderer;
pub use theme::{ColorScheme, ComponentType, Theme};
