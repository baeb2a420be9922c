//! Lookup view: state, transitions and rendering.

pub mod controller;
pub mod render;
pub mod state;

pub use controller::{SearchRequest, ViewController, ViewEvent, LOOKUP_FAILED_PREFIX};
pub use render::{render, AchievementItem, AchievementList, ProfileCard, SearchButton, View};
pub use state::{Phase, ViewState};
