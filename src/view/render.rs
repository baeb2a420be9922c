//! Rendering
//!
//! Pure mapping from [`ViewState`] to a toolkit-agnostic [`View`].

use crate::models::{Achievement, Contributor};
use crate::view::state::ViewState;

pub const APP_TITLE: &str = "OSPO-ColabAchievements";
pub const QUERY_PLACEHOLDER: &str = "Enter GitHub username";
pub const SEARCH_LABEL: &str = "Search";
pub const SEARCHING_LABEL: &str = "Searching...";
pub const ACHIEVEMENTS_HEADING: &str = "Achievements:";
pub const NO_ACHIEVEMENTS: &str = "No achievements yet.";

/// Everything a frontend has to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub title: &'static str,
    pub query: QueryInput,
    pub search_button: SearchButton,
    /// Shown only when present
    pub error: Option<String>,
    pub profile: Option<ProfileCard>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryInput {
    pub text: String,
    pub placeholder: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchButton {
    pub label: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileCard {
    pub heading: String,
    pub avatar_url: String,
    pub avatar_alt: String,
    pub achievements_heading: &'static str,
    pub achievements: AchievementList,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AchievementList {
    Placeholder(&'static str),
    Items(Vec<AchievementItem>),
}

/// One list row, keyed by achievement id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementItem {
    pub key: i64,
    pub text: String,
    pub link: Option<String>,
}

impl From<&Achievement> for AchievementItem {
    fn from(achievement: &Achievement) -> Self {
        Self {
            key: achievement.id,
            text: format!("{}: {}", achievement.title, achievement.description),
            link: achievement.source_contribution_url.clone(),
        }
    }
}

impl From<&Contributor> for ProfileCard {
    fn from(contributor: &Contributor) -> Self {
        let achievements = if contributor.has_achievements() {
            AchievementList::Items(contributor.achievements.iter().map(Into::into).collect())
        } else {
            AchievementList::Placeholder(NO_ACHIEVEMENTS)
        };

        Self {
            heading: contributor.github_username.clone(),
            avatar_url: contributor.avatar_url.clone(),
            avatar_alt: format!("{}'s avatar", contributor.github_username),
            achievements_heading: ACHIEVEMENTS_HEADING,
            achievements,
        }
    }
}

impl AchievementList {
    pub fn items(&self) -> &[AchievementItem] {
        match self {
            Self::Items(items) => items,
            Self::Placeholder(_) => &[],
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Self::Placeholder(text) => Some(*text),
            Self::Items(_) => None,
        }
    }
}

pub fn render(state: &ViewState) -> View {
    View {
        title: APP_TITLE,
        query: QueryInput {
            text: state.query_text.clone(),
            placeholder: QUERY_PLACEHOLDER,
        },
        search_button: SearchButton {
            label: if state.is_loading {
                SEARCHING_LABEL
            } else {
                SEARCH_LABEL
            },
            enabled: !state.is_loading,
        },
        error: state.has_error().then(|| state.error_message.clone()),
        profile: state.result.as_ref().map(ProfileCard::from),
    }
}
