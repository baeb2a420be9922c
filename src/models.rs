use serde::Deserialize;

/// A contributor record from `GET /contributors/{username}/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Contributor {
    pub id: i64,
    pub github_username: String,
    pub avatar_url: String,
    /// Kept in the order the server returned them.
    #[serde(default)]
    pub achievements: Vec<Achievement>,
}

/// A single achievement awarded to a contributor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Achievement {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Server timestamp, display only.
    pub awarded_at: String,
    #[serde(default)]
    pub source_contribution_url: Option<String>,
}

impl Contributor {
    pub fn has_achievements(&self) -> bool {
        !self.achievements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_contributor_with_achievements() {
        let body = r#"{
            "id": 3,
            "github_username": "linus",
            "avatar_url": "http://x/a.png",
            "achievements": [
                {"id": 7, "title": "First PR", "description": "Merged a patch",
                 "awarded_at": "2024-01-01"},
                {"id": 9, "title": "Reviewer", "description": "Reviewed ten PRs",
                 "awarded_at": "2024-02-01T10:00:00",
                 "source_contribution_url": "https://github.com/o/r/pull/1"}
            ]
        }"#;

        let contributor: Contributor = serde_json::from_str(body).unwrap();
        assert_eq!(contributor.github_username, "linus");
        assert_eq!(contributor.achievements.len(), 2);
        assert_eq!(contributor.achievements[0].id, 7);
        assert_eq!(contributor.achievements[0].source_contribution_url, None);
        assert_eq!(
            contributor.achievements[1].source_contribution_url.as_deref(),
            Some("https://github.com/o/r/pull/1")
        );
    }

    #[test]
    fn test_null_source_url_is_none() {
        let body = r#"{"id": 1, "title": "t", "description": "d",
                       "awarded_at": "2024-01-01", "source_contribution_url": null}"#;
        let achievement: Achievement = serde_json::from_str(body).unwrap();
        assert!(achievement.source_contribution_url.is_none());
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let body = r#"{"id": 1, "avatar_url": "http://x/a.png", "achievements": []}"#;
        assert!(serde_json::from_str::<Contributor>(body).is_err());
    }

    #[test]
    fn test_has_achievements() {
        let contributor = Contributor {
            id: 1,
            github_username: "torvalds".to_string(),
            avatar_url: "http://x/a.png".to_string(),
            achievements: vec![],
        };
        assert!(!contributor.has_achievements());
    }
}
