use serde::{Deserialize, Serialize};

/// Fixed set of reactions a user can leave as a comment on a listen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentType {
    Great,
    Interesting,
    Dislike,
}

impl CommentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentType::Great => "great",
            CommentType::Interesting => "interesting",
            CommentType::Dislike => "dislike",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "great" => Some(CommentType::Great),
            "interesting" => Some(CommentType::Interesting),
            "dislike" => Some(CommentType::Dislike),
            _ => None,
        }
    }
}
