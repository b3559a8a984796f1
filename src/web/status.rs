use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Review state of a submitted article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleStatus {
    Pending,
    Approved,
    Rejected,
}

impl ArticleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Pending => "pending",
            ArticleStatus::Approved => "approved",
            ArticleStatus::Rejected => "rejected",
        }
    }

    /// Strict parse; anything outside the three known labels is rejected so
    /// admin input validation can surface a 400 instead of writing junk.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(ArticleStatus::Pending),
            "approved" => Some(ArticleStatus::Approved),
            "rejected" => Some(ArticleStatus::Rejected),
            _ => None,
        }
    }
}

impl Serialize for ArticleStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ArticleStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        ArticleStatus::parse(&value).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid status `{value}`, expected pending, approved, or rejected"
            ))
        })
    }
}

/// Rule governing admin status changes. The data model implies reviews only
/// move forward out of `pending`, but the historical API never enforced that,
/// so the rule is configurable rather than hard-coded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPolicy {
    /// Any status may be set at any time (historical behaviour).
    Free,
    /// Only pending articles may change status; re-asserting the current
    /// status is allowed.
    ForwardOnly,
}

impl TransitionPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "free" => Some(TransitionPolicy::Free),
            "forward-only" | "forward_only" => Some(TransitionPolicy::ForwardOnly),
            _ => None,
        }
    }

    pub fn allows(&self, from: ArticleStatus, to: ArticleStatus) -> bool {
        match self {
            TransitionPolicy::Free => true,
            TransitionPolicy::ForwardOnly => from == ArticleStatus::Pending || from == to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_labels() {
        assert_eq!(ArticleStatus::parse("pending"), Some(ArticleStatus::Pending));
        assert_eq!(
            ArticleStatus::parse("approved"),
            Some(ArticleStatus::Approved)
        );
        assert_eq!(
            ArticleStatus::parse("rejected"),
            Some(ArticleStatus::Rejected)
        );
    }

    #[test]
    fn parse_rejects_unknown_labels() {
        assert_eq!(ArticleStatus::parse("published"), None);
        assert_eq!(ArticleStatus::parse("Pending"), None);
        assert_eq!(ArticleStatus::parse(""), None);
    }

    #[test]
    fn deserialize_rejects_unknown_labels() {
        let parsed: Result<ArticleStatus, _> = serde_json::from_str("\"archived\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn serialize_round_trips() {
        let json = serde_json::to_string(&ArticleStatus::Approved).unwrap();
        assert_eq!(json, "\"approved\"");
        let back: ArticleStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ArticleStatus::Approved);
    }

    #[test]
    fn free_policy_allows_everything() {
        let policy = TransitionPolicy::Free;
        assert!(policy.allows(ArticleStatus::Approved, ArticleStatus::Pending));
        assert!(policy.allows(ArticleStatus::Rejected, ArticleStatus::Approved));
    }

    #[test]
    fn forward_only_locks_settled_articles() {
        let policy = TransitionPolicy::ForwardOnly;
        assert!(policy.allows(ArticleStatus::Pending, ArticleStatus::Approved));
        assert!(policy.allows(ArticleStatus::Pending, ArticleStatus::Rejected));
        assert!(policy.allows(ArticleStatus::Approved, ArticleStatus::Approved));
        assert!(!policy.allows(ArticleStatus::Approved, ArticleStatus::Pending));
        assert!(!policy.allows(ArticleStatus::Approved, ArticleStatus::Rejected));
        assert!(!policy.allows(ArticleStatus::Rejected, ArticleStatus::Approved));
    }

    #[test]
    fn policy_parse_accepts_both_spellings() {
        assert_eq!(TransitionPolicy::parse("free"), Some(TransitionPolicy::Free));
        assert_eq!(
            TransitionPolicy::parse("forward-only"),
            Some(TransitionPolicy::ForwardOnly)
        );
        assert_eq!(
            TransitionPolicy::parse("FORWARD_ONLY"),
            Some(TransitionPolicy::ForwardOnly)
        );
        assert_eq!(TransitionPolicy::parse("strict"), None);
    }
}
