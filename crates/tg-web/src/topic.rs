use std::fmt;

/// A named photo bucket: one of the fixed destinations or the free-text search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topic {
    AmalfiCoast,
    Hallstat,
    Santorini,
    Search,
}

impl Topic {
    /// Destinations fetched at startup, in navigation order.
    pub const FIXED: [Self; 3] = [Self::AmalfiCoast, Self::Hallstat, Self::Santorini];

    /// Query text sent to Flickr for a fixed topic. `None` for search.
    pub const fn default_query(self) -> Option<&'static str> {
        match self {
            Self::AmalfiCoast => Some("amalfi coast"),
            Self::Hallstat => Some("hallstat"),
            Self::Santorini => Some("santorini"),
            Self::Search => None,
        }
    }

    /// Route path for a fixed topic. `None` for search, whose path carries the query.
    pub const fn path(self) -> Option<&'static str> {
        match self {
            Self::AmalfiCoast => Some("/amalficoast"),
            Self::Hallstat => Some("/hallstat"),
            Self::Santorini => Some("/santorini"),
            Self::Search => None,
        }
    }

    /// Navigation label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::AmalfiCoast => "Amalfi Coast",
            Self::Hallstat => "Hallstat",
            Self::Santorini => "Santorini",
            Self::Search => "Search",
        }
    }

    /// Gallery heading. The search topic is titled after the user's text.
    pub fn title(self, search_text: &str) -> String {
        match self {
            Self::Search => format!("{search_text} Photos"),
            fixed => format!("{} Photos", fixed.label()),
        }
    }

    /// Stable lowercase name for logs and metrics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AmalfiCoast => "amalfi_coast",
            Self::Hallstat => "hallstat",
            Self::Santorini => "santorini",
            Self::Search => "search",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_topics_have_query_and_path() {
        for topic in Topic::FIXED {
            assert!(topic.default_query().is_some(), "{topic} has no query");
            assert!(topic.path().is_some(), "{topic} has no path");
        }
        assert_eq!(Topic::Search.default_query(), None);
        assert_eq!(Topic::Search.path(), None);
    }

    #[test]
    fn test_titles() {
        assert_eq!(Topic::AmalfiCoast.title(""), "Amalfi Coast Photos");
        assert_eq!(Topic::Hallstat.title("ignored"), "Hallstat Photos");
        assert_eq!(Topic::Santorini.title(""), "Santorini Photos");
        assert_eq!(Topic::Search.title("rome"), "rome Photos");
    }
}
