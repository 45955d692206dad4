// Core data structures for the Sentinel Digest presentation layer

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An article as served by the backend REST API
///
/// The layout core treats articles as opaque ordered tokens; these
/// fields exist for rendering only.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Article {
    pub id: u64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub trending_score: f64,
    #[serde(default)]
    pub is_top_story: bool,
}

impl Article {
    /// Site-relative URL for the article page
    pub fn href(&self) -> String {
        format!("/article/{}", self.slug)
    }
}

/// A content category (e.g. politics, business)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub slug: String,
}

/// A free-form article tag
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub slug: String,
}

/// The category navigation rail, in display order
pub const NAV_CATEGORIES: &[(&str, &str)] = &[
    ("politics", "Politics"),
    ("business", "Business"),
    ("technology", "Technology"),
    ("health", "Health"),
    ("education", "Education"),
    ("entertainment", "Entertainment"),
    ("sports", "Sports"),
    ("international", "International"),
    ("opinion", "Opinion"),
];

/// A content collection requesting a page layout
///
/// The collection's `key()` seeds daily layout selection, so two
/// collections with the same key always share a layout pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Collection {
    Home,
    Trending,
    Category(String),
    Tag(String),
    Search(String),
}

impl Collection {
    /// Seed key for daily layout selection
    pub fn key(&self) -> &str {
        match self {
            Self::Home => "home",
            Self::Trending => "trending",
            Self::Category(slug) | Self::Tag(slug) => slug,
            Self::Search(_) => "search",
        }
    }

    /// Page heading
    pub fn title(&self) -> String {
        match self {
            Self::Home => "Today's Edition".to_string(),
            Self::Trending => "Trending".to_string(),
            Self::Category(slug) | Self::Tag(slug) => titlecase_slug(slug),
            Self::Search(query) => format!("Search: {query}"),
        }
    }

    /// Parse a CLI-style collection spec: `home`, `trending`,
    /// `category:<slug>`, `tag:<slug>`, `search:<query>`. A bare word
    /// other than the fixed pages is treated as a category slug.
    pub fn parse(spec: &str) -> Self {
        match spec {
            "home" => Self::Home,
            "trending" => Self::Trending,
            other => match other.split_once(':') {
                Some(("category", slug)) => Self::Category(slug.to_string()),
                Some(("tag", slug)) => Self::Tag(slug.to_string()),
                Some(("search", query)) => Self::Search(query.to_string()),
                _ => Self::Category(other.to_string()),
            },
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => write!(f, "home"),
            Self::Trending => write!(f, "trending"),
            Self::Category(slug) => write!(f, "category:{slug}"),
            Self::Tag(slug) => write!(f, "tag:{slug}"),
            Self::Search(query) => write!(f, "search:{query}"),
        }
    }
}

fn titlecase_slug(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Opportunity listing categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OpportunityKind {
    Job,
    Internship,
    GraduateProgram,
    Bootcamp,
    Scholarship,
    Grant,
}

impl OpportunityKind {
    /// All kinds, in display order
    pub fn all() -> Vec<Self> {
        vec![
            Self::Job,
            Self::Internship,
            Self::GraduateProgram,
            Self::Bootcamp,
            Self::Scholarship,
            Self::Grant,
        ]
    }

    /// URL slug
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Job => "job",
            Self::Internship => "internship",
            Self::GraduateProgram => "graduate-program",
            Self::Bootcamp => "bootcamp",
            Self::Scholarship => "scholarship",
            Self::Grant => "grant",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Job => "Jobs",
            Self::Internship => "Internships",
            Self::GraduateProgram => "Graduate Programs",
            Self::Bootcamp => "Bootcamps",
            Self::Scholarship => "Scholarships",
            Self::Grant => "Grants",
        }
    }

    /// Parse from a URL slug
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "job" | "jobs" => Some(Self::Job),
            "internship" | "internships" => Some(Self::Internship),
            "graduate-program" | "graduate-programs" => Some(Self::GraduateProgram),
            "bootcamp" | "bootcamps" => Some(Self::Bootcamp),
            "scholarship" | "scholarships" => Some(Self::Scholarship),
            "grant" | "grants" => Some(Self::Grant),
            _ => None,
        }
    }
}

impl fmt::Display for OpportunityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A job/opportunity listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: u64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(rename = "category")]
    pub kind: OpportunityKind,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub apply_url: Option<String>,
    #[serde(default)]
    pub posted_at: Option<DateTime<Utc>>,
}

/// DRF-style pagination envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// List endpoints answer either a pagination envelope or a bare array;
/// both shapes flatten to the results list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Paged(Paginated<T>),
    Bare(Vec<T>),
}

impl<T> ListPayload<T> {
    /// Flatten to the result list
    pub fn into_results(self) -> Vec<T> {
        match self {
            Self::Paged(page) => page.results,
            Self::Bare(items) => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_keys() {
        assert_eq!(Collection::Home.key(), "home");
        assert_eq!(Collection::Trending.key(), "trending");
        assert_eq!(Collection::Category("politics".into()).key(), "politics");
        assert_eq!(Collection::Tag("ai".into()).key(), "ai");
        assert_eq!(Collection::Search("rust".into()).key(), "search");
    }

    #[test]
    fn test_collection_parse() {
        assert_eq!(Collection::parse("home"), Collection::Home);
        assert_eq!(Collection::parse("trending"), Collection::Trending);
        assert_eq!(
            Collection::parse("category:sports"),
            Collection::Category("sports".into())
        );
        assert_eq!(Collection::parse("tag:ai"), Collection::Tag("ai".into()));
        assert_eq!(
            Collection::parse("search:rust news"),
            Collection::Search("rust news".into())
        );
        // Bare words fall back to category slugs
        assert_eq!(
            Collection::parse("business"),
            Collection::Category("business".into())
        );
    }

    #[test]
    fn test_collection_titles() {
        assert_eq!(Collection::Category("politics".into()).title(), "Politics");
        assert_eq!(
            Collection::Category("graduate-program".into()).title(),
            "Graduate Program"
        );
        assert_eq!(Collection::Search("rust".into()).title(), "Search: rust");
    }

    #[test]
    fn test_opportunity_kind_roundtrip() {
        for kind in OpportunityKind::all() {
            assert_eq!(OpportunityKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(OpportunityKind::parse("GRANTS"), Some(OpportunityKind::Grant));
        assert_eq!(OpportunityKind::parse("unknown"), None);
    }

    #[test]
    fn test_article_deserializes_with_missing_optionals() {
        let json = r#"{"id": 7, "title": "Hello", "slug": "hello"}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.id, 7);
        assert!(article.image.is_none());
        assert!(article.tags.is_empty());
        assert_eq!(article.href(), "/article/hello");
    }

    #[test]
    fn test_list_payload_paged() {
        let json = r#"{"count": 2, "next": null, "previous": null, "results":
            [{"id": 1, "title": "A", "slug": "a"}, {"id": 2, "title": "B", "slug": "b"}]}"#;
        let payload: ListPayload<Article> = serde_json::from_str(json).unwrap();
        assert_eq!(payload.into_results().len(), 2);
    }

    #[test]
    fn test_list_payload_bare_array() {
        let json = r#"[{"id": 1, "title": "A", "slug": "a"}]"#;
        let payload: ListPayload<Article> = serde_json::from_str(json).unwrap();
        assert_eq!(payload.into_results().len(), 1);
    }

    #[test]
    fn test_opportunity_kind_serde_kebab_case() {
        let json = r#"{"id": 1, "title": "PhD stipend", "slug": "phd",
            "category": "graduate-program"}"#;
        let opportunity: Opportunity = serde_json::from_str(json).unwrap();
        assert_eq!(opportunity.kind, OpportunityKind::GraduateProgram);
    }
}
