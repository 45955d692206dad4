//! HTML page rendering with Handlebars
//!
//! Templates are compiled into the binary and registered once at
//! startup. The renderer maps allocation buckets onto layout sections:
//! each section carries the selected layout's name and slot count so
//! the stylesheet can arrange the cards into the day's shape.

use chrono::{DateTime, Utc};
use handlebars::Handlebars;
use serde::Serialize;
use thiserror::Error;

use crate::layout::{Allocation, LayoutDescriptor};
use crate::models::{Article, Collection, Opportunity, OpportunityKind, NAV_CATEGORIES};

const PAGE_TEMPLATE: &str = include_str!("../../templates/page.hbs");
const OPPORTUNITIES_TEMPLATE: &str = include_str!("../../templates/opportunities.hbs");

/// Errors raised while registering or rendering templates
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Template registration failed: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("Render failed: {0}")]
    Render(#[from] handlebars::RenderError),
}

/// Result type for rendering operations
pub type RenderResult<T> = std::result::Result<T, RenderError>;

#[derive(Debug, Serialize)]
struct NavView {
    slug: &'static str,
    label: &'static str,
}

#[derive(Debug, Serialize)]
struct CardView {
    title: String,
    href: String,
    image: Option<String>,
    category: Option<String>,
    byline: Option<String>,
    published: Option<String>,
}

#[derive(Debug, Serialize)]
struct SectionView {
    layout: String,
    slots: usize,
    cards: Vec<CardView>,
}

#[derive(Debug, Serialize)]
struct PageView {
    heading: String,
    nav: Vec<NavView>,
    primary: SectionView,
    secondary: SectionView,
    more: Vec<CardView>,
    generated_at: String,
}

#[derive(Debug, Serialize)]
struct OpportunityView {
    title: String,
    organization: Option<String>,
    kind: &'static str,
    location: Option<String>,
    deadline: Option<String>,
    apply_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct OpportunitiesPageView {
    heading: String,
    nav: Vec<NavView>,
    kinds: Vec<NavView>,
    listings: Vec<OpportunityView>,
    generated_at: String,
}

/// Renders collection and opportunity pages from embedded templates
pub struct PageRenderer {
    handlebars: Handlebars<'static>,
}

impl PageRenderer {
    /// Register the built-in templates
    pub fn new() -> RenderResult<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.register_template_string("page", PAGE_TEMPLATE)?;
        handlebars.register_template_string("opportunities", OPPORTUNITIES_TEMPLATE)?;
        Ok(Self { handlebars })
    }

    /// Render a collection page: two layout sections plus the
    /// "more stories" sidebar drawn from the front of overflow
    pub fn collection_page(
        &self,
        collection: &Collection,
        primary_layout: &LayoutDescriptor,
        secondary_layout: &LayoutDescriptor,
        allocation: &Allocation<Article>,
        more_count: usize,
    ) -> RenderResult<String> {
        let now = Utc::now();
        let view = PageView {
            heading: collection.title(),
            nav: nav_views(),
            primary: section_view(primary_layout, &allocation.primary, now),
            secondary: section_view(secondary_layout, &allocation.secondary, now),
            more: allocation
                .overflow
                .iter()
                .take(more_count)
                .map(|article| card_view(article, now))
                .collect(),
            generated_at: now.format("%Y-%m-%d %H:%M UTC").to_string(),
        };

        Ok(self.handlebars.render("page", &view)?)
    }

    /// Render the opportunities listing page
    pub fn opportunities_page(&self, listings: &[Opportunity]) -> RenderResult<String> {
        let view = OpportunitiesPageView {
            heading: "Opportunities".to_string(),
            nav: nav_views(),
            kinds: OpportunityKind::all()
                .into_iter()
                .map(|kind| NavView {
                    slug: kind.as_str(),
                    label: kind.label(),
                })
                .collect(),
            listings: listings.iter().map(opportunity_view).collect(),
            generated_at: Utc::now().format("%Y-%m-%d %H:%M UTC").to_string(),
        };

        Ok(self.handlebars.render("opportunities", &view)?)
    }
}

fn nav_views() -> Vec<NavView> {
    NAV_CATEGORIES
        .iter()
        .map(|(slug, label)| NavView { slug, label })
        .collect()
}

fn section_view(layout: &LayoutDescriptor, articles: &[Article], now: DateTime<Utc>) -> SectionView {
    SectionView {
        layout: layout.name.clone(),
        slots: layout.required_articles,
        cards: articles.iter().map(|article| card_view(article, now)).collect(),
    }
}

fn card_view(article: &Article, now: DateTime<Utc>) -> CardView {
    CardView {
        title: article.title.clone(),
        href: article.href(),
        image: article.image.clone(),
        category: article.category.as_ref().map(|c| c.name.clone()),
        byline: article.author.clone(),
        published: article.published_at.map(|dt| format_relative(dt, now)),
    }
}

fn opportunity_view(opportunity: &Opportunity) -> OpportunityView {
    OpportunityView {
        title: opportunity.title.clone(),
        organization: opportunity.organization.clone(),
        kind: opportunity.kind.label(),
        location: opportunity.location.clone(),
        deadline: opportunity.deadline.map(|d| d.format("%b %-d, %Y").to_string()),
        apply_url: opportunity.apply_url.clone(),
    }
}

/// Human-friendly relative timestamp ("5 minutes ago"); falls back to
/// an absolute date past one week
pub fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - then;

    if elapsed.num_seconds() < 60 {
        return "just now".to_string();
    }

    let minutes = elapsed.num_minutes();
    if minutes < 60 {
        return plural(minutes, "minute");
    }

    let hours = elapsed.num_hours();
    if hours < 24 {
        return plural(hours, "hour");
    }

    let days = elapsed.num_days();
    if days <= 7 {
        return plural(days, "day");
    }

    then.format("%b %-d, %Y").to_string()
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}
