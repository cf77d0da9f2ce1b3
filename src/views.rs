//! Built-in view catalog and view materialization
//!
//! The library ships the views its parent application actually ran:
//! the engagement-ranked feed, the evenly-weighted top list, the
//! chronological listings, and the admin user search. `pagina.toml`
//! entries override same-named built-ins and define new views.

use std::borrow::Cow;
use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::config::{PaginaConfig, RankKind, ViewSpec};
use crate::filter::{SearchKey, SubstringFilter};
use crate::query::CollectionView;
use crate::rank::{Recency, WeightedEngagement};
use crate::record::Record;

/// Built-in view specs, keyed by view name.
static BUILTIN_VIEWS: Lazy<BTreeMap<&'static str, ViewSpec>> = Lazy::new(|| {
    let mut views = BTreeMap::new();
    views.insert(
        "feed",
        ViewSpec {
            rank: RankKind::Engagement,
            likes_weight: 2.0,
            comments_weight: 3.0,
            search_fields: field_names(&["title", "author", "tags"]),
        },
    );
    views.insert(
        "top",
        ViewSpec {
            rank: RankKind::Engagement,
            likes_weight: 1.0,
            comments_weight: 1.0,
            search_fields: field_names(&["title", "author", "tags"]),
        },
    );
    views.insert(
        "newest",
        ViewSpec {
            rank: RankKind::Recency,
            search_fields: field_names(&["title", "author", "tags"]),
            ..ViewSpec::default()
        },
    );
    views.insert(
        "notifications",
        ViewSpec {
            rank: RankKind::Recency,
            search_fields: Vec::new(),
            ..ViewSpec::default()
        },
    );
    // Comment threads order by likes alone.
    views.insert(
        "comments",
        ViewSpec {
            rank: RankKind::Engagement,
            likes_weight: 1.0,
            comments_weight: 0.0,
            search_fields: Vec::new(),
        },
    );
    views.insert(
        "admin-users",
        ViewSpec {
            rank: RankKind::None,
            search_fields: field_names(&["author"]),
            ..ViewSpec::default()
        },
    );
    views
});

fn field_names(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// Names of the built-in views.
pub fn builtin_view_names() -> Vec<&'static str> {
    BUILTIN_VIEWS.keys().copied().collect()
}

/// Effective catalog: built-ins with config entries merged over them.
pub fn catalog(config: &PaginaConfig) -> BTreeMap<String, ViewSpec> {
    let mut merged: BTreeMap<String, ViewSpec> = BUILTIN_VIEWS
        .iter()
        .map(|(name, spec)| (name.to_string(), spec.clone()))
        .collect();
    for (name, spec) in &config.views {
        merged.insert(name.clone(), spec.clone());
    }
    merged
}

/// Look up one view spec by name in the effective catalog.
pub fn resolve_spec(config: &PaginaConfig, name: &str) -> Option<ViewSpec> {
    config
        .views
        .get(name)
        .or_else(|| BUILTIN_VIEWS.get(name))
        .cloned()
}

/// Materialize a spec into a runnable view.
pub fn build_view(name: &str, spec: &ViewSpec) -> CollectionView<Record> {
    let mut view = CollectionView::new(name);
    view = match spec.rank {
        RankKind::Engagement => {
            view.with_rule(WeightedEngagement::new(spec.likes_weight, spec.comments_weight))
        }
        RankKind::Recency => view.with_rule(Recency),
        RankKind::None => view,
    };
    if !spec.search_fields.is_empty() {
        let keys = spec
            .search_fields
            .iter()
            .filter_map(|field| search_key_for(field))
            .collect();
        view = view.with_predicate(SubstringFilter::new(keys));
    }
    view
}

/// Resolve and materialize in one step.
pub fn resolve_view(config: &PaginaConfig, name: &str) -> Option<CollectionView<Record>> {
    resolve_spec(config, name).map(|spec| build_view(name, &spec))
}

/// Extractor for one configured field name. Unknown names were already
/// rejected by spec validation.
fn search_key_for(field: &str) -> Option<SearchKey<Record>> {
    match field {
        "title" => Some(SearchKey::text("title", |r| r.title.as_str())),
        "author" => Some(SearchKey::text("author", |r| r.author.as_str())),
        "tags" => Some(SearchKey::new("tags", |r: &Record| {
            r.tags.iter().map(|t| Cow::Borrowed(t.as_str())).collect()
        })),
        _ => None,
    }
}
