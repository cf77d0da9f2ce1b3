//! Filter predicates and substring search keys
//!
//! A filter predicate decides whether an item matches free-form query
//! text. The pipeline trims the text and skips filtering entirely when
//! nothing remains; predicates receive the trimmed text verbatim and own
//! any further normalization. [`SubstringFilter`] is the bundled
//! predicate: case-insensitive containment over one or more named
//! [`SearchKey`] extractors, matching when ANY extracted value matches.

use std::borrow::Cow;
use std::fmt;

/// Filtering seam for searchable views.
pub trait FilterPredicate<T> {
    /// Whether `item` matches the trimmed, non-empty `query` text.
    fn matches(&self, item: &T, query: &str) -> bool;
}

/// Boxed filter predicate, as held by a view.
pub type BoxedPredicate<T> = Box<dyn FilterPredicate<T> + Send + Sync>;

/// Any matching closure is a filter predicate.
impl<T, F> FilterPredicate<T> for F
where
    F: Fn(&T, &str) -> bool,
{
    fn matches(&self, item: &T, query: &str) -> bool {
        self(item, query)
    }
}

/// Extractor closure pulling searchable text out of an item. Values may
/// borrow from the item; multi-valued fields return one entry per value.
type KeyFn<T> = Box<dyn for<'a> Fn(&'a T) -> Vec<Cow<'a, str>> + Send + Sync>;

/// A named extractor for one searchable field.
pub struct SearchKey<T> {
    name: String,
    extract: KeyFn<T>,
}

impl<T> SearchKey<T> {
    /// Key over a multi-valued extractor.
    pub fn new<F>(name: impl Into<String>, extract: F) -> Self
    where
        F: for<'a> Fn(&'a T) -> Vec<Cow<'a, str>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            extract: Box::new(extract),
        }
    }

    /// Key over a single borrowed text field.
    ///
    /// The captured `fn(&T) -> &str` pointer mentions `T`, so the wrapping
    /// closure is only `'static` when `T` is.
    pub fn text(name: impl Into<String>, extract: fn(&T) -> &str) -> Self
    where
        T: 'static,
    {
        Self::new(name, move |item| vec![Cow::Borrowed(extract(item))])
    }

    /// Field name, as listed in view configuration.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Extract this key's values from `item`.
    pub fn values<'a>(&self, item: &'a T) -> Vec<Cow<'a, str>> {
        (self.extract)(item)
    }
}

// Manual `Debug` because the extractor is a `Box<dyn Fn>`.
impl<T> fmt::Debug for SearchKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchKey")
            .field("name", &self.name)
            .field("extract", &"<fn>")
            .finish()
    }
}

/// Case-insensitive substring filter over named search keys.
///
/// An item matches when any key value contains the query, compared after
/// Unicode lowercasing of both sides. With no keys configured, nothing
/// matches a non-empty query.
pub struct SubstringFilter<T> {
    keys: Vec<SearchKey<T>>,
}

impl<T> SubstringFilter<T> {
    pub fn new(keys: Vec<SearchKey<T>>) -> Self {
        Self { keys }
    }

    /// Names of the searched fields, in declaration order.
    pub fn key_names(&self) -> Vec<&str> {
        self.keys.iter().map(|key| key.name()).collect()
    }
}

impl<T> FilterPredicate<T> for SubstringFilter<T> {
    fn matches(&self, item: &T, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.keys.iter().any(|key| {
            key.values(item)
                .iter()
                .any(|value| value.to_lowercase().contains(&needle))
        })
    }
}

impl<T> fmt::Debug for SubstringFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubstringFilter")
            .field("keys", &self.key_names())
            .finish()
    }
}
