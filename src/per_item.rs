//! One page per item, each linked to its neighbours.

use log::{debug, info};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::{
    context::{Context, merge},
    error::{Error, Result},
    paginate::Page,
    routing::{next_item, previous_item},
};

/// How to read a string (a path or an id) off an item.
pub enum Extractor<T> {
    /// Dotted field path looked up on the serialized item, e.g.
    /// `"slug"` or `"frontmatter.slug"`.
    Field(String),
    With(Box<dyn Fn(&T) -> String>),
}

impl<T> Extractor<T> {
    pub fn with(f: impl Fn(&T) -> String + 'static) -> Self {
        Self::With(Box::new(f))
    }

    fn extract(&self, item: &T, value: &Value) -> Option<String> {
        match self {
            Self::Field(field) => lookup(value, field),
            Self::With(f) => Some(f(item)),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Field(field) => field.clone(),
            Self::With(_) => "<fn>".into(),
        }
    }
}

impl<T> From<&str> for Extractor<T> {
    fn from(field: &str) -> Self {
        Self::Field(field.to_string())
    }
}

impl<T> fmt::Debug for Extractor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(field) => f.debug_tuple("Field").field(field).finish(),
            Self::With(_) => f.write_str("With(..)"),
        }
    }
}

/// Reads a dotted field path as a string. Numbers and booleans are
/// stringified; anything else counts as missing.
pub fn lookup(value: &Value, field: &str) -> Option<String> {
    let found = field
        .split('.')
        .try_fold(value, |v, key| match v {
            Value::Object(map) => map.get(key),
            Value::Array(list) => key.parse::<usize>().ok().and_then(|i| list.get(i)),
            _ => None,
        })?;

    match found {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[derive(Debug)]
pub struct PerItemOptions<T> {
    pub item_to_path: Extractor<T>,
    pub item_to_id: Extractor<T>,
    pub component: String,
}

/// Linker-owned context keys. Sibling paths and ids are empty strings and
/// sibling items `null` at the ends of the list, so every key is present
/// on every page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemContext {
    pub page_id: String,
    pub previous_page_path: String,
    pub previous_item: Value,
    pub previous_page_id: String,
    pub next_page_path: String,
    pub next_item: Value,
    pub next_page_id: String,
}

/// Registers one page per item, in input order.
///
/// An item's own `context` object, if it has one, is the base of its page
/// context; the [`ItemContext`] keys override it.
pub fn create_page_per_item<T: Serialize>(
    items: &[T],
    opts: &PerItemOptions<T>,
    mut create_page: impl FnMut(Page),
) -> Result<()> {
    let values = items
        .iter()
        .map(serde_json::to_value)
        .collect::<serde_json::Result<Vec<Value>>>()?;

    let path_of = |i: usize| opts.item_to_path.extract(&items[i], &values[i]);
    let id_of = |i: usize| opts.item_to_id.extract(&items[i], &values[i]);

    let mut pages = Vec::with_capacity(items.len());
    for index in 0..items.len() {
        let path = path_of(index).ok_or_else(|| Error::MissingField {
            index,
            field: opts.item_to_path.describe(),
        })?;

        let prev = previous_item(&values, index).map(|_| index - 1);
        let next = next_item(&values, index).map(|_| index + 1);

        let linked = ItemContext {
            page_id: id_of(index).unwrap_or_default(),
            previous_page_path: prev.and_then(path_of).unwrap_or_default(),
            previous_item: prev.map_or(Value::Null, |i| values[i].clone()),
            previous_page_id: prev.and_then(id_of).unwrap_or_default(),
            next_page_path: next.and_then(path_of).unwrap_or_default(),
            next_item: next.map_or(Value::Null, |i| values[i].clone()),
            next_page_id: next.and_then(id_of).unwrap_or_default(),
        };

        let base = match values[index].get("context") {
            Some(Value::Object(ctx)) => ctx.clone(),
            _ => Context::new(),
        };

        pages.push(Page {
            path,
            component: opts.component.clone(),
            context: merge(base, &linked)?,
        });
    }

    // Only register once every item resolved, so a bad item registers nothing.
    for page in pages {
        debug!("item page {}", page.path);
        create_page(page);
    }
    info!("created {} item pages", items.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn slug_opts<T>() -> PerItemOptions<T> {
        PerItemOptions {
            item_to_path: "slug".into(),
            item_to_id: "id".into(),
            component: "post.html".into(),
        }
    }

    fn run<T: Serialize>(items: &[T], opts: &PerItemOptions<T>) -> Vec<Page> {
        let mut pages = Vec::new();
        create_page_per_item(items, opts, |p| pages.push(p)).unwrap();
        pages
    }

    #[test]
    fn links_neighbours_by_slug() {
        let items = vec![
            json!({ "slug": "a", "id": 1 }),
            json!({ "slug": "b", "id": 2 }),
            json!({ "slug": "c", "id": 3 }),
        ];
        let pages = run(&items, &slug_opts());

        assert_eq!(pages.len(), 3);
        let mid = &pages[1].context;
        assert_eq!(pages[1].path, "b");
        assert_eq!(mid["pageId"], "2");
        assert_eq!(mid["previousPagePath"], "a");
        assert_eq!(mid["previousPageId"], "1");
        assert_eq!(mid["previousItem"], items[0]);
        assert_eq!(mid["nextPagePath"], "c");
        assert_eq!(mid["nextItem"]["slug"], "c");

        let first = &pages[0].context;
        assert_eq!(first["previousPagePath"], "");
        assert_eq!(first["previousPageId"], "");
        assert_eq!(first["previousItem"], Value::Null);

        let last = &pages[2].context;
        assert_eq!(last["nextPagePath"], "");
        assert_eq!(last["nextPageId"], "");
        assert_eq!(last["nextItem"], Value::Null);
    }

    #[test]
    fn single_item_has_no_siblings() {
        let pages = run(&[json!({ "slug": "only" })], &slug_opts());
        let ctx = &pages[0].context;
        assert_eq!(ctx["pageId"], "");
        assert_eq!(ctx["previousPagePath"], "");
        assert_eq!(ctx["nextPagePath"], "");
    }

    #[test]
    fn empty_list_registers_nothing() {
        let items: Vec<Value> = Vec::new();
        assert!(run(&items, &slug_opts()).is_empty());
    }

    #[test]
    fn item_context_is_the_base() {
        let items = vec![
            json!({ "slug": "a", "context": { "lang": "en", "pageId": "mine" } }),
            json!({ "slug": "b" }),
        ];
        let pages = run(&items, &slug_opts());
        assert_eq!(pages[0].context["lang"], "en");
        assert_eq!(pages[0].context["pageId"], "");
        assert!(pages[1].context.get("lang").is_none());
    }

    #[test]
    fn closures_and_nested_fields() {
        #[derive(Serialize)]
        struct Post {
            frontmatter: Meta,
            n: u32,
        }
        #[derive(Serialize)]
        struct Meta {
            slug: String,
        }

        let posts: Vec<Post> = (1..=3)
            .map(|n| Post {
                frontmatter: Meta {
                    slug: format!("/posts/{n}"),
                },
                n,
            })
            .collect();
        let opts = PerItemOptions {
            item_to_path: "frontmatter.slug".into(),
            item_to_id: Extractor::with(|p: &Post| format!("post-{}", p.n)),
            component: "post.html".into(),
        };
        let pages = run(&posts, &opts);

        assert_eq!(pages[0].path, "/posts/1");
        assert_eq!(pages[0].context["nextPageId"], "post-2");
        assert_eq!(pages[2].context["previousPagePath"], "/posts/2");
    }

    #[test]
    fn missing_path_is_an_error() {
        let items = vec![json!({ "slug": "a" }), json!({ "title": "no slug" })];
        let mut pages = Vec::new();
        let err = create_page_per_item(&items, &slug_opts(), |p| pages.push(p)).unwrap_err();
        assert!(matches!(err, Error::MissingField { index: 1, .. }));
        assert!(pages.is_empty());
    }

    #[test]
    fn lookup_walks_objects_and_arrays() {
        let v = json!({ "a": { "b": [ { "c": "x" } ] }, "n": 4, "o": {} });
        assert_eq!(lookup(&v, "a.b.0.c").as_deref(), Some("x"));
        assert_eq!(lookup(&v, "n").as_deref(), Some("4"));
        assert_eq!(lookup(&v, "o"), None);
        assert_eq!(lookup(&v, "missing.x"), None);
    }
}
