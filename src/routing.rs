use std::fmt;

/// Arguments handed to a computed path prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixArgs {
    pub page_number: usize,
    pub number_of_pages: usize,
}

/// Where paginated pages live.
///
/// A literal prefix is used as-is for every page; a computed prefix is
/// called once per resolved page path.
pub enum PathPrefix {
    Literal(String),
    Computed(Box<dyn Fn(PrefixArgs) -> String>),
}

impl PathPrefix {
    pub fn computed(f: impl Fn(PrefixArgs) -> String + 'static) -> Self {
        Self::Computed(Box::new(f))
    }

    pub fn resolve(&self, args: PrefixArgs) -> String {
        match self {
            Self::Literal(s) => s.clone(),
            Self::Computed(f) => f(args),
        }
    }
}

impl Default for PathPrefix {
    fn default() -> Self {
        Self::Literal("/".into())
    }
}

impl fmt::Debug for PathPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<&str> for PathPrefix {
    fn from(s: &str) -> Self {
        Self::Literal(s.to_string())
    }
}

impl From<String> for PathPrefix {
    fn from(s: String) -> Self {
        Self::Literal(s)
    }
}

/// Path of the zero-indexed `page_number`, or an empty string when that
/// page does not exist.
pub fn paginated_path(prefix: &PathPrefix, page_number: usize, number_of_pages: usize) -> String {
    if page_number >= number_of_pages {
        return String::new();
    }

    let prefix = prefix.resolve(PrefixArgs {
        page_number,
        number_of_pages,
    });

    if page_number == 0 {
        return prefix;
    }

    // "/" would otherwise produce "//2"
    let head = if prefix == "/" { "" } else { prefix.as_str() };
    format!("{head}/{}", page_number + 1)
}

/// Path of the page `offset` steps away from `page_number`; empty when
/// that lands before the first or after the last page.
pub fn sibling_path(
    prefix: &PathPrefix,
    page_number: usize,
    offset: isize,
    number_of_pages: usize,
) -> String {
    match page_number.checked_add_signed(offset) {
        Some(p) => paginated_path(prefix, p, number_of_pages),
        None => String::new(),
    }
}

/// Inverse of [`paginated_path`] for a literal prefix.
pub fn page_number_from_path(prefix: &str, path: &str) -> Option<usize> {
    if path == prefix {
        return Some(0);
    }
    let head = if prefix == "/" { "" } else { prefix };
    let human: usize = path.strip_prefix(head)?.strip_prefix('/')?.parse().ok()?;
    (human >= 2).then(|| human - 1)
}

pub fn calculate_skip(page_number: usize, first_page_count: usize, items_per_page: usize) -> usize {
    match page_number {
        0 => 0,
        1 => first_page_count,
        p => first_page_count + items_per_page * (p - 1),
    }
}

pub fn previous_item<T>(items: &[T], index: usize) -> Option<&T> {
    index.checked_sub(1).and_then(|i| items.get(i))
}

pub fn next_item<T>(items: &[T], index: usize) -> Option<&T> {
    items.get(index.checked_add(1)?)
}

pub fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut dash = false;
    for ch in s.chars().flat_map(|c| c.to_lowercase()) {
        if ch.is_ascii_alphanumeric() {
            out.push(ch);
            dash = false;
        } else if matches!(ch, ' ' | '-' | '_' | '.') && !dash && !out.is_empty() {
            out.push('-');
            dash = true;
        }
    }
    if out.ends_with('-') {
        out.pop();
    }
    if out.is_empty() {
        "untitled".into()
    } else {
        out
    }
}
