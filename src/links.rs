use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tera::{Context, Tera};

use crate::{context, error::Result};

const TEMPLATE_NAME: &str = "pagination_links.html";

const TEMPLATE: &str = concat!(
    r#"<div class="has-text-centered">"#,
    r#"{% if prev.href %}<a href="{{ prev.href }}""#,
    r#"{% if prev.style %} style="{{ prev.style }}"{% endif %}>{{ prev.label }}</a>"#,
    r#"{% else %}<span{% if prev.style %} style="{{ prev.style }}"{% endif %}>"#,
    r#"{{ prev.label }}</span>{% endif %}"#,
    "{{ separator }}{{ page_label }}{{ separator }}",
    r#"{% if next.href %}<a href="{{ next.href }}""#,
    r#"{% if next.style %} style="{{ next.style }}"{% endif %}>{{ next.label }}</a>"#,
    r#"{% else %}<span{% if next.style %} style="{{ next.style }}"{% endif %}>"#,
    r#"{{ next.label }}</span>{% endif %}"#,
    "</div>",
);

/// Inline styles keyed by camelCase property name, e.g. `textDecorationLine`.
pub type Style = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkOptions {
    pub previous_label: String,
    pub next_label: String,
    /// `%d` is replaced with the human page number.
    pub page_label: String,
    pub separator: String,
    pub active_style: Style,
    pub inactive_style: Style,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            previous_label: "← previous".to_string(),
            next_label: "next →".to_string(),
            page_label: "Page: %d".to_string(),
            separator: " - ".to_string(),
            active_style: Style::new(),
            inactive_style: Style::from([
                ("textDecorationLine".to_string(), "line-through".to_string()),
                ("color".to_string(), "grey".to_string()),
            ]),
        }
    }
}

/// The parts of a page context the navigation strip needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkContext {
    pub human_page_number: usize,
    #[serde(default)]
    pub previous_page_path: String,
    #[serde(default)]
    pub next_page_path: String,
}

impl LinkContext {
    /// Reads the navigation fields out of a generated page context.
    pub fn from_context(ctx: &context::Context) -> Result<Self> {
        Ok(serde_json::from_value(Value::Object(ctx.clone()))?)
    }
}

/// CSS declarations for a style map, camelCase properties turned kebab-case.
pub fn css(style: &Style) -> String {
    style
        .iter()
        .map(|(prop, value)| {
            let mut name = String::with_capacity(prop.len() + 4);
            for ch in prop.chars() {
                if ch.is_ascii_uppercase() {
                    name.push('-');
                    name.push(ch.to_ascii_lowercase());
                } else {
                    name.push(ch);
                }
            }
            format!("{name}: {value}")
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Serialize)]
struct LinkView<'a> {
    label: &'a str,
    href: &'a str,
    style: String,
}

pub struct LinkRenderer {
    tera: Tera,
    options: LinkOptions,
}

impl LinkRenderer {
    pub fn new(options: LinkOptions) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, TEMPLATE)?;
        Ok(Self { tera, options })
    }

    fn view<'a>(&'a self, label: &'a str, href: &'a str) -> LinkView<'a> {
        let style = if href.is_empty() {
            &self.options.inactive_style
        } else {
            &self.options.active_style
        };
        LinkView {
            label,
            href,
            style: css(style),
        }
    }

    pub fn render(&self, page: &LinkContext) -> Result<String> {
        let mut ctx = Context::new();
        ctx.insert(
            "prev",
            &self.view(&self.options.previous_label, &page.previous_page_path),
        );
        ctx.insert("next", &self.view(&self.options.next_label, &page.next_page_path));
        ctx.insert("separator", &self.options.separator);
        ctx.insert(
            "page_label",
            &self
                .options
                .page_label
                .replace("%d", &page.human_page_number.to_string()),
        );

        Ok(self.tera.render(TEMPLATE_NAME, &ctx)?)
    }
}

pub fn render_links(page: &LinkContext, options: &LinkOptions) -> Result<String> {
    LinkRenderer::new(options.clone())?.render(page)
}

/// Makes `pagination_links(page=...)` available to a site's templates.
///
/// The argument is a page context (or anything carrying
/// `humanPageNumber`, `previousPagePath` and `nextPagePath`). The result is
/// HTML, so pipe it through `safe`.
pub fn register(tera: &mut Tera, options: LinkOptions) -> Result<()> {
    let renderer = LinkRenderer::new(options)?;
    tera.register_function(
        "pagination_links",
        move |args: &HashMap<String, Value>| -> tera::Result<Value> {
            let page = args
                .get("page")
                .ok_or_else(|| tera::Error::msg("pagination_links: missing `page` argument"))?;
            let page: LinkContext = serde_json::from_value(page.clone())
                .map_err(|e| tera::Error::msg(format!("pagination_links: {e}")))?;
            renderer
                .render(&page)
                .map(Value::String)
                .map_err(|e| tera::Error::msg(e.to_string()))
        },
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(n: usize, prev: &str, next: &str) -> LinkContext {
        LinkContext {
            human_page_number: n,
            previous_page_path: prev.into(),
            next_page_path: next.into(),
        }
    }

    #[test]
    fn middle_page_links_both_ways() {
        let html = render_links(&page(2, "/blog", "/blog/3"), &LinkOptions::default()).unwrap();
        assert_eq!(
            html,
            "<div class=\"has-text-centered\">\
             <a href=\"&#x2F;blog\">← previous</a> - Page: 2 - \
             <a href=\"&#x2F;blog&#x2F;3\">next →</a></div>"
        );
    }

    #[test]
    fn boundaries_render_inert_text() {
        let html = render_links(&page(1, "", "/2"), &LinkOptions::default()).unwrap();
        assert!(html.contains(
            "<span style=\"color: grey; text-decoration-line: line-through\">← previous</span>"
        ));
        assert!(html.contains("Page: 1"));

        let html = render_links(&page(3, "/2", ""), &LinkOptions::default()).unwrap();
        assert!(html.contains(
            "<span style=\"color: grey; text-decoration-line: line-through\">next →</span>"
        ));
    }

    #[test]
    fn custom_labels_are_escaped() {
        let opts = LinkOptions {
            previous_label: "<prev>".into(),
            page_label: "%d of many".into(),
            separator: " | ".into(),
            active_style: Style::from([("fontWeight".to_string(), "bold".to_string())]),
            ..Default::default()
        };
        let html = render_links(&page(4, "/3", "/5"), &opts).unwrap();
        assert!(html.contains("&lt;prev&gt;"));
        assert!(html.contains(" | 4 of many | "));
        assert!(html.contains("style=\"font-weight: bold\""));
    }

    #[test]
    fn reads_from_page_context() {
        let ctx = serde_json::json!({
            "humanPageNumber": 2,
            "previousPagePath": "/",
            "nextPagePath": "",
            "skip": 10,
        });
        let Value::Object(ctx) = ctx else { unreachable!() };
        let link = LinkContext::from_context(&ctx).unwrap();
        assert_eq!(link, page(2, "/", ""));
    }

    #[test]
    fn available_as_template_function() {
        let mut tera = Tera::default();
        register(&mut tera, LinkOptions::default()).unwrap();
        tera.add_raw_template("list.html", "<nav>{{ pagination_links(page=page) | safe }}</nav>")
            .unwrap();

        let mut ctx = Context::new();
        ctx.insert("page", &page(1, "", ""));
        let html = tera.render("list.html", &ctx).unwrap();
        assert!(html.starts_with("<nav><div class=\"has-text-centered\"><span"));
        assert!(html.contains("Page: 1"));
    }
}
