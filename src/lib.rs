pub mod cli;
pub mod config;
pub mod content;
pub mod context;
pub mod error;
pub mod links;
pub mod paginate;
pub mod per_item;
pub mod routing;

pub use crate::{
    context::Context,
    error::{Error, Result},
    links::{LinkContext, LinkOptions, render_links},
    paginate::{Page, PageDescriptor, PaginateOptions, paginate, plan_pages},
    per_item::{Extractor, PerItemOptions, create_page_per_item},
    routing::{PathPrefix, PrefixArgs, calculate_skip, paginated_path},
};

use crate::{
    cli::{Action, Args},
    config::{PaginateConfig, load_config},
    content::load_items,
};
use log::info;
use std::{fs, path::Path};

/// Runs one CLI action and returns what it would print.
pub fn run(args: Args) -> Result<String> {
    let cfg = load_config(&args.root)?;

    match args.action {
        Action::Pages {
            items,
            per_page,
            first_page,
            prefix,
            component,
            out,
        } => {
            let opts = PaginateOptions {
                items_per_page: per_page.unwrap_or(cfg.items_per_page),
                items_per_first_page: first_page.or(cfg.items_per_first_page),
                path_prefix: prefix.unwrap_or(cfg.path_prefix).into(),
                component: component.unwrap_or(cfg.component),
                context: Context::new(),
            };
            let items = load_items(&items)?;
            let mut pages = Vec::new();
            paginate(&items, &opts, |p| pages.push(p))?;
            emit(&pages, out.as_deref())
        }
        Action::Items {
            items,
            path_field,
            id_field,
            component,
            out,
        } => {
            let opts = item_options(&cfg, path_field, id_field, component);
            let items = load_items(&items)?;
            let mut pages = Vec::new();
            create_page_per_item(&items, &opts, |p| pages.push(p))?;
            emit(&pages, out.as_deref())
        }
        Action::Links {
            page,
            previous,
            next,
        } => render_links(
            &LinkContext {
                human_page_number: page,
                previous_page_path: previous,
                next_page_path: next,
            },
            &cfg.links,
        ),
    }
}

fn item_options(
    cfg: &PaginateConfig,
    path_field: Option<String>,
    id_field: Option<String>,
    component: Option<String>,
) -> PerItemOptions<serde_json::Value> {
    PerItemOptions {
        item_to_path: Extractor::Field(path_field.unwrap_or_else(|| cfg.item_path_field.clone())),
        item_to_id: Extractor::Field(id_field.unwrap_or_else(|| cfg.item_id_field.clone())),
        component: component.unwrap_or_else(|| cfg.item_component.clone()),
    }
}

/// Serializes registered pages; writes them to `out` when given, otherwise
/// returns them for stdout.
fn emit(pages: &[Page], out: Option<&Path>) -> Result<String> {
    let json = serde_json::to_string_pretty(pages)?;
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, &json)?;
            info!("wrote {} pages to {}", pages.len(), path.display());
            Ok(String::new())
        }
        None => Ok(json),
    }
}
