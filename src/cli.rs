use clap::{Parser, Subcommand};
use std::path::PathBuf;

// All arguments
#[derive(Parser, Debug)]
#[command(name = "ssg-paginate", version, about)]
pub struct Args {
    /// Directory holding paginate.toml
    #[arg(short, long, global = true, default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub action: Action,
}

// All available actions
#[derive(Subcommand, Debug)]
pub enum Action {
    /// Split items into numbered listing pages
    Pages {
        /// Data file (.json, .yaml, .toml) or directory of Markdown files
        #[arg(short, long)]
        items: PathBuf,

        #[arg(long)]
        per_page: Option<usize>,

        #[arg(long)]
        first_page: Option<usize>,

        #[arg(long)]
        prefix: Option<String>,

        #[arg(long)]
        component: Option<String>,

        /// Write JSON here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// One page per item, linked to its neighbours
    Items {
        #[arg(short, long)]
        items: PathBuf,

        #[arg(long)]
        path_field: Option<String>,

        #[arg(long)]
        id_field: Option<String>,

        #[arg(long)]
        component: Option<String>,

        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Render the previous / next navigation strip
    Links {
        /// 1-based page number
        #[arg(long)]
        page: usize,

        #[arg(long, default_value = "")]
        previous: String,

        #[arg(long, default_value = "")]
        next: String,
    },
}
