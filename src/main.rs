mod api;
mod config;
mod error;
mod import;
mod preview;
mod resource;
mod settings;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use api::ApiClient;
use config::AppConfig;
use import::session::ImportSession;
use resource::screen::{PendingWrite, Screen, ScreenError};
use resource::{BlogComment, JobPosting, Record, Resource, TeamMember};
use settings::{FieldGroup, FieldKind, SiteSettings};

#[derive(Parser)]
#[command(name = "cms_admin", about = "Content admin: blog CSV import, listings, site settings")]
struct Cli {
    /// Config file (default: ./cms_admin.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a blog CSV and show what would be submitted
    Preview {
        file: Option<PathBuf>,
        /// Print the JSON payload instead of the text preview
        #[arg(long)]
        json: bool,
    },
    /// Parse a blog CSV, preview it and submit it to the blog endpoint
    Import {
        file: Option<PathBuf>,
        /// Stop after the preview
        #[arg(long)]
        dry_run: bool,
    },
    /// Job listings
    Jobs {
        #[command(subcommand)]
        action: ResourceAction,
    },
    /// Team members
    Team {
        #[command(subcommand)]
        action: ResourceAction,
    },
    /// Blog comments
    Comments {
        /// Only comments on this blog
        #[arg(long, global = true)]
        blog: Option<i64>,
        #[command(subcommand)]
        action: ResourceAction,
    },
    /// Published blog posts
    Blogs {
        #[command(subcommand)]
        action: BlogAction,
    },
    /// Global site settings (menus, social links, SEO, tracking)
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum ResourceAction {
    /// List all items
    List,
    /// Print every field of one item
    Show { id: i64 },
    /// Create an item from field values
    Create(FieldArgs),
    /// Patch an existing item
    Update {
        id: i64,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete an item
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum BlogAction {
    /// Print a post and the comments left on it
    Show { id: i64 },
}

#[derive(Args)]
struct FieldArgs {
    /// Field assignment, e.g. --set job_title="Backend Engineer" (repeatable)
    #[arg(long = "set", value_parser = parse_assignment)]
    set: Vec<(String, String)>,
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the current settings
    Show,
    /// Set a general field (site_title, company_name, contact_email, ...)
    Set { key: String, value: String },
    MenuAdd { item: String },
    MenuRename { old: String, new: String },
    MenuRemove { item: String },
    FooterAdd { category: String, item: String },
    FooterRemove { category: String, item: String },
    /// Add or update a social link
    SocialSet { platform: String, url: String },
    SocialRemove { platform: String },
    /// Add or update an SEO field
    SeoSet {
        label: String,
        value: String,
        #[arg(long)]
        note: Option<String>,
        #[arg(long, value_parser = parse_kind)]
        kind: Option<FieldKind>,
    },
    SeoRemove { label: String },
    /// Add or update a tracking field
    TrackingSet {
        label: String,
        value: String,
        #[arg(long)]
        note: Option<String>,
        #[arg(long, value_parser = parse_kind)]
        kind: Option<FieldKind>,
    },
    TrackingRemove { label: String },
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field name in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

fn parse_kind(s: &str) -> Result<FieldKind, String> {
    match s.to_ascii_lowercase().as_str() {
        "text" => Ok(FieldKind::Text),
        "textarea" => Ok(FieldKind::Textarea),
        "url" => Ok(FieldKind::Url),
        other => Err(format!("unknown field kind '{}' (text, textarea, url)", other)),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let cfg = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    info!(api = %cfg.api_base_url, "Configuration loaded");

    let result = match cli.command {
        Commands::Preview { file, json } => {
            let mut session = ImportSession::new();
            let doc = session.parse_file(file.as_deref())?;
            if json {
                println!("{}", preview::to_json(doc)?);
            } else {
                println!("{}", preview::render(doc));
            }
            Ok(())
        }
        Commands::Import { file, dry_run } => run_import(&cfg, file.as_deref(), dry_run).await,
        Commands::Jobs { action } => run_resource(&cfg, action, |_: &JobPosting| true).await,
        Commands::Team { action } => run_resource(&cfg, action, |_: &TeamMember| true).await,
        Commands::Comments { blog, action } => {
            let blog = blog.map(|id| id.to_string());
            let keep = move |c: &BlogComment| blog.as_deref().map_or(true, |b| c.is_for_blog(b));
            run_resource(&cfg, action, keep).await
        }
        Commands::Blogs {
            action: BlogAction::Show { id },
        } => run_blog_show(&cfg, id).await,
        Commands::Settings { action } => run_settings(&cfg.settings_path, action),
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

async fn run_import(cfg: &AppConfig, file: Option<&Path>, dry_run: bool) -> anyhow::Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};

    let mut session = ImportSession::new();
    let doc = session.parse_file(file)?;
    println!("{}", preview::render(doc));
    if dry_run {
        println!("\nDry run: nothing submitted.");
        return Ok(());
    }

    let api = ApiClient::from_config(cfg)?;
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message("Submitting...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = session.submit(&api).await;
    spinner.finish_and_clear();

    match result {
        Ok(()) => {
            println!("\nBlog posted successfully!");
            Ok(())
        }
        Err(e) if e.is_retryable() => {
            println!("\nFailed to submit blog. The parsed document is unchanged; run the import again to retry.");
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

async fn run_blog_show(cfg: &AppConfig, id: i64) -> anyhow::Result<()> {
    let api = ApiClient::from_config(cfg)?;
    let (blog, comments) = tokio::join!(api.blog_details(id), api.list::<BlogComment>());
    let blog = blog.with_context(|| format!("Failed to load blog {}", id))?;
    let comments = comments.context("Failed to load comments")?;

    let key = id.to_string();
    let mine: Vec<&Record<BlogComment>> =
        comments.iter().filter(|c| c.fields.is_for_blog(&key)).collect();
    println!("{}", blog.report(id, &mine));
    Ok(())
}

/// `keep` narrows what `list` and the post-write listing print.
async fn run_resource<R: Resource>(
    cfg: &AppConfig,
    action: ResourceAction,
    keep: impl Fn(&R) -> bool,
) -> anyhow::Result<()> {
    let api = ApiClient::from_config(cfg)?;
    let mut screen: Screen<R> = Screen::new();
    screen.load(
        api.list::<R>()
            .await
            .with_context(|| format!("Failed to fetch {} list", R::LABEL))?,
    );

    let write = match action {
        ResourceAction::List => {
            print_items(&visible(screen.items(), &keep));
            return Ok(());
        }
        ResourceAction::Show { id } => {
            let record = screen.find(id).ok_or(ScreenError::NotFound(id))?;
            println!("{}", details_text(record));
            return Ok(());
        }
        ResourceAction::Create(fields) => {
            screen.open_create()?;
            fill_form(&mut screen, &fields.set)?
        }
        ResourceAction::Update { id, fields } => {
            screen.open_edit(id)?;
            fill_form(&mut screen, &fields.set)?
        }
        ResourceAction::Delete { id } => {
            screen.request_delete(id)?;
            screen.confirm_delete()?
        }
    };

    let result = api.apply(&write).await;
    screen.finish(result.is_ok())?;
    if let Err(e) = result {
        println!("Failed to save {}.", R::LABEL.to_lowercase());
        return Err(e.into());
    }

    let verb = match write {
        PendingWrite::Create(_) => "created",
        PendingWrite::Update { .. } => "updated",
        PendingWrite::Delete { .. } => "deleted",
    };
    println!("{} {} successfully!", R::LABEL, verb);

    screen.load(api.list::<R>().await?);
    print_items(&visible(screen.items(), &keep));
    Ok(())
}

fn visible<'a, R>(items: &'a [Record<R>], keep: &impl Fn(&R) -> bool) -> Vec<&'a Record<R>> {
    items.iter().filter(|r| keep(&r.fields)).collect()
}

fn details_text<R: Resource>(record: &Record<R>) -> String {
    let details = record.fields.details();
    let width = details.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let mut lines = vec![format!("{} #{}", R::LABEL, record.id)];
    for (label, value) in details {
        let value = if value.is_empty() { "-".to_string() } else { value };
        lines.push(format!("  {:<width$}  {}", label, value, width = width));
    }
    lines.join("\n")
}

fn fill_form<R: Resource>(
    screen: &mut Screen<R>,
    fields: &[(String, String)],
) -> anyhow::Result<PendingWrite<R>> {
    for (key, value) in fields {
        screen.set_field(key, value)?;
    }
    match screen.request_save() {
        Ok(write) => Ok(write),
        Err(ScreenError::Validation(errors)) => {
            println!("Please fill in all required fields:");
            for e in &errors {
                println!("  {}", e);
            }
            bail!("{} not saved: {} invalid field(s)", R::LABEL, errors.len())
        }
        Err(e) => Err(e.into()),
    }
}

fn print_items<R: Resource>(items: &[&Record<R>]) {
    if items.is_empty() {
        println!("No {} items found.", R::LABEL.to_lowercase());
        return;
    }
    println!("{:>5} | {}", "id", R::LABEL);
    println!("{}", "-".repeat(60));
    for record in items {
        println!("{:>5} | {}", record.id, truncate(&record.fields.summary(), 90));
    }
    println!("\n{} items", items.len());
}

fn run_settings(path: &Path, action: SettingsAction) -> anyhow::Result<()> {
    let mut site = SiteSettings::load(path)?;

    match action {
        SettingsAction::Show => {
            print_settings(&site);
            return Ok(());
        }
        SettingsAction::Set { key, value } => site.set_general(&key, &value)?,
        SettingsAction::MenuAdd { item } => site.add_menu_item(&item),
        SettingsAction::MenuRename { old, new } => site.rename_menu_item(&old, &new)?,
        SettingsAction::MenuRemove { item } => site.remove_menu_item(&item)?,
        SettingsAction::FooterAdd { category, item } => site.add_footer_item(&category, &item)?,
        SettingsAction::FooterRemove { category, item } => {
            site.remove_footer_item(&category, &item)?
        }
        SettingsAction::SocialSet { platform, url } => site.set_social_link(&platform, &url),
        SettingsAction::SocialRemove { platform } => site.remove_social_link(&platform)?,
        SettingsAction::SeoSet { label, value, note, kind } => {
            site.set_field(FieldGroup::Seo, &label, &value, kind, note.as_deref())
        }
        SettingsAction::SeoRemove { label } => site.remove_field(FieldGroup::Seo, &label)?,
        SettingsAction::TrackingSet { label, value, note, kind } => {
            site.set_field(FieldGroup::Tracking, &label, &value, kind, note.as_deref())
        }
        SettingsAction::TrackingRemove { label } => {
            site.remove_field(FieldGroup::Tracking, &label)?
        }
    }

    site.save(path)?;
    println!("Settings saved to {}", path.display());
    Ok(())
}

fn print_settings(site: &SiteSettings) {
    let g = &site.general;
    println!("--- General ---");
    println!("Site title:   {}", g.site_title);
    println!("Company:      {}", g.company_name);
    println!("Description:  {}", g.site_description);
    println!("Logo:         {}", g.logo_url);
    println!("Email:        {}", g.contact_email);
    println!("Phone:        {}", g.contact_phone);
    println!("Address:      {}", g.business_address);

    println!("\n--- Menu ---");
    println!("  {}", site.menu.join(" | "));
    for (category, items) in &site.footer {
        println!("  {}: {}", category, items.join(", "));
    }

    println!("\n--- Social Media ---");
    for link in &site.social_links {
        println!("  {}: {}", link.platform, link.url);
    }

    for (title, fields) in [("SEO", &site.seo), ("Tracking", &site.tracking)] {
        println!("\n--- {} ---", title);
        for f in fields {
            println!("  {}: {}", f.label, truncate(&f.value, 60));
            if !f.note.is_empty() {
                println!("      ({})", f.note);
            }
        }
    }

    if let Some(at) = site.updated_at {
        println!("\nLast saved {}", at.format("%Y-%m-%d %H:%M UTC"));
    }
}

/// Cut to `max` characters, marking the cut with `...`.
fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &s[..cut]),
        None => s.to_string(),
    }
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    match (secs / 3600, secs % 3600 / 60, secs % 60) {
        (0, 0, _) => format!("{:.1}s", d.as_secs_f64()),
        (0, m, s) => format!("{}m {}s", m, s),
        (h, m, s) => format!("{}h {}m {}s", h, m, s),
    }
}
