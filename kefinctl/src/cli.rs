use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info, warn};

use kefin_core::admin::ConfigService;
use kefin_core::catalog::DefaultCatalog;
use kefin_core::items::active_sections;
use kefin_core::migration::{LegacyMigrator, MigrationOutcome, MigrationReport};
use kefin_core::ports::{ConfigPersistence, DisplayPreferenceStore};
use kefin_core::preferences::{
    PreferenceService, ResolvedSection, SaveOutcome, editor_list, move_section,
    renumber, toggle_section, visible_sections,
};

use crate::loader::{load_admin_overrides, load_legacy};
use crate::stores::{JsonFileConfigStore, JsonFilePreferenceStore};

const DEFAULT_STORE: &str = "kefin-home.json";

#[derive(Parser, Debug)]
#[command(name = "kefinctl", about = "Kefin home-screen configuration tool")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Inputs that make up the effective configuration.
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Stored home-screen configuration
    #[arg(long, default_value = DEFAULT_STORE)]
    pub store: PathBuf,
    /// Legacy flat configuration, migrated when nothing is stored yet
    #[arg(long)]
    pub legacy: Option<PathBuf>,
    /// Admin override document (falls back to KEFIN_ADMIN_CONFIG_PATH and
    /// KEFIN_ADMIN_CONFIG_JSON)
    #[arg(long)]
    pub admin: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a legacy configuration and save it to the store
    Migrate {
        #[arg(long)]
        legacy: PathBuf,
        #[arg(long, default_value = DEFAULT_STORE)]
        store: PathBuf,
        /// Print the result without writing the store
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the effective configuration as JSON
    Effective {
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// List the sections scheduled for a date
    Active {
        #[command(flatten)]
        config: ConfigArgs,
        /// Calendar date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show a user's section list as the order editor sees it
    Editor {
        #[command(flatten)]
        config: ConfigArgs,
        /// The user's display-preferences document
        #[arg(long)]
        prefs: PathBuf,
        /// Only list enabled sections, in render order
        #[arg(long)]
        visible: bool,
    },
    /// Reorder or toggle sections and save the user's preferences
    SaveOrder {
        #[command(flatten)]
        config: ConfigArgs,
        #[arg(long)]
        prefs: PathBuf,
        /// Section ids to move to the top, in this order
        #[arg(long, value_delimiter = ',')]
        order: Vec<String>,
        #[arg(long, value_delimiter = ',')]
        enable: Vec<String>,
        #[arg(long, value_delimiter = ',')]
        disable: Vec<String>,
    },
    /// Print the host's native home-section slots
    Slots {
        #[arg(long)]
        prefs: PathBuf,
    },
}

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Migrate {
            legacy,
            store,
            dry_run,
        } => migrate(&legacy, &store, dry_run).await,
        Command::Effective { config } => {
            let service = effective_config(&config).await?;
            let json = serde_json::to_string_pretty(&*service.get_config())
                .context("failed to encode configuration")?;
            println!("{json}");
            Ok(())
        }
        Command::Active { config, date } => {
            let service = effective_config(&config).await?;
            let today = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let effective = service.get_config();
            for (category, section) in active_sections(&effective, today) {
                println!("{category:<10} {:<40} {}", section.id, section.name);
            }
            Ok(())
        }
        Command::Editor {
            config,
            prefs,
            visible,
        } => {
            let service = effective_config(&config).await?;
            let preferences = preference_service(&prefs);
            let resolved = preferences.load(&service.get_config()).await;
            let list = if visible {
                visible_sections(&resolved)
            } else {
                editor_list(&resolved)
            };
            print_sections(&list);
            Ok(())
        }
        Command::SaveOrder {
            config,
            prefs,
            order,
            enable,
            disable,
        } => {
            let service = effective_config(&config).await?;
            let preferences = preference_service(&prefs);
            let mut list = editor_list(&preferences.load(&service.get_config()).await);
            edit_list(&mut list, &order, &enable, &disable)?;

            match preferences.save(&list).await? {
                SaveOutcome::Saved => {
                    info!(path = %prefs.display(), "preferences saved");
                    print_sections(&list);
                    Ok(())
                }
                SaveOutcome::Coalesced => {
                    warn!("another save was in progress; nothing written");
                    Ok(())
                }
                SaveOutcome::NotPersisted => bail!("preference store refused the write"),
            }
        }
        Command::Slots { prefs } => {
            let document = JsonFilePreferenceStore::new(&prefs)
                .get_user_display_preferences()
                .await
                .with_context(|| format!("failed to read {}", prefs.display()))?;
            for (key, token) in document.native_slots().entries() {
                println!("{key} {token}");
            }
            Ok(())
        }
    }
}

async fn migrate(legacy: &Path, store: &Path, dry_run: bool) -> Result<()> {
    let legacy = load_legacy(legacy)?;
    let file_store = JsonFileConfigStore::new(store);
    let stored = file_store
        .load()
        .with_context(|| format!("failed to read {}", store.display()))?;

    let persistence: Option<Arc<dyn ConfigPersistence>> = if dry_run {
        None
    } else {
        Some(Arc::new(file_store))
    };
    let migrator = LegacyMigrator::with_builtin(persistence);

    match migrator.run(stored.as_ref(), Some(&legacy)).await {
        MigrationOutcome::Skipped(reason) => {
            println!("skipped: {reason:?}");
        }
        MigrationOutcome::Migrated { report, persisted } => {
            print_report(&report);
            if dry_run {
                let json = serde_json::to_string_pretty(&report.config)
                    .context("failed to encode configuration")?;
                println!("{json}");
            } else if !persisted {
                bail!("migration ran but {} was not written", store.display());
            }
        }
    }
    Ok(())
}

async fn effective_config(args: &ConfigArgs) -> Result<ConfigService> {
    let store = JsonFileConfigStore::new(&args.store);
    let stored = store
        .load()
        .with_context(|| format!("failed to read {}", args.store.display()))?;
    let legacy = args.legacy.as_deref().map(load_legacy).transpose()?;
    let (overrides, source) = load_admin_overrides(args.admin.as_deref())?;
    debug!(?source, "admin overrides loaded");

    let migrator = LegacyMigrator::with_builtin(Some(Arc::new(store)));
    let (service, outcome) = ConfigService::bootstrap(
        DefaultCatalog::builtin(),
        &migrator,
        stored,
        legacy.as_ref(),
        Some(&overrides),
    )
    .await;
    if let MigrationOutcome::Migrated { report, persisted } = &outcome {
        info!(persisted, "legacy configuration migrated");
        if !report.is_complete() {
            warn!(failed = report.failed_steps.len(), "migration was partial");
        }
    }
    Ok(service)
}

fn preference_service(path: &Path) -> PreferenceService {
    let store: Arc<dyn DisplayPreferenceStore> =
        Arc::new(JsonFilePreferenceStore::new(path));
    PreferenceService::new(Some(store))
}

/// Moves `order` to the top in the given order, then applies the toggles.
fn edit_list(
    list: &mut Vec<ResolvedSection>,
    order: &[String],
    enable: &[String],
    disable: &[String],
) -> Result<()> {
    let mut seen = HashSet::new();
    for (target, id) in order.iter().enumerate() {
        if !seen.insert(id.as_str()) {
            bail!("section '{id}' listed more than once");
        }
        let Some(from) = list.iter().position(|section| section.id == *id) else {
            bail!("unknown section '{id}'");
        };
        move_section(list, from, target);
    }
    for (ids, enabled) in [(enable, true), (disable, false)] {
        for id in ids {
            if !toggle_section(list, id, enabled) {
                bail!("unknown section '{id}'");
            }
        }
    }
    renumber(list);
    Ok(())
}

fn print_sections(list: &[ResolvedSection]) {
    for section in list {
        let mark = if section.enabled { 'x' } else { ' ' };
        println!(
            "{:>5} [{mark}] {:<40} {}",
            section.order, section.id, section.name
        );
    }
}

fn print_report(report: &MigrationReport) {
    println!("overlaid: {}", report.overlaid);
    println!("synthesized: {}", report.synthesized);
    println!("converted to custom: {}", report.converted_to_custom);
    for failure in &report.failed_steps {
        println!("failed step {}: {}", failure.step, failure.error);
    }
    for key in &report.dropped {
        println!("dropped: {key}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> Vec<ResolvedSection> {
        vec![
            ResolvedSection::new("resume", 0, true),
            ResolvedSection::new("watchlist", 10, true),
            ResolvedSection::new("upcoming", 20, false),
        ]
    }

    fn ids(list: &[ResolvedSection]) -> Vec<&str> {
        list.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn listed_ids_move_to_the_top() {
        let mut list = list();
        let order = vec!["upcoming".to_string(), "watchlist".to_string()];
        edit_list(&mut list, &order, &["upcoming".to_string()], &[]).unwrap();
        assert_eq!(ids(&list), vec!["upcoming", "watchlist", "resume"]);
        assert!(list[0].enabled);
        assert_eq!(list[2].order, 20);
    }

    #[test]
    fn unknown_or_repeated_ids_are_rejected() {
        let mut list = list();
        assert!(edit_list(&mut list, &["nope".to_string()], &[], &[]).is_err());
        let twice = vec!["resume".to_string(), "resume".to_string()];
        assert!(edit_list(&mut list, &twice, &[], &[]).is_err());
        assert!(edit_list(&mut list, &[], &[], &["nope".to_string()]).is_err());
    }

    #[test]
    fn save_order_splits_comma_lists() {
        let cli = Cli::try_parse_from([
            "kefinctl",
            "save-order",
            "--prefs",
            "prefs.json",
            "--order",
            "watchlist,resume",
            "--disable",
            "upcoming",
        ])
        .unwrap();
        let Command::SaveOrder {
            order,
            disable,
            config,
            ..
        } = cli.command
        else {
            panic!("expected save-order");
        };
        assert_eq!(order, vec!["watchlist", "resume"]);
        assert_eq!(disable, vec!["upcoming"]);
        assert_eq!(config.store, PathBuf::from(DEFAULT_STORE));
    }

    #[test]
    fn active_parses_a_calendar_date() {
        let cli =
            Cli::try_parse_from(["kefinctl", "active", "--date", "2024-12-25"])
                .unwrap();
        let Command::Active { date, .. } = cli.command else {
            panic!("expected active");
        };
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 12, 25));
    }
}
