//! Subcommand handling for pumadevctl.
//!
//! A [`Session`] owns everything a command needs: the merged configuration,
//! build metadata, output flags, and the writer/reader pair used for output
//! and confirmations. Each command resolves the mappings directory, reads a
//! fresh snapshot through the store, and funnels every change back through
//! it.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::json;
use thiserror::Error;
use tokio::runtime::Runtime;

use crate::build_info::BuildInfo;
use crate::cli::{Cli, Commands};
use crate::config::{resolve_dir, Config, ConfigError};
use crate::doctor::{self, DoctorReport, INSTALL_URL};
use crate::entries::{group_by_mapping, EntryStore, Mapping, MappingError, StoreError};
use crate::error::ErrorClass;
use crate::output::{write_json, Formatter};
use crate::ports::{find_next_available_port_block, AllocError};
use crate::reach::{apply_cleanup, plan_cleanup, validate_store, ProbeOptions};

/// Argument combinations clap cannot reject on its own.
#[derive(Debug, Error)]
pub enum UsageError {
    /// `update` without a mapping or `--link`.
    #[error("mapping required unless --link is set")]
    MissingMapping,

    /// Some cleanup deletions failed.
    #[error("{0} entries could not be deleted")]
    CleanupIncomplete(usize),
}

/// Classify an error chain for the exit status.
///
/// The first library error found in the chain decides; anything else is an
/// I/O failure.
pub fn error_class(err: &anyhow::Error) -> ErrorClass {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<StoreError>() {
            return e.class();
        }
        if let Some(e) = cause.downcast_ref::<MappingError>() {
            return e.class();
        }
        if let Some(e) = cause.downcast_ref::<AllocError>() {
            return e.class();
        }
        if let Some(e) = cause.downcast_ref::<ConfigError>() {
            return e.class();
        }
        if let Some(e) = cause.downcast_ref::<UsageError>() {
            return match e {
                UsageError::MissingMapping => ErrorClass::InvalidInput,
                UsageError::CleanupIncomplete(_) => ErrorClass::IoFailure,
            };
        }
    }
    ErrorClass::IoFailure
}

/// Output switches shared by every command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputFlags {
    /// Skip confirmations; overwrite on create.
    pub force: bool,
    /// Emit JSON.
    pub json: bool,
    /// Suppress non-essential lines.
    pub quiet: bool,
    /// Use ANSI colors.
    pub color: bool,
}

impl OutputFlags {
    /// Flags from parsed arguments.
    #[must_use]
    pub fn from_cli(cli: &Cli, color: bool) -> Self {
        Self {
            force: cli.force,
            json: cli.json,
            quiet: cli.quiet,
            color: color && !cli.json,
        }
    }
}

/// One invocation's worth of state.
pub struct Session<'a> {
    config: Config,
    build: BuildInfo,
    flags: OutputFlags,
    out: &'a mut dyn Write,
    input: &'a mut dyn BufRead,
}

impl<'a> Session<'a> {
    /// Create a session writing to `out` and reading confirmations from `input`.
    pub fn new(
        config: Config,
        build: BuildInfo,
        flags: OutputFlags,
        out: &'a mut dyn Write,
        input: &'a mut dyn BufRead,
    ) -> Self {
        Self {
            config,
            build,
            flags,
            out,
            input,
        }
    }

    /// Run one subcommand.
    pub fn run(&mut self, command: &Commands) -> Result<()> {
        match command {
            Commands::List => self.list(),
            Commands::Read { domain } => self.read(domain),
            Commands::Create {
                domain,
                mapping,
                link,
            } => self.create(domain, mapping.as_deref(), link.as_deref()),
            Commands::Update {
                domain,
                mapping,
                link,
            } => self.update(domain, mapping.as_deref(), link.as_deref()),
            Commands::Delete { domain } => self.delete(domain),
            Commands::Validate { timeout } => self.validate(*timeout),
            Commands::Cleanup {
                timeout,
                yes,
                dry_run,
            } => self.cleanup(*timeout, *yes, *dry_run),
            Commands::Allocate => self.allocate(),
            Commands::Doctor { raw } => self.doctor(*raw),
            Commands::Version => {
                writeln!(self.out, "{}", self.build.long())?;
                Ok(())
            }
        }
    }

    fn store(&self) -> Result<EntryStore> {
        let dir = resolve_dir(&self.config).context("Failed to resolve mappings directory")?;
        Ok(EntryStore::new(dir))
    }

    fn formatter(&mut self) -> Formatter<'_> {
        Formatter::new(&mut *self.out, self.flags.color)
    }

    /// A `--timeout` of 0 counts as unset, like a zero in config files.
    fn probe_options(&self, timeout_ms: Option<u64>) -> ProbeOptions {
        let timeout_ms = timeout_ms
            .filter(|&ms| ms > 0)
            .unwrap_or(self.config.validation.timeout_ms);
        ProbeOptions {
            timeout: Duration::from_millis(timeout_ms),
            concurrency: self.config.validation.concurrency.max(1),
        }
    }

    fn list(&mut self) -> Result<()> {
        let entries = self.store()?.list()?;
        let groups = group_by_mapping(&entries);
        if self.flags.json {
            write_json(self.out, &groups)?;
            return Ok(());
        }

        let quiet = self.flags.quiet;
        let mut f = self.formatter();
        f.header("Puma-dev mappings")?;
        f.info(&"─".repeat(60))?;
        for group in &groups {
            let title = if group.key.is_empty() {
                "(empty)"
            } else {
                group.key.as_str()
            };
            f.tagged(title, &group.note)?;
            let mut items = f.indent_by(2);
            for domain in &group.domains {
                items.bullet(domain)?;
            }
        }

        let duplicates = groups.iter().filter(|g| g.is_duplicate()).count();
        if duplicates > 0 && !quiet {
            f.warn(&format!("{duplicates} mapping(s) shared by more than one domain"))?;
        }
        Ok(())
    }

    fn read(&mut self, domain: &str) -> Result<()> {
        let entry = self.store()?.read(domain)?;
        if self.flags.json {
            write_json(self.out, &entry)?;
            return Ok(());
        }
        let value = entry.payload.display();
        let mut f = self.formatter();
        if entry.is_symlink() {
            f.info(&format!("{} → {} (symlink)", entry.domain, value))?;
        } else {
            f.info(&format!("{} → {}", entry.domain, value))?;
        }
        Ok(())
    }

    fn create(&mut self, domain: &str, mapping: Option<&str>, link: Option<&str>) -> Result<()> {
        let store = self.store()?;
        let overwrite = self.flags.force;

        if let Some(target) = link {
            store.create_symlink(domain, target, overwrite)?;
            return self.report_change(
                json!({"domain": domain, "link_target": target, "type": "symlink"}),
                &format!("created symlink: {domain} → {target}"),
            );
        }

        let mapping = match mapping {
            Some(raw) => Mapping::parse(raw)?.raw,
            None => {
                let ports = self.config.ports;
                let entries = store.list()?;
                find_next_available_port_block(&entries, ports.min, ports.max, ports.block_size)?
                    .to_string()
            }
        };
        store.write(domain, &mapping, overwrite)?;
        self.report_change(
            json!({"domain": domain, "mapping": mapping, "type": "file"}),
            &format!("created: {domain} → {mapping}"),
        )
    }

    fn update(&mut self, domain: &str, mapping: Option<&str>, link: Option<&str>) -> Result<()> {
        let store = self.store()?;

        if let Some(target) = link {
            store.update_symlink(domain, target)?;
            return self.report_change(
                json!({"domain": domain, "link_target": target, "type": "symlink"}),
                &format!("updated symlink: {domain} → {target}"),
            );
        }

        let raw = mapping.ok_or(UsageError::MissingMapping)?;
        let mapping = Mapping::parse(raw)?.raw;
        store.update(domain, &mapping)?;
        self.report_change(
            json!({"domain": domain, "mapping": mapping, "type": "file"}),
            &format!("updated: {domain} → {mapping}"),
        )
    }

    fn delete(&mut self, domain: &str) -> Result<()> {
        let store = self.store()?;
        if !self.flags.force && !self.confirm(&format!("Delete {domain}? [y/N]: "))? {
            self.formatter().warn("aborted")?;
            return Ok(());
        }
        store.delete(domain)?;
        self.report_change(
            json!({"domain": domain, "status": "deleted"}),
            &format!("deleted: {domain}"),
        )
    }

    fn validate(&mut self, timeout_ms: Option<u64>) -> Result<()> {
        let store = self.store()?;
        let options = self.probe_options(timeout_ms);
        let results = runtime()?.block_on(validate_store(&store, options))?;

        if self.flags.json {
            write_json(self.out, &results)?;
            return Ok(());
        }

        let quiet = self.flags.quiet;
        let mut f = self.formatter();
        let (mut ok, mut bad) = (0usize, 0usize);
        for r in &results {
            let value = r.entry.payload.display();
            if r.entry.is_symlink() {
                f.info(&format!("{} (symlink) → {}", r.entry.domain, value))?;
            } else if r.reachable {
                f.success(&format!("✔ {} → {}", r.entry.domain, value))?;
                ok += 1;
            } else {
                let reason = r.reason.as_deref().unwrap_or_default();
                f.error(&format!("✖ {} → {}  ({})", r.entry.domain, value, reason))?;
                bad += 1;
            }
        }
        if !quiet {
            f.subheader("Summary")?;
            f.kv("reachable", ok)?;
            f.kv("unreachable", bad)?;
        }
        Ok(())
    }

    fn cleanup(&mut self, timeout_ms: Option<u64>, yes: bool, dry_run: bool) -> Result<()> {
        let store = self.store()?;
        let options = self.probe_options(timeout_ms);
        let plan = runtime()?.block_on(plan_cleanup(&store, options))?;
        let apply = !dry_run && !plan.is_empty();

        if self.flags.json {
            // No prompt in JSON mode: only an explicit --yes/--force deletes.
            let outcome = if apply && (yes || self.flags.force) {
                Some(apply_cleanup(&store, &plan))
            } else {
                None
            };
            let (deleted, failed): (Vec<String>, Vec<serde_json::Value>) = match &outcome {
                Some(o) => (
                    o.deleted.clone(),
                    o.failed
                        .iter()
                        .map(|(d, e)| json!({"domain": d, "error": e.to_string()}))
                        .collect(),
                ),
                None => (Vec::new(), Vec::new()),
            };
            write_json(
                self.out,
                &json!({"candidates": plan, "deleted": deleted, "failed": failed}),
            )?;
            return match outcome {
                Some(o) if !o.is_complete() => {
                    Err(UsageError::CleanupIncomplete(o.failed.len()).into())
                }
                _ => Ok(()),
            };
        }

        if plan.is_empty() {
            if !self.flags.quiet {
                self.formatter().info("nothing to delete")?;
            }
            return Ok(());
        }

        {
            let mut f = self.formatter();
            f.header("Unreachable entries")?;
            for r in &plan {
                f.bullet(&format!("{} → {}", r.entry.domain, r.entry.payload.display()))?;
            }
        }
        if !apply {
            self.formatter().warn("--dry-run set; no deletions performed.")?;
            return Ok(());
        }
        if !yes && !self.flags.force && !self.confirm("Delete these? [y/N]: ")? {
            self.formatter().warn("aborted")?;
            return Ok(());
        }

        let outcome = apply_cleanup(&store, &plan);
        let quiet = self.flags.quiet;
        let mut f = self.formatter();
        if !quiet {
            for domain in &outcome.deleted {
                f.success(&format!("deleted: {domain}"))?;
            }
        }
        for (domain, e) in &outcome.failed {
            f.error(&format!("failed to delete {domain}: {e}"))?;
        }
        if outcome.is_complete() {
            Ok(())
        } else {
            Err(UsageError::CleanupIncomplete(outcome.failed.len()).into())
        }
    }

    fn allocate(&mut self) -> Result<()> {
        let entries = self.store()?.list()?;
        let ports = self.config.ports;
        let base = find_next_available_port_block(&entries, ports.min, ports.max, ports.block_size)?;
        if self.flags.json {
            let end = u32::from(base) + ports.block_size - 1;
            write_json(self.out, &json!({"base": base, "end": end, "block_size": ports.block_size}))?;
        } else {
            writeln!(self.out, "{base}")?;
        }
        Ok(())
    }

    fn doctor(&mut self, raw: bool) -> Result<()> {
        let home: PathBuf = dirs::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
        let report = runtime()?.block_on(doctor::diagnose(&home));
        render_doctor(&mut self.formatter(), &report, raw)?;
        Ok(())
    }

    /// Print a JSON object or a success line for a completed mutation.
    fn report_change(&mut self, object: serde_json::Value, message: &str) -> Result<()> {
        if self.flags.json {
            write_json(self.out, &object)?;
        } else if !self.flags.quiet {
            self.formatter().success(message)?;
        }
        Ok(())
    }

    /// Ask a yes/no question; only `y` (any case) is yes.
    fn confirm(&mut self, question: &str) -> Result<bool> {
        self.formatter().prompt(question)?;
        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .context("Failed to read confirmation")?;
        Ok(line.trim().eq_ignore_ascii_case("y"))
    }
}

fn runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")
}

fn render_doctor(f: &mut Formatter<'_>, report: &DoctorReport, raw: bool) -> std::io::Result<()> {
    f.header("puma-dev doctor")?;
    if !report.installed() {
        f.warn("puma-dev is not installed or not found in PATH.")?;
        return f.info(&format!("Install instructions: {INSTALL_URL}"));
    }

    if let Some(binary) = &report.binary {
        f.kv("binary", binary.display())?;
    }
    if let Some(ref version) = report.version {
        f.kv("version", version)?;
    }
    match report.running_port {
        Some(port) => f.kv("status", format!("running (127.0.0.1:{port})"))?,
        None => f.kv("status", "not reachable on typical ports (9280/80/9292)")?,
    }

    if report.config_files.is_empty() {
        return f.kv("configuration", "not found in common locations");
    }
    f.subheader("configuration")?;
    for file in &report.config_files {
        f.bullet(&file.path.display().to_string())?;
        let contents = match &file.contents {
            Ok(contents) => contents,
            Err(e) => {
                f.warn(&format!("  (unable to read: {e})"))?;
                continue;
            }
        };
        let mut inner = f.indent_by(2);
        if file.summary.is_empty() {
            inner.info("(no summary available)")?;
        } else {
            for (key, value) in &file.summary {
                inner.kv(key, value)?;
            }
        }
        if raw {
            inner.info("--- begin file ---")?;
            for line in contents.trim().lines() {
                inner.info(line)?;
            }
            inner.info("--- end file ---")?;
        }
    }
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::{tempdir, TempDir};

    struct Harness {
        dir: TempDir,
        config: Config,
    }

    impl Harness {
        fn new() -> Self {
            let dir = tempdir().unwrap();
            let mut config = Config::builtin();
            config.general.dir = dir.path().to_string_lossy().into_owned();
            config.validation.timeout_ms = 50;
            Self { dir, config }
        }

        fn run(&self, command: Commands, flags: OutputFlags, input: &str) -> (Result<()>, String) {
            let mut out = Vec::new();
            let mut input = Cursor::new(input.as_bytes().to_vec());
            let result = {
                let mut session = Session::new(
                    self.config.clone(),
                    BuildInfo::current(),
                    flags,
                    &mut out,
                    &mut input,
                );
                session.run(&command)
            };
            (result, String::from_utf8(out).unwrap())
        }

        fn store(&self) -> EntryStore {
            EntryStore::new(self.dir.path())
        }
    }

    fn plain() -> OutputFlags {
        OutputFlags::default()
    }

    fn forced() -> OutputFlags {
        OutputFlags {
            force: true,
            ..OutputFlags::default()
        }
    }

    fn json() -> OutputFlags {
        OutputFlags {
            json: true,
            ..OutputFlags::default()
        }
    }

    #[test]
    fn test_create_allocates_when_mapping_omitted() {
        let h = Harness::new();
        h.store().write("a.test", "36000", false).unwrap();

        let (result, out) = h.run(
            Commands::Create {
                domain: "b.test".into(),
                mapping: None,
                link: None,
            },
            plain(),
            "",
        );
        result.unwrap();
        assert!(out.contains("created: b.test → 36010"), "{out}");
        assert_eq!(h.store().read("b.test").unwrap().mapping(), Some("36010"));
    }

    #[test]
    fn test_create_rejects_bad_mapping_without_writing() {
        let h = Harness::new();
        let (result, _) = h.run(
            Commands::Create {
                domain: "a.test".into(),
                mapping: Some("70000".into()),
                link: None,
            },
            plain(),
            "",
        );
        let err = result.unwrap_err();
        assert_eq!(error_class(&err), ErrorClass::InvalidInput);
        assert!(h.store().list().unwrap().is_empty());
    }

    #[test]
    fn test_create_existing_needs_force() {
        let h = Harness::new();
        h.store().write("a.test", "3000", false).unwrap();
        let create = Commands::Create {
            domain: "a.test".into(),
            mapping: Some("4000".into()),
            link: None,
        };

        let (result, _) = h.run(create.clone(), plain(), "");
        assert_eq!(error_class(&result.unwrap_err()), ErrorClass::AlreadyExists);

        let (result, _) = h.run(create, forced(), "");
        result.unwrap();
        assert_eq!(h.store().read("a.test").unwrap().mapping(), Some("4000"));
    }

    #[test]
    fn test_create_symlink_json() {
        let h = Harness::new();
        let (result, out) = h.run(
            Commands::Create {
                domain: "app.test".into(),
                mapping: None,
                link: Some("/srv/app".into()),
            },
            json(),
            "",
        );
        result.unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["type"], "symlink");
        assert_eq!(value["link_target"], "/srv/app");
        assert!(h.store().read("app.test").unwrap().is_symlink());
    }

    #[test]
    fn test_update_requires_mapping_or_link() {
        let h = Harness::new();
        let (result, _) = h.run(
            Commands::Update {
                domain: "a.test".into(),
                mapping: None,
                link: None,
            },
            plain(),
            "",
        );
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<UsageError>(),
            Some(UsageError::MissingMapping)
        ));
    }

    #[test]
    fn test_delete_prompts_and_aborts() {
        let h = Harness::new();
        h.store().write("a.test", "3000", false).unwrap();

        let (result, out) = h.run(
            Commands::Delete {
                domain: "a.test".into(),
            },
            plain(),
            "n\n",
        );
        result.unwrap();
        assert!(out.contains("Delete a.test? [y/N]: "));
        assert!(out.contains("aborted"));
        assert!(h.store().read("a.test").is_ok());

        let (result, _) = h.run(
            Commands::Delete {
                domain: "a.test".into(),
            },
            plain(),
            "Y\n",
        );
        result.unwrap();
        assert!(h.store().read("a.test").is_err());
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let h = Harness::new();
        let (result, _) = h.run(
            Commands::Delete {
                domain: "nope.test".into(),
            },
            forced(),
            "",
        );
        assert_eq!(error_class(&result.unwrap_err()), ErrorClass::NotFound);
    }

    #[test]
    fn test_list_groups_duplicates() {
        let h = Harness::new();
        let store = h.store();
        store.write("a", "3000", false).unwrap();
        store.write("b", "3000", false).unwrap();
        store.write("c", "4000", false).unwrap();

        let (result, out) = h.run(Commands::List, plain(), "");
        result.unwrap();
        assert!(out.contains("3000  [duplicate mapping]"), "{out}");
        assert!(out.contains("  • a"));
        assert!(out.contains("1 mapping(s) shared by more than one domain"), "{out}");

        let quiet = OutputFlags {
            quiet: true,
            ..OutputFlags::default()
        };
        let (result, out) = h.run(Commands::List, quiet, "");
        result.unwrap();
        assert!(!out.contains("shared by more than one domain"));

        let (result, out) = h.run(Commands::List, json(), "");
        result.unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["mapping"], "3000");
        assert_eq!(value[0]["note"], "duplicate mapping");
        assert_eq!(value[1]["domains"], serde_json::json!(["c"]));
    }

    #[test]
    fn test_cleanup_dry_run_keeps_everything() {
        let h = Harness::new();
        h.store().write("junk.test", "garbage", false).unwrap();

        let (result, out) = h.run(
            Commands::Cleanup {
                timeout: None,
                yes: true,
                dry_run: true,
            },
            plain(),
            "",
        );
        result.unwrap();
        assert!(out.contains("junk.test"));
        assert!(out.contains("--dry-run set"));
        assert_eq!(h.store().list().unwrap().len(), 1);
    }

    #[test]
    fn test_cleanup_with_yes_deletes() {
        let h = Harness::new();
        h.store().write("junk.test", "garbage", false).unwrap();
        h.store().create_symlink("app.test", "/srv/app", false).unwrap();

        let (result, out) = h.run(
            Commands::Cleanup {
                timeout: Some(50),
                yes: true,
                dry_run: false,
            },
            plain(),
            "",
        );
        result.unwrap();
        assert!(out.contains("deleted: junk.test"), "{out}");
        let left: Vec<String> = h.store().list().unwrap().into_iter().map(|e| e.domain).collect();
        assert_eq!(left, vec!["app.test"]);
    }

    #[test]
    fn test_zero_timeout_falls_back_to_config() {
        let h = Harness::new();
        let mut out = Vec::new();
        let mut input = Cursor::new(Vec::new());
        let session = Session::new(
            h.config.clone(),
            BuildInfo::current(),
            plain(),
            &mut out,
            &mut input,
        );
        assert_eq!(session.probe_options(Some(0)).timeout, Duration::from_millis(50));
        assert_eq!(session.probe_options(None).timeout, Duration::from_millis(50));
        assert_eq!(session.probe_options(Some(75)).timeout, Duration::from_millis(75));
    }

    #[test]
    fn test_validate_zero_timeout_reaches_listener() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let h = Harness::new();
        h.store().write("live.test", &port.to_string(), false).unwrap();

        let (result, out) = h.run(Commands::Validate { timeout: Some(0) }, json(), "");
        result.unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["domain"], "live.test");
        assert_eq!(value[0]["reachable"], true);
        drop(listener);
    }

    #[test]
    fn test_allocate_prints_base() {
        let h = Harness::new();
        h.store().write("a.test", "36000", false).unwrap();
        let (result, out) = h.run(Commands::Allocate, plain(), "");
        result.unwrap();
        assert_eq!(out.trim(), "36010");
    }

    #[test]
    fn test_missing_directory_is_not_found() {
        let mut h = Harness::new();
        h.config.general.dir = h.dir.path().join("missing").to_string_lossy().into_owned();
        let (result, _) = h.run(Commands::List, plain(), "");
        assert_eq!(error_class(&result.unwrap_err()), ErrorClass::NotFound);
    }

    #[test]
    fn test_read_symlink_line() {
        let h = Harness::new();
        h.store().create_symlink("app.test", "/srv/app", false).unwrap();
        let (result, out) = h.run(
            Commands::Read {
                domain: "app.test".into(),
            },
            plain(),
            "",
        );
        result.unwrap();
        assert_eq!(out, "app.test → /srv/app (symlink)\n");
    }

    #[test]
    fn test_render_doctor_missing_binary() {
        let report = DoctorReport {
            binary: None,
            version: None,
            running_port: None,
            config_files: Vec::new(),
        };
        let mut buf = Vec::new();
        render_doctor(&mut Formatter::new(&mut buf, false), &report, false).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("not installed"));
        assert!(out.contains(INSTALL_URL));
    }

    #[test]
    fn test_render_doctor_installed() {
        let report = DoctorReport {
            binary: Some(PathBuf::from("/usr/local/bin/puma-dev")),
            version: Some("Version: 0.18.2".into()),
            running_port: Some(9280),
            config_files: vec![crate::doctor::ConfigFileReport {
                path: PathBuf::from("/home/dev/.puma-dev/config.yml"),
                contents: Ok("timeout: 15m\n".into()),
                summary: vec![("timeout".into(), "15m".into())],
            }],
        };
        let mut buf = Vec::new();
        render_doctor(&mut Formatter::new(&mut buf, false), &report, true).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("/usr/local/bin/puma-dev"));
        assert!(out.contains("running (127.0.0.1:9280)"));
        assert!(out.contains("• /home/dev/.puma-dev/config.yml"));
        assert!(out.contains("--- begin file ---"));
        assert!(!out.contains("not installed"));
    }

    #[test]
    fn test_version_prints_long_form() {
        let h = Harness::new();
        let (result, out) = h.run(Commands::Version, plain(), "");
        result.unwrap();
        assert!(out.starts_with("version: "));
    }
}
