mod task;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use log::info;
use xee_adapter::XeeDocument;
use xmlstoke::{process, FileGroup, ReadValue, StokeOptions};
use xmlstoke_traits::XmlTree;

use crate::task::TaskConfig;

#[derive(Parser, Debug)]
#[command(
    name = "xmlstoke",
    version,
    about = "Apply XPath driven reads and edits to XML files"
)]
struct Cli {
    /// JSON task configuration
    config: PathBuf,

    /// Run only this target (repeatable, default: all)
    #[arg(short, long = "target")]
    targets: Vec<String>,

    /// Write read results to this file instead of stdout
    #[arg(long)]
    reads_out: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(err) = run(&cli) {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: &Cli) -> Result<()> {
    let raw = fs::read_to_string(&cli.config)
        .with_context(|| format!("read config {}", cli.config.display()))?;
    let config = TaskConfig::from_json(&raw)?;
    let base = cli.config.parent().unwrap_or_else(|| Path::new(""));

    let mut reads = BTreeMap::new();
    for (name, target) in config.select(&cli.targets)? {
        info!("Running target {}", name);
        let options = target
            .options(&config.options)
            .with_context(|| format!("target {}", name))?;
        for group in target.file_groups(base)? {
            stoke_file(&group, &options, &mut reads)
                .with_context(|| format!("target {}", name))?;
        }
    }

    emit_reads(&reads, cli.reads_out.as_deref())
}

/// Transform the single source of `group` into its destination
fn stoke_file(
    group: &FileGroup,
    options: &StokeOptions,
    reads: &mut BTreeMap<String, ReadValue>,
) -> Result<()> {
    let source = group.single_source()?;
    if !source.exists() {
        bail!("Source file \"{}\" not found.", source.display());
    }

    let xml = fs::read_to_string(source)
        .with_context(|| format!("read {}", source.display()))?;
    let mut doc = XeeDocument::parse_xml(&xml)
        .with_context(|| format!("parse {}", source.display()))?;
    process(&mut doc, options, reads)?;

    let output = if has_declaration(&xml) {
        doc.serialize_document_with_declaration()?
    } else {
        doc.serialize_document()?
    };

    if let Some(parent) = group.dest.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
    }
    fs::write(&group.dest, output)
        .with_context(|| format!("write {}", group.dest.display()))?;
    info!("File {} created.", group.dest.display());
    Ok(())
}

fn has_declaration(xml: &str) -> bool {
    xml.trim_start_matches('\u{feff}').trim_start().starts_with("<?xml")
}

fn emit_reads(reads: &BTreeMap<String, ReadValue>, out: Option<&Path>) -> Result<()> {
    let mut json = serde_json::to_string_pretty(reads).context("serialize reads")?;
    json.push('\n');
    match out {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("write {}", path.display()))?
        }
        None if !reads.is_empty() => print!("{}", json),
        None => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("xmlstoke").chain(args.iter().copied())).unwrap()
    }

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_parse_args() {
        let cli = cli(&["task.json", "-t", "a", "--target", "b", "--reads-out", "r.json", "-vv"]);
        assert_eq!(cli.config, PathBuf::from("task.json"));
        assert_eq!(cli.targets, vec!["a", "b"]);
        assert_eq!(cli.reads_out, Some(PathBuf::from("r.json")));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_has_declaration() {
        assert!(has_declaration("<?xml version=\"1.0\"?><a/>"));
        assert!(has_declaration("\u{feff}\n <?xml version=\"1.0\"?><a/>"));
        assert!(!has_declaration("<a/>"));
    }

    #[test]
    fn test_run_writes_destination_and_reads() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "in.xml", r#"<?xml version="1.0"?><x y="a"><n>1</n></x>"#);
        let config = write(
            dir.path(),
            "task.json",
            r#"{
                "options": { "xpath": "/x/@y", "value": "111" },
                "targets": {
                    "main": {
                        "options": { "reads": { "xpath": "/x/n", "saveAs": "n" } },
                        "files": { "out/out.xml": "in.xml" }
                    }
                }
            }"#,
        );
        let reads_out = dir.path().join("reads.json");

        let cli = Cli {
            config,
            targets: Vec::new(),
            reads_out: Some(reads_out.clone()),
            verbose: 0,
        };
        run(&cli).unwrap();

        let output = fs::read_to_string(dir.path().join("out/out.xml")).unwrap();
        assert!(output.starts_with("<?xml"));
        assert!(output.ends_with(r#"<x y="111"><n>1</n></x>"#));

        let reads: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(reads_out).unwrap()).unwrap();
        assert_eq!(reads, serde_json::json!({ "n": "1" }));
    }

    #[test]
    fn test_missing_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let group = FileGroup::new(vec![dir.path().join("nope.xml")], dir.path().join("out.xml"));
        let error = stoke_file(&group, &StokeOptions::new(), &mut BTreeMap::new()).unwrap_err();
        assert!(error.to_string().starts_with("Source file"));
        assert!(error.to_string().ends_with("not found."));
        assert!(!dir.path().join("out.xml").exists());
    }

    #[test]
    fn test_failing_action_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let source = write(dir.path(), "in.xml", "<a/>");
        let dest = dir.path().join("out.xml");
        let options = StokeOptions::new().with_update("//foo:b", "x");

        let group = FileGroup::new(vec![source], &dest);
        let error = stoke_file(&group, &options, &mut BTreeMap::new()).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Update action #0 failed: No URI given for namespace foo in options.namespaces"
        );
        assert!(!dest.exists());
    }
}
