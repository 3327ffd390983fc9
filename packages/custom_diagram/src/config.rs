
use diagram::{
    config::EngineConfig,
    group_info::{DiagramGroupInfo, DiagramGroupVisibility},
};
use std::{
    collections::{BTreeMap, BTreeSet},
    path::Path,
    fs::File,
    io::{
        BufReader,
        BufWriter,
    },
};
use serde::{Serialize, Deserialize};
use anyhow::*;


pub const CONFIG_FILE_NAME: &'static str = "custom_diagram.json";


/// Plugin configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(flatten)]
    pub engine: EngineConfig,
    /// Full ids of groups which aren't even initialized.
    pub hard_disabled_groups: BTreeSet<String>,
    /// Visibility name per full group id, overriding the group's default.
    pub group_visibility: BTreeMap<String, String>,
}

impl Config {
    /// Read the config, or fall back to defaults. A missing file is normal on
    /// first launch, but a file that fails to parse is logged.
    pub fn read(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }
        Self::try_read(path).unwrap_or_else(|e| {
            warn!(path = %path.display(), "unable to read config, using defaults: {:#}", e);
            Self::default()
        })
    }

    pub fn try_read(path: impl AsRef<Path>) -> Result<Self> {
        Ok(serde_json::from_reader(BufReader::new(File::open(path)?))?)
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        serde_json::to_writer_pretty(BufWriter::new(File::create(path)?), self)?;
        Ok(())
    }

    pub fn engine_config(&self) -> EngineConfig {
        self.engine.clone()
    }

    pub fn is_hard_disabled(&self, group_id: &str) -> bool {
        self.hard_disabled_groups.contains(group_id)
    }

    pub fn visibility(&self, info: &DiagramGroupInfo) -> DiagramGroupVisibility {
        self.group_visibility
            .get(&info.group_id)
            .map(|name| DiagramGroupVisibility::from_name(name))
            .unwrap_or(info.default_visibility)
    }

    /// Fill in the visibility of every group not already configured, so
    /// the written file lists them all.
    pub fn add_default_visibilities<'a, I>(&mut self, infos: I)
    where
        I: IntoIterator<Item = &'a DiagramGroupInfo>,
    {
        for info in infos {
            self.group_visibility
                .entry(info.group_id.clone())
                .or_insert_with(|| info.default_visibility.name().to_owned());
        }
    }
}


#[cfg(test)]
use diagram::component::Component;
#[cfg(test)]
use std::{
    io::Write,
    sync::{Arc, Mutex},
};

#[cfg(test)]
fn info(group_id: &str, default_visibility: DiagramGroupVisibility) -> DiagramGroupInfo {
    DiagramGroupInfo::builder("Test", group_id, Component::item("minecraft:book", 0))
        .set_default_visibility(default_visibility)
        .build()
}

#[test]
fn test_partial_file_fills_defaults() {
    let config: Config = serde_json::from_str(r#"{
        "scroll_speed": 30,
        "hard_disabled_groups": ["a.b"]
    }"#).unwrap();
    assert_eq!(config.engine_config().scroll_speed, 30);
    assert!(config.engine_config().ctrl_fast_forward);
    assert!(config.is_hard_disabled("a.b"));
    assert!(config.group_visibility.is_empty());
}

#[test]
fn test_visibility_lookup() {
    let mut config = Config::default();
    config.group_visibility.insert("shift".to_owned(), "SHOW_ON_SHIFT".to_owned());
    config.group_visibility.insert("typo".to_owned(), "SHOW_ON_SHFIT".to_owned());

    assert_eq!(config.visibility(&info("shift", DiagramGroupVisibility::Disabled)), DiagramGroupVisibility::ShowOnShift);
    assert_eq!(config.visibility(&info("typo", DiagramGroupVisibility::Disabled)), DiagramGroupVisibility::AlwaysShown);
    assert_eq!(config.visibility(&info("unset", DiagramGroupVisibility::Disabled)), DiagramGroupVisibility::Disabled);
}

#[test]
fn test_write_then_read() {
    let path = std::env::temp_dir().join(format!("custom_diagram_test_{}.json", std::process::id()));
    let mut config = Config::default();
    config.engine.show_empty_diagrams = true;
    config.add_default_visibilities([&info("hidden", DiagramGroupVisibility::AlwaysHidden)]);
    config.write(&path).unwrap();

    let read = Config::try_read(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(read, config);
    assert_eq!(read.group_visibility["hidden"], "ALWAYS_HIDDEN");
    // missing files fall back to defaults
    assert_eq!(Config::read(&path), Config::default());
}

/// Collects formatted log output for assertions.
#[cfg(test)]
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

#[cfg(test)]
impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.lock().unwrap().flush()
    }
}

#[test]
fn test_malformed_file_warns_and_defaults() {
    let path = std::env::temp_dir().join(format!("custom_diagram_malformed_{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "scroll_speed": "fast" "#).unwrap();

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let config = tracing::subscriber::with_default(subscriber, || Config::read(&path));
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config, Config::default());
    let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("WARN"));
    assert!(output.contains("unable to read config"));
}
