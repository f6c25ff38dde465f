use anyhow::Result;
use serde::{Deserialize, Serialize};

use std::fs::{File, create_dir_all};
use std::io::{Read, Write};
use std::path::PathBuf;

use crate::messages::Language;
use crate::update_language;

const APP_NAME: &str = "alubill";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub(crate) struct Config {
    pub(crate) data_folder: Option<PathBuf>,
    pub(crate) file_open_command: Option<String>,
    pub(crate) language: String,
    #[serde(default)]
    pub(crate) shop: ShopProfile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_folder: None,
            file_open_command: None,
            language: Language::EN.name().into(),
            shop: ShopProfile::default(),
        }
    }
}

/// Everything printed in the document header.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub(crate) struct ShopProfile {
    pub(crate) name: String,
    pub(crate) address: String,
    pub(crate) tagline: String,
    pub(crate) proprietor: String,
    pub(crate) phones: Vec<String>,
    pub(crate) document_number: String,
}

impl Default for ShopProfile {
    fn default() -> Self {
        Self {
            name: String::from("MEHEDI THAI ALUMINIUM & GLASS"),
            address: String::from("123 Business Street, City, Country"),
            tagline: String::from("All kinds of thai aluminium, glass & grill work"),
            proprietor: String::from("Proprietor"),
            phones: vec![String::from("+880 1234 567890")],
            document_number: String::from("0001"),
        }
    }
}

impl ShopProfile {
    /// Name, address and phone numbers, one per line.
    pub(crate) fn summary(&self) -> String {
        let phones = self
            .phones
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}\n{}\n{}", self.name.trim(), self.address.trim(), phones)
    }
}

pub(crate) fn load_config() -> Result<Config> {
    let config_file = check_config_exists()?;
    let mut file = File::open(&config_file)?;
    let mut buf = String::default();
    File::read_to_string(&mut file, &mut buf)?;
    let res = parse_config(&buf)?;
    update_language(&res.language);
    Ok(res)
}

pub(crate) fn save_config(config: &Config) -> Result<()> {
    let config_file = check_config_exists()?;
    let serialized = toml::to_string(&config)?;
    let mut file = File::create(&config_file)?;
    file.write_all(serialized.as_bytes())?;
    update_language(&config.language);
    Ok(())
}

fn parse_config(input: &str) -> Result<Config> {
    Ok(toml::from_str(input)?)
}

fn check_config_exists() -> Result<PathBuf> {
    let mut dir: PathBuf = dirs::config_dir().unwrap_or_else(|| "./".into());
    dir.push(APP_NAME);

    if !dir.exists() {
        create_dir_all(&dir)?;
    }
    dir.push(CONFIG_FILE);
    if !dir.exists() {
        let mut fd = File::create(&dir)?;
        let serialized = toml::to_string(&Config::default())?;
        fd.write_all(serialized.as_bytes())?;
    }
    Ok(dir)
}
