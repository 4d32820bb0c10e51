use agenda_core::models::SchedulerConfig;
use agenda_core::store::ViewOrder;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Deserialize, Debug)]
pub struct Config {
    /// Where the JSON snapshot lives.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Default ordering for view commands: "priority" or "end-time".
    #[serde(default = "default_order")]
    pub default_order: String,
    #[serde(default)]
    pub scheduler: SchedulerSection,
}

#[derive(Deserialize, Debug)]
pub struct SchedulerSection {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_lead_minutes")]
    pub default_lead_minutes: i64,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("agenda.json")
}

fn default_order() -> String {
    "priority".to_string()
}

fn default_poll_interval() -> u64 {
    SchedulerConfig::default().poll_interval_secs
}

fn default_lead_minutes() -> i64 {
    SchedulerConfig::default().default_lead_minutes
}

impl Default for SchedulerSection {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            default_lead_minutes: default_lead_minutes(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            default_order: default_order(),
            scheduler: SchedulerSection::default(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file("agenda.toml"))
            .merge(Env::prefixed("AGENDA_"))
            .extract()
    }

    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            poll_interval_secs: self.scheduler.poll_interval_secs,
            default_lead_minutes: self.scheduler.default_lead_minutes,
        }
    }

    pub fn view_order(&self) -> ViewOrder {
        match self.default_order.as_str() {
            "end-time" | "endtime" | "deadline" => ViewOrder::EndTime,
            _ => ViewOrder::Priority,
        }
    }
}
