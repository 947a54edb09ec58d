use serde::{Deserialize, Serialize};

/// Device and page state at the moment an error was captured. Wire keys are
/// camelCase to match what the reporting endpoint already ingests.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BrowserInfo {
    pub user_agent: String,
    pub language: String,
    pub platform: String,
    pub cookie_enabled: bool,
    pub on_line: bool,
    pub screen_width: u32,
    pub screen_height: u32,
    pub window_width: u32,
    pub window_height: u32,
    pub device_pixel_ratio: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionInfo {
    pub effective_type: String,
    pub downlink: f64,
    pub rtt: f64,
}

/// Connectivity at capture time. `connection` stays `null` on hosts that
/// expose no link descriptor.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    pub connection: Option<ConnectionInfo>,
    pub on_line: bool,
}
