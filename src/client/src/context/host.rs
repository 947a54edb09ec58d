use std::sync::RwLock;

use sysinfo::System;
use typed_builder::TypedBuilder;

use beacon_common::types::context::ConnectionInfo;

use super::Environment;

const LC_ALL_ENV_VAR: &str = "LC_ALL";
const LANG_ENV_VAR: &str = "LANG";

/// Default [`Environment`] for native hosts. Fixed device facts are
/// captured at build time; the current URL may change as the host
/// navigates.
#[derive(TypedBuilder)]
pub struct HostEnvironment {
    #[builder(setter(transform = |url: &str| RwLock::new(url.to_string())))]
    page_url: RwLock<String>,
    #[builder(default = default_user_agent(), setter(into))]
    user_agent: String,
    #[builder(default = default_language())]
    language: String,
    #[builder(default = default_platform())]
    platform: String,
    #[builder(default = false)]
    cookie_enabled: bool,
    #[builder(default = true)]
    online: bool,
    #[builder(default = (0, 0))]
    screen_size: (u32, u32),
    #[builder(default = (0, 0))]
    viewport_size: (u32, u32),
    #[builder(default = 1.0)]
    device_pixel_ratio: f64,
    #[builder(default, setter(strip_option))]
    connection: Option<ConnectionInfo>,
}

impl HostEnvironment {
    /// Records a navigation so later snapshots attribute errors to the
    /// right page.
    pub fn set_page_url(&self, url: &str) {
        if let Ok(mut current) = self.page_url.write() {
            *current = url.to_string();
        }
    }
}

impl Environment for HostEnvironment {
    fn page_url(&self) -> String {
        self.page_url
            .read()
            .map(|url| url.clone())
            .unwrap_or_default()
    }

    fn user_agent(&self) -> String {
        self.user_agent.clone()
    }

    fn language(&self) -> String {
        self.language.clone()
    }

    fn platform(&self) -> String {
        self.platform.clone()
    }

    fn cookie_enabled(&self) -> bool {
        self.cookie_enabled
    }

    fn online(&self) -> bool {
        self.online
    }

    fn screen_size(&self) -> (u32, u32) {
        self.screen_size
    }

    fn viewport_size(&self) -> (u32, u32) {
        self.viewport_size
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    fn connection(&self) -> Option<ConnectionInfo> {
        self.connection.clone()
    }
}

fn default_user_agent() -> String {
    let os = System::name().unwrap_or_else(|| std::env::consts::OS.to_string());
    let os_version = System::os_version().unwrap_or_default();
    format!("beacon/{} ({} {})", env!("CARGO_PKG_VERSION"), os, os_version)
}

fn default_platform() -> String {
    let arch = System::cpu_arch().unwrap_or_else(|| std::env::consts::ARCH.to_string());
    match System::name() {
        Some(name) => format!("{} {}", name, arch),
        None => arch,
    }
}

fn default_language() -> String {
    std::env::var(LC_ALL_ENV_VAR)
        .or_else(|_| std::env::var(LANG_ENV_VAR))
        .ok()
        .map(|locale| normalize_locale(&locale))
        .unwrap_or_default()
}

/// `en_US.UTF-8` style locales become `en-US` language tags.
fn normalize_locale(locale: &str) -> String {
    locale
        .split('.')
        .next()
        .unwrap_or(locale)
        .replace('_', "-")
}
