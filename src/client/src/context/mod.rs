mod host;

pub use host::HostEnvironment;

use beacon_common::types::context::{BrowserInfo, ConnectionInfo, NetworkInfo};

/// Capability set the capture client reads its diagnostic context from.
/// Injected so hosts decide what "the page" means and tests substitute a
/// configured provider.
pub trait Environment: Send + Sync {
    fn page_url(&self) -> String;
    fn user_agent(&self) -> String;
    fn language(&self) -> String;
    fn platform(&self) -> String;
    fn cookie_enabled(&self) -> bool;
    fn online(&self) -> bool;
    fn screen_size(&self) -> (u32, u32);
    fn viewport_size(&self) -> (u32, u32);
    fn device_pixel_ratio(&self) -> f64;
    fn connection(&self) -> Option<ConnectionInfo>;
}

/// Snapshot of the device state exposed by `env`. Read-only, infallible.
pub fn browser_snapshot(env: &dyn Environment) -> BrowserInfo {
    let (screen_width, screen_height) = env.screen_size();
    let (window_width, window_height) = env.viewport_size();

    BrowserInfo {
        user_agent: env.user_agent(),
        language: env.language(),
        platform: env.platform(),
        cookie_enabled: env.cookie_enabled(),
        on_line: env.online(),
        screen_width,
        screen_height,
        window_width,
        window_height,
        device_pixel_ratio: env.device_pixel_ratio(),
    }
}

/// Snapshot of the connectivity state exposed by `env`. Hosts without a
/// link descriptor yield `connection: None`.
pub fn network_snapshot(env: &dyn Environment) -> NetworkInfo {
    NetworkInfo {
        connection: env.connection(),
        on_line: env.online(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured_environment() -> HostEnvironment {
        HostEnvironment::builder()
            .page_url("https://app.example.com/checkout")
            .user_agent("beacon/1.0 (Linux)")
            .language("en-US".to_string())
            .platform("Linux x86_64".to_string())
            .cookie_enabled(true)
            .screen_size((1920, 1080))
            .viewport_size((1280, 720))
            .device_pixel_ratio(2.0)
            .connection(ConnectionInfo {
                effective_type: "4g".to_string(),
                downlink: 10.0,
                rtt: 40.0,
            })
            .build()
    }

    #[test]
    fn browser_snapshot_reads_every_capability() {
        let env = configured_environment();
        let info = browser_snapshot(&env);

        assert_eq!(info.user_agent, "beacon/1.0 (Linux)");
        assert_eq!(info.language, "en-US");
        assert_eq!(info.platform, "Linux x86_64");
        assert!(info.cookie_enabled);
        assert!(info.on_line);
        assert_eq!((info.screen_width, info.screen_height), (1920, 1080));
        assert_eq!((info.window_width, info.window_height), (1280, 720));
        assert_eq!(info.device_pixel_ratio, 2.0);
    }

    #[test]
    fn network_snapshot_carries_the_connection_descriptor() {
        let env = configured_environment();
        let info = network_snapshot(&env);

        assert!(info.on_line);
        let connection = info.connection.expect("descriptor was configured");
        assert_eq!(connection.effective_type, "4g");
    }

    #[test]
    fn network_snapshot_without_descriptor_is_explicitly_absent() {
        let env = HostEnvironment::builder()
            .page_url("https://app.example.com/")
            .build();

        let info = network_snapshot(&env);
        assert!(info.connection.is_none());
        assert!(info.on_line);
    }

    #[test]
    fn page_url_tracks_navigation() {
        let env = configured_environment();
        env.set_page_url("https://app.example.com/payment");

        assert_eq!(env.page_url(), "https://app.example.com/payment");
    }

    #[test]
    fn unconfigured_dimensions_default_to_zero_and_ratio_to_one() {
        let env = HostEnvironment::builder()
            .page_url("https://app.example.com/")
            .build();

        let info = browser_snapshot(&env);
        assert_eq!((info.screen_width, info.screen_height), (0, 0));
        assert_eq!(info.device_pixel_ratio, 1.0);
    }
}
