//! Application settings loaded via OrthoConfig.
//!
//! Session cookie settings live with the HTTP adapter in
//! [`crate::inbound::http::session_config`]; this module covers the rest.
//! Every field reads from `TINYLINK_<FIELD>` (or the matching CLI flag) and
//! unset values fall back to defaults.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use argon2::Params;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 8080));
pub(crate) const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";

/// Argon2 cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory in KiB.
    pub memory_kib: u32,
    /// Number of passes.
    pub iterations: u32,
    /// Degree of parallelism.
    pub lanes: u32,
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            lanes: Params::DEFAULT_P_COST,
        }
    }
}

/// Non-session application settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TINYLINK")]
pub struct AppSettings {
    /// Listener address.
    pub bind_addr: Option<SocketAddr>,
    /// Load demo data before serving.
    #[ortho_config(default = false)]
    pub seed_demo: bool,
    /// Argon2 memory cost in KiB.
    pub argon2_m: Option<u32>,
    /// Argon2 iteration count.
    pub argon2_t: Option<u32>,
    /// Argon2 lane count.
    pub argon2_p: Option<u32>,
}

impl AppSettings {
    /// Return the configured listener address, falling back to `0.0.0.0:8080`.
    ///
    /// # Examples
    /// ```
    /// use tinylink::config::AppSettings;
    ///
    /// let settings = AppSettings {
    ///     bind_addr: None,
    ///     seed_demo: false,
    ///     argon2_m: None,
    ///     argon2_t: None,
    ///     argon2_p: None,
    /// };
    /// assert_eq!(settings.bind_addr().port(), 8080);
    /// ```
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Password hashing cost, each parameter falling back to Argon2's default.
    #[must_use]
    pub fn hash_cost(&self) -> HashCost {
        let defaults = HashCost::default();
        HashCost {
            memory_kib: self.argon2_m.unwrap_or(defaults.memory_kib),
            iterations: self.argon2_t.unwrap_or(defaults.iterations),
            lanes: self.argon2_p.unwrap_or(defaults.lanes),
        }
    }
}

/// Parse the boolean spellings accepted across configuration.
///
/// # Examples
/// ```
/// use tinylink::config::parse_bool;
///
/// assert_eq!(parse_bool("Yes"), Some(true));
/// assert_eq!(parse_bool("0"), Some(false));
/// assert_eq!(parse_bool("maybe"), None);
/// ```
#[must_use]
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for application settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "TINYLINK_BIND_ADDR",
        "TINYLINK_SEED_DEMO",
        "TINYLINK_ARGON2_M",
        "TINYLINK_ARGON2_T",
        "TINYLINK_ARGON2_P",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("tinylink")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), SocketAddr::from(([0, 0, 0, 0], 8080)));
        assert!(!settings.seed_demo);
        assert_eq!(settings.hash_cost(), HashCost::default());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("TINYLINK_BIND_ADDR", Some("127.0.0.1:3000".to_owned())),
            ("TINYLINK_SEED_DEMO", Some("true".to_owned())),
            ("TINYLINK_ARGON2_M", Some("4096".to_owned())),
            ("TINYLINK_ARGON2_T", Some("3".to_owned())),
            ("TINYLINK_ARGON2_P", Some("2".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert!(settings.seed_demo);
        assert_eq!(
            settings.hash_cost(),
            HashCost {
                memory_kib: 4096,
                iterations: 3,
                lanes: 2
            }
        );
    }

    #[rstest]
    fn partial_hash_cost_keeps_remaining_defaults() {
        let _guard = lock_env([
            ("TINYLINK_BIND_ADDR", None),
            ("TINYLINK_SEED_DEMO", None),
            ("TINYLINK_ARGON2_M", None),
            ("TINYLINK_ARGON2_T", Some("5".to_owned())),
            ("TINYLINK_ARGON2_P", None),
        ]);

        let cost = load_from_empty_args().hash_cost();
        assert_eq!(cost.iterations, 5);
        assert_eq!(cost.memory_kib, Params::DEFAULT_M_COST);
        assert_eq!(cost.lanes, Params::DEFAULT_P_COST);
    }

    #[rstest]
    #[case("TINYLINK_BIND_ADDR", "localhost")]
    #[case("TINYLINK_ARGON2_M", "-1")]
    #[case("TINYLINK_ARGON2_P", "two")]
    fn unparsable_values_are_refused(#[case] name: &'static str, #[case] value: &str) {
        let _guard = lock_env(VARS.map(|var| {
            (var, (var == name).then(|| value.to_owned()))
        }));

        assert!(AppSettings::load_from_iter([OsString::from("tinylink")]).is_err());
    }

    #[rstest]
    #[case("1", Some(true))]
    #[case("TRUE", Some(true))]
    #[case("n", Some(false))]
    #[case("", None)]
    fn parses_boolean_spellings(#[case] raw: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_bool(raw), expected);
    }
}
