use crate::{
    config::date_locale::DateLocaleConfig,
    error::{ParseDelaySnafu, RegistrarError, RegistrarResult},
    gateway::endpoints::Endpoints,
};
use dotenvy::var;
use snafu::ResultExt;
use std::{env::VarError, sync::Arc, time::Duration};

pub mod date_locale;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_SERVER_IP: &str = "127.0.0.1:3000";

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    endpoints: Endpoints,
    server_ip: String,
    delays: Delays,
    date_locale: Arc<DateLocaleConfig>,
}

/// How long the console waits before acting on its own.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Delays {
    /// between a successful save and going back to the list
    pub after_save: Duration,
    /// between a failed edit-form load and going back to the list
    pub after_failed_load: Duration,
    pub toast_lifetime: Duration,
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            after_save: Duration::from_millis(1500),
            after_failed_load: Duration::from_millis(2000),
            toast_lifetime: Duration::from_millis(5000),
        }
    }
}

//missing vars fall back to defaults, anything else that goes wrong is an error
fn optional_var(name: &'static str) -> RegistrarResult<Option<String>> {
    match var(name) {
        Ok(value) => Ok(Some(value)),
        Err(dotenvy::Error::EnvVar(VarError::NotPresent)) => Ok(None),
        Err(source) => Err(RegistrarError::BadEnvVar { source, name }),
    }
}

fn var_or(name: &'static str, default: &str) -> RegistrarResult<String> {
    Ok(optional_var(name)?.unwrap_or_else(|| default.to_string()))
}

fn millis_var(name: &'static str, default: Duration) -> RegistrarResult<Duration> {
    optional_var(name)?.map_or(Ok(default), |ms| {
        ms.trim()
            .parse()
            .map(Duration::from_millis)
            .context(ParseDelaySnafu { name })
    })
}

impl RuntimeConfiguration {
    pub fn new() -> RegistrarResult<Self> {
        let defaults = Delays::default();

        Ok(Self {
            endpoints: Endpoints::new(&var_or("REGISTRAR_API_BASE_URL", DEFAULT_API_BASE_URL)?)?,
            server_ip: var_or("REGISTRAR_SERVER_IP", DEFAULT_SERVER_IP)?,
            delays: Delays {
                after_save: millis_var("REGISTRAR_REDIRECT_DELAY_MS", defaults.after_save)?,
                after_failed_load: millis_var(
                    "REGISTRAR_FAILED_LOAD_DELAY_MS",
                    defaults.after_failed_load,
                )?,
                toast_lifetime: millis_var("REGISTRAR_TOAST_MS", defaults.toast_lifetime)?,
            },
            date_locale: Arc::new(DateLocaleConfig::new(
                optional_var("REGISTRAR_TIMEZONE")?,
                var_or("REGISTRAR_LOCALE", "en-US")?,
            )?),
        })
    }

    /// Defaults everywhere apart from the backend, without touching the environment.
    pub fn for_backend(api_base_url: &str) -> RegistrarResult<Self> {
        Ok(Self {
            endpoints: Endpoints::new(api_base_url)?,
            server_ip: DEFAULT_SERVER_IP.to_string(),
            delays: Delays::default(),
            date_locale: Arc::new(DateLocaleConfig::new(None, "en-US".to_string())?),
        })
    }

    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn server_ip(&self) -> &str {
        &self.server_ip
    }

    pub const fn delays(&self) -> Delays {
        self.delays
    }

    pub fn date_locale(&self) -> Arc<DateLocaleConfig> {
        self.date_locale.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_only_configuration_uses_defaults() {
        let config = RuntimeConfiguration::for_backend("http://127.0.0.1:9000/api/").unwrap();

        assert_eq!(
            config.endpoints().students().as_str(),
            "http://127.0.0.1:9000/api/students"
        );
        assert_eq!(config.server_ip(), DEFAULT_SERVER_IP);
        assert_eq!(config.delays().after_save, Duration::from_millis(1500));
        assert_eq!(config.delays().after_failed_load, Duration::from_millis(2000));
    }

    #[test]
    fn bad_backend_urls_are_refused() {
        assert!(RuntimeConfiguration::for_backend("localhost without a scheme").is_err());
    }
}
