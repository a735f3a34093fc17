//! Counter config loader (env-derived, strict validation).

pub mod schema;

use std::env;

use tally_core::error::Result;

pub use schema::CounterConfig;

/// Load configuration from the process environment.
pub fn load_from_env() -> Result<CounterConfig> {
    from_pairs(env::vars())
}

/// Build configuration from explicit key/value pairs. Tests use this to
/// stay independent of the real environment; unknown keys are ignored
/// since the process environment carries plenty of unrelated variables.
pub fn from_pairs<I, K, V>(pairs: I) -> Result<CounterConfig>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut cfg = CounterConfig::default();
    for (key, value) in pairs {
        cfg.apply(key.as_ref(), value.into())?;
    }
    cfg.validate()?;
    Ok(cfg)
}
