//! Required/optional variable access

use crate::env::loader::ResolvedEnvironment;
use crate::error::EnvError;
use std::fmt::Display;
use std::str::FromStr;

impl ResolvedEnvironment {
    /// Raw lookup without defaults.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Read `name`, falling back to `default`.
    ///
    /// Returns [`EnvError::Missing`] when `required` is set and neither the
    /// environment nor `default` supplies a value.
    pub fn get(
        &self,
        name: &str,
        default: Option<&str>,
        required: bool,
    ) -> Result<Option<String>, EnvError> {
        resolve_value(name, self.lookup(name).map(str::to_string), default, required)
    }

    /// Shorthand for a required lookup.
    pub fn require(&self, name: &str) -> Result<String, EnvError> {
        self.get(name, None, true)?.ok_or_else(|| EnvError::Missing { name: name.to_string() })
    }

    /// Read `name` and parse it as `T`.
    ///
    /// The parse error is reported without echoing the value.
    pub fn get_parsed<T>(&self, name: &str, required: bool) -> Result<Option<T>, EnvError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let Some(raw) = self.get(name, None, required)? else {
            return Ok(None);
        };
        raw.trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| EnvError::Invalid { name: name.to_string(), reason: e.to_string() })
    }
}

/// Read `name` from the live process environment, falling back to `default`.
///
/// This is the accessor downstream code uses after [`crate::env::init`] has
/// merged the `.env` file into the process.
pub fn get_env_var(
    name: &str,
    default: Option<&str>,
    required: bool,
) -> Result<Option<String>, EnvError> {
    resolve_value(name, std::env::var(name).ok(), default, required)
}

fn resolve_value(
    name: &str,
    found: Option<String>,
    default: Option<&str>,
    required: bool,
) -> Result<Option<String>, EnvError> {
    match found.or_else(|| default.map(str::to_string)) {
        Some(value) => Ok(Some(value)),
        None if required => Err(EnvError::Missing { name: name.to_string() }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::get_env_var;
    use crate::env::loader::{EnvLoader, ResolvedEnvironment};
    use crate::env::store::MapEnv;
    use crate::error::EnvError;
    use tempfile::TempDir;

    fn resolved_with(vars: &[(&str, &str)]) -> ResolvedEnvironment {
        let tmp = TempDir::new().expect("tmp");
        let loader = EnvLoader::new(tmp.path(), ".env", 1, tmp.path().to_path_buf());
        let mut env: MapEnv = vars.iter().copied().collect();
        loader.resolve(&mut env)
    }

    #[test]
    fn required_missing_without_default_fails() {
        let env = resolved_with(&[]);
        let err = env.get("OPENAI_API_KEY", None, true).expect_err("should fail");
        assert_eq!(err, EnvError::Missing { name: "OPENAI_API_KEY".to_string() });
        assert!(env.require("OPENAI_API_KEY").is_err());
    }

    #[test]
    fn optional_missing_returns_default() {
        let env = resolved_with(&[]);
        assert_eq!(env.get("QDRANT_URL", Some("x"), false).expect("ok"), Some("x".to_string()));
        assert_eq!(env.get("QDRANT_URL", None, false).expect("ok"), None);
    }

    #[test]
    fn required_satisfied_by_default() {
        let env = resolved_with(&[]);
        assert_eq!(
            env.get("DATABASE_URL", Some("sqlite://local.db"), true).expect("ok"),
            Some("sqlite://local.db".to_string())
        );
    }

    #[test]
    fn environment_value_beats_default() {
        let env = resolved_with(&[("QDRANT_URL", "http://qdrant:6333")]);
        assert_eq!(
            env.get("QDRANT_URL", Some("http://localhost:6333"), false).expect("ok"),
            Some("http://qdrant:6333".to_string())
        );
    }

    #[test]
    fn parsed_values() {
        let env = resolved_with(&[("WORKERS", " 4 "), ("RATE_LIMIT", "fast")]);
        assert_eq!(env.get_parsed::<u32>("WORKERS", true).expect("ok"), Some(4));
        assert_eq!(env.get_parsed::<u32>("UNSET", false).expect("ok"), None);

        let err = env.get_parsed::<u32>("RATE_LIMIT", false).expect_err("invalid");
        assert!(matches!(err, EnvError::Invalid { ref name, .. } if name == "RATE_LIMIT"));
        assert!(!err.to_string().contains("fast"));
    }

    #[test]
    fn live_process_lookup() {
        temp_env::with_vars(
            [("ENVDOCTOR_ACCESSOR_SET", Some("live")), ("ENVDOCTOR_ACCESSOR_UNSET", None)],
            || {
                assert_eq!(
                    get_env_var("ENVDOCTOR_ACCESSOR_SET", None, true).expect("ok"),
                    Some("live".to_string())
                );
                assert!(get_env_var("ENVDOCTOR_ACCESSOR_UNSET", None, true).is_err());
                assert_eq!(
                    get_env_var("ENVDOCTOR_ACCESSOR_UNSET", Some("d"), false).expect("ok"),
                    Some("d".to_string())
                );
            },
        );
    }
}
