use crate::{
    coerce::Coerce,
    environment::Env,
    error::ConfigError,
    field::{FieldDescriptor, ValueSource},
    source::RawValues,
};
use tracing::{debug, trace};

/// Resolves fields against the environment, the parsed file and defaults,
/// in that order of priority.
///
/// This is also the manual API for types that don't use `define_config!`.
///
/// # Example
/// ```rust
/// use layered_env::{FieldDescriptor, RawValues, Resolver};
/// use std::collections::HashMap;
///
/// let env = HashMap::from([("PORT", "9000")]);
/// let file = RawValues::new();
/// let resolver = Resolver::new(&env, &file);
///
/// let mut port: u16 = 0;
/// resolver
///     .resolve_into(&FieldDescriptor::new::<u16>("PORT").default("8080"), &mut port)
///     .unwrap();
/// assert_eq!(port, 9000);
/// ```
pub struct Resolver<'a> {
    env: &'a dyn Env,
    file: &'a RawValues,
}

impl<'a> Resolver<'a> {
    pub fn new(env: &'a dyn Env, file: &'a RawValues) -> Self {
        Self { env, file }
    }

    /// Find the raw string for a field and which source supplied it.
    ///
    /// Keyless fields are never looked up and fail with
    /// [`ConfigError::NoLookupKey`]; [`Resolver::resolve_into`] skips them instead.
    pub fn raw_value(&self, field: &FieldDescriptor) -> Result<(String, ValueSource), ConfigError> {
        if field.is_skipped() {
            return Err(ConfigError::NoLookupKey);
        }
        if let Some(value) = self.env.var(field.key) {
            return Ok((value, ValueSource::Environment));
        }
        if let Some(value) = self.file.get(field.key) {
            return Ok((value.clone(), ValueSource::File));
        }
        if let Some(default) = field.default {
            return Ok((default.to_string(), ValueSource::Default));
        }

        Err(ConfigError::MissingEnvVar {
            key: field.key.to_string(),
        })
    }

    /// Resolve a field's raw string and coerce it into `T`
    pub fn value<T: Coerce>(&self, field: &FieldDescriptor) -> Result<T, ConfigError> {
        let (raw, source) = self.raw_value(field)?;

        match T::coerce(&raw) {
            Some(value) => {
                debug!(key = field.key, %source, "resolved config field");
                Ok(value)
            }
            None => Err(ConfigError::InvalidValue {
                key: field.key.to_string(),
                value: raw,
                type_name: T::KIND.type_name(),
            }),
        }
    }

    /// Resolve a field and write it into `slot`.
    ///
    /// Fields without a lookup key are left untouched.
    pub fn resolve_into<T: Coerce>(
        &self,
        field: &FieldDescriptor,
        slot: &mut T,
    ) -> Result<(), ConfigError> {
        if field.is_skipped() {
            trace!("skipping config field without lookup key");
            return Ok(());
        }

        *slot = self.value(field)?;
        Ok(())
    }
}
