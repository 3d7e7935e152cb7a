//! Annotation-to-generator bindings.
//!
//! The registry layers caller-supplied bindings over the engine's built-in
//! table. Built-ins are process-wide static data; caller bindings are
//! per-run state that is discarded with the run configuration. Mutation is
//! only permitted during configuration assembly, the registry is read-only
//! for the duration of generation.

use indexmap::IndexMap;

/// Shipped defaults for the engine's own recognized trigger annotations.
pub const BUILTIN_BINDINGS: &[(&str, &str)] = &[
    ("dev.kiln.generate.GenerateBean", "bean"),
    ("dev.kiln.generate.GenerateBuilder", "builder"),
    ("dev.kiln.generate.GenerateMatcher", "matcher"),
    ("dev.kiln.generate.GenerateProperties", "properties"),
];

/// Maps a trigger annotation's full name to the generator responsible for it.
#[derive(Debug, Clone, Default)]
pub struct BindingRegistry {
    overrides: IndexMap<String, String>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a caller binding, last write wins.
    ///
    /// Returns the binding that was previously visible for the annotation,
    /// a caller binding or a now-shadowed built-in, so assembly can emit an
    /// override warning instead of swallowing the old value silently.
    pub fn register(
        &mut self,
        annotation: impl Into<String>,
        generator: impl Into<String>,
    ) -> Option<String> {
        let annotation = annotation.into();
        let shadowed_builtin = Self::builtin(&annotation).map(str::to_string);
        self.overrides
            .insert(annotation, generator.into())
            .or(shadowed_builtin)
    }

    /// Resolve the generator identifier for a trigger annotation.
    ///
    /// Caller bindings win over built-ins; an unbound annotation resolves
    /// to nothing, which skips the trigger rather than failing the run.
    pub fn resolve(&self, annotation: &str) -> Option<&str> {
        self.overrides
            .get(annotation)
            .map(String::as_str)
            .or_else(|| Self::builtin(annotation))
    }

    /// Look up the built-in binding for an annotation.
    pub fn builtin(annotation: &str) -> Option<&'static str> {
        BUILTIN_BINDINGS
            .iter()
            .find(|(known, _)| *known == annotation)
            .map(|(_, generator)| *generator)
    }

    /// Caller bindings in registration order.
    pub fn overrides(&self) -> impl Iterator<Item = (&str, &str)> {
        self.overrides
            .iter()
            .map(|(annotation, generator)| (annotation.as_str(), generator.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_fallback() {
        let registry = BindingRegistry::new();
        assert_eq!(
            registry.resolve("dev.kiln.generate.GenerateBean"),
            Some("bean")
        );
    }

    #[test]
    fn test_caller_binding_wins_over_builtin() {
        let mut registry = BindingRegistry::new();
        let previous = registry.register("dev.kiln.generate.GenerateBean", "custom-bean");
        assert_eq!(previous.as_deref(), Some("bean"));
        assert_eq!(
            registry.resolve("dev.kiln.generate.GenerateBean"),
            Some("custom-bean")
        );
    }

    #[test]
    fn test_unbound_annotation_is_absent() {
        let registry = BindingRegistry::new();
        assert_eq!(registry.resolve("com.acme.GenerateNothing"), None);
    }

    #[test]
    fn test_reregistration_is_last_write_wins() {
        let mut registry = BindingRegistry::new();
        assert_eq!(registry.register("com.acme.GenerateWidget", "widget"), None);
        let previous = registry.register("com.acme.GenerateWidget", "widget-v2");
        assert_eq!(previous.as_deref(), Some("widget"));
        assert_eq!(registry.resolve("com.acme.GenerateWidget"), Some("widget-v2"));
    }

    #[test]
    fn test_overrides_iterate_in_registration_order() {
        let mut registry = BindingRegistry::new();
        registry.register("com.acme.B", "b");
        registry.register("com.acme.A", "a");

        let keys: Vec<_> = registry.overrides().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["com.acme.B", "com.acme.A"]);
    }
}
