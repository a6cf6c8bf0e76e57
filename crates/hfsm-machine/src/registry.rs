//! # Behavior Registry
//!
//! Memoizes compiled specs by behavior name so that each distinct definition
//! is compiled once per process, however many instances are bound to it.
//! Compiled specs are handed out as `Arc`s and may be shared across threads.

use std::collections::HashMap;
use std::sync::Arc;

use hfsm_core::{CompileError, CompileOptions};

use crate::behavior::Behavior;
use crate::compile::compile_with;
use crate::compiled::CompiledSpec;
use crate::spec::StateNode;

/// Name-keyed cache of compiled specs for one behavior type.
pub struct BehaviorRegistry<B: Behavior> {
    options: CompileOptions,
    compiled: HashMap<String, Arc<CompiledSpec<B>>>,
}

impl<B: Behavior> BehaviorRegistry<B> {
    /// An empty registry compiling with default options.
    pub fn new() -> Self {
        Self::with_options(CompileOptions::default())
    }

    /// An empty registry compiling with `options`.
    pub fn with_options(options: CompileOptions) -> Self {
        Self {
            options,
            compiled: HashMap::new(),
        }
    }

    /// The compiled spec registered under `name`, compiling the spec that
    /// `build` returns on first use. `build` is not called on later lookups.
    ///
    /// A failed compilation is not cached.
    pub fn get_or_compile<F>(&mut self, name: &str, build: F) -> Result<Arc<CompiledSpec<B>>, CompileError>
    where
        F: FnOnce() -> StateNode<B>,
    {
        if let Some(spec) = self.compiled.get(name) {
            return Ok(Arc::clone(spec));
        }
        let spec = Arc::new(compile_with(&build(), &self.options)?);
        tracing::debug!(behavior = name, states = spec.len(), "registered behavior");
        self.compiled.insert(name.to_string(), Arc::clone(&spec));
        Ok(spec)
    }

    /// The compiled spec registered under `name`, if any.
    pub fn get(&self, name: &str) -> Option<Arc<CompiledSpec<B>>> {
        self.compiled.get(name).cloned()
    }

    /// Registered behavior names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.compiled.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered behaviors.
    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    /// Whether no behavior has been registered.
    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}

impl<B: Behavior> Default for BehaviorRegistry<B> {
    fn default() -> Self {
        Self::new()
    }
}
