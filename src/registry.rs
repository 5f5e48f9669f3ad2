//! Static resource registry: path -> factory. Built once at startup, read-only afterwards.

use crate::error::AppError;
use crate::resource::{AcceptsInput, InputData, InputFiller, RequestSource, RestResource};
use crate::service::{input_field_names, InputBinder};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

type BuildFn = dyn Fn(&FillerRegistry, RequestSource<'_>) -> Result<Box<dyn RestResource>, AppError>
    + Send
    + Sync;

/// One registered resource and how to build it for a request.
#[derive(Clone)]
pub struct RegisteredResource {
    /// Path as given at registration, e.g. "shop/Order".
    pub path: String,
    /// Whether the handler takes a bound input container.
    pub accepts_input: bool,
    build: Arc<BuildFn>,
}

impl RegisteredResource {
    /// Instantiate the handler, binding its input container first when it takes one.
    pub fn instantiate(
        &self,
        fillers: &FillerRegistry,
        source: RequestSource<'_>,
    ) -> Result<Box<dyn RestResource>, AppError> {
        (self.build)(fillers, source)
    }
}

impl std::fmt::Debug for RegisteredResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredResource")
            .field("path", &self.path)
            .field("accepts_input", &self.accepts_input)
            .finish()
    }
}

/// Custom fillers keyed by the input type they populate.
#[derive(Default)]
pub struct FillerRegistry {
    fillers: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl FillerRegistry {
    pub fn insert<I: InputData>(&mut self, filler: Arc<dyn InputFiller<I>>) {
        self.fillers.insert(TypeId::of::<I>(), Box::new(filler));
    }

    pub fn get<I: InputData>(&self) -> Option<Arc<dyn InputFiller<I>>> {
        self.fillers
            .get(&TypeId::of::<I>())
            .and_then(|f| f.downcast_ref::<Arc<dyn InputFiller<I>>>())
            .cloned()
    }
}

/// Resource handlers by path. Path segments are joined by `/`; lookup ignores case.
#[derive(Default)]
pub struct ResourceRegistry {
    resources: HashMap<String, RegisteredResource>,
    fillers: FillerRegistry,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler that takes no input container.
    pub fn register<R, F>(&mut self, path: &str, factory: F) -> &mut Self
    where
        R: RestResource + 'static,
        F: Fn() -> R + Send + Sync + 'static,
    {
        let build = move |_: &FillerRegistry,
                          _: RequestSource<'_>|
              -> Result<Box<dyn RestResource>, AppError> { Ok(Box::new(factory())) };
        self.insert(path, false, Arc::new(build))
    }

    /// Register a handler whose input container is bound from the request before it runs.
    pub fn register_with_input<R, F>(&mut self, path: &str, factory: F) -> &mut Self
    where
        R: AcceptsInput + 'static,
        F: Fn() -> R + Send + Sync + 'static,
    {
        tracing::debug!(
            path,
            input = std::any::type_name::<R::Input>(),
            fields = ?input_field_names::<R::Input>(),
            "registering input resource"
        );
        let build = move |fillers: &FillerRegistry,
                          source: RequestSource<'_>|
              -> Result<Box<dyn RestResource>, AppError> {
            let mut resource = factory();
            let filler = fillers.get::<R::Input>();
            let input = InputBinder::bind::<R::Input>(filler.as_deref(), source)?;
            tracing::trace!(input = resource.input_data_type_name(), custom = filler.is_some(), "input bound");
            resource.set_input_data(input);
            Ok(Box::new(resource))
        };
        self.insert(path, true, Arc::new(build))
    }

    /// Install a filler that replaces default binding for every handler taking input type `I`.
    pub fn register_filler<I, F>(&mut self, filler: F) -> &mut Self
    where
        I: InputData,
        F: InputFiller<I> + 'static,
    {
        self.fillers.insert::<I>(Arc::new(filler));
        self
    }

    fn insert(&mut self, path: &str, accepts_input: bool, build: Arc<BuildFn>) -> &mut Self {
        let key = registry_key(path);
        let entry = RegisteredResource {
            path: path.trim_matches('/').to_string(),
            accepts_input,
            build,
        };
        if let Some(previous) = self.resources.insert(key, entry) {
            tracing::warn!(path = %previous.path, "resource registered twice; keeping the latest");
        }
        self
    }

    /// Look up an exact path (case-insensitive).
    pub fn get(&self, path: &str) -> Option<&RegisteredResource> {
        self.resources.get(&registry_key(path))
    }

    /// First registered path among `candidates`, in order.
    pub fn first_of<'a, I>(&self, candidates: I) -> Option<&RegisteredResource>
    where
        I: IntoIterator<Item = &'a str>,
    {
        candidates.into_iter().find_map(|c| self.get(c))
    }

    pub fn fillers(&self) -> &FillerRegistry {
        &self.fillers
    }

    /// Registered paths, sorted.
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.resources.values().map(|r| r.path.as_str()).collect();
        paths.sort_unstable();
        paths
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

fn registry_key(path: &str) -> String {
    path.trim_matches('/').to_lowercase()
}
