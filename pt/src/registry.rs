//! Helper registry
//!
//! A fixed table of named callables exposed to templates. Built once, read-only
//! afterwards, and shared by every template a cache compiles.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use handlebars::{
    Context, Handlebars, Helper as HbHelper, HelperDef, HelperResult, Output, RenderContext, RenderErrorReason,
};
use tracing::debug;

use crate::color::ColorMode;
use crate::icons::IconSet;

/// Callable behind a helper; receives the rendered string form of each argument
pub type HelperFn = dyn Fn(&[String]) -> String + Send + Sync;

/// A named callable with a fixed argument count
#[derive(Clone)]
pub struct Helper {
    name: String,
    arity: usize,
    func: Arc<HelperFn>,
}

impl Helper {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Invoke the helper, rejecting the wrong number of arguments
    pub fn call(&self, args: &[String]) -> Result<String, String> {
        if args.len() != self.arity {
            return Err(format!(
                "helper '{}' takes {} argument(s), got {}",
                self.name,
                self.arity,
                args.len()
            ));
        }
        Ok((self.func)(args))
    }
}

impl fmt::Debug for Helper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Helper")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

impl HelperDef for Helper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &HbHelper,
        _: &Handlebars,
        _: &Context,
        _: &mut RenderContext,
        out: &mut dyn Output,
    ) -> HelperResult {
        let mut args = Vec::with_capacity(h.params().len());
        for param in h.params() {
            // Strict mode does not cover helper arguments
            if param.is_value_missing() {
                return Err(RenderErrorReason::MissingVariable(param.relative_path().cloned()).into());
            }
            args.push(match param.value().as_str() {
                Some(s) => s.to_string(),
                None => param.value().to_string(),
            });
        }

        let text = Helper::call(self, &args).map_err(RenderErrorReason::Other)?;
        out.write(&text)?;
        Ok(())
    }
}

/// Immutable name → helper table
#[derive(Debug, Clone, Default)]
pub struct HelperRegistry {
    helpers: BTreeMap<String, Helper>,
}

impl HelperRegistry {
    pub fn builder() -> HelperRegistryBuilder {
        HelperRegistryBuilder::default()
    }

    /// The prompt helpers: one per icon, plus `color`
    pub fn standard(icons: &IconSet, colors: ColorMode) -> Self {
        debug!(?colors, "HelperRegistry::standard: called");
        let mut builder = Self::builder();
        for (name, icon) in icons.iter() {
            builder = builder.symbol(name, icon.symbol.clone());
        }
        builder
            .helper("color", 1, move |args| colors.code(&args[0]))
            .build()
    }

    pub fn get(&self, name: &str) -> Option<&Helper> {
        self.helpers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.helpers.contains_key(name)
    }

    /// Helper names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.helpers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.helpers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }

    /// Register every helper on a Handlebars instance
    pub(crate) fn install(&self, hbs: &mut Handlebars<'static>) {
        for helper in self.helpers.values() {
            hbs.register_helper(&helper.name, Box::new(helper.clone()));
        }
    }
}

/// Collects helpers before the registry is frozen
#[derive(Default)]
pub struct HelperRegistryBuilder {
    helpers: BTreeMap<String, Helper>,
}

impl HelperRegistryBuilder {
    /// Add a helper; a later registration under the same name replaces it
    pub fn helper<F>(mut self, name: impl Into<String>, arity: usize, func: F) -> Self
    where
        F: Fn(&[String]) -> String + Send + Sync + 'static,
    {
        let name = name.into();
        self.helpers.insert(
            name.clone(),
            Helper {
                name,
                arity,
                func: Arc::new(func),
            },
        );
        self
    }

    /// Add a zero-argument helper that always returns `text`
    pub fn symbol(self, name: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        self.helper(name, 0, move |_| text.clone())
    }

    pub fn build(self) -> HelperRegistry {
        debug!(count = self.helpers.len(), "HelperRegistryBuilder::build: called");
        HelperRegistry { helpers: self.helpers }
    }
}
