//! Template compilation cache
//!
//! Compiles each distinct template source once and serves every later request
//! for the same source from memory. Sources are keyed verbatim.
//!
//! Locking: the map lock is only held to look up or insert a slot. Compilation
//! runs inside the slot's `OnceCell`, so callers racing on the same source
//! wait for one compile while everyone else keeps reading the map. Failed
//! compiles leave nothing behind and are retried on the next call.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use handlebars::template::{HelperTemplate, Parameter, TemplateElement};
use handlebars::{Context, Handlebars, Output, RenderContext, Renderable, Template};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use serde::Serialize;
use tracing::debug;

use crate::error::{PromptError, PromptResult};
use crate::registry::HelperRegistry;

/// Helpers every Handlebars registry ships with
const BUILTIN_HELPERS: &[&str] = &[
    "if", "unless", "each", "with", "lookup", "raw", "log", "eq", "ne", "gt", "gte", "lt", "lte", "and", "or", "not",
    "len",
];

type Slot = Arc<OnceCell<CompiledTemplate>>;

/// A parsed template, immutable and cheap to clone
#[derive(Clone)]
pub struct CompiledTemplate {
    inner: Arc<CompiledInner>,
}

struct CompiledInner {
    source: String,
    template: Template,
}

impl CompiledTemplate {
    pub fn source(&self) -> &str {
        &self.inner.source
    }

    /// True when both handles point at the same compilation
    pub fn ptr_eq(&self, other: &CompiledTemplate) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for CompiledTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledTemplate")
            .field("source", &self.inner.source)
            .finish()
    }
}

/// Counters for cache activity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Requests answered by an already compiled entry
    pub hits: usize,
    /// Successful compilations
    pub compilations: usize,
    /// Compilations that returned an error
    pub failures: usize,
}

#[derive(Default)]
struct Counters {
    hits: AtomicUsize,
    compilations: AtomicUsize,
    failures: AtomicUsize,
}

/// Memoizing renderer bound to one helper registry
pub struct TemplateCache {
    hbs: Handlebars<'static>,
    registry: Arc<HelperRegistry>,
    entries: RwLock<HashMap<String, Slot>>,
    counters: Counters,
}

impl TemplateCache {
    /// Create an empty cache whose templates may call the helpers in `registry`
    pub fn new(registry: HelperRegistry) -> Self {
        debug!(helpers = registry.len(), "TemplateCache::new: called");
        let mut hbs = Handlebars::new();

        // Missing fields are errors, and prompts are terminal text, not HTML
        hbs.set_strict_mode(true);
        hbs.register_escape_fn(handlebars::no_escape);
        registry.install(&mut hbs);

        Self {
            hbs,
            registry: Arc::new(registry),
            entries: RwLock::new(HashMap::new()),
            counters: Counters::default(),
        }
    }

    pub fn registry(&self) -> &HelperRegistry {
        &self.registry
    }

    /// Fetch the compiled form of `source`, compiling it on first use
    pub fn get_or_compile(&self, source: &str) -> PromptResult<CompiledTemplate> {
        let existing = self.entries.read().get(source).cloned();

        if let Some(slot) = &existing
            && let Some(compiled) = slot.get()
        {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(compiled.clone());
        }

        let slot = match existing {
            Some(slot) => slot,
            None => self.entries.write().entry(source.to_string()).or_default().clone(),
        };

        let mut compiled_here = false;
        let result = slot.get_or_try_init(|| {
            compiled_here = true;
            self.compile(source)
        });

        match result {
            Ok(compiled) => {
                if !compiled_here {
                    self.counters.hits.fetch_add(1, Ordering::Relaxed);
                }
                Ok(compiled.clone())
            }
            Err(err) => {
                self.discard(source, &slot);
                Err(err)
            }
        }
    }

    /// Compile-or-fetch `source`, then render it against `data`
    pub fn render<T: Serialize>(&self, source: &str, data: &T) -> PromptResult<String> {
        let compiled = self.get_or_compile(source)?;
        self.execute(&compiled, data)
    }

    /// Render an already compiled template; output is discarded on any error
    pub fn execute<T: Serialize>(&self, compiled: &CompiledTemplate, data: &T) -> PromptResult<String> {
        let ctx = Context::wraps(data).map_err(|e| PromptError::Render(e.to_string()))?;
        let mut out = PromptBuffer::default();
        let mut rc = RenderContext::new(None);

        compiled
            .inner
            .template
            .render(&self.hbs, &ctx, &mut rc, &mut out)
            .map_err(|e| PromptError::Render(e.to_string()))?;

        Ok(out.0)
    }

    /// Number of successfully compiled entries
    pub fn len(&self) -> usize {
        self.entries.read().values().filter(|slot| slot.get().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when `source` has been compiled successfully
    pub fn contains(&self, source: &str) -> bool {
        self.entries
            .read()
            .get(source)
            .is_some_and(|slot| slot.get().is_some())
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            compilations: self.counters.compilations.load(Ordering::Relaxed),
            failures: self.counters.failures.load(Ordering::Relaxed),
        }
    }

    fn compile(&self, source: &str) -> PromptResult<CompiledTemplate> {
        debug!(len = source.len(), "TemplateCache::compile: called");
        let outcome = Template::compile(source)
            .map_err(|e| PromptError::Compile(e.to_string()))
            .and_then(|template| {
                self.check_helpers(&template)?;
                Ok(template)
            });

        match outcome {
            Ok(template) => {
                self.counters.compilations.fetch_add(1, Ordering::Relaxed);
                Ok(CompiledTemplate {
                    inner: Arc::new(CompiledInner {
                        source: source.to_string(),
                        template,
                    }),
                })
            }
            Err(err) => {
                self.counters.failures.fetch_add(1, Ordering::Relaxed);
                Err(err)
            }
        }
    }

    /// Drop an empty slot left by a failed compile, unless someone replaced it
    fn discard(&self, source: &str, slot: &Slot) {
        let mut entries = self.entries.write();
        if let Some(current) = entries.get(source)
            && Arc::ptr_eq(current, slot)
            && current.get().is_none()
        {
            entries.remove(source);
        }
    }

    fn check_helpers(&self, template: &Template) -> PromptResult<()> {
        template
            .elements
            .iter()
            .try_for_each(|element| self.check_element(element))
    }

    fn check_element(&self, element: &TemplateElement) -> PromptResult<()> {
        match element {
            TemplateElement::Expression(ht) | TemplateElement::HtmlExpression(ht) | TemplateElement::HelperBlock(ht) => {
                self.check_invocation(ht)
            }
            _ => Ok(()),
        }
    }

    /// A name is only a helper call when it is given arguments; a bare
    /// `{{name}}` may be a field lookup and is resolved at render time.
    fn check_invocation(&self, ht: &HelperTemplate) -> PromptResult<()> {
        if (!ht.params.is_empty() || !ht.hash.is_empty())
            && let Some(name) = ht.name.as_name()
        {
            match self.registry.get(name) {
                Some(helper) if helper.arity() != ht.params.len() => {
                    return Err(PromptError::Compile(format!(
                        "helper '{}' takes {} argument(s), got {}",
                        name,
                        helper.arity(),
                        ht.params.len()
                    )));
                }
                Some(_) => {}
                None if BUILTIN_HELPERS.contains(&name) => {}
                None => return Err(PromptError::Compile(format!("undefined helper '{}'", name))),
            }
        }

        for param in ht.params.iter().chain(ht.hash.values()) {
            self.check_parameter(param)?;
        }
        for nested in [&ht.template, &ht.inverse].into_iter().flatten() {
            self.check_helpers(nested)?;
        }
        Ok(())
    }

    fn check_parameter(&self, param: &Parameter) -> PromptResult<()> {
        match param {
            Parameter::Subexpression(sub) => self.check_element(&sub.element),
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for TemplateCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateCache")
            .field("entries", &self.len())
            .field("stats", &self.stats())
            .finish()
    }
}

/// Render target collecting output in memory
#[derive(Default)]
struct PromptBuffer(String);

impl Output for PromptBuffer {
    fn write(&mut self, seg: &str) -> Result<(), std::io::Error> {
        self.0.push_str(seg);
        Ok(())
    }
}
