use hashbrown::HashMap;
use lazy_static::lazy_static;
use once_cell::sync::OnceCell;

use crate::coercion::{self, CastContext};
use crate::err;
use crate::error::Result;
use crate::object::{ClassId, Value};

use super::{KindTag, Prototype};

/// Resolves the common type of two prototypes
pub type CommonTypeFn =
    Box<dyn Fn(&Registry, &Prototype, &Prototype) -> Result<Prototype> + Send + Sync>;

/// Casts a value to a destination prototype
pub type CastFn =
    Box<dyn Fn(&Registry, &Value, &Prototype, &CastContext) -> Result<Value> + Send + Sync>;

/// Maps an extended value onto a comparable value
pub type ProxyFn = Box<dyn Fn(&Value) -> Result<Value> + Send + Sync>;

/// Identity under which a rule is registered
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKey {
    Kind(KindTag),
    Class(ClassId),
    /// Matches any destination when no exact rule exists
    Default,
}

impl TypeKey {
    pub fn of(x: &Prototype) -> TypeKey {
        match x {
            Prototype::Extended(t) => TypeKey::Class(t.class.clone()),
            Prototype::Scalar(class) => TypeKey::Class(class.clone()),
            p => TypeKey::Kind(p.kind()),
        }
    }
}

impl From<KindTag> for TypeKey {
    fn from(x: KindTag) -> Self {
        TypeKey::Kind(x)
    }
}

impl From<&str> for TypeKey {
    fn from(x: &str) -> Self {
        TypeKey::Class(ClassId::new(x))
    }
}

/// Rules for types beyond the fixed primitive tables
///
/// Common-type rules are keyed by a pair of type identities and looked up in
/// both orders. Cast rules are keyed by (source, destination), falling back
/// to (source, default). Comparison proxies are keyed by class.
///
/// A registry is populated before use and read-only afterwards. It can be
/// passed around explicitly or installed once as the process-wide registry.
/// Registration after installation is not possible.
///
pub struct Registry {
    common_types: HashMap<(TypeKey, TypeKey), CommonTypeFn>,
    casts: HashMap<(TypeKey, TypeKey), CastFn>,
    proxies: HashMap<ClassId, ProxyFn>,
}

static INSTALLED: OnceCell<Registry> = OnceCell::new();

lazy_static! {
    static ref BUILTIN: Registry = Registry::new();
}

impl Registry {
    /// A registry holding only the built-in record rules
    pub fn new() -> Self {
        let mut registry = Registry {
            common_types: HashMap::new(),
            casts: HashMap::new(),
            proxies: HashMap::new(),
        };

        registry.register_common_type(
            KindTag::Record,
            KindTag::Record,
            coercion::record_common_type,
        );
        registry.register_cast(KindTag::Record, KindTag::Record, coercion::record_cast);
        registry
    }

    pub fn register_common_type<X, Y, F>(&mut self, x: X, y: Y, f: F) -> &mut Self
    where
        X: Into<TypeKey>,
        Y: Into<TypeKey>,
        F: Fn(&Registry, &Prototype, &Prototype) -> Result<Prototype> + Send + Sync + 'static,
    {
        self.common_types.insert((x.into(), y.into()), Box::new(f));
        self
    }

    pub fn register_cast<X, Y, F>(&mut self, from: X, to: Y, f: F) -> &mut Self
    where
        X: Into<TypeKey>,
        Y: Into<TypeKey>,
        F: Fn(&Registry, &Value, &Prototype, &CastContext) -> Result<Value>
            + Send
            + Sync
            + 'static,
    {
        self.casts.insert((from.into(), to.into()), Box::new(f));
        self
    }

    pub fn register_proxy<C, F>(&mut self, class: C, f: F) -> &mut Self
    where
        C: Into<ClassId>,
        F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.proxies.insert(class.into(), Box::new(f));
        self
    }

    /// Find a common-type rule, reporting whether it was found in swapped order
    pub fn find_common_type(&self, x: &TypeKey, y: &TypeKey) -> Option<(&CommonTypeFn, bool)> {
        if let Some(f) = self.common_types.get(&(x.clone(), y.clone())) {
            return Some((f, false));
        }

        self.common_types
            .get(&(y.clone(), x.clone()))
            .map(|f| (f, true))
    }

    pub fn find_cast(&self, from: &TypeKey, to: &TypeKey) -> Option<&CastFn> {
        self.casts
            .get(&(from.clone(), to.clone()))
            .or_else(|| self.casts.get(&(from.clone(), TypeKey::Default)))
    }

    pub fn find_proxy(&self, class: &ClassId) -> Option<&ProxyFn> {
        self.proxies.get(class)
    }

    /// Install as the process-wide registry
    ///
    /// Only one registry can ever be installed.
    ///
    pub fn install(self) -> Result<&'static Registry> {
        INSTALLED
            .set(self)
            .map_err(|_| err!("a registry has already been installed"))?;

        INSTALLED
            .get()
            .ok_or_else(|| crate::internal_err!("registry vanished after install"))
    }

    /// The installed registry, or the built-in rules when none is installed
    pub fn global() -> &'static Registry {
        INSTALLED.get().unwrap_or_else(|| &*BUILTIN)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("common_types", &self.common_types.keys().collect::<Vec<_>>())
            .field("casts", &self.casts.keys().collect::<Vec<_>>())
            .field("proxies", &self.proxies.keys().collect::<Vec<_>>())
            .finish()
    }
}
