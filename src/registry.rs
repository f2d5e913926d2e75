//! The process-wide polymorphic dispatch table.
//!
//! The registry maps an abstract type's name to the ordered list of
//! `(tag, registration)` pairs that can satisfy it. It is populated as a side
//! effect of registrations declaring their identity, and is append-only:
//! entries are never removed or overwritten, and duplicate tags simply
//! accumulate (resolution takes the first match).
//!
//! Registration is expected to happen during process initialization, before
//! concurrent decode traffic begins. Once initialization has quiesced, all
//! lookups are read-only and safely concurrent.
//!
//! Most programs use the single [`global`](Registry::global) instance. Tests
//! construct isolated registries with [`Registry::new`] so cases do not
//! share hidden state.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};

use crate::error::{Result, TagcodeError};
use crate::identity::TypeName;
use crate::registration::DynRegistration;

#[derive(Clone)]
struct RegistryEntry {
    tag: TypeName,
    registration: Arc<dyn DynRegistration>,
}

/// Append-only mapping from an abstract type to its registered subtypes.
pub struct Registry {
    entries: RwLock<HashMap<TypeName, Vec<RegistryEntry>>>,
}

impl Registry {
    /// Creates an empty, isolated registry.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide registry, created on first access.
    ///
    /// With the `auto_register` feature enabled, the first access also runs
    /// every hook submitted with [`submit_registration!`](crate::submit_registration).
    pub fn global() -> Arc<Registry> {
        static GLOBAL: OnceLock<Arc<Registry>> = OnceLock::new();
        let registry = GLOBAL.get_or_init(|| Arc::new(Registry::new())).clone();
        #[cfg(feature = "auto_register")]
        run_startup_hooks();
        registry
    }

    /// Appends `(tag, registration)` under `abstract_name`.
    ///
    /// No dedup, no overwrite: repeated insertion of the same tag appends.
    pub fn register(
        &self,
        abstract_name: TypeName,
        tag: TypeName,
        registration: Arc<dyn DynRegistration>,
    ) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries
            .entry(abstract_name)
            .or_default()
            .push(RegistryEntry { tag, registration });
        Ok(())
    }

    /// Finds the registration for `tag` under `abstract_name`.
    ///
    /// Linear scan in insertion order; the first match wins when duplicates
    /// exist. A miss is a lookup error naming both the tag and the abstract
    /// type.
    pub fn resolve(&self, abstract_name: TypeName, tag: &str) -> Result<Arc<dyn DynRegistration>> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        entries
            .get(&abstract_name)
            .and_then(|list| list.iter().find(|entry| entry.tag.as_str() == tag))
            .map(|entry| entry.registration.clone())
            .ok_or_else(|| {
                TagcodeError::Lookup(format!(
                    "no subtype registered under tag {:?} for abstract type {:?}",
                    tag,
                    abstract_name.as_str()
                ))
            })
    }

    /// Every abstract name with at least one entry. Unordered.
    pub fn abstract_names(&self) -> Result<Vec<TypeName>> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.keys().copied().collect())
    }

    /// The tags registered under `abstract_name`, in insertion order.
    /// Empty if the name has never been registered.
    pub fn tags(&self, abstract_name: TypeName) -> Result<Vec<TypeName>> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries
            .get(&abstract_name)
            .map(|list| list.iter().map(|entry| entry.tag).collect())
            .unwrap_or_default())
    }

    /// Snapshot of the entries under `abstract_name`, in insertion order.
    pub(crate) fn entries_of(
        &self,
        abstract_name: TypeName,
    ) -> Result<Vec<(TypeName, Arc<dyn DynRegistration>)>> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries
            .get(&abstract_name)
            .map(|list| {
                list.iter()
                    .map(|entry| (entry.tag, entry.registration.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry").finish_non_exhaustive()
    }
}

fn poisoned() -> TagcodeError {
    TagcodeError::Internal("registry lock poisoned".to_string())
}

/// A registration hook submitted for startup execution.
///
/// The function typically touches a derived type's `registration()` accessor
/// so its identity lands in the global registry before any decode runs.
#[cfg(feature = "auto_register")]
pub struct StartupRegistration {
    /// Runs the registration.
    pub run: fn(),
}

#[cfg(feature = "auto_register")]
inventory::collect!(StartupRegistration);

/// Submits a registration hook to run at first access of the global registry.
///
/// Takes the path of a `fn()` that performs the registration, typically by
/// touching a derived type's `registration()` accessor:
///
/// ```rust,ignore
/// fn register_circle() {
///     let _ = Circle::registration();
/// }
/// tagcode::submit_registration!(register_circle);
/// ```
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! submit_registration {
    ($hook:path) => {
        $crate::internal::inventory::submit! {
            $crate::registry::StartupRegistration { run: $hook }
        }
    };
}

#[cfg(feature = "auto_register")]
fn run_startup_hooks() {
    use std::sync::atomic::{AtomicBool, Ordering};
    static HOOKS_RUN: AtomicBool = AtomicBool::new(false);
    // Claim-then-run rather than Once: the hooks themselves touch the global
    // registry, and a reentrant call_once would deadlock.
    if !HOOKS_RUN.swap(true, Ordering::SeqCst) {
        for hook in inventory::iter::<StartupRegistration> {
            (hook.run)();
        }
    }
}
