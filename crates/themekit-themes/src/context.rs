//! Scoped access to the active theme
//!
//! A [`ThemeProvider`] makes a store visible to the code running inside it.
//! [`use_current_theme`] returns the active palette and a setter for the
//! innermost provider, for both synchronous code (thread scope) and async
//! tasks (task scope).
//!
//! ```ignore
//! let store = ThemeStore::new(registry, MemoryStore::new(), FixedAppearance::LIGHT);
//! ThemeProvider::scope(&store, || {
//!     let theme = use_current_theme()?;
//!     theme.set_theme("dark")?;
//!     Ok::<_, ThemeError>(())
//! })?;
//! ```

use std::{cell::RefCell, future::Future, marker::PhantomData, sync::Arc};

use crate::{
    error::{Result, ThemeError},
    store::{ActivePalette, ThemeStore},
    types::Palette,
};

type ProviderStack = RefCell<Vec<ThemeStore>>;

thread_local! {
    static PROVIDERS: ProviderStack = const { RefCell::new(Vec::new()) };
}

tokio::task_local! {
    static TASK_PROVIDERS: ProviderStack;
}

/// Entry points for providing a store to a scope
pub struct ThemeProvider;

impl ThemeProvider {
    /// Provide `store` until the guard is dropped
    ///
    /// Inside [`scope_async`](Self::scope_async) the store is pushed onto the
    /// task's provider stack, otherwise onto the thread's. Activates the store
    /// when called inside a Tokio runtime and the store has not been activated
    /// yet; a stored name that fails to resolve is reported through
    /// [`ThemeStore::take_restore_error`].
    pub fn enter(store: &ThemeStore) -> ProviderGuard {
        Self::activate(store);
        let in_task = TASK_PROVIDERS
            .try_with(|providers| providers.borrow_mut().push(store.clone()))
            .is_ok();
        if !in_task {
            PROVIDERS.with(|providers| providers.borrow_mut().push(store.clone()));
        }
        ProviderGuard {
            in_task,
            _not_send: PhantomData,
        }
    }

    /// Run `f` with `store` provided
    pub fn scope<R>(store: &ThemeStore, f: impl FnOnce() -> R) -> R {
        let _guard = Self::enter(store);
        f()
    }

    /// Run `future` with `store` provided to the task, across await points
    ///
    /// Providers entered inside the future stack on top of `store`.
    pub async fn scope_async<F>(store: &ThemeStore, future: F) -> F::Output
    where
        F: Future,
    {
        Self::activate(store);
        TASK_PROVIDERS
            .scope(RefCell::new(vec![store.clone()]), future)
            .await
    }

    fn activate(store: &ThemeStore) {
        if store.is_activated() || tokio::runtime::Handle::try_current().is_err() {
            return;
        }
        // failures stay readable through take_restore_error
        drop(store.activate());
    }
}

/// Removes the provider when dropped; tied to the thread that created it
#[must_use = "the provider is removed as soon as the guard is dropped"]
pub struct ProviderGuard {
    in_task: bool,
    _not_send: PhantomData<*const ()>,
}

impl Drop for ProviderGuard {
    fn drop(&mut self) {
        if self.in_task {
            let _ = TASK_PROVIDERS.try_with(|providers| providers.borrow_mut().pop());
        } else {
            PROVIDERS.with(|providers| {
                providers.borrow_mut().pop();
            });
        }
    }
}

/// The active palette plus a setter, as seen from inside a provider
#[derive(Clone, Debug)]
pub struct ThemeHandle {
    palette: ActivePalette,
    store: ThemeStore,
}

impl ThemeHandle {
    /// Palette at the time the handle was taken; `None` while restoring
    pub fn palette(&self) -> Option<&Arc<Palette>> {
        self.palette.as_ref()
    }

    /// Switch the provided store to another theme
    pub fn set_theme(&self, name: &str) -> Result<Arc<Palette>> {
        self.store.set_theme(name)
    }

    pub fn store(&self) -> &ThemeStore {
        &self.store
    }
}

/// Access the innermost provided store
///
/// Calling this outside any provider is a usage error and fails with
/// [`ThemeError::NotInitialized`].
pub fn use_current_theme() -> Result<ThemeHandle> {
    let store = TASK_PROVIDERS
        .try_with(|providers| providers.borrow().last().cloned())
        .ok()
        .flatten()
        .or_else(|| PROVIDERS.with(|providers| providers.borrow().last().cloned()));

    match store {
        Some(store) => Ok(ThemeHandle {
            palette: store.current(),
            store,
        }),
        None => {
            tracing::error!("use_current_theme called outside a ThemeProvider");
            Err(ThemeError::NotInitialized)
        }
    }
}
