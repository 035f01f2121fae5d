//! # Actions
//!
//! Callbacks the menu invokes when an action entry is selected.
//!
//! An action receives the collected answers and returns an [`ActionResult`]
//! telling the engine what to do next. Returning `Continue` (the default)
//! goes back to the menu.
//!
//! ```text
//! "deploy" ──► ActionRegistry ──► Arc<dyn MenuAction> ──► call(answers).await
//!                                                               │
//!                       Continue | ReloadMenu | ReloadSetup | ExitMenu | ExitProgram
//! ```
//!
//! Errors are not recovered from: an `Err` from `call` ends the session and
//! is returned to whoever started it.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Answer id → entered (or pre-supplied) value.
pub type Answers = HashMap<String, String>;

/// What the engine does once an action completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionResult {
    #[default]
    Continue,
    ReloadMenu,
    ReloadSetup,
    ExitMenu,
    ExitProgram,
}

impl ActionResult {
    /// Map a reserved token to a result. Anything unrecognised is `Continue`.
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some("reloadMenu") => ActionResult::ReloadMenu,
            Some("reloadSetup") => ActionResult::ReloadSetup,
            Some("exitMenu") => ActionResult::ExitMenu,
            Some("exitProgram") => ActionResult::ExitProgram,
            _ => ActionResult::Continue,
        }
    }

    pub fn token(&self) -> Option<&'static str> {
        match self {
            ActionResult::Continue => None,
            ActionResult::ReloadMenu => Some("reloadMenu"),
            ActionResult::ReloadSetup => Some("reloadSetup"),
            ActionResult::ExitMenu => Some("exitMenu"),
            ActionResult::ExitProgram => Some("exitProgram"),
        }
    }
}

/// Failure raised by an action. Fatal to the session.
#[derive(Debug)]
pub struct ActionError(pub String);

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ActionError {}

#[async_trait]
pub trait MenuAction: Send + Sync {
    async fn call(&self, answers: Answers) -> Result<ActionResult, ActionError>;
}

/// Adapts an async closure into a [`MenuAction`].
pub struct FnAction<F>(pub F);

#[async_trait]
impl<F, Fut> MenuAction for FnAction<F>
where
    F: Fn(Answers) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ActionResult, ActionError>> + Send + 'static,
{
    async fn call(&self, answers: Answers) -> Result<ActionResult, ActionError> {
        (self.0)(answers).await
    }
}

/// Action id → callback.
#[derive(Clone, Default)]
pub struct ActionRegistry {
    actions: HashMap<String, Arc<dyn MenuAction>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: impl Into<String>, action: impl MenuAction + 'static) -> &mut Self {
        self.actions.insert(id.into(), Arc::new(action));
        self
    }

    pub fn register_fn<F, Fut>(&mut self, id: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(Answers) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ActionResult, ActionError>> + Send + 'static,
    {
        self.register(id, FnAction(f))
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn MenuAction>> {
        self.actions.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.actions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.actions.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRegistry").field("ids", &self.ids()).finish()
    }
}
