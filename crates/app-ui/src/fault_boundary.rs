//! Fault boundary for UI subtrees
//!
//! A boundary wraps one subtree. While [`BoundaryState::Normal`] it renders
//! the subtree; the first render fault moves it to
//! [`BoundaryState::Faulted`], where it renders a [`FallbackView`] until the
//! user reloads or navigates away.
//!
//! # Example
//!
//! ```rust
//! use app_ui::fault_boundary::{BuildMode, FaultBoundary, RecoveryAction, Rendered};
//!
//! let mut boundary = FaultBoundary::new(BuildMode::Production);
//!
//! let view = boundary.render(|| Err::<(), _>("feed item missing"));
//! assert!(matches!(view, Rendered::Fallback(_)));
//!
//! boundary.handle(RecoveryAction::Reload);
//! assert!(!boundary.is_faulted());
//! ```

use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::str::FromStr;

/// Route the "go home" action navigates to
pub const HOME_ROUTE: &str = "/";

/// Build flavor; controls whether raw fault details are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BuildMode {
    /// Local development build
    Development,
    /// Release build
    #[default]
    Production,
}

impl BuildMode {
    /// Whether fault messages may be shown to the user
    pub fn shows_fault_detail(&self) -> bool {
        matches!(self, BuildMode::Development)
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildMode::Development => f.write_str("development"),
            BuildMode::Production => f.write_str("production"),
        }
    }
}

impl FromStr for BuildMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(BuildMode::Development),
            "production" | "prod" => Ok(BuildMode::Production),
            _ => Err(format!("Unknown build mode: {}", s)),
        }
    }
}

/// A fault raised while rendering a subtree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    message: String,
    component: Option<String>,
}

impl Fault {
    /// Fault with a message
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), component: None }
    }

    /// Fault built from any displayable error
    pub fn from_error(error: impl fmt::Display) -> Self {
        Self::new(error.to_string())
    }

    /// Fault built from a panic payload
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "render panicked".to_string()
        };
        Self::new(message)
    }

    /// Attach the name of the component that raised the fault
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Raw fault message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Component that raised the fault, if known
    pub fn component(&self) -> Option<&str> {
        self.component.as_deref()
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.component {
            Some(component) => write!(f, "{}: {}", component, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Boundary state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BoundaryState {
    /// Rendering the wrapped subtree
    #[default]
    Normal,
    /// Rendering the fallback for the recorded fault
    Faulted(Fault),
}

/// Actions offered by the fallback view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecoveryAction {
    /// Reload the current view from scratch
    Reload,
    /// Navigate to the home route
    GoHome,
}

impl RecoveryAction {
    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            RecoveryAction::Reload => "Try Again",
            RecoveryAction::GoHome => "Go Home",
        }
    }
}

/// What the host must do after a recovery action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// The boundary was reset; render the subtree again
    Reloaded,
    /// Navigate to the given route
    Navigate(&'static str),
}

/// Content of the fallback screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackView {
    /// Heading
    pub title: &'static str,
    /// Explanation shown to every user
    pub message: &'static str,
    /// Raw fault message, development builds only
    pub detail: Option<String>,
    /// Available recovery actions
    pub actions: [RecoveryAction; 2],
}

impl FallbackView {
    /// Fallback for a fault under the given build mode
    pub fn for_fault(fault: &Fault, build_mode: BuildMode) -> Self {
        Self {
            title: "Oops! Something Went Wrong",
            message: "We're sorry, but the application encountered an unexpected error. \
                      Please try again.",
            detail: build_mode.shows_fault_detail().then(|| fault.message().to_string()),
            actions: [RecoveryAction::Reload, RecoveryAction::GoHome],
        }
    }
}

/// Result of rendering through a boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered<V> {
    /// The subtree rendered normally
    Children(V),
    /// The boundary is faulted
    Fallback(FallbackView),
}

/// Two-state fault boundary
#[derive(Debug, Clone)]
pub struct FaultBoundary {
    name: String,
    build_mode: BuildMode,
    state: BoundaryState,
}

impl FaultBoundary {
    /// Boundary around the application root
    pub fn new(build_mode: BuildMode) -> Self {
        Self::named("root", build_mode)
    }

    /// Boundary with a name used in logs
    pub fn named(name: impl Into<String>, build_mode: BuildMode) -> Self {
        Self { name: name.into(), build_mode, state: BoundaryState::Normal }
    }

    /// Current state
    pub fn state(&self) -> &BoundaryState {
        &self.state
    }

    /// Whether a fault is recorded
    pub fn is_faulted(&self) -> bool {
        matches!(self.state, BoundaryState::Faulted(_))
    }

    /// Recorded fault, if any
    pub fn fault(&self) -> Option<&Fault> {
        match &self.state {
            BoundaryState::Faulted(fault) => Some(fault),
            BoundaryState::Normal => None,
        }
    }

    /// Record a fault raised by the subtree
    ///
    /// Only the first fault is kept until the boundary is reset.
    pub fn on_fault(&mut self, fault: Fault) {
        tracing::error!(boundary = %self.name, fault = %fault, "Uncaught render fault");
        if let BoundaryState::Normal = self.state {
            self.state = BoundaryState::Faulted(fault);
        }
    }

    /// Render the subtree, or the fallback while faulted
    ///
    /// An `Err` or a panic from `children` is recorded as the fault.
    pub fn render<V, E, F>(&mut self, children: F) -> Rendered<V>
    where
        F: FnOnce() -> Result<V, E>,
        E: fmt::Display,
    {
        if let Some(view) = self.fallback() {
            return Rendered::Fallback(view);
        }

        let fault = match catch_unwind(AssertUnwindSafe(children)) {
            Ok(Ok(view)) => return Rendered::Children(view),
            Ok(Err(e)) => Fault::from_error(e),
            Err(payload) => Fault::from_panic(payload),
        };
        let view = FallbackView::for_fault(&fault, self.build_mode);
        self.on_fault(fault);
        Rendered::Fallback(view)
    }

    /// Fallback view while faulted
    pub fn fallback(&self) -> Option<FallbackView> {
        self.fault().map(|fault| FallbackView::for_fault(fault, self.build_mode))
    }

    /// Run a recovery action from the fallback view
    pub fn handle(&mut self, action: RecoveryAction) -> Recovery {
        tracing::info!(boundary = %self.name, action = action.label(), "Recovering from fault");
        self.state = BoundaryState::Normal;
        match action {
            RecoveryAction::Reload => Recovery::Reloaded,
            RecoveryAction::GoHome => Recovery::Navigate(HOME_ROUTE),
        }
    }
}
