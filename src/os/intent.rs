//! Intent model: components, filters, flags and launch directives.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;

/// Standard entry-point action
pub const ACTION_MAIN: &str = "android.intent.action.MAIN";

/// Category carried by home/launcher activities
pub const CATEGORY_HOME: &str = "android.intent.category.HOME";

/// Default category implied on implicit intents
pub const CATEGORY_DEFAULT: &str = "android.intent.category.DEFAULT";

/// A fully-qualified activity component (`package/class`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentName {
    package: String,
    class_name: String,
}

impl ComponentName {
    /// Build a component; a class starting with `.` is resolved against the package
    pub fn new(package: impl Into<String>, class_name: impl AsRef<str>) -> Self {
        let package = package.into();
        let class_name = class_name.as_ref();
        let class_name = if class_name.starts_with('.') {
            format!("{}{}", package, class_name)
        } else {
            class_name.to_string()
        };
        Self { package, class_name }
    }

    /// Parse the `pkg/cls` or `pkg/.cls` form printed by platform tools
    pub fn parse(flattened: &str) -> Option<Self> {
        let (package, class_name) = flattened.trim().split_once('/')?;
        if package.is_empty() || class_name.is_empty() || class_name.contains('/') {
            return None;
        }
        Some(Self::new(package, class_name))
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Short form, class relative to the package where possible
    pub fn flatten_to_short_string(&self) -> String {
        match self.class_name.strip_prefix(self.package.as_str()) {
            Some(rest) if rest.starts_with('.') => format!("{}/{}", self.package, rest),
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.package, self.class_name)
    }
}

/// Action + categories an activity declares it can handle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentFilter {
    pub actions: Vec<String>,
    pub categories: Vec<String>,
}

impl IntentFilter {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            actions: vec![action.into()],
            categories: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    /// The home/launcher role: action MAIN, category HOME
    pub fn home() -> Self {
        Self::new(ACTION_MAIN).with_category(CATEGORY_HOME)
    }

    /// True when this filter covers every action and category of `query`
    pub fn matches(&self, query: &IntentFilter) -> bool {
        query.actions.iter().all(|a| self.actions.contains(a))
            && query.categories.iter().all(|c| self.categories.contains(c))
    }
}

/// One entry of the preferred-activity registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferredActivity {
    pub filter: IntentFilter,
    pub component: ComponentName,
}

impl PreferredActivity {
    pub fn new(filter: IntentFilter, component: ComponentName) -> Self {
        Self { filter, component }
    }

    /// Preferred home binding for `component`
    pub fn home(component: ComponentName) -> Self {
        Self::new(IntentFilter::home(), component)
    }
}

/// Launch flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IntentFlags(u32);

impl IntentFlags {
    pub const NONE: IntentFlags = IntentFlags(0);
    /// Start the activity in a new task
    pub const NEW_TASK: IntentFlags = IntentFlags(0x1000_0000);
    /// Clear the existing task before the activity starts
    pub const CLEAR_TASK: IntentFlags = IntentFlags(0x0000_8000);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: IntentFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for IntentFlags {
    type Output = IntentFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        IntentFlags(self.0 | rhs.0)
    }
}

impl fmt::LowerHex for IntentFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

/// A launch directive handed to the activity launcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub action: Option<String>,
    pub categories: Vec<String>,
    pub component: Option<ComponentName>,
    pub flags: IntentFlags,
}

impl Intent {
    /// Explicit intent for `component`
    pub fn for_component(component: ComponentName) -> Self {
        Self {
            action: None,
            categories: Vec::new(),
            component: Some(component),
            flags: IntentFlags::NONE,
        }
    }

    /// Restart directive: re-enter `component` in a fresh task, dropping the old stack
    pub fn restart(component: ComponentName) -> Self {
        Self::for_component(component)
            .with_action(ACTION_MAIN)
            .with_flags(IntentFlags::NEW_TASK | IntentFlags::CLEAR_TASK)
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    pub fn with_flags(mut self, flags: IntentFlags) -> Self {
        self.flags = self.flags | flags;
        self
    }
}
