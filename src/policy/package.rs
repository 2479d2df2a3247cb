//! Request-side inputs to authorization decisions

use crate::policy::matching::SCOPE_MARKER;

/// Package as declared in the registry configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageDescriptor {
    /// Package name, possibly scoped (`@org/team/pkg`)
    pub name: String,

    /// Access rules declared for the package
    pub access: Vec<String>,

    /// Whether this package is under GitLab's authority
    pub gitlab: bool,
}

impl PackageDescriptor {
    /// A GitLab-managed package with no explicit access rules
    pub fn gitlab(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            access: Vec::new(),
            gitlab: true,
        }
    }

    /// Replace the access rules
    pub fn with_access<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.access = rules.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the name starts with the `@` scope marker
    pub fn is_scoped(&self) -> bool {
        self.name.starts_with(SCOPE_MARKER)
    }
}

/// Caller as resolved by the registry's request pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerIdentity {
    /// Authenticated user name, `None` for anonymous requests
    pub name: Option<String>,

    /// Groups returned by a previous `authenticate` call
    pub real_groups: Vec<String>,
}

impl CallerIdentity {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated<I, S>(name: impl Into<String>, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: Some(name.into()),
            real_groups: groups.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.name.is_some()
    }

    /// Name for log lines, empty when anonymous
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}
