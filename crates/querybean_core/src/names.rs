//! Qualified-name helpers.
//!
//! Entity identities arrive as dotted qualified names (`org.example.domain.Customer`). Everything the generator
//! derives from them (destination packages, bean type names, import lines) goes through this module so that the
//! root bean, the association bean and the manifest agree on spelling.

use std::fmt;

use crate::lang::framework::{ASSOC_BEAN_PREFIX, ASSOC_PACKAGE_SUFFIX, QUERY_PACKAGE_SUFFIX, ROOT_BEAN_PREFIX};

/// A dotted qualified type name split into package and short name.
///
/// ## Examples
/// ```rust
/// use querybean_core::QualifiedName;
///
/// let name = QualifiedName::parse("org.example.domain.Customer");
/// assert_eq!(name.package(), "org.example.domain");
/// assert_eq!(name.short_name(), "Customer");
/// assert_eq!(name.query_package(), "org.example.domain.query");
/// assert_eq!(name.assoc_bean_name(), "QAssocCustomer");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    full: String,
    split: Option<usize>,
}

impl QualifiedName {
    /// Split a qualified name at its last `.`; a name without a package has an empty package.
    pub fn parse(full: &str) -> Self {
        let split = full.rfind('.');
        Self {
            full: full.to_string(),
            split,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.full
    }

    /// Package part (empty for the default package).
    pub fn package(&self) -> &str {
        self.split.map_or("", |pos| &self.full[..pos])
    }

    pub fn short_name(&self) -> &str {
        self.split.map_or(self.full.as_str(), |pos| &self.full[pos + 1..])
    }

    /// Destination package of the root query bean: `<package>.query`.
    pub fn query_package(&self) -> String {
        package_append(self.package(), QUERY_PACKAGE_SUFFIX)
    }

    /// Destination package of the association query bean: `<package>.query.assoc`.
    pub fn assoc_package(&self) -> String {
        package_append(self.package(), ASSOC_PACKAGE_SUFFIX)
    }

    /// `Q<ShortName>`
    pub fn root_bean_name(&self) -> String {
        format!("{ROOT_BEAN_PREFIX}{}", self.short_name())
    }

    /// `QAssoc<ShortName>`
    pub fn assoc_bean_name(&self) -> String {
        format!("{ASSOC_BEAN_PREFIX}{}", self.short_name())
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

/// Append a sub-package, treating the empty (default) package as having no prefix.
///
/// ## Examples
/// ```rust
/// use querybean_core::names::package_append;
///
/// assert_eq!(package_append("org.example", "query"), "org.example.query");
/// assert_eq!(package_append("", "query"), "query");
/// ```
pub fn package_append(package: &str, suffix: &str) -> String {
    if package.is_empty() {
        suffix.to_string()
    } else {
        format!("{package}.{suffix}")
    }
}

/// Return the package of a qualified name (everything before the last `.`).
pub fn package_of(qualified: &str) -> &str {
    qualified.rfind('.').map_or("", |pos| &qualified[..pos])
}

/// Return the short name of a qualified name (everything after the last `.`).
pub fn short_name_of(qualified: &str) -> &str {
    qualified.rfind('.').map_or(qualified, |pos| &qualified[pos + 1..])
}

/// Longest package prefix (whole segments only) shared by every package in `packages`.
///
/// ## Returns
/// - `None` if `packages` is empty or the packages share no leading segment.
///
/// ## Examples
/// ```rust
/// use querybean_core::names::common_package;
///
/// let pkgs = ["org.example.domain", "org.example.audit"];
/// assert_eq!(common_package(pkgs.iter().copied()), Some("org.example".to_string()));
/// assert_eq!(common_package(["a.b", "c.d"].iter().copied()), None);
/// ```
pub fn common_package<'a>(packages: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let mut common: Option<Vec<&str>> = None;
    for package in packages {
        let segments: Vec<&str> = package.split('.').filter(|s| !s.is_empty()).collect();
        common = Some(match common {
            None => segments,
            Some(prev) => prev
                .iter()
                .zip(segments.iter())
                .take_while(|(a, b)| a == b)
                .map(|(a, _)| *a)
                .collect(),
        });
    }
    common.filter(|segments| !segments.is_empty()).map(|segments| segments.join("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_package_name() {
        let name = QualifiedName::parse("Customer");
        assert_eq!(name.package(), "");
        assert_eq!(name.short_name(), "Customer");
        assert_eq!(name.query_package(), "query");
        assert_eq!(name.assoc_package(), "query.assoc");
    }

    #[test]
    fn derived_names() {
        let name = QualifiedName::parse("org.example.Contact");
        assert_eq!(name.root_bean_name(), "QContact");
        assert_eq!(name.assoc_package(), "org.example.query.assoc");
        assert_eq!(name.to_string(), "org.example.Contact");
    }

    #[test]
    fn package_and_short_name_of() {
        assert_eq!(package_of("java.lang.String"), "java.lang");
        assert_eq!(short_name_of("java.lang.String"), "String");
        assert_eq!(package_of("int"), "");
        assert_eq!(short_name_of("int"), "int");
    }

    #[test]
    fn common_package_of_single_entry_is_itself() {
        assert_eq!(common_package(["org.example.domain"]), Some("org.example.domain".to_string()));
        assert_eq!(common_package(std::iter::empty::<&str>()), None);
    }
}
