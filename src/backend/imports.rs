//! Import collection for generated sources.

use std::collections::BTreeSet;

use querybean_core::lang::framework;
use querybean_core::names::package_of;

use crate::frontend::PropertyKind;

/// Sorted, de-duplicated set of qualified type names to import.
#[derive(Debug, Clone, Default)]
pub struct ImportSet {
    types: BTreeSet<String>,
}

impl ImportSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, qualified: impl Into<String>) {
        self.types.insert(qualified.into());
    }

    /// Add what a property's type needs.
    pub fn add_property(&mut self, kind: &PropertyKind) {
        match kind {
            PropertyKind::Scalar { .. } | PropertyKind::Json => {
                self.add(framework::property_type(kind.token()));
            }
            PropertyKind::Enum { qualified_type, .. } => {
                self.add(framework::property_type(kind.token()));
                self.add(qualified_type.as_str());
            }
            PropertyKind::Array { element_type, .. } => {
                self.add(framework::property_type(kind.token()));
                if element_type.contains('.') {
                    self.add(element_type.as_str());
                }
            }
            PropertyKind::Association {
                bean_name,
                bean_package,
            } => {
                self.add(querybean_core::names::package_append(bean_package, bean_name));
            }
        }
    }

    /// Imports in emission order, minus types living in `package` itself.
    ///
    /// Only an exact package match is dropped: `a.query.assoc.X` is still imported into `a.query`. Types in the
    /// default package cannot be imported and are skipped too.
    pub fn for_package<'a>(&'a self, package: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.types.iter().map(String::as_str).filter(move |ty| {
            let own = package_of(ty);
            !own.is_empty() && own != package
        })
    }

    pub fn contains(&self, qualified: &str) -> bool {
        self.types.contains(qualified)
    }
}
