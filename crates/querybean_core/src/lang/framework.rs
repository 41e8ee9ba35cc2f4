//! Framework vocabulary referenced by generated query beans.
//!
//! These are the qualified names the emitted sources import, extend or annotate with. Keeping them in one table
//! means the emitter never spells a framework type inline.

/// Package holding the query property types (`PLong`, `PEnum`, …) and bean base types.
pub const TYPEQUERY_PACKAGE: &str = "io.ebean.typequery";

pub const TQ_ROOT_BEAN: &str = "io.ebean.typequery.TQRootBean";
pub const TQ_ASSOC_BEAN: &str = "io.ebean.typequery.TQAssocBean";
pub const TQ_PROPERTY: &str = "io.ebean.typequery.TQProperty";
pub const TQ_PATH: &str = "io.ebean.typequery.TQPath";
pub const TYPE_QUERY_BEAN: &str = "io.ebean.typequery.TypeQueryBean";
pub const DATABASE: &str = "io.ebean.Database";
pub const DB: &str = "io.ebean.DB";

/// Generated-marker annotation type and the value the generator stamps into it.
pub const GENERATED: &str = "javax.annotation.Generated";
pub const GENERATOR_ID: &str = "io.ebean.querybean.generator";

pub const MODULE_INFO: &str = "io.ebean.config.ModuleInfo";
pub const MODULE_INFO_LOADER: &str = "io.ebean.config.ModuleInfoLoader";
/// Simple name of the generated module-info loader type.
pub const MODULE_INFO_LOADER_NAME: &str = "_ebean$ModuleInfo";

/// Property token for enum-typed fields (`PEnum<Owner,Enum>`).
pub const P_ENUM: &str = "PEnum";
/// Property token for JSON-mapped fields.
pub const P_JSON: &str = "PJson";
/// Property token for array-mapped fields (`PArray<Owner,Element>`).
pub const P_ARRAY: &str = "PArray";

/// Prefix of the root query bean type name (`QCustomer`).
pub const ROOT_BEAN_PREFIX: &str = "Q";
/// Prefix of the association query bean type name (`QAssocCustomer`).
pub const ASSOC_BEAN_PREFIX: &str = "QAssoc";
/// Sub-package (relative to the entity package) receiving root query beans.
pub const QUERY_PACKAGE_SUFFIX: &str = "query";
/// Sub-package (relative to the entity package) receiving association query beans.
pub const ASSOC_PACKAGE_SUFFIX: &str = "query.assoc";

/// Field-name prefix reserved for fields injected by bytecode enhancement.
pub const INTERNAL_FIELD_PREFIX: &str = "_ebean";

/// Return the qualified name of a property token inside the framework package.
///
/// ## Examples
/// ```rust
/// use querybean_core::lang::framework;
///
/// assert_eq!(framework::property_type("PLong"), "io.ebean.typequery.PLong");
/// ```
pub fn property_type(token: &str) -> String {
    format!("{TYPEQUERY_PACKAGE}.{token}")
}

/// Return true if a field name carries the reserved internal prefix (`_ebean…`, `_EBEAN…`, any case).
pub fn is_internal_field(name: &str) -> bool {
    name.get(..INTERNAL_FIELD_PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(INTERNAL_FIELD_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_prefix_is_case_insensitive() {
        assert!(is_internal_field("_ebean_intercept"));
        assert!(is_internal_field("_EBEAN_MARKER"));
        assert!(is_internal_field("_Ebean_props"));
        assert!(!is_internal_field("ebean"));
        assert!(!is_internal_field("_ebe"));
        assert!(!is_internal_field("_id"));
    }
}
