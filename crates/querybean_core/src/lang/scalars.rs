//! Scalar host type vocabulary.
//!
//! This registry maps the qualified name of a scalar host type (primitive, wrapper, date/time or common value
//! type) to the query property token used to expose it on a generated query bean.
//!
//! ## Notes
//! - Lookup via [`lookup`] is **case-sensitive** and expects an erased qualified name (no generic arguments).
//! - Several host names can map to one token (`long` and `java.lang.Long` both yield `PLong`).
//!
//! ## Examples
//! ```rust
//! use querybean_core::lang::scalars::{self, ScalarKind};
//!
//! assert_eq!(scalars::lookup("int"), Some(ScalarKind::Integer));
//! assert_eq!(scalars::lookup("java.time.LocalDate"), Some(ScalarKind::LocalDate));
//! assert_eq!(scalars::lookup("org.example.Customer"), None);
//! assert_eq!(scalars::token(ScalarKind::String), "PString");
//! ```

/// Stable identifier for a scalar query property kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScalarKind {
    Boolean,
    Short,
    Integer,
    Long,
    Float,
    Double,
    BigDecimal,
    BigInteger,
    String,
    Bytes,
    Uuid,
    UtilDate,
    SqlDate,
    SqlTime,
    Timestamp,
    Calendar,
    LocalDate,
    LocalDateTime,
    LocalTime,
    OffsetDateTime,
    ZonedDateTime,
    Instant,
    Year,
    YearMonth,
    MonthDay,
    ZoneId,
    ZoneOffset,
    TimeZone,
    Locale,
    Currency,
    InetAddress,
    Url,
    Uri,
    File,
    Class,
}

/// Metadata for one scalar query property kind.
#[derive(Debug, Clone, Copy)]
pub struct ScalarTypeInfo {
    pub id: ScalarKind,
    /// Query property type name (e.g. `PLong`), resolved against the framework package.
    pub token: &'static str,
    /// Host qualified names that resolve to this kind.
    pub host_names: &'static [&'static str],
}

/// Registry of scalar query property kinds.
pub const SCALAR_TYPES: &[ScalarTypeInfo] = &[
    info(ScalarKind::Boolean, "PBoolean", &["boolean", "java.lang.Boolean"]),
    info(ScalarKind::Short, "PShort", &["short", "java.lang.Short"]),
    info(ScalarKind::Integer, "PInteger", &["int", "java.lang.Integer"]),
    info(ScalarKind::Long, "PLong", &["long", "java.lang.Long"]),
    info(ScalarKind::Float, "PFloat", &["float", "java.lang.Float"]),
    info(ScalarKind::Double, "PDouble", &["double", "java.lang.Double"]),
    info(ScalarKind::BigDecimal, "PBigDecimal", &["java.math.BigDecimal"]),
    info(ScalarKind::BigInteger, "PBigInteger", &["java.math.BigInteger"]),
    info(
        ScalarKind::String,
        "PString",
        &["java.lang.String", "char", "java.lang.Character"],
    ),
    info(ScalarKind::Bytes, "PBytes", &["byte[]"]),
    info(ScalarKind::Uuid, "PUuid", &["java.util.UUID"]),
    info(ScalarKind::UtilDate, "PUtilDate", &["java.util.Date"]),
    info(ScalarKind::SqlDate, "PSqlDate", &["java.sql.Date"]),
    info(ScalarKind::SqlTime, "PTime", &["java.sql.Time"]),
    info(ScalarKind::Timestamp, "PTimestamp", &["java.sql.Timestamp"]),
    info(ScalarKind::Calendar, "PCalendar", &["java.util.Calendar"]),
    info(ScalarKind::LocalDate, "PLocalDate", &["java.time.LocalDate"]),
    info(ScalarKind::LocalDateTime, "PLocalDateTime", &["java.time.LocalDateTime"]),
    info(ScalarKind::LocalTime, "PLocalTime", &["java.time.LocalTime"]),
    info(ScalarKind::OffsetDateTime, "POffsetDateTime", &["java.time.OffsetDateTime"]),
    info(ScalarKind::ZonedDateTime, "PZonedDateTime", &["java.time.ZonedDateTime"]),
    info(ScalarKind::Instant, "PInstant", &["java.time.Instant"]),
    info(ScalarKind::Year, "PYear", &["java.time.Year"]),
    info(ScalarKind::YearMonth, "PYearMonth", &["java.time.YearMonth"]),
    info(ScalarKind::MonthDay, "PMonthDay", &["java.time.MonthDay"]),
    info(ScalarKind::ZoneId, "PZoneId", &["java.time.ZoneId"]),
    info(ScalarKind::ZoneOffset, "PZoneOffset", &["java.time.ZoneOffset"]),
    info(ScalarKind::TimeZone, "PTimeZone", &["java.util.TimeZone"]),
    info(ScalarKind::Locale, "PLocale", &["java.util.Locale"]),
    info(ScalarKind::Currency, "PCurrency", &["java.util.Currency"]),
    info(ScalarKind::InetAddress, "PInetAddress", &["java.net.InetAddress"]),
    info(ScalarKind::Url, "PUrl", &["java.net.URL"]),
    info(ScalarKind::Uri, "PUri", &["java.net.URI"]),
    info(ScalarKind::File, "PFile", &["java.io.File"]),
    info(ScalarKind::Class, "PClass", &["java.lang.Class"]),
];

/// Resolve a host type name to a [`ScalarKind`].
///
/// ## Parameters
/// - `qualified_name`: Erased qualified type name (`java.lang.Long`) or primitive spelling (`long`).
///
/// ## Returns
/// - `Some(ScalarKind)` if the name is registered.
/// - `None` otherwise; callers fall back to structural classification.
pub fn lookup(qualified_name: &str) -> Option<ScalarKind> {
    SCALAR_TYPES
        .iter()
        .find(|t| t.host_names.contains(&qualified_name))
        .map(|t| t.id)
}

/// Return the query property token for a scalar kind (e.g. `"PLong"`).
pub fn token(id: ScalarKind) -> &'static str {
    info_for(id).token
}

/// Return the full metadata entry for a scalar kind.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: ScalarKind) -> &'static ScalarTypeInfo {
    SCALAR_TYPES
        .iter()
        .find(|t| t.id == id)
        .expect("scalar type info missing")
}

const fn info(id: ScalarKind, token: &'static str, host_names: &'static [&'static str]) -> ScalarTypeInfo {
    ScalarTypeInfo {
        id,
        token,
        host_names,
    }
}
