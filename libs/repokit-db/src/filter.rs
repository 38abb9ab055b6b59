//! Filter map -> `sea_orm::Condition` compiler.
//!
//! `sanitize` removes keys unknown to the entity schema (the caller is
//! expected to pass loosely-validated, user-supplied maps, e.g. bound
//! from query-string parameters). `to_condition` compiles a map into an
//! AND-of-equalities condition, coercing scalars to the column's kind.

use chrono::{NaiveDate, NaiveTime, Utc};
use repokit_query::{Scalar, ValueMap};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, Condition, EntityTrait};
use thiserror::Error;

use crate::schema::{EntitySchema, FieldKind};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterBuildError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("type mismatch for field `{field}`: expected {expected:?}, got {got}")]
    TypeMismatch {
        field: String,
        expected: FieldKind,
        got: &'static str,
    },
}

pub type FilterBuildResult<T> = Result<T, FilterBuildError>;

/// Remove every key the schema does not know about, preserving
/// recognized keys and their values unchanged.
pub fn sanitize<E: EntityTrait>(filters: &ValueMap, schema: &EntitySchema<E>) -> ValueMap {
    let mut clean = filters.clone();
    clean.retain(|key, _| {
        let known = schema.contains(key);
        if !known {
            tracing::debug!(field = key, "dropping filter key unknown to entity schema");
        }
        known
    });
    clean
}

fn mismatch(field: &str, expected: FieldKind, value: &Scalar) -> FilterBuildError {
    FilterBuildError::TypeMismatch {
        field: field.to_owned(),
        expected,
        got: value.kind_name(),
    }
}

/// Coerce a scalar to a `SeaORM` value of the given kind. String input
/// is parsed for the non-string kinds, so maps bound from query-string
/// parameters work without caller-side conversion.
pub fn coerce(field: &str, kind: FieldKind, value: &Scalar) -> FilterBuildResult<sea_orm::Value> {
    use sea_orm::Value as V;

    Ok(match (kind, value) {
        (FieldKind::String, Scalar::String(s)) => V::String(Some(Box::new(s.clone()))),

        (FieldKind::I64, Scalar::Int(i)) => V::BigInt(Some(*i)),
        (FieldKind::I64, Scalar::String(s)) => {
            let i = s
                .parse::<i64>()
                .map_err(|_| mismatch(field, kind, value))?;
            V::BigInt(Some(i))
        }

        (FieldKind::F64, Scalar::Float(f)) => V::Double(Some(*f)),
        (FieldKind::F64, Scalar::Int(i)) => {
            #[allow(clippy::cast_precision_loss)]
            V::Double(Some(*i as f64))
        }
        (FieldKind::F64, Scalar::String(s)) => {
            let f = s
                .parse::<f64>()
                .map_err(|_| mismatch(field, kind, value))?;
            V::Double(Some(f))
        }

        (FieldKind::Bool, Scalar::Bool(b)) => V::Bool(Some(*b)),
        (FieldKind::Bool, Scalar::String(s)) => {
            let b = s
                .parse::<bool>()
                .map_err(|_| mismatch(field, kind, value))?;
            V::Bool(Some(b))
        }

        (FieldKind::Uuid, Scalar::Uuid(u)) => V::Uuid(Some(Box::new(*u))),
        (FieldKind::Uuid, Scalar::String(s)) => {
            let u = s
                .parse::<uuid::Uuid>()
                .map_err(|_| mismatch(field, kind, value))?;
            V::Uuid(Some(Box::new(u)))
        }

        (FieldKind::DateTimeUtc, Scalar::DateTime(dt)) => {
            V::ChronoDateTimeUtc(Some(Box::new(*dt)))
        }
        (FieldKind::DateTimeUtc, Scalar::String(s)) => {
            let dt = chrono::DateTime::parse_from_rfc3339(s)
                .map_err(|_| mismatch(field, kind, value))?
                .with_timezone(&Utc);
            V::ChronoDateTimeUtc(Some(Box::new(dt)))
        }

        (FieldKind::Date, Scalar::String(s)) => {
            let d = s
                .parse::<NaiveDate>()
                .map_err(|_| mismatch(field, kind, value))?;
            V::ChronoDate(Some(Box::new(d)))
        }

        (FieldKind::Time, Scalar::String(s)) => {
            let t = s
                .parse::<NaiveTime>()
                .map_err(|_| mismatch(field, kind, value))?;
            V::ChronoTime(Some(Box::new(t)))
        }

        (expected, other) => return Err(mismatch(field, expected, other)),
    })
}

/// The typed NULL for a field kind, used when a payload explicitly
/// sets a column to null.
#[must_use]
pub fn null_value(kind: FieldKind) -> sea_orm::Value {
    use sea_orm::Value as V;

    match kind {
        FieldKind::String => V::String(None),
        FieldKind::I64 => V::BigInt(None),
        FieldKind::F64 => V::Double(None),
        FieldKind::Bool => V::Bool(None),
        FieldKind::Uuid => V::Uuid(None),
        FieldKind::DateTimeUtc => V::ChronoDateTimeUtc(None),
        FieldKind::Date => V::ChronoDate(None),
        FieldKind::Time => V::ChronoTime(None),
    }
}

/// Compile a filter map into an AND-of-equalities condition.
/// `Scalar::Null` compiles to `IS NULL`.
///
/// # Errors
/// Returns `FilterBuildError::UnknownField` for keys absent from the
/// schema (call `sanitize` first when the map is user-supplied), or
/// `TypeMismatch` when a value cannot be coerced to its column's kind.
pub fn to_condition<E>(
    filters: &ValueMap,
    schema: &EntitySchema<E>,
) -> FilterBuildResult<Condition>
where
    E: EntityTrait,
    E::Column: ColumnTrait + Copy,
{
    let mut cond = Condition::all();
    for (key, value) in filters.iter() {
        let f = schema
            .get(key)
            .ok_or_else(|| FilterBuildError::UnknownField(key.to_owned()))?;
        cond = match value {
            Scalar::Null => cond.add(Expr::col(f.col).is_null()),
            other => cond.add(Expr::col(f.col).eq(coerce(key, f.kind, other)?)),
        };
    }
    Ok(cond)
}
