//! Default member comparator and the fallible sort

use crate::error::{Error, Result};
use crate::types::{QueryParams, ORDERBY_PARAM, ORDER_PARAM};
use serde_json::Value;
use std::cmp::Ordering;

/// Boxed member comparator
pub type Comparator = Box<dyn Fn(&Value, &Value) -> Result<Ordering> + Send + Sync>;

/// Sort direction, from the `order` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    /// Ascending (the default for any value other than `desc`)
    #[default]
    Asc,
    /// Descending
    Desc,
}

impl Order {
    /// Derive the direction from the raw `order` parameter value
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }
}

/// Active ordering: which attribute to sort by, and in which direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Attribute name the members are ordered by
    pub orderby: String,
    /// Sort direction
    pub order: Order,
}

impl SortSpec {
    /// Read the active ordering out of query parameters
    ///
    /// `None` when no `orderby` key is present.
    pub fn from_query(query: &QueryParams) -> Option<Self> {
        let orderby = query.get(ORDERBY_PARAM)?.clone();
        let order = Order::from_param(query.get(ORDER_PARAM).map(String::as_str));
        Some(Self { orderby, order })
    }

    /// Compare two members by the `orderby` attribute's natural ordering
    ///
    /// Errors when either member lacks the attribute or the values have no
    /// primitive total ordering.
    pub fn compare(&self, a: &Value, b: &Value) -> Result<Ordering> {
        let key_a = attribute(a, &self.orderby)?;
        let key_b = attribute(b, &self.orderby)?;
        let ordering = compare_values(key_a, key_b)?;
        Ok(match self.order {
            Order::Asc => ordering,
            Order::Desc => ordering.reverse(),
        })
    }
}

fn attribute<'a>(member: &'a Value, name: &str) -> Result<&'a Value> {
    member
        .get(name)
        .ok_or_else(|| Error::sort(format!("member has no '{name}' attribute")))
}

/// Natural ordering over primitive JSON values
///
/// Numbers compare as f64, strings and booleans by their own ordering.
/// Mixed kinds, nulls, arrays and objects have no natural ordering.
fn compare_values(a: &Value, b: &Value) -> Result<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y)
                .ok_or_else(|| Error::sort("numeric attribute is not comparable"))
        }
        (Value::String(x), Value::String(y)) => Ok(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Ok(x.cmp(y)),
        _ => Err(Error::sort(format!(
            "no natural ordering between {} and {} attributes",
            value_kind(a),
            value_kind(b)
        ))),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Sort members in place with a fallible comparator
///
/// Every adjacent pair is compared first, so a comparator error surfaces
/// before any member moves; on error the original order is preserved.
pub fn sort_members(
    members: &mut [Value],
    compare: &(dyn Fn(&Value, &Value) -> Result<Ordering> + Send + Sync),
) -> Result<()> {
    if members.len() < 2 {
        return Ok(());
    }

    // Validation pass: each member participates in at least one comparison.
    for pair in members.windows(2) {
        compare(&pair[0], &pair[1])?;
    }

    let mut first_error = None;
    members.sort_by(|a, b| match compare(a, b) {
        Ok(ordering) => ordering,
        Err(error) => {
            if first_error.is_none() {
                first_error = Some(error);
            }
            Ordering::Equal
        }
    });

    match first_error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
