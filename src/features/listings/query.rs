use sqlx::{QueryBuilder, Sqlite};

use crate::utilities::errors::AppError;

/// Columns a caller may filter on, checked before any store access.
pub const FILTERABLE_COLUMNS: &[&str] = &[
    "title",
    "location",
    "street",
    "price",
    "area",
    "property_type",
    "transaction_type",
    "description",
    "floor",
    "num_of_floors",
    "build_year",
    "status",
];

/// Columns a caller may sort on.
pub const SORTABLE_COLUMNS: &[&str] = &[
    "title",
    "location",
    "street",
    "price",
    "area",
    "property_type",
    "transaction_type",
    "floor",
    "num_of_floors",
    "build_year",
    "status",
    "created_at",
];

const SELECT_LISTINGS: &str = "SELECT id, client_id, title, location, street, price, area, \
     property_type, transaction_type, description, floor, num_of_floors, \
     build_year, status, created_at FROM listings";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FilterOperator {
    Gt,
    Gte,
    Lt,
    Lte,
    Eq,
    Ne,
    Like,
}

impl FilterOperator {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw {
            "gt" => Ok(Self::Gt),
            "gte" => Ok(Self::Gte),
            "lt" => Ok(Self::Lt),
            "lte" => Ok(Self::Lte),
            "eq" => Ok(Self::Eq),
            "ne" => Ok(Self::Ne),
            "like" => Ok(Self::Like),
            _ => Err(AppError::UnknownOperatorError(raw.to_string())),
        }
    }

    pub fn sql(&self) -> &'static str {
        match self {
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Like => "LIKE",
        }
    }
}

/// Filter values are coerced by a simple heuristic: a digits-only string
/// becomes an integer, anything else stays text. Known limitation: this
/// cannot express negative numbers or floats, and it misclassifies
/// numeric-looking text fields.
#[derive(Clone, PartialEq, Debug)]
pub enum FilterValue {
    Integer(i64),
    Text(String),
}

impl FilterValue {
    pub fn coerce(raw: &str) -> Self {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(number) = raw.parse::<i64>() {
                return Self::Integer(number);
            }
        }
        Self::Text(raw.to_string())
    }

    fn as_like_pattern(&self) -> String {
        match self {
            Self::Integer(number) => format!("%{number}%"),
            Self::Text(text) => format!("%{text}%"),
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct FilterSpec {
    pub field: String,
    pub operator: FilterOperator,
    pub value: FilterValue,
}

impl FilterSpec {
    /// Parses a raw `<field>_<operator>=<value>` expression. The field and
    /// operator split on the last underscore so multi-word columns like
    /// `property_type` keep working.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let (field_operator, value) = raw
            .split_once('=')
            .ok_or_else(|| AppError::MalformedFilterError(raw.to_string()))?;

        let (field, operator) = field_operator
            .rsplit_once('_')
            .ok_or_else(|| AppError::MalformedFilterError(field_operator.to_string()))?;

        let operator = FilterOperator::parse(operator)?;

        Ok(FilterSpec {
            field: field.to_string(),
            operator,
            value: FilterValue::coerce(value),
        })
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct SortSpec {
    pub column: Option<String>,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Direction parsing is case-insensitive and falls back to ascending on
    /// anything unrecognized; an absent column means no ORDER BY at all.
    pub fn new(column: Option<String>, order: Option<String>) -> Self {
        let direction = match order.as_deref() {
            Some(order) if order.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        SortSpec { column, direction }
    }
}

fn resolve_column(allowed: &'static [&'static str], name: &str) -> Result<&'static str, AppError> {
    allowed
        .iter()
        .find(|column| **column == name)
        .copied()
        .ok_or_else(|| AppError::UnknownColumnError(name.to_string()))
}

/// Composes the listings SELECT from a sort spec and an optional filter.
/// Pure query construction: nothing here touches the store, and only
/// allow-listed column names ever reach the SQL text — values are always
/// bound parameters.
pub fn build_listing_query(
    sort: &SortSpec,
    filter: Option<&FilterSpec>,
) -> Result<QueryBuilder<'static, Sqlite>, AppError> {
    let mut query = QueryBuilder::new(SELECT_LISTINGS);

    if let Some(filter) = filter {
        let column = resolve_column(FILTERABLE_COLUMNS, &filter.field)?;

        query.push(" WHERE ");
        query.push(column);
        query.push(" ");
        query.push(filter.operator.sql());
        query.push(" ");

        if filter.operator == FilterOperator::Like {
            query.push_bind(filter.value.as_like_pattern());
        } else {
            match &filter.value {
                FilterValue::Integer(number) => query.push_bind(*number),
                FilterValue::Text(text) => query.push_bind(text.clone()),
            };
        }
    }

    if let Some(sort_column) = &sort.column {
        let column = resolve_column(SORTABLE_COLUMNS, sort_column)?;
        query.push(" ORDER BY ");
        query.push(column);
        query.push(" ");
        query.push(sort.direction.sql());
    }

    Ok(query)
}
