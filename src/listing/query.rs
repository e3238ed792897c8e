use super::error::ListingError;
use super::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    /// Case-insensitive parse, defaulting to ascending when absent.
    /// Anything other than asc/desc is rejected rather than coerced.
    pub fn parse(input: Option<&str>) -> Result<Self, ListingError> {
        match input.map(str::trim) {
            None | Some("") => Ok(SortDirection::Asc),
            Some(s) if s.eq_ignore_ascii_case("asc") => Ok(SortDirection::Asc),
            Some(s) if s.eq_ignore_ascii_case("desc") => Ok(SortDirection::Desc),
            Some(other) => Err(ListingError::InvalidSortOrder(other.to_string())),
        }
    }
}

/// Builds the dynamic part of a listing query: a parameterized WHERE
/// fragment plus an ORDER BY clause assembled only from allowlisted tokens.
///
/// Caller-supplied values go into `params` and are referenced by placeholder;
/// they never appear in the clause text. Column and direction tokens are
/// pulled from the surface's fixed allowlists. `starting_param_index` lets a
/// surface with leading bound params (e.g. an owner or user id at `$1`)
/// compose with the generated placeholders.
#[derive(Debug)]
pub struct ListingQuery {
    surface: &'static Surface,
    prefix: &'static str,
    next_param: usize,
    conditions: Vec<String>,
    params: Vec<String>,
    sort_column: &'static str,
    direction: SortDirection,
}

impl ListingQuery {
    pub fn new(
        surface: &'static Surface,
        prefix: &'static str,
        starting_param_index: usize,
    ) -> Self {
        Self {
            surface,
            prefix,
            next_param: starting_param_index,
            conditions: vec![],
            params: vec![],
            // default sort: name ascending
            sort_column: "name",
            direction: SortDirection::Asc,
        }
    }

    /// Case-insensitive substring predicate. Absent or blank values
    /// contribute nothing.
    pub fn contains(mut self, field: &'static str, value: Option<&str>) -> Result<Self, ListingError> {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return Ok(self);
        };
        self.ensure_filterable(field)?;
        self.conditions
            .push(format!("{}{} ILIKE ${}", self.prefix, field, self.next_param));
        self.params.push(format!("%{}%", value));
        self.next_param += 1;
        Ok(self)
    }

    /// Exact-match predicate, used for closed-set fields like role
    pub fn equals(mut self, field: &'static str, value: Option<&str>) -> Result<Self, ListingError> {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return Ok(self);
        };
        self.ensure_filterable(field)?;
        self.conditions
            .push(format!("{}{} = ${}", self.prefix, field, self.next_param));
        self.params.push(value.to_string());
        self.next_param += 1;
        Ok(self)
    }

    /// Validate and apply the sort specification. An unlisted column is an
    /// error, never interpolated.
    pub fn order(mut self, sort_by: Option<&str>, order: Option<&str>) -> Result<Self, ListingError> {
        if let Some(requested) = sort_by.map(str::trim).filter(|s| !s.is_empty()) {
            let column = self
                .surface
                .sortable
                .iter()
                .copied()
                .find(|c| *c == requested)
                .ok_or_else(|| ListingError::InvalidSortField(requested.to_string()))?;
            self.sort_column = column;
        }
        self.direction = SortDirection::parse(order)?;
        Ok(self)
    }

    /// WHERE fragment without the leading keyword; `1=1` when no filters
    /// are present so callers can always prepend fixed conditions with AND.
    pub fn where_sql(&self) -> String {
        if self.conditions.is_empty() {
            "1=1".to_string()
        } else {
            self.conditions.join(" AND ")
        }
    }

    pub fn order_sql(&self) -> String {
        format!(
            "ORDER BY {}{} {}",
            self.prefix,
            self.sort_column,
            self.direction.to_sql()
        )
    }

    /// Bind values, in placeholder order
    pub fn params(&self) -> &[String] {
        &self.params
    }

    fn ensure_filterable(&self, field: &'static str) -> Result<(), ListingError> {
        if self.surface.filterable.contains(&field) {
            Ok(())
        } else {
            Err(ListingError::UnknownFilterField(field.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::surface::{ADMIN_STORES, ADMIN_USERS, USER_STORES};

    #[test]
    fn no_filters_yields_trivial_predicate_and_default_sort() {
        let q = ListingQuery::new(&ADMIN_USERS, "", 1);
        assert_eq!(q.where_sql(), "1=1");
        assert_eq!(q.order_sql(), "ORDER BY name ASC");
        assert!(q.params().is_empty());
    }

    #[test]
    fn substring_filters_are_parameterized_and_anded() {
        let q = ListingQuery::new(&ADMIN_USERS, "", 1)
            .contains("name", Some("mart"))
            .unwrap()
            .contains("email", Some("example.com"))
            .unwrap();

        assert_eq!(q.where_sql(), "name ILIKE $1 AND email ILIKE $2");
        assert_eq!(q.params(), &["%mart%".to_string(), "%example.com%".to_string()]);
    }

    #[test]
    fn absent_and_blank_filters_contribute_nothing() {
        let q = ListingQuery::new(&ADMIN_USERS, "", 1)
            .contains("name", None)
            .unwrap()
            .contains("email", Some("  "))
            .unwrap();
        assert_eq!(q.where_sql(), "1=1");
        assert!(q.params().is_empty());
    }

    #[test]
    fn starting_index_and_prefix_compose_with_leading_params() {
        // owner id is bound at $1 by the caller
        let q = ListingQuery::new(&ADMIN_STORES, "s.", 2)
            .contains("name", Some("grocer"))
            .unwrap()
            .contains("address", Some("springfield"))
            .unwrap();

        assert_eq!(q.where_sql(), "s.name ILIKE $2 AND s.address ILIKE $3");
        assert_eq!(q.order_sql(), "ORDER BY s.name ASC");
    }

    #[test]
    fn sort_injection_is_rejected_before_clause_assembly() {
        let err = ListingQuery::new(&ADMIN_USERS, "", 1)
            .order(Some("1=1"), None)
            .unwrap_err();
        assert!(matches!(err, ListingError::InvalidSortField(_)));

        let err = ListingQuery::new(&ADMIN_USERS, "", 1)
            .order(Some("name; DROP TABLE users"), None)
            .unwrap_err();
        assert!(matches!(err, ListingError::InvalidSortField(_)));
    }

    #[test]
    fn sort_columns_are_surface_specific() {
        // role is sortable on the user surface but not on store surfaces
        assert!(ListingQuery::new(&ADMIN_USERS, "", 1)
            .order(Some("role"), None)
            .is_ok());
        assert!(ListingQuery::new(&USER_STORES, "s.", 2)
            .order(Some("role"), None)
            .is_err());
    }

    #[test]
    fn order_direction_is_normalized_case_insensitively() {
        let q = ListingQuery::new(&ADMIN_USERS, "", 1)
            .order(Some("email"), Some("DESC"))
            .unwrap();
        assert_eq!(q.order_sql(), "ORDER BY email DESC");

        let q = ListingQuery::new(&ADMIN_USERS, "", 1)
            .order(Some("email"), Some("Asc"))
            .unwrap();
        assert_eq!(q.order_sql(), "ORDER BY email ASC");

        let err = ListingQuery::new(&ADMIN_USERS, "", 1)
            .order(Some("email"), Some("sideways"))
            .unwrap_err();
        assert!(matches!(err, ListingError::InvalidSortOrder(_)));
    }

    #[test]
    fn unknown_filter_field_is_rejected() {
        let err = ListingQuery::new(&USER_STORES, "s.", 2)
            .contains("email", Some("x"))
            .unwrap_err();
        assert!(matches!(err, ListingError::UnknownFilterField(_)));
    }
}
