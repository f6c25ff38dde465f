use std::collections::HashMap;

#[derive(Debug, Eq, Hash, PartialEq)]
pub(crate) enum Field {
    Date,
    Title,
    Measure,
    Items,
    Name,
    Rate,
    Advance,
    Discount,
    TaxRate,
}

#[derive(Debug)]
pub(crate) struct ValidationResult {
    errors: HashMap<Field, Vec<String>>,
}

impl ValidationResult {
    pub(crate) fn new() -> Self {
        Self {
            errors: HashMap::new(),
        }
    }

    pub(crate) fn clear_for_field(&mut self, field: &Field) {
        self.errors.remove(field);
    }

    pub(crate) fn is_ok(&self) -> bool {
        !self.has_errors()
    }

    pub(crate) fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub(crate) fn get_errors(&self, field: &Field) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    pub(crate) fn add_error(&mut self, field: Field, msg: String) {
        self.errors.entry(field).or_default().push(msg);
    }

    pub(crate) fn merge(&mut self, other: ValidationResult) {
        other
            .errors
            .into_iter()
            .for_each(|(field, msgs)| self.errors.entry(field).or_default().extend(msgs));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_errors_per_field() {
        let mut result = ValidationResult::new();
        assert!(result.is_ok());
        result.add_error(Field::Title, "a".into());
        result.add_error(Field::Title, "b".into());
        result.add_error(Field::Rate, "c".into());
        assert!(result.has_errors());
        assert_eq!(result.get_errors(&Field::Title).map(|e| e.len()), Some(2));
        assert!(result.get_errors(&Field::Name).is_none());
    }

    #[test]
    fn clearing_all_fields_makes_it_ok() {
        let mut result = ValidationResult::new();
        result.add_error(Field::Measure, "missing".into());
        result.clear_for_field(&Field::Title);
        assert!(!result.is_ok());
        result.clear_for_field(&Field::Measure);
        assert!(result.is_ok());
    }

    #[test]
    fn merge_appends_errors() {
        let mut result = ValidationResult::new();
        result.add_error(Field::Date, "invalid".into());
        let mut other = ValidationResult::new();
        other.add_error(Field::Date, "also invalid".into());
        other.add_error(Field::Items, "no items".into());
        result.merge(other);
        assert_eq!(result.get_errors(&Field::Date).map(|e| e.len()), Some(2));
        assert!(result.get_errors(&Field::Items).is_some());
    }
}
