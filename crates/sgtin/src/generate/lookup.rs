//! Label template lookup, supplied by the caller.

use std::collections::HashMap;
use std::path::PathBuf;

/// Resolves the print template for a customer and label size.
pub trait TemplateLookup {
    fn lookup(&self, customer: &str, label_size: &str) -> Option<PathBuf>;
}

impl<F> TemplateLookup for F
where
    F: Fn(&str, &str) -> Option<PathBuf>,
{
    fn lookup(&self, customer: &str, label_size: &str) -> Option<PathBuf> {
        self(customer, label_size)
    }
}

impl TemplateLookup for HashMap<(String, String), PathBuf> {
    fn lookup(&self, customer: &str, label_size: &str) -> Option<PathBuf> {
        self.get(&(customer.to_string(), label_size.to_string()))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(lookup: &dyn TemplateLookup, customer: &str, size: &str) -> Option<PathBuf> {
        lookup.lookup(customer, size)
    }

    #[test]
    fn test_map_lookup() {
        let mut table = HashMap::new();
        table.insert(
            ("Acme".to_string(), "2x1".to_string()),
            PathBuf::from("templates/Acme/2x1/Template 2x1.btw"),
        );
        assert_eq!(
            resolve(&table, "Acme", "2x1"),
            Some(PathBuf::from("templates/Acme/2x1/Template 2x1.btw"))
        );
        assert_eq!(resolve(&table, "Acme", "4x6"), None);
    }

    #[test]
    fn test_closure_lookup() {
        let lookup = |customer: &str, size: &str| {
            Some(PathBuf::from(format!("{customer}/{size}/Template {size}.btw")))
        };
        assert_eq!(
            resolve(&lookup, "Acme", "2x1"),
            Some(PathBuf::from("Acme/2x1/Template 2x1.btw"))
        );
    }
}
