// Id-keyed lookup shared by tasks and column headers

/// Anything held in an ordered, id-addressed collection
pub trait Record {
    /// Unique identifier, immutable for the record's lifetime
    fn id(&self) -> &str;
}

/// Index of the first record with the given id
pub fn position_of<T: Record>(items: &[T], id: &str) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct TestRecord {
        id: String,
    }

    impl Record for TestRecord {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn records(ids: &[&str]) -> Vec<TestRecord> {
        ids.iter().map(|id| TestRecord { id: id.to_string() }).collect()
    }

    #[test]
    fn test_position_of_found() {
        let items = records(&["a", "b", "c"]);
        assert_eq!(position_of(&items, "a"), Some(0));
        assert_eq!(position_of(&items, "c"), Some(2));
    }

    #[test]
    fn test_position_of_missing() {
        let items = records(&["a", "b"]);
        assert_eq!(position_of(&items, "z"), None);
        assert_eq!(position_of::<TestRecord>(&[], "a"), None);
    }

    #[test]
    fn test_position_of_returns_first_duplicate() {
        let items = records(&["x", "y", "x"]);
        assert_eq!(position_of(&items, "x"), Some(0));
    }
}
