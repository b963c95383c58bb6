use uuid::Uuid;

/// Generates unique, traceable names for test fixtures so concurrent tests
/// sharing a database never collide.
pub struct TestDataBuilder {
    seed: String,
}

impl TestDataBuilder {
    pub fn from_test_name(test_name: &str) -> Self {
        let suffix = Uuid::now_v7().simple().to_string();
        Self {
            seed: format!("{}-{}", test_name, &suffix[..8]),
        }
    }

    /// A unique name carrying the test's seed, e.g. `category-my_test-1a2b3c4d`.
    pub fn name(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique_across_builders() {
        let a = TestDataBuilder::from_test_name("t");
        let b = TestDataBuilder::from_test_name("t");
        assert_ne!(a.name("category"), b.name("category"));
    }

    #[test]
    fn test_name_carries_prefix_and_test_name() {
        let builder = TestDataBuilder::from_test_name("search_test");
        let name = builder.name("product");
        assert!(name.starts_with("product-search_test-"));
    }
}
