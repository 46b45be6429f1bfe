/// Ordered classifier labels; scores come back in the same order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelSet(Vec<String>);

impl LabelSet {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for LabelSet {
    fn from(labels: Vec<String>) -> Self {
        Self(labels)
    }
}
