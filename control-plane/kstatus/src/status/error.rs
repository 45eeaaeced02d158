use std::fmt;
use std::sync::Arc;

use crate::store::StoreError;

#[derive(thiserror::Error, Debug)]
pub enum StatusError {
    #[error("failed to fetch {reference}: {source}")]
    Fetch {
        reference: String,
        #[source]
        source: StoreError,
    },
    #[error("failed to evaluate {reference}: {message}")]
    Evaluate { reference: String, message: String },
}

/// Every per-item error of a batch, in input order.
#[derive(Debug, Clone)]
pub struct AggregateError(Vec<Arc<StatusError>>);

impl AggregateError {
    /// `None` when `errors` is empty.
    pub fn new(errors: Vec<Arc<StatusError>>) -> Option<Self> {
        (!errors.is_empty()).then_some(Self(errors))
    }

    pub fn errors(&self) -> &[Arc<StatusError>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let [only] = self.0.as_slice() {
            return write!(f, "{}", only);
        }
        f.write_str("[")?;
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", e)?;
        }
        f.write_str("]")
    }
}

impl std::error::Error for AggregateError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluate(name: &str) -> Arc<StatusError> {
        Arc::new(StatusError::Evaluate {
            reference: format!("Widget.example.io/{}", name),
            message: "bad status".into(),
        })
    }

    #[test]
    fn empty_aggregate_is_none() {
        assert!(AggregateError::new(Vec::new()).is_none());
    }

    #[test]
    fn aggregate_display() {
        let one = AggregateError::new(vec![evaluate("a")]).unwrap();
        assert_eq!(
            one.to_string(),
            "failed to evaluate Widget.example.io/a: bad status"
        );

        let two = AggregateError::new(vec![evaluate("a"), evaluate("b")]).unwrap();
        assert_eq!(two.len(), 2);
        assert_eq!(
            two.to_string(),
            "[failed to evaluate Widget.example.io/a: bad status, \
             failed to evaluate Widget.example.io/b: bad status]"
        );
    }
}
