use chrono::Utc;
use llm_gateway::TextTransformer;

use crate::dataset::Dataset;
use crate::error::JobError;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TransformSummary {
    pub rows: usize,
    pub changed: usize,
    pub unchanged: usize,
    /// Rows whose remote call failed and kept their original text.
    pub failed: usize,
}

/// Rewrites every value of `column` through `transformer`, one row at a
/// time and in row order.
///
/// A failed call keeps the original value and never stops the loop. Only the
/// text column is touched; headers, other cells and row order are preserved.
/// A missing column fails before any remote call is made.
pub async fn transform_dataset<T>(
    mut dataset: Dataset,
    column: &str,
    transformer: &T,
) -> Result<(Dataset, TransformSummary), JobError>
where
    T: TextTransformer + ?Sized,
{
    let column_index = dataset
        .column_index(column)
        .ok_or_else(|| JobError::MissingColumn {
            column: column.to_string(),
        })?;

    let mut summary = TransformSummary::default();

    for (index, cell) in dataset.column_mut(column_index).enumerate() {
        let outcome = transformer.transform(cell.as_str()).await;
        summary.rows += 1;
        if outcome.is_fallback() {
            summary.failed += 1;
        }

        let transformed = outcome.into_text();
        if transformed == *cell {
            summary.unchanged += 1;
            // identical output may also mean a silent upstream failure
            tracing::warn!(row = index, "Row {} unchanged after transformation", index);
        } else {
            summary.changed += 1;
            *cell = transformed;
        }

        tracing::debug!(
            row = index,
            "Row {} transformed at {}",
            index,
            Utc::now().to_rfc3339()
        );
    }

    Ok((dataset, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use llm_gateway::TransformerFailure;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Exclaim;

    #[async_trait]
    impl TextTransformer for Exclaim {
        async fn try_transform(&self, text: &str) -> Result<String, TransformerFailure> {
            Ok(format!("{}!", text))
        }
    }

    struct Counting {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TextTransformer for Counting {
        async fn try_transform(&self, text: &str) -> Result<String, TransformerFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(text.to_string())
        }
    }

    fn dataset(rows: &[(&str, &str)]) -> Dataset {
        Dataset::new(
            vec!["id".to_string(), "text".to_string()],
            rows.iter()
                .map(|(id, text)| vec![id.to_string(), text.to_string()])
                .collect(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn rewrites_only_the_text_column() {
        let input = dataset(&[("1", "a"), ("2", "b"), ("3", "")]);

        let (output, summary) = transform_dataset(input.clone(), "text", &Exclaim)
            .await
            .unwrap();

        assert_eq!(output.headers(), input.headers());
        assert_eq!(output.len(), input.len());
        assert_eq!(output.column("id"), input.column("id"));
        assert_eq!(output.column("text").unwrap(), vec!["a!", "b!", "!"]);
        assert_eq!(
            summary,
            TransformSummary {
                rows: 3,
                changed: 3,
                unchanged: 0,
                failed: 0
            }
        );
    }

    #[tokio::test]
    async fn identity_transform_counts_unchanged_rows() {
        let transformer = Counting {
            calls: AtomicUsize::new(0),
        };
        let input = dataset(&[("1", "same"), ("2", "also same")]);

        let (output, summary) = transform_dataset(input.clone(), "text", &transformer)
            .await
            .unwrap();

        assert_eq!(output, input);
        assert_eq!(summary.unchanged, 2);
        assert_eq!(summary.failed, 0);
        assert_eq!(transformer.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn missing_column_fails_before_any_call() {
        let transformer = Counting {
            calls: AtomicUsize::new(0),
        };
        let input = Dataset::new(vec!["body".to_string()], vec![vec!["x".to_string()]]).unwrap();

        let err = transform_dataset(input, "text", &transformer)
            .await
            .unwrap_err();

        assert!(matches!(err, JobError::MissingColumn { ref column } if column == "text"));
        assert_eq!(transformer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn works_through_trait_objects() {
        let transformer: Box<dyn TextTransformer> = Box::new(Exclaim);
        let (output, _) = transform_dataset(dataset(&[("1", "hi")]), "text", transformer.as_ref())
            .await
            .unwrap();
        assert_eq!(output.get(0, "text"), Some("hi!"));
    }
}
