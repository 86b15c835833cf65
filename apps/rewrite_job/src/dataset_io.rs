use crate::dataset::Dataset;
use crate::error::JobError;
use crate::storage::{ObjectLocation, ObjectStore};

pub async fn read_dataset<S>(store: &S, location: &ObjectLocation) -> Result<Dataset, JobError>
where
    S: ObjectStore + ?Sized,
{
    let bytes = store
        .get_object(location)
        .await
        .map_err(|source| JobError::SourceUnavailable {
            location: location.clone(),
            source,
        })?;

    tracing::debug!(location = %location, bytes = bytes.len(), "Fetched source object");
    Ok(Dataset::from_csv(&bytes)?)
}

/// Serializes first, so a dataset that cannot be encoded never reaches the
/// store.
pub async fn write_dataset<S>(
    store: &S,
    dataset: &Dataset,
    location: &ObjectLocation,
) -> Result<(), JobError>
where
    S: ObjectStore + ?Sized,
{
    let body = dataset.to_csv()?;
    let size = body.len();

    store
        .put_object(location, body)
        .await
        .map_err(|source| JobError::DestinationUnavailable {
            location: location.clone(),
            source,
        })?;

    tracing::debug!(location = %location, bytes = size, "Stored destination object");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use crate::storage::InMemoryObjectStore;

    #[tokio::test]
    async fn round_trips_through_store() {
        let store = InMemoryObjectStore::new();
        let location = ObjectLocation::new("bucket", "data.csv");
        let dataset = Dataset::new(
            vec!["id".to_string(), "text".to_string()],
            vec![
                vec!["1".to_string(), "hello world".to_string()],
                vec!["2".to_string(), "second row".to_string()],
            ],
        )
        .unwrap();

        write_dataset(&store, &dataset, &location).await.unwrap();
        let read_back = read_dataset(&store, &location).await.unwrap();

        assert_eq!(read_back, dataset);
    }

    #[tokio::test]
    async fn missing_source_is_unavailable() {
        let store = InMemoryObjectStore::new();
        let err = read_dataset(&store, &ObjectLocation::new("bucket", "nope.csv"))
            .await
            .unwrap_err();
        assert!(matches!(err, JobError::SourceUnavailable { .. }));
    }

    #[tokio::test]
    async fn unparseable_source_is_a_parse_error() {
        let store = InMemoryObjectStore::new();
        let location = ObjectLocation::new("bucket", "bad.csv");
        store.insert(location.clone(), "a,b\n1,2,3\n");

        let err = read_dataset(&store, &location).await.unwrap_err();
        assert!(matches!(err, JobError::Parse(ParseError::Record { .. })));
    }

    #[tokio::test]
    async fn empty_source_is_a_parse_error() {
        let store = InMemoryObjectStore::new();
        let location = ObjectLocation::new("bucket", "empty.csv");
        store.insert(location.clone(), "");

        let err = read_dataset(&store, &location).await.unwrap_err();
        assert!(matches!(err, JobError::Parse(ParseError::Malformed(_))), "{:?}", err);
    }
}
