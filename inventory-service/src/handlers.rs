use shared::{ListingPage, PartRequest, RequestError};
use tracing::{info, warn};

use crate::repository::{PartRepository, StoreError};

/// What a part request resolves to once the store has been consulted.
#[derive(Debug, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Stock was taken; the client should reload the listing.
    Decremented,
    /// Nothing changed; show the listing again with the message set.
    Rejected(ListingPage),
}

pub async fn list_parts(repo: &dyn PartRepository) -> Result<ListingPage, StoreError> {
    info!("Page refresh");
    let partlist = repo.list_parts().await?;
    Ok(ListingPage::new(partlist))
}

pub async fn request_parts(
    repo: &dyn PartRepository,
    part_requested: Option<&str>,
    amount_requested: Option<&str>,
) -> Result<RequestOutcome, StoreError> {
    info!(
        part = ?part_requested,
        quantity = ?amount_requested,
        "Received part request"
    );

    let error = match PartRequest::parse(part_requested, amount_requested) {
        Ok(request) => {
            let outcome = repo.decrement(&request.part_no, request.amount).await?;
            match request.check(outcome) {
                Ok(remaining) => {
                    info!(part = %request.part_no, amount = request.amount, remaining, "Part quantity decremented");
                    return Ok(RequestOutcome::Decremented);
                }
                Err(error) => error,
            }
        }
        Err(error) => error,
    };

    reject(repo, error).await
}

async fn reject(repo: &dyn PartRepository, error: RequestError) -> Result<RequestOutcome, StoreError> {
    warn!("Part request rejected: {}", error);
    let partlist = repo.list_parts().await?;
    Ok(RequestOutcome::Rejected(ListingPage::with_message(partlist, &error)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::in_memory::InMemoryPartRepository;
    use shared::Part;

    fn rejected_message(outcome: RequestOutcome) -> String {
        match outcome {
            RequestOutcome::Rejected(page) => page.message,
            RequestOutcome::Decremented => panic!("expected a rejection"),
        }
    }

    #[tokio::test]
    async fn listing_has_no_message_and_is_repeatable() {
        let repo = InMemoryPartRepository::seeded(&[("P100", 10), ("P200", 2)]);
        let first = list_parts(&repo).await.unwrap();
        let second = list_parts(&repo).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.message, "");
        assert_eq!(first.partlist, vec![Part::new("P100", 10), Part::new("P200", 2)]);
    }

    #[tokio::test]
    async fn successful_request_updates_listing() {
        let repo = InMemoryPartRepository::seeded(&[("P100", 10)]);
        let outcome = request_parts(&repo, Some("P100"), Some("4")).await.unwrap();
        assert_eq!(outcome, RequestOutcome::Decremented);

        let page = list_parts(&repo).await.unwrap();
        assert_eq!(page.partlist, vec![Part::new("P100", 6)]);
    }

    #[tokio::test]
    async fn insufficient_quantity_keeps_stock() {
        let repo = InMemoryPartRepository::seeded(&[("P100", 3)]);
        let outcome = request_parts(&repo, Some("P100"), Some("5")).await.unwrap();
        match outcome {
            RequestOutcome::Rejected(page) => {
                assert_eq!(
                    page.message,
                    "INSUFFICIENT QUANTITY FOR P100; inventory = 3, requested = 5"
                );
                assert_eq!(page.partlist, vec![Part::new("P100", 3)]);
            }
            RequestOutcome::Decremented => panic!("expected a rejection"),
        }
        assert_eq!(repo.get_quantity("P100").await.unwrap(), Some(3));
        assert_eq!(repo.write_count(), 0);
    }

    #[tokio::test]
    async fn invalid_amount_never_reaches_store() {
        let repo = InMemoryPartRepository::seeded(&[("P100", 10)]);
        let outcome = request_parts(&repo, Some("P100"), Some("abc")).await.unwrap();
        assert_eq!(rejected_message(outcome), "QUANTITY MUST BE A VALID INTEGER");

        let outcome = request_parts(&repo, Some("P100"), Some("-2")).await.unwrap();
        assert_eq!(rejected_message(outcome), "QUANTITY MUST BE A VALID INTEGER");

        assert_eq!(repo.write_count(), 0);
        assert_eq!(repo.get_quantity("P100").await.unwrap(), Some(10));
    }

    #[tokio::test]
    async fn unknown_part_is_reported() {
        let repo = InMemoryPartRepository::seeded(&[("P100", 10)]);
        let outcome = request_parts(&repo, Some("ZZZ"), Some("1")).await.unwrap();
        assert_eq!(rejected_message(outcome), "PART NOT FOUND: ZZZ");
    }

    #[tokio::test]
    async fn missing_part_field_is_invalid() {
        let repo = InMemoryPartRepository::seeded(&[("P100", 10)]);
        let outcome = request_parts(&repo, None, Some("1")).await.unwrap();
        assert_eq!(rejected_message(outcome), "INVALID PART NUMBER / QUANTITY");
        assert_eq!(repo.write_count(), 0);
    }

    #[tokio::test]
    async fn repeated_requests_stop_when_stock_runs_short() {
        let repo = InMemoryPartRepository::seeded(&[("P100", 10)]);
        for _ in 0..3 {
            let outcome = request_parts(&repo, Some("P100"), Some("3")).await.unwrap();
            assert_eq!(outcome, RequestOutcome::Decremented);
        }
        let outcome = request_parts(&repo, Some("P100"), Some("3")).await.unwrap();
        assert_eq!(
            rejected_message(outcome),
            "INSUFFICIENT QUANTITY FOR P100; inventory = 1, requested = 3"
        );
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let repo = InMemoryPartRepository::seeded(&[("P100", 10)]);
        repo.fail();
        assert!(matches!(
            request_parts(&repo, Some("P100"), Some("1")).await,
            Err(StoreError::Connection(_))
        ));
        assert!(list_parts(&repo).await.is_err());
    }
}
