use stocky::manager::{ManagerError, SearchRequest, SortOrder, StockImageManager};
use stocky::providers::MockProvider;

fn two_provider_manager(attribution: bool) -> StockImageManager {
    StockImageManager::with_providers(
        vec![
            Box::new(MockProvider::new("pexels", "Pexels")),
            Box::new(MockProvider::new("unsplash", "Unsplash")),
        ],
        attribution,
    )
}

#[tokio::test]
async fn search_fans_out_to_all_registered_providers() {
    let manager = two_provider_manager(true);

    let response = manager
        .search(SearchRequest::new("coffee"))
        .await
        .unwrap();

    assert_eq!(response.query, "coffee");
    assert_eq!(response.providers, vec!["pexels", "unsplash"]);

    for name in ["pexels", "unsplash"] {
        let results = response.provider_results(name).unwrap();
        assert_eq!(results.len(), 20);
        for result in results {
            assert!(!result.id.is_empty());
            assert!(!result.url.is_empty());
            assert!(!result.thumbnail.is_empty());
            assert!(result.width > 0 && result.height > 0);
        }
    }
}

#[tokio::test]
async fn single_provider_search_returns_requested_page_size() {
    let manager = two_provider_manager(true);

    let response = manager
        .search(
            SearchRequest::new("coffee")
                .with_providers(vec!["pexels".to_string()])
                .with_paging(5, 1),
        )
        .await
        .unwrap();

    assert_eq!(response.providers, vec!["pexels"]);
    let results = response.provider_results("pexels").unwrap();
    assert_eq!(results.len(), 5);
    assert!(results.iter().all(|r| r.id.starts_with("pexels_")));
    assert!(results.iter().all(|r| r.source == "Pexels"));
    assert!(response.provider_results("unsplash").is_none());
}

#[tokio::test]
async fn result_map_preserves_requested_provider_order() {
    let manager = two_provider_manager(true);

    let response = manager
        .search(
            SearchRequest::new("coffee")
                .with_providers(vec!["unsplash".to_string(), "pexels".to_string()]),
        )
        .await
        .unwrap();

    assert_eq!(response.providers, vec!["unsplash", "pexels"]);

    // The serialized results map keeps the fan-out order too.
    let json = serde_json::to_string(&response).unwrap();
    let results_section = json.find("\"results\"").unwrap();
    let unsplash_at = json[results_section..].find("\"unsplash\"").unwrap();
    let pexels_at = json[results_section..].find("\"pexels\"").unwrap();
    assert!(unsplash_at < pexels_at);
}

#[tokio::test]
async fn attribution_follows_config_default() {
    let redacted = two_provider_manager(false)
        .search(SearchRequest::new("coffee"))
        .await
        .unwrap();
    for (_, images) in &redacted.results {
        assert!(images.iter().all(|i| i.attribution_url.is_none()));
    }

    let included = two_provider_manager(true)
        .search(SearchRequest::new("coffee"))
        .await
        .unwrap();
    for (_, images) in &included.results {
        assert!(images.iter().all(|i| i.attribution_url.is_some()));
    }
}

#[tokio::test]
async fn attribution_parameter_overrides_config_default() {
    let manager = two_provider_manager(false);

    let response = manager
        .search(SearchRequest::new("coffee").with_attribution(true))
        .await
        .unwrap();
    for (_, images) in &response.results {
        assert!(images.iter().all(|i| i.attribution_url.is_some()));
    }

    let manager = two_provider_manager(true);
    let response = manager
        .search(SearchRequest::new("coffee").with_attribution(false))
        .await
        .unwrap();
    for (_, images) in &response.results {
        assert!(images.iter().all(|i| i.attribution_url.is_none()));
    }
}

#[tokio::test]
async fn unknown_provider_names_are_dropped_silently() {
    let manager = two_provider_manager(true);

    let response = manager
        .search(
            SearchRequest::new("coffee")
                .with_providers(vec!["pexels".to_string(), "nonexistent".to_string()]),
        )
        .await
        .unwrap();

    assert_eq!(response.providers, vec!["pexels"]);
}

#[tokio::test]
async fn all_unknown_providers_is_an_error() {
    let manager = two_provider_manager(true);

    let err = manager
        .search(SearchRequest::new("coffee").with_providers(vec!["nonexistent".to_string()]))
        .await
        .unwrap_err();

    assert!(matches!(err, ManagerError::NoAvailableProviders { .. }));
    assert!(err.to_string().contains("nonexistent"));
}

#[tokio::test]
async fn empty_registry_is_an_error() {
    let manager = StockImageManager::with_providers(Vec::new(), true);

    let err = manager
        .search(SearchRequest::new("coffee"))
        .await
        .unwrap_err();

    assert!(matches!(err, ManagerError::NoProvidersConfigured));
}

#[tokio::test]
async fn failing_provider_degrades_to_empty_list() {
    let manager = StockImageManager::with_providers(
        vec![
            Box::new(MockProvider::new("pexels", "Pexels")),
            Box::new(MockProvider::new("unsplash", "Unsplash").with_failure()),
        ],
        true,
    );

    let response = manager
        .search(SearchRequest::new("coffee").with_paging(5, 1))
        .await
        .unwrap();

    // The failing provider still appears in the aggregate, just empty.
    assert_eq!(response.providers, vec!["pexels", "unsplash"]);
    assert_eq!(response.provider_results("pexels").unwrap().len(), 5);
    assert!(response.provider_results("unsplash").unwrap().is_empty());
}

#[tokio::test]
async fn image_id_round_trips_through_details() {
    let manager = two_provider_manager(true);

    let response = manager
        .search(
            SearchRequest::new("coffee")
                .with_providers(vec!["pexels".to_string()])
                .with_paging(3, 1),
        )
        .await
        .unwrap();
    let first_id = response.provider_results("pexels").unwrap()[0].id.clone();

    let details = manager.get_image_details(&first_id, None).await.unwrap();
    assert_eq!(details.id, first_id);
}

#[tokio::test]
async fn details_with_unknown_prefix_is_unknown_provider() {
    let manager = two_provider_manager(true);

    let err = manager
        .get_image_details("bogus_id_no_prefix_match", None)
        .await
        .unwrap_err();

    assert!(matches!(err, ManagerError::UnknownProvider(_)));
    assert_eq!(err.to_string(), "Unknown provider: bogus");
}

#[tokio::test]
async fn malformed_id_without_separator_is_not_found() {
    let manager = two_provider_manager(true);

    let err = manager.get_image_details("noseparator", None).await.unwrap_err();

    assert!(matches!(err, ManagerError::ImageNotFound));
    assert_eq!(err.to_string(), "Image not found");
}

#[tokio::test]
async fn details_for_missing_image_is_not_found() {
    let manager = two_provider_manager(true);

    let err = manager
        .get_image_details("pexels_missing", None)
        .await
        .unwrap_err();

    assert!(matches!(err, ManagerError::ImageNotFound));
}

#[tokio::test]
async fn details_attribution_redaction_applies_to_single_record() {
    let manager = two_provider_manager(true);

    let details = manager
        .get_image_details("unsplash_abc", Some(false))
        .await
        .unwrap();
    assert!(details.attribution_url.is_none());

    let details = manager.get_image_details("unsplash_abc", None).await.unwrap();
    assert!(details.attribution_url.is_some());
}

#[test]
fn sort_hint_parses_leniently() {
    assert_eq!(SortOrder::from_hint("newest"), SortOrder::Newest);
    assert_eq!(SortOrder::from_hint("latest"), SortOrder::Newest);
    assert_eq!(SortOrder::from_hint("POPULAR"), SortOrder::Popular);
    assert_eq!(SortOrder::from_hint("relevant"), SortOrder::Relevant);
    assert_eq!(SortOrder::from_hint("whatever"), SortOrder::Relevant);
}
